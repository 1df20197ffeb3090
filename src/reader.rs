//! Stalled reader: opens a streamed GetObject, sits on it, then drains it.
//!
//! The stall is injected after the response headers have arrived and before
//! the first body read. During the stall nothing consumes the socket, which
//! is exactly the slow-consumer condition the scenario probes.

use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::{Duration, Instant};

use aws_sdk_s3::Client;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, ReadBuf};

use crate::error::{ReproError, Result};
use crate::s3::sdk_error_message;

/// Body of a GetObject response as a plain byte reader
pub type ObjectBody = Box<dyn AsyncRead + Send + Unpin>;

/// Open stream that counts the bytes pulled through it
///
/// Dropping it releases the underlying connection. It is moved into
/// [`drain_lines`] so release happens on every return path.
pub struct ScopedStream<R> {
    inner: R,
    label: String,
    bytes_read: u64,
}

impl<R> ScopedStream<R> {
    pub fn new(inner: R, label: impl Into<String>) -> Self {
        Self {
            inner,
            label: label.into(),
            bytes_read: 0,
        }
    }

    /// Raw bytes received so far, line terminators included
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl<R: AsyncRead + Unpin> AsyncRead for ScopedStream<R> {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<std::io::Result<()>> {
        let before = buf.filled().len();
        let poll = Pin::new(&mut self.inner).poll_read(cx, buf);
        if let Poll::Ready(Ok(())) = poll {
            self.bytes_read += (buf.filled().len() - before) as u64;
        }
        poll
    }
}

impl<R> Drop for ScopedStream<R> {
    fn drop(&mut self) {
        tracing::debug!(
            stream = %self.label,
            bytes_read = self.bytes_read,
            "released download stream"
        );
    }
}

/// Lines decoded from one drained stream
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrainedLines {
    /// Decoded lines in stream order, terminators stripped
    pub lines: Vec<String>,
    /// Raw bytes pulled from the stream, terminators included
    pub raw_bytes: u64,
}

/// Issue GetObject for `s3://bucket/key` and hand back the body stream
pub async fn open_stream(client: &Client, bucket: &str, key: &str) -> Result<ScopedStream<ObjectBody>> {
    let output = client
        .get_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .map_err(|e| ReproError::OpenStream {
            bucket: bucket.to_string(),
            key: key.to_string(),
            message: sdk_error_message(e),
        })?;

    tracing::debug!(
        bucket,
        key,
        content_length = output.content_length(),
        "opened download stream"
    );

    let body: ObjectBody = Box::new(output.body.into_async_read());
    Ok(ScopedStream::new(body, format!("s3://{}/{}", bucket, key)))
}

/// Stall for `stall`, then decode `stream` as UTF-8 lines until end of input
///
/// A line ends at `\n`, `\r\n` or a lone `\r`; terminators are stripped.
/// Any read, timeout, reset or decode error aborts the drain and is returned
/// with the byte count reached.
pub async fn drain_lines<R>(stream: ScopedStream<R>, stall: Duration) -> Result<DrainedLines>
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(stream);

    if !stall.is_zero() {
        tracing::info!(
            stream = %reader.get_ref().label(),
            stall_ms = stall.as_millis() as u64,
            "stalling before first read"
        );
        tokio::time::sleep(stall).await;
    }

    let mut lines = Vec::new();
    let mut segment = Vec::new();
    loop {
        segment.clear();
        let n = reader
            .read_until(b'\n', &mut segment)
            .await
            .and_then(|n| split_segment(&segment, &mut lines).map(|()| n))
            .map_err(|source| ReproError::Stream {
                bytes_read: reader.get_ref().bytes_read(),
                source,
            })?;
        if n == 0 {
            break;
        }
    }

    Ok(DrainedLines {
        lines,
        raw_bytes: reader.get_ref().bytes_read(),
    })
}

/// Decode one `\n`-bounded segment, which may hold lone `\r` terminators
fn split_segment(segment: &[u8], lines: &mut Vec<String>) -> std::io::Result<()> {
    if segment.is_empty() {
        return Ok(());
    }

    let body = segment.strip_suffix(b"\n").unwrap_or(segment);
    let mut parts: Vec<&[u8]> = body.split(|b| *b == b'\r').collect();
    // A trailing `\r` terminates the last line rather than starting a new one.
    if body.ends_with(b"\r") {
        parts.pop();
    }

    for part in parts {
        let line = String::from_utf8(part.to_vec())
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        lines.push(line);
    }
    Ok(())
}

/// Result of one stalled read
#[derive(Debug, Clone)]
pub struct StalledRead {
    pub lines: Vec<String>,
    pub raw_bytes: u64,
    /// Wall time from opening the stream to end of input, stall included
    pub elapsed: Duration,
}

/// Reads an object with a fixed pause between open and first read
#[derive(Debug, Clone, Copy)]
pub struct StalledReader {
    stall: Duration,
}

impl StalledReader {
    pub fn new(stall: Duration) -> Self {
        Self { stall }
    }

    pub async fn read_object(&self, client: &Client, bucket: &str, key: &str) -> Result<StalledRead> {
        let started = Instant::now();
        let stream = open_stream(client, bucket, key).await?;

        let drained = match drain_lines(stream, self.stall).await {
            Ok(drained) => drained,
            Err(err) => {
                tracing::error!(
                    bucket,
                    key,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    error = %err,
                    "download stream failed"
                );
                return Err(err);
            }
        };

        let elapsed = started.elapsed();
        tracing::info!(
            bucket,
            key,
            lines = drained.lines.len(),
            raw_bytes = drained.raw_bytes,
            elapsed_ms = elapsed.as_millis() as u64,
            "drained download stream"
        );

        Ok(StalledRead {
            lines: drained.lines,
            raw_bytes: drained.raw_bytes,
            elapsed,
        })
    }
}
