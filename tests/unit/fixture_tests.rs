// Fixture preparation tests against a mocked S3 client
//
// Operations are answered by aws-smithy-mocks rules, so the bucket and
// upload branches run without a backend.

use aws_sdk_s3::error::ErrorMetadata;
use aws_sdk_s3::operation::create_bucket::{CreateBucketError, CreateBucketOutput};
use aws_sdk_s3::operation::head_bucket::HeadBucketError;
use aws_sdk_s3::operation::head_object::HeadObjectOutput;
use aws_sdk_s3::operation::put_object::PutObjectOutput;
use aws_sdk_s3::types::error::{BucketAlreadyOwnedByYou, NotFound};
use aws_smithy_mocks::{mock, mock_client, RuleMode};
use s3_stall_repro::fixture::{ensure_bucket, upload_payload, write_payload};
use s3_stall_repro::ReproError;

#[tokio::test]
async fn test_missing_bucket_is_created() {
    let head = mock!(aws_sdk_s3::Client::head_bucket)
        .then_error(|| HeadBucketError::NotFound(NotFound::builder().build()));
    let create = mock!(aws_sdk_s3::Client::create_bucket)
        .then_output(|| CreateBucketOutput::builder().build());
    let client = mock_client!(aws_sdk_s3, RuleMode::MatchAny, [&head, &create]);

    ensure_bucket(&client, "test-bucket")
        .await
        .expect("bucket should be created");

    assert_eq!(head.num_calls(), 1);
    assert_eq!(create.num_calls(), 1);
}

#[tokio::test]
async fn test_bucket_already_owned_counts_as_created() {
    let head = mock!(aws_sdk_s3::Client::head_bucket)
        .then_error(|| HeadBucketError::NotFound(NotFound::builder().build()));
    let create = mock!(aws_sdk_s3::Client::create_bucket).then_error(|| {
        CreateBucketError::BucketAlreadyOwnedByYou(BucketAlreadyOwnedByYou::builder().build())
    });
    let client = mock_client!(aws_sdk_s3, RuleMode::MatchAny, [&head, &create]);

    let result = ensure_bucket(&client, "test-bucket").await;

    assert!(result.is_ok(), "already owned should succeed: {:?}", result);
    assert_eq!(create.num_calls(), 1);
}

#[tokio::test]
async fn test_rejected_bucket_creation_fails_fast() {
    let head = mock!(aws_sdk_s3::Client::head_bucket)
        .then_error(|| HeadBucketError::NotFound(NotFound::builder().build()));
    let create = mock!(aws_sdk_s3::Client::create_bucket).then_error(|| {
        CreateBucketError::generic(
            ErrorMetadata::builder()
                .code("AccessDenied")
                .message("Access Denied")
                .build(),
        )
    });
    let client = mock_client!(aws_sdk_s3, RuleMode::MatchAny, [&head, &create]);

    let err = ensure_bucket(&client, "test-bucket").await.unwrap_err();

    match err {
        ReproError::CreateBucket { bucket, message } => {
            assert_eq!(bucket, "test-bucket");
            assert!(message.contains("AccessDenied"), "{}", message);
        }
        other => panic!("Expected CreateBucket error, got {:?}", other),
    }
    assert_eq!(create.num_calls(), 1);
}

#[tokio::test]
async fn test_stored_length_differing_from_file_is_rejected() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_payload(dir.path(), 7).await.expect("payload written");

    let put = mock!(aws_sdk_s3::Client::put_object)
        .then_output(|| PutObjectOutput::builder().build());
    let head = mock!(aws_sdk_s3::Client::head_object)
        .then_output(|| HeadObjectOutput::builder().content_length(6).build());
    let client = mock_client!(aws_sdk_s3, RuleMode::MatchAny, [&put, &head]);

    let err = upload_payload(&client, "test-bucket", "test-file", &path)
        .await
        .unwrap_err();

    match err {
        ReproError::FixtureSizeMismatch { expected, actual } => {
            assert_eq!(expected, 7);
            assert_eq!(actual, 6);
        }
        other => panic!("Expected FixtureSizeMismatch, got {:?}", other),
    }
}

#[tokio::test]
async fn test_stored_length_matching_file_is_accepted() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_payload(dir.path(), 7).await.expect("payload written");

    let put = mock!(aws_sdk_s3::Client::put_object)
        .then_output(|| PutObjectOutput::builder().build());
    let head = mock!(aws_sdk_s3::Client::head_object)
        .then_output(|| HeadObjectOutput::builder().content_length(7).build());
    let client = mock_client!(aws_sdk_s3, RuleMode::MatchAny, [&put, &head]);

    let uploaded = upload_payload(&client, "test-bucket", "test-file", &path)
        .await
        .expect("matching length is accepted");

    assert_eq!(uploaded.size, 7);
    assert_eq!(uploaded.key, "test-file");
    assert_eq!(put.num_calls(), 1);
}

#[tokio::test]
async fn test_payload_file_has_exact_size() {
    let dir = tempfile::tempdir().expect("temp dir");

    let path = write_payload(dir.path(), 12_345).await.expect("payload written");
    let bytes = std::fs::read(&path).expect("payload readable");

    assert_eq!(bytes.len(), 12_345);
    assert!(bytes.iter().all(|b| *b == 0));
    assert!(path.ends_with("testFile.txt"));
}
