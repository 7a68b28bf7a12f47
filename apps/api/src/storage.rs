//! Object storage for resume files (S3 or MinIO).

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::info;

use crate::errors::AppError;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Uploads `body` under `bucket/key` and returns the object's public URL.
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<String, AppError>;
}

pub struct S3ObjectStore {
    client: aws_sdk_s3::Client,
    region: String,
    public_url: Option<String>,
}

impl S3ObjectStore {
    pub fn new(client: aws_sdk_s3::Client, region: String, public_url: Option<String>) -> Self {
        Self {
            client,
            region,
            public_url,
        }
    }

    fn object_url(&self, bucket: &str, key: &str) -> String {
        object_url(self.public_url.as_deref(), &self.region, bucket, key)
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<String, AppError> {
        let size = body.len();
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("S3 upload of {key} failed: {e}")))?;

        info!("Uploaded {size} bytes to s3://{bucket}/{key}");
        Ok(self.object_url(bucket, key))
    }
}

/// Path-style URL under a configured base, or the AWS virtual-host URL.
pub fn object_url(public_url: Option<&str>, region: &str, bucket: &str, key: &str) -> String {
    match public_url {
        Some(base) => format!("{}/{bucket}/{key}", base.trim_end_matches('/')),
        None => format!("https://{bucket}.s3.{region}.amazonaws.com/{key}"),
    }
}

/// Storage key for a regenerated resume.
pub fn generated_resume_key(candidate_id: i64, resume_id: i64, resume_filename: &str) -> String {
    format!("{candidate_id}_{resume_id}_{resume_filename}_generated.pdf")
}

/// Storage key for an original upload. The timestamp keeps re-uploads of the
/// same file name apart.
pub fn original_resume_key(candidate_id: i64, uploaded_at_millis: i64, filename: &str) -> String {
    format!("{candidate_id}_{uploaded_at_millis}_{filename}")
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_resume_key_format() {
        assert_eq!(
            generated_resume_key(4, 17, "jane_doe.pdf"),
            "4_17_jane_doe.pdf_generated.pdf"
        );
    }

    #[test]
    fn test_original_resume_key_format() {
        assert_eq!(
            original_resume_key(4, 1_700_000_000_000, "cv.pdf"),
            "4_1700000000000_cv.pdf"
        );
    }

    #[test]
    fn test_aws_url_when_no_public_base() {
        assert_eq!(
            object_url(None, "eu-west-1", "generated", "a.pdf"),
            "https://generated.s3.eu-west-1.amazonaws.com/a.pdf"
        );
    }

    #[test]
    fn test_public_base_url_is_path_style() {
        assert_eq!(
            object_url(Some("http://localhost:9000/"), "us-east-1", "resumes", "a.pdf"),
            "http://localhost:9000/resumes/a.pdf"
        );
    }
}
