use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use uuid::Uuid;

use crate::errors::AppError;

/// Composes the object key for an uploaded interview file:
/// `{ownerId}/{interviewId}-{filename}`. Owner isolation rides on the key
/// prefix plus the access checks done before any upload.
pub fn object_key(user_id: Uuid, interview_id: Uuid, file_name: &str) -> String {
    format!("{user_id}/{interview_id}-{}", sanitize_file_name(file_name))
}

/// Keeps only the final path segment and replaces characters that do not
/// belong in an object key.
fn sanitize_file_name(file_name: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name);
    base.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Uploads a file buffer to the interview bucket and returns its URL.
pub async fn upload_object(
    s3: &aws_sdk_s3::Client,
    endpoint: &str,
    bucket: &str,
    key: &str,
    bytes: Bytes,
    content_type: &str,
) -> Result<String, AppError> {
    s3.put_object()
        .bucket(bucket)
        .key(key)
        .body(ByteStream::from(bytes))
        .content_type(content_type)
        .send()
        .await
        .map_err(|e| AppError::Storage(format!("S3 upload failed: {e}")))?;

    Ok(format!("{}/{bucket}/{key}", endpoint.trim_end_matches('/')))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_owner_scoped() {
        let user = Uuid::new_v4();
        let interview = Uuid::new_v4();
        let key = object_key(user, interview, "call.mp3");
        assert_eq!(key, format!("{user}/{interview}-call.mp3"));
    }

    #[test]
    fn file_name_path_components_are_stripped() {
        let user = Uuid::new_v4();
        let interview = Uuid::new_v4();
        let key = object_key(user, interview, "../../etc/passwd");
        assert_eq!(key, format!("{user}/{interview}-passwd"));
        let key = object_key(user, interview, "C:\\temp\\rec one.wav");
        assert_eq!(key, format!("{user}/{interview}-rec_one.wav"));
    }
}
