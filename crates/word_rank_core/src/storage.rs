use sha2::{Digest, Sha256};

pub const DEFAULT_BUCKET: &str = "tech-chall-bucket";
pub const DEFAULT_OBJECT_KEY: &str = "top_10_words.json";
pub const DEFAULT_URL_EXPIRY_SECS: u64 = 3_600;
/// Longest expiry S3 accepts for a presigned request (seven days).
pub const MAX_URL_EXPIRY_SECS: u64 = 604_800;
pub const RESULT_CONTENT_TYPE: &str = "application/json";

/// Bucket and key of the single result object. Every invocation overwrites it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectLocation {
    pub bucket: String,
    pub key: String,
}

impl ObjectLocation {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }
}

impl Default for ObjectLocation {
    fn default() -> Self {
        Self::new(DEFAULT_BUCKET, DEFAULT_OBJECT_KEY)
    }
}

impl std::fmt::Display for ObjectLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "s3://{}/{}", self.bucket, self.key)
    }
}

pub fn content_fingerprint(body: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(body);
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_location_is_fixed_result_object() {
        let location = ObjectLocation::default();
        assert_eq!(location.to_string(), "s3://tech-chall-bucket/top_10_words.json");
    }

    #[test]
    fn fingerprint_is_stable_for_identical_content() {
        let first = content_fingerprint(br#"{"a":2,"b":1}"#);
        let second = content_fingerprint(br#"{"a":2,"b":1}"#);
        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
        assert_ne!(first, content_fingerprint(br#"{"a":1}"#));
    }
}
