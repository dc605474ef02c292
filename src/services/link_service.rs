//! src/services/link_service.rs
//!
//! Issues presigned `GET` URLs for a single object in an S3-compatible store.
//! Signing is computed locally by `aws-sdk-s3`; no request is sent to the
//! store, so a missing object is only discovered by whoever follows the link.

use crate::{config::ObjectStoreConfig, models::signed_url::SignedUrl};
use async_trait::async_trait;
use aws_sdk_s3::{
    Client,
    config::{BehaviorVersion, Credentials, Region},
    error::{DisplayErrorContext, SdkError},
    operation::get_object::GetObjectError,
    presigning::{PresigningConfig, PresigningConfigError},
};
use chrono::{DateTime, OutOfRangeError, TimeDelta, Utc};
use std::time::{Duration, SystemTime};
use thiserror::Error;
use tracing::debug;

/// Validity window of every issued link.
pub const LINK_TTL: Duration = Duration::from_secs(3600);

#[derive(Debug, Error)]
pub enum SignError {
    #[error("invalid presigning settings: {0}")]
    Presigning(#[from] PresigningConfigError),
    #[error("expiry window out of range: {0}")]
    ExpiryOutOfRange(#[from] OutOfRangeError),
    #[error("failed to presign `{key}` in bucket `{bucket}`: {}", DisplayErrorContext(.source))]
    Presign {
        bucket: String,
        key: String,
        source: SdkError<GetObjectError>,
    },
}

pub type SignResult<T> = Result<T, SignError>;

#[async_trait]
pub trait AssetLinkIssuer: Send + Sync + 'static {
    /// Produce a fresh signed URL for `key`, valid for `expires_in` from now.
    async fn issue(&self, key: &str, expires_in: Duration) -> SignResult<SignedUrl>;
}

/// Presigns against AWS S3 using static credentials from configuration.
#[derive(Clone, Debug)]
pub struct S3LinkIssuer {
    client: Client,
    bucket: String,
}

impl S3LinkIssuer {
    /// Build the S3 client once; it is shared by all requests.
    pub fn new(cfg: &ObjectStoreConfig) -> Self {
        let credentials = Credentials::new(
            cfg.access_key_id.clone(),
            cfg.secret_access_key.clone(),
            None,
            None,
            "environment",
        );
        let conf = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(cfg.region.clone()))
            .credentials_provider(credentials)
            .build();

        Self {
            client: Client::from_conf(conf),
            bucket: cfg.bucket.clone(),
        }
    }

    /// Sign as of `issued_at` instead of the current time.
    pub async fn issue_at(
        &self,
        key: &str,
        expires_in: Duration,
        issued_at: SystemTime,
    ) -> SignResult<SignedUrl> {
        let presigning = PresigningConfig::builder()
            .start_time(issued_at)
            .expires_in(expires_in)
            .build()?;

        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|source| SignError::Presign {
                bucket: self.bucket.clone(),
                key: key.to_string(),
                source,
            })?;

        let issued_at = DateTime::<Utc>::from(issued_at);
        let expires_at = issued_at + TimeDelta::from_std(expires_in)?;
        debug!("presigned {}/{} at {}", self.bucket, key, issued_at);

        Ok(SignedUrl {
            url: request.uri().to_string(),
            key: key.to_string(),
            issued_at,
            expires_in,
            expires_at,
        })
    }
}

#[async_trait]
impl AssetLinkIssuer for S3LinkIssuer {
    async fn issue(&self, key: &str, expires_in: Duration) -> SignResult<SignedUrl> {
        self.issue_at(key, expires_in, SystemTime::now()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn issuer() -> S3LinkIssuer {
        S3LinkIssuer::new(&ObjectStoreConfig {
            access_key_id: "AKIDEXAMPLE".into(),
            secret_access_key: "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY".into(),
            region: "us-east-1".into(),
            bucket: "showcase-assets".into(),
            object_key: "banner.jpg".into(),
        })
    }

    fn instant(hour: u32, minute: u32, second: u32) -> SystemTime {
        SystemTime::from(Utc.with_ymd_and_hms(2026, 10, 18, hour, minute, second).unwrap())
    }

    #[tokio::test]
    async fn signed_url_encodes_expiry_and_issuance() {
        let signed = issuer()
            .issue_at("banner.jpg", LINK_TTL, instant(12, 0, 0))
            .await
            .unwrap();

        assert!(signed.url.starts_with("https://"));
        assert!(signed.url.contains("showcase-assets"));
        assert!(signed.url.contains("banner.jpg"));
        assert!(signed.url.contains("X-Amz-Expires=3600"));
        assert!(signed.url.contains("X-Amz-Date=20261018T120000Z"));
        assert!(signed.url.contains("X-Amz-Signature="));
        assert!(!signed.url.contains("wJalrXUtnFEMI"));
        assert_eq!(signed.expires_in, LINK_TTL);
        assert_eq!(signed.issued_at.to_rfc3339(), "2026-10-18T12:00:00+00:00");
        assert_eq!(signed.expires_at.to_rfc3339(), "2026-10-18T13:00:00+00:00");
    }

    #[tokio::test]
    async fn later_issuance_produces_a_different_link() {
        let issuer = issuer();
        let first = issuer
            .issue_at("banner.jpg", LINK_TTL, instant(12, 0, 0))
            .await
            .unwrap();
        let second = issuer
            .issue_at("banner.jpg", LINK_TTL, instant(12, 0, 1))
            .await
            .unwrap();

        assert!(second.url.contains("X-Amz-Date=20261018T120001Z"));
        assert_ne!(first.url, second.url);
        assert!(second.issued_at > first.issued_at);
    }

    #[tokio::test]
    async fn expiry_beyond_presigning_limit_is_rejected() {
        let err = issuer()
            .issue("banner.jpg", Duration::from_secs(8 * 24 * 60 * 60))
            .await
            .unwrap_err();

        assert!(matches!(err, SignError::Presigning(_)));
    }
}
