//! Locating and loading raw disclosure sources.

use anyhow::{Context, Result, bail};
use std::path::PathBuf;

use crate::fetch::{BasicClient, fetch_bytes};
use crate::storage::{read_object, s3_client};

/// Where a raw archive or CSV lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Local(PathBuf),
    Http(String),
    S3 { bucket: String, key: String },
}

impl Source {
    /// Classifies `s` as an `s3://bucket/key` object, an HTTP(S) URL or a path.
    pub fn parse(s: &str) -> Result<Self> {
        if let Some(rest) = s.strip_prefix("s3://") {
            let (bucket, key) = rest
                .split_once('/')
                .filter(|(b, k)| !b.is_empty() && !k.is_empty())
                .with_context(|| format!("S3 source '{s}' must look like s3://bucket/key"))?;
            return Ok(Source::S3 {
                bucket: bucket.to_string(),
                key: key.to_string(),
            });
        }

        if s.starts_with("http://") || s.starts_with("https://") {
            return Ok(Source::Http(s.to_string()));
        }

        if s.trim().is_empty() {
            bail!("source must not be empty");
        }

        Ok(Source::Local(PathBuf::from(s)))
    }

    /// Reads the full contents of the source.
    #[tracing::instrument(skip(self), fields(source = %self))]
    pub async fn load(&self) -> Result<Vec<u8>> {
        match self {
            Source::Local(path) => std::fs::read(path)
                .with_context(|| format!("failed to read '{}'", path.display())),
            Source::Http(url) => {
                let client = BasicClient::new()?;
                fetch_bytes(&client, url).await
            }
            Source::S3 { bucket, key } => {
                let client = s3_client().await;
                Ok(read_object(&client, bucket, key).await?.to_vec())
            }
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Local(path) => write!(f, "{}", path.display()),
            Source::Http(url) => write!(f, "{url}"),
            Source::S3 { bucket, key } => write!(f, "s3://{bucket}/{key}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_s3() {
        assert_eq!(
            Source::parse("s3://esg-raw/six/EUESGMANUFACTURER-LIGHT.zip").unwrap(),
            Source::S3 {
                bucket: "esg-raw".to_string(),
                key: "six/EUESGMANUFACTURER-LIGHT.zip".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_s3_requires_key() {
        assert!(Source::parse("s3://esg-raw").is_err());
        assert!(Source::parse("s3://esg-raw/").is_err());
        assert!(Source::parse("s3:///key").is_err());
    }

    #[test]
    fn test_parse_http_and_local() {
        assert_eq!(
            Source::parse("https://example.com/esg.zip").unwrap(),
            Source::Http("https://example.com/esg.zip".to_string())
        );
        assert_eq!(
            Source::parse("../ESG/EUESGMANUFACTURER-LIGHT.zip").unwrap(),
            Source::Local(PathBuf::from("../ESG/EUESGMANUFACTURER-LIGHT.zip"))
        );
        assert!(Source::parse("  ").is_err());
    }

    #[test]
    fn test_display_round_trips() {
        let raw = "s3://bucket/a/b.zip";
        assert_eq!(Source::parse(raw).unwrap().to_string(), raw);
    }

    #[tokio::test]
    async fn test_load_local_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"ISIN\nA\n").unwrap();

        let source = Source::Local(file.path().to_path_buf());
        assert_eq!(source.load().await.unwrap(), b"ISIN\nA\n");
    }

    #[tokio::test]
    async fn test_load_missing_local_file() {
        let source = Source::Local(PathBuf::from("/nonexistent/esg.zip"));
        assert!(source.load().await.is_err());
    }
}
