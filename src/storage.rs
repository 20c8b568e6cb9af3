//! S3 access for source archives and cleaned datasets.
//!
//! Clients are built from the ambient AWS configuration
//! (`aws_config::load_from_env`).

use anyhow::{Context, Result};
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use flate2::Compression;
use flate2::write::GzEncoder;
use serde::Serialize;
use std::io::Write;
use tracing::info;

/// Builds an S3 client from the environment.
pub async fn s3_client() -> aws_sdk_s3::Client {
    let config = aws_config::load_from_env().await;
    aws_sdk_s3::Client::new(&config)
}

/// Downloads an object and returns its body.
pub async fn read_object(client: &aws_sdk_s3::Client, bucket: &str, key: &str) -> Result<Bytes> {
    let resp = client
        .get_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .with_context(|| format!("S3 GetObject failed for s3://{bucket}/{key}"))?;

    let body = resp.body.collect().await?.into_bytes();
    info!(bucket, key, bytes = body.len(), "Downloaded S3 object");
    Ok(body)
}

/// Serializes a value to JSON and uploads it to an S3 bucket with `application/json` content type.
pub async fn write_json_to_s3(
    client: &aws_sdk_s3::Client,
    bucket: &str,
    key: &str,
    value: &impl Serialize,
) -> Result<()> {
    let body = serde_json::to_vec(value)?;

    client
        .put_object()
        .bucket(bucket)
        .key(key)
        .body(body.into())
        .content_type("application/json")
        .send()
        .await
        .with_context(|| format!("S3 PutObject failed for s3://{bucket}/{key}"))?;

    info!(bucket, key, "Uploaded JSON to S3");
    Ok(())
}

/// Gzip-compresses `data` at the default level.
pub fn gzip(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Uploads raw bytes, optionally gzip-compressed.
///
/// A compressed upload gets a `.gz` suffix on its key. Returns the key used.
pub async fn upload_bytes(
    client: &aws_sdk_s3::Client,
    bucket: &str,
    key: &str,
    data: Vec<u8>,
    compress: bool,
) -> Result<String> {
    let (body, s3_key) = if compress {
        (gzip(&data)?, format!("{key}.gz"))
    } else {
        (data, key.to_string())
    };

    client
        .put_object()
        .bucket(bucket)
        .key(&s3_key)
        .body(ByteStream::from(body))
        .send()
        .await
        .with_context(|| format!("S3 PutObject failed for s3://{bucket}/{s3_key}"))?;

    info!(bucket, key = %s3_key, "Uploaded file to S3");
    Ok(s3_key)
}
