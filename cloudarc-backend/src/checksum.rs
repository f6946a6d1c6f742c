//! Streaming MD5 of local files.

use std::path::Path;

use md5::{Digest, Md5};
use tokio::fs::File;
use tokio::io::AsyncReadExt;

/// Read size used when streaming a file through the hasher.
const CHUNK_SIZE: usize = 4096;

/// Compute the lowercase hex MD5 digest of a file's contents, streaming
/// the file through the hasher in fixed-size chunks.
pub async fn md5_hex(path: &Path) -> std::io::Result<String> {
    let mut file = File::open(path).await?;
    let mut hasher = Md5::new();
    let mut buf = [0u8; CHUNK_SIZE];
    loop {
        let n = file.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn digest_of(content: &[u8]) -> String {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file");
        tokio::fs::write(&path, content).await.unwrap();
        md5_hex(&path).await.unwrap()
    }

    #[tokio::test]
    async fn test_empty_file() {
        assert_eq!(digest_of(b"").await, "d41d8cd98f00b204e9800998ecf8427e");
    }

    #[tokio::test]
    async fn test_known_digest() {
        assert_eq!(digest_of(b"abc").await, "900150983cd24fb0d6963f7d28e17f72");
        assert_eq!(
            digest_of(b"hello world").await,
            "5eb63bbbe01eeed093cb22bb8f5acdc3"
        );
    }

    #[tokio::test]
    async fn test_multi_chunk_file_matches_one_shot() {
        // Larger than two read chunks, not chunk-aligned.
        let content: Vec<u8> = (0..u32::from(u16::MAX))
            .map(|i| (i % 251) as u8)
            .collect();
        let streamed = digest_of(&content).await;
        let one_shot = hex::encode(Md5::digest(&content));
        assert_eq!(streamed, one_shot);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(md5_hex(&dir.path().join("absent")).await.is_err());
    }
}
