use std::path::PathBuf;

use memchr::memchr;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("invalid repository url: '{0}'")]
    InvalidTemplateUrl(String),
    #[error("failed to fetch template: {0}")]
    Fetch(String),
    #[error("destination already exists: '{}'", .0.display())]
    DestinationExists(PathBuf),
    #[error("image generation failed: {0}")]
    Generation(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

pub(crate) fn is_binary_buf(buf: &[u8]) -> bool {
    memchr(0u8, buf).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_buf_detects_nul() {
        assert!(is_binary_buf(b"\x89PNG\r\n\x1a\n\x00\x00"));
        assert!(!is_binary_buf(b"plain text, no nul bytes"));
    }
}
