//! Utilities
//!
use std::{fs, path::Path};
use log::*;
use crate::error::{Result, SpireError};

/// Read a file into a byte vector.
pub fn readfile(
    path: &Path,
) -> Result<Vec<u8>>
{
    debug!("readfile: {}", path.display());
    fs::read(path)
        .map_err(|e| SpireError::io(path, e))
}

/// Write `contents` to a file, truncating it if it exists.
pub fn writefile(
    path: &Path,
    contents: &[u8],
) -> Result<()>
{
    debug!("writefile: {}", path.display());
    fs::write(path, contents)
        .map_err(|e| SpireError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn unit_readfile_missing() {
        let scratch = TempDir::new().unwrap();
        let result = readfile(&scratch.path().join("does-not-exist"));
        assert!(matches!(result, Err(SpireError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound));
    }

    #[test]
    fn unit_writefile_readfile() {
        let scratch = TempDir::new().unwrap();
        let path = scratch.path().join("contents");
        writefile(&path, b"contents").unwrap();
        assert_eq!(readfile(&path).unwrap(), b"contents");
    }
}
