//! Reading and writing SQL files.

use std::borrow::Cow;
use std::path::Path;

use encoding_rs::{Encoding, WINDOWS_1252};

use crate::error::FormatError;

/// Read a SQL file as text.
///
/// A byte order mark selects UTF-8, UTF-16LE or UTF-16BE, and the file must
/// then decode cleanly in that encoding. Without a BOM, UTF-8 is tried first
/// and anything else is read as Windows-1252, which is what SQL Server
/// tooling on Windows tends to write.
pub fn read_sql_file(path: &Path) -> Result<String, FormatError> {
    let bytes = std::fs::read(path).map_err(|e| FormatError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if let Some((encoding, bom_len)) = Encoding::for_bom(&bytes) {
        return encoding
            .decode_without_bom_handling_and_without_replacement(&bytes[bom_len..])
            .map(Cow::into_owned)
            .ok_or_else(|| FormatError::InvalidEncoding {
                path: path.to_path_buf(),
                encoding: encoding.name(),
            });
    }

    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => {
            // Every byte maps to a character in Windows-1252
            let (decoded, _) = WINDOWS_1252.decode_without_bom_handling(e.as_bytes());
            tracing::debug!("{} is not UTF-8, decoded as Windows-1252", path.display());
            Ok(decoded.into_owned())
        }
    }
}

/// Write formatted text back to `path` as UTF-8.
pub fn write_sql_file(path: &Path, content: &str) -> Result<(), FormatError> {
    std::fs::write(path, content).map_err(|e| FormatError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_utf8_bom_is_stripped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bom.sql");
        std::fs::write(&path, b"\xEF\xBB\xBFSELECT 1").unwrap();
        assert_eq!(read_sql_file(&path).unwrap(), "SELECT 1");
    }

    #[test]
    fn test_windows_1252_fallback() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cp1252.sql");
        // 0xE9 is 'é' in Windows-1252 and invalid as a lone UTF-8 byte
        std::fs::write(&path, b"SELECT 'caf\xE9'").unwrap();
        assert_eq!(read_sql_file(&path).unwrap(), "SELECT 'café'");
    }

    #[test]
    fn test_utf16_with_bom() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("utf16.sql");
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "SELECT 'é'".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        std::fs::write(&path, bytes).unwrap();
        assert_eq!(read_sql_file(&path).unwrap(), "SELECT 'é'");
    }

    #[test]
    fn test_malformed_utf16_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.sql");
        // Odd trailing byte after a UTF-16LE BOM
        std::fs::write(&path, b"\xFF\xFES\x00E\x00L").unwrap();
        let err = read_sql_file(&path).unwrap_err();
        assert!(matches!(
            err,
            FormatError::InvalidEncoding { encoding: "UTF-16LE", .. }
        ));
    }

    #[test]
    fn test_malformed_utf8_after_bom_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.sql");
        std::fs::write(&path, b"\xEF\xBB\xBFSELECT '\xE9'").unwrap();
        let err = read_sql_file(&path).unwrap_err();
        assert!(matches!(
            err,
            FormatError::InvalidEncoding { encoding: "UTF-8", .. }
        ));
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = read_sql_file(&dir.path().join("missing.sql")).unwrap_err();
        assert!(matches!(err, FormatError::FileRead { .. }));
    }

    #[test]
    fn test_write_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.sql");
        write_sql_file(&path, "SELECT 1\r\n").unwrap();
        assert_eq!(read_sql_file(&path).unwrap(), "SELECT 1\r\n");
    }
}
