//! Statement file intake
//!
//! One statement per extraction, restricted to the formats the service
//! accepts (PDF, PNG, JPEG). Oversized files are warned about, not rejected.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{Error, Result};

/// Stated upload guidance. Files above this log a warning and proceed.
pub const SIZE_GUIDANCE_BYTES: u64 = 10 * 1024 * 1024;

/// Resolve the MIME type sent to the extraction service for a statement file
pub fn media_type_for(path: &Path) -> Result<&'static str> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "pdf" => Ok("application/pdf"),
        "png" => Ok("image/png"),
        "jpg" | "jpeg" => Ok("image/jpeg"),
        _ => Err(Error::UnsupportedFile(format!(
            "{} (expected .pdf, .png, .jpg or .jpeg)",
            path.display()
        ))),
    }
}

/// Pick the statement to process. The first file wins; extras are ignored
/// with a warning rather than an error.
pub fn select_statement(paths: &[PathBuf]) -> Result<&PathBuf> {
    let first = paths
        .first()
        .ok_or_else(|| Error::InvalidData("No statement file given".to_string()))?;

    if paths.len() > 1 {
        warn!(
            ignored = paths.len() - 1,
            "Multiple files given, processing only {}",
            first.display()
        );
    }

    Ok(first)
}

/// Read a statement file and resolve its MIME type
pub fn read_statement(path: &Path) -> Result<(Vec<u8>, &'static str)> {
    let mime_type = media_type_for(path)?;
    let data = std::fs::read(path)?;

    if data.len() as u64 > SIZE_GUIDANCE_BYTES {
        warn!(
            bytes = data.len(),
            "Statement exceeds the 10MB guidance, extraction may be slow or fail"
        );
    }

    Ok((data, mime_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_for_known_extensions() {
        assert_eq!(media_type_for(Path::new("a.pdf")).unwrap(), "application/pdf");
        assert_eq!(media_type_for(Path::new("a.png")).unwrap(), "image/png");
        assert_eq!(media_type_for(Path::new("a.jpg")).unwrap(), "image/jpeg");
        assert_eq!(media_type_for(Path::new("a.jpeg")).unwrap(), "image/jpeg");
    }

    #[test]
    fn test_media_type_for_is_case_insensitive() {
        assert_eq!(
            media_type_for(Path::new("STATEMENT.PDF")).unwrap(),
            "application/pdf"
        );
        assert_eq!(media_type_for(Path::new("scan.JPeG")).unwrap(), "image/jpeg");
    }

    #[test]
    fn test_media_type_for_rejects_unknown() {
        let result = media_type_for(Path::new("statement.txt"));
        assert!(matches!(result, Err(Error::UnsupportedFile(_))));

        let result = media_type_for(Path::new("no_extension"));
        assert!(matches!(result, Err(Error::UnsupportedFile(_))));
    }

    #[test]
    fn test_select_statement_first_wins() {
        let paths = vec![PathBuf::from("jan.pdf"), PathBuf::from("feb.pdf")];
        let selected = select_statement(&paths).unwrap();
        assert_eq!(selected, &PathBuf::from("jan.pdf"));
    }

    #[test]
    fn test_select_statement_empty_is_error() {
        let result = select_statement(&[]);
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_read_statement() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("statement.png");
        std::fs::write(&path, b"fake image bytes").unwrap();

        let (data, mime_type) = read_statement(&path).unwrap();
        assert_eq!(data, b"fake image bytes");
        assert_eq!(mime_type, "image/png");
    }

    #[test]
    fn test_read_statement_rejects_unsupported_before_reading() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("statement.txt");
        std::fs::write(&path, b"plain text").unwrap();

        let result = read_statement(&path);
        assert!(matches!(result, Err(Error::UnsupportedFile(_))));
    }

    #[test]
    fn test_read_statement_missing_file() {
        let result = read_statement(Path::new("/nonexistent/statement.pdf"));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
