//! Document reading for plain-text formats.
//!
//! Binary formats (PDF, DOCX, PPTX) are out of scope — anything that can be
//! read as UTF-8 text goes in here. CSV is read verbatim; the embedding model
//! copes fine with delimited rows.

use std::path::Path;

use anyhow::{bail, Context, Result};

/// File extensions accepted by [`read_document`].
pub const SUPPORTED_EXTENSIONS: &[&str] = &["txt", "md", "markdown", "csv"];

/// Read a document file into raw text.
///
/// Fails for unsupported extensions and for files that are not valid UTF-8,
/// rather than silently indexing garbage.
pub fn read_document(path: &Path) -> Result<String> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
        bail!(
            "unsupported file type {:?} for {} (supported: {})",
            extension,
            path.display(),
            SUPPORTED_EXTENSIONS.join(", ")
        );
    }

    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {} as UTF-8 text", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_text_and_markdown() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["notes.txt", "readme.md", "data.csv"] {
            let path = dir.path().join(name);
            std::fs::write(&path, "hello world").unwrap();
            assert_eq!(read_document(&path).unwrap(), "hello world");
        }
    }

    #[test]
    fn extension_check_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("NOTES.TXT");
        std::fs::write(&path, "shouting").unwrap();
        assert_eq!(read_document(&path).unwrap(), "shouting");
    }

    #[test]
    fn rejects_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slides.pptx");
        std::fs::write(&path, "not really slides").unwrap();
        let err = read_document(&path).unwrap_err().to_string();
        assert!(err.contains("unsupported file type"), "{err}");
    }

    #[test]
    fn rejects_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("binary.txt");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(&[0xff, 0xfe, 0x00, 0x41]).unwrap();
        assert!(read_document(&path).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = read_document(Path::new("/no/such/file.txt")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
