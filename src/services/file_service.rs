use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::ExportError;
use crate::models::{ExportedFile, SourceDocument};

pub const APP_DIR_NAME: &str = "DocBrief";

pub fn get_app_data_dir() -> io::Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "Could not find data directory"))?
        .join(APP_DIR_NAME);

    if !data_dir.exists() {
        fs::create_dir_all(&data_dir)?;
    }

    Ok(data_dir)
}

pub fn get_exports_dir() -> io::Result<PathBuf> {
    let exports_dir = get_app_data_dir()?.join("exports");
    if !exports_dir.exists() {
        fs::create_dir_all(&exports_dir)?;
    }
    Ok(exports_dir)
}

/// Read a file from disk as an upload with the media type the caller declares.
pub fn load_source_document(path: &Path, media_type: &str) -> io::Result<SourceDocument> {
    let bytes = fs::read(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string());
    Ok(SourceDocument::new(name, media_type, bytes))
}

/// Write an export into `dir` under its own file name, returning the full path.
pub fn write_export(file: &ExportedFile, dir: &Path) -> Result<PathBuf, ExportError> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    let path = dir.join(&file.file_name);
    fs::write(&path, &file.bytes)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_source_document_keeps_declared_type_and_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ruling.txt");
        fs::write(&path, "Judgment for the plaintiff.").unwrap();

        let doc = load_source_document(&path, "text/plain").unwrap();
        assert_eq!(doc.name, "ruling.txt");
        assert_eq!(doc.media_type, "text/plain");
        assert_eq!(doc.bytes, b"Judgment for the plaintiff.");
    }

    #[test]
    fn write_export_creates_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("exports");
        let file = ExportedFile {
            file_name: "summary.txt".into(),
            media_type: "text/plain;charset=utf-8".into(),
            bytes: b"done".to_vec(),
        };

        let path = write_export(&file, &target).unwrap();
        assert_eq!(path, target.join("summary.txt"));
        assert_eq!(fs::read(&path).unwrap(), b"done");
    }
}
