//! Storage for contact records and uploaded card images.
//!
//! Nothing here reads the clock or keeps global state: output names and
//! timestamps are supplied by the caller, so repeated or concurrent runs can
//! pick distinct destinations.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::{debug, info};

/// Timestamp layout used in generated file names.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Prefix of stored upload file names.
pub const UPLOAD_PREFIX: &str = "uploaded_card";

/// Where a contact record is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    /// Destination directory.
    pub directory: PathBuf,
    /// File name inside `directory`.
    pub file_name: String,
}

impl OutputTarget {
    pub fn new(directory: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            file_name: file_name.into(),
        }
    }

    /// Split a full path into a target.
    pub fn from_path(path: &Path) -> Self {
        let directory = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::new(directory, file_name)
    }

    /// Full path of the destination file.
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }
}

/// Build `{prefix}_{timestamp}.{extension}`.
pub fn timestamped_name(prefix: &str, timestamp: NaiveDateTime, extension: &str) -> String {
    format!(
        "{}_{}.{}",
        prefix,
        timestamp.format(TIMESTAMP_FORMAT),
        extension.trim_start_matches('.')
    )
}

/// Persists serialized contact records.
///
/// Implementations must replace the whole destination on every write. A
/// destination always holds exactly one record.
pub trait RecordWriter {
    /// Write a document, replacing any previous content. Returns the path written.
    fn write_record(&self, target: &OutputTarget, document: &str) -> std::io::Result<PathBuf>;
}

/// Writes records to the local filesystem with truncate-on-write semantics.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileRecordWriter;

impl RecordWriter for FileRecordWriter {
    fn write_record(&self, target: &OutputTarget, document: &str) -> std::io::Result<PathBuf> {
        fs::create_dir_all(&target.directory)?;
        let path = target.path();

        // fs::write opens with create + truncate.
        fs::write(&path, document)?;

        info!("Wrote contact record to {}", path.display());
        Ok(path)
    }
}

/// Keeps copies of uploaded card images.
#[derive(Debug, Clone)]
pub struct UploadStore {
    directory: PathBuf,
}

impl UploadStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Directory uploads are stored in.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Store upload bytes as `uploaded_card_<timestamp>.<extension>`.
    pub fn save(
        &self,
        data: &[u8],
        extension: &str,
        timestamp: NaiveDateTime,
    ) -> std::io::Result<PathBuf> {
        fs::create_dir_all(&self.directory)?;
        let path = self
            .directory
            .join(timestamped_name(UPLOAD_PREFIX, timestamp, extension));
        fs::write(&path, data)?;
        debug!("Stored upload at {}", path.display());
        Ok(path)
    }

    /// Copy an image file into the store.
    pub fn save_file(&self, source: &Path, timestamp: NaiveDateTime) -> std::io::Result<PathBuf> {
        let extension = source
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("png")
            .to_lowercase();
        let data = fs::read(source)?;
        self.save(&data, &extension, timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(14, 5, 7)
            .unwrap()
    }

    #[test]
    fn test_timestamped_name() {
        assert_eq!(
            timestamped_name("uploaded_card", timestamp(), "png"),
            "uploaded_card_20240309140507.png"
        );
        assert_eq!(
            timestamped_name("contact", timestamp(), ".vcf"),
            "contact_20240309140507.vcf"
        );
    }

    #[test]
    fn test_write_truncates_previous_record() {
        let dir = tempfile::tempdir().unwrap();
        let target = OutputTarget::new(dir.path().join("out"), "contact.vcf");
        let writer = FileRecordWriter;

        writer
            .write_record(&target, "BEGIN:VCARD\nFN:A much longer first record\nEND:VCARD\n")
            .unwrap();
        let path = writer
            .write_record(&target, "BEGIN:VCARD\nFN:B\nEND:VCARD\n")
            .unwrap();

        assert_eq!(path, target.path());
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "BEGIN:VCARD\nFN:B\nEND:VCARD\n"
        );
    }

    #[test]
    fn test_target_from_path() {
        let target = OutputTarget::from_path(Path::new("cards/jane.vcf"));
        assert_eq!(target.directory, PathBuf::from("cards"));
        assert_eq!(target.file_name, "jane.vcf");

        let bare = OutputTarget::from_path(Path::new("contact.vcf"));
        assert_eq!(bare.directory, PathBuf::from("."));
        assert_eq!(bare.path(), PathBuf::from("./contact.vcf"));
    }

    #[test]
    fn test_upload_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path().join("temp"));

        let path = store.save(b"png bytes", "png", timestamp()).unwrap();

        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "uploaded_card_20240309140507.png"
        );
        assert_eq!(fs::read(&path).unwrap(), b"png bytes");
    }

    #[test]
    fn test_upload_store_copies_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("Card.JPG");
        fs::write(&source, b"jpeg bytes").unwrap();

        let store = UploadStore::new(dir.path().join("uploads"));
        let path = store.save_file(&source, timestamp()).unwrap();

        assert!(path.ends_with("uploaded_card_20240309140507.jpg"));
    }
}
