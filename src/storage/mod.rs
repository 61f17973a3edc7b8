use std::path::{Path, PathBuf};

/// Per-part upload cap in bytes.
pub const MAX_FILE_SIZE: usize = 1024 * 1024; // 1MB

/// Public URL prefix the upload directory is served under; stored paths
/// use this form so templates can link them directly.
pub const PUBLIC_UPLOAD_PREFIX: &str = "/uploads";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldTag {
    Xml,
    Image,
}

impl FieldTag {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldTag::Xml => "xmlFile",
            FieldTag::Image => "imageFile",
        }
    }
}

/// Destination filename for an uploaded part. The original base name keeps
/// uploads recognizable; the field tag plus epoch-millis timestamp keeps
/// concurrent uploads from colliding even when they share an original name.
pub fn destination_filename(original_name: &str, tag: FieldTag, timestamp_millis: i64) -> String {
    let path = Path::new(original_name);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("upload");
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e))
        .unwrap_or_default();
    format!("{}-{}-{}{}", stem, tag.as_str(), timestamp_millis, ext)
}

/// Stored database path for a generated filename, e.g. `/uploads/a-xmlFile-17.xml`.
pub fn public_path(filename: &str) -> String {
    format!("{}/{}", PUBLIC_UPLOAD_PREFIX, filename)
}

/// Maps a stored `/uploads/...` path back to its location on disk.
pub fn disk_path(upload_folder: &Path, stored_path: &str) -> PathBuf {
    let filename = stored_path
        .strip_prefix(&format!("{}/", PUBLIC_UPLOAD_PREFIX))
        .unwrap_or(stored_path);
    upload_folder.join(filename)
}

pub fn ensure_dirs(upload_folder: &PathBuf) -> std::io::Result<()> {
    std::fs::create_dir_all(upload_folder)?;
    Ok(())
}
