//! Image upload storage.
//!
//! Uploaded files live outside the database under
//! `<root>/<gallery|explore|hero>/` and are referred to by their public URL
//! `/uploads/<dir>/<name>`. Only the image formats the site can show are
//! accepted; the format is read from the file's leading bytes, never from its
//! name.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::content::ContentKind;
use crate::error::{Error, Result};

/// Default upload size limit: 5 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// URL prefix under which uploads are served.
pub const UPLOADS_URL_PREFIX: &str = "/uploads";

/// An accepted image format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// JPEG.
    Jpeg,
    /// PNG.
    Png,
    /// GIF (87a or 89a).
    Gif,
    /// WebP.
    Webp,
}

impl ImageFormat {
    /// Identifies the format from the leading bytes of a file.
    #[must_use]
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [0xFF, 0xD8, 0xFF, ..] => Some(Self::Jpeg),
            [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, ..] => Some(Self::Png),
            [b'G', b'I', b'F', b'8', b'7' | b'9', b'a', ..] => Some(Self::Gif),
            [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some(Self::Webp),
            _ => None,
        }
    }

    /// The file extension written for this format, without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Gif => "gif",
            Self::Webp => "webp",
        }
    }

    fn accepts_extension(self, ext: &str) -> bool {
        match self {
            Self::Jpeg => matches!(ext, "jpg" | "jpeg"),
            other => ext == other.extension(),
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jpeg => write!(f, "JPEG"),
            Self::Png => write!(f, "PNG"),
            Self::Gif => write!(f, "GIF"),
            Self::Webp => write!(f, "WebP"),
        }
    }
}

/// A file written by [`MediaStore::store`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMedia {
    /// Where the file was written.
    pub path: PathBuf,
    /// Public URL to put in a content item's `image_url`.
    pub url: String,
    /// Detected format.
    pub format: ImageFormat,
}

/// Writes uploads below a root directory.
#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
    max_bytes: u64,
}

impl MediaStore {
    /// A store rooted at `root` with the given size limit.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, max_bytes: u64) -> Self {
        Self {
            root: root.into(),
            max_bytes,
        }
    }

    /// The uploads root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The size limit in bytes.
    #[must_use]
    pub const fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Checks an upload without writing it and returns its format.
    ///
    /// # Errors
    ///
    /// Returns a validation error for empty or oversized files and for
    /// anything that is not JPEG, PNG, GIF or WebP.
    pub fn check(&self, bytes: &[u8]) -> Result<ImageFormat> {
        if bytes.is_empty() {
            return Err(invalid("No image file provided"));
        }
        if bytes.len() as u64 > self.max_bytes {
            return Err(invalid(format!(
                "File size exceeds the {} limit",
                human_size(self.max_bytes)
            )));
        }
        ImageFormat::sniff(bytes)
            .ok_or_else(|| invalid("Invalid file type. Allowed: JPEG, PNG, GIF, WebP"))
    }

    /// Stores an upload for a content collection.
    ///
    /// The file is named `<dir>_<uuid>.<ext>`. The extension of
    /// `original_name` is kept when it matches the detected format, otherwise
    /// the format's own extension is used.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Self::check`], or an I/O error if the file
    /// cannot be written.
    pub fn store(&self, kind: ContentKind, original_name: &str, bytes: &[u8]) -> Result<StoredMedia> {
        let format = self.check(bytes)?;

        let ext = Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .filter(|e| format.accepts_extension(e))
            .unwrap_or_else(|| format.extension().to_string());

        let dir = kind.upload_dir();
        let name = format!("{dir}_{}.{ext}", Uuid::new_v4().simple());
        let target_dir = self.root.join(dir);
        fs::create_dir_all(&target_dir)?;
        let path = target_dir.join(&name);
        fs::write(&path, bytes)?;

        log::info!("stored {} upload at {}", format, path.display());
        Ok(StoredMedia {
            path,
            url: format!("{UPLOADS_URL_PREFIX}/{dir}/{name}"),
            format,
        })
    }
}

fn invalid(message: impl Into<String>) -> Error {
    Error::Validation {
        field: "image".into(),
        message: message.into(),
    }
}

#[allow(clippy::cast_precision_loss)]
fn human_size(bytes: u64) -> String {
    if bytes >= 1024 * 1024 && bytes % (1024 * 1024) == 0 {
        format!("{}MB", bytes / (1024 * 1024))
    } else if bytes >= 1024 {
        format!("{:.1}KB", bytes as f64 / 1024.0)
    } else {
        format!("{bytes} bytes")
    }
}
