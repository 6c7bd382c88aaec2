//! Error type shared by the converter and the splitter.

use std::path::{Path, PathBuf};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The image is neither JPEG nor PNG.
    #[error("unsupported image format in {}: expected JPEG or PNG", .0.display())]
    Format(PathBuf),

    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// A filename, manifest line or annotation field could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid label map or split configuration.
    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to parse annotation {}: {source}", .path.display())]
    Xml {
        path: PathBuf,
        #[source]
        source: serde_xml_rs::Error,
    },

    #[error("failed to write record: {0}")]
    Record(#[from] tfrecord::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Map an I/O error on `path` to `NotFound` when the file is missing.
    pub fn from_io(path: &Path, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Error::NotFound(path.to_path_buf())
        } else {
            Error::Io(err)
        }
    }
}
