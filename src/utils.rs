use indicatif::{ProgressBar, ProgressStyle};
use log::warn;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::VocAnnotation;

/// Image encodings accepted in a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

impl ImageFormat {
    /// Value of the `image/format` feature
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "JPEG",
            ImageFormat::Png => "PNG",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Helper function to infer image format from image bytes
pub fn infer_image_format(image_bytes: &[u8]) -> Option<ImageFormat> {
    if image_bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some(ImageFormat::Jpeg)
    } else if image_bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
        Some(ImageFormat::Png)
    } else {
        None
    }
}

/// Hex encoded SHA-256 digest of `bytes`
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Read a file, reporting a missing file as `Error::NotFound`
pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| Error::from_io(path, e))
}

/// Read and deserialize a Pascal VOC annotation file.
///
/// `<object>` elements are collected in document order even when other
/// elements sit between them.
pub fn read_annotation(path: &Path) -> Result<VocAnnotation> {
    let content = fs::read_to_string(path).map_err(|e| Error::from_io(path, e))?;
    parse_annotation(&content).map_err(|source| Error::Xml {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_annotation(content: &str) -> std::result::Result<VocAnnotation, serde_xml_rs::Error> {
    let mut deserializer = serde_xml_rs::Deserializer::new_from_reader(content.as_bytes())
        .non_contiguous_seq_elements(true);
    VocAnnotation::deserialize(&mut deserializer)
}

/// Read an examples list: the first token of every non-blank line
pub fn read_examples_list(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|e| Error::from_io(path, e))?;
    Ok(content
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .map(str::to_string)
        .collect())
}

/// Progress bar template for `label`. `{msg}` shows the text passed to `set_message`
pub fn progress_template(label: &str) -> String {
    format!(
        "{{spinner:.green}} [{}] [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} ({{eta}}) {{msg}}",
        label
    )
}

/// Create a progress bar with the given length and label
pub fn create_progress_bar(len: u64, label: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(&progress_template(label))
            .progress_chars("#>-"),
    );
    pb
}

/// Delete `path` if it exists, then recreate it empty
pub fn create_output_directory(path: &Path) -> std::io::Result<PathBuf> {
    if path.exists() {
        warn!(
            "Directory {:?} already exists. Deleting and recreating it.",
            path
        );
        fs::remove_dir_all(path).and_then(|_| fs::create_dir_all(path))?;
    } else {
        fs::create_dir_all(path)?;
    }
    Ok(path.to_path_buf())
}

/// File name without its extension
pub fn file_stem_string(path: &Path) -> Result<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
        .ok_or_else(|| Error::Parse(format!("invalid file name {:?}", path)))
}
