use serde::Deserialize;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::OnceLock;

// Supported image formats
pub const IMG_FORMATS: &[&str] = &[
    "bmp", "dng", "jpeg", "jpg", "mpo", "png", "tif", "tiff", "webp", "pfm",
];

// Precomputed HashSet of image extensions for fast lookup
pub static IMAGE_EXTENSIONS_SET: OnceLock<HashSet<String>> = OnceLock::new();

/// Get the image extensions set
pub fn get_image_extensions_set() -> &'static HashSet<String> {
    IMAGE_EXTENSIONS_SET.get_or_init(|| IMG_FORMATS.iter().map(|ext| ext.to_lowercase()).collect())
}

/// Root `<annotation>` element of a Pascal VOC annotation file
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct VocAnnotation {
    pub filename: String,
    pub size: VocSize,
    #[serde(rename = "object", default)]
    pub objects: Vec<VocObject>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct VocSize {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub depth: Option<u32>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct VocObject {
    pub name: String,
    #[serde(default = "default_pose")]
    pub pose: String,
    #[serde(default)]
    pub truncated: u8,
    #[serde(default)]
    pub difficult: u8,
    pub bndbox: VocBndBox,
}

impl VocObject {
    pub fn is_difficult(&self) -> bool {
        self.difficult != 0
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated != 0
    }
}

fn default_pose() -> String {
    "Unspecified".to_string()
}

/// Bounding box in absolute pixel coordinates
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct VocBndBox {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

/// Identifies a handwritten page of the CVC-MUSCIMA collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WriterPageKey {
    pub writer: u32,
    pub page: u32,
}

// Struct to hold the file names assigned to each split
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SplitData {
    pub training: Vec<PathBuf>,
    pub validation: Vec<PathBuf>,
    pub test: Vec<PathBuf>,
}

impl SplitData {
    pub fn len(&self) -> usize {
        self.training.len() + self.validation.len() + self.test.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// Struct to hold conversion statistics
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConversionStats {
    pub examples_written: usize,
    pub objects_written: usize,
    pub skipped_unknown_class: usize,
    pub skipped_difficult: usize,
    pub clamped_coordinates: usize,
}

impl ConversionStats {
    pub fn print_summary(&self) {
        log::info!("=== Conversion Summary ===");
        log::info!("Examples written: {}", self.examples_written);
        log::info!("Objects written: {}", self.objects_written);
        log::info!(
            "Skipped objects (class not in label map): {}",
            self.skipped_unknown_class
        );
        log::info!("Skipped objects (difficult): {}", self.skipped_difficult);

        if self.clamped_coordinates > 0 {
            log::warn!(
                "Clamped {} box coordinates that fell outside the image",
                self.clamped_coordinates
            );
        }
    }
}
