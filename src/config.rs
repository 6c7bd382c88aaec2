use clap::{Parser, ValueEnum};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Convert a MUSCIMA++ split in Pascal VOC layout into a TFRecord file.
#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
pub struct ConvertArgs {
    /// Root directory of the split dataset (holds `<set>.txt` and `<set>/`)
    #[arg(long = "data_dir")]
    pub data_dir: PathBuf,

    /// Which split to convert
    #[arg(long = "set", value_enum, default_value = "training")]
    pub set: SplitName,

    /// Annotations directory, relative to the parent of `data_dir`
    #[arg(long = "annotations_dir", default_value = "Annotations")]
    pub annotations_dir: PathBuf,

    /// Path of the output TFRecord file
    #[arg(long = "output_path")]
    pub output_path: PathBuf,

    /// Path to the label map in protobuf text format
    #[arg(long = "label_map_path", default_value = "data/pascal_label_map.pbtxt")]
    pub label_map_path: PathBuf,

    /// Drop objects marked as difficult
    #[arg(long = "ignore_difficult_instances")]
    pub ignore_difficult_instances: bool,
}

/// Split MUSCIMA++ images into training, validation and writer-independent test sets.
#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
pub struct SplitArgs {
    /// Directory the images are copied from
    #[arg(long = "source_directory", default_value = "data/muscima_pp/v2.0/data/images")]
    pub source_directory: PathBuf,

    /// Directory that receives the 'training', 'validation' and 'test' directories
    #[arg(long = "destination_directory", default_value = "data/training_validation_test")]
    pub destination_directory: PathBuf,

    /// Text file listing the writer-independent test images
    #[arg(
        long = "independent_set",
        default_value = "data/muscima_pp/v2.0/specifications/testset-independent.txt"
    )]
    pub independent_set: PathBuf,

    /// Fraction of the non-test images used for validation
    #[arg(long = "validation_percentage", default_value_t = 0.16, value_parser = validate_size)]
    pub validation_percentage: f64,

    /// Seed for the training/validation shuffle
    #[arg(long = "seed", default_value_t = 0)]
    pub seed: u64,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum, Debug)]
pub enum SplitName {
    Training,
    Validation,
    Test,
}

impl SplitName {
    pub const ALL: [SplitName; 3] = [SplitName::Training, SplitName::Validation, SplitName::Test];

    pub fn as_str(&self) -> &'static str {
        match self {
            SplitName::Training => "training",
            SplitName::Validation => "validation",
            SplitName::Test => "test",
        }
    }

    /// File name of the manifest listing this split's examples.
    pub fn manifest_name(&self) -> String {
        format!("{}.txt", self.as_str())
    }
}

impl fmt::Display for SplitName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Validate that the size is between 0.0 and 1.0
pub fn validate_size(s: &str) -> Result<f64, String> {
    match f64::from_str(s) {
        Ok(val) if (0.0..=1.0).contains(&val) => Ok(val),
        _ => Err("SIZE must be between 0.0 and 1.0".to_string()),
    }
}
