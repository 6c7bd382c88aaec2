//! MUSCIMA++ dataset preparation
//!
//! This library provides the two offline steps that prepare the MUSCIMA++ dataset for
//! object detection training: a writer-independent training/validation/test split of
//! the page images, and the conversion of Pascal VOC annotations into TFRecord files.

pub mod config;
pub mod conversion;
pub mod dataset;
pub mod error;
pub mod label_map;
pub mod record;
pub mod splitter;
pub mod types;
pub mod utils;

// Re-export commonly used types and functions
pub use config::{ConvertArgs, SplitArgs, SplitName};
pub use dataset::process_dataset;
pub use error::{Error, Result};
pub use label_map::LabelMap;
pub use record::{ExampleRecord, RecordSink};
pub use splitter::split_dataset;
pub use types::{ConversionStats, SplitData, VocAnnotation, VocObject, WriterPageKey};
