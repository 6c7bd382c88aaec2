//! TFRecord encoding of converted examples.

use std::path::Path;
use tfrecord::{Example, ExampleWriter, Feature};

use crate::error::Result;
use crate::utils::ImageFormat;

/// A converted example, one entry per `tf.train.Example` feature.
///
/// The per-object vectors are parallel: index `i` of each describes the same object.
#[derive(Debug, Clone, PartialEq)]
pub struct ExampleRecord {
    pub height: u32,
    pub width: u32,
    pub filename: String,
    pub sha256: String,
    pub encoded: Vec<u8>,
    pub format: ImageFormat,
    pub xmin: Vec<f32>,
    pub xmax: Vec<f32>,
    pub ymin: Vec<f32>,
    pub ymax: Vec<f32>,
    pub class_text: Vec<String>,
    pub class_label: Vec<i64>,
    pub difficult: Vec<i64>,
    pub truncated: Vec<i64>,
    pub view: Vec<String>,
}

impl ExampleRecord {
    pub fn num_objects(&self) -> usize {
        self.class_label.len()
    }

    pub fn into_example(self) -> Example {
        let Self {
            height,
            width,
            filename,
            sha256,
            encoded,
            format,
            xmin,
            xmax,
            ymin,
            ymax,
            class_text,
            class_label,
            difficult,
            truncated,
            view,
        } = self;

        let bytes_list = |values: Vec<String>| {
            Feature::from_bytes_list(values.into_iter().map(String::into_bytes).collect::<Vec<_>>())
        };

        vec![
            ("image/height", Feature::from_i64_list(vec![height as i64])),
            ("image/width", Feature::from_i64_list(vec![width as i64])),
            ("image/filename", Feature::from_bytes_list(vec![filename.clone().into_bytes()])),
            ("image/source_id", Feature::from_bytes_list(vec![filename.into_bytes()])),
            ("image/key/sha256", Feature::from_bytes_list(vec![sha256.into_bytes()])),
            ("image/encoded", Feature::from_bytes_list(vec![encoded])),
            ("image/format", Feature::from_bytes_list(vec![format.as_str().as_bytes().to_vec()])),
            ("image/object/bbox/xmin", Feature::from_f32_list(xmin)),
            ("image/object/bbox/xmax", Feature::from_f32_list(xmax)),
            ("image/object/bbox/ymin", Feature::from_f32_list(ymin)),
            ("image/object/bbox/ymax", Feature::from_f32_list(ymax)),
            ("image/object/class/text", bytes_list(class_text)),
            ("image/object/class/label", Feature::from_i64_list(class_label)),
            ("image/object/difficult", Feature::from_i64_list(difficult)),
            ("image/object/truncated", Feature::from_i64_list(truncated)),
            ("image/object/view", bytes_list(view)),
        ]
        .into_iter()
        .map(|(name, feature)| (name.to_string(), feature))
        .collect()
    }
}

/// Sequential writer of example records
pub struct RecordSink {
    writer: ExampleWriter<std::io::BufWriter<std::fs::File>>,
}

impl RecordSink {
    /// Create the output file, including missing parent directories
    pub fn create(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let writer = ExampleWriter::create(path)?;
        Ok(Self { writer })
    }

    pub fn write(&mut self, record: ExampleRecord) -> Result<()> {
        self.writer.send(record.into_example())?;
        Ok(())
    }

    /// Flush buffered records to disk
    pub fn finish(mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
