use log::warn;
use std::path::Path;

use crate::error::{Error, Result};
use crate::label_map::LabelMap;
use crate::record::ExampleRecord;
use crate::types::{ConversionStats, VocAnnotation, VocBndBox, VocObject};
use crate::utils::{infer_image_format, read_file, sha256_hex};

/// Why an object was left out of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    UnknownClass,
    Difficult,
}

/// Class id of `object` if it goes into the record
pub fn included_class_id(
    object: &VocObject,
    label_map: &LabelMap,
    ignore_difficult_instances: bool,
) -> std::result::Result<i64, Exclusion> {
    let class_id = label_map.get(&object.name).ok_or(Exclusion::UnknownClass)?;
    if ignore_difficult_instances && object.is_difficult() {
        return Err(Exclusion::Difficult);
    }
    Ok(class_id)
}

/// Box divided by the image size, as (xmin, ymin, xmax, ymax)
///
/// Coordinates outside the image are clamped into [0, 1]; the second value
/// counts how many were clamped.
pub fn normalize_bounding_box(
    bndbox: &VocBndBox,
    width: u32,
    height: u32,
) -> ([f32; 4], usize) {
    let width = width as f64;
    let height = height as f64;
    let raw = [
        bndbox.xmin / width,
        bndbox.ymin / height,
        bndbox.xmax / width,
        bndbox.ymax / height,
    ];

    let mut clamped = 0;
    let normalized = raw.map(|value| {
        if (0.0..=1.0).contains(&value) {
            value as f32
        } else {
            clamped += 1;
            value.max(0.0).min(1.0) as f32
        }
    });
    (normalized, clamped)
}

/// Convert one parsed annotation and its image into a record.
///
/// The image is read from `<dataset_dir>/<set_name>/<filename>`.
pub fn annotation_to_record(
    annotation: &VocAnnotation,
    dataset_dir: &Path,
    set_name: &str,
    label_map: &LabelMap,
    ignore_difficult_instances: bool,
    stats: &mut ConversionStats,
) -> Result<ExampleRecord> {
    let image_path = dataset_dir.join(set_name).join(&annotation.filename);
    let encoded = read_file(&image_path)?;
    let format = infer_image_format(&encoded).ok_or_else(|| Error::Format(image_path.clone()))?;
    let sha256 = sha256_hex(&encoded);

    let width = annotation.size.width;
    let height = annotation.size.height;
    if width == 0 || height == 0 {
        return Err(Error::Parse(format!(
            "annotation for {} has zero image size {}x{}",
            annotation.filename, width, height
        )));
    }

    let mut record = ExampleRecord {
        height,
        width,
        filename: annotation.filename.clone(),
        sha256,
        encoded,
        format,
        xmin: vec![],
        xmax: vec![],
        ymin: vec![],
        ymax: vec![],
        class_text: vec![],
        class_label: vec![],
        difficult: vec![],
        truncated: vec![],
        view: vec![],
    };

    for object in &annotation.objects {
        let class_id = match included_class_id(object, label_map, ignore_difficult_instances) {
            Ok(class_id) => class_id,
            Err(Exclusion::UnknownClass) => {
                stats.skipped_unknown_class += 1;
                continue;
            }
            Err(Exclusion::Difficult) => {
                stats.skipped_difficult += 1;
                continue;
            }
        };

        let ([xmin, ymin, xmax, ymax], clamped) =
            normalize_bounding_box(&object.bndbox, width, height);
        if clamped > 0 {
            warn!(
                "Box of '{}' in {} extends beyond the {}x{} image",
                object.name, annotation.filename, width, height
            );
            stats.clamped_coordinates += clamped;
        }

        record.xmin.push(xmin);
        record.ymin.push(ymin);
        record.xmax.push(xmax);
        record.ymax.push(ymax);
        record.class_text.push(object.name.clone());
        record.class_label.push(class_id);
        record.difficult.push(object.is_difficult() as i64);
        record.truncated.push(object.is_truncated() as i64);
        record.view.push(object.pose.clone());
    }

    stats.objects_written += record.num_objects();
    Ok(record)
}
