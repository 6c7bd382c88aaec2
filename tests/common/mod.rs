#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tfrecord::{ExampleIter, Feature, RecordReaderConfig};

pub const PNG_BYTES: &[u8] = &[
    0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, b'I', b'H', b'D', b'R',
];
pub const JPEG_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];
pub const GIF_BYTES: &[u8] = b"GIF89a\x01\x00\x01\x00";

pub const LABEL_MAP: &str = r#"
item {
  id: 1
  name: 'noteheadFull'
}
item {
  id: 2
  name: 'stem'
}
"#;

pub struct TestObject<'a> {
    pub name: &'a str,
    pub difficult: u8,
    pub bndbox: [u32; 4],
}

pub fn object(name: &str, bndbox: [u32; 4]) -> TestObject<'_> {
    TestObject {
        name,
        difficult: 0,
        bndbox,
    }
}

pub fn annotation_xml(filename: &str, width: u32, height: u32, objects: &[TestObject]) -> String {
    let mut xml = format!(
        "<annotation>\n  <folder>images</folder>\n  <filename>{}</filename>\n  \
         <size><width>{}</width><height>{}</height><depth>1</depth></size>\n  \
         <segmented>0</segmented>\n",
        filename, width, height
    );
    for object in objects {
        let [xmin, ymin, xmax, ymax] = object.bndbox;
        xml.push_str(&format!(
            "  <object>\n    <name>{}</name>\n    <pose>Frontal</pose>\n    \
             <truncated>0</truncated>\n    <difficult>{}</difficult>\n    \
             <bndbox><xmin>{}</xmin><ymin>{}</ymin><xmax>{}</xmax><ymax>{}</ymax></bndbox>\n  \
             </object>\n",
            object.name, object.difficult, xmin, ymin, xmax, ymax
        ));
    }
    xml.push_str("</annotation>\n");
    xml
}

pub fn write_file(path: &Path, contents: impl AsRef<[u8]>) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

/// Decode every example of a TFRecord file into its feature map
pub fn read_records(path: &Path) -> Vec<HashMap<String, Feature>> {
    ExampleIter::open(path, RecordReaderConfig::default())
        .unwrap()
        .map(|example| example.unwrap().into_hash_map())
        .collect()
}

pub fn bytes_feature(features: &HashMap<String, Feature>, name: &str) -> Vec<Vec<u8>> {
    features[name].as_bytes_list().unwrap().to_vec()
}

pub fn f32_feature(features: &HashMap<String, Feature>, name: &str) -> Vec<f32> {
    features[name].as_f32_list().unwrap().to_vec()
}

pub fn i64_feature(features: &HashMap<String, Feature>, name: &str) -> Vec<i64> {
    features[name].as_i64_list().unwrap().to_vec()
}

pub fn read_manifest(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}
