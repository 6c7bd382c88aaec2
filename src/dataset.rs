use log::info;
use std::path::{Path, PathBuf};

use crate::config::ConvertArgs;
use crate::conversion::annotation_to_record;
use crate::error::Result;
use crate::label_map::LabelMap;
use crate::record::RecordSink;
use crate::types::ConversionStats;
use crate::utils::{create_progress_bar, read_annotation, read_examples_list};

/// Directory holding the XML annotations: `annotations_dir` resolved against
/// the parent of `data_dir`
pub fn annotations_directory(data_dir: &Path, annotations_dir: &Path) -> PathBuf {
    data_dir
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(annotations_dir)
}

/// Convert every example listed in `<data_dir>/<set>.txt` and write the
/// records to `args.output_path`.
pub fn process_dataset(args: &ConvertArgs, label_map: &LabelMap) -> Result<ConversionStats> {
    let set_name = args.set.as_str();
    let examples_path = args.data_dir.join(args.set.manifest_name());
    let annotations_dir = annotations_directory(&args.data_dir, &args.annotations_dir);

    let examples = read_examples_list(&examples_path)?;
    info!(
        "Read {} examples from {}",
        examples.len(),
        examples_path.display()
    );

    let mut sink = RecordSink::create(&args.output_path)?;
    let mut stats = ConversionStats::default();

    let pb = create_progress_bar(examples.len() as u64, set_name);
    pb.set_message(format!("Parsing annotations from {} set", set_name));
    for example in &examples {
        let annotation_path = annotations_dir.join(format!("{}.xml", example));
        let annotation = read_annotation(&annotation_path)?;

        let record = annotation_to_record(
            &annotation,
            &args.data_dir,
            set_name,
            label_map,
            args.ignore_difficult_instances,
            &mut stats,
        )?;
        sink.write(record)?;
        stats.examples_written += 1;
        pb.inc(1);
    }
    sink.finish()?;
    pb.finish_with_message(format!("{} conversion complete", set_name));

    Ok(stats)
}
