//! Writer-independent split of the MUSCIMA++ images.
//!
//! Pages listed in the independent test set go to `test`. The remaining images
//! are shuffled with a seeded RNG and divided into `training` and `validation`.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use regex::Regex;
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::config::{SplitArgs, SplitName};
use crate::error::{Error, Result};
use crate::types::{get_image_extensions_set, SplitData, WriterPageKey};
use crate::utils::{create_output_directory, create_progress_bar, file_stem_string};

static WRITER_PAGE_REGEX: OnceLock<Regex> = OnceLock::new();

fn writer_page_regex() -> &'static Regex {
    WRITER_PAGE_REGEX
        .get_or_init(|| Regex::new(r"^.*W-(?P<writer>\d+)_N-(?P<page>\d+)").unwrap())
}

/// Extract the writer and page from a name such as `CVC-MUSCIMA_W-05_N-02_D-ideal.png`
pub fn parse_writer_page(name: &str) -> Result<WriterPageKey> {
    let captures = writer_page_regex().captures(name).ok_or_else(|| {
        Error::Parse(format!("'{}' does not contain W-<writer>_N-<page>", name))
    })?;
    let number = |group: &str| {
        captures[group]
            .parse::<u32>()
            .map_err(|e| Error::Parse(format!("invalid {} number in '{}': {}", group, name, e)))
    };

    Ok(WriterPageKey {
        writer: number("writer")?,
        page: number("page")?,
    })
}

/// Load the writer/page pairs reserved for the test split
pub fn load_independent_set(path: &Path) -> Result<HashSet<WriterPageKey>> {
    let content = fs::read_to_string(path).map_err(|e| Error::from_io(path, e))?;
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(parse_writer_page)
        .collect()
}

/// List the image files directly under `dir`, sorted by file name
pub fn list_image_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let extensions = get_image_extensions_set();
    let mut files = Vec::new();

    for entry in fs::read_dir(dir).map_err(|e| Error::from_io(dir, e))? {
        let entry = entry?;
        let path = entry.path();
        let is_image = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| extensions.contains(&ext.to_lowercase()));

        if entry.file_type()?.is_file() && is_image {
            files.push(path);
        } else {
            debug!("Skipping {}", path.display());
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Assign each file to a split.
///
/// `files` should already be in a stable order; the result only depends on
/// that order, `test_set` and `seed`.
pub fn split_images(
    files: Vec<PathBuf>,
    test_set: &HashSet<WriterPageKey>,
    validation_fraction: f64,
    seed: u64,
) -> Result<SplitData> {
    let mut split_data = SplitData::default();
    let mut pool = Vec::new();

    for path in files {
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| Error::Parse(format!("invalid file name {:?}", path)))?;
        let key = parse_writer_page(name)?;

        if test_set.contains(&key) {
            split_data.test.push(path);
        } else {
            pool.push(path);
        }
    }

    let mut rng = StdRng::seed_from_u64(seed);
    pool.shuffle(&mut rng);

    let val_size = ((pool.len() as f64 * validation_fraction).ceil() as usize).min(pool.len());
    split_data.training = pool.split_off(val_size);
    split_data.validation = pool;

    Ok(split_data)
}

/// Remove the split directories and manifests left by a previous run
pub fn delete_split_directories(destination: &Path) -> Result<()> {
    info!("Deleting split directories...");
    for split in SplitName::ALL {
        let split_dir = destination.join(split.as_str());
        if split_dir.exists() {
            fs::remove_dir_all(&split_dir)?;
        }
        let manifest = destination.join(split.manifest_name());
        if manifest.exists() {
            fs::remove_file(&manifest)?;
        }
    }
    Ok(())
}

/// Copy `files` into `<destination>/<split>` and list their stems in
/// `<destination>/<split>.txt`
pub fn copy_files(files: &[PathBuf], destination: &Path, split: SplitName) -> Result<PathBuf> {
    let split_dir = create_output_directory(&destination.join(split.as_str()))?;
    let manifest_path = destination.join(split.manifest_name());
    let mut manifest = BufWriter::new(File::create(&manifest_path)?);

    info!("Copying {} {} files...", files.len(), split);
    let pb = create_progress_bar(files.len() as u64, split.as_str());
    for path in files {
        let file_name = path
            .file_name()
            .ok_or_else(|| Error::Parse(format!("invalid file name {:?}", path)))?;
        writeln!(manifest, "{}", file_stem_string(path)?)?;
        fs::copy(path, split_dir.join(file_name)).map_err(|e| Error::from_io(path, e))?;
        pb.inc(1);
    }
    manifest.flush()?;
    pb.finish_with_message(format!("{} copy complete", split));

    Ok(manifest_path)
}

/// Compute the split, reset the destination and materialize all three splits
pub fn split_dataset(args: &SplitArgs) -> Result<SplitData> {
    info!("Splitting data into training, validation and test sets...");

    let test_set = load_independent_set(&args.independent_set)?;
    info!(
        "Loaded {} writer-independent test pages from {}",
        test_set.len(),
        args.independent_set.display()
    );

    let files = list_image_files(&args.source_directory)?;
    let split_data = split_images(files, &test_set, args.validation_percentage, args.seed)?;
    info!(
        "Split {} images: {} training, {} validation, {} test",
        split_data.len(),
        split_data.training.len(),
        split_data.validation.len(),
        split_data.test.len()
    );

    let destination = &args.destination_directory;
    fs::create_dir_all(destination)?;
    delete_split_directories(destination)?;

    copy_files(&split_data.training, destination, SplitName::Training)?;
    copy_files(&split_data.validation, destination, SplitName::Validation)?;
    copy_files(&split_data.test, destination, SplitName::Test)?;

    Ok(split_data)
}
