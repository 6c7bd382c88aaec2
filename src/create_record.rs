use anyhow::Context;
use clap::Parser;
use log::{error, info};

use muscima_prep::{process_dataset, ConvertArgs, LabelMap};

fn run(args: &ConvertArgs) -> anyhow::Result<()> {
    let label_map = LabelMap::load(&args.label_map_path).with_context(|| {
        format!(
            "failed to load label map {}",
            args.label_map_path.display()
        )
    })?;
    info!("Loaded {} classes from the label map.", label_map.len());

    let stats = process_dataset(args, &label_map)
        .with_context(|| format!("failed to convert the {} set", args.set))?;
    stats.print_summary();
    info!("Records written to {}", args.output_path.display());
    Ok(())
}

fn main() {
    // Initialize the logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = ConvertArgs::parse();

    info!("Starting the conversion process...");

    if let Err(e) = run(&args) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
