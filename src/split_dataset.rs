use anyhow::Context;
use clap::Parser;
use log::{error, info};

use muscima_prep::{split_dataset, SplitArgs};

fn main() {
    // Initialize the logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = SplitArgs::parse();

    let result = split_dataset(&args).with_context(|| {
        format!(
            "failed to split {} into {}",
            args.source_directory.display(),
            args.destination_directory.display()
        )
    });

    match result {
        Ok(split_data) => info!(
            "Split complete: {} images written to {}",
            split_data.len(),
            args.destination_directory.display()
        ),
        Err(e) => {
            error!("{:#}", e);
            std::process::exit(1);
        }
    }
}
