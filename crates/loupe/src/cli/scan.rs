//! The `loupe scan` command for probing inputs.

use clap::Args;
use loupe_core::pipeline::{scan_first, Inspector};
use loupe_core::Config;

/// Arguments for the `scan` command.
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Image files or URLs to check
    #[arg(required = true)]
    pub inputs: Vec<String>,
}

/// Execute the scan command.
///
/// Probes inputs one at a time and stops at the first that carries
/// metadata. Returns whether anything was found so main can set the exit
/// code.
pub async fn execute(args: ScanArgs, config: Config) -> anyhow::Result<bool> {
    let (sources, labels) = super::build_sources(&args.inputs, &config);
    let inspector = Inspector::new(&config);

    match scan_first(&inspector, &sources).await {
        Some(index) => {
            println!("{}", labels[index]);
            Ok(true)
        }
        None => {
            println!("No image generation data found.");
            Ok(false)
        }
    }
}
