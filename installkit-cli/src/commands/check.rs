//! Check command - fetch and display the current release manifest.

use clap::Args;
use console::style;

use installkit::manifest::HttpManifestClient;
use installkit::traits::ManifestClient;

use crate::error::CliError;

/// Arguments for the check command.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// URL of the release manifest document
    #[arg(long)]
    pub manifest_url: String,

    /// Application identifier the manifest is keyed by
    #[arg(long)]
    pub app_id: String,
}

/// Run the check command.
pub fn run(args: CheckArgs) -> Result<(), CliError> {
    let client = HttpManifestClient::new(&args.manifest_url, &args.app_id);

    let manifest = client
        .fetch()
        .map_err(|e| CliError::Install(e.to_string()))?;

    println!("{} {}", style("Current version:").bold(), manifest.version);
    println!("{} {}", style("Download:").bold(), manifest.download_url);
    println!(
        "{} {} ({})",
        style("Digest:").bold(),
        manifest.digest,
        manifest.algorithm
    );

    Ok(())
}
