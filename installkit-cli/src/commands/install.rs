//! Install command - run the full download/verify/extract pipeline.

use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use clap::Args;
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};

use installkit::download::{format_transfer, CancelToken};
use installkit::extract::{default_install_root, InstallTarget};
use installkit::session::{InstallOutcome, InstallSession};
use installkit::InstallerConfig;

use crate::error::CliError;

/// Arguments for the install command.
#[derive(Args, Debug)]
pub struct InstallArgs {
    /// URL of the release manifest document
    #[arg(long)]
    pub manifest_url: String,

    /// Application identifier the manifest is keyed by
    #[arg(long)]
    pub app_id: String,

    /// Product name, used for the dedicated install folder
    #[arg(long)]
    pub product: String,

    /// Directory to install into (defaults to the per-user data directory)
    #[arg(long)]
    pub install_dir: Option<PathBuf>,

    /// Directory for temporary download files
    #[arg(long)]
    pub temp_dir: Option<PathBuf>,

    /// Seconds to count down before installing
    #[arg(long, default_value_t = 5)]
    pub countdown: u64,

    /// Skip the countdown and any confirmation prompts
    #[arg(short = 'y', long)]
    pub yes: bool,
}

/// Run the install command.
pub fn run(args: InstallArgs) -> Result<(), CliError> {
    let install_dir = args
        .install_dir
        .unwrap_or_else(|| default_install_root(&args.product));
    let target = InstallTarget::new(&install_dir);
    let product_root = target.product_root(&args.product);

    println!("{} installer", args.product);
    println!("Destination: {}", product_root.display());
    println!(
        "Platform:    {} ({})",
        target.platform.name(),
        target.bitness.name()
    );
    println!();

    if !args.yes && !confirm_replace(&args.product, &product_root)? {
        println!("Leaving the existing installation in place.");
        return Ok(());
    }

    // Ctrl+C cancels the countdown and the session
    let cancel = CancelToken::new();
    {
        let cancel = cancel.clone();
        ctrlc::set_handler(move || {
            println!();
            println!("Cancelling...");
            cancel.cancel();
        })
        .map_err(|e| CliError::Config(format!("Failed to set signal handler: {}", e)))?;
    }

    if !args.yes && !run_countdown(args.countdown, &args.product, &product_root, &cancel) {
        println!("The download was cancelled.");
        return Ok(());
    }

    let mut config = InstallerConfig::new(args.manifest_url, args.app_id, args.product.clone());
    if let Some(temp_dir) = args.temp_dir {
        config = config.with_temp_dir(temp_dir);
    }

    let progress = ProgressBar::new(0);
    progress.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {msg}")
            .expect("valid progress bar template"),
    );

    let progress_cb = {
        let progress = progress.clone();
        Box::new(move |received: u64, total: u64| {
            progress.set_length(total);
            progress.set_position(received);
            progress.set_message(format_transfer(received, total));
        })
    };

    println!("Downloading...");
    let session = InstallSession::begin(config, target, cancel, Some(progress_cb));
    let outcome = session.wait();
    progress.finish_and_clear();

    match outcome {
        InstallOutcome::Complete(report) => {
            println!(
                "Installed {} {} to {} ({} files).",
                args.product,
                report.version,
                report.install_path.display(),
                report.files_installed
            );
            Ok(())
        }
        InstallOutcome::Aborted => {
            println!("{}", InstallOutcome::Aborted.user_message());
            Ok(())
        }
        InstallOutcome::Failed(e) => {
            tracing::error!(error = %e, "installation failed");
            Err(CliError::Install(
                InstallOutcome::Failed(e).user_message().to_string(),
            ))
        }
    }
}

/// Ask before replacing an existing, non-empty installation.
///
/// Returns `Ok(true)` when installation should proceed.
fn confirm_replace(product: &str, product_root: &Path) -> Result<bool, CliError> {
    let occupied = product_root
        .read_dir()
        .map(|mut entries| entries.next().is_some())
        .unwrap_or(false);

    if !occupied {
        return Ok(true);
    }

    Confirm::new()
        .with_prompt(format!(
            "{} is already installed at {}. Replace it?",
            product,
            product_root.display()
        ))
        .default(false)
        .interact()
        .map_err(|e| CliError::Config(format!("Could not read confirmation: {}", e)))
}

/// Count down before installing, giving the user a cancel window.
///
/// Returns false if cancellation was requested during the countdown.
fn run_countdown(seconds: u64, product: &str, dest: &Path, cancel: &CancelToken) -> bool {
    for remaining in (1..=seconds).rev() {
        if cancel.is_cancelled() {
            return false;
        }

        let plural = if remaining == 1 { "" } else { "s" };
        println!(
            "{} will install to {} in {} second{}. Press Ctrl+C to cancel.",
            product,
            dest.display(),
            remaining,
            plural
        );
        thread::sleep(Duration::from_secs(1));
    }

    !cancel.is_cancelled()
}
