//! The install session: one worker thread driving the full pipeline.

use std::fs;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use super::cleanup::TempFileGuard;
use super::retry::retry_with_delay;
use super::state::{InstallOutcome, InstallReport, SessionState};
use crate::config::InstallerConfig;
use crate::download::{CancelToken, DownloadHandle, DownloadStatus, HttpDownloader};
use crate::error::{InstallerError, InstallerResult};
use crate::extract::{InstallTarget, ZipExtractor};
use crate::manifest::HttpManifestClient;
use crate::traits::{ArchiveExtractor, ManifestClient, PackageDownloader, ProgressCallback};
use crate::verify::ensure_digest;

/// A running installation.
///
/// The pipeline runs on a dedicated worker thread so any synchronous caller
/// stays responsive; callers observe it through the state snapshot, the
/// download handle, and finally [`InstallSession::wait`], which blocks on the
/// worker's terminal outcome. Exactly one outcome is delivered per session.
///
/// At most one session should be active against a given install target at a
/// time; that is a caller responsibility, not guarded here.
pub struct InstallSession {
    state: Arc<Mutex<SessionState>>,
    download: Arc<Mutex<Option<Arc<DownloadHandle>>>>,
    cancel: CancelToken,
    complete: Arc<AtomicBool>,
    outcome_rx: Receiver<InstallOutcome>,
    worker: Option<JoinHandle<()>>,
}

impl InstallSession {
    /// Start an installation with the stock HTTP and ZIP components.
    ///
    /// The caller supplies the cancellation token; triggering it from any
    /// thread cancels the session.
    pub fn begin(
        config: InstallerConfig,
        target: InstallTarget,
        cancel: CancelToken,
        on_progress: Option<ProgressCallback>,
    ) -> Self {
        let client = HttpManifestClient::with_timeout(
            config.manifest_url.clone(),
            config.app_id.clone(),
            config.timeout,
        );
        let downloader = HttpDownloader::with_timeout(config.timeout);
        let extractor =
            ZipExtractor::new(config.product.clone()).with_chunk_size(config.extract_chunk_size);

        Self::start(config, target, client, downloader, extractor, cancel, on_progress)
    }

    /// Start an installation with explicit stage implementations.
    #[allow(clippy::too_many_arguments)]
    pub fn start<M, D, E>(
        config: InstallerConfig,
        target: InstallTarget,
        client: M,
        downloader: D,
        extractor: E,
        cancel: CancelToken,
        on_progress: Option<ProgressCallback>,
    ) -> Self
    where
        M: ManifestClient + 'static,
        D: PackageDownloader + 'static,
        E: ArchiveExtractor + 'static,
    {
        let state = Arc::new(Mutex::new(SessionState::Idle));
        let download = Arc::new(Mutex::new(None));
        let complete = Arc::new(AtomicBool::new(false));
        let (outcome_tx, outcome_rx) = mpsc::channel();

        let worker = spawn_worker(WorkerContext {
            config,
            target,
            client,
            downloader,
            extractor,
            on_progress,
            state: Arc::clone(&state),
            download: Arc::clone(&download),
            cancel: cancel.clone(),
            complete: Arc::clone(&complete),
            outcome_tx,
        });

        Self {
            state,
            download,
            cancel,
            complete,
            outcome_rx,
            worker: Some(worker),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SessionState {
        *self.state.lock().expect("session state lock poisoned")
    }

    /// The download record, once the download stage has started.
    pub fn download(&self) -> Option<Arc<DownloadHandle>> {
        self.download
            .lock()
            .expect("download slot lock poisoned")
            .clone()
    }

    /// A token that cancels this session when triggered.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Request cancellation.
    ///
    /// Preempts an in-flight download; at any other stage the request is
    /// honoured at the next stage boundary.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Whether the session has reached a terminal state and attempted
    /// cleanup of its temporary files.
    pub fn is_complete(&self) -> bool {
        self.complete.load(Ordering::SeqCst)
    }

    /// Block until the session finishes and take its terminal outcome.
    pub fn wait(mut self) -> InstallOutcome {
        let outcome = self
            .outcome_rx
            .recv()
            .expect("install worker terminated without reporting an outcome");

        if let Some(worker) = self.worker.take() {
            worker.join().ok();
        }

        outcome
    }
}

impl Drop for InstallSession {
    fn drop(&mut self) {
        // A dropped session must still release its temporary files: cancel
        // the worker and wait for its cleanup to run.
        if let Some(worker) = self.worker.take() {
            self.cancel.cancel();
            worker.join().ok();
        }
    }
}

/// Everything the worker thread owns.
struct WorkerContext<M, D, E> {
    config: InstallerConfig,
    target: InstallTarget,
    client: M,
    downloader: D,
    extractor: E,
    on_progress: Option<ProgressCallback>,
    state: Arc<Mutex<SessionState>>,
    download: Arc<Mutex<Option<Arc<DownloadHandle>>>>,
    cancel: CancelToken,
    complete: Arc<AtomicBool>,
    outcome_tx: Sender<InstallOutcome>,
}

fn spawn_worker<M, D, E>(ctx: WorkerContext<M, D, E>) -> JoinHandle<()>
where
    M: ManifestClient + 'static,
    D: PackageDownloader + 'static,
    E: ArchiveExtractor + 'static,
{
    thread::Builder::new()
        .name("install-session".to_string())
        .spawn(move || {
            let state = Arc::clone(&ctx.state);
            let complete = Arc::clone(&ctx.complete);
            let outcome_tx = ctx.outcome_tx.clone();

            let outcome = run_pipeline(ctx);

            // Temp guards are gone by now; only then is the result observable
            *state.lock().expect("session state lock poisoned") = outcome.state();
            complete.store(true, Ordering::SeqCst);

            if outcome_tx.send(outcome).is_err() {
                tracing::debug!("session dropped before its outcome was observed");
            }
        })
        .expect("Failed to spawn install worker thread")
}

/// Run the pipeline stages in order, returning the terminal outcome.
///
/// Temporary files are owned by guards scoped to this function, so cleanup
/// runs on every path out of it.
fn run_pipeline<M, D, E>(ctx: WorkerContext<M, D, E>) -> InstallOutcome
where
    M: ManifestClient,
    D: PackageDownloader,
    E: ArchiveExtractor,
{
    let WorkerContext {
        config,
        target,
        client,
        downloader,
        extractor,
        on_progress,
        state,
        download,
        cancel,
        ..
    } = ctx;

    let set_state = |next: SessionState| {
        tracing::info!(state = next.name(), "install session");
        *state.lock().expect("session state lock poisoned") = next;
    };

    // Stage 1: fetch the manifest. Manifest failures are not retried.
    set_state(SessionState::FetchingManifest);
    let manifest = match client.fetch() {
        Ok(manifest) => manifest,
        Err(e) => {
            tracing::warn!(error = %e, "manifest fetch failed");
            return InstallOutcome::Failed(e);
        }
    };
    tracing::info!(version = %manifest.version, url = %manifest.download_url, "manifest fetched");

    if cancel.is_cancelled() {
        return InstallOutcome::Aborted;
    }

    // Stage 2: download to a fresh session-unique temp file.
    let temp_guard = match create_temp_file(&config) {
        Ok(guard) => guard,
        Err(e) => return InstallOutcome::Failed(e),
    };

    let handle = Arc::new(DownloadHandle::new(
        manifest.download_url.clone(),
        temp_guard.path(),
    ));
    *download.lock().expect("download slot lock poisoned") = Some(Arc::clone(&handle));

    set_state(SessionState::Downloading);
    handle.set_status(DownloadStatus::InProgress);

    let progress: ProgressCallback = {
        let handle = Arc::clone(&handle);
        Box::new(move |received, total| {
            handle.record_progress(received, total);
            if let Some(cb) = &on_progress {
                cb(received, total);
            }
        })
    };

    let bytes_downloaded = match downloader.download(
        &manifest.download_url,
        temp_guard.path(),
        &cancel,
        Some(progress),
    ) {
        Ok(bytes) => {
            handle.set_status(DownloadStatus::Completed);
            bytes
        }
        Err(InstallerError::Cancelled) => {
            handle.set_status(DownloadStatus::Cancelled);
            tracing::info!("download cancelled");
            return InstallOutcome::Aborted;
        }
        Err(e) => {
            handle.set_status(DownloadStatus::Failed);
            tracing::warn!(error = %e, "download failed");
            return InstallOutcome::Failed(e);
        }
    };

    if cancel.is_cancelled() {
        return InstallOutcome::Aborted;
    }

    // Stage 3: verify. A failed checksum never proceeds to extraction.
    set_state(SessionState::Verifying);
    if let Err(e) = ensure_digest(temp_guard.path(), &manifest.digest, manifest.algorithm) {
        tracing::warn!(error = %e, "verification failed");
        return InstallOutcome::Failed(e);
    }

    if cancel.is_cancelled() {
        return InstallOutcome::Aborted;
    }

    // Copy the verified artifact to a working file. The copy can hit
    // transient filesystem failures (virus scanners holding locks), so it is
    // the one step with bounded retry.
    let working_guard = TempFileGuard::new(temp_guard.path().with_extension("install"));
    let copy_result = retry_with_delay(config.copy_attempts, config.copy_retry_delay, || {
        fs::copy(temp_guard.path(), working_guard.path())
            .map(|_| ())
            .map_err(|e| InstallerError::WriteFailed {
                path: working_guard.path().to_path_buf(),
                source: e,
            })
    });
    if let Err(e) = copy_result {
        tracing::warn!(error = %e, "could not stage working copy");
        return InstallOutcome::Failed(e);
    }

    // Stage 4: extract. Runs to completion or failure; partial writes into
    // the target are unsafe to abandon mid-way.
    set_state(SessionState::Extracting);
    let files_installed = match extractor.extract(working_guard.path(), &target) {
        Ok(count) => count,
        Err(e) => {
            tracing::warn!(error = %e, "extraction failed");
            return InstallOutcome::Failed(e);
        }
    };

    InstallOutcome::Complete(InstallReport {
        version: manifest.version,
        install_path: target.product_root(&config.product),
        bytes_downloaded,
        files_installed,
    })
}

/// Create the session's unique temporary download file.
fn create_temp_file(config: &InstallerConfig) -> InstallerResult<TempFileGuard> {
    fs::create_dir_all(&config.temp_dir).map_err(|e| InstallerError::CreateDirFailed {
        path: config.temp_dir.clone(),
        source: e,
    })?;

    let temp = tempfile::Builder::new()
        .prefix("install-")
        .suffix(".pkg")
        .tempfile_in(&config.temp_dir)
        .map_err(|e| InstallerError::WriteFailed {
            path: config.temp_dir.clone(),
            source: e,
        })?;

    // The guard takes over deletion from here; it retries once and then
    // gives up silently instead of blocking shutdown.
    let path = temp
        .into_temp_path()
        .keep()
        .map_err(|e| InstallerError::WriteFailed {
            path: config.temp_dir.clone(),
            source: e.error,
        })?;

    Ok(TempFileGuard::new(path))
}
