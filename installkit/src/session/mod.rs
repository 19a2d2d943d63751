//! Install session orchestration.
//!
//! The session sequences the pipeline stages into a single state machine:
//!
//! ```text
//! Idle ──► FetchingManifest ──► Downloading ──► Verifying ──► Extracting ──► Complete
//!                 │                  │               │             │
//!                 └──────────────────┴───── Aborted ─┴── Failed ───┘
//! ```
//!
//! One worker thread per session; stages run strictly sequentially, the
//! download is the only preemptible stage, and every temporary file is
//! removed before the terminal outcome becomes observable.
//!
//! # Example
//!
//! ```ignore
//! use installkit::config::InstallerConfig;
//! use installkit::download::CancelToken;
//! use installkit::extract::InstallTarget;
//! use installkit::session::InstallSession;
//!
//! let config = InstallerConfig::new(
//!     "https://releases.example.com/CurrentVersion.xml",
//!     "Nova",
//!     "Nova",
//! );
//! let target = InstallTarget::new("/home/user/Games");
//!
//! let session = InstallSession::begin(config, target, CancelToken::new(), None);
//! let outcome = session.wait();
//! println!("{}", outcome.user_message());
//! ```

mod cleanup;
mod install;
mod retry;
mod state;

pub use install::InstallSession;
pub use retry::retry_with_delay;
pub use state::{InstallOutcome, InstallReport, SessionState};
