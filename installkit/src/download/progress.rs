//! Cancellation token and byte formatting for downloads.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative cancellation token.
///
/// Cloning the token shares the underlying flag, so a caller can hand one
/// clone to the session and trigger it from a signal handler or UI event.
/// Cancellation is observed between chunks of the download; it is a request,
/// not a preemption.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a new, untriggered token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Check whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Format a byte count for human display.
///
/// Units upgrade from B through KB, MB and GB while the running amount
/// exceeds 1024, capping at GB. Two decimal places.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    let mut amount = bytes as f64;
    let mut unit = 0;

    while amount > 1024.0 && unit < UNITS.len() - 1 {
        amount /= 1024.0;
        unit += 1;
    }

    format!("{:.2} {}", amount, UNITS[unit])
}

/// Format a transfer as "received / total" for progress text.
pub fn format_transfer(received: u64, total: u64) -> String {
    format!("{} / {}", format_bytes(received), format_bytes(total))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_token_starts_untriggered() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());
    }

    #[test]
    fn test_cancel_is_visible_through_clones() {
        let token = CancelToken::new();
        let clone = token.clone();

        clone.cancel();

        assert!(token.is_cancelled());
        assert!(clone.is_cancelled());
    }

    #[test]
    fn test_format_bytes_below_threshold() {
        assert_eq!(format_bytes(0), "0.00 B");
        assert_eq!(format_bytes(1023), "1023.00 B");
        // 1024 is not strictly greater than 1024, so it stays in bytes
        assert_eq!(format_bytes(1024), "1024.00 B");
    }

    #[test]
    fn test_format_bytes_kilobytes() {
        assert_eq!(format_bytes(1536), "1.50 KB");
    }

    #[test]
    fn test_format_bytes_megabytes() {
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.00 MB");
    }

    #[test]
    fn test_format_bytes_caps_at_gigabytes() {
        assert_eq!(format_bytes(1_073_741_824), "1.00 GB");
        // Terabyte-scale amounts stay in GB
        assert_eq!(format_bytes(2048 * 1024 * 1024 * 1024), "2048.00 GB");
    }

    #[test]
    fn test_format_transfer() {
        assert_eq!(format_transfer(1536, 3 * 1024 * 1024), "1.50 KB / 3.00 MB");
    }
}
