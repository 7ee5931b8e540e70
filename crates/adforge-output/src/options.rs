//! Export tuning knobs.

use std::time::Duration;

/// Default number of files an export may produce without asking first.
pub const DEFAULT_SAFETY_CAP: u64 = 500;

/// Default pause between individual file dispatches.
pub const DEFAULT_DISPATCH_DELAY: Duration = Duration::from_millis(150);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Exports above this many files need explicit confirmation.
    pub safety_cap: u64,
    /// Pause between files in the individual-files strategy.
    pub dispatch_delay: Duration,
    /// File name of the zip archive.
    pub archive_name: String,
    /// File name of the combined document.
    pub document_name: String,
    /// Extension of each ad file, without the dot.
    pub extension: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            safety_cap: DEFAULT_SAFETY_CAP,
            dispatch_delay: DEFAULT_DISPATCH_DELAY,
            archive_name: "ads.zip".to_string(),
            document_name: "ads.md".to_string(),
            extension: "txt".to_string(),
        }
    }
}
