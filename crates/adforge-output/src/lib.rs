//! Export of ad combinations.
//!
//! Three strategies share one naming scheme and one set of host ports:
//!
//! - **Archive**: one zip file, one entry per combination
//! - **Document**: one text document with every combination in order
//! - **Files**: one saved file per combination, paced so the host stays
//!   responsive
//!
//! Exports above the configured safety cap ask for confirmation first, and
//! every loop checks a [`CancelToken`] between combinations.

mod cancel;
mod error;
mod naming;
mod options;
mod pipeline;
mod ports;

pub use cancel::CancelToken;
pub use error::{ExportError, Result};
pub use naming::{
    FALLBACK_SLUG, MAX_SLUG_CHARS, entry_name, first_non_blank_line, normalize_file_name,
};
pub use options::{DEFAULT_DISPATCH_DELAY, DEFAULT_SAFETY_CAP, ExportOptions};
pub use pipeline::{
    DOCUMENT_DELIMITER, EDITED_MARKER, ExportKind, ExportOutcome, export_archive,
    export_document, export_files, run_export,
};
pub use ports::{ConfirmPort, DirectorySink, ExportPorts, LogNotifier, NotifyPort, SavePort};
