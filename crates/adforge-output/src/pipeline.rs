//! The three export strategies.
//!
//! All of them walk indices `0..total` in increasing order and render each
//! one through the override layer. Archive and document exports build their
//! single file in memory and save it only once the loop has finished, so a
//! declined or cancelled export leaves nothing behind.

use std::io::{Cursor, Write};

use adforge_core::{Combinations, digit_count};
use tracing::{debug, info, info_span};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::cancel::CancelToken;
use crate::error::{ExportError, Result};
use crate::naming::entry_name;
use crate::options::ExportOptions;
use crate::ports::{ConfirmPort, ExportPorts};

/// Delimiter between ads in the combined document.
pub const DOCUMENT_DELIMITER: &str = "\n\n---\n\n";

/// Marker appended to an ad heading when its text was replaced by hand.
pub const EDITED_MARKER: &str = " (edited)";

/// How an export ended when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// One file holding every combination was saved.
    Saved { ads: u64, filename: String },
    /// Every combination was saved as its own file.
    Dispatched { files: u64 },
    /// The user declined the confirmation prompt.
    Declined,
    /// The cancellation token fired after `completed` combinations.
    Cancelled { completed: u64 },
    /// There were no combinations to export.
    Empty,
}

/// Which shape an export produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Archive,
    Document,
    Files,
}

impl ExportKind {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Archive => "archive",
            Self::Document => "document",
            Self::Files => "individual files",
        }
    }
}

/// Run one export strategy to completion.
pub async fn run_export(
    kind: ExportKind,
    combos: &Combinations<'_>,
    ports: &mut ExportPorts<'_>,
    options: &ExportOptions,
    cancel: &CancelToken,
) -> Result<ExportOutcome> {
    match kind {
        ExportKind::Archive => export_archive(combos, ports, options, cancel),
        ExportKind::Document => export_document(combos, ports, options, cancel),
        ExportKind::Files => export_files(combos, ports, options, cancel).await,
    }
}

/// Zip every combination into one archive, one entry per ad.
pub fn export_archive(
    combos: &Combinations<'_>,
    ports: &mut ExportPorts<'_>,
    options: &ExportOptions,
    cancel: &CancelToken,
) -> Result<ExportOutcome> {
    let total = combos.total();
    if total == 0 {
        return Ok(ExportOutcome::Empty);
    }
    if !passes_safety_cap(total, options, ports.confirm) {
        info!(total, "Archive export declined");
        return Ok(ExportOutcome::Declined);
    }

    let _span = info_span!("export_archive", total).entered();
    let width = digit_count(total);
    let entry_options = SimpleFileOptions::default();
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

    for index in 0..total {
        if cancel.is_cancelled() {
            info!(completed = index, "Archive export cancelled");
            return Ok(ExportOutcome::Cancelled { completed: index });
        }
        let Some(text) = combos.effective_text(index) else {
            continue;
        };
        let entry = entry_name(index, width, &text, &options.extension);
        writer.start_file(entry.as_str(), entry_options)?;
        writer
            .write_all(text.as_bytes())
            .map_err(|source| ExportError::Entry { entry, source })?;
        ports.notify.progress(index + 1, total);
    }

    let bytes = writer.finish()?.into_inner();
    save_one(ports, &bytes, &options.archive_name)?;
    ports.notify.notify(&format!(
        "Exported {total} ads to {}",
        options.archive_name
    ));
    info!(total, bytes = bytes.len(), "Archive export complete");
    Ok(ExportOutcome::Saved {
        ads: total,
        filename: options.archive_name.clone(),
    })
}

/// Concatenate every combination into one document.
pub fn export_document(
    combos: &Combinations<'_>,
    ports: &mut ExportPorts<'_>,
    options: &ExportOptions,
    cancel: &CancelToken,
) -> Result<ExportOutcome> {
    let total = combos.total();
    if total == 0 {
        return Ok(ExportOutcome::Empty);
    }
    if !passes_safety_cap(total, options, ports.confirm) {
        info!(total, "Document export declined");
        return Ok(ExportOutcome::Declined);
    }

    let _span = info_span!("export_document", total).entered();
    let mut sections = Vec::new();
    for index in 0..total {
        if cancel.is_cancelled() {
            info!(completed = index, "Document export cancelled");
            return Ok(ExportOutcome::Cancelled { completed: index });
        }
        let Some(body) = combos.effective_text(index) else {
            continue;
        };
        let marker = if combos.is_edited(index) {
            EDITED_MARKER
        } else {
            ""
        };
        sections.push(format!("### Ad {}{marker}\n\n{body}", index + 1));
        ports.notify.progress(index + 1, total);
    }

    let document = sections.join(DOCUMENT_DELIMITER);
    save_one(ports, document.as_bytes(), &options.document_name)?;
    ports.notify.notify(&format!(
        "Exported {total} ads to {}",
        options.document_name
    ));
    info!(total, "Document export complete");
    Ok(ExportOutcome::Saved {
        ads: total,
        filename: options.document_name.clone(),
    })
}

/// Save every combination as its own file, pausing between dispatches so
/// the host stays responsive.
///
/// Always asks for confirmation first. Files already handed to the save
/// port stay saved when the export is cancelled midway.
pub async fn export_files(
    combos: &Combinations<'_>,
    ports: &mut ExportPorts<'_>,
    options: &ExportOptions,
    cancel: &CancelToken,
) -> Result<ExportOutcome> {
    let total = combos.total();
    if total == 0 {
        return Ok(ExportOutcome::Empty);
    }

    let mut message = format!("This will save {total} separate files.");
    if total > options.safety_cap {
        message.push_str(&format!(
            " That is more than the safety limit of {}.",
            options.safety_cap
        ));
    }
    message.push_str(" Continue?");
    if !ports.confirm.confirm(&message) {
        info!(total, "Individual file export declined");
        return Ok(ExportOutcome::Declined);
    }

    info!(total, "Starting individual file export");
    let width = digit_count(total);
    for index in 0..total {
        if cancel.is_cancelled() {
            info!(completed = index, "Individual file export cancelled");
            ports
                .notify
                .notify(&format!("Export cancelled after {index} of {total} files"));
            return Ok(ExportOutcome::Cancelled { completed: index });
        }
        let Some(text) = combos.effective_text(index) else {
            continue;
        };
        let filename = entry_name(index, width, &text, &options.extension);
        save_one(ports, text.as_bytes(), &filename)?;
        debug!(index, filename = %filename, "Dispatched file");
        ports.notify.progress(index + 1, total);

        if index + 1 < total {
            pause(options).await;
        }
    }

    ports
        .notify
        .notify(&format!("Saved {total} files"));
    info!(total, "Individual file export complete");
    Ok(ExportOutcome::Dispatched { files: total })
}

fn passes_safety_cap(total: u64, options: &ExportOptions, confirm: &dyn ConfirmPort) -> bool {
    total <= options.safety_cap
        || confirm.confirm(&format!(
            "This export will generate {total} files, more than the limit of {}. Continue?",
            options.safety_cap
        ))
}

fn save_one(ports: &mut ExportPorts<'_>, bytes: &[u8], filename: &str) -> Result<()> {
    ports
        .save
        .save(bytes, filename)
        .map_err(|source| ExportError::Save {
            filename: filename.to_string(),
            source,
        })
}

async fn pause(options: &ExportOptions) {
    if options.dispatch_delay.is_zero() {
        tokio::task::yield_now().await;
    } else {
        tokio::time::sleep(options.dispatch_delay).await;
    }
}
