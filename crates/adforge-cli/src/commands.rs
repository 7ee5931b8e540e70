use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use adforge_cli::app::{App, position_index};
use adforge_cli::ports::{ProgressNotifier, TerminalConfirm};
use adforge_core::{SearchOutcome, find_next};
use adforge_output::{
    CancelToken, DirectorySink, ExportKind, ExportOutcome, ExportPorts, run_export,
};

use crate::cli::{Command, ExportArgs, Toggle};
use crate::summary::{print_ad, print_preview, print_slots};

pub fn run_command(command: Command, app: &mut App) -> Result<()> {
    match command {
        Command::Slots => print_slots(app.session()),
        Command::Count => println!("{}", app.session().total()),
        Command::Show { ad } => {
            let index = app.ad_index(ad)?;
            print_ad(app.session(), index);
        }
        Command::Preview { limit } => {
            let limit = limit.unwrap_or(app.settings().explorer.preview_cap);
            print_preview(&app.session().combinations(), limit);
        }
        Command::Find { term, from } => {
            let from = app.search_after(from)?;
            match find_next(&app.session().combinations(), &term, from) {
                SearchOutcome::Found(index) => print_ad(app.session(), index),
                SearchOutcome::NoMatch => println!("No ad contains \"{term}\""),
            }
        }
        Command::SetText { ad, text } => {
            let index = app.ad_index(ad)?;
            app.update(|session| session.set_full_text(index, text))?;
            println!("Ad {ad} now uses custom text");
        }
        Command::Exclude { ad, slot } => {
            let index = app.ad_index(ad)?;
            let id = app.slot_id(&slot)?;
            let excluded = app.update(|session| session.toggle_exclusion(index, &id))?;
            if excluded {
                println!("Ad {ad} leaves out {slot}");
            } else {
                println!("Ad {ad} includes {slot} again");
            }
        }
        Command::ClearOverride { ad } => {
            let index = app.ad_index(ad)?;
            if app.update(|session| Ok(session.clear_override(index)))? {
                println!("Ad {ad} is back to its composed text");
            } else {
                println!("Ad {ad} has no edits");
            }
        }
        Command::ClearOverrides => {
            let count = app.session().overrides().len();
            app.update(|session| {
                session.clear_overrides();
                Ok(())
            })?;
            println!("Cleared {count} ad edits");
        }
        Command::AddSlot { name } => {
            structural(app, |session| Ok(session.add_slot(name.as_str())))?;
            println!("Added slot {name}");
        }
        Command::RemoveSlot { slot } => {
            let id = app.slot_id(&slot)?;
            let removed = structural(app, |session| session.remove_slot(&id))?;
            println!(
                "Removed slot {} with {} candidates",
                removed.name,
                removed.items.len()
            );
        }
        Command::RenameSlot { slot, name } => {
            let id = app.slot_id(&slot)?;
            app.update(|session| session.rename_slot(&id, name.as_str()))?;
            println!("Renamed {slot} to {name}");
        }
        Command::MoveSlot { slot, position } => {
            let id = app.slot_id(&slot)?;
            let target = position_index(position)?;
            structural(app, |session| session.move_slot(&id, target))?;
            println!("Moved {slot}");
        }
        Command::Enable { slot } => set_enabled(app, &slot, true)?,
        Command::Disable { slot } => set_enabled(app, &slot, false)?,
        Command::AddCandidate { slot, text } => {
            let id = app.slot_id(&slot)?;
            structural(app, |session| session.add_candidate(&id, text))?;
            println!("Added a candidate to {slot}");
        }
        Command::EditCandidate {
            slot,
            position,
            text,
        } => {
            let id = app.slot_id(&slot)?;
            let index = position_index(position)?;
            structural(app, |session| session.set_candidate_text(&id, index, text))?;
            println!("Updated candidate {position} of {slot}");
        }
        Command::RemoveCandidate { slot, position } => {
            let id = app.slot_id(&slot)?;
            let index = position_index(position)?;
            let removed = structural(app, |session| session.remove_candidate(&id, index))?;
            println!("Removed \"{}\" from {slot}", removed.text.trim());
        }
        Command::Headings { state } => {
            let on = matches!(state, Toggle::On);
            app.update(|session| {
                session.set_include_headings(on);
                Ok(())
            })?;
            println!("Headings {}", if on { "on" } else { "off" });
        }
        Command::Separator { text } => {
            app.update(|session| {
                session.set_separator(text);
                Ok(())
            })?;
            println!("Separator updated");
        }
        Command::Export(args) => run_export_command(&args, app)?,
    }
    Ok(())
}

/// Run a change that renumbers the space and report the edits it dropped.
fn structural<R>(
    app: &mut App,
    change: impl FnOnce(&mut adforge_core::Session) -> adforge_core::Result<R>,
) -> Result<R> {
    let before = app.session().overrides().len();
    let value = app.update(change)?;
    let dropped = before.saturating_sub(app.session().overrides().len());
    if dropped > 0 {
        println!("Cleared {dropped} ad edits because the ad numbering changed");
    }
    Ok(value)
}

fn set_enabled(app: &mut App, slot: &str, enabled: bool) -> Result<()> {
    let id = app.slot_id(slot)?;
    structural(app, |session| session.set_enabled(&id, enabled))?;
    println!(
        "{} {slot}; {} ads",
        if enabled { "Enabled" } else { "Disabled" },
        app.session().total()
    );
    Ok(())
}

fn run_export_command(args: &ExportArgs, app: &App) -> Result<()> {
    let kind = ExportKind::from(args.shape);
    let mut options = app.settings().export.to_options();
    if let Some(cap) = args.safety_cap {
        options.safety_cap = cap;
    }
    if let Some(ms) = args.delay_ms {
        options.dispatch_delay = Duration::from_millis(ms);
    }

    let span = info_span!("export", kind = kind.label(), out = %args.out.display());
    let _guard = span.enter();

    let mut sink = DirectorySink::create(&args.out).map_err(|e| {
        let message = e.user_message();
        anyhow::Error::new(e).context(message)
    })?;
    let confirm = TerminalConfirm::new(args.yes);
    let notify = ProgressNotifier::new(kind.label());
    let cancel = CancelToken::new();
    let combos = app.session().combinations();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("start async runtime")?;
    let result = runtime.block_on(async {
        let watcher = cancel.clone();
        let interrupt = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, stopping export");
                watcher.cancel();
            }
        });
        let mut ports = ExportPorts {
            confirm: &confirm,
            save: &mut sink,
            notify: &notify,
        };
        let result = run_export(kind, &combos, &mut ports, &options, &cancel).await;
        interrupt.abort();
        result
    });
    notify.finish();

    let outcome = result.map_err(|e| {
        let message = e.user_message();
        anyhow::Error::new(e).context(message)
    })?;
    info!(?outcome, "Export finished");

    match outcome {
        ExportOutcome::Saved { filename, .. } => {
            println!("{}", sink.dir().join(filename).display());
        }
        ExportOutcome::Dispatched { files } => {
            println!("{files} files in {}", sink.dir().display());
        }
        ExportOutcome::Declined => println!("Export declined; nothing was written"),
        ExportOutcome::Cancelled { completed } => match kind {
            ExportKind::Files => {
                println!("Export stopped; {completed} files were already written");
            }
            ExportKind::Archive | ExportKind::Document => {
                println!("Export stopped; nothing was written");
            }
        },
        ExportOutcome::Empty => {
            println!("No ads to export; enable a slot that has at least one candidate");
        }
    }
    Ok(())
}
