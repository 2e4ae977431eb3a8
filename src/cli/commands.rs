use tracing::info;

use crate::Indexer;
use crate::cli::config::{AppConfig, CollectArgs, build_options_patch, resolve_trace_path};
use crate::dom::page::Page;
use crate::error::IndexError;
use crate::report::console::format_console_report;
use crate::screen::screen_model::Snapshot;
use crate::trace::logger::TraceLogger;

// ============================================================================
// collect subcommand
// ============================================================================

/// Collect a snapshot and print it (or write it to `output`).
pub fn cmd_collect(
    config: &AppConfig,
    args: &CollectArgs,
    format: &str,
    output: Option<&str>,
) -> Result<Snapshot, IndexError> {
    let mut page = Page::load(&args.page)?;
    let mut indexer = build_indexer(config, args);

    let snapshot = indexer.collect(&mut page, &build_options_patch(config, args))?;
    info!(
        page = %args.page,
        records = snapshot.len(),
        "collected snapshot"
    );

    let rendered = render_snapshot(&snapshot, format)?;
    match output {
        Some(path) => std::fs::write(path, &rendered).map_err(|e| IndexError::io(path, e))?,
        None => print!("{}", rendered),
    }

    Ok(snapshot)
}

// ============================================================================
// overlay subcommand
// ============================================================================

/// Collect with the overlay forced on and write the annotated page dump.
/// Returns the number of boxes drawn.
pub fn cmd_overlay(config: &AppConfig, args: &CollectArgs, output: &str) -> Result<usize, IndexError> {
    let mut page = Page::load(&args.page)?;
    let mut indexer = build_indexer(config, args);

    let patch = build_options_patch(config, args).highlight(true);
    let snapshot = indexer.collect(&mut page, &patch)?;

    let dump = serde_json::to_string_pretty(&page.to_fixture()).map_err(|e| {
        IndexError::JsonSerialize {
            context: "annotated page dump".into(),
            source: e,
        }
    })?;
    std::fs::write(output, dump).map_err(|e| IndexError::io(output, e))?;

    println!("Drew {} boxes into {}", snapshot.len(), output);
    Ok(snapshot.len())
}

// ============================================================================
// Helpers
// ============================================================================

fn build_indexer(config: &AppConfig, args: &CollectArgs) -> Indexer {
    let indexer = Indexer::new();
    match resolve_trace_path(config, args) {
        Some(path) => indexer.with_tracer(TraceLogger::new(path)),
        None => indexer,
    }
}

/// Render a snapshot as pretty JSON (default) or a console table.
pub fn render_snapshot(snapshot: &Snapshot, format: &str) -> Result<String, IndexError> {
    match format {
        "console" | "table" => Ok(format_console_report(snapshot)),
        _ => serde_json::to_string_pretty(snapshot)
            .map(|mut json| {
                json.push('\n');
                json
            })
            .map_err(|e| IndexError::JsonSerialize {
                context: "snapshot".into(),
                source: e,
            }),
    }
}
