//! Error/warning extraction and summaries for compilation stats

use crate::domain::{Level, StatsCompilation, StatsError, Summary};
use crate::error::{HelperError, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

pub mod format;
pub mod hint;

pub use format::{
    format_error_block, format_stats_messages, format_warning_block, FormattedMessages,
    PlainStatsFormatter, StatsMessageFormatter,
};
pub use hint::hint_node_polyfill;

/// Errors of a compilation, falling back to its children.
///
/// Some stats shapes (multi-compiler and child-compiler results) report a
/// non-zero `errorsCount` on the parent while the entries live only on the
/// children. The parent list wins whenever it is non-empty, since the same
/// error may be reported in both places.
pub fn extract_errors(stats: &StatsCompilation) -> Vec<StatsError> {
    if stats.errors_count > 0 && stats.errors.is_empty() {
        return collect_children(&stats.children, |child| &child.errors);
    }
    stats.errors.clone()
}

/// Warnings of a compilation, with the same child fallback as [`extract_errors`].
pub fn extract_warnings(stats: &StatsCompilation) -> Vec<StatsError> {
    if stats.warnings_count > 0 && stats.warnings.is_empty() {
        return collect_children(&stats.children, |child| &child.warnings);
    }
    stats.warnings.clone()
}

fn collect_children<F>(children: &[StatsCompilation], entries: F) -> Vec<StatsError>
where
    F: Fn(&StatsCompilation) -> &Vec<StatsError>,
{
    children.iter().flat_map(|child| entries(child).iter().cloned()).collect()
}

/// Whether the compilation (or any child compilation) failed.
pub fn has_errors(stats: &StatsCompilation) -> bool {
    stats.errors_count > 0 || !stats.errors.is_empty() || stats.children.iter().any(has_errors)
}

pub fn format_compilation_summary(stats: &StatsCompilation, verbose: bool) -> Summary {
    format_compilation_summary_with(stats, &PlainStatsFormatter, verbose)
}

pub fn format_compilation_summary_with(
    stats: &StatsCompilation,
    formatter: &dyn StatsMessageFormatter,
    verbose: bool,
) -> Summary {
    let errors = extract_errors(stats);
    let warnings = extract_warnings(stats);
    let messages = format_stats_messages(&errors, &warnings, formatter, verbose);

    if has_errors(stats) {
        return Summary {
            message: Some(format_error_block(&messages.errors)),
            level: Some(Level::Error),
        };
    }

    if !messages.warnings.is_empty() {
        return Summary {
            message: Some(format_warning_block(&messages.warnings)),
            level: Some(Level::Warning),
        };
    }

    Summary::default()
}

/// Whether a `stats` option would include `key` entries in `toJson`.
fn stats_option_shows(option: Option<&Value>, key: &str) -> bool {
    match option {
        Some(Value::Bool(enabled)) => *enabled,
        Some(Value::String(preset)) => match preset.as_str() {
            "none" => false,
            "errors-only" => key == "errors",
            _ => true,
        },
        Some(Value::Object(fields)) => fields.get(key).and_then(Value::as_bool).unwrap_or(true),
        _ => true,
    }
}

/// Drop the entries a `stats` option hides (`false`, `"none"`,
/// `"errors-only"`, or `{ errors: false }` / `{ warnings: false }`).
///
/// Counts are kept, so a failing build still reads as failing.
pub fn apply_stats_option(stats: &mut StatsCompilation, option: Option<&Value>) {
    if !stats_option_shows(option, "errors") {
        stats.errors_count = stats.errors_count.max(stats.errors.len());
        stats.errors.clear();
    }
    if !stats_option_shows(option, "warnings") {
        stats.warnings_count = stats.warnings_count.max(stats.warnings.len());
        stats.warnings.clear();
    }
    for child in &mut stats.children {
        apply_stats_option(child, option);
    }
}

/// Read a stats JSON file written by the bundler.
pub fn load_stats(path: &Path) -> Result<StatsCompilation> {
    let raw = fs::read_to_string(path)
        .map_err(|source| HelperError::Io { path: path.to_path_buf(), source })?;
    serde_json::from_str(&raw)
        .map_err(|source| HelperError::Json { path: path.to_path_buf(), source })
}
