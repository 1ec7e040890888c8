//! Rendering stats entries into terminal text.

use super::hint::hint_node_polyfill;
use crate::domain::StatsError;
use console::style;
use once_cell::sync::Lazy;
use regex::Regex;

static STACK_FRAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*at\s.*$\n?").expect("valid stack-frame regex"));
static EXTRA_BLANK_LINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{3,}").expect("valid blank-line regex"));

/// Turns one stats entry into display text.
///
/// Hosts with their own message formatting plug it in here; the bundled
/// [`PlainStatsFormatter`] covers the common case.
pub trait StatsMessageFormatter {
    fn format(&self, entry: &StatsError, verbose: bool) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PlainStatsFormatter;

impl StatsMessageFormatter for PlainStatsFormatter {
    fn format(&self, entry: &StatsError, verbose: bool) -> String {
        let mut out = String::new();

        let location = entry
            .module_name
            .as_deref()
            .or(entry.module_identifier.as_deref())
            .or(entry.file.as_deref());
        if let Some(location) = location {
            out.push_str("File: ");
            out.push_str(location);
            out.push('\n');
        }

        if verbose {
            out.push_str(entry.message.trim_end());
            if let Some(details) = entry.details.as_deref().filter(|d| !d.trim().is_empty()) {
                out.push('\n');
                out.push_str(details.trim_end());
            }
            if let Some(stack) = entry.stack.as_deref().filter(|s| !entry.message.contains(*s)) {
                out.push('\n');
                out.push_str(stack.trim_end());
            }
        } else {
            let stripped = STACK_FRAME.replace_all(&entry.message, "");
            let collapsed = EXTRA_BLANK_LINES.replace_all(&stripped, "\n\n");
            out.push_str(collapsed.trim_end());
        }

        out
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormattedMessages {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

pub fn format_stats_messages(
    errors: &[StatsError],
    warnings: &[StatsError],
    formatter: &dyn StatsMessageFormatter,
    verbose: bool,
) -> FormattedMessages {
    FormattedMessages {
        errors: errors.iter().map(|entry| formatter.format(entry, verbose)).collect(),
        warnings: warnings.iter().map(|entry| formatter.format(entry, verbose)).collect(),
    }
}

pub fn format_error_block(errors: &[String]) -> String {
    let title = style("Compile error: ").red().bold();

    if errors.is_empty() {
        return format!(
            "{title}\n{}",
            style("For more details, please setting 'stats.errors: true' ").yellow()
        );
    }

    let messages: Vec<String> = errors.iter().map(|error| hint_node_polyfill(error)).collect();
    let tip = style("Failed to compile, check the errors for troubleshooting.").yellow();

    format!("{title}\n{tip}\n{}\n", messages.join("\n\n"))
}

pub fn format_warning_block(warnings: &[String]) -> String {
    let title = style("Compile Warning: \n").yellow().bold();
    format!("{title}{}\n", warnings.join("\n\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use console::strip_ansi_codes;

    fn plain(text: &str) -> String {
        strip_ansi_codes(text).to_string()
    }

    #[test]
    fn error_block_lists_messages_with_tip() {
        let block = plain(&format_error_block(&["first".to_string(), "second".to_string()]));
        similar_asserts::assert_eq!(
            block,
            "Compile error: \nFailed to compile, check the errors for troubleshooting.\nfirst\n\nsecond\n"
        );
    }

    #[test]
    fn empty_error_block_suggests_verbose_stats() {
        let block = plain(&format_error_block(&[]));
        assert_eq!(
            block,
            "Compile error: \nFor more details, please setting 'stats.errors: true' "
        );
    }

    #[test]
    fn error_block_hints_node_builtins() {
        let block = plain(&format_error_block(&["Can't resolve 'crypto'".to_string()]));
        assert!(block.contains("Tip: \"crypto\" is a built-in Node.js module"));
    }

    #[test]
    fn warning_block_never_hints() {
        let block = plain(&format_warning_block(&["Can't resolve 'fs'".to_string()]));
        let trimmed: Vec<&str> = block.lines().map(str::trim_end).collect();
        insta::assert_snapshot!(trimmed.join("\n"), @r"
        Compile Warning:
        Can't resolve 'fs'
        ");
    }

    #[test]
    fn plain_formatter_prefixes_module_and_strips_frames() {
        let entry = StatsError {
            message: "TypeError: x is undefined\n    at foo (a.js:1:2)\n    at bar (b.js:3:4)\n"
                .to_string(),
            module_name: Some("./src/a.js".to_string()),
            ..StatsError::default()
        };
        assert_eq!(
            PlainStatsFormatter.format(&entry, false),
            "File: ./src/a.js\nTypeError: x is undefined"
        );
    }

    #[test]
    fn plain_formatter_verbose_keeps_details_and_stack() {
        let entry = StatsError {
            message: "Build failed".to_string(),
            details: Some("loader exited with 1".to_string()),
            stack: Some("Error: Build failed\n    at run (loader.js:9:1)".to_string()),
            ..StatsError::default()
        };
        let text = PlainStatsFormatter.format(&entry, true);
        assert!(text.starts_with("Build failed\nloader exited with 1\n"));
        assert!(text.contains("at run (loader.js:9:1)"));
    }

    #[test]
    fn messages_keep_entry_order() {
        let errors = vec![StatsError::new("e1"), StatsError::new("e2")];
        let warnings = vec![StatsError::new("w1")];
        let formatted = format_stats_messages(&errors, &warnings, &PlainStatsFormatter, false);
        assert_eq!(formatted.errors, vec!["e1", "e2"]);
        assert_eq!(formatted.warnings, vec!["w1"]);
    }
}
