//! The import preprocess: parse, prune, sort, merge, group, print and
//! splice back.

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use kempt_common::{Span, panic_message};
use tracing::debug;

use crate::analyzer::remove_unused;
use crate::config::{ImportOptions, ImportSortConfig, ResolvedConfig};
use crate::error::ImportError;
use crate::format::{format_groups, format_import_statements};
use crate::merge::merge_imports;
use crate::node_protocol::apply_node_protocol;
use crate::parser::parse_imports;
use crate::sort::{arrange_groups, sort_imports};

/// Host parsers whose input is JavaScript or TypeScript source.
pub const SUPPORTED_PARSERS: &[&str] = &["babel", "typescript", "babel-ts"];

pub fn is_supported_parser(parser: Option<&str>) -> bool {
    parser.is_some_and(|parser| SUPPORTED_PARSERS.contains(&parser))
}

/// Text preprocess entry point. Never fails: unsupported parsers, files
/// without imports and any internal failure all yield `text` unchanged.
pub fn preprocess_imports(
    text: &str,
    parser: Option<&str>,
    filepath: Option<&Path>,
    options: &ImportOptions,
    config: &ImportSortConfig,
) -> String {
    if !is_supported_parser(parser) {
        return text.to_string();
    }
    let resolved = ResolvedConfig::resolve(config, options, filepath);
    match rewrite_imports(text, &resolved) {
        Ok(rewritten) => rewritten,
        Err(err) => {
            debug!(error = %err, file = ?filepath, "import rewrite skipped");
            text.to_string()
        }
    }
}

/// Rewrite the import block of `text`. Panics in user callbacks are caught
/// and reported as [`ImportError::CallbackPanicked`].
pub fn rewrite_imports(text: &str, config: &ResolvedConfig) -> Result<String, ImportError> {
    match panic::catch_unwind(AssertUnwindSafe(|| rewrite_inner(text, config))) {
        Ok(result) => result,
        Err(payload) => Err(ImportError::CallbackPanicked {
            message: panic_message(&*payload),
        }),
    }
}

fn rewrite_inner(text: &str, config: &ResolvedConfig) -> Result<String, ImportError> {
    let records = parse_imports(text, config.filepath.as_deref());
    if records.is_empty() {
        return Ok(text.to_string());
    }

    let ranges = coalesce_ranges(records.iter().map(|record| record.range));
    let remainder = excise(text, &ranges)?;
    let start = ranges.first().map_or(0, |range| range.start as usize);

    let mut records = records;
    if config.remove_unused_imports {
        records = remove_unused(records, &remainder);
    }
    if config.node_protocol.is_some() {
        for record in &mut records {
            record.module_path = apply_node_protocol(&record.module_path, config.node_protocol).into_owned();
        }
    }

    let sorted = sort_imports(records, config);
    let merged = merge_imports(sorted);
    if !merged.conflicts.is_empty() {
        debug!(count = merged.conflicts.len(), "merge conflicts resolved by keeping the first binding");
    }

    let block = if config.callbacks.get_group.is_some() {
        let groups = arrange_groups(merged.records, config);
        format_groups(&groups, config)
    } else {
        format_import_statements(&merged.records, config)
    };

    let (before, after) = remainder.split_at(start.min(remainder.len()));
    let after = strip_leading_blank_lines(after);

    let mut out = String::with_capacity(text.len());
    out.push_str(before);
    out.push_str(&block);
    if after.is_empty() {
        if !block.is_empty() {
            out.push('\n');
        }
    } else if block.is_empty() {
        out.push_str(after);
    } else {
        out.push_str("\n\n");
        out.push_str(after);
    }
    Ok(out)
}

/// Sorted ranges with overlapping or adjacent ones joined.
fn coalesce_ranges(ranges: impl Iterator<Item = Span>) -> Vec<Span> {
    let mut ranges: Vec<Span> = ranges.filter(|range| !range.is_empty()).collect();
    ranges.sort();
    let mut merged: Vec<Span> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if last.touches(&range) => *last = last.cover(&range),
            _ => merged.push(range),
        }
    }
    merged
}

/// `text` with every range cut out.
fn excise(text: &str, ranges: &[Span]) -> Result<String, ImportError> {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for range in ranges {
        let (start, end) = (range.start as usize, range.end as usize);
        if range.slice(text).is_none() || start < cursor {
            return Err(ImportError::InvalidRange {
                start,
                end,
                len: text.len(),
            });
        }
        out.push_str(&text[cursor..start]);
        cursor = end;
    }
    out.push_str(&text[cursor..]);
    Ok(out)
}

/// Drop whitespace-only lines at the start of `after`. Indentation of the
/// first remaining line is kept; trailing text on the import's own line
/// loses its leading spaces.
fn strip_leading_blank_lines(after: &str) -> &str {
    let trimmed = after.trim_start();
    if trimmed.is_empty() {
        return trimmed;
    }
    let blank = &after[..after.len() - trimmed.len()];
    match blank.rfind('\n') {
        Some(newline) => &after[newline + 1..],
        None => trimmed,
    }
}
