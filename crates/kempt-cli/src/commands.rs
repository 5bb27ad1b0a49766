//! Subcommand handlers. Each returns the process exit status.

use std::io::IsTerminal;
use std::path::Path;

use anyhow::{Context, Result};
use kempt_plugin::preset_plugin;

use crate::args::SortImportsArgs;
use crate::driver::{self, DriverOptions, Summary};
use crate::rc::load_settings;
use crate::reporter::Reporter;

pub const EXIT_SUCCESS: i32 = 0;
/// Check mode found files whose imports are not sorted.
pub const EXIT_UNSORTED: i32 = 1;
/// At least one file could not be processed.
pub const EXIT_FAILURE: i32 = 2;

/// Result of `sort-imports`, rendered but not yet printed.
#[derive(Debug)]
pub struct SortReport {
    pub lines: String,
    pub summary: String,
    pub exit_code: i32,
}

pub fn sort_imports(args: &SortImportsArgs, cwd: &Path) -> Result<SortReport> {
    let mut settings = load_settings(args.config.as_deref(), cwd)?;
    args.apply_to(&mut settings);

    let files = driver::collect_files(&args.paths)?;
    let options = DriverOptions {
        write: args.write,
        parser: args.parser.map(|parser| parser.as_str()),
        imports: driver::with_preset_defaults(settings.imports),
    };
    let outcomes = driver::run(&files, &driver::import_sort_plugin(), &options);
    let summary = Summary::from_outcomes(&outcomes);

    let color = args.pretty.unwrap_or_else(|| std::io::stderr().is_terminal());
    let reporter = Reporter::new(color);
    let exit_code = if summary.failed > 0 {
        EXIT_FAILURE
    } else if summary.changed > 0 && !args.write {
        EXIT_UNSORTED
    } else {
        EXIT_SUCCESS
    };

    Ok(SortReport {
        lines: reporter.render(&outcomes),
        summary: reporter.format_summary(&summary, args.write),
        exit_code,
    })
}

/// The preset plugin's option schema as pretty JSON, keyed by option name.
pub fn option_schema_json() -> Result<String> {
    let plugin = preset_plugin();
    serde_json::to_string_pretty(&plugin.option_schema()).context("failed to serialize option schema")
}
