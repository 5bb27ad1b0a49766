//! Collects source files and runs the composed import sort plugin over them
//! in parallel.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use kempt_imports::{DefaultClassifier, ImportOptions, ImportSortConfig};
use kempt_plugin::preset::compare_groups;
use kempt_plugin::{FormatOptions, PluginDescriptor, create_plugin, parser_for_path, run_preprocess};
use rayon::prelude::*;
use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

use crate::host::TextHost;

/// Directories never descended into when walking.
const IGNORED_DIRS: &[&str] = &["node_modules", "target", "dist", "build"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FileStatus {
    Unchanged,
    /// The import block differs; `written` is true when the file was updated.
    Changed { written: bool },
    Failed(String),
}

#[derive(Clone, Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub status: FileStatus,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub unchanged: usize,
    pub changed: usize,
    pub failed: usize,
}

impl Summary {
    pub fn from_outcomes(outcomes: &[FileOutcome]) -> Self {
        let mut summary = Summary::default();
        for outcome in outcomes {
            match outcome.status {
                FileStatus::Unchanged => summary.unchanged += 1,
                FileStatus::Changed { .. } => summary.changed += 1,
                FileStatus::Failed(_) => summary.failed += 1,
            }
        }
        summary
    }
}

/// What the driver does with one batch of files.
#[derive(Clone, Debug)]
pub struct DriverOptions {
    pub write: bool,
    /// Parser for every file; `None` infers it from the extension.
    pub parser: Option<&'static str>,
    pub imports: ImportOptions,
}

/// Programmatic config used by the binary: the default classifier and group
/// order. Scalar options stay unset so rc files and flags can set them.
pub fn import_sort_config() -> ImportSortConfig {
    ImportSortConfig::new()
        .get_group(|record, filepath| DefaultClassifier::global().group_key(record, filepath))
        .sort_group(compare_groups)
}

/// The import sort plugin as the binary loads it. The brace normalizer is
/// left out: it needs a syntax tree.
pub fn import_sort_plugin() -> PluginDescriptor {
    create_plugin(import_sort_config(), Vec::new())
}

/// Fill options the user left unset with the preset's values.
pub fn with_preset_defaults(mut imports: ImportOptions) -> ImportOptions {
    imports.group_separator.get_or_insert_with(String::new);
    imports.sort_side_effect.get_or_insert(true);
    imports
}

fn is_ignored_dir(entry: &DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || IGNORED_DIRS.contains(&name.as_ref())
}

/// Expand `paths` into source files. Explicit files are kept as given;
/// directories contribute files with a known extension. The result is sorted
/// and deduplicated.
pub fn collect_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        let metadata = std::fs::metadata(path).with_context(|| format!("cannot access {}", path.display()))?;
        if metadata.is_file() {
            files.push(path.clone());
            continue;
        }
        for entry in WalkDir::new(path).into_iter().filter_entry(|e| !is_ignored_dir(e)) {
            let entry = entry.with_context(|| format!("failed to walk {}", path.display()))?;
            if entry.file_type().is_file() && parser_for_path(entry.path()).is_some() {
                files.push(entry.into_path());
            }
        }
    }
    files.sort();
    files.dedup();
    debug!(count = files.len(), "collected source files");
    Ok(files)
}

/// Run `plugin` over one file, writing the result back when asked.
pub fn process_file(path: &Path, plugin: &PluginDescriptor, options: &DriverOptions) -> Result<FileStatus> {
    let Some(parser) = options.parser.or_else(|| parser_for_path(path)) else {
        anyhow::bail!("no parser for {}", path.display());
    };
    trace!(path = %path.display(), parser, "processing file");

    let source = std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let mut format_options = FormatOptions::new(parser).with_filepath(path);
    format_options.imports = options.imports.clone();
    let rewritten = futures::executor::block_on(run_preprocess(&TextHost, plugin, &source, &format_options))
        .with_context(|| format!("failed to sort imports in {}", path.display()))?;
    if rewritten == source {
        return Ok(FileStatus::Unchanged);
    }

    if options.write {
        std::fs::write(path, rewritten).with_context(|| format!("failed to write {}", path.display()))?;
    }
    Ok(FileStatus::Changed { written: options.write })
}

/// Process `files` in parallel. Per-file failures are reported in the
/// outcome, never abort the batch. Outcomes keep the order of `files`.
pub fn run(files: &[PathBuf], plugin: &PluginDescriptor, options: &DriverOptions) -> Vec<FileOutcome> {
    files
        .par_iter()
        .map(|path| {
            let status = process_file(path, plugin, options).unwrap_or_else(|err| FileStatus::Failed(format!("{err:#}")));
            FileOutcome {
                path: path.clone(),
                status,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use kempt_plugin::{ESTREE_AST_FORMAT, ParserCapabilities, sync_preprocess};

    use super::*;

    const UNSORTED: &str = "import { b } from \"./b\"\nimport React from \"react\"\n\nrun(b, React)\n";
    const SORTED: &str = "import React from \"react\";\n\nimport { b } from \"./b\";\n\nrun(b, React)\n";

    fn options(write: bool) -> DriverOptions {
        DriverOptions {
            write,
            parser: None,
            imports: with_preset_defaults(ImportOptions::default()),
        }
    }

    #[test]
    fn test_process_file_runs_the_plugin_preprocess() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.ts");
        std::fs::write(&path, UNSORTED).unwrap();

        let status = process_file(&path, &import_sort_plugin(), &options(true)).unwrap();
        assert_eq!(status, FileStatus::Changed { written: true });
        assert_eq!(std::fs::read_to_string(&path).unwrap(), SORTED);
        assert_eq!(process_file(&path, &import_sort_plugin(), &options(true)).unwrap(), FileStatus::Unchanged);
    }

    #[test]
    fn test_process_file_bridges_to_composed_plugins() {
        let banner = PluginDescriptor::new("banner").with_parser(
            "typescript",
            ParserCapabilities::new(ESTREE_AST_FORMAT)
                .with_preprocess(sync_preprocess(|text, _| Ok(format!("// banner\n{text}")))),
        );
        let plugin = create_plugin(import_sort_config(), vec![Arc::new(banner)]);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.ts");
        std::fs::write(&path, UNSORTED).unwrap();
        process_file(&path, &plugin, &options(true)).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), format!("// banner\n{SORTED}"));
    }

    #[test]
    fn test_preset_defaults_fill_only_unset_options() {
        let imports = with_preset_defaults(ImportOptions {
            sort_side_effect: Some(false),
            ..ImportOptions::default()
        });
        assert_eq!(imports.group_separator.as_deref(), Some(""));
        assert_eq!(imports.sort_side_effect, Some(false));
        assert_eq!(imports.node_protocol, None);
    }

    #[test]
    fn test_collect_skips_ignored_directories() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        for file in ["src/a.ts", "src/b.jsx", "src/notes.md", "node_modules/x/index.js", ".cache/c.ts"] {
            let path = root.join(file);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, "").unwrap();
        }

        let files = collect_files(&[root.to_path_buf(), root.join("src/a.ts")]).unwrap();
        assert_eq!(files, [root.join("src/a.ts"), root.join("src/b.jsx")]);
    }

    #[test]
    fn test_missing_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(collect_files(&[dir.path().join("missing")]).is_err());
    }

    #[test]
    fn test_summary_counts() {
        let outcome = |status| FileOutcome {
            path: PathBuf::from("a.ts"),
            status,
        };
        let summary = Summary::from_outcomes(&[
            outcome(FileStatus::Unchanged),
            outcome(FileStatus::Changed { written: false }),
            outcome(FileStatus::Failed("boom".into())),
            outcome(FileStatus::Unchanged),
        ]);
        assert_eq!(
            summary,
            Summary {
                unchanged: 2,
                changed: 1,
                failed: 1
            }
        );
    }
}
