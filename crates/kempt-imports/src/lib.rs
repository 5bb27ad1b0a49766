//! Import statement rewriting for JavaScript and TypeScript sources.
//!
//! The entry point is [`preprocess_imports`], a text-to-text step a
//! formatter host runs before parsing. It:
//! - finds the top-level import/export statements ([`parse_imports`])
//! - optionally drops unused bindings ([`remove_unused`])
//! - adds or strips the `node:` prefix on built-ins ([`apply_node_protocol`])
//! - sorts, merges and groups the statements ([`sort_imports`],
//!   [`merge_imports`], [`group_imports`], [`sort_groups`])
//! - prints them ([`format_groups`]) and splices the block back in
//!
//! The rest of the file is never reformatted here.

pub mod analyzer;
pub mod classify;
pub mod config;
pub mod error;
pub mod format;
pub mod lexer;
pub mod merge;
pub mod node_protocol;
pub mod parser;
pub mod pipeline;
pub mod record;
pub mod sort;
pub mod tsconfig;

pub use analyzer::{remove_unused, used_identifiers};
pub use classify::{DefaultClassifier, GroupKey, ModuleType, compare_group_keys};
pub use config::{
    GetGroupFn, GroupSeparator, GroupSeparatorFn, ImportOptions, ImportSortConfig, ResolvedConfig, SortGroupFn,
    SortImportContentFn, SortImportStatementFn,
};
pub use error::ImportError;
pub use format::{compare_bindings, format_groups, format_import_statements, format_record};
pub use merge::{ConflictKind, MergeConflict, MergeOutcome, merge_imports};
pub use node_protocol::{NODE_PROTOCOL, apply_node_protocol, is_node_builtin};
pub use parser::parse_imports;
pub use pipeline::{SUPPORTED_PARSERS, is_supported_parser, preprocess_imports, rewrite_imports};
pub use record::{Binding, ImportKind, ImportRecord};
pub use sort::{Group, arrange_groups, group_imports, sort_groups, sort_imports};
pub use tsconfig::{AliasResolver, PathMapping, TsConfigPaths, load_tsconfig_paths};
