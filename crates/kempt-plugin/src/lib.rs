//! Composition layer between the kempt rewriters and a formatter host.
//!
//! A host loads one [`PluginDescriptor`] per plugin. [`create_plugin`]
//! builds the import sort descriptor and folds other descriptors into it:
//! their tree transforms are chained after the host's parse, their
//! preprocess steps are reached through the host's `format`, and their
//! printers and option declarations are merged in. [`preset`] wires the
//! default classifier and the brace normalizer together.

pub mod braces;
pub mod compose;
pub mod context;
pub mod descriptor;
pub mod error;
pub mod host;
pub mod languages;
pub mod options;
pub mod pipeline;
pub mod preset;
pub mod schema;

pub use braces::{BRACES_PLUGIN_ID, brace_plugin};
pub use compose::{ESTREE_AST_FORMAT, IMPORT_SORT_PLUGIN_ID, chain_transforms, combined_preprocess, create_plugin};
pub use context::{PluginContext, PluginId};
pub use descriptor::{
    LanguageDecl, ParserCapabilities, PluginDescriptor, PreprocessFn, PrintFn, TransformFn, preprocess_fn,
    sync_preprocess,
};
pub use error::{HostError, PluginError};
pub use host::FormatterHost;
pub use languages::{default_languages, parser_for_path};
pub use options::{FormatOptions, FormatSettings};
pub use pipeline::{run_pipeline, run_preprocess};
pub use preset::{preset_config, preset_plugin};
pub use schema::{OptionDecl, OptionType, brace_options, import_sort_options};
