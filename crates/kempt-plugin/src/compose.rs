//! The import sort plugin and the composition of other plugins into it.
//!
//! A host loads a single composed descriptor. For each supported parser it
//! carries:
//! - a preprocess that rewrites imports, then hands the text to the host's
//!   `format` restricted to the other plugins that have a preprocess of
//!   their own
//! - a tree transform chaining every other plugin's transform in
//!   registration order
//!
//! plus the other plugins' printers and option declarations.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use futures::FutureExt;
use indexmap::IndexMap;
use kempt_common::panic_message;
use kempt_imports::{ImportSortConfig, SUPPORTED_PARSERS, preprocess_imports};
use kempt_syntax::Node;
use tracing::{debug, warn};

use crate::context::{PluginContext, PluginId};
use crate::descriptor::{ParserCapabilities, PluginDescriptor, PreprocessFn, TransformFn, preprocess_fn};
use crate::error::PluginError;
use crate::languages::default_languages;
use crate::options::FormatOptions;
use crate::schema::import_sort_options;

pub const IMPORT_SORT_PLUGIN_ID: &str = "kempt-import-sort";

/// AST format of the host's JavaScript/TypeScript parsers.
pub const ESTREE_AST_FORMAT: &str = "estree";

/// Plugins composed into the import sort plugin.
#[derive(Clone, Debug, Default)]
pub struct PluginSet {
    pub others: Vec<Arc<PluginDescriptor>>,
}

impl PluginSet {
    pub fn new(others: Vec<Arc<PluginDescriptor>>) -> Self {
        PluginSet { others }
    }

    /// Other plugins with a preprocess for `parser`, never `own`.
    fn with_preprocess(&self, parser: &str, own: &PluginId) -> Vec<Arc<PluginDescriptor>> {
        self.others
            .iter()
            .filter(|plugin| plugin.id != *own && plugin.has_preprocess(parser))
            .cloned()
            .collect()
    }

    /// Tree transforms for `parser`, in registration order.
    fn transforms(&self, parser: &str, own: &PluginId) -> Vec<(PluginId, TransformFn)> {
        self.others
            .iter()
            .filter(|plugin| plugin.id != *own)
            .filter_map(|plugin| {
                let transform = plugin.parser(parser)?.transform_tree.clone()?;
                Some((plugin.id.clone(), transform))
            })
            .collect()
    }
}

/// Build the import sort plugin with `config`, composed with `others`.
pub fn create_plugin(config: ImportSortConfig, others: Vec<Arc<PluginDescriptor>>) -> PluginDescriptor {
    let id = PluginId::new(IMPORT_SORT_PLUGIN_ID);
    let set = PluginSet::new(others);
    let config = Arc::new(config);

    let mut options: IndexMap<String, _> = import_sort_options()
        .into_iter()
        .map(|decl| (decl.name.clone(), decl))
        .collect();
    let mut printers = IndexMap::new();
    for plugin in &set.others {
        for decl in &plugin.options {
            options.insert(decl.name.clone(), decl.clone());
        }
        for (ast_format, print) in &plugin.printers {
            printers.insert(ast_format.clone(), print.clone());
        }
    }

    let mut descriptor = PluginDescriptor::new(id.clone())
        .with_languages(default_languages())
        .with_options(options.into_values().collect());
    descriptor.printers = printers;

    for parser in SUPPORTED_PARSERS {
        let mut capabilities = ParserCapabilities::new(ESTREE_AST_FORMAT);
        for plugin in &set.others {
            if let Some(other) = plugin.parser(parser) {
                capabilities.ast_format = other.ast_format.clone();
            }
        }

        let transforms = set.transforms(parser, &id);
        if !transforms.is_empty() {
            capabilities.transform_tree = Some(chain_transforms(transforms));
        }

        let delegates = set.with_preprocess(parser, &id);
        capabilities.preprocess = Some(combined_preprocess(id.clone(), Arc::clone(&config), delegates));
        descriptor.parsers.insert(parser.to_string(), capabilities);
    }

    descriptor
}

/// Import rewrite followed by the delegation bridge.
///
/// A call whose context is already bridging returns its input: the host is
/// running the delegates' preprocess steps and this plugin must not run
/// inside that. A failed or panicking bridge is logged and its output
/// discarded.
pub fn combined_preprocess(
    id: PluginId,
    config: Arc<ImportSortConfig>,
    delegates: Vec<Arc<PluginDescriptor>>,
) -> PreprocessFn {
    preprocess_fn(move |host, text, options| {
        let id = id.clone();
        let config = Arc::clone(&config);
        let delegates = delegates.clone();
        async move {
            if options.context.bridging {
                debug!(plugin = %id, "skipping preprocess inside delegation bridge");
                return Ok(text.to_string());
            }

            let processed = preprocess_imports(
                text,
                Some(options.parser.as_str()),
                options.filepath.as_deref(),
                &options.imports,
                &config,
            );
            if delegates.is_empty() {
                return Ok(processed);
            }

            let bridged = options
                .clone()
                .with_plugins(delegates)
                .with_context(PluginContext::bridged_by(id.clone()));
            match AssertUnwindSafe(host.format(processed.clone(), bridged)).catch_unwind().await {
                Ok(Ok(formatted)) => Ok(formatted),
                Ok(Err(err)) => {
                    warn!(plugin = %id, error = %err, "failed to apply other plugins' preprocess");
                    Ok(processed)
                }
                Err(payload) => {
                    warn!(plugin = %id, error = %panic_message(&*payload), "other plugins' preprocess panicked");
                    Ok(processed)
                }
            }
        }
        .boxed()
    })
}

/// Run `transforms` in order, each with its own plugin as the active one.
/// A step that fails or panics is logged and skipped; the next step gets the
/// tree from before it.
pub fn chain_transforms(transforms: Vec<(PluginId, TransformFn)>) -> TransformFn {
    Arc::new(move |tree: Node, options: &FormatOptions| -> Result<Node, PluginError> {
        let mut tree = tree;
        for (plugin, transform) in &transforms {
            let input = tree.clone();
            let scoped = options
                .clone()
                .with_context(PluginContext::for_plugin(plugin.clone()));
            match panic::catch_unwind(AssertUnwindSafe(|| transform(input, &scoped))) {
                Ok(Ok(next)) => tree = next,
                Ok(Err(err)) => warn!(plugin = %plugin, error = %err, "plugin tree transform failed"),
                Err(payload) => {
                    let err = PluginError::transform(plugin.as_str(), panic_message(&*payload));
                    warn!(plugin = %plugin, error = %err, "plugin tree transform panicked");
                }
            }
        }
        Ok(tree)
    })
}
