//! Per-file control flow for hosts that let the plugin drive it.

use tracing::debug;

use crate::context::PluginContext;
use crate::descriptor::{ParserCapabilities, PluginDescriptor};
use crate::error::PluginError;
use crate::host::FormatterHost;
use crate::options::FormatOptions;

fn capabilities<'d>(descriptor: &'d PluginDescriptor, options: &FormatOptions) -> Result<&'d ParserCapabilities, PluginError> {
    descriptor
        .parser(&options.parser)
        .ok_or_else(|| PluginError::UnknownParser(options.parser.clone()))
}

/// `options` with `descriptor` as the active plugin. Calls made from inside
/// the bridge keep the bridging context.
fn scoped(descriptor: &PluginDescriptor, options: &FormatOptions) -> FormatOptions {
    if options.context.bridging {
        options.clone()
    } else {
        options
            .clone()
            .with_context(PluginContext::for_plugin(descriptor.id.clone()))
    }
}

async fn preprocess(
    host: &dyn FormatterHost,
    capabilities: &ParserCapabilities,
    text: &str,
    options: &FormatOptions,
) -> Result<String, PluginError> {
    match &capabilities.preprocess {
        Some(preprocess) => preprocess(host, text, options).await,
        None => Ok(text.to_string()),
    }
}

/// Preprocess, parse, transform and print one file with `descriptor`'s
/// capabilities for `options.parser`.
///
/// Only host parse and print failures are returned: the descriptor's own
/// steps already degrade to passing their input through.
pub async fn run_pipeline(
    host: &dyn FormatterHost,
    descriptor: &PluginDescriptor,
    text: &str,
    options: &FormatOptions,
) -> Result<String, PluginError> {
    let capabilities = capabilities(descriptor, options)?;
    let options = &scoped(descriptor, options);

    let text = preprocess(host, capabilities, text, options).await?;
    let tree = host.parse(&options.parser, &text, options)?;
    let tree = match &capabilities.transform_tree {
        Some(transform) => transform(tree, options)?,
        None => tree,
    };

    debug!(plugin = %descriptor.id, parser = %options.parser, "printing transformed tree");
    Ok(host.print(&tree, options)?)
}

/// The text-level half of [`run_pipeline`] for hosts without a syntax tree:
/// only the preprocess step runs.
pub async fn run_preprocess(
    host: &dyn FormatterHost,
    descriptor: &PluginDescriptor,
    text: &str,
    options: &FormatOptions,
) -> Result<String, PluginError> {
    let capabilities = capabilities(descriptor, options)?;
    let options = &scoped(descriptor, options);
    debug!(plugin = %descriptor.id, parser = %options.parser, "running text-level preprocess");
    preprocess(host, capabilities, text, options).await
}
