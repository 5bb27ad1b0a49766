//! The formatter host seen from the plugins.

use futures::future::BoxFuture;
use kempt_syntax::Node;

use crate::error::HostError;
use crate::options::FormatOptions;

/// The formatter that loads plugins: owns the base parsers and printers and
/// the full `format` entry point.
pub trait FormatterHost: Send + Sync {
    /// Base parse of `text` with the named parser, before any plugin tree
    /// transform.
    fn parse(&self, parser: &str, text: &str, options: &FormatOptions) -> Result<Node, HostError>;

    /// Print a tree, consulting plugin printer overrides.
    fn print(&self, tree: &Node, options: &FormatOptions) -> Result<String, HostError>;

    /// Full formatting of `text` with `options.plugins`, preprocess steps
    /// included. This is the delegation bridge target.
    fn format<'a>(&'a self, text: String, options: FormatOptions) -> BoxFuture<'a, Result<String, HostError>>;
}
