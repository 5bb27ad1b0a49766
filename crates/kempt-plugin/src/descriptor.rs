//! Plugin descriptors: one explicit record of what a plugin contributes.

use std::fmt;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use indexmap::IndexMap;
use kempt_syntax::Node;
use serde::Serialize;

use crate::context::PluginId;
use crate::error::PluginError;
use crate::host::FormatterHost;
use crate::options::FormatOptions;
use crate::schema::OptionDecl;

/// Text rewrite run before parsing. Receives the host so it can bridge to
/// the host's `format`.
pub type PreprocessFn = Arc<
    dyn for<'a> Fn(&'a dyn FormatterHost, &'a str, &'a FormatOptions) -> BoxFuture<'a, Result<String, PluginError>>
        + Send
        + Sync,
>;

/// Tree rewrite run after the host's base parse.
pub type TransformFn = Arc<dyn Fn(Node, &FormatOptions) -> Result<Node, PluginError> + Send + Sync>;

/// Printer override: `Some(text)` for nodes it handles, `None` to let the
/// host print. The callback prints a child with the host printer.
pub type PrintFn =
    Arc<dyn Fn(&Node, &FormatOptions, &mut dyn FnMut(&Node) -> String) -> Option<String> + Send + Sync>;

/// Build a [`PreprocessFn`] from an async closure.
pub fn preprocess_fn<F>(f: F) -> PreprocessFn
where
    F: for<'a> Fn(&'a dyn FormatterHost, &'a str, &'a FormatOptions) -> BoxFuture<'a, Result<String, PluginError>>
        + Send
        + Sync
        + 'static,
{
    Arc::new(f)
}

/// Wrap a synchronous text rewrite as a [`PreprocessFn`].
pub fn sync_preprocess(
    f: impl Fn(&str, &FormatOptions) -> Result<String, PluginError> + Send + Sync + 'static,
) -> PreprocessFn {
    preprocess_fn(move |_host, text, options| futures::future::ready(f(text, options)).boxed())
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageDecl {
    pub name: String,
    pub parsers: Vec<String>,
    pub extensions: Vec<String>,
}

impl LanguageDecl {
    pub fn new(name: &str, parsers: &[&str], extensions: &[&str]) -> Self {
        LanguageDecl {
            name: name.to_string(),
            parsers: parsers.iter().map(|p| p.to_string()).collect(),
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
        }
    }
}

/// What a plugin adds to one host parser.
#[derive(Clone)]
pub struct ParserCapabilities {
    /// Printer the parsed tree is meant for.
    pub ast_format: String,
    pub preprocess: Option<PreprocessFn>,
    pub transform_tree: Option<TransformFn>,
}

impl ParserCapabilities {
    pub fn new(ast_format: impl Into<String>) -> Self {
        ParserCapabilities {
            ast_format: ast_format.into(),
            preprocess: None,
            transform_tree: None,
        }
    }

    pub fn with_preprocess(mut self, preprocess: PreprocessFn) -> Self {
        self.preprocess = Some(preprocess);
        self
    }

    pub fn with_transform(mut self, transform: TransformFn) -> Self {
        self.transform_tree = Some(transform);
        self
    }
}

impl fmt::Debug for ParserCapabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserCapabilities")
            .field("ast_format", &self.ast_format)
            .field("preprocess", &self.preprocess.is_some())
            .field("transform_tree", &self.transform_tree.is_some())
            .finish()
    }
}

#[derive(Clone)]
pub struct PluginDescriptor {
    pub id: PluginId,
    pub languages: Vec<LanguageDecl>,
    /// Keyed by host parser name.
    pub parsers: IndexMap<String, ParserCapabilities>,
    /// Keyed by AST format.
    pub printers: IndexMap<String, PrintFn>,
    pub options: Vec<OptionDecl>,
}

impl PluginDescriptor {
    pub fn new(id: impl Into<PluginId>) -> Self {
        PluginDescriptor {
            id: id.into(),
            languages: Vec::new(),
            parsers: IndexMap::new(),
            printers: IndexMap::new(),
            options: Vec::new(),
        }
    }

    pub fn with_parser(mut self, name: impl Into<String>, capabilities: ParserCapabilities) -> Self {
        self.parsers.insert(name.into(), capabilities);
        self
    }

    pub fn with_printer(mut self, ast_format: impl Into<String>, print: PrintFn) -> Self {
        self.printers.insert(ast_format.into(), print);
        self
    }

    pub fn with_options(mut self, options: Vec<OptionDecl>) -> Self {
        self.options.extend(options);
        self
    }

    pub fn with_languages(mut self, languages: Vec<LanguageDecl>) -> Self {
        self.languages.extend(languages);
        self
    }

    pub fn parser(&self, name: &str) -> Option<&ParserCapabilities> {
        self.parsers.get(name)
    }

    pub fn has_preprocess(&self, parser: &str) -> bool {
        self.parser(parser).is_some_and(|caps| caps.preprocess.is_some())
    }

    /// Run the printer override registered for `ast_format`, if any.
    pub fn print_override(
        &self,
        ast_format: &str,
        node: &Node,
        options: &FormatOptions,
        print_child: &mut dyn FnMut(&Node) -> String,
    ) -> Option<String> {
        let print = self.printers.get(ast_format)?;
        print(node, options, print_child)
    }

    /// Option declarations keyed by name, later declarations winning.
    pub fn option_schema(&self) -> IndexMap<&str, &OptionDecl> {
        self.options.iter().map(|decl| (decl.name.as_str(), decl)).collect()
    }
}

impl fmt::Debug for PluginDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginDescriptor")
            .field("id", &self.id)
            .field("languages", &self.languages)
            .field("parsers", &self.parsers)
            .field("printers", &self.printers.keys().collect::<Vec<_>>())
            .field("options", &self.options.len())
            .finish()
    }
}
