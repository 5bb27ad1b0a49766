//! Formatter host for the command line: text in, text out.

use futures::FutureExt;
use futures::future::BoxFuture;
use kempt_plugin::{FormatOptions, FormatterHost, HostError};
use kempt_syntax::Node;

/// Host without base parsers. Plugins reach it only through `format`, which
/// runs each plugin's preprocess for the file's parser in turn.
#[derive(Clone, Copy, Debug, Default)]
pub struct TextHost;

impl FormatterHost for TextHost {
    fn parse(&self, parser: &str, _text: &str, _options: &FormatOptions) -> Result<Node, HostError> {
        Err(HostError::Parse(format!("no syntax tree for '{parser}' on the command line")))
    }

    fn print(&self, _tree: &Node, _options: &FormatOptions) -> Result<String, HostError> {
        Err(HostError::Print("no printer on the command line".into()))
    }

    fn format<'a>(&'a self, text: String, options: FormatOptions) -> BoxFuture<'a, Result<String, HostError>> {
        async move {
            let mut text = text;
            for plugin in &options.plugins {
                let Some(preprocess) = plugin.parser(&options.parser).and_then(|caps| caps.preprocess.clone()) else {
                    continue;
                };
                text = preprocess(self, &text, &options)
                    .await
                    .map_err(|err| HostError::Format(err.to_string()))?;
            }
            Ok(text)
        }
        .boxed()
    }
}
