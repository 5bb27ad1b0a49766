//! The brace normalizer as a plugin descriptor.

use std::sync::Arc;

use kempt_braces::{normalize, print_wrapped_object_body};
use kempt_imports::SUPPORTED_PARSERS;
use kempt_syntax::Node;

use crate::compose::ESTREE_AST_FORMAT;
use crate::descriptor::{ParserCapabilities, PluginDescriptor, PrintFn, TransformFn};
use crate::error::PluginError;
use crate::options::FormatOptions;
use crate::schema::brace_options;

pub const BRACES_PLUGIN_ID: &str = "kempt-braces";

pub fn brace_plugin() -> PluginDescriptor {
    let transform: TransformFn =
        Arc::new(|tree: Node, options: &FormatOptions| -> Result<Node, PluginError> { Ok(normalize(tree, options.braces)) });
    let print: PrintFn = Arc::new(
        |node: &Node, _options: &FormatOptions, print_child: &mut dyn FnMut(&Node) -> String| {
            print_wrapped_object_body(node, print_child)
        },
    );

    let mut plugin = PluginDescriptor::new(BRACES_PLUGIN_ID)
        .with_printer(ESTREE_AST_FORMAT, print)
        .with_options(brace_options());
    for parser in SUPPORTED_PARSERS {
        plugin = plugin.with_parser(
            *parser,
            ParserCapabilities::new(ESTREE_AST_FORMAT).with_transform(Arc::clone(&transform)),
        );
    }
    plugin
}

#[cfg(test)]
mod tests {
    use kempt_braces::{BraceMode, BracePolicy};

    use super::*;

    #[test]
    fn test_transform_uses_policy_from_options() {
        let plugin = brace_plugin();
        let transform = plugin.parser("typescript").and_then(|caps| caps.transform_tree.clone()).unwrap();

        let tree = Node::program(vec![Node::if_stmt(
            Node::id("c"),
            Node::block(vec![Node::while_stmt(Node::id("x"), Node::call_stmt("f", vec![]))]),
            None,
        )]);
        let has_block = |node: &Node| node.find(&mut |n: &Node| n.is_block()).is_some();

        let mut options = FormatOptions::new("typescript");
        let unchanged = transform(tree.clone(), &options).unwrap();
        assert_eq!(unchanged, tree);

        options.braces = BracePolicy::new(BraceMode::Remove, BraceMode::Default);
        let removed = transform(tree, &options).unwrap();
        assert!(!has_block(&removed));
    }
}
