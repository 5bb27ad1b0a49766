//! Tests for the syntax tree model: metadata handling, traversal and folding.

use kempt_common::Span;
use kempt_syntax::{DeclarationKind, Fold, Node, NodeKind, walk_node};

#[test]
fn test_anchored_at_keeps_first_origin() {
    let inner = Node::call_stmt("run", vec![])
        .with_span(Span::new(20, 26))
        .with_lines(2, 2);
    let block = Node::block(vec![]).with_span(Span::new(10, 30)).with_lines(1, 3);
    let outer = Node::block(vec![]).with_span(Span::new(0, 40)).with_lines(1, 5);

    let moved = inner.anchored_at(&block).anchored_at(&outer);

    assert_eq!(moved.span, Span::new(0, 40));
    assert_eq!(moved.loc, outer.loc);
    let origin = moved.origin.expect("origin recorded");
    assert_eq!(origin.span, Span::new(20, 26));
    assert!(!moved.is_multiline(), "multi-line check uses the node's own lines");
}

#[test]
fn test_lexical_declarations() {
    assert!(Node::var_decl(DeclarationKind::Const, "a", None).is_lexical_declaration());
    assert!(Node::var_decl(DeclarationKind::Let, "a", None).is_lexical_declaration());
    assert!(!Node::var_decl(DeclarationKind::Var, "a", None).is_lexical_declaration());
    assert!(Node::function_decl("f", vec![], vec![]).is_lexical_declaration());
    assert!(Node::class_decl("C", vec![]).is_lexical_declaration());
    assert!(!Node::call_stmt("f", vec![]).is_lexical_declaration());
}

#[test]
fn test_children_follow_source_order() {
    let node = Node::if_stmt(
        Node::id("c"),
        Node::call_stmt("a", vec![]),
        Some(Node::call_stmt("b", vec![])),
    );
    let kinds: Vec<&str> = node.children().iter().map(|c| c.kind_name()).collect();
    assert_eq!(kinds, ["Identifier", "ExpressionStatement", "ExpressionStatement"]);
    assert_eq!(node.subtree_size(), 8);
}

struct RenameIdentifiers;

impl Fold for RenameIdentifiers {
    fn fold_node(&mut self, node: Node) -> Node {
        let node = walk_node(self, node);
        match node.kind {
            NodeKind::Identifier { name } => Node {
                kind: NodeKind::Identifier {
                    name: name.to_uppercase(),
                },
                ..node
            },
            _ => node,
        }
    }
}

#[test]
fn test_fold_reaches_nested_fields() {
    let tree = Node::program(vec![Node::while_stmt(
        Node::id("go"),
        Node::block(vec![Node::call_stmt("step", vec![Node::id("x")])]),
    )]);

    let folded = RenameIdentifiers.fold_node(tree);

    let mut names = Vec::new();
    folded.find(&mut |n: &Node| {
        if let NodeKind::Identifier { name } = &n.kind {
            names.push(name.clone());
        }
        false
    });
    assert_eq!(names, ["GO", "STEP", "X"]);
}

#[test]
fn test_deserialize_estree_json() {
    let json = r#"{
        "type": "IfStatement",
        "test": { "type": "Identifier", "name": "ok" },
        "consequent": {
            "type": "BlockStatement",
            "body": [{
                "type": "ExpressionStatement",
                "expression": { "type": "Identifier", "name": "done" }
            }],
            "span": { "start": 8, "end": 16 },
            "loc": { "start": { "line": 1, "column": 8 }, "end": { "line": 1, "column": 16 } }
        }
    }"#;

    let node: Node = serde_json::from_str(json).unwrap();
    let NodeKind::If {
        consequent,
        alternate,
        ..
    } = &node.kind
    else {
        panic!("expected an if statement, got {}", node.kind_name());
    };
    assert!(alternate.is_none());
    assert_eq!(consequent.span, Span::new(8, 16));
    assert!(consequent.sole_statement().is_some());
}
