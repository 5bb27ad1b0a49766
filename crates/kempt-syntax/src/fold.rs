//! Functional tree rewriting.
//!
//! A [`Fold`] consumes a node and returns its replacement. [`walk_node`]
//! rebuilds a node by folding each of its typed child fields in source
//! order, so an implementation that overrides `fold_node` and calls
//! `walk_node` first sees every child already rewritten (post-order).

use crate::node::{Class, Function, Node, NodeKind};

pub trait Fold {
    fn fold_node(&mut self, node: Node) -> Node {
        walk_node(self, node)
    }
}

/// Fold every child field of `node`, keeping its metadata.
pub fn walk_node<F: Fold + ?Sized>(f: &mut F, node: Node) -> Node {
    let Node {
        kind,
        span,
        loc,
        comments,
        origin,
    } = node;

    let kind = match kind {
        NodeKind::Program { body } => NodeKind::Program {
            body: fold_vec(f, body),
        },
        NodeKind::Block { body } => NodeKind::Block {
            body: fold_vec(f, body),
        },
        NodeKind::Expression { expression } => NodeKind::Expression {
            expression: fold_box(f, expression),
        },
        NodeKind::If {
            test,
            consequent,
            alternate,
        } => NodeKind::If {
            test: fold_box(f, test),
            consequent: fold_box(f, consequent),
            alternate: fold_opt(f, alternate),
        },
        NodeKind::For {
            init,
            test,
            update,
            body,
        } => NodeKind::For {
            init: fold_opt(f, init),
            test: fold_opt(f, test),
            update: fold_opt(f, update),
            body: fold_box(f, body),
        },
        NodeKind::ForIn { left, right, body } => NodeKind::ForIn {
            left: fold_box(f, left),
            right: fold_box(f, right),
            body: fold_box(f, body),
        },
        NodeKind::ForOf {
            left,
            right,
            body,
            is_await,
        } => NodeKind::ForOf {
            left: fold_box(f, left),
            right: fold_box(f, right),
            body: fold_box(f, body),
            is_await,
        },
        NodeKind::While { test, body } => NodeKind::While {
            test: fold_box(f, test),
            body: fold_box(f, body),
        },
        NodeKind::DoWhile { body, test } => NodeKind::DoWhile {
            body: fold_box(f, body),
            test: fold_box(f, test),
        },
        NodeKind::Labeled { label, body } => NodeKind::Labeled {
            label,
            body: fold_box(f, body),
        },
        NodeKind::Try {
            block,
            handler,
            finalizer,
        } => NodeKind::Try {
            block: fold_box(f, block),
            handler: fold_opt(f, handler),
            finalizer: fold_opt(f, finalizer),
        },
        NodeKind::CatchClause { param, body } => NodeKind::CatchClause {
            param: fold_opt(f, param),
            body: fold_box(f, body),
        },
        NodeKind::Switch {
            discriminant,
            cases,
        } => NodeKind::Switch {
            discriminant: fold_box(f, discriminant),
            cases: fold_vec(f, cases),
        },
        NodeKind::SwitchCase { test, consequent } => NodeKind::SwitchCase {
            test: fold_opt(f, test),
            consequent: fold_vec(f, consequent),
        },
        NodeKind::Return { argument } => NodeKind::Return {
            argument: fold_opt(f, argument),
        },
        NodeKind::Throw { argument } => NodeKind::Throw {
            argument: fold_box(f, argument),
        },
        NodeKind::VariableDeclaration { kind, declarations } => NodeKind::VariableDeclaration {
            kind,
            declarations: fold_vec(f, declarations),
        },
        NodeKind::VariableDeclarator { id, init } => NodeKind::VariableDeclarator {
            id: fold_box(f, id),
            init: fold_opt(f, init),
        },
        NodeKind::FunctionDeclaration(func) => NodeKind::FunctionDeclaration(fold_function(f, func)),
        NodeKind::FunctionExpression(func) => NodeKind::FunctionExpression(fold_function(f, func)),
        NodeKind::ArrowFunction(func) => NodeKind::ArrowFunction(fold_function(f, func)),
        NodeKind::ClassDeclaration(class) => NodeKind::ClassDeclaration(fold_class(f, class)),
        NodeKind::ClassExpression(class) => NodeKind::ClassExpression(fold_class(f, class)),
        NodeKind::MethodDefinition {
            key,
            value,
            kind,
            computed,
            is_static,
        } => NodeKind::MethodDefinition {
            key: fold_box(f, key),
            value: fold_box(f, value),
            kind,
            computed,
            is_static,
        },
        NodeKind::PropertyDefinition {
            key,
            value,
            computed,
            is_static,
        } => NodeKind::PropertyDefinition {
            key: fold_box(f, key),
            value: fold_opt(f, value),
            computed,
            is_static,
        },
        NodeKind::StaticBlock { body } => NodeKind::StaticBlock {
            body: fold_vec(f, body),
        },
        NodeKind::TemplateLiteral {
            quasis,
            expressions,
        } => NodeKind::TemplateLiteral {
            quasis,
            expressions: fold_vec(f, expressions),
        },
        NodeKind::Array { elements } => NodeKind::Array {
            elements: elements
                .into_iter()
                .map(|element| element.map(|e| f.fold_node(e)))
                .collect(),
        },
        NodeKind::Object { properties } => NodeKind::Object {
            properties: fold_vec(f, properties),
        },
        NodeKind::Property {
            key,
            value,
            kind,
            computed,
            shorthand,
        } => NodeKind::Property {
            key: fold_box(f, key),
            value: fold_box(f, value),
            kind,
            computed,
            shorthand,
        },
        NodeKind::Spread { argument } => NodeKind::Spread {
            argument: fold_box(f, argument),
        },
        NodeKind::Sequence { expressions } => NodeKind::Sequence {
            expressions: fold_vec(f, expressions),
        },
        NodeKind::Unary { operator, argument } => NodeKind::Unary {
            operator,
            argument: fold_box(f, argument),
        },
        NodeKind::Update {
            operator,
            prefix,
            argument,
        } => NodeKind::Update {
            operator,
            prefix,
            argument: fold_box(f, argument),
        },
        NodeKind::Binary {
            operator,
            left,
            right,
        } => NodeKind::Binary {
            operator,
            left: fold_box(f, left),
            right: fold_box(f, right),
        },
        NodeKind::Logical {
            operator,
            left,
            right,
        } => NodeKind::Logical {
            operator,
            left: fold_box(f, left),
            right: fold_box(f, right),
        },
        NodeKind::Assignment {
            operator,
            left,
            right,
        } => NodeKind::Assignment {
            operator,
            left: fold_box(f, left),
            right: fold_box(f, right),
        },
        NodeKind::Conditional {
            test,
            consequent,
            alternate,
        } => NodeKind::Conditional {
            test: fold_box(f, test),
            consequent: fold_box(f, consequent),
            alternate: fold_box(f, alternate),
        },
        NodeKind::Call {
            callee,
            arguments,
            optional,
        } => NodeKind::Call {
            callee: fold_box(f, callee),
            arguments: fold_vec(f, arguments),
            optional,
        },
        NodeKind::New { callee, arguments } => NodeKind::New {
            callee: fold_box(f, callee),
            arguments: fold_vec(f, arguments),
        },
        NodeKind::Member {
            object,
            property,
            computed,
            optional,
        } => NodeKind::Member {
            object: fold_box(f, object),
            property: fold_box(f, property),
            computed,
            optional,
        },
        NodeKind::Await { argument } => NodeKind::Await {
            argument: fold_box(f, argument),
        },
        NodeKind::Yield { argument, delegate } => NodeKind::Yield {
            argument: fold_opt(f, argument),
            delegate,
        },
        NodeKind::Opaque { name, children } => NodeKind::Opaque {
            name,
            children: fold_vec(f, children),
        },
        leaf @ (NodeKind::Empty
        | NodeKind::Break { .. }
        | NodeKind::Continue { .. }
        | NodeKind::Identifier { .. }
        | NodeKind::Literal { .. }
        | NodeKind::This
        | NodeKind::Super) => leaf,
    };

    Node {
        kind,
        span,
        loc,
        comments,
        origin,
    }
}

fn fold_box<F: Fold + ?Sized>(f: &mut F, node: Box<Node>) -> Box<Node> {
    Box::new(f.fold_node(*node))
}

fn fold_opt<F: Fold + ?Sized>(f: &mut F, node: Option<Box<Node>>) -> Option<Box<Node>> {
    node.map(|n| fold_box(f, n))
}

fn fold_vec<F: Fold + ?Sized>(f: &mut F, nodes: Vec<Node>) -> Vec<Node> {
    nodes.into_iter().map(|n| f.fold_node(n)).collect()
}

fn fold_function<F: Fold + ?Sized>(f: &mut F, func: Function) -> Function {
    Function {
        params: fold_vec(f, func.params),
        body: fold_box(f, func.body),
        ..func
    }
}

fn fold_class<F: Fold + ?Sized>(f: &mut F, class: Class) -> Class {
    Class {
        id: class.id,
        super_class: fold_opt(f, class.super_class),
        body: fold_vec(f, class.body),
    }
}
