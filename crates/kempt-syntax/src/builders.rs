// =========================================================================
// Builder helpers for node construction
// =========================================================================

use crate::node::{Class, DeclarationKind, Function, LiteralValue, Node, NodeKind, PropertyKind};

impl Node {
    pub fn program(body: Vec<Node>) -> Self {
        Self::new(NodeKind::Program { body })
    }

    pub fn block(body: Vec<Node>) -> Self {
        Self::new(NodeKind::Block { body })
    }

    /// Create an identifier node
    pub fn id(name: impl Into<String>) -> Self {
        Self::new(NodeKind::Identifier { name: name.into() })
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::new(NodeKind::Literal {
            value: LiteralValue::String(value.into()),
        })
    }

    pub fn number(value: impl Into<String>) -> Self {
        Self::new(NodeKind::Literal {
            value: LiteralValue::Number(value.into()),
        })
    }

    pub fn call(callee: Node, arguments: Vec<Node>) -> Self {
        Self::new(NodeKind::Call {
            callee: Box::new(callee),
            arguments,
            optional: false,
        })
    }

    /// `callee(args);` as a statement.
    pub fn call_stmt(callee: &str, arguments: Vec<Node>) -> Self {
        Self::expr_stmt(Self::call(Self::id(callee), arguments))
    }

    pub fn expr_stmt(expression: Node) -> Self {
        Self::new(NodeKind::Expression {
            expression: Box::new(expression),
        })
    }

    pub fn binary(left: Node, operator: &str, right: Node) -> Self {
        Self::new(NodeKind::Binary {
            operator: operator.to_string(),
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn if_stmt(test: Node, consequent: Node, alternate: Option<Node>) -> Self {
        Self::new(NodeKind::If {
            test: Box::new(test),
            consequent: Box::new(consequent),
            alternate: alternate.map(Box::new),
        })
    }

    pub fn while_stmt(test: Node, body: Node) -> Self {
        Self::new(NodeKind::While {
            test: Box::new(test),
            body: Box::new(body),
        })
    }

    pub fn do_while(body: Node, test: Node) -> Self {
        Self::new(NodeKind::DoWhile {
            body: Box::new(body),
            test: Box::new(test),
        })
    }

    pub fn for_stmt(init: Option<Node>, test: Option<Node>, update: Option<Node>, body: Node) -> Self {
        Self::new(NodeKind::For {
            init: init.map(Box::new),
            test: test.map(Box::new),
            update: update.map(Box::new),
            body: Box::new(body),
        })
    }

    pub fn for_of(left: Node, right: Node, body: Node) -> Self {
        Self::new(NodeKind::ForOf {
            left: Box::new(left),
            right: Box::new(right),
            body: Box::new(body),
            is_await: false,
        })
    }

    pub fn for_in(left: Node, right: Node, body: Node) -> Self {
        Self::new(NodeKind::ForIn {
            left: Box::new(left),
            right: Box::new(right),
            body: Box::new(body),
        })
    }

    pub fn labeled(label: impl Into<String>, body: Node) -> Self {
        Self::new(NodeKind::Labeled {
            label: label.into(),
            body: Box::new(body),
        })
    }

    pub fn try_stmt(block: Node, handler: Option<Node>, finalizer: Option<Node>) -> Self {
        Self::new(NodeKind::Try {
            block: Box::new(block),
            handler: handler.map(Box::new),
            finalizer: finalizer.map(Box::new),
        })
    }

    pub fn catch_clause(param: Option<Node>, body: Node) -> Self {
        Self::new(NodeKind::CatchClause {
            param: param.map(Box::new),
            body: Box::new(body),
        })
    }

    pub fn switch(discriminant: Node, cases: Vec<Node>) -> Self {
        Self::new(NodeKind::Switch {
            discriminant: Box::new(discriminant),
            cases,
        })
    }

    pub fn switch_case(test: Option<Node>, consequent: Vec<Node>) -> Self {
        Self::new(NodeKind::SwitchCase {
            test: test.map(Box::new),
            consequent,
        })
    }

    /// Create a return statement
    pub fn ret(argument: Option<Node>) -> Self {
        Self::new(NodeKind::Return {
            argument: argument.map(Box::new),
        })
    }

    pub fn throw(argument: Node) -> Self {
        Self::new(NodeKind::Throw {
            argument: Box::new(argument),
        })
    }

    /// `kind name = init;` with a single declarator.
    pub fn var_decl(kind: DeclarationKind, name: &str, init: Option<Node>) -> Self {
        let declarator = Self::new(NodeKind::VariableDeclarator {
            id: Box::new(Self::id(name)),
            init: init.map(Box::new),
        });
        Self::new(NodeKind::VariableDeclaration {
            kind,
            declarations: vec![declarator],
        })
    }

    pub fn function_decl(name: &str, params: Vec<Node>, body: Vec<Node>) -> Self {
        Self::new(NodeKind::FunctionDeclaration(Function {
            id: Some(name.to_string()),
            params,
            body: Box::new(Self::block(body)),
            is_async: false,
            is_generator: false,
        }))
    }

    /// Arrow function; `body` is either a block or an expression.
    pub fn arrow(params: Vec<Node>, body: Node) -> Self {
        Self::new(NodeKind::ArrowFunction(Function {
            id: None,
            params,
            body: Box::new(body),
            is_async: false,
            is_generator: false,
        }))
    }

    pub fn class_decl(name: &str, body: Vec<Node>) -> Self {
        Self::new(NodeKind::ClassDeclaration(Class {
            id: Some(name.to_string()),
            super_class: None,
            body,
        }))
    }

    pub fn object(properties: Vec<Node>) -> Self {
        Self::new(NodeKind::Object { properties })
    }

    /// `key: value` object property.
    pub fn property(key: &str, value: Node) -> Self {
        Self::new(NodeKind::Property {
            key: Box::new(Self::id(key)),
            value: Box::new(value),
            kind: PropertyKind::Init,
            computed: false,
            shorthand: false,
        })
    }

    pub fn sequence(expressions: Vec<Node>) -> Self {
        Self::new(NodeKind::Sequence { expressions })
    }

    pub fn opaque(name: impl Into<String>, children: Vec<Node>) -> Self {
        Self::new(NodeKind::Opaque {
            name: name.into(),
            children,
        })
    }
}
