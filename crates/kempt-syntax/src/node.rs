//! Syntax tree nodes exchanged with the formatter host.
//!
//! The host parses source into this closed set of node kinds and prints it
//! back. Every kind has a fixed set of typed child fields; there is no
//! "look up a child by property name". Kinds the rewriters have no opinion
//! about (type annotations, JSX, decorators, module declarations) travel as
//! [`NodeKind::Opaque`] with their children listed in source order.

use kempt_common::{Location, Span};
use serde::{Deserialize, Serialize};

/// A syntax tree node: its kind plus position and comment metadata.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(flatten)]
    pub kind: NodeKind,
    #[serde(default)]
    pub span: Span,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loc: Option<Location>,
    #[serde(default, skip_serializing_if = "Comments::is_empty")]
    pub comments: Comments,
    /// The node's own position before it was re-anchored at the position of
    /// a node it replaced. `None` when the node sits where it was parsed.
    #[serde(skip)]
    pub origin: Option<Origin>,
}

/// Position metadata saved when a node is re-anchored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Origin {
    pub span: Span,
    pub loc: Option<Location>,
}

/// Comments the host attached to a node.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comments {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub leading: Vec<Comment>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trailing: Vec<Comment>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inner: Vec<Comment>,
}

impl Comments {
    pub fn is_empty(&self) -> bool {
        self.leading.is_empty() && self.trailing.is_empty() && self.inner.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub kind: CommentKind,
    pub text: String,
    #[serde(default)]
    pub span: Span,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommentKind {
    Line,
    Block,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    Var,
    Let,
    Const,
    Using,
}

impl DeclarationKind {
    /// `let`, `const` and `using` bindings are scoped to the enclosing block.
    pub fn is_block_scoped(self) -> bool {
        !matches!(self, DeclarationKind::Var)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    #[default]
    Init,
    Get,
    Set,
    Method,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum LiteralValue {
    String(String),
    Number(String),
    BigInt(String),
    Boolean(bool),
    Null,
    RegExp { pattern: String, flags: String },
}

/// Shared shape of function declarations, function expressions and arrows.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Function {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub params: Vec<Node>,
    /// A `Block` for every function; arrows may also have an expression.
    pub body: Box<Node>,
    #[serde(default)]
    pub is_async: bool,
    #[serde(default)]
    pub is_generator: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Class {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub super_class: Option<Box<Node>>,
    #[serde(default)]
    pub body: Vec<Node>,
}

/// Node kinds, tagged with their ESTree names when serialized.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum NodeKind {
    // =========================================================================
    // Statements
    // =========================================================================
    Program {
        body: Vec<Node>,
    },
    #[serde(rename = "BlockStatement")]
    Block {
        body: Vec<Node>,
    },
    #[serde(rename = "EmptyStatement")]
    Empty,
    #[serde(rename = "ExpressionStatement")]
    Expression {
        expression: Box<Node>,
    },
    #[serde(rename = "IfStatement")]
    If {
        test: Box<Node>,
        consequent: Box<Node>,
        #[serde(default)]
        alternate: Option<Box<Node>>,
    },
    #[serde(rename = "ForStatement")]
    For {
        #[serde(default)]
        init: Option<Box<Node>>,
        #[serde(default)]
        test: Option<Box<Node>>,
        #[serde(default)]
        update: Option<Box<Node>>,
        body: Box<Node>,
    },
    #[serde(rename = "ForInStatement")]
    ForIn {
        left: Box<Node>,
        right: Box<Node>,
        body: Box<Node>,
    },
    #[serde(rename = "ForOfStatement")]
    ForOf {
        left: Box<Node>,
        right: Box<Node>,
        body: Box<Node>,
        #[serde(default)]
        is_await: bool,
    },
    #[serde(rename = "WhileStatement")]
    While {
        test: Box<Node>,
        body: Box<Node>,
    },
    #[serde(rename = "DoWhileStatement")]
    DoWhile {
        body: Box<Node>,
        test: Box<Node>,
    },
    #[serde(rename = "LabeledStatement")]
    Labeled {
        label: String,
        body: Box<Node>,
    },
    #[serde(rename = "TryStatement")]
    Try {
        block: Box<Node>,
        #[serde(default)]
        handler: Option<Box<Node>>,
        #[serde(default)]
        finalizer: Option<Box<Node>>,
    },
    CatchClause {
        #[serde(default)]
        param: Option<Box<Node>>,
        body: Box<Node>,
    },
    #[serde(rename = "SwitchStatement")]
    Switch {
        discriminant: Box<Node>,
        cases: Vec<Node>,
    },
    SwitchCase {
        #[serde(default)]
        test: Option<Box<Node>>,
        consequent: Vec<Node>,
    },
    #[serde(rename = "ReturnStatement")]
    Return {
        #[serde(default)]
        argument: Option<Box<Node>>,
    },
    #[serde(rename = "ThrowStatement")]
    Throw {
        argument: Box<Node>,
    },
    #[serde(rename = "BreakStatement")]
    Break {
        #[serde(default)]
        label: Option<String>,
    },
    #[serde(rename = "ContinueStatement")]
    Continue {
        #[serde(default)]
        label: Option<String>,
    },
    VariableDeclaration {
        kind: DeclarationKind,
        declarations: Vec<Node>,
    },
    VariableDeclarator {
        id: Box<Node>,
        #[serde(default)]
        init: Option<Box<Node>>,
    },
    FunctionDeclaration(Function),
    ClassDeclaration(Class),
    MethodDefinition {
        key: Box<Node>,
        value: Box<Node>,
        #[serde(default)]
        kind: PropertyKind,
        #[serde(default)]
        computed: bool,
        #[serde(default)]
        is_static: bool,
    },
    PropertyDefinition {
        key: Box<Node>,
        #[serde(default)]
        value: Option<Box<Node>>,
        #[serde(default)]
        computed: bool,
        #[serde(default)]
        is_static: bool,
    },
    StaticBlock {
        body: Vec<Node>,
    },

    // =========================================================================
    // Expressions
    // =========================================================================
    Identifier {
        name: String,
    },
    Literal {
        value: LiteralValue,
    },
    TemplateLiteral {
        quasis: Vec<String>,
        expressions: Vec<Node>,
    },
    #[serde(rename = "ThisExpression")]
    This,
    Super,
    #[serde(rename = "ArrayExpression")]
    Array {
        elements: Vec<Option<Node>>,
    },
    #[serde(rename = "ObjectExpression")]
    Object {
        properties: Vec<Node>,
    },
    Property {
        key: Box<Node>,
        value: Box<Node>,
        #[serde(default)]
        kind: PropertyKind,
        #[serde(default)]
        computed: bool,
        #[serde(default)]
        shorthand: bool,
    },
    #[serde(rename = "SpreadElement")]
    Spread {
        argument: Box<Node>,
    },
    FunctionExpression(Function),
    #[serde(rename = "ArrowFunctionExpression")]
    ArrowFunction(Function),
    ClassExpression(Class),
    #[serde(rename = "SequenceExpression")]
    Sequence {
        expressions: Vec<Node>,
    },
    #[serde(rename = "UnaryExpression")]
    Unary {
        operator: String,
        argument: Box<Node>,
    },
    #[serde(rename = "UpdateExpression")]
    Update {
        operator: String,
        prefix: bool,
        argument: Box<Node>,
    },
    #[serde(rename = "BinaryExpression")]
    Binary {
        operator: String,
        left: Box<Node>,
        right: Box<Node>,
    },
    #[serde(rename = "LogicalExpression")]
    Logical {
        operator: String,
        left: Box<Node>,
        right: Box<Node>,
    },
    #[serde(rename = "AssignmentExpression")]
    Assignment {
        operator: String,
        left: Box<Node>,
        right: Box<Node>,
    },
    #[serde(rename = "ConditionalExpression")]
    Conditional {
        test: Box<Node>,
        consequent: Box<Node>,
        alternate: Box<Node>,
    },
    #[serde(rename = "CallExpression")]
    Call {
        callee: Box<Node>,
        arguments: Vec<Node>,
        #[serde(default)]
        optional: bool,
    },
    #[serde(rename = "NewExpression")]
    New {
        callee: Box<Node>,
        arguments: Vec<Node>,
    },
    #[serde(rename = "MemberExpression")]
    Member {
        object: Box<Node>,
        property: Box<Node>,
        #[serde(default)]
        computed: bool,
        #[serde(default)]
        optional: bool,
    },
    #[serde(rename = "AwaitExpression")]
    Await {
        argument: Box<Node>,
    },
    #[serde(rename = "YieldExpression")]
    Yield {
        #[serde(default)]
        argument: Option<Box<Node>>,
        #[serde(default)]
        delegate: bool,
    },

    /// A host-specific node kind, passed through with its children.
    Opaque {
        name: String,
        #[serde(default)]
        children: Vec<Node>,
    },
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Node {
            kind,
            span: Span::default(),
            loc: None,
            comments: Comments::default(),
            origin: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn with_loc(mut self, loc: Location) -> Self {
        self.loc = Some(loc);
        self
    }

    /// Set a whole-line location `start_line..=end_line`.
    pub fn with_lines(self, start_line: u32, end_line: u32) -> Self {
        self.with_loc(Location::lines(start_line, end_line))
    }

    pub fn with_comments(mut self, comments: Comments) -> Self {
        self.comments = comments;
        self
    }

    pub fn with_leading_comment(mut self, text: impl Into<String>) -> Self {
        self.comments.leading.push(Comment {
            kind: CommentKind::Line,
            text: text.into(),
            span: Span::default(),
        });
        self
    }

    pub fn has_comments(&self) -> bool {
        !self.comments.is_empty()
    }

    /// Move this node to the position of `replaced`.
    ///
    /// The host attaches comments by position, so a node substituted for
    /// another must carry the replaced node's span and location. The node's
    /// own position is kept in `origin` (the first one wins when a node is
    /// re-anchored repeatedly).
    pub fn anchored_at(self, replaced: &Node) -> Node {
        self.anchored(replaced.span, replaced.loc)
    }

    /// Re-anchor at an explicit position; see [`Node::anchored_at`].
    pub fn anchored(mut self, span: Span, loc: Option<Location>) -> Node {
        if self.origin.is_none() {
            self.origin = Some(Origin {
                span: self.span,
                loc: self.loc,
            });
        }
        self.span = span;
        self.loc = loc;
        self
    }

    /// Location of the node's own source text, ignoring re-anchoring.
    pub fn source_loc(&self) -> Option<Location> {
        match self.origin {
            Some(origin) => origin.loc,
            None => self.loc,
        }
    }

    /// Whether the node's own source text spans more than one line.
    pub fn is_multiline(&self) -> bool {
        self.source_loc().is_some_and(|loc| loc.is_multiline())
    }

    pub fn is_block(&self) -> bool {
        matches!(self.kind, NodeKind::Block { .. })
    }

    /// Statements of a block, `None` for any other kind.
    pub fn block_body(&self) -> Option<&[Node]> {
        match &self.kind {
            NodeKind::Block { body } => Some(body),
            _ => None,
        }
    }

    /// The single statement of a one-statement block.
    pub fn sole_statement(&self) -> Option<&Node> {
        match self.block_body() {
            Some([only]) => Some(only),
            _ => None,
        }
    }

    /// Control statements that own a nested statement body.
    pub fn is_compound(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::If { .. }
                | NodeKind::For { .. }
                | NodeKind::ForIn { .. }
                | NodeKind::ForOf { .. }
                | NodeKind::While { .. }
                | NodeKind::DoWhile { .. }
                | NodeKind::Try { .. }
                | NodeKind::Switch { .. }
        )
    }

    /// Declarations that need a scope of their own and so can never be the
    /// braceless body of a conditional or loop.
    pub fn is_lexical_declaration(&self) -> bool {
        match &self.kind {
            NodeKind::VariableDeclaration { kind, .. } => kind.is_block_scoped(),
            NodeKind::FunctionDeclaration(_) | NodeKind::ClassDeclaration(_) => true,
            _ => false,
        }
    }

    /// Any declaration form, block scoped or not.
    pub fn is_declaration(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::VariableDeclaration { .. }
                | NodeKind::FunctionDeclaration(_)
                | NodeKind::ClassDeclaration(_)
        )
    }

    pub fn is_object_literal(&self) -> bool {
        matches!(self.kind, NodeKind::Object { .. })
    }

    /// ESTree-style name of the node kind, for diagnostics.
    pub fn kind_name(&self) -> &str {
        match &self.kind {
            NodeKind::Program { .. } => "Program",
            NodeKind::Block { .. } => "BlockStatement",
            NodeKind::Empty => "EmptyStatement",
            NodeKind::Expression { .. } => "ExpressionStatement",
            NodeKind::If { .. } => "IfStatement",
            NodeKind::For { .. } => "ForStatement",
            NodeKind::ForIn { .. } => "ForInStatement",
            NodeKind::ForOf { .. } => "ForOfStatement",
            NodeKind::While { .. } => "WhileStatement",
            NodeKind::DoWhile { .. } => "DoWhileStatement",
            NodeKind::Labeled { .. } => "LabeledStatement",
            NodeKind::Try { .. } => "TryStatement",
            NodeKind::CatchClause { .. } => "CatchClause",
            NodeKind::Switch { .. } => "SwitchStatement",
            NodeKind::SwitchCase { .. } => "SwitchCase",
            NodeKind::Return { .. } => "ReturnStatement",
            NodeKind::Throw { .. } => "ThrowStatement",
            NodeKind::Break { .. } => "BreakStatement",
            NodeKind::Continue { .. } => "ContinueStatement",
            NodeKind::VariableDeclaration { .. } => "VariableDeclaration",
            NodeKind::VariableDeclarator { .. } => "VariableDeclarator",
            NodeKind::FunctionDeclaration(_) => "FunctionDeclaration",
            NodeKind::ClassDeclaration(_) => "ClassDeclaration",
            NodeKind::MethodDefinition { .. } => "MethodDefinition",
            NodeKind::PropertyDefinition { .. } => "PropertyDefinition",
            NodeKind::StaticBlock { .. } => "StaticBlock",
            NodeKind::Identifier { .. } => "Identifier",
            NodeKind::Literal { .. } => "Literal",
            NodeKind::TemplateLiteral { .. } => "TemplateLiteral",
            NodeKind::This => "ThisExpression",
            NodeKind::Super => "Super",
            NodeKind::Array { .. } => "ArrayExpression",
            NodeKind::Object { .. } => "ObjectExpression",
            NodeKind::Property { .. } => "Property",
            NodeKind::Spread { .. } => "SpreadElement",
            NodeKind::FunctionExpression(_) => "FunctionExpression",
            NodeKind::ArrowFunction(_) => "ArrowFunctionExpression",
            NodeKind::ClassExpression(_) => "ClassExpression",
            NodeKind::Sequence { .. } => "SequenceExpression",
            NodeKind::Unary { .. } => "UnaryExpression",
            NodeKind::Update { .. } => "UpdateExpression",
            NodeKind::Binary { .. } => "BinaryExpression",
            NodeKind::Logical { .. } => "LogicalExpression",
            NodeKind::Assignment { .. } => "AssignmentExpression",
            NodeKind::Conditional { .. } => "ConditionalExpression",
            NodeKind::Call { .. } => "CallExpression",
            NodeKind::New { .. } => "NewExpression",
            NodeKind::Member { .. } => "MemberExpression",
            NodeKind::Await { .. } => "AwaitExpression",
            NodeKind::Yield { .. } => "YieldExpression",
            NodeKind::Opaque { name, .. } => name,
        }
    }
}
