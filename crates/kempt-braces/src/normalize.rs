//! The brace-normalizing tree rewrite.
//!
//! Rules, applied bottom-up at each construct:
//!
//! 1. `=> { return expr; }` collapses to `=> expr` (object literals are
//!    wrapped in a one-element sequence so the printer parenthesizes them).
//! 2. A one-statement block body of a conditional branch or loop loses its
//!    braces: always for a single-line simple statement, only under `Remove`
//!    for compound or multi-line statements. Lexical declarations and
//!    commented blocks keep their braces.
//! 3. A consequent keeps its braces when the outer conditional has an `else`
//!    and the inner statement ends in an `if` without one.
//! 4. Under `Add`, unbraced compound (or multi-line) bodies get a block.
//! 5. In statement lists, a bare block around a single compound statement is
//!    dropped under `conditionalBraceMode = remove`.
//!
//! Any node substituted for another is re-anchored at the replaced node's
//! position so that the host attaches comments to the same text.

use kempt_common::limits::MAX_NORMALIZE_DEPTH;
use kempt_syntax::{Fold, Node, NodeKind, walk_node};
use tracing::trace;

use crate::policy::{BraceMode, BracePolicy};

/// Normalize braces throughout `tree` under `policy`.
///
/// Total: node shapes the rules do not recognize are passed through, and
/// subtrees nested deeper than [`MAX_NORMALIZE_DEPTH`] are left untouched.
pub fn normalize(tree: Node, policy: BracePolicy) -> Node {
    BraceNormalizer::new(policy).fold_node(tree)
}

/// Post-order [`Fold`] that applies the brace rules.
pub struct BraceNormalizer {
    policy: BracePolicy,
    depth: u32,
}

impl BraceNormalizer {
    pub fn new(policy: BracePolicy) -> Self {
        BraceNormalizer { policy, depth: 0 }
    }

    pub fn policy(&self) -> BracePolicy {
        self.policy
    }

    fn rewrite(&self, node: Node) -> Node {
        let Node {
            kind,
            span,
            loc,
            comments,
            origin,
        } = node;

        let kind = match kind {
            NodeKind::If {
                test,
                consequent,
                alternate,
            } => self.rewrite_if(test, consequent, alternate),
            NodeKind::For {
                init,
                test,
                update,
                body,
            } => NodeKind::For {
                init,
                test,
                update,
                body: self.loop_body(body),
            },
            NodeKind::ForIn { left, right, body } => NodeKind::ForIn {
                left,
                right,
                body: self.loop_body(body),
            },
            NodeKind::ForOf {
                left,
                right,
                body,
                is_await,
            } => NodeKind::ForOf {
                left,
                right,
                body: self.loop_body(body),
                is_await,
            },
            NodeKind::While { test, body } => NodeKind::While {
                test,
                body: self.loop_body(body),
            },
            NodeKind::DoWhile { body, test } => NodeKind::DoWhile {
                body: self.loop_body(body),
                test,
            },
            NodeKind::ArrowFunction(mut function) => {
                function.body = collapse_arrow_body(function.body);
                NodeKind::ArrowFunction(function)
            }
            NodeKind::Program { body } => NodeKind::Program {
                body: self.collapse_statements(body),
            },
            NodeKind::Block { body } => NodeKind::Block {
                body: self.collapse_statements(body),
            },
            NodeKind::StaticBlock { body } => NodeKind::StaticBlock {
                body: self.collapse_statements(body),
            },
            NodeKind::SwitchCase { test, consequent } => NodeKind::SwitchCase {
                test,
                consequent: self.collapse_statements(consequent),
            },
            other => other,
        };

        Node {
            kind,
            span,
            loc,
            comments,
            origin,
        }
    }

    fn rewrite_if(
        &self,
        test: Box<Node>,
        consequent: Box<Node>,
        alternate: Option<Box<Node>>,
    ) -> NodeKind {
        let has_alternate = alternate.is_some();

        let mut consequent = self.wrap_body(self.unwrap_body(consequent, has_alternate));
        if has_alternate && !consequent.is_block() && ends_in_open_conditional(&consequent) {
            trace!("bracing consequent to keep the else attached");
            consequent = Box::new(into_block(*consequent));
        }

        let alternate = alternate.map(|alternate| self.wrap_body(self.unwrap_body(alternate, false)));

        NodeKind::If {
            test,
            consequent,
            alternate,
        }
    }

    fn loop_body(&self, body: Box<Node>) -> Box<Node> {
        self.wrap_body(self.unwrap_body(body, false))
    }

    /// Strip removable braces from a body, repeatedly for `{{ ... }}`.
    ///
    /// `guard_else` is set for the consequent of an `if` that has an `else`.
    fn unwrap_body(&self, mut body: Box<Node>, guard_else: bool) -> Box<Node> {
        while self.should_unwrap(&body, guard_else) {
            match into_sole_statement(*body) {
                Ok(statement) => {
                    trace!(statement = statement.kind_name(), "removing braces");
                    body = Box::new(statement);
                }
                Err(block) => return Box::new(block),
            }
        }
        body
    }

    fn should_unwrap(&self, block: &Node, guard_else: bool) -> bool {
        let Some(statement) = block.sole_statement() else {
            return false;
        };
        if guard_else && ends_in_open_conditional(statement) {
            return false;
        }
        if block.has_comments() || statement.is_lexical_declaration() {
            return false;
        }
        if statement.is_compound() {
            self.policy.conditional_brace_mode == BraceMode::Remove
        } else if statement.is_multiline() {
            self.policy.multiline_brace_mode == BraceMode::Remove
        } else {
            true
        }
    }

    fn wrap_body(&self, body: Box<Node>) -> Box<Node> {
        if body.is_block() {
            return body;
        }
        let wrap = if body.is_compound() {
            self.policy.conditional_brace_mode == BraceMode::Add
        } else {
            self.policy.multiline_brace_mode == BraceMode::Add && body.is_multiline()
        };
        if !wrap {
            return body;
        }
        trace!(statement = body.kind_name(), "adding braces");
        Box::new(into_block(*body))
    }

    fn collapse_statements(&self, statements: Vec<Node>) -> Vec<Node> {
        if self.policy.conditional_brace_mode != BraceMode::Remove {
            return statements;
        }
        statements
            .into_iter()
            .map(|statement| {
                if is_collapsible_block(&statement) {
                    into_sole_statement(statement).unwrap_or_else(|block| block)
                } else {
                    statement
                }
            })
            .collect()
    }
}

impl Fold for BraceNormalizer {
    fn fold_node(&mut self, node: Node) -> Node {
        if self.depth >= MAX_NORMALIZE_DEPTH {
            return node;
        }
        self.depth += 1;
        let node = walk_node(self, node);
        self.depth -= 1;
        self.rewrite(node)
    }
}

/// Whether removing the braces around `statement` would hand a following
/// `else` to an `if` inside it.
fn ends_in_open_conditional(statement: &Node) -> bool {
    match &statement.kind {
        NodeKind::If {
            alternate: None, ..
        } => true,
        NodeKind::If {
            alternate: Some(alternate),
            ..
        } => ends_in_open_conditional(alternate),
        NodeKind::For { body, .. }
        | NodeKind::ForIn { body, .. }
        | NodeKind::ForOf { body, .. }
        | NodeKind::While { body, .. }
        | NodeKind::Labeled { body, .. } => ends_in_open_conditional(body),
        _ => false,
    }
}

fn is_collapsible_block(block: &Node) -> bool {
    !block.has_comments()
        && block
            .sole_statement()
            .is_some_and(|statement| statement.is_compound() && !statement.is_lexical_declaration())
}

/// Split a one-statement block into its statement, re-anchored at the block.
/// Anything else comes back unchanged as the error.
fn into_sole_statement(block: Node) -> Result<Node, Node> {
    let Node {
        kind,
        span,
        loc,
        comments,
        origin,
    } = block;
    let rebuild = |kind| Node {
        kind,
        span,
        loc,
        comments,
        origin,
    };
    match kind {
        NodeKind::Block { body } => match <[Node; 1]>::try_from(body) {
            Ok([statement]) => Ok(statement.anchored(span, loc)),
            Err(body) => Err(rebuild(NodeKind::Block { body })),
        },
        kind => Err(rebuild(kind)),
    }
}

/// Wrap a statement in a new block that takes over its position.
fn into_block(statement: Node) -> Node {
    let (span, loc) = (statement.span, statement.loc);
    let mut block = Node::block(vec![statement]);
    block.span = span;
    block.loc = loc;
    block
}

fn collapse_arrow_body(body: Box<Node>) -> Box<Node> {
    let collapsible = match body.sole_statement() {
        Some(statement) if !body.has_comments() && !statement.has_comments() => {
            match &statement.kind {
                NodeKind::Return { argument } => {
                    !argument.as_deref().is_some_and(Node::is_declaration)
                }
                _ => false,
            }
        }
        _ => false,
    };
    if !collapsible {
        return body;
    }

    let block = *body;
    let (span, loc) = (block.span, block.loc);
    let argument = match block.kind {
        NodeKind::Block { body } => body.into_iter().next().and_then(|statement| match statement.kind {
            NodeKind::Return { argument } => argument,
            _ => None,
        }),
        _ => None,
    };

    let expression = match argument {
        Some(argument) if argument.is_object_literal() => {
            let (object_span, object_loc) = (argument.span, argument.loc);
            let mut sequence = Node::sequence(vec![*argument]);
            sequence.span = object_span;
            sequence.loc = object_loc;
            sequence
        }
        Some(argument) => *argument,
        None => Node::id("undefined"),
    };
    trace!(expression = expression.kind_name(), "collapsing arrow body");
    Box::new(expression.anchored(span, loc))
}
