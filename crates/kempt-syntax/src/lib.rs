//! Syntax tree model shared by the kempt rewriters and the formatter host.
//!
//! - [`Node`] / [`NodeKind`]: a closed set of statement and expression kinds
//!   with typed child fields, plus span, location and attached comments
//! - [`Fold`]: post-order functional rewriting over those typed fields
//! - [`Node::children`]: read-only traversal in source order
//!
//! Trees are (de)serializable with ESTree-style `"type"` tags so that a host
//! living in another process can exchange them as JSON.

pub mod builders;
pub mod fold;
pub mod node;
pub mod visit;

pub use fold::{Fold, walk_node};
pub use node::{
    Class, Comment, CommentKind, Comments, DeclarationKind, Function, LiteralValue, Node, NodeKind,
    Origin, PropertyKind,
};
pub use visit::Children;
