//! Brace normalization for JavaScript/TypeScript syntax trees.
//!
//! Adds or removes optional `{ }` around single-statement bodies of
//! conditionals and loops, and collapses `=> { return expr; }` arrow bodies
//! into `=> expr`. The rewrite is a pure function of the tree and a
//! [`BracePolicy`]; it never fails and never drops a node that owns comments.

pub mod normalize;
pub mod policy;
pub mod printer;

pub use normalize::{BraceNormalizer, normalize};
pub use policy::{BraceMode, BracePolicy, ParseBraceModeError};
pub use printer::{is_wrapped_object_body, print_wrapped_object_body};
