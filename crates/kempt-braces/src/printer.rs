//! Printer override for collapsed arrow bodies.
//!
//! An object literal returned from a collapsed arrow body is carried as a
//! one-element sequence. The host's default printer would print that as a
//! bare `{ ... }`, which reads as a block after `=>`, so it is printed
//! parenthesized here.

use kempt_syntax::{Node, NodeKind};

/// Whether `node` is the one-element sequence wrapper around an object literal.
pub fn is_wrapped_object_body(node: &Node) -> bool {
    match &node.kind {
        NodeKind::Sequence { expressions } => {
            matches!(expressions.as_slice(), [only] if only.is_object_literal())
        }
        _ => false,
    }
}

/// Print the object-body wrapper as `(<object>)`.
///
/// Returns `None` for every other node so the host falls back to its own
/// printing. `print_child` prints a child node with the host printer.
pub fn print_wrapped_object_body(
    node: &Node,
    print_child: &mut dyn FnMut(&Node) -> String,
) -> Option<String> {
    match &node.kind {
        NodeKind::Sequence { expressions } => match expressions.as_slice() {
            [object] if object.is_object_literal() => Some(format!("({})", print_child(object))),
            _ => None,
        },
        _ => None,
    }
}
