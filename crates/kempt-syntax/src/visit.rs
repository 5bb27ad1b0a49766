//! Read-only traversal.

use smallvec::SmallVec;

use crate::node::{Node, NodeKind};

/// Children of a node in source order.
pub type Children<'a> = SmallVec<[&'a Node; 4]>;

impl Node {
    /// Direct children of this node, in source order.
    pub fn children(&self) -> Children<'_> {
        let mut out = Children::new();
        match &self.kind {
            NodeKind::Program { body }
            | NodeKind::Block { body }
            | NodeKind::StaticBlock { body } => out.extend(body.iter()),
            NodeKind::Expression { expression } => out.push(expression),
            NodeKind::If {
                test,
                consequent,
                alternate,
            } => {
                out.push(test);
                out.push(consequent);
                out.extend(alternate.as_deref());
            }
            NodeKind::For {
                init,
                test,
                update,
                body,
            } => {
                out.extend(init.as_deref());
                out.extend(test.as_deref());
                out.extend(update.as_deref());
                out.push(body);
            }
            NodeKind::ForIn { left, right, body } | NodeKind::ForOf { left, right, body, .. } => {
                out.push(left);
                out.push(right);
                out.push(body);
            }
            NodeKind::While { test, body } => {
                out.push(test);
                out.push(body);
            }
            NodeKind::DoWhile { body, test } => {
                out.push(body);
                out.push(test);
            }
            NodeKind::Labeled { body, .. } => out.push(body),
            NodeKind::Try {
                block,
                handler,
                finalizer,
            } => {
                out.push(block);
                out.extend(handler.as_deref());
                out.extend(finalizer.as_deref());
            }
            NodeKind::CatchClause { param, body } => {
                out.extend(param.as_deref());
                out.push(body);
            }
            NodeKind::Switch {
                discriminant,
                cases,
            } => {
                out.push(discriminant);
                out.extend(cases.iter());
            }
            NodeKind::SwitchCase { test, consequent } => {
                out.extend(test.as_deref());
                out.extend(consequent.iter());
            }
            NodeKind::Return { argument } | NodeKind::Yield { argument, .. } => {
                out.extend(argument.as_deref());
            }
            NodeKind::Throw { argument }
            | NodeKind::Spread { argument }
            | NodeKind::Await { argument }
            | NodeKind::Unary { argument, .. }
            | NodeKind::Update { argument, .. } => out.push(argument),
            NodeKind::VariableDeclaration { declarations, .. } => out.extend(declarations.iter()),
            NodeKind::VariableDeclarator { id, init } => {
                out.push(id);
                out.extend(init.as_deref());
            }
            NodeKind::FunctionDeclaration(func)
            | NodeKind::FunctionExpression(func)
            | NodeKind::ArrowFunction(func) => {
                out.extend(func.params.iter());
                out.push(&func.body);
            }
            NodeKind::ClassDeclaration(class) | NodeKind::ClassExpression(class) => {
                out.extend(class.super_class.as_deref());
                out.extend(class.body.iter());
            }
            NodeKind::MethodDefinition { key, value, .. }
            | NodeKind::Property { key, value, .. } => {
                out.push(key);
                out.push(value);
            }
            NodeKind::PropertyDefinition { key, value, .. } => {
                out.push(key);
                out.extend(value.as_deref());
            }
            NodeKind::TemplateLiteral { expressions, .. }
            | NodeKind::Sequence { expressions } => out.extend(expressions.iter()),
            NodeKind::Array { elements } => out.extend(elements.iter().flatten()),
            NodeKind::Object { properties } => out.extend(properties.iter()),
            NodeKind::Binary { left, right, .. }
            | NodeKind::Logical { left, right, .. }
            | NodeKind::Assignment { left, right, .. } => {
                out.push(left);
                out.push(right);
            }
            NodeKind::Conditional {
                test,
                consequent,
                alternate,
            } => {
                out.push(test);
                out.push(consequent);
                out.push(alternate);
            }
            NodeKind::Call {
                callee, arguments, ..
            }
            | NodeKind::New { callee, arguments } => {
                out.push(callee);
                out.extend(arguments.iter());
            }
            NodeKind::Member {
                object, property, ..
            } => {
                out.push(object);
                out.push(property);
            }
            NodeKind::Opaque { children, .. } => out.extend(children.iter()),
            NodeKind::Empty
            | NodeKind::Break { .. }
            | NodeKind::Continue { .. }
            | NodeKind::Identifier { .. }
            | NodeKind::Literal { .. }
            | NodeKind::This
            | NodeKind::Super => {}
        }
        out
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn subtree_size(&self) -> usize {
        1 + self.children().iter().map(|c| c.subtree_size()).sum::<usize>()
    }

    /// Pre-order search for the first node matching `pred`.
    pub fn find(&self, pred: &mut impl FnMut(&Node) -> bool) -> Option<&Node> {
        if pred(self) {
            return Some(self);
        }
        for child in self.children() {
            if let Some(found) = child.find(&mut *pred) {
                return Some(found);
            }
        }
        None
    }
}
