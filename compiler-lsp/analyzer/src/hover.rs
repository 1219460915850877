//! Type information for the node under the cursor.

use std::fmt::Display;

use ast::typed::Root;
use files::{FileId, SourceLocation, SourcePosition};
use serde::Serialize;
use symbols::Symbol;

use crate::locate::{Node, stack};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hover {
    /// Markdown, a single fenced code block.
    pub contents: String,
    pub loc: SourceLocation,
}

impl Hover {
    fn new(signature: impl Display, loc: SourceLocation) -> Hover {
        let contents = format!("```flint\n{signature}\n```");
        Hover { contents, loc }
    }
}

/// The type of the innermost typed node at `position`.
///
/// Declarations show their declared scheme when the cursor is on their name;
/// expressions, patterns, annotations and binders show their inferred type.
#[tracing::instrument(skip_all, name = "hover")]
pub fn hover(root: &Root, file: FileId, position: SourcePosition) -> Option<Hover> {
    stack(root, file, position)
        .into_iter()
        .rev()
        .filter(Node::is_real)
        .find_map(|node| hover_node(node, position))
}

fn hover_node(node: Node<'_>, position: SourcePosition) -> Option<Hover> {
    match node {
        Node::Def(def) if def.sym.loc.contains(position) => {
            let signature = format!("def {}: {}", def.sym.name, def.spec.scheme);
            Some(Hover::new(signature, def.sym.loc))
        }
        Node::Sig(sig) if sig.sym.loc.contains(position) => {
            let signature = format!("def {}: {}", Symbol::Sig(sig.sym.clone()), sig.spec.scheme);
            Some(Hover::new(signature, sig.sym.loc))
        }
        Node::Op(op) if op.sym.loc.contains(position) => {
            let signature = format!("def {}: {}", Symbol::Op(op.sym.clone()), op.spec.scheme);
            Some(Hover::new(signature, op.sym.loc))
        }
        Node::Relation(relation) if relation.name.loc.contains(position) => {
            let signature = format!("{}: {}", relation.name.name, relation.tpe());
            Some(Hover::new(signature, relation.name.loc))
        }
        Node::FormalParam(fparam) => {
            let signature = format!("{}: {}", fparam.sym.text, fparam.tpe);
            Some(Hover::new(signature, fparam.loc))
        }
        Node::ConstraintParam(cparam) => {
            let signature = format!("{}: {}", cparam.sym.text, cparam.tpe);
            Some(Hover::new(signature, cparam.loc))
        }
        Node::VarBinder(sym, tpe) => Some(Hover::new(format!("{}: {tpe}", sym.text), sym.loc)),
        Node::Expr(exp) => Some(Hover::new(&exp.tpe, exp.loc)),
        Node::Pattern(pat) => Some(Hover::new(&pat.tpe, pat.loc)),
        Node::Annotation(annotation) => Some(Hover::new(&annotation.tpe, annotation.loc())),
        _ => None,
    }
}
