use std::fmt::Write;

use ast::typed::{Expr, ExprKind, Pattern, PatternKind, Root};
use files::SourceLocation;
use itertools::Itertools;

use crate::Program;

/// Renders a typed expression as `Node(children...): Type`.
pub fn report_expr(exp: &Expr) -> String {
    let mut buffer = String::default();
    write_expr(&mut buffer, exp);
    buffer
}

fn write_expr(buffer: &mut String, exp: &Expr) {
    match &exp.kind {
        ExprKind::Cst(constant) => write!(buffer, "Cst({constant:?})").unwrap(),
        ExprKind::Var(sym) => write!(buffer, "Var({})", sym.text).unwrap(),
        ExprKind::Def(sym) => write!(buffer, "Def({sym})").unwrap(),
        ExprKind::Sig(sym) => write!(buffer, "Sig({sym})").unwrap(),
        ExprKind::Hole(name) => {
            write!(buffer, "Hole({})", name.as_deref().unwrap_or("?")).unwrap();
        }
        ExprKind::Lambda { fparam, exp } => {
            write!(buffer, "Lambda({}: {}, ", fparam.sym.text, fparam.tpe).unwrap();
            write_expr(buffer, exp);
            buffer.push(')');
        }
        ExprKind::Apply { exp, exps } => {
            buffer.push_str("Apply(");
            write_expr(buffer, exp);
            for argument in exps {
                buffer.push_str(", ");
                write_expr(buffer, argument);
            }
            buffer.push(')');
        }
        ExprKind::Unary { op, exp } => {
            write!(buffer, "Unary({op:?}, ").unwrap();
            write_expr(buffer, exp);
            buffer.push(')');
        }
        ExprKind::Binary { op, exp1, exp2 } => {
            write!(buffer, "Binary({op:?}, ").unwrap();
            write_expr(buffer, exp1);
            buffer.push_str(", ");
            write_expr(buffer, exp2);
            buffer.push(')');
        }
        ExprKind::IfThenElse { exp1, exp2, exp3 } => {
            buffer.push_str("IfThenElse(");
            write_expr(buffer, exp1);
            buffer.push_str(", ");
            write_expr(buffer, exp2);
            buffer.push_str(", ");
            write_expr(buffer, exp3);
            buffer.push(')');
        }
        ExprKind::Let { sym, exp1, exp2 } => {
            write!(buffer, "Let({}, ", sym.text).unwrap();
            write_expr(buffer, exp1);
            buffer.push_str(", ");
            write_expr(buffer, exp2);
            buffer.push(')');
        }
        ExprKind::Tag { sym, exp } => {
            write!(buffer, "Tag({}", sym.sym).unwrap();
            if let Some(exp) = exp {
                buffer.push_str(", ");
                write_expr(buffer, exp);
            }
            buffer.push(')');
        }
        ExprKind::Match { exp, rules } => {
            buffer.push_str("Match(");
            write_expr(buffer, exp);
            for rule in rules {
                buffer.push_str(", ");
                write_pattern(buffer, &rule.pat);
                buffer.push_str(" => ");
                write_expr(buffer, &rule.exp);
            }
            buffer.push(')');
        }
        ExprKind::Tuple(elms) => {
            buffer.push_str("Tuple(");
            for (index, elm) in elms.iter().enumerate() {
                if index > 0 {
                    buffer.push_str(", ");
                }
                write_expr(buffer, elm);
            }
            buffer.push(')');
        }
        kind => {
            let name = format!("{kind:?}");
            let name = name.split(['(', ' ', '{']).next().unwrap_or_default();
            write!(buffer, "{name}(..)").unwrap();
        }
    }
    write!(buffer, ": {}", exp.tpe).unwrap();
}

fn write_pattern(buffer: &mut String, pat: &Pattern) {
    match &pat.kind {
        PatternKind::Wild => buffer.push('_'),
        PatternKind::Var(sym) => buffer.push_str(&sym.text),
        PatternKind::Cst(constant) => write!(buffer, "{constant:?}").unwrap(),
        PatternKind::Tag { sym, pat } => {
            write!(buffer, "{}", sym.sym).unwrap();
            if let Some(pat) = pat {
                buffer.push('(');
                write_pattern(buffer, pat);
                buffer.push(')');
            }
        }
        PatternKind::Tuple(elms) => {
            buffer.push('(');
            for (index, elm) in elms.iter().enumerate() {
                if index > 0 {
                    buffer.push_str(", ");
                }
                write_pattern(buffer, elm);
            }
            buffer.push(')');
        }
    }
}

/// Lists each location with the text it covers, one per line.
pub fn report_locations(program: &Program, locations: &[SourceLocation]) -> String {
    locations.iter().map(|&loc| program.quote(loc)).join("\n")
}

/// Lists every checked def with its scheme, ordered by name.
pub fn report_schemes(root: &Root) -> String {
    root.defs
        .values()
        .sorted_by_key(|def| def.sym.name.clone())
        .map(|def| format!("{}: {}", def.sym, def.spec.scheme))
        .join("\n")
}
