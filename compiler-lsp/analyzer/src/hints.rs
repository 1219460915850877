//! Hints for uses of deprecated or experimental declarations.

use ast::Annotations;
use ast::typed::{Expr, ExprKind, Root};
use files::{FileId, SourceLocation};
use serde::{Deserialize, Serialize};
use symbols::{CaseSym, EnumSym, SymUse, TraitSym};
use visiting::{Consumer, FileAcceptor, visit_root};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HintKind {
    Deprecated,
    Experimental,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Hint {
    pub kind: HintKind,
    pub loc: SourceLocation,
}

struct HintConsumer<'r> {
    root: &'r Root,
    hints: Vec<Hint>,
}

impl HintConsumer<'_> {
    fn check(&mut self, annotations: &Annotations, loc: SourceLocation) {
        if !loc.is_real() {
            return;
        }
        if annotations.is_deprecated() {
            self.hints.push(Hint { kind: HintKind::Deprecated, loc });
        }
        if annotations.is_experimental() {
            self.hints.push(Hint { kind: HintKind::Experimental, loc });
        }
    }
}

impl<'r> Consumer<'r> for HintConsumer<'r> {
    fn consume_trait_use(&mut self, trait_use: &'r SymUse<TraitSym>) {
        if let Some(trait_) = self.root.trait_(&trait_use.sym) {
            self.check(&trait_.ann, trait_use.loc);
        }
    }

    fn consume_expr(&mut self, exp: &'r Expr) {
        if let ExprKind::Def(sym) = &exp.kind
            && let Some(def) = self.root.def(sym)
        {
            self.check(&def.spec.ann, exp.loc);
        }
    }

    fn consume_enum_use(&mut self, enum_use: &'r SymUse<EnumSym>) {
        if let Some(enum_) = self.root.enum_(&enum_use.sym) {
            self.check(&enum_.ann, enum_use.loc);
        }
    }

    fn consume_case_use(&mut self, case_use: &'r SymUse<CaseSym>) {
        if let Some(enum_) = self.root.enum_(&case_use.sym.enum_sym) {
            self.check(&enum_.ann, case_use.loc);
        }
    }
}

/// Scans `files` for uses of annotated declarations, ordered by location.
#[tracing::instrument(skip_all, name = "scan_hints")]
pub fn scan_hints(root: &Root, files: &[FileId]) -> Vec<Hint> {
    let mut consumer = HintConsumer { root, hints: vec![] };
    for &file in files {
        visit_root(root, &mut consumer, &FileAcceptor(file));
    }

    let mut hints = consumer.hints;
    hints.sort_by(|a, b| a.loc.cmp(&b.loc).then(a.kind.cmp(&b.kind)));
    hints.dedup();

    tracing::debug!(files = files.len(), hints = hints.len());
    hints
}
