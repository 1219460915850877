use std::sync::atomic::{AtomicU32, Ordering};

use files::SourceLocation;
use smol_str::SmolStr;

use crate::{Kind, Rigidity, TypeVarSym, VarSym};

/// A monotonic source of unique ids for variables and type variables.
///
/// Shared by reference; allocation only needs `&self`.
#[derive(Debug, Default)]
pub struct Fresh {
    next: AtomicU32,
}

impl Fresh {
    pub fn new() -> Fresh {
        Fresh::default()
    }

    /// Starts allocating after ids already handed out, e.g. by a named root.
    pub fn starting_at(next: u32) -> Fresh {
        Fresh { next: AtomicU32::new(next) }
    }

    pub fn fresh_id(&self) -> u32 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }

    pub fn fresh_type_var(&self, kind: Kind, loc: SourceLocation) -> TypeVarSym {
        let id = self.fresh_id();
        TypeVarSym { id, text: None, kind, rigidity: Rigidity::Flexible, loc }
    }

    pub fn fresh_rigid(&self, text: impl Into<SmolStr>, kind: Kind, loc: SourceLocation) -> TypeVarSym {
        let id = self.fresh_id();
        TypeVarSym { id, text: Some(text.into()), kind, rigidity: Rigidity::Rigid, loc }
    }

    pub fn fresh_var_sym(&self, text: impl Into<SmolStr>, loc: SourceLocation) -> VarSym {
        let id = self.fresh_id();
        let tvar = self.fresh_type_var(Kind::Star, loc);
        VarSym { id, text: text.into(), tvar, loc }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;

    #[test]
    fn ids_are_monotonic() {
        let fresh = Fresh::starting_at(10);
        assert_eq!(fresh.fresh_id(), 10);
        assert_eq!(fresh.fresh_id(), 11);

        let mut files = files::Files::default();
        let loc = SourceLocation::on_line(files.insert("Main.flint"), 1, 1, 2);

        let tvar = fresh.fresh_type_var(Kind::Star, loc);
        assert_eq!(tvar.id, 12);
        assert!(tvar.is_flexible());
    }

    #[test]
    fn ids_are_unique_across_threads() {
        let fresh = Arc::new(Fresh::new());

        let handles = (0..4)
            .map(|_| {
                let fresh = Arc::clone(&fresh);
                thread::spawn(move || (0..100).map(|_| fresh.fresh_id()).collect::<Vec<_>>())
            })
            .collect::<Vec<_>>();

        let mut ids: Vec<u32> = handles.into_iter().flat_map(|h| h.join().unwrap()).collect();
        ids.sort_unstable();
        ids.dedup();

        assert_eq!(ids.len(), 400);
    }
}
