//! Type inference for name-resolved programs.
//!
//! [`check_root`] checks every declaration in source order. Each declaration
//! is checked in two passes: constraint generation, which threads a
//! [`Substitution`] through [`unify`], and reassembly, which rebuilds the
//! declaration as a typed node once its substitution is final. The first
//! error aborts the whole program.

pub mod algorithm;
pub mod context;
pub mod error;
pub mod reassemble;
pub mod state;

mod substitution;
mod unification;

pub use error::{CheckError, InternalError, TypeError};
pub use substitution::Substitution;
pub use unification::{UnificationError, guesstimate_type, unify, unify_all, unify_many};

use ast::{named, typed};
use files::SourceLocation;
use symbols::Fresh;

use crate::algorithm::declaration;
use crate::context::Context;

enum Item<'r> {
    Def(&'r named::Def),
    Trait(&'r named::Trait),
    Instance(&'r named::Instance),
}

impl Item<'_> {
    fn loc(&self) -> SourceLocation {
        match self {
            Item::Def(def) => def.loc,
            Item::Trait(trait_) => trait_.loc,
            Item::Instance(instance) => instance.loc,
        }
    }
}

#[tracing::instrument(skip_all, name = "check_root")]
pub fn check_root(root: &named::Root, fresh: &Fresh) -> Result<typed::Root, CheckError> {
    let context = Context::new(root)?;

    let mut checked = typed::Root { files: root.files.clone(), ..typed::Root::default() };

    for enum_ in &root.enums {
        checked.enums.insert(enum_.sym.clone(), declaration::check_enum(&context, enum_)?);
    }
    for struct_ in &root.structs {
        checked.structs.insert(struct_.sym.clone(), declaration::check_struct(&context, struct_)?);
    }
    for alias in &root.aliases {
        checked.aliases.insert(alias.sym.clone(), declaration::check_alias(&context, alias)?);
    }
    for relation in &root.relations {
        let name = relation.name.name.clone();
        checked.relations.insert(name, declaration::check_relation(&context, relation)?);
    }
    for effect in &root.effects {
        let effect_ = declaration::check_effect(fresh, &context, effect)?;
        checked.effects.insert(effect.sym.clone(), effect_);
    }

    let mut items: Vec<Item> = root
        .defs
        .iter()
        .map(Item::Def)
        .chain(root.traits.iter().map(Item::Trait))
        .chain(root.instances.iter().map(Item::Instance))
        .collect();
    items.sort_by_key(Item::loc);

    for item in items {
        match item {
            Item::Def(def) => {
                let scheme = context.def_scheme(&def.sym)?.clone();
                let def_ = declaration::check_def(fresh, &context, def, scheme)?;
                checked.defs.insert(def.sym.clone(), def_);
            }
            Item::Trait(trait_) => {
                let trait_ = declaration::check_trait(fresh, &context, trait_)?;
                checked.traits.insert(trait_.sym.clone(), trait_);
            }
            Item::Instance(instance) => {
                let instance = declaration::check_instance(fresh, &context, instance)?;
                let trait_sym = instance.trait_use.sym.clone();
                checked.instances.entry(trait_sym).or_default().push(instance);
            }
        }
    }

    tracing::debug!(defs = checked.defs.len(), "checked root");

    Ok(checked)
}

/// Checks `root` with a fresh variable source that starts after its ids.
pub fn check(root: &named::Root) -> Result<typed::Root, CheckError> {
    let fresh = Fresh::starting_at(root.next_id);
    check_root(root, &fresh)
}
