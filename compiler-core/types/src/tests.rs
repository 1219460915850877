use files::{Files, SourceLocation};
use symbols::{EnumSym, Fresh, Kind, TraitSym};

use crate::{Denotation, Scheme, TraitConstraint, Type};

fn location() -> SourceLocation {
    let mut files = Files::default();
    SourceLocation::on_line(files.insert("Main.flint"), 1, 1, 10)
}

fn option(loc: SourceLocation) -> EnumSym {
    EnumSym { namespace: vec![], name: "Option".into(), loc }
}

#[test]
fn display_types() {
    let loc = location();
    let fresh = Fresh::new();
    let a = fresh.fresh_rigid("a", Kind::Star, loc);

    let option_a = Type::Enum(option(loc), vec![Type::Var(a.clone())]);
    assert_eq!(option_a.to_string(), "Option[a]");

    let function = Type::arrow([Type::INT32, Type::BOOL], Type::STR);
    assert_eq!(function.to_string(), "(Int32, Bool) -> String");

    let higher = Type::arrow([Type::arrow([Type::INT32], Type::INT32)], Type::UNIT);
    assert_eq!(higher.to_string(), "(Int32 -> Int32) -> Unit");

    let lattice = Type::Predicate(Denotation::Latticenal, vec![Type::STR, Type::INT64]);
    assert_eq!(lattice.to_string(), "Lattice(String; Int64)");

    let relation = Type::Predicate(Denotation::Relational, vec![Type::STR, Type::STR]);
    assert_eq!(relation.to_string(), "Relation(String, String)");
}

#[test]
fn free_type_vars_are_ordered() {
    let loc = location();
    let fresh = Fresh::new();
    let a = fresh.fresh_type_var(Kind::Star, loc);
    let b = fresh.fresh_type_var(Kind::Star, loc);

    let tpe = Type::Tuple(vec![Type::Var(b.clone()), Type::arrow([Type::Var(a.clone())], Type::Var(b.clone()))]);

    assert_eq!(tpe.free_type_vars().into_iter().collect::<Vec<_>>(), [a.clone(), b.clone()]);
    assert!(tpe.contains_var(&a));
    assert!(!Type::INT32.contains_var(&a));
}

#[test]
fn instantiate_replaces_quantifiers() {
    let loc = location();
    let fresh = Fresh::new();
    let a = fresh.fresh_rigid("a", Kind::Star, loc);
    let show = TraitSym { namespace: vec![], name: "Show".into(), loc };

    let scheme = Scheme {
        quantifiers: vec![a.clone()],
        constraints: vec![TraitConstraint { trait_sym: show, arg: Type::Var(a.clone()) }],
        base: Type::arrow([Type::Var(a.clone())], Type::STR),
    };
    assert_eq!(scheme.to_string(), "∀(a). a -> String with Show[a]");

    let (base, constraints) = scheme.instantiate(&fresh, loc);
    let Type::Arrow(arguments, _) = &base else {
        panic!("expected an arrow, got {base}");
    };
    let Type::Var(instantiated) = &arguments[0] else {
        panic!("expected a variable, got {}", arguments[0]);
    };

    assert_ne!(instantiated, &a);
    assert!(instantiated.is_flexible());
    assert_eq!(constraints[0].arg, Type::Var(instantiated.clone()));
    assert!(scheme.free_type_vars().is_empty());
}

#[test]
fn aliases_expand() {
    let loc = location();
    let alias = symbols::TypeAliasSym { namespace: vec![], name: "Id".into(), loc };
    let tpe = Type::Alias(alias, vec![], Box::new(Type::FLOAT32));

    assert_eq!(tpe.expand(), &Type::FLOAT32);
    assert!(tpe.is_numeric());
    assert_eq!(tpe.to_string(), "Id");
}
