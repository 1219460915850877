use files::{Files, SourceLocation};
use symbols::{EnumSym, Fresh, Kind, TypeAliasSym, TypeVarSym};
use types::Type;

use super::{UnificationError, guesstimate_type, unify, unify_all, unify_many};

struct Fixture {
    fresh: Fresh,
    loc: SourceLocation,
}

impl Fixture {
    fn new() -> Fixture {
        let mut files = Files::default();
        let loc = SourceLocation::on_line(files.insert("Main.flint"), 1, 1, 2);
        Fixture { fresh: Fresh::new(), loc }
    }

    fn flexible(&self) -> TypeVarSym {
        self.fresh.fresh_type_var(Kind::Star, self.loc)
    }

    fn rigid(&self, name: &str) -> TypeVarSym {
        self.fresh.fresh_rigid(name, Kind::Star, self.loc)
    }

    fn option(&self, argument: Type) -> Type {
        let sym = EnumSym { namespace: vec![], name: "Option".into(), loc: self.loc };
        Type::Enum(sym, vec![argument])
    }
}

#[test]
fn unify_is_symmetric_on_success() {
    let fixture = Fixture::new();
    let a = fixture.flexible();
    let b = fixture.flexible();

    let t1 = Type::arrow([Type::Var(a.clone())], fixture.option(Type::INT32));
    let t2 = Type::arrow([Type::BOOL], fixture.option(Type::Var(b.clone())));

    let s12 = unify(&t1, &t2).unwrap();
    let s21 = unify(&t2, &t1).unwrap();

    assert_eq!(s12.apply(&t1), s12.apply(&t2));
    assert_eq!(s21.apply(&t1), s21.apply(&t2));
    assert_eq!(s12.apply(&t1), s21.apply(&t1));
    assert_eq!(s12.apply(&Type::Var(a)), Type::BOOL);
    assert_eq!(s12.apply(&Type::Var(b)), Type::INT32);
}

#[test]
fn occurs_check() {
    let fixture = Fixture::new();
    let a = fixture.flexible();

    let tpe = fixture.option(Type::Var(a.clone()));
    let error = unify(&Type::Var(a.clone()), &tpe).unwrap_err();
    assert_eq!(error, UnificationError::OccursCheck { var: a.clone(), tpe: tpe.clone() });

    let arrow = Type::arrow([Type::Var(a.clone())], Type::UNIT);
    assert!(matches!(
        unify(&arrow, &Type::Var(a)),
        Err(UnificationError::OccursCheck { .. })
    ));
}

#[test]
fn rigid_variables_unify_only_with_themselves() {
    let fixture = Fixture::new();
    let a = fixture.rigid("a");
    let b = fixture.rigid("b");

    assert!(unify(&Type::Var(a.clone()), &Type::Var(a.clone())).unwrap().is_empty());
    assert_eq!(
        unify(&Type::Var(a.clone()), &Type::INT32),
        Err(UnificationError::Mismatch { expected: Type::Var(a.clone()), actual: Type::INT32 })
    );
    assert!(unify(&Type::Var(a.clone()), &Type::Var(b)).is_err());

    let c = fixture.flexible();
    let s = unify(&Type::Var(a.clone()), &Type::Var(c.clone())).unwrap();
    assert_eq!(s.apply(&Type::Var(c)), Type::Var(a));
}

#[test]
fn aliases_unify_through_expansion() {
    let fixture = Fixture::new();
    let sym = TypeAliasSym { namespace: vec![], name: "Score".into(), loc: fixture.loc };
    let alias = Type::Alias(sym, vec![], Box::new(Type::INT64));

    assert!(unify(&alias, &Type::INT64).is_ok());
    assert!(unify(&Type::INT64, &alias).is_ok());
    assert!(unify(&alias, &Type::INT32).is_err());
}

#[test]
fn arity_mismatch() {
    let pair = Type::Tuple(vec![Type::INT32, Type::INT32]);
    let triple = Type::Tuple(vec![Type::INT32, Type::INT32, Type::INT32]);

    assert_eq!(
        unify(&pair, &triple),
        Err(UnificationError::ArityMismatch { expected: 2, actual: 3 })
    );

    let unary = Type::arrow([Type::INT32], Type::INT32);
    let binary = Type::arrow([Type::INT32, Type::INT32], Type::INT32);
    assert!(matches!(unify(&unary, &binary), Err(UnificationError::ArityMismatch { .. })));
}

#[test]
fn unify_all_threads_substitution() {
    let fixture = Fixture::new();
    let a = fixture.flexible();

    let expected = [Type::Var(a.clone()), Type::Var(a.clone())];
    let s = unify_all(&expected, &[Type::STR, Type::STR]).unwrap();
    assert_eq!(s.apply(&Type::Var(a.clone())), Type::STR);

    assert!(unify_all(&expected, &[Type::STR, Type::CHAR]).is_err());
}

#[test]
fn unify_many_finds_common_type() {
    let fixture = Fixture::new();
    let a = fixture.flexible();
    let b = fixture.flexible();

    let types = [
        fixture.option(Type::Var(a.clone())),
        fixture.option(Type::Var(b.clone())),
        fixture.option(Type::CHAR),
    ];
    let (tpe, s) = unify_many(&types).unwrap().unwrap();

    assert_eq!(tpe, fixture.option(Type::CHAR));
    assert_eq!(s.apply(&Type::Var(a)), Type::CHAR);
    assert_eq!(s.apply(&Type::Var(b)), Type::CHAR);
    assert_eq!(unify_many(&[]), Ok(None));
}

#[test]
fn guesstimate_prefers_wider_numeric() {
    assert_eq!(guesstimate_type(&Type::INT32, &Type::FLOAT64), Some(Type::FLOAT64));
    assert_eq!(guesstimate_type(&Type::FLOAT64, &Type::INT32), Some(Type::FLOAT64));
    assert_eq!(guesstimate_type(&Type::INT8, &Type::INT32), Some(Type::INT32));
    assert_eq!(guesstimate_type(&Type::BIG_INT, &Type::INT8), Some(Type::INT8));
    assert_eq!(guesstimate_type(&Type::FLOAT32, &Type::INT64), Some(Type::FLOAT32));
    assert_eq!(guesstimate_type(&Type::BOOL, &Type::INT32), None);
    assert_eq!(guesstimate_type(&Type::STR, &Type::STR), None);
}
