use files::SourceLocation;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use symbols::{AssocTypeSym, EnumSym, StructSym, SymUse, TraitSym, TypeAliasSym, TypeVarSym};
use types::{Type, TypeConstructor};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Constant {
    Unit,
    Bool(bool),
    Char(char),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    BigInt(SmolStr),
    Float32(f32),
    Float64(f64),
    Str(SmolStr),
}

impl Constant {
    pub fn tpe(&self) -> Type {
        match self {
            Constant::Unit => Type::UNIT,
            Constant::Bool(_) => Type::BOOL,
            Constant::Char(_) => Type::CHAR,
            Constant::Int8(_) => Type::INT8,
            Constant::Int16(_) => Type::INT16,
            Constant::Int32(_) => Type::INT32,
            Constant::Int64(_) => Type::INT64,
            Constant::BigInt(_) => Type::BIG_INT,
            Constant::Float32(_) => Type::FLOAT32,
            Constant::Float64(_) => Type::FLOAT64,
            Constant::Str(_) => Type::STR,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    Not,
    Minus,
    Plus,
    BitwiseNot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    Plus,
    Minus,
    Times,
    Divide,
    Modulo,
    Exponentiate,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Equal,
    NotEqual,
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorClass {
    Arithmetic,
    Bitwise,
    Comparison,
    Equality,
    Logical,
}

impl BinaryOp {
    pub fn class(self) -> OperatorClass {
        match self {
            BinaryOp::Plus
            | BinaryOp::Minus
            | BinaryOp::Times
            | BinaryOp::Divide
            | BinaryOp::Modulo
            | BinaryOp::Exponentiate => OperatorClass::Arithmetic,
            BinaryOp::BitwiseAnd | BinaryOp::BitwiseOr | BinaryOp::BitwiseXor => {
                OperatorClass::Bitwise
            }
            BinaryOp::Less | BinaryOp::LessEqual | BinaryOp::Greater | BinaryOp::GreaterEqual => {
                OperatorClass::Comparison
            }
            BinaryOp::Equal | BinaryOp::NotEqual => OperatorClass::Equality,
            BinaryOp::And | BinaryOp::Or => OperatorClass::Logical,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Polarity {
    Positive,
    Negative,
}

/// A plain name with the location where it was written.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ident {
    pub name: SmolStr,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnnotationKind {
    Deprecated,
    Experimental,
}

/// The `@Deprecated`-style annotations written on a declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Annotations {
    pub values: Vec<AnnotationKind>,
}

impl Annotations {
    pub fn is_deprecated(&self) -> bool {
        self.values.contains(&AnnotationKind::Deprecated)
    }

    pub fn is_experimental(&self) -> bool {
        self.values.contains(&AnnotationKind::Experimental)
    }
}

/// A type as written in the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeExpr {
    Var { sym: TypeVarSym, loc: SourceLocation },
    Primitive { constructor: TypeConstructor, loc: SourceLocation },
    Enum { sym: SymUse<EnumSym>, args: Vec<TypeExpr>, loc: SourceLocation },
    Struct { sym: SymUse<StructSym>, args: Vec<TypeExpr>, loc: SourceLocation },
    Alias { sym: SymUse<TypeAliasSym>, args: Vec<TypeExpr>, loc: SourceLocation },
    /// `Trait.Assoc[arg]`, where the symbol use covers `Trait.Assoc`.
    AssocType { sym: SymUse<AssocTypeSym>, arg: Box<TypeExpr>, loc: SourceLocation },
    Tuple { elms: Vec<TypeExpr>, loc: SourceLocation },
    Arrow { args: Vec<TypeExpr>, ret: Box<TypeExpr>, loc: SourceLocation },
}

impl TypeExpr {
    pub fn loc(&self) -> SourceLocation {
        match self {
            TypeExpr::Var { loc, .. }
            | TypeExpr::Primitive { loc, .. }
            | TypeExpr::Enum { loc, .. }
            | TypeExpr::Struct { loc, .. }
            | TypeExpr::Alias { loc, .. }
            | TypeExpr::AssocType { loc, .. }
            | TypeExpr::Tuple { loc, .. }
            | TypeExpr::Arrow { loc, .. } => *loc,
        }
    }
}

/// A written trait constraint `Trait[arg]`, in a `with` clause or a super trait list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitConstraintExpr {
    pub head: SymUse<TraitSym>,
    pub arg: TypeExpr,
    pub loc: SourceLocation,
}
