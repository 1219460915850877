use files::SourceLocation;
use smol_str::SmolStr;
use symbols::{Symbol, TypeAliasSym, TypeVarSym, VarSym};
use types::Type;

/// Errors caused by the program being checked.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    #[error("{loc}: expected type '{expected}' but found type '{actual}'")]
    UnificationFailure { expected: Type, actual: Type, loc: SourceLocation },
    #[error("{loc}: expected {expected} arguments but found {actual}")]
    ArityMismatch { expected: usize, actual: usize, loc: SourceLocation },
    #[error("{loc}: unresolved reference '{name}'")]
    UnresolvedReference { name: SmolStr, loc: SourceLocation },
    #[error("{loc}: field '{name}' is initialized more than once")]
    DuplicateField { name: SmolStr, loc: SourceLocation },
}

impl TypeError {
    pub fn loc(&self) -> SourceLocation {
        match self {
            TypeError::UnificationFailure { loc, .. }
            | TypeError::ArityMismatch { loc, .. }
            | TypeError::UnresolvedReference { loc, .. }
            | TypeError::DuplicateField { loc, .. } => *loc,
        }
    }
}

/// Errors caused by a defect in an earlier phase or in the checker itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InternalError {
    #[error("occurs check failed: '{var}' occurs in '{tpe}'")]
    OccursCheck { var: TypeVarSym, tpe: Type },
    #[error("missing declaration for {} '{symbol}'", symbol.describe())]
    MissingDeclaration { symbol: Symbol },
    #[error("unresolved type variable '{symbol}'")]
    UnresolvedTypeVariable { symbol: TypeVarSym },
    #[error("{}: parameter '{sym}' of a declaration has no type annotation", sym.loc)]
    UnannotatedParameter { sym: VarSym },
    #[error("cyclic type alias '{sym}'")]
    CyclicTypeAlias { sym: TypeAliasSym },
    #[error("unimplemented: {what}")]
    Unimplemented { what: SmolStr },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckError {
    #[error(transparent)]
    Type(#[from] TypeError),
    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl CheckError {
    pub fn missing(symbol: impl Into<Symbol>) -> CheckError {
        CheckError::Internal(InternalError::MissingDeclaration { symbol: symbol.into() })
    }

    pub fn loc(&self) -> Option<SourceLocation> {
        match self {
            CheckError::Type(error) => Some(error.loc()),
            CheckError::Internal(_) => None,
        }
    }
}
