use std::fmt;

use crate::object::PostScriptString;

pub type PostScriptResult<T> = anyhow::Result<T>;

/*
postscript spec page 523 (the subset this interpreter can raise)

dictstackunderflow Too many end operators
rangecheck Operand out of bounds
stackunderflow Operand stack underflow
typecheck Operand of wrong type
undefined Name not known
undefinedresult Overflow, underflow, or meaningless result
*/

#[derive(Debug)]
pub enum PostScriptError {
    /// Operand stack underflow
    StackUnderflow,

    /// Too many end operators
    DictStackUnderflow,

    /// Operand of wrong type
    TypeCheck,

    /// Operand out of bounds
    RangeCheck,

    /// Name not known
    Undefined {
        name: PostScriptString,
    },

    /// Meaningless result, e.g. a zero modulus
    UndefinedResult,

    /// Zero increment given to `for`
    InvalidIncrement,
}

impl fmt::Display for PostScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StackUnderflow => write!(f, "stackunderflow"),
            Self::DictStackUnderflow => write!(f, "dictstackunderflow"),
            Self::TypeCheck => write!(f, "typecheck"),
            Self::RangeCheck => write!(f, "rangecheck"),
            Self::Undefined { name } => write!(f, "undefined: {:?}", name),
            Self::UndefinedResult => write!(f, "undefinedresult"),
            Self::InvalidIncrement => write!(f, "invalid increment in for"),
        }
    }
}

impl std::error::Error for PostScriptError {}
