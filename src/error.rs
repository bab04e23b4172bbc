use crate::common::UInt;

/// Returned when an expression matches neither grammar, or when its dice
/// parameters fall outside the allowed ranges.
#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
pub enum InvalidExpression {
    #[error("invalid dice expression: {0:?}")]
    Unrecognized(String),
    #[error("invalid dice parameters: {count}d{sides}")]
    InvalidParameters { count: UInt, sides: UInt },
    #[error("too many dice: {0} (max 100)")]
    TooManyDice(UInt),
    #[error("too many sides: {0} (max 1000)")]
    TooManySides(UInt),
}
