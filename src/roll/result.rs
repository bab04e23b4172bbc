use crate::common::{Int, NonEmpty, UInt};
use std::fmt;

/// The outcome of one dice roll. Constructed once per roll, never mutated
/// by the engine; the contextual dispatcher may relabel `expression`
/// before handing the result back.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DiceRoll {
    /// The expression as evaluated.
    pub expression: String,
    /// Die values contributing to the total, after option transforms.
    pub rolls: NonEmpty<UInt>,
    /// Sum of `rolls` plus the signed modifier.
    pub total: Int,
    /// Human-readable trace of how the total came about.
    pub breakdown: String,
}

impl DiceRoll {
    pub(crate) fn new(
        expression: impl Into<String>,
        rolls: NonEmpty<UInt>,
        total: Int,
        breakdown: String,
    ) -> Self {
        Self {
            expression: expression.into(),
            rolls,
            total,
            breakdown,
        }
    }
}

impl fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rolls = self
            .rolls
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{} = {} [{}]", self.expression, self.total, rolls)
    }
}
