mod eval;
mod result;
mod roller;

pub use result::DiceRoll;
pub use roller::Roller;

#[cfg(test)]
pub(crate) use roller::StepRoller;

use crate::common::Int;
use crate::error::InvalidExpression;
use crate::parse::{self, ParsedExpression, RollOption};

/// RNG used when the caller does not supply one.
pub type DefaultRng = rand::prelude::ThreadRng;

/// Rolls dice expressions with a caller-supplied source of randomness.
///
/// Holds no state besides the roller itself; every call is independent.
pub struct DiceRoller<R = DefaultRng> {
    roller: R,
}

impl DiceRoller<DefaultRng> {
    /// A roller backed by the thread-local RNG.
    pub fn new() -> Self {
        Self {
            roller: rand::thread_rng(),
        }
    }
}

impl Default for DiceRoller<DefaultRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Roller> DiceRoller<R> {
    /// Use `roller` as the source of die results. Tests and replays hand
    /// in a seeded or scripted roller here.
    pub fn with_roller(roller: R) -> Self {
        Self { roller }
    }

    /// Roll a simple-grammar expression like `2d6+3`.
    pub fn roll(&mut self, expression: &str) -> Result<DiceRoll, InvalidExpression> {
        let parsed = parse::parse_simple(expression)?;
        Ok(eval::evaluate_simple(expression, &parsed, &mut self.roller))
    }

    /// Roll an advanced-grammar expression like `4d6k3` or `1d20a+5`.
    pub fn roll_advanced(&mut self, expression: &str) -> Result<DiceRoll, InvalidExpression> {
        let parsed = parse::parse_advanced(expression)?;
        Ok(eval::evaluate_advanced(expression, &parsed, &mut self.roller))
    }

    /// Roll `1d20` with advantage and a flat modifier.
    pub fn roll_advantage(&mut self, modifier: Int) -> DiceRoll {
        self.roll_d20_with(RollOption::Advantage, modifier)
    }

    /// Roll `1d20` with disadvantage and a flat modifier.
    pub fn roll_disadvantage(&mut self, modifier: Int) -> DiceRoll {
        self.roll_d20_with(RollOption::Disadvantage, modifier)
    }

    fn roll_d20_with(&mut self, option: RollOption, modifier: Int) -> DiceRoll {
        let expression = format!("1d20{}{:+}", option, modifier);
        let parsed = ParsedExpression::new(1, 20)
            .with_options(vec![option])
            .with_modifier(modifier);
        eval::evaluate_advanced(&expression, &parsed, &mut self.roller)
    }

    /// Evaluate an already-parsed expression through the simple-grammar
    /// path; used where the expression is built by the engine itself and
    /// cannot be invalid.
    pub(crate) fn roll_parsed_simple(
        &mut self,
        expression: &str,
        parsed: &ParsedExpression,
    ) -> DiceRoll {
        eval::evaluate_simple(expression, parsed, &mut self.roller)
    }
}
