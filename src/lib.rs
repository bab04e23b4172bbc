//! Dice-expression engine for tabletop chat assistants.
//!
//! Parses the common `NdS±M` notation plus an advanced option grammar
//! (advantage/disadvantage, keep-highest/lowest, exploding dice, rerolls),
//! rolls with any [`rand::Rng`], and resolves contextual inputs like
//! `"strength check"` or bare modifiers onto concrete d20 rolls.

mod common;
mod context;
mod error;
mod parse;
mod roll;
mod scan;

pub use common::{Int, NonEmpty, UInt, MAX_DICE, MAX_EXPLOSIONS, MAX_SIDES};
pub use context::AbilityProvider;
pub use error::InvalidExpression;
pub use parse::{parse_advanced, parse_simple, ParsedExpression, RollOption};
pub use roll::{DefaultRng, DiceRoll, DiceRoller, Roller};

/// Roll a simple-grammar expression like `2d6+3` with a thread-local RNG.
pub fn roll(expression: &str) -> Result<DiceRoll, InvalidExpression> {
    DiceRoller::new().roll(expression)
}

/// Roll an advanced-grammar expression like `4d6k3` with a thread-local RNG.
pub fn roll_advanced(expression: &str) -> Result<DiceRoll, InvalidExpression> {
    DiceRoller::new().roll_advanced(expression)
}

/// Best-effort contextual roll; always produces a result.
pub fn roll_with_context(input: &str, actor: Option<&dyn AbilityProvider>) -> DiceRoll {
    DiceRoller::new().roll_with_context(input, actor)
}

/// Roll every dice expression found in `text`.
pub fn parse_dice_in_text(text: &str) -> Vec<DiceRoll> {
    DiceRoller::new().parse_dice_in_text(text)
}
