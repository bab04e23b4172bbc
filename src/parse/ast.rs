use crate::common::{Int, UInt};
use std::fmt::{self, Write};

/// One option tag from the advanced grammar, in source order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum RollOption {
    /// Roll the whole set twice, keep the higher sum.
    Advantage,
    /// Roll the whole set twice, keep the lower sum.
    Disadvantage,
    /// Keep only the highest `n` dice.
    KeepHighest(UInt),
    /// Keep only the lowest `n` dice.
    KeepLowest(UInt),
    /// Reroll-and-append whenever a die lands on its maximum face.
    Exploding,
    /// Reroll each die at or below the threshold, once.
    RerollAtOrBelow(UInt),
}

impl fmt::Display for RollOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Advantage => f.write_char('a'),
            Self::Disadvantage => f.write_char('d'),
            Self::KeepHighest(n) => write!(f, "k{}", n),
            Self::KeepLowest(n) => write!(f, "x{}", n),
            Self::Exploding => f.write_char('!'),
            Self::RerollAtOrBelow(n) => write!(f, "r{}", n),
        }
    }
}

/// A dice expression that passed validation and is ready to roll.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ParsedExpression {
    pub count: UInt,
    pub sides: UInt,
    pub options: Vec<RollOption>,
    pub modifier: Int,
}

impl ParsedExpression {
    pub const fn new(count: UInt, sides: UInt) -> Self {
        Self {
            count,
            sides,
            options: Vec::new(),
            modifier: 0,
        }
    }

    pub fn with_options(mut self, options: Vec<RollOption>) -> Self {
        self.options = options;
        self
    }

    pub fn with_modifier(mut self, modifier: Int) -> Self {
        self.modifier = modifier;
        self
    }
}

impl fmt::Display for ParsedExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;
        for opt in &self.options {
            write!(f, "{}", opt)?;
        }
        if self.modifier != 0 {
            write!(f, "{:+}", self.modifier)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_roundtrip() {
        let parsed = ParsedExpression::new(4, 6)
            .with_options(vec![RollOption::KeepHighest(3), RollOption::Exploding])
            .with_modifier(-2);
        assert_eq!(parsed.to_string(), "4d6k3!-2");

        assert_eq!(ParsedExpression::new(1, 20).to_string(), "1d20");
        assert_eq!(
            ParsedExpression::new(1, 20)
                .with_options(vec![RollOption::Advantage])
                .with_modifier(5)
                .to_string(),
            "1d20a+5"
        );
    }
}
