use crate::roll::{DiceRoll, DiceRoller, Roller};
use std::collections::HashSet;
use tracing::debug;

/// Characters that can appear anywhere in a dice expression.
fn is_expression_char(c: char) -> bool {
    matches!(c, '0'..='9' | 'a' | 'd' | 'k' | 'x' | 'r' | '!' | '+' | '-')
}

impl<R: Roller> DiceRoller<R> {
    /// Find dice-looking substrings in free text and roll every one that
    /// parses, skipping the rest.
    ///
    /// Candidates are maximal runs of expression characters, deduplicated
    /// and ordered longest first.
    pub fn parse_dice_in_text(&mut self, text: &str) -> Vec<DiceRoll> {
        let mut seen = HashSet::new();
        let mut candidates: Vec<&str> = text
            .split(|c| !is_expression_char(c))
            .filter(|candidate| {
                candidate.contains('d')
                    && candidate.chars().any(|c| c.is_ascii_digit())
                    && seen.insert(*candidate)
            })
            .collect();
        candidates.sort_by_key(|candidate| std::cmp::Reverse(candidate.len()));

        let mut results = Vec::new();
        for candidate in candidates {
            match self.roll_advanced(candidate) {
                Ok(result) => results.push(result),
                Err(_) => match self.roll(candidate) {
                    Ok(result) => results.push(result),
                    Err(err) => {
                        debug!("skipping non-dice candidate {:?}: {}", candidate, err);
                    }
                },
            }
        }
        results
    }
}
