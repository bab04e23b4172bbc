use crate::common::Int;
use crate::parse::ParsedExpression;
use crate::roll::{DiceRoll, DiceRoller, Roller};
use tracing::debug;

/// Character capability consumed by contextual rolls. Owned by the
/// character subsystem; the dice engine only reads from it.
pub trait AbilityProvider {
    /// Modifier for an ability score, e.g. `strength`.
    fn ability_modifier(&self, name: &str) -> Int;

    /// Total bonus for a skill, e.g. `athletics` or `animal handling`.
    fn skill_bonus(&self, name: &str) -> Int;
}

/// Ability names recognized in `<ability> check` inputs.
const ABILITIES: [&str; 6] = [
    "strength",
    "dexterity",
    "constitution",
    "intelligence",
    "wisdom",
    "charisma",
];

impl<R: Roller> DiceRoller<R> {
    /// Best-effort roll for chat input.
    ///
    /// Resolves ability and skill checks against `actor`, treats bare
    /// modifiers as a d20 shorthand, then tries the advanced and simple
    /// grammars, and finally falls back to a plain `1d20` rather than
    /// surfacing an error to the end user.
    pub fn roll_with_context(
        &mut self,
        input: &str,
        actor: Option<&dyn AbilityProvider>,
    ) -> DiceRoll {
        let trimmed = input.trim();
        let lowered = trimmed.to_lowercase();
        let words: Vec<&str> = lowered.split_whitespace().collect();

        if let Some(actor) = actor {
            match words.as_slice() {
                [ability, "check", ..] if ABILITIES.contains(ability) => {
                    let modifier = actor.ability_modifier(ability);
                    let expression = format!("1d20{:+}", modifier);
                    let parsed = ParsedExpression::new(1, 20).with_modifier(modifier);
                    let mut result = self.roll_parsed_simple(&expression, &parsed);
                    result.expression =
                        format!("{} check ({})", ability.to_uppercase(), expression);
                    return result;
                }
                // a two-word skill name wins over a one-word one
                [first, second, "skill", ..] => {
                    let name = format!("{} {}", first, second);
                    return self.skill_check(&name, actor);
                }
                [skill, "skill", ..] => {
                    return self.skill_check(skill, actor);
                }
                _ => {}
            }
        }

        let expression = if lowered.contains('d') {
            trimmed.to_string()
        } else {
            // modifier-only shorthand for a d20 roll
            match lowered.parse::<Int>() {
                Ok(modifier) => format!("1d20{:+}", modifier),
                Err(_) => "1d20".to_string(),
            }
        };

        match self.roll_advanced(&expression) {
            Ok(result) => result,
            Err(_) => match self.roll(&expression) {
                Ok(result) => result,
                Err(err) => {
                    debug!("no grammar matched {:?} ({}), rolling plain 1d20", expression, err);
                    self.roll_parsed_simple("1d20", &ParsedExpression::new(1, 20))
                }
            },
        }
    }

    fn skill_check(&mut self, skill: &str, actor: &dyn AbilityProvider) -> DiceRoll {
        let bonus = actor.skill_bonus(skill);
        let expression = format!("1d20{:+}", bonus);
        let parsed = ParsedExpression::new(1, 20).with_modifier(bonus);
        let mut result = self.roll_parsed_simple(&expression, &parsed);
        result.expression = format!("{} check ({})", title_case(skill), expression);
        result
    }
}

fn title_case(words: &str) -> String {
    words
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
