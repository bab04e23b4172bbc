use super::result::DiceRoll;
use super::roller::Roller;
use crate::common::{Int, NonEmpty, UInt, MAX_EXPLOSIONS};
use crate::parse::{ParsedExpression, RollOption};

/// Option flags folded out of a parsed expression. For a value-carrying
/// tag written more than once, the last occurrence wins.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
struct OptionSet {
    advantage: bool,
    disadvantage: bool,
    keep_highest: Option<UInt>,
    keep_lowest: Option<UInt>,
    exploding: bool,
    reroll_at_or_below: Option<UInt>,
}

impl OptionSet {
    fn from_options(options: &[RollOption]) -> Self {
        let mut set = Self::default();
        for &opt in options {
            match opt {
                RollOption::Advantage => set.advantage = true,
                RollOption::Disadvantage => set.disadvantage = true,
                RollOption::KeepHighest(n) => set.keep_highest = Some(n),
                RollOption::KeepLowest(n) => set.keep_lowest = Some(n),
                RollOption::Exploding => set.exploding = true,
                RollOption::RerollAtOrBelow(n) => set.reroll_at_or_below = Some(n),
            }
        }
        set
    }
}

/// Roll a validated simple-grammar expression: one set of dice plus the
/// signed modifier, with a `"{sum} + {m}"` style breakdown.
pub(crate) fn evaluate_simple<R: Roller>(
    expression: &str,
    parsed: &ParsedExpression,
    roller: &mut R,
) -> DiceRoll {
    let rolls = roller.roll_dice(parsed.count, parsed.sides);
    let dice_sum: Int = rolls.iter().map(|&x| x as Int).sum();
    let total = dice_sum + parsed.modifier;

    let breakdown = if parsed.modifier == 0 {
        dice_sum.to_string()
    } else if parsed.modifier > 0 {
        format!("{} + {}", dice_sum, parsed.modifier)
    } else {
        format!("{} - {}", dice_sum, parsed.modifier.abs())
    };

    DiceRoll::new(expression, into_kept(rolls), total, breakdown)
}

/// Roll a validated advanced-grammar expression.
///
/// Transforms apply in a fixed order regardless of how the tags were
/// written: advantage/disadvantage first (and then nothing else),
/// otherwise exploding, reroll, keep-highest, keep-lowest, and finally
/// the modifier.
pub(crate) fn evaluate_advanced<R: Roller>(
    expression: &str,
    parsed: &ParsedExpression,
    roller: &mut R,
) -> DiceRoll {
    let opts = OptionSet::from_options(&parsed.options);

    let (rolls, mut breakdown) = if opts.advantage || opts.disadvantage {
        // advantage wins when both flags are present
        roll_twice(parsed, opts.advantage, roller)
    } else {
        roll_with_transforms(parsed, &opts, roller)
    };

    let kept_sum: Int = rolls.iter().map(|&x| x as Int).sum();
    let total = kept_sum + parsed.modifier;
    if parsed.modifier != 0 {
        let sign = if parsed.modifier > 0 { '+' } else { '-' };
        breakdown.push_str(&format!(" {} {}", sign, parsed.modifier.abs()));
    }

    DiceRoll::new(expression, into_kept(rolls), total, breakdown)
}

/// Roll the whole set twice and keep one set by sum; ties keep the second.
fn roll_twice<R: Roller>(
    parsed: &ParsedExpression,
    advantage: bool,
    roller: &mut R,
) -> (Vec<UInt>, String) {
    let first = roller.roll_dice(parsed.count, parsed.sides);
    let second = roller.roll_dice(parsed.count, parsed.sides);
    let first_sum: UInt = first.iter().sum();
    let second_sum: UInt = second.iter().sum();

    if advantage {
        let rolls = if first_sum > second_sum { first } else { second };
        (rolls, format!("Advantage: {} vs {}", first_sum, second_sum))
    } else {
        let rolls = if first_sum < second_sum { first } else { second };
        (rolls, format!("Disadvantage: {} vs {}", first_sum, second_sum))
    }
}

fn roll_with_transforms<R: Roller>(
    parsed: &ParsedExpression,
    opts: &OptionSet,
    roller: &mut R,
) -> (Vec<UInt>, String) {
    let (mut rolls, mut breakdown) = if opts.exploding {
        let rolls = roll_exploding(parsed.count, parsed.sides, roller);
        let breakdown = format!("Exploding: {:?}", rolls);
        (rolls, breakdown)
    } else {
        let rolls = roller.roll_dice(parsed.count, parsed.sides);
        let breakdown = format!("Rolls: {:?}", rolls);
        (rolls, breakdown)
    };

    if let Some(threshold) = opts.reroll_at_or_below {
        for value in rolls.iter_mut() {
            if *value <= threshold {
                *value = roller.roll_die(parsed.sides);
            }
        }
        breakdown.push_str(&format!(" (Rerolls: {}+)", threshold));
    }

    if let Some(n) = opts.keep_highest {
        if (n as usize) < rolls.len() {
            rolls.sort_unstable_by(|a, b| b.cmp(a));
            rolls.truncate(n as usize);
            breakdown.push_str(&format!(" (Keep highest {})", n));
        }
    }

    if let Some(n) = opts.keep_lowest {
        if (n as usize) < rolls.len() {
            rolls.sort_unstable();
            rolls.truncate(n as usize);
            breakdown.push_str(&format!(" (Keep lowest {})", n));
        }
    }

    (rolls, breakdown)
}

/// Each die rerolls-and-appends while it shows its maximum face, up to
/// [`MAX_EXPLOSIONS`] extra rolls per die.
fn roll_exploding<R: Roller>(count: UInt, sides: UInt, roller: &mut R) -> Vec<UInt> {
    let mut rolls = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let mut value = roller.roll_die(sides);
        rolls.push(value);
        let mut chain = 0;
        while value == sides && chain < MAX_EXPLOSIONS {
            value = roller.roll_die(sides);
            rolls.push(value);
            chain += 1;
        }
    }
    rolls
}

fn into_kept(rolls: Vec<UInt>) -> NonEmpty<UInt> {
    // count >= 1, and keep transforms never truncate below one die
    NonEmpty::try_from_vec(rolls).expect("roll set is never empty")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::vec1;
    use crate::test_utils::step_roller;

    fn simple(expression: &str, parsed: ParsedExpression, initial: UInt, step: UInt) -> DiceRoll {
        evaluate_simple(expression, &parsed, &mut step_roller(initial, step))
    }

    fn advanced(expression: &str, parsed: ParsedExpression, initial: UInt, step: UInt) -> DiceRoll {
        evaluate_advanced(expression, &parsed, &mut step_roller(initial, step))
    }

    #[test]
    fn test_simple_with_modifier() {
        let roll = simple("1d20+5", ParsedExpression::new(1, 20).with_modifier(5), 15, 0);
        assert_eq!(roll.rolls, vec1![15]);
        assert_eq!(roll.total, 20);
        assert_eq!(roll.breakdown, "15 + 5");
    }

    #[test]
    fn test_simple_negative_modifier() {
        let roll = simple("1d20-2", ParsedExpression::new(1, 20).with_modifier(-2), 15, 0);
        assert_eq!(roll.total, 13);
        assert_eq!(roll.breakdown, "15 - 2");
    }

    #[test]
    fn test_simple_without_modifier() {
        let roll = simple("3d6", ParsedExpression::new(3, 6), 1, 1);
        assert_eq!(roll.rolls, vec1![1, 2, 3]);
        assert_eq!(roll.total, 6);
        assert_eq!(roll.breakdown, "6");
    }

    #[test]
    fn test_advantage_keeps_higher_set() {
        let parsed = ParsedExpression::new(2, 20).with_options(vec![RollOption::Advantage]);
        let roll = advanced("2d20a", parsed, 1, 1);
        // first set [1, 2], second set [3, 4]
        assert_eq!(roll.rolls, vec1![3, 4]);
        assert_eq!(roll.total, 7);
        assert_eq!(roll.breakdown, "Advantage: 3 vs 7");
    }

    #[test]
    fn test_disadvantage_keeps_lower_set() {
        let parsed = ParsedExpression::new(2, 20).with_options(vec![RollOption::Disadvantage]);
        let roll = advanced("2d20d", parsed, 1, 1);
        assert_eq!(roll.rolls, vec1![1, 2]);
        assert_eq!(roll.total, 3);
        assert_eq!(roll.breakdown, "Disadvantage: 3 vs 7");
    }

    #[test]
    fn test_advantage_tie_keeps_second_set() {
        let parsed = ParsedExpression::new(1, 20).with_options(vec![RollOption::Advantage]);
        let roll = advanced("1d20a", parsed, 5, 0);
        assert_eq!(roll.breakdown, "Advantage: 5 vs 5");
        assert_eq!(roll.total, 5);
    }

    #[test]
    fn test_advantage_wins_over_disadvantage() {
        let parsed = ParsedExpression::new(1, 20)
            .with_options(vec![RollOption::Advantage, RollOption::Disadvantage]);
        let roll = advanced("1d20ad", parsed, 1, 1);
        assert_eq!(roll.breakdown, "Advantage: 1 vs 2");
        assert_eq!(roll.rolls, vec1![2]);
    }

    #[test]
    fn test_advantage_with_modifier() {
        let parsed = ParsedExpression::new(1, 20)
            .with_options(vec![RollOption::Advantage])
            .with_modifier(5);
        let roll = advanced("1d20a+5", parsed, 1, 1);
        assert_eq!(roll.breakdown, "Advantage: 1 vs 2 + 5");
        assert_eq!(roll.total, 7);
    }

    #[test]
    fn test_keep_highest() {
        let parsed = ParsedExpression::new(4, 6).with_options(vec![RollOption::KeepHighest(3)]);
        let roll = advanced("4d6k3", parsed, 1, 1);
        assert_eq!(roll.rolls, vec1![4, 3, 2]);
        assert_eq!(roll.total, 9);
        assert_eq!(roll.breakdown, "Rolls: [1, 2, 3, 4] (Keep highest 3)");
    }

    #[test]
    fn test_keep_lowest() {
        let parsed = ParsedExpression::new(2, 6).with_options(vec![RollOption::KeepLowest(1)]);
        let roll = advanced("2d6x1", parsed, 4, 2);
        assert_eq!(roll.rolls, vec1![4]);
        assert_eq!(roll.total, 4);
        assert_eq!(roll.breakdown, "Rolls: [4, 6] (Keep lowest 1)");
    }

    #[test]
    fn test_keep_count_or_more_is_a_no_op() {
        let parsed = ParsedExpression::new(3, 6).with_options(vec![RollOption::KeepHighest(3)]);
        let roll = advanced("3d6k3", parsed, 1, 1);
        assert_eq!(roll.rolls, vec1![1, 2, 3]);
        assert_eq!(roll.breakdown, "Rolls: [1, 2, 3]");
    }

    #[test]
    fn test_keep_highest_then_lowest() {
        let parsed = ParsedExpression::new(4, 6)
            .with_options(vec![RollOption::KeepHighest(3), RollOption::KeepLowest(2)]);
        let roll = advanced("4d6k3x2", parsed, 1, 1);
        // [1, 2, 3, 4] -> highest 3 [4, 3, 2] -> lowest 2 of those [2, 3]
        assert_eq!(roll.rolls, vec1![2, 3]);
        assert_eq!(roll.total, 5);
        assert_eq!(
            roll.breakdown,
            "Rolls: [1, 2, 3, 4] (Keep highest 3) (Keep lowest 2)"
        );
    }

    #[test]
    fn test_exploding_appends_chain() {
        // second die lands on 6 and explodes into a 1
        let parsed = ParsedExpression::new(2, 6).with_options(vec![RollOption::Exploding]);
        let roll = advanced("2d6!", parsed, 5, 1);
        assert_eq!(roll.rolls, vec1![5, 6, 1]);
        assert_eq!(roll.total, 12);
        assert_eq!(roll.breakdown, "Exploding: [5, 6, 1]");
    }

    #[test]
    fn test_exploding_one_sided_die_terminates() {
        let parsed = ParsedExpression::new(1, 1).with_options(vec![RollOption::Exploding]);
        let roll = advanced("1d1!", parsed, 1, 0);
        // every roll shows the maximum face; the chain stops at the cap
        assert_eq!(roll.rolls.len(), 1 + MAX_EXPLOSIONS);
        assert_eq!(roll.total, (1 + MAX_EXPLOSIONS) as Int);
    }

    #[test]
    fn test_reroll_replaces_low_dice() {
        let parsed =
            ParsedExpression::new(4, 6).with_options(vec![RollOption::RerollAtOrBelow(2)]);
        let roll = advanced("4d6r2", parsed, 1, 1);
        // [1, 2, 3, 4] -> the 1 and 2 reroll into 5 and 6
        assert_eq!(roll.rolls, vec1![5, 6, 3, 4]);
        assert_eq!(roll.breakdown, "Rolls: [1, 2, 3, 4] (Rerolls: 2+)");
    }

    #[test]
    fn test_last_duplicate_option_wins() {
        let parsed = ParsedExpression::new(4, 6)
            .with_options(vec![RollOption::KeepHighest(1), RollOption::KeepHighest(3)]);
        let roll = advanced("4d6k1k3", parsed, 1, 1);
        assert_eq!(roll.rolls.len(), 3);
    }
}
