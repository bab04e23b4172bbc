use crate::common::UInt;
use rand::Rng;

/// Source of individual die results.
pub trait Roller {
    /// Draw one value uniformly from `[1, sides]`.
    fn roll_die(&mut self, sides: UInt) -> UInt;

    /// Draw `count` independent values uniformly from `[1, sides]`.
    fn roll_dice(&mut self, count: UInt, sides: UInt) -> Vec<UInt> {
        (0..count).map(|_| self.roll_die(sides)).collect()
    }
}

impl<R: Rng> Roller for R {
    fn roll_die(&mut self, sides: UInt) -> UInt {
        self.gen_range(1..=sides)
    }
}

#[cfg(test)]
pub(crate) use step::StepRoller;
