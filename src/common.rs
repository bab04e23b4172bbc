pub use vec1::vec1;

pub type Int = i32;
pub type UInt = u32;
pub type NonZeroUInt = std::num::NonZeroU32;

pub type NonEmpty<T> = vec1::Vec1<T>;

/// Most dice a single expression may roll.
pub const MAX_DICE: UInt = 100;

/// Most faces a single die may have.
pub const MAX_SIDES: UInt = 1000;

/// Extra rolls one exploding die may accumulate before its chain is cut
/// off, so a `1d1!` cannot spin forever.
pub const MAX_EXPLOSIONS: usize = 1000;
