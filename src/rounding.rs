//! IEEE 754-2008 rounding-direction attributes.
//!
//! Binary rounding decisions are made from the guard, round, and
//! sticky bits of a truncated significand:
//!
//! ```text
//!  significand   discarded
//! +-----------+ +---------+
//!  ....      G   R SSSS...
//! ```
//!
//! `G` is the least significant retained bit, `R` is the first
//! discarded bit, and `S` is the bitwise OR of every bit below `R`.

use core::sync::atomic::{AtomicU8, Ordering};

use bigdecimal::{BigDecimal, RoundingMode};

/// An IEEE 754-2008 rounding-direction attribute.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum Rounding {
    /// IEEE 754-2008 roundTiesToEven.
    ///
    /// Rounds to the nearest value. If the number falls midway, it
    /// is rounded to the nearest even value.
    #[default]
    TiesToEven = 0,
    /// IEEE 754-2008 roundTiesToAway.
    ///
    /// Rounds to the nearest value. If the number falls midway, it
    /// is rounded away from zero.
    TiesToAway = 1,
    /// IEEE 754-2008 roundTowardZero.
    ///
    /// AKA truncation.
    TowardZero = 2,
    /// IEEE 754-2008 roundTowardPositive.
    ///
    /// AKA ceiling.
    TowardPositive = 3,
    /// IEEE 754-2008 roundTowardNegative.
    ///
    /// AKA floor.
    TowardNegative = 4,
}

impl Rounding {
    /// Reports whether a truncated binary significand must be
    /// incremented by one unit in the last place.
    ///
    /// `negative` is the sign bit, `guard` is the least significant
    /// retained bit, `round` is the first discarded bit, and
    /// `sticky` is the bitwise OR of all following bits.
    pub const fn round_binary(self, negative: bool, guard: bool, round: bool, sticky: bool) -> bool {
        match self {
            // Exactly 0.5 rounds to the nearest even.
            Self::TiesToEven => (guard && round) || (round && sticky),
            // Exactly 0.5 rounds away from zero.
            Self::TiesToAway => round,
            Self::TowardZero => false,
            Self::TowardPositive => !negative && (round || sticky),
            Self::TowardNegative => negative && (round || sticky),
        }
    }

    /// Rounds `value` to an integer (scale zero).
    pub fn round_decimal(self, value: &BigDecimal) -> BigDecimal {
        value.with_scale_round(0, self.decimal_mode())
    }

    const fn decimal_mode(self) -> RoundingMode {
        match self {
            Self::TiesToEven => RoundingMode::HalfEven,
            Self::TiesToAway => RoundingMode::HalfUp,
            Self::TowardZero => RoundingMode::Down,
            Self::TowardPositive => RoundingMode::Ceiling,
            Self::TowardNegative => RoundingMode::Floor,
        }
    }

    const fn from_u8(v: u8) -> Self {
        match v {
            1 => Self::TiesToAway,
            2 => Self::TowardZero,
            3 => Self::TowardPositive,
            4 => Self::TowardNegative,
            _ => Self::TiesToEven,
        }
    }
}

static DEFAULT_ROUNDING: AtomicU8 = AtomicU8::new(Rounding::TiesToEven as u8);

/// Returns the process-wide default rounding mode.
///
/// Encoders consult the default at encode time, not at codec
/// construction time.
pub fn default_rounding() -> Rounding {
    // Reads and writes only need to be atomic with respect to each
    // other; no further ordering is required.
    Rounding::from_u8(DEFAULT_ROUNDING.load(Ordering::Relaxed))
}

/// Sets the process-wide default rounding mode.
pub fn set_default_rounding(mode: Rounding) {
    DEFAULT_ROUNDING.store(mode as u8, Ordering::Relaxed);
}
