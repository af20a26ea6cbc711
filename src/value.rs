use core::{cmp::Ordering, fmt, ops::Neg};

use bigdecimal::BigDecimal;
use num_traits::{Signed, ToPrimitive, Zero};

use crate::error::Error;

/// The sign of a floating point value.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Sign {
    /// A positive value, signum `+1`.
    Positive,
    /// A negative value, signum `-1`.
    Negative,
}

impl Sign {
    /// Returns `+1` or `-1`.
    pub const fn signum(self) -> i32 {
        match self {
            Self::Positive => 1,
            Self::Negative => -1,
        }
    }

    /// Converts a signum into a `Sign`.
    ///
    /// Anything other than `+1` or `-1` is rejected.
    pub const fn from_signum(signum: i32) -> Result<Self, Error> {
        match signum {
            1 => Ok(Self::Positive),
            -1 => Ok(Self::Negative),
            _ => Err(Error::invalid_sign("signum must be +1 or -1")),
        }
    }

    /// Reports whether the sign is negative.
    pub const fn is_negative(self) -> bool {
        matches!(self, Self::Negative)
    }
}

impl Neg for Sign {
    type Output = Self;

    fn neg(self) -> Self {
        match self {
            Self::Positive => Self::Negative,
            Self::Negative => Self::Positive,
        }
    }
}

/// The category of a floating point value.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Category {
    /// A finite number, including signed zeros and subnormals.
    Finite,
    /// A signed infinity.
    Infinite,
    /// A quiet ("non-trapping") NaN.
    QuietNan,
    /// A signaling NaN.
    SignalingNan,
}

#[derive(Clone, Debug)]
pub(crate) enum Kind {
    Finite(BigDecimal),
    Infinite,
    QuietNan,
    SignalingNan,
}

/// An abstract IEEE 754-2008 floating point value.
///
/// A value is a sign plus either an arbitrary-precision decimal
/// magnitude or a special category (infinity, quiet NaN, signaling
/// NaN). Values are immutable once constructed.
///
/// Finite values are constructed through a codec (for example
/// [`BinaryCodec::value`][crate::binary::BinaryCodec::value]), which
/// applies that format's overflow-to-infinity convention. Special
/// values do not depend on a format and can be built directly.
#[derive(Clone, Debug)]
pub struct Value {
    sign: Sign,
    kind: Kind,
}

impl Value {
    /// Creates a special (non-finite) value.
    ///
    /// Returns [`CategoryMismatch`][crate::ErrorKind::CategoryMismatch]
    /// if `category` is [`Category::Finite`]; finite values carry a
    /// magnitude and are constructed through a codec.
    pub fn special(sign: Sign, category: Category) -> Result<Self, Error> {
        let kind = match category {
            Category::Finite => {
                return Err(Error::category_mismatch(
                    "finite values are constructed from a magnitude",
                ))
            }
            Category::Infinite => Kind::Infinite,
            Category::QuietNan => Kind::QuietNan,
            Category::SignalingNan => Kind::SignalingNan,
        };
        Ok(Self { sign, kind })
    }

    /// Creates a signed infinity.
    pub const fn infinity(sign: Sign) -> Self {
        Self {
            sign,
            kind: Kind::Infinite,
        }
    }

    /// Creates a quiet NaN.
    pub const fn quiet_nan(sign: Sign) -> Self {
        Self {
            sign,
            kind: Kind::QuietNan,
        }
    }

    /// Creates a signaling NaN.
    pub const fn signaling_nan(sign: Sign) -> Self {
        Self {
            sign,
            kind: Kind::SignalingNan,
        }
    }

    /// Creates a signed zero.
    pub fn zero(sign: Sign) -> Self {
        Self {
            sign,
            kind: Kind::Finite(BigDecimal::zero()),
        }
    }

    /// Creates a finite value without consulting any codec's
    /// maximum. Reserved for codec-internal constant derivation.
    pub(crate) fn finite_unchecked(sign: Sign, magnitude: BigDecimal) -> Self {
        debug_assert!(magnitude.is_zero() || (magnitude.is_negative() == sign.is_negative()));
        Self {
            sign,
            kind: Kind::Finite(magnitude),
        }
    }

    /// The factory rule shared by the codecs: a magnitude whose
    /// absolute value exceeds `max` becomes a signed infinity.
    /// There is no underflow coercion; magnitudes below the smallest
    /// subnormal stay finite and the encoder decides between the
    /// minimum subnormal and a signed zero.
    pub(crate) fn finite_checked(
        sign: Sign,
        magnitude: BigDecimal,
        max: &BigDecimal,
    ) -> Result<Self, Error> {
        if !magnitude.is_zero() && magnitude.is_negative() != sign.is_negative() {
            return Err(Error::invalid_sign("sign disagrees with the magnitude"));
        }
        if magnitude.abs() > *max {
            return Ok(Self::infinity(sign));
        }
        Ok(Self {
            sign,
            kind: Kind::Finite(magnitude),
        })
    }

    pub(crate) const fn kind(&self) -> &Kind {
        &self.kind
    }

    /// Returns the sign.
    pub const fn sign(&self) -> Sign {
        self.sign
    }

    /// Returns `+1` or `-1`.
    pub const fn signum(&self) -> i32 {
        self.sign.signum()
    }

    /// Returns the category.
    pub const fn category(&self) -> Category {
        match self.kind {
            Kind::Finite(_) => Category::Finite,
            Kind::Infinite => Category::Infinite,
            Kind::QuietNan => Category::QuietNan,
            Kind::SignalingNan => Category::SignalingNan,
        }
    }

    /// Returns the decimal magnitude of a finite value.
    ///
    /// The decimal carries the value's sign. Returns
    /// [`NotFinite`][crate::ErrorKind::NotFinite] for infinities and
    /// NaNs.
    pub fn magnitude(&self) -> Result<&BigDecimal, Error> {
        match &self.kind {
            Kind::Finite(d) => Ok(d),
            _ => Err(Error::not_finite("only finite values have a magnitude")),
        }
    }

    /// Reports whether the value is positive.
    pub const fn is_positive(&self) -> bool {
        !self.sign.is_negative()
    }

    /// Reports whether the value is negative.
    pub const fn is_negative(&self) -> bool {
        self.sign.is_negative()
    }

    /// Reports whether the value is finite.
    pub const fn is_finite(&self) -> bool {
        matches!(self.kind, Kind::Finite(_))
    }

    /// Reports whether the value is zero of either sign.
    pub fn is_zero(&self) -> bool {
        matches!(&self.kind, Kind::Finite(d) if d.is_zero())
    }

    /// Reports whether the value is `+0`.
    pub fn is_positive_zero(&self) -> bool {
        self.is_zero() && self.is_positive()
    }

    /// Reports whether the value is `-0`.
    pub fn is_negative_zero(&self) -> bool {
        self.is_zero() && self.is_negative()
    }

    /// Reports whether the value is a quiet or signaling NaN.
    pub const fn is_nan(&self) -> bool {
        matches!(self.kind, Kind::QuietNan | Kind::SignalingNan)
    }

    /// Reports whether the value is a quiet NaN.
    pub const fn is_quiet_nan(&self) -> bool {
        matches!(self.kind, Kind::QuietNan)
    }

    /// Reports whether the value is a signaling NaN.
    pub const fn is_signaling_nan(&self) -> bool {
        matches!(self.kind, Kind::SignalingNan)
    }

    /// Reports whether the value is an infinity of either sign.
    pub const fn is_infinity(&self) -> bool {
        matches!(self.kind, Kind::Infinite)
    }

    /// Reports whether the value is `+Infinity`.
    pub const fn is_positive_infinity(&self) -> bool {
        self.is_infinity() && self.is_positive()
    }

    /// Reports whether the value is `-Infinity`.
    pub const fn is_negative_infinity(&self) -> bool {
        self.is_infinity() && self.is_negative()
    }

    /// Converts the value to an `f64`.
    ///
    /// Infinities convert to IEEE infinities and NaNs to NaN. Finite
    /// magnitudes round to the nearest `f64`.
    pub fn to_f64(&self) -> f64 {
        match &self.kind {
            Kind::Finite(d) => d.to_f64().unwrap_or(f64::NAN),
            Kind::Infinite => {
                if self.is_negative() {
                    f64::NEG_INFINITY
                } else {
                    f64::INFINITY
                }
            }
            Kind::QuietNan | Kind::SignalingNan => f64::NAN,
        }
    }

    /// Converts the value to an `f32`.
    pub fn to_f32(&self) -> f32 {
        match &self.kind {
            Kind::Finite(d) => d.to_f32().unwrap_or(f32::NAN),
            _ => self.to_f64() as f32,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        if self.sign != other.sign {
            return false;
        }
        match (&self.kind, &other.kind) {
            (Kind::Finite(a), Kind::Finite(b)) => a == b,
            (Kind::Infinite, Kind::Infinite) => true,
            (Kind::QuietNan, Kind::QuietNan) => true,
            (Kind::SignalingNan, Kind::SignalingNan) => true,
            _ => false,
        }
    }
}

impl PartialOrd for Value {
    /// Numeric ordering: `None` when either operand is NaN,
    /// otherwise `-Infinity < finite < +Infinity`. `+0` and `-0`
    /// compare equal.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (&self.kind, &other.kind) {
            (Kind::QuietNan | Kind::SignalingNan, _) | (_, Kind::QuietNan | Kind::SignalingNan) => {
                None
            }
            (Kind::Infinite, Kind::Infinite) => Some(self.signum().cmp(&other.signum())),
            (Kind::Infinite, Kind::Finite(_)) => {
                if self.is_negative() {
                    Some(Ordering::Less)
                } else {
                    Some(Ordering::Greater)
                }
            }
            (Kind::Finite(_), Kind::Infinite) => {
                if other.is_negative() {
                    Some(Ordering::Greater)
                } else {
                    Some(Ordering::Less)
                }
            }
            (Kind::Finite(a), Kind::Finite(b)) => a.partial_cmp(b),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            Kind::Finite(d) => d.fmt(f),
            Kind::Infinite => {
                if self.is_negative() {
                    write!(f, "-Infinity")
                } else {
                    write!(f, "Infinity")
                }
            }
            Kind::QuietNan | Kind::SignalingNan => write!(f, "NaN"),
        }
    }
}
