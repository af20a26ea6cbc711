use bigdecimal::BigDecimal;
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};

use crate::{
    error::Error,
    rounding::{default_rounding, Rounding},
    util::{adjusted_exp10, low_bits_nonzero, mask, pow2_decimal, ten_pow},
    value::{Kind, Sign, Value},
};

/// A codec for an IEEE 754-2008 binary interchange format.
///
/// The codec is parameterized by the exponent width `E`, the
/// trailing-significand width `P`, and whether the leading
/// significand bit is implicit. Encoded patterns are laid out, most
/// significant bit first, as
///
/// ```text
/// [ sign (1) | biased exponent (E) | leading bit (1, explicit formats only) | trailing significand (P) ]
/// ```
///
/// All derived constants are computed in the constructor, so a codec
/// can be shared freely between threads once built.
#[derive(Clone, Debug)]
pub struct BinaryCodec {
    exponent: u32,
    significand: u32,
    implicit: bool,
    consts: Consts,
}

#[derive(Clone, Debug)]
struct Consts {
    pos_inf: BigUint,
    neg_inf: BigUint,
    max: BigDecimal,
    min_normal: BigDecimal,
    min_subnormal: BigDecimal,
    epsilon: BigDecimal,
}

// Internal stuff.
impl BinaryCodec {
    pub(crate) fn new_unchecked(exponent: u32, significand: u32, implicit: bool) -> Self {
        let off = u64::from(!implicit);
        let e = u64::from(exponent);
        let p = u64::from(significand);

        let bias = (1i64 << (exponent - 1)) - 1;
        let e_max = bias + 1;
        let e_min = 2 - bias;

        let consts = Consts {
            pos_inf: mask(e + off) << p,
            neg_inf: mask(e + off + 1) << p,
            // (2 - 2^-P) * 2^(e_max - 1)
            max: pow2_decimal(
                (BigInt::one() << (p + 1)) - 1,
                e_max - 1 - significand as i64,
            ),
            // 2^(e_min - 1)
            min_normal: pow2_decimal(BigInt::one(), e_min - 1),
            // 2^(e_min - 1 - P)
            min_subnormal: pow2_decimal(BigInt::one(), e_min - 1 - significand as i64),
            epsilon: pow2_decimal(BigInt::one(), -(significand as i64)),
        };
        Self {
            exponent,
            significand,
            implicit,
            consts,
        }
    }

    const fn offset(&self) -> u64 {
        !self.implicit as u64
    }

    const fn sign_shift(&self) -> u64 {
        self.exponent as u64 + self.significand as u64 + self.offset()
    }

    const fn max_exponent_field(&self) -> u64 {
        (1u64 << self.exponent) - 1
    }

    fn with_sign(&self, mut bits: BigUint, negative: bool) -> BigUint {
        if negative {
            bits.set_bit(self.sign_shift(), true);
        }
        bits
    }

    fn encode_finite(&self, sign: Sign, magnitude: &BigDecimal, mode: Rounding) -> BigUint {
        let negative = sign.is_negative();
        let p = self.significand as u64;
        // The full significand holds P + 1 bits: the leading bit
        // (implicit or explicit) plus the trailing field.
        let prec = p + 1;
        let bias = self.bias();
        let e_min = 2 - bias;
        let e_max = bias + 1;

        // Split |magnitude| exactly into an integer part and a
        // fraction num/den with 0 <= num < den.
        let (unscaled, scale) = magnitude.abs().as_bigint_and_exponent();
        let unscaled = unscaled.into_parts().1;
        let (mut sig, mut num, den) = if scale <= 0 {
            (
                unscaled * ten_pow(-scale as u64),
                BigUint::zero(),
                BigUint::one(),
            )
        } else {
            let den = ten_pow(scale as u64);
            let (int, num) = unscaled.div_rem(&den);
            (int, num, den)
        };

        let int_zero = sig.is_zero();
        let ilen = sig.bits();
        // Unbiased exponent of the leading bit; -1 is a placeholder
        // until the fraction's leading zeros are known.
        let mut exp = ilen as i64 - 1;
        let mut zeros: i64 = 0;
        let mut inexact = false;
        let (mut guard, mut round, mut sticky) = (false, false, false);

        if ilen > prec {
            // The integer part alone exceeds the precision.
            let drop = ilen - prec;
            guard = sig.bit(drop);
            round = sig.bit(drop - 1);
            sticky = low_bits_nonzero(&sig, drop - 1) || !num.is_zero();
            inexact = round || sticky;
            sig >>= drop;
        } else if !num.is_zero() {
            if int_zero {
                // Skip the fraction's leading zeros in one step:
                // afterwards num/den is in [1/2, 1) and the next
                // doubling produces the leading one.
                zeros = ceil_log2(&den, &num) - 1;
                if -1 - zeros < e_min - 2 - p as i64 {
                    // The leading bit lies strictly below the round
                    // position of the minimum subnormal, so it only
                    // contributes to the sticky bit.
                    return if mode.round_binary(negative, false, false, true) {
                        self.with_sign(BigUint::one(), negative)
                    } else {
                        self.zero(sign)
                    };
                }
                num <<= zeros as u64;
            }
            loop {
                num <<= 1u8;
                let bit = num >= den;
                let mut sig_len = sig.bits() as i64;
                if zeros > -e_min {
                    // Leading zeros beyond what the exponent can
                    // absorb consume significand capacity; the value
                    // is subnormal.
                    sig_len += zeros + e_min;
                }
                if sig_len > p as i64 {
                    inexact = true;
                    guard = sig.bit(0);
                    round = bit;
                    sticky = if bit { num != den } else { true };
                    break;
                }
                sig <<= 1u8;
                if bit {
                    num -= &den;
                    sig |= BigUint::one();
                }
                if num.is_zero() {
                    break;
                }
            }
        }

        if inexact && mode.round_binary(negative, guard, round, sticky) {
            let before = sig.bits();
            sig += 1u32;
            if sig.bits() > before {
                // Carry out of the significand. The pattern is now a
                // one followed by zeros, so halving is lossless and
                // the subnormal and normal paths below need no
                // special cases.
                exp += 1;
                if sig.bits() > prec {
                    sig >>= 1u8;
                }
            }
        }
        if int_zero {
            exp -= zeros;
        }
        let len = sig.bits() as i64;

        if exp >= e_max {
            // The exponent field would be all ones.
            return if negative {
                self.negative_infinity()
            } else {
                self.positive_infinity()
            };
        }
        if exp < e_min - 1 {
            // Subnormal: the exponent field is zero and the
            // significand is placed by its distance below the
            // minimum normal exponent.
            if sig.is_zero() {
                return self.zero(sign);
            }
            let shift = p as i64 + bias + exp - len;
            debug_assert!(shift >= 0);
            return self.with_sign(sig << shift as u64, negative);
        }

        // Normal.
        if self.implicit {
            sig.set_bit(len as u64 - 1, false);
        }
        let mut bits = BigUint::from((exp + bias) as u64) << (p + self.offset());
        bits |= sig << ((p as i64 - len + 1) as u64);
        if !self.implicit {
            bits.set_bit(p, true);
        }
        self.with_sign(bits, negative)
    }
}

// Public stuff.
impl BinaryCodec {
    /// Creates a new binary codec.
    ///
    /// `exponent` is the number of exponent bits (in `[1, 31]`),
    /// `significand` the number of trailing significand bits
    /// (`>= 1`), and `implicit` whether the leading significand bit
    /// of normal values is implied rather than stored.
    pub fn new(exponent: u32, significand: u32, implicit: bool) -> Result<Self, Error> {
        if exponent < 1 {
            return Err(Error::invalid_parameter("exponent size must be positive"));
        }
        if exponent > 31 {
            return Err(Error::invalid_parameter("exponent size is too big"));
        }
        if significand < 1 {
            return Err(Error::invalid_parameter(
                "significand size must be positive",
            ));
        }
        Ok(Self::new_unchecked(exponent, significand, implicit))
    }

    /// Returns the number of exponent bits.
    pub const fn exponent_bits(&self) -> u32 {
        self.exponent
    }

    /// Returns the number of trailing significand bits.
    pub const fn significand_bits(&self) -> u32 {
        self.significand
    }

    /// Reports whether the leading significand bit is implicit.
    pub const fn is_implicit(&self) -> bool {
        self.implicit
    }

    /// Returns the exponent bias, `2^(E-1) - 1`.
    pub const fn bias(&self) -> i64 {
        (1i64 << (self.exponent - 1)) - 1
    }

    /// Returns the total width of an encoded pattern in bits.
    pub const fn width(&self) -> u64 {
        self.sign_shift() + 1
    }

    /// Constructs a finite value bound to this format.
    ///
    /// A magnitude whose absolute value exceeds
    /// [`max_value`][Self::max_value] becomes a signed infinity.
    /// There is no underflow coercion: magnitudes below the smallest
    /// subnormal stay finite, and encoding decides between the
    /// minimum subnormal and a signed zero.
    ///
    /// Returns [`InvalidSign`][crate::ErrorKind::InvalidSign] if the
    /// magnitude is nonzero and its sign disagrees with `sign`.
    pub fn value(&self, sign: Sign, magnitude: BigDecimal) -> Result<Value, Error> {
        Value::finite_checked(sign, magnitude, &self.consts.max)
    }

    /// Returns the largest finite value, `(2 - 2^-P) * 2^(e_max - 1)`.
    pub fn max_value(&self) -> &BigDecimal {
        &self.consts.max
    }

    /// Returns the smallest positive normal value, `2^(e_min - 1)`.
    pub fn min_value(&self) -> &BigDecimal {
        &self.consts.min_normal
    }

    /// Returns the smallest positive subnormal value,
    /// `2^(e_min - 1 - P)`.
    pub fn min_subnormal_value(&self) -> &BigDecimal {
        &self.consts.min_subnormal
    }

    /// Returns the difference between 1 and the smallest
    /// representable value greater than 1, `2^-P`.
    pub fn epsilon(&self) -> &BigDecimal {
        &self.consts.epsilon
    }

    /// Returns the smallest and largest unbiased exponents,
    /// `(2 - bias, bias + 1)`.
    pub const fn exponent_range(&self) -> (i64, i64) {
        (2 - self.bias(), self.bias() + 1)
    }

    /// Returns the smallest and largest base-10 exponents such that
    /// 10 raised to the exponent is a finite normal value.
    pub fn exponent10_range(&self) -> (i64, i64) {
        (
            adjusted_exp10(&self.consts.min_normal),
            adjusted_exp10(&self.consts.max),
        )
    }

    /// Returns the number of decimal digits that survive a round
    /// trip through this format, `floor((P - 1 + offset) * log10 2)`.
    pub const fn decimal_digits(&self) -> u32 {
        // log10(2) to twenty digits, truncated. The product fits in
        // a u128 with room to spare.
        const LOG10_2_NUM: u128 = 30_102_999_566_398_119_521;
        const LOG10_2_DEN: u128 = 100_000_000_000_000_000_000;

        let n = (self.significand as u64 - 1 + self.offset()) as u128;
        ((n * LOG10_2_NUM) / LOG10_2_DEN) as u32
    }

    /// Returns the biased exponent field of `bits`.
    pub fn exponent_of(&self, bits: &BigUint) -> u64 {
        let e = (bits >> (self.significand as u64 + self.offset())) & mask(self.exponent as u64);
        e.to_u64().unwrap_or(0)
    }

    /// Returns the unbiased exponent of `bits`.
    pub fn unbiased_exponent_of(&self, bits: &BigUint) -> i64 {
        self.exponent_of(bits) as i64 - self.bias()
    }

    /// Returns the trailing significand field of `bits`, excluding
    /// the explicit leading bit if the format stores one.
    pub fn significand_of(&self, bits: &BigUint) -> BigUint {
        bits & &mask(self.significand as u64)
    }

    /// Returns the significand field of `bits`, including the
    /// explicit leading bit if the format stores one.
    pub fn full_significand_of(&self, bits: &BigUint) -> BigUint {
        bits & &mask(self.significand as u64 + self.offset())
    }

    /// Reports whether the pattern's sign bit is clear.
    pub fn is_positive(&self, bits: &BigUint) -> bool {
        !self.is_negative(bits)
    }

    /// Reports whether the pattern's sign bit is set.
    pub fn is_negative(&self, bits: &BigUint) -> bool {
        bits.bit(self.sign_shift())
    }

    /// Reports whether `bits` encodes an infinity of either sign.
    pub fn is_infinity(&self, bits: &BigUint) -> bool {
        self.exponent_of(bits) == self.max_exponent_field()
            && self.significand_of(bits).is_zero()
    }

    /// Reports whether `bits` encodes `+Infinity`.
    pub fn is_positive_infinity(&self, bits: &BigUint) -> bool {
        self.is_positive(bits) && self.is_infinity(bits)
    }

    /// Reports whether `bits` encodes `-Infinity`.
    pub fn is_negative_infinity(&self, bits: &BigUint) -> bool {
        self.is_negative(bits) && self.is_infinity(bits)
    }

    /// Reports whether `bits` encodes a NaN of either kind.
    pub fn is_nan(&self, bits: &BigUint) -> bool {
        self.exponent_of(bits) == self.max_exponent_field()
            && !self.significand_of(bits).is_zero()
    }

    /// Reports whether `bits` encodes a quiet NaN: the most
    /// significant trailing-significand bit is set.
    pub fn is_quiet_nan(&self, bits: &BigUint) -> bool {
        self.is_nan(bits) && bits.bit(self.significand as u64 - 1)
    }

    /// Reports whether `bits` encodes a signaling NaN: the most
    /// significant trailing-significand bit is clear and the payload
    /// is nonzero.
    pub fn is_signaling_nan(&self, bits: &BigUint) -> bool {
        self.is_nan(bits) && !bits.bit(self.significand as u64 - 1)
    }

    /// Returns the `+Infinity` pattern.
    pub fn positive_infinity(&self) -> BigUint {
        self.consts.pos_inf.clone()
    }

    /// Returns the `-Infinity` pattern.
    pub fn negative_infinity(&self) -> BigUint {
        self.consts.neg_inf.clone()
    }

    /// Returns the canonical quiet NaN pattern: exponent all ones,
    /// the most significant trailing bit set, and the lowest bit set
    /// to keep the payload unambiguous.
    pub fn quiet_nan(&self, sign: Sign) -> BigUint {
        let p = self.significand as u64;
        let mut bits = (mask(self.exponent as u64 + self.offset()) << 1u8) | BigUint::one();
        bits <<= p - 1;
        bits |= BigUint::one();
        self.with_sign(bits, sign.is_negative())
    }

    /// Returns the canonical signaling NaN pattern: exponent all
    /// ones, the most significant trailing bit clear, and the lowest
    /// bit set as the payload.
    pub fn signaling_nan(&self, sign: Sign) -> BigUint {
        let bits = (mask(self.exponent as u64 + self.offset()) << self.significand as u64)
            | BigUint::one();
        self.with_sign(bits, sign.is_negative())
    }

    /// Returns the default NaN pattern, a quiet NaN with every
    /// payload bit set.
    pub fn nan(&self, sign: Sign) -> BigUint {
        let bits = mask(self.exponent as u64 + self.significand as u64 + self.offset());
        self.with_sign(bits, sign.is_negative())
    }

    /// Returns the signed zero pattern.
    pub fn zero(&self, sign: Sign) -> BigUint {
        self.with_sign(BigUint::zero(), sign.is_negative())
    }

    /// Encodes `value` using the process-wide default rounding mode.
    pub fn encode(&self, value: &Value) -> BigUint {
        self.encode_with(value, default_rounding())
    }

    /// Encodes `value` into its bit pattern, rounding with `mode`
    /// when precision must be lost.
    ///
    /// Overflow produces a signed infinity and underflow through the
    /// subnormal range produces a signed zero; neither is an error.
    pub fn encode_with(&self, value: &Value, mode: Rounding) -> BigUint {
        let magnitude = match value.kind() {
            Kind::SignalingNan => return self.signaling_nan(value.sign()),
            Kind::QuietNan => return self.quiet_nan(value.sign()),
            Kind::Infinite => {
                return if value.is_negative() {
                    self.negative_infinity()
                } else {
                    self.positive_infinity()
                }
            }
            Kind::Finite(magnitude) => magnitude,
        };
        if magnitude.is_zero() {
            return self.zero(value.sign());
        }
        self.encode_finite(value.sign(), magnitude, mode)
    }

    /// Decodes a bit pattern into a value.
    ///
    /// Only the low [`width`][Self::width] bits of `bits` are
    /// meaningful.
    pub fn decode(&self, bits: &BigUint) -> Value {
        let p = self.significand as u64;
        let negative = self.is_negative(bits);
        let sign = if negative {
            Sign::Negative
        } else {
            Sign::Positive
        };

        let exp_field = self.exponent_of(bits);
        if exp_field == self.max_exponent_field() {
            let trailing = self.significand_of(bits);
            if trailing.is_zero() {
                return Value::infinity(sign);
            }
            return if trailing.bit(p - 1) {
                Value::quiet_nan(sign)
            } else {
                Value::signaling_nan(sign)
            };
        }

        let full_sig = self.full_significand_of(bits);
        let (sig, e) = if exp_field == 0 {
            if full_sig.is_zero() {
                return Value::zero(sign);
            }
            // Subnormal: no leading one, exponent pinned to
            // 1 - bias.
            (full_sig, 1 - self.bias())
        } else {
            let mut sig = full_sig;
            if self.implicit {
                sig.set_bit(p, true);
            }
            (sig, exp_field as i64 - self.bias())
        };

        // value = sig * 2^(e - P)
        let mag = pow2_decimal(BigInt::from(sig), e - p as i64).normalized();
        let mag = if negative { -mag } else { mag };
        Value::finite_unchecked(sign, mag)
    }
}

/// Returns `ceil(log2(den/num))` for `0 < num < den`.
fn ceil_log2(den: &BigUint, num: &BigUint) -> i64 {
    let k = den.bits() as i64 - num.bits() as i64;
    debug_assert!(k >= 0);
    if num << k >= *den {
        k
    } else {
        k + 1
    }
}
