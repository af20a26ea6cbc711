use core::sync::atomic::{AtomicU8, Ordering};

use bigdecimal::BigDecimal;
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{ToPrimitive, Zero};

use super::declet::{BIN_TO_DPD, DPD_TO_BIN};
use crate::{
    error::Error,
    rounding::{default_rounding, Rounding},
    util::{dec_digits, mask, strip_zeros, ten_pow},
    value::{Kind, Sign, Value},
};

/// The two IEEE 754-2008 decimal significand encodings.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum DecimalEncoding {
    /// Binary Integer Decimal: the significand is a binary integer.
    #[default]
    Bid = 0,
    /// Densely Packed Decimal: the significand is a sequence of
    /// 10-bit declets.
    Dpd = 1,
}

static DEFAULT_ENCODING: AtomicU8 = AtomicU8::new(DecimalEncoding::Bid as u8);

/// Returns the process-wide default decimal encoding used by
/// [`DecimalCodec::encode`] and [`DecimalCodec::decode`].
pub fn default_decimal_encoding() -> DecimalEncoding {
    // Reads and writes only need to be atomic with respect to each
    // other; no further ordering is required.
    match DEFAULT_ENCODING.load(Ordering::Relaxed) {
        1 => DecimalEncoding::Dpd,
        _ => DecimalEncoding::Bid,
    }
}

/// Sets the process-wide default decimal encoding.
pub fn set_default_decimal_encoding(encoding: DecimalEncoding) {
    DEFAULT_ENCODING.store(encoding as u8, Ordering::Relaxed);
}

/// A codec for an IEEE 754-2008 decimal interchange format.
///
/// The codec is parameterized by the combination-field width `C` and
/// the trailing-significand width `T`, a multiple of ten. Encoded
/// patterns are laid out, most significant bit first, as
///
/// ```text
/// [ sign (1) | combination (C) | trailing significand (T) ]
/// ```
///
/// The combination field packs the leading significand digit
/// together with the exponent's high bits; the trailing field holds
/// the remaining `D - 1 = 3T/10` digits either as a binary integer
/// ([BID][DecimalEncoding::Bid]) or as `T/10` declets
/// ([DPD][DecimalEncoding::Dpd]).
#[derive(Clone, Debug)]
pub struct DecimalCodec {
    combination: u32,
    significand: u32,
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

enum Classified {
    Infinity,
    QuietNan,
    SignalingNan,
    // The leading digit is 8 or 9 and occupies a single combination
    // bit with an implied `100` prefix.
    Finite { high: bool },
}

enum Common {
    Special(BigUint),
    Finite { coeff: BigUint, exponent: i64 },
}

// Internal stuff.
impl DecimalCodec {
    pub(crate) fn new_unchecked(combination: u32, significand: u32) -> Self {
        let c = u64::from(combination);
        let t = u64::from(significand);
        let digits = 1 + 3 * (significand as i64) / 10;
        let span = 3i64 << (combination - 5);
        let bias = digits - 2 + span / 2;
        let q_max = span / 2 + 1 - digits;

        let consts = Consts {
            pos_inf: BigUint::from(0b11110u32) << (c - 5 + t),
            neg_inf: BigUint::from(0b111110u32) << (c - 5 + t),
            // (10^D - 1) * 10^q_max
            max: BigDecimal::new(
                BigInt::from(ten_pow(digits as u64)) - 1,
                -q_max,
            ),
            // 10^(e_min - 1), with the full D digits available.
            min_normal: BigDecimal::new(BigInt::from(1u32), bias - (digits - 1)),
            // 10^-bias: a one-digit coefficient at the lowest
            // exponent.
            min_subnormal: BigDecimal::new(BigInt::from(1u32), bias),
            // 10^(1 - D)
            epsilon: BigDecimal::new(BigInt::from(1u32), digits - 1),
        };
        Self {
            combination,
            significand,
            consts,
        }
    }

    /// Returns the number of encodable exponents, `3 * 2^(C-5)`.
    const fn exponent_span(&self) -> i64 {
        3i64 << (self.combination - 5)
    }

    /// The largest exponent of a coefficient with all `D` digits.
    const fn q_max(&self) -> i64 {
        self.exponent_span() / 2 + 1 - self.significand_digits() as i64
    }

    /// The smallest encodable coefficient exponent.
    const fn q_min(&self) -> i64 {
        2 - self.exponent_span() / 2 - self.significand_digits() as i64
    }

    const fn sign_shift(&self) -> u64 {
        self.combination as u64 + self.significand as u64
    }

    fn with_sign(&self, mut bits: BigUint, negative: bool) -> BigUint {
        if negative {
            bits.set_bit(self.sign_shift(), true);
        }
        bits
    }

    /// Normalizes a finite value into a coefficient of at most `D`
    /// digits and an in-range exponent, or short-circuits specials
    /// to their fixed patterns.
    fn encode_common(&self, value: &Value, mode: Rounding) -> Common {
        let sign = value.sign();
        let magnitude = match value.kind() {
            Kind::SignalingNan => return Common::Special(self.signaling_nan(sign)),
            Kind::QuietNan => return Common::Special(self.quiet_nan(sign)),
            Kind::Infinite => {
                return Common::Special(if sign.is_negative() {
                    self.negative_infinity()
                } else {
                    self.positive_infinity()
                })
            }
            Kind::Finite(magnitude) => magnitude,
        };
        if magnitude.is_zero() {
            return Common::Special(self.zero(sign));
        }

        // v = coeff * 10^q with the trailing zeros stripped.
        let (unscaled, scale) = magnitude.normalized().into_bigint_and_exponent();
        let mut coeff = unscaled;
        let mut q = -scale;

        let d_max = self.significand_digits() as i64;
        let mut digits = dec_digits(&coeff) as i64;
        if digits > d_max {
            // Too many digits: drop the excess, rounding once on the
            // exactly rescaled coefficient so the sticky digits
            // participate.
            let extra = digits - d_max;
            coeff = mode
                .round_decimal(&BigDecimal::new(coeff, extra))
                .into_bigint_and_exponent()
                .0;
            q += extra;
            // Rounding D nines up yields 10^D; re-strip so the
            // coefficient fits again.
            let (stripped, count) = strip_zeros(coeff);
            coeff = stripped;
            q += count;
            digits = dec_digits(&coeff) as i64;
        }

        if q > self.q_max() {
            // A short coefficient at a large exponent is padded with
            // trailing zeros; only a value beyond the maximum cannot
            // be absorbed.
            let pad = q - self.q_max();
            if digits + pad > d_max {
                return Common::Special(if sign.is_negative() {
                    self.negative_infinity()
                } else {
                    self.positive_infinity()
                });
            }
            coeff *= BigInt::from(ten_pow(pad as u64));
            q = self.q_max();
        } else if q < self.q_min() {
            // Underflow: shorten the coefficient, rounding away the
            // low digits; a coefficient of zero is a signed zero.
            let cut = self.q_min() - q;
            coeff = mode
                .round_decimal(&BigDecimal::new(coeff, cut))
                .into_bigint_and_exponent()
                .0;
            q = self.q_min();
            if coeff.is_zero() {
                return Common::Special(self.zero(sign));
            }
        }
        debug_assert!(dec_digits(&coeff) as i64 <= d_max);

        Common::Finite {
            coeff: coeff.into_parts().1,
            exponent: q,
        }
    }

    fn classify(&self, comb: u64) -> Classified {
        let top5 = comb >> (self.combination - 5);
        match top5 {
            0b11110 => Classified::Infinity,
            0b11111 => {
                if (comb >> (self.combination - 6)) & 1 == 1 {
                    Classified::SignalingNan
                } else {
                    Classified::QuietNan
                }
            }
            _ => Classified::Finite {
                high: top5 >> 3 == 0b11,
            },
        }
    }

    fn finite(&self, sign: Sign, coeff: BigUint, biased: u64) -> Value {
        let exponent = biased as i64 - self.bias();
        let mag = BigDecimal::new(BigInt::from(coeff), -exponent).normalized();
        let mag = if sign.is_negative() { -mag } else { mag };
        Value::finite_unchecked(sign, mag)
    }
}

// Public stuff.
impl DecimalCodec {
    /// Creates a new decimal codec.
    ///
    /// `combination` is the number of combination bits (in
    /// `[6, 31]`) and `significand` the number of trailing
    /// significand bits, a positive multiple of ten.
    pub fn new(combination: u32, significand: u32) -> Result<Self, Error> {
        if combination < 6 {
            return Err(Error::invalid_parameter("combination size must be at least 6"));
        }
        if combination > 31 {
            return Err(Error::invalid_parameter("combination size is too big"));
        }
        if significand < 1 {
            return Err(Error::invalid_parameter(
                "significand size must be positive",
            ));
        }
        if significand % 10 != 0 {
            return Err(Error::invalid_parameter(
                "significand size must be a multiple of 10",
            ));
        }
        Ok(Self::new_unchecked(combination, significand))
    }

    /// Returns the number of combination bits.
    pub const fn combination_bits(&self) -> u32 {
        self.combination
    }

    /// Returns the number of trailing significand bits.
    pub const fn significand_bits(&self) -> u32 {
        self.significand
    }

    /// Returns the maximum number of decimal digits in a
    /// significand, `1 + 3T/10`.
    pub const fn significand_digits(&self) -> u32 {
        1 + 3 * self.significand / 10
    }

    /// Returns the exponent bias.
    pub const fn bias(&self) -> i64 {
        self.significand_digits() as i64 - 2 + self.exponent_span() / 2
    }

    /// Returns the total width of an encoded pattern in bits.
    pub const fn width(&self) -> u64 {
        self.sign_shift() + 1
    }

    /// Constructs a finite value bound to this format.
    ///
    /// A magnitude whose absolute value exceeds
    /// [`max_value`][Self::max_value] becomes a signed infinity;
    /// there is no underflow coercion. Returns
    /// [`InvalidSign`][crate::ErrorKind::InvalidSign] if the
    /// magnitude is nonzero and its sign disagrees with `sign`.
    pub fn value(&self, sign: Sign, magnitude: BigDecimal) -> Result<Value, Error> {
        Value::finite_checked(sign, magnitude, &self.consts.max)
    }

    /// Returns the largest finite value, `(10^D - 1) * 10^q_max`.
    pub fn max_value(&self) -> &BigDecimal {
        &self.consts.max
    }

    /// Returns the smallest positive normal value, `10^(e_min - 1)`.
    pub fn min_value(&self) -> &BigDecimal {
        &self.consts.min_normal
    }

    /// Returns the smallest positive subnormal value, `10^-bias`.
    pub fn min_subnormal_value(&self) -> &BigDecimal {
        &self.consts.min_subnormal
    }

    /// Returns the difference between 1 and the smallest
    /// representable value greater than 1, `10^(1 - D)`.
    pub fn epsilon(&self) -> &BigDecimal {
        &self.consts.epsilon
    }

    /// Returns the smallest and largest adjusted exponents,
    /// `(2 - span/2, 1 + span/2)`.
    pub const fn exponent_range(&self) -> (i64, i64) {
        (2 - self.exponent_span() / 2, 1 + self.exponent_span() / 2)
    }

    /// Returns the combination field of `bits`.
    pub fn combination_of(&self, bits: &BigUint) -> u64 {
        let comb = (bits >> self.significand as u64) & mask(self.combination as u64);
        comb.to_u64().unwrap_or(0)
    }

    /// Returns the trailing significand field of `bits`.
    pub fn significand_of(&self, bits: &BigUint) -> BigUint {
        bits & &mask(self.significand as u64)
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
        self.combination_of(bits) >> (self.combination - 5) == 0b11110
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
        self.combination_of(bits) >> (self.combination - 5) == 0b11111
    }

    /// Reports whether `bits` encodes a quiet NaN: the combination
    /// bit below the five NaN discriminator bits is clear.
    pub fn is_quiet_nan(&self, bits: &BigUint) -> bool {
        self.is_nan(bits) && !bits.bit(self.sign_shift() - 6)
    }

    /// Reports whether `bits` encodes a signaling NaN: the
    /// combination bit below the five NaN discriminator bits is set.
    pub fn is_signaling_nan(&self, bits: &BigUint) -> bool {
        self.is_nan(bits) && bits.bit(self.sign_shift() - 6)
    }

    /// Returns the `+Infinity` pattern.
    pub fn positive_infinity(&self) -> BigUint {
        self.consts.pos_inf.clone()
    }

    /// Returns the `-Infinity` pattern.
    pub fn negative_infinity(&self) -> BigUint {
        self.consts.neg_inf.clone()
    }

    /// Returns the canonical quiet NaN pattern.
    pub fn quiet_nan(&self, sign: Sign) -> BigUint {
        let bits = BigUint::from(0b11111u32) << (self.combination as u64 - 5 + self.significand as u64);
        self.with_sign(bits, sign.is_negative())
    }

    /// Returns the canonical signaling NaN pattern.
    pub fn signaling_nan(&self, sign: Sign) -> BigUint {
        let bits = BigUint::from(0b111111u32) << (self.combination as u64 - 6 + self.significand as u64);
        self.with_sign(bits, sign.is_negative())
    }

    /// Returns the default NaN pattern, a quiet NaN.
    pub fn nan(&self, sign: Sign) -> BigUint {
        self.quiet_nan(sign)
    }

    /// Returns the signed zero pattern.
    pub fn zero(&self, sign: Sign) -> BigUint {
        self.with_sign(BigUint::zero(), sign.is_negative())
    }

    /// Encodes `value` using the process-wide default decimal
    /// encoding and rounding mode.
    pub fn encode(&self, value: &Value) -> BigUint {
        match default_decimal_encoding() {
            DecimalEncoding::Bid => self.encode_bid(value),
            DecimalEncoding::Dpd => self.encode_dpd(value),
        }
    }

    /// Decodes `bits` using the process-wide default decimal
    /// encoding.
    pub fn decode(&self, bits: &BigUint) -> Value {
        match default_decimal_encoding() {
            DecimalEncoding::Bid => self.decode_bid(bits),
            DecimalEncoding::Dpd => self.decode_dpd(bits),
        }
    }

    /// Encodes `value` in Binary Integer Decimal form using the
    /// process-wide default rounding mode.
    pub fn encode_bid(&self, value: &Value) -> BigUint {
        self.encode_bid_with(value, default_rounding())
    }

    /// Encodes `value` in Binary Integer Decimal form: the
    /// coefficient is split at bit `T`, the low bits filling the
    /// trailing field and the high bits the combination digit.
    pub fn encode_bid_with(&self, value: &Value, mode: Rounding) -> BigUint {
        let (coeff, exponent) = match self.encode_common(value, mode) {
            Common::Special(bits) => return bits,
            Common::Finite { coeff, exponent } => (coeff, exponent),
        };
        let t = self.significand as u64;
        let trailing = &coeff & &mask(t);
        let msd = (&coeff >> t).to_u64().unwrap_or(0);
        debug_assert!(msd <= 9);

        let biased = (exponent + self.bias()) as u64;
        let comb = if msd > 7 {
            (0b11u64 << (self.combination - 2)) | (biased << 1) | (msd & 1)
        } else {
            (biased << 3) | msd
        };
        let bits = (BigUint::from(comb) << t) | trailing;
        self.with_sign(bits, value.is_negative())
    }

    /// Encodes `value` in Densely Packed Decimal form using the
    /// process-wide default rounding mode.
    pub fn encode_dpd(&self, value: &Value) -> BigUint {
        self.encode_dpd_with(value, default_rounding())
    }

    /// Encodes `value` in Densely Packed Decimal form: the trailing
    /// digits are packed into `T/10` declets, most significant
    /// declet first.
    pub fn encode_dpd_with(&self, value: &Value, mode: Rounding) -> BigUint {
        let (coeff, exponent) = match self.encode_common(value, mode) {
            Common::Special(bits) => return bits,
            Common::Finite { coeff, exponent } => (coeff, exponent),
        };
        let t = self.significand as u64;
        let thousand = BigUint::from(1000u32);

        let mut declets = BigUint::zero();
        let mut rest = coeff;
        let mut i = 0;
        while i < t {
            let (hi, group) = rest.div_rem(&thousand);
            declets |= BigUint::from(BIN_TO_DPD[group.to_usize().unwrap_or(0)]) << i;
            rest = hi;
            i += 10;
        }
        let msd = rest.to_u64().unwrap_or(0);
        debug_assert!(msd <= 9);

        let biased = (exponent + self.bias()) as u64;
        let c5 = self.combination as u64 - 5;
        let exp_high = biased >> c5;
        let exp_low = biased & ((1u64 << c5) - 1);
        let comb5 = if msd > 7 {
            0b11000 | (exp_high << 1) | (msd & 1)
        } else {
            (exp_high << 3) | msd
        };
        let bits = (BigUint::from((comb5 << c5) | exp_low) << t) | declets;
        self.with_sign(bits, value.is_negative())
    }

    /// Decodes a Binary Integer Decimal pattern.
    ///
    /// A non-canonical pattern whose reassembled coefficient exceeds
    /// `D` digits decodes as zero.
    pub fn decode_bid(&self, bits: &BigUint) -> Value {
        let negative = self.is_negative(bits);
        let sign = if negative {
            Sign::Negative
        } else {
            Sign::Positive
        };
        let comb = self.combination_of(bits);
        let high = match self.classify(comb) {
            Classified::Infinity => return Value::infinity(sign),
            Classified::QuietNan => return Value::quiet_nan(sign),
            Classified::SignalingNan => return Value::signaling_nan(sign),
            Classified::Finite { high } => high,
        };

        let c = self.combination;
        let exp_mask = (1u64 << (c - 3)) - 1;
        let (msd, biased) = if high {
            (0b1000 | (comb & 1), (comb >> 1) & exp_mask)
        } else {
            (comb & 0b111, (comb >> 3) & exp_mask)
        };

        let mut coeff = (BigUint::from(msd) << self.significand as u64) | self.significand_of(bits);
        if dec_digits(&BigInt::from(coeff.clone())) > self.significand_digits() as u64 {
            coeff = BigUint::zero();
        }
        self.finite(sign, coeff, biased)
    }

    /// Decodes a Densely Packed Decimal pattern.
    pub fn decode_dpd(&self, bits: &BigUint) -> Value {
        let negative = self.is_negative(bits);
        let sign = if negative {
            Sign::Negative
        } else {
            Sign::Positive
        };
        let comb = self.combination_of(bits);
        let high = match self.classify(comb) {
            Classified::Infinity => return Value::infinity(sign),
            Classified::QuietNan => return Value::quiet_nan(sign),
            Classified::SignalingNan => return Value::signaling_nan(sign),
            Classified::Finite { high } => high,
        };

        let c = self.combination;
        let c5 = c as u64 - 5;
        let exp_low_mask = (1u64 << c5) - 1;
        let (msd, biased) = if high {
            (
                0b1000 | ((comb >> c5) & 1),
                (((comb >> (c - 4)) & 0b11) << c5) | (comb & exp_low_mask),
            )
        } else {
            (
                (comb >> c5) & 0b111,
                ((comb >> (c - 2)) << c5) | (comb & exp_low_mask),
            )
        };

        let trailing = self.significand_of(bits);
        let mut coeff = BigUint::from(msd);
        let mut i = self.significand as u64;
        while i >= 10 {
            i -= 10;
            let declet = ((&trailing >> i) & &mask(10)).to_usize().unwrap_or(0);
            coeff = coeff * 1000u32 + u32::from(DPD_TO_BIN[declet]);
        }
        self.finite(sign, coeff, biased)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn hex(s: &str) -> BigUint {
        BigUint::parse_bytes(s.replace(' ', "").as_bytes(), 16).unwrap()
    }

    fn decimal32() -> DecimalCodec {
        DecimalCodec::new(11, 20).unwrap()
    }

    fn value(codec: &DecimalCodec, s: &str) -> Value {
        let sign = if s.starts_with('-') {
            Sign::Negative
        } else {
            Sign::Positive
        };
        codec.value(sign, dec(s)).unwrap()
    }

    #[test]
    fn test_parameters() {
        let c = decimal32();
        assert_eq!(c.significand_digits(), 7);
        assert_eq!(c.bias(), 101);
        assert_eq!(c.width(), 32);
        assert_eq!(c.exponent_range(), (-94, 97));
        assert_eq!(c.q_max(), 90);
        assert_eq!(c.q_min(), -101);

        assert!(DecimalCodec::new(5, 20).is_err());
        assert!(DecimalCodec::new(32, 20).is_err());
        assert!(DecimalCodec::new(11, 0).is_err());
        assert!(DecimalCodec::new(11, 25).is_err());
    }

    #[test]
    fn test_constants() {
        let c = decimal32();
        assert_eq!(c.max_value(), &dec("9999999e90"));
        assert_eq!(c.min_value(), &dec("1e-95"));
        assert_eq!(c.min_subnormal_value(), &dec("1e-101"));
        assert_eq!(c.epsilon(), &dec("0.000001"));
    }

    #[test]
    fn test_specials() {
        let c = decimal32();
        assert_eq!(c.positive_infinity(), hex("7800 0000"));
        assert_eq!(c.negative_infinity(), hex("f800 0000"));
        assert_eq!(c.quiet_nan(Sign::Positive), hex("7c00 0000"));
        assert_eq!(c.signaling_nan(Sign::Positive), hex("7e00 0000"));
        assert_eq!(c.quiet_nan(Sign::Negative), hex("fc00 0000"));
        assert_eq!(c.zero(Sign::Negative), hex("8000 0000"));

        assert!(c.is_infinity(&hex("7800 0000")));
        assert!(c.is_negative_infinity(&hex("f800 0000")));
        assert!(c.is_nan(&hex("7c00 0000")));
        assert!(c.is_quiet_nan(&hex("7c00 0000")));
        assert!(c.is_signaling_nan(&hex("7e00 0000")));
        assert!(!c.is_quiet_nan(&hex("7e00 0000")));
        assert!(!c.is_nan(&hex("7800 0000")));
    }

    #[test]
    fn test_encode_one() {
        let c = decimal32();
        let one = value(&c, "1");
        assert_eq!(c.encode_bid(&one), hex("3280 0001"));
        assert_eq!(c.encode_dpd(&one), hex("2250 0001"));
    }

    #[test]
    fn test_default_encoding() {
        let c = decimal32();
        let one = value(&c, "1");
        assert_eq!(default_decimal_encoding(), DecimalEncoding::Bid);
        assert_eq!(c.encode(&one), hex("3280 0001"));

        set_default_decimal_encoding(DecimalEncoding::Dpd);
        assert_eq!(c.encode(&one), hex("2250 0001"));
        assert_eq!(c.decode(&hex("2250 0001")), one);
        set_default_decimal_encoding(DecimalEncoding::Bid);
    }

    /// 12345.67 round-trips through both encodings, whose bit
    /// patterns differ.
    #[test]
    fn test_both_encodings() {
        let c = decimal32();
        let v = value(&c, "12345.67");

        let bid = c.encode_bid(&v);
        let dpd = c.encode_dpd(&v);
        assert_ne!(bid, dpd);

        assert_eq!(c.decode_bid(&bid), v);
        assert_eq!(c.decode_dpd(&dpd), v);
    }

    #[test]
    fn test_signed_zero() {
        let c = decimal32();
        let v = value(&c, "0");
        assert_eq!(c.encode_bid(&v), hex("0000 0000"));

        let v = c.value(Sign::Negative, dec("0")).unwrap();
        let bits = c.encode_bid(&v);
        assert_eq!(bits, hex("8000 0000"));
        let decoded = c.decode_bid(&bits);
        assert!(decoded.is_negative_zero());
    }

    #[test]
    fn test_large_leading_digit() {
        let c = decimal32();
        // A leading digit of 8 or 9 uses the high combination form.
        for s in ["9999999", "8000000", "9e90", "-8.5"] {
            let v = value(&c, s);
            let bid = c.encode_bid(&v);
            let dpd = c.encode_dpd(&v);
            assert_eq!(c.decode_bid(&bid), v, "{s}");
            assert_eq!(c.decode_dpd(&dpd), v, "{s}");
        }
    }

    #[test]
    fn test_digit_truncation() {
        let c = decimal32();
        // Eight digits round to seven. The mode is pinned because
        // the process-wide default is shared with other tests.
        let v = value(&c, "12345678");
        let got = c.decode_bid(&c.encode_bid_with(&v, Rounding::TiesToEven));
        assert_eq!(got.magnitude().unwrap(), &dec("12345680"));

        // The sticky digits decide a near-tie: 1234564.51 rounds up
        // even though the retained digit is even.
        let v = value(&c, "1234564.51");
        let got = c.decode_bid(&c.encode_bid_with(&v, Rounding::TiesToEven));
        assert_eq!(got.magnitude().unwrap(), &dec("1234565"));

        // Seven nines round up to 10^7 and re-strip.
        let v = value(&c, "9999999.5");
        let got = c.decode_bid(&c.encode_bid_with(&v, Rounding::TiesToEven));
        assert_eq!(got.magnitude().unwrap(), &dec("10000000"));
    }

    /// A short coefficient above q_max is padded with trailing
    /// zeros, not mis-encoded or prematurely overflowed.
    #[test]
    fn test_exponent_padding() {
        let c = decimal32();
        let v = value(&c, "5e91");
        let bid = c.encode_bid(&v);
        assert_eq!(c.decode_bid(&bid), v);
        let dpd = c.encode_dpd(&v);
        assert_eq!(c.decode_dpd(&dpd), v);

        // 1e96 still fits (as 1000000e90)...
        let v = value(&c, "1e96");
        assert_eq!(c.decode_bid(&c.encode_bid(&v)), v);
        // ...but 1e97 exceeds the maximum and the factory already
        // made it infinity.
        let v = value(&c, "1e97");
        assert!(v.is_positive_infinity());
        assert_eq!(c.encode_bid(&v), hex("7800 0000"));
    }

    #[test]
    fn test_underflow() {
        let c = decimal32();
        // Below the smallest subnormal: ties to even is zero, a
        // directed mode reaches the smallest subnormal.
        let v = value(&c, "1e-102");
        assert_eq!(c.encode_bid_with(&v, Rounding::TiesToEven), hex("0000 0000"));
        assert_eq!(c.encode_bid_with(&v, Rounding::TowardPositive), hex("0000 0001"));

        let v = value(&c, "5.1e-102");
        let got = c.decode_bid(&c.encode_bid_with(&v, Rounding::TiesToEven));
        assert_eq!(got.magnitude().unwrap(), &dec("1e-101"));

        let v = value(&c, "-1e-200");
        let bits = c.encode_bid_with(&v, Rounding::TiesToEven);
        assert!(c.decode_bid(&bits).is_negative_zero());
    }

    #[test]
    fn test_min_max_round_trip() {
        let c = decimal32();
        for m in [
            c.max_value().clone(),
            c.min_value().clone(),
            c.min_subnormal_value().clone(),
        ] {
            let v = c.value(Sign::Positive, m).unwrap();
            assert_eq!(c.decode_bid(&c.encode_bid(&v)), v);
            assert_eq!(c.decode_dpd(&c.encode_dpd(&v)), v);
        }
        // The smallest subnormal is the all-but-one-bit-zero BID
        // pattern.
        let v = c
            .value(Sign::Positive, c.min_subnormal_value().clone())
            .unwrap();
        assert_eq!(c.encode_bid(&v), hex("0000 0001"));
    }

    /// A BID coefficient beyond `D` digits is non-canonical and
    /// decodes as zero.
    #[test]
    fn test_non_canonical_bid() {
        let c = decimal32();
        // High form, leading digit 9, trailing all ones: 10485759
        // has eight digits.
        let comb = (0b11u64 << 9) | (101 << 1) | 1;
        let bits = (BigUint::from(comb) << 20u8) | mask(20);
        let decoded = c.decode_bid(&bits);
        assert!(decoded.is_positive_zero());
    }

    #[test]
    fn test_epsilon_step() {
        let c = decimal32();
        // 1 + epsilon is the next representable value above 1.
        let v = value(&c, "1.000001");
        let got = c.decode_bid(&c.encode_bid(&v));
        assert_eq!(got.magnitude().unwrap(), &(dec("1") + c.epsilon()));
    }

    #[test]
    fn test_sign_invariance() {
        let c = decimal32();
        for s in ["1", "12345.67", "9e-101", "9999999e90"] {
            let pos = c.encode_bid(&value(&c, s));
            let neg = c.encode_bid(&value(&c, &format!("-{s}")));
            let mut want = pos.clone();
            want.set_bit(31, true);
            assert_eq!(neg, want, "{s}");
        }
    }
}
