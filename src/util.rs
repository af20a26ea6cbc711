use bigdecimal::BigDecimal;
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};

/// Returns a mask with the low `n` bits set.
pub(crate) fn mask(n: u64) -> BigUint {
    (BigUint::one() << n) - 1u32
}

/// Computes `10^n`.
pub(crate) fn ten_pow(n: u64) -> BigUint {
    debug_assert!(n <= u32::MAX as u64);
    BigUint::from(10u32).pow(n as u32)
}

/// Computes `n * 2^t` as an exact decimal.
///
/// Negative powers of two are exact in decimal: `2^-k = 5^k * 10^-k`.
pub(crate) fn pow2_decimal(n: BigInt, t: i64) -> BigDecimal {
    if t >= 0 {
        BigDecimal::from(n << t as u64)
    } else {
        let k = -t as u64;
        debug_assert!(k <= u32::MAX as u64);
        BigDecimal::new(n * BigInt::from(5u32).pow(k as u32), k as i64)
    }
}

/// Returns the number of significant decimal digits in `n`.
///
/// Zero has one digit.
pub(crate) fn dec_digits(n: &BigInt) -> u64 {
    BigDecimal::from(n.clone()).digits()
}

/// Returns the adjusted decimal exponent of `d`, i.e.
/// `floor(log10(|d|))` for nonzero `d`.
pub(crate) fn adjusted_exp10(d: &BigDecimal) -> i64 {
    let d = d.normalized();
    d.digits() as i64 - d.fractional_digit_count() - 1
}

/// Reports whether any of the low `n` bits of `x` are set.
pub(crate) fn low_bits_nonzero(x: &BigUint, n: u64) -> bool {
    if n == 0 {
        return false;
    }
    let mut i = 0;
    while i < n && i < x.bits() {
        if x.bit(i) {
            return true;
        }
        i += 1;
    }
    false
}

/// Strips trailing decimal zeros from `n`, returning the stripped
/// value and the number of zeros removed. `n` must be nonzero.
pub(crate) fn strip_zeros(mut n: BigInt) -> (BigInt, i64) {
    debug_assert!(!n.is_zero());

    let ten = BigInt::from(10u32);
    let mut stripped = 0;
    loop {
        let (q, r) = n.div_rem(&ten);
        if !r.is_zero() {
            return (n, stripped);
        }
        n = q;
        stripped += 1;
    }
}
