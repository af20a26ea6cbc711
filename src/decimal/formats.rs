use once_cell::sync::Lazy;

use super::DecimalCodec;

/// The decimal32 codec: 11 combination bits, 20 trailing
/// significand bits, 7 coefficient digits.
pub static DECIMAL32: Lazy<DecimalCodec> = Lazy::new(|| DecimalCodec::new_unchecked(11, 20));

/// The decimal64 codec: 13 combination bits, 50 trailing
/// significand bits, 16 coefficient digits.
pub static DECIMAL64: Lazy<DecimalCodec> = Lazy::new(|| DecimalCodec::new_unchecked(13, 50));

/// The decimal128 codec: 17 combination bits, 110 trailing
/// significand bits, 34 coefficient digits.
pub static DECIMAL128: Lazy<DecimalCodec> = Lazy::new(|| DecimalCodec::new_unchecked(17, 110));

#[cfg(test)]
mod tests {
    use bigdecimal::BigDecimal;
    use num_bigint::BigUint;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;
    use crate::Sign;

    fn codecs() -> [(&'static str, &'static DecimalCodec); 3] {
        [
            ("decimal32", &DECIMAL32),
            ("decimal64", &DECIMAL64),
            ("decimal128", &DECIMAL128),
        ]
    }

    fn hex(s: &str) -> BigUint {
        BigUint::parse_bytes(s.replace(' ', "").as_bytes(), 16).unwrap()
    }

    #[test]
    fn test_parameters() {
        assert_eq!(DECIMAL32.significand_digits(), 7);
        assert_eq!(DECIMAL32.bias(), 101);
        assert_eq!(DECIMAL64.significand_digits(), 16);
        assert_eq!(DECIMAL64.bias(), 398);
        assert_eq!(DECIMAL128.significand_digits(), 34);
        assert_eq!(DECIMAL128.bias(), 6176);
    }

    #[test]
    fn test_infinities() {
        // [0] = -Infinity, [1] = +Infinity
        let want = [
            ["f800 0000", "7800 0000"],
            ["f800 0000 0000 0000", "7800 0000 0000 0000"],
            [
                "f800 0000 0000 0000 0000 0000 0000 0000",
                "7800 0000 0000 0000 0000 0000 0000 0000",
            ],
        ];
        for ((name, codec), [neg, pos]) in codecs().into_iter().zip(want) {
            let (neg, pos) = (hex(neg), hex(pos));
            assert_eq!(codec.negative_infinity(), neg, "{name}");
            assert_eq!(codec.positive_infinity(), pos, "{name}");

            for (bits, negative) in [(neg, true), (pos, false)] {
                for decoded in [codec.decode_bid(&bits), codec.decode_dpd(&bits)] {
                    assert!(decoded.is_infinity(), "{name}: {decoded}");
                    assert_eq!(decoded.is_negative(), negative, "{name}");
                    assert_eq!(codec.encode_bid(&decoded), bits, "{name}");
                    assert_eq!(codec.encode_dpd(&decoded), bits, "{name}");
                }
            }
        }
    }

    #[test]
    fn test_nans() {
        // [0] = qNaN, [1] = sNaN, sign bit clear.
        let want = [
            ["7c00 0000", "7e00 0000"],
            ["7c00 0000 0000 0000", "7e00 0000 0000 0000"],
            [
                "7c00 0000 0000 0000 0000 0000 0000 0000",
                "7e00 0000 0000 0000 0000 0000 0000 0000",
            ],
        ];
        for ((name, codec), [quiet, signaling]) in codecs().into_iter().zip(want) {
            let (quiet, signaling) = (hex(quiet), hex(signaling));
            assert_eq!(codec.quiet_nan(Sign::Positive), quiet, "{name}");
            assert_eq!(codec.signaling_nan(Sign::Positive), signaling, "{name}");
            assert_eq!(codec.nan(Sign::Positive), quiet, "{name}");

            let decoded = codec.decode_bid(&quiet);
            assert!(decoded.is_quiet_nan() && decoded.is_positive(), "{name}");
            assert_eq!(codec.encode_dpd(&decoded), quiet, "{name}");

            let decoded = codec.decode_dpd(&signaling);
            assert!(decoded.is_signaling_nan() && decoded.is_positive(), "{name}");
            assert_eq!(codec.encode_bid(&decoded), signaling, "{name}");
        }
    }

    #[test]
    fn test_zeros() {
        for (name, codec) in codecs() {
            let neg = codec.zero(Sign::Negative);
            assert_eq!(neg, BigUint::from(1u8) << (codec.width() - 1), "{name}");

            for decoded in [codec.decode_bid(&neg), codec.decode_dpd(&neg)] {
                assert!(decoded.is_negative_zero(), "{name}: {decoded}");
                assert_eq!(codec.encode_bid(&decoded), neg, "{name}");
            }
        }
    }

    /// Well-known encodings of 1.0.
    #[test]
    fn test_one() {
        let tests = [
            ("decimal32", &DECIMAL32, "3280 0001", "2250 0001"),
            ("decimal64", &DECIMAL64, "31c0 0000 0000 0001", "2238 0000 0000 0001"),
            (
                "decimal128",
                &DECIMAL128,
                "3040 0000 0000 0000 0000 0000 0000 0001",
                "2208 0000 0000 0000 0000 0000 0000 0001",
            ),
        ];
        for (name, codec, bid, dpd) in tests {
            let one = codec.value(Sign::Positive, BigDecimal::from(1)).unwrap();
            assert_eq!(codec.encode_bid(&one), hex(bid), "{name}");
            assert_eq!(codec.encode_dpd(&one), hex(dpd), "{name}");
            assert_eq!(codec.decode_bid(&hex(bid)), one, "{name}");
            assert_eq!(codec.decode_dpd(&hex(dpd)), one, "{name}");
        }
    }

    #[test]
    fn test_min_max_round_trip() {
        for (name, codec) in codecs() {
            for (which, magnitude) in [
                ("max", codec.max_value().clone()),
                ("min", codec.min_value().clone()),
                ("min subnormal", codec.min_subnormal_value().clone()),
            ] {
                let v = codec.value(Sign::Positive, magnitude).unwrap();
                assert_eq!(codec.decode_bid(&codec.encode_bid(&v)), v, "{name}: {which}");
                assert_eq!(codec.decode_dpd(&codec.encode_dpd(&v)), v, "{name}: {which}");
            }
        }
    }

    /// Random in-range coefficients and exponents round-trip
    /// exactly through both encodings.
    #[test]
    fn test_random_round_trip() {
        let mut rng = StdRng::seed_from_u64(0xdec1_4a1);
        for (name, codec) in codecs() {
            let digits = codec.significand_digits();
            for i in 0..25 {
                let len = rng.gen_range(1..=digits);
                let mut coeff = String::new();
                coeff.push(rng.gen_range(b'1'..=b'9') as char);
                for _ in 1..len {
                    coeff.push(rng.gen_range(b'0'..=b'9') as char);
                }
                // Keep the adjusted exponent in the normal range so
                // no digits are rounded away.
                let (q_lo, q_hi) = codec.exponent_range();
                let q = rng.gen_range(q_lo..=q_hi - digits as i64);
                let s = format!("{coeff}e{q}");

                let sign = if rng.gen_bool(0.5) {
                    Sign::Positive
                } else {
                    Sign::Negative
                };
                let magnitude: BigDecimal = if sign.is_negative() {
                    format!("-{s}").parse().unwrap()
                } else {
                    s.parse().unwrap()
                };
                let v = codec.value(sign, magnitude).unwrap();
                assert!(v.is_finite(), "{name} #{i}: {v}");

                assert_eq!(codec.decode_bid(&codec.encode_bid(&v)), v, "{name} #{i}: {v}");
                assert_eq!(codec.decode_dpd(&codec.encode_dpd(&v)), v, "{name} #{i}: {v}");
            }
        }
    }
}
