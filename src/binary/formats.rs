use once_cell::sync::Lazy;

use super::BinaryCodec;

/// The binary16 (half precision) codec: 5 exponent bits, 10
/// trailing significand bits, implicit leading bit.
pub static BINARY16: Lazy<BinaryCodec> = Lazy::new(|| BinaryCodec::new_unchecked(5, 10, true));

/// The binary32 (single precision) codec: 8 exponent bits, 23
/// trailing significand bits, implicit leading bit.
pub static BINARY32: Lazy<BinaryCodec> = Lazy::new(|| BinaryCodec::new_unchecked(8, 23, true));

/// The binary64 (double precision) codec: 11 exponent bits, 52
/// trailing significand bits, implicit leading bit.
pub static BINARY64: Lazy<BinaryCodec> = Lazy::new(|| BinaryCodec::new_unchecked(11, 52, true));

/// The binary80 (x87 extended precision) codec: 15 exponent bits,
/// 63 trailing significand bits, explicit leading bit.
pub static BINARY80: Lazy<BinaryCodec> = Lazy::new(|| BinaryCodec::new_unchecked(15, 63, false));

/// The binary128 (quadruple precision) codec: 15 exponent bits, 112
/// trailing significand bits, implicit leading bit.
pub static BINARY128: Lazy<BinaryCodec> = Lazy::new(|| BinaryCodec::new_unchecked(15, 112, true));

/// The binary256 (octuple precision) codec: 19 exponent bits, 236
/// trailing significand bits, implicit leading bit.
pub static BINARY256: Lazy<BinaryCodec> = Lazy::new(|| BinaryCodec::new_unchecked(19, 236, true));
