//! IEEE 754-2008 decimal interchange formats with binary integer
//! decimal and densely packed decimal significands.

mod codec;
mod declet;
mod formats;

pub use codec::{
    default_decimal_encoding, set_default_decimal_encoding, DecimalCodec, DecimalEncoding,
};
pub use formats::{DECIMAL128, DECIMAL32, DECIMAL64};
