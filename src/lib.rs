//! Bit-exact conversion between arbitrary-precision decimals and
//! IEEE 754-2008 interchange encodings.
//!
//! Every binary and decimal interchange format is a parameterized
//! codec rather than a hard-coded width: [`binary::BinaryCodec`] is
//! built from an exponent width, a trailing-significand width, and
//! an implicit-leading-bit flag, and [`decimal::DecimalCodec`] from
//! a combination-field width and a trailing-significand width. The
//! standard formats (binary16 through binary256, decimal32 through
//! decimal128) are available as ready-made codecs, and decimal
//! formats support both the BID and DPD significand encodings.
//!
//! Values are modeled by [`Value`]: a sign plus either an
//! arbitrary-precision decimal magnitude or a special category.
//! Encoding is correctly rounded under any of the five IEEE
//! rounding-direction attributes, with overflow to signed infinity
//! and gradual underflow through the subnormals to signed zero.
//!
//! # Examples
//!
//! ```
//! use fpcodec::{binary::BINARY32, Sign};
//!
//! let v = BINARY32.value(Sign::Positive, "3.14159".parse()?)?;
//! let bits = BINARY32.encode(&v);
//! assert_eq!(bits.to_str_radix(16), "40490fd0");
//!
//! let decoded = BINARY32.decode(&bits);
//! assert_eq!(decoded.to_f32(), 3.14159);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![allow(clippy::unusual_byte_groupings)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![deny(unused_lifetimes)]
#![deny(unused_qualifications)]

pub mod binary;
pub mod decimal;
mod error;
mod rounding;
mod util;
mod value;

pub use error::{Error, ErrorKind};
pub use rounding::{default_rounding, set_default_rounding, Rounding};
pub use value::{Category, Sign, Value};
