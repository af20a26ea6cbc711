//! IEEE 754-2008 binary interchange formats.

mod codec;
mod formats;

pub use codec::BinaryCodec;
pub use formats::{BINARY128, BINARY16, BINARY256, BINARY32, BINARY64, BINARY80};
