//! Prefix, Bech32, and UTF-8 codecs layered beneath `Address`.
//!
//! Each submodule is a pure, allocation-light transform with no
//! dependency on anything outside [`umi_types`]'s error taxonomy.

mod bech32;
mod prefix;
mod utf8;

pub use bech32::{decode as bech32_decode, encode as bech32_encode};
pub use prefix::{prefix_to_version, version_to_prefix};
pub use utf8::{
    decode as utf8_decode, decode_to_string as utf8_decode_to_string, encode as utf8_encode,
    encode_str as utf8_encode_str,
};
