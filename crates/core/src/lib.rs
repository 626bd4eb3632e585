//! The UMI core's consumer-facing domain objects: [`Address`],
//! [`PublicKey`]/[`SecretKey`], and [`Transaction`], built on the
//! `umi-hash`, `umi-ed25519`, and `umi-codec` primitive crates.
//!
//! `Block` and `BlockHeader` are re-exported from `umi-types` only so
//! the public API surface is complete; neither has a defined layout
//! here.

mod address;
mod public_key;
mod secret_key;
mod transaction;

pub use address::Address;
pub use public_key::PublicKey;
pub use secret_key::SecretKey;
pub use transaction::{Transaction, TransactionVersion};

pub use umi_types::{Block, BlockHeader, Error, Result};
