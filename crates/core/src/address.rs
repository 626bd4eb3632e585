use umi_codec::{bech32_decode, bech32_encode, prefix_to_version, version_to_prefix};
use umi_types::{Error, Result};

use crate::public_key::PublicKey;
use crate::secret_key::SecretKey;

/// A 34-byte UMI address: big-endian `u16` version (high bit always
/// zero) followed by a 32-byte Ed25519 public key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address([u8; Address::LENGTH]);

impl Address {
    pub const LENGTH: usize = 34;
    /// The reserved placeholder version used by the sole genesis transaction.
    pub const GENESIS: u16 = 0;
    /// The canonical mainnet namespace, `'u'*32^2 + 'm'*32 + 'i'` with `'a'=1`.
    pub const UMI: u16 = 21929;

    /// An empty address pre-initialized with [`Self::UMI`] as its version.
    pub fn new() -> Self {
        let mut bytes = [0u8; Self::LENGTH];
        bytes[..2].copy_from_slice(&Self::UMI.to_be_bytes());
        Address(bytes)
    }

    pub fn from_bytes(bytes: [u8; Self::LENGTH]) -> Self {
        Address(bytes)
    }

    pub fn from_bech32(s: &str) -> Result<Self> {
        Ok(Address(bech32_decode(s)?))
    }

    pub fn from_public_key(public_key: PublicKey) -> Self {
        let mut address = Self::new();
        address.set_public_key(public_key);
        address
    }

    pub fn from_secret_key(secret_key: &SecretKey) -> Self {
        Self::from_public_key(secret_key.public_key())
    }

    pub fn version(&self) -> u16 {
        u16::from_be_bytes([self.0[0], self.0[1]])
    }

    /// Sets the version, validating it through [`version_to_prefix`]
    /// and masking the reserved high bit to zero.
    pub fn set_version(&mut self, version: u16) -> Result<()> {
        version_to_prefix(version)?;
        self.0[..2].copy_from_slice(&(version & 0x7fff).to_be_bytes());
        Ok(())
    }

    pub fn prefix(&self) -> Result<String> {
        version_to_prefix(self.version())
    }

    pub fn set_prefix(&mut self, prefix: &str) -> Result<()> {
        self.set_version(prefix_to_version(prefix)?)
    }

    pub fn public_key(&self) -> PublicKey {
        let mut bytes = [0u8; PublicKey::LENGTH];
        bytes.copy_from_slice(&self.0[2..]);
        PublicKey::from_bytes(bytes)
    }

    pub fn set_public_key(&mut self, public_key: PublicKey) {
        self.0[2..].copy_from_slice(public_key.as_bytes());
    }

    pub fn bech32(&self) -> Result<String> {
        bech32_encode(&self.0)
    }

    pub fn set_bech32(&mut self, s: &str) -> Result<()> {
        self.0 = bech32_decode(s)?;
        Ok(())
    }

    pub fn bytes(&self) -> [u8; Self::LENGTH] {
        self.0
    }
}

impl Default for Address {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<&[u8]> for Address {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        let array: [u8; Self::LENGTH] =
            bytes.try_into().map_err(|_| Error::InvalidLength {
                what: "address",
                expected: Self::LENGTH,
                actual: bytes.len(),
            })?;
        Ok(Address(array))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_public_key_umi_address_matches_known_bech32() {
        let address = Address::from_public_key(PublicKey::from_bytes([0u8; 32]));
        assert_eq!(
            address.bech32().unwrap(),
            "umi1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqr5zcpj"
        );
    }

    #[test]
    fn all_zero_buffer_is_the_genesis_address() {
        let address = Address::from_bytes([0u8; 34]);
        assert_eq!(
            address.bech32().unwrap(),
            "genesis1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqkxaddc"
        );
    }

    #[test]
    fn bech32_round_trips() {
        let s = "aaa1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqq48c9jj";
        let address = Address::from_bech32(s).unwrap();
        assert_eq!(address.bech32().unwrap(), s);
    }

    #[test]
    fn new_address_defaults_to_umi_version() {
        assert_eq!(Address::new().version(), Address::UMI);
    }
}
