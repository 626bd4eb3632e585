use umi_types::{Error, Result};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::public_key::PublicKey;

const MAX_SEED_LENGTH: usize = 128;

/// An Ed25519 expanded secret key: the 64-byte `seed || public_key`
/// combined form. Zeroized on drop; `Debug` never prints the bytes.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey([u8; SecretKey::LENGTH]);

impl SecretKey {
    pub const LENGTH: usize = 64;

    pub fn from_bytes(bytes: [u8; Self::LENGTH]) -> Self {
        SecretKey(bytes)
    }

    /// Derives a secret key from a seed of arbitrary length. A
    /// 32-byte seed is used directly; any other length up to 128
    /// bytes is normalized to 32 bytes via SHA-256 first.
    pub fn from_seed(seed: &[u8]) -> Result<Self> {
        let normalized: [u8; 32] = if seed.len() == 32 {
            seed.try_into().expect("length checked above")
        } else {
            if seed.len() > MAX_SEED_LENGTH {
                return Err(Error::InvalidLength {
                    what: "secret key seed",
                    expected: MAX_SEED_LENGTH,
                    actual: seed.len(),
                });
            }
            umi_hash::sha256(seed)
        };

        let (secret, _public) = umi_ed25519::keypair_from_seed(&normalized);
        Ok(SecretKey(secret))
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey::from_bytes(umi_ed25519::public_from_secret(&self.0))
    }

    pub fn sign(&self, message: &[u8]) -> [u8; 64] {
        umi_ed25519::sign(message, &self.0)
    }

    pub fn bytes(&self) -> [u8; Self::LENGTH] {
        self.0
    }
}

impl TryFrom<&[u8]> for SecretKey {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        let array: [u8; Self::LENGTH] =
            bytes.try_into().map_err(|_| Error::InvalidLength {
                what: "secret key",
                expected: Self::LENGTH,
                actual: bytes.len(),
            })?;
        Ok(SecretKey(array))
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SecretKey").field(&"..").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_seed_derives_the_known_public_key() {
        let sk = SecretKey::from_seed(&[0u8; 32]).unwrap();
        assert_eq!(
            sk.public_key().bytes(),
            [
                0x3b, 0x6a, 0x27, 0xbc, 0xce, 0xb6, 0xa4, 0x2d, 0x62, 0xa3, 0xa8, 0xd0, 0x2a,
                0x6f, 0x0d, 0x73, 0x65, 0x32, 0x15, 0x77, 0x1d, 0xe2, 0x43, 0xa6, 0x3a, 0xc0,
                0x48, 0xa1, 0x8b, 0x59, 0xda, 0x29,
            ]
        );
    }

    #[test]
    fn non_32_byte_seed_is_normalized_via_sha256() {
        let direct = SecretKey::from_seed(&[0u8; 32]).unwrap();
        let normalized = SecretKey::from_seed(&[]).unwrap();
        assert_ne!(direct.public_key().bytes(), normalized.public_key().bytes());
    }

    #[test]
    fn rejects_overlong_seed() {
        assert!(SecretKey::from_seed(&[0u8; 129]).is_err());
    }

    #[test]
    fn debug_does_not_print_key_material() {
        let sk = SecretKey::from_seed(&[1u8; 32]).unwrap();
        assert_eq!(format!("{sk:?}"), "SecretKey(\"..\")");
    }
}
