use umi_types::{Error, Result};

/// An Ed25519 public key: 32 bytes, opaque beyond byte access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey([u8; PublicKey::LENGTH]);

impl PublicKey {
    pub const LENGTH: usize = 32;

    pub fn from_bytes(bytes: [u8; Self::LENGTH]) -> Self {
        PublicKey(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; Self::LENGTH] {
        &self.0
    }

    pub fn bytes(&self) -> [u8; Self::LENGTH] {
        self.0
    }

    /// Verifies `signature` over `message` under this key.
    pub fn verify_signature(&self, signature: &[u8; 64], message: &[u8]) -> bool {
        umi_ed25519::verify(signature, message, &self.0)
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        let array: [u8; Self::LENGTH] =
            bytes.try_into().map_err(|_| Error::InvalidLength {
                what: "public key",
                expected: Self::LENGTH,
                actual: bytes.len(),
            })?;
        Ok(PublicKey(array))
    }
}

impl TryFrom<Vec<u8>> for PublicKey {
    type Error = Error;

    fn try_from(bytes: Vec<u8>) -> Result<Self> {
        Self::try_from(bytes.as_slice())
    }
}
