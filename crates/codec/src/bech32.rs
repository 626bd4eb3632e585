//! BIP-173 Bech32 (not Bech32m) encoding of 34-byte UMI addresses,
//! using the [`prefix`](crate::prefix) codec for the human-readable
//! part in place of Bech32's usual fixed network string.

use umi_types::{Error, Result};

use crate::prefix::{prefix_to_version, version_to_prefix};

const CHARSET: &[u8; 32] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";
const GENERATOR: [u32; 5] = [0x3b6a57b2, 0x26508e6d, 0x1ea119fa, 0x3d4233dd, 0x2a1462b3];
const CHECKSUM_CONSTANT: u32 = 1;
const ADDRESS_LENGTH: usize = 34;

fn polymod(values: &[u8]) -> u32 {
    let mut chk: u32 = 1;
    for &v in values {
        let top = chk >> 25;
        chk = (chk & 0x1ff_ffff) << 5 ^ u32::from(v);
        for (i, gen) in GENERATOR.iter().enumerate() {
            if (top >> i) & 1 != 0 {
                chk ^= gen;
            }
        }
    }
    chk
}

fn hrp_expand(hrp: &str) -> Vec<u8> {
    let bytes = hrp.as_bytes();
    let mut out = Vec::with_capacity(bytes.len() * 2 + 1);
    out.extend(bytes.iter().map(|b| b >> 5));
    out.push(0);
    out.extend(bytes.iter().map(|b| b & 0x1f));
    out
}

fn create_checksum(hrp: &str, data: &[u8]) -> [u8; 6] {
    let mut values = hrp_expand(hrp);
    values.extend_from_slice(data);
    values.extend_from_slice(&[0; 6]);

    let polymod_value = polymod(&values) ^ CHECKSUM_CONSTANT;
    let mut checksum = [0u8; 6];
    for (i, slot) in checksum.iter_mut().enumerate() {
        *slot = ((polymod_value >> (5 * (5 - i))) & 0x1f) as u8;
    }
    checksum
}

fn verify_checksum(hrp: &str, data: &[u8]) -> bool {
    let mut values = hrp_expand(hrp);
    values.extend_from_slice(data);
    polymod(&values) == CHECKSUM_CONSTANT
}

/// Regroups `8`-bit bytes into `5`-bit groups, pad-appending a final
/// short group with zero bits.
fn convert_8_to_5(data: &[u8]) -> Vec<u8> {
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let mut out = Vec::with_capacity(data.len() * 8 / 5 + 1);
    for &byte in data {
        acc = (acc << 8) | u32::from(byte);
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(((acc >> bits) & 0x1f) as u8);
        }
    }
    if bits > 0 {
        out.push(((acc << (5 - bits)) & 0x1f) as u8);
    }
    out
}

/// Regroups `5`-bit groups back into `8`-bit bytes, rejecting a final
/// group that carries any non-zero padding bits or that pads out to a
/// whole extra byte.
fn convert_5_to_8(data: &[u8]) -> Result<Vec<u8>> {
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let mut out = Vec::with_capacity(data.len() * 5 / 8);
    for &group in data {
        acc = (acc << 5) | u32::from(group);
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            out.push(((acc >> bits) & 0xff) as u8);
        }
    }
    if bits >= 5 || (acc << (8 - bits)) & 0xff != 0 {
        return Err(Error::InvalidBech32 {
            reason: "non-zero padding after 5-to-8-bit conversion".to_string(),
        });
    }
    Ok(out)
}

/// Encodes a 34-byte address (2-byte big-endian version, 32-byte
/// public key) as a Bech32 string.
pub fn encode(address: &[u8; ADDRESS_LENGTH]) -> Result<String> {
    let version = u16::from_be_bytes([address[0], address[1]]);
    let prefix = version_to_prefix(version)?;

    let data = convert_8_to_5(&address[2..]);
    let checksum = create_checksum(&prefix, &data);

    let mut out = String::with_capacity(prefix.len() + 1 + data.len() + checksum.len());
    out.push_str(&prefix);
    out.push('1');
    for &group in data.iter().chain(checksum.iter()) {
        out.push(CHARSET[group as usize] as char);
    }
    Ok(out)
}

/// Decodes a Bech32 string into its 34-byte address form.
pub fn decode(s: &str) -> Result<[u8; ADDRESS_LENGTH]> {
    if s != s.to_lowercase() && s != s.to_uppercase() {
        return Err(Error::InvalidBech32 {
            reason: "mixed case".to_string(),
        });
    }
    let s = s.to_lowercase();

    let separator = s.rfind('1').ok_or_else(|| Error::InvalidBech32 {
        reason: "missing '1' separator".to_string(),
    })?;
    let (prefix, data_part) = (&s[..separator], &s[separator + 1..]);
    if prefix.is_empty() {
        return Err(Error::InvalidBech32 {
            reason: "empty prefix".to_string(),
        });
    }
    if data_part.len() < 6 {
        return Err(Error::InvalidBech32 {
            reason: "fewer than 6 data characters".to_string(),
        });
    }

    let mut data = Vec::with_capacity(data_part.len());
    for c in data_part.chars() {
        let value = CHARSET
            .iter()
            .position(|&ch| ch as char == c)
            .ok_or_else(|| Error::InvalidBech32 {
                reason: format!("character {c:?} is not in the bech32 alphabet"),
            })?;
        data.push(value as u8);
    }

    if !verify_checksum(prefix, &data) {
        return Err(Error::InvalidBech32 {
            reason: "checksum mismatch".to_string(),
        });
    }

    let payload = &data[..data.len() - 6];
    let public_key = convert_5_to_8(payload)?;
    if public_key.len() != ADDRESS_LENGTH - 2 {
        return Err(Error::InvalidBech32 {
            reason: format!(
                "decoded payload is {} bytes, expected {}",
                public_key.len(),
                ADDRESS_LENGTH - 2
            ),
        });
    }

    let version = prefix_to_version(prefix)?;
    let mut out = [0u8; ADDRESS_LENGTH];
    out[..2].copy_from_slice(&version.to_be_bytes());
    out[2..].copy_from_slice(&public_key);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_public_key_umi_address() {
        let mut address = [0u8; ADDRESS_LENGTH];
        address[..2].copy_from_slice(&21929u16.to_be_bytes());
        assert_eq!(
            encode(&address).unwrap(),
            "umi1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqr5zcpj"
        );
    }

    #[test]
    fn genesis_address() {
        let address = [0u8; ADDRESS_LENGTH];
        assert_eq!(
            encode(&address).unwrap(),
            "genesis1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqkxaddc"
        );
    }

    #[test]
    fn round_trips_through_decode_then_encode() {
        let s = "aaa1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqq48c9jj";
        let decoded = decode(s).unwrap();
        assert_eq!(encode(&decoded).unwrap(), s);
    }

    #[test]
    fn rejects_mixed_case() {
        let s = "Umi1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqr5zcpj";
        assert!(decode(s).is_err());
    }

    #[test]
    fn rejects_bad_checksum() {
        let mut s = "umi1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqr5zcpj"
            .to_string();
        s.replace_range(s.len() - 1..s.len() - 1 + 1, "q");
        assert!(decode(&s).is_err());
    }
}
