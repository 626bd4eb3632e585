//! Bidirectional mapping between a 3-lowercase-letter address prefix
//! (or the literal `genesis`) and the 16-bit version integer Bech32
//! uses as an address's human-readable part.

use umi_types::{Error, Result};

const GENESIS: &str = "genesis";

/// Packs a prefix string into its 16-bit version. `"genesis"` maps to
/// `0`; any other input must be exactly three ASCII lowercase letters,
/// mapped `a..z -> 1..26` and packed `a*1024 + b*32 + c`.
pub fn prefix_to_version(prefix: &str) -> Result<u16> {
    if prefix == GENESIS {
        return Ok(0);
    }

    let bytes = prefix.as_bytes();
    if bytes.len() != 3 {
        return Err(Error::InvalidPrefix {
            reason: format!("prefix must be 3 letters or \"genesis\", got {prefix:?}"),
        });
    }

    let mut letters = [0u16; 3];
    for (i, &b) in bytes.iter().enumerate() {
        if !b.is_ascii_lowercase() {
            return Err(Error::InvalidPrefix {
                reason: format!("byte {i} ({b:#04x}) is not an ascii lowercase letter"),
            });
        }
        letters[i] = u16::from(b - b'a' + 1);
    }

    Ok(letters[0] * 1024 + letters[1] * 32 + letters[2])
}

/// Unpacks a 16-bit version into its prefix string. `0` maps to
/// `"genesis"`; otherwise the high bit must be zero and each of the
/// three 5-bit fields must fall in `1..=26`.
pub fn version_to_prefix(version: u16) -> Result<String> {
    if version == 0 {
        return Ok(GENESIS.to_string());
    }

    if version & 0x8000 != 0 {
        return Err(Error::InvalidPrefix {
            reason: format!("version {version} has its reserved high bit set"),
        });
    }

    let a = (version >> 10) & 0x1f;
    let b = (version >> 5) & 0x1f;
    let c = version & 0x1f;

    let mut out = String::with_capacity(3);
    for (name, field) in [("a", a), ("b", b), ("c", c)] {
        if !(1..=26).contains(&field) {
            return Err(Error::InvalidPrefix {
                reason: format!("field {name} = {field} is outside 1..=26"),
            });
        }
        out.push((b'a' + (field - 1) as u8) as char);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genesis_round_trips() {
        assert_eq!(prefix_to_version("genesis").unwrap(), 0);
        assert_eq!(version_to_prefix(0).unwrap(), "genesis");
    }

    #[test]
    fn umi_is_21929() {
        assert_eq!(prefix_to_version("umi").unwrap(), 21929);
        assert_eq!(version_to_prefix(21929).unwrap(), "umi");
    }

    #[test]
    fn all_legal_versions_round_trip() {
        for a in 1..=26u16 {
            for b in 1..=26u16 {
                let v = a * 1024 + b * 32 + 13;
                let prefix = version_to_prefix(v).unwrap();
                assert_eq!(prefix_to_version(&prefix).unwrap(), v);
            }
        }
    }

    #[test]
    fn rejects_non_lowercase() {
        assert!(prefix_to_version("UMI").is_err());
        assert!(prefix_to_version("u1i").is_err());
        assert!(prefix_to_version("um").is_err());
        assert!(prefix_to_version("umii").is_err());
    }

    #[test]
    fn rejects_out_of_range_fields() {
        // field value 0 or 27..31 is outside 1..=26.
        assert!(version_to_prefix(0x001f).is_err());
        assert!(version_to_prefix(0x8000).is_err());
    }
}
