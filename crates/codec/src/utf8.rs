//! Self-contained UTF-8 codec operating on UTF-16 code units (the
//! representation the wider protocol's other language bindings use
//! for strings), independent of any platform transcoder. The decoder
//! splits supplementary-plane code points into surrogate pairs; the
//! encoder reassembles them.

use umi_types::{Error, Result};

const HIGH_SURROGATE_START: u32 = 0xd800;
const HIGH_SURROGATE_END: u32 = 0xdbff;
const LOW_SURROGATE_START: u32 = 0xdc00;
const LOW_SURROGATE_END: u32 = 0xdfff;
const SUPPLEMENTARY_OFFSET: u32 = 0x10000;

/// Encodes a sequence of UTF-16 code units (surrogate pairs included)
/// as canonical UTF-8 bytes.
pub fn encode(units: &[u16]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(units.len() * 2);
    let mut i = 0;
    while i < units.len() {
        let unit = u32::from(units[i]);

        let code_point = if (HIGH_SURROGATE_START..=HIGH_SURROGATE_END).contains(&unit) {
            let low = units.get(i + 1).copied().map(u32::from).ok_or_else(|| {
                Error::InvalidType {
                    what: "unpaired high surrogate at end of input".to_string(),
                }
            })?;
            if !(LOW_SURROGATE_START..=LOW_SURROGATE_END).contains(&low) {
                return Err(Error::InvalidType {
                    what: format!("high surrogate {unit:#06x} not followed by a low surrogate"),
                });
            }
            i += 1;
            SUPPLEMENTARY_OFFSET + ((unit - HIGH_SURROGATE_START) << 10) + (low - LOW_SURROGATE_START)
        } else if (LOW_SURROGATE_START..=LOW_SURROGATE_END).contains(&unit) {
            return Err(Error::InvalidType {
                what: format!("unpaired low surrogate {unit:#06x}"),
            });
        } else {
            unit
        };

        push_scalar(&mut out, code_point);
        i += 1;
    }
    Ok(out)
}

fn push_scalar(out: &mut Vec<u8>, code_point: u32) {
    if code_point < 0x80 {
        out.push(code_point as u8);
    } else if code_point < 0x800 {
        out.push(0xc0 | (code_point >> 6) as u8);
        out.push(0x80 | (code_point & 0x3f) as u8);
    } else if code_point < 0x10000 {
        out.push(0xe0 | (code_point >> 12) as u8);
        out.push(0x80 | ((code_point >> 6) & 0x3f) as u8);
        out.push(0x80 | (code_point & 0x3f) as u8);
    } else {
        out.push(0xf0 | (code_point >> 18) as u8);
        out.push(0x80 | ((code_point >> 12) & 0x3f) as u8);
        out.push(0x80 | ((code_point >> 6) & 0x3f) as u8);
        out.push(0x80 | (code_point & 0x3f) as u8);
    }
}

/// Decodes canonical UTF-8 bytes into UTF-16 code units, splitting any
/// supplementary-plane code point into a surrogate pair.
pub fn decode(bytes: &[u8]) -> Result<Vec<u16>> {
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let lead = bytes[i];
        let (len, mut code_point) = if lead & 0x80 == 0 {
            (1, u32::from(lead))
        } else if lead & 0xe0 == 0xc0 {
            (2, u32::from(lead & 0x1f))
        } else if lead & 0xf0 == 0xe0 {
            (3, u32::from(lead & 0x0f))
        } else if lead & 0xf8 == 0xf0 {
            (4, u32::from(lead & 0x07))
        } else {
            return Err(Error::InvalidType {
                what: format!("byte {i} ({lead:#04x}) is not a valid utf-8 lead byte"),
            });
        };

        if i + len > bytes.len() {
            return Err(Error::InvalidType {
                what: format!("truncated utf-8 sequence starting at byte {i}"),
            });
        }

        for &continuation in &bytes[i + 1..i + len] {
            if continuation & 0xc0 != 0x80 {
                return Err(Error::InvalidType {
                    what: format!("byte {i} has a malformed continuation byte"),
                });
            }
            code_point = (code_point << 6) | u32::from(continuation & 0x3f);
        }

        if code_point >= SUPPLEMENTARY_OFFSET {
            let adjusted = code_point - SUPPLEMENTARY_OFFSET;
            out.push((HIGH_SURROGATE_START + (adjusted >> 10)) as u16);
            out.push((LOW_SURROGATE_START + (adjusted & 0x3ff)) as u16);
        } else {
            out.push(code_point as u16);
        }

        i += len;
    }
    Ok(out)
}

/// Convenience wrapper over [`encode`] for a Rust `&str`.
pub fn encode_str(s: &str) -> Vec<u8> {
    let units: Vec<u16> = s.encode_utf16().collect();
    encode(&units).expect("str::encode_utf16 never produces unpaired surrogates")
}

/// Convenience wrapper over [`decode`] that reassembles a Rust
/// `String`, failing if the bytes are not valid UTF-8.
pub fn decode_to_string(bytes: &[u8]) -> Result<String> {
    let units = decode(bytes)?;
    String::from_utf16(&units).map_err(|_| Error::InvalidType {
        what: "decoded utf-16 units are not a valid string".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_round_trips() {
        let s = "hello, umi";
        assert_eq!(decode_to_string(&encode_str(s)).unwrap(), s);
    }

    #[test]
    fn multibyte_round_trips() {
        let s = "héllo 日本語";
        let bytes = encode_str(s);
        assert_eq!(bytes, s.as_bytes());
        assert_eq!(decode_to_string(&bytes).unwrap(), s);
    }

    #[test]
    fn supplementary_plane_round_trips_via_surrogate_pair() {
        let s = "\u{1f600} test";
        let bytes = encode_str(s);
        assert_eq!(bytes, s.as_bytes());
        assert_eq!(decode_to_string(&bytes).unwrap(), s);
    }

    #[test]
    fn rejects_truncated_sequence() {
        assert!(decode(&[0xe2, 0x82]).is_err());
    }

    #[test]
    fn rejects_unpaired_high_surrogate() {
        assert!(encode(&[0xd800]).is_err());
    }
}
