//! Protocol constants the codec must reproduce byte-for-byte. These
//! are fixed literals, not environment-dependent artifacts, so they
//! are asserted directly rather than diffed against a vector file.

use umi_codec::{bech32_decode, bech32_encode, prefix_to_version, version_to_prefix};

#[test]
fn umi_prefix_packs_to_21929() {
    assert_eq!(prefix_to_version("umi").unwrap(), 21929);
    assert_eq!(version_to_prefix(21929).unwrap(), "umi");
}

#[test]
fn zero_public_key_umi_address_bech32() {
    let mut address = [0u8; 34];
    address[..2].copy_from_slice(&21929u16.to_be_bytes());
    assert_eq!(
        bech32_encode(&address).unwrap(),
        "umi1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqr5zcpj"
    );
}

#[test]
fn zero_address_buffer_is_genesis_bech32() {
    let address = [0u8; 34];
    assert_eq!(
        bech32_encode(&address).unwrap(),
        "genesis1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqkxaddc"
    );
}

#[test]
fn aaa_prefixed_address_round_trips_through_bech32() {
    let s = "aaa1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqq48c9jj";
    let decoded = bech32_decode(s).unwrap();
    assert_eq!(bech32_encode(&decoded).unwrap(), s);
}

#[test]
fn known_public_key_umi_address_bech32() {
    let mut address = [0u8; 34];
    address[..2].copy_from_slice(&21929u16.to_be_bytes());
    address[2..].copy_from_slice(&[
        0x3b, 0x6a, 0x27, 0xbc, 0xce, 0xb6, 0xa4, 0x2d, 0x62, 0xa3, 0xa8, 0xd0, 0x2a, 0x6f, 0x0d,
        0x73, 0x65, 0x32, 0x15, 0x77, 0x1d, 0xe2, 0x43, 0xa6, 0x3a, 0xc0, 0x48, 0xa1, 0x8b, 0x59,
        0xda, 0x29,
    ]);
    assert_eq!(
        bech32_encode(&address).unwrap(),
        "umi18d4z00xwk6jz6c4r4rgz5mcdwdjny9thrh3y8f36cpy2rz6emg5s6rxnf6"
    );
}
