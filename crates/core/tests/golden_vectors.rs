//! End-to-end scenarios fixed by the protocol: known seeds, keys, and
//! addresses paired with their expected bech32/hash output. These are
//! protocol constants, not environment-dependent artifacts, so they
//! are asserted directly against literals rather than regenerated.

use umi_core::{Address, PublicKey, SecretKey, Transaction, TransactionVersion};

#[test]
fn empty_basic_transaction_hash() {
    let tx = Transaction::from_bytes([0u8; 150]);
    let hex: String = tx.hash().iter().map(|b| format!("{b:02x}")).collect();
    assert_eq!(
        hex,
        "1d83518b897b14e2943990eff655838246cc0207a7c95a5f3dfccc2e395f8bbf"
    );
}

#[test]
fn address_from_zero_secret_key_seed() {
    let sk = SecretKey::from_seed(&[0u8; 32]).unwrap();
    let address = Address::from_public_key(sk.public_key());
    assert_eq!(
        address.bech32().unwrap(),
        "umi18d4z00xwk6jz6c4r4rgz5mcdwdjny9thrh3y8f36cpy2rz6emg5s6rxnf6"
    );
}

#[test]
fn address_from_zero_public_key() {
    let address = Address::from_public_key(PublicKey::from_bytes([0u8; 32]));
    assert_eq!(
        address.bech32().unwrap(),
        "umi1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqr5zcpj"
    );
}

#[test]
fn bech32_round_trip_is_identity() {
    let s = "aaa1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqq48c9jj";
    let address = Address::from_bech32(s).unwrap();
    assert_eq!(address.bech32().unwrap(), s);
}

#[test]
fn genesis_address_bech32() {
    let address = Address::from_bytes([0u8; 34]);
    assert_eq!(
        address.bech32().unwrap(),
        "genesis1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqkxaddc"
    );
}

#[test]
fn sign_and_verify_a_basic_transaction() {
    let sk = SecretKey::from_seed(&[0u8; 32]).unwrap();
    let sender = Address::from_secret_key(&sk);

    let mut tx = Transaction::new();
    tx.set_version(TransactionVersion::Basic).unwrap();
    tx.set_sender(sender).unwrap();
    tx.set_recipient(Address::new()).unwrap();
    tx.set_value(1).unwrap();
    tx.set_nonce(0).unwrap();
    tx.sign(&sk).unwrap();

    assert!(tx.verify().unwrap());
}
