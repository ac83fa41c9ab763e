// tests/envelope_tests.rs

use num_bigint::BigInt;

use openssh_key_codec::params::{ExternalKeyKind, GenerateOptions, KeyType, PrivateKeyParams, PublicKeyParams};
use openssh_key_codec::registry;
use openssh_key_codec::value::{ParamsMap, Value};
use openssh_key_codec::{Diagnostics, KeyCodecError, PrivateKey, PublicKey, Warning};

#[test]
fn ed25519_private_key_round_trips_through_encode_decode() {
    let _ = env_logger::try_init();

    let private = PrivateKey::generate(KeyType::Ed25519, "test@example.com", &GenerateOptions::default()).unwrap();

    let bytes = private.encode().unwrap();
    let mut diagnostics = Diagnostics::new();
    let decoded = PrivateKey::decode(&bytes, &mut diagnostics).unwrap();

    assert!(diagnostics.is_empty());
    assert_eq!(decoded, private);
    assert_eq!(decoded.comment, "test@example.com");
}

#[test]
fn ed25519_public_key_derived_from_private_round_trips() {
    let private = PrivateKey::generate(KeyType::Ed25519, "", &GenerateOptions::default()).unwrap();
    let public = private.public_key().unwrap();

    let bytes = public.encode().unwrap();
    let mut diagnostics = Diagnostics::new();
    let decoded = PublicKey::decode(&bytes, &mut diagnostics).unwrap();

    assert!(diagnostics.is_empty());
    assert_eq!(decoded, public);
}

#[test]
fn excess_bytes_after_a_key_are_reported_as_a_warning_not_an_error() {
    let private = PrivateKey::generate(KeyType::Ed25519, "c", &GenerateOptions::default()).unwrap();
    let mut bytes = private.encode().unwrap();
    bytes.extend_from_slice(&[0xde, 0xad, 0xbe, 0xef]);

    let mut diagnostics = Diagnostics::new();
    let decoded = PrivateKey::decode(&bytes, &mut diagnostics).unwrap();

    assert_eq!(decoded.remainder, vec![0xde, 0xad, 0xbe, 0xef]);
    assert_eq!(diagnostics.warnings(), &[Warning::ExcessBytes { trailing: 4 }]);
}

#[test]
fn decoding_an_unknown_algorithm_identifier_is_a_fatal_error() {
    let mut diagnostics = Diagnostics::new();
    // a single length-prefixed string naming a bogus algorithm, nothing else
    let mut bytes = Vec::new();
    let name = b"ssh-not-a-real-algorithm";
    bytes.extend_from_slice(&(name.len() as u32).to_be_bytes());
    bytes.extend_from_slice(name);

    let err = PublicKey::decode(&bytes, &mut diagnostics).unwrap_err();
    assert!(matches!(err, KeyCodecError::UnknownKeyType(_)));
}

#[test]
fn certificate_identifiers_have_no_private_representation() {
    for key_type in [
        KeyType::CertRsa,
        KeyType::CertEd25519,
        KeyType::CertDss,
        KeyType::CertEcdsaNistP256,
        KeyType::CertEcdsaNistP384,
        KeyType::CertEcdsaNistP521,
        KeyType::CertSkEd25519,
        KeyType::CertSkEcdsaNistP256,
    ] {
        let err = registry::private_variant_for(key_type.identifier()).unwrap_err();
        assert!(matches!(err, KeyCodecError::NoPrivateForKeyType(_)));
    }
}

#[test]
fn registry_is_bijective_with_key_type_identifiers() {
    for key_type in KeyType::ALL {
        assert_eq!(registry::public_variant_for(key_type.identifier()).unwrap(), key_type);
    }
}

#[test]
fn ecdsa_nistp256_private_key_round_trips() {
    let private = PrivateKey::generate(KeyType::EcdsaNistP256, "ecdsa-key", &GenerateOptions::default()).unwrap();
    let bytes = private.encode().unwrap();
    let mut diagnostics = Diagnostics::new();
    let decoded = PrivateKey::decode(&bytes, &mut diagnostics).unwrap();
    assert!(diagnostics.is_empty());
    assert_eq!(decoded, private);
}

#[test]
fn conversion_round_trips_through_the_external_crypto_type() {
    let private = PrivateKey::generate(KeyType::Ed25519, "", &GenerateOptions::default()).unwrap();
    let external = private.params.convert_to(ExternalKeyKind::Ed25519).unwrap();
    let round_tripped = PrivateKeyParams::convert_from(KeyType::Ed25519, &external).unwrap();
    assert_eq!(round_tripped, private.params);
}

#[test]
fn schema_field_order_is_deterministic_across_calls() {
    assert_eq!(KeyType::Rsa.public_schema(), KeyType::Rsa.public_schema());
    assert_eq!(KeyType::CertEcdsaNistP384.public_schema(), KeyType::CertEcdsaNistP384.public_schema());
}

#[test]
fn soft_validation_failure_does_not_prevent_decode() {
    // A hand-built ed25519 public key blob whose 'public' field is the
    // wrong length: this must decode successfully with a warning, not
    // fail outright (spec.md soft-validation edge case).
    let mut bytes = Vec::new();
    let name = b"ssh-ed25519";
    bytes.extend_from_slice(&(name.len() as u32).to_be_bytes());
    bytes.extend_from_slice(name);
    let short_key = vec![1u8; 10];
    bytes.extend_from_slice(&(short_key.len() as u32).to_be_bytes());
    bytes.extend_from_slice(&short_key);

    let mut diagnostics = Diagnostics::new();
    let decoded = PublicKey::decode(&bytes, &mut diagnostics).unwrap();

    assert_eq!(decoded.params.key_type, KeyType::Ed25519);
    assert!(!diagnostics.is_empty());
}

#[test]
fn public_key_constructed_from_params_does_not_start_with_a_remainder() {
    let params = PublicKeyParams::new(KeyType::Ed25519, {
        let mut map = openssh_key_codec::value::ParamsMap::new();
        map.insert("public", openssh_key_codec::value::Value::Bytes(vec![0u8; 32]));
        map
    });
    let key = PublicKey::new(params);
    assert!(key.remainder.is_empty());
}

// Literal end-to-end scenarios (spec.md §8).

#[test]
fn rsa_public_key_encodes_to_the_documented_literal_bytes() {
    // scenario (a): header {key_type:"ssh-rsa"}, params {e:65537, n:0x010001}
    let mut values = ParamsMap::new();
    values.insert("e", Value::Mpint(BigInt::from(65537u32)));
    values.insert("n", Value::Mpint(BigInt::from(0x010001u32)));
    let key = PublicKey::new(PublicKeyParams::new(KeyType::Rsa, values));

    let bytes = key.encode().unwrap();
    let expected: Vec<u8> = vec![
        0x00, 0x00, 0x00, 0x07, b's', b's', b'h', b'-', b'r', b's', b'a', // "ssh-rsa"
        0x00, 0x00, 0x00, 0x03, 0x01, 0x00, 0x01, // e
        0x00, 0x00, 0x00, 0x03, 0x01, 0x00, 0x01, // n
    ];
    assert_eq!(bytes, expected);
}

#[test]
fn ed25519_public_key_encodes_to_the_documented_literal_bytes() {
    // scenario (b): header {key_type:"ssh-ed25519"}, params {public: 32x0xAA}
    let mut values = ParamsMap::new();
    values.insert("public", Value::Bytes(vec![0xAA; 32]));
    let key = PublicKey::new(PublicKeyParams::new(KeyType::Ed25519, values));

    let bytes = key.encode().unwrap();
    let mut expected: Vec<u8> = vec![0x00, 0x00, 0x00, 0x0B];
    expected.extend_from_slice(b"ssh-ed25519");
    expected.extend_from_slice(&[0x00, 0x00, 0x00, 0x20]);
    expected.extend(std::iter::repeat(0xAAu8).take(32));
    assert_eq!(bytes, expected);
}

#[test]
fn decoding_a_truncated_mpint_is_a_short_read_not_a_format_mismatch() {
    // scenario (d): `00 00 00 07 "ssh-rsa" 00 00 00 05 01 02` -> ShortRead
    let mut bytes: Vec<u8> = vec![0x00, 0x00, 0x00, 0x07];
    bytes.extend_from_slice(b"ssh-rsa");
    bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x05, 0x01, 0x02]);

    let mut diagnostics = Diagnostics::new();
    let err = PublicKey::decode(&bytes, &mut diagnostics).unwrap_err();
    match err {
        KeyCodecError::ShortRead { expected, available } => {
            assert_eq!(expected, 5);
            assert_eq!(available, 2);
        }
        other => panic!("expected ShortRead, got {other:?}"),
    }
}
