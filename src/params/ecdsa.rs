// src/params/ecdsa.rs
//
// Wire layout (curve identifier string, then the SEC1 point) grounded on
// other_examples/.../lucab-ssh-keys__src-lib.rs.rs's ECDSA decoding,
// which reads exactly `curve: STRING` then `key: BYTES` per RFC 5656
// §3.1; field names (`identifier`, `q`, `d`) follow spec.md §4.3's ECDSA
// parameter row. The three NIST curves share that layout and differ
// only in which RustCrypto elliptic-curve crate backs them, so this
// module dispatches on `Curve` rather than being generic over a shared
// trait.

use p256::elliptic_curve::sec1::ToEncodedPoint;
use rand::rngs::OsRng;

use crate::error::{KeyCodecError, Result};
use crate::schema::{schema, FieldType};
use crate::value::{ParamsMap, Value};

use super::{ExternalKeyKind, ExternalPrivateKey, ExternalPublicKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Curve {
    NistP256,
    NistP384,
    NistP521,
}

impl Curve {
    fn identifier(&self) -> &'static str {
        match self {
            Curve::NistP256 => "nistp256",
            Curve::NistP384 => "nistp384",
            Curve::NistP521 => "nistp521",
        }
    }

    fn external_kind(&self) -> ExternalKeyKind {
        match self {
            Curve::NistP256 => ExternalKeyKind::EcdsaNistP256,
            Curve::NistP384 => ExternalKeyKind::EcdsaNistP384,
            Curve::NistP521 => ExternalKeyKind::EcdsaNistP521,
        }
    }
}

pub fn public_schema(_curve: Curve) -> crate::schema::Schema {
    schema(&[("identifier", FieldType::Text), ("q", FieldType::Bytes)])
}

pub fn private_schema(curve: Curve) -> crate::schema::Schema {
    let mut s = public_schema(curve);
    s.push(("d", FieldType::Mpint));
    s
}

fn get_bytes<'a>(values: &'a ParamsMap, name: &str) -> Result<&'a [u8]> {
    match values.get(name) {
        Some(Value::Bytes(b)) => Ok(b),
        _ => Err(KeyCodecError::InvalidParameterValue(format!("missing or non-bytes field '{}'", name))),
    }
}

fn check_curve(values: &ParamsMap, curve: Curve) -> Result<()> {
    match values.get("identifier") {
        Some(Value::Text(c)) if c == curve.identifier() => Ok(()),
        Some(Value::Text(c)) => Err(KeyCodecError::InvalidParameterValue(format!(
            "curve mismatch: expected {}, got {}",
            curve.identifier(),
            c
        ))),
        _ => Err(KeyCodecError::InvalidParameterValue("missing or non-text field 'identifier'".to_string())),
    }
}

pub fn public_convert_to(values: &ParamsMap, curve: Curve, destination: ExternalKeyKind) -> Result<ExternalPublicKey> {
    if destination != curve.external_kind() {
        return Err(KeyCodecError::UnsupportedConversion(format!("ecdsa-sha2-{}", curve.identifier())));
    }
    check_curve(values, curve)?;
    let point = get_bytes(values, "q")?;
    Ok(match curve {
        Curve::NistP256 => ExternalPublicKey::EcdsaNistP256(p256::PublicKey::from_sec1_bytes(point)?),
        Curve::NistP384 => ExternalPublicKey::EcdsaNistP384(p384::PublicKey::from_sec1_bytes(point)?),
        Curve::NistP521 => ExternalPublicKey::EcdsaNistP521(p521::PublicKey::from_sec1_bytes(point)?),
    })
}

pub fn public_convert_from(external: &ExternalPublicKey, curve: Curve) -> Result<ParamsMap> {
    let point = match (external, curve) {
        (ExternalPublicKey::EcdsaNistP256(key), Curve::NistP256) => key.to_encoded_point(false).as_bytes().to_vec(),
        (ExternalPublicKey::EcdsaNistP384(key), Curve::NistP384) => key.to_encoded_point(false).as_bytes().to_vec(),
        (ExternalPublicKey::EcdsaNistP521(key), Curve::NistP521) => key.to_encoded_point(false).as_bytes().to_vec(),
        _ => return Err(KeyCodecError::UnsupportedConversion(format!("ecdsa-sha2-{}", curve.identifier()))),
    };
    let mut map = ParamsMap::new();
    map.insert("identifier", Value::Text(curve.identifier().to_string()));
    map.insert("q", Value::Bytes(point));
    Ok(map)
}

pub fn private_convert_to(values: &ParamsMap, curve: Curve, destination: ExternalKeyKind) -> Result<ExternalPrivateKey> {
    if destination != curve.external_kind() {
        return Err(KeyCodecError::UnsupportedConversion(format!("ecdsa-sha2-{}", curve.identifier())));
    }
    check_curve(values, curve)?;
    let scalar = match values.get("d") {
        Some(Value::Mpint(v)) => v.to_bytes_be().1,
        _ => return Err(KeyCodecError::InvalidParameterValue("missing or non-mpint field 'd'".to_string())),
    };
    Ok(match curve {
        Curve::NistP256 => ExternalPrivateKey::EcdsaNistP256(p256::SecretKey::from_slice(&scalar)?),
        Curve::NistP384 => ExternalPrivateKey::EcdsaNistP384(p384::SecretKey::from_slice(&scalar)?),
        Curve::NistP521 => ExternalPrivateKey::EcdsaNistP521(p521::SecretKey::from_slice(&scalar)?),
    })
}

pub fn private_convert_from(external: &ExternalPrivateKey, curve: Curve) -> Result<ParamsMap> {
    let (point, scalar) = match (external, curve) {
        (ExternalPrivateKey::EcdsaNistP256(key), Curve::NistP256) => (
            key.public_key().to_encoded_point(false).as_bytes().to_vec(),
            key.to_bytes().to_vec(),
        ),
        (ExternalPrivateKey::EcdsaNistP384(key), Curve::NistP384) => (
            key.public_key().to_encoded_point(false).as_bytes().to_vec(),
            key.to_bytes().to_vec(),
        ),
        (ExternalPrivateKey::EcdsaNistP521(key), Curve::NistP521) => (
            key.public_key().to_encoded_point(false).as_bytes().to_vec(),
            key.to_bytes().to_vec(),
        ),
        _ => return Err(KeyCodecError::UnsupportedConversion(format!("ecdsa-sha2-{}", curve.identifier()))),
    };
    let mut map = ParamsMap::new();
    map.insert("identifier", Value::Text(curve.identifier().to_string()));
    map.insert("q", Value::Bytes(point));
    map.insert(
        "d",
        Value::Mpint(num_bigint::BigInt::from_bytes_be(num_bigint::Sign::Plus, &scalar)),
    );
    Ok(map)
}

pub fn generate(curve: Curve) -> Result<ParamsMap> {
    let mut rng = OsRng;
    let external = match curve {
        Curve::NistP256 => ExternalPrivateKey::EcdsaNistP256(p256::SecretKey::random(&mut rng)),
        Curve::NistP384 => ExternalPrivateKey::EcdsaNistP384(p384::SecretKey::random(&mut rng)),
        Curve::NistP521 => ExternalPrivateKey::EcdsaNistP521(p521::SecretKey::random(&mut rng)),
    };
    private_convert_from(&external, curve)
}
