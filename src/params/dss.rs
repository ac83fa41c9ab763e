// src/params/dss.rs
//
// Grounded on original_source/openssh_key/key_params/dss.py's
// DSSPublicKeyParams/DSSPrivateKeyParams (field order p, q, g, y, and
// private x; the KEY_SIZE = 1024 generation default, noted there as
// OpenSSH's sole supported DSS key length).

use dsa::{Components, KeySize, SigningKey, VerifyingKey};
use num_bigint::{BigInt, Sign};
use num_bigint_dig::BigUint;
use rand::rngs::OsRng;

use crate::error::{KeyCodecError, Result};
use crate::schema::{schema, FieldType};
use crate::value::{ParamsMap, Value};

use super::{ExternalKeyKind, ExternalPrivateKey, ExternalPublicKey};

pub fn public_schema() -> crate::schema::Schema {
    schema(&[
        ("p", FieldType::Mpint),
        ("q", FieldType::Mpint),
        ("g", FieldType::Mpint),
        ("y", FieldType::Mpint),
    ])
}

pub fn private_schema() -> crate::schema::Schema {
    schema(&[
        ("p", FieldType::Mpint),
        ("q", FieldType::Mpint),
        ("g", FieldType::Mpint),
        ("y", FieldType::Mpint),
        ("x", FieldType::Mpint),
    ])
}

fn bigint_to_biguint(v: &BigInt) -> BigUint {
    let (_, bytes) = v.to_bytes_be();
    BigUint::from_bytes_be(&bytes)
}

fn biguint_to_bigint(v: &BigUint) -> BigInt {
    BigInt::from_bytes_be(Sign::Plus, &v.to_bytes_be())
}

fn get_mpint(values: &ParamsMap, name: &str) -> Result<BigInt> {
    match values.get(name) {
        Some(Value::Mpint(v)) => Ok(v.clone()),
        _ => Err(KeyCodecError::InvalidParameterValue(format!("missing or non-mpint field '{}'", name))),
    }
}

pub fn public_convert_to(values: &ParamsMap, destination: ExternalKeyKind) -> Result<ExternalPublicKey> {
    if destination != ExternalKeyKind::Dsa {
        return Err(KeyCodecError::UnsupportedConversion("ssh-dss".to_string()));
    }
    let p = bigint_to_biguint(&get_mpint(values, "p")?);
    let q = bigint_to_biguint(&get_mpint(values, "q")?);
    let g = bigint_to_biguint(&get_mpint(values, "g")?);
    let y = bigint_to_biguint(&get_mpint(values, "y")?);
    let components = Components::from_components(p, q, g)
        .map_err(|e| KeyCodecError::InvalidParameterValue(e.to_string()))?;
    let key = VerifyingKey::from_components(components, y)
        .map_err(|e| KeyCodecError::InvalidParameterValue(e.to_string()))?;
    Ok(ExternalPublicKey::Dsa(key))
}

pub fn public_convert_from(external: &ExternalPublicKey) -> Result<ParamsMap> {
    let ExternalPublicKey::Dsa(key) = external else {
        return Err(KeyCodecError::UnsupportedConversion("ssh-dss".to_string()));
    };
    let components = key.components();
    let mut map = ParamsMap::new();
    map.insert("p", Value::Mpint(biguint_to_bigint(components.p())));
    map.insert("q", Value::Mpint(biguint_to_bigint(components.q())));
    map.insert("g", Value::Mpint(biguint_to_bigint(components.g())));
    map.insert("y", Value::Mpint(biguint_to_bigint(key.y())));
    Ok(map)
}

pub fn private_convert_to(values: &ParamsMap, destination: ExternalKeyKind) -> Result<ExternalPrivateKey> {
    if destination != ExternalKeyKind::Dsa {
        return Err(KeyCodecError::UnsupportedConversion("ssh-dss".to_string()));
    }
    let p = bigint_to_biguint(&get_mpint(values, "p")?);
    let q = bigint_to_biguint(&get_mpint(values, "q")?);
    let g = bigint_to_biguint(&get_mpint(values, "g")?);
    let y = bigint_to_biguint(&get_mpint(values, "y")?);
    let x = bigint_to_biguint(&get_mpint(values, "x")?);
    let components = Components::from_components(p, q, g)
        .map_err(|e| KeyCodecError::InvalidParameterValue(e.to_string()))?;
    let verifying_key = VerifyingKey::from_components(components, y)
        .map_err(|e| KeyCodecError::InvalidParameterValue(e.to_string()))?;
    let key = SigningKey::from_components(verifying_key, x)
        .map_err(|e| KeyCodecError::InvalidParameterValue(e.to_string()))?;
    Ok(ExternalPrivateKey::Dsa(key))
}

pub fn private_convert_from(external: &ExternalPrivateKey) -> Result<ParamsMap> {
    let ExternalPrivateKey::Dsa(key) = external else {
        return Err(KeyCodecError::UnsupportedConversion("ssh-dss".to_string()));
    };
    let verifying_key = key.verifying_key();
    let components = verifying_key.components();
    let mut map = ParamsMap::new();
    map.insert("p", Value::Mpint(biguint_to_bigint(components.p())));
    map.insert("q", Value::Mpint(biguint_to_bigint(components.q())));
    map.insert("g", Value::Mpint(biguint_to_bigint(components.g())));
    map.insert("y", Value::Mpint(biguint_to_bigint(verifying_key.y())));
    map.insert("x", Value::Mpint(biguint_to_bigint(key.x())));
    Ok(map)
}

pub fn generate() -> Result<ParamsMap> {
    let mut rng = OsRng;
    let components = Components::generate(&mut rng, KeySize::DSA_1024_160);
    let signing_key = SigningKey::generate(&mut rng, components);
    private_convert_from(&ExternalPrivateKey::Dsa(signing_key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_then_convert_round_trips() {
        let values = generate().unwrap();
        let external = private_convert_to(&values, ExternalKeyKind::Dsa).unwrap();
        let values_again = private_convert_from(&external).unwrap();
        assert_eq!(values, values_again);
    }

    #[test]
    fn schemas_match_documented_field_order() {
        assert_eq!(
            public_schema().iter().map(|(n, _)| *n).collect::<Vec<_>>(),
            vec!["p", "q", "g", "y"]
        );
        assert_eq!(
            private_schema().iter().map(|(n, _)| *n).collect::<Vec<_>>(),
            vec!["p", "q", "g", "y", "x"]
        );
    }
}
