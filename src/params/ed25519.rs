// src/params/ed25519.rs
//
// Grounded on original_source/openssh_key/key_params.py's
// Ed25519PublicKeyParams/Ed25519PrivateKeyParams (the 'public' and
// 'private_public' field names, and the soft validation that checks
// 'private_public' ends with 'public') and on src/keygen.rs, which
// generates an Ed25519 keypair off `OsRng` for exactly this algorithm
// (`SigningKey::generate` takes the rand_core-0.6 `OsRng` from rand 0.8
// directly, unlike dalek 1.x's `Keypair::generate`).

use ed25519_dalek::{SigningKey, VerifyingKey};
use rand::rngs::OsRng;

use crate::diagnostics::{Diagnostics, Warning};
use crate::error::{KeyCodecError, Result};
use crate::schema::{schema, FieldType};
use crate::value::{ParamsMap, Value};

use super::{ExternalKeyKind, ExternalPrivateKey, ExternalPublicKey};

const KEY_SIZE: usize = 32;

/// Warns if a present `public` field isn't 32 bytes (original:
/// `Ed25519PublicKeyParams.check_params_are_valid`).
pub fn soft_validate_public(values: &ParamsMap, diagnostics: &mut Diagnostics) {
    if let Some(Value::Bytes(public)) = values.get("public") {
        if public.len() != KEY_SIZE {
            diagnostics.push(Warning::SoftValidationFailed {
                message: format!("public key not of length {}", KEY_SIZE),
            });
        }
    }
}

/// Warns if `private_public`'s trailing 32 bytes don't match `public`,
/// or aren't themselves 32 bytes long (original:
/// `Ed25519PrivateKeyParams.check_params_are_valid`).
pub fn soft_validate_private(values: &ParamsMap, diagnostics: &mut Diagnostics) {
    let (Some(Value::Bytes(private_public)), Some(Value::Bytes(public))) =
        (values.get("private_public"), values.get("public"))
    else {
        return;
    };
    if private_public.len() < KEY_SIZE {
        diagnostics.push(Warning::SoftValidationFailed {
            message: format!("private key not of length {}", KEY_SIZE),
        });
        return;
    }
    let embedded_public = &private_public[KEY_SIZE..];
    if embedded_public != public.as_slice() {
        diagnostics.push(Warning::SoftValidationFailed {
            message: "public key does not match".to_string(),
        });
    }
    if embedded_public.len() != KEY_SIZE {
        diagnostics.push(Warning::SoftValidationFailed {
            message: format!("private key not of length {}", KEY_SIZE),
        });
    }
}

pub fn public_schema() -> crate::schema::Schema {
    schema(&[("public", FieldType::Bytes)])
}

pub fn private_schema() -> crate::schema::Schema {
    schema(&[("public", FieldType::Bytes), ("private_public", FieldType::Bytes)])
}

fn get_bytes<'a>(values: &'a ParamsMap, name: &str) -> Result<&'a [u8]> {
    match values.get(name) {
        Some(Value::Bytes(b)) => Ok(b),
        _ => Err(KeyCodecError::InvalidParameterValue(format!("missing or non-bytes field '{}'", name))),
    }
}

fn to_array(bytes: &[u8]) -> Result<[u8; KEY_SIZE]> {
    bytes
        .try_into()
        .map_err(|_| KeyCodecError::InvalidParameterValue(format!("expected {} byte(s), got {}", KEY_SIZE, bytes.len())))
}

pub fn public_convert_to(values: &ParamsMap, destination: ExternalKeyKind) -> Result<ExternalPublicKey> {
    if destination != ExternalKeyKind::Ed25519 {
        return Err(KeyCodecError::UnsupportedConversion("ssh-ed25519".to_string()));
    }
    let bytes = to_array(get_bytes(values, "public")?)?;
    let verifying_key = VerifyingKey::from_bytes(&bytes)?;
    Ok(ExternalPublicKey::Ed25519(verifying_key))
}

pub fn public_convert_from(external: &ExternalPublicKey) -> Result<ParamsMap> {
    let ExternalPublicKey::Ed25519(key) = external else {
        return Err(KeyCodecError::UnsupportedConversion("ssh-ed25519".to_string()));
    };
    let mut map = ParamsMap::new();
    map.insert("public", Value::Bytes(key.to_bytes().to_vec()));
    Ok(map)
}

pub fn private_convert_to(values: &ParamsMap, destination: ExternalKeyKind) -> Result<ExternalPrivateKey> {
    if destination != ExternalKeyKind::Ed25519 {
        return Err(KeyCodecError::UnsupportedConversion("ssh-ed25519".to_string()));
    }
    let private_public = get_bytes(values, "private_public")?;
    if private_public.len() < KEY_SIZE {
        return Err(KeyCodecError::InvalidParameterValue(format!(
            "field 'private_public' shorter than {} byte(s)",
            KEY_SIZE
        )));
    }
    let seed = to_array(&private_public[..KEY_SIZE])?;
    let signing_key = SigningKey::from_bytes(&seed);
    Ok(ExternalPrivateKey::Ed25519(signing_key))
}

pub fn private_convert_from(external: &ExternalPrivateKey) -> Result<ParamsMap> {
    let ExternalPrivateKey::Ed25519(signing_key) = external else {
        return Err(KeyCodecError::UnsupportedConversion("ssh-ed25519".to_string()));
    };
    let public_bytes = signing_key.verifying_key().to_bytes().to_vec();
    let mut private_public = signing_key.to_bytes().to_vec();
    private_public.extend_from_slice(&public_bytes);
    let mut map = ParamsMap::new();
    map.insert("public", Value::Bytes(public_bytes));
    map.insert("private_public", Value::Bytes(private_public));
    Ok(map)
}

pub fn generate() -> Result<ParamsMap> {
    let mut csprng = OsRng;
    let signing_key = SigningKey::generate(&mut csprng);
    private_convert_from(&ExternalPrivateKey::Ed25519(signing_key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Diagnostics;

    #[test]
    fn generate_then_convert_round_trips() {
        let values = generate().unwrap();
        let external = private_convert_to(&values, ExternalKeyKind::Ed25519).unwrap();
        let values_again = private_convert_from(&external).unwrap();
        assert_eq!(values, values_again);
    }

    #[test]
    fn public_key_derived_from_private_matches_stored_public() {
        let private_values = generate().unwrap();
        let signing_key = match private_convert_to(&private_values, ExternalKeyKind::Ed25519).unwrap() {
            ExternalPrivateKey::Ed25519(sk) => sk,
            _ => unreachable!(),
        };
        let public_values = public_convert_from(&ExternalPublicKey::Ed25519(signing_key.verifying_key())).unwrap();
        assert_eq!(private_values.get("public"), public_values.get("public"));
    }

    #[test]
    fn soft_validation_warns_on_wrong_length_public_key() {
        let mut values = ParamsMap::new();
        values.insert("public", Value::Bytes(vec![0u8; 10]));
        let mut diagnostics = Diagnostics::new();
        soft_validate_public(&values, &mut diagnostics);
        assert_eq!(diagnostics.warnings().len(), 1);
    }

    #[test]
    fn soft_validation_warns_when_embedded_public_mismatches() {
        let mut values = ParamsMap::new();
        values.insert("public", Value::Bytes(vec![1u8; KEY_SIZE]));
        values.insert("private_public", Value::Bytes(vec![0u8; 2 * KEY_SIZE]));
        let mut diagnostics = Diagnostics::new();
        soft_validate_private(&values, &mut diagnostics);
        assert_eq!(diagnostics.warnings().len(), 1);
    }
}
