// src/params/rsa.rs
//
// Grounded on original_source/openssh_key/key_params.py's
// RSAPublicKeyParams/RSAPrivateKeyParams (field names/order, the
// PUBLIC_EXPONENT=65537/KEY_SIZE=4096 generation defaults) and on
// other_examples/.../picky-src-ssh-encode.rs's RSA private key encoding,
// which is the direct source for deriving `iqmp` (= q^-1 mod p) from an
// `rsa::RsaPrivateKey` via its `primes()` accessor.

use num_bigint::{BigInt, Sign};
use num_bigint_dig::ModInverse;
use rsa::traits::PrivateKeyParts;
use rsa::traits::PublicKeyParts;
use rsa::BigUint;

use crate::error::{KeyCodecError, Result};
use crate::schema::{schema, FieldType};
use crate::value::{ParamsMap, Value};

use super::{ExternalKeyKind, ExternalPrivateKey, ExternalPublicKey, GenerateOptions};

pub fn public_schema() -> crate::schema::Schema {
    schema(&[("e", FieldType::Mpint), ("n", FieldType::Mpint)])
}

pub fn private_schema() -> crate::schema::Schema {
    schema(&[
        ("n", FieldType::Mpint),
        ("e", FieldType::Mpint),
        ("d", FieldType::Mpint),
        ("iqmp", FieldType::Mpint),
        ("p", FieldType::Mpint),
        ("q", FieldType::Mpint),
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
    if destination != ExternalKeyKind::Rsa {
        return Err(KeyCodecError::UnsupportedConversion("ssh-rsa".to_string()));
    }
    let e = bigint_to_biguint(&get_mpint(values, "e")?);
    let n = bigint_to_biguint(&get_mpint(values, "n")?);
    let key = rsa::RsaPublicKey::new(n, e)?;
    Ok(ExternalPublicKey::Rsa(key))
}

pub fn public_convert_from(external: &ExternalPublicKey) -> Result<ParamsMap> {
    let ExternalPublicKey::Rsa(key) = external else {
        return Err(KeyCodecError::UnsupportedConversion("ssh-rsa".to_string()));
    };
    let mut map = ParamsMap::new();
    map.insert("e", Value::Mpint(biguint_to_bigint(key.e())));
    map.insert("n", Value::Mpint(biguint_to_bigint(key.n())));
    Ok(map)
}

pub fn private_convert_to(values: &ParamsMap, destination: ExternalKeyKind) -> Result<ExternalPrivateKey> {
    if destination != ExternalKeyKind::Rsa {
        return Err(KeyCodecError::UnsupportedConversion("ssh-rsa".to_string()));
    }
    let n = bigint_to_biguint(&get_mpint(values, "n")?);
    let e = bigint_to_biguint(&get_mpint(values, "e")?);
    let d = bigint_to_biguint(&get_mpint(values, "d")?);
    let p = bigint_to_biguint(&get_mpint(values, "p")?);
    let q = bigint_to_biguint(&get_mpint(values, "q")?);
    let key = rsa::RsaPrivateKey::from_components(n, e, d, vec![p, q])?;
    Ok(ExternalPrivateKey::Rsa(key))
}

pub fn private_convert_from(external: &ExternalPrivateKey) -> Result<ParamsMap> {
    let ExternalPrivateKey::Rsa(key) = external else {
        return Err(KeyCodecError::UnsupportedConversion("ssh-rsa".to_string()));
    };
    let primes = key.primes();
    let p = &primes[0];
    let q = &primes[1];
    let iqmp = q
        .clone()
        .mod_inverse(p)
        .ok_or_else(|| KeyCodecError::InvalidParameterValue("q has no inverse mod p".to_string()))?;
    let iqmp = BigUint::from_bytes_be(&iqmp.to_bytes_be().1);
    let mut map = ParamsMap::new();
    map.insert("n", Value::Mpint(biguint_to_bigint(key.n())));
    map.insert("e", Value::Mpint(biguint_to_bigint(key.e())));
    map.insert("d", Value::Mpint(biguint_to_bigint(key.d())));
    map.insert("iqmp", Value::Mpint(biguint_to_bigint(&iqmp)));
    map.insert("p", Value::Mpint(biguint_to_bigint(p)));
    map.insert("q", Value::Mpint(biguint_to_bigint(q)));
    Ok(map)
}

pub fn generate(options: &GenerateOptions) -> Result<ParamsMap> {
    let mut rng = rand::rngs::OsRng;
    let key = rsa::RsaPrivateKey::new_with_exp(
        &mut rng,
        options.rsa_key_size,
        &BigUint::from(options.rsa_public_exponent),
    )?;
    private_convert_from(&ExternalPrivateKey::Rsa(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    // A small modulus keeps key generation fast; the default 4096-bit
    // size is exercised by the integration tests instead.
    fn small_options() -> GenerateOptions {
        GenerateOptions {
            rsa_public_exponent: 65537,
            rsa_key_size: 512,
        }
    }

    #[test]
    fn generate_then_convert_round_trips() {
        let values = generate(&small_options()).unwrap();
        let external = private_convert_to(&values, ExternalKeyKind::Rsa).unwrap();
        let values_again = private_convert_from(&external).unwrap();
        assert_eq!(values, values_again);
    }

    #[test]
    fn public_params_derived_from_private_match() {
        let private_values = generate(&small_options()).unwrap();
        let key = match private_convert_to(&private_values, ExternalKeyKind::Rsa).unwrap() {
            ExternalPrivateKey::Rsa(k) => k,
            _ => unreachable!(),
        };
        let public_values = public_convert_from(&ExternalPublicKey::Rsa(key.to_public_key())).unwrap();
        assert_eq!(private_values.get("e"), public_values.get("e"));
        assert_eq!(private_values.get("n"), public_values.get("n"));
    }
}
