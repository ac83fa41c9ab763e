// src/params/mod.rs
//
// The parameter variant model of spec.md §4.3 and the algorithm registry
// of §4.4, unified in one tagged enum per spec.md §9's redesign note:
// "a closed, tagged enumeration of key types replaces the open-ended
// subclass hierarchy of the original; no need for runtime subclass
// traversal to find a matching parameter class." `KeyType` is at once
// the variant tag and the registry/factory key.
//
// Grounded on original_source/openssh_key/key_params.py and
// original_source/openssh_key/key_params/{common,dss}.py for schema
// field names and order, and on
// original_source/tests/key_params/test_factory.py for the full set of
// recognized identifier strings.

pub mod cert;
pub mod dss;
pub mod ecdsa;
pub mod ed25519;
pub mod rsa;
pub mod sk;

use crate::diagnostics::Diagnostics;
use crate::error::{KeyCodecError, Result};
use crate::schema::Schema;
use crate::value::ParamsMap;

/// Every OpenSSH public/private key algorithm this crate recognizes,
/// including certificate variants (spec.md §4.3). The identifier string
/// is the exact value that appears as the first field of an OpenSSH key
/// blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    Rsa,
    Ed25519,
    Dss,
    EcdsaNistP256,
    EcdsaNistP384,
    EcdsaNistP521,
    SkEd25519,
    SkEcdsaNistP256,
    CertRsa,
    CertEd25519,
    CertDss,
    CertEcdsaNistP256,
    CertEcdsaNistP384,
    CertEcdsaNistP521,
    CertSkEd25519,
    CertSkEcdsaNistP256,
}

impl KeyType {
    pub const ALL: [KeyType; 16] = [
        KeyType::Rsa,
        KeyType::Ed25519,
        KeyType::Dss,
        KeyType::EcdsaNistP256,
        KeyType::EcdsaNistP384,
        KeyType::EcdsaNistP521,
        KeyType::SkEd25519,
        KeyType::SkEcdsaNistP256,
        KeyType::CertRsa,
        KeyType::CertEd25519,
        KeyType::CertDss,
        KeyType::CertEcdsaNistP256,
        KeyType::CertEcdsaNistP384,
        KeyType::CertEcdsaNistP521,
        KeyType::CertSkEd25519,
        KeyType::CertSkEcdsaNistP256,
    ];

    /// The wire identifier string for this key type (the `header.key_type`
    /// field of spec.md §5.1).
    pub fn identifier(&self) -> &'static str {
        match self {
            KeyType::Rsa => "ssh-rsa",
            KeyType::Ed25519 => "ssh-ed25519",
            KeyType::Dss => "ssh-dss",
            KeyType::EcdsaNistP256 => "ecdsa-sha2-nistp256",
            KeyType::EcdsaNistP384 => "ecdsa-sha2-nistp384",
            KeyType::EcdsaNistP521 => "ecdsa-sha2-nistp521",
            KeyType::SkEd25519 => "sk-ssh-ed25519@openssh.com",
            KeyType::SkEcdsaNistP256 => "sk-ecdsa-sha2-nistp256@openssh.com",
            KeyType::CertRsa => "ssh-rsa-cert-v01@openssh.com",
            KeyType::CertEd25519 => "ssh-ed25519-cert-v01@openssh.com",
            KeyType::CertDss => "ssh-dss-cert-v01@openssh.com",
            KeyType::CertEcdsaNistP256 => "ecdsa-sha2-nistp256-cert-v01@openssh.com",
            KeyType::CertEcdsaNistP384 => "ecdsa-sha2-nistp384-cert-v01@openssh.com",
            KeyType::CertEcdsaNistP521 => "ecdsa-sha2-nistp521-cert-v01@openssh.com",
            KeyType::CertSkEd25519 => "sk-ssh-ed25519-cert-v01@openssh.com",
            KeyType::CertSkEcdsaNistP256 => "sk-ecdsa-sha2-nistp256-cert-v01@openssh.com",
        }
    }

    /// The registry/factory lookup of spec.md §4.4: maps an identifier
    /// string read off the wire to its `KeyType`.
    pub fn from_identifier(identifier: &str) -> Result<KeyType> {
        Self::ALL
            .into_iter()
            .find(|kt| kt.identifier() == identifier)
            .ok_or_else(|| KeyCodecError::UnknownKeyType(identifier.to_string()))
    }

    pub fn is_certificate(&self) -> bool {
        matches!(
            self,
            KeyType::CertRsa
                | KeyType::CertEd25519
                | KeyType::CertDss
                | KeyType::CertEcdsaNistP256
                | KeyType::CertEcdsaNistP384
                | KeyType::CertEcdsaNistP521
                | KeyType::CertSkEd25519
                | KeyType::CertSkEcdsaNistP256
        )
    }

    pub fn is_security_key(&self) -> bool {
        matches!(
            self,
            KeyType::SkEd25519 | KeyType::SkEcdsaNistP256 | KeyType::CertSkEd25519 | KeyType::CertSkEcdsaNistP256
        )
    }

    /// Certificate variants have no independent private representation:
    /// a certificate's private key is the private key of the algorithm
    /// it certifies (spec.md §4.3 edge case).
    pub fn has_private(&self) -> bool {
        !self.is_certificate()
    }

    /// The ordered public parameter schema for this key type.
    pub fn public_schema(&self) -> Schema {
        use KeyType::*;
        match self {
            Rsa => rsa::public_schema(),
            Ed25519 => ed25519::public_schema(),
            Dss => dss::public_schema(),
            EcdsaNistP256 => ecdsa::public_schema(ecdsa::Curve::NistP256),
            EcdsaNistP384 => ecdsa::public_schema(ecdsa::Curve::NistP384),
            EcdsaNistP521 => ecdsa::public_schema(ecdsa::Curve::NistP521),
            SkEd25519 => sk::public_schema_ed25519(),
            SkEcdsaNistP256 => sk::public_schema_ecdsa(),
            CertRsa => cert::public_schema(&rsa::public_schema()),
            CertEd25519 => cert::public_schema(&ed25519::public_schema()),
            CertDss => cert::public_schema(&dss::public_schema()),
            CertEcdsaNistP256 => cert::public_schema(&ecdsa::public_schema(ecdsa::Curve::NistP256)),
            CertEcdsaNistP384 => cert::public_schema(&ecdsa::public_schema(ecdsa::Curve::NistP384)),
            CertEcdsaNistP521 => cert::public_schema(&ecdsa::public_schema(ecdsa::Curve::NistP521)),
            CertSkEd25519 => cert::public_schema(&sk::public_schema_ed25519()),
            CertSkEcdsaNistP256 => cert::public_schema(&sk::public_schema_ecdsa()),
        }
    }

    /// The ordered private parameter schema for this key type.
    ///
    /// # Panics
    /// Never panics; certificate types return
    /// `Err(NoPrivateForKeyType)` via [`KeyType::private_schema_checked`].
    /// This method is for callers who have already confirmed
    /// `has_private()`.
    pub fn private_schema(&self) -> Schema {
        use KeyType::*;
        match self {
            Rsa => rsa::private_schema(),
            Ed25519 => ed25519::private_schema(),
            Dss => dss::private_schema(),
            EcdsaNistP256 => ecdsa::private_schema(ecdsa::Curve::NistP256),
            EcdsaNistP384 => ecdsa::private_schema(ecdsa::Curve::NistP384),
            EcdsaNistP521 => ecdsa::private_schema(ecdsa::Curve::NistP521),
            SkEd25519 => sk::private_schema_ed25519(),
            SkEcdsaNistP256 => sk::private_schema_ecdsa(),
            CertRsa | CertEd25519 | CertDss | CertEcdsaNistP256 | CertEcdsaNistP384 | CertEcdsaNistP521
            | CertSkEd25519 | CertSkEcdsaNistP256 => {
                panic!("certificate key types have no private schema; call has_private() first")
            }
        }
    }

    pub fn private_schema_checked(&self) -> Result<Schema> {
        if !self.has_private() {
            return Err(KeyCodecError::NoPrivateForKeyType(self.identifier().to_string()));
        }
        Ok(self.private_schema())
    }
}

/// A decoded or to-be-encoded set of public key parameters, tagged by
/// the key type whose schema it conforms to (spec.md §4.3's "Parameter
/// object").
#[derive(Debug, Clone, PartialEq)]
pub struct PublicKeyParams {
    pub key_type: KeyType,
    pub values: ParamsMap,
}

impl PublicKeyParams {
    pub fn new(key_type: KeyType, values: ParamsMap) -> Self {
        PublicKeyParams { key_type, values }
    }

    pub fn validate(&self, diagnostics: &mut Diagnostics) {
        crate::codec::check_mapping_matches_schema(&self.values, &self.key_type.public_schema(), diagnostics);
        if self.key_type == KeyType::Ed25519 {
            ed25519::soft_validate_public(&self.values, diagnostics);
        }
    }

    pub fn convert_to(&self, destination: ExternalKeyKind) -> Result<ExternalPublicKey> {
        match self.key_type {
            KeyType::Rsa => rsa::public_convert_to(&self.values, destination),
            KeyType::Ed25519 => ed25519::public_convert_to(&self.values, destination),
            KeyType::Dss => dss::public_convert_to(&self.values, destination),
            KeyType::EcdsaNistP256 => ecdsa::public_convert_to(&self.values, ecdsa::Curve::NistP256, destination),
            KeyType::EcdsaNistP384 => ecdsa::public_convert_to(&self.values, ecdsa::Curve::NistP384, destination),
            KeyType::EcdsaNistP521 => ecdsa::public_convert_to(&self.values, ecdsa::Curve::NistP521, destination),
            _ => Err(KeyCodecError::UnsupportedConversion(self.key_type.identifier().to_string())),
        }
    }

    pub fn convert_from(key_type: KeyType, external: &ExternalPublicKey) -> Result<PublicKeyParams> {
        let values = match key_type {
            KeyType::Rsa => rsa::public_convert_from(external)?,
            KeyType::Ed25519 => ed25519::public_convert_from(external)?,
            KeyType::Dss => dss::public_convert_from(external)?,
            KeyType::EcdsaNistP256 => ecdsa::public_convert_from(external, ecdsa::Curve::NistP256)?,
            KeyType::EcdsaNistP384 => ecdsa::public_convert_from(external, ecdsa::Curve::NistP384)?,
            KeyType::EcdsaNistP521 => ecdsa::public_convert_from(external, ecdsa::Curve::NistP521)?,
            _ => return Err(KeyCodecError::UnsupportedConversion(key_type.identifier().to_string())),
        };
        Ok(PublicKeyParams::new(key_type, values))
    }
}

/// A decoded or to-be-encoded set of private key parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct PrivateKeyParams {
    pub key_type: KeyType,
    pub values: ParamsMap,
}

impl PrivateKeyParams {
    pub fn new(key_type: KeyType, values: ParamsMap) -> Self {
        PrivateKeyParams { key_type, values }
    }

    pub fn validate(&self, diagnostics: &mut Diagnostics) -> Result<()> {
        crate::codec::check_mapping_matches_schema(&self.values, &self.key_type.private_schema_checked()?, diagnostics);
        if self.key_type == KeyType::Ed25519 {
            ed25519::soft_validate_public(&self.values, diagnostics);
            ed25519::soft_validate_private(&self.values, diagnostics);
        }
        Ok(())
    }

    pub fn convert_to(&self, destination: ExternalKeyKind) -> Result<ExternalPrivateKey> {
        match self.key_type {
            KeyType::Rsa => rsa::private_convert_to(&self.values, destination),
            KeyType::Ed25519 => ed25519::private_convert_to(&self.values, destination),
            KeyType::Dss => dss::private_convert_to(&self.values, destination),
            KeyType::EcdsaNistP256 => ecdsa::private_convert_to(&self.values, ecdsa::Curve::NistP256, destination),
            KeyType::EcdsaNistP384 => ecdsa::private_convert_to(&self.values, ecdsa::Curve::NistP384, destination),
            KeyType::EcdsaNistP521 => ecdsa::private_convert_to(&self.values, ecdsa::Curve::NistP521, destination),
            _ => Err(KeyCodecError::UnsupportedConversion(self.key_type.identifier().to_string())),
        }
    }

    pub fn convert_from(key_type: KeyType, external: &ExternalPrivateKey) -> Result<PrivateKeyParams> {
        let values = match key_type {
            KeyType::Rsa => rsa::private_convert_from(external)?,
            KeyType::Ed25519 => ed25519::private_convert_from(external)?,
            KeyType::Dss => dss::private_convert_from(external)?,
            KeyType::EcdsaNistP256 => ecdsa::private_convert_from(external, ecdsa::Curve::NistP256)?,
            KeyType::EcdsaNistP384 => ecdsa::private_convert_from(external, ecdsa::Curve::NistP384)?,
            KeyType::EcdsaNistP521 => ecdsa::private_convert_from(external, ecdsa::Curve::NistP521)?,
            _ => return Err(KeyCodecError::UnsupportedConversion(key_type.identifier().to_string())),
        };
        Ok(PrivateKeyParams::new(key_type, values))
    }

    pub fn generate(key_type: KeyType, options: &GenerateOptions) -> Result<PrivateKeyParams> {
        let values = match key_type {
            KeyType::Rsa => rsa::generate(options)?,
            KeyType::Ed25519 => ed25519::generate()?,
            KeyType::Dss => dss::generate()?,
            KeyType::EcdsaNistP256 => ecdsa::generate(ecdsa::Curve::NistP256)?,
            KeyType::EcdsaNistP384 => ecdsa::generate(ecdsa::Curve::NistP384)?,
            KeyType::EcdsaNistP521 => ecdsa::generate(ecdsa::Curve::NistP521)?,
            _ => return Err(KeyCodecError::UnsupportedConversion(key_type.identifier().to_string())),
        };
        Ok(PrivateKeyParams::new(key_type, values))
    }
}

/// The target crypto-library representation requested of a `convert_to`
/// call. Closed per spec.md §9's redesign note, replacing the original's
/// open-ended `destination_class` type-token dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalKeyKind {
    Rsa,
    Ed25519,
    Dsa,
    EcdsaNistP256,
    EcdsaNistP384,
    EcdsaNistP521,
}

/// A public key value in one of the crypto crates this codec can
/// round-trip parameters through (spec.md §4.3's "conversion adapter").
#[derive(Debug, Clone)]
pub enum ExternalPublicKey {
    Rsa(::rsa::RsaPublicKey),
    Ed25519(ed25519_dalek::VerifyingKey),
    Dsa(::dsa::VerifyingKey),
    EcdsaNistP256(p256::PublicKey),
    EcdsaNistP384(p384::PublicKey),
    EcdsaNistP521(p521::PublicKey),
}

/// A private key value in one of the crypto crates this codec can
/// round-trip parameters through.
///
/// Deliberately not `Clone`: several of its variants wrap secret key
/// material from crates that withhold `Clone` to discourage incidental
/// copies, so this enum follows suit uniformly rather than being
/// selectively cloneable.
pub enum ExternalPrivateKey {
    Rsa(::rsa::RsaPrivateKey),
    Ed25519(ed25519_dalek::SigningKey),
    Dsa(::dsa::SigningKey),
    EcdsaNistP256(p256::SecretKey),
    EcdsaNistP384(p384::SecretKey),
    EcdsaNistP521(p521::SecretKey),
}

impl std::fmt::Debug for ExternalPrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let variant = match self {
            ExternalPrivateKey::Rsa(_) => "Rsa",
            ExternalPrivateKey::Ed25519(_) => "Ed25519",
            ExternalPrivateKey::Dsa(_) => "Dsa",
            ExternalPrivateKey::EcdsaNistP256(_) => "EcdsaNistP256",
            ExternalPrivateKey::EcdsaNistP384(_) => "EcdsaNistP384",
            ExternalPrivateKey::EcdsaNistP521(_) => "EcdsaNistP521",
        };
        f.debug_tuple("ExternalPrivateKey").field(&variant).finish()
    }
}

/// Parameters controlling key generation (spec.md §4.3's
/// `generate_private_params`), generalized across algorithms.
///
/// Defaults match original_source/openssh_key/key_params.py's
/// `RSAPrivateKeyParams` constants.
#[derive(Debug, Clone, Copy)]
pub struct GenerateOptions {
    pub rsa_public_exponent: u64,
    pub rsa_key_size: usize,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        GenerateOptions {
            rsa_public_exponent: 65537,
            rsa_key_size: 4096,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_type_round_trips_through_its_identifier() {
        for key_type in KeyType::ALL {
            let identifier = key_type.identifier();
            assert_eq!(KeyType::from_identifier(identifier).unwrap(), key_type);
        }
    }

    #[test]
    fn unknown_identifier_is_rejected() {
        assert!(KeyType::from_identifier("ssh-not-a-real-algorithm").is_err());
    }

    #[test]
    fn certificate_types_have_no_private_schema() {
        for key_type in KeyType::ALL {
            assert_eq!(key_type.is_certificate(), !key_type.has_private());
            if key_type.is_certificate() {
                assert!(key_type.private_schema_checked().is_err());
            } else {
                assert!(key_type.private_schema_checked().is_ok());
            }
        }
    }

    #[test]
    fn certificate_public_schema_wraps_base_with_nonce_and_suffix() {
        let base_len = KeyType::Rsa.public_schema().len();
        let cert_len = KeyType::CertRsa.public_schema().len();
        // one nonce field prepended, eleven certificate fields appended
        assert_eq!(cert_len, base_len + 1 + 11);
        assert_eq!(KeyType::CertRsa.public_schema()[0].0, "nonce");
    }

    #[test]
    fn security_key_types_are_identified() {
        assert!(KeyType::SkEd25519.is_security_key());
        assert!(KeyType::SkEcdsaNistP256.is_security_key());
        assert!(!KeyType::Ed25519.is_security_key());
    }
}
