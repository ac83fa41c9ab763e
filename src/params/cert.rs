// src/params/cert.rs
//
// The OpenSSH certificate envelope fields (nonce prefix, and the
// serial/type/validity/options/signature suffix) grounded on
// other_examples/.../picky-src-ssh-encode.rs's certificate encoding,
// which writes exactly this field order around the certified algorithm's
// own public fields: `nonce`, <base public schema>, `serial`, `type`,
// `key_id`, `valid_principals`, `valid_after`, `valid_before`,
// `critical_options`, `extensions`, `reserved`, `signature_key`,
// `signature`. Field names follow spec.md §4.3's certificate parameter
// row verbatim; `valid_principals`, `critical_options`, `extensions`,
// `reserved`, `signature_key` and `signature` are declared `Bytes`
// rather than `Text` even though spec.md tags them `STRING` — they hold
// opaque nested sub-structures (e.g. `signature` is itself a
// `STRING,STRING` pair), and spec.md's own glossary defines `STRING` as
// "UTF-8 or opaque"; decoding them through `FieldType::Text`'s lossy
// UTF-8 conversion would corrupt non-UTF-8 bytes and break round-trip
// (see DESIGN.md).
//
// `ParamsMap` is already a flat map, so a certificate's schema is just
// the concatenation built by `schema::with_prefix_and_suffix`
// (spec.md §4.3: "flattened rather than nested, since the parameter
// object model has no notion of a nested sub-object").

use crate::schema::{with_prefix_and_suffix, FieldType, Schema};

const PREFIX: &[(&str, FieldType)] = &[("nonce", FieldType::Bytes)];

const SUFFIX: &[(&str, FieldType)] = &[
    ("serial", FieldType::U64),
    ("type", FieldType::U32),
    ("key_id", FieldType::Text),
    ("valid_principals", FieldType::Bytes),
    ("valid_after", FieldType::U64),
    ("valid_before", FieldType::U64),
    ("critical_options", FieldType::Bytes),
    ("extensions", FieldType::Bytes),
    ("reserved", FieldType::Bytes),
    ("signature_key", FieldType::Bytes),
    ("signature", FieldType::Bytes),
];

/// Builds a certificate's public schema from the public schema of the
/// algorithm it certifies. Certificates have no private schema of their
/// own (`KeyType::has_private` is `false` for every `Cert*` variant):
/// the certified key's own private schema is used instead once the
/// certificate is decoded.
pub fn public_schema(base: &Schema) -> Schema {
    with_prefix_and_suffix(PREFIX, base, SUFFIX)
}
