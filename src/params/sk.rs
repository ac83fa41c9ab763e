// src/params/sk.rs
//
// FIDO/U2F "security key" variants (`sk-ssh-ed25519@openssh.com`,
// `sk-ecdsa-sha2-nistp256@openssh.com`): the private half lives on the
// hardware authenticator, not in the key file, so these types carry an
// `application` string and have no crypto-library conversion adapter or
// generator (spec.md §4.3 edge case: "security-key variants ... have no
// defined conversion adapters").

use crate::schema::{schema, FieldType};

pub fn public_schema_ed25519() -> crate::schema::Schema {
    schema(&[("public", FieldType::Bytes), ("application", FieldType::Text)])
}

pub fn private_schema_ed25519() -> crate::schema::Schema {
    schema(&[
        ("public", FieldType::Bytes),
        ("application", FieldType::Text),
        ("flags", FieldType::U8),
        ("key_handle", FieldType::Bytes),
        ("reserved", FieldType::Bytes),
    ])
}

pub fn public_schema_ecdsa() -> crate::schema::Schema {
    schema(&[
        ("identifier", FieldType::Text),
        ("q", FieldType::Bytes),
        ("application", FieldType::Text),
    ])
}

pub fn private_schema_ecdsa() -> crate::schema::Schema {
    let mut s = public_schema_ecdsa();
    s.push(("flags", FieldType::U8));
    s.push(("key_handle", FieldType::Bytes));
    s.push(("reserved", FieldType::Bytes));
    s
}
