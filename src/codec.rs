// src/codec.rs
//
// The Pascal-style byte stream codec. Grounded on the length-prefixed
// read/write helpers formerly in src/ssh/public_key.rs
// (write_length_prefixed_{string,bytes}) and src/ssh/private_key.rs,
// both replaced here by this generic, schema-driven version, and on
// the minimal-mpint writer in other_examples/.../picky-src-ssh-encode.rs.

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use num_bigint::{BigInt, Sign};

use crate::diagnostics::Diagnostics;
use crate::error::{KeyCodecError, Result};
use crate::schema::{FieldType, Schema};
use crate::value::{ParamsMap, Value};

/// A cursor over an in-memory byte buffer supporting the primitive and
/// structured wire reads/writes of spec.md §4.1.
///
/// A single `ByteStream` can be used purely for reading (construct with
/// [`ByteStream::new`], a cursor is maintained over the given bytes) or
/// purely for writing (construct with [`ByteStream::empty`], writes
/// append to an initially-empty buffer); the envelope layer never mixes
/// both roles on one instance.
#[derive(Debug, Clone)]
pub struct ByteStream {
    data: Vec<u8>,
    pos: usize,
}

impl ByteStream {
    pub fn new(data: Vec<u8>) -> Self {
        ByteStream { data, pos: 0 }
    }

    pub fn empty() -> Self {
        ByteStream { data: Vec::new(), pos: 0 }
    }

    /// Bytes not yet consumed by a read.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    // -- reads --------------------------------------------------------

    pub fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        if self.remaining() < n {
            return Err(KeyCodecError::ShortRead {
                expected: n,
                available: self.remaining(),
            });
        }
        let out = self.data[self.pos..self.pos + n].to_vec();
        self.pos += n;
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        self.read_bytes(1).map(|b| b[0])
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let bytes = self.read_bytes(4)?;
        Ok((&bytes[..]).read_u32::<BigEndian>().expect("4 bytes read"))
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        let bytes = self.read_bytes(8)?;
        Ok((&bytes[..]).read_u64::<BigEndian>().expect("8 bytes read"))
    }

    pub fn read_length_prefixed(&mut self) -> Result<Vec<u8>> {
        let len = self.read_u32()? as usize;
        self.read_bytes(len)
    }

    pub fn read_string(&mut self) -> Result<String> {
        let bytes = self.read_length_prefixed()?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Reads an SSH `mpint`. A zero-length field is 0; otherwise the
    /// bytes are interpreted as a signed big-endian two's-complement
    /// integer. Non-minimal encodings (an unnecessary leading `0x00` or
    /// `0xFF`) are accepted on read, matching the tolerance some
    /// implementations expect (spec.md §4.1 edge cases, §9 open
    /// question): this codec does not additionally warn on them.
    pub fn read_mpint(&mut self) -> Result<BigInt> {
        let bytes = self.read_length_prefixed()?;
        if bytes.is_empty() {
            return Ok(BigInt::from(0));
        }
        Ok(BigInt::from_signed_bytes_be(&bytes))
    }

    pub fn read_fixed_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        self.read_bytes(n)
    }

    pub fn read_field(&mut self, ty: FieldType) -> Result<Value> {
        Ok(match ty {
            FieldType::Text => Value::Text(self.read_string()?),
            FieldType::Bytes => Value::Bytes(self.read_length_prefixed()?),
            FieldType::Mpint => Value::Mpint(self.read_mpint()?),
            FieldType::FixedBytes(n) => Value::Bytes(self.read_fixed_bytes(n)?),
            FieldType::U8 => Value::U8(self.read_u8()?),
            FieldType::U32 => Value::U32(self.read_u32()?),
            FieldType::U64 => Value::U64(self.read_u64()?),
        })
    }

    /// Reads a structured record: for each field in `schema`'s
    /// declaration order, dispatch on the tag and produce a name->value
    /// mapping. A truncated field surfaces its `ShortRead` unchanged
    /// (spec.md §7: codec-level errors are surfaced to the caller
    /// unmodified); `FormatMismatch` is reserved for a field whose bytes
    /// were read successfully but whose value doesn't fit its declared
    /// type.
    pub fn read_struct(&mut self, schema: &Schema) -> Result<ParamsMap> {
        let mut map = ParamsMap::new();
        for (name, ty) in schema {
            let value = self.read_field(*ty)?;
            map.insert((*name).to_string(), value);
        }
        Ok(map)
    }

    // -- writes ---------------------------------------------------------

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    pub fn write_u8(&mut self, v: u8) {
        self.data.push(v);
    }

    pub fn write_u32(&mut self, v: u32) {
        self.data.write_u32::<BigEndian>(v).expect("write to Vec never fails");
    }

    pub fn write_u64(&mut self, v: u64) {
        self.data.write_u64::<BigEndian>(v).expect("write to Vec never fails");
    }

    pub fn write_length_prefixed(&mut self, bytes: &[u8]) {
        self.write_u32(bytes.len() as u32);
        self.write_bytes(bytes);
    }

    pub fn write_string(&mut self, s: &str) {
        self.write_length_prefixed(s.as_bytes());
    }

    /// Writes an SSH `mpint` in canonical minimal form: zero emits a
    /// zero-length field; a non-negative value whose top bit would
    /// otherwise be set gains a single leading zero byte.
    pub fn write_mpint(&mut self, value: &BigInt) {
        if value.sign() == Sign::NoSign {
            self.write_length_prefixed(&[]);
            return;
        }
        let bytes = value.to_signed_bytes_be();
        self.write_length_prefixed(&bytes);
    }

    pub fn write_fixed_bytes(&mut self, bytes: &[u8], n: usize) -> Result<()> {
        if bytes.len() != n {
            return Err(KeyCodecError::InvalidParameterValue(format!(
                "expected {} byte(s), got {}",
                n,
                bytes.len()
            )));
        }
        self.write_bytes(bytes);
        Ok(())
    }

    pub fn write_field(&mut self, ty: FieldType, value: &Value) -> Result<()> {
        match (ty, value) {
            (FieldType::Text, Value::Text(s)) => self.write_string(s),
            (FieldType::Bytes, Value::Bytes(b)) => self.write_length_prefixed(b),
            (FieldType::Mpint, Value::Mpint(i)) => self.write_mpint(i),
            (FieldType::FixedBytes(n), Value::Bytes(b)) => self.write_fixed_bytes(b, n)?,
            (FieldType::U8, Value::U8(v)) => self.write_u8(*v),
            (FieldType::U32, Value::U32(v)) => self.write_u32(*v),
            (FieldType::U64, Value::U64(v)) => self.write_u64(*v),
            (ty, _) => {
                return Err(KeyCodecError::FormatMismatch(format!(
                    "value does not match field type {:?}",
                    ty
                )))
            }
        }
        Ok(())
    }

    /// Writes a structured record: every field declared in `schema` must
    /// be present in `values`; extra fields in `values` not named by
    /// `schema` are silently skipped (spec.md §3 invariant).
    pub fn write_struct(&mut self, schema: &Schema, values: &ParamsMap) -> Result<()> {
        for (name, ty) in schema {
            let value = values
                .get(name)
                .ok_or_else(|| KeyCodecError::FormatMismatch(format!("field '{}' is missing", name)))?;
            self.write_field(*ty, value).map_err(|e| match e {
                KeyCodecError::FormatMismatch(msg) => {
                    KeyCodecError::FormatMismatch(format!("field '{}': {}", name, msg))
                }
                other => other,
            })?;
        }
        Ok(())
    }
}

/// Structural validation entry point used by the envelope and parameter
/// layers; delegates to [`crate::value::check_mapping_matches_schema`].
pub fn check_mapping_matches_schema(values: &ParamsMap, schema: &Schema, diagnostics: &mut Diagnostics) {
    crate::value::check_mapping_matches_schema(values, schema, diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mpint_zero_is_zero_length() {
        let mut stream = ByteStream::empty();
        stream.write_mpint(&BigInt::from(0));
        assert_eq!(stream.into_bytes(), vec![0, 0, 0, 0]);
    }

    #[test]
    fn mpint_gains_leading_zero_when_top_bit_set() {
        // 0x80 alone would read back as a negative number; the encoder
        // must prefix a zero byte to keep it positive.
        let mut stream = ByteStream::empty();
        stream.write_mpint(&BigInt::from(0x80u32));
        assert_eq!(stream.into_bytes(), vec![0, 0, 0, 2, 0x00, 0x80]);
    }

    #[test]
    fn mpint_round_trips_large_values() {
        let value = BigInt::parse_bytes(b"123456789012345678901234567890123456789012345678901234567890", 10).unwrap();
        let mut stream = ByteStream::empty();
        stream.write_mpint(&value);
        let bytes = stream.into_bytes();
        let mut reader = ByteStream::new(bytes);
        assert_eq!(reader.read_mpint().unwrap(), value);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn mpint_round_trips_negative_values() {
        let value = BigInt::from(-1);
        let mut stream = ByteStream::empty();
        stream.write_mpint(&value);
        let bytes = stream.into_bytes();
        assert_eq!(bytes, vec![0, 0, 0, 1, 0xff]);
        let mut reader = ByteStream::new(bytes);
        assert_eq!(reader.read_mpint().unwrap(), value);
    }

    #[test]
    fn short_read_is_reported_with_counts() {
        let mut stream = ByteStream::new(vec![0, 0, 0, 5]);
        let err = stream.read_length_prefixed().unwrap_err();
        match err {
            KeyCodecError::ShortRead { expected, available } => {
                assert_eq!(expected, 5);
                assert_eq!(available, 0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn struct_round_trips_in_schema_order() {
        let schema: Schema = vec![("a", FieldType::U32), ("b", FieldType::Text), ("c", FieldType::Bytes)];
        let mut values = ParamsMap::new();
        values.insert("a", Value::U32(7));
        values.insert("b", Value::Text("hello".to_string()));
        values.insert("c", Value::Bytes(vec![1, 2, 3]));

        let mut stream = ByteStream::empty();
        stream.write_struct(&schema, &values).unwrap();
        let bytes = stream.into_bytes();

        let mut reader = ByteStream::new(bytes);
        let decoded = reader.read_struct(&schema).unwrap();
        assert_eq!(decoded, values);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn write_struct_rejects_missing_field() {
        let schema: Schema = vec![("a", FieldType::U32)];
        let values = ParamsMap::new();
        let mut stream = ByteStream::empty();
        assert!(stream.write_struct(&schema, &values).is_err());
    }

    #[test]
    fn fixed_bytes_rejects_wrong_length() {
        let mut stream = ByteStream::empty();
        assert!(stream.write_fixed_bytes(&[1, 2, 3], 4).is_err());
    }
}
