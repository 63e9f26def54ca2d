//! Canonical serialization backing the structural hash policy.
//!
//! Layout, one token per value:
//!
//! | value                    | token                                   |
//! |--------------------------|-----------------------------------------|
//! | `None`, `()`             | `N;`                                    |
//! | `Some(value)`            | `S:<value>`                             |
//! | `bool`                   | `b:1;` / `b:0;`                         |
//! | integers                 | `i:<decimal>;`                          |
//! | floats                   | `d:<decimal>;` (always with a `.`)      |
//! | `str`, `char`            | `s:<bytes>:"<text>";`                   |
//! | bytes                    | `y:<bytes>:<hex>;`                      |
//! | sequences, tuples, maps  | `a:<count>:{<key><value>...}`           |
//! | structs                  | `O:<len>:"<Name>":<count>:{...}`        |
//! | enum variants            | `E:<len>:"<Name>::<Variant>"...`        |
//! | hashable fields          | `H:<bytes>:"<hash>";`                   |
//!
//! Sequence entries are keyed by their index (`i:0;`), struct fields by their
//! name, map entries by their own key. Every token is self-delimiting, so
//! distinct values of one type never share a serialization.

use std::fmt::{self, Display, Write};

use serde::ser::{self, Serialize};
use thiserror::Error;

/// Newtype-struct name that marks a pre-computed [`Hashable`](super::Hashable) hash.
pub(crate) const HASHABLE_MARKER: &str = "$hashstream::Hashable";

#[derive(Debug, Error)]
#[error("{0}")]
pub(super) struct SerializeFailure(String);

impl ser::Error for SerializeFailure {
    fn custom<T: Display>(message: T) -> Self {
        Self(message.to_string())
    }
}

pub(super) fn to_canonical_string<T: Serialize + ?Sized>(
    value: &T,
) -> Result<String, SerializeFailure> {
    let mut serializer = CanonicalSerializer::default();
    value.serialize(&mut serializer)?;
    Ok(serializer.output)
}

#[derive(Default)]
struct CanonicalSerializer {
    output: String,
    raw_hash_pending: bool,
}

impl CanonicalSerializer {
    fn write(&mut self, arguments: fmt::Arguments<'_>) {
        // Writing into a String cannot fail.
        let _ = self.output.write_fmt(arguments);
    }

    fn write_text(&mut self, text: &str) {
        self.write(format_args!("s:{}:\"{}\";", text.len(), text));
    }

    fn write_hash(&mut self, hash: &str) {
        self.output.push_str(&hashable_token(hash));
    }

    fn open(&mut self, header: String, indexed: bool) -> Compound<'_> {
        let start = self.output.len();
        Compound {
            serializer: self,
            start,
            header,
            count: 0,
            indexed,
        }
    }
}

/// The token of a pre-computed [`Hashable`](super::Hashable) hash.
pub(super) fn hashable_token(hash: &str) -> String {
    format!("H:{}:\"{}\";", hash.len(), hash)
}

fn object_header(name: &str) -> String {
    format!("O:{}:\"{}\"", name.len(), name)
}

fn variant_header(name: &str, variant: &str) -> String {
    let qualified = format!("{name}::{variant}");
    format!("E:{}:\"{}\"", qualified.len(), qualified)
}

fn write_float(serializer: &mut CanonicalSerializer, value: f64) {
    serializer.write(format_args!("d:{value:?};"));
}

impl<'a> ser::Serializer for &'a mut CanonicalSerializer {
    type Ok = ();
    type Error = SerializeFailure;

    type SerializeSeq = Compound<'a>;
    type SerializeTuple = Compound<'a>;
    type SerializeTupleStruct = Compound<'a>;
    type SerializeTupleVariant = Compound<'a>;
    type SerializeMap = Compound<'a>;
    type SerializeStruct = Compound<'a>;
    type SerializeStructVariant = Compound<'a>;

    fn serialize_bool(self, value: bool) -> Result<(), SerializeFailure> {
        self.write(format_args!("b:{};", u8::from(value)));
        Ok(())
    }

    fn serialize_i8(self, value: i8) -> Result<(), SerializeFailure> {
        self.serialize_i64(i64::from(value))
    }

    fn serialize_i16(self, value: i16) -> Result<(), SerializeFailure> {
        self.serialize_i64(i64::from(value))
    }

    fn serialize_i32(self, value: i32) -> Result<(), SerializeFailure> {
        self.serialize_i64(i64::from(value))
    }

    fn serialize_i64(self, value: i64) -> Result<(), SerializeFailure> {
        self.write(format_args!("i:{value};"));
        Ok(())
    }

    fn serialize_i128(self, value: i128) -> Result<(), SerializeFailure> {
        self.write(format_args!("i:{value};"));
        Ok(())
    }

    fn serialize_u8(self, value: u8) -> Result<(), SerializeFailure> {
        self.serialize_u64(u64::from(value))
    }

    fn serialize_u16(self, value: u16) -> Result<(), SerializeFailure> {
        self.serialize_u64(u64::from(value))
    }

    fn serialize_u32(self, value: u32) -> Result<(), SerializeFailure> {
        self.serialize_u64(u64::from(value))
    }

    fn serialize_u64(self, value: u64) -> Result<(), SerializeFailure> {
        self.write(format_args!("i:{value};"));
        Ok(())
    }

    fn serialize_u128(self, value: u128) -> Result<(), SerializeFailure> {
        self.write(format_args!("i:{value};"));
        Ok(())
    }

    fn serialize_f32(self, value: f32) -> Result<(), SerializeFailure> {
        write_float(self, f64::from(value));
        Ok(())
    }

    fn serialize_f64(self, value: f64) -> Result<(), SerializeFailure> {
        write_float(self, value);
        Ok(())
    }

    fn serialize_char(self, value: char) -> Result<(), SerializeFailure> {
        let mut buffer = [0_u8; 4];
        self.write_text(value.encode_utf8(&mut buffer));
        Ok(())
    }

    fn serialize_str(self, value: &str) -> Result<(), SerializeFailure> {
        if std::mem::take(&mut self.raw_hash_pending) {
            self.write_hash(value);
        } else {
            self.write_text(value);
        }
        Ok(())
    }

    fn serialize_bytes(self, value: &[u8]) -> Result<(), SerializeFailure> {
        self.write(format_args!("y:{}:", value.len()));
        for byte in value {
            self.write(format_args!("{byte:02x}"));
        }
        self.output.push(';');
        Ok(())
    }

    fn serialize_none(self) -> Result<(), SerializeFailure> {
        self.serialize_unit()
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<(), SerializeFailure> {
        self.output.push_str("S:");
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<(), SerializeFailure> {
        self.output.push_str("N;");
        Ok(())
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<(), SerializeFailure> {
        let header = object_header(name);
        self.write(format_args!("{header}:0:{{}}"));
        Ok(())
    }

    fn serialize_unit_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<(), SerializeFailure> {
        let header = variant_header(name, variant);
        self.write(format_args!("{header};"));
        Ok(())
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        name: &'static str,
        value: &T,
    ) -> Result<(), SerializeFailure> {
        if name == HASHABLE_MARKER {
            self.raw_hash_pending = true;
            let result = value.serialize(&mut *self);
            self.raw_hash_pending = false;
            return result;
        }
        let mut compound = self.open(object_header(name), true);
        ser::SerializeTupleStruct::serialize_field(&mut compound, value)?;
        ser::SerializeTupleStruct::end(compound)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<(), SerializeFailure> {
        let mut compound = self.open(variant_header(name, variant), true);
        ser::SerializeTupleVariant::serialize_field(&mut compound, value)?;
        ser::SerializeTupleVariant::end(compound)
    }

    fn serialize_seq(self, _length: Option<usize>) -> Result<Compound<'a>, SerializeFailure> {
        Ok(self.open("a".to_owned(), true))
    }

    fn serialize_tuple(self, _length: usize) -> Result<Compound<'a>, SerializeFailure> {
        Ok(self.open("a".to_owned(), true))
    }

    fn serialize_tuple_struct(
        self,
        name: &'static str,
        _length: usize,
    ) -> Result<Compound<'a>, SerializeFailure> {
        Ok(self.open(object_header(name), true))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _length: usize,
    ) -> Result<Compound<'a>, SerializeFailure> {
        Ok(self.open(variant_header(name, variant), true))
    }

    fn serialize_map(self, _length: Option<usize>) -> Result<Compound<'a>, SerializeFailure> {
        Ok(self.open("a".to_owned(), false))
    }

    fn serialize_struct(
        self,
        name: &'static str,
        _length: usize,
    ) -> Result<Compound<'a>, SerializeFailure> {
        Ok(self.open(object_header(name), false))
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _length: usize,
    ) -> Result<Compound<'a>, SerializeFailure> {
        Ok(self.open(variant_header(name, variant), false))
    }
}

/// A compound value being written.
///
/// Entries are written straight into the output; the header, which needs the
/// final entry count, is inserted in front of them on `end`.
pub(super) struct Compound<'a> {
    serializer: &'a mut CanonicalSerializer,
    start: usize,
    header: String,
    count: usize,
    indexed: bool,
}

impl Compound<'_> {
    fn element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), SerializeFailure> {
        if self.indexed {
            self.serializer.write(format_args!("i:{};", self.count));
        }
        self.count += 1;
        value.serialize(&mut *self.serializer)
    }

    fn field<T: Serialize + ?Sized>(
        &mut self,
        name: &'static str,
        value: &T,
    ) -> Result<(), SerializeFailure> {
        self.serializer.write_text(name);
        self.count += 1;
        value.serialize(&mut *self.serializer)
    }

    fn finish(self) -> Result<(), SerializeFailure> {
        let opening = format!("{}:{}:{{", self.header, self.count);
        self.serializer.output.insert_str(self.start, &opening);
        self.serializer.output.push('}');
        Ok(())
    }
}

impl ser::SerializeSeq for Compound<'_> {
    type Ok = ();
    type Error = SerializeFailure;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), SerializeFailure> {
        self.element(value)
    }

    fn end(self) -> Result<(), SerializeFailure> {
        self.finish()
    }
}

impl ser::SerializeTuple for Compound<'_> {
    type Ok = ();
    type Error = SerializeFailure;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), SerializeFailure> {
        self.element(value)
    }

    fn end(self) -> Result<(), SerializeFailure> {
        self.finish()
    }
}

impl ser::SerializeTupleStruct for Compound<'_> {
    type Ok = ();
    type Error = SerializeFailure;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), SerializeFailure> {
        self.element(value)
    }

    fn end(self) -> Result<(), SerializeFailure> {
        self.finish()
    }
}

impl ser::SerializeTupleVariant for Compound<'_> {
    type Ok = ();
    type Error = SerializeFailure;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), SerializeFailure> {
        self.element(value)
    }

    fn end(self) -> Result<(), SerializeFailure> {
        self.finish()
    }
}

impl ser::SerializeMap for Compound<'_> {
    type Ok = ();
    type Error = SerializeFailure;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Result<(), SerializeFailure> {
        self.count += 1;
        key.serialize(&mut *self.serializer)
    }

    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), SerializeFailure> {
        value.serialize(&mut *self.serializer)
    }

    fn end(self) -> Result<(), SerializeFailure> {
        self.finish()
    }
}

impl ser::SerializeStruct for Compound<'_> {
    type Ok = ();
    type Error = SerializeFailure;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), SerializeFailure> {
        self.field(key, value)
    }

    fn end(self) -> Result<(), SerializeFailure> {
        self.finish()
    }
}

impl ser::SerializeStructVariant for Compound<'_> {
    type Ok = ();
    type Error = SerializeFailure;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), SerializeFailure> {
        self.field(key, value)
    }

    fn end(self) -> Result<(), SerializeFailure> {
        self.finish()
    }
}
