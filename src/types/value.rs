//! Thrift value types.

use std::fmt;

use bytes::Bytes;

use super::seq::{MapItemSeq, ValueSeq};
use super::tag;
use crate::error::ThriftError;

/// The type of a Thrift datum on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThriftType {
    Bool,
    Byte,
    Double,
    I16,
    I32,
    I64,
    Binary,
    Struct,
    Map,
    Set,
    List,
}

impl ThriftType {
    /// Returns the one-byte wire tag for this type.
    pub fn tag(self) -> u8 {
        match self {
            Self::Bool => tag::BOOL,
            Self::Byte => tag::BYTE,
            Self::Double => tag::DOUBLE,
            Self::I16 => tag::I16,
            Self::I32 => tag::I32,
            Self::I64 => tag::I64,
            Self::Binary => tag::BINARY,
            Self::Struct => tag::STRUCT,
            Self::Map => tag::MAP,
            Self::Set => tag::SET,
            Self::List => tag::LIST,
        }
    }

    /// Maps a wire tag byte back to a type.
    ///
    /// Unassigned bytes fail, as does 0x00: it is the struct STOP marker,
    /// which only the struct decoder may consume.
    pub fn from_tag(byte: u8) -> Result<Self, ThriftError> {
        match byte {
            tag::BOOL => Ok(Self::Bool),
            tag::BYTE => Ok(Self::Byte),
            tag::DOUBLE => Ok(Self::Double),
            tag::I16 => Ok(Self::I16),
            tag::I32 => Ok(Self::I32),
            tag::I64 => Ok(Self::I64),
            tag::BINARY => Ok(Self::Binary),
            tag::STRUCT => Ok(Self::Struct),
            tag::MAP => Ok(Self::Map),
            tag::SET => Ok(Self::Set),
            tag::LIST => Ok(Self::List),
            _ => Err(ThriftError::decode(format!(
                "unknown type tag: 0x{byte:02X}"
            ))),
        }
    }
}

impl fmt::Display for ThriftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bool => "bool",
            Self::Byte => "byte",
            Self::Double => "double",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::Binary => "binary",
            Self::Struct => "struct",
            Self::Map => "map",
            Self::Set => "set",
            Self::List => "list",
        };
        write!(f, "{name}")
    }
}

/// A single Thrift datum: a primitive payload or a container.
///
/// Containers produced by the decoder hold lazy sequences that draw on the
/// input bytes when iterated; containers built in memory hold their elements
/// directly. [`ThriftValue::to_primitive`] converts the former into the
/// latter.
#[derive(Debug, Clone, PartialEq)]
pub enum ThriftValue {
    Bool(bool),
    Byte(i8),
    Double(f64),
    I16(i16),
    I32(i32),
    I64(i64),
    Binary(Bytes),
    Struct(Vec<ThriftField>),
    Map(MapItemSeq),
    Set(ValueSeq),
    List(ValueSeq),
}

/// A struct field: a numeric ID and a value.
///
/// IDs are not required to be unique at this layer; generated bindings
/// enforce uniqueness where the IDL demands it. Serialized field order is
/// the order fields appear here.
#[derive(Debug, Clone, PartialEq)]
pub struct ThriftField {
    pub id: i16,
    pub value: ThriftValue,
}

/// One key/value entry of a map.
#[derive(Debug, Clone, PartialEq)]
pub struct ThriftMapItem {
    pub key: ThriftValue,
    pub value: ThriftValue,
}

impl ThriftValue {
    /// Returns the wire type of this value.
    pub fn wire_type(&self) -> ThriftType {
        match self {
            Self::Bool(_) => ThriftType::Bool,
            Self::Byte(_) => ThriftType::Byte,
            Self::Double(_) => ThriftType::Double,
            Self::I16(_) => ThriftType::I16,
            Self::I32(_) => ThriftType::I32,
            Self::I64(_) => ThriftType::I64,
            Self::Binary(_) => ThriftType::Binary,
            Self::Struct(_) => ThriftType::Struct,
            Self::Map(_) => ThriftType::Map,
            Self::Set(_) => ThriftType::Set,
            Self::List(_) => ThriftType::List,
        }
    }

    /// Returns the payload, if this is a `Bool` variant.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the payload, if this is a `Byte` variant.
    pub fn as_i8(&self) -> Option<i8> {
        match self {
            Self::Byte(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the payload, if this is an `I16` variant.
    pub fn as_i16(&self) -> Option<i16> {
        match self {
            Self::I16(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the payload, if this is an `I32` variant.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::I32(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the payload, if this is an `I64` variant.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::I64(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the payload, if this is a `Double` variant.
    pub fn as_double(&self) -> Option<f64> {
        match self {
            Self::Double(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the payload, if this is a `Binary` variant.
    pub fn as_binary(&self) -> Option<&Bytes> {
        match self {
            Self::Binary(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the fields, if this is a `Struct` variant.
    pub fn as_struct(&self) -> Option<&[ThriftField]> {
        match self {
            Self::Struct(fields) => Some(fields),
            _ => None,
        }
    }

    /// Returns an equivalent value with every lazy sequence drained into
    /// memory, recursively.
    ///
    /// Fails if draining a decoder-backed sequence surfaces a decode error.
    /// Two decoded values are equal exactly when their `to_primitive` forms
    /// are equal; this is also what guarantees that re-encoding a decoded
    /// value reproduces the input bytes.
    pub fn to_primitive(&self) -> Result<ThriftValue, ThriftError> {
        match self {
            Self::Struct(fields) => {
                let mut out = Vec::with_capacity(fields.len());
                for field in fields {
                    out.push(ThriftField {
                        id: field.id,
                        value: field.value.to_primitive()?,
                    });
                }
                Ok(Self::Struct(out))
            }
            Self::Map(items) => {
                let mut out = Vec::with_capacity(items.size());
                items.for_each(|item| {
                    out.push(ThriftMapItem {
                        key: item.key.to_primitive()?,
                        value: item.value.to_primitive()?,
                    });
                    Ok(())
                })?;
                Ok(Self::Map(MapItemSeq::from_items(
                    items.key_type(),
                    items.value_type(),
                    out,
                )))
            }
            Self::Set(items) => Ok(Self::Set(to_primitive_seq(items)?)),
            Self::List(items) => Ok(Self::List(to_primitive_seq(items)?)),
            primitive => Ok(primitive.clone()),
        }
    }
}

fn to_primitive_seq(items: &ValueSeq) -> Result<ValueSeq, ThriftError> {
    let mut out = Vec::with_capacity(items.size());
    items.for_each(|item| {
        out.push(item.to_primitive()?);
        Ok(())
    })?;
    Ok(ValueSeq::from_values(items.elem_type(), out))
}

// -- Convenience conversions --

impl From<bool> for ThriftValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i8> for ThriftValue {
    fn from(v: i8) -> Self {
        Self::Byte(v)
    }
}

impl From<i16> for ThriftValue {
    fn from(v: i16) -> Self {
        Self::I16(v)
    }
}

impl From<i32> for ThriftValue {
    fn from(v: i32) -> Self {
        Self::I32(v)
    }
}

impl From<i64> for ThriftValue {
    fn from(v: i64) -> Self {
        Self::I64(v)
    }
}

impl From<f64> for ThriftValue {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<Bytes> for ThriftValue {
    fn from(b: Bytes) -> Self {
        Self::Binary(b)
    }
}

impl From<Vec<u8>> for ThriftValue {
    fn from(b: Vec<u8>) -> Self {
        Self::Binary(Bytes::from(b))
    }
}

impl From<&'static str> for ThriftValue {
    fn from(s: &'static str) -> Self {
        Self::Binary(Bytes::from_static(s.as_bytes()))
    }
}

impl fmt::Display for ThriftValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Byte(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            Self::I16(v) => write!(f, "{v}"),
            Self::I32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::Binary(b) => write!(f, "<{} bytes>", b.len()),
            Self::Struct(fields) => {
                write!(f, "{{")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", field.id, field.value)?;
                }
                write!(f, "}}")
            }
            Self::Map(items) => {
                write!(f, "{{")?;
                fmt_map_items(f, items)?;
                write!(f, "}}")
            }
            Self::Set(items) => {
                write!(f, "[")?;
                fmt_value_seq(f, items)?;
                write!(f, "]")
            }
            Self::List(items) => {
                write!(f, "[")?;
                fmt_value_seq(f, items)?;
                write!(f, "]")
            }
        }
    }
}

// Container bodies may still be lazy, so rendering uses the same traversal
// the codec does. A body that fails to decode mid-render is cut short with
// an error marker; only formatter failures propagate as `fmt::Error`.

fn fmt_value_seq(f: &mut fmt::Formatter<'_>, items: &ValueSeq) -> fmt::Result {
    let mut sep = "";
    let mut wrote: fmt::Result = Ok(());
    let drained = items.for_each(|item| {
        wrote = write!(f, "{sep}{item}");
        sep = ", ";
        wrote.map_err(|_| ThriftError::decode("formatter error"))
    });
    wrote?;
    if drained.is_err() {
        write!(f, "{sep}<decode error>")?;
    }
    Ok(())
}

fn fmt_map_items(f: &mut fmt::Formatter<'_>, items: &MapItemSeq) -> fmt::Result {
    let mut sep = "";
    let mut wrote: fmt::Result = Ok(());
    let drained = items.for_each(|item| {
        wrote = write!(f, "{sep}{}: {}", item.key, item.value);
        sep = ", ";
        wrote.map_err(|_| ThriftError::decode("formatter error"))
    });
    wrote?;
    if drained.is_err() {
        write!(f, "{sep}<decode error>")?;
    }
    Ok(())
}
