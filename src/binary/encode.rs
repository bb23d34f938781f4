//! Binary protocol encoding: `ThriftValue` → bytes.

use bytes::{BufMut, BytesMut};

use crate::error::ThriftError;
use crate::types::{tag, MapItemSeq, ThriftField, ThriftType, ThriftValue, ValueSeq};

/// The bit pattern every NaN double is normalized to on the wire.
const CANONICAL_NAN_BITS: u64 = 0x7FF8_0000_0000_0001;

/// Encodes a `ThriftValue` payload into the buffer.
///
/// Only the payload is written. Where the format needs a type tag next to a
/// value (struct fields, container headers) the enclosing encoder emits it.
pub fn encode_value(buf: &mut BytesMut, value: &ThriftValue) -> Result<(), ThriftError> {
    match value {
        ThriftValue::Bool(b) => {
            encode_bool(buf, *b);
            Ok(())
        }
        ThriftValue::Byte(v) => {
            encode_byte(buf, *v);
            Ok(())
        }
        ThriftValue::Double(v) => {
            encode_double(buf, *v);
            Ok(())
        }
        ThriftValue::I16(v) => {
            encode_i16(buf, *v);
            Ok(())
        }
        ThriftValue::I32(v) => {
            encode_i32(buf, *v);
            Ok(())
        }
        ThriftValue::I64(v) => {
            encode_i64(buf, *v);
            Ok(())
        }
        ThriftValue::Binary(data) => encode_binary(buf, data),
        ThriftValue::Struct(fields) => encode_struct(buf, fields),
        ThriftValue::Map(items) => encode_map(buf, items),
        ThriftValue::Set(items) => encode_set(buf, items),
        ThriftValue::List(items) => encode_list(buf, items),
    }
}

pub fn encode_bool(buf: &mut BytesMut, value: bool) {
    buf.put_u8(u8::from(value));
}

pub fn encode_byte(buf: &mut BytesMut, value: i8) {
    buf.put_i8(value);
}

/// Encodes a double as its big-endian IEEE-754 bit pattern.
///
/// Every NaN payload maps to one canonical pattern, so equal trees always
/// produce identical bytes.
pub fn encode_double(buf: &mut BytesMut, value: f64) {
    if value.is_nan() {
        buf.put_u64(CANONICAL_NAN_BITS);
    } else {
        buf.put_f64(value);
    }
}

pub fn encode_i16(buf: &mut BytesMut, value: i16) {
    buf.put_i16(value);
}

pub fn encode_i32(buf: &mut BytesMut, value: i32) {
    buf.put_i32(value);
}

pub fn encode_i64(buf: &mut BytesMut, value: i64) {
    buf.put_i64(value);
}

/// Encodes a length-prefixed byte string.
pub fn encode_binary(buf: &mut BytesMut, data: &[u8]) -> Result<(), ThriftError> {
    let len = i32::try_from(data.len()).map_err(|_| {
        ThriftError::invalid_value(format!(
            "binary too long for a 4-byte length: {} bytes",
            data.len()
        ))
    })?;
    buf.put_i32(len);
    buf.put_slice(data);
    Ok(())
}

/// Encodes struct fields in order, each as `{type tag, i16 id, payload}`,
/// then the STOP byte.
pub fn encode_struct(buf: &mut BytesMut, fields: &[ThriftField]) -> Result<(), ThriftError> {
    for field in fields {
        buf.put_u8(field.value.wire_type().tag());
        buf.put_i16(field.id);
        encode_value(buf, &field.value)?;
    }
    buf.put_u8(tag::STOP);
    Ok(())
}

/// Encodes a map as `{key tag, value tag, i32 count}` followed by the raw
/// key and value payloads of each entry.
pub fn encode_map(buf: &mut BytesMut, items: &MapItemSeq) -> Result<(), ThriftError> {
    buf.put_u8(items.key_type().tag());
    buf.put_u8(items.value_type().tag());
    buf.put_i32(container_count(items.size())?);
    items.for_each(|item| {
        check_elem_type("map key", items.key_type(), &item.key)?;
        check_elem_type("map value", items.value_type(), &item.value)?;
        encode_value(buf, &item.key)?;
        encode_value(buf, &item.value)
    })
}

/// Encodes a set as `{element tag, i32 count}` followed by the raw element
/// payloads.
pub fn encode_set(buf: &mut BytesMut, items: &ValueSeq) -> Result<(), ThriftError> {
    encode_elements(buf, items)
}

/// Encodes a list; the layout is identical to a set.
pub fn encode_list(buf: &mut BytesMut, items: &ValueSeq) -> Result<(), ThriftError> {
    encode_elements(buf, items)
}

fn encode_elements(buf: &mut BytesMut, items: &ValueSeq) -> Result<(), ThriftError> {
    buf.put_u8(items.elem_type().tag());
    buf.put_i32(container_count(items.size())?);
    items.for_each(|item| {
        check_elem_type("element", items.elem_type(), &item)?;
        encode_value(buf, &item)
    })
}

fn container_count(size: usize) -> Result<i32, ThriftError> {
    i32::try_from(size).map_err(|_| {
        ThriftError::invalid_value(format!(
            "container too large for a 4-byte count: {size} items"
        ))
    })
}

fn check_elem_type(
    role: &str,
    declared: ThriftType,
    value: &ThriftValue,
) -> Result<(), ThriftError> {
    let actual = value.wire_type();
    if actual == declared {
        Ok(())
    } else {
        Err(ThriftError::invalid_value(format!(
            "{role} declared as {declared} but value is {actual}"
        )))
    }
}
