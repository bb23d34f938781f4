//! Binary protocol decoding: bytes → `ThriftValue`.

use bytes::{Buf, Bytes};

use crate::error::ThriftError;
use crate::types::{tag, MapItemSeq, ThriftField, ThriftType, ThriftValue, ValueSeq};

/// Decodes a single value of the given type from the buffer.
///
/// The buffer is advanced past exactly the bytes the value occupies.
/// Primitive payloads and struct fields are read eagerly. Map, set, and
/// list bodies are only scanned for their extent; their elements
/// materialize when the returned sequence is iterated, so payload-level
/// errors the scan cannot see (an invalid boolean byte, say) surface at
/// iteration time rather than here.
pub fn decode_value(buf: &mut Bytes, ty: ThriftType) -> Result<ThriftValue, ThriftError> {
    match ty {
        ThriftType::Bool => decode_bool(buf),
        ThriftType::Byte => {
            ensure_remaining(buf, 1)?;
            Ok(ThriftValue::Byte(buf.get_i8()))
        }
        ThriftType::Double => {
            ensure_remaining(buf, 8)?;
            Ok(ThriftValue::Double(f64::from_bits(buf.get_u64())))
        }
        ThriftType::I16 => {
            ensure_remaining(buf, 2)?;
            Ok(ThriftValue::I16(buf.get_i16()))
        }
        ThriftType::I32 => {
            ensure_remaining(buf, 4)?;
            Ok(ThriftValue::I32(buf.get_i32()))
        }
        ThriftType::I64 => {
            ensure_remaining(buf, 8)?;
            Ok(ThriftValue::I64(buf.get_i64()))
        }
        ThriftType::Binary => decode_binary(buf),
        ThriftType::Struct => decode_struct(buf),
        ThriftType::Map => decode_map(buf),
        ThriftType::Set => Ok(ThriftValue::Set(decode_elements(buf)?)),
        ThriftType::List => Ok(ThriftValue::List(decode_elements(buf)?)),
    }
}

fn decode_bool(buf: &mut Bytes) -> Result<ThriftValue, ThriftError> {
    ensure_remaining(buf, 1)?;
    match buf.get_u8() {
        0x00 => Ok(ThriftValue::Bool(false)),
        0x01 => Ok(ThriftValue::Bool(true)),
        other => Err(ThriftError::decode(format!("invalid boolean: 0x{other:02X}"))),
    }
}

fn decode_binary(buf: &mut Bytes) -> Result<ThriftValue, ThriftError> {
    let len = read_len(buf, "binary length")?;
    ensure_remaining(buf, len)?;
    Ok(ThriftValue::Binary(buf.split_to(len)))
}

fn decode_struct(buf: &mut Bytes) -> Result<ThriftValue, ThriftError> {
    let mut fields = Vec::new();
    loop {
        ensure_remaining(buf, 1)?;
        let tag_byte = buf.get_u8();
        if tag_byte == tag::STOP {
            return Ok(ThriftValue::Struct(fields));
        }
        let field_type = ThriftType::from_tag(tag_byte)?;
        ensure_remaining(buf, 2)?;
        let id = buf.get_i16();
        let value = decode_value(buf, field_type)?;
        // Duplicate IDs pass through; higher layers resolve them.
        fields.push(ThriftField { id, value });
    }
}

fn decode_map(buf: &mut Bytes) -> Result<ThriftValue, ThriftError> {
    ensure_remaining(buf, 2)?;
    let key_type = ThriftType::from_tag(buf.get_u8())?;
    let value_type = ThriftType::from_tag(buf.get_u8())?;
    let count = read_len(buf, "map count")?;
    let body = split_body(buf, |cur| {
        for _ in 0..count {
            skip_value(cur, key_type)?;
            skip_value(cur, value_type)?;
        }
        Ok(())
    })?;
    Ok(ThriftValue::Map(MapItemSeq::lazy(
        key_type, value_type, count, body,
    )))
}

fn decode_elements(buf: &mut Bytes) -> Result<ValueSeq, ThriftError> {
    ensure_remaining(buf, 1)?;
    let elem_type = ThriftType::from_tag(buf.get_u8())?;
    let count = read_len(buf, "element count")?;
    let body = split_body(buf, |cur| {
        for _ in 0..count {
            skip_value(cur, elem_type)?;
        }
        Ok(())
    })?;
    Ok(ValueSeq::lazy(elem_type, count, body))
}

/// Runs `skip` over the buffer and returns the region it consumed as a
/// shared slice of the input.
fn split_body(
    buf: &mut Bytes,
    skip: impl FnOnce(&mut Bytes) -> Result<(), ThriftError>,
) -> Result<Bytes, ThriftError> {
    let start = buf.clone();
    skip(buf)?;
    let consumed = start.len() - buf.len();
    Ok(start.slice(..consumed))
}

/// Advances the buffer past one value of the given type without
/// materializing it.
///
/// Only structure is validated: type tags, lengths, and byte availability.
/// This is what lets a parent value keep parsing past a container body that
/// has not been materialized yet.
fn skip_value(buf: &mut Bytes, ty: ThriftType) -> Result<(), ThriftError> {
    match ty {
        ThriftType::Bool | ThriftType::Byte => advance(buf, 1),
        ThriftType::I16 => advance(buf, 2),
        ThriftType::I32 => advance(buf, 4),
        ThriftType::Double | ThriftType::I64 => advance(buf, 8),
        ThriftType::Binary => {
            let len = read_len(buf, "binary length")?;
            advance(buf, len)
        }
        ThriftType::Struct => skip_struct(buf),
        ThriftType::Map => {
            ensure_remaining(buf, 2)?;
            let key_type = ThriftType::from_tag(buf.get_u8())?;
            let value_type = ThriftType::from_tag(buf.get_u8())?;
            let count = read_len(buf, "map count")?;
            for _ in 0..count {
                skip_value(buf, key_type)?;
                skip_value(buf, value_type)?;
            }
            Ok(())
        }
        ThriftType::Set | ThriftType::List => {
            ensure_remaining(buf, 1)?;
            let elem_type = ThriftType::from_tag(buf.get_u8())?;
            let count = read_len(buf, "element count")?;
            for _ in 0..count {
                skip_value(buf, elem_type)?;
            }
            Ok(())
        }
    }
}

fn skip_struct(buf: &mut Bytes) -> Result<(), ThriftError> {
    loop {
        ensure_remaining(buf, 1)?;
        let tag_byte = buf.get_u8();
        if tag_byte == tag::STOP {
            return Ok(());
        }
        let field_type = ThriftType::from_tag(tag_byte)?;
        advance(buf, 2)?; // field ID
        skip_value(buf, field_type)?;
    }
}

/// Reads a 4-byte signed length or count, rejecting negatives.
fn read_len(buf: &mut Bytes, what: &str) -> Result<usize, ThriftError> {
    ensure_remaining(buf, 4)?;
    let len = buf.get_i32();
    usize::try_from(len).map_err(|_| ThriftError::decode(format!("negative {what}: {len}")))
}

fn advance(buf: &mut Bytes, n: usize) -> Result<(), ThriftError> {
    ensure_remaining(buf, n)?;
    buf.advance(n);
    Ok(())
}

fn ensure_remaining(buf: &Bytes, needed: usize) -> Result<(), ThriftError> {
    if buf.len() < needed {
        Err(ThriftError::decode(format!(
            "unexpected end of input: need {needed} bytes, have {}",
            buf.len()
        )))
    } else {
        Ok(())
    }
}
