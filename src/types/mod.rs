//! Thrift wire types, values, and the sequences backing decoded containers.

mod seq;
mod value;

pub use seq::{MapItemSeq, ValueSeq};
pub use value::{ThriftField, ThriftMapItem, ThriftType, ThriftValue};

/// Wire type tag bytes.
///
/// Tags 0x01, 0x05, 0x07, and 0x09 are unassigned. 0x00 is the struct STOP
/// marker and never names a type.
pub mod tag {
    pub const STOP: u8 = 0x00;
    pub const BOOL: u8 = 0x02;
    pub const BYTE: u8 = 0x03;
    pub const DOUBLE: u8 = 0x04;
    pub const I16: u8 = 0x06;
    pub const I32: u8 = 0x08;
    pub const I64: u8 = 0x0A;
    pub const BINARY: u8 = 0x0B;
    pub const STRUCT: u8 = 0x0C;
    pub const MAP: u8 = 0x0D;
    pub const SET: u8 = 0x0E;
    pub const LIST: u8 = 0x0F;
}
