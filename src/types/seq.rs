//! Item sequences backing container values.
//!
//! A decoded map, set, or list does not hold its elements; it holds the raw
//! body bytes and materializes one element per step of a `for_each`
//! traversal. Sequences built in memory walk their vector instead. Either
//! way a sequence is meant for a single traversal, and the declared size is
//! authoritative only once a traversal has completed.

use bytes::Bytes;

use super::value::{ThriftMapItem, ThriftType, ThriftValue};
use crate::binary::decode;
use crate::error::ThriftError;

/// A finite sequence of set or list elements sharing one wire type.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueSeq {
    elem: ThriftType,
    items: Items,
}

#[derive(Debug, Clone, PartialEq)]
enum Items {
    Values(Vec<ThriftValue>),
    Lazy { body: Bytes, count: usize },
}

impl ValueSeq {
    /// Builds an in-memory sequence from a vector of elements.
    pub fn from_values(elem: ThriftType, values: Vec<ThriftValue>) -> Self {
        Self {
            elem,
            items: Items::Values(values),
        }
    }

    /// Builds a sequence that decodes `count` elements out of `body` on
    /// demand. `body` must span exactly the container's element region.
    pub(crate) fn lazy(elem: ThriftType, count: usize, body: Bytes) -> Self {
        Self {
            elem,
            items: Items::Lazy { body, count },
        }
    }

    /// The declared element wire type.
    pub fn elem_type(&self) -> ThriftType {
        self.elem
    }

    /// The element count declared in the container header.
    pub fn size(&self) -> usize {
        match &self.items {
            Items::Values(values) => values.len(),
            Items::Lazy { count, .. } => *count,
        }
    }

    /// True when no elements are declared.
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Visits every element in order.
    ///
    /// Traversal halts at the first error, whether returned by the visitor
    /// or raised while decoding a lazy element, and that error is returned.
    pub fn for_each<F>(&self, mut visit: F) -> Result<(), ThriftError>
    where
        F: FnMut(ThriftValue) -> Result<(), ThriftError>,
    {
        match &self.items {
            Items::Values(values) => {
                for value in values {
                    visit(value.clone())?;
                }
                Ok(())
            }
            Items::Lazy { body, count } => {
                let mut cursor = body.clone();
                for _ in 0..*count {
                    visit(decode::decode_value(&mut cursor, self.elem)?)?;
                }
                Ok(())
            }
        }
    }
}

/// A finite sequence of map entries with declared key and value types.
#[derive(Debug, Clone, PartialEq)]
pub struct MapItemSeq {
    key: ThriftType,
    value: ThriftType,
    items: MapItems,
}

#[derive(Debug, Clone, PartialEq)]
enum MapItems {
    Items(Vec<ThriftMapItem>),
    Lazy { body: Bytes, count: usize },
}

impl MapItemSeq {
    /// Builds an in-memory sequence from a vector of entries.
    pub fn from_items(key: ThriftType, value: ThriftType, items: Vec<ThriftMapItem>) -> Self {
        Self {
            key,
            value,
            items: MapItems::Items(items),
        }
    }

    /// Builds a sequence that decodes `count` key/value pairs out of `body`
    /// on demand.
    pub(crate) fn lazy(key: ThriftType, value: ThriftType, count: usize, body: Bytes) -> Self {
        Self {
            key,
            value,
            items: MapItems::Lazy { body, count },
        }
    }

    /// The declared key wire type.
    pub fn key_type(&self) -> ThriftType {
        self.key
    }

    /// The declared value wire type.
    pub fn value_type(&self) -> ThriftType {
        self.value
    }

    /// The entry count declared in the map header.
    pub fn size(&self) -> usize {
        match &self.items {
            MapItems::Items(items) => items.len(),
            MapItems::Lazy { count, .. } => *count,
        }
    }

    /// True when no entries are declared.
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Visits every entry in order, key decoded before value.
    pub fn for_each<F>(&self, mut visit: F) -> Result<(), ThriftError>
    where
        F: FnMut(ThriftMapItem) -> Result<(), ThriftError>,
    {
        match &self.items {
            MapItems::Items(items) => {
                for item in items {
                    visit(item.clone())?;
                }
                Ok(())
            }
            MapItems::Lazy { body, count } => {
                let mut cursor = body.clone();
                for _ in 0..*count {
                    let key = decode::decode_value(&mut cursor, self.key)?;
                    let value = decode::decode_value(&mut cursor, self.value)?;
                    visit(ThriftMapItem { key, value })?;
                }
                Ok(())
            }
        }
    }
}
