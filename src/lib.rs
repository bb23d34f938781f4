//! ThriftR — A pure-Rust codec for the Thrift binary wire protocol.
//!
//! This crate implements the Thrift "binary protocol": the self-describing,
//! big-endian encoding used to serialize Thrift value trees. It provides the
//! runtime value model, the encoder/decoder pair, and the lazy sequences
//! that let decoded containers be traversed without materializing every
//! element up front.
//!
//! # Architecture
//!
//! - **`binary`** — Encoding and decoding (the binary protocol wire format)
//! - **`types`** — Wire types, values, and the item sequences backing
//!   decoded containers
//! - **`error`** — The decode/encode error taxonomy
//!
//! Framing, RPC message envelopes, incremental stream I/O, and IDL-generated
//! bindings are out of scope; such layers consume this crate's
//! [`types::ThriftValue`] trees and byte buffers.
//!
//! # Laziness
//!
//! Decoding a map, set, or list reads its header eagerly and captures the
//! body bytes without materializing elements. A decode that returns `Ok` can
//! therefore still surface decode errors when the container is iterated;
//! callers that need eager certainty drain the value with
//! [`types::ThriftValue::to_primitive`] first.

pub mod binary;
pub mod error;
pub mod types;
