//! Minimal XML-RPC wire layer used to reach the PLCAPI endpoint.
//!
//! `value` models the value tree the protocol exchanges (scalars, arrays,
//! structs) with entity-safe XML rendering. `wire` owns the envelopes:
//! positional-parameter `<methodCall>` encoding and `<methodResponse>`
//! decoding with fault-as-error semantics. Only the subset of the protocol
//! the PLCAPI emits is covered; there is deliberately no support for
//! `dateTime.iso8601` or `base64` payloads.

pub mod value;
pub mod wire;

pub use value::*;
pub use wire::*;
