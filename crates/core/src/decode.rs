//! Entry point shared by every decodable payload.
//!
//! Hierarchies have no depth bound, so neither entry point applies the
//! `serde_json` recursion limit. Deep payloads grow the stack on the heap
//! through `serde_stacker` instead of overflowing it.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tally_shared::TallyResult;

/// A value decoded from a single service response.
///
/// Decoding is all-or-nothing: either the whole payload is accepted or an
/// error is returned and nothing partial escapes.
pub trait Decode: Sized {
    /// Decodes from an already-parsed JSON value.
    fn from_value(value: &Value) -> TallyResult<Self>;

    /// Decodes from raw response bytes.
    fn from_slice(bytes: &[u8]) -> TallyResult<Self>;
}

/// Reads a wire struct from a parsed value.
pub(crate) fn raw_from_value<T: DeserializeOwned>(value: &Value) -> TallyResult<T> {
    Ok(<T as Deserialize>::deserialize(serde_stacker::Deserializer::new(value))?)
}

/// Reads a wire struct from response bytes, rejecting trailing data.
pub(crate) fn raw_from_slice<T: DeserializeOwned>(bytes: &[u8]) -> TallyResult<T> {
    let mut de = serde_json::Deserializer::from_slice(bytes);
    de.disable_recursion_limit();
    let raw = <T as Deserialize>::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    Ok(raw)
}

/// Implements `Decode` for a type assembled from a serde wire struct.
///
/// The type must provide `fn assemble(raw: $raw) -> TallyResult<Self>`.
macro_rules! decode_via {
    ($ty:ty, $raw:ty) => {
        impl $crate::decode::Decode for $ty {
            fn from_value(value: &::serde_json::Value) -> ::tally_shared::TallyResult<Self> {
                Self::assemble($crate::decode::raw_from_value::<$raw>(value)?)
            }

            fn from_slice(bytes: &[u8]) -> ::tally_shared::TallyResult<Self> {
                Self::assemble($crate::decode::raw_from_slice::<$raw>(bytes)?)
            }
        }
    };
}

pub(crate) use decode_via;
