//! JSON codec for wire payloads.
//!
//! Comment threads have no depth limit, and each reply level costs two levels
//! of JSON nesting. `serde_json`'s default recursion limit would reject any
//! thread more than about sixty replies deep, so payloads go through these
//! helpers instead. They lift the limit and grow the stack on the heap as the
//! nesting deepens.

use serde::{de::DeserializeOwned, Deserialize, Serialize};

pub fn from_slice<T: DeserializeOwned>(data: &[u8]) -> serde_json::Result<T> {
    let mut de = serde_json::Deserializer::from_slice(data);
    de.disable_recursion_limit();
    let value = T::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    Ok(value)
}

pub fn to_vec<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<Vec<u8>> {
    let mut out = Vec::new();
    value.serialize(serde_stacker::Serializer::new(&mut serde_json::Serializer::new(
        &mut out,
    )))?;
    Ok(out)
}

pub fn to_vec_pretty<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<Vec<u8>> {
    let mut out = Vec::new();
    value.serialize(serde_stacker::Serializer::new(
        &mut serde_json::Serializer::pretty(&mut out),
    ))?;
    Ok(out)
}
