//! Utilities for representing data from Discord's API.

pub mod datetime;

pub use self::datetime::{Timestamp, TimestampParseError};

/// Serialize a bitflags value as its raw integer.
///
/// Used through `#[serde(serialize_with = "...")]` so flag types keep the
/// wire form `"flags": 64` instead of bitflags' textual `"EPHEMERAL"`.
pub(crate) fn serialize_bits<F, S>(flags: &F, serializer: S) -> Result<S::Ok, S::Error>
where
    F: bitflags::Flags<Bits = u64>,
    S: serde::Serializer,
{
    serializer.serialize_u64(flags.bits())
}

/// [`serialize_bits`] for optional flags fields.
pub(crate) fn serialize_optional_bits<F, S>(
    flags: &Option<F>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    F: bitflags::Flags<Bits = u64>,
    S: serde::Serializer,
{
    match flags {
        Some(flags) => serializer.serialize_u64(flags.bits()),
        None => serializer.serialize_none(),
    }
}

/// Deserialize optional flags from their raw integer, keeping unknown bits.
pub(crate) fn deserialize_optional_bits<'de, F, D>(deserializer: D) -> Result<Option<F>, D::Error>
where
    F: bitflags::Flags<Bits = u64>,
    D: serde::Deserializer<'de>,
{
    let bits: Option<u64> = serde::Deserialize::deserialize(deserializer)?;
    Ok(bits.map(F::from_bits_retain))
}
