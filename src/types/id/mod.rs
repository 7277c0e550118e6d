//! Typed snowflake IDs.
//!
//! Discord transmits every snowflake as a JSON string holding a decimal
//! 64-bit integer. [`Id`] keeps that decimal text as-is: it is never parsed
//! into a binary integer, never used for arithmetic, and only compared for
//! equality (or ordered lexically, for stable map iteration in tests).

pub mod marker;

use serde::{
    de::{Deserialize, Deserializer, Error as DeError, Visitor},
    Serialize, Serializer,
};
use std::{
    cmp::Ordering,
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    hash::{Hash, Hasher},
    marker::PhantomData,
};

/// Largest snowflake, `u64::MAX` in decimal.
const MAX_SNOWFLAKE: &str = "18446744073709551615";

/// ID of a resource, typed by its marker.
///
/// Construct one with [`Id::parse`], which checks that the text is an
/// unsigned decimal that fits in 64 bits.
pub struct Id<T> {
    value: Box<str>,
    phantom: PhantomData<fn(T) -> T>,
}

/// Reason a string was rejected as a snowflake.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("snowflake must be a decimal no greater than 18446744073709551615, got {0:?}")]
pub struct InvalidSnowflake(pub String);

impl<T> Id<T> {
    /// Validate `value` as decimal snowflake text.
    pub fn parse(value: &str) -> Result<Self, InvalidSnowflake> {
        // Equal-length digit strings order lexically the same as numerically.
        let fits = value.len() < MAX_SNOWFLAKE.len()
            || (value.len() == MAX_SNOWFLAKE.len() && value <= MAX_SNOWFLAKE);
        let valid = !value.is_empty() && fits && value.bytes().all(|b| b.is_ascii_digit());

        if !valid {
            return Err(InvalidSnowflake(value.to_owned()));
        }

        Ok(Self {
            value: value.into(),
            phantom: PhantomData,
        })
    }

    /// The decimal text exactly as received.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Reinterpret the ID under another marker.
    ///
    /// Needed for [`GenericMarker`] targets whose real type is only known
    /// from the command type.
    ///
    /// [`GenericMarker`]: marker::GenericMarker
    pub fn cast<New>(self) -> Id<New> {
        Id {
            value: self.value,
            phantom: PhantomData,
        }
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            phantom: PhantomData,
        }
    }
}

impl<T> Debug for Id<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("Id")?;
        let type_name = std::any::type_name::<T>();

        if let Some(position) = type_name.rfind("::") {
            if let Some(slice) = type_name.get(position + 2..) {
                f.write_str("<")?;
                f.write_str(slice)?;
                f.write_str(">")?;
            }
        }

        f.write_str("(")?;
        f.write_str(&self.value)?;
        f.write_str(")")
    }
}

impl<T> Display for Id<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.value)
    }
}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialEq<str> for Id<T> {
    fn eq(&self, other: &str) -> bool {
        &*self.value == other
    }
}

impl<T> PartialEq<&str> for Id<T> {
    fn eq(&self, other: &&str) -> bool {
        &*self.value == *other
    }
}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IdVisitor<T>(PhantomData<fn(T) -> T>);

        impl<T> Visitor<'_> for IdVisitor<T> {
            type Value = Id<T>;

            fn expecting(&self, f: &mut Formatter<'_>) -> FmtResult {
                f.write_str("a snowflake string")
            }

            fn visit_str<E: DeError>(self, v: &str) -> Result<Self::Value, E> {
                Id::parse(v).map_err(DeError::custom)
            }
        }

        deserializer.deserialize_str(IdVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::{
        marker::{RoleMarker, UserMarker},
        Id, InvalidSnowflake,
    };
    use serde_test::Token;

    #[test]
    fn keeps_text_beyond_f64_precision() {
        // 2^63 + 1 is not representable as an f64.
        let id = Id::<UserMarker>::parse("9223372036854775809").unwrap();
        assert_eq!(id.as_str(), "9223372036854775809");
        assert_eq!(id.to_string(), "9223372036854775809");
    }

    #[test]
    fn rejects_non_decimal_text() {
        assert_eq!(
            Id::<UserMarker>::parse("12a"),
            Err(InvalidSnowflake("12a".to_owned()))
        );
        assert!(Id::<UserMarker>::parse("").is_err());
        assert!(Id::<UserMarker>::parse("-1").is_err());
        assert!(Id::<UserMarker>::parse("123456789012345678901").is_err());
    }

    #[test]
    fn rejects_values_past_u64_max() {
        assert!(Id::<UserMarker>::parse("18446744073709551615").is_ok());
        assert!(Id::<UserMarker>::parse("18446744073709551616").is_err());
        assert!(Id::<UserMarker>::parse("99999999999999999999").is_err());
        assert!(Id::<UserMarker>::parse("09999999999999999999").is_ok());
    }

    #[test]
    fn deserializes_from_string_only() {
        serde_test::assert_de_tokens(
            &Id::<UserMarker>::parse("42").unwrap(),
            &[Token::Str("42")],
        );
        serde_test::assert_de_tokens_error::<Id<UserMarker>>(
            &[Token::U64(42)],
            "invalid type: integer `42`, expected a snowflake string",
        );
        serde_test::assert_de_tokens_error::<Id<UserMarker>>(
            &[Token::Str("4x")],
            "snowflake must be a decimal no greater than 18446744073709551615, got \"4x\"",
        );
    }

    #[test]
    fn debug_names_the_marker() {
        let id = Id::<RoleMarker>::parse("42").unwrap();
        assert_eq!(format!("{id:?}"), "Id<RoleMarker>(42)");
    }

    #[test]
    fn serializes_as_string() {
        let id = Id::<UserMarker>::parse("114941315417899012").unwrap();
        serde_test::assert_ser_tokens(&id, &[Token::Str("114941315417899012")]);
    }

    #[test]
    fn compares_against_str() {
        let id = Id::<UserMarker>::parse("7").unwrap();
        assert_eq!(id, "7");
        assert_eq!(id.clone().cast::<RoleMarker>().as_str(), "7");
    }
}
