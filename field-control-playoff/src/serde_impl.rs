//! serde impls for the persisted enums. All of them are stored as their integer value.
use std::fmt::{self, Formatter};
use std::marker::PhantomData;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::store::MatchType;
use crate::{MatchStatus, PlayoffType};

/// An enum that is persisted as a `u8`.
trait IntegerEnum: Sized {
    const EXPECTING: &'static str;

    fn to_u8(&self) -> u8;

    fn from_u8(byte: u8) -> Option<Self>;

    /// Parses the value from its name. Only enums that appear in config files have names.
    fn from_name(_name: &str) -> Option<Self> {
        None
    }
}

impl IntegerEnum for MatchStatus {
    const EXPECTING: &'static str = "a match status between 0 and 4";

    #[inline]
    fn to_u8(&self) -> u8 {
        MatchStatus::to_u8(*self)
    }

    #[inline]
    fn from_u8(byte: u8) -> Option<Self> {
        MatchStatus::from_u8(byte)
    }
}

impl IntegerEnum for MatchType {
    const EXPECTING: &'static str = "a match type between 0 and 3";

    #[inline]
    fn to_u8(&self) -> u8 {
        MatchType::to_u8(*self)
    }

    #[inline]
    fn from_u8(byte: u8) -> Option<Self> {
        MatchType::from_u8(byte)
    }
}

impl IntegerEnum for PlayoffType {
    const EXPECTING: &'static str = "a playoff type of 0, 1, \"double\" or \"single\"";

    #[inline]
    fn to_u8(&self) -> u8 {
        PlayoffType::to_u8(*self)
    }

    #[inline]
    fn from_u8(byte: u8) -> Option<Self> {
        PlayoffType::from_u8(byte)
    }

    #[inline]
    fn from_name(name: &str) -> Option<Self> {
        name.parse().ok()
    }
}

macro_rules! integer_enum_serde {
    ($($t:ty => $deserialize:ident),*$(,)?) => {
        $(
            impl Serialize for $t {
                #[inline]
                fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
                where
                    S: Serializer,
                {
                    serializer.serialize_u8(IntegerEnum::to_u8(self))
                }
            }

            impl<'de> Deserialize<'de> for $t {
                #[inline]
                fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
                where
                    D: Deserializer<'de>,
                {
                    deserializer.$deserialize(IntegerEnumVisitor(PhantomData))
                }
            }
        )*
    };
}

// PlayoffType is also written by hand in config files, so it accepts its name too.
integer_enum_serde!(
    MatchStatus => deserialize_u8,
    MatchType => deserialize_u8,
    PlayoffType => deserialize_any,
);

struct IntegerEnumVisitor<T>(PhantomData<T>);

impl<'de, T> Visitor<'de> for IntegerEnumVisitor<T>
where
    T: IntegerEnum,
{
    type Value = T;

    #[inline]
    fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
        formatter.write_str(T::EXPECTING)
    }

    #[inline]
    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        u8::try_from(v)
            .ok()
            .and_then(T::from_u8)
            .ok_or_else(|| E::invalid_value(de::Unexpected::Unsigned(v), &self))
    }

    #[inline]
    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        match u64::try_from(v) {
            Ok(v) => self.visit_u64(v),
            Err(_) => Err(E::invalid_value(de::Unexpected::Signed(v), &self)),
        }
    }

    #[inline]
    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        T::from_name(v).ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
    }
}
