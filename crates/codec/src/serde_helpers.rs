// Chainstore - Cached Query Client for Ethermint Nodes
// Copyright (C) 2024 Zhuo Zhang and Wuqi Zhang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! JSON field mappings used by the message types
//!
//! The node's REST gateway renders 64-bit integers as decimal strings, bytes as
//! base64, enums by name and well-known types in their canonical string forms.
//! Inputs are accepted leniently: numbers where strings are expected, enum
//! numbers where names are expected, and `null` anywhere a zero value fits.

use serde::{de, Deserialize, Deserializer, Serializer};
use std::{fmt, marker::PhantomData};

/// Treat `null` as the field's default value
pub fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

struct IntegerVisitor<T>(PhantomData<T>);

impl<'de, T> de::Visitor<'de> for IntegerVisitor<T>
where
    T: Default + TryFrom<u64> + TryFrom<i64> + std::str::FromStr,
{
    type Value = T;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer or a decimal string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<T, E> {
        T::try_from(v).map_err(|_| E::custom(format!("integer out of range: {v}")))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<T, E> {
        T::try_from(v).map_err(|_| E::custom(format!("integer out of range: {v}")))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<T, E> {
        if v.is_empty() {
            return Ok(T::default());
        }
        v.parse().map_err(|_| E::custom(format!("invalid integer string: {v:?}")))
    }

    fn visit_unit<E: de::Error>(self) -> Result<T, E> {
        Ok(T::default())
    }

    fn visit_none<E: de::Error>(self) -> Result<T, E> {
        Ok(T::default())
    }
}

/// `u64` as a decimal string
pub mod u64_string {
    use super::*;

    /// Serialize as a decimal string
    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    /// Accept a decimal string, a number or `null`
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        deserializer.deserialize_any(IntegerVisitor::<u64>(PhantomData))
    }
}

/// `Vec<i64>` as a list of decimal strings
pub mod i64_string_vec {
    use super::*;
    use serde::ser::SerializeSeq;

    /// Serialize each element as a decimal string
    pub fn serialize<S: Serializer>(values: &[i64], serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(values.len()))?;
        for value in values {
            seq.serialize_element(&value.to_string())?;
        }
        seq.end()
    }

    /// Accept strings or numbers, `null` for an empty list
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<i64>, D::Error> {
        struct Element(i64);

        impl<'de> Deserialize<'de> for Element {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                deserializer.deserialize_any(IntegerVisitor::<i64>(PhantomData)).map(Element)
            }
        }

        let elements: Option<Vec<Element>> = Option::deserialize(deserializer)?;
        Ok(elements.unwrap_or_default().into_iter().map(|e| e.0).collect())
    }
}

/// `Vec<u8>` as standard base64
pub mod base64_bytes {
    use super::*;
    use base64::{engine::general_purpose::STANDARD, Engine};

    /// Serialize as a padded base64 string
    pub fn serialize<S: Serializer>(value: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(value))
    }

    /// Accept a base64 string or `null`
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(encoded) => STANDARD.decode(encoded.as_bytes()).map_err(de::Error::custom),
            None => Ok(Vec::new()),
        }
    }
}

/// `Vec<Vec<u8>>` as a list of base64 strings
pub mod base64_bytes_vec {
    use super::*;
    use base64::{engine::general_purpose::STANDARD, Engine};
    use serde::ser::SerializeSeq;

    /// Serialize each element as a padded base64 string
    pub fn serialize<S: Serializer>(values: &[Vec<u8>], serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(values.len()))?;
        for value in values {
            seq.serialize_element(&STANDARD.encode(value))?;
        }
        seq.end()
    }

    /// Accept a list of base64 strings, `null` for an empty list
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Vec<u8>>, D::Error> {
        let encoded: Option<Vec<String>> = Option::deserialize(deserializer)?;
        encoded
            .unwrap_or_default()
            .iter()
            .map(|e| STANDARD.decode(e.as_bytes()).map_err(de::Error::custom))
            .collect()
    }
}

/// `Vec<u8>` holding a decimal rendered as text (e.g. `"0.334000000000000000"`)
pub mod utf8_bytes {
    use super::*;

    /// Serialize the bytes as a string
    pub fn serialize<S: Serializer>(value: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&String::from_utf8_lossy(value))
    }

    /// Accept a string or `null`
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        Ok(Option::<String>::deserialize(deserializer)?.map(String::into_bytes).unwrap_or_default())
    }
}

/// `Option<Timestamp>` as RFC 3339
pub mod timestamp {
    use super::*;
    use chrono::{DateTime, SecondsFormat, Utc};
    use prost_types::Timestamp;

    /// Serialize as an RFC 3339 string in UTC
    pub fn serialize<S: Serializer>(
        value: &Option<Timestamp>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(ts) => {
                let nanos = u32::try_from(ts.nanos).unwrap_or_default();
                let datetime = DateTime::<Utc>::from_timestamp(ts.seconds, nanos)
                    .ok_or_else(|| serde::ser::Error::custom("timestamp out of range"))?;
                serializer.serialize_str(&datetime.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            None => serializer.serialize_none(),
        }
    }

    /// Accept an RFC 3339 string or `null`
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Timestamp>, D::Error> {
        let Some(text) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };
        let datetime = DateTime::parse_from_rfc3339(&text).map_err(de::Error::custom)?;
        Ok(Some(Timestamp {
            seconds: datetime.timestamp(),
            nanos: datetime.timestamp_subsec_nanos() as i32,
        }))
    }
}

/// `Option<Duration>` as `"<seconds>s"`
pub mod duration {
    use super::*;
    use prost_types::Duration;

    /// Serialize as seconds with an `s` suffix, fractional part only when non-zero
    pub fn serialize<S: Serializer>(
        value: &Option<Duration>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(d) if d.nanos == 0 => serializer.serialize_str(&format!("{}s", d.seconds)),
            Some(d) => {
                let fraction = format!("{:09}", d.nanos.unsigned_abs());
                let sign = if d.seconds == 0 && d.nanos < 0 { "-" } else { "" };
                serializer.serialize_str(&format!(
                    "{sign}{}.{}s",
                    d.seconds,
                    fraction.trim_end_matches('0')
                ))
            }
            None => serializer.serialize_none(),
        }
    }

    /// Accept `"<seconds>[.<fraction>]s"` or `null`
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Duration>, D::Error> {
        let Some(text) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };
        parse(&text).map(Some).ok_or_else(|| de::Error::custom(format!("invalid duration: {text:?}")))
    }

    fn parse(text: &str) -> Option<Duration> {
        let body = text.strip_suffix('s')?;
        let (negative, body) = match body.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, body),
        };
        let (whole, fraction) = body.split_once('.').unwrap_or((body, ""));
        if fraction.len() > 9 {
            return None;
        }
        let seconds: i64 = whole.parse().ok()?;
        let nanos: i32 = if fraction.is_empty() { 0 } else { format!("{fraction:0<9}").parse().ok()? };
        Some(if negative {
            Duration { seconds: -seconds, nanos: -nanos }
        } else {
            Duration { seconds, nanos }
        })
    }
}

/// Enum-typed `i32` fields rendered by name
pub mod enumeration {
    use super::*;
    use crate::ProtoEnum;

    /// Serialize by proto name, or as the raw number when the value is unknown
    pub fn serialize<E: ProtoEnum, S: Serializer>(
        value: &i32,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match E::from_number(*value) {
            Some(variant) => serializer.serialize_str(variant.as_str_name()),
            None => serializer.serialize_i32(*value),
        }
    }

    /// Accept a proto name, a number or `null`
    pub fn deserialize<'de, E: ProtoEnum, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<i32, D::Error> {
        struct EnumVisitor<E>(PhantomData<E>);

        impl<'de, E: ProtoEnum> de::Visitor<'de> for EnumVisitor<E> {
            type Value = i32;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "a {} name or number", E::FULL_NAME)
            }

            fn visit_str<Err: de::Error>(self, v: &str) -> Result<i32, Err> {
                if let Some(variant) = E::from_str_name(v) {
                    return Ok(variant.into());
                }
                v.parse().map_err(|_| Err::custom(format!("unknown {} value: {v:?}", E::FULL_NAME)))
            }

            fn visit_u64<Err: de::Error>(self, v: u64) -> Result<i32, Err> {
                i32::try_from(v).map_err(Err::custom)
            }

            fn visit_i64<Err: de::Error>(self, v: i64) -> Result<i32, Err> {
                i32::try_from(v).map_err(Err::custom)
            }

            fn visit_unit<Err: de::Error>(self) -> Result<i32, Err> {
                Ok(0)
            }
        }

        deserializer.deserialize_any(EnumVisitor::<E>(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct Sample {
        #[serde(with = "super::u64_string")]
        id: u64,
        #[serde(with = "super::base64_bytes")]
        key: Vec<u8>,
        #[serde(with = "super::i64_string_vec")]
        eips: Vec<i64>,
        #[serde(with = "super::timestamp")]
        at: Option<prost_types::Timestamp>,
        #[serde(with = "super::duration")]
        period: Option<prost_types::Duration>,
        #[serde(deserialize_with = "super::null_default")]
        names: Vec<String>,
    }

    #[test]
    fn test_gateway_rendering() {
        let sample = Sample {
            id: 42,
            key: b"next".to_vec(),
            eips: vec![2929, 3198],
            at: Some(prost_types::Timestamp { seconds: 1_600_000_000, nanos: 0 }),
            period: Some(prost_types::Duration { seconds: 172_800, nanos: 0 }),
            names: vec![],
        };
        let json = serde_json::to_value(&sample).unwrap();
        assert_eq!(json["id"], "42");
        assert_eq!(json["key"], "bmV4dA==");
        assert_eq!(json["eips"], json!(["2929", "3198"]));
        assert_eq!(json["at"], "2020-09-13T12:26:40Z");
        assert_eq!(json["period"], "172800s");

        let back: Sample = serde_json::from_value(json).unwrap();
        assert_eq!(back, sample);
    }

    #[test]
    fn test_lenient_inputs() {
        let sample: Sample = serde_json::from_value(json!({
            "id": 7,
            "key": null,
            "eips": [1, "2"],
            "at": null,
            "period": "1.5s",
            "names": null,
        }))
        .unwrap();
        assert_eq!(sample.id, 7);
        assert!(sample.key.is_empty());
        assert_eq!(sample.eips, vec![1, 2]);
        assert_eq!(sample.at, None);
        assert_eq!(sample.period, Some(prost_types::Duration { seconds: 1, nanos: 500_000_000 }));
        assert!(sample.names.is_empty());
    }

    #[test]
    fn test_empty_object_is_zero_value() {
        let sample: Sample = serde_json::from_value(json!({})).unwrap();
        assert_eq!(sample, Sample::default());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(serde_json::from_value::<Sample>(json!({"id": "abc"})).is_err());
        assert!(serde_json::from_value::<Sample>(json!({"period": "10m"})).is_err());
        assert!(serde_json::from_value::<Sample>(json!({"key": "***"})).is_err());
    }
}
