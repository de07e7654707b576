use serde::{ Deserialize, Deserializer, Serializer };
use serde::de::{ self, Visitor };
use std::fmt;
use tracing::Level;

/// Serialize `tracing::Level` to a lowercase string
pub fn serialize_level<S>(level: &Level, serializer: S) -> Result<S::Ok, S::Error>
    where S: Serializer
{
    serializer.serialize_str(&level.as_str().to_lowercase())
}

/// Deserialize `tracing::Level` from a string, case-insensitive
pub fn deserialize_level<'de, D>(deserializer: D) -> Result<Level, D::Error>
    where D: Deserializer<'de>
{
    let value = String::deserialize(deserializer)?;
    value
        .parse::<Level>()
        .map_err(|_| de::Error::custom(format!("unknown log level: {}", value)))
}

/// Deserialize a Binance decimal string (e.g. `"67012.34000000"`) into a finite `f64`.
///
/// Plain JSON numbers are accepted too. Anything else is a decode error.
pub fn deserialize_decimal_str<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where D: Deserializer<'de>
{
    struct DecimalVisitor;

    impl<'de> Visitor<'de> for DecimalVisitor {
        type Value = f64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a decimal number encoded as a string")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> where E: de::Error {
            let parsed = value
                .trim()
                .parse::<f64>()
                .map_err(|_| E::custom(format!("invalid decimal string: {:?}", value)))?;
            finite(parsed)
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> where E: de::Error {
            finite(value)
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> where E: de::Error {
            Ok(value as f64)
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> where E: de::Error {
            Ok(value as f64)
        }
    }

    fn finite<E: de::Error>(value: f64) -> Result<f64, E> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(E::custom(format!("non-finite decimal: {}", value)))
        }
    }

    deserializer.deserialize_any(DecimalVisitor)
}
