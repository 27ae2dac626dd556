// src/core/coercer.rs

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use clap::ValueEnum;
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// Etiqueta de tipo de un slot: decide cómo se consume y convierte su token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Booleano: la presencia de la opción basta para activarlo.
    Flag,
    /// Primitivo con gramática textual propia (números, cadenas, fechas...).
    Scalar,
    /// Enumerado: el token debe ser uno de los nombres declarados.
    Enum,
    /// Documento estructurado (JSON) deserializado en el tipo destino.
    Structured,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoerceError {
    #[error("expected one of: {}", .expected.join(", "))]
    InvalidEnum { expected: Vec<String> },
    #[error("expected {expected}: {reason}")]
    InvalidScalar {
        expected: &'static str,
        reason: String,
    },
    #[error("{reason}")]
    InvalidStructured { reason: String },
    #[error("the binding target is not a `{0}`")]
    TargetMismatch(&'static str),
}

/// Conversión de un token crudo al tipo declarado de un slot.
///
/// Es el punto de despacho de los tres niveles: `KIND` actúa como etiqueta
/// de tipo y `from_token` como capacidad de parseo. Los escalares vienen
/// implementados; los enumerados y valores estructurados se declaran con
/// [`bind_enum!`](crate::bind_enum) y [`bind_structured!`](crate::bind_structured).
pub trait FromToken: Sized + 'static {
    const KIND: ValueKind;

    fn from_token(token: &str) -> Result<Self, CoerceError>;
}

/// Busca el token entre los valores posibles de un enumerado, distinguiendo mayúsculas.
pub fn enumerant<T: ValueEnum>(token: &str) -> Result<T, CoerceError> {
    <T as ValueEnum>::from_str(token, false).map_err(|_| CoerceError::InvalidEnum {
        expected: T::value_variants()
            .iter()
            .filter_map(ValueEnum::to_possible_value)
            .map(|value| value.get_name().to_string())
            .collect(),
    })
}

/// Deserializa el token como documento JSON en el tipo destino.
pub fn structured<T: DeserializeOwned>(token: &str) -> Result<T, CoerceError> {
    serde_json::from_str(token).map_err(|e| CoerceError::InvalidStructured {
        reason: e.to_string(),
    })
}

macro_rules! scalar_from_str {
    ($($ty:ty => $label:expr),* $(,)?) => {
        $(
            impl FromToken for $ty {
                const KIND: ValueKind = ValueKind::Scalar;

                fn from_token(token: &str) -> Result<Self, CoerceError> {
                    token.parse::<$ty>().map_err(|e| CoerceError::InvalidScalar {
                        expected: $label,
                        reason: e.to_string(),
                    })
                }
            }
        )*
    };
}

scalar_from_str! {
    i8 => "an integer",
    i16 => "an integer",
    i32 => "an integer",
    i64 => "an integer",
    i128 => "an integer",
    isize => "an integer",
    u8 => "an unsigned integer",
    u16 => "an unsigned integer",
    u32 => "an unsigned integer",
    u64 => "an unsigned integer",
    u128 => "an unsigned integer",
    usize => "an unsigned integer",
    f32 => "a number",
    f64 => "a number",
    char => "a single character",
    Uuid => "a unique identifier",
    NaiveDate => "a date (YYYY-MM-DD)",
    NaiveTime => "a time (HH:MM:SS)",
    NaiveDateTime => "a date and time (YYYY-MM-DDTHH:MM:SS)",
    DateTime<FixedOffset> => "an RFC 3339 timestamp",
    DateTime<Utc> => "an RFC 3339 timestamp",
}

impl FromToken for bool {
    const KIND: ValueKind = ValueKind::Flag;

    fn from_token(token: &str) -> Result<Self, CoerceError> {
        token.parse().map_err(|e: std::str::ParseBoolError| CoerceError::InvalidScalar {
            expected: "a boolean",
            reason: e.to_string(),
        })
    }
}

impl FromToken for String {
    const KIND: ValueKind = ValueKind::Scalar;

    fn from_token(token: &str) -> Result<Self, CoerceError> {
        Ok(token.to_string())
    }
}

impl FromToken for PathBuf {
    const KIND: ValueKind = ValueKind::Scalar;

    fn from_token(token: &str) -> Result<Self, CoerceError> {
        Ok(PathBuf::from(token))
    }
}

// Gramática de humantime: "90s", "1h 30m", "2days".
impl FromToken for Duration {
    const KIND: ValueKind = ValueKind::Scalar;

    fn from_token(token: &str) -> Result<Self, CoerceError> {
        humantime::parse_duration(token).map_err(|e| CoerceError::InvalidScalar {
            expected: "a duration",
            reason: e.to_string(),
        })
    }
}

/// Envoltorio anulable: un `Option<bool>` exige valor, no es un flag.
impl<T: FromToken> FromToken for Option<T> {
    const KIND: ValueKind = match T::KIND {
        ValueKind::Flag => ValueKind::Scalar,
        kind => kind,
    };

    fn from_token(token: &str) -> Result<Self, CoerceError> {
        T::from_token(token).map(Some)
    }
}

impl<T: DeserializeOwned + 'static> FromToken for Vec<T> {
    const KIND: ValueKind = ValueKind::Structured;

    fn from_token(token: &str) -> Result<Self, CoerceError> {
        structured(token)
    }
}

/// Declara uno o más tipos `clap::ValueEnum` como enumerados enlazables.
#[macro_export]
macro_rules! bind_enum {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::FromToken for $ty {
                const KIND: $crate::ValueKind = $crate::ValueKind::Enum;

                fn from_token(token: &str) -> ::std::result::Result<Self, $crate::CoerceError> {
                    $crate::core::coercer::enumerant(token)
                }
            }
        )+
    };
}

/// Declara uno o más tipos `serde::Deserialize` como valores estructurados (JSON).
#[macro_export]
macro_rules! bind_structured {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::FromToken for $ty {
                const KIND: $crate::ValueKind = $crate::ValueKind::Structured;

                fn from_token(token: &str) -> ::std::result::Result<Self, $crate::CoerceError> {
                    $crate::core::coercer::structured(token)
                }
            }
        )+
    };
}
