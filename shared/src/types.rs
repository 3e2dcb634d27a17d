//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// Wire format for local timestamps (`YYYY-MM-DDTHH:MM:SS`, no zone)
pub const LOCAL_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A point on the globe in decimal degrees
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// True when both components are inside `[-90, 90] x [-180, 180]`
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Machine-readable codes carried by structured error bodies
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidParameters,
    Unauthorized,
    NotImplemented,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidParameters => "INVALID_PARAMETERS",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::NotImplemented => "NOT_IMPLEMENTED",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }

    /// HTTP status paired with this code
    pub fn status(&self) -> u16 {
        match self {
            ErrorCode::InvalidParameters => 400,
            ErrorCode::Unauthorized => 401,
            ErrorCode::NotImplemented => 501,
            ErrorCode::InternalError => 500,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Round to one decimal place, halves away from zero
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Serde adapter for `NaiveDateTime` in [`LOCAL_DATETIME_FORMAT`]
pub mod local_datetime {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::LOCAL_DATETIME_FORMAT;

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(LOCAL_DATETIME_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, LOCAL_DATETIME_FORMAT).map_err(serde::de::Error::custom)
    }

    /// Same format, for optional fields
    pub mod option {
        use chrono::NaiveDateTime;
        use serde::{Deserialize, Deserializer, Serializer};

        use super::super::LOCAL_DATETIME_FORMAT;

        pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match value {
                Some(value) => super::serialize(value, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
        where
            D: Deserializer<'de>,
        {
            Option::<String>::deserialize(deserializer)?
                .map(|raw| {
                    NaiveDateTime::parse_from_str(&raw, LOCAL_DATETIME_FORMAT)
                        .map_err(serde::de::Error::custom)
                })
                .transpose()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize)]
    struct Stamped {
        #[serde(with = "local_datetime")]
        at: NaiveDateTime,
        #[serde(with = "local_datetime::option", default)]
        maybe: Option<NaiveDateTime>,
    }

    #[test]
    fn test_coordinates_bounds() {
        assert!(Coordinates::new(90.0, 180.0).is_valid());
        assert!(Coordinates::new(-90.0, -180.0).is_valid());
        assert!(!Coordinates::new(91.0, 0.0).is_valid());
        assert!(!Coordinates::new(0.0, -180.5).is_valid());
        assert!(!Coordinates::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn test_round1() {
        assert_eq!(round1(12.34), 12.3);
        assert_eq!(round1(12.36), 12.4);
        assert_eq!(round1(-3.14), -3.1);
        assert_eq!(round1(0.0), 0.0);
    }

    #[test]
    fn test_error_code_wire_names() {
        let json = serde_json::to_string(&ErrorCode::InvalidParameters).unwrap();
        assert_eq!(json, "\"INVALID_PARAMETERS\"");
        assert_eq!(ErrorCode::NotImplemented.status(), 501);
        assert_eq!(ErrorCode::Unauthorized.to_string(), "UNAUTHORIZED");
    }

    #[test]
    fn test_local_datetime_format() {
        let at = NaiveDate::from_ymd_opt(2020, 1, 15)
            .unwrap()
            .and_hms_milli_opt(10, 0, 0, 250)
            .unwrap();
        let json = serde_json::to_string(&Stamped { at, maybe: None }).unwrap();
        assert_eq!(json, r#"{"at":"2020-01-15T10:00:00","maybe":null}"#);
    }

    #[test]
    fn test_local_datetime_parse() {
        let parsed: Stamped = serde_json::from_str(r#"{"at":"2019-06-10T09:30:00"}"#).unwrap();
        assert_eq!(parsed.at.to_string(), "2019-06-10 09:30:00");
        assert!(parsed.maybe.is_none());

        let bad = serde_json::from_str::<Stamped>(r#"{"at":"10/06/2019"}"#);
        assert!(bad.is_err());
    }
}
