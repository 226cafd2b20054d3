use std::{fmt::Display, str::FromStr};

use serde::{de, Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString<T> {
    Number(T),
    String(String),
}

/// Deserializes a number that may also arrive as a numeric string,
/// e.g. `2020` or `"2020"`.
pub fn number_or_string<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: Display,
{
    match NumberOrString::<T>::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => s
            .parse()
            .map_err(|e| de::Error::custom(format!("invalid number {s:?}: {e}"))),
    }
}

/// Case folded form of text used for case-insensitive matching and ordering,
/// applies to all Unicode letters, not just ASCII.
pub fn fold_case(value: &str) -> String {
    value.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(deserialize_with = "number_or_string")]
        year: i32,
        #[serde(deserialize_with = "number_or_string")]
        rating: f64,
    }

    #[test]
    fn test_accepts_numbers_and_strings() {
        let s: Sample = serde_json::from_str(r#"{"year": 2020, "rating": 7.5}"#).unwrap();
        assert_eq!(s.year, 2020);
        assert_eq!(s.rating, 7.5);

        let s: Sample = serde_json::from_str(r#"{"year": "1999", "rating": "8"}"#).unwrap();
        assert_eq!(s.year, 1999);
        assert_eq!(s.rating, 8.0);
    }

    #[test]
    fn test_fold_case_non_ascii() {
        assert_eq!(fold_case("Комедия"), "комедия");
        assert_eq!(fold_case("ÉMILE Zola"), "émile zola");
        assert_eq!(fold_case("Drama"), "drama");
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(serde_json::from_str::<Sample>(r#"{"year": "soon", "rating": 7}"#).is_err());
        assert!(serde_json::from_str::<Sample>(r#"{"year": 2020, "rating": true}"#).is_err());
        assert!(serde_json::from_str::<Sample>(r#"{"year": "", "rating": 7}"#).is_err());
    }
}
