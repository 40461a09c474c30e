use serde::{Deserialize, Deserializer};

/// Counters arrive as JSON numbers or, from `COUNT(*)` columns, as numeric
/// strings. `null` reads as zero.
pub fn deserialize_count_flexible<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum CountRepr {
        Int(i64),
        Float(f64),
        String(String),
    }

    match Option::<CountRepr>::deserialize(deserializer)? {
        None => Ok(0),
        Some(CountRepr::Int(i)) => Ok(i),
        Some(CountRepr::Float(f)) => Ok(f as i64),
        Some(CountRepr::String(s)) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("Invalid count: {}", s))),
    }
}

/// Booleans as `true`/`false`, `0`/`1`, or their string forms.
pub fn deserialize_bool_flexible<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrInt {
        Bool(bool),
        Int(i64),
        String(String),
    }

    match Option::<BoolOrInt>::deserialize(deserializer)? {
        None => Ok(false),
        Some(BoolOrInt::Bool(b)) => Ok(b),
        Some(BoolOrInt::Int(i)) => Ok(i != 0),
        Some(BoolOrInt::String(s)) => match s.as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(serde::de::Error::custom(format!("Invalid boolean string: {}", s))),
        },
    }
}
