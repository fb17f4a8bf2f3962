//! Serde helpers for loosely typed backend fields

use serde::{Deserialize, Deserializer};

/// Accept an identifier sent as either a JSON string or a JSON number
pub fn id_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Row {
        #[serde(deserialize_with = "id_string")]
        id: String,
    }

    #[test]
    fn test_id_string_accepts_both() {
        let a: Row = serde_json::from_str(r#"{"id":42}"#).unwrap();
        let b: Row = serde_json::from_str(r#"{"id":"fac-42"}"#).unwrap();
        assert_eq!(a.id, "42");
        assert_eq!(b.id, "fac-42");
        assert!(serde_json::from_str::<Row>(r#"{"id":true}"#).is_err());
    }
}
