// src/domain/student.rs
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Stored registration row, shaped like the `students` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub course: String,
    pub group_name: String,
}

/// Registration form payload. Also the shape of the local snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    /// Clients post the course number either as `"1"` or as `1`
    #[serde(default, deserialize_with = "text_or_number")]
    pub course: String,
    #[serde(default)]
    pub group: String,
}

/// JSON string or number as text; null reads as blank.
fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(de::Error::custom(format!(
            "expected a string or number, got {}",
            other
        ))),
    }
}

impl RegistrationRequest {
    /// Names of the wire fields that are blank
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("course", &self.course),
            ("group", &self.group),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}
