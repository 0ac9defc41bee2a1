pub mod catalog;
pub mod dashboard;
pub mod page;
pub mod section;
pub mod validation;

mod ids {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    /// Backend ids arrive as strings or integers; both are kept as strings.
    pub fn optional<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        let raw = Option::<RawId>::deserialize(deserializer)?;
        Ok(raw.map(|id| match id {
            RawId::Text(text) => text,
            RawId::Number(number) => number.to_string(),
        }))
    }

    /// Same as [`optional`] for ids that are always present; `null` reads as empty.
    pub fn required<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        optional(deserializer).map(Option::unwrap_or_default)
    }
}

pub(crate) use ids::optional as optional_id;
pub(crate) use ids::required as required_id;
