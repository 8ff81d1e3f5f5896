//! JSON Schema for the configuration file.

use crate::config::ArtwallConfig;

/// URL the schema is published under.
pub const SCHEMA_ID: &str =
    "https://raw.githubusercontent.com/artwall-app/artwall/main/artwall.schema.json";

/// Generates a JSON Schema for the ArtWall configuration.
#[must_use]
pub fn generate_schema() -> schemars::Schema {
    let mut schema = schemars::schema_for!(ArtwallConfig);

    if let Some(obj) = schema.as_object_mut() {
        obj.insert("$id".to_string(), serde_json::json!(SCHEMA_ID));
    }

    schema
}

/// Pretty-printed JSON form of [`generate_schema`].
#[must_use]
pub fn generate_schema_json() -> String {
    serde_json::to_string_pretty(&generate_schema()).unwrap_or_default()
}
