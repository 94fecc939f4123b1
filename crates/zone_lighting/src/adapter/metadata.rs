//! Zone entity metadata parsing
//!
//! Entities carry free-form JSON user data. Lighting overrides live under
//! its `lighting` key:
//!
//! ```json
//! { "lighting": { "exposure": -1.5 } }
//! ```

use serde_json::Value;

use crate::zone::ZoneProperties;

/// Key holding lighting overrides inside entity user data
pub const LIGHTING_KEY: &str = "lighting";

/// Metadata parse errors
#[derive(thiserror::Error, Debug)]
pub enum MetadataError {
    /// User data is not valid JSON
    #[error("Invalid user data JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A value that must be an object is something else
    #[error("Expected {context} to be an object, found {found}")]
    NotAnObject {
        /// What was being read
        context: &'static str,
        /// JSON type actually found
        found: &'static str,
    },
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Parse lighting overrides out of entity user data
///
/// Empty user data, a `null` document, and a missing or `null` `lighting`
/// key all mean "no overrides".
pub fn parse_lighting_metadata(raw: &str) -> Result<ZoneProperties, MetadataError> {
    if raw.trim().is_empty() {
        return Ok(ZoneProperties::new());
    }

    let document: Value = serde_json::from_str(raw)?;
    let mut root = match document {
        Value::Null => return Ok(ZoneProperties::new()),
        Value::Object(map) => map,
        other => {
            return Err(MetadataError::NotAnObject {
                context: "user data",
                found: type_name(&other),
            })
        }
    };

    match root.remove(LIGHTING_KEY) {
        None | Some(Value::Null) => Ok(ZoneProperties::new()),
        Some(Value::Object(lighting)) => Ok(lighting),
        Some(other) => Err(MetadataError::NotAnObject {
            context: LIGHTING_KEY,
            found: type_name(&other),
        }),
    }
}

/// Best-effort variant of [`parse_lighting_metadata`]
///
/// Any error is logged and treated as "no overrides".
pub fn lighting_properties_or_default(raw: &str) -> ZoneProperties {
    parse_lighting_metadata(raw).unwrap_or_else(|err| {
        log::warn!("Ignoring zone lighting metadata: {}", err);
        ZoneProperties::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parses_lighting_object() {
        let props = parse_lighting_metadata(r#"{"lighting": {"exposure": -1.5}, "other": 3}"#).unwrap();

        assert_eq!(props.len(), 1);
        assert_eq!(props.get("exposure"), Some(&json!(-1.5)));
    }

    #[test]
    fn test_missing_lighting_is_empty() {
        assert!(parse_lighting_metadata(r#"{"grabbable": true}"#).unwrap().is_empty());
        assert!(parse_lighting_metadata(r#"{"lighting": null}"#).unwrap().is_empty());
        assert!(parse_lighting_metadata("null").unwrap().is_empty());
        assert!(parse_lighting_metadata("   ").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_json_is_error() {
        let result = parse_lighting_metadata("{lighting: ");
        assert!(matches!(result, Err(MetadataError::Json(_))));
    }

    #[test]
    fn test_wrong_shapes_are_errors() {
        assert!(matches!(
            parse_lighting_metadata("[1, 2]"),
            Err(MetadataError::NotAnObject { context: "user data", found: "array" })
        ));
        assert!(matches!(
            parse_lighting_metadata(r#"{"lighting": 0.5}"#),
            Err(MetadataError::NotAnObject { context: "lighting", found: "number" })
        ));
    }

    #[test]
    fn test_best_effort_swallows_errors() {
        assert!(lighting_properties_or_default("not json").is_empty());
        assert!(lighting_properties_or_default(r#"{"lighting": "dim"}"#).is_empty());
        assert_eq!(
            lighting_properties_or_default(r#"{"lighting": {"exposure": 1}}"#).get("exposure"),
            Some(&json!(1))
        );
    }
}
