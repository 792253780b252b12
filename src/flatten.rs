//! Flatten a YAML schema document into one row per field.
//!
//! Reads Swagger-style `definitions` — named objects with typed, documented
//! `properties` — and produces a flat tabular listing suitable for use as a
//! matching input or a data-dictionary export. Pure tree-to-table
//! flattening, kept outside the matching engine.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use serde_yaml::Value;

/// One flattened property row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyRow {
    /// Name of the definition (object) the property belongs to.
    pub object: String,
    /// Property name.
    pub field: String,
    /// Whether the property appears in the definition's `required` list.
    pub required: bool,
    /// Rendered type: plain type, `$ref` target, `array of <T>`, with an
    /// optional ` (<format>)` suffix.
    pub type_name: String,
    /// Example value, rendered as text. Empty when absent.
    pub example: String,
    /// Property description. Empty when absent.
    pub description: String,
}

/// Parse a YAML schema document from a file.
pub fn parse_schema(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read schema file: {}", path.display()))?;
    serde_yaml::from_str(&contents)
        .with_context(|| format!("failed to parse YAML: {}", path.display()))
}

/// The API title from `info.title`, used to name the default output file.
pub fn schema_title(document: &Value) -> String {
    document
        .get("info")
        .and_then(|info| info.get("title"))
        .and_then(Value::as_str)
        .unwrap_or("schema")
        .to_string()
}

/// Default output path for a flattened schema: `<info.title>.csv` in the
/// current directory.
pub fn default_output_path(document: &Value) -> PathBuf {
    PathBuf::from(format!("{}.csv", schema_title(document)))
}

/// Flatten every definition's properties into rows, one per property.
///
/// Definitions and properties are emitted in document order. Documents
/// without a `definitions` section flatten to an empty listing.
pub fn flatten_definitions(document: &Value) -> Vec<PropertyRow> {
    let Some(definitions) = document.get("definitions").and_then(Value::as_mapping) else {
        return Vec::new();
    };

    let mut rows = Vec::new();
    for (def_name, def_content) in definitions {
        let Some(object) = def_name.as_str() else {
            continue;
        };
        let required: Vec<&str> = def_content
            .get("required")
            .and_then(Value::as_sequence)
            .map(|seq| seq.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        let Some(properties) = def_content.get("properties").and_then(Value::as_mapping) else {
            continue;
        };
        for (prop_name, details) in properties {
            let Some(field) = prop_name.as_str() else {
                continue;
            };
            rows.push(PropertyRow {
                object: object.to_string(),
                field: field.to_string(),
                required: required.contains(&field),
                type_name: render_type(details),
                example: scalar_text(details.get("example")),
                description: scalar_text(details.get("description")),
            });
        }
    }
    rows
}

/// Write flattened rows as CSV. The header is always present.
pub fn write_rows(path: impl AsRef<Path>, rows: &[PropertyRow]) -> Result<()> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create output file: {}", path.display()))?;

    if rows.is_empty() {
        writer.write_record(["object", "field", "required", "type_name", "example", "description"])?;
    }
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Render a property's type the way the listing expects it:
///
/// - `$ref` replaces the declared type entirely
/// - arrays render as `array of <item type or $ref>`
/// - a `format` is appended as ` (<format>)`
fn render_type(details: &Value) -> String {
    let mut type_name = if let Some(reference) = details.get("$ref").and_then(Value::as_str) {
        reference.to_string()
    } else {
        details
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    if type_name == "array" {
        if let Some(items) = details.get("items") {
            let item_type = items
                .get("$ref")
                .or_else(|| items.get("type"))
                .and_then(Value::as_str);
            if let Some(item_type) = item_type {
                type_name = format!("array of {item_type}");
            }
        }
    }

    if let Some(format) = details.get("format").and_then(Value::as_str) {
        type_name = format!("{type_name} ({format})");
    }
    type_name
}

/// Render a scalar YAML value as plain text; missing/null becomes empty.
fn scalar_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> Value {
        serde_yaml::from_str(yaml).unwrap()
    }

    const SAMPLE: &str = r#"
info:
  title: CustomerApi
definitions:
  Customer:
    required:
      - id
    properties:
      id:
        type: string
        format: uuid
        description: Unique customer identifier
        example: 4e9c
      name:
        type: string
        description: Full legal name
      orders:
        type: array
        items:
          $ref: '#/definitions/Order'
  Order:
    properties:
      placed_at:
        type: string
        format: date-time
      lines:
        type: array
        items:
          type: string
      customer:
        $ref: '#/definitions/Customer'
"#;

    #[test]
    fn flattens_one_row_per_property() {
        let rows = flatten_definitions(&parse(SAMPLE));
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0].object, "Customer");
        assert_eq!(rows[0].field, "id");
        assert_eq!(rows[3].object, "Order");
    }

    #[test]
    fn required_membership_comes_from_the_required_list() {
        let rows = flatten_definitions(&parse(SAMPLE));
        assert!(rows[0].required);
        assert!(!rows[1].required);
    }

    #[test]
    fn format_suffixes_the_type() {
        let rows = flatten_definitions(&parse(SAMPLE));
        assert_eq!(rows[0].type_name, "string (uuid)");
        assert_eq!(rows[3].type_name, "string (date-time)");
    }

    #[test]
    fn ref_replaces_the_type() {
        let rows = flatten_definitions(&parse(SAMPLE));
        let customer_ref = rows.iter().find(|r| r.field == "customer").unwrap();
        assert_eq!(customer_ref.type_name, "#/definitions/Customer");
    }

    #[test]
    fn arrays_render_their_item_type() {
        let rows = flatten_definitions(&parse(SAMPLE));
        let ref_array = rows.iter().find(|r| r.field == "orders").unwrap();
        assert_eq!(ref_array.type_name, "array of #/definitions/Order");
        let plain_array = rows.iter().find(|r| r.field == "lines").unwrap();
        assert_eq!(plain_array.type_name, "array of string");
    }

    #[test]
    fn missing_example_and_description_render_empty() {
        let rows = flatten_definitions(&parse(SAMPLE));
        let placed_at = rows.iter().find(|r| r.field == "placed_at").unwrap();
        assert_eq!(placed_at.example, "");
        assert_eq!(placed_at.description, "");
    }

    #[test]
    fn title_falls_back_when_info_is_absent() {
        assert_eq!(schema_title(&parse(SAMPLE)), "CustomerApi");
        assert_eq!(schema_title(&parse("definitions: {}")), "schema");
        assert_eq!(
            default_output_path(&parse(SAMPLE)),
            PathBuf::from("CustomerApi.csv")
        );
    }

    #[test]
    fn document_without_definitions_flattens_to_nothing() {
        assert!(flatten_definitions(&parse("info:\n  title: Empty")).is_empty());
    }

    #[test]
    fn numeric_example_renders_as_text() {
        let rows = flatten_definitions(&parse(
            r#"
definitions:
  Line:
    properties:
      quantity:
        type: integer
        example: 3
"#,
        ));
        assert_eq!(rows[0].example, "3");
    }
}
