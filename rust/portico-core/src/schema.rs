use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    Object,
    Array,
    String,
    Number,
    Boolean,
    Null,
}

/// A coarse description of the shape of an example JSON value.
///
/// An empty descriptor (no `type`) stands for "unknown" and is what the
/// items of an empty array are described as.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<SchemaType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, TypeDescriptor>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<TypeDescriptor>>,
}

impl TypeDescriptor {
    pub fn scalar(kind: SchemaType) -> Self {
        TypeDescriptor {
            kind: Some(kind),
            ..Default::default()
        }
    }
}

/// Infers a [TypeDescriptor] from an example value.
///
/// Arrays are described by their first element only. Object keys keep the
/// order in which they appear in the input.
pub fn infer_schema(value: &JsonValue) -> TypeDescriptor {
    match value {
        JsonValue::Null => TypeDescriptor::scalar(SchemaType::Null),
        JsonValue::Bool(_) => TypeDescriptor::scalar(SchemaType::Boolean),
        JsonValue::Number(_) => TypeDescriptor::scalar(SchemaType::Number),
        JsonValue::String(_) => TypeDescriptor::scalar(SchemaType::String),
        JsonValue::Array(elements) => TypeDescriptor {
            kind: Some(SchemaType::Array),
            items: Some(Box::new(
                elements.first().map(infer_schema).unwrap_or_default(),
            )),
            ..Default::default()
        },
        JsonValue::Object(fields) => TypeDescriptor {
            kind: Some(SchemaType::Object),
            properties: Some(
                fields
                    .iter()
                    .map(|(key, value)| (key.clone(), infer_schema(value)))
                    .collect(),
            ),
            ..Default::default()
        },
    }
}
