use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::{infer_schema, parse_parameters, CoreError, QueryParameter, TypeDescriptor};

pub const GENERATED_PATH: &str = "/api/example";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiInfo {
    pub title: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub description: String,
    pub schema: TypeDescriptor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiOperation {
    pub parameters: Vec<QueryParameter>,
    pub responses: IndexMap<String, ApiResponse>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiPathItem {
    pub get: ApiOperation,
}

/// A minimal Swagger 2.0 document with a single `GET` operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiDocument {
    pub swagger: String,
    pub info: ApiInfo,
    pub paths: IndexMap<String, ApiPathItem>,
}

impl ApiDocument {
    pub fn new(parameters: Vec<QueryParameter>, schema: TypeDescriptor) -> Self {
        let mut responses = IndexMap::new();
        responses.insert(
            "200".to_string(),
            ApiResponse {
                description: "Successful response".into(),
                schema,
            },
        );

        let mut paths = IndexMap::new();
        paths.insert(
            GENERATED_PATH.to_string(),
            ApiPathItem {
                get: ApiOperation {
                    parameters,
                    responses,
                },
            },
        );

        ApiDocument {
            swagger: "2.0".into(),
            info: ApiInfo {
                title: "Generated API".into(),
                version: "1.0.0".into(),
            },
            paths,
        }
    }

    pub fn to_pretty_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Builds the Swagger document for the generator form. No document is
/// produced when the response example does not parse.
pub fn build_document<T: AsRef<str>>(
    parameters: &[T],
    response_example: &str,
) -> Result<ApiDocument, CoreError> {
    let parameters = parse_parameters(parameters);
    let example: JsonValue = serde_json::from_str(response_example).map_err(|error| {
        debug!("Rejected response example: {}", error);
        CoreError::MalformedResponseExample(format!("{}", error))
    })?;

    Ok(ApiDocument::new(parameters, infer_schema(&example)))
}

/// Builds the document and renders it as pretty-printed JSON.
pub fn assemble_document<T: AsRef<str>>(
    parameters: &[T],
    response_example: &str,
) -> Result<String, CoreError> {
    build_document(parameters, response_example)?.to_pretty_json()
}
