//! Serde mirror of the standard GraphQL introspection response.
//!
//! These types track the `__schema` shape returned by [`INTROSPECTION_QUERY`].
//! They are a faithful wire-level view; [`crate::registry::TypeRegistry`]
//! resolves them into the indexed form the generator consumes.

use serde::{Deserialize, Serialize};

use crate::registry::RegistryError;

/// The standard full-introspection query, four levels of `ofType` deep.
///
/// Exposed for collaborators that fetch the schema themselves; the generator
/// only consumes the resulting JSON.
pub const INTROSPECTION_QUERY: &str = r#"
{
  __schema {
    queryType { name }
    mutationType { name }
    types {
      ...FullType
    }
  }
}

fragment FullType on __Type {
  kind
  name
  fields(includeDeprecated: true) {
    name
    args {
      ...InputValue
    }
    type {
      ...TypeRef
    }
    isDeprecated
    deprecationReason
  }
  inputFields {
    ...InputValue
  }
  interfaces {
    ...TypeRef
  }
  enumValues(includeDeprecated: true) {
    name
    isDeprecated
    deprecationReason
  }
  possibleTypes {
    ...TypeRef
  }
}

fragment InputValue on __InputValue {
  name
  description
  type { ...TypeRef }
  defaultValue
}

fragment TypeRef on __Type {
  kind
  name
  ofType {
    kind
    name
    ofType {
      kind
      name
      ofType {
        kind
        name
      }
    }
  }
}
"#;

/// The `__TypeKind` tag of an introspected type or type reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
    List,
    NonNull,
}

impl TypeKind {
    /// Returns true for the wrapper kinds that must carry an `ofType`.
    #[must_use]
    pub fn is_wrapper(self) -> bool {
        matches!(self, Self::List | Self::NonNull)
    }
}

/// A type reference as it appears on the wire: a kind tag, an optional name,
/// and a nested `ofType` for LIST/NON_NULL wrappers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionTypeRef {
    pub kind: TypeKind,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub of_type: Option<Box<IntrospectionTypeRef>>,
}

/// An argument or input-object field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionInputValue {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: IntrospectionTypeRef,
    #[serde(default)]
    pub default_value: Option<String>,
}

/// A field of an object or interface type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionField {
    pub name: String,
    #[serde(default)]
    pub args: Vec<IntrospectionInputValue>,
    #[serde(rename = "type")]
    pub ty: IntrospectionTypeRef,
}

/// An enum value entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionEnumValue {
    pub name: String,
}

/// One entry of the schema's type list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionType {
    pub kind: TypeKind,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub fields: Option<Vec<IntrospectionField>>,
    #[serde(default)]
    pub input_fields: Option<Vec<IntrospectionInputValue>>,
    #[serde(default)]
    pub enum_values: Option<Vec<IntrospectionEnumValue>>,
    #[serde(default)]
    pub possible_types: Option<Vec<IntrospectionTypeRef>>,
}

/// Reference to a root operation type (`queryType { name }`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntrospectionRootType {
    pub name: String,
}

/// The `__schema` object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionSchema {
    #[serde(default)]
    pub query_type: Option<IntrospectionRootType>,
    #[serde(default)]
    pub mutation_type: Option<IntrospectionRootType>,
    pub types: Vec<IntrospectionType>,
}

impl IntrospectionSchema {
    /// Deserializes a schema from a JSON value.
    ///
    /// Accepts the full transport envelope (`{"data": {"__schema": ...}}`),
    /// the bare `{"__schema": ...}` object, or the schema object itself.
    pub fn from_json(value: serde_json::Value) -> Result<Self, RegistryError> {
        let schema = match value {
            serde_json::Value::Object(mut map) => {
                let inner = map
                    .remove("data")
                    .and_then(|data| match data {
                        serde_json::Value::Object(mut data) => data.remove("__schema"),
                        _ => None,
                    })
                    .or_else(|| map.remove("__schema"));
                match inner {
                    Some(schema) => schema,
                    None => serde_json::Value::Object(map),
                }
            }
            other => other,
        };
        serde_json::from_value(schema).map_err(RegistryError::InvalidIntrospection)
    }

    /// Deserializes a schema from JSON text. See [`Self::from_json`].
    pub fn from_json_str(text: &str) -> Result<Self, RegistryError> {
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(RegistryError::InvalidIntrospection)?;
        Self::from_json(value)
    }
}
