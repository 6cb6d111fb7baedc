//! Resolved schema types indexed by name.
//!
//! [`TypeRegistry::build`] walks the introspection type list exactly once and
//! resolves every wire-level [`IntrospectionTypeRef`] into a [`TypeRef`]. The
//! registry is immutable after construction and is passed by reference into
//! every generation component; field references between types stay name-based
//! and are resolved through [`TypeRegistry::lookup`].

use indexmap::IndexMap;
use thiserror::Error;

use crate::introspection::{
    IntrospectionField, IntrospectionInputValue, IntrospectionSchema, IntrospectionType,
    IntrospectionTypeRef, TypeKind,
};

/// Error from building or querying the registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The payload does not deserialize as an introspection result.
    #[error("invalid introspection payload: {0}")]
    InvalidIntrospection(#[from] serde_json::Error),

    /// A named type is not present in the schema.
    #[error("unknown type: {name}")]
    UnknownType { name: String },

    /// A wire-level type reference violates the introspection shape.
    #[error("malformed type reference: {context}")]
    MalformedTypeRef { context: String },
}

/// A resolved type reference.
///
/// Wrapper kinds always carry an inner reference; named kinds never do. The
/// enum shape makes the invariant structural rather than checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    NonNull(Box<TypeRef>),
    List(Box<TypeRef>),
    Named { kind: TypeKind, name: String },
}

impl TypeRef {
    /// Resolves a wire-level reference, rejecting wrappers without `ofType`
    /// and named kinds without a name.
    pub fn resolve(raw: &IntrospectionTypeRef) -> Result<Self, RegistryError> {
        match raw.kind {
            TypeKind::NonNull | TypeKind::List => {
                let inner = raw.of_type.as_deref().ok_or_else(|| {
                    RegistryError::MalformedTypeRef {
                        context: format!("{:?} wrapper without ofType", raw.kind),
                    }
                })?;
                let inner = Box::new(Self::resolve(inner)?);
                Ok(match raw.kind {
                    TypeKind::NonNull => Self::NonNull(inner),
                    _ => Self::List(inner),
                })
            }
            kind => {
                let name = raw
                    .name
                    .clone()
                    .ok_or_else(|| RegistryError::MalformedTypeRef {
                        context: format!("{kind:?} type without a name"),
                    })?;
                Ok(Self::Named { kind, name })
            }
        }
    }

    /// Strips all NON_NULL/LIST wrappers down to the named reference.
    #[must_use]
    pub fn innermost(&self) -> &TypeRef {
        match self {
            Self::NonNull(inner) | Self::List(inner) => inner.innermost(),
            named => named,
        }
    }

    /// Name of the innermost named type.
    #[must_use]
    pub fn innermost_name(&self) -> &str {
        match self {
            Self::NonNull(inner) | Self::List(inner) => inner.innermost_name(),
            Self::Named { name, .. } => name,
        }
    }

    /// Kind tag of the innermost named type.
    #[must_use]
    pub fn innermost_kind(&self) -> TypeKind {
        match self {
            Self::NonNull(inner) | Self::List(inner) => inner.innermost_kind(),
            Self::Named { kind, .. } => *kind,
        }
    }

    /// True when the outermost wrapper is NON_NULL.
    #[must_use]
    pub fn is_required(&self) -> bool {
        matches!(self, Self::NonNull(_))
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonNull(inner) => write!(f, "{inner}!"),
            Self::List(inner) => write!(f, "[{inner}]"),
            Self::Named { name, .. } => write!(f, "{name}"),
        }
    }
}

/// An argument of a field, or a field of an input object.
#[derive(Debug, Clone)]
pub struct InputValueDef {
    pub name: String,
    pub ty: TypeRef,
    pub default_value: Option<String>,
}

/// A field of an object or interface type.
#[derive(Debug, Clone)]
pub struct FieldDef {
    pub name: String,
    pub ty: TypeRef,
    pub args: Vec<InputValueDef>,
}

/// An object or interface type with its declaration-ordered fields.
#[derive(Debug, Clone)]
pub struct ObjectDef {
    pub name: String,
    pub fields: IndexMap<String, FieldDef>,
}

/// An enum type with its declaration-ordered values.
#[derive(Debug, Clone)]
pub struct EnumDef {
    pub name: String,
    pub values: Vec<String>,
}

/// An input object type with its declaration-ordered fields.
#[derive(Debug, Clone)]
pub struct InputObjectDef {
    pub name: String,
    pub fields: Vec<InputValueDef>,
}

/// A union type and its member type names.
#[derive(Debug, Clone)]
pub struct UnionDef {
    pub name: String,
    pub members: Vec<String>,
}

/// A resolved type definition.
#[derive(Debug, Clone)]
pub enum TypeDef {
    Scalar { name: String },
    Object(ObjectDef),
    Interface(ObjectDef),
    Union(UnionDef),
    Enum(EnumDef),
    InputObject(InputObjectDef),
}

impl TypeDef {
    /// The type's name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Scalar { name } => name,
            Self::Object(def) | Self::Interface(def) => &def.name,
            Self::Union(def) => &def.name,
            Self::Enum(def) => &def.name,
            Self::InputObject(def) => &def.name,
        }
    }
}

/// The introspected schema's types, read-only after construction.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: IndexMap<String, TypeDef>,
    query_type: Option<String>,
    mutation_type: Option<String>,
}

impl TypeRegistry {
    /// Builds the registry by walking the introspection type list once.
    pub fn build(schema: &IntrospectionSchema) -> Result<Self, RegistryError> {
        let mut types = IndexMap::with_capacity(schema.types.len());
        for raw in &schema.types {
            let Some(def) = resolve_type(raw)? else {
                continue;
            };
            types.insert(def.name().to_string(), def);
        }
        Ok(Self {
            types,
            query_type: schema.query_type.as_ref().map(|t| t.name.clone()),
            mutation_type: schema.mutation_type.as_ref().map(|t| t.name.clone()),
        })
    }

    /// Looks up a type definition by name.
    pub fn lookup(&self, name: &str) -> Result<&TypeDef, RegistryError> {
        self.types.get(name).ok_or_else(|| RegistryError::UnknownType {
            name: name.to_string(),
        })
    }

    /// Name of the query root type, if the schema declares one.
    #[must_use]
    pub fn query_type(&self) -> Option<&str> {
        self.query_type.as_deref()
    }

    /// Name of the mutation root type, if the schema declares one.
    #[must_use]
    pub fn mutation_type(&self) -> Option<&str> {
        self.mutation_type.as_deref()
    }

    /// Declaration-ordered fields of the query root type.
    #[must_use]
    pub fn query_fields(&self) -> Vec<&FieldDef> {
        self.root_fields(self.query_type.as_deref())
    }

    /// Declaration-ordered fields of the mutation root type.
    #[must_use]
    pub fn mutation_fields(&self) -> Vec<&FieldDef> {
        self.root_fields(self.mutation_type.as_deref())
    }

    fn root_fields(&self, root: Option<&str>) -> Vec<&FieldDef> {
        match root.and_then(|name| self.types.get(name)) {
            Some(TypeDef::Object(def)) => def.fields.values().collect(),
            _ => Vec::new(),
        }
    }
}

fn resolve_type(raw: &IntrospectionType) -> Result<Option<TypeDef>, RegistryError> {
    let Some(name) = raw.name.clone() else {
        // The type list only carries named entries; a nameless one is noise.
        return Ok(None);
    };

    let def = match raw.kind {
        TypeKind::Scalar => TypeDef::Scalar { name },
        TypeKind::Object | TypeKind::Interface => {
            let fields = resolve_fields(raw.fields.as_deref().unwrap_or_default())?;
            let def = ObjectDef { name, fields };
            if raw.kind == TypeKind::Object {
                TypeDef::Object(def)
            } else {
                TypeDef::Interface(def)
            }
        }
        TypeKind::Union => TypeDef::Union(UnionDef {
            name,
            members: raw
                .possible_types
                .as_deref()
                .unwrap_or_default()
                .iter()
                .filter_map(|t| t.name.clone())
                .collect(),
        }),
        TypeKind::Enum => TypeDef::Enum(EnumDef {
            name,
            values: raw
                .enum_values
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(|v| v.name.clone())
                .collect(),
        }),
        TypeKind::InputObject => TypeDef::InputObject(InputObjectDef {
            name,
            fields: resolve_input_values(raw.input_fields.as_deref().unwrap_or_default())?,
        }),
        TypeKind::List | TypeKind::NonNull => {
            return Err(RegistryError::MalformedTypeRef {
                context: format!("wrapper kind {:?} in the schema type list", raw.kind),
            });
        }
    };
    Ok(Some(def))
}

fn resolve_fields(
    raw: &[IntrospectionField],
) -> Result<IndexMap<String, FieldDef>, RegistryError> {
    let mut fields = IndexMap::with_capacity(raw.len());
    for field in raw {
        fields.insert(
            field.name.clone(),
            FieldDef {
                name: field.name.clone(),
                ty: TypeRef::resolve(&field.ty)?,
                args: resolve_input_values(&field.args)?,
            },
        );
    }
    Ok(fields)
}

fn resolve_input_values(
    raw: &[IntrospectionInputValue],
) -> Result<Vec<InputValueDef>, RegistryError> {
    raw.iter()
        .map(|value| {
            Ok(InputValueDef {
                name: value.name.clone(),
                ty: TypeRef::resolve(&value.ty)?,
                default_value: value.default_value.clone(),
            })
        })
        .collect()
}
