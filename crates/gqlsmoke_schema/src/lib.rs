//! Introspection data model and type registry for gqlsmoke.
//!
//! This crate provides:
//! - `introspection`: Serde mirror of the standard introspection response
//! - `registry`: Resolved type definitions indexed by name

pub mod introspection;
pub mod registry;

pub use introspection::{
    IntrospectionEnumValue, IntrospectionField, IntrospectionInputValue, IntrospectionRootType,
    IntrospectionSchema, IntrospectionType, IntrospectionTypeRef, TypeKind, INTROSPECTION_QUERY,
};
pub use registry::{
    EnumDef, FieldDef, InputObjectDef, InputValueDef, ObjectDef, RegistryError, TypeDef, TypeRef,
    TypeRegistry, UnionDef,
};
