//! Mock-value synthesis.
//!
//! Produces a syntactically complete GraphQL literal for any argument type
//! reference. Values are small and fixed so regeneration is byte-stable.

use gqlsmoke_schema::{TypeDef, TypeKind, TypeRef, TypeRegistry};
use rustc_hash::FxHashSet;

use crate::{CodegenError, GenerateOptions, InputFieldPolicy};

/// Synthesizes a literal for `ty`.
///
/// `Ok(None)` means the branch was truncated by the depth/cycle guard and the
/// caller may omit it; that only happens for nullable input-object branches.
/// A NON_NULL wrapper never yields `None` — a truncated required input object
/// renders the depth-capped placeholder `{}` instead.
///
/// `visited` tracks type names on the current recursion path; callers start
/// with an empty set and `depth` 0.
pub fn synthesize_value(
    ty: &TypeRef,
    registry: &TypeRegistry,
    options: &GenerateOptions,
    depth: usize,
    visited: &mut FxHashSet<String>,
) -> Result<Option<String>, CodegenError> {
    match ty {
        TypeRef::NonNull(inner) => {
            match synthesize_value(inner, registry, options, depth, visited)? {
                Some(value) => Ok(Some(value)),
                // Truncated required input object; keep the literal complete.
                None => Ok(Some("{}".to_string())),
            }
        }
        TypeRef::List(inner) => {
            // One element is enough for structural coverage.
            match synthesize_value(inner, registry, options, depth, visited)? {
                Some(value) => Ok(Some(format!("[{value}]"))),
                None => Ok(Some("[]".to_string())),
            }
        }
        TypeRef::Named { kind, name } => match kind {
            TypeKind::Scalar => scalar_literal(name)
                .map(|value| Some(value.to_string()))
                .ok_or_else(|| CodegenError::UnsupportedScalar { name: name.clone() }),
            TypeKind::Enum => {
                let TypeDef::Enum(def) = registry.lookup(name)? else {
                    return Err(CodegenError::InvalidArgumentType { name: name.clone() });
                };
                let first = def
                    .values
                    .first()
                    .ok_or_else(|| CodegenError::EmptyEnum { name: name.clone() })?;
                Ok(Some(first.clone()))
            }
            TypeKind::InputObject => synthesize_input_object(name, registry, options, depth, visited),
            _ => Err(CodegenError::InvalidArgumentType { name: name.clone() }),
        },
    }
}

/// Fixed literal for a scalar name, or `None` for an unmapped custom scalar.
#[must_use]
pub fn scalar_literal(name: &str) -> Option<&'static str> {
    match name {
        "Int" => Some("1"),
        "Float" => Some("1.5"),
        "String" => Some("\"placeholder\""),
        "Boolean" => Some("true"),
        "ID" => Some("\"1\""),
        "UUID" => Some("\"123e4567-e89b-12d3-a456-426614174000\""),
        _ => None,
    }
}

fn synthesize_input_object(
    name: &str,
    registry: &TypeRegistry,
    options: &GenerateOptions,
    depth: usize,
    visited: &mut FxHashSet<String>,
) -> Result<Option<String>, CodegenError> {
    if visited.contains(name) || depth >= options.max_depth {
        tracing::warn!(type_name = %name, depth, "recursion truncated in input object synthesis");
        return Ok(None);
    }
    let TypeDef::InputObject(def) = registry.lookup(name)? else {
        return Err(CodegenError::InvalidArgumentType {
            name: name.to_string(),
        });
    };

    visited.insert(name.to_string());
    let mut entries = Vec::new();
    for field in &def.fields {
        if !field.ty.is_required() && options.input_fields == InputFieldPolicy::Minimal {
            continue;
        }
        let value = synthesize_value(&field.ty, registry, options, depth + 1, visited);
        // The path set must unwind even on failure paths.
        let value = match value {
            Ok(value) => value,
            Err(err) => {
                visited.remove(name);
                return Err(err);
            }
        };
        if let Some(value) = value {
            entries.push(format!("{}: {}", field.name, value));
        }
    }
    visited.remove(name);

    Ok(Some(format!("{{{}}}", entries.join(", "))))
}
