//! Selection-set construction.
//!
//! Builds the `{ field { ... } }` body for a response type, in declaration
//! order, bounded by the depth cap and a per-path visited-type set. Truncated
//! object branches keep an identifying leaf where one exists; branches with
//! nothing selectable are dropped rather than emitted empty.

use gqlsmoke_schema::{FieldDef, ObjectDef, TypeDef, TypeKind, TypeRegistry};
use rustc_hash::FxHashSet;

use crate::{mock::synthesize_value, CodegenError, GenerateOptions};

/// Builds the selection lines for `type_name`, each prefixed with `indent`
/// spaces. Nesting adds two spaces per level.
///
/// `Ok(None)` means no field of the type could be selected; the caller drops
/// the enclosing field instead of emitting an empty block. `visited` tracks
/// type names on the current path; callers start with an empty set, `depth` 0,
/// and the base indentation of the block.
pub fn build_selection(
    type_name: &str,
    registry: &TypeRegistry,
    options: &GenerateOptions,
    depth: usize,
    visited: &mut FxHashSet<String>,
    indent: usize,
) -> Result<Option<String>, CodegenError> {
    let pad = " ".repeat(indent);
    let def = match registry.lookup(type_name)? {
        TypeDef::Object(def) | TypeDef::Interface(def) => def,
        // The minimal deterministic valid selection on a union.
        TypeDef::Union(_) => return Ok(Some(format!("{pad}__typename"))),
        _ => return Ok(None),
    };

    visited.insert(type_name.to_string());
    let lines = selection_lines(def, registry, options, depth, visited, &pad, indent);
    visited.remove(type_name);

    let lines = lines?;
    if lines.is_empty() {
        Ok(None)
    } else {
        Ok(Some(lines.join("\n")))
    }
}

fn selection_lines(
    def: &ObjectDef,
    registry: &TypeRegistry,
    options: &GenerateOptions,
    depth: usize,
    visited: &mut FxHashSet<String>,
    pad: &str,
    indent: usize,
) -> Result<Vec<String>, CodegenError> {
    let mut lines = Vec::new();
    for field in def.fields.values() {
        let Some(args) = nested_args(field, registry, options) else {
            continue;
        };

        match field.ty.innermost_kind() {
            TypeKind::Scalar | TypeKind::Enum => {
                lines.push(format!("{pad}{}{args}", field.name));
            }
            TypeKind::Object | TypeKind::Interface | TypeKind::Union => {
                let target = field.ty.innermost_name();
                if visited.contains(target) || depth + 1 >= options.max_depth {
                    tracing::warn!(
                        field = %field.name,
                        type_name = %target,
                        "recursion truncated in selection set"
                    );
                    if let Some(leaf) = identifying_leaf(registry, target) {
                        lines.push(format!("{pad}{}{args} {{", field.name));
                        lines.push(format!("{pad}  {leaf}"));
                        lines.push(format!("{pad}}}"));
                    }
                } else if let Some(sub) = build_selection(
                    target,
                    registry,
                    options,
                    depth + 1,
                    visited,
                    indent + 2,
                )? {
                    lines.push(format!("{pad}{}{args} {{", field.name));
                    lines.push(sub);
                    lines.push(format!("{pad}}}"));
                } else {
                    tracing::warn!(field = %field.name, "dropping field with empty selection");
                }
            }
            // Input objects and wrappers cannot be an innermost response kind.
            _ => {
                tracing::warn!(field = %field.name, "dropping field with unexpected type kind");
            }
        }
    }
    Ok(lines)
}

/// Synthesizes inline literals for a nested field's required arguments.
///
/// Optional arguments are omitted. `None` means a required argument could not
/// be synthesized and the field should be skipped.
fn nested_args(
    field: &FieldDef,
    registry: &TypeRegistry,
    options: &GenerateOptions,
) -> Option<String> {
    let mut entries = Vec::new();
    for arg in &field.args {
        if !arg.ty.is_required() {
            continue;
        }
        match synthesize_value(&arg.ty, registry, options, 0, &mut FxHashSet::default()) {
            Ok(Some(value)) => entries.push(format!("{}: {}", arg.name, value)),
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(
                    field = %field.name,
                    argument = %arg.name,
                    error = %err,
                    "skipping field with unsynthesizable argument"
                );
                return None;
            }
        }
    }
    if entries.is_empty() {
        Some(String::new())
    } else {
        Some(format!("({})", entries.join(", ")))
    }
}

/// A stable identifying leaf for a truncated branch: the `id` field if the
/// type declares one, else its first leaf field with an `id`-like name.
fn identifying_leaf(registry: &TypeRegistry, type_name: &str) -> Option<String> {
    let def = match registry.lookup(type_name) {
        Ok(TypeDef::Object(def) | TypeDef::Interface(def)) => def,
        Ok(TypeDef::Union(_)) => return Some("__typename".to_string()),
        _ => return None,
    };

    let is_leaf = |field: &FieldDef| {
        matches!(
            field.ty.innermost_kind(),
            TypeKind::Scalar | TypeKind::Enum
        ) && field.args.is_empty()
    };

    if let Some(field) = def.fields.get("id") {
        if is_leaf(field) {
            return Some(field.name.clone());
        }
    }
    def.fields
        .values()
        .find(|field| is_leaf(field) && field.name.to_lowercase().ends_with("id"))
        .map(|field| field.name.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gqlsmoke_schema::IntrospectionSchema;

    fn registry(types: serde_json::Value) -> TypeRegistry {
        let schema = IntrospectionSchema::from_json(serde_json::json!({
            "queryType": { "name": "Query" },
            "types": types
        }))
        .unwrap();
        TypeRegistry::build(&schema).unwrap()
    }

    fn build(type_name: &str, registry: &TypeRegistry, options: &GenerateOptions) -> Option<String> {
        build_selection(type_name, registry, options, 0, &mut FxHashSet::default(), 4).unwrap()
    }

    fn user_types() -> serde_json::Value {
        serde_json::json!([
            {
                "kind": "OBJECT",
                "name": "User",
                "fields": [
                    { "name": "id", "args": [], "type": { "kind": "NON_NULL", "ofType": { "kind": "SCALAR", "name": "ID" } } },
                    { "name": "name", "args": [], "type": { "kind": "SCALAR", "name": "String" } },
                    { "name": "friends", "args": [], "type": { "kind": "LIST", "ofType": { "kind": "OBJECT", "name": "User" } } }
                ]
            }
        ])
    }

    #[test]
    fn test_self_referential_type_truncates_to_id_leaf() {
        let registry = registry(user_types());
        let selection = build("User", &registry, &GenerateOptions::default()).unwrap();
        assert_eq!(
            selection,
            "    id\n    name\n    friends {\n      id\n    }"
        );
    }

    #[test]
    fn test_leaf_fields_in_declaration_order() {
        let registry = registry(serde_json::json!([
            {
                "kind": "OBJECT",
                "name": "Point",
                "fields": [
                    { "name": "y", "args": [], "type": { "kind": "SCALAR", "name": "Float" } },
                    { "name": "x", "args": [], "type": { "kind": "SCALAR", "name": "Float" } }
                ]
            }
        ]));
        let selection = build("Point", &registry, &GenerateOptions::default()).unwrap();
        assert_eq!(selection, "    y\n    x");
    }

    #[test]
    fn test_union_selects_typename() {
        let registry = registry(serde_json::json!([
            {
                "kind": "UNION",
                "name": "SearchResult",
                "possibleTypes": [
                    { "kind": "OBJECT", "name": "User" }
                ]
            }
        ]));
        let selection = build("SearchResult", &registry, &GenerateOptions::default()).unwrap();
        assert_eq!(selection, "    __typename");
    }

    #[test]
    fn test_nested_field_with_required_args_gets_literals() {
        let registry = registry(serde_json::json!([
            {
                "kind": "OBJECT",
                "name": "User",
                "fields": [
                    {
                        "name": "avatar",
                        "args": [
                            { "name": "size", "type": { "kind": "NON_NULL", "ofType": { "kind": "SCALAR", "name": "Int" } } },
                            { "name": "format", "type": { "kind": "SCALAR", "name": "String" } }
                        ],
                        "type": { "kind": "SCALAR", "name": "String" }
                    }
                ]
            }
        ]));
        let selection = build("User", &registry, &GenerateOptions::default()).unwrap();
        assert_eq!(selection, "    avatar(size: 1)");
    }

    #[test]
    fn test_field_with_unsynthesizable_argument_is_skipped() {
        let registry = registry(serde_json::json!([
            {
                "kind": "OBJECT",
                "name": "User",
                "fields": [
                    { "name": "id", "args": [], "type": { "kind": "SCALAR", "name": "ID" } },
                    {
                        "name": "history",
                        "args": [
                            { "name": "since", "type": { "kind": "NON_NULL", "ofType": { "kind": "SCALAR", "name": "DateTime" } } }
                        ],
                        "type": { "kind": "SCALAR", "name": "String" }
                    }
                ]
            }
        ]));
        let selection = build("User", &registry, &GenerateOptions::default()).unwrap();
        assert_eq!(selection, "    id");
    }

    #[test]
    fn test_truncated_branch_without_identifying_leaf_is_dropped() {
        let registry = registry(serde_json::json!([
            {
                "kind": "OBJECT",
                "name": "Tree",
                "fields": [
                    { "name": "label", "args": [], "type": { "kind": "SCALAR", "name": "String" } },
                    { "name": "child", "args": [], "type": { "kind": "OBJECT", "name": "Tree" } }
                ]
            }
        ]));
        let selection = build("Tree", &registry, &GenerateOptions::default()).unwrap();
        assert_eq!(selection, "    label");
    }

    #[test]
    fn test_depth_cap_bounds_deep_chains() {
        let registry = registry(serde_json::json!([
            {
                "kind": "OBJECT",
                "name": "L0",
                "fields": [
                    { "name": "id", "args": [], "type": { "kind": "SCALAR", "name": "ID" } },
                    { "name": "next", "args": [], "type": { "kind": "OBJECT", "name": "L1" } }
                ]
            },
            {
                "kind": "OBJECT",
                "name": "L1",
                "fields": [
                    { "name": "id", "args": [], "type": { "kind": "SCALAR", "name": "ID" } },
                    { "name": "next", "args": [], "type": { "kind": "OBJECT", "name": "L2" } }
                ]
            },
            {
                "kind": "OBJECT",
                "name": "L2",
                "fields": [
                    { "name": "id", "args": [], "type": { "kind": "SCALAR", "name": "ID" } },
                    { "name": "next", "args": [], "type": { "kind": "OBJECT", "name": "L0" } }
                ]
            }
        ]));
        let selection = build(
            "L0",
            &registry,
            &GenerateOptions::default().with_max_depth(2),
        )
        .unwrap();
        assert_eq!(
            selection,
            "    id\n    next {\n      id\n      next {\n        id\n      }\n    }"
        );
    }
}
