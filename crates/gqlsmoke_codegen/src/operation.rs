//! Operation assembly.
//!
//! Combines one root field's name, synthesized argument literals, and
//! selection set into a complete executable operation document.

use gqlsmoke_schema::{FieldDef, TypeKind, TypeRegistry};
use rustc_hash::FxHashSet;

use crate::{mock::synthesize_value, selection::build_selection, CodegenError, GenerateOptions};

/// The operation kind of a root field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Query,
    Mutation,
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Query => write!(f, "query"),
            Self::Mutation => write!(f, "mutation"),
        }
    }
}

/// One assembled operation.
#[derive(Debug, Clone)]
pub struct Operation {
    pub kind: OperationKind,
    pub field_name: String,
    /// `(a: 1, b: "placeholder")`, or empty for argument-less fields.
    pub args_literal: String,
    /// Selection lines at four-space base indentation; `None` for scalar and
    /// enum return types.
    pub selection: Option<String>,
}

impl Operation {
    /// Renders the full operation document.
    #[must_use]
    pub fn document(&self) -> String {
        let mut out = format!("{} {} {{\n", self.kind, self.field_name);
        match &self.selection {
            Some(selection) => {
                out.push_str(&format!(
                    "  {}{} {{\n{selection}\n  }}\n",
                    self.field_name, self.args_literal
                ));
            }
            None => out.push_str(&format!("  {}{}\n", self.field_name, self.args_literal)),
        }
        out.push('}');
        out
    }
}

/// Builds one operation for a root field.
///
/// Argument literals are joined in declaration order. The return type is
/// unwrapped to its innermost named type before the selection is built;
/// scalar and enum returns yield no selection.
pub fn build_operation(
    field: &FieldDef,
    kind: OperationKind,
    registry: &TypeRegistry,
    options: &GenerateOptions,
) -> Result<Operation, CodegenError> {
    let mut entries = Vec::new();
    for arg in &field.args {
        let value = synthesize_value(&arg.ty, registry, options, 0, &mut FxHashSet::default())?;
        if let Some(value) = value {
            entries.push(format!("{}: {}", arg.name, value));
        }
    }
    let args_literal = if entries.is_empty() {
        String::new()
    } else {
        format!("({})", entries.join(", "))
    };

    let return_name = field.ty.innermost_name();
    let selection = match field.ty.innermost_kind() {
        TypeKind::Scalar | TypeKind::Enum => None,
        _ => {
            if registry.lookup(return_name).is_err() {
                return Err(CodegenError::NoReturnType {
                    field: field.name.clone(),
                });
            }
            let selection = build_selection(
                return_name,
                registry,
                options,
                0,
                &mut FxHashSet::default(),
                4,
            )?;
            match selection {
                Some(selection) => Some(selection),
                None => {
                    return Err(CodegenError::EmptySelection {
                        field: field.name.clone(),
                    });
                }
            }
        }
    };

    Ok(Operation {
        kind,
        field_name: field.name.clone(),
        args_literal,
        selection,
    })
}
