//! Test-case generation for gqlsmoke.
//!
//! This crate turns a built [`TypeRegistry`] into the source text of one test
//! module, with one test per query/mutation root field:
//! - `mock`: Type-correct mock argument literals
//! - `selection`: Depth-bounded response selection sets
//! - `operation`: Assembly of one operation per root field
//! - `render`: Deterministic test-module rendering
//!
//! # Example
//!
//! ```ignore
//! use gqlsmoke_codegen::{generate, GenerateOptions};
//!
//! let source = generate(&registry, &GenerateOptions::default())?;
//! std::fs::write("generated_tests.rs", source)?;
//! ```

pub mod mock;
pub mod operation;
pub mod render;
pub mod selection;

pub use mock::synthesize_value;
pub use operation::{build_operation, Operation, OperationKind};
pub use render::render_test_file;
pub use selection::build_selection;

use gqlsmoke_schema::{RegistryError, TypeRegistry};
use thiserror::Error;

/// Error from per-field synthesis or the generation pipeline.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// A custom scalar with no literal mapping.
    #[error("unsupported scalar: {name}")]
    UnsupportedScalar { name: String },

    /// An enum that declares no values.
    #[error("enum {name} declares no values")]
    EmptyEnum { name: String },

    /// A root field whose return type is not in the registry.
    #[error("return type of field {field} is not resolvable")]
    NoReturnType { field: String },

    /// An output type used in argument position.
    #[error("type {name} cannot be synthesized as an argument value")]
    InvalidArgumentType { name: String },

    /// A root selection that truncated down to nothing.
    #[error("selection for field {field} truncated to nothing")]
    EmptySelection { field: String },

    /// The schema exposes no query or mutation fields at all.
    #[error("no query or mutation fields produced a test case")]
    NoOperations,

    /// Registry failure while resolving a referenced type.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Whether nullable input-object fields receive synthesized values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFieldPolicy {
    /// Only NON_NULL fields; smaller, stabler output.
    #[default]
    Minimal,
    /// Every declared field.
    Exhaustive,
}

/// What to do when one field fails to synthesize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Skip the field with a warning and keep going.
    #[default]
    Skip,
    /// Fail the whole run on the first per-field error.
    Abort,
}

/// Generation options.
///
/// Identical options and schema produce byte-identical output.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Maximum nesting depth for selection sets and input-object literals.
    /// Deeper branches are truncated, never followed.
    pub max_depth: usize,
    /// Nullable input-field coverage policy.
    pub input_fields: InputFieldPolicy,
    /// Per-field failure policy.
    pub on_error: ErrorPolicy,
    /// Endpoint path baked into the generated tests.
    pub endpoint: String,
    /// Module path of the transport the generated tests call.
    pub transport: String,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            max_depth: 3,
            input_fields: InputFieldPolicy::default(),
            on_error: ErrorPolicy::default(),
            endpoint: "/graphql".to_string(),
            transport: "crate::transport".to_string(),
        }
    }
}

impl GenerateOptions {
    /// Creates options with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the depth cap.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the nullable input-field policy.
    #[must_use]
    pub fn with_input_fields(mut self, policy: InputFieldPolicy) -> Self {
        self.input_fields = policy;
        self
    }

    /// Sets the per-field failure policy.
    #[must_use]
    pub fn with_on_error(mut self, policy: ErrorPolicy) -> Self {
        self.on_error = policy;
        self
    }

    /// Sets the endpoint path.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Sets the transport module path.
    #[must_use]
    pub fn with_transport(mut self, transport: impl Into<String>) -> Self {
        self.transport = transport.into();
        self
    }
}

/// Runs the whole pipeline: one operation per query/mutation root field, in
/// declaration order, rendered into one test module.
///
/// Per-field failures follow [`GenerateOptions::on_error`]; an empty result is
/// [`CodegenError::NoOperations`].
pub fn generate(registry: &TypeRegistry, options: &GenerateOptions) -> Result<String, CodegenError> {
    let roots = [
        (OperationKind::Query, registry.query_fields()),
        (OperationKind::Mutation, registry.mutation_fields()),
    ];

    let mut operations = Vec::new();
    for (kind, fields) in roots {
        for field in fields {
            match build_operation(field, kind, registry, options) {
                Ok(op) => operations.push(op),
                Err(err) => match options.on_error {
                    ErrorPolicy::Skip => {
                        tracing::warn!(field = %field.name, error = %err, "skipping field");
                    }
                    ErrorPolicy::Abort => return Err(err),
                },
            }
        }
    }

    if operations.is_empty() {
        return Err(CodegenError::NoOperations);
    }
    Ok(render_test_file(&operations, options))
}
