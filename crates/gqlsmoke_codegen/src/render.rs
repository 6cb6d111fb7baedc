//! Test-module rendering.
//!
//! Emits one Rust `#[test]` per operation. Each test posts its operation
//! document through the configured transport module and asserts only that the
//! transport call succeeded and the response carries `data` and no `errors`.
//! Output is byte-identical across runs for the same operations and options.

use crate::{GenerateOptions, Operation};

/// Renders the full test-module source for an ordered list of operations.
#[must_use]
pub fn render_test_file(operations: &[Operation], options: &GenerateOptions) -> String {
    let mut out = String::new();
    out.push_str("//! GraphQL smoke tests generated by gqlsmoke.\n");
    out.push_str("//!\n");
    out.push_str("//! One test per exposed query/mutation root field. Requests are\n");
    out.push_str("//! structurally and type-valid; response content is not asserted.\n");
    out.push_str("//!\n");
    out.push_str("//! Regenerate instead of editing by hand.\n\n");
    out.push_str(&format!("const ENDPOINT: &str = \"{}\";\n", options.endpoint));

    for op in operations {
        out.push('\n');
        out.push_str("#[test]\n");
        out.push_str(&format!("fn {}() {{\n", test_name(op)));
        out.push_str(&format!("    let query = r#\"{}\"#;\n", op.document()));
        out.push_str(&format!(
            "    let response = {}::post(ENDPOINT, query).expect(\"transport failure\");\n",
            options.transport
        ));
        out.push_str("    assert!(\n");
        out.push_str("        response.get(\"errors\").is_none(),\n");
        out.push_str("        \"GraphQL errors: {:?}\",\n");
        out.push_str("        response.get(\"errors\")\n");
        out.push_str("    );\n");
        out.push_str(
            "    assert!(response.get(\"data\").is_some(), \"response has no data member\");\n",
        );
        out.push_str("}\n");
    }

    out
}

/// `query_createUser` style names collapsed to `query_create_user`.
fn test_name(op: &Operation) -> String {
    format!("{}_{}", op.kind, snake_case(&op.field_name))
}

fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, ch) in name.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 && !out.ends_with('_') {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OperationKind;

    fn sample_operation() -> Operation {
        Operation {
            kind: OperationKind::Query,
            field_name: "currentUser".to_string(),
            args_literal: String::new(),
            selection: Some("    id\n    name".to_string()),
        }
    }

    #[test]
    fn test_snake_case() {
        assert_eq!(snake_case("user"), "user");
        assert_eq!(snake_case("createUser"), "create_user");
        assert_eq!(snake_case("createHTTPRoute"), "create_h_t_t_p_route");
        assert_eq!(snake_case("already_snake"), "already_snake");
    }

    #[test]
    fn test_rendered_module_shape() {
        let source = render_test_file(&[sample_operation()], &GenerateOptions::default());
        assert!(source.starts_with("//! GraphQL smoke tests generated by gqlsmoke.\n"));
        assert!(source.contains("const ENDPOINT: &str = \"/graphql\";\n"));
        assert!(source.contains("fn query_current_user() {\n"));
        assert!(source.contains(
            "let query = r#\"query currentUser {\n  currentUser {\n    id\n    name\n  }\n}\"#;"
        ));
        assert!(source.contains("crate::transport::post(ENDPOINT, query)"));
        assert!(source.contains("response.get(\"data\").is_some()"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let options = GenerateOptions::default().with_transport("crate::support::http");
        let first = render_test_file(&[sample_operation()], &options);
        let second = render_test_file(&[sample_operation()], &options);
        assert_eq!(first, second);
        assert!(first.contains("crate::support::http::post(ENDPOINT, query)"));
    }
}
