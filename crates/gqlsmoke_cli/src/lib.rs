//! Command-line interface for gqlsmoke.
//!
//! # Usage
//!
//! ```bash
//! # Generate smoke tests from a saved introspection result
//! gqlsmoke schema.json
//!
//! # Custom output path and endpoint
//! gqlsmoke schema.json -o tests/smoke.rs -e /api/graphql
//!
//! # Read the introspection JSON from stdin
//! gqlsmoke - < schema.json
//! ```

use clap::Parser;
use colored::Colorize;
use gqlsmoke_codegen::{generate, ErrorPolicy, GenerateOptions, InputFieldPolicy};
use gqlsmoke_schema::{IntrospectionSchema, TypeRegistry};
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "gqlsmoke")]
#[command(version, about = "Generate GraphQL smoke tests from an introspection result")]
pub struct Cli {
    /// Path to the introspection JSON, or `-` for stdin
    pub schema: PathBuf,

    /// Output path for the generated test module
    #[arg(short, long, default_value = "generated_tests.rs")]
    pub output: PathBuf,

    /// GraphQL endpoint path baked into the generated tests
    #[arg(short, long, default_value = "/graphql")]
    pub endpoint: String,

    /// Module path of the transport the generated tests call
    #[arg(long, default_value = "crate::transport")]
    pub transport: String,

    /// Maximum selection and input-object nesting depth
    #[arg(long, default_value = "3")]
    pub max_depth: usize,

    /// Synthesize nullable input-object fields too, not just required ones
    #[arg(long)]
    pub all_input_fields: bool,

    /// Abort on the first field that fails to synthesize
    #[arg(long)]
    pub fail_fast: bool,

    #[arg(short, long)]
    pub verbose: bool,
}

/// Runs the generator. Returns the process exit code; nothing is written on
/// a fatal failure.
pub fn run(cli: &Cli) -> Result<i32, Box<dyn std::error::Error>> {
    let text = match read_schema_source(&cli.schema) {
        Ok(text) => text,
        Err(e) => {
            eprintln!(
                "{} failed to read schema from '{}': {}",
                "Error:".red().bold(),
                cli.schema.display(),
                e
            );
            return Ok(1);
        }
    };

    let registry = match IntrospectionSchema::from_json_str(&text)
        .and_then(|schema| TypeRegistry::build(&schema))
    {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!(
                "{} invalid introspection result in '{}': {}",
                "Error:".red().bold(),
                cli.schema.display(),
                e
            );
            return Ok(1);
        }
    };

    if cli.verbose {
        let roots = registry.query_fields().len() + registry.mutation_fields().len();
        println!("{} {} root field(s)", "Found".blue(), roots);
    }

    let options = GenerateOptions::default()
        .with_max_depth(cli.max_depth)
        .with_endpoint(&cli.endpoint)
        .with_transport(&cli.transport)
        .with_input_fields(if cli.all_input_fields {
            InputFieldPolicy::Exhaustive
        } else {
            InputFieldPolicy::Minimal
        })
        .with_on_error(if cli.fail_fast {
            ErrorPolicy::Abort
        } else {
            ErrorPolicy::Skip
        });

    let source = match generate(&registry, &options) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            return Ok(1);
        }
    };

    std::fs::write(&cli.output, &source)?;
    println!("{} {}", "Generated".green(), cli.output.display());
    Ok(0)
}

fn read_schema_source(path: &Path) -> std::io::Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        std::fs::read_to_string(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["gqlsmoke", "schema.json"]);
        assert_eq!(cli.schema, PathBuf::from("schema.json"));
        assert_eq!(cli.output, PathBuf::from("generated_tests.rs"));
        assert_eq!(cli.endpoint, "/graphql");
        assert_eq!(cli.transport, "crate::transport");
        assert_eq!(cli.max_depth, 3);
        assert!(!cli.all_input_fields);
        assert!(!cli.fail_fast);
    }

    #[test]
    fn test_run_end_to_end() {
        let dir = std::env::temp_dir();
        let schema_path = dir.join("gqlsmoke_cli_test_schema.json");
        let output_path = dir.join("gqlsmoke_cli_test_out.rs");
        let schema = serde_json::json!({
            "data": {
                "__schema": {
                    "queryType": { "name": "Query" },
                    "types": [
                        {
                            "kind": "OBJECT",
                            "name": "Query",
                            "fields": [
                                { "name": "ping", "args": [], "type": { "kind": "SCALAR", "name": "Boolean" } }
                            ]
                        }
                    ]
                }
            }
        });
        std::fs::write(&schema_path, schema.to_string()).unwrap();

        let cli = Cli::parse_from([
            "gqlsmoke",
            schema_path.to_str().unwrap(),
            "-o",
            output_path.to_str().unwrap(),
        ]);
        assert_eq!(run(&cli).unwrap(), 0);

        let generated = std::fs::read_to_string(&output_path).unwrap();
        assert!(generated.contains("fn query_ping()"));

        std::fs::remove_file(&schema_path).ok();
        std::fs::remove_file(&output_path).ok();
    }

    #[test]
    fn test_run_reports_missing_schema() {
        let cli = Cli::parse_from(["gqlsmoke", "/nonexistent/schema.json"]);
        assert_eq!(run(&cli).unwrap(), 1);
    }
}
