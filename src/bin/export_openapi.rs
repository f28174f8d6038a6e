//! Export the gateway's OpenAPI specification as JSON
//!
//! Usage:
//!   cargo run --bin export_openapi > openapi.json
//!
//! Or with file output:
//!   cargo run --bin export_openapi -- --output docs/openapi.json

use anyhow::Context;
use utoipa::OpenApi;

use erp_gateway::gateway::openapi::ApiDoc;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let output_path = match args.iter().position(|a| a == "--output" || a == "-o") {
        Some(i) => Some(
            args.get(i + 1)
                .context("--output requires a file path")?
                .as_str(),
        ),
        None => None,
    };

    let json = ApiDoc::openapi()
        .to_pretty_json()
        .context("failed to serialize OpenAPI spec")?;

    match output_path {
        Some(path) => {
            std::fs::write(path, &json).with_context(|| format!("failed to write {}", path))?;
            eprintln!("✅ OpenAPI spec exported to: {}", path);
        }
        None => println!("{}", json),
    }
    Ok(())
}
