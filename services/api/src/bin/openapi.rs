//! services/api/src/bin/openapi.rs
//!
//! Writes the GiftLink OpenAPI document to disk so it can be served or diffed
//! without starting the server. Usage: `openapi [OUTPUT]` (default `openapi.json`).

use api_lib::web::rest::ApiDoc;
use std::path::{Path, PathBuf};
use utoipa::OpenApi;

const DEFAULT_OUTPUT: &str = "openapi.json";

fn write_document(
    doc: &utoipa::openapi::OpenApi,
    output: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output, doc.to_pretty_json()?)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    let doc = ApiDoc::openapi();
    write_document(&doc, &output)?;
    println!(
        "Wrote {} paths of the GiftLink API to {}",
        doc.paths.paths.len(),
        output.display()
    );
    Ok(())
}
