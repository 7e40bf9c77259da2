//! services/api/src/bin/openapi.rs
//!
//! Dumps the OpenAPI document for the question and code-snippet routes.
//!
//! Usage: `openapi [PATH]`. Writes `openapi.json` by default; `-` prints to stdout.

use api_lib::web::rest::ApiDoc;
use utoipa::OpenApi;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let target = std::env::args().nth(1);
    let doc = ApiDoc::openapi();
    let json = doc.to_pretty_json()?;

    match target.as_deref() {
        Some("-") => println!("{}", json),
        other => {
            let path = other.unwrap_or("openapi.json");
            std::fs::write(path, &json)?;
            eprintln!(
                "✅ Wrote {} route(s) of the record API to {}",
                doc.paths.paths.len(),
                path
            );
        }
    }
    Ok(())
}
