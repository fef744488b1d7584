//! Print the OpenAPI document as JSON.

use std::io::{self, Write};

use chengyu_backend::doc::ApiDoc;
use color_eyre::eyre::{Context, Result};
use utoipa::OpenApi;

fn main() -> Result<()> {
    color_eyre::install()?;
    let json = ApiDoc::openapi()
        .to_pretty_json()
        .wrap_err("serialise OpenAPI document")?;
    writeln!(io::stdout().lock(), "{json}")?;
    Ok(())
}
