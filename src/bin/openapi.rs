use anyhow::Result;

// Print the OpenAPI document as JSON.
fn main() -> Result<()> {
    let doc = authgate::api::openapi();
    println!("{}", doc.to_pretty_json()?);
    Ok(())
}
