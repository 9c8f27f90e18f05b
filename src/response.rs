use anyhow::{bail, Context, Result};
use std::io::Read;
use std::path::Path;

/// Extracts the hex frame from a scanning service body of the form `{"data": "<hex>"}`.
pub fn hex_from_body(body: &str) -> Result<String> {
    let value: serde_json::Value =
        serde_json::from_str(body).with_context(|| "Response body is not JSON")?;
    match value.get("data") {
        Some(serde_json::Value::String(hex)) => Ok(hex.clone()),
        Some(other) => bail!("Malformed response: 'data' is not a string but {other}"),
        None => bail!("Malformed response: expected {{ data: <hex string> }}"),
    }
}

/// Reads a response body from `path`, or stdin for `None` and `-`.
pub fn read_body(path: Option<&Path>) -> Result<String> {
    let mut body = String::new();
    match path {
        Some(path) if path != Path::new("-") => {
            log::debug!("Reading response body from {path:?}");
            std::fs::File::open(path)
                .with_context(|| format!("Cannot open response file {path:?}"))?
                .read_to_string(&mut body)
                .with_context(|| format!("Cannot read response file {path:?}"))?;
        }
        _ => {
            log::debug!("Reading response body from stdin");
            std::io::stdin()
                .read_to_string(&mut body)
                .with_context(|| "Cannot read response body from stdin")?;
        }
    }
    Ok(body)
}
