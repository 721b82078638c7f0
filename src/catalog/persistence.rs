use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::models::{SolveRequest, SolveResponse};

/// Load a solve request from a JSON file.
pub fn load_request<P: AsRef<Path>>(path: P) -> Result<SolveRequest> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Save a solve response as pretty JSON.
pub fn save_response<P: AsRef<Path>>(path: P, response: &SolveResponse) -> Result<()> {
    let json = serde_json::to_string_pretty(response)?;
    fs::write(path, json)?;
    Ok(())
}
