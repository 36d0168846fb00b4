use anyhow::{Context, Result};
use serde_json::Value;

pub fn decode(raw: &str) -> Result<Value> {
    serde_json::from_str(raw).context("failed to parse Top Stories response as JSON")
}
