use anyhow::{Context, Result};
use crate::models::CardCatalog;

pub fn parse_catalog(body: &str) -> Result<CardCatalog> {
    serde_json::from_str(body).context("response body is not a JSON object")
}
