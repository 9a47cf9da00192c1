use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::fetcher::{self, FetchConfig};
use crate::logger::{self, Caller, Level, caller};
use crate::models::CardCatalog;
use crate::parser;
use crate::paths::ApplicationPaths;

const INDENT: &[u8] = b"    ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Persisted,
    Failed,
}

pub fn archive_all_cards(paths: &ApplicationPaths, config: &FetchConfig) -> Outcome {
    let caller = caller!("archive_all_cards");
    let log_file = paths.get_all_cards_log_file.as_path();

    logger::log(Level::Info, &format!("Url: {}", config.url), &caller, Some(log_file));

    match fetch_and_save(config, &paths.all_cards_file, &caller, log_file) {
        Ok(()) => Outcome::Persisted,
        Err(e) => {
            logger::log(
                Level::Error,
                &format!("Failed to execute HTTP GET request: {e:#}"),
                &caller,
                Some(log_file),
            );
            Outcome::Failed
        }
    }
}

fn fetch_and_save(config: &FetchConfig, output: &Path, caller: &Caller, log_file: &Path) -> Result<()> {
    let client = fetcher::build_client(config).context("failed to create HTTP client")?;
    let body = fetcher::fetch_body(&client, &config.url).context("request failed")?;
    let catalog = parser::parse_catalog(&body)?;

    logger::log(
        Level::Info,
        &format!("Starting to write card data to file: {}", output.display()),
        caller,
        Some(log_file),
    );
    save_to_file(&catalog, output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    logger::log(
        Level::Info,
        &format!("Successfully wrote card data to file: {}", output.display()),
        caller,
        Some(log_file),
    );
    Ok(())
}

pub fn save_to_file(catalog: &CardCatalog, path: &Path) -> Result<()> {
    let json = to_pretty_json(catalog)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

fn to_pretty_json(catalog: &CardCatalog) -> Result<String> {
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    catalog.serialize(&mut serializer)?;
    Ok(String::from_utf8(buf)?)
}
