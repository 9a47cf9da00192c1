mod archiver;
mod environment;
mod fetcher;
mod logger;
mod models;
mod parser;
mod paths;

use anyhow::Result;
use env_logger::Env;
use log::info;

use crate::fetcher::FetchConfig;
use crate::paths::ApplicationPaths;

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    // Level colors are part of the console line format, terminal or not.
    colored::control::set_override(true);

    println!("Yu-Gi-Oh Cards Application Started!");
    let paths = ApplicationPaths::resolve()?;
    info!("Application root: {}", paths.root.display());
    info!("Resource directory: {}", paths.resource_dir.display());

    if !environment::check_environment(&paths) {
        println!("Environment check failed!");
        return Ok(());
    }
    println!("Environment check passed!");

    archiver::archive_all_cards(&paths, &FetchConfig::default());
    Ok(())
}
