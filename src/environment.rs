use std::fs;
use std::path::{Path, PathBuf};

use log::{error, info};

use crate::logger::{self, Level, caller};
use crate::paths::ApplicationPaths;

pub fn check_file_exists(path: &Path) -> bool {
    if path.exists() {
        return true;
    }
    let created = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
    .and_then(|_| fs::OpenOptions::new().write(true).create_new(true).open(path));

    match created {
        Ok(_) => {
            info!("File created: {}", path.display());
            true
        }
        Err(e) => {
            error!("Failed to create file: {} - {e}", path.display());
            false
        }
    }
}

pub fn check_directory_exists(path: &Path) -> bool {
    if path.is_dir() {
        return true;
    }
    if path.exists() {
        error!("Path exists but is not a directory: {}", path.display());
        return false;
    }
    match fs::create_dir_all(path) {
        Ok(()) => {
            info!("Directory created: {}", path.display());
            true
        }
        Err(e) => {
            error!("Failed to create directory: {} - {e}", path.display());
            false
        }
    }
}

pub fn check_environment(paths: &ApplicationPaths) -> bool {
    let caller = caller!("check_environment");

    if !check_directory_exists(&paths.log_dir) {
        logger::log(
            Level::Error,
            "Log directory does not exist and could not be created.",
            &caller,
            None,
        );
        return false;
    }

    for deleted in clear_log_files(&paths.log_dir) {
        logger::log(
            Level::Info,
            &format!("Deleted existing log file: {}", deleted.display()),
            &caller,
            Some(&paths.main_log_file),
        );
    }

    if !check_directory_exists(&paths.output_dir) {
        logger::log(
            Level::Error,
            "Output directory does not exist and could not be created.",
            &caller,
            Some(&paths.main_log_file),
        );
        return false;
    }
    logger::log(
        Level::Info,
        "Output directory exists or was successfully created.",
        &caller,
        Some(&paths.main_log_file),
    );
    true
}

// Listed up front so log lines written after the sweep survive it.
fn clear_log_files(dir: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            error!(
                "Failed to list log directory contents for cleanup: {} - {e}",
                dir.display()
            );
            return Vec::new();
        }
    };
    let files: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();

    files
        .into_iter()
        .filter(|file| match fs::remove_file(file) {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to delete existing log file: {} - {e}", file.display());
                false
            }
        })
        .collect()
}
