use std::io;
use std::path::{Component, Path, PathBuf};

use log::{error, warn};
use thiserror::Error;

const RESOURCE_DIRECTORY_NAME: &str = "resource";
const OUTPUT_DIRECTORY_NAME: &str = "output";
const LOG_DIRECTORY_NAME: &str = "log";
const ALL_CARDS_JSON_FILE_NAME: &str = "allcards.json";
const MAIN_LOG_FILE_NAME: &str = "main.log";
const GET_ALL_CARDS_LOG_FILE_NAME: &str = "getAllCards.log";

#[derive(Debug, Error)]
pub enum PathError {
    #[error("base path and sub path cannot be empty")]
    EmptySegment,
    #[error("sub path cannot contain path separators ('/', '\\') or be '.' or '..', found: {0}")]
    InvalidSegment(String),
    #[error("resolved path attempts to escape the base directory (base: {base}, resolved: {resolved})")]
    EscapesBase { base: PathBuf, resolved: PathBuf },
    #[error("unsupported application location: {0}")]
    UnsupportedLocation(PathBuf),
    #[error("could not determine the application root directory")]
    Undeterminable(#[source] io::Error),
}

#[derive(Debug, Clone)]
pub struct ApplicationPaths {
    pub root: PathBuf,
    pub resource_dir: PathBuf,
    pub output_dir: PathBuf,
    pub log_dir: PathBuf,
    pub all_cards_file: PathBuf,
    pub main_log_file: PathBuf,
    pub get_all_cards_log_file: PathBuf,
}

impl ApplicationPaths {
    pub fn resolve() -> Result<Self, PathError> {
        Self::from_root(resolve_application_root()?)
    }

    pub fn from_root(root: impl Into<PathBuf>) -> Result<Self, PathError> {
        let root = root.into();
        let resource_dir = safe_join(&root, RESOURCE_DIRECTORY_NAME)?;
        let output_dir = safe_join(&resource_dir, OUTPUT_DIRECTORY_NAME)?;
        let log_dir = safe_join(&resource_dir, LOG_DIRECTORY_NAME)?;

        Ok(Self {
            all_cards_file: safe_join(&output_dir, ALL_CARDS_JSON_FILE_NAME)?,
            main_log_file: safe_join(&log_dir, MAIN_LOG_FILE_NAME)?,
            get_all_cards_log_file: safe_join(&log_dir, GET_ALL_CARDS_LOG_FILE_NAME)?,
            root,
            resource_dir,
            output_dir,
            log_dir,
        })
    }
}

/// Directory containing the executable. Falls back to the current directory when the
/// executable location is unavailable, which is only right if started from there.
pub fn resolve_application_root() -> Result<PathBuf, PathError> {
    match std::env::current_exe() {
        Ok(location) => root_from_location(&location),
        Err(e) => {
            warn!(
                "Could not determine the executable location ({e}). Falling back to the current directory. This might be inaccurate."
            );
            std::env::current_dir().map_err(PathError::Undeterminable)
        }
    }
}

fn root_from_location(location: &Path) -> Result<PathBuf, PathError> {
    let location = std::path::absolute(location).map_err(PathError::Undeterminable)?;
    if location.is_dir() {
        return Ok(location);
    }
    if location.is_file() {
        if let Some(parent) = location.parent() {
            return Ok(parent.to_path_buf());
        }
    }
    Err(PathError::UnsupportedLocation(location))
}

/// Joins a single file or directory name onto `base`.
pub fn safe_join(base: &Path, child: &str) -> Result<PathBuf, PathError> {
    let result = join_one_level(base, child);
    if let Err(e) = &result {
        error!("Refusing to join {child:?} onto {}: {e}", base.display());
    }
    result
}

fn join_one_level(base: &Path, child: &str) -> Result<PathBuf, PathError> {
    if base.to_string_lossy().trim().is_empty() || child.trim().is_empty() {
        return Err(PathError::EmptySegment);
    }
    if child.contains('/') || child.contains('\\') || child == "." || child == ".." {
        return Err(PathError::InvalidSegment(child.to_string()));
    }

    let base = normalize(&std::path::absolute(base).map_err(PathError::Undeterminable)?);
    let resolved = normalize(&base.join(child));
    if resolved == base || !resolved.starts_with(&base) {
        return Err(PathError::EscapesBase { base, resolved });
    }
    Ok(resolved)
}

fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_a_plain_name_under_the_base() {
        let base = tempfile::tempdir().unwrap();
        let joined = safe_join(base.path(), "allcards.json").unwrap();
        assert_eq!(joined, normalize(&std::path::absolute(base.path()).unwrap()).join("allcards.json"));
        assert!(joined.starts_with(base.path()));
    }

    #[test]
    fn normalizes_the_base_before_joining() {
        let joined = safe_join(Path::new("/srv/app/./resource/../resource"), "log").unwrap();
        assert_eq!(joined, PathBuf::from("/srv/app/resource/log"));
    }

    #[test]
    fn relative_base_is_made_absolute() {
        let joined = safe_join(Path::new("resource"), "log").unwrap();
        assert!(joined.is_absolute());
        assert!(joined.ends_with("resource/log"));
    }

    #[test]
    fn rejects_empty_and_blank_segments() {
        let base = Path::new("/srv/app");
        assert!(matches!(safe_join(Path::new(""), "log"), Err(PathError::EmptySegment)));
        assert!(matches!(safe_join(Path::new("   "), "log"), Err(PathError::EmptySegment)));
        assert!(matches!(safe_join(base, ""), Err(PathError::EmptySegment)));
        assert!(matches!(safe_join(base, "  "), Err(PathError::EmptySegment)));
    }

    #[test]
    fn rejects_separators_and_dot_segments() {
        let base = Path::new("/srv/app");
        for child in ["..", ".", "a/b", "a\\b", "../etc", "..\\etc", "/etc"] {
            assert!(
                matches!(safe_join(base, child), Err(PathError::InvalidSegment(_))),
                "{child} should be rejected"
            );
        }
    }

    #[test]
    fn names_made_of_dots_are_still_single_level() {
        let joined = safe_join(Path::new("/srv/app"), "...").unwrap();
        assert_eq!(joined, PathBuf::from("/srv/app/..."));
    }

    #[test]
    fn layout_is_derived_from_the_root() {
        let root = tempfile::tempdir().unwrap();
        let paths = ApplicationPaths::from_root(root.path()).unwrap();

        assert!(paths.resource_dir.ends_with("resource"));
        assert!(paths.output_dir.ends_with("resource/output"));
        assert!(paths.log_dir.ends_with("resource/log"));
        assert!(paths.all_cards_file.ends_with("resource/output/allcards.json"));
        assert!(paths.main_log_file.ends_with("resource/log/main.log"));
        assert!(paths.get_all_cards_log_file.ends_with("resource/log/getAllCards.log"));
        for derived in [
            &paths.resource_dir,
            &paths.output_dir,
            &paths.log_dir,
            &paths.all_cards_file,
            &paths.main_log_file,
            &paths.get_all_cards_log_file,
        ] {
            assert!(derived.starts_with(&paths.root));
        }
    }

    #[test]
    fn root_of_an_executable_file_is_its_directory() {
        let dir = tempfile::tempdir().unwrap();
        let exe = dir.path().join("ygo_card_archiver");
        std::fs::write(&exe, b"").unwrap();

        assert_eq!(root_from_location(&exe).unwrap(), dir.path());
    }

    #[test]
    fn root_of_a_directory_location_is_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(root_from_location(dir.path()).unwrap(), dir.path());
    }

    #[test]
    fn missing_location_is_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone");
        assert!(matches!(
            root_from_location(&missing),
            Err(PathError::UnsupportedLocation(_))
        ));
    }

    #[test]
    fn running_binary_has_a_root() {
        let root = resolve_application_root().unwrap();
        assert!(root.is_dir());
    }
}
