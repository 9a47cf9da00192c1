use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use chrono::{DateTime, Local};
use colored::{ColoredString, Colorize};
use log::error;

use crate::environment;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d -- %H:%M:%S%.3f";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Level {
    Info,
    Error,
    Warning,
    Debug,
    Other(String),
}

impl From<&str> for Level {
    fn from(name: &str) -> Self {
        match name.to_ascii_uppercase().as_str() {
            "INFO" => Level::Info,
            "ERROR" => Level::Error,
            "WARNING" => Level::Warning,
            "DEBUG" => Level::Debug,
            _ => Level::Other(name.to_string()),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Info => f.write_str("INFO"),
            Level::Error => f.write_str("ERROR"),
            Level::Warning => f.write_str("WARNING"),
            Level::Debug => f.write_str("DEBUG"),
            Level::Other(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Caller {
    pub namespace: &'static str,
    pub operation: &'static str,
}

impl Caller {
    pub fn component(&self) -> &'static str {
        self.namespace.rsplit("::").next().unwrap_or(self.namespace)
    }

    /// Enclosing module of the component; the crate name for top-level modules.
    pub fn package(&self) -> &'static str {
        match self.namespace.rsplit_once("::") {
            Some((package, _)) => package,
            None => self.namespace,
        }
    }
}

/// `caller!("operation")` names the calling function inside the current module.
macro_rules! caller {
    ($operation:expr) => {
        $crate::logger::Caller {
            namespace: module_path!(),
            operation: $operation,
        }
    };
}
pub(crate) use caller;

/// Prints to stdout when `file` is empty, otherwise appends to the file.
pub fn log(level: Level, message: &str, caller: &Caller, file: Option<&Path>) {
    let line = render_line(&Local::now(), &level, caller, message);

    let Some(path) = file.filter(|path| !path.as_os_str().is_empty()) else {
        println!("{}", colorize(&level, &line));
        return;
    };

    if !environment::check_file_exists(path) {
        error!("Failed to create log file: {}", path.display());
        println!("{}", colorize(&level, &line));
        return;
    }

    if let Err(e) = append_line(path, &line) {
        error!("Logging failed for {}: {e}", path.display());
    }
}

fn render_line(timestamp: &DateTime<Local>, level: &Level, caller: &Caller, message: &str) -> String {
    format!(
        "{}  {}  -- [{}.{}@{}] : {}",
        timestamp.format(TIMESTAMP_FORMAT),
        level,
        caller.component(),
        caller.operation,
        caller.package(),
        message
    )
}

fn colorize(level: &Level, line: &str) -> ColoredString {
    match level {
        Level::Info => line.green(),
        Level::Error => line.red(),
        Level::Warning => line.yellow(),
        Level::Debug => line.cyan(),
        Level::Other(_) => line.normal(),
    }
}

fn append_line(path: &Path, line: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().append(true).open(path)?;
    writeln!(file, "{line}")?;
    file.flush()
}
