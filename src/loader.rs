//! This module provides the `ProgramLoader` struct, responsible for loading machine
//! definitions from JSON files, strings and directories.

use crate::analyzer::validate;
use crate::definition::MachineDefinition;
use crate::types::MachineError;
use std::fs;
use std::path::{Path, PathBuf};

/// File extension of machine definition files.
pub const DEFINITION_EXTENSION: &str = "json";

/// `ProgramLoader` is a utility struct for loading machine definitions.
///
/// Every loaded definition is validated before it is returned, so a successful load can
/// always be turned into a [`crate::TuringMachine`] given the right number of inputs.
pub struct ProgramLoader;

impl ProgramLoader {
    /// Loads a single machine definition from the specified file path.
    ///
    /// # Returns
    ///
    /// * `Ok(MachineDefinition)` if the file is read, decoded and valid.
    /// * `Err(MachineError::FileError)` if the file cannot be read.
    /// * `Err(MachineError::ParseError)` if the content is not a machine definition.
    /// * Any validation error from [`validate`].
    pub fn load_program(path: &Path) -> Result<MachineDefinition, MachineError> {
        let content = fs::read_to_string(path).map_err(|e| {
            MachineError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        let mut definition = Self::load_program_from_string(&content)?;
        if definition.name.is_empty() {
            if let Some(stem) = path.file_stem() {
                definition.name = stem.to_string_lossy().into_owned();
            }
        }

        Ok(definition)
    }

    /// Loads a single machine definition from JSON text.
    pub fn load_program_from_string(content: &str) -> Result<MachineDefinition, MachineError> {
        let definition: MachineDefinition = serde_json::from_str(content)?;
        validate(&definition)?;

        Ok(definition)
    }

    /// Loads every `.json` definition in `directory`.
    ///
    /// Directories and files with other extensions are skipped. Each file produces one
    /// result, so a broken file does not prevent the others from loading.
    pub fn load_programs(
        directory: &Path,
    ) -> Vec<Result<(PathBuf, MachineDefinition), MachineError>> {
        if !directory.exists() {
            return vec![Err(MachineError::FileError(format!(
                "Directory {} does not exist",
                directory.display()
            )))];
        }

        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                return vec![Err(MachineError::FileError(format!(
                    "Failed to read directory {}: {}",
                    directory.display(),
                    e
                )))]
            }
        };

        let mut results: Vec<_> = entries
            .filter_map(|entry| {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        return Some(Err(MachineError::FileError(format!(
                            "Failed to read directory entry: {}",
                            e
                        ))))
                    }
                };

                let path = entry.path();
                if path.is_dir() || path.extension().is_none_or(|ext| ext != DEFINITION_EXTENSION)
                {
                    return None;
                }

                match Self::load_program(&path) {
                    Ok(definition) => Some(Ok((path, definition))),
                    Err(e) => Some(Err(MachineError::FileError(format!(
                        "Failed to load program from {}: {}",
                        path.display(),
                        e
                    )))),
                }
            })
            .collect();

        // Directory order is platform dependent.
        results.sort_by(|a, b| match (a, b) {
            (Ok((a, _)), Ok((b, _))) => a.cmp(b),
            (Ok(_), Err(_)) => std::cmp::Ordering::Less,
            (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
            (Err(a), Err(b)) => a.to_string().cmp(&b.to_string()),
        });

        results
    }
}
