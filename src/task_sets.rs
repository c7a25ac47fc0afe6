// src/task_sets.rs
//! Task sets: plain text files listing one sub-task per line

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const BUILTIN_SETS: &[(&str, &str)] = &[
    ("backend", include_str!("../resources/sets/backend")),
    ("frontend", include_str!("../resources/sets/frontend")),
    ("release", include_str!("../resources/sets/release")),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetOrigin {
    BuiltIn(&'static str),
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSet {
    pub name: String,
    pub origin: SetOrigin,
}

impl TaskSet {
    pub fn from_file(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());
        Self { name, origin: SetOrigin::File(path) }
    }

    /// Non-blank task lines of the set, in file order.
    pub fn read_tasks(&self) -> Result<Vec<String>> {
        match &self.origin {
            SetOrigin::BuiltIn(content) => Ok(split_tasks(content)),
            SetOrigin::File(path) => {
                let content = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read task set {:?}", path))?;
                Ok(split_tasks(&content))
            }
        }
    }

    pub fn origin_display(&self) -> String {
        match &self.origin {
            SetOrigin::BuiltIn(_) => "built-in".to_string(),
            SetOrigin::File(path) => path.display().to_string(),
        }
    }
}

/// Split file content into tasks: line endings removed, blank and
/// whitespace-only lines dropped.
pub fn split_tasks(content: &str) -> Vec<String> {
    content
        .split('\n')
        .map(|line| line.replace('\r', ""))
        .filter(|line| !line.trim().is_empty())
        .collect()
}

/// Built-in sets followed by the files in `user_dir`, sorted by name.
pub fn discover(user_dir: Option<&Path>) -> Result<Vec<TaskSet>> {
    let mut sets: Vec<TaskSet> = BUILTIN_SETS
        .iter()
        .map(|(name, content)| TaskSet {
            name: name.to_string(),
            origin: SetOrigin::BuiltIn(content),
        })
        .collect();

    if let Some(dir) = user_dir.filter(|d| d.is_dir()) {
        let mut user_sets = Vec::new();
        for entry in fs::read_dir(dir).with_context(|| format!("Failed to list task sets in {:?}", dir))? {
            let path = entry?.path();
            if path.is_file() {
                user_sets.push(TaskSet::from_file(path));
            }
        }
        user_sets.sort_by(|a, b| a.name.cmp(&b.name));
        log::debug!("Found {} user task set(s) in {:?}", user_sets.len(), dir);
        sets.extend(user_sets);
    }

    Ok(sets)
}

/// Resolve a `--file` argument: a known set name first, then a file path.
/// User sets come last in `sets`, so they shadow built-ins with the same name.
pub fn resolve_named(name: &str, sets: &[TaskSet]) -> Result<TaskSet> {
    if let Some(set) = sets.iter().rev().find(|set| set.name == name) {
        return Ok(set.clone());
    }

    let path = Path::new(name);
    if path.is_file() {
        return Ok(TaskSet::from_file(path.to_path_buf()));
    }

    anyhow::bail!("File {} does not exist", name)
}
