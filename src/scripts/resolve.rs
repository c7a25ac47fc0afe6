// src/scripts/resolve.rs
use anyhow::{Context, Result};

use crate::prompt::Prompter;
use crate::task_sets::{self, TaskSet};

/// Where the sub-task descriptions of a run come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskSource {
    /// `--task`: one sub-task, no confirmation, no "create more" loop.
    Single(String),
    /// `--file`: a set name or a path.
    Named(String),
    /// Pick any number of known sets.
    Interactive,
}

impl TaskSource {
    pub fn is_single(&self) -> bool {
        matches!(self, TaskSource::Single(_))
    }
}

/// Build the batch for one story. Selected sets are merged in order; lines
/// are confirmed one by one unless `skip_confirmation` is set.
pub fn resolve_batch<P: Prompter>(
    prompter: &mut P,
    source: &TaskSource,
    sets: &[TaskSet],
    story_key: &str,
    skip_confirmation: bool,
) -> Result<Vec<String>> {
    let selected = match source {
        TaskSource::Single(task) => {
            let task: String = task.chars().filter(|c| *c != '\r' && *c != '\n').collect();
            if task.trim().is_empty() {
                anyhow::bail!("The single task given with --task is empty");
            }
            return Ok(vec![task]);
        }
        TaskSource::Named(name) => vec![task_sets::resolve_named(name, sets)?],
        TaskSource::Interactive => select_sets(prompter, sets)?,
    };

    let mut batch = Vec::new();
    for set in &selected {
        println!();
        println!("📋 Making sub-tasks for {} with task-set: {}.", story_key, set.name);

        let tasks = set
            .read_tasks()
            .with_context(|| format!("Failed to load task set '{}'", set.name))?;
        log::debug!("Task set '{}' has {} task(s)", set.name, tasks.len());

        batch.extend(filter_tasks(prompter, tasks, skip_confirmation)?);
    }

    Ok(batch)
}

fn select_sets<P: Prompter>(prompter: &mut P, sets: &[TaskSet]) -> Result<Vec<TaskSet>> {
    if sets.is_empty() {
        anyhow::bail!("No task sets available");
    }

    let names: Vec<String> = sets.iter().map(|set| set.name.clone()).collect();
    loop {
        let chosen = prompter.multi_select("Select a task set", &names)?;
        if !chosen.is_empty() {
            return Ok(chosen.into_iter().filter_map(|i| sets.get(i).cloned()).collect());
        }
        println!("⚠️  Select at least one task set.");
    }
}

fn filter_tasks<P: Prompter>(prompter: &mut P, tasks: Vec<String>, skip_confirmation: bool) -> Result<Vec<String>> {
    let mut kept = Vec::with_capacity(tasks.len());
    for task in tasks {
        if task.trim().is_empty() {
            continue;
        }
        if skip_confirmation || prompter.confirm(&format!("Add \"{}\"?", task), true)? {
            kept.push(task);
        }
    }
    Ok(kept)
}
