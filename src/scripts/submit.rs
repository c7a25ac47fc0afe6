// src/scripts/submit.rs
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};

use crate::config::ExecutionContext;
use crate::jira::{IssueCreator, JiraError};
use crate::templates::render_payload;

/// Result of one pass over a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOutcome {
    /// Every sub-task was created.
    Created(usize),
    /// Jira answered 401 after `created` sub-tasks of this pass. The whole
    /// batch has to be sent again once the password is fixed.
    Reauthenticate { created: usize },
}

pub fn progress_bar(len: usize) -> ProgressBar {
    let bar = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}") {
        bar.set_style(style);
    }
    bar
}

/// Send one issue-creation request per task, in order, stopping at the first
/// failure. 401 becomes `Reauthenticate`; 403 and every other error are
/// returned untouched.
pub async fn submit_batch<C: IssueCreator>(
    client: &C,
    template: &str,
    ctx: &ExecutionContext,
    batch: &[String],
    progress: &ProgressBar,
) -> Result<BatchOutcome, JiraError> {
    info!("Submitting {} sub-task(s) to {}", batch.len(), ctx.story_key);
    progress.set_length(batch.len() as u64);
    progress.set_position(0);

    for (created, task) in batch.iter().enumerate() {
        progress.set_message(task.clone());
        let payload = render_payload(template, ctx, task);

        match client.create_issue(ctx, payload).await {
            Ok(()) => progress.inc(1),
            Err(JiraError::Unauthorized) => {
                progress.abandon();
                warn!(
                    "Unauthorized after {} of {} sub-task(s); those will be created again on retry",
                    created,
                    batch.len()
                );
                return Ok(BatchOutcome::Reauthenticate { created });
            }
            Err(e) => {
                progress.abandon();
                return Err(e);
            }
        }
    }

    progress.finish_with_message("done");
    Ok(BatchOutcome::Created(batch.len()))
}
