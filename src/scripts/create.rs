// src/scripts/create.rs
use anyhow::{Context, Result};
use log::{info, warn};

use crate::config::{jisc_home, system_username, GlobalConfig, JIRA_URL_ENV};
use crate::jira::{IssueCreator, JiraClient, JiraError};
use crate::prompt::{Prompter, TerminalPrompter};
use crate::scripts::collect::{self, ContextArgs};
use crate::scripts::resolve::{self, TaskSource};
use crate::scripts::submit::{self, BatchOutcome};
use crate::task_sets::{self, TaskSet};
use crate::templates::Templates;

#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    pub user: Option<String>,
    pub password: Option<String>,
    pub story: Option<String>,
    pub key: Option<String>,
    pub task: Option<String>,
    pub file: Option<String>,
    pub yes: bool,
}

impl CreateArgs {
    fn task_source(&self) -> TaskSource {
        match (&self.task, &self.file) {
            (Some(task), _) => TaskSource::Single(task.clone()),
            (None, Some(file)) => TaskSource::Named(file.clone()),
            (None, None) => TaskSource::Interactive,
        }
    }

    fn context_args(&self) -> ContextArgs {
        ContextArgs {
            user: self.user.clone(),
            password: self.password.clone(),
            story: self.story.clone(),
            key: self.key.clone(),
        }
    }
}

/// How a run ended when it did not fail with an error. `main` exits with
/// status 1 on `LockedOut`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Finished,
    /// Jira answered 403: the account needs a manual login with captcha.
    LockedOut,
}

/// Everything a run needs besides the prompter and the HTTP client.
pub struct Session<'a> {
    pub template: &'a str,
    pub sets: &'a [TaskSet],
    pub configured_user: Option<String>,
    pub username_default: Option<String>,
}

pub async fn run(args: CreateArgs) -> Result<RunOutcome> {
    let config = GlobalConfig::load().context("Failed to load ~/.jisc/config.json")?;
    let jira = config.resolve_jira(std::env::var(JIRA_URL_ENV).ok())?;
    let client = JiraClient::new(&jira).context("Failed to build HTTP client for Jira")?;
    info!("Creating sub-tasks through {}", client.create_url());

    let home = jisc_home().ok();
    let template = Templates::load_payload_template(home.as_deref())?;
    let user_sets_dir = home.as_ref().map(|h| h.join("sets"));
    let sets = task_sets::discover(user_sets_dir.as_deref())?;

    println!("🧩 Generate sub-tasks for a Jira story.");
    println!();

    let session = Session {
        template: &template,
        sets: &sets,
        configured_user: config.username.clone(),
        username_default: system_username(),
    };
    let mut prompter = TerminalPrompter::default();
    create_sub_tasks(&client, &mut prompter, &session, args).await
}

/// Collect the context, then build and submit batches until the user is done.
/// A 401 re-asks the password and sends the same batch again from the start.
pub async fn create_sub_tasks<C: IssueCreator, P: Prompter>(
    client: &C,
    prompter: &mut P,
    session: &Session<'_>,
    args: CreateArgs,
) -> Result<RunOutcome> {
    let source = args.task_source();
    let mut ctx = collect::collect_context(
        prompter,
        args.context_args(),
        session.configured_user.clone(),
        session.username_default.clone(),
    )?;

    loop {
        let batch = resolve::resolve_batch(prompter, &source, session.sets, &ctx.story_key, args.yes)?;
        if batch.is_empty() {
            println!("⚠️  No sub-tasks selected for {}.", ctx.story_key);
        }

        while !batch.is_empty() {
            let progress = submit::progress_bar(batch.len());
            match submit::submit_batch(client, session.template, &ctx, &batch, &progress).await {
                Ok(BatchOutcome::Created(count)) => {
                    println!();
                    println!("✅ {} sub-task(s) created for {}", count, ctx.story_key);
                    break;
                }
                Ok(BatchOutcome::Reauthenticate { created }) => {
                    if created > 0 {
                        warn!("{} sub-task(s) of this batch were already created and will be sent again", created);
                    }
                    println!();
                    println!("⚠️  Wrong password, enter the correct password.");
                    collect::reprompt_password(prompter, &mut ctx)?;
                }
                Err(JiraError::Forbidden) => return Ok(RunOutcome::LockedOut),
                Err(e) => {
                    return Err(e).with_context(|| format!("Failed to create sub-tasks for {}", ctx.story_key));
                }
            }
        }

        if source.is_single() || !prompter.confirm("Create more tasks?", false)? {
            return Ok(RunOutcome::Finished);
        }

        println!();
        let previous_story = ctx.story_key.clone();
        let (story_key, project_key) = collect::collect_story(prompter, None, None, Some(&previous_story))?;
        ctx.story_key = story_key;
        ctx.project_key = project_key;
    }
}
