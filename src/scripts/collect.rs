// src/scripts/collect.rs
use anyhow::Result;

use crate::config::{derive_project_key, ExecutionContext};
use crate::prompt::Prompter;

/// Context values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct ContextArgs {
    pub user: Option<String>,
    pub password: Option<String>,
    pub story: Option<String>,
    pub key: Option<String>,
}

/// Fill every field of the context, asking for whatever the flags left out.
/// `username_default` is offered at the username prompt.
pub fn collect_context<P: Prompter>(
    prompter: &mut P,
    args: ContextArgs,
    configured_user: Option<String>,
    username_default: Option<String>,
) -> Result<ExecutionContext> {
    let username = match non_empty(args.user).or(non_empty(configured_user)) {
        Some(user) => user,
        None => ask_until_filled(prompter, "Jira username", username_default.as_deref())?,
    };

    // Passwords are sent exactly as given.
    let password = match args.password.filter(|p| !p.is_empty()) {
        Some(password) => password,
        None => ask_password(prompter)?,
    };

    let (story_key, project_key) = collect_story(prompter, args.story, args.key, None)?;

    Ok(ExecutionContext {
        username,
        password,
        story_key,
        project_key,
    })
}

/// Story key and project key; the project key prompt suggests the story prefix.
pub fn collect_story<P: Prompter>(
    prompter: &mut P,
    story: Option<String>,
    key: Option<String>,
    suggested_story: Option<&str>,
) -> Result<(String, String)> {
    let story_key = match non_empty(story) {
        Some(story) => story,
        None => ask_until_filled(prompter, "Story", suggested_story)?,
    };

    let project_key = match non_empty(key) {
        Some(key) => key,
        None => {
            let suggested_key = derive_project_key(&story_key);
            ask_until_filled(prompter, "Project key", Some(&suggested_key))?
        }
    };

    Ok((story_key, project_key))
}

/// Called after Jira answered 401 for the current password.
pub fn reprompt_password<P: Prompter>(prompter: &mut P, ctx: &mut ExecutionContext) -> Result<()> {
    ctx.password = ask_password(prompter)?;
    Ok(())
}

fn ask_password<P: Prompter>(prompter: &mut P) -> Result<String> {
    loop {
        let password = prompter.password("Jira password")?;
        if !password.is_empty() {
            return Ok(password);
        }
    }
}

fn ask_until_filled<P: Prompter>(prompter: &mut P, prompt: &str, default: Option<&str>) -> Result<String> {
    let default = default.filter(|d| !d.trim().is_empty());
    loop {
        let answer = prompter.input(prompt, default)?;
        let answer = answer.trim();
        if !answer.is_empty() {
            return Ok(answer.to_string());
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
