// src/templates.rs
use anyhow::{Context, Result};
use std::path::Path;

use crate::config::ExecutionContext;

/// Issue type id of "Sub-task" in the target Jira scheme.
pub const SUBTASK_ISSUE_TYPE: &str = "5";
pub const PAYLOAD_TEMPLATE_FILE: &str = "createSubTaskPayload.json";

pub struct Templates;

impl Templates {
    pub fn create_sub_task_payload() -> &'static str {
        include_str!("../resources/templates/createSubTaskPayload.json")
    }

    /// The payload template, taken from `<jisc_home>/templates/` when the user
    /// placed an override there.
    pub fn load_payload_template(jisc_home: Option<&Path>) -> Result<String> {
        if let Some(home) = jisc_home {
            let override_path = home.join("templates").join(PAYLOAD_TEMPLATE_FILE);
            if override_path.is_file() {
                log::info!("Using payload template override at {:?}", override_path);
                return std::fs::read_to_string(&override_path)
                    .with_context(|| format!("Failed to read payload template {:?}", override_path));
            }
        }

        Ok(Self::create_sub_task_payload().to_string())
    }
}

/// Fill the payload template for one sub-task. Line breaks are removed from the
/// task text; nothing else is escaped.
pub fn render_payload(template: &str, ctx: &ExecutionContext, task: &str) -> String {
    let task: String = task.chars().filter(|c| *c != '\r' && *c != '\n').collect();

    let mut payload = template.to_string();
    payload = payload.replace("%PK%", &ctx.project_key);
    payload = payload.replace("%PARENTSTORY%", &ctx.story_key);
    payload = payload.replace("%SUMMARY%", &task);
    payload = payload.replace("%DESCRIPTION%", &task);
    payload = payload.replace("%ISSUETYPE%", SUBTASK_ISSUE_TYPE);
    payload
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn context() -> ExecutionContext {
        ExecutionContext {
            username: "u".to_string(),
            password: "p".to_string(),
            story_key: "ABC-1".to_string(),
            project_key: "ABC".to_string(),
        }
    }

    #[test]
    fn builtin_template_renders_to_valid_json() {
        let payload = render_payload(Templates::create_sub_task_payload(), &context(), "Write tests");
        let json: Value = serde_json::from_str(&payload).unwrap();

        assert_eq!(json["fields"]["project"]["key"], "ABC");
        assert_eq!(json["fields"]["parent"]["key"], "ABC-1");
        assert_eq!(json["fields"]["summary"], "Write tests");
        assert_eq!(json["fields"]["description"], "Write tests");
        assert_eq!(json["fields"]["issuetype"]["id"], "5");
    }

    #[test]
    fn line_breaks_are_stripped_from_task_text() {
        let payload = render_payload(Templates::create_sub_task_payload(), &context(), "a\r\nb\n");
        let json: Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(json["fields"]["summary"], "ab");
    }

    #[test]
    fn substitution_is_plain_text() {
        let template = "%PK%|%PARENTSTORY%|%SUMMARY%|%DESCRIPTION%|%ISSUETYPE%";
        assert_eq!(render_payload(template, &context(), "say \"hi\""), "ABC|ABC-1|say \"hi\"|say \"hi\"|5");
    }

    #[test]
    fn override_template_is_preferred() {
        let home = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(home.path().join("templates")).unwrap();
        std::fs::write(home.path().join("templates").join(PAYLOAD_TEMPLATE_FILE), "{\"custom\":\"%SUMMARY%\"}").unwrap();

        let template = Templates::load_payload_template(Some(home.path())).unwrap();
        assert_eq!(template, "{\"custom\":\"%SUMMARY%\"}");

        let empty_home = tempfile::tempdir().unwrap();
        let template = Templates::load_payload_template(Some(empty_home.path())).unwrap();
        assert_eq!(template, Templates::create_sub_task_payload());
    }
}
