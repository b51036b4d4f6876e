use serde_json::json;

use crate::api::ProfileStore;
use crate::cli::commands::ProfileCommands;
use crate::cli::{finish, signed_in};
use crate::config::Config;
use crate::error::MoodtaskError;
use crate::models::ProfilePatch;
use crate::output;

pub fn run(cmd: ProfileCommands, json_output: bool) -> i32 {
    let result = (|| -> Result<i32, MoodtaskError> {
        let profile = match cmd {
            ProfileCommands::Show => {
                let config = Config::load()?;
                signed_in(&config)?.profile()?
            }
            ProfileCommands::Update {
                username,
                email,
                password,
            } => {
                let patch = ProfilePatch {
                    username,
                    email,
                    password,
                };
                if patch.is_empty() {
                    return Err(MoodtaskError::validation("Nothing to update"));
                }
                if patch.password.as_deref() == Some("") {
                    return Err(MoodtaskError::validation("Password must not be empty"));
                }
                let config = Config::load()?;
                signed_in(&config)?.update_profile(&patch)?
            }
        };
        if json_output {
            output::json::print(&output::json::success(json!({
                "profile": output::json::profile_json(&profile)
            })));
        } else {
            output::text::print_profile(&profile);
        }
        Ok(0)
    })();
    finish(result, json_output)
}
