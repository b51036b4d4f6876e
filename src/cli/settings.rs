use serde_json::json;

use crate::cli::commands::ConfigCommands;
use crate::cli::finish;
use crate::config::Config;
use crate::error::MoodtaskError;
use crate::output;

pub fn run(cmd: ConfigCommands, json_output: bool) -> i32 {
    let result = (|| -> Result<i32, MoodtaskError> {
        match cmd {
            ConfigCommands::Show => {
                let config = Config::load()?;
                if json_output {
                    output::json::print(&output::json::success(serde_json::to_value(&config)?));
                } else {
                    output::text::print_config(&config);
                }
            }
            ConfigCommands::Set { key, value } => {
                let mut config = Config::load_file()?;
                config.set(&key, &value)?;
                let path = config.save()?;
                if json_output {
                    output::json::print(&output::json::success(json!({
                        "key": key,
                        "config": config,
                        "path": path.display().to_string()
                    })));
                } else {
                    println!("Set {key} ({})", path.display());
                }
            }
        }
        Ok(0)
    })();
    finish(result, json_output)
}
