use serde_json::json;

use crate::api::{Authenticator, FileSession, HttpApi, SessionProvider, Token};
use crate::cli::commands::TokenCommands;
use crate::cli::finish;
use crate::config::Config;
use crate::error::MoodtaskError;
use crate::models::AuthResponse;
use crate::output;

pub fn run_login(email: &str, password: &str, json_output: bool) -> i32 {
    finish(
        authenticate(json_output, |api| api.login(email, password)),
        json_output,
    )
}

pub fn run_register(username: &str, email: &str, password: &str, json_output: bool) -> i32 {
    finish(
        authenticate(json_output, |api| api.register(username, email, password)),
        json_output,
    )
}

fn authenticate(
    json_output: bool,
    call: impl FnOnce(&HttpApi) -> Result<AuthResponse, MoodtaskError>,
) -> Result<i32, MoodtaskError> {
    let config = Config::load()?;
    let api = HttpApi::new(&config, None)?;
    let auth = call(&api)?;
    if auth.token.is_empty() {
        return Err(MoodtaskError::remote("Server returned an empty token"));
    }
    FileSession::open_default()?.set(Token::new(auth.token))?;

    if json_output {
        output::json::print(&output::json::success(json!({ "user": auth.user })));
    } else {
        println!("Signed in as {} <{}>", auth.user.username, auth.user.email);
    }
    Ok(0)
}

pub fn run_logout(json_output: bool) -> i32 {
    let result = (|| -> Result<i32, MoodtaskError> {
        FileSession::open_default()?.clear()?;
        if json_output {
            output::json::print(&output::json::success(json!({ "signed_out": true })));
        } else {
            println!("Signed out.");
        }
        Ok(0)
    })();
    finish(result, json_output)
}

pub fn run_token(cmd: TokenCommands, json_output: bool) -> i32 {
    let result = (|| -> Result<i32, MoodtaskError> {
        let session = FileSession::open_default()?;
        match cmd {
            TokenCommands::Set { token } => {
                let token = token.trim();
                if token.is_empty() {
                    return Err(MoodtaskError::validation("Token must not be empty"));
                }
                session.set(Token::new(token))?;
                if json_output {
                    output::json::print(&output::json::success(json!({ "stored": true })));
                } else {
                    println!("Token stored.");
                }
            }
            TokenCommands::Status => {
                let signed_in = session.get().is_some();
                if json_output {
                    output::json::print(&output::json::success(json!({ "signed_in": signed_in })));
                } else if signed_in {
                    println!("Signed in.");
                } else {
                    println!("Not signed in.");
                }
            }
        }
        Ok(0)
    })();
    finish(result, json_output)
}
