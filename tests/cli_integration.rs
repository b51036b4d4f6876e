#[allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::PathBuf;
use std::thread;
use tempfile::TempDir;

// ─── helpers ───────────────────────────────────────────────────────

/// Nothing listens on port 9, so every remote call fails fast.
const DEAD_API: &str = "http://127.0.0.1:9/api";

struct TestEnv {
    dir: TempDir,
    api_url: String,
}

impl TestEnv {
    fn new() -> Self {
        Self::with_api(DEAD_API)
    }

    fn with_api(api_url: &str) -> Self {
        let dir = TempDir::new().expect("create tempdir");
        Self {
            dir,
            api_url: api_url.to_string(),
        }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("moodtask").expect("binary");
        cmd.current_dir(self.dir.path())
            .env("MOODTASK_HOME", self.dir.path().join("home"))
            .env("MOODTASK_API_URL", &self.api_url)
            .env("MOODTASK_TIMEOUT_SECS", "2")
            .env_remove("MOODTASK_LOG");
        cmd
    }

    fn run(&self, args: &[&str]) -> (Option<i32>, Value) {
        let mut a: Vec<&str> = args.to_vec();
        a.push("--json");
        let output = self.cmd().args(&a).output().expect("run");
        let stdout = String::from_utf8_lossy(&output.stdout);
        let v = serde_json::from_str(&stdout)
            .unwrap_or_else(|e| panic!("parse JSON failed: {e}\nstdout: {stdout}"));
        (output.status.code(), v)
    }

    fn run_json(&self, args: &[&str]) -> Value {
        self.run(args).1
    }

    fn run_ok(&self, args: &[&str]) -> Value {
        let (code, v) = self.run(args);
        assert_eq!(v["success"], true, "expected success=true: {v}");
        assert_eq!(code, Some(0), "expected exit 0: {v}");
        v
    }

    fn run_err(&self, args: &[&str]) -> Value {
        let (code, v) = self.run(args);
        assert_eq!(v["success"], false, "expected success=false: {v}");
        assert_eq!(code, Some(1), "expected exit 1: {v}");
        v
    }

    fn write_file(&self, filename: &str, content: &str) -> PathBuf {
        let p = self.dir.path().join(filename);
        fs::write(&p, content).expect("write file");
        p
    }

    fn write_tasks(&self) -> String {
        self.write_file("tasks.json", &sample_tasks_json())
            .display()
            .to_string()
    }

    fn sign_in(&self) {
        self.run_ok(&["token", "set", "test-token"]);
    }
}

fn task_json(id: i64, priority: &str, importance: i64, due: &str) -> Value {
    serde_json::json!({
        "id": id,
        "title": format!("task {id}"),
        "description": "",
        "category": "Work",
        "priority": priority,
        "status": "Todo",
        "dueDate": due,
        "importance": importance,
        "progress": 0,
        "reorganizable": true,
        "strict": false
    })
}

/// Ids 5, 2 (not reorganizable), 3, 4 (completed), 1, 6.
fn sample_tasks_json() -> String {
    let mut fixed = task_json(2, "High", 9, "2025-01-02T09:00:00Z");
    fixed["reorganizable"] = Value::Bool(false);
    fixed["category"] = Value::String("Home".into());
    let mut done = task_json(4, "Low", 1, "2025-01-01T09:00:00Z");
    done["status"] = Value::String("Completed".into());
    let mut in_progress = task_json(1, "Medium", 5, "2025-01-10T09:00:00Z");
    in_progress["status"] = Value::String("In Progress".into());
    in_progress["title"] = Value::String("Write quarterly report".into());
    Value::Array(vec![
        task_json(5, "High", 3, "2025-01-05T09:00:00Z"),
        fixed,
        task_json(3, "Low", 7, "2025-01-03T09:00:00Z"),
        done,
        in_progress,
        task_json(6, "Low", 2, "2025-01-04T09:00:00Z"),
    ])
    .to_string()
}

/// Answers every request with the same status and JSON body.
fn canned_server(status: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };
            read_request(&mut stream);
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });
    format!("http://{addr}/api")
}

/// Drain headers and body so the client sees a clean response.
fn read_request(stream: &mut TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        match stream.read(&mut chunk) {
            Ok(0) | Err(_) => return,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let body_len = head
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + body_len {
                return;
            }
        }
    }
}

fn ids(v: &Value) -> Vec<i64> {
    v["data"]["tasks"]
        .as_array()
        .expect("tasks array")
        .iter()
        .map(|t| t["id"].as_i64().unwrap())
        .collect()
}

// ─── 1. classify ───────────────────────────────────────────────────

#[test]
fn test_classify_keywords() {
    let env = TestEnv::new();
    let v = env.run_ok(&["classify", "so", "tired", "and", "sleepy"]);
    assert_eq!(v["data"]["mood"], "Tired");

    let v = env.run_ok(&["classify", "under", "pressure"]);
    assert_eq!(v["data"]["mood"], "Stressed");

    let v = env.run_ok(&["classify", "nothing", "in", "particular"]);
    assert_eq!(v["data"]["mood"], "Focused");
}

#[test]
fn test_classify_table_order_wins() {
    let env = TestEnv::new();
    let v = env.run_ok(&["classify", "HAPPY", "and", "ENERGETIC"]);
    assert_eq!(v["data"]["mood"], "Happy");
}

#[test]
fn test_classify_text_output() {
    let env = TestEnv::new();
    env.cmd()
        .args(["classify", "feeling", "pumped"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Energetic"));
}

// ─── 2. reorganize (offline) ───────────────────────────────────────

#[test]
fn test_reorganize_offline_defaults_to_id_order() {
    let env = TestEnv::new();
    let input = env.write_tasks();
    for mood in ["Happy", "Tired", "Stressed", "Focused", "Energetic"] {
        let (code, v) = env.run(&["reorganize", mood, "--offline", "--input", &input]);
        assert_eq!(code, Some(0), "{mood}: {v}");
        assert_eq!(v["fallback"], false);
        assert_eq!(v["data"]["arranged_by"], "local");
        assert_eq!(ids(&v), vec![1, 2, 3, 4, 5, 6], "{mood}");
    }
}

#[test]
fn test_reorganize_offline_mood_first() {
    let env = TestEnv::new();
    let input = env.write_tasks();
    let cases = [
        ("Tired", vec![3, 6, 1, 5, 2, 4]),
        ("Energetic", vec![5, 1, 3, 6, 2, 4]),
        ("Focused", vec![3, 1, 5, 6, 2, 4]),
        ("Stressed", vec![3, 6, 5, 1, 2, 4]),
    ];
    for (mood, want) in cases {
        let v = env.run_ok(&["reorganize", mood, "--offline", "--mood-first", "--input", &input]);
        assert_eq!(v["data"]["mood"], mood);
        assert_eq!(ids(&v), want, "{mood}");
    }
}

#[test]
fn test_reorganize_reassembly_from_config() {
    let env = TestEnv::new();
    let input = env.write_tasks();
    env.run_ok(&["config", "set", "reassembly", "mood_first"]);
    let v = env.run_ok(&["reorganize", "tired", "--offline", "--input", &input]);
    assert_eq!(ids(&v), vec![3, 6, 1, 5, 2, 4]);
}

#[test]
fn test_reorganize_uses_journaled_mood() {
    let env = TestEnv::new();
    let input = env.write_tasks();
    env.run_ok(&["mood", "set", "energetic"]);
    let v = env.run_ok(&["reorganize", "--offline", "--mood-first", "--input", &input]);
    assert_eq!(v["data"]["mood"], "Energetic");
    assert_eq!(ids(&v), vec![5, 1, 3, 6, 2, 4]);
}

#[test]
fn test_reorganize_defaults_to_configured_mood() {
    let env = TestEnv::new();
    let input = env.write_tasks();
    let v = env.run_ok(&["reorganize", "--offline", "--input", &input]);
    assert_eq!(v["data"]["mood"], "Focused");

    env.run_ok(&["config", "set", "default_mood", "Stressed"]);
    let v = env.run_ok(&["reorganize", "--offline", "--input", &input]);
    assert_eq!(v["data"]["mood"], "Stressed");
}

#[test]
fn test_reorganize_non_array_input_is_empty() {
    let env = TestEnv::new();
    let p = env.write_file("bad.json", r#"{"tasks": []}"#);
    let v = env.run_ok(&["reorganize", "Happy", "--offline", "--input", p.to_str().unwrap()]);
    assert_eq!(v["data"]["tasks"].as_array().unwrap().len(), 0);

    let p = env.write_file("null.json", "null");
    let v = env.run_ok(&["reorganize", "Happy", "--offline", "--input", p.to_str().unwrap()]);
    assert_eq!(v["data"]["tasks"].as_array().unwrap().len(), 0);
}

#[test]
fn test_reorganize_unknown_mood() {
    let env = TestEnv::new();
    let v = env.run_err(&["reorganize", "Grumpy", "--offline"]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
}

#[test]
fn test_reorganize_missing_input_file() {
    let env = TestEnv::new();
    let v = env.run_err(&["reorganize", "Happy", "--offline", "--input", "nope.json"]);
    assert_eq!(v["error"]["code"], "IO_ERROR");
}

// ─── 3. session handling ───────────────────────────────────────────

#[test]
fn test_not_signed_in() {
    let env = TestEnv::new();
    let input = env.write_tasks();
    let v = env.run_err(&["reorganize", "Happy", "--input", &input]);
    assert_eq!(v["error"]["code"], "NOT_SIGNED_IN");

    let v = env.run_err(&["task", "list"]);
    assert_eq!(v["error"]["code"], "NOT_SIGNED_IN");

    let v = env.run_err(&["mood", "detect", "tired"]);
    assert_eq!(v["error"]["code"], "NOT_SIGNED_IN");

    let v = env.run_err(&["profile", "show"]);
    assert_eq!(v["error"]["code"], "NOT_SIGNED_IN");
}

#[test]
fn test_token_status_and_logout() {
    let env = TestEnv::new();
    let v = env.run_ok(&["token", "status"]);
    assert_eq!(v["data"]["signed_in"], false);

    env.sign_in();
    let v = env.run_ok(&["token", "status"]);
    assert_eq!(v["data"]["signed_in"], true);

    env.run_ok(&["logout"]);
    let v = env.run_ok(&["token", "status"]);
    assert_eq!(v["data"]["signed_in"], false);

    // logging out twice is fine
    env.run_ok(&["logout"]);
}

#[test]
fn test_token_set_rejects_blank() {
    let env = TestEnv::new();
    let v = env.run_err(&["token", "set", "  "]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
}

#[test]
fn test_login_unreachable_server() {
    let env = TestEnv::new();
    let v = env.run_err(&["login", "--email", "a@b.c", "--password", "pw"]);
    assert_eq!(v["error"]["code"], "REMOTE_ERROR");
    let v = env.run_ok(&["token", "status"]);
    assert_eq!(v["data"]["signed_in"], false);
}

#[test]
fn test_rejected_session_is_cleared() {
    let api = canned_server("401 Unauthorized", r#"{"error":"Invalid token"}"#);
    let env = TestEnv::with_api(&api);
    let input = env.write_tasks();

    env.sign_in();
    let v = env.run_err(&["task", "list"]);
    assert_eq!(v["error"]["code"], "SESSION_EXPIRED");
    let v = env.run_ok(&["token", "status"]);
    assert_eq!(v["data"]["signed_in"], false);

    // a rejected session never degrades to the local reorganizer
    env.sign_in();
    let v = env.run_err(&["reorganize", "Tired", "--input", &input]);
    assert_eq!(v["error"]["code"], "SESSION_EXPIRED");
    let v = env.run_ok(&["token", "status"]);
    assert_eq!(v["data"]["signed_in"], false);
}

#[test]
fn test_not_found_codes() {
    let api = canned_server("404 Not Found", r#"{"error":"User not found"}"#);
    let env = TestEnv::with_api(&api);
    env.sign_in();

    let v = env.run_err(&["profile", "show"]);
    assert_eq!(v["error"]["code"], "NOT_FOUND");
    assert_eq!(v["error"]["message"], "User not found");

    let v = env.run_err(&["task", "show", "7"]);
    assert_eq!(v["error"]["code"], "TASK_NOT_FOUND");

    // a 404 is not an auth failure; the session survives
    let v = env.run_ok(&["token", "status"]);
    assert_eq!(v["data"]["signed_in"], true);
}

#[test]
fn test_profile_show_and_update() {
    let api = canned_server(
        "200 OK",
        r#"{"id":1,"username":"sam","email":"s@x","created_at":"2025-01-01T00:00:00Z","updated_at":"2025-02-01T00:00:00Z"}"#,
    );
    let env = TestEnv::with_api(&api);
    env.sign_in();

    let v = env.run_ok(&["profile", "show"]);
    assert_eq!(v["data"]["profile"]["username"], "sam");
    assert_eq!(v["data"]["profile"]["created_at"], "2025-01-01T00:00:00Z");

    env.cmd()
        .args(["profile", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Member since: 2025-01-01T00:00:00Z"));

    let v = env.run_ok(&["profile", "update", "--password", "n3w-secret"]);
    assert_eq!(v["data"]["profile"]["id"], 1);

    let v = env.run_err(&["profile", "update"]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
}

// ─── 4. degraded fallbacks ─────────────────────────────────────────

#[test]
fn test_reorganize_falls_back_when_server_down() {
    let env = TestEnv::new();
    let input = env.write_tasks();
    env.sign_in();
    let (code, v) = env.run(&["reorganize", "Tired", "--mood-first", "--input", &input]);
    assert_eq!(code, Some(2), "{v}");
    assert_eq!(v["success"], true);
    assert_eq!(v["fallback"], true);
    assert_eq!(v["data"]["arranged_by"], "local");
    assert!(v["data"]["fallback_reason"].is_string());
    assert_eq!(ids(&v), vec![3, 6, 1, 5, 2, 4]);
}

#[test]
fn test_mood_detect_falls_back_to_keywords() {
    let env = TestEnv::new();
    env.sign_in();
    let (code, v) = env.run(&["mood", "detect", "I", "feel", "exhausted"]);
    assert_eq!(code, Some(2), "{v}");
    assert_eq!(v["fallback"], true);
    assert_eq!(v["data"]["mood"], "Tired");
    assert_eq!(v["data"]["source"], "keywords");

    let v = env.run_ok(&["history"]);
    assert_eq!(v["data"]["count"], 1);
    assert_eq!(v["data"]["entries"][0]["source"], "keywords");
}

#[test]
fn test_mood_detect_offline_is_not_degraded() {
    let env = TestEnv::new();
    let v = env.run_ok(&["mood", "detect", "--offline", "so", "anxious"]);
    assert_eq!(v["fallback"], false);
    assert_eq!(v["data"]["mood"], "Stressed");
}

#[test]
fn test_checkin_offline() {
    let env = TestEnv::new();
    let input = env.write_tasks();
    let v = env.run_ok(&[
        "checkin", "motivated", "and", "ready", "--offline", "--mood-first", "--input", &input,
    ]);
    assert_eq!(v["data"]["mood"], "Energetic");
    assert_eq!(v["data"]["detection"]["source"], "keywords");
    assert_eq!(ids(&v), vec![5, 1, 3, 6, 2, 4]);

    let v = env.run_ok(&["mood", "current"]);
    assert_eq!(v["data"]["mood"], "Energetic");
}

#[test]
fn test_checkin_degraded_with_session() {
    let env = TestEnv::new();
    let input = env.write_tasks();
    env.sign_in();
    let (code, v) = env.run(&["checkin", "overwhelmed", "--input", &input]);
    assert_eq!(code, Some(2), "{v}");
    assert_eq!(v["fallback"], true);
    assert_eq!(v["data"]["mood"], "Stressed");
}

// ─── 5. mood journal ───────────────────────────────────────────────

#[test]
fn test_mood_set_current_history() {
    let env = TestEnv::new();
    let v = env.run_ok(&["mood", "current"]);
    assert_eq!(v["data"]["mood"], "Focused");
    assert_eq!(v["data"]["source"], "default");

    env.run_ok(&["mood", "set", "happy"]);
    env.run_ok(&["mood", "set", "Tired"]);

    let v = env.run_ok(&["mood", "current"]);
    assert_eq!(v["data"]["mood"], "Tired");
    assert_eq!(v["data"]["source"], "manual");

    let v = env.run_ok(&["history"]);
    let entries = v["data"]["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["mood"], "Tired");
    assert_eq!(entries[1]["mood"], "Happy");

    let v = env.run_ok(&["history", "--limit", "1"]);
    assert_eq!(v["data"]["count"], 1);
}

#[test]
fn test_mood_set_invalid() {
    let env = TestEnv::new();
    let v = env.run_err(&["mood", "set", "sad"]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
}

#[test]
fn test_history_empty_text() {
    let env = TestEnv::new();
    env.cmd()
        .args(["history"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No moods recorded yet."));
}

// ─── 6. task list / report from a snapshot ─────────────────────────

#[test]
fn test_task_list_from_input() {
    let env = TestEnv::new();
    let input = env.write_tasks();
    let v = env.run_ok(&["task", "list", "--input", &input]);
    assert_eq!(v["data"]["total"], 6);
    assert_eq!(v["data"]["shown"], 6);

    let v = env.run_ok(&["task", "list", "--input", &input, "--priority", "low"]);
    assert_eq!(ids(&v), vec![3, 4, 6]);

    let v = env.run_ok(&["task", "list", "--input", &input, "--status", "completed"]);
    assert_eq!(ids(&v), vec![4]);

    let v = env.run_ok(&["task", "list", "--input", &input, "--search", "QUARTERLY"]);
    assert_eq!(ids(&v), vec![1]);

    let v = env.run_ok(&["task", "list", "--input", &input, "--sort", "due"]);
    assert_eq!(ids(&v), vec![4, 2, 3, 6, 5, 1]);
}

#[test]
fn test_task_list_bad_filter() {
    let env = TestEnv::new();
    let input = env.write_tasks();
    let v = env.run_err(&["task", "list", "--input", &input, "--sort", "size"]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
}

#[test]
fn test_task_add_validates_before_network() {
    let env = TestEnv::new();
    env.sign_in();
    let v = env.run_err(&[
        "task", "add", "Plan trip", "--category", "Home", "--due", "2025-03-01", "--importance",
        "11",
    ]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");

    let v = env.run_err(&["task", "update", "7"]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
}

#[test]
fn test_report_from_input() {
    let env = TestEnv::new();
    let input = env.write_tasks();
    let v = env.run_ok(&["report", "--input", &input]);
    let d = &v["data"];
    assert_eq!(d["total"], 6);
    assert_eq!(d["completed"], 1);
    assert_eq!(d["in_progress"], 1);
    assert_eq!(d["todo"], 4);
    assert_eq!(d["high"], 2);
    assert_eq!(d["low"], 3);
    assert_eq!(d["reorganizable"], 5);
    assert_eq!(d["percentage"], 16.7);
    assert_eq!(d["categories"]["Home"]["total"], 1);
    assert_eq!(d["categories"]["Work"]["completed"], 1);
}

#[test]
fn test_report_empty_stdin() {
    let env = TestEnv::new();
    let output = env
        .cmd()
        .args(["report", "--input", "-", "--json"])
        .write_stdin("")
        .output()
        .expect("run");
    let v: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(v["data"]["total"], 0);
    assert_eq!(v["data"]["percentage"], 0.0);
}

// ─── 7. config ─────────────────────────────────────────────────────

#[test]
fn test_config_set_and_show() {
    let env = TestEnv::new();
    env.run_ok(&["config", "set", "timeout_secs", "30"]);
    env.run_ok(&["config", "set", "api_url", "https://tasks.example.com/api/"]);

    let output = env
        .cmd()
        .env_remove("MOODTASK_API_URL")
        .env_remove("MOODTASK_TIMEOUT_SECS")
        .args(["config", "show", "--json"])
        .output()
        .expect("run");
    let v: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(v["data"]["timeout_secs"], 30);
    assert_eq!(v["data"]["api_url"], "https://tasks.example.com/api");
    assert_eq!(v["data"]["reassembly"], "by_id");

    // environment overrides the file
    let v = env.run_ok(&["config", "show"]);
    assert_eq!(v["data"]["api_url"], DEAD_API);
}

#[test]
fn test_config_set_rejects_bad_values() {
    let env = TestEnv::new();
    let v = env.run_err(&["config", "set", "colour", "blue"]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
    let v = env.run_err(&["config", "set", "timeout_secs", "0"]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
    let v = env.run_err(&["config", "set", "api_url", "ftp://x"]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
    let v = env.run_err(&["config", "set", "reassembly", "random"]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
}

#[test]
fn test_config_invalid_file() {
    let env = TestEnv::new();
    let home = env.dir.path().join("home");
    fs::create_dir_all(&home).unwrap();
    fs::write(home.join("config.json"), "{ not json").unwrap();
    let v = env.run_json(&["config", "show"]);
    assert_eq!(v["success"], false);
    assert_eq!(v["error"]["code"], "CONFIG_ERROR");
}

// ─── 8. text mode errors ───────────────────────────────────────────

#[test]
fn test_text_mode_error_on_stderr() {
    let env = TestEnv::new();
    env.cmd()
        .args(["task", "list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}
