use std::path::PathBuf;

use clap::{Parser, Subcommand};

const VERSION: &str = env!("MOODTASK_VERSION");

#[derive(Parser)]
#[command(
    name = "moodtask",
    version = VERSION,
    about = "Mood-adaptive personal task manager client",
    after_help = "\
NOTE:
  State lives in $MOODTASK_HOME (default ~/.moodtask): config.json, session.json, journal.db.
  The API base URL comes from config (`moodtask config set api_url ...`) or $MOODTASK_API_URL.
  Set MOODTASK_LOG=debug for diagnostics on stderr.

EXIT CODES:
  0  Success
  1  Error (not signed in, validation, not found, etc.)
  2  Degraded: a remote call failed and a local fallback produced the result

MOODS:
  Happy      importance + priority bonus, highest first
  Tired      lowest priority first
  Stressed   soonest due date first
  Focused    highest importance first
  Energetic  highest priority first
  Completed and non-reorganizable tasks never move.

ORDERING:
  By default the reorganized list is re-sorted by task id (server-compatible).
  Use --mood-first, or `config set reassembly mood_first`, to keep mood order."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and store the session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Create an account and store the session token
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Session token management
    #[command(subcommand)]
    Token(TokenCommands),

    /// Task management
    #[command(subcommand)]
    Task(TaskCommands),

    /// Mood detection and selection
    #[command(subcommand)]
    Mood(MoodCommands),

    /// Classify text with the offline keyword classifier only
    Classify {
        /// Free text describing how you feel
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Reorder tasks for a mood (server first, local fallback)
    #[command(after_help = "\
NOTE:
  Without MOOD: uses the latest journaled mood, else config default_mood.
  --input reads a JSON task array (`-` for stdin) used for the local fallback.
  --offline skips the server entirely and requires no session.")]
    Reorganize {
        /// Happy | Tired | Stressed | Focused | Energetic
        mood: Option<String>,
        #[command(flatten)]
        opts: ArrangeOpts,
    },

    /// Detect a mood from text, journal it, and reorganize tasks for it
    Checkin {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
        #[command(flatten)]
        opts: ArrangeOpts,
    },

    /// Show the mood journal, newest first
    History {
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Summary statistics for the task list
    Report {
        /// Read tasks from a JSON file instead of the server (`-` for stdin)
        #[arg(long)]
        input: Option<PathBuf>,
    },

    /// User profile
    #[command(subcommand)]
    Profile(ProfileCommands),

    /// Local configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct ArrangeOpts {
    /// Task snapshot JSON file (`-` for stdin)
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Do not contact the server
    #[arg(long)]
    pub offline: bool,

    /// Keep mood order instead of re-sorting by id
    #[arg(long)]
    pub mood_first: bool,
}

#[derive(Subcommand)]
pub enum TokenCommands {
    /// Store an existing bearer token
    Set { token: String },
    /// Print whether a valid session exists
    Status,
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// List tasks
    List {
        /// Todo | in_progress | Completed
        #[arg(long)]
        status: Option<String>,
        /// Low | Medium | High
        #[arg(long)]
        priority: Option<String>,
        /// Case-insensitive match on title or description
        #[arg(long)]
        search: Option<String>,
        /// due | priority | importance | title
        #[arg(long)]
        sort: Option<String>,
        /// Read tasks from a JSON file instead of the server (`-` for stdin)
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Show one task
    Show { id: i64 },
    /// Create a task
    Add {
        title: String,
        #[arg(long)]
        category: String,
        /// Due date: RFC 3339 or YYYY-MM-DD
        #[arg(long)]
        due: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "Medium")]
        priority: String,
        #[arg(long, default_value = "Todo")]
        status: String,
        /// 1-10
        #[arg(long, default_value = "5")]
        importance: i32,
        /// 0-100
        #[arg(long, default_value = "0")]
        progress: i32,
        /// Exclude from mood-based reordering
        #[arg(long)]
        fixed: bool,
        /// Mark the due date as non-negotiable
        #[arg(long)]
        strict: bool,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Update fields of a task
    Update {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        due: Option<String>,
        #[arg(long)]
        importance: Option<i32>,
        #[arg(long)]
        progress: Option<i32>,
        #[arg(long)]
        reorganizable: Option<bool>,
        #[arg(long)]
        strict: Option<bool>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete a task
    Delete { id: i64 },
}

#[derive(Subcommand)]
pub enum MoodCommands {
    /// Analyze free text (server first, keyword fallback) and journal the result
    Detect {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
        /// Use the keyword classifier only
        #[arg(long)]
        offline: bool,
    },
    /// Pick a mood manually and journal it
    Set { mood: String },
    /// Show the latest journaled mood (or the configured default)
    Current,
}

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Show the signed-in user's profile
    Show,
    /// Update profile fields
    Update {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// New password
        #[arg(long)]
        password: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Set a key: api_url, timeout_secs, reassembly, default_mood
    Set { key: String, value: String },
}
