//! Remote collaborators. The core never talks to the network itself; these
//! traits are the seams, `http::HttpApi` is the REST implementation.

pub mod http;
pub mod session;

pub use http::HttpApi;
pub use session::{FileSession, SessionProvider, Token};

use crate::error::MoodtaskError;
use crate::models::{
    AuthResponse, Mood, MoodAnalysis, NewTask, ProfilePatch, Task, TaskPatch, UserProfile,
};

pub trait TaskStore {
    fn list(&self) -> Result<Vec<Task>, MoodtaskError>;
    fn get(&self, id: i64) -> Result<Task, MoodtaskError>;
    fn create(&self, task: &NewTask) -> Result<Task, MoodtaskError>;
    fn update(&self, id: i64, patch: &TaskPatch) -> Result<Task, MoodtaskError>;
    fn delete(&self, id: i64) -> Result<(), MoodtaskError>;
    /// Server-side reorganize; preferred over the local reorganizer.
    fn reorganize(&self, mood: Mood) -> Result<Vec<Task>, MoodtaskError>;
}

pub trait MoodAnalyzer {
    fn analyze(&self, text: &str) -> Result<MoodAnalysis, MoodtaskError>;
}

pub trait ProfileStore {
    fn profile(&self) -> Result<UserProfile, MoodtaskError>;
    fn update_profile(&self, patch: &ProfilePatch) -> Result<UserProfile, MoodtaskError>;
}

pub trait Authenticator {
    fn login(&self, email: &str, password: &str) -> Result<AuthResponse, MoodtaskError>;
    fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, MoodtaskError>;
}
