pub mod mood;
pub mod task;
pub mod user;

pub use mood::*;
pub use task::*;
pub use user::*;
