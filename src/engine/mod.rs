pub mod classifier;
pub mod listing;
pub mod reorganizer;
pub mod report;
pub mod snapshot;

pub use classifier::{analyze_offline, classify};
pub use reorganizer::{reorganize, reorganize_with, Reassembly};
