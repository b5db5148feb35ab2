pub mod client;
pub mod model;

pub use client::GitHubClient;
pub use model::{Commit, Repository};
