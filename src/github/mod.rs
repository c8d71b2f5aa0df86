//! GitHub access for the feed pipeline.

mod client;
pub mod models;

pub use client::{GithubClient, GithubFetcher};
