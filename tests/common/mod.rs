//! Shared infrastructure for end-to-end tests.

pub mod github_stub;
pub mod server;

pub use github_stub::{GithubStub, StubRepo};
pub use server::TestServer;

pub const WIRED_ISSUE_PATH: &str = "05_wired/2022.02.02/wired_2022.02.02.pdf";
pub const ISSUE_BYTES: &[u8] = b"not really a pdf";
