use super::RequestsLoggingLevel;

#[derive(Clone)]
pub struct ServerConfig {
    pub requests_logging_level: RequestsLoggingLevel,
    pub port: u16,
    /// `owner/name` of the upstream repository, shown in the usage text.
    pub repo_slug: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            requests_logging_level: RequestsLoggingLevel::Path,
            port: 3001,
            repo_slug: "hehonghui/awesome-english-ebooks".to_string(),
        }
    }
}
