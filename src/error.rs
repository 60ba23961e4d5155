use thiserror::Error;


#[derive(Debug, Error)]
/// Errors aborting the whole watchdog run
pub enum WatchdogError {
    /// Missing, unreadable or malformed configuration (source, details)
    #[error("Configuration stage failed for: {0}. Details: {1}")]
    Config(String, String),

    /// Missing, unreadable or malformed site list (path, details)
    #[error("Site list stage failed for: {0}. Details: {1}")]
    SiteList(String, String),

    /// Failure report couldn't be delivered
    #[error("Notification stage failed. Details: {0}")]
    Notification(String),
}
