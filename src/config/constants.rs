use std::time::Duration;

pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const ANTHROPIC_API_KEY_ENV: &str = "ANTHROPIC_API_KEY";
pub const DB_PATH_ENV: &str = "MIGRALYZER_DB_PATH";

pub const DEFAULT_SERVER_PORT: u16 = 8080;
pub const SERVER_SHUTDOWN_GRACE_PERIOD_MS: u64 = 100;

// How often the in-memory queue rechecks for newly visible messages while
// a long poll is parked.
pub const QUEUE_POLL_SLICE_MS: u64 = 50;

pub const JAVA_FILE_EXTENSION: &str = "java";

pub fn wait_duration_secs(seconds: u64) -> Duration {
    Duration::from_secs(seconds)
}

pub fn sleep_duration_millis(milliseconds: u64) -> Duration {
    Duration::from_millis(milliseconds)
}
