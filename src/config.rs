use std::env;

const DEFAULT_PAGE_SIZE: i64 = 50;
const DEFAULT_MAX_CONTENT_LENGTH: usize = 10_000;
const DEFAULT_MAX_AUTHOR_LENGTH: usize = 100;

fn env_usize(key: &str, default: usize) -> usize {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}

fn env_i64(key: &str, default: i64) -> i64 {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse::<i64>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}

/// Runtime configuration for the forum endpoints.
///
/// Database and listener settings come from Rocket's figment; this only holds
/// what the handlers themselves need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForumConfig {
    /// Threads per page when the client does not ask for a size.
    pub default_page_size: i64,
    /// Longest accepted message body, in characters.
    pub max_content_length: usize,
    /// Longest accepted author name, in characters.
    pub max_author_length: usize,
}

impl ForumConfig {
    pub fn from_env() -> Self {
        Self {
            default_page_size: env_i64("FORUM_DEFAULT_PAGE_SIZE", DEFAULT_PAGE_SIZE),
            max_content_length: env_usize("FORUM_MAX_CONTENT_LENGTH", DEFAULT_MAX_CONTENT_LENGTH),
            max_author_length: env_usize("FORUM_MAX_AUTHOR_LENGTH", DEFAULT_MAX_AUTHOR_LENGTH),
        }
    }
}

impl Default for ForumConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_content_length: DEFAULT_MAX_CONTENT_LENGTH,
            max_author_length: DEFAULT_MAX_AUTHOR_LENGTH,
        }
    }
}
