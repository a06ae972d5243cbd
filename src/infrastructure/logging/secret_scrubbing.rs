use regex::{Captures, Regex};
use std::fmt;
use std::sync::LazyLock;

static DEFAULT_SCRUBBER: LazyLock<SecretScrubber> = LazyLock::new(SecretScrubber::new);

/// Scrub credentials out of `message` with the shared scrubber.
pub fn scrub_secrets(message: &str) -> String {
    DEFAULT_SCRUBBER.scrub_message(message)
}

/// Removes Beeminder auth tokens from text bound for logs.
///
/// Tokens travel as an `auth_token` query parameter, so URLs that reach an
/// error message carry them verbatim.
#[derive(Clone)]
pub struct SecretScrubber {
    query_pattern: Regex,
    field_pattern: Regex,
    bearer_pattern: Regex,
}

impl SecretScrubber {
    /// Create a new secret scrubber
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        Self {
            // ?auth_token=abc or &access_token=abc
            query_pattern: Regex::new(r"((?:auth|access)_token=)[^&\s\x22']+")
                .expect("query pattern is valid"),
            // "auth_token": "abc", token: abc
            field_pattern: Regex::new(
                concat!(
                    r#"(["']?(?:auth_token|access_token|token|password)["']?\s*[:=]\s*)"#,
                    r#"["']?[^"'\s,}&]+["']?"#,
                ),
            )
            .expect("field pattern is valid"),
            bearer_pattern: Regex::new(r"Bearer\s+[a-zA-Z0-9\-_\.]+")
                .expect("bearer pattern is valid"),
        }
    }

    /// Scrub a message of sensitive data
    pub fn scrub_message(&self, message: &str) -> String {
        let scrubbed = self.query_pattern.replace_all(message, "${1}[REDACTED]");
        let scrubbed = self
            .field_pattern
            .replace_all(&scrubbed, |caps: &Captures| format!("{}[REDACTED]", &caps[1]));
        self.bearer_pattern
            .replace_all(&scrubbed, "Bearer [REDACTED]")
            .into_owned()
    }
}

impl Default for SecretScrubber {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SecretScrubber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretScrubber").finish()
    }
}
