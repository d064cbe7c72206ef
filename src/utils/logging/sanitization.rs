//! Masking of account data before it reaches a log line

use regex::Regex;
use std::sync::LazyLock;

static SENSITIVE_FIELDS: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r#"(?i)"(password|_dynSessConf|sessionConfirmationNumber|pin)"\s*:\s*"[^"]*""#).ok()
});

static SENSITIVE_PARAMS: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)(password|_dynSessConf|pin)=([^&\s]+)").ok()
});

pub struct Sanitization;

impl Sanitization {
    /// Keep enough of a login to correlate log lines without exposing it.
    ///
    /// `jane.doe@example.com` becomes `ja***@example.com`.
    pub fn mask_identity(login: &str) -> String {
        let (local, domain) = match login.split_once('@') {
            Some((local, domain)) => (local, Some(domain)),
            None => (login, None),
        };

        let visible: String = local.chars().take(2).collect();
        let masked = if local.chars().count() > 2 {
            format!("{}***", visible)
        } else {
            "***".to_string()
        };

        match domain {
            Some(domain) => format!("{}@{}", masked, domain),
            None => masked,
        }
    }

    /// Redact secrets in JSON bodies and query strings
    pub fn sanitize_log_data(data: &str) -> String {
        let mut sanitized = data.to_string();

        if let Some(re) = SENSITIVE_FIELDS.as_ref() {
            sanitized = re
                .replace_all(&sanitized, r#""$1":"***REDACTED***""#)
                .to_string();
        }
        if let Some(re) = SENSITIVE_PARAMS.as_ref() {
            sanitized = re.replace_all(&sanitized, "$1=***REDACTED***").to_string();
        }

        sanitized
    }
}
