//! Classification of link candidates.

use serde::Serialize;
use std::fmt;
use url::Url;

/// Schemes that may be rendered as links.
pub const ALLOWED_SCHEMES: [&str; 5] = ["http", "https", "blob", "mailto", "tel"];

/// How a candidate string was classified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", content = "scheme", rename_all = "snake_case")]
pub enum LinkVerdict {
    /// Nothing left after trimming.
    Empty,
    /// Starts with `/` or `#`: an in-app path, anchor or protocol-relative
    /// reference.
    Relative,
    /// Absolute URL with an allow-listed scheme.
    AllowedScheme(String),
    /// Absolute URL with any other scheme.
    RejectedScheme(String),
    /// Not an absolute URL, but contains a colon. Could be a scheme the
    /// parser did not recognise, so it is rejected.
    UnparsedColon,
    /// Not an absolute URL and no colon: a bare relative path.
    BarePath,
}

impl LinkVerdict {
    pub fn is_safe(&self) -> bool {
        matches!(
            self,
            LinkVerdict::Relative | LinkVerdict::AllowedScheme(_) | LinkVerdict::BarePath
        )
    }
}

impl fmt::Display for LinkVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkVerdict::Empty => write!(f, "empty"),
            LinkVerdict::Relative => write!(f, "relative reference"),
            LinkVerdict::AllowedScheme(scheme) => write!(f, "allowed scheme {scheme}:"),
            LinkVerdict::RejectedScheme(scheme) => write!(f, "rejected scheme {scheme}:"),
            LinkVerdict::UnparsedColon => write!(f, "unparseable with colon"),
            LinkVerdict::BarePath => write!(f, "relative path"),
        }
    }
}

/// Classify `candidate`.
///
/// Only the parsed scheme is inspected. `http://host?q=javascript:x` is an
/// `http` link, not a `javascript` one.
pub fn classify(candidate: &str) -> LinkVerdict {
    let trimmed = candidate.trim();

    if trimmed.is_empty() {
        return LinkVerdict::Empty;
    }

    if trimmed.starts_with('/') || trimmed.starts_with('#') {
        return LinkVerdict::Relative;
    }

    match Url::parse(trimmed) {
        Ok(url) => {
            let scheme = url.scheme().to_ascii_lowercase();
            if ALLOWED_SCHEMES.contains(&scheme.as_str()) {
                LinkVerdict::AllowedScheme(scheme)
            } else {
                tracing::debug!(%scheme, "rejected link scheme");
                LinkVerdict::RejectedScheme(scheme)
            }
        }
        Err(_) if trimmed.contains(':') => {
            tracing::debug!("rejected unparseable link containing a colon");
            LinkVerdict::UnparsedColon
        }
        Err(_) => LinkVerdict::BarePath,
    }
}

/// Whether `candidate` may be rendered as a clickable link.
pub fn is_safe_url(candidate: &str) -> bool {
    classify(candidate).is_safe()
}
