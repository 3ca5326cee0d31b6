//! Rendering contract for the challenge page.
//!
//! Producing the actual markup is an external collaborator concern; the
//! flow only asks for "the challenge page, with this notice on it".

/// Kind of notice shown on the challenge page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Informational (code resent, expired-and-reissued)
    Info,
    /// Blaming (wrong code, delivery trouble)
    Error,
}

/// A message rendered alongside the code input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

/// Renders the challenge page.
///
/// Implementations must be idempotent and side-effect-free; the flow may
/// render the same state any number of times.
pub trait ChallengeRenderer: Send + Sync {
    /// Render the code-entry challenge, with an optional notice
    fn render_challenge(&self, notice: Option<&Notice>) -> String;
}

/// Minimal text renderer for development and tests.
///
/// Real deployments template an HTML login page; the flow does not care.
pub struct PlainTextRenderer;

impl ChallengeRenderer for PlainTextRenderer {
    fn render_challenge(&self, notice: Option<&Notice>) -> String {
        let mut page = String::from("Enter the code sent to your email address.");
        if let Some(notice) = notice {
            let tag = match notice.kind {
                NoticeKind::Info => "info",
                NoticeKind::Error => "error",
            };
            page.push_str(&format!(" [{}: {}]", tag, notice.text));
        }
        page
    }
}
