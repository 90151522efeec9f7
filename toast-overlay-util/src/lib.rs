pub mod link;
pub mod link_detector;
pub mod placement;
pub mod sanitizer;

pub use link::CardLink;
pub use link_detector::{LinkError, detect_links, extract_links, is_safe_url, open_link};
pub use placement::{Placement, Rect, Sizing};
pub use sanitizer::{extract_hrefs, has_rich_content, sanitize_html, strip_html};

use std::fmt;

/// Opaque handle identifying one card for as long as it is live.
///
/// Cards with identical text are still distinct cards, so everything that
/// refers back to a card (dismiss requests, overlay calls) goes through this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CardId(pub u32);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One transient message on screen with its countdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: CardId,
    text: String,
    elapsed: u32,
    lifetime: u32,
}

impl Card {
    /// A fresh card. A zero lifetime is raised to one second.
    pub fn new(id: CardId, text: impl Into<String>, lifetime_secs: u32) -> Self {
        Self {
            id,
            text: text.into(),
            elapsed: 0,
            lifetime: lifetime_secs.max(1),
        }
    }

    /// Message body; may carry markup, which is passed through unchanged.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Seconds since admission.
    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn lifetime(&self) -> u32 {
        self.lifetime
    }

    /// Advance the countdown by one second.
    pub fn age(&mut self) {
        self.elapsed = self.elapsed.saturating_add(1);
    }

    pub fn is_due(&self) -> bool {
        self.elapsed >= self.lifetime
    }

    /// Seconds left before the card expires.
    pub fn remaining(&self) -> u32 {
        self.lifetime.saturating_sub(self.elapsed)
    }

    /// Short countdown label for card headers, e.g. "5m" or "42s".
    pub fn remaining_label(&self) -> String {
        let secs = self.remaining();
        if secs >= 3600 {
            format!("{}h", secs / 3600)
        } else if secs >= 60 {
            format!("{}m", secs / 60)
        } else {
            format!("{}s", secs)
        }
    }

    pub fn is_rich(&self) -> bool {
        has_rich_content(&self.text)
    }

    pub fn links(&self) -> Vec<CardLink> {
        extract_links(&self.text)
    }
}

/// Why a card left the overlay.
///
/// Codes follow the freedesktop notification close reasons, with eviction
/// reported as "undefined".
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CloseReason {
    Expired = 1,
    Dismissed = 2,
    Evicted = 4,
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CloseReason::Expired => "expired",
            CloseReason::Dismissed => "dismissed",
            CloseReason::Evicted => "evicted",
        })
    }
}

/// Normalize an incoming message: drop a single trailing CRLF or LF.
///
/// Returns `None` when nothing is left to show.
pub fn normalize_message(text: &str) -> Option<String> {
    let trimmed = text
        .strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .unwrap_or(text);

    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
