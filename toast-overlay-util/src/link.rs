use serde::{Deserialize, Serialize};

/// A link a card body exposes to the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardLink {
    /// The URL to open when the link is activated
    pub url: String,
    /// Anchor label, when the link came from markup
    pub title: Option<String>,
    /// Byte offset of the link in the plain-text body; 0 for anchors
    pub start: usize,
    /// Byte length of the link in the plain-text body; 0 for anchors
    pub length: usize,
}

impl CardLink {
    /// Text to show for the link: its label if it has one, otherwise the URL.
    pub fn display_text(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(&self.url)
    }
}
