use linkify::{LinkFinder, LinkKind};
use url::Url;

use crate::{CardLink, extract_hrefs};

#[derive(Debug, thiserror::Error)]
pub enum LinkError {
  #[error("refusing to open {0:?}: unsafe URL scheme")]
  UnsafeScheme(String),
  #[error("failed to open {url:?}: {source}")]
  Open {
    url: String,
    #[source]
    source: std::io::Error,
  },
}

/// Detect URLs and emails in plain text
pub fn detect_links(text: &str) -> Vec<CardLink> {
  let finder = LinkFinder::new();

  finder
    .links(text)
    .filter_map(|link| {
      let url = match link.kind() {
        LinkKind::Url => link.as_str().to_string(),
        LinkKind::Email => format!("mailto:{}", link.as_str()),
        _ => return None,
      };

      if !is_safe_url(&url) {
        return None;
      }

      Some(CardLink {
        url,
        title: None,
        start: link.start(),
        length: link.end() - link.start(),
      })
    })
    .collect()
}

/// Links of a card body: its anchors if it has any, otherwise bare URLs and
/// emails found in the text.
pub fn extract_links(text: &str) -> Vec<CardLink> {
  let anchors: Vec<CardLink> = extract_hrefs(text)
    .into_iter()
    .filter(|(url, _)| is_safe_url(url))
    .map(|(url, label)| CardLink {
      url,
      title: Some(label),
      start: 0,
      length: 0,
    })
    .collect();

  if anchors.is_empty() {
    detect_links(text)
  } else {
    anchors
  }
}

/// Check if URL is safe to open (http, https, mailto only)
pub fn is_safe_url(url: &str) -> bool {
  Url::parse(url.trim())
    .map(|u| matches!(u.scheme(), "http" | "https" | "mailto"))
    .unwrap_or(false)
}

/// Open a URL in the default browser/handler
///
/// Meant for overlay backends, called when the user activates one of a card's
/// `CardLink`s. Unsafe schemes are refused before anything is spawned.
pub fn open_link(url: &str) -> Result<(), LinkError> {
  if !is_safe_url(url) {
    tracing::warn!("Refusing to open link with unsafe scheme: {}", url);
    return Err(LinkError::UnsafeScheme(url.to_string()));
  }
  tracing::debug!("Opening link: {}", url);
  open::that(url.trim()).map_err(|source| LinkError::Open {
    url: url.to_string(),
    source,
  })
}
