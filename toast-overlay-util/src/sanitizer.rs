use ammonia::Builder;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static RICH_TAG: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"<\s*/?(?:b|i|u|a|p|br)(?:\s+[^>]*)?>").unwrap());

static ANY_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());

static ANCHOR: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r#"(?is)<a\s[^>]*?href\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>]+))[^>]*>(.*?)</a\s*>"#)
    .unwrap()
});

/// Sanitize card markup for plain-text previews.
///
/// Keeps b, i, u, a, br and p; `href` is the only attribute kept and only on
/// anchors with http, https or mailto targets. Everything else (scripts,
/// styles, frames, media, event handlers) is dropped.
///
/// Card text itself is handed to the presentation layer untouched; this is
/// only used where the core wants a readable rendition, e.g. log lines.
pub fn sanitize_html(html: &str) -> String {
  let tags: HashSet<&str> = ["b", "i", "u", "a", "br", "p"].into_iter().collect();
  let schemes: HashSet<&str> = ["http", "https", "mailto"].into_iter().collect();
  let anchor_attrs: HashSet<&str> = std::iter::once("href").collect();

  Builder::default()
    .tags(tags)
    .link_rel(Some("noopener noreferrer"))
    .url_schemes(schemes)
    .generic_attributes(HashSet::new())
    .tag_attributes(std::iter::once(("a", anchor_attrs)).collect())
    .clean(html)
    .to_string()
}

/// True when the text contains markup the presentation layer would render
/// (`<b>`, `<a href=..>`, ...). Escaped entities and bare comparison
/// operators do not count.
pub fn has_rich_content(text: &str) -> bool {
  RICH_TAG.is_match(text)
}

/// Strip all tags and decode the common entities.
pub fn strip_html(html: &str) -> String {
  decode_entities(&ANY_TAG.replace_all(html, ""))
}

/// Pull `(url, label)` pairs out of `<a href="...">label</a>` anchors.
///
/// The label is returned as plain text.
pub fn extract_hrefs(html: &str) -> Vec<(String, String)> {
  ANCHOR
    .captures_iter(html)
    .filter_map(|caps| {
      let url = caps
        .get(1)
        .or_else(|| caps.get(2))
        .or_else(|| caps.get(3))?
        .as_str()
        .trim();
      if url.is_empty() {
        return None;
      }
      let label = caps.get(4).map(|m| strip_html(m.as_str())).unwrap_or_default();
      Some((decode_entities(url), label))
    })
    .collect()
}

fn decode_entities(text: &str) -> String {
  text
    .replace("&lt;", "<")
    .replace("&gt;", ">")
    .replace("&quot;", "\"")
    .replace("&#39;", "'")
    .replace("&#x27;", "'")
    .replace("&#x2F;", "/")
    .replace("&#47;", "/")
    .replace("&nbsp;", " ")
    .replace("&amp;", "&") // last, so "&amp;lt;" stays "&lt;"
}
