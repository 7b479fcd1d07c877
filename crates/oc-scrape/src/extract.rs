//! Tolerant extraction of tag rows from library tags-page HTML
//
// Extraction is regex-driven and local: find the tag anchors, then scan
// only the slice between one anchor and the next for that row's digest and
// file size. Attribute order, whitespace, and harmless markup noise must
// not break it.

use oc_types::RawTag;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static ANCHOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<a\s[^>]*href="[^"]*/library/[^"]*"[^>]*>(.*?)</a>"#).unwrap()
});
static MARKUP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").unwrap());
static DIGEST_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[0-9a-f]{12}\b").unwrap());
static FILE_SIZE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\d.]+ ?[KMGT]B").unwrap());

/// Extract tag rows from a tags page
///
/// Returns one `RawTag` per tag anchor, in page order. Rows missing a file
/// size or digest are kept with empty/absent values; whether a tag is
/// usable is the normalizer's call, not ours.
pub fn extract_tags(html: &str) -> Vec<RawTag> {
    let anchors: Vec<(String, usize, usize)> = ANCHOR_RE
        .captures_iter(html)
        .filter_map(|cap| {
            let whole = cap.get(0)?;
            let text = strip_markup(cap.get(1)?.as_str());
            // Tag names never contain spaces; anchors whose text does are
            // page furniture (titles, navigation), not tag rows.
            if text.is_empty() || text.contains(char::is_whitespace) {
                return None;
            }
            Some((text, whole.start(), whole.end()))
        })
        .collect();

    let mut tags = Vec::with_capacity(anchors.len());
    for (i, (name, _, end)) in anchors.iter().enumerate() {
        let window_end = anchors
            .get(i + 1)
            .map(|(_, start, _)| *start)
            .unwrap_or(html.len());
        let window = strip_markup(&html[*end..window_end]);

        let digest = DIGEST_RE.find(&window).map(|m| m.as_str().to_string());
        let file_size = FILE_SIZE_RE
            .find(&window)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        if file_size.is_empty() {
            debug!("No file size found for tag {:?}", name);
        }

        let mut tag = RawTag::new(name.clone(), file_size);
        tag.digest = digest;
        tags.push(tag);
    }

    tags
}

/// Strip markup and collapse the remaining text to single-spaced words
fn strip_markup(fragment: &str) -> String {
    let text = MARKUP_RE.replace_all(fragment, " ");
    let text = text.replace("&nbsp;", " ").replace("&amp;", "&");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"
<html><body>
  <h1><a href="/library/deepseek-r1">DeepSeek R1</a></h1>
  <div class="flex px-4 py-3">
    <a class="group"
       href="/library/deepseek-r1:1.5b">
      <span>1.5b</span>
    </a>
    <div class="flex items-baseline space-x-1 text-[13px] text-neutral-500">
      <span>a42622e5f1ea</span> &nbsp;&middot;&nbsp; <span>1.1GB</span>
    </div>
  </div>
  <div class="flex px-4 py-3">
    <a href="/library/deepseek-r1:7b" class="group">7b</a>
    <div>
      <span>0a8c26691023</span> &nbsp;&middot;&nbsp; <span>4.7 GB</span>
    </div>
  </div>
</body></html>
"#;

    #[test]
    fn test_extracts_rows_in_page_order() {
        let tags = extract_tags(FIXTURE);
        assert_eq!(tags.len(), 2);

        assert_eq!(tags[0].name, "1.5b");
        assert_eq!(tags[0].digest.as_deref(), Some("a42622e5f1ea"));
        assert_eq!(tags[0].file_size, "1.1GB");

        assert_eq!(tags[1].name, "7b");
        assert_eq!(tags[1].digest.as_deref(), Some("0a8c26691023"));
        assert_eq!(tags[1].file_size, "4.7 GB");
    }

    #[test]
    fn test_title_anchor_is_not_a_tag_row() {
        let tags = extract_tags(FIXTURE);
        assert!(tags.iter().all(|t| t.name != "DeepSeek R1"));
    }

    #[test]
    fn test_missing_size_and_digest_kept_empty() {
        let html = r#"<a href="/library/qwen2.5:72b-instruct-q4_K_M">72b-instruct-q4_K_M</a>
                      <div>Updated 4 months ago</div>"#;
        let tags = extract_tags(html);
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].name, "72b-instruct-q4_K_M");
        assert_eq!(tags[0].digest, None);
        assert_eq!(tags[0].file_size, "");
    }

    #[test]
    fn test_size_does_not_leak_into_previous_row() {
        // The first row has no size; the second row's size must not be
        // attributed to it.
        let html = r#"
<a href="/library/llama3:8b">8b</a>
<a href="/library/llama3:70b">70b</a>
<div><span>dd5b9dc4f3a0</span> <span>40GB</span></div>
"#;
        let tags = extract_tags(html);
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].file_size, "");
        assert_eq!(tags[1].file_size, "40GB");
    }

    #[test]
    fn test_unrelated_anchors_ignored() {
        let html = r#"<a href="/blog/announcement">Read more</a>
                      <a href="/library/llama3:8b">8b</a> <span>4.7GB</span>"#;
        let tags = extract_tags(html);
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].name, "8b");
    }

    #[test]
    fn test_empty_page() {
        assert!(extract_tags("").is_empty());
        assert!(extract_tags("<html><body>nothing here</body></html>").is_empty());
    }

    #[test]
    fn test_strip_markup_collapses_noise() {
        assert_eq!(
            strip_markup("<span>a</span>\n   <b>b</b>&nbsp;c"),
            "a b c"
        );
    }
}
