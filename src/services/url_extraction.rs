use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::domain::ContentBlock;

static URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"https?://[^\s"'<>\]\\]+"#).expect("URL_REGEX is a valid regex pattern")
});

const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', ')'];

/// URLs the search tool actually retrieved during one model turn.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchedUrlSet(HashSet<String>);

impl SearchedUrlSet {
    pub fn contains(&self, url: &str) -> bool {
        self.0.contains(url)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for SearchedUrlSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        SearchedUrlSet(iter.into_iter().map(Into::into).collect())
    }
}

/// Collects URLs from every non-text block. Text blocks are the model's own
/// prose and never count as evidence of retrieval.
pub fn extract_searched_urls(content: &[ContentBlock]) -> SearchedUrlSet {
    content
        .iter()
        .filter(|block| !block.is_text())
        .flat_map(|block| {
            let raw = block.searchable_text();
            URL_REGEX
                .find_iter(&raw)
                .map(|m| strip_trailing_punctuation(m.as_str()).to_string())
                .collect::<Vec<_>>()
        })
        .filter(|url| !url.is_empty())
        .collect()
}

fn strip_trailing_punctuation(url: &str) -> &str {
    url.trim_end_matches(TRAILING_PUNCTUATION)
}
