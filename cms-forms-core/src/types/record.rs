//! Record shapes for blogs and SEO banners.
//!
//! These types are both the server representation and the form state of the
//! record screens. Wire names are camelCase; unknown server columns are dropped.

use serde::{Deserialize, Serialize};

/// Default `metaRobots` value.
pub const DEFAULT_META_ROBOTS: &str = "index, follow";
/// Default Open Graph type.
pub const DEFAULT_OG_TYPE: &str = "website";

/// Open Graph block embedded in the SEO metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    pub url: String,
    pub image: String,
    #[serde(rename = "type")]
    pub og_type: String,
}

impl Default for OpenGraph {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            url: String::new(),
            image: String::new(),
            og_type: DEFAULT_OG_TYPE.to_string(),
        }
    }
}

/// SEO metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeoMeta {
    pub title: String,
    pub description: String,
    /// Comma-separated keywords.
    pub keywords: String,
    pub canonical_url: String,
    pub meta_robots: String,
    pub open_graph: OpenGraph,
}

impl Default for SeoMeta {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            keywords: String::new(),
            canonical_url: String::new(),
            meta_robots: DEFAULT_META_ROBOTS.to_string(),
            open_graph: OpenGraph::default(),
        }
    }
}

impl SeoMeta {
    /// Replace blank defaulted values with their documented defaults.
    pub fn fill_defaults(&mut self) {
        if self.meta_robots.trim().is_empty() {
            self.meta_robots = DEFAULT_META_ROBOTS.to_string();
        }
        if self.open_graph.og_type.trim().is_empty() {
            self.open_graph.og_type = DEFAULT_OG_TYPE.to_string();
        }
    }
}

/// Banner metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BannerMeta {
    pub title: String,
    pub description: String,
    pub video_url: String,
}

/// Text list entry (paragraph, tag).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextEntry {
    pub text: String,
}

impl TextEntry {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Link list entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkEntry {
    pub text: String,
    pub url: String,
}

impl LinkEntry {
    pub fn new(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: url.into(),
        }
    }
}

/// Ordered repeatable list, serialised as `{ "list": [...] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryList<T> {
    pub list: Vec<T>,
}

impl<T> Default for EntryList<T> {
    fn default() -> Self {
        Self { list: Vec::new() }
    }
}

impl<T: Default> EntryList<T> {
    /// A list holding one blank entry (initial form state).
    #[must_use]
    pub fn single_blank() -> Self {
        Self {
            list: vec![T::default()],
        }
    }

    /// Append a blank entry at the end.
    pub fn append(&mut self) {
        self.list.push(T::default());
    }

    /// Give an empty list one blank entry so the UI has a row to edit.
    pub fn ensure_entry(&mut self) {
        if self.list.is_empty() {
            self.append();
        }
    }
}

impl<T> EntryList<T> {
    pub fn from_entries(list: Vec<T>) -> Self {
        Self { list }
    }

    /// Whether the remove control is enabled (more than one entry).
    #[must_use]
    pub fn can_remove(&self) -> bool {
        self.list.len() > 1
    }

    /// Remove the entry at `index`. Refused when only one entry remains or the index is out of range.
    pub fn remove(&mut self, index: usize) -> bool {
        if !self.can_remove() || index >= self.list.len() {
            return false;
        }
        self.list.remove(index);
        true
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

/// Call-to-action link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CallToAction {
    pub slug: String,
    pub text: String,
}

/// Blog body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlogContent {
    pub title: String,
    /// Publication date, `YYYY-MM-DD`.
    pub date: String,
    pub call_to_action: CallToAction,
    pub description: EntryList<TextEntry>,
    pub tags: EntryList<TextEntry>,
    pub urls: EntryList<LinkEntry>,
}

impl Default for BlogContent {
    fn default() -> Self {
        Self {
            title: String::new(),
            date: String::new(),
            call_to_action: CallToAction::default(),
            description: EntryList::single_blank(),
            tags: EntryList::single_blank(),
            urls: EntryList::single_blank(),
        }
    }
}

/// SEO banner record (`seo_banners`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeoBannerRecord {
    pub seo: SeoMeta,
    pub banner: BannerMeta,
}

/// Blog record (`blogs`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogRecord {
    pub seo: SeoMeta,
    pub banner: BannerMeta,
    pub content: BlogContent,
}
