//! Blog and SEO-banner schemas

use crate::types::{
    BannerMeta, BlogContent, BlogRecord, EntryList, FieldErrors, FieldPath, LinkEntry,
    SeoBannerRecord, SeoMeta, TextEntry,
};

use super::rules::{is_date, is_url, Checker};

fn check_seo(c: &mut Checker, seo: &SeoMeta) {
    let root = FieldPath::new("seo");
    c.required(root.field("title"), &seo.title, "SEO title");
    c.required(root.field("description"), &seo.description, "SEO description");
    c.required(root.field("keywords"), &seo.keywords, "Keywords");
    c.required_url(root.field("canonicalUrl"), &seo.canonical_url, "Canonical URL");

    let og = root.field("openGraph");
    let open_graph = &seo.open_graph;
    c.required(og.field("title"), &open_graph.title, "OG title");
    c.required(og.field("description"), &open_graph.description, "OG description");
    c.required_url(og.field("url"), &open_graph.url, "OG URL");
    c.required_url(og.field("image"), &open_graph.image, "OG image");
}

fn check_banner(c: &mut Checker, banner: &BannerMeta) {
    let root = FieldPath::new("banner");
    c.required(root.field("title"), &banner.title, "Banner title");
    c.required(root.field("description"), &banner.description, "Banner description");
    c.required_url(root.field("videoUrl"), &banner.video_url, "Banner video URL");
}

/// Non-empty list whose entries each carry non-blank text.
fn check_text_list(
    c: &mut Checker,
    path: &FieldPath,
    entries: &EntryList<TextEntry>,
    entry_label: &str,
    plural_label: &str,
) {
    if entries.is_empty() {
        c.fail(path.clone(), format!("At least one {plural_label} is required"));
        return;
    }
    for (i, entry) in entries.list.iter().enumerate() {
        c.required(path.index(i).field("text"), &entry.text, entry_label);
    }
}

fn check_links(c: &mut Checker, path: &FieldPath, entries: &EntryList<LinkEntry>) {
    if entries.is_empty() {
        c.fail(path.clone(), "At least one link is required");
        return;
    }
    for (i, entry) in entries.list.iter().enumerate() {
        let item = path.index(i);
        c.required(item.field("text"), &entry.text, "Link text");
        let url_path = item.field("url");
        if entry.url.trim().is_empty() {
            c.fail(url_path, "Link URL is required");
        } else if !is_url(&entry.url) {
            c.fail(url_path, "Link URL must be a valid URL");
        }
    }
}

fn check_content(c: &mut Checker, content: &BlogContent) {
    let root = FieldPath::new("content");
    c.required(root.field("title"), &content.title, "Content title");
    if c.required(root.field("date"), &content.date, "Date") && !is_date(&content.date) {
        c.fail(root.field("date"), "Date must be a valid date (YYYY-MM-DD)");
    }

    let cta = root.field("callToAction");
    c.required(cta.field("slug"), &content.call_to_action.slug, "CTA slug");
    c.required(cta.field("text"), &content.call_to_action.text, "CTA text");

    check_text_list(
        c,
        &root.field("description").field("list"),
        &content.description,
        "Paragraph",
        "paragraph",
    );
    check_text_list(
        c,
        &root.field("tags").field("list"),
        &content.tags,
        "Tag",
        "tag",
    );
    check_links(c, &root.field("urls").field("list"), &content.urls);
}

pub fn validate_seo_banner(record: &SeoBannerRecord) -> FieldErrors {
    let mut c = Checker::new();
    check_seo(&mut c, &record.seo);
    check_banner(&mut c, &record.banner);
    c.finish()
}

pub fn validate_blog(record: &BlogRecord) -> FieldErrors {
    let mut c = Checker::new();
    check_seo(&mut c, &record.seo);
    check_banner(&mut c, &record.banner);
    check_content(&mut c, &record.content);
    c.finish()
}
