//! Navigation targets

pub const LOGIN: &str = "/authentication/login";
pub const RESET_PASSWORD: &str = "/authentication/reset-password";
pub const DASHBOARD: &str = "/dashboard";
pub const TERMS: &str = "/terms";
pub const CREATED_BLOGS: &str = "/created-blogs";
pub const CREATED_SEO_BANNERS: &str = "/created-seo-banners";

/// Absolute link on the public site, for email redirects.
pub fn site_link(site_url: Option<&str>, path: &str) -> Option<String> {
    site_url
        .map(|base| base.trim().trim_end_matches('/'))
        .filter(|base| !base.is_empty())
        .map(|base| format!("{base}{path}"))
}
