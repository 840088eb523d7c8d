/// Placeholder used when a title has no alphanumeric characters at all.
pub const FALLBACK_SLUG: &str = "character";

/// Turn a display title into a lowercase, hyphen-separated identifier safe for
/// file names and URL paths.
///
/// Every run of characters outside `[a-z0-9]` (after lowercasing) collapses to
/// a single `-`; leading and trailing hyphens are dropped.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for ch in title.trim().chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch);
        } else {
            pending_hyphen = true;
        }
    }

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}
