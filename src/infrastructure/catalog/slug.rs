//! Product slug derivation

/// Derive a URL-friendly slug from a display name
///
/// Lowercases ASCII alphanumerics and collapses every other run of
/// characters into a single hyphen; leading and trailing hyphens are
/// dropped.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Random suffix appended to a slug when the base form collides
pub fn collision_suffix() -> String {
    let hex = uuid::Uuid::new_v4().simple().to_string();
    hex[..6].to_string()
}
