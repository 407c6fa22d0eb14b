//! Slug derivation for pages stored without one.
//!
//! Slugs are used as route segments (`/<lang>/<slug>/`), so they keep Unicode
//! letters and digits (Arabic page names produce Arabic slugs) and collapse
//! everything else into single dashes:
//! - `"Our Story"` → `"our-story"`
//! - `"  Pricing & Plans!! "` → `"pricing-plans"`
//! - `"من نحن"` → `"من-نحن"`
//! - `"--"` → `""`

/// Derive a URL-safe slug from a display name.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}
