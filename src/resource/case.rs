//! Resource type name conversion between wire and memory forms.
//!
//! The wire uses dash-case (`blog-posts`), the store keys use camel case
//! (`blogPosts`).

/// Convert a dash, underscore or space separated name to camel case.
///
/// The first character is always lowercased, so `BlogPosts` and
/// `blog_posts` both become `blogPosts`.
pub fn camelize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;

    for ch in name.chars() {
        if matches!(ch, '-' | '_' | ' ') {
            upper_next = !out.is_empty();
            continue;
        }

        if out.is_empty() {
            out.extend(ch.to_lowercase());
        } else if upper_next {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        upper_next = false;
    }

    out
}

/// Convert a camel case name to dash case.
///
/// Underscores are treated as separators too. Already dashed names pass
/// through unchanged.
pub fn dasherize(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);

    for ch in name.chars() {
        if ch == '_' || ch == ' ' {
            out.push('-');
        } else if ch.is_uppercase() {
            if !out.is_empty() && !out.ends_with('-') {
                out.push('-');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }

    out
}
