//! Parsing of the `Link` response header GitHub uses for pagination.
//!
//! A header looks like:
//! ```text
//! <https://api.github.com/repositories/1/pulls?page=2>; rel="next", <https://api.github.com/repositories/1/pulls?page=34>; rel="last"
//! ```

const REL_NEXT: &str = r#"rel="next""#;
const REL_LAST: &str = r#"rel="last""#;

/// Whether the header advertises another page.
#[must_use]
pub fn has_next_page(header: &str) -> bool {
    header.contains(REL_NEXT)
}

/// The `page` query parameter of the `rel="last"` entry.
///
/// Returns `None` when there is no such entry, the URL cannot be parsed, or
/// `page` is missing or not a number.
#[must_use]
pub fn parse_last_page(header: &str) -> Option<u64> {
    let target = header
        .split(',')
        .map(str::trim)
        .filter(|entry| entry.contains(REL_LAST))
        .find_map(link_target)?;

    let url = reqwest::Url::parse(target).ok()?;
    let (_, page) = url.query_pairs().find(|(key, _)| key == "page")?;
    page.parse().ok()
}

fn link_target(entry: &str) -> Option<&str> {
    let start = entry.find('<')? + 1;
    let len = entry[start..].find('>')?;
    Some(&entry[start..start + len])
}
