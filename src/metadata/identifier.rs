//! Titles and slugs.

use unicode_normalization::UnicodeNormalization;

/// Words left lowercase in titles unless they open the title.
pub static SMALL_WORDS: [&str; 17] = [
    "a", "an", "the", "as", "and", "but", "for", "if", "its", "nor", "or", "at", "by", "in",
    "into", "of", "on",
];

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Title-case a name: every word capitalized except [`SMALL_WORDS`], and the
/// first letter always uppercase.
///
/// ```
/// use rs_spellbook::metadata::identifier::title_case;
///
/// assert_eq!(title_case("SPIRIT OF THE WILD"), "Spirit of the Wild");
/// assert_eq!(title_case("a shadow's touch"), "A Shadow's Touch");
/// ```
#[must_use]
pub fn title_case(text: &str) -> String {
    let lower = text.trim().to_lowercase();
    let title = lower
        .split(' ')
        .map(|w| {
            if SMALL_WORDS.contains(&w) {
                w.to_string()
            } else {
                capitalize(w)
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    capitalize(&title)
}

/// Normalize text into a slug: compatibility-decomposed, lowercase, spaces as
/// underscores, ASCII alphanumerics and underscores only.
#[must_use]
pub fn slugify(text: &str) -> String {
    text.nfkd()
        .collect::<String>()
        .to_lowercase()
        .replace(' ', "_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

/// Identifier of an entry: the external slug when one is provided, otherwise
/// the slug of its title.
#[must_use]
pub fn entry_id(title: &str, external: Option<&str>) -> String {
    match external.map(str::trim) {
        Some(slug) if !slug.is_empty() => slug.to_string(),
        _ => slugify(title),
    }
}

/// Directory name of a source book, from its display name.
#[must_use]
pub fn book_slug(source: &str) -> String {
    slugify(source)
}
