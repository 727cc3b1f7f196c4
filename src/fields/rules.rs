//! Header field rule set.
//!
//! Every table the extractor and the record assembler consult lives in one
//! immutable [`FieldRules`] value that callers pass in explicitly, so several
//! rule sets (one per game edition, a test fixture) can coexist.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::patterns::{TRAILING_SEPARATOR, WHITESPACE_RUN};

/// Category lists carried by an entry and gated in its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Spell traditions.
    Tradition,
    /// Cleric domains.
    Domain,
    /// Oracle mysteries.
    Mystery,
    /// Sorcerer bloodlines.
    Bloodline,
    /// Witch lessons.
    Lesson,
    /// Witch patron themes.
    Patron,
}

impl Category {
    /// Every category, in record field order.
    pub const ALL: [Category; 6] = [
        Category::Tradition,
        Category::Domain,
        Category::Mystery,
        Category::Bloodline,
        Category::Lesson,
        Category::Patron,
    ];

    /// Slug of the header field carrying this category.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::Tradition => "traditions",
            Self::Domain => "domain",
            Self::Mystery => "mystery",
            Self::Bloodline => "bloodline",
            Self::Lesson => "lesson",
            Self::Patron => "patron",
        }
    }
}

/// Normalize a label into a slug: lowercase, whitespace runs to hyphens.
#[must_use]
pub fn label_slug(label: &str) -> String {
    WHITESPACE_RUN
        .replace_all(label.trim(), "-")
        .to_lowercase()
}

/// Rule tables for header field extraction and category filtering.
#[derive(Debug, Clone)]
pub struct FieldRules {
    /// Source label to canonical label.
    pub renames: HashMap<String, String>,
    /// Canonical labels the extractor acts on; others are left untouched.
    pub known_labels: HashSet<String>,
    /// Labels whose paragraph is removed and scanning continues.
    pub skip_labels: HashSet<String>,
    /// Slugs removed from the text.
    pub hidden: HashSet<String>,
    /// Slugs whose values are lowercased.
    pub lowercase: HashSet<String>,
    /// Slugs whose value is a comma-separated list.
    pub list_valued: HashSet<String>,
    /// Slug to the trait an entry needs for the field to stay visible.
    pub gates: HashMap<String, String>,
    /// Slug to prefixes stripped from each value.
    pub strip_prefixes: HashMap<String, Vec<String>>,
    /// Slug to the values allowed for it; slugs without an entry allow anything.
    pub allow_lists: HashMap<String, BTreeSet<String>>,
    /// Ordered (left, right) slug pairs for the parameter collapser.
    pub collapse_pairs: Vec<(String, String)>,
}

fn owned_set(items: &[&str]) -> HashSet<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn owned_sorted(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

impl Default for FieldRules {
    /// The rule set for the remastered core books.
    fn default() -> Self {
        let renames = [
            ("Tradition", "Traditions"),
            ("Domains", "Domain"),
            ("Mysteries", "Mystery"),
            ("Bloodlines", "Bloodline"),
            ("Lessons", "Lesson"),
            ("Patron Theme", "Patron"),
            ("Patron Themes", "Patron"),
            ("Target", "Targets"),
            ("Saving Throw", "Defense"),
            ("Deities", "Deity"),
        ]
        .into_iter()
        .map(|(from, to)| (from.to_string(), to.to_string()))
        .collect();

        let gates = [
            ("domain", "cleric"),
            ("mystery", "oracle"),
            ("bloodline", "sorcerer"),
            ("lesson", "witch"),
            ("patron", "witch"),
        ]
        .into_iter()
        .map(|(slug, t)| (slug.to_string(), t.to_string()))
        .collect();

        let mut strip_prefixes = HashMap::new();
        strip_prefixes.insert(
            "lesson".to_string(),
            vec!["lesson of the ".to_string(), "lesson of ".to_string()],
        );

        let mut allow_lists = HashMap::new();
        allow_lists.insert(
            "traditions".to_string(),
            owned_sorted(&["arcane", "divine", "occult", "primal"]),
        );
        allow_lists.insert(
            "domain".to_string(),
            owned_sorted(&[
                "air", "ambition", "cities", "cold", "confidence", "creation", "darkness",
                "death", "decay", "destruction", "dreams", "dust", "duty", "earth", "family",
                "fate", "fire", "freedom", "glyph", "healing", "indulgence", "introspection",
                "knowledge", "lightning", "luck", "magic", "might", "moon", "nature",
                "nightmares", "pain", "passion", "perfection", "plague", "protection",
                "repose", "secrecy", "sorrow", "soul", "star", "sun", "swarm", "time", "toil",
                "travel", "trickery", "truth", "tyranny", "undeath", "vigil", "void", "water",
                "wealth", "wyrmkin", "zeal",
            ]),
        );
        allow_lists.insert(
            "mystery".to_string(),
            owned_sorted(&[
                "ancestors", "ash", "battle", "blizzard", "bones", "cosmos", "flames", "life",
                "lore", "tempest", "time",
            ]),
        );
        allow_lists.insert(
            "bloodline".to_string(),
            owned_sorted(&[
                "aberrant", "angelic", "demonic", "diabolic", "draconic", "elemental", "fey",
                "genie", "hag", "harrow", "imperial", "nymph", "phoenix", "psychopomp",
                "shadow", "undead", "wyrmblessed",
            ]),
        );
        allow_lists.insert(
            "lesson".to_string(),
            owned_sorted(&[
                "death", "dreams", "elements", "life", "mischief", "protection", "renewal",
                "shadow", "snow", "vengeance",
            ]),
        );
        allow_lists.insert(
            "patron".to_string(),
            owned_sorted(&[
                "Faith's Flamekeeper",
                "Silence in Snow",
                "Spinner of Threads",
                "Starless Shadow",
                "The Inscribed One",
                "The Resentment",
                "Wilding Steward",
            ]),
        );

        Self {
            renames,
            known_labels: owned_set(&[
                "Traditions", "Domain", "Mystery", "Bloodline", "Patron", "Lesson", "Trigger",
                "Requirements", "Cast", "Range", "Area", "Duration", "Targets", "Defense",
                "Deity", "Source", "Spell Lists",
            ]),
            skip_labels: owned_set(&["PFS Note"]),
            hidden: owned_set(&["deity", "source", "spell-lists"]),
            lowercase: owned_set(&["traditions", "domain", "mystery", "bloodline", "lesson"]),
            list_valued: owned_set(&[
                "traditions", "domain", "mystery", "bloodline", "lesson", "patron",
            ]),
            gates,
            strip_prefixes,
            allow_lists,
            collapse_pairs: [
                ("range", "targets"),
                ("range", "area"),
                ("area", "targets"),
                ("defense", "duration"),
            ]
            .into_iter()
            .map(|(l, r)| (l.to_string(), r.to_string()))
            .collect(),
        }
    }
}

impl FieldRules {
    /// Canonical form of a source label.
    #[must_use]
    pub fn canonical_label<'a>(&'a self, label: &'a str) -> &'a str {
        self.renames.get(label).map_or(label, String::as_str)
    }

    /// Whether the extractor acts on this canonical label.
    #[must_use]
    pub fn is_known(&self, label: &str) -> bool {
        self.known_labels.contains(label)
    }

    /// Trait required for a slug to stay visible.
    #[must_use]
    pub fn gate(&self, slug: &str) -> Option<&str> {
        self.gates.get(slug).map(String::as_str)
    }

    /// Whether a field passes its gate for the given (lowercase) traits.
    #[must_use]
    pub fn passes_gate(&self, slug: &str, traits: &[String]) -> bool {
        self.gate(slug)
            .is_none_or(|required| traits.iter().any(|t| t.eq_ignore_ascii_case(required)))
    }

    /// Normalize a list of category values for a slug.
    ///
    /// Values are trimmed, lowercased and prefix-stripped per the slug's
    /// rules, then filtered to the allow-list. The result is sorted and free
    /// of duplicates.
    pub fn normalize_values<'v, I>(&self, slug: &str, values: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'v str>,
    {
        let lowercase = self.lowercase.contains(slug);
        let prefixes = self.strip_prefixes.get(slug);
        let allowed = self.allow_lists.get(slug);

        let mut out = BTreeSet::new();
        for value in values {
            let mut value = value.trim().to_string();
            if lowercase {
                value = value.to_lowercase();
            }
            if let Some(prefixes) = prefixes {
                for prefix in prefixes {
                    if let Some(rest) = value.strip_prefix(prefix.as_str()) {
                        value = rest.to_string();
                        break;
                    }
                }
            }
            if value.is_empty() {
                continue;
            }
            if allowed.is_some_and(|set| !set.contains(&value)) {
                continue;
            }
            out.insert(value);
        }
        out.into_iter().collect()
    }

    /// Transform the raw text following a label.
    ///
    /// Returns `None` when a list-valued field has nothing left after
    /// filtering. `at_block_end` tells whether the value text closes its
    /// paragraph; only then is trailing separator punctuation stripped.
    #[must_use]
    pub fn transform_value(&self, slug: &str, raw: &str, at_block_end: bool) -> Option<String> {
        let value = if at_block_end {
            TRAILING_SEPARATOR.replace(raw, "").into_owned()
        } else {
            raw.to_string()
        };

        if self.list_valued.contains(slug) {
            let values = self.normalize_values(slug, value.split(','));
            if values.is_empty() {
                return None;
            }
            return Some(format!(" {}", values.join(", ")));
        }

        if self.lowercase.contains(slug) {
            return Some(value.to_lowercase());
        }
        Some(value)
    }
}
