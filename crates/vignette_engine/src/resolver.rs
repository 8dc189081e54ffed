//! Expansion of character and location names inside scene prompts.

use regex::{Regex, RegexBuilder};
use tracing::warn;
use vignette_core::{Character, Location};

/// Expand every character and location name in `text` into its full
/// description and append the emotional tone suffix.
///
/// Locations are substituted before characters. Inserted descriptions are
/// never scanned again, so a description that happens to contain another
/// entity's name stays as written. Matching is case-insensitive and whole
/// word; when two names overlap the longer one wins.
///
/// # Examples
///
/// ```
/// use vignette_core::{Character, Location};
/// use vignette_engine::resolve;
///
/// let mira = Character::builder()
///     .id(1)
///     .name("Mira")
///     .age("34")
///     .hair("silver")
///     .skin("olive")
///     .clothing("a yellow raincoat")
///     .build()
///     .unwrap();
/// let pier = Location::builder()
///     .id(1)
///     .name("Old Pier")
///     .description("a weathered wooden pier")
///     .build()
///     .unwrap();
///
/// let resolved = resolve(
///     "Mira waits at the old pier",
///     &[mira],
///     &[pier],
///     &["hopeful".to_string()],
/// );
/// assert_eq!(
///     resolved,
///     "Mira, 34 years old, with silver hair, olive skin, wearing a yellow raincoat \
///      waits at the a weathered wooden pier. \
///      The image should reflect the emotional tones: hopeful"
/// );
/// ```
pub fn resolve(
    text: &str,
    characters: &[Character],
    locations: &[Location],
    tones: &[String],
) -> String {
    let mut segments = vec![Segment::plain(text)];

    let places: Vec<(&str, String)> = locations
        .iter()
        .map(|l| (l.name.as_str(), l.description.clone()))
        .collect();
    segments = NamePattern::build(places).substitute(segments);

    let cast: Vec<(&str, String)> = characters
        .iter()
        .map(|c| (c.name.as_str(), c.describe()))
        .collect();
    segments = NamePattern::build(cast).substitute(segments);

    let mut resolved: String = segments.into_iter().map(|s| s.text).collect();
    if !tones.is_empty() {
        resolved.push_str(". The image should reflect the emotional tones: ");
        resolved.push_str(&tones.join(", "));
    }
    resolved
}

/// Piece of the prompt, either original text or an inserted description.
#[derive(Debug)]
struct Segment {
    text: String,
    resolved: bool,
}

impl Segment {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            resolved: false,
        }
    }

    fn replacement(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            resolved: true,
        }
    }
}

/// One alternation over every name of a category, longest name first.
///
/// Capture group `i + 1` corresponds to `replacements[i]`.
struct NamePattern {
    regex: Option<Regex>,
    replacements: Vec<String>,
}

impl NamePattern {
    fn build(entries: Vec<(&str, String)>) -> Self {
        let mut entries: Vec<(&str, String)> = entries
            .into_iter()
            .map(|(name, replacement)| (name.trim(), replacement))
            .filter(|(name, _)| !name.is_empty())
            .collect();
        // Stable: equal lengths keep story order.
        entries.sort_by_key(|(name, _)| std::cmp::Reverse(name.chars().count()));

        if entries.is_empty() {
            return Self {
                regex: None,
                replacements: Vec::new(),
            };
        }

        let alternation = entries
            .iter()
            .map(|(name, _)| format!("({})", bounded(name)))
            .collect::<Vec<_>>()
            .join("|");

        let regex = match RegexBuilder::new(&alternation)
            .case_insensitive(true)
            .build()
        {
            Ok(regex) => Some(regex),
            Err(e) => {
                warn!(error = %e, "Could not compile name pattern, leaving names verbatim");
                None
            }
        };

        Self {
            regex,
            replacements: entries.into_iter().map(|(_, r)| r).collect(),
        }
    }

    /// Replace every match inside unresolved segments.
    fn substitute(&self, segments: Vec<Segment>) -> Vec<Segment> {
        let Some(regex) = &self.regex else {
            return segments;
        };

        let mut out = Vec::with_capacity(segments.len());
        for segment in segments {
            if segment.resolved {
                out.push(segment);
                continue;
            }

            let text = segment.text.as_str();
            let mut last = 0;
            for caps in regex.captures_iter(text) {
                let Some(whole) = caps.get(0) else {
                    continue;
                };
                let Some(index) = (1..caps.len()).find(|&i| caps.get(i).is_some()) else {
                    continue;
                };
                if whole.start() > last {
                    out.push(Segment::plain(&text[last..whole.start()]));
                }
                out.push(Segment::replacement(self.replacements[index - 1].as_str()));
                last = whole.end();
            }
            if last < text.len() {
                out.push(Segment::plain(&text[last..]));
            }
        }
        out
    }
}

/// Escaped name with `\b` on each side that starts or ends with a word character.
fn bounded(name: &str) -> String {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let leading = name.chars().next().is_some_and(is_word);
    let trailing = name.chars().last().is_some_and(is_word);

    format!(
        "{}{}{}",
        if leading { r"\b" } else { "" },
        regex::escape(name),
        if trailing { r"\b" } else { "" }
    )
}
