// Alias rewriter - substitutes trigger words in free-form text with random aliases
// Uses case-insensitive, word-boundary matching with regex, then repairs sentence
// capitalization and terminal punctuation after every substitution.

use rand::seq::SliceRandom;
use rand::Rng;
use regex::{NoExpand, Regex};
use std::sync::LazyLock;

use super::AliasMapping;

/// Sentence separator: a period and any whitespace after it
static SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.\s*").expect("sentence pattern is valid"));

/// Any word character
static WORD_CHAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w").expect("word pattern is valid"));

/// Compiled patterns for a single trigger word
struct CompiledWord {
    /// `\bword(s)?\b` - decides whether the word appears at all
    detect: Regex,
    /// `\bword` - the span that gets replaced, leaving any plural "s" in place
    replace: Regex,
    aliases: Vec<String>,
}

/// Rewriter that applies alias substitution to text
pub struct AliasRewriter {
    words: Vec<CompiledWord>,
}

impl AliasRewriter {
    /// Create a rewriter from an alias mapping.
    /// Pre-compiles both patterns for each word; words with no aliases are skipped.
    pub fn new(mapping: &AliasMapping) -> Self {
        let words = mapping
            .iter()
            .filter(|(_, aliases)| !aliases.is_empty())
            .filter_map(|(word, aliases)| {
                let escaped = regex::escape(word);
                let detect = Regex::new(&format!(r"(?i)\b{}s?\b", escaped));
                let replace = Regex::new(&format!(r"(?i)\b{}", escaped));
                match (detect, replace) {
                    (Ok(detect), Ok(replace)) => Some(CompiledWord {
                        detect,
                        replace,
                        aliases: aliases.to_vec(),
                    }),
                    (Err(e), _) | (_, Err(e)) => {
                        crate::warn!("Failed to compile regex for word '{}': {}", word, e);
                        None
                    }
                }
            })
            .collect();

        Self { words }
    }

    /// Rewrite the text, one word at a time in mapping order.
    ///
    /// A word that does not occur leaves the text untouched for its step, so an
    /// input that matches nothing comes back byte-for-byte.
    pub fn rewrite<R: Rng + ?Sized>(&self, text: &str, rng: &mut R) -> String {
        let mut current = text.to_string();

        for word in &self.words {
            if !word.detect.is_match(&current) {
                continue;
            }
            let Some(choice) = word.aliases.choose(rng) else {
                continue;
            };
            let substituted = word.replace.replace_all(&current, NoExpand(choice.as_str()));
            current = normalize_sentences(&substituted);
        }

        current
    }
}

/// Re-segment text into sentences and repair it.
///
/// Fragments starting with a lowercase letter get their first character
/// uppercased, fragments with no word characters are dropped, and the survivors
/// are joined with ". ". A trailing comma is removed and a final period ensured.
pub fn normalize_sentences(text: &str) -> String {
    let sentences: Vec<String> = SENTENCE_BREAK
        .split(text)
        .filter(|fragment| WORD_CHAR.is_match(fragment))
        .map(capitalize_first)
        .collect();

    let mut joined = sentences.join(". ");
    if joined.ends_with(',') {
        joined.pop();
    }
    if !joined.ends_with('.') {
        joined.push('.');
    }
    joined
}

fn capitalize_first(fragment: &str) -> String {
    let mut chars = fragment.chars();
    match chars.next() {
        Some(first) if first.is_lowercase() => first.to_uppercase().chain(chars).collect(),
        _ => fragment.to_string(),
    }
}

#[cfg(test)]
#[path = "rewriter_test.rs"]
mod tests;
