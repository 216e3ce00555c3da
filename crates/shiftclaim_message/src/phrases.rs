//! Cancellation phrase matching.

use shiftclaim_common::models::normalize_text;
use shiftclaim_common::ObservedMessage;
use std::fmt;

/// Endings accepted after a verb stem: "cancels", "postponed", "skipping".
const INFLECTIONS: &[&str] = &["", "s", "es", "d", "ed", "ing"];

/// What made a message count as a cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhraseMatch<'a> {
    /// A configured phrase occurs verbatim.
    Phrase(&'a str),
    /// A cancellation verb and a topic word occur together.
    Keywords { verb: &'a str, topic: &'a str },
}

impl fmt::Display for PhraseMatch<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhraseMatch::Phrase(phrase) => f.write_str(phrase),
            PhraseMatch::Keywords { verb, topic } => write!(f, "{} + {}", verb, topic),
        }
    }
}

/// True when `word` is `verb` or one of its regular inflections, including a
/// doubled final consonant ("cancelled", "dropping") and a dropped final e
/// ("removing").
fn inflects(word: &str, verb: &str) -> bool {
    let stem = verb.strip_suffix('e').unwrap_or(verb);
    let Some(rest) = word.strip_prefix(stem) else {
        return false;
    };
    if INFLECTIONS.contains(&rest) || (stem != verb && rest == "e") {
        return true;
    }
    match (stem.chars().next_back(), rest.chars().next()) {
        (Some(last), Some(first)) if last == first => {
            matches!(&rest[first.len_utf8()..], "ed" | "ing")
        }
        _ => false,
    }
}

/// True when `topic` occurs in `text` as whole words.
fn contains_words(text: &str, topic: &str) -> bool {
    text.match_indices(topic).any(|(at, _)| {
        let before = text[..at].chars().next_back();
        let after = text[at + topic.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

fn normalized_list<I, S>(words: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    words
        .into_iter()
        .map(|w| normalize_text(w.as_ref()))
        .filter(|w| !w.is_empty())
        .collect()
}

/// Case-insensitive matcher over a fixed list of phrasings, optionally backed
/// by a verb and topic word co-occurrence rule.
///
/// No scoring: the first phrase in list order that occurs in the message wins,
/// then the first verb and topic pair in list order.
#[derive(Debug, Clone, Default)]
pub struct PhraseMatcher {
    phrases: Vec<String>,
    verbs: Vec<String>,
    topics: Vec<String>,
}

impl PhraseMatcher {
    /// Builds a matcher; blank phrases are dropped.
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            phrases: normalized_list(phrases),
            ..Self::default()
        }
    }

    /// Also matches messages containing any of `verbs` (inflected or not)
    /// together with any of `topics`.
    pub fn with_keywords<V, T, S>(mut self, verbs: V, topics: T) -> Self
    where
        V: IntoIterator<Item = S>,
        T: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.verbs = normalized_list(verbs);
        self.topics = normalized_list(topics);
        self
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    /// First configured phrase contained in the message, else the first verb
    /// and topic pair found together.
    pub fn find<'a>(&'a self, message: &ObservedMessage) -> Option<PhraseMatch<'a>> {
        let text = message.normalized();
        if let Some(phrase) = self.phrases.iter().find(|p| text.contains(p.as_str())) {
            return Some(PhraseMatch::Phrase(phrase));
        }
        self.find_keywords(text)
    }

    fn find_keywords<'a>(&'a self, text: &str) -> Option<PhraseMatch<'a>> {
        let words: Vec<&str> = text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();
        let verb = self
            .verbs
            .iter()
            .find(|verb| words.iter().any(|word| inflects(word, verb)))?;
        let topic = self
            .topics
            .iter()
            .find(|topic| contains_words(text, topic))?;
        Some(PhraseMatch::Keywords { verb, topic })
    }

    pub fn matches(&self, message: &ObservedMessage) -> bool {
        self.find(message).is_some()
    }
}
