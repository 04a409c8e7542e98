//! Link eligibility rules
//!
//! Decides whether a hyperlink found in an article paragraph may be "the"
//! next article. A link is eligible only if:
//! - it names a target article (has a `title` attribute)
//! - its display text, with spaces and hyphens removed, is purely alphabetic
//! - that text does not start with an uppercase letter
//! - it does not sit inside an unclosed parenthetical aside

/// A hyperlink found inside a paragraph, detached from any HTML tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkCandidate {
    /// Visible text of the anchor
    pub text: String,

    /// Target article title (the anchor's `title` attribute)
    pub title: Option<String>,

    /// Serialized preceding siblings within the paragraph, nearest first.
    /// Text nodes appear as their text, elements as their outer HTML.
    pub preceding: Vec<String>,
}

impl LinkCandidate {
    /// Creates a candidate with no preceding siblings
    pub fn new(text: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            title: Some(title.into()),
            preceding: Vec::new(),
        }
    }

    /// Adds the preceding siblings, given in document order
    pub fn after<I, S>(mut self, siblings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut preceding: Vec<String> = siblings.into_iter().map(Into::into).collect();
        preceding.reverse();
        self.preceding = preceding;
        self
    }
}

/// Returns true if the candidate may be followed as the next article
pub fn is_eligible(candidate: &LinkCandidate) -> bool {
    if candidate.title.as_deref().map_or(true, str::is_empty) {
        return false;
    }

    has_lowercase_word_text(&candidate.text) && !is_inside_parentheses(&candidate.preceding)
}

/// Checks the display text rules: alphabetic only, not uppercase-led
fn has_lowercase_word_text(text: &str) -> bool {
    let stripped: String = text.chars().filter(|c| *c != ' ' && *c != '-').collect();

    let mut chars = stripped.chars();
    match chars.next() {
        Some(first) => {
            first.is_alphabetic() && !first.is_uppercase() && chars.all(char::is_alphabetic)
        }
        None => false,
    }
}

/// Walks preceding siblings (nearest first) looking for an unclosed `(`
///
/// Each sibling is judged on its own: any `)` means the link is outside a
/// parenthetical, more `(` than `)` means it is inside one.
fn is_inside_parentheses(preceding: &[String]) -> bool {
    for sibling in preceding {
        let closes = sibling.matches(')').count();
        if closes > 0 {
            return false;
        }

        let opens = sibling.matches('(').count();
        if opens > closes {
            return true;
        }
    }

    false
}
