//! A single field value, measured once.

use std::borrow::Cow;

use quick_xml::escape::escape;
use sm_domain::Mode;

use crate::classifier::{count_chars, count_words};
use crate::markup::{has_tag_opener, Fragment};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Body {
    Plain,
    Markup(Fragment),
    /// Markup that failed to parse. Shown as-is, never truncated.
    Unparsed,
}

/// Either plain text or a markup fragment, together with its plain-text
/// projection and the word and character counts of that projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentUnit {
    source: String,
    body: Body,
    text: String,
    words: usize,
    chars: usize,
}

impl ContentUnit {
    pub fn plain(text: impl Into<String>) -> Self {
        let source = text.into();
        Self::measured(source.clone(), Body::Plain, source)
    }

    /// Parse `source` as a markup fragment. A fragment that cannot be
    /// parsed is kept verbatim and is never truncated.
    pub fn markup(source: impl Into<String>) -> Self {
        let source = source.into();
        match Fragment::parse(&source) {
            Ok(fragment) => {
                let text = fragment.text();
                Self::measured(source, Body::Markup(fragment), text)
            }
            Err(e) => {
                tracing::warn!(error = %e, "markup could not be parsed, leaving it untruncated");
                Self::measured(source.clone(), Body::Unparsed, source)
            }
        }
    }

    /// Classify a rendered field value: values without any tags become
    /// plain text (entities decoded, surrounding whitespace dropped),
    /// everything else is treated as markup. A `<` that opens no tag, as
    /// in `a < b`, is text.
    pub fn from_value(value: &str) -> Self {
        match Fragment::parse(value) {
            Ok(fragment) if !fragment.has_markup() => Self::plain(fragment.text().trim()),
            Err(_) if !has_tag_opener(value) => Self::plain(value.trim()),
            _ => Self::markup(value),
        }
    }

    fn measured(source: String, body: Body, text: String) -> Self {
        let words = count_words(&text);
        let chars = count_chars(&text);
        Self {
            source,
            body,
            text,
            words,
            chars,
        }
    }

    /// The value as given.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Plain-text projection.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn measure(&self, mode: Mode) -> usize {
        match mode {
            Mode::Words => self.words,
            Mode::Characters => self.chars,
        }
    }

    pub fn is_markup(&self) -> bool {
        !matches!(self.body, Body::Plain)
    }

    pub fn fragment(&self) -> Option<&Fragment> {
        match &self.body {
            Body::Markup(fragment) => Some(fragment),
            _ => None,
        }
    }

    /// False only for markup that failed to parse.
    pub fn is_truncatable(&self) -> bool {
        !matches!(self.body, Body::Unparsed)
    }

    /// Render for insertion into a page. Plain text is escaped, markup is
    /// passed through.
    pub fn to_html(&self) -> Cow<'_, str> {
        match self.body {
            Body::Plain => escape(self.source.as_str()),
            _ => Cow::Borrowed(&self.source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sm_domain::TruncationConfig;

    #[test]
    fn markup_is_measured_on_its_text() {
        let unit = ContentUnit::markup("<p>Alpha <b>bravo charlie</b> delta</p>");
        assert!(unit.is_markup());
        assert_eq!(unit.text(), "Alpha bravo charlie delta");
        assert_eq!(unit.measure(Mode::Words), 4);
        assert_eq!(unit.measure(Mode::Characters), 25);
    }

    #[test]
    fn plain_text_is_escaped_for_display() {
        let unit = ContentUnit::plain("a < b & c");
        assert!(!unit.is_markup());
        assert_eq!(unit.to_html(), "a &lt; b &amp; c");
    }

    #[test]
    fn tagless_values_become_plain_text() {
        let unit = ContentUnit::from_value("  Fish &amp; chips  ");
        assert!(!unit.is_markup());
        assert_eq!(unit.source(), "Fish & chips");
        assert_eq!(unit.to_html(), "Fish &amp; chips");

        let unit = ContentUnit::from_value("<em>Fish</em> &amp; chips");
        assert!(unit.is_markup());
        assert_eq!(unit.text(), "Fish & chips");
    }

    #[test]
    fn less_than_sign_in_plain_text_is_truncated_and_escaped() {
        let unit = ContentUnit::from_value(
            "Readings < 5 are discarded and the rest of the words go on and on here",
        );
        assert!(!unit.is_markup());
        assert!(unit.is_truncatable());

        let result = crate::truncate(unit, &TruncationConfig::words(3));
        assert!(result.was_truncated);
        assert_eq!(result.collapsed.source(), "Readings < 5...");
        assert_eq!(result.collapsed.to_html(), "Readings &lt; 5...");
        assert!(result.full.to_html().starts_with("Readings &lt; 5 are"));
    }

    #[test]
    fn unparseable_markup_is_never_truncatable() {
        let unit = ContentUnit::markup("one <!-- two three");
        assert!(!unit.is_truncatable());
        assert!(unit.fragment().is_none());
        assert!(!crate::needs_truncation(&unit, Mode::Words, 1));
        assert_eq!(unit.to_html(), unit.source());
    }
}
