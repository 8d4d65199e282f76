//! Closed filter sets for catalog queries.
//!
//! Both the genre and the language filter accept only a fixed set of values.
//! [`Genre::All`] is the universal sentinel that adds no subject constraint.
//! Languages are ISO 639-2/B codes as used by Open Library.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Subject filter applied to catalog searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Genre {
    #[default]
    All,
    Fiction,
    Fantasy,
    ScienceFiction,
    Mystery,
    Romance,
    Thriller,
    Horror,
    Biography,
    History,
    Science,
    Philosophy,
    Poetry,
    Drama,
    Art,
}

impl Genre {
    /// Every genre in display order, starting with [`Genre::All`].
    pub const ALL: [Self; 15] = [
        Self::All,
        Self::Fiction,
        Self::Fantasy,
        Self::ScienceFiction,
        Self::Mystery,
        Self::Romance,
        Self::Thriller,
        Self::Horror,
        Self::Biography,
        Self::History,
        Self::Science,
        Self::Philosophy,
        Self::Poetry,
        Self::Drama,
        Self::Art,
    ];

    /// Display label, e.g. `"Science Fiction"`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Fiction => "Fiction",
            Self::Fantasy => "Fantasy",
            Self::ScienceFiction => "Science Fiction",
            Self::Mystery => "Mystery",
            Self::Romance => "Romance",
            Self::Thriller => "Thriller",
            Self::Horror => "Horror",
            Self::Biography => "Biography",
            Self::History => "History",
            Self::Science => "Science",
            Self::Philosophy => "Philosophy",
            Self::Poetry => "Poetry",
            Self::Drama => "Drama",
            Self::Art => "Art",
        }
    }

    /// Subject constraint appended to the query term, `None` for [`Genre::All`].
    ///
    /// ```
    /// use bookhunt::domain::Genre;
    ///
    /// assert_eq!(Genre::ScienceFiction.subject_constraint().as_deref(), Some("subject:science fiction"));
    /// assert_eq!(Genre::All.subject_constraint(), None);
    /// ```
    #[must_use]
    pub fn subject_constraint(self) -> Option<String> {
        match self {
            Self::All => None,
            genre => Some(format!("subject:{}", genre.label().to_lowercase())),
        }
    }

    /// Parses a display label case-insensitively.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|genre| genre.label().eq_ignore_ascii_case(label.trim()))
    }

    /// The next genre, wrapping to [`Genre::All`] after the last one.
    #[must_use]
    pub fn next(self) -> Self {
        let idx = self.position();
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// The previous genre, wrapping to the last one before [`Genre::All`].
    #[must_use]
    pub fn previous(self) -> Self {
        let idx = self.position();
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn position(self) -> usize {
        Self::ALL.iter().position(|g| *g == self).unwrap_or(0)
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Supported language codes paired with their English display names.
const LANGUAGES: [(&str, &str); 29] = [
    ("eng", "English"),
    ("fre", "French"),
    ("spa", "Spanish"),
    ("ger", "German"),
    ("ita", "Italian"),
    ("rus", "Russian"),
    ("chi", "Chinese"),
    ("jpn", "Japanese"),
    ("kor", "Korean"),
    ("ara", "Arabic"),
    ("hin", "Hindi"),
    ("por", "Portuguese"),
    ("dut", "Dutch"),
    ("swe", "Swedish"),
    ("pol", "Polish"),
    ("tur", "Turkish"),
    ("dan", "Danish"),
    ("nor", "Norwegian"),
    ("fin", "Finnish"),
    ("gre", "Greek"),
    ("hun", "Hungarian"),
    ("cze", "Czech"),
    ("rum", "Romanian"),
    ("vie", "Vietnamese"),
    ("tha", "Thai"),
    ("heb", "Hebrew"),
    ("ukr", "Ukrainian"),
    ("ben", "Bangla"),
    ("tam", "Tamil"),
];

/// Language filter, one of the supported ISO 639-2/B codes.
///
/// Construct through [`Language::from_code`]; arbitrary codes are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Language(usize);

impl Language {
    /// English, the default filter.
    pub const ENGLISH: Self = Self(0);

    /// Looks up a supported language code.
    ///
    /// ```
    /// use bookhunt::domain::Language;
    ///
    /// assert_eq!(Language::from_code("ger").map(|l| l.display_name()), Some("German"));
    /// assert!(Language::from_code("xx").is_none());
    /// ```
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        LANGUAGES
            .iter()
            .position(|(c, _)| c.eq_ignore_ascii_case(code))
            .map(Self)
    }

    /// Every supported language in display order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..LANGUAGES.len()).map(Self)
    }

    /// The ISO 639-2/B code sent to the API.
    #[must_use]
    pub const fn code(self) -> &'static str {
        LANGUAGES[self.0].0
    }

    /// English display name of the language.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        LANGUAGES[self.0].1
    }

    /// The next language, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        Self((self.0 + 1) % LANGUAGES.len())
    }

    /// The previous language, wrapping around.
    #[must_use]
    pub const fn previous(self) -> Self {
        Self((self.0 + LANGUAGES.len() - 1) % LANGUAGES.len())
    }
}

/// Display name for any language code, falling back to the code itself.
///
/// Used for the language list of a book, which may contain codes outside the
/// filter set.
#[must_use]
pub fn language_display_name(code: &str) -> &str {
    Language::from_code(code).map_or(code, |language| language.display_name())
}

impl Default for Language {
    fn default() -> Self {
        Self::ENGLISH
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<String> for Language {
    type Error = String;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        Self::from_code(&code).ok_or_else(|| format!("unsupported language code: {code}"))
    }
}

impl From<Language> for String {
    fn from(language: Language) -> Self {
        language.code().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genre_cycle_wraps_both_ways() {
        assert_eq!(Genre::Art.next(), Genre::All);
        assert_eq!(Genre::All.previous(), Genre::Art);
        assert_eq!(Genre::All.next(), Genre::Fiction);
    }

    #[test]
    fn genre_labels_round_trip() {
        for genre in Genre::ALL {
            assert_eq!(Genre::from_label(genre.label()), Some(genre));
        }
        assert_eq!(Genre::from_label("science fiction"), Some(Genre::ScienceFiction));
        assert_eq!(Genre::from_label("Cooking"), None);
    }

    #[test]
    fn language_cycle_wraps() {
        let last = Language::all().last().unwrap();
        assert_eq!(last.code(), "tam");
        assert_eq!(last.next(), Language::ENGLISH);
        assert_eq!(Language::ENGLISH.previous(), last);
    }

    #[test]
    fn unknown_language_codes_display_as_is() {
        assert_eq!(language_display_name("fre"), "French");
        assert_eq!(language_display_name("lat"), "lat");

        let owned = String::from(" ger ");
        assert_eq!(language_display_name(&owned), "German");
    }

    #[test]
    fn language_serializes_as_code() {
        let json = serde_json::to_string(&Language::from_code("jpn").unwrap()).unwrap();
        assert_eq!(json, "\"jpn\"");
        let back: Language = serde_json::from_str(&json).unwrap();
        assert_eq!(back.code(), "jpn");
        assert!(serde_json::from_str::<Language>("\"klingon\"").is_err());
    }
}
