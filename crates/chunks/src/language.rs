use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Source language a chunk stream was produced from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    C,
    Cpp,
    D,
    CSharp,
    Java,
    ObjectiveC,
    Vala,
    Pawn,
    Ecma,
}

impl Language {
    pub const ALL: [Language; 9] = [
        Language::C,
        Language::Cpp,
        Language::D,
        Language::CSharp,
        Language::Java,
        Language::ObjectiveC,
        Language::Vala,
        Language::Pawn,
        Language::Ecma,
    ];

    /// Detect language from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "c" | "h" => Some(Language::C),
            "cpp" | "cc" | "cxx" | "hpp" | "hh" | "hxx" | "inl" => Some(Language::Cpp),
            "d" | "di" => Some(Language::D),
            "cs" => Some(Language::CSharp),
            "java" => Some(Language::Java),
            "m" | "mm" => Some(Language::ObjectiveC),
            "vala" | "vapi" => Some(Language::Vala),
            "p" | "pawn" | "sma" => Some(Language::Pawn),
            "js" | "es" => Some(Language::Ecma),
            _ => None,
        }
    }

    /// Detect language from file path
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Get language name as string
    pub const fn as_str(self) -> &'static str {
        match self {
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::D => "d",
            Language::CSharp => "csharp",
            Language::Java => "java",
            Language::ObjectiveC => "objectivec",
            Language::Vala => "vala",
            Language::Pawn => "pawn",
            Language::Ecma => "ecma",
        }
    }

    const fn bit(self) -> u16 {
        match self {
            Language::C => 1 << 0,
            Language::Cpp => 1 << 1,
            Language::D => 1 << 2,
            Language::CSharp => 1 << 3,
            Language::Java => 1 << 4,
            Language::ObjectiveC => 1 << 5,
            Language::Vala => 1 << 6,
            Language::Pawn => 1 << 7,
            Language::Ecma => 1 << 8,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        Language::ALL
            .into_iter()
            .find(|lang| lang.as_str() == lowered)
            .or_else(|| match lowered.as_str() {
                "c++" => Some(Language::Cpp),
                "cs" | "c#" => Some(Language::CSharp),
                "oc" | "objc" => Some(Language::ObjectiveC),
                "js" | "javascript" => Some(Language::Ecma),
                _ => None,
            })
            .ok_or_else(|| format!("unknown language '{s}'"))
    }
}

/// Set of languages the stream is formatted as.
///
/// Dialect-gated predicates (managed references, nullable markers,
/// inheritance access specifiers, for-in loops) consult this set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Language>", into = "Vec<Language>")]
pub struct LanguageSet(u16);

impl LanguageSet {
    pub const EMPTY: LanguageSet = LanguageSet(0);

    /// Every C-family language (everything except Pawn)
    pub const ALL_C: LanguageSet = LanguageSet(
        Language::C.bit()
            | Language::Cpp.bit()
            | Language::D.bit()
            | Language::CSharp.bit()
            | Language::Java.bit()
            | Language::ObjectiveC.bit()
            | Language::Vala.bit()
            | Language::Ecma.bit(),
    );

    #[must_use]
    pub const fn single(language: Language) -> Self {
        Self(language.bit())
    }

    #[must_use]
    pub const fn contains(self, language: Language) -> bool {
        self.0 & language.bit() != 0
    }

    /// True when at least one language is shared with `other`
    #[must_use]
    pub const fn intersects(self, other: LanguageSet) -> bool {
        self.0 & other.0 != 0
    }

    #[must_use]
    pub const fn with(self, language: Language) -> Self {
        Self(self.0 | language.bit())
    }

    pub fn insert(&mut self, language: Language) {
        self.0 |= language.bit();
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Language> {
        Language::ALL.into_iter().filter(move |lang| self.contains(*lang))
    }
}

impl From<Language> for LanguageSet {
    fn from(language: Language) -> Self {
        Self::single(language)
    }
}

impl From<Vec<Language>> for LanguageSet {
    fn from(languages: Vec<Language>) -> Self {
        languages.into_iter().collect()
    }
}

impl From<LanguageSet> for Vec<Language> {
    fn from(set: LanguageSet) -> Self {
        set.iter().collect()
    }
}

impl FromIterator<Language> for LanguageSet {
    fn from_iter<I: IntoIterator<Item = Language>>(iter: I) -> Self {
        iter.into_iter().fold(LanguageSet::EMPTY, LanguageSet::with)
    }
}

impl fmt::Display for LanguageSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(Language::as_str).collect();
        write!(f, "{}", names.join("|"))
    }
}
