use serde::{Deserialize, Serialize};
use std::fmt;

use crate::flags::ChunkFlags;
use crate::token::TokenKind;

/// Handle to a chunk owned by a [`ChunkList`](crate::ChunkList).
///
/// Handles are cheap to copy and never dangle: once the chunk is deleted the
/// handle goes stale and every lookup through it yields nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkId {
    pub(crate) list: u32,
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}.{}@{}", self.index, self.generation, self.list)
    }
}

/// Source coordinate of a chunk (1-indexed line and column)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// One lexical unit of the source file plus its structural metadata.
///
/// `kind`, `parent_kind` and `flags` are private: once a chunk is linked into
/// a list they change only through the list's provenance-tracked setters.
/// Everything else is plain data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    kind: TokenKind,
    #[serde(default)]
    parent_kind: TokenKind,
    #[serde(default)]
    flags: ChunkFlags,

    /// The literal source text; empty text is a valid blank chunk
    pub text: String,

    /// Where the chunk started in the input
    #[serde(default)]
    pub orig: Position,

    /// Column just past the chunk's last character in the input
    #[serde(default)]
    pub orig_col_end: usize,

    /// Output column assigned by later passes
    #[serde(default)]
    pub column: usize,

    /// Brace/paren/square/angle nesting depth
    #[serde(default)]
    pub level: usize,

    /// Brace-only nesting depth
    #[serde(default)]
    pub brace_level: usize,

    /// Preprocessor `#if` nesting depth
    #[serde(default)]
    pub pp_level: usize,

    /// Number of line breaks a newline chunk stands for
    #[serde(default)]
    pub nl_count: usize,

    #[serde(skip)]
    pub(crate) parent: Option<ChunkId>,
}

impl Chunk {
    /// Create a detached chunk
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            kind,
            parent_kind: TokenKind::None,
            flags: ChunkFlags::NONE,
            nl_count: usize::from(matches!(kind, TokenKind::Newline | TokenKind::NlCont)),
            text,
            orig: Position::default(),
            orig_col_end: 0,
            column: 0,
            level: 0,
            brace_level: 0,
            pp_level: 0,
            parent: None,
        }
    }

    /// Shorthand for a single-break newline chunk
    #[must_use]
    pub fn newline() -> Self {
        Self::new(TokenKind::Newline, "\n")
    }

    /// Builder: set source position (and the end column from the text length)
    #[must_use]
    pub fn at(mut self, line: usize, column: usize) -> Self {
        self.orig = Position::new(line, column);
        self.orig_col_end = column + self.text.chars().count();
        self.column = column;
        self
    }

    /// Builder: set nesting level
    #[must_use]
    pub const fn with_level(mut self, level: usize) -> Self {
        self.level = level;
        self
    }

    /// Builder: set initial flags
    #[must_use]
    pub const fn with_flags(mut self, flags: ChunkFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Builder: set initial parent kind
    #[must_use]
    pub const fn with_parent_kind(mut self, parent_kind: TokenKind) -> Self {
        self.parent_kind = parent_kind;
        self
    }

    /// Builder: mark as part of a preprocessor directive
    #[must_use]
    pub fn in_preproc(mut self) -> Self {
        self.flags |= ChunkFlags::IN_PREPROC;
        self
    }

    #[must_use]
    pub const fn kind(&self) -> TokenKind {
        self.kind
    }

    #[must_use]
    pub const fn parent_kind(&self) -> TokenKind {
        self.parent_kind
    }

    #[must_use]
    pub const fn flags(&self) -> ChunkFlags {
        self.flags
    }

    /// The governing chunk recorded by [`ChunkList::set_parent_chunk`](crate::ChunkList::set_parent_chunk)
    #[must_use]
    pub const fn parent(&self) -> Option<ChunkId> {
        self.parent
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text length in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub(crate) fn set_kind_raw(&mut self, kind: TokenKind) {
        self.kind = kind;
    }

    pub(crate) fn set_parent_kind_raw(&mut self, kind: TokenKind) {
        self.parent_kind = kind;
    }

    pub(crate) fn set_flags_raw(&mut self, flags: ChunkFlags) {
        self.flags = flags;
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self.kind {
            TokenKind::Newline => "<NL>".to_string(),
            TokenKind::NlCont => "<\\NL>".to_string(),
            _ => self.text.clone(),
        };
        write!(f, "{} {} '{}'", self.orig, self.kind, text)
    }
}
