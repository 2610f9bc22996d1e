//! Scoped traversal.
//!
//! Every "next"/"prev" helper is [`ChunkList::search`]: one scoped step at a
//! time, stopping at the first chunk the filter accepts. Running off either
//! end of the stream, a stale cursor or unmatched structure all yield `None`.

use crate::chunk::{Chunk, ChunkId};
use crate::store::ChunkList;
use crate::token::TokenKind;

/// How a step treats preprocessor directive boundaries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Scope {
    /// From inside a directive, stepping out of it yields `None`; from
    /// outside, directive chunks are skipped as if absent
    #[default]
    All,
    /// A step succeeds only when it lands inside a directive
    Preproc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
}

/// Nesting level filter for typed and text searches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Level {
    #[default]
    Any,
    Exact(usize),
}

impl Level {
    /// Negative levels mean "any level"
    #[must_use]
    pub fn from_signed(level: i64) -> Self {
        usize::try_from(level).map_or(Level::Any, Level::Exact)
    }

    #[must_use]
    pub const fn matches(self, level: usize) -> bool {
        match self {
            Level::Any => true,
            Level::Exact(expected) => expected == level,
        }
    }
}

impl From<usize> for Level {
    fn from(level: usize) -> Self {
        Level::Exact(level)
    }
}

macro_rules! filtered_steps {
    ($($(#[$doc:meta])* $next:ident, $prev:ident => $filter:expr;)+) => {
        impl ChunkList {
            $(
                $(#[$doc])*
                pub fn $next(&self, cur: impl Into<Option<ChunkId>>, scope: Scope) -> Option<ChunkId> {
                    self.search(cur, scope, Direction::Forward, $filter)
                }

                $(#[$doc])*
                pub fn $prev(&self, cur: impl Into<Option<ChunkId>>, scope: Scope) -> Option<ChunkId> {
                    self.search(cur, scope, Direction::Backward, $filter)
                }
            )+
        }
    };
}

filtered_steps! {
    /// Neighbour within scope
    next, prev => |_: &Chunk| true;
    /// Nearest newline or line continuation
    next_newline, prev_newline => Chunk::is_newline;
    /// Nearest chunk that is not a newline
    next_non_newline, prev_non_newline => |c: &Chunk| !c.is_newline();
    /// Nearest chunk that is not a comment
    next_non_comment, prev_non_comment => |c: &Chunk| !c.is_comment();
    /// Nearest chunk that is neither comment nor newline
    next_code, prev_code => Chunk::is_code;
    /// Nearest code chunk outside any preprocessor directive
    next_code_no_preproc, prev_code_no_preproc => |c: &Chunk| !c.is_comment_newline_or_preproc();
    /// Nearest chunk with non-empty text
    next_non_blank, prev_non_blank => |c: &Chunk| !c.is_blank();
    /// Nearest chunk that is not a virtual brace
    next_non_vbrace, prev_non_vbrace => |c: &Chunk| !c.is_vbrace();
    /// Nearest code chunk that is not marked ignored
    next_code_not_ignored, prev_code_not_ignored => |c: &Chunk| !c.is_comment_or_newline_or_ignored();
}

impl ChunkList {
    /// One scoped step from `cur`
    fn step(&self, cur: ChunkId, scope: Scope, direction: Direction) -> Option<ChunkId> {
        let inside = self.get(cur)?.is_preproc();
        let raw = |id: ChunkId| match direction {
            Direction::Forward => self.next_raw(id),
            Direction::Backward => self.prev_raw(id),
        };
        let mut next = raw(cur)?;
        match scope {
            Scope::Preproc => self.is(next, Chunk::is_preproc).then_some(next),
            Scope::All if inside => self.is(next, Chunk::is_preproc).then_some(next),
            Scope::All => {
                while self.is(next, Chunk::is_preproc) {
                    next = raw(next)?;
                }
                Some(next)
            }
        }
    }

    /// Step in `direction` until `filter` accepts a chunk
    pub fn search(
        &self,
        cur: impl Into<Option<ChunkId>>,
        scope: Scope,
        direction: Direction,
        mut filter: impl FnMut(&Chunk) -> bool,
    ) -> Option<ChunkId> {
        let mut cursor = cur.into()?;
        loop {
            cursor = self.step(cursor, scope, direction)?;
            if filter(self.get(cursor)?) {
                return Some(cursor);
            }
        }
    }

    /// Iterate the scoped steps from `cur` (exclusive)
    pub fn walk(&self, cur: impl Into<Option<ChunkId>>, scope: Scope, direction: Direction) -> Walk<'_> {
        Walk {
            list: self,
            cursor: cur.into(),
            scope,
            direction,
        }
    }

    /// Next code chunk, aware of the directive the cursor starts in.
    ///
    /// Inside a directive, comments and line continuations are skipped and
    /// the first chunk past the directive (normally its newline) is returned.
    /// Outside one this is [`next_code`](Self::next_code).
    pub fn next_code_in_directive(&self, cur: impl Into<Option<ChunkId>>) -> Option<ChunkId> {
        let cur = cur.into();
        if !self.is(cur, Chunk::is_preproc) {
            return self.next_code(cur, Scope::All);
        }
        let mut cursor = cur?;
        loop {
            cursor = self.next_raw(cursor)?;
            let chunk = self.get(cursor)?;
            if !chunk.is_preproc() || !(chunk.is_comment() || chunk.kind() == TokenKind::NlCont) {
                return Some(cursor);
            }
        }
    }

    /// First chunk after `cur` that is outside every square-bracket group.
    ///
    /// Stacked groups like `[2][3]` are skipped together.
    pub fn next_outside_squares(&self, cur: impl Into<Option<ChunkId>>, scope: Scope) -> Option<ChunkId> {
        let mut cursor = cur.into()?;
        let mut depth = 0usize;
        loop {
            match self.get(cursor)?.kind() {
                TokenKind::SquareOpen => depth += 1,
                TokenKind::SquareClose => depth = depth.saturating_sub(1),
                _ => {}
            }
            cursor = self.step(cursor, scope, Direction::Forward)?;
            if depth == 0 && !self.is(cursor, Chunk::is_balanced_square) {
                return Some(cursor);
            }
        }
    }

    /// From `[` or `[]`, the first code chunk after the run of square groups.
    ///
    /// Any other cursor is returned unchanged.
    pub fn skip_square_groups(&self, cur: impl Into<Option<ChunkId>>) -> Option<ChunkId> {
        let mut cursor = cur.into();
        while let Some(kind) = self.get(cursor).map(Chunk::kind) {
            match kind {
                TokenKind::SquareOpen => {
                    cursor = self.matching_delimiter(cursor, Scope::All);
                }
                TokenKind::Tsquare => {}
                _ => break,
            }
            cursor = self.next_code(cursor, Scope::All);
        }
        cursor
    }

    /// From `]` or `[]`, the first code chunk before the run of square groups
    pub fn skip_square_groups_rev(&self, cur: impl Into<Option<ChunkId>>) -> Option<ChunkId> {
        let mut cursor = cur.into();
        while let Some(kind) = self.get(cursor).map(Chunk::kind) {
            match kind {
                TokenKind::SquareClose => {
                    cursor = self.matching_delimiter_rev(cursor, Scope::All);
                }
                TokenKind::Tsquare => {}
                _ => break,
            }
            cursor = self.prev_code(cursor, Scope::All);
        }
        cursor
    }

    /// The closing delimiter paired with an opening one, at the same level.
    ///
    /// Chunks that do not open a group are returned unchanged.
    pub fn matching_delimiter(&self, cur: impl Into<Option<ChunkId>>, scope: Scope) -> Option<ChunkId> {
        let cur = cur.into();
        let chunk = self.get(cur)?;
        match chunk.kind().closing_kind() {
            Some(close) => self.next_of_kind(cur, close, Level::Exact(chunk.level), scope),
            None => cur,
        }
    }

    /// The opening delimiter paired with a closing one, at the same level
    pub fn matching_delimiter_rev(&self, cur: impl Into<Option<ChunkId>>, scope: Scope) -> Option<ChunkId> {
        let cur = cur.into();
        let chunk = self.get(cur)?;
        match chunk.kind().opening_kind() {
            Some(open) => self.prev_of_kind(cur, open, Level::Exact(chunk.level), scope),
            None => cur,
        }
    }

    pub fn next_of_kind(
        &self,
        cur: impl Into<Option<ChunkId>>,
        kind: TokenKind,
        level: Level,
        scope: Scope,
    ) -> Option<ChunkId> {
        self.search(cur, scope, Direction::Forward, |c| c.kind() == kind && level.matches(c.level))
    }

    pub fn prev_of_kind(
        &self,
        cur: impl Into<Option<ChunkId>>,
        kind: TokenKind,
        level: Level,
        scope: Scope,
    ) -> Option<ChunkId> {
        self.search(cur, scope, Direction::Backward, |c| c.kind() == kind && level.matches(c.level))
    }

    /// Nearest chunk with exactly this text; empty text never matches
    pub fn next_with_text(
        &self,
        cur: impl Into<Option<ChunkId>>,
        text: &str,
        level: Level,
        scope: Scope,
    ) -> Option<ChunkId> {
        self.text_search(cur, text, false, level, scope, Direction::Forward)
    }

    pub fn prev_with_text(
        &self,
        cur: impl Into<Option<ChunkId>>,
        text: &str,
        level: Level,
        scope: Scope,
    ) -> Option<ChunkId> {
        self.text_search(cur, text, false, level, scope, Direction::Backward)
    }

    pub fn next_with_text_ignore_case(
        &self,
        cur: impl Into<Option<ChunkId>>,
        text: &str,
        level: Level,
        scope: Scope,
    ) -> Option<ChunkId> {
        self.text_search(cur, text, true, level, scope, Direction::Forward)
    }

    pub fn prev_with_text_ignore_case(
        &self,
        cur: impl Into<Option<ChunkId>>,
        text: &str,
        level: Level,
        scope: Scope,
    ) -> Option<ChunkId> {
        self.text_search(cur, text, true, level, scope, Direction::Backward)
    }

    fn text_search(
        &self,
        cur: impl Into<Option<ChunkId>>,
        text: &str,
        ignore_case: bool,
        level: Level,
        scope: Scope,
        direction: Direction,
    ) -> Option<ChunkId> {
        if text.is_empty() {
            return None;
        }
        self.search(cur, scope, direction, |c| {
            let same = if ignore_case {
                c.is_str_ignore_case(text)
            } else {
                c.is_str(text)
            };
            same && level.matches(c.level)
        })
    }

    /// Nearest chunk belonging to the construct `kind`
    pub fn next_with_parent_kind(&self, cur: impl Into<Option<ChunkId>>, kind: TokenKind) -> Option<ChunkId> {
        self.search(cur, Scope::All, Direction::Forward, |c| c.parent_kind() == kind)
    }

    pub fn prev_with_parent_kind(&self, cur: impl Into<Option<ChunkId>>, kind: TokenKind) -> Option<ChunkId> {
        self.search(cur, Scope::All, Direction::Backward, |c| c.parent_kind() == kind)
    }

    /// The `#` chunk opening the directive that contains `cur`
    pub fn directive_start(&self, cur: impl Into<Option<ChunkId>>) -> Option<ChunkId> {
        let mut cursor = cur.into();
        if !self.is(cursor, Chunk::is_preproc) {
            return None;
        }
        loop {
            if self.is_kind(cursor, TokenKind::Preproc) {
                return cursor;
            }
            let prev = self.prev_raw(cursor);
            if !self.is(prev, Chunk::is_preproc) {
                // malformed run without a `#`
                return cursor;
            }
            cursor = prev;
        }
    }

    /// First chunk of the line holding `cur`
    pub fn first_on_line(&self, cur: impl Into<Option<ChunkId>>) -> Option<ChunkId> {
        let mut cursor = cur.into();
        self.get(cursor)?;
        loop {
            let prev = self.prev_raw(cursor);
            if prev.is_none() || self.is(prev, Chunk::is_newline) {
                return cursor;
            }
            cursor = prev;
        }
    }

    /// Nothing but the end of the stream or a newline follows `cur`
    pub fn is_last_on_line(&self, cur: impl Into<Option<ChunkId>>) -> bool {
        let cur = cur.into();
        if self.get(cur).is_none() {
            return false;
        }
        let next = self.next_raw(cur);
        next.is_none() || self.is(next, Chunk::is_newline)
    }

    /// No hard newline lies strictly between the two chunks
    pub fn are_in_same_line(&self, a: impl Into<Option<ChunkId>>, b: impl Into<Option<ChunkId>>) -> bool {
        let (Some(a), Some(b)) = (a.into(), b.into()) else {
            return false;
        };
        let Ok(ordering) = self.try_compare_position(a, b) else {
            return false;
        };
        let (start, end) = if ordering.is_gt() { (b, a) } else { (a, b) };
        let mut cursor = self.next_raw(start);
        while let Some(id) = cursor {
            if id == end {
                return true;
            }
            if self.is_kind(id, TokenKind::Newline) {
                return false;
            }
            cursor = self.next_raw(id);
        }
        true
    }

    /// Some newline (either kind) lies in `[start, end)`
    pub fn is_newline_between(&self, start: impl Into<Option<ChunkId>>, end: impl Into<Option<ChunkId>>) -> bool {
        let (Some(start), Some(end)) = (start.into(), end.into()) else {
            return false;
        };
        let Ok(ordering) = self.try_compare_position(start, end) else {
            return false;
        };
        let (start, end) = if ordering.is_gt() { (end, start) } else { (start, end) };
        let mut cursor = Some(start);
        while let Some(id) = cursor {
            if id == end {
                break;
            }
            if self.is(id, Chunk::is_newline) {
                return true;
            }
            cursor = self.next_raw(id);
        }
        false
    }

    /// From a name at the start of an `a::b::c` chain, the final name
    pub fn skip_scope_chain(&self, cur: impl Into<Option<ChunkId>>, scope: Scope) -> Option<ChunkId> {
        self.scope_chain_end(cur.into(), scope, Direction::Forward)
    }

    /// From the final name of an `a::b::c` chain, the first name
    pub fn skip_scope_chain_rev(&self, cur: impl Into<Option<ChunkId>>, scope: Scope) -> Option<ChunkId> {
        self.scope_chain_end(cur.into(), scope, Direction::Backward)
    }

    fn scope_chain_end(&self, cur: Option<ChunkId>, scope: Scope, direction: Direction) -> Option<ChunkId> {
        let code = |id: Option<ChunkId>| self.search(id, scope, direction, Chunk::is_code);
        let mut name = cur;
        self.get(name)?;
        let mut separator = if self.is_kind(name, TokenKind::DcMember) {
            name
        } else {
            code(name)
        };
        while self.is_kind(separator, TokenKind::DcMember) {
            name = code(separator);
            if name.is_none() {
                return None;
            }
            separator = code(name);
        }
        name
    }
}

/// Iterator over successive scoped steps
pub struct Walk<'a> {
    list: &'a ChunkList,
    cursor: Option<ChunkId>,
    scope: Scope,
    direction: Direction,
}

impl Iterator for Walk<'_> {
    type Item = ChunkId;

    fn next(&mut self) -> Option<ChunkId> {
        let next = self.list.step(self.cursor?, self.scope, self.direction);
        self.cursor = next;
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn chunk(kind: TokenKind, text: &str, level: usize) -> Chunk {
        Chunk::new(kind, text).with_level(level)
    }

    fn build(chunks: Vec<Chunk>) -> (ChunkList, Vec<ChunkId>) {
        let mut list = ChunkList::new();
        let ids = chunks.into_iter().map(|c| list.push_back(c)).collect();
        (list, ids)
    }

    fn text_of(list: &ChunkList, id: Option<ChunkId>) -> Option<&str> {
        list.get(id).map(Chunk::text)
    }

    #[test]
    fn test_level_from_signed() {
        assert_eq!(Level::from_signed(-1), Level::Any);
        assert_eq!(Level::from_signed(-7), Level::Any);
        assert_eq!(Level::from_signed(3), Level::Exact(3));
        assert!(Level::Any.matches(9));
        assert!(!Level::Exact(1).matches(2));
    }

    #[test]
    fn test_filtered_steps_both_directions() {
        let (list, ids) = build(vec![
            chunk(TokenKind::Word, "a", 0),
            chunk(TokenKind::Comment, "/* c */", 0),
            Chunk::newline(),
            chunk(TokenKind::VbraceOpen, "", 0),
            chunk(TokenKind::Ignored, "skip", 0),
            chunk(TokenKind::Word, "b", 0),
        ]);
        let a = ids[0];
        let b = ids[5];

        assert_eq!(list.next(a, Scope::All), Some(ids[1]));
        assert_eq!(list.next_newline(a, Scope::All), Some(ids[2]));
        assert_eq!(list.next_non_comment(a, Scope::All), Some(ids[2]));
        assert_eq!(list.next_code(a, Scope::All), Some(ids[3]));
        assert_eq!(list.next_non_blank(ids[2], Scope::All), Some(ids[4]));
        assert_eq!(list.next_non_vbrace(ids[2], Scope::All), Some(ids[4]));
        assert_eq!(list.next_code_not_ignored(ids[3], Scope::All), Some(b));

        assert_eq!(list.prev_code(b, Scope::All), Some(ids[4]));
        assert_eq!(list.prev_code_not_ignored(b, Scope::All), Some(ids[3]));
        assert_eq!(list.prev_non_newline(ids[3], Scope::All), Some(ids[1]));
        assert_eq!(list.prev_newline(b, Scope::All), Some(ids[2]));
        assert_eq!(list.prev(a, Scope::All), None);
        assert_eq!(list.next(b, Scope::All), None);
    }

    #[test]
    fn test_absent_and_stale_cursor() {
        let (mut list, ids) = build(vec![chunk(TokenKind::Word, "a", 0), chunk(TokenKind::Word, "b", 0)]);
        assert_eq!(list.next(None, Scope::All), None);
        list.delete(ids[0]);
        assert_eq!(list.next(ids[0], Scope::All), None);
        assert_eq!(list.first_on_line(ids[0]), None);
    }

    #[test]
    fn test_code_no_preproc_skips_directives() {
        let (list, ids) = build(vec![
            chunk(TokenKind::Word, "a", 0),
            Chunk::newline(),
            chunk(TokenKind::Preproc, "#", 0).in_preproc(),
            chunk(TokenKind::PpDefine, "define", 0).in_preproc(),
            Chunk::newline(),
            chunk(TokenKind::Word, "b", 0),
        ]);
        assert_eq!(list.next_code_no_preproc(ids[0], Scope::All), Some(ids[5]));
        assert_eq!(list.prev_code_no_preproc(ids[5], Scope::All), Some(ids[0]));
        // within a directive there is nothing outside it to find
        assert_eq!(list.next_code_no_preproc(ids[2], Scope::All), None);
    }

    #[test]
    fn test_next_code_in_directive() {
        let (list, ids) = build(vec![
            chunk(TokenKind::Preproc, "#", 0).in_preproc(),
            chunk(TokenKind::PpDefine, "define", 0).in_preproc(),
            chunk(TokenKind::Macro, "X", 0).in_preproc(),
            chunk(TokenKind::Comment, "/* c */", 0).in_preproc(),
            chunk(TokenKind::NlCont, "\\\n", 0).in_preproc(),
            chunk(TokenKind::Number, "1", 0).in_preproc(),
            chunk(TokenKind::CommentCpp, "// tail", 0).in_preproc(),
            Chunk::newline(),
            chunk(TokenKind::Word, "after", 0),
        ]);
        assert_eq!(list.next_code_in_directive(ids[2]), Some(ids[5]));
        // the directive's own newline is returned
        assert_eq!(list.next_code_in_directive(ids[5]), Some(ids[7]));
        // outside a directive this is plain next_code
        assert_eq!(list.next_code_in_directive(ids[7]), Some(ids[8]));
        // plain next_code cannot leave the directive
        assert_eq!(list.next_code(ids[5], Scope::All), None);
    }

    #[test]
    fn test_stacked_square_groups() {
        let (list, ids) = build(vec![
            chunk(TokenKind::Word, "m", 0),
            chunk(TokenKind::SquareOpen, "[", 0),
            chunk(TokenKind::Number, "2", 1),
            chunk(TokenKind::SquareClose, "]", 0),
            chunk(TokenKind::Tsquare, "[]", 0),
            chunk(TokenKind::SquareOpen, "[", 0),
            chunk(TokenKind::Number, "3", 1),
            chunk(TokenKind::SquareClose, "]", 0),
            chunk(TokenKind::Assign, "=", 0),
        ]);
        assert_eq!(list.next_outside_squares(ids[1], Scope::All), Some(ids[8]));
        assert_eq!(list.next_outside_squares(ids[0], Scope::All), Some(ids[8]));
        assert_eq!(list.skip_square_groups(ids[1]), Some(ids[8]));
        assert_eq!(list.skip_square_groups(ids[0]), Some(ids[0]));
        assert_eq!(list.skip_square_groups_rev(ids[7]), Some(ids[0]));
    }

    #[test]
    fn test_unbalanced_squares_yield_none() {
        let (list, ids) = build(vec![
            chunk(TokenKind::SquareOpen, "[", 0),
            chunk(TokenKind::Word, "a", 1),
        ]);
        assert_eq!(list.next_outside_squares(ids[0], Scope::All), None);
        assert_eq!(list.matching_delimiter(ids[0], Scope::All), None);
    }

    #[test]
    fn test_matching_delimiter_passthrough_and_rev() {
        let (list, ids) = build(vec![
            chunk(TokenKind::BraceOpen, "{", 0),
            chunk(TokenKind::VbraceOpen, "", 1),
            chunk(TokenKind::Word, "x", 2),
            chunk(TokenKind::VbraceClose, "", 1),
            chunk(TokenKind::BraceClose, "}", 0),
        ]);
        assert_eq!(list.matching_delimiter(ids[0], Scope::All), Some(ids[4]));
        assert_eq!(list.matching_delimiter(ids[1], Scope::All), Some(ids[3]));
        assert_eq!(list.matching_delimiter_rev(ids[4], Scope::All), Some(ids[0]));
        assert_eq!(list.matching_delimiter(ids[2], Scope::All), Some(ids[2]));
        assert_eq!(list.matching_delimiter(None, Scope::All), None);
    }

    #[test]
    fn test_kind_and_text_search() {
        let (list, ids) = build(vec![
            chunk(TokenKind::Word, "Foo", 0),
            chunk(TokenKind::ParenOpen, "(", 0),
            chunk(TokenKind::Word, "foo", 1),
            chunk(TokenKind::ParenClose, ")", 0),
            chunk(TokenKind::Word, "foo", 0),
        ]);
        assert_eq!(list.next_of_kind(ids[0], TokenKind::Word, Level::Any, Scope::All), Some(ids[2]));
        assert_eq!(list.next_of_kind(ids[0], TokenKind::Word, Level::Exact(0), Scope::All), Some(ids[4]));
        assert_eq!(list.prev_of_kind(ids[4], TokenKind::Word, Level::from_signed(-1), Scope::All), Some(ids[2]));

        assert_eq!(list.next_with_text(ids[0], "foo", Level::Exact(0), Scope::All), Some(ids[4]));
        assert_eq!(list.prev_with_text(ids[4], "Foo", Level::Any, Scope::All), Some(ids[0]));
        assert_eq!(list.prev_with_text_ignore_case(ids[2], "FOO", Level::Any, Scope::All), Some(ids[0]));
        assert_eq!(list.next_with_text_ignore_case(ids[0], "FOO", Level::Exact(1), Scope::All), Some(ids[2]));
        assert_eq!(list.next_with_text(ids[0], "", Level::Any, Scope::All), None);
        assert_eq!(list.next_with_text(ids[0], "bar", Level::Any, Scope::All), None);
    }

    #[test]
    fn test_parent_kind_search() {
        let (list, ids) = build(vec![
            chunk(TokenKind::Word, "f", 0),
            chunk(TokenKind::FparenOpen, "(", 0).with_parent_kind(TokenKind::FuncCall),
            chunk(TokenKind::FparenClose, ")", 0).with_parent_kind(TokenKind::FuncCall),
        ]);
        assert_eq!(list.next_with_parent_kind(ids[0], TokenKind::FuncCall), Some(ids[1]));
        assert_eq!(list.prev_with_parent_kind(ids[2], TokenKind::FuncCall), Some(ids[1]));
        assert_eq!(list.prev_with_parent_kind(ids[1], TokenKind::FuncCall), None);
    }

    #[test]
    fn test_directive_start() {
        let (list, ids) = build(vec![
            chunk(TokenKind::Word, "a", 0),
            Chunk::newline(),
            chunk(TokenKind::Preproc, "#", 0).in_preproc(),
            chunk(TokenKind::PpIf, "if", 0).in_preproc(),
            chunk(TokenKind::Word, "X", 0).in_preproc(),
            Chunk::newline(),
            chunk(TokenKind::Word, "Y", 0).in_preproc(),
        ]);
        assert_eq!(list.directive_start(ids[4]), Some(ids[2]));
        assert_eq!(list.directive_start(ids[2]), Some(ids[2]));
        assert_eq!(list.directive_start(ids[0]), None);
        // malformed run without `#`
        assert_eq!(list.directive_start(ids[6]), Some(ids[6]));
    }

    #[test]
    fn test_line_queries() {
        let (list, ids) = build(vec![
            chunk(TokenKind::Word, "a", 0),
            chunk(TokenKind::Word, "b", 0),
            chunk(TokenKind::NlCont, "\\\n", 0),
            chunk(TokenKind::Word, "c", 0),
            Chunk::newline(),
            chunk(TokenKind::Word, "d", 0),
        ]);
        assert_eq!(list.first_on_line(ids[1]), Some(ids[0]));
        assert_eq!(list.first_on_line(ids[3]), Some(ids[3]));
        assert_eq!(list.first_on_line(ids[5]), Some(ids[5]));
        assert_eq!(text_of(&list, list.first_on_line(ids[4])), Some("c"));

        assert!(list.is_last_on_line(ids[1]));
        assert!(!list.is_last_on_line(ids[0]));
        assert!(list.is_last_on_line(ids[5]));

        // only a hard newline splits lines
        assert!(list.are_in_same_line(ids[0], ids[3]));
        assert!(list.are_in_same_line(ids[3], ids[0]));
        assert!(!list.are_in_same_line(ids[0], ids[5]));
        assert!(!list.are_in_same_line(ids[0], None));

        assert!(list.is_newline_between(ids[0], ids[3]));
        assert!(!list.is_newline_between(ids[0], ids[1]));
        assert!(list.is_newline_between(ids[5], ids[3]));
    }

    #[test]
    fn test_scope_chain() {
        let (list, ids) = build(vec![
            chunk(TokenKind::Word, "std", 0),
            chunk(TokenKind::DcMember, "::", 0),
            chunk(TokenKind::Word, "chrono", 0),
            chunk(TokenKind::DcMember, "::", 0),
            chunk(TokenKind::Type, "seconds", 0),
            chunk(TokenKind::Word, "s", 0),
        ]);
        assert_eq!(list.skip_scope_chain(ids[0], Scope::All), Some(ids[4]));
        assert_eq!(list.skip_scope_chain(ids[1], Scope::All), Some(ids[4]));
        assert_eq!(list.skip_scope_chain(ids[5], Scope::All), Some(ids[5]));
        assert_eq!(list.skip_scope_chain_rev(ids[4], Scope::All), Some(ids[0]));
    }

    #[test]
    fn test_walk() {
        let (list, ids) = build(vec![
            chunk(TokenKind::Word, "a", 0),
            chunk(TokenKind::Word, "b", 0),
            chunk(TokenKind::Word, "c", 0),
        ]);
        let forward: Vec<ChunkId> = list.walk(ids[0], Scope::All, Direction::Forward).collect();
        assert_eq!(forward, vec![ids[1], ids[2]]);
        let backward: Vec<ChunkId> = list.walk(ids[2], Scope::All, Direction::Backward).collect();
        assert_eq!(backward, vec![ids[1], ids[0]]);
    }
}
