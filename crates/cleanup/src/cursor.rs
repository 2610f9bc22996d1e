//! Neighbour lookups and chunk fusion shared by the passes.
//!
//! Passes look at code neighbours without crossing a directive boundary in
//! either direction: a chunk inside `#define` never pairs with one outside it,
//! and a chunk outside never skips over a whole directive to find a partner.

use reflow_chunks::{Chunk, ChunkError, ChunkId, ChunkList, Direction, TokenKind};

use crate::error::Result;

/// Ids of every code chunk, head to tail.
///
/// Taken before a pass mutates; ids deleted along the way simply stop
/// resolving and fail every `is_*` check.
pub(crate) fn code_chunks(list: &ChunkList) -> Vec<ChunkId> {
    list.iter().filter(|(_, c)| c.is_code()).map(|(id, _)| id).collect()
}

pub(crate) fn next_adjacent_code(list: &ChunkList, cur: impl Into<Option<ChunkId>>) -> Option<ChunkId> {
    adjacent_code(list, cur.into()?, Direction::Forward)
}

pub(crate) fn prev_adjacent_code(list: &ChunkList, cur: impl Into<Option<ChunkId>>) -> Option<ChunkId> {
    adjacent_code(list, cur.into()?, Direction::Backward)
}

fn adjacent_code(list: &ChunkList, cur: ChunkId, direction: Direction) -> Option<ChunkId> {
    let inside = list.get(cur)?.is_preproc();
    let mut cursor = cur;
    loop {
        cursor = match direction {
            Direction::Forward => list.next_raw(cursor),
            Direction::Backward => list.prev_raw(cursor),
        }?;
        let chunk = list.get(cursor)?;
        if chunk.is_preproc() != inside {
            return None;
        }
        if chunk.is_code() {
            return Some(cursor);
        }
    }
}

/// `b` starts on the same source line exactly where `a` ends
pub(crate) fn touching(list: &ChunkList, a: ChunkId, b: ChunkId) -> bool {
    match (list.get(a), list.get(b)) {
        (Some(a), Some(b)) => a.orig.line == b.orig.line && a.orig_col_end == b.orig.column,
        _ => false,
    }
}

/// Fold `next` into `id` under a new kind.
///
/// The text of `next` is appended after `separator`, its end column is taken
/// over and `next` is deleted.
#[track_caller]
pub(crate) fn absorb_next(
    list: &mut ChunkList,
    id: ChunkId,
    next: ChunkId,
    kind: TokenKind,
    separator: &str,
) -> Result<()> {
    if !list.contains(next) {
        return Err(ChunkError::StaleChunk(next).into());
    }
    list.set_kind(id, kind)?;
    let absorbed = list.delete(next).ok_or(ChunkError::StaleChunk(next))?;
    let chunk = list.get_mut(id).ok_or(ChunkError::StaleChunk(id))?;
    chunk.text.push_str(separator);
    chunk.text.push_str(absorbed.text());
    chunk.orig_col_end = absorbed.orig_col_end;
    Ok(())
}

/// Text of a chunk, or empty when the id does not resolve
pub(crate) fn text_of(list: &ChunkList, id: impl Into<Option<ChunkId>>) -> String {
    list.get(id).map(|c: &Chunk| c.text.clone()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::line;

    #[test]
    fn test_adjacent_code_skips_comments_and_newlines() {
        let mut list = ChunkList::new();
        let ids = line(
            &mut list,
            &[
                (TokenKind::Word, "a"),
                (TokenKind::Comment, "/* x */"),
                (TokenKind::Newline, "\n"),
                (TokenKind::Word, "b"),
            ],
        );
        assert_eq!(next_adjacent_code(&list, ids[0]), Some(ids[3]));
        assert_eq!(prev_adjacent_code(&list, ids[3]), Some(ids[0]));
        assert_eq!(next_adjacent_code(&list, ids[3]), None);
    }

    #[test]
    fn test_adjacent_code_stops_at_directive_boundary() {
        let mut list = ChunkList::new();
        let before = list.push_back(Chunk::new(TokenKind::Word, "a").at(1, 1));
        list.push_back(Chunk::newline().at(1, 2));
        let hash = list.push_back(Chunk::new(TokenKind::Preproc, "#").at(2, 1).in_preproc());
        let body = list.push_back(Chunk::new(TokenKind::PreprocBody, "x").at(2, 3).in_preproc());
        list.push_back(Chunk::newline().at(2, 4));
        let after = list.push_back(Chunk::new(TokenKind::Word, "b").at(3, 1));

        assert_eq!(next_adjacent_code(&list, before), None);
        assert_eq!(next_adjacent_code(&list, hash), Some(body));
        assert_eq!(next_adjacent_code(&list, body), None);
        assert_eq!(prev_adjacent_code(&list, after), None);
    }

    #[test]
    fn test_absorb_next_takes_text_and_end_column() {
        let mut list = ChunkList::new();
        let ids = line(&mut list, &[(TokenKind::For, "for"), (TokenKind::Word, "each")]);

        absorb_next(&mut list, ids[0], ids[1], TokenKind::For, " ").unwrap();

        assert_eq!(list.len(), 1);
        assert_eq!(list[ids[0]].text(), "for each");
        assert_eq!(list[ids[0]].orig_col_end, 9);
        assert!(!list.contains(ids[1]));
    }

    #[test]
    fn test_absorb_stale_next_changes_nothing() {
        let mut list = ChunkList::new();
        let ids = line(&mut list, &[(TokenKind::Colon, ":"), (TokenKind::Assign, "=")]);
        list.delete(ids[1]);

        assert!(absorb_next(&mut list, ids[0], ids[1], TokenKind::SqlAssign, "").is_err());
        assert_eq!(list[ids[0]].kind(), TokenKind::Colon);
    }
}
