//! Passes over preprocessor directives

use reflow_chunks::{Chunk, ChunkList, Scope, TokenKind};

use crate::cursor::{code_chunks, next_adjacent_code, prev_adjacent_code};
use crate::error::Result;

/// Warn about every directive whose last code chunk is a semicolon.
///
/// `#define FOO(x) bar(x);` usually ends up doubled (`FOO(1);;`) at the use
/// site. Returns the number of warnings.
pub fn warn_macro_trailing_semicolon(list: &ChunkList) -> usize {
    let mut warnings = 0;
    for (id, chunk) in list {
        if chunk.is(TokenKind::Semicolon) && chunk.is_preproc() && list.next_code(id, Scope::Preproc).is_none() {
            log::warn!("{}: macro definition ends with a semicolon", chunk.orig);
            warnings += 1;
        }
    }
    warnings
}

/// Every `#` takes the kind of the chunk after it as its parent kind, so
/// `#define` and `#if` can be told apart from the `#` alone.
pub fn mark_directive_parents(list: &mut ChunkList) -> Result<usize> {
    let mut marked = 0;
    for id in code_chunks(list) {
        if !list.is_kind(id, TokenKind::Preproc) {
            continue;
        }
        let Some(kind) = list.get(next_adjacent_code(list, id)).map(Chunk::kind) else {
            continue;
        };
        list.set_parent_kind(id, kind)?;
        marked += 1;
    }
    Ok(marked)
}

/// `#pragma region` / `#pragma endregion` get their own directive kinds.
///
/// The pragma keyword becomes PP_REGION or PP_ENDREGION and the `#` that
/// opens the directive takes that kind as its parent kind.
pub fn mark_pragma_regions(list: &mut ChunkList) -> Result<usize> {
    let mut marked = 0;
    for id in code_chunks(list) {
        if !list.is_kind(id, TokenKind::PpPragma) {
            continue;
        }
        let body = next_adjacent_code(list, id);
        let Some(kind) = list
            .get(body)
            .filter(|c| c.is(TokenKind::PreprocBody))
            .and_then(|c: &Chunk| region_kind(c.text()))
        else {
            continue;
        };
        list.set_kind(id, kind)?;
        if let Some(hash) = prev_adjacent_code(list, id).filter(|h| list.is_kind(*h, TokenKind::Preproc)) {
            list.set_parent_kind(hash, kind)?;
        }
        marked += 1;
    }
    Ok(marked)
}

fn region_kind(body: &str) -> Option<TokenKind> {
    if body.starts_with("endregion") {
        Some(TokenKind::PpEndregion)
    } else if body.starts_with("region") {
        Some(TokenKind::PpRegion)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reflow_chunks::ChunkId;

    fn directive(list: &mut ChunkList, line: usize, tokens: &[(TokenKind, &str)]) -> Vec<ChunkId> {
        let mut column = 1;
        let mut ids = Vec::new();
        for (kind, text) in tokens {
            ids.push(list.push_back(Chunk::new(*kind, *text).at(line, column).in_preproc()));
            column += text.len() + 1;
        }
        list.push_back(Chunk::newline().at(line, column));
        ids
    }

    #[test]
    fn test_trailing_semicolon_warned() {
        let mut list = ChunkList::new();
        directive(
            &mut list,
            1,
            &[
                (TokenKind::Preproc, "#"),
                (TokenKind::PpDefine, "define"),
                (TokenKind::Macro, "STOP"),
                (TokenKind::Word, "halt"),
                (TokenKind::Semicolon, ";"),
            ],
        );
        // a semicolon in ordinary code is fine
        list.push_back(Chunk::new(TokenKind::Word, "x").at(2, 1));
        list.push_back(Chunk::new(TokenKind::Semicolon, ";").at(2, 2));

        assert_eq!(warn_macro_trailing_semicolon(&list), 1);
    }

    #[test]
    fn test_virtual_semicolon_not_warned() {
        let mut list = ChunkList::new();
        directive(
            &mut list,
            1,
            &[
                (TokenKind::Preproc, "#"),
                (TokenKind::PpDefine, "define"),
                (TokenKind::Macro, "STOP"),
                (TokenKind::Word, "halt"),
                (TokenKind::Vsemicolon, ""),
            ],
        );

        assert_eq!(warn_macro_trailing_semicolon(&list), 0);
    }

    #[test]
    fn test_inner_semicolon_not_warned() {
        let mut list = ChunkList::new();
        directive(
            &mut list,
            1,
            &[
                (TokenKind::Preproc, "#"),
                (TokenKind::PpDefine, "define"),
                (TokenKind::Macro, "TWO"),
                (TokenKind::Word, "a"),
                (TokenKind::Semicolon, ";"),
                (TokenKind::Word, "b"),
            ],
        );

        assert_eq!(warn_macro_trailing_semicolon(&list), 0);
    }

    #[test]
    fn test_pragma_regions() {
        let mut list = ChunkList::new();
        let open = directive(
            &mut list,
            1,
            &[
                (TokenKind::Preproc, "#"),
                (TokenKind::PpPragma, "pragma"),
                (TokenKind::PreprocBody, "region Helpers"),
            ],
        );
        let close = directive(
            &mut list,
            5,
            &[
                (TokenKind::Preproc, "#"),
                (TokenKind::PpPragma, "pragma"),
                (TokenKind::PreprocBody, "endregion"),
            ],
        );
        let other = directive(
            &mut list,
            6,
            &[
                (TokenKind::Preproc, "#"),
                (TokenKind::PpPragma, "pragma"),
                (TokenKind::PreprocBody, "once"),
            ],
        );

        assert_eq!(mark_pragma_regions(&mut list).unwrap(), 2);
        assert_eq!(list[open[1]].kind(), TokenKind::PpRegion);
        assert_eq!(list[open[0]].parent_kind(), TokenKind::PpRegion);
        assert_eq!(list[close[1]].kind(), TokenKind::PpEndregion);
        assert_eq!(list[close[0]].parent_kind(), TokenKind::PpEndregion);
        assert_eq!(list[other[1]].kind(), TokenKind::PpPragma);
    }

    #[test]
    fn test_hash_takes_directive_kind() {
        let mut list = ChunkList::new();
        let define = directive(
            &mut list,
            1,
            &[
                (TokenKind::Preproc, "#"),
                (TokenKind::PpDefine, "define"),
                (TokenKind::Macro, "ONE"),
                (TokenKind::Number, "1"),
            ],
        );
        let include = directive(
            &mut list,
            2,
            &[(TokenKind::Preproc, "#"), (TokenKind::PpInclude, "include"), (TokenKind::PreprocBody, "<x.h>")],
        );
        let lone = directive(&mut list, 3, &[(TokenKind::Preproc, "#")]);

        assert_eq!(mark_directive_parents(&mut list).unwrap(), 2);
        assert_eq!(list[define[0]].parent_kind(), TokenKind::PpDefine);
        assert_eq!(list[include[0]].parent_kind(), TokenKind::PpInclude);
        assert_eq!(list[lone[0]].parent_kind(), TokenKind::None);
    }

    #[test]
    fn test_region_pragma_overrides_directive_parent() {
        let mut list = ChunkList::new();
        let ids = directive(
            &mut list,
            1,
            &[(TokenKind::Preproc, "#"), (TokenKind::PpPragma, "pragma"), (TokenKind::PreprocBody, "region A")],
        );

        mark_directive_parents(&mut list).unwrap();
        assert_eq!(list[ids[0]].parent_kind(), TokenKind::PpPragma);
        mark_pragma_regions(&mut list).unwrap();
        assert_eq!(list[ids[0]].parent_kind(), TokenKind::PpRegion);
    }
}
