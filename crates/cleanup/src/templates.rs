//! Passes over C++ template declarations and function signatures

use reflow_chunks::{ChunkId, ChunkList, Level, Scope, TokenKind};

use crate::cursor::{code_chunks, next_adjacent_code, prev_adjacent_code, text_of};
use crate::error::Result;

/// Spread PARAMETER_PACK to every use of a pack name.
///
/// A template declaration runs from `template` to the next `;` on the same
/// level. Once a chunk in it is a PARAMETER_PACK, every later chunk with the
/// same text up to that `;` becomes one too.
pub fn mark_parameter_packs(list: &mut ChunkList) -> Result<usize> {
    let mut marked = 0;
    let mut cursor = list.head();
    while let Some(id) = cursor {
        if !list.is_kind(id, TokenKind::Template) {
            cursor = list.next_raw(id);
            continue;
        }
        let level = list.get(id).map_or(0, |c| c.level);
        let end = list.next_of_kind(id, TokenKind::Semicolon, Level::Exact(level), Scope::All);
        marked += mark_packs_between(list, id, end)?;
        cursor = end.and_then(|end| list.next_raw(end));
    }
    Ok(marked)
}

fn mark_packs_between(list: &mut ChunkList, start: ChunkId, end: Option<ChunkId>) -> Result<usize> {
    let mut marked = 0;
    let mut cursor = list.next(start, Scope::All);
    while let Some(pack) = cursor.filter(|c| Some(*c) != end) {
        if list.is_kind(pack, TokenKind::ParameterPack) {
            let name = text_of(list, pack);
            let mut inner = list.next(pack, Scope::All);
            while let Some(cur) = inner.filter(|c| Some(*c) != end) {
                if list.is(cur, |c| c.text == name && c.kind() != TokenKind::ParameterPack) {
                    list.set_kind(cur, TokenKind::ParameterPack)?;
                    marked += 1;
                }
                inner = list.next(cur, Scope::All);
            }
        }
        cursor = list.next(pack, Scope::All);
    }
    Ok(marked)
}

/// Mark `->` introducing a trailing return type.
///
/// The arrow must follow a function's parameter list, optionally with a
/// qualifier and a `noexcept`/`throw` specification in between. The arrow
/// becomes TRAILING_RET, a WORD after it becomes TYPE and a `*` after that
/// becomes PTR_TYPE.
pub fn mark_trailing_return_types(list: &mut ChunkList) -> Result<usize> {
    let mut marked = 0;
    for id in code_chunks(list) {
        if !list.is(id, |c| c.is(TokenKind::Member) && c.is_str("->")) {
            continue;
        }
        let params = parameter_list_before(list, id);
        let is_signature = list.is(params, |c| {
            c.is(TokenKind::FparenClose) && matches!(c.parent_kind(), TokenKind::FuncProto | TokenKind::FuncDef)
        });
        if !is_signature {
            continue;
        }
        list.set_kind(id, TokenKind::TrailingRet)?;
        marked += 1;

        let Some(ty) = next_adjacent_code(list, id) else {
            continue;
        };
        if !list.is_kind(ty, TokenKind::Word) {
            continue;
        }
        list.set_kind(ty, TokenKind::Type)?;
        marked += 1;

        let star = next_adjacent_code(list, ty).filter(|s| {
            list.is(*s, |c| matches!(c.kind(), TokenKind::Arith | TokenKind::Star) && c.text.starts_with('*'))
        });
        if let Some(star) = star {
            list.set_kind(star, TokenKind::PtrType)?;
            marked += 1;
        }
    }
    Ok(marked)
}

/// Walk back from `->` over `const`, `noexcept` and `throw(...)`
fn parameter_list_before(list: &ChunkList, arrow: ChunkId) -> Option<ChunkId> {
    let mut cur = prev_adjacent_code(list, arrow)?;
    match list.get(cur)?.kind() {
        TokenKind::Qualifier => cur = prev_adjacent_code(list, cur)?,
        TokenKind::Noexcept => {
            cur = prev_adjacent_code(list, cur)?;
            if list.is_kind(cur, TokenKind::Qualifier) {
                cur = prev_adjacent_code(list, cur)?;
            }
        }
        TokenKind::ParenClose => {
            let open = list.matching_delimiter_rev(cur, Scope::All)?;
            let spec = prev_adjacent_code(list, open)?;
            if matches!(list.get(spec)?.kind(), TokenKind::Noexcept | TokenKind::Throw) {
                cur = prev_adjacent_code(list, spec)?;
                if list.is_kind(cur, TokenKind::Qualifier) {
                    cur = prev_adjacent_code(list, cur)?;
                }
            }
        }
        _ => {}
    }
    Some(cur)
}
