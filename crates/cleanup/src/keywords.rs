//! Passes that settle keyword kinds the tokenizer could only guess

use reflow_chunks::{Chunk, ChunkError, ChunkFlags, ChunkId, ChunkList, Language, Scope, TokenKind};

use crate::cursor::{absorb_next, code_chunks, next_adjacent_code, prev_adjacent_code};
use crate::error::Result;

/// Mark `enum class` and the words that must be type names.
///
/// - ENUM followed by STRUCT or CLASS: the second keyword becomes ENUM_CLASS
/// - WORD after ENUM, ENUM_CLASS, UNION, STRUCT or CLASS becomes TYPE
/// - WORD followed by WORD: the first becomes TYPE
///
/// In C++ attributes between the keyword and the name are skipped.
pub fn mark_enum_class_and_types(list: &mut ChunkList) -> Result<usize> {
    let skip_attributes = list.languages().contains(Language::Cpp);

    let mut changed = 0;
    for id in code_chunks(list) {
        let Some(next) = next_adjacent_code(list, id) else {
            continue;
        };
        if list.is_kind(id, TokenKind::Enum) && list.is(next, Chunk::is_class_or_struct) {
            list.set_kind(next, TokenKind::EnumClass)?;
            changed += 1;
        }

        let name = if skip_attributes { skip_attributes_forward(list, next) } else { Some(next) };
        let Some(name) = name.filter(|n| list.is_kind(*n, TokenKind::Word)) else {
            continue;
        };
        let Some(chunk) = list.get(id) else {
            continue;
        };
        if chunk.is_class_enum_struct_union() {
            list.set_kind(name, TokenKind::Type)?;
            changed += 1;
        } else if chunk.kind() == TokenKind::Word {
            list.set_kind(id, TokenKind::Type)?;
            changed += 1;
        }
    }
    Ok(changed)
}

/// First chunk from `cur` on that is not an attribute or its argument list
fn skip_attributes_forward(list: &ChunkList, mut cur: ChunkId) -> Option<ChunkId> {
    while list.is(cur, Chunk::is_attribute_or_declspec) {
        let mut after = next_adjacent_code(list, cur)?;
        if list.is(after, Chunk::is_paren_open) {
            let close = list.matching_delimiter(after, Scope::All)?;
            after = next_adjacent_code(list, close)?;
        }
        cur = after;
    }
    Some(cur)
}

/// Resolve what an access keyword is doing.
///
/// `public:` (or Qt's `public slots:`) turns the colon into ACCESS_COLON and
/// marks the next code chunk as the start of a statement. Without a colon the
/// keyword is a QUALIFIER, except Qt's `signals`, which is a plain WORD.
pub fn classify_access_specifiers(list: &mut ChunkList) -> Result<usize> {
    let mut changed = 0;
    for id in code_chunks(list) {
        if !list.is_kind(id, TokenKind::Access) {
            continue;
        }
        let mut next = next_adjacent_code(list, id);
        if list.is(next, |c| c.is_str("slots") || c.is_str("Q_SLOTS")) {
            let after = next_adjacent_code(list, next);
            if list.is_kind(after, TokenKind::Colon) {
                next = after;
            }
        }

        match next.filter(|colon| list.is_kind(*colon, TokenKind::Colon)) {
            Some(colon) => {
                list.set_kind(colon, TokenKind::AccessColon)?;
                if let Some(start) = next_adjacent_code(list, colon) {
                    list.set_flags(start, ChunkFlags::STMT_START | ChunkFlags::EXPR_START)?;
                }
            }
            None => {
                let kind = if list.is(id, |c| c.is_str("signals") || c.is_str("Q_SIGNALS")) {
                    TokenKind::Word
                } else {
                    TokenKind::Qualifier
                };
                list.set_kind(id, kind)?;
            }
        }
        changed += 1;
    }
    Ok(changed)
}

/// Fuse C++/CLI `for each` and mark the `in` of its header
pub fn merge_for_each(list: &mut ChunkList) -> Result<usize> {
    let mut changed = 0;
    for id in code_chunks(list) {
        if !list.is_kind(id, TokenKind::For) {
            continue;
        }
        let Some(each) = list.next_raw(id).filter(|e| list.is(*e, |c| c.is_str("each"))) else {
            continue;
        };
        absorb_next(list, id, each, TokenKind::For, " ")?;
        changed += 1;

        let open = next_adjacent_code(list, id);
        if !list.is(open, Chunk::is_paren_open) {
            continue;
        }
        let mut cursor = next_adjacent_code(list, open);
        while let Some(cur) = cursor {
            let Some(chunk) = list.get(cur) else {
                break;
            };
            if chunk.is_paren_close() {
                break;
            }
            if chunk.is_str("in") {
                list.set_kind(cur, TokenKind::In)?;
                changed += 1;
                break;
            }
            cursor = next_adjacent_code(list, cur);
        }
    }
    Ok(changed)
}

/// D: `static if` becomes one IF chunk starting where `static` started
pub fn merge_static_if(list: &mut ChunkList) -> Result<usize> {
    if !list.languages().contains(Language::D) {
        return Ok(0);
    }

    let mut merged = 0;
    for id in code_chunks(list) {
        if !list.is_kind(id, TokenKind::If) {
            continue;
        }
        let Some(prev) = prev_adjacent_code(list, id).filter(|p| list.is(*p, |c| c.is_str("static"))) else {
            continue;
        };
        let prefix = list.delete(prev).ok_or(ChunkError::StaleChunk(prev))?;
        let chunk = list.get_mut(id).ok_or(ChunkError::StaleChunk(id))?;
        chunk.text = format!("{} {}", prefix.text(), chunk.text);
        chunk.orig = prefix.orig;
        chunk.column = prefix.column;
        merged += 1;
    }
    Ok(merged)
}
