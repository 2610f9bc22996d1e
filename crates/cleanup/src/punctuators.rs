//! Passes that fuse punctuation the tokenizer emitted as separate chunks

use reflow_chunks::{Chunk, ChunkFlags, ChunkId, ChunkList, TokenKind};

use crate::cursor::{absorb_next, code_chunks, next_adjacent_code, touching};
use crate::error::Result;

/// `[` directly followed by `]` becomes one TSQUARE `[]`
pub fn merge_empty_squares(list: &mut ChunkList) -> Result<usize> {
    let mut merged = 0;
    for id in code_chunks(list) {
        if !list.is_kind(id, TokenKind::SquareOpen) {
            continue;
        }
        let Some(close) = next_adjacent_code(list, id) else {
            continue;
        };
        if list.is_kind(close, TokenKind::SquareClose) {
            absorb_next(list, id, close, TokenKind::Tsquare, "")?;
            merged += 1;
        }
    }
    Ok(merged)
}

/// `:` followed by `=` becomes SQL_ASSIGN `:=`
pub fn merge_sql_assign(list: &mut ChunkList) -> Result<usize> {
    let mut merged = 0;
    for id in code_chunks(list) {
        if !list.is_kind(id, TokenKind::Colon) {
            continue;
        }
        let Some(next) = next_adjacent_code(list, id) else {
            continue;
        };
        if list.is_kind(next, TokenKind::Assign) {
            absorb_next(list, id, next, TokenKind::SqlAssign, "")?;
            merged += 1;
        }
    }
    Ok(merged)
}

/// `>` that closes no template: two touching ones become one SHIFT `>>`,
/// any other is a comparison
pub fn merge_double_angle_close(list: &mut ChunkList) -> Result<usize> {
    let unowned_close = |c: &Chunk| c.kind() == TokenKind::AngleClose && c.parent_kind() == TokenKind::None;

    let mut changed = 0;
    for id in code_chunks(list) {
        if !list.is(id, unowned_close) {
            continue;
        }
        let Some(next) = list.next_raw(id) else {
            continue;
        };
        if list.is(next, unowned_close) && touching(list, id, next) {
            absorb_next(list, id, next, TokenKind::Shift, "")?;
        } else {
            list.set_kind(id, TokenKind::Compare)?;
        }
        changed += 1;
    }
    Ok(changed)
}

/// Chunks that can make up the type of a conversion operator
const CONVERSION_TYPE_RUN: [TokenKind; 7] = [
    TokenKind::Word,
    TokenKind::Type,
    TokenKind::Qualifier,
    TokenKind::Star,
    TokenKind::Caret,
    TokenKind::Amp,
    TokenKind::Tsquare,
];

/// Turn whatever follows `operator` into one OPERATOR_VAL owned by the OPERATOR.
///
/// `( )` fuses into `()` and two touching `>` into `>>`. Any other punctuator
/// (`*`, `==`, a TSQUARE `[]`) is taken as it stands. Anything else starts a
/// conversion type, and the run of type words and declarator marks after it
/// is folded in, so `operator const char *` yields a single `const char *`.
pub fn mark_operator_values(list: &mut ChunkList) -> Result<usize> {
    let mut marked = 0;
    for id in code_chunks(list) {
        if !list.is_kind(id, TokenKind::Operator) {
            continue;
        }
        let Some(value) = next_adjacent_code(list, id) else {
            continue;
        };
        let Some(chunk) = list.get(value) else {
            continue;
        };
        let kind = chunk.kind();
        let punctuator = chunk.flags().contains(ChunkFlags::PUNCTUATOR) || !chunk.is_word();

        match kind {
            TokenKind::ParenOpen => {
                let Some(close) = next_adjacent_code(list, value).filter(|c| list.is_kind(*c, TokenKind::ParenClose))
                else {
                    continue;
                };
                absorb_next(list, value, close, TokenKind::OperatorVal, "")?;
            }
            _ => match list
                .next_raw(value)
                .filter(|second| kind == TokenKind::AngleClose && list.is_kind(*second, TokenKind::AngleClose))
                .filter(|second| touching(list, value, *second))
            {
                Some(second) => absorb_next(list, value, second, TokenKind::OperatorVal, "")?,
                None if punctuator => list.set_kind(value, TokenKind::OperatorVal)?,
                None => fold_conversion_type(list, value)?,
            },
        }
        list.set_parent_kind(value, TokenKind::Operator)?;
        marked += 1;
    }
    Ok(marked)
}

fn fold_conversion_type(list: &mut ChunkList, value: ChunkId) -> Result<()> {
    list.set_kind(value, TokenKind::OperatorVal)?;
    while let Some(next) = list
        .next_raw(value)
        .filter(|n| list.is(*n, |c| CONVERSION_TYPE_RUN.contains(&c.kind())))
    {
        let separator = if touching(list, value, next) { "" } else { " " };
        absorb_next(list, value, next, TokenKind::OperatorVal, separator)?;
    }
    Ok(())
}
