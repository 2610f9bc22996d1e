use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign, Not};

/// Bitset of orthogonal facts recorded on a chunk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChunkFlags(u64);

impl ChunkFlags {
    pub const NONE: ChunkFlags = ChunkFlags(0);

    /// Part of a preprocessor directive
    pub const IN_PREPROC: ChunkFlags = ChunkFlags(1 << 0);
    pub const IN_STRUCT: ChunkFlags = ChunkFlags(1 << 1);
    pub const IN_ENUM: ChunkFlags = ChunkFlags(1 << 2);
    pub const IN_FCN_DEF: ChunkFlags = ChunkFlags(1 << 3);
    pub const IN_FCN_CALL: ChunkFlags = ChunkFlags(1 << 4);
    pub const IN_SPAREN: ChunkFlags = ChunkFlags(1 << 5);
    /// Inside a template/generic argument list
    pub const IN_TEMPLATE: ChunkFlags = ChunkFlags(1 << 6);
    pub const IN_TYPEDEF: ChunkFlags = ChunkFlags(1 << 7);
    pub const IN_CLASS: ChunkFlags = ChunkFlags(1 << 8);
    pub const IN_CLASS_BASE: ChunkFlags = ChunkFlags(1 << 9);
    pub const IN_NAMESPACE: ChunkFlags = ChunkFlags(1 << 10);
    pub const IN_FOR: ChunkFlags = ChunkFlags(1 << 11);
    pub const IN_DECLTYPE: ChunkFlags = ChunkFlags(1 << 12);
    pub const IN_ARRAY_ASSIGN: ChunkFlags = ChunkFlags(1 << 13);
    pub const STMT_START: ChunkFlags = ChunkFlags(1 << 14);
    pub const EXPR_START: ChunkFlags = ChunkFlags(1 << 15);
    pub const VAR_TYPE: ChunkFlags = ChunkFlags(1 << 16);
    pub const VAR_DEF: ChunkFlags = ChunkFlags(1 << 17);
    pub const PUNCTUATOR: ChunkFlags = ChunkFlags(1 << 18);
    pub const KEEP_BRACE: ChunkFlags = ChunkFlags(1 << 19);
    pub const ONE_LINER: ChunkFlags = ChunkFlags(1 << 20);
    pub const EMPTY_BODY: ChunkFlags = ChunkFlags(1 << 21);
    pub const DONT_INDENT: ChunkFlags = ChunkFlags(1 << 22);
    pub const WAS_ALIGNED: ChunkFlags = ChunkFlags(1 << 23);

    const NAMES: [(ChunkFlags, &'static str); 24] = [
        (Self::IN_PREPROC, "IN_PREPROC"),
        (Self::IN_STRUCT, "IN_STRUCT"),
        (Self::IN_ENUM, "IN_ENUM"),
        (Self::IN_FCN_DEF, "IN_FCN_DEF"),
        (Self::IN_FCN_CALL, "IN_FCN_CALL"),
        (Self::IN_SPAREN, "IN_SPAREN"),
        (Self::IN_TEMPLATE, "IN_TEMPLATE"),
        (Self::IN_TYPEDEF, "IN_TYPEDEF"),
        (Self::IN_CLASS, "IN_CLASS"),
        (Self::IN_CLASS_BASE, "IN_CLASS_BASE"),
        (Self::IN_NAMESPACE, "IN_NAMESPACE"),
        (Self::IN_FOR, "IN_FOR"),
        (Self::IN_DECLTYPE, "IN_DECLTYPE"),
        (Self::IN_ARRAY_ASSIGN, "IN_ARRAY_ASSIGN"),
        (Self::STMT_START, "STMT_START"),
        (Self::EXPR_START, "EXPR_START"),
        (Self::VAR_TYPE, "VAR_TYPE"),
        (Self::VAR_DEF, "VAR_DEF"),
        (Self::PUNCTUATOR, "PUNCTUATOR"),
        (Self::KEEP_BRACE, "KEEP_BRACE"),
        (Self::ONE_LINER, "ONE_LINER"),
        (Self::EMPTY_BODY, "EMPTY_BODY"),
        (Self::DONT_INDENT, "DONT_INDENT"),
        (Self::WAS_ALIGNED, "WAS_ALIGNED"),
    ];

    #[must_use]
    pub const fn bits(self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True when every bit of `other` is set
    #[must_use]
    pub const fn contains(self, other: ChunkFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// True when any bit of `other` is set
    #[must_use]
    pub const fn intersects(self, other: ChunkFlags) -> bool {
        self.0 & other.0 != 0
    }

    /// Clear `clear`, then set `set`
    #[must_use]
    pub const fn updated(self, clear: ChunkFlags, set: ChunkFlags) -> ChunkFlags {
        ChunkFlags((self.0 & !clear.0) | set.0)
    }

    /// Names of the set flags, in bit order
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        Self::NAMES
            .into_iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, name)| name)
    }
}

impl BitOr for ChunkFlags {
    type Output = ChunkFlags;

    fn bitor(self, rhs: ChunkFlags) -> ChunkFlags {
        ChunkFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for ChunkFlags {
    fn bitor_assign(&mut self, rhs: ChunkFlags) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for ChunkFlags {
    type Output = ChunkFlags;

    fn bitand(self, rhs: ChunkFlags) -> ChunkFlags {
        ChunkFlags(self.0 & rhs.0)
    }
}

impl Not for ChunkFlags {
    type Output = ChunkFlags;

    fn not(self) -> ChunkFlags {
        ChunkFlags(!self.0)
    }
}

impl fmt::Display for ChunkFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("-");
        }
        let names: Vec<&str> = self.names().collect();
        f.write_str(&names.join("|"))
    }
}
