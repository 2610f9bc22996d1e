//! Tracked mutation of chunk kind, parent kind, flags and parent link.
//!
//! Every setter is `#[track_caller]`: the source location of the pass that
//! made the change is logged at trace level and, when enabled, appended to
//! the list's bounded [`ProvenanceLog`].

use std::collections::VecDeque;
use std::fmt;
use std::panic::Location;

use crate::chunk::ChunkId;
use crate::error::{ChunkError, Result};
use crate::flags::ChunkFlags;
use crate::store::ChunkList;
use crate::token::TokenKind;

/// Source location of the code that requested a change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Origin {
    pub file: &'static str,
    pub line: u32,
    pub column: u32,
}

impl Origin {
    #[track_caller]
    fn caller() -> Self {
        let location = Location::caller();
        Self {
            file: location.file(),
            line: location.line(),
            column: location.column(),
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// What a tracked setter changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Kind { from: TokenKind, to: TokenKind },
    ParentKind { from: TokenKind, to: TokenKind },
    Flags { from: ChunkFlags, to: ChunkFlags },
    ParentChunk { from: Option<ChunkId>, to: Option<ChunkId> },
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Change::Kind { from, to } => write!(f, "kind {from} -> {to}"),
            Change::ParentKind { from, to } => write!(f, "parent kind {from} -> {to}"),
            Change::Flags { from, to } => write!(f, "flags {from} -> {to}"),
            Change::ParentChunk { from, to } => {
                let show = |id: &Option<ChunkId>| id.map_or_else(|| "-".to_string(), |id| id.to_string());
                write!(f, "parent chunk {} -> {}", show(from), show(to))
            }
        }
    }
}

/// One recorded change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvenanceRecord {
    pub chunk: ChunkId,
    pub change: Change,
    pub origin: Origin,
}

impl fmt::Display for ProvenanceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.chunk, self.change, self.origin)
    }
}

/// Bounded history of tracked changes, oldest first
#[derive(Debug, Clone, Default)]
pub struct ProvenanceLog {
    enabled: bool,
    capacity: usize,
    records: VecDeque<ProvenanceRecord>,
    dropped: usize,
}

impl ProvenanceLog {
    pub fn new(enabled: bool, capacity: usize) -> Self {
        Self {
            enabled,
            capacity,
            records: VecDeque::new(),
            dropped: 0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Start or stop recording; already recorded changes are kept
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn records(&self) -> impl Iterator<Item = &ProvenanceRecord> {
        self.records.iter()
    }

    /// Changes made to one chunk, oldest first
    pub fn records_for(&self, chunk: ChunkId) -> impl Iterator<Item = &ProvenanceRecord> {
        self.records.iter().filter(move |record| record.chunk == chunk)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records evicted because the log was full
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.dropped = 0;
    }

    fn push(&mut self, record: ProvenanceRecord) {
        if !self.enabled || self.capacity == 0 {
            return;
        }
        if self.records.len() == self.capacity {
            self.records.pop_front();
            self.dropped += 1;
        }
        self.records.push_back(record);
    }
}

impl ChunkList {
    /// Change a chunk's kind
    #[track_caller]
    pub fn set_kind(&mut self, id: ChunkId, kind: TokenKind) -> Result<()> {
        let origin = Origin::caller();
        let idx = self.resolve(id)?;
        let chunk = self.chunk_at_mut(idx).ok_or(ChunkError::StaleChunk(id))?;
        let from = chunk.kind();
        chunk.set_kind_raw(kind);
        self.record(id, Change::Kind { from, to: kind }, origin);
        Ok(())
    }

    /// Change the kind of the construct a chunk belongs to
    #[track_caller]
    pub fn set_parent_kind(&mut self, id: ChunkId, kind: TokenKind) -> Result<()> {
        let origin = Origin::caller();
        let idx = self.resolve(id)?;
        let chunk = self.chunk_at_mut(idx).ok_or(ChunkError::StaleChunk(id))?;
        let from = chunk.parent_kind();
        chunk.set_parent_kind_raw(kind);
        self.record(id, Change::ParentKind { from, to: kind }, origin);
        Ok(())
    }

    /// Clear the `clear` bits, then set the `set` bits, as one change
    #[track_caller]
    pub fn update_flags(&mut self, id: ChunkId, clear: ChunkFlags, set: ChunkFlags) -> Result<()> {
        let origin = Origin::caller();
        let idx = self.resolve(id)?;
        let chunk = self.chunk_at_mut(idx).ok_or(ChunkError::StaleChunk(id))?;
        let from = chunk.flags();
        let to = from.updated(clear, set);
        chunk.set_flags_raw(to);
        self.record(id, Change::Flags { from, to }, origin);
        Ok(())
    }

    #[track_caller]
    pub fn set_flags(&mut self, id: ChunkId, set: ChunkFlags) -> Result<()> {
        self.update_flags(id, ChunkFlags::NONE, set)
    }

    #[track_caller]
    pub fn clear_flags(&mut self, id: ChunkId, clear: ChunkFlags) -> Result<()> {
        self.update_flags(id, clear, ChunkFlags::NONE)
    }

    /// Link a chunk to the chunk governing it (or unlink with `None`)
    #[track_caller]
    pub fn set_parent_chunk(&mut self, id: ChunkId, parent: impl Into<Option<ChunkId>>) -> Result<()> {
        let origin = Origin::caller();
        let parent = parent.into();
        if parent == Some(id) {
            return Err(ChunkError::SelfReference(id));
        }
        if let Some(parent) = parent {
            self.resolve(parent)?;
        }
        let idx = self.resolve(id)?;
        let chunk = self.chunk_at_mut(idx).ok_or(ChunkError::StaleChunk(id))?;
        let from = chunk.parent;
        chunk.parent = parent;
        self.record(id, Change::ParentChunk { from, to: parent }, origin);
        Ok(())
    }

    fn record(&mut self, chunk: ChunkId, change: Change, origin: Origin) {
        log::trace!("{origin}: {chunk} {change}");
        self.provenance.push(ProvenanceRecord { chunk, change, origin });
    }
}
