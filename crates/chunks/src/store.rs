use std::cmp::Ordering;
use std::ops::Index;
use std::sync::atomic::{AtomicU32, Ordering as AtomicOrdering};

use crate::chunk::{Chunk, ChunkId};
use crate::config::ChunkListConfig;
use crate::error::{ChunkError, Result};
use crate::language::LanguageSet;
use crate::provenance::ProvenanceLog;

static NEXT_LIST_ID: AtomicU32 = AtomicU32::new(1);

/// Gap left between order keys after a relabel
const ORDER_SPACING: u64 = 1 << 32;

#[derive(Debug)]
struct Entry {
    chunk: Chunk,
    prev: Option<u32>,
    next: Option<u32>,
    /// Strictly increasing along `next`
    order: u64,
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    entry: Option<Entry>,
}

/// Ordered, doubly navigable sequence of chunks for one source file.
///
/// The list owns every chunk; callers hold [`ChunkId`] handles. Slots of
/// deleted chunks are recycled with a bumped generation so old handles go
/// stale instead of aliasing new chunks.
#[derive(Debug)]
pub struct ChunkList {
    id: u32,
    slots: Vec<Slot>,
    free: Vec<u32>,
    head: Option<u32>,
    tail: Option<u32>,
    len: usize,
    /// Times every order key was rewritten
    relabels: usize,
    config: ChunkListConfig,
    pub(crate) provenance: ProvenanceLog,
}

impl Default for ChunkList {
    fn default() -> Self {
        Self::new()
    }
}

impl ChunkList {
    /// Create an empty list with the default configuration
    pub fn new() -> Self {
        Self::build(ChunkListConfig::default())
    }

    /// Create an empty list with a validated configuration
    pub fn with_config(config: ChunkListConfig) -> Result<Self> {
        config.validate().map_err(ChunkError::invalid_config)?;
        Ok(Self::build(config))
    }

    fn build(config: ChunkListConfig) -> Self {
        let provenance = ProvenanceLog::new(config.record_provenance, config.provenance_capacity);
        Self {
            id: NEXT_LIST_ID.fetch_add(1, AtomicOrdering::Relaxed),
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
            relabels: 0,
            config,
            provenance,
        }
    }

    pub fn config(&self) -> &ChunkListConfig {
        &self.config
    }

    /// Languages the dialect predicates consult
    pub fn languages(&self) -> LanguageSet {
        self.config.languages
    }

    /// Recorded kind/parent/flag changes
    pub fn provenance(&self) -> &ProvenanceLog {
        &self.provenance
    }

    pub fn provenance_mut(&mut self) -> &mut ProvenanceLog {
        &mut self.provenance
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn head(&self) -> Option<ChunkId> {
        self.head.map(|idx| self.id_at(idx))
    }

    pub fn tail(&self) -> Option<ChunkId> {
        self.tail.map(|idx| self.id_at(idx))
    }

    /// True when `id` refers to a chunk currently linked into this list
    pub fn contains(&self, id: ChunkId) -> bool {
        self.resolve(id).is_ok()
    }

    pub fn get(&self, id: impl Into<Option<ChunkId>>) -> Option<&Chunk> {
        let idx = self.lookup(id.into())?;
        self.entry(idx).map(|entry| &entry.chunk)
    }

    /// Mutable access to the plain chunk attributes.
    ///
    /// Kind, parent kind and flags stay behind the tracked setters.
    pub fn get_mut(&mut self, id: impl Into<Option<ChunkId>>) -> Option<&mut Chunk> {
        let idx = self.lookup(id.into())?;
        self.entry_mut(idx).map(|entry| &mut entry.chunk)
    }

    /// Raw successor, ignoring every scope rule
    pub fn next_raw(&self, id: impl Into<Option<ChunkId>>) -> Option<ChunkId> {
        let idx = self.lookup(id.into())?;
        self.entry(idx)?.next.map(|next| self.id_at(next))
    }

    /// Raw predecessor, ignoring every scope rule
    pub fn prev_raw(&self, id: impl Into<Option<ChunkId>>) -> Option<ChunkId> {
        let idx = self.lookup(id.into())?;
        self.entry(idx)?.prev.map(|prev| self.id_at(prev))
    }

    /// Iterate chunks from head to tail
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    /// Detached copy of a chunk: every attribute is kept except the parent link
    pub fn duplicate(&self, id: impl Into<Option<ChunkId>>) -> Option<Chunk> {
        let mut copy = self.get(id)?.clone();
        copy.parent = None;
        Some(copy)
    }

    /// Append a chunk at the tail
    pub fn push_back(&mut self, chunk: Chunk) -> ChunkId {
        let idx = self.alloc(chunk);
        let tail = self.tail;
        self.link(idx, tail, None);
        self.id_at(idx)
    }

    /// Link `chunk` right after `after`; `None` appends at the tail
    pub fn insert_after(&mut self, chunk: Chunk, after: Option<ChunkId>) -> Result<ChunkId> {
        let (prev, next) = match after {
            Some(id) => {
                let idx = self.resolve(id)?;
                (Some(idx), self.entry(idx).and_then(|entry| entry.next))
            }
            None => (self.tail, None),
        };
        let idx = self.alloc(chunk);
        self.link(idx, prev, next);
        Ok(self.id_at(idx))
    }

    /// Link `chunk` right before `before`; `None` prepends at the head
    pub fn insert_before(&mut self, chunk: Chunk, before: Option<ChunkId>) -> Result<ChunkId> {
        let (prev, next) = match before {
            Some(id) => {
                let idx = self.resolve(id)?;
                (self.entry(idx).and_then(|entry| entry.prev), Some(idx))
            }
            None => (None, self.head),
        };
        let idx = self.alloc(chunk);
        self.link(idx, prev, next);
        Ok(self.id_at(idx))
    }

    /// Unlink and free a chunk, returning it.
    ///
    /// Stale or absent ids are a no-op.
    pub fn delete(&mut self, id: impl Into<Option<ChunkId>>) -> Option<Chunk> {
        let idx = self.lookup(id.into())?;
        self.unlink(idx);
        let slot = self.slots.get_mut(idx as usize)?;
        let entry = slot.entry.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(idx);
        Some(entry.chunk)
    }

    /// Relocate a linked chunk to right after `after`, keeping its identity
    pub fn move_after(&mut self, id: ChunkId, after: ChunkId) -> Result<()> {
        if id == after {
            return Err(ChunkError::SelfReference(id));
        }
        let idx = self.resolve(id)?;
        let after_idx = self.resolve(after)?;
        self.unlink(idx);
        let next = self.entry(after_idx).and_then(|entry| entry.next);
        self.link(idx, Some(after_idx), next);
        Ok(())
    }

    /// Exchange the stream positions of two chunks
    pub fn swap(&mut self, a: ChunkId, b: ChunkId) -> Result<()> {
        let a_idx = self.resolve(a)?;
        let b_idx = self.resolve(b)?;
        if a_idx == b_idx {
            return Ok(());
        }

        let a_prev = self.entry(a_idx).and_then(|entry| entry.prev);
        let b_prev = self.entry(b_idx).and_then(|entry| entry.prev);

        if b_prev == Some(a_idx) {
            self.unlink(a_idx);
            self.link_after(a_idx, Some(b_idx));
        } else if a_prev == Some(b_idx) {
            self.unlink(b_idx);
            self.link_after(b_idx, Some(a_idx));
        } else {
            self.unlink(a_idx);
            self.unlink(b_idx);
            self.link_after(b_idx, a_prev);
            self.link_after(a_idx, b_prev);
        }

        log::trace!("swapped chunks {a} and {b}");
        Ok(())
    }

    /// Exchange the contents of the lines holding `a` and `b`.
    ///
    /// Each line run is moved as a block from its first chunk up to (not
    /// including) its terminating newline. The newline chunks stay in place,
    /// so the vertical spacing between the lines is unchanged.
    pub fn swap_lines(&mut self, a: ChunkId, b: ChunkId) -> Result<()> {
        let a_idx = self.resolve(a)?;
        let b_idx = self.resolve(b)?;

        let mut first = self.line_start(a_idx);
        let mut second = self.line_start(b_idx);
        if first == second {
            return Ok(());
        }
        if self.order_of(first) > self.order_of(second) {
            std::mem::swap(&mut first, &mut second);
        }

        let first_anchor = self.entry(first).and_then(|entry| entry.prev);
        let second_anchor = self.entry(second).and_then(|entry| entry.prev);
        let first_run = self.line_run(first);
        let second_run = self.line_run(second);

        for &idx in first_run.iter().chain(second_run.iter()) {
            self.unlink(idx);
        }

        let mut anchor = first_anchor;
        for &idx in &second_run {
            self.link_after(idx, anchor);
            anchor = Some(idx);
        }
        let mut anchor = second_anchor;
        for &idx in &first_run {
            self.link_after(idx, anchor);
            anchor = Some(idx);
        }

        log::trace!(
            "swapped lines of {a} and {b} ({} and {} chunks)",
            first_run.len(),
            second_run.len()
        );
        Ok(())
    }

    /// Order two linked chunks by their current stream position.
    ///
    /// # Panics
    ///
    /// Panics if either id is stale or belongs to another list; use
    /// [`try_compare_position`](Self::try_compare_position) to check instead.
    pub fn compare_position(&self, a: ChunkId, b: ChunkId) -> Ordering {
        match self.try_compare_position(a, b) {
            Ok(ordering) => ordering,
            Err(err) => panic!("compare_position on an invalid chunk: {err}"),
        }
    }

    pub fn try_compare_position(&self, a: ChunkId, b: ChunkId) -> Result<Ordering> {
        let a_idx = self.resolve(a)?;
        let b_idx = self.resolve(b)?;
        Ok(self.order_of(a_idx).cmp(&self.order_of(b_idx)))
    }

    /// Order two chunks by where they started in the input
    pub fn compare_orig(&self, a: ChunkId, b: ChunkId) -> Option<Ordering> {
        let a = self.get(a)?;
        let b = self.get(b)?;
        Some(a.orig.cmp(&b.orig))
    }

    pub(crate) fn resolve(&self, id: ChunkId) -> Result<u32> {
        if id.list != self.id {
            return Err(ChunkError::ForeignChunk(id));
        }
        match self.slots.get(id.index as usize) {
            Some(slot) if slot.generation == id.generation && slot.entry.is_some() => Ok(id.index),
            _ => Err(ChunkError::StaleChunk(id)),
        }
    }

    fn lookup(&self, id: Option<ChunkId>) -> Option<u32> {
        id.and_then(|id| self.resolve(id).ok())
    }

    fn id_at(&self, idx: u32) -> ChunkId {
        let generation = self.slots.get(idx as usize).map_or(0, |slot| slot.generation);
        ChunkId {
            list: self.id,
            index: idx,
            generation,
        }
    }

    fn entry(&self, idx: u32) -> Option<&Entry> {
        self.slots.get(idx as usize)?.entry.as_ref()
    }

    fn entry_mut(&mut self, idx: u32) -> Option<&mut Entry> {
        self.slots.get_mut(idx as usize)?.entry.as_mut()
    }

    pub(crate) fn chunk_at_mut(&mut self, idx: u32) -> Option<&mut Chunk> {
        self.entry_mut(idx).map(|entry| &mut entry.chunk)
    }

    fn order_of(&self, idx: u32) -> u64 {
        self.entry(idx).map_or(0, |entry| entry.order)
    }

    fn alloc(&mut self, chunk: Chunk) -> u32 {
        let entry = Entry {
            chunk,
            prev: None,
            next: None,
            order: 0,
        };
        match self.free.pop() {
            Some(idx) => {
                if let Some(slot) = self.slots.get_mut(idx as usize) {
                    slot.entry = Some(entry);
                }
                idx
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    entry: Some(entry),
                });
                (self.slots.len() - 1) as u32
            }
        }
    }

    /// Link an allocated, unlinked slot between `prev` and `next` (adjacent)
    fn link(&mut self, idx: u32, prev: Option<u32>, next: Option<u32>) {
        if let Some(entry) = self.entry_mut(idx) {
            entry.prev = prev;
            entry.next = next;
        }
        match prev.and_then(|p| self.entry_mut(p)) {
            Some(entry) => entry.next = Some(idx),
            None => self.head = Some(idx),
        }
        match next.and_then(|n| self.entry_mut(n)) {
            Some(entry) => entry.prev = Some(idx),
            None => self.tail = Some(idx),
        }
        self.len += 1;
        self.assign_order(idx, prev, next);
    }

    /// Link after `after`; `None` links at the head
    fn link_after(&mut self, idx: u32, after: Option<u32>) {
        let next = match after {
            Some(after) => self.entry(after).and_then(|entry| entry.next),
            None => self.head,
        };
        self.link(idx, after, next);
    }

    fn unlink(&mut self, idx: u32) {
        let Some((prev, next)) = self.entry(idx).map(|entry| (entry.prev, entry.next)) else {
            return;
        };
        match prev.and_then(|p| self.entry_mut(p)) {
            Some(entry) => entry.next = next,
            None => self.head = next,
        }
        match next.and_then(|n| self.entry_mut(n)) {
            Some(entry) => entry.prev = prev,
            None => self.tail = prev,
        }
        if let Some(entry) = self.entry_mut(idx) {
            entry.prev = None;
            entry.next = None;
        }
        self.len -= 1;
    }

    /// Give a freshly linked entry a key between its neighbours.
    ///
    /// Appends and prepends step a full spacing away from the end key, so only
    /// repeated inserts into one gap ever exhaust it.
    fn assign_order(&mut self, idx: u32, prev: Option<u32>, next: Option<u32>) {
        let low = prev.map(|p| self.order_of(p));
        let high = next.map(|n| self.order_of(n));
        let order = match (low, high) {
            (None, None) => Some(ORDER_SPACING),
            (Some(low), None) => low.checked_add(ORDER_SPACING).or_else(|| midpoint(low, u64::MAX)),
            (None, Some(high)) => high
                .checked_sub(ORDER_SPACING)
                .filter(|order| *order > 0)
                .or_else(|| midpoint(0, high)),
            (Some(low), Some(high)) => midpoint(low, high),
        };
        match order {
            Some(order) => {
                if let Some(entry) = self.entry_mut(idx) {
                    entry.order = order;
                }
            }
            None => self.relabel(),
        }
    }

    /// Spread the order keys evenly again once a gap is exhausted
    fn relabel(&mut self) {
        self.relabels += 1;
        log::debug!("relabeling order keys of {} chunks", self.len);
        let mut cursor = self.head;
        let mut order = ORDER_SPACING;
        while let Some(idx) = cursor {
            cursor = match self.entry_mut(idx) {
                Some(entry) => {
                    entry.order = order;
                    entry.next
                }
                None => None,
            };
            order = order.saturating_add(ORDER_SPACING);
        }
    }

    /// First chunk of the line holding `idx`
    fn line_start(&self, idx: u32) -> u32 {
        let mut start = idx;
        while let Some(prev) = self.entry(start).and_then(|entry| entry.prev) {
            if self.entry(prev).is_some_and(|entry| entry.chunk.is_newline()) {
                break;
            }
            start = prev;
        }
        start
    }

    /// Chunks from `start` up to the next newline (exclusive)
    fn line_run(&self, start: u32) -> Vec<u32> {
        let mut run = Vec::new();
        let mut cursor = Some(start);
        while let Some(idx) = cursor {
            let Some(entry) = self.entry(idx) else {
                break;
            };
            if entry.chunk.is_newline() {
                break;
            }
            run.push(idx);
            cursor = entry.next;
        }
        run
    }
}

impl Index<ChunkId> for ChunkList {
    type Output = Chunk;

    /// # Panics
    ///
    /// Panics if the id is stale or belongs to another list.
    fn index(&self, id: ChunkId) -> &Chunk {
        match self.get(id) {
            Some(chunk) => chunk,
            None => panic!("no chunk for handle {id}"),
        }
    }
}

impl FromIterator<Chunk> for ChunkList {
    fn from_iter<I: IntoIterator<Item = Chunk>>(iter: I) -> Self {
        let mut list = ChunkList::new();
        list.extend(iter);
        list
    }
}

impl Extend<Chunk> for ChunkList {
    fn extend<I: IntoIterator<Item = Chunk>>(&mut self, iter: I) {
        for chunk in iter {
            self.push_back(chunk);
        }
    }
}

/// Iterator over `(id, chunk)` pairs from head to tail
pub struct Iter<'a> {
    list: &'a ChunkList,
    cursor: Option<u32>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (ChunkId, &'a Chunk);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.cursor?;
        let entry = self.list.entry(idx)?;
        self.cursor = entry.next;
        Some((self.list.id_at(idx), &entry.chunk))
    }
}

impl<'a> IntoIterator for &'a ChunkList {
    type Item = (ChunkId, &'a Chunk);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Key strictly between `low` and `high`, if the gap has room for one
fn midpoint(low: u64, high: u64) -> Option<u64> {
    (high > low && high - low >= 2).then(|| low + (high - low) / 2)
}
