//! Fixed-size bucket store addressed by ever-increasing offsets
//!
//! A [`Window`] owns `size` slots. Offset `o` lives in slot `o % size`, and
//! every slot remembers the offset it was last written for. A slot whose
//! recorded offset differs from the one being addressed belongs to an earlier
//! lap of the ring: writes clear it first, reads present it as empty.

use crate::config::WindowOpts;
use crate::error::Result;
use std::iter::FusedIterator;

/// One time slice's accumulator
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bucket {
    value: f64,
    count: u64,
    offset: Option<u64>,
}

impl Bucket {
    /// Bucket that was never written (or aged out)
    pub const EMPTY: Bucket = Bucket {
        value: 0.0,
        count: 0,
        offset: None,
    };

    /// Stored value, `None` when nothing was written for this period.
    pub fn value(&self) -> Option<f64> {
        (self.count > 0).then_some(self.value)
    }

    /// Number of writes folded into the bucket
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Absolute offset the bucket holds data for
    pub fn offset(&self) -> Option<u64> {
        self.offset
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    fn is_live(&self, offset: u64) -> bool {
        self.offset == Some(offset)
    }

    fn reset(&mut self, offset: u64) {
        *self = Bucket {
            value: 0.0,
            count: 0,
            offset: Some(offset),
        };
    }
}

/// Circular store of `size` buckets
#[derive(Debug, Clone)]
pub struct Window {
    buckets: Vec<Bucket>,
}

impl Window {
    pub fn new(opts: WindowOpts) -> Result<Self> {
        opts.validate()?;
        Ok(Self {
            buckets: vec![Bucket::EMPTY; opts.size],
        })
    }

    pub fn size(&self) -> usize {
        self.buckets.len()
    }

    /// Replaces the value held for `offset`.
    pub fn append(&mut self, offset: u64, value: f64) {
        let bucket = self.slot_mut(offset);
        bucket.value = value;
        bucket.count = bucket.count.saturating_add(1);
    }

    /// Adds `value` to whatever is held for `offset`.
    pub fn add(&mut self, offset: u64, value: f64) {
        let bucket = self.slot_mut(offset);
        bucket.value += value;
        bucket.count = bucket.count.saturating_add(1);
    }

    /// Returns the bucket for `offset`, or an empty one if its slot was
    /// last written for a different lap.
    pub fn bucket(&self, offset: u64) -> Bucket {
        let bucket = self.buckets[self.index(offset)];
        if bucket.is_live(offset) {
            bucket
        } else {
            Bucket::EMPTY
        }
    }

    /// Iterates `count` buckets of the window ending at `head`, starting at
    /// relative position `start`.
    ///
    /// Relative position `p` names absolute offset `head + 1 - size + p`, so
    /// position 0 is the oldest bucket still inside the window and position
    /// `size - 1` is `head` itself. Positions wrap in ring order. Without a
    /// head (nothing written yet) every bucket is empty.
    pub fn iter(&self, head: Option<u64>, start: usize, count: usize) -> WindowIter<'_> {
        WindowIter {
            window: self,
            head,
            position: start % self.size(),
            remaining: count,
        }
    }

    fn index(&self, offset: u64) -> usize {
        (offset % self.buckets.len() as u64) as usize
    }

    fn slot_mut(&mut self, offset: u64) -> &mut Bucket {
        let idx = self.index(offset);
        let bucket = &mut self.buckets[idx];
        if !bucket.is_live(offset) {
            bucket.reset(offset);
        }
        bucket
    }

    fn resolve(&self, head: Option<u64>, position: usize) -> Bucket {
        let offset = head
            .and_then(|head| head.checked_add(1 + position as u64))
            .and_then(|end| end.checked_sub(self.size() as u64));
        match offset {
            Some(offset) => self.bucket(offset),
            None => Bucket::EMPTY,
        }
    }
}

/// Forward-only, single-pass view over a window's buckets
///
/// Deliberately not `Clone`: a reduction sees each bucket exactly once.
#[derive(Debug)]
pub struct WindowIter<'a> {
    window: &'a Window,
    head: Option<u64>,
    position: usize,
    remaining: usize,
}

impl Iterator for WindowIter<'_> {
    type Item = Bucket;

    fn next(&mut self) -> Option<Bucket> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let bucket = self.window.resolve(self.head, self.position);
        self.position = (self.position + 1) % self.window.size();
        Some(bucket)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for WindowIter<'_> {}

impl FusedIterator for WindowIter<'_> {}
