//! Terminator-scan reassembly over a shared fragment log.

use std::collections::VecDeque;

use crate::frame::{CapturedFrame, Direction};
use crate::lines::ends_with_terminator;

use super::{Reassembly, ReassembledMessage};

#[derive(Debug)]
struct Fragment {
    sequence: u64,
    bytes: Vec<u8>,
    terminated: bool,
}

/// Append-only log of IN fragments with retroactive boundary recovery.
///
/// Fragments carry monotonically increasing log indices (`base` is the
/// index of the oldest retained fragment), so count-based eviction never
/// renumbers survivors. The log is shared across transfers: boundary
/// recovery works on arrival order, not on session identity.
#[derive(Debug)]
pub(super) struct FragmentLog {
    fragments: VecDeque<Fragment>,
    base: u64,
    capacity: usize,
}

impl FragmentLog {
    pub(super) fn new(capacity: usize) -> Self {
        Self {
            fragments: VecDeque::new(),
            base: 0,
            capacity,
        }
    }

    /// Appends an admitted frame and resolves any span it completes.
    ///
    /// Host-to-device frames are not buffered: writes are observed whole,
    /// so they take the unfragmented path directly.
    pub(super) fn ingest(&mut self, frame: &CapturedFrame<'_>) -> (Reassembly, usize) {
        if frame.direction == Direction::Out {
            return (Reassembly::Unfragmented, 0);
        }

        let evicted = self.push(frame.sequence, frame.payload);

        if !ends_with_terminator(frame.payload) {
            log::trace!(
                "frame {} buffered awaiting terminator ({} bytes, log index {})",
                frame.sequence,
                frame.payload.len(),
                self.base + self.fragments.len() as u64 - 1,
            );
            return (Reassembly::Pending, evicted);
        }

        let Some(end) = self.position_of(frame.sequence) else {
            // The log failed to retain the fragment; fall back to the
            // ordinary per-frame path.
            return (Reassembly::Unfragmented, evicted);
        };
        let start = self.start_of_span(end);

        if start == end {
            // Nothing precedes this fragment since the last terminator:
            // the ordinary per-frame path already covers it.
            return (Reassembly::Unfragmented, evicted);
        }

        (Reassembly::Merged(self.merge(start, end)), evicted)
    }

    fn push(&mut self, sequence: u64, bytes: &[u8]) -> usize {
        let mut evicted = 0;
        while self.fragments.len() >= self.capacity {
            self.fragments.pop_front();
            self.base += 1;
            evicted += 1;
        }
        if evicted > 0 {
            log::debug!("evicted {evicted} fragment(s) from the log, base now {}", self.base);
        }
        self.fragments.push_back(Fragment {
            sequence,
            bytes: bytes.to_vec(),
            terminated: ends_with_terminator(bytes),
        });
        evicted
    }

    /// Forward scan for the fragment carrying `sequence` (the end boundary).
    fn position_of(&self, sequence: u64) -> Option<usize> {
        self.fragments.iter().position(|f| f.sequence == sequence)
    }

    /// Backward scan from just before `end` for the most recent prior
    /// terminated fragment. The span starts right after it, or at the log
    /// start if none is retained.
    fn start_of_span(&self, end: usize) -> usize {
        (0..end)
            .rev()
            .find(|&i| self.fragments[i].terminated)
            .map(|i| i + 1)
            .unwrap_or(0)
    }

    fn merge(&self, start: usize, end: usize) -> ReassembledMessage {
        let mut bytes = Vec::new();
        for fragment in self.fragments.iter().take(end + 1).skip(start) {
            bytes.extend_from_slice(&fragment.bytes);
        }
        ReassembledMessage {
            bytes,
            fragments: end - start + 1,
        }
    }
}
