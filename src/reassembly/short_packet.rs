//! Short-packet reassembly keyed by transfer identity.

use std::collections::HashMap;

use crate::frame::{CapturedFrame, Direction};

use super::{Reassembly, ReassembledMessage};

/// One reassembly session per (bus, device, endpoint, direction).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct SessionKey {
    bus: u16,
    device: u16,
    endpoint: u8,
    direction: Direction,
}

impl SessionKey {
    fn of(frame: &CapturedFrame<'_>) -> Self {
        Self {
            bus: frame.bus,
            device: frame.device,
            endpoint: frame.endpoint,
            direction: frame.direction,
        }
    }
}

#[derive(Debug, Default)]
struct Session {
    buffer: Vec<u8>,
    fragments: usize,
    /// Largest payload length observed in the session. A strictly shorter
    /// fragment signals the end of the transfer.
    max_payload: usize,
}

/// Session table for the short-packet profile.
///
/// Sessions for different keys are independent; a session lives from its
/// first fragment until a short packet completes it or the fragment bound
/// drops it.
#[derive(Debug)]
pub(super) struct SessionTable {
    sessions: HashMap<SessionKey, Session>,
    max_fragments: usize,
}

impl SessionTable {
    pub(super) fn new(max_fragments: usize) -> Self {
        Self {
            sessions: HashMap::new(),
            max_fragments,
        }
    }

    /// Appends an admitted frame to its session and checks completion.
    pub(super) fn ingest(&mut self, frame: &CapturedFrame<'_>) -> (Reassembly, usize) {
        let key = SessionKey::of(frame);
        let session = self.sessions.entry(key).or_default();

        let completes = frame.payload.len() < session.max_payload;
        session.buffer.extend_from_slice(frame.payload);
        session.fragments += 1;
        session.max_payload = session.max_payload.max(frame.payload.len());

        if completes {
            if let Some(done) = self.sessions.remove(&key) {
                return (
                    Reassembly::Merged(ReassembledMessage {
                        bytes: done.buffer,
                        fragments: done.fragments,
                    }),
                    0,
                );
            }
        } else if session.fragments >= self.max_fragments {
            // The device never sent a short packet: drop the stalled
            // session rather than growing it without bound.
            let dropped = session.fragments;
            self.sessions.remove(&key);
            log::debug!(
                "dropped stalled session {}.{} ep {:#04x} after {dropped} fragments",
                frame.bus,
                frame.device,
                frame.endpoint,
            );
            return (Reassembly::Pending, dropped);
        }

        (Reassembly::Pending, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::TransferType;

    fn frame(sequence: u64, endpoint: u8, payload: &[u8]) -> CapturedFrame<'_> {
        CapturedFrame {
            payload,
            direction: Direction::In,
            transfer_type: TransferType::Bulk,
            bus: 1,
            device: 4,
            endpoint,
            sequence,
            transfer_id: sequence,
            timestamp_us: sequence * 1000,
        }
    }

    #[test]
    fn first_fragment_never_completes() {
        let mut table = SessionTable::new(64);
        assert_eq!(
            table.ingest(&frame(1, 0x81, b"short\r\n")).0,
            Reassembly::Pending
        );
    }

    #[test]
    fn short_packet_completes_the_transfer() {
        let mut table = SessionTable::new(64);
        table.ingest(&frame(1, 0x81, b"10,7.LCD1,3.B"));
        table.ingest(&frame(2, 0x81, b"tn2;extraextr"));
        let (r, _) = table.ingest(&frame(3, 0x81, b"a\r\n"));
        match r {
            Reassembly::Merged(message) => {
                assert_eq!(message.bytes, b"10,7.LCD1,3.Btn2;extraextra\r\n");
                assert_eq!(message.fragments, 3);
            }
            other => panic!("expected merged transfer, got {other:?}"),
        }
    }

    #[test]
    fn session_is_deleted_on_completion() {
        let mut table = SessionTable::new(64);
        table.ingest(&frame(1, 0x81, b"aaaa"));
        table.ingest(&frame(2, 0x81, b"b"));
        assert!(table.sessions.is_empty());
    }

    #[test]
    fn sessions_are_independent_per_endpoint() {
        let mut table = SessionTable::new(64);
        table.ingest(&frame(1, 0x81, b"aaaa"));
        table.ingest(&frame(2, 0x82, b"bbbb"));

        // A short packet on one endpoint only completes that session.
        let (r, _) = table.ingest(&frame(3, 0x81, b"a"));
        match r {
            Reassembly::Merged(message) => assert_eq!(message.bytes, b"aaaaa"),
            other => panic!("expected merged transfer, got {other:?}"),
        }
        assert_eq!(table.sessions.len(), 1);
    }

    #[test]
    fn equal_length_fragments_keep_accumulating() {
        let mut table = SessionTable::new(64);
        table.ingest(&frame(1, 0x81, b"aaaa"));
        assert_eq!(table.ingest(&frame(2, 0x81, b"bbbb")).0, Reassembly::Pending);
    }

    #[test]
    fn stalled_session_is_dropped_at_the_bound() {
        let mut table = SessionTable::new(3);
        table.ingest(&frame(1, 0x81, b"aaaa"));
        table.ingest(&frame(2, 0x81, b"bbbb"));
        let (r, evicted) = table.ingest(&frame(3, 0x81, b"cccc"));
        assert_eq!(r, Reassembly::Pending);
        assert_eq!(evicted, 3);
        assert!(table.sessions.is_empty());
    }
}
