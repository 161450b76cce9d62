//! Pre-filter classifying frames as protocol-relevant.

use crate::frame::{CapturedFrame, Direction, TransferType};

/// Admits frames that can plausibly carry protocol text.
///
/// This is a classification, not a parse attempt: the protocol rides on
/// multiplexed capture traffic shared with unrelated protocols, so a
/// rejected frame is a normal negative outcome and is never reported.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameGate {
    required_direction: Option<Direction>,
}

impl FrameGate {
    /// Gate admitting both transfer directions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gate additionally restricted to device-to-host frames. Used with
    /// reassembly profiles that only track the IN side.
    pub fn in_only() -> Self {
        Self {
            required_direction: Some(Direction::In),
        }
    }

    /// Whether `frame` should enter the dissection pipeline.
    ///
    /// Requires a bulk transfer with a non-empty payload made entirely of
    /// 7-bit ASCII (control, graphic, or space classes). A single byte
    /// outside that range rejects the whole frame.
    pub fn admit(&self, frame: &CapturedFrame<'_>) -> bool {
        if frame.transfer_type != TransferType::Bulk {
            return false;
        }
        if let Some(required) = self.required_direction {
            if frame.direction != required {
                return false;
            }
        }
        if frame.payload.is_empty() {
            return false;
        }
        frame.payload.iter().all(u8::is_ascii)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(payload: &[u8]) -> CapturedFrame<'_> {
        CapturedFrame {
            payload,
            direction: Direction::In,
            transfer_type: TransferType::Bulk,
            bus: 1,
            device: 4,
            endpoint: 0x81,
            sequence: 1,
            transfer_id: 1,
            timestamp_us: 0,
        }
    }

    #[test]
    fn admits_ascii_bulk() {
        assert!(FrameGate::new().admit(&frame(b"5,1,2;\r\n")));
    }

    #[test]
    fn rejects_any_non_ascii_byte() {
        assert!(!FrameGate::new().admit(&frame(b"5,1\xFF,2;\r\n")));
        assert!(!FrameGate::new().admit(&frame(&[0x80])));
    }

    #[test]
    fn rejects_non_bulk_transfers() {
        let mut f = frame(b"5,1;\r\n");
        f.transfer_type = TransferType::Interrupt;
        assert!(!FrameGate::new().admit(&f));
    }

    #[test]
    fn rejects_empty_payload() {
        assert!(!FrameGate::new().admit(&frame(b"")));
    }

    #[test]
    fn in_only_gate_rejects_out() {
        let mut f = frame(b"2,13,1;\r\n");
        f.direction = Direction::Out;
        assert!(!FrameGate::in_only().admit(&f));
        assert!(FrameGate::new().admit(&f));
    }
}
