//! Captured transport frames as supplied by the capture source.

use std::fmt;

/// Direction of a transfer relative to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Device to host.
    In,
    /// Host to device.
    Out,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::In => write!(f, "IN"),
            Direction::Out => write!(f, "OUT"),
        }
    }
}

/// Transfer type classifier reported by the capture source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransferType {
    Control,
    Isochronous,
    Bulk,
    Interrupt,
}

/// One captured transport frame.
///
/// The capture source owns the payload; the dissector borrows it read-only
/// for the duration of a single call.
#[derive(Debug, Clone)]
pub struct CapturedFrame<'a> {
    /// Raw payload bytes of the bulk transfer fragment.
    pub payload: &'a [u8],
    pub direction: Direction,
    pub transfer_type: TransferType,
    pub bus: u16,
    pub device: u16,
    pub endpoint: u8,

    /// Monotonically increasing capture frame number.
    pub sequence: u64,

    /// Correlation id grouping the fragments of one logical transfer (IRP id).
    pub transfer_id: u64,

    /// Capture timestamp in microseconds. Monotonically increasing.
    pub timestamp_us: u64,
}

impl CapturedFrame<'_> {
    /// Whether the payload ends with the two-byte line terminator (CR, LF).
    pub fn is_terminated(&self) -> bool {
        crate::lines::ends_with_terminator(self.payload)
    }
}
