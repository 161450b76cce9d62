//! Decoded command records handed to the report sink.

use bitflags::bitflags;

use crate::frame::Direction;

/// Constant protocol name label attached to every report.
pub const PROTOCOL_NAME: &str = "MobiFlight";

bitflags! {
    /// Completeness markers for one decoded record.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct RecordFlags: u8 {
        /// The line had no terminator; more fragments are expected.
        const CONTINUATION = 1 << 0;
        /// The line came out of a multi-fragment reassembled span.
        const MERGED = 1 << 1;
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for RecordFlags {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.bits())
    }
}

/// What a decoded field represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldKind {
    /// The numeric command id, field position 1.
    Command,
    /// A device type resolved through the device-type table.
    DeviceType,
    /// The trailing sub-field of a device-info split: the device name.
    DeviceName,
    /// An encoder rotation direction (EncoderChange only).
    EncoderDirection,
    /// An intermediate device-info sub-field, passed through opaquely.
    Intermediate,
    /// An opaque value field.
    Value,
    /// The explicit end-of-command marker.
    End,
}

impl FieldKind {
    /// Stable label for tree and log consumers.
    pub fn label(self) -> &'static str {
        match self {
            FieldKind::Command => "Command",
            FieldKind::DeviceType => "DeviceType",
            FieldKind::DeviceName => "DeviceName",
            FieldKind::EncoderDirection => "Direction",
            FieldKind::Intermediate => "Field",
            FieldKind::Value => "Value",
            FieldKind::End => "FieldEnd",
        }
    }
}

/// One (label, value) pair emitted for a record.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecodedField {
    pub kind: FieldKind,
    /// Decoded text. Empty for ids missing from a lookup table; the raw
    /// field text is always preserved in [`CommandRecord::fields`].
    pub value: String,
}

impl DecodedField {
    pub fn new(kind: FieldKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    pub fn label(&self) -> &'static str {
        self.kind.label()
    }
}

/// One decoded logical message.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CommandRecord {
    /// Numeric command id. Unparseable ids decode to 0.
    pub command_id: u8,
    /// Symbolic command name, `""` when the id is not in the table.
    pub command_name: &'static str,
    /// Transfer direction of the originating frame.
    pub direction: Direction,
    /// Raw top-level field strings in line order.
    pub fields: Vec<String>,
    /// Decoded (label, value) pairs in emission order.
    pub decoded: Vec<DecodedField>,
    pub flags: RecordFlags,
}

impl CommandRecord {
    /// One-line human-readable summary: `"<IN|OUT> <name>"`, with
    /// `" Conti..."` for unterminated lines or `" Merged"` for lines
    /// recovered by multi-fragment reassembly.
    pub fn summary(&self) -> String {
        let mut info = format!("{} {}", self.direction, self.command_name);
        if self.flags.contains(RecordFlags::CONTINUATION) {
            info.push_str(" Conti...");
        } else if self.flags.contains(RecordFlags::MERGED) {
            info.push_str(" Merged");
        }
        info
    }
}
