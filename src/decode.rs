//! Decodes tokenized lines into [`CommandRecord`]s.
//!
//! Decoding is total: malformed numeric fields fall back to id 0 and ids
//! missing from a lookup table decode to an empty name. Arbitrary captured
//! bytes must never make the decoder fail.

use crate::commands::{command_name, is_receive_command, ENCODER_CHANGE};
use crate::devices::{device_type_name, encoder_direction_name};
use crate::frame::Direction;
use crate::record::{CommandRecord, DecodedField, FieldKind, RecordFlags};
use crate::tokenize::{is_end_marker, split_device_info, tokenize};

/// Decodes one logical line into a command record.
///
/// `flags` carries the completeness markers determined by the caller from
/// the reassembly outcome (continuation, merged).
pub fn decode_line(line: &str, direction: Direction, flags: RecordFlags) -> CommandRecord {
    let fields = tokenize(line);

    let command_id = fields
        .first()
        .and_then(|f| f.trim().parse::<u8>().ok())
        .unwrap_or(0);

    let mut decoded = Vec::with_capacity(fields.len());
    if let Some(first) = fields.first() {
        decoded.push(DecodedField::new(FieldKind::Command, first.trim()));
    }

    for (index, field) in fields.iter().enumerate().skip(1) {
        let position = index + 1;
        let is_last = index == fields.len() - 1;

        if is_last && is_end_marker(field) {
            decoded.push(DecodedField::new(FieldKind::End, ""));
        } else if command_id == ENCODER_CHANGE && position == 3 {
            decode_encoder_change(field, &mut decoded);
        } else if is_receive_command(command_id) && direction == Direction::In {
            decode_device_info(field, &mut decoded);
        } else {
            decoded.push(DecodedField::new(FieldKind::Value, *field));
        }
    }

    CommandRecord {
        command_id,
        command_name: command_name(command_id),
        direction,
        fields: fields.into_iter().map(str::to_owned).collect(),
        decoded,
        flags,
    }
}

/// Device-info sub-grammar: sub-field 1 is a device type id, the final
/// sub-field (when more than one exists) is the device name, anything in
/// between passes through opaquely.
fn decode_device_info(field: &str, decoded: &mut Vec<DecodedField>) {
    let subs = split_device_info(field);
    let Some((first, rest)) = subs.split_first() else {
        decoded.push(DecodedField::new(FieldKind::Value, field));
        return;
    };

    let type_id = first.trim().parse::<u8>().unwrap_or(0);
    decoded.push(DecodedField::new(
        FieldKind::DeviceType,
        device_type_name(type_id),
    ));
    push_trailing_subs(rest, decoded);
}

/// EncoderChange override: sub-field 1 of the third top-level field is an
/// encoder direction, not a device type. Applies to both directions.
fn decode_encoder_change(field: &str, decoded: &mut Vec<DecodedField>) {
    let subs = split_device_info(field);
    let Some((first, rest)) = subs.split_first() else {
        decoded.push(DecodedField::new(FieldKind::Value, field));
        return;
    };

    let direction_id = first.trim().parse::<u8>().unwrap_or(0);
    decoded.push(DecodedField::new(
        FieldKind::EncoderDirection,
        encoder_direction_name(direction_id),
    ));
    push_trailing_subs(rest, decoded);
}

fn push_trailing_subs(rest: &[&str], decoded: &mut Vec<DecodedField>) {
    if let Some((name, middle)) = rest.split_last() {
        for sub in middle {
            decoded.push(DecodedField::new(FieldKind::Intermediate, *sub));
        }
        decoded.push(DecodedField::new(FieldKind::DeviceName, *name));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds_and_values(record: &CommandRecord) -> Vec<(FieldKind, &str)> {
        record
            .decoded
            .iter()
            .map(|f| (f.kind, f.value.as_str()))
            .collect()
    }

    #[test]
    fn receive_command_in_direction_decodes_device_info() {
        let record = decode_line("10,7.LCD1,3.Btn2", Direction::In, RecordFlags::empty());
        assert_eq!(record.command_id, 10);
        assert_eq!(record.command_name, "Info");
        assert_eq!(
            kinds_and_values(&record),
            vec![
                (FieldKind::Command, "10"),
                (FieldKind::DeviceType, "LcdDisplay"),
                (FieldKind::DeviceName, "LCD1"),
                (FieldKind::DeviceType, "Output"),
                (FieldKind::DeviceName, "Btn2"),
            ]
        );
    }

    #[test]
    fn receive_command_out_direction_stays_opaque() {
        let record = decode_line("10,7.LCD1,3.Btn2", Direction::Out, RecordFlags::empty());
        assert_eq!(
            kinds_and_values(&record),
            vec![
                (FieldKind::Command, "10"),
                (FieldKind::Value, "7.LCD1"),
                (FieldKind::Value, "3.Btn2"),
            ]
        );
    }

    #[test]
    fn encoder_change_overrides_third_field() {
        let record = decode_line("6,5,2", Direction::In, RecordFlags::empty());
        assert_eq!(record.command_name, "EncoderChange");
        assert_eq!(
            kinds_and_values(&record),
            vec![
                (FieldKind::Command, "6"),
                (FieldKind::DeviceType, "StepperDeprecatedV1"),
                (FieldKind::EncoderDirection, "RIGHT"),
            ]
        );
    }

    #[test]
    fn encoder_override_ignores_direction() {
        let record = decode_line("6,5,2", Direction::Out, RecordFlags::empty());
        assert_eq!(record.decoded[2].kind, FieldKind::EncoderDirection);
        assert_eq!(record.decoded[2].value, "RIGHT");
        // Field 2 follows the ordinary rules: opaque for host-to-device.
        assert_eq!(record.decoded[1].kind, FieldKind::Value);
    }

    #[test]
    fn unknown_command_keeps_numeric_id() {
        let record = decode_line("200,x,y", Direction::In, RecordFlags::empty());
        assert_eq!(record.command_id, 200);
        assert_eq!(record.command_name, "");
        assert_eq!(
            kinds_and_values(&record),
            vec![
                (FieldKind::Command, "200"),
                (FieldKind::Value, "x"),
                (FieldKind::Value, "y"),
            ]
        );
    }

    #[test]
    fn trailing_terminator_becomes_end_marker() {
        let record = decode_line("2,13,1;\r\n", Direction::Out, RecordFlags::empty());
        assert_eq!(record.command_name, "SetPin");
        assert_eq!(record.decoded.last().unwrap().kind, FieldKind::End);
    }

    #[test]
    fn malformed_command_id_decodes_as_zero() {
        let record = decode_line("junk,1", Direction::Out, RecordFlags::empty());
        assert_eq!(record.command_id, 0);
        assert_eq!(record.command_name, "InitModule");
    }

    #[test]
    fn command_id_tolerates_attached_terminator() {
        // An argument-less command with no trailing delimiter keeps the
        // terminator attached to field 1; trimming recovers the id.
        let record = decode_line("24\r\n", Direction::Out, RecordFlags::empty());
        assert_eq!(record.command_id, 24);
        assert_eq!(record.command_name, "ResetBoard");
    }

    #[test]
    fn raw_fields_are_preserved() {
        let record = decode_line("6,5,9", Direction::In, RecordFlags::empty());
        assert_eq!(record.fields, vec!["6", "5", "9"]);
        // Encoder direction 9 is unknown: empty name, raw value retained.
        assert_eq!(record.decoded[2].value, "");
    }
}
