//! Device-type and encoder-direction tables for device-info sub-fields.

/// Known device type identifiers and their symbolic names.
///
/// Plain data, same contract as [`crate::commands::COMMAND_NAMES`]: unknown
/// ids decode to an empty name.
pub const DEVICE_TYPE_NAMES: &[(u8, &str)] = &[
    (0, "NotSet"),
    (1, "Button"),
    (2, "EncoderSingle"),
    (3, "Output"),
    (4, "LedSegmentDeprecated"),
    (5, "StepperDeprecatedV1"),
    (6, "Servo"),
    (7, "LcdDisplay"),
    (8, "Encoder"),
    (9, "StepperDeprecatedV2"),
    (10, "OutputShifter"),
    (11, "AnalogInput"),
    (12, "InputShifter"),
    (13, "MuxDriver"),
    (14, "DigInMux"),
    (15, "Stepper"),
    (16, "LedSegmentMulti"),
    (17, "CustomDevice"),
];

/// Encoder rotation directions reported by EncoderChange.
pub const ENCODER_DIRECTION_NAMES: &[(u8, &str)] = &[
    (0, "LEFT"),
    (1, "LEFT_FAST"),
    (2, "RIGHT"),
    (3, "RIGHT_FAST"),
];

/// Looks up the symbolic name of a device type id. Unknown ids yield `""`.
pub fn device_type_name(id: u8) -> &'static str {
    DEVICE_TYPE_NAMES
        .iter()
        .find(|(ty, _)| *ty == id)
        .map(|(_, name)| *name)
        .unwrap_or("")
}

/// Looks up the symbolic name of an encoder direction. Unknown ids yield `""`.
pub fn encoder_direction_name(id: u8) -> &'static str {
    ENCODER_DIRECTION_NAMES
        .iter()
        .find(|(dir, _)| *dir == id)
        .map(|(_, name)| *name)
        .unwrap_or("")
}
