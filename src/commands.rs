//! The MobiFlight command table.

/// Known command identifiers and their symbolic names.
///
/// The table is plain data so new firmware commands can be added without
/// touching the decode logic. Ids absent from the table decode to an empty
/// name, never an error: old captures must stay decodable as the protocol
/// grows.
pub const COMMAND_NAMES: &[(u8, &str)] = &[
    (0, "InitModule"),
    (1, "SetModule"),
    (2, "SetPin"),
    (3, "SetStepper"),
    (4, "SetServo"),
    (5, "Status"),
    (6, "EncoderChange"),
    (7, "ButtonChange"),
    (8, "StepperChange"),
    (9, "GetInfo"),
    (10, "Info"),
    (11, "SetConfig"),
    (12, "GetConfig"),
    (13, "ResetConfig"),
    (14, "SaveConfig"),
    (15, "ConfigSaved"),
    (16, "ActivateConfig"),
    (17, "ConfigActivated"),
    (18, "SetPowerSavingMode"),
    (19, "SetName"),
    (20, "GenNewSerial"),
    (21, "ResetStepper"),
    (22, "SetZeroStepper"),
    (23, "Trigger"),
    (24, "ResetBoard"),
    (25, "SetLcdDisplayI2C"),
    (26, "SetModuleBrightness"),
    (27, "SetShiftRegisterPins"),
    (28, "AnalogChange"),
    (29, "InputShifterChange"),
    (30, "DigInMuxChange"),
    (31, "SetStepperSpeedAccel"),
    (32, "SetCustomDevice"),
    (255, "Debug"),
];

/// Command ids whose device-to-host payload carries device-info sub-fields
/// instead of opaque values.
pub const RECEIVE_COMMANDS: [u8; 7] = [5, 6, 7, 8, 9, 10, 28];

/// The EncoderChange command. Its third top-level field is an encoder
/// direction, not a device type.
pub const ENCODER_CHANGE: u8 = 6;

/// Looks up the symbolic name of a command id. Unknown ids yield `""`.
pub fn command_name(id: u8) -> &'static str {
    COMMAND_NAMES
        .iter()
        .find(|(cmd, _)| *cmd == id)
        .map(|(_, name)| *name)
        .unwrap_or("")
}

/// Whether `id` belongs to the receive-direction command set.
pub fn is_receive_command(id: u8) -> bool {
    RECEIVE_COMMANDS.contains(&id)
}
