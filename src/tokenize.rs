//! Two-level field splitting of protocol lines.
//!
//! A line is split into top-level fields on `,` `;` `:`. Fields of commands
//! that carry device info are split again on `.`. Neither split ever yields
//! an empty field: consecutive delimiters and leading delimiters produce
//! nothing.

/// Top-level field delimiters.
pub const FIELD_DELIMITERS: &[char] = &[',', ';', ':'];

/// Delimiter of the secondary, device-info split.
pub const SUBFIELD_DELIMITER: char = '.';

/// Splits a line into top-level fields, skipping empty runs.
///
/// Field position 1 is always the command id. A terminator left at the end
/// of the line stays attached to the last field unless a delimiter precedes
/// it, in which case it forms a field of its own (the "Field End" marker,
/// see [`is_end_marker`]).
pub fn tokenize(line: &str) -> Vec<&str> {
    line.split(FIELD_DELIMITERS)
        .filter(|run| !run.is_empty())
        .collect()
}

/// Splits one field into device-info sub-fields, skipping empty runs.
pub fn split_device_info(field: &str) -> Vec<&str> {
    field
        .split(SUBFIELD_DELIMITER)
        .filter(|run| !run.is_empty())
        .collect()
}

/// Whether a field is exactly the two-character line terminator.
pub fn is_end_marker(field: &str) -> bool {
    field == "\r\n"
}
