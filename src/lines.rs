//! Line termination and splitting of reassembled byte spans.

/// The two-byte line terminator of the protocol (CR, LF).
pub const TERMINATOR: [u8; 2] = [0x0D, 0x0A];

/// Whether `bytes` ends with the line terminator.
pub fn ends_with_terminator(bytes: &[u8]) -> bool {
    bytes.len() >= TERMINATOR.len() && bytes[bytes.len() - TERMINATOR.len()..] == TERMINATOR
}

/// One line produced by [`split_lines`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitLine {
    /// Line text with the terminator re-appended when present.
    ///
    /// Downstream field splitting treats the terminator as a meaningful
    /// trailing field, so it is handed forward rather than stripped.
    pub text: String,
    /// False for a trailing remainder with no terminator.
    pub terminated: bool,
}

/// Splits a byte span into logical lines on the terminator.
///
/// Empty segments are dropped. A non-empty trailing remainder without a
/// terminator is returned as a final unterminated line. The scan always
/// advances, even across adjacent terminators.
pub fn split_lines(bytes: &[u8]) -> Vec<SplitLine> {
    let mut lines = Vec::new();
    let mut start = 0;

    while start < bytes.len() {
        match find_terminator(&bytes[start..]) {
            Some(at) => {
                let end = start + at + TERMINATOR.len();
                if at > 0 {
                    lines.push(SplitLine {
                        text: String::from_utf8_lossy(&bytes[start..end]).into_owned(),
                        terminated: true,
                    });
                }
                start = end;
            }
            None => {
                lines.push(SplitLine {
                    text: String::from_utf8_lossy(&bytes[start..]).into_owned(),
                    terminated: false,
                });
                break;
            }
        }
    }

    lines
}

fn find_terminator(bytes: &[u8]) -> Option<usize> {
    bytes.windows(TERMINATOR.len()).position(|w| w == TERMINATOR)
}
