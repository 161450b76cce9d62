//! Fragment reassembly across captured bulk transfers.
//!
//! A logical protocol line can span several bulk-IN frames, and one frame
//! can carry several complete lines. The engine buffers admitted fragments
//! and reconstructs maximal completed spans. Two profiles exist because the
//! protocol has no length field and two completion signals are in use:
//!
//! - [`Profile::ShortPacket`]: a fragment shorter than the largest payload
//!   seen in its session ends the whole transfer (the canonical USB
//!   short-packet signal). Coarse: the full transfer is one message.
//! - [`Profile::TerminatorScan`]: a fragment ending in CR LF completes a
//!   span whose start is recovered retroactively by scanning backward for
//!   the previous terminated fragment.
//!
//! The profiles are not interchangeable and neither takes precedence; the
//! caller picks one at construction time. Terminator scan is the default.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::frame::CapturedFrame;

mod short_packet;
mod terminator;

use short_packet::SessionTable;
use terminator::FragmentLog;

/// Reassembly strategy, selected at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Profile {
    /// Short-packet completion keyed by (bus, device, endpoint, direction).
    ShortPacket,
    /// Terminator scan with retroactive boundary recovery over a shared
    /// fragment log.
    #[default]
    TerminatorScan,
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Profile::ShortPacket => write!(f, "short-packet"),
            Profile::TerminatorScan => write!(f, "terminator-scan"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown reassembly profile {0:?}, expected \"short-packet\" or \"terminator-scan\"")]
pub struct ProfileParseError(String);

impl FromStr for Profile {
    type Err = ProfileParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "short-packet" => Ok(Profile::ShortPacket),
            "terminator-scan" => Ok(Profile::TerminatorScan),
            other => Err(ProfileParseError(other.to_owned())),
        }
    }
}

/// Engine construction errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("fragment capacity must be nonzero")]
    ZeroCapacity,
}

/// Engine tunables.
#[derive(Debug, Clone)]
pub struct ReassemblyConfig {
    pub profile: Profile,
    /// Upper bound on retained fragments (per log for terminator scan,
    /// per session for short packet). Oldest fragments are evicted once
    /// the bound is hit, so a device that stalls mid-message cannot grow
    /// the log without limit.
    pub max_fragments: usize,
}

impl Default for ReassemblyConfig {
    fn default() -> Self {
        Self {
            profile: Profile::default(),
            max_fragments: 1024,
        }
    }
}

/// A maximal span of concatenated fragment bytes ready for line splitting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReassembledMessage {
    pub bytes: Vec<u8>,
    /// Number of fragments that contributed to the span.
    pub fragments: usize,
}

/// Outcome of feeding one admitted frame to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reassembly {
    /// Fragment buffered; no completed span yet. The frame itself should
    /// still be reported as in progress.
    Pending,
    /// The frame stands alone; its own payload is the message.
    Unfragmented,
    /// A multi-fragment span completed with this frame.
    Merged(ReassembledMessage),
}

/// Counters exposed for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineStats {
    /// Fragments accepted without completing a message.
    pub fragments_pending: u64,
    /// Multi-fragment messages emitted.
    pub messages_merged: u64,
    /// Fragments dropped by the eviction policy.
    pub fragments_evicted: u64,
}

/// Owns all reassembly state for one capture context.
///
/// Invoked once per admitted frame, synchronously, in capture order. Frames
/// for the same session key must arrive in frame-sequence order; the engine
/// never spawns work of its own.
#[derive(Debug)]
pub struct ReassemblyEngine {
    profile: Profile,
    sessions: SessionTable,
    log: FragmentLog,
    stats: EngineStats,
}

impl ReassemblyEngine {
    /// Engine with the default fragment bound.
    pub fn new(profile: Profile) -> Self {
        let config = ReassemblyConfig {
            profile,
            ..ReassemblyConfig::default()
        };
        Self::with_config(&config).expect("default config is valid")
    }

    pub fn with_config(config: &ReassemblyConfig) -> Result<Self, ConfigError> {
        if config.max_fragments == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(Self {
            profile: config.profile,
            sessions: SessionTable::new(config.max_fragments),
            log: FragmentLog::new(config.max_fragments),
            stats: EngineStats::default(),
        })
    }

    pub fn profile(&self) -> Profile {
        self.profile
    }

    pub fn stats(&self) -> EngineStats {
        self.stats
    }

    /// Feeds one admitted frame through the active profile.
    pub fn push(&mut self, frame: &CapturedFrame<'_>) -> Reassembly {
        let (outcome, evicted) = match self.profile {
            Profile::ShortPacket => self.sessions.ingest(frame),
            Profile::TerminatorScan => self.log.ingest(frame),
        };

        self.stats.fragments_evicted += evicted as u64;
        match &outcome {
            Reassembly::Pending => self.stats.fragments_pending += 1,
            Reassembly::Merged(message) => {
                self.stats.messages_merged += 1;
                log::debug!(
                    "merged {} fragments into a {} byte span at frame {}",
                    message.fragments,
                    message.bytes.len(),
                    frame.sequence,
                );
            }
            Reassembly::Unfragmented => {}
        }
        outcome
    }
}
