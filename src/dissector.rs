//! The frame-to-record pipeline.

use crate::decode::decode_line;
use crate::frame::{CapturedFrame, Direction};
use crate::gate::FrameGate;
use crate::lines::split_lines;
use crate::reassembly::{
    ConfigError, EngineStats, Profile, Reassembly, ReassemblyConfig, ReassemblyEngine,
};
use crate::record::RecordFlags;
use crate::report::ReportSink;

/// Pipeline counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DissectorStats {
    pub frames_seen: u64,
    pub frames_admitted: u64,
    pub records_emitted: u64,
}

/// Dissects captured frames into command records.
///
/// Constructed once per capture context; owns the gate and all reassembly
/// state. Call [`dissect`](Self::dissect) once per frame, in capture order.
/// Processing is synchronous and single-threaded throughout.
#[derive(Debug)]
pub struct Dissector {
    gate: FrameGate,
    engine: ReassemblyEngine,
    stats: DissectorStats,
}

impl Dissector {
    pub fn new(profile: Profile) -> Self {
        Self {
            gate: FrameGate::new(),
            engine: ReassemblyEngine::new(profile),
            stats: DissectorStats::default(),
        }
    }

    pub fn with_config(config: &ReassemblyConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            gate: FrameGate::new(),
            engine: ReassemblyEngine::with_config(config)?,
            stats: DissectorStats::default(),
        })
    }

    /// Replaces the frame gate, e.g. with [`FrameGate::in_only`].
    pub fn with_gate(mut self, gate: FrameGate) -> Self {
        self.gate = gate;
        self
    }

    pub fn profile(&self) -> Profile {
        self.engine.profile()
    }

    pub fn stats(&self) -> DissectorStats {
        self.stats
    }

    pub fn engine_stats(&self) -> EngineStats {
        self.engine.stats()
    }

    /// Processes one captured frame and reports any decodable records.
    ///
    /// Frames failing the gate bypass the pipeline silently. Buffered and
    /// standalone frames are decoded from their own payload (unterminated
    /// trailing text is reported as a continuation); completed
    /// multi-fragment spans are decoded from the merged bytes.
    pub fn dissect(&mut self, frame: &CapturedFrame<'_>, sink: &mut dyn ReportSink) {
        self.stats.frames_seen += 1;
        if !self.gate.admit(frame) {
            return;
        }
        self.stats.frames_admitted += 1;

        match self.engine.push(frame) {
            Reassembly::Pending | Reassembly::Unfragmented => {
                self.report_span(frame.payload, frame.direction, RecordFlags::empty(), sink);
            }
            Reassembly::Merged(message) => {
                self.report_span(&message.bytes, frame.direction, RecordFlags::MERGED, sink);
            }
        }
    }

    fn report_span(
        &mut self,
        bytes: &[u8],
        direction: Direction,
        base_flags: RecordFlags,
        sink: &mut dyn ReportSink,
    ) {
        for line in split_lines(bytes) {
            let mut flags = base_flags;
            if !line.terminated {
                flags |= RecordFlags::CONTINUATION;
            }
            let record = decode_line(&line.text, direction, flags);
            self.stats.records_emitted += 1;
            sink.report(&record);
        }
    }
}
