//! Crate for dissecting the MobiFlight serial protocol out of captured USB bulk transfers.
//!
//! The protocol is line-oriented ASCII carried over bulk endpoints, so a logical
//! command can be fragmented across several captured frames and one frame can carry
//! several commands. The pipeline runs [`gate::FrameGate`] → [`reassembly::ReassemblyEngine`] →
//! [`lines::split_lines`] → [`decode::decode_line`] and hands each [`record::CommandRecord`]
//! to a [`report::ReportSink`].
//!
//! [`dissector::Dissector`] wires the pipeline together; feed it one
//! [`frame::CapturedFrame`] per call, in capture order.

pub mod commands;
pub mod decode;
pub mod devices;
pub mod dissector;
pub mod frame;
pub mod gate;
pub mod lines;
pub mod reassembly;
pub mod record;
pub mod report;
pub mod tokenize;
