//! Report sinks consuming decoded records.

use crate::record::{CommandRecord, PROTOCOL_NAME};

/// Receives one decoded record per dissected line.
///
/// Implemented by the surrounding capture tool (tree or log consumer); the
/// crate ships [`LogSink`] and [`CollectSink`] for plain logging and tests.
pub trait ReportSink {
    fn report(&mut self, record: &CommandRecord);
}

/// Writes each record through the `log` facade at info level.
#[derive(Debug, Default)]
pub struct LogSink;

impl ReportSink for LogSink {
    fn report(&mut self, record: &CommandRecord) {
        let fields: Vec<String> = record
            .decoded
            .iter()
            .map(|f| format!("{}={}", f.label(), f.value))
            .collect();
        log::info!(
            "{} [{}] cmd={} {}",
            PROTOCOL_NAME,
            record.summary(),
            record.command_id,
            fields.join(" "),
        );
    }
}

/// Collects records in memory, in arrival order.
#[derive(Debug, Default)]
pub struct CollectSink {
    pub records: Vec<CommandRecord>,
}

impl ReportSink for CollectSink {
    fn report(&mut self, record: &CommandRecord) {
        self.records.push(record.clone());
    }
}
