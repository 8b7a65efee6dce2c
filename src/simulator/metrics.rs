use std::time::Duration;

use crate::protocol::MessageKind;

const NANOSECONDS_PER_MICROSECOND: u128 = 1_000;

/// Per-run counters kept by the simulator.
#[derive(Debug, Default, Clone)]
pub struct Metrics {
    sent_by_kind: [u64; MessageKind::ALL.len()],
    bytes_sent: u64,
    encode_errors: u64,
    send_errors: u64,
    send_latency_total_ns: u64,
    send_latency_max_ns: u64,
}

fn kind_index(kind: MessageKind) -> usize {
    match kind {
        MessageKind::Heartbeat => 0,
        MessageKind::SystemStatus => 1,
        MessageKind::PositionFix => 2,
        MessageKind::Orientation => 3,
        MessageKind::FlightSummary => 4,
    }
}

impl Metrics {
    /// Record a datagram handed to the transport.
    pub fn record_sent(&mut self, kind: MessageKind, bytes: usize, latency: Duration) {
        self.sent_by_kind[kind_index(kind)] += 1;
        self.bytes_sent = self.bytes_sent.saturating_add(bytes as u64);

        let nanos = u64::try_from(latency.as_nanos()).unwrap_or(u64::MAX);
        self.send_latency_total_ns = self.send_latency_total_ns.saturating_add(nanos);
        self.send_latency_max_ns = self.send_latency_max_ns.max(nanos);
    }

    /// Record a message that could not be encoded.
    pub fn record_encode_error(&mut self) {
        self.encode_errors += 1;
    }

    /// Record a datagram the transport refused.
    pub fn record_send_error(&mut self) {
        self.send_errors += 1;
    }

    /// Copy out the current counters.
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            sent_by_kind: self.sent_by_kind,
            sent_messages: self.sent_by_kind.iter().sum(),
            bytes_sent: self.bytes_sent,
            encode_errors: self.encode_errors,
            send_errors: self.send_errors,
            send_latency_total_ns: self.send_latency_total_ns,
            send_latency_max_ns: self.send_latency_max_ns,
        }
    }
}

/// Lightweight snapshot of run counters.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct MetricsSnapshot {
    sent_by_kind: [u64; MessageKind::ALL.len()],
    pub sent_messages: u64,
    pub bytes_sent: u64,
    pub encode_errors: u64,
    pub send_errors: u64,
    pub send_latency_total_ns: u64,
    pub send_latency_max_ns: u64,
}

impl MetricsSnapshot {
    /// Datagrams sent for one message kind.
    #[must_use]
    pub fn sent(&self, kind: MessageKind) -> u64 {
        self.sent_by_kind[kind_index(kind)]
    }

    /// Total failures (encode + send).
    #[must_use]
    pub fn total_errors(&self) -> u64 {
        self.encode_errors + self.send_errors
    }

    /// Average send latency in microseconds.
    #[must_use]
    pub fn avg_send_latency_us(&self) -> Option<u64> {
        average_microseconds(self.send_latency_total_ns, self.sent_messages)
    }
}

#[allow(clippy::cast_possible_truncation)]
fn average_microseconds(total_ns: u64, count: u64) -> Option<u64> {
    if count == 0 {
        return None;
    }

    let total_ns_u128 = u128::from(total_ns);
    Some((total_ns_u128 / (u128::from(count) * NANOSECONDS_PER_MICROSECOND)) as u64)
}
