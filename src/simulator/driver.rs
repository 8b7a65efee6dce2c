//! Paced send loop.

use std::future::Future;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use tracing::{debug, info, instrument, warn};

#[cfg(feature = "debug-tools")]
use crate::transport::PcapRecorder;
use crate::protocol::{Encoder, MessageKind, Telemetry};
use crate::transport::{DatagramSink, SocketBinding, SocketError};

use super::{Metrics, MetricsSnapshot, Scenario, SimulatorConfig};

/// Outcome of one message within a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Handed to the transport with the given sequence number.
    Sent {
        /// Sequence stamped in the header
        sequence: u8,
        /// Datagram length
        bytes: usize,
    },
    /// Encoding failed; nothing was sent.
    EncodeFailed,
    /// The transport refused the datagram.
    SendFailed,
}

/// Result of one full cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    /// 1-based cycle number
    pub cycle: u64,
    /// One entry per message, in broadcast order
    pub deliveries: Vec<(MessageKind, Delivery)>,
}

impl CycleReport {
    /// Number of messages handed to the transport.
    #[must_use]
    pub fn sent(&self) -> usize {
        self.deliveries
            .iter()
            .filter(|(_, delivery)| matches!(delivery, Delivery::Sent { .. }))
            .count()
    }
}

/// Totals for a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Cycles completed
    pub cycles: u64,
    /// Whether the run ended on the shutdown signal
    pub interrupted: bool,
    /// Counters at the end of the run
    pub metrics: MetricsSnapshot,
}

/// Broadcasts the scenario in a fixed cycle over a datagram sink.
#[derive(Debug)]
pub struct Simulator<S> {
    config: SimulatorConfig,
    encoder: Encoder,
    scenario: Scenario,
    sink: S,
    started: Instant,
    cycles: u64,
    metrics: Metrics,
    #[cfg(feature = "debug-tools")]
    capture: Option<PcapRecorder>,
}

impl Simulator<SocketBinding> {
    /// Bind a UDP socket per `config` and build a simulator on top of it.
    pub fn bind(config: SimulatorConfig) -> Result<Self, SocketError> {
        let socket = SocketBinding::bind(config.bind)?;
        info!(local = %socket.local_addr()?, destination = %config.destination, "socket bound");
        Self::with_sink(config, socket)
    }
}

impl<S: DatagramSink> Simulator<S> {
    /// Build a simulator that sends through `sink`.
    pub fn with_sink(config: SimulatorConfig, sink: S) -> Result<Self, SocketError> {
        #[cfg(feature = "debug-tools")]
        let capture = match &config.pcap_path {
            Some(path) => Some(PcapRecorder::create(path)?),
            None => None,
        };

        Ok(Self {
            encoder: Encoder::new(config.system_id, config.component_id),
            config,
            scenario: Scenario::default(),
            sink,
            started: Instant::now(),
            cycles: 0,
            metrics: Metrics::default(),
            #[cfg(feature = "debug-tools")]
            capture,
        })
    }

    /// Replace the broadcast scenario.
    #[must_use]
    pub fn with_scenario(mut self, scenario: Scenario) -> Self {
        self.scenario = scenario;
        self
    }

    /// Sequence number the next frame will carry.
    #[must_use]
    pub fn sequence(&self) -> u8 {
        self.encoder.sequence()
    }

    /// Cycles completed so far.
    #[must_use]
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Current counters.
    #[must_use]
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Borrow the sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Encode and send every message of one cycle, pausing
    /// `message_interval` after each.
    ///
    /// A failure on one message is logged and the cycle moves on.
    pub async fn run_cycle(&mut self) -> CycleReport {
        let unix_time = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        let records = self.scenario.snapshot(unix_time, self.started.elapsed());

        self.cycles += 1;
        debug!(cycle = self.cycles, "starting cycle");

        let mut deliveries = Vec::with_capacity(records.len());
        for record in &records {
            let delivery = self.send_one(record);
            deliveries.push((record.kind(), delivery));
            pause(self.config.message_interval).await;
        }

        CycleReport {
            cycle: self.cycles,
            deliveries,
        }
    }

    /// Run cycles separated by `cycle_interval` until `max_cycles` is reached
    /// or `shutdown` resolves.
    ///
    /// A cycle interrupted by `shutdown` is abandoned between messages; every
    /// frame already produced was sent whole.
    pub async fn run_until<F>(&mut self, shutdown: F) -> RunSummary
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut interrupted = false;

        while self.config.max_cycles.is_none_or(|max| self.cycles < max) {
            tokio::select! {
                () = &mut shutdown => {
                    interrupted = true;
                    break;
                }
                report = self.run_cycle() => {
                    info!(cycle = report.cycle, sent = report.sent(), "cycle complete");
                }
            }

            if self.config.max_cycles.is_some_and(|max| self.cycles >= max) {
                break;
            }

            tokio::select! {
                () = &mut shutdown => {
                    interrupted = true;
                    break;
                }
                () = pause(self.config.cycle_interval) => {}
            }
        }

        let metrics = self.metrics.snapshot();
        info!(
            cycles = self.cycles,
            sent = metrics.sent_messages,
            errors = metrics.total_errors(),
            interrupted,
            "simulator stopped"
        );

        RunSummary {
            cycles: self.cycles,
            interrupted,
            metrics,
        }
    }

    #[instrument(level = "debug", skip(self, record), fields(kind = %record.kind()))]
    fn send_one(&mut self, record: &Telemetry) -> Delivery {
        let message = match self.encoder.encode_telemetry(record) {
            Ok(message) => message,
            Err(err) => {
                warn!(error = %err, "failed to encode message");
                self.metrics.record_encode_error();
                return Delivery::EncodeFailed;
            }
        };

        let start = Instant::now();
        match self
            .sink
            .send_datagram(message.as_bytes(), self.config.destination)
        {
            Ok(bytes) => {
                self.metrics
                    .record_sent(message.kind(), bytes, start.elapsed());
                #[cfg(feature = "debug-tools")]
                if let Some(capture) = &self.capture {
                    if let Err(err) = capture.record(message.as_bytes()) {
                        debug!(error = ?err, "failed to record outbound datagram");
                    }
                }
                info!(seq = message.sequence(), "sent {}", self.scenario.describe(record));
                Delivery::Sent {
                    sequence: message.sequence(),
                    bytes,
                }
            }
            Err(err) => {
                warn!(seq = message.sequence(), error = %err, "failed to send datagram");
                self.metrics.record_send_error();
                Delivery::SendFailed
            }
        }
    }
}

async fn pause(duration: Duration) {
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;
    use std::sync::Mutex;

    use crate::protocol::verify;

    #[derive(Default)]
    struct Recorder {
        sent: Mutex<Vec<Vec<u8>>>,
        fail_kind: Option<u8>,
    }

    impl DatagramSink for Recorder {
        fn send_datagram(&self, bytes: &[u8], _dest: SocketAddr) -> Result<usize, SocketError> {
            if self.fail_kind == Some(bytes[5]) {
                return Err(SocketError::Io(std::io::Error::other("link down")));
            }
            self.sent.lock().unwrap().push(bytes.to_vec());
            Ok(bytes.len())
        }
    }

    fn fast_config() -> SimulatorConfig {
        SimulatorConfig {
            message_interval: Duration::ZERO,
            cycle_interval: Duration::ZERO,
            ..SimulatorConfig::default()
        }
    }

    #[tokio::test]
    async fn cycle_sends_all_kinds_in_order() {
        let mut sim = Simulator::with_sink(fast_config(), Recorder::default()).unwrap();
        let report = sim.run_cycle().await;

        assert_eq!(report.sent(), 5);
        let sent = sim.sink().sent.lock().unwrap();
        let ids: Vec<u8> = sent.iter().map(|frame| frame[5]).collect();
        assert_eq!(ids, [0, 1, 24, 30, 74]);
        for (expected_seq, frame) in sent.iter().enumerate() {
            assert_eq!(usize::from(frame[2]), expected_seq);
            assert!(verify(frame).is_ok());
        }
    }

    #[tokio::test]
    async fn send_failure_does_not_abort_cycle() {
        let sink = Recorder {
            fail_kind: Some(24),
            ..Recorder::default()
        };
        let mut sim = Simulator::with_sink(fast_config(), sink).unwrap();
        let report = sim.run_cycle().await;

        assert_eq!(report.sent(), 4);
        assert_eq!(report.deliveries[2], (MessageKind::PositionFix, Delivery::SendFailed));
        assert_eq!(sim.metrics().send_errors, 1);
        // the failed frame still consumed its sequence number
        assert_eq!(sim.sequence(), 5);
    }

    #[tokio::test]
    async fn encode_failure_does_not_abort_cycle() {
        let scenario = Scenario {
            latitude: 300.0,
            ..Scenario::default()
        };
        let mut sim = Simulator::with_sink(fast_config(), Recorder::default())
            .unwrap()
            .with_scenario(scenario);
        let report = sim.run_cycle().await;

        assert_eq!(report.deliveries[2], (MessageKind::PositionFix, Delivery::EncodeFailed));
        assert_eq!(report.sent(), 4);
        let metrics = sim.metrics();
        assert_eq!(metrics.encode_errors, 1);
        assert_eq!(metrics.send_errors, 0);
        // the rejected frame took no sequence number
        assert_eq!(sim.sequence(), 4);

        let sent = sim.sink().sent.lock().unwrap();
        let stamped: Vec<(u8, u8)> = sent.iter().map(|frame| (frame[5], frame[2])).collect();
        assert_eq!(stamped, [(0, 0), (1, 1), (30, 2), (74, 3)]);
    }

    #[tokio::test]
    async fn run_stops_after_max_cycles() {
        let config = SimulatorConfig {
            max_cycles: Some(3),
            ..fast_config()
        };
        let mut sim = Simulator::with_sink(config, Recorder::default()).unwrap();
        let summary = sim.run_until(std::future::pending()).await;

        assert_eq!(summary.cycles, 3);
        assert!(!summary.interrupted);
        assert_eq!(summary.metrics.sent_messages, 15);
        assert_eq!(summary.metrics.sent(MessageKind::Heartbeat), 3);
        assert_eq!(sim.sink().sent.lock().unwrap().len(), 15);
    }

    #[tokio::test]
    async fn shutdown_interrupts_run() {
        let config = SimulatorConfig {
            cycle_interval: Duration::from_secs(3600),
            ..fast_config()
        };
        let mut sim = Simulator::with_sink(config, Recorder::default()).unwrap();
        let shutdown = tokio::time::sleep(Duration::from_millis(50));
        let summary = sim.run_until(shutdown).await;

        assert!(summary.interrupted);
        assert_eq!(summary.cycles, 1);
        assert_eq!(summary.metrics.sent_messages, 5);
    }
}
