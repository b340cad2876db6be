//! RTP Statistics Module
//!
//! This module provides mechanisms for collecting and analyzing RTP session
//! statistics including packet loss, jitter, and other metrics defined in
//! RFC 3550.

pub mod jitter;
pub mod loss;

pub use jitter::JitterEstimator;
pub use loss::{PacketLossTracker, PacketLossStats, PacketLossResult};

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::RtpSequenceNumber;
use crate::packet::rtcp::NtpTimestamp;

/// RTP packet statistics
#[derive(Debug, Clone, Default)]
pub struct RtpStats {
    /// Total number of RTP packets sent
    pub packets_sent: u64,

    /// Total number of RTP bytes sent
    pub bytes_sent: u64,

    /// Total number of RTP packets received
    pub packets_received: u64,

    /// Total number of RTP bytes received
    pub bytes_received: u64,

    /// Packets lost (based on sequence numbers)
    pub packets_lost: u64,

    /// Fraction of packets lost since last report (0-255 scale where 255 = 100%)
    pub fraction_lost: u8,

    /// Duplicate packets received
    pub packets_duplicated: u64,

    /// Out-of-order packets received
    pub packets_out_of_order: u64,

    /// Interarrival jitter (in RTP timestamp units)
    pub jitter: f64,

    /// Round-trip time (in milliseconds)
    pub round_trip_time_ms: Option<f64>,

    /// Last sequence number received
    pub last_seq: Option<RtpSequenceNumber>,

    /// Estimated highest sequence number
    pub highest_seq: u32,

    /// First sequence number received (base sequence)
    pub base_seq: Option<RtpSequenceNumber>,

    /// Last SR timestamp received
    pub last_sr_timestamp: Option<NtpTimestamp>,

    /// Delay since last SR (in milliseconds)
    pub delay_since_last_sr_ms: Option<u32>,
}

/// RTP statistics manager combining jitter and loss tracking for one session.
pub struct RtpStatsManager {
    /// Overall session statistics
    stats: Arc<Mutex<RtpStats>>,

    /// Jitter estimator for accurate jitter calculations
    jitter_estimator: JitterEstimator,

    /// Packet loss tracker
    loss_tracker: PacketLossTracker,

    /// Time of last stats reset
    start_time: Instant,

    /// Clock rate for timestamp conversions
    clock_rate: u32,
}

impl RtpStatsManager {
    /// Create a new RTP statistics manager
    pub fn new(clock_rate: u32) -> Self {
        Self {
            stats: Arc::new(Mutex::new(RtpStats::default())),
            jitter_estimator: JitterEstimator::new(clock_rate),
            loss_tracker: PacketLossTracker::new(),
            start_time: Instant::now(),
            clock_rate,
        }
    }

    /// Get a copy of the current statistics
    pub fn get_stats(&self) -> RtpStats {
        self.stats.lock().unwrap().clone()
    }

    /// Reset all statistics
    pub fn reset(&mut self) {
        *self.stats.lock().unwrap() = RtpStats::default();
        self.jitter_estimator.reset();
        self.loss_tracker.reset();
        self.start_time = Instant::now();
    }

    /// Get the duration since start or last reset
    pub fn duration(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Update statistics for a sent packet
    pub fn update_sent(&mut self, bytes: usize) {
        let mut stats = self.stats.lock().unwrap();
        stats.packets_sent += 1;
        stats.bytes_sent += bytes as u64;
    }

    /// Update statistics for a received packet
    pub fn update_received(&mut self, seq: RtpSequenceNumber, timestamp: u32, bytes: usize, arrival_time: Instant) {
        let mut stats = self.stats.lock().unwrap();

        stats.packets_received += 1;
        stats.bytes_received += bytes as u64;

        let result = self.loss_tracker.process(seq);

        match result {
            PacketLossResult::FirstPacket { seq } => {
                stats.base_seq = Some(seq);
                stats.highest_seq = seq as u32;
                stats.last_seq = Some(seq);
            }
            PacketLossResult::Sequential { seq } => {
                stats.highest_seq = seq as u32;
                stats.last_seq = Some(seq);
            }
            PacketLossResult::Gap { seq, expected: _, lost } => {
                stats.packets_lost += lost as u64;
                stats.highest_seq = seq as u32;
                stats.last_seq = Some(seq);
            }
            PacketLossResult::Duplicate { .. } => {
                stats.packets_duplicated += 1;
            }
            PacketLossResult::Reordered { seq, .. } => {
                stats.packets_out_of_order += 1;
                stats.last_seq = Some(seq);
            }
            PacketLossResult::Unknown => {}
        }

        let jitter = self.jitter_estimator.update(timestamp, arrival_time);
        stats.jitter = jitter;

        let loss_stats = self.loss_tracker.get_stats();
        stats.fraction_lost = loss_stats.fraction_lost;
    }

    /// Update round-trip time
    pub fn update_rtt(&self, rtt_ms: f64) {
        let mut stats = self.stats.lock().unwrap();
        stats.round_trip_time_ms = Some(rtt_ms);
    }

    /// Update RTCP SR information
    pub fn update_sr_info(&self, last_sr: NtpTimestamp, delay_ms: u32) {
        let mut stats = self.stats.lock().unwrap();
        stats.last_sr_timestamp = Some(last_sr);
        stats.delay_since_last_sr_ms = Some(delay_ms);
    }

    /// Get the jitter estimator
    pub fn jitter_estimator(&self) -> &JitterEstimator {
        &self.jitter_estimator
    }

    /// Get the loss tracker
    pub fn loss_tracker(&self) -> &PacketLossTracker {
        &self.loss_tracker
    }

    pub fn clock_rate(&self) -> u32 {
        self.clock_rate
    }
}

impl Default for RtpStatsManager {
    fn default() -> Self {
        Self::new(8000) // Default 8kHz clock rate
    }
}

/// Check if sequence 'a' is older than sequence 'b', handling wraparound
fn is_sequence_older(a: RtpSequenceNumber, b: RtpSequenceNumber) -> bool {
    if a == b {
        return false; // A sequence is not older than itself
    }

    // Compare with wraparound as per RFC 3550
    let half_range = 0x8000;
    (b > a && b - a < half_range) || (a > b && a - b >= half_range)
}
