//! Interarrival jitter estimation per RFC 3550 §6.4.1.

use std::time::Instant;

/// Running estimate of interarrival jitter for one RTP stream.
pub struct JitterEstimator {
    clock_rate: u32,
    jitter: f64,
    prev_transit: Option<f64>,
    prev_arrival: Option<Instant>,
}

impl JitterEstimator {
    pub fn new(clock_rate: u32) -> Self {
        Self {
            clock_rate: clock_rate.max(1),
            jitter: 0.0,
            prev_transit: None,
            prev_arrival: None,
        }
    }

    /// Feed one received packet's RTP timestamp and local arrival time,
    /// returning the updated jitter estimate in RTP timestamp units.
    pub fn update(&mut self, rtp_timestamp: u32, arrival: Instant) -> f64 {
        let arrival_units = match self.prev_arrival {
            None => {
                self.prev_arrival = Some(arrival);
                self.prev_transit = Some(rtp_timestamp as f64);
                return self.jitter;
            }
            Some(prev) => arrival.duration_since(prev).as_secs_f64() * self.clock_rate as f64,
        };

        let transit = arrival_units - rtp_timestamp as f64;
        if let Some(prev_transit) = self.prev_transit {
            let d = (transit - prev_transit).abs();
            self.jitter += (d - self.jitter) / 16.0;
        }
        self.prev_transit = Some(transit);
        self.prev_arrival = Some(arrival);
        self.jitter
    }

    pub fn jitter(&self) -> f64 {
        self.jitter
    }

    pub fn reset(&mut self) {
        self.jitter = 0.0;
        self.prev_transit = None;
        self.prev_arrival = None;
    }
}
