//! Sample-rate converter between the hardware/ring-buffer rate and a
//! codec's clock rate (spec.md §4.5 steps 2 and 5).

use tracing::debug;

use crate::types::Sample;

/// Linear-interpolation up/down converter for one fixed pair of rates.
/// Stateless across calls: each call treats its input as a complete,
/// independent block, matching how the RTP session feeds it one frame's
/// worth of samples per cycle.
pub struct SampleRateConverter {
    from_hz: u32,
    to_hz: u32,
}

impl SampleRateConverter {
    pub fn new(from_hz: u32, to_hz: u32) -> Self {
        debug!("sample rate converter {}Hz -> {}Hz", from_hz, to_hz);
        Self { from_hz, to_hz }
    }

    pub fn is_noop(&self) -> bool {
        self.from_hz == self.to_hz
    }

    pub fn convert(&self, input: &[Sample]) -> Vec<Sample> {
        if self.is_noop() || input.is_empty() {
            return input.to_vec();
        }
        let ratio = self.to_hz as f64 / self.from_hz as f64;
        let out_len = ((input.len() as f64) * ratio).round() as usize;
        let mut output = Vec::with_capacity(out_len);
        for i in 0..out_len {
            let src_pos = i as f64 / ratio;
            let idx = src_pos.floor() as usize;
            let frac = src_pos - idx as f64;
            let s0 = *input.get(idx).unwrap_or(&0) as f64;
            let s1 = *input.get(idx + 1).unwrap_or(input.last().unwrap_or(&0)) as f64;
            output.push((s0 + (s1 - s0) * frac).round().clamp(i16::MIN as f64, i16::MAX as f64) as Sample);
        }
        output
    }
}
