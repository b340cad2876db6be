//! Ring-buffer-backed `PcmSource`/`PcmSink` implementations, wiring the
//! audio layer's ring buffers into an `rvoip-rtp-core` session.

use std::sync::Arc;

use rvoip_rtp_core::session::{PcmSink, PcmSource};

use crate::buffer::RingBuffer;
use crate::types::Sample;

/// Feeds the RTP session's mic-read step from the microphone ring buffer.
pub struct RingBufferSource {
    buffer: Arc<RingBuffer>,
}

impl RingBufferSource {
    pub fn new(buffer: Arc<RingBuffer>) -> Self {
        Self { buffer }
    }
}

impl PcmSource for RingBufferSource {
    fn read(&mut self, buf: &mut [Sample]) -> usize {
        self.buffer.get(buf)
    }
}

/// Receives the RTP session's decoded playback samples into the voice
/// ring buffer, at unit volume (spec.md §3's volume scalar is applied by
/// the audio layer driver on its own `Put` calls, not by the network
/// side).
pub struct RingBufferSink {
    buffer: Arc<RingBuffer>,
}

impl RingBufferSink {
    pub fn new(buffer: Arc<RingBuffer>) -> Self {
        Self { buffer }
    }
}

impl PcmSink for RingBufferSink {
    fn write(&mut self, buf: &[Sample]) {
        self.buffer.put(buf, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_drains_ring_buffer() {
        let rb = Arc::new(RingBuffer::new(8).unwrap());
        rb.put(&[1, 2, 3], 1.0);
        let mut source = RingBufferSource::new(rb);
        let mut buf = [0i16; 4];
        assert_eq!(source.read(&mut buf), 3);
        assert_eq!(&buf[..3], &[1, 2, 3]);
    }

    #[test]
    fn sink_fills_ring_buffer() {
        let rb = Arc::new(RingBuffer::new(8).unwrap());
        let mut sink = RingBufferSink::new(rb.clone());
        sink.write(&[5, 6, 7]);
        assert_eq!(rb.avail_for_get(), 3);
    }
}
