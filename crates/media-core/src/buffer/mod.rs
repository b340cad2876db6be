//! Fixed-capacity circular sample buffer with independent read/write
//! indices and a volume scalar on `Put`, matching the audio layer's
//! voice/urgent/microphone ring buffers (spec.md §3).

use std::sync::Mutex;

use crate::error::{Error, Result};
use crate::types::Sample;

/// One ring buffer instance. Not `Clone`; share via `Arc<RingBuffer>` —
/// every access already goes through an internal mutex since the driver
/// and RTP threads contend on it.
pub struct RingBuffer {
    inner: Mutex<Inner>,
    capacity: usize,
}

struct Inner {
    data: Vec<Sample>,
    read_pos: usize,
    write_pos: usize,
    len: usize,
}

impl RingBuffer {
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity(capacity));
        }
        Ok(Self {
            inner: Mutex::new(Inner {
                data: vec![0; capacity],
                read_pos: 0,
                write_pos: 0,
                len: 0,
            }),
            capacity,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Space available for the next `Put`, without evicting unread data.
    pub fn avail_for_put(&self) -> usize {
        let inner = self.inner.lock().unwrap();
        self.capacity - inner.len
    }

    /// Samples available for the next `get`.
    pub fn avail_for_get(&self) -> usize {
        let inner = self.inner.lock().unwrap();
        inner.len
    }

    /// Write `samples`, scaled by `volume` (0.0-1.0+), truncating to
    /// `AvailForPut` rather than blocking or overwriting unread data.
    /// Returns the number of samples actually written.
    pub fn put(&self, samples: &[Sample], volume: f32) -> usize {
        let mut inner = self.inner.lock().unwrap();
        let avail = self.capacity - inner.len;
        let to_copy = samples.len().min(avail);

        for &s in &samples[..to_copy] {
            let scaled = (s as f32 * volume).clamp(i16::MIN as f32, i16::MAX as f32) as i16;
            let pos = inner.write_pos;
            inner.data[pos] = scaled;
            inner.write_pos = (pos + 1) % self.capacity;
        }
        inner.len += to_copy;
        to_copy
    }

    /// Read up to `buf.len()` samples, consuming them. Returns the number
    /// of samples actually read; the rest of `buf` is left untouched.
    pub fn get(&self, buf: &mut [Sample]) -> usize {
        let mut inner = self.inner.lock().unwrap();
        let to_copy = buf.len().min(inner.len);

        for slot in buf.iter_mut().take(to_copy) {
            let pos = inner.read_pos;
            *slot = inner.data[pos];
            inner.read_pos = (pos + 1) % self.capacity;
        }
        inner.len -= to_copy;
        to_copy
    }

    pub fn flush(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.read_pos = 0;
        inner.write_pos = 0;
        inner.len = 0;
    }
}

/// The three ring buffers carried per audio layer: voice (main playback),
/// urgent (tones/DTMF, overlays voice), and microphone (capture).
pub struct AudioLayerBuffers {
    pub voice: RingBuffer,
    pub urgent: RingBuffer,
    pub microphone: RingBuffer,
}

impl AudioLayerBuffers {
    pub fn new(capacity: usize) -> Result<Self> {
        Ok(Self {
            voice: RingBuffer::new(capacity)?,
            urgent: RingBuffer::new(capacity)?,
            microphone: RingBuffer::new(capacity)?,
        })
    }

    /// Read playback samples, preferring the urgent buffer (tones/DTMF)
    /// over the voice buffer wherever urgent has data, matching the
    /// overlay behavior described in spec.md §3.
    pub fn get_playback(&self, buf: &mut [Sample]) -> usize {
        let from_urgent = self.urgent.get(buf);
        if from_urgent == buf.len() || self.urgent.avail_for_get() > 0 {
            return from_urgent;
        }
        from_urgent + self.voice.get(&mut buf[from_urgent..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_truncates_rather_than_blocking() {
        let rb = RingBuffer::new(4).unwrap();
        let written = rb.put(&[1, 2, 3, 4, 5, 6], 1.0);
        assert_eq!(written, 4);
        assert_eq!(rb.avail_for_get(), 4);
        assert_eq!(rb.avail_for_put(), 0);
    }

    #[test]
    fn avail_invariant_holds_after_put_and_get() {
        let rb = RingBuffer::new(8).unwrap();
        rb.put(&[1, 2, 3], 1.0);
        assert_eq!(rb.avail_for_put() + rb.avail_for_get(), rb.capacity());

        let mut out = [0i16; 2];
        rb.get(&mut out);
        assert_eq!(rb.avail_for_put() + rb.avail_for_get(), rb.capacity());
        assert_eq!(out, [1, 2]);
    }

    #[test]
    fn volume_scales_samples_on_put() {
        let rb = RingBuffer::new(4).unwrap();
        rb.put(&[1000], 0.5);
        let mut out = [0i16; 1];
        rb.get(&mut out);
        assert_eq!(out[0], 500);
    }

    #[test]
    fn zero_capacity_is_rejected() {
        assert!(RingBuffer::new(0).is_err());
    }

    #[test]
    fn urgent_overlays_voice_during_playback() {
        let layers = AudioLayerBuffers::new(8).unwrap();
        layers.voice.put(&[1, 1, 1, 1], 1.0);
        layers.urgent.put(&[9, 9], 1.0);

        let mut out = [0i16; 2];
        let n = layers.get_playback(&mut out);
        assert_eq!(n, 2);
        assert_eq!(out, [9, 9]);
    }
}
