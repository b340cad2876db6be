//! Audio sample/format types shared by the ring buffers, resampler, and
//! codec registry.

use bytes::Bytes;

/// One linear PCM sample.
pub type Sample = i16;

/// Sample rates this core actually negotiates. G.711 only ever runs at
/// 8kHz; 16kHz/48kHz cover the hardware/ring-buffer side when it differs
/// from the codec's clock rate (spec.md §4.5 steps 2 and 5).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleRate {
    Rate8000,
    Rate16000,
    Rate48000,
}

impl SampleRate {
    pub fn as_hz(&self) -> u32 {
        match self {
            SampleRate::Rate8000 => 8000,
            SampleRate::Rate16000 => 16000,
            SampleRate::Rate48000 => 48000,
        }
    }
}

impl Default for SampleRate {
    fn default() -> Self {
        SampleRate::Rate8000
    }
}

/// Channel count, bit depth, and sample rate of an `AudioBuffer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioFormat {
    pub channels: u8,
    pub bit_depth: u8,
    pub sample_rate: SampleRate,
}

impl Default for AudioFormat {
    fn default() -> Self {
        Self {
            channels: 1,
            bit_depth: 16,
            sample_rate: SampleRate::default(),
        }
    }
}

impl AudioFormat {
    pub fn new(channels: u8, bit_depth: u8, sample_rate: SampleRate) -> Self {
        Self { channels, bit_depth, sample_rate }
    }

    pub fn mono_16bit(sample_rate: SampleRate) -> Self {
        Self::new(1, 16, sample_rate)
    }

    pub fn stereo_16bit(sample_rate: SampleRate) -> Self {
        Self::new(2, 16, sample_rate)
    }

    /// Standard narrowband telephony format (mono, 16-bit, 8kHz).
    pub fn telephony() -> Self {
        Self::mono_16bit(SampleRate::Rate8000)
    }
}

/// A chunk of audio, either linear PCM or codec-encoded, tagged with its
/// format.
#[derive(Debug, Clone)]
pub struct AudioBuffer {
    pub data: Bytes,
    pub format: AudioFormat,
}

impl AudioBuffer {
    pub fn new(data: Bytes, format: AudioFormat) -> Self {
        Self { data, format }
    }

    pub fn samples(&self) -> usize {
        let bytes_per_sample = (self.format.bit_depth / 8) as usize;
        self.data.len() / bytes_per_sample / (self.format.channels as usize)
    }

    pub fn duration_ms(&self) -> u32 {
        let samples = self.samples() as u32;
        (samples * 1000) / self.format.sample_rate.as_hz()
    }
}
