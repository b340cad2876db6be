//! # rvoip-media-core
//!
//! Ring buffers, sample-rate conversion, and the G.711 codec registry that
//! feed the rvoip VoIP stack's per-call RTP session. The session loop
//! itself (encode/send, receive/decode, jitter timing) lives in
//! `rvoip-rtp-core`; this crate supplies the `Codec`/`PcmSource`/`PcmSink`/
//! `AudioSink` implementations that loop plugs into.
//!
//! ## Audio layer
//!
//! Three ring buffers per call — voice (playback), urgent (tones/DTMF,
//! overlays voice), microphone (capture) — with a volume scalar applied
//! on `Put` and a `Put` that truncates rather than blocks. See
//! [`buffer::RingBuffer`].

pub mod buffer;
pub mod codec;
pub mod error;
pub mod pcm;
pub mod recorder;
pub mod resample;
pub mod types;

pub use buffer::{AudioLayerBuffers, RingBuffer};
pub use codec::{CodecDescriptor, CodecRegistry, G711Codec, G711Variant};
pub use error::{Error, Result};
pub use pcm::{RingBufferSink, RingBufferSource};
pub use recorder::FileRecorder;
pub use resample::SampleRateConverter;
pub use types::{AudioBuffer, AudioFormat, Sample, SampleRate};
