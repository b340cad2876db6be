//! The per-call RTP session loop: encode/decode, immediate send, and receive
//! dequeue, run as a dedicated Tokio task per call.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use bytes::Bytes;
use tokio::net::UdpSocket;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use crate::error::{Error, Result};
use crate::packet::{RtpHeader, RtpPacket};
use crate::stats::RtpStatsManager;
use crate::{RtpSequenceNumber, RtpSsrc, RtpTimestamp};

/// One codec's encode/decode entry points, looked up from the negotiated
/// payload type. Implementations (G.711 etc.) live in `rvoip-media-core`.
pub trait Codec: Send + Sync {
    fn payload_type(&self) -> u8;
    fn clock_rate_hz(&self) -> u32;
    fn frame_size_samples(&self) -> usize;
    fn encode(&self, pcm: &[i16]) -> Bytes;
    fn decode(&self, payload: &[u8]) -> Vec<i16>;
}

/// Pull-source of linear PCM samples, backed by a ring buffer in
/// `rvoip-media-core`. Returns the number of samples actually written.
pub trait PcmSource: Send {
    fn read(&mut self, buf: &mut [i16]) -> usize;
}

/// Push-sink for decoded linear PCM samples.
pub trait PcmSink: Send {
    fn write(&mut self, buf: &[i16]);
}

/// Recording hook: receives post-resample mic/speaker buffers each loop
/// iteration, with their sample counts. One concrete file-backed
/// implementation lives alongside the session in higher layers.
pub trait AudioSink: Send + Sync {
    fn record_mic(&self, samples: &[i16]);
    fn record_speaker(&self, samples: &[i16]);
}

/// Static configuration for one RTP session.
#[derive(Debug, Clone)]
pub struct RtpSessionConfig {
    pub local_addr: SocketAddr,
    pub remote_addr: SocketAddr,
    pub ssrc: RtpSsrc,
    /// Audio layer sample rate (hardware/ring-buffer rate), distinct from
    /// the codec's own clock rate — the two may differ and require
    /// resampling (spec.md §4.5 steps 2 and 5).
    pub layer_rate_hz: u32,
}

/// A bound, symmetric RTP session: one socket used for both send and
/// receive, matching the "symmetric RTP" binding spec.md calls for.
pub struct RtpSession {
    socket: Arc<UdpSocket>,
    config: RtpSessionConfig,
    stats: RtpStatsManager,
    sequence: RtpSequenceNumber,
    timestamp: RtpTimestamp,
    recorder: Option<Arc<dyn AudioSink>>,
    recording: bool,
}

impl RtpSession {
    /// Bind the session socket and wire the remote endpoint as its sole
    /// destination (spec.md §4.5: "binds a symmetric RTP session... adds
    /// the remote as destination").
    pub async fn bind(config: RtpSessionConfig) -> Result<Self> {
        let socket = UdpSocket::bind(config.local_addr).await?;
        socket.connect(config.remote_addr).await?;
        debug!(
            "RTP session bound {} <-> {}",
            config.local_addr, config.remote_addr
        );
        Ok(Self {
            socket: Arc::new(socket),
            stats: RtpStatsManager::new(config.layer_rate_hz),
            sequence: 0,
            timestamp: 0,
            recorder: None,
            recording: false,
            config,
        })
    }

    pub fn set_recorder(&mut self, recorder: Arc<dyn AudioSink>) {
        self.recorder = Some(recorder);
        self.recording = true;
    }

    pub fn stats(&self) -> crate::stats::RtpStats {
        self.stats.get_stats()
    }

    /// Spawn the dedicated per-call loop described by spec.md §4.5, running
    /// until `stop_rx` fires or a write error terminates it.
    pub fn spawn(
        mut self,
        codec: Arc<dyn Codec>,
        mut mic_source: Box<dyn PcmSource>,
        mut speaker_sink: Box<dyn PcmSink>,
        mut stop_rx: mpsc::Receiver<()>,
    ) -> JoinHandle<Result<()>> {
        tokio::spawn(async move {
            let frame_size = codec.frame_size_samples();
            let period = Duration::from_secs_f64(frame_size as f64 / codec.clock_rate_hz() as f64);
            let layer_samples_per_period =
                ((self.config.layer_rate_hz as f64) * period.as_secs_f64()).round() as usize;

            let mut ticker = tokio::time::interval(period);
            let mut recv_buf = vec![0u8; 1500];

            loop {
                tokio::select! {
                    _ = stop_rx.recv() => {
                        debug!("RTP session stop requested");
                        return Ok(());
                    }
                    _ = ticker.tick() => {
                        if let Err(e) = self
                            .run_one_cycle(
                                &*codec,
                                &mut *mic_source,
                                &mut *speaker_sink,
                                layer_samples_per_period,
                                &mut recv_buf,
                            )
                            .await
                        {
                            error!("RTP session terminating after write error: {}", e);
                            return Err(e);
                        }
                    }
                }
            }
        })
    }

    async fn run_one_cycle(
        &mut self,
        codec: &dyn Codec,
        mic_source: &mut dyn PcmSource,
        speaker_sink: &mut dyn PcmSink,
        layer_samples_per_period: usize,
        recv_buf: &mut [u8],
    ) -> Result<()> {
        // 1. Read PCM from the mic ring buffer at the layer rate.
        let mut mic_samples = vec![0i16; layer_samples_per_period];
        let read = mic_source.read(&mut mic_samples);
        mic_samples.truncate(read);

        // 2. Downsample to the codec rate if they differ.
        let codec_rate = codec.clock_rate_hz();
        let layer_rate = self.config.layer_rate_hz;
        let for_encode = if codec_rate != layer_rate {
            resample(&mic_samples, layer_rate, codec_rate)
        } else {
            mic_samples.clone()
        };

        if let Some(recorder) = &self.recorder {
            if self.recording {
                recorder.record_mic(&for_encode);
            }
        }

        // 3 & 4. Encode and send immediately, bypassing any send queue, with
        // a monotonic timestamp incremented by frame_size_samples.
        let payload = codec.encode(&for_encode);
        let mut header = RtpHeader::new(codec.payload_type(), 0, self.sequence, self.config.ssrc);
        header.timestamp = self.timestamp;
        let packet = RtpPacket::new(header, payload);
        let encoded = packet.encode();

        match self.socket.send(&encoded).await {
            Ok(_) => {
                self.stats.update_sent(encoded.len());
            }
            Err(e) => return Err(Error::IoError(e)),
        }

        self.sequence = self.sequence.wrapping_add(1);
        self.timestamp = self
            .timestamp
            .wrapping_add(codec.frame_size_samples() as u32);

        // 5. Dequeue one RTP packet from the receive side, if present.
        match tokio::time::timeout(Duration::from_millis(0), self.socket.recv(recv_buf)).await {
            Ok(Ok(len)) => {
                match RtpPacket::decode(Bytes::copy_from_slice(&recv_buf[..len])) {
                    Ok(received) => {
                        self.stats
                            .update_received(received.header.sequence_number, received.header.timestamp, len, Instant::now());
                        let decoded = codec.decode(&received.payload);
                        let for_playback = if codec_rate != layer_rate {
                            resample(&decoded, codec_rate, layer_rate)
                        } else {
                            decoded
                        };
                        if let Some(recorder) = &self.recorder {
                            if self.recording {
                                recorder.record_speaker(&for_playback);
                            }
                        }
                        speaker_sink.write(&for_playback);
                    }
                    Err(e) => warn!("dropping unparseable RTP packet: {}", e),
                }
            }
            Ok(Err(e)) => warn!("RTP receive error: {}", e),
            Err(_) => {
                // No packet available this cycle; recorder still captures
                // the mic side per spec.md's silence-handling note.
            }
        }

        Ok(())
    }
}

/// Naive linear-interpolation resampler, matching the ring-buffer layer's
/// existing integer-rate conversion needs. A richer filter lives in
/// `rvoip-media-core`'s sample-rate converter; this is the fallback used
/// when a session is driven directly without that component wired in.
fn resample(input: &[i16], from_rate: u32, to_rate: u32) -> Vec<i16> {
    if input.is_empty() || from_rate == to_rate {
        return input.to_vec();
    }
    let ratio = to_rate as f64 / from_rate as f64;
    let out_len = ((input.len() as f64) * ratio).round() as usize;
    let mut output = Vec::with_capacity(out_len);
    for i in 0..out_len {
        let src_pos = i as f64 / ratio;
        let idx = src_pos.floor() as usize;
        let frac = src_pos - idx as f64;
        let s0 = *input.get(idx).unwrap_or(&0) as f64;
        let s1 = *input.get(idx + 1).unwrap_or(&s0.round().clamp(i16::MIN as f64, i16::MAX as f64) as i16) as f64;
        output.push((s0 + (s1 - s0) * frac).round() as i16);
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SilentSource;
    impl PcmSource for SilentSource {
        fn read(&mut self, buf: &mut [i16]) -> usize {
            buf.fill(0);
            buf.len()
        }
    }

    struct DiscardSink;
    impl PcmSink for DiscardSink {
        fn write(&mut self, _buf: &[i16]) {}
    }

    struct NullCodec;
    impl Codec for NullCodec {
        fn payload_type(&self) -> u8 { 0 }
        fn clock_rate_hz(&self) -> u32 { 8000 }
        fn frame_size_samples(&self) -> usize { 160 }
        fn encode(&self, pcm: &[i16]) -> Bytes {
            Bytes::copy_from_slice(&pcm.iter().map(|s| *s as u8).collect::<Vec<u8>>())
        }
        fn decode(&self, payload: &[u8]) -> Vec<i16> {
            payload.iter().map(|b| *b as i16).collect()
        }
    }

    #[tokio::test]
    async fn bind_and_run_one_cycle() {
        let a = RtpSessionConfig {
            local_addr: "127.0.0.1:0".parse().unwrap(),
            remote_addr: "127.0.0.1:0".parse().unwrap(),
            ssrc: 0x1234,
            layer_rate_hz: 8000,
        };
        // Bind independently then connect the two sockets to each other.
        let sock_a = UdpSocket::bind(a.local_addr).await.unwrap();
        let sock_b = UdpSocket::bind(a.local_addr).await.unwrap();
        let addr_b = sock_b.local_addr().unwrap();
        drop(sock_b);
        sock_a.connect(addr_b).await.unwrap();

        let mut session = RtpSession {
            socket: Arc::new(sock_a),
            stats: RtpStatsManager::new(8000),
            sequence: 0,
            timestamp: 0,
            recorder: None,
            recording: false,
            config: RtpSessionConfig { remote_addr: addr_b, ..a },
        };

        let codec = NullCodec;
        let mut recv_buf = vec![0u8; 1500];
        let result = session
            .run_one_cycle(&codec, &mut SilentSource, &mut DiscardSink, 160, &mut recv_buf)
            .await;
        assert!(result.is_ok());
        assert_eq!(session.stats().packets_sent, 1);
    }

    #[test]
    fn resample_upsamples_length_proportionally() {
        let input = vec![0i16; 160];
        let out = resample(&input, 8000, 16000);
        assert_eq!(out.len(), 320);
    }
}
