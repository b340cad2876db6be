//! File-backed call recorder (spec.md §4.5 "Recording"): raw PCM plus
//! periodic counters, grounded on the teacher's `rtp-core::stats` style of
//! keeping lightweight running counts alongside the captured data.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use tracing::{debug, warn};

use rvoip_rtp_core::session::AudioSink;

use crate::error::{Error, Result};
use crate::types::Sample;

/// Writes raw little-endian 16-bit PCM for the mic and speaker sides to
/// separate files, and keeps a running sample count for each.
pub struct FileRecorder {
    mic_writer: Mutex<BufWriter<File>>,
    speaker_writer: Mutex<BufWriter<File>>,
    mic_samples: AtomicU64,
    speaker_samples: AtomicU64,
}

impl FileRecorder {
    pub fn create(mic_path: impl AsRef<Path>, speaker_path: impl AsRef<Path>) -> Result<Self> {
        let mic_file = File::create(mic_path.as_ref())
            .map_err(|e| Error::Other(format!("creating mic recording file: {e}")))?;
        let speaker_file = File::create(speaker_path.as_ref())
            .map_err(|e| Error::Other(format!("creating speaker recording file: {e}")))?;
        debug!(
            "recording to {} / {}",
            mic_path.as_ref().display(),
            speaker_path.as_ref().display()
        );
        Ok(Self {
            mic_writer: Mutex::new(BufWriter::new(mic_file)),
            speaker_writer: Mutex::new(BufWriter::new(speaker_file)),
            mic_samples: AtomicU64::new(0),
            speaker_samples: AtomicU64::new(0),
        })
    }

    pub fn mic_sample_count(&self) -> u64 {
        self.mic_samples.load(Ordering::Relaxed)
    }

    pub fn speaker_sample_count(&self) -> u64 {
        self.speaker_samples.load(Ordering::Relaxed)
    }

    fn write_samples(writer: &Mutex<BufWriter<File>>, samples: &[Sample], counter: &AtomicU64) {
        let mut writer = writer.lock().unwrap();
        for &sample in samples {
            if let Err(e) = writer.write_all(&sample.to_le_bytes()) {
                warn!("recorder write failed: {}", e);
                return;
            }
        }
        counter.fetch_add(samples.len() as u64, Ordering::Relaxed);
    }
}

impl AudioSink for FileRecorder {
    fn record_mic(&self, samples: &[Sample]) {
        Self::write_samples(&self.mic_writer, samples, &self.mic_samples);
    }

    fn record_speaker(&self, samples: &[Sample]) {
        Self::write_samples(&self.speaker_writer, samples, &self.speaker_samples);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn records_mic_and_speaker_to_separate_files() {
        let dir = std::env::temp_dir();
        let mic_path = dir.join(format!("media-core-test-mic-{}.pcm", std::process::id()));
        let speaker_path = dir.join(format!("media-core-test-speaker-{}.pcm", std::process::id()));

        {
            let recorder = FileRecorder::create(&mic_path, &speaker_path).unwrap();
            recorder.record_mic(&[1, 2, 3]);
            recorder.record_speaker(&[4, 5]);
            assert_eq!(recorder.mic_sample_count(), 3);
            assert_eq!(recorder.speaker_sample_count(), 2);
        }

        let mut mic_bytes = Vec::new();
        File::open(&mic_path).unwrap().read_to_end(&mut mic_bytes).unwrap();
        assert_eq!(mic_bytes.len(), 6);

        std::fs::remove_file(&mic_path).ok();
        std::fs::remove_file(&speaker_path).ok();
    }
}
