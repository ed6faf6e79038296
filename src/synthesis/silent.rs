use super::{SynthesisError, Synthesizer, MAX_DURATION_SECS};
use crate::music::MusicalParameters;
use hound::{SampleFormat, WavSpec, WavWriter};
use std::io::Cursor;
use std::time::Duration;
use tracing::debug;

/// Renders silence as a mono 16-bit PCM WAV.
///
/// Stands in for a real generator so the full compose flow can run offline.
pub struct SilentSynthesizer {
    sample_rate: u32,
}

impl SilentSynthesizer {
    pub fn new(sample_rate: u32) -> Self {
        Self { sample_rate }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

impl Synthesizer for SilentSynthesizer {
    fn name(&self) -> &str {
        "silent"
    }

    fn synthesize(
        &self,
        parameters: &MusicalParameters,
        duration: Duration,
    ) -> Result<Vec<u8>, SynthesisError> {
        let max = Duration::from_secs(MAX_DURATION_SECS);
        if duration > max {
            return Err(SynthesisError::DurationTooLong {
                requested: duration,
                max,
            });
        }

        let spec = WavSpec {
            channels: 1,
            sample_rate: self.sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let frames = (duration.as_secs_f64() * f64::from(self.sample_rate)).round() as u64;

        debug!(
            mood = %parameters.mood,
            tempo = parameters.tempo,
            frames,
            "Rendering silent placeholder audio"
        );

        let mut buffer = Vec::new();
        {
            let mut writer = WavWriter::new(Cursor::new(&mut buffer), spec)?;
            for _ in 0..frames {
                writer.write_sample(0i16)?;
            }
            writer.finalize()?;
        }
        Ok(buffer)
    }
}
