//! Synthesized sound effects
//!
//! The handful of blips the games need are rendered to PCM in code and fed
//! to the engine's audio loader as WAV buffers, so no sound files ship with
//! the repository. Each effect is a single tone with an optional pitch
//! sweep and a linear fade-out.

use macroquad::audio::{load_sound_from_bytes, play_sound, PlaySoundParams, Sound};

/// Output sample rate. Blips do not need more.
pub const SAMPLE_RATE: u32 = 22_050;

/// Tone shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wave {
    Square,
    Sine,
}

/// Render a mono 16-bit WAV buffer: one tone sweeping `freq_start` to
/// `freq_end` over `secs`, with a linear fade to silence.
pub fn synth_wav(freq_start: f32, freq_end: f32, secs: f32, wave: Wave, volume: f32) -> Vec<u8> {
    let sample_count = (secs * SAMPLE_RATE as f32) as usize;
    let mut samples = Vec::with_capacity(sample_count);

    let mut phase = 0.0f32;
    for i in 0..sample_count {
        let t = i as f32 / sample_count.max(1) as f32;
        let freq = freq_start + (freq_end - freq_start) * t;
        phase += freq / SAMPLE_RATE as f32;

        let raw = match wave {
            Wave::Square => {
                if phase.fract() < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Wave::Sine => (phase * std::f32::consts::TAU).sin(),
        };

        let envelope = 1.0 - t;
        let value = (raw * envelope * volume * i16::MAX as f32) as i16;
        samples.push(value);
    }

    encode_wav(&samples)
}

/// Wrap raw samples in a canonical 44-byte RIFF/WAVE header.
fn encode_wav(samples: &[i16]) -> Vec<u8> {
    let data_len = (samples.len() * 2) as u32;
    let mut out = Vec::with_capacity(44 + data_len as usize);

    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");

    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes()); // PCM fmt chunk size
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM
    out.extend_from_slice(&1u16.to_le_bytes()); // mono
    out.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    out.extend_from_slice(&(SAMPLE_RATE * 2).to_le_bytes()); // byte rate
    out.extend_from_slice(&2u16.to_le_bytes()); // block align
    out.extend_from_slice(&16u16.to_le_bytes()); // bits per sample

    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    for s in samples {
        out.extend_from_slice(&s.to_le_bytes());
    }
    out
}

/// All effects, loaded once at startup
pub struct SoundBank {
    /// Snake eats an apple
    pub eat: Sound,
    /// Snake dies, flappy hits a column
    pub crash: Sound,
    /// Flappy wing beat
    pub flap: Sound,
    /// Flappy passes a column
    pub score: Sound,
    /// Platformer jump
    pub jump: Sound,
    /// Gem collected
    pub pickup: Sound,
    /// Slingshot target knocked out
    pub pop: Sound,
    /// Slingshot ball released
    pub launch: Sound,
}

impl SoundBank {
    pub async fn load() -> Result<Self, macroquad::Error> {
        Ok(Self {
            eat: load_sound_from_bytes(&synth_wav(880.0, 880.0, 0.08, Wave::Square, 0.4)).await?,
            crash: load_sound_from_bytes(&synth_wav(220.0, 60.0, 0.40, Wave::Square, 0.5)).await?,
            flap: load_sound_from_bytes(&synth_wav(300.0, 520.0, 0.06, Wave::Sine, 0.5)).await?,
            score: load_sound_from_bytes(&synth_wav(660.0, 660.0, 0.07, Wave::Square, 0.4)).await?,
            jump: load_sound_from_bytes(&synth_wav(250.0, 500.0, 0.12, Wave::Square, 0.4)).await?,
            pickup: load_sound_from_bytes(&synth_wav(900.0, 1400.0, 0.10, Wave::Sine, 0.5)).await?,
            pop: load_sound_from_bytes(&synth_wav(160.0, 50.0, 0.20, Wave::Square, 0.5)).await?,
            launch: load_sound_from_bytes(&synth_wav(200.0, 350.0, 0.10, Wave::Sine, 0.5)).await?,
        })
    }

    /// Fire-and-forget playback at effect volume.
    pub fn play(&self, sound: &Sound) {
        play_sound(
            sound,
            PlaySoundParams {
                looped: false,
                volume: 0.6,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wav_header() {
        let wav = synth_wav(440.0, 440.0, 0.1, Wave::Sine, 0.5);
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(&wav[12..16], b"fmt ");
        assert_eq!(&wav[36..40], b"data");
    }

    #[test]
    fn test_wav_lengths_consistent() {
        let wav = synth_wav(440.0, 440.0, 0.1, Wave::Square, 0.5);
        let samples = (0.1 * SAMPLE_RATE as f32) as usize;
        let data_len = u32::from_le_bytes(wav[40..44].try_into().unwrap()) as usize;
        let riff_len = u32::from_le_bytes(wav[4..8].try_into().unwrap()) as usize;
        assert_eq!(data_len, samples * 2);
        assert_eq!(riff_len, 36 + data_len);
        assert_eq!(wav.len(), 44 + data_len);
    }

    #[test]
    fn test_fade_reaches_silence() {
        let wav = synth_wav(440.0, 440.0, 0.05, Wave::Square, 1.0);
        let last = i16::from_le_bytes(wav[wav.len() - 2..].try_into().unwrap());
        assert!(last.abs() < 2000);
    }
}
