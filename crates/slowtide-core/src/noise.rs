//! Ambient noise buffers.
//!
//! Each generator fills a mono buffer that the audio engine loops. The filters
//! are the usual recipes: a leaky integrator for brown noise and Paul Kellet's
//! refined pink filter.

use crate::config::{SoundType, NOISE_BUFFER_SECONDS};
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoiseColor {
    White,
    Pink,
    Brown,
}

impl NoiseColor {
    /// Noise texture behind an ambient sound, `None` for silence.
    pub fn for_sound(sound: SoundType) -> Option<NoiseColor> {
        match sound {
            SoundType::Deep | SoundType::Waves => Some(NoiseColor::Brown),
            SoundType::Rain => Some(NoiseColor::Pink),
            SoundType::Static => Some(NoiseColor::White),
            SoundType::Off => None,
        }
    }
}

/// Samples needed for one loop of ambient noise at `sample_rate`.
pub fn buffer_len(sample_rate: f32) -> usize {
    (sample_rate * NOISE_BUFFER_SECONDS).max(1.0) as usize
}

pub fn generate<R: Rng + ?Sized>(color: NoiseColor, len: usize, rng: &mut R) -> Vec<f32> {
    let mut out = vec![0.0_f32; len];
    match color {
        NoiseColor::White => fill_white(&mut out, rng),
        NoiseColor::Pink => fill_pink(&mut out, rng),
        NoiseColor::Brown => fill_brown(&mut out, rng),
    }
    out
}

#[inline]
fn white_sample<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.gen::<f32>() * 2.0 - 1.0
}

fn fill_white<R: Rng + ?Sized>(out: &mut [f32], rng: &mut R) {
    for s in out.iter_mut() {
        *s = white_sample(rng) * 0.5;
    }
}

fn fill_brown<R: Rng + ?Sized>(out: &mut [f32], rng: &mut R) {
    let mut last = 0.0_f32;
    for s in out.iter_mut() {
        let white = white_sample(rng);
        last = (last + 0.02 * white) / 1.02;
        *s = (last * 3.5).clamp(-1.0, 1.0);
    }
}

fn fill_pink<R: Rng + ?Sized>(out: &mut [f32], rng: &mut R) {
    let mut b = [0.0_f32; 7];
    for s in out.iter_mut() {
        let white = white_sample(rng);
        b[0] = 0.99886 * b[0] + white * 0.055_517_9;
        b[1] = 0.99332 * b[1] + white * 0.075_075_9;
        b[2] = 0.96900 * b[2] + white * 0.153_852;
        b[3] = 0.86650 * b[3] + white * 0.310_485_6;
        b[4] = 0.55000 * b[4] + white * 0.532_952_2;
        b[5] = -0.7616 * b[5] - white * 0.016_898;
        let sum: f32 = b.iter().sum::<f32>() + white * 0.5362;
        *s = (sum * 0.11).clamp(-1.0, 1.0);
        b[6] = white * 0.115_926;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn same_seed_same_buffer() {
        let a = generate(NoiseColor::Pink, 512, &mut StdRng::seed_from_u64(7));
        let b = generate(NoiseColor::Pink, 512, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn buffer_len_covers_two_seconds() {
        assert_eq!(buffer_len(48_000.0), 96_000);
        assert_eq!(buffer_len(0.0), 1);
    }
}
