#![no_std]

use core::f32::consts::PI;
use micromath::F32Ext;

/// Subtract the arithmetic mean from every sample in place.
///
/// Audio bands only; without this the zero-frequency bin swamps the
/// normalization and flattens every other bar.
pub fn remove_dc(samples: &mut [f32]) {
    if samples.is_empty() {
        return;
    }
    let mut mean = 0.0f32;
    for &s in samples.iter() {
        mean += s;
    }
    mean /= samples.len() as f32;
    for s in samples.iter_mut() {
        *s -= mean;
    }
}

fn magnitude(re: f32, im: f32) -> f32 {
    let power = re * re + im * im;
    // A silent window must stay exactly zero through normalization; the
    // approximate sqrt is not trusted to map 0.0 to 0.0.
    if power > 0.0 {
        power.sqrt()
    } else {
        0.0
    }
}

/// Magnitude spectrum of a real window via one radix-4 decimation-in-time
/// level with direct summation underneath.
///
/// The input splits into four stride-4 groups. Offsets 0 and 2 form the
/// even sub-transform, offsets 1 and 3 the two odd ones; the twiddle for
/// each group is folded into its trig argument, so the four partial sums
/// combine into output bins k, k+N/4, k+N/2 and k+3N/4 with fixed sign
/// patterns. Input length must be divisible by 4; output length must match.
pub fn radix4_dft(input: &[f32], output: &mut [f32]) {
    let n = input.len();
    assert!(n > 0 && n % 4 == 0, "window length must be divisible by 4");
    assert_eq!(output.len(), n, "spectrum length must match window length");

    let quarter = n / 4;
    for k in 0..quarter {
        // Partial sums for the stride-4 groups at offsets 0, 2, 1, 3.
        let (mut f0_re, mut f0_im) = (0.0f32, 0.0f32);
        let (mut f2_re, mut f2_im) = (0.0f32, 0.0f32);
        let (mut g1_re, mut g1_im) = (0.0f32, 0.0f32);
        let (mut g3_re, mut g3_im) = (0.0f32, 0.0f32);

        for m in 0..quarter {
            let t0 = 2.0 * PI * (k * m) as f32 / quarter as f32;
            f0_re += input[4 * m] * t0.cos();
            f0_im += input[4 * m] * t0.sin();

            let t2 = 2.0 * PI * (k * (4 * m + 2)) as f32 / n as f32;
            f2_re += input[4 * m + 2] * t2.cos();
            f2_im += input[4 * m + 2] * t2.sin();

            let t1 = 2.0 * PI * (k * (4 * m + 1)) as f32 / n as f32;
            g1_re += input[4 * m + 1] * t1.cos();
            g1_im += input[4 * m + 1] * t1.sin();

            let t3 = 2.0 * PI * (k * (4 * m + 3)) as f32 / n as f32;
            g3_re += input[4 * m + 3] * t3.cos();
            g3_im += input[4 * m + 3] * t3.sin();
        }

        output[k] = magnitude(
            (f0_re + f2_re) + (g1_re + g3_re),
            (f0_im + f2_im) + (g1_im + g3_im),
        );
        output[k + quarter] = magnitude(
            (f0_re - f2_re) - (g1_im - g3_im),
            (f0_im - f2_im) - (g3_re - g1_re),
        );
        output[k + 2 * quarter] = magnitude(
            (f0_re + f2_re) - (g1_re + g3_re),
            (f0_im + f2_im) - (g1_im + g3_im),
        );
        output[k + 3 * quarter] = magnitude(
            (f0_re - f2_re) + (g1_im - g3_im),
            (f0_im - f2_im) + (g3_re - g1_re),
        );
    }
}

/// Rescale a magnitude spectrum so its maximum equals `ceiling`, in place.
///
/// A spectrum with no strictly positive maximum carries no signal and is
/// left untouched.
pub fn normalize_magnitudes(spectrum: &mut [f32], ceiling: f32) {
    let mut max = 0.0f32;
    for &v in spectrum.iter() {
        if v > max {
            max = v;
        }
    }
    if max <= 0.0 {
        return;
    }
    for v in spectrum.iter_mut() {
        *v = *v * ceiling / max;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn remove_dc_zeroes_the_mean() {
        let mut samples = [0.0f32; 64];
        for (i, s) in samples.iter_mut().enumerate() {
            *s = 0.4 + if i % 2 == 0 { 0.25 } else { -0.1 };
        }
        remove_dc(&mut samples);
        let mean: f32 = samples.iter().sum::<f32>() / samples.len() as f32;
        assert!(mean.abs() < 1e-4, "residual mean {}", mean);
    }

    #[test]
    fn remove_dc_zeroes_the_mean_of_noise() {
        let mut rng = rand::rng();
        let mut samples = [0.0f32; 256];
        for s in samples.iter_mut() {
            *s = rng.random_range(-1.0..1.0);
        }
        remove_dc(&mut samples);
        let mean: f32 = samples.iter().sum::<f32>() / samples.len() as f32;
        assert!(mean.abs() < 1e-4, "residual mean {}", mean);
    }

    #[test]
    fn impulse_spectrum_is_flat() {
        // A single unit sample leaves one trig term per group, so every
        // bin sits at 1.0 give or take the approximate trig and sqrt.
        let mut input = [0.0f32; 64];
        input[0] = 1.0;
        let mut output = [0.0f32; 64];
        radix4_dft(&input, &mut output);
        for (k, &v) in output.iter().enumerate() {
            assert!((v - 1.0).abs() < 2e-2, "bin {} = {}", k, v);
        }
    }

    #[test]
    fn zero_window_has_zero_spectrum() {
        let input = [0.0f32; 64];
        let mut output = [1.0f32; 64];
        radix4_dft(&input, &mut output);
        assert!(output.iter().all(|&v| v == 0.0));
    }

    #[test]
    #[should_panic(expected = "divisible by 4")]
    fn rejects_window_not_divisible_by_four() {
        let input = [0.0f32; 6];
        let mut output = [0.0f32; 6];
        radix4_dft(&input, &mut output);
    }

    #[test]
    #[should_panic(expected = "must match")]
    fn rejects_mismatched_spectrum_length() {
        let input = [0.0f32; 8];
        let mut output = [0.0f32; 4];
        radix4_dft(&input, &mut output);
    }

    #[test]
    fn normalize_scales_maximum_to_ceiling() {
        let mut spectrum = [0.5f32, 3.0, 1.25, 0.0];
        normalize_magnitudes(&mut spectrum, 16.0);
        assert_eq!(spectrum[1], 16.0);
        assert!(spectrum.iter().all(|&v| (0.0..=16.0).contains(&v)));
    }

    #[test]
    fn normalize_leaves_silence_alone() {
        let mut spectrum = [0.0f32; 16];
        normalize_magnitudes(&mut spectrum, 16.0);
        assert!(spectrum.iter().all(|&v| v == 0.0));
    }
}
