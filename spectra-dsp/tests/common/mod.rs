use wavegen::{sine, wf};

pub const WINDOW: usize = 256;
pub const SAMPLE_RATE: f32 = 48_000.0;

/// Unit-amplitude sine landing exactly on `bin` of the 256-point window.
pub fn tone_at_bin(bin: usize) -> [f32; WINDOW] {
    let freq = bin as f32 * SAMPLE_RATE / WINDOW as f32;
    let waveform = wf!(f32, SAMPLE_RATE, sine!(freq));
    let mut window = [0.0f32; WINDOW];
    for (slot, value) in window.iter_mut().zip(waveform.iter()) {
        *slot = value;
    }
    window
}

/// Direct DFT magnitudes computed in f64 with precise trig, the yardstick
/// the radix-4 path is measured against.
pub fn reference_dft_magnitudes(input: &[f32]) -> Vec<f64> {
    let n = input.len();
    (0..n)
        .map(|k| {
            let mut re = 0.0f64;
            let mut im = 0.0f64;
            for (i, &x) in input.iter().enumerate() {
                let theta = 2.0 * std::f64::consts::PI * (k * i) as f64 / n as f64;
                re += x as f64 * theta.cos();
                im += x as f64 * theta.sin();
            }
            (re * re + im * im).sqrt()
        })
        .collect()
}
