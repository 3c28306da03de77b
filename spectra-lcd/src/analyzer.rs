use alloc::vec;
use alloc::vec::Vec;

use embedded_hal::delay::DelayNs;
use spectra_dsp::{normalize_magnitudes, radix4_dft, remove_dc};

#[cfg(feature = "logging")]
use defmt::info;
#[cfg(feature = "logging")]
use defmt_rtt as _;

use crate::aggregator::BandAggregator;
use crate::config::AnalyzerConfig;
use crate::display::{BarRenderer, CharacterDisplay};
use crate::mode::ModeController;

/// Sampling boundary: one normalized reading per call. The loop paces
/// calls with the configured inter-sample delay to hit the sample rate.
pub trait SampleSource {
    fn read(&mut self) -> f32;
}

const INIT_SPLASH_MS: u32 = 1_000;
const MODE_SPLASH_MS: u32 = 500;

/// The top-level driver: acquire, condition, transform, aggregate, render,
/// forever.
///
/// Owns every buffer the pipeline touches; all three are allocated once and
/// overwritten each cycle, so steady state never allocates.
pub struct SpectrumAnalyzer<'a, S, D, T> {
    cfg: &'a AnalyzerConfig,
    mode: ModeController<'a>,
    aggregator: BandAggregator<'a>,
    renderer: BarRenderer,
    sampler: S,
    display: D,
    delay: T,
    samples: Vec<f32>,
    spectrum: Vec<f32>,
    heights: Vec<u8>,
}

impl<'a, S, D, T> SpectrumAnalyzer<'a, S, D, T>
where
    S: SampleSource,
    D: CharacterDisplay,
    T: DelayNs,
{
    pub fn new(
        cfg: &'a AnalyzerConfig,
        mode: ModeController<'a>,
        sampler: S,
        display: D,
        delay: T,
    ) -> Self {
        #[cfg(feature = "logging")]
        info!(
            "analyzer: {} samples at {} Hz, {} columns",
            cfg.dft_size, cfg.sample_rate_hz, cfg.cols
        );
        Self {
            cfg,
            mode,
            aggregator: BandAggregator::new(cfg),
            renderer: BarRenderer::new(cfg),
            sampler,
            display,
            delay,
            samples: vec![0.0; cfg.dft_size],
            spectrum: vec![0.0; cfg.dft_size],
            heights: vec![0; cfg.cols as usize],
        }
    }

    /// Startup splash and glyph installation.
    pub fn init(&mut self) -> Result<(), D::Error> {
        self.display.clear()?;
        self.display.set_cursor(0, 0)?;
        self.display.write_str("Initializing....")?;
        self.delay.delay_ms(INIT_SPLASH_MS);
        self.renderer.install_glyphs(&mut self.display)
    }

    /// One full acquisition cycle.
    ///
    /// The band is polled exactly once, after the transform: an advance
    /// arriving during acquisition or the transform takes effect next
    /// cycle. A detected change shows the band splash before the bars.
    pub fn cycle(&mut self) -> Result<(), D::Error> {
        self.acquire();
        remove_dc(&mut self.samples);
        radix4_dft(&self.samples, &mut self.spectrum);

        let (band, changed) = self.mode.poll();
        if changed {
            let span_hz = self.aggregator.effective_max_frequency_hz(band);
            #[cfg(feature = "logging")]
            info!("band change, span {} Hz", span_hz);
            self.renderer.announce_band(&mut self.display, span_hz)?;
            self.delay.delay_ms(MODE_SPLASH_MS);
        }

        normalize_magnitudes(&mut self.spectrum, self.cfg.max_height as f32);
        self.aggregator
            .aggregate(band, &self.spectrum, &mut self.heights);
        self.renderer.draw(&mut self.display, &self.heights)
    }

    /// Run until the process dies. A stalled sampler stalls the loop; that
    /// is the instrument's contract, not an error.
    pub fn run(&mut self) -> Result<(), D::Error> {
        self.init()?;
        loop {
            self.cycle()?;
        }
    }

    /// Fill the window one reading at a time, padding after each read so
    /// the interval between samples lands on 1/sample_rate.
    fn acquire(&mut self) {
        let pad_us = self.cfg.inter_sample_delay_us;
        for slot in self.samples.iter_mut() {
            *slot = self.sampler.read();
            self.delay.delay_us(pad_us);
        }
    }

    pub fn heights(&self) -> &[u8] {
        &self.heights
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }
}
