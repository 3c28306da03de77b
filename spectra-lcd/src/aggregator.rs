#[allow(unused_imports)]
use micromath::F32Ext;

use crate::config::AnalyzerConfig;
use crate::mode::Band;

/// Reduces the magnitude spectrum to one height per display column for the
/// selected band.
pub struct BandAggregator<'a> {
    cfg: &'a AnalyzerConfig,
}

impl<'a> BandAggregator<'a> {
    pub fn new(cfg: &'a AnalyzerConfig) -> Self {
        Self { cfg }
    }

    /// Number of consecutive spectrum bins averaged into one column.
    ///
    /// Narrow bands round up, overshooting their nominal edge by at most
    /// one bin per column. The full band rounds down: one bin past N/2
    /// would fold the mirrored image back into the top columns.
    pub fn bins_per_column(&self, band: Band) -> usize {
        let per_column_hz = band.max_frequency_hz(self.cfg.sample_rate_hz) / self.cfg.cols as f32;
        let bins = per_column_hz / self.cfg.bin_resolution_hz();
        let bins = match band {
            Band::Nyquist => bins.floor(),
            _ => bins.ceil(),
        };
        bins as usize
    }

    /// The frequency the display actually spans after rounding, the value
    /// shown by the mode announcement.
    pub fn effective_max_frequency_hz(&self, band: Band) -> u32 {
        let bins = (self.bins_per_column(band) * self.cfg.cols as usize) as f32;
        (bins * self.cfg.bin_resolution_hz()) as u32
    }

    /// Average each column's bin group down to an integer bar height.
    ///
    /// Reads never cross the Nyquist bin: a group reaching past N/2 averages
    /// only its valid bins, and columns starting past N/2 stay at zero.
    pub fn aggregate(&self, band: Band, spectrum: &[f32], heights: &mut [u8]) {
        let group = self.bins_per_column(band);
        let valid = spectrum.len() / 2;
        for (col, height) in heights.iter_mut().enumerate() {
            let start = (col * group).min(valid);
            let end = (start + group).min(valid);
            let bins = &spectrum[start..end];
            let mean = if bins.is_empty() {
                0.0
            } else {
                bins.iter().sum::<f32>() / bins.len() as f32
            };
            *height = (mean as u8).min(self.cfg.max_height);
        }
    }
}
