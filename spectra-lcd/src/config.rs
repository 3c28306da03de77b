use crate::display::GLYPH_ROWS;

/// Fixed analyzer geometry and timing, built once at startup and shared by
/// reference with every pipeline stage.
pub struct AnalyzerConfig {
    /// Window and spectrum length. Must be divisible by 4.
    pub dft_size: usize,
    pub sample_rate_hz: u32,
    /// Display columns, one bar each.
    pub cols: u8,
    /// Display rows. The bar layout splits each column into a bottom and a
    /// top character cell, so exactly 2 rows are supported.
    pub rows: u8,
    /// Full-scale bar height in pixel rows, `rows * GLYPH_ROWS`.
    pub max_height: u8,
    /// Pad inserted after each sample read so that read latency plus pad
    /// lands on the target period. A ~13 us conversion at 48 kHz (20.83 us
    /// period) wants roughly 8 us here.
    pub inter_sample_delay_us: u32,
}

impl AnalyzerConfig {
    pub fn new(
        dft_size: usize,
        sample_rate_hz: u32,
        cols: u8,
        rows: u8,
        inter_sample_delay_us: u32,
    ) -> Self {
        if dft_size == 0 || dft_size % 4 != 0 {
            panic!("dft_size must be a positive multiple of 4, got {}", dft_size);
        }
        if sample_rate_hz == 0 {
            panic!("sample_rate_hz must be greater than 0");
        }
        if cols == 0 {
            panic!("display must have at least one column");
        }
        if rows != 2 {
            panic!("bar layout requires exactly 2 display rows, got {}", rows);
        }

        Self {
            dft_size,
            sample_rate_hz,
            cols,
            rows,
            max_height: rows * GLYPH_ROWS as u8,
            inter_sample_delay_us,
        }
    }

    /// Frequency spacing between adjacent spectrum bins.
    pub fn bin_resolution_hz(&self) -> f32 {
        self.sample_rate_hz as f32 / self.dft_size as f32
    }
}

impl Default for AnalyzerConfig {
    /// 256-point window at 48 kHz on a 16x2 display.
    fn default() -> Self {
        Self::new(256, 48_000, 16, 2, 8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_geometry() {
        let cfg = AnalyzerConfig::default();
        assert_eq!(cfg.max_height, 16);
        assert_eq!(cfg.bin_resolution_hz(), 187.5);
    }

    #[test]
    #[should_panic(expected = "multiple of 4")]
    fn rejects_odd_window() {
        AnalyzerConfig::new(250, 48_000, 16, 2, 8);
    }

    #[test]
    #[should_panic(expected = "2 display rows")]
    fn rejects_unsupported_row_count() {
        AnalyzerConfig::new(256, 48_000, 16, 4, 8);
    }
}
