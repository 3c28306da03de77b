use alloc::format;

use crate::config::AnalyzerConfig;

/// Pixel rows in one character cell.
pub const GLYPH_ROWS: usize = 8;
/// Custom glyph slots the display is assumed to provide.
pub const GLYPH_SLOTS: usize = 8;

/// Character-cell display boundary: a fixed grid of cells, addressable by
/// (column, row), with a handful of loadable custom glyphs.
pub trait CharacterDisplay {
    type Error;

    /// Install `bitmap` (one byte per pixel row, top first) as custom
    /// glyph `slot`, addressable afterwards via [`write_glyph`].
    ///
    /// [`write_glyph`]: CharacterDisplay::write_glyph
    fn load_glyph(&mut self, slot: u8, bitmap: &[u8; GLYPH_ROWS]) -> Result<(), Self::Error>;

    fn clear(&mut self) -> Result<(), Self::Error>;

    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), Self::Error>;

    /// Write custom glyph `slot` at the cursor.
    fn write_glyph(&mut self, slot: u8) -> Result<(), Self::Error>;

    /// Write text starting at the cursor.
    fn write_str(&mut self, text: &str) -> Result<(), Self::Error>;
}

/// Bitmap for bar glyph `level`: the bottom `level + 1` pixel rows filled.
pub fn bar_glyph(level: usize) -> [u8; GLYPH_ROWS] {
    debug_assert!(level < GLYPH_SLOTS);
    let mut bitmap = [0u8; GLYPH_ROWS];
    for (row, byte) in bitmap.iter_mut().enumerate() {
        if row + level + 1 >= GLYPH_ROWS {
            *byte = 0xFF;
        }
    }
    bitmap
}

/// Draws bar columns and mode announcements on a 2-row character display.
pub struct BarRenderer {
    cols: u8,
    max_height: u8,
}

impl BarRenderer {
    pub fn new(cfg: &AnalyzerConfig) -> Self {
        Self {
            cols: cfg.cols,
            max_height: cfg.max_height,
        }
    }

    /// Install the eight bar glyphs into the display's custom slots.
    pub fn install_glyphs<D: CharacterDisplay>(&self, display: &mut D) -> Result<(), D::Error> {
        for slot in 0..GLYPH_SLOTS as u8 {
            display.load_glyph(slot, &bar_glyph(slot as usize))?;
        }
        Ok(())
    }

    /// Clear and redraw every bar column.
    pub fn draw<D: CharacterDisplay>(
        &self,
        display: &mut D,
        heights: &[u8],
    ) -> Result<(), D::Error> {
        display.clear()?;
        for col in 0..self.cols.min(heights.len() as u8) {
            self.draw_column(display, col, heights[col as usize])?;
        }
        Ok(())
    }

    /// One bar, `height` in pixel rows from the bottom of the display.
    ///
    /// Heights up to half scale live in the bottom cell; a zero height
    /// keeps the one-pixel baseline glyph so the column never goes fully
    /// dark. Above half scale the bottom cell fills solid and the
    /// remainder moves into the top cell.
    fn draw_column<D: CharacterDisplay>(
        &self,
        display: &mut D,
        col: u8,
        height: u8,
    ) -> Result<(), D::Error> {
        let height = height.min(self.max_height);
        let half = self.max_height / 2;
        if height <= half {
            display.set_cursor(col, 1)?;
            display.write_glyph(height.saturating_sub(1))?;
        } else {
            display.set_cursor(col, 0)?;
            display.write_glyph(height - half - 1)?;
            display.set_cursor(col, 1)?;
            display.write_glyph(GLYPH_SLOTS as u8 - 1)?;
        }
        Ok(())
    }

    /// Splash shown when the band changes.
    pub fn announce_band<D: CharacterDisplay>(
        &self,
        display: &mut D,
        span_hz: u32,
    ) -> Result<(), D::Error> {
        display.clear()?;
        display.set_cursor(0, 0)?;
        display.write_str(&format!("MODE: {}Hz", span_hz))
    }
}
