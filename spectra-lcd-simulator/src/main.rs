//! Terminal-hosted stand-in for the analyzer hardware: the 16x2 character
//! panel becomes two terminal rows, the analog input a synthetic two-tone
//! signal, and the mode push button the Enter key.

use std::convert::Infallible;
use std::f32::consts::PI;
use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use embedded_hal::delay::DelayNs;
use spectra_lcd::{
    AnalyzerConfig, Band, CharacterDisplay, ModeCell, ModeController, SampleSource,
    SpectrumAnalyzer, GLYPH_ROWS, GLYPH_SLOTS,
};

/// Shared with the stdin "push button" thread.
static MODE: ModeCell = ModeCell::new(Band::Khz8);

/// Terminal rows reserved above the status line.
const PANEL_ROWS: u16 = 2;

/// Partial block characters standing in for 0..=8 lit pixel rows.
const BLOCKS: [char; GLYPH_ROWS + 1] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Character LCD emulated with ANSI cursor addressing: every cell write
/// lands directly at its terminal position, like the real panel's RAM.
struct TerminalLcd {
    glyphs: [char; GLYPH_SLOTS],
    cursor: (u8, u8),
}

impl TerminalLcd {
    fn new() -> Self {
        Self {
            glyphs: [' '; GLYPH_SLOTS],
            cursor: (0, 0),
        }
    }

    fn put(&mut self, c: char) {
        let (col, row) = self.cursor;
        print!("\x1b[{};{}H{}", row as u16 + 1, col as u16 + 1, c);
        let _ = io::stdout().flush();
        self.cursor.0 = col.wrapping_add(1);
    }
}

impl CharacterDisplay for TerminalLcd {
    type Error = Infallible;

    fn load_glyph(&mut self, slot: u8, bitmap: &[u8; GLYPH_ROWS]) -> Result<(), Infallible> {
        let lit = bitmap.iter().filter(|&&row| row != 0).count();
        self.glyphs[slot as usize] = BLOCKS[lit];
        Ok(())
    }

    fn clear(&mut self) -> Result<(), Infallible> {
        for row in 0..PANEL_ROWS {
            print!("\x1b[{};1H\x1b[2K", row + 1);
        }
        let _ = io::stdout().flush();
        self.cursor = (0, 0);
        Ok(())
    }

    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), Infallible> {
        self.cursor = (col, row);
        Ok(())
    }

    fn write_glyph(&mut self, slot: u8) -> Result<(), Infallible> {
        let c = self.glyphs[slot as usize];
        self.put(c);
        Ok(())
    }

    fn write_str(&mut self, text: &str) -> Result<(), Infallible> {
        for c in text.chars() {
            self.put(c);
        }
        Ok(())
    }
}

/// Two fixed tones over a half-scale bias, mimicking a line-level input
/// into a unipolar ADC.
struct TwoToneSampler {
    sample_rate_hz: f32,
    tick: u64,
}

impl TwoToneSampler {
    fn new(sample_rate_hz: u32) -> Self {
        Self {
            sample_rate_hz: sample_rate_hz as f32,
            tick: 0,
        }
    }
}

impl SampleSource for TwoToneSampler {
    fn read(&mut self) -> f32 {
        let t = self.tick as f32 / self.sample_rate_hz;
        self.tick = self.tick.wrapping_add(1);
        0.5 + 0.35 * (2.0 * PI * 1_500.0 * t).sin() + 0.15 * (2.0 * PI * 6_000.0 * t).sin()
    }
}

struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        thread::sleep(Duration::from_nanos(ns as u64));
    }
}

fn main() -> Result<(), Infallible> {
    let cfg = AnalyzerConfig::default();

    print!("\x1b[2J");
    println!(
        "\x1b[{};1H[{} pt window @ {} Hz]  Enter switches the band, Ctrl-C quits.",
        PANEL_ROWS + 2,
        cfg.dft_size,
        cfg.sample_rate_hz
    );

    thread::spawn(|| {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            if line.is_err() {
                break;
            }
            MODE.advance();
        }
    });

    let sampler = TwoToneSampler::new(cfg.sample_rate_hz);
    let mut analyzer = SpectrumAnalyzer::new(
        &cfg,
        ModeController::new(&MODE),
        sampler,
        TerminalLcd::new(),
        StdDelay,
    );
    analyzer.run()
}
