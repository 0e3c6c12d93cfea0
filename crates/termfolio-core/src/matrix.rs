//! Matrix rain background
//!
//! A character grid where every column carries a falling "drop". Each frame
//! fades what is already on screen, writes a fresh random glyph at every drop
//! and moves the drops down one row. Drops that have left the bottom restart
//! at random, which staggers the columns over time.

use rand::{rngs::StdRng, Rng, SeedableRng};
use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

use crate::config::MatrixConfig;

/// Trails dimmer than this are erased
const MIN_INTENSITY: f32 = 0.05;

/// One grid cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    /// Character drawn
    pub ch: char,
    /// Brightness in `0.0..=1.0`; `0.0` means empty
    pub intensity: f32,
}

impl Glyph {
    const EMPTY: Glyph = Glyph {
        ch: ' ',
        intensity: 0.0,
    };
}

/// Animation state for the rain
#[derive(Debug)]
pub struct MatrixRain {
    charset: Vec<char>,
    column_width: u16,
    fade: f32,
    reset_threshold: f64,
    width: u16,
    height: u16,
    /// Drop position per column, 1-based: drop `n` draws on row `n - 1`
    drops: Vec<u16>,
    grid: Vec<Glyph>,
    rng: StdRng,
}

impl MatrixRain {
    /// Create an empty rain; call [`resize`](Self::resize) before stepping
    pub fn new(config: &MatrixConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Deterministic rain for tests and benchmarks
    pub fn with_seed(config: &MatrixConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: &MatrixConfig, rng: StdRng) -> Self {
        let mut charset: Vec<char> = config.charset.chars().collect();
        if charset.is_empty() {
            charset.push('0');
        }
        Self {
            charset,
            column_width: config.column_width.max(1),
            fade: config.fade as f32,
            reset_threshold: config.reset_threshold,
            width: 0,
            height: 0,
            drops: Vec::new(),
            grid: Vec::new(),
            rng,
        }
    }

    /// Adopt a new screen size: recompute columns and restart every drop
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        let columns = usize::from(width / self.column_width);
        self.drops = vec![1; columns];
        self.grid = vec![Glyph::EMPTY; usize::from(width) * usize::from(height)];
    }

    /// Current `(width, height)`
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Number of rain columns
    pub fn columns(&self) -> usize {
        self.drops.len()
    }

    /// Drop positions, one per column
    pub fn drops(&self) -> &[u16] {
        &self.drops
    }

    /// Cell at `(x, y)`, if inside the grid
    pub fn glyph(&self, x: u16, y: u16) -> Option<Glyph> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.grid
            .get(usize::from(y) * usize::from(self.width) + usize::from(x))
            .copied()
    }

    /// Advance one frame
    pub fn step(&mut self) {
        let keep = 1.0 - self.fade;
        for glyph in &mut self.grid {
            glyph.intensity *= keep;
            if glyph.intensity < MIN_INTENSITY {
                *glyph = Glyph::EMPTY;
            }
        }

        for column in 0..self.drops.len() {
            let ch = self.charset[self.rng.gen_range(0..self.charset.len())];
            let drop = self.drops[column];

            if drop >= 1 && drop <= self.height {
                let x = usize::from(column as u16 * self.column_width);
                let y = usize::from(drop - 1);
                let idx = y * usize::from(self.width) + x;
                if let Some(cell) = self.grid.get_mut(idx) {
                    *cell = Glyph { ch, intensity: 1.0 };
                }
            }

            let drop = if drop > self.height && self.rng.gen::<f64>() > self.reset_threshold {
                0
            } else {
                drop
            };
            self.drops[column] = drop.saturating_add(1);
        }
    }
}

/// Green scaled by brightness; the head of a drop is drawn near-white
fn glyph_color(intensity: f32) -> Color {
    if intensity >= 0.999 {
        return Color::Rgb(190, 255, 200);
    }
    let scale = |v: f32| (v * intensity).round().clamp(0.0, 255.0) as u8;
    Color::Rgb(0, scale(255.0), scale(65.0))
}

impl Widget for &MatrixRain {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = area.width.min(self.width);
        let height = area.height.min(self.height);
        for y in 0..height {
            for x in 0..width {
                let Some(glyph) = self.glyph(x, y) else {
                    continue;
                };
                if glyph.intensity <= 0.0 {
                    continue;
                }
                buf.get_mut(area.x + x, area.y + y)
                    .set_char(glyph.ch)
                    .set_fg(glyph_color(glyph.intensity));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rain(width: u16, height: u16) -> MatrixRain {
        let mut rain = MatrixRain::with_seed(&MatrixConfig::default(), 7);
        rain.resize(width, height);
        rain
    }

    #[test]
    fn test_resize_derives_columns_and_resets_drops() {
        let mut rain = rain(21, 10);
        assert_eq!(rain.columns(), 10);
        assert!(rain.drops().iter().all(|&d| d == 1));

        rain.step();
        rain.step();
        assert!(rain.drops().iter().all(|&d| d == 3));

        rain.resize(8, 4);
        assert_eq!(rain.columns(), 4);
        assert!(rain.drops().iter().all(|&d| d == 1));
        assert_eq!(rain.glyph(0, 0), Some(Glyph::EMPTY));
    }

    #[test]
    fn test_first_step_writes_top_row() {
        let config = MatrixConfig::default();
        let charset: Vec<char> = config.charset.chars().collect();
        let mut rain = rain(10, 5);
        rain.step();

        for column in 0..5u16 {
            let glyph = rain.glyph(column * 2, 0).unwrap();
            assert_eq!(glyph.intensity, 1.0);
            assert!(charset.contains(&glyph.ch));
            // odd cells sit between columns
            assert_eq!(rain.glyph(column * 2 + 1, 0).unwrap().intensity, 0.0);
        }
        assert_eq!(rain.glyph(0, 1).unwrap().intensity, 0.0);
    }

    #[test]
    fn test_trail_fades() {
        let mut rain = rain(2, 10);
        rain.step();
        rain.step();
        let head = rain.glyph(0, 1).unwrap();
        let trail = rain.glyph(0, 0).unwrap();
        assert_eq!(head.intensity, 1.0);
        assert!((trail.intensity - 0.95).abs() < 1e-6);
    }

    #[test]
    fn test_trail_eventually_disappears() {
        let mut rain = rain(2, 200);
        for _ in 0..100 {
            rain.step();
        }
        assert_eq!(rain.glyph(0, 0), Some(Glyph::EMPTY));
    }

    #[test]
    fn test_drops_never_reset_inside_the_screen() {
        let config = MatrixConfig {
            reset_threshold: 0.0,
            ..MatrixConfig::default()
        };
        let mut rain = MatrixRain::with_seed(&config, 1);
        rain.resize(6, 5);
        for _ in 0..5 {
            rain.step();
        }
        assert!(rain.drops().iter().all(|&d| d == 6));

        // past the bottom and any draw beats a zero threshold
        rain.step();
        assert!(rain.drops().iter().all(|&d| d == 1));
    }

    #[test]
    fn test_render_into_buffer() {
        let mut rain = rain(4, 2);
        rain.step();
        let area = Rect::new(0, 0, 4, 2);
        let mut buf = Buffer::empty(area);
        (&rain).render(area, &mut buf);
        let ch = rain.glyph(0, 0).unwrap().ch;
        assert_eq!(buf.get(0, 0).symbol(), ch.to_string());
        assert_eq!(buf.get(1, 0).symbol(), " ");
    }

    #[test]
    fn test_zero_size_is_inert() {
        let mut rain = rain(0, 0);
        rain.step();
        assert_eq!(rain.columns(), 0);
        assert_eq!(rain.glyph(0, 0), None);
    }
}
