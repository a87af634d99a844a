//! Digital rain for the `matrix` screen.
//!
//! Lives on the render thread: it is pure animation state and never feeds
//! back into the model.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Widget;

/// Half-width katakana, latin capitals and digits (all single-cell).
const GLYPHS: &str = "ｦｧｨｩｪｫｬｭｮｯｱｲｳｴｵｶｷｸｹｺｻｼｽｾｿﾀﾁﾂﾃﾄﾅﾆﾇﾈﾉﾊﾋﾌﾍﾎﾏﾐﾑﾒﾓﾔﾕﾖﾗﾘﾙﾚﾛﾜﾝABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const RESET_CHANCE: f64 = 0.025;
const FADE: u8 = 18;

#[derive(Debug, Clone, Copy)]
struct Cell {
    glyph: char,
    bright: u8,
}

const EMPTY: Cell = Cell {
    glyph: ' ',
    bright: 0,
};

#[derive(Debug)]
pub struct MatrixRain {
    width: u16,
    height: u16,
    drops: Vec<u16>,
    cells: Vec<Cell>,
    glyphs: Vec<char>,
    rng: SmallRng,
}

impl MatrixRain {
    pub fn new(width: u16, height: u16, seed: u64) -> Self {
        let mut rain = Self {
            width: 0,
            height: 0,
            drops: Vec::new(),
            cells: Vec::new(),
            glyphs: GLYPHS.chars().collect(),
            rng: SmallRng::seed_from_u64(seed),
        };
        rain.resize(width, height);
        rain
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Start over with every drop at the top.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.drops = vec![0; width as usize];
        self.cells = vec![EMPTY; width as usize * height as usize];
    }

    /// One animation frame: fade the trails and move every drop down.
    pub fn tick(&mut self) {
        for cell in &mut self.cells {
            cell.bright = cell.bright.saturating_sub(FADE);
        }
        if self.height == 0 {
            return;
        }
        for x in 0..self.width as usize {
            let y = self.drops[x];
            if y < self.height {
                let glyph = self.glyphs[self.rng.random_range(0..self.glyphs.len())];
                let idx = y as usize * self.width as usize + x;
                self.cells[idx] = Cell {
                    glyph,
                    bright: u8::MAX,
                };
            }
            if y >= self.height && self.rng.random_bool(RESET_CHANCE) {
                self.drops[x] = 0;
            } else {
                self.drops[x] = y.saturating_add(1);
            }
        }
    }

    fn style(bright: u8) -> Style {
        match bright {
            u8::MAX => Style::default().fg(Color::Rgb(0xd0, 0xff, 0xd0)),
            b => Style::default().fg(Color::Rgb(0, b, b / 6)),
        }
    }
}

impl Widget for &MatrixRain {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = area.width.min(self.width);
        let height = area.height.min(self.height);
        for y in 0..height {
            for x in 0..width {
                let cell = self.cells[y as usize * self.width as usize + x as usize];
                if cell.bright == 0 {
                    continue;
                }
                if let Some(target) = buf.cell_mut((area.x + x, area.y + y)) {
                    target.set_char(cell.glyph).set_style(MatrixRain::style(cell.bright));
                }
            }
        }
    }
}
