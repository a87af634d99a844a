//! Color palettes for the named themes.

use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: Color,
    pub text: Color,
    /// System lines, hints and secondary text.
    pub dim: Color,
    pub error: Color,
    pub prompt: Color,
    pub accent: Color,
    pub heading: Color,
    pub link: Color,
}

const DEFAULT: Palette = Palette {
    bg: Color::Rgb(0x0d, 0x11, 0x17),
    text: Color::Rgb(0xc9, 0xd1, 0xd9),
    dim: Color::Rgb(0x6e, 0x76, 0x81),
    error: Color::Rgb(0xff, 0x7b, 0x72),
    prompt: Color::Rgb(0x3f, 0xb9, 0x50),
    accent: Color::Rgb(0x79, 0xc0, 0xff),
    heading: Color::Rgb(0xf0, 0xf6, 0xfc),
    link: Color::Rgb(0xd2, 0xa8, 0xff),
};

const HACKER: Palette = Palette {
    bg: Color::Rgb(0x00, 0x00, 0x00),
    text: Color::Rgb(0x33, 0xff, 0x33),
    dim: Color::Rgb(0x1a, 0x80, 0x1a),
    error: Color::Rgb(0xff, 0x33, 0x33),
    prompt: Color::Rgb(0x66, 0xff, 0x66),
    accent: Color::Rgb(0xcc, 0xff, 0x00),
    heading: Color::Rgb(0x99, 0xff, 0x99),
    link: Color::Rgb(0x00, 0xff, 0xcc),
};

const SOLARIZED: Palette = Palette {
    bg: Color::Rgb(0x00, 0x2b, 0x36),
    text: Color::Rgb(0x83, 0x94, 0x96),
    dim: Color::Rgb(0x58, 0x6e, 0x75),
    error: Color::Rgb(0xdc, 0x32, 0x2f),
    prompt: Color::Rgb(0x85, 0x99, 0x00),
    accent: Color::Rgb(0x26, 0x8b, 0xd2),
    heading: Color::Rgb(0xb5, 0x89, 0x00),
    link: Color::Rgb(0x2a, 0xa1, 0x98),
};

const LIGHT: Palette = Palette {
    bg: Color::Rgb(0xfa, 0xfa, 0xfa),
    text: Color::Rgb(0x24, 0x29, 0x2f),
    dim: Color::Rgb(0x6e, 0x77, 0x81),
    error: Color::Rgb(0xcf, 0x22, 0x2e),
    prompt: Color::Rgb(0x11, 0x63, 0x29),
    accent: Color::Rgb(0x09, 0x69, 0xda),
    heading: Color::Rgb(0x1f, 0x23, 0x28),
    link: Color::Rgb(0x82, 0x50, 0xdf),
};

const MATRIX: Palette = Palette {
    bg: Color::Rgb(0x00, 0x00, 0x00),
    text: Color::Rgb(0x00, 0xff, 0x41),
    dim: Color::Rgb(0x00, 0x8f, 0x11),
    error: Color::Rgb(0xff, 0x00, 0x41),
    prompt: Color::Rgb(0x00, 0xff, 0x41),
    accent: Color::Rgb(0x00, 0x3b, 0x00),
    heading: Color::Rgb(0xd0, 0xff, 0xd0),
    link: Color::Rgb(0x00, 0xff, 0x41),
};

impl Palette {
    /// Every theme name with its own palette.
    pub const NAMES: &'static [&'static str] = &["default", "hacker", "solarized", "light", "matrix"];

    /// Palette for a theme name; unknown names use the default palette.
    pub fn named(name: &str) -> Palette {
        match name {
            "hacker" => HACKER,
            "solarized" => SOLARIZED,
            "light" => LIGHT,
            "matrix" => MATRIX,
            _ => DEFAULT,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        DEFAULT
    }
}
