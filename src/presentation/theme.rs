//! Colors for each appearance mode and per-brand styling.

use crate::domain::{AppearanceMode, Brand};
use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub fg: Color,
    pub bg: Color,
    pub muted: Color,
    pub accent: Color,
    pub danger: Color,
    pub chip_fg: Color,
}

impl Palette {
    pub fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted).bg(self.bg)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.accent).bg(self.bg)
    }

    pub fn title(&self) -> Style {
        self.base().add_modifier(Modifier::BOLD)
    }

    pub fn selected(&self) -> Style {
        Style::default().fg(self.chip_fg).bg(self.accent)
    }
}

/// `System` keeps the terminal's own colors.
pub fn palette(mode: AppearanceMode) -> Palette {
    match mode {
        AppearanceMode::System => Palette {
            fg: Color::Reset,
            bg: Color::Reset,
            muted: Color::DarkGray,
            accent: Color::Blue,
            danger: Color::Red,
            chip_fg: Color::White,
        },
        AppearanceMode::Light => Palette {
            fg: Color::Black,
            bg: Color::White,
            muted: Color::DarkGray,
            accent: Color::Blue,
            danger: Color::Red,
            chip_fg: Color::White,
        },
        AppearanceMode::Dark => Palette {
            fg: Color::White,
            bg: Color::Black,
            muted: Color::Gray,
            accent: Color::LightBlue,
            danger: Color::LightRed,
            chip_fg: Color::Black,
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrandStyle {
    pub color: Color,
    /// Large glyph for the detail sheet header.
    pub glyph: &'static str,
    /// Single-cell map marker.
    pub marker: &'static str,
    /// Key that toggles the brand filter.
    pub key: char,
}

const BRAND_STYLES: [(Brand, BrandStyle); 3] = [
    (
        Brand::Starbucks,
        BrandStyle {
            color: Color::Green,
            glyph: "☕",
            marker: "●",
            key: '1',
        },
    ),
    (
        Brand::DutchBros,
        BrandStyle {
            color: Color::Blue,
            glyph: "☕",
            marker: "▲",
            key: '2',
        },
    ),
    (
        Brand::Dunkin,
        BrandStyle {
            color: Color::Rgb(255, 140, 0),
            glyph: "☕",
            marker: "■",
            key: '3',
        },
    ),
];

pub fn brand_style(brand: Brand) -> BrandStyle {
    BRAND_STYLES
        .iter()
        .find(|(b, _)| *b == brand)
        .map(|(_, style)| *style)
        .unwrap_or(BRAND_STYLES[0].1)
}

pub fn brand_for_key(key: char) -> Option<Brand> {
    BRAND_STYLES
        .iter()
        .find(|(_, style)| style.key == key)
        .map(|(brand, _)| *brand)
}
