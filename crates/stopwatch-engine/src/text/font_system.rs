use std::fmt;

use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};

use crate::coords::Vec2;

/// Error returned by [`FontSystem::load_font`].
#[derive(Debug, Clone)]
pub struct FontLoadError(pub String);

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font load error: {}", self.0)
    }
}

impl std::error::Error for FontLoadError {}

/// Handle to a font loaded into a [`FontSystem`].
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct FontId(pub(crate) usize);

/// Size of a laid-out single line.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct TextMetrics {
    /// Advance width of the run.
    pub width: f32,
    /// Line height (ascent + descent + gap).
    pub height: f32,
    /// Distance from the top of the line box to the baseline.
    pub ascent: f32,
}

impl TextMetrics {
    #[inline]
    pub fn size(self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Loaded fonts. Immutable after loading.
#[derive(Default)]
pub struct FontSystem {
    fonts: Vec<fontdue::Font>,
}

impl FontSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a TrueType / OpenType font.
    pub fn load_font(&mut self, bytes: &[u8]) -> Result<FontId, FontLoadError> {
        if bytes.is_empty() {
            return Err(FontLoadError("empty font data".to_string()));
        }
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError(e.to_string()))?;
        let id = FontId(self.fonts.len());
        self.fonts.push(font);
        Ok(id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Whether `id` refers to a loaded font.
    #[inline]
    pub fn contains(&self, id: FontId) -> bool {
        id.0 < self.fonts.len()
    }

    pub(crate) fn get(&self, id: FontId) -> Option<&fontdue::Font> {
        self.fonts.get(id.0)
    }

    /// Measures `text` as a single unwrapped line at `size` logical pixels.
    ///
    /// Unknown fonts measure as an empty run of nominal line height so layout
    /// still works when no font could be loaded.
    pub fn measure(&self, text: &str, id: FontId, size: f32) -> TextMetrics {
        let Some(font) = self.get(id) else {
            return TextMetrics { width: 0.0, height: size * 1.2, ascent: size };
        };

        let (ascent, height) = match font.horizontal_line_metrics(size) {
            Some(m) => (m.ascent, m.new_line_size),
            None => (size, size * 1.2),
        };

        let width = text
            .chars()
            .map(|c| font.metrics(c, size).advance_width)
            .sum::<f32>();

        TextMetrics { width, height, ascent }
    }

    /// Lays `text` out at `px` pixels with the line box's top-left at the origin.
    pub(crate) fn layout_line(
        &self,
        layout: &mut Layout<()>,
        text: &str,
        id: FontId,
        px: f32,
    ) -> bool {
        let Some(font) = self.get(id) else { return false };
        layout.reset(&LayoutSettings::default());
        layout.append(&[font], &TextStyle::new(text, px, 0));
        true
    }
}

/// Fresh fontdue layout in the engine's +Y-down convention.
pub(crate) fn new_layout() -> Layout<()> {
    Layout::new(CoordinateSystem::PositiveYDown)
}
