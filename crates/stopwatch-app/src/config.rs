use stopwatch_engine::paint::Color;

/// Window settings for the stopwatch.
#[derive(Debug, Clone)]
pub struct StopwatchConfig {
    pub title: String,
    /// Initial size in logical pixels.
    pub size: (f64, f64),
    pub min_size: (f64, f64),
    pub always_on_top: bool,
    /// Whole-window opacity in `[0, 1]`.
    pub opacity: f32,
    pub theme: Theme,
}

impl Default for StopwatchConfig {
    fn default() -> Self {
        Self {
            title: "Stopwatch".to_string(),
            size: (400.0, 200.0),
            min_size: (240.0, 120.0),
            always_on_top: true,
            opacity: 0.9,
            theme: Theme::default(),
        }
    }
}

/// Colors and sizes of the stopwatch layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub background: Color,
    pub display: Color,
    pub display_size: f32,
    pub start: Color,
    pub stop: Color,
    pub reset: Color,
    pub button_text: Color,
    pub button_text_size: f32,
    /// Space around each button cell.
    pub cell_padding: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::BLACK,
            display: Color::from_hex(0xD3D3D3),
            display_size: 72.0,
            start: Color::from_hex(0x008000),
            stop: Color::from_hex(0xFF0000),
            reset: Color::from_hex(0x808080),
            button_text: Color::WHITE,
            button_text_size: 15.0,
            cell_padding: 20.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window_is_small_translucent_and_on_top() {
        let cfg = StopwatchConfig::default();
        assert_eq!(cfg.size, (400.0, 200.0));
        assert!(cfg.always_on_top);
        assert!(cfg.opacity < 1.0);
        assert!(cfg.min_size.0 <= cfg.size.0 && cfg.min_size.1 <= cfg.size.1);
    }

    #[test]
    fn buttons_are_distinguishable() {
        let t = Theme::default();
        assert_ne!(t.start, t.stop);
        assert_ne!(t.stop, t.reset);
        assert_ne!(t.start, t.reset);
    }
}
