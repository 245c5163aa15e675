//! System font lookup.

use std::path::Path;

/// Registration name of the display (digits) font.
pub const DISPLAY: &str = "mono";
/// Registration name of the button font.
pub const BUTTON: &str = "sans";

const MONO_PATHS: &[&str] = &[
    "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/noto/NotoSansMono-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSansMono-Regular.ttf",
    "/System/Library/Fonts/Menlo.ttc",
    "C:\\Windows\\Fonts\\consola.ttf",
];

const SANS_PATHS: &[&str] = &[
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

/// Fonts found on this machine, as `(name, bytes)` pairs.
///
/// A missing family is logged and left out; the UI falls back to whichever
/// font did load.
pub fn discover() -> Vec<(&'static str, Vec<u8>)> {
    [(DISPLAY, MONO_PATHS), (BUTTON, SANS_PATHS)]
        .into_iter()
        .filter_map(|(name, paths)| match first_readable(paths) {
            Some(bytes) => Some((name, bytes)),
            None => {
                log::warn!("no {name} font found in {} known locations", paths.len());
                None
            }
        })
        .collect()
}

fn first_readable(paths: &[&str]) -> Option<Vec<u8>> {
    paths.iter().find_map(|p| {
        let bytes = std::fs::read(Path::new(p)).ok()?;
        log::debug!("loaded font {p}");
        Some(bytes)
    })
}
