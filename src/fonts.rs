// src/fonts.rs

use std::path::Path;

use crate::app::AppError;

const STATUS_FONT_NAME: &str = "status";

/// Which font the status overlay ends up drawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusFont {
    Custom,
    BuiltIn,
}

/// Reads a TTF/OTF file and makes it the first proportional font in egui.
pub fn install_status_font(ctx: &egui::Context, path: &Path) -> Result<(), AppError> {
    let bytes = std::fs::read(path).map_err(|source| AppError::FontLoad {
        path: path.to_path_buf(),
        source,
    })?;

    let mut fonts = egui::FontDefinitions::default();
    fonts
        .font_data
        .insert(STATUS_FONT_NAME.to_owned(), egui::FontData::from_owned(bytes));
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .insert(0, STATUS_FONT_NAME.to_owned());
    ctx.set_fonts(fonts);
    log::info!("Loaded status font from {}", path.display());
    Ok(())
}

/// Installs the font at `path`, falling back to egui's bundled fonts so the
/// overlay is drawn either way.
pub fn load_status_font(ctx: &egui::Context, path: &Path) -> StatusFont {
    match install_status_font(ctx, path) {
        Ok(()) => StatusFont::Custom,
        Err(e) => {
            log::warn!("{}; using the built-in font for status text", e);
            ctx.set_fonts(egui::FontDefinitions::default());
            StatusFont::BuiltIn
        }
    }
}
