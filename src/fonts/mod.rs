//! Font loading for the report renderer.
//!
//! `genpdf` embeds TrueType fonts into the produced document, so the four
//! Roboto faces must be present on disk. They are looked up in the
//! directory named by the `SUPERSTORE_FONTS_DIR` environment variable when
//! set, otherwise under `assets/fonts` next to the crate manifest. See
//! `assets/fonts/README.md` for setup.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use genpdf::error::Error;
use genpdf::fonts::{self, FontData, FontFamily};

use crate::error::ReportError;

/// Name of the bundled font family.
pub const DEFAULT_FONT_FAMILY_NAME: &str = "Roboto";

/// Environment variable overriding the font search directory.
pub const FONTS_DIR_ENV: &str = "SUPERSTORE_FONTS_DIR";

const FONT_FILES: &[&str] = &[
    "Roboto-Regular.ttf",
    "Roboto-Bold.ttf",
    "Roboto-Italic.ttf",
    "Roboto-BoldItalic.ttf",
];

/// Resolves the directory searched for the bundled fonts.
pub fn fonts_directory() -> PathBuf {
    if let Some(dir) = env::var_os(FONTS_DIR_ENV) {
        return PathBuf::from(dir);
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts")
}

fn ensure_required_fonts_present(path: &Path) -> Result<(), Error> {
    let missing: Vec<_> = FONT_FILES
        .iter()
        .map(|name| path.join(name))
        .filter(|candidate| !candidate.is_file())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        let display_list = missing
            .iter()
            .map(|path| path.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");

        Err(Error::new(
            format!(
                "Missing font files: {}. See assets/fonts/README.md for setup.",
                display_list
            ),
            io::Error::new(io::ErrorKind::NotFound, "report fonts missing"),
        ))
    }
}

/// Loads the Roboto font family used by the report.
pub fn default_font_family() -> Result<FontFamily<FontData>, ReportError> {
    let directory = fonts_directory();
    ensure_required_fonts_present(&directory).map_err(ReportError::FontLoad)?;

    fonts::from_files(&directory, DEFAULT_FONT_FAMILY_NAME, None).map_err(|err| {
        ReportError::FontLoad(Error::new(
            format!(
                "Failed to load font family '{}' from {}",
                DEFAULT_FONT_FAMILY_NAME,
                directory.display()
            ),
            io::Error::new(io::ErrorKind::Other, err.to_string()),
        ))
    })
}

/// Indicates whether all required font files are present on disk.
///
/// Tests use this to skip rendering assertions on machines without the
/// bundled fonts instead of failing.
pub fn fonts_available() -> bool {
    let directory = fonts_directory();
    directory.exists()
        && FONT_FILES
            .iter()
            .map(|name| directory.join(name))
            .all(|path| path.is_file())
}
