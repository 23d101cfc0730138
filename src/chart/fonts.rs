// src/chart/fonts.rs — Font registration for chart text
//
// The bitmap backend carries no fonts of its own. One face is registered
// under FONT_FAMILY, from `chart.font_path` or else from a known system path.

use std::path::{Path, PathBuf};
use std::sync::{Once, OnceLock};

use plotters::style::FontStyle;

use crate::infra::errors::AppError;

/// Family name every chart text style asks for.
pub const FONT_FAMILY: &str = "sans-serif";

/// Searched in order when no font is configured. CJK faces come first so the
/// Chinese labels render; the Latin faces at the end still cover the digits.
pub const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    // Linux
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/opentype/noto/NotoSansCJKsc-Regular.otf",
    "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
    "/usr/share/fonts/truetype/wqy/wqy-zenhei.ttc",
    "/usr/share/fonts/wenquanyi/wqy-microhei/wqy-microhei.ttc",
    "/usr/share/fonts/wqy-microhei/wqy-microhei.ttc",
    "/usr/share/fonts/truetype/arphic/uming.ttc",
    // macOS
    "/System/Library/Fonts/PingFang.ttc",
    "/System/Library/Fonts/STHeiti Light.ttc",
    "/System/Library/Fonts/Hiragino Sans GB.ttc",
    "/Library/Fonts/Arial Unicode.ttf",
    // Windows
    "C:\\Windows\\Fonts\\simhei.ttf",
    "C:\\Windows\\Fonts\\msyh.ttc",
    "C:\\Windows\\Fonts\\simsun.ttc",
    // Latin-only fallbacks
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

static REGISTERED: OnceLock<PathBuf> = OnceLock::new();
static SYSTEM_SEARCH: Once = Once::new();

/// Read a font file and check that it parses as TrueType/OpenType.
pub fn load_font_bytes(path: &Path) -> Result<Vec<u8>, AppError> {
    let bytes = std::fs::read(path)?;
    ab_glyph::FontRef::try_from_slice(&bytes)
        .map_err(|_| AppError::Chart(format!("Invalid font {}", path.display())))?;
    Ok(bytes)
}

/// Register the font used for all chart text.
///
/// The file is always validated; only the first successful registration
/// takes effect.
pub fn register_font_file(path: &Path) -> Result<(), AppError> {
    let bytes = load_font_bytes(path)?;

    if let Some(existing) = REGISTERED.get() {
        tracing::debug!("Chart font already registered from {}", existing.display());
        return Ok(());
    }

    // The registry only takes 'static data.
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    plotters::style::register_font(FONT_FAMILY, FontStyle::Normal, bytes)
        .map_err(|_| AppError::Chart(format!("Invalid font {}", path.display())))?;

    let _ = REGISTERED.set(path.to_path_buf());
    tracing::info!("Chart font registered from {}", path.display());
    Ok(())
}

/// First candidate that exists and parses as a font.
pub fn find_font_file<'a, I>(candidates: I) -> Option<&'a Path>
where
    I: IntoIterator<Item = &'a Path>,
{
    for candidate in candidates.into_iter().filter(|p| p.is_file()) {
        match load_font_bytes(candidate) {
            Ok(_) => return Some(candidate),
            Err(e) => tracing::debug!("Skipping font candidate: {}", e),
        }
    }
    None
}

/// The registered chart font. When none was registered, the system
/// candidates are searched once and the first usable one is registered.
pub fn ensure_font() -> Option<&'static Path> {
    if REGISTERED.get().is_none() {
        SYSTEM_SEARCH.call_once(|| {
            let candidates = SYSTEM_FONT_CANDIDATES.iter().map(Path::new);
            if let Some(found) = find_font_file(candidates) {
                if let Err(e) = register_font_file(found) {
                    tracing::debug!("System font {} not registered: {}", found.display(), e);
                }
            }
        });
    }
    REGISTERED.get().map(PathBuf::as_path)
}

#[cfg(test)]
pub(crate) fn test_font_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fonts/DejaVuSans.ttf")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_font_file() {
        let result = load_font_bytes(Path::new("/nonexistent/font.ttf"));
        assert!(matches!(result, Err(AppError::Io(_))));
    }

    #[test]
    fn test_load_rejects_non_font() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.ttf");
        std::fs::write(&path, "not a font").unwrap();
        assert!(matches!(load_font_bytes(&path), Err(AppError::Chart(_))));
    }

    #[test]
    fn test_load_valid_font() {
        let bytes = load_font_bytes(&test_font_path()).unwrap();
        assert!(!bytes.is_empty());
    }

    #[test]
    fn test_register_rejects_bad_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.otf");
        std::fs::write(&path, [0u8; 64]).unwrap();

        assert!(matches!(register_font_file(&path), Err(AppError::Chart(_))));
        assert!(matches!(
            register_font_file(Path::new("/nonexistent/font.ttf")),
            Err(AppError::Io(_))
        ));
    }

    #[test]
    fn test_register_valid_font() {
        register_font_file(&test_font_path()).unwrap();
        assert!(ensure_font().is_some());
    }

    #[test]
    fn test_find_font_skips_missing_and_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let garbage = dir.path().join("garbage.ttf");
        std::fs::write(&garbage, "garbage").unwrap();
        let good = test_font_path();

        let candidates = [
            Path::new("/nonexistent/font.ttc"),
            dir.path(),
            garbage.as_path(),
            good.as_path(),
        ];
        assert_eq!(find_font_file(candidates), Some(good.as_path()));
    }

    #[test]
    fn test_find_font_none() {
        assert_eq!(find_font_file([Path::new("/nonexistent/font.ttc")]), None);
    }
}
