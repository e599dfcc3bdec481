//! Pair a `.pil` metrics file with its atlas image.
//!
//! Either both files are given, in any order, or only the `.pil` file is and
//! the atlas is the sibling with the same stem and the first existing
//! extension from [`ATLAS_EXTENSIONS`].

use std::path::{Path, PathBuf};

/// Atlas extensions tried next to a lone `.pil` file, in order.
pub const ATLAS_EXTENSIONS: [&str; 4] = ["pbm", "png", "bmp", "gif"];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    #[error("expected a .pil file and its atlas image, got {0} files")]
    FileCount(usize),
    #[error("expected exactly one .pil file among the inputs")]
    MissingFont,
    #[error("no atlas image next to {}", .0.display())]
    MissingAtlas(PathBuf),
}

/// The two files that make up a bitmap font.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSource {
    pub metrics: PathBuf,
    pub atlas: PathBuf,
}

/// Resolve the user's file selection into a [`FontSource`].
///
/// # Errors
///
/// [`SourceError::FileCount`] for zero or more than two paths,
/// [`SourceError::MissingFont`] unless exactly one path is a `.pil` file,
/// and [`SourceError::MissingAtlas`] when a lone `.pil` has no sibling atlas.
pub fn pair(paths: &[PathBuf]) -> Result<FontSource, SourceError> {
    match paths {
        [metrics] => {
            if !is_pil(metrics) {
                return Err(SourceError::MissingFont);
            }
            let atlas = find_atlas(metrics).ok_or_else(|| SourceError::MissingAtlas(metrics.clone()))?;
            Ok(FontSource { metrics: metrics.clone(), atlas })
        }
        [a, b] => match (is_pil(a), is_pil(b)) {
            (true, false) => Ok(FontSource { metrics: a.clone(), atlas: b.clone() }),
            (false, true) => Ok(FontSource { metrics: b.clone(), atlas: a.clone() }),
            _ => Err(SourceError::MissingFont),
        },
        _ => Err(SourceError::FileCount(paths.len())),
    }
}

/// First existing sibling of `metrics` with an atlas extension.
#[must_use]
pub fn find_atlas(metrics: &Path) -> Option<PathBuf> {
    ATLAS_EXTENSIONS
        .iter()
        .map(|ext| metrics.with_extension(ext))
        .find(|candidate| candidate.is_file())
}

fn is_pil(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("pil"))
}

#[cfg(test)]
#[path = "source_test.rs"]
mod tests;
