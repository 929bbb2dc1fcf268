//! Output file naming.
//!
//! Output names are derived from the source file's stem and the output
//! codec. Two sources that resolve to the same output path (for example
//! `photo.png` and `photo.jpg` exported as PNG) overwrite each other; the
//! later file in the batch wins.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::encode::Codec;

/// Suffix appended to the stem in [`FilenameMode::Cropped`].
pub const CROPPED_SUFFIX: &str = "-cropped";

/// Stem used when a source name has none.
const FALLBACK_STEM: &str = "image";

/// Read-only descriptor of one input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageEntry {
    /// Full path to the source file.
    pub path: PathBuf,
    /// File name including extension, used in progress and error messages.
    pub name: String,
    /// Lower-cased extension without the dot.
    pub ext: String,
}

impl ImageEntry {
    /// Describe the file at `path`.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| FALLBACK_STEM.to_string());
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        Self { path, name, ext }
    }

    /// File name without its extension.
    pub fn stem(&self) -> &str {
        Path::new(&self.name)
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .unwrap_or(FALLBACK_STEM)
    }
}

/// How output file names are formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilenameMode {
    /// Keep the source stem: `icon.jpg` -> `icon.png`.
    #[default]
    Ui,
    /// Append `-cropped`: `icon.jpg` -> `icon-cropped.png`.
    Cropped,
}

impl std::str::FromStr for FilenameMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ui" => Ok(FilenameMode::Ui),
            "cropped" => Ok(FilenameMode::Cropped),
            _ => Err(format!("unknown filename mode '{s}' (expected ui or cropped)")),
        }
    }
}

/// Which codec each output file is written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutputFormat {
    /// Every file uses the same codec.
    Fixed(Codec),
    /// Each file keeps its source codec; unknown extensions become PNG.
    MatchSource,
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Fixed(Codec::Png)
    }
}

impl OutputFormat {
    /// Codec used for `entry`.
    pub fn codec_for(&self, entry: &ImageEntry) -> Codec {
        match self {
            OutputFormat::Fixed(codec) => *codec,
            OutputFormat::MatchSource => Codec::from_extension(&entry.ext).unwrap_or(Codec::Png),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("source") {
            return Ok(OutputFormat::MatchSource);
        }
        s.parse::<Codec>().map(OutputFormat::Fixed)
    }
}

/// Output path for `entry` inside `output_dir`.
pub fn resolve_output_path(
    entry: &ImageEntry,
    mode: FilenameMode,
    codec: Codec,
    output_dir: &Path,
) -> PathBuf {
    let suffix = match mode {
        FilenameMode::Ui => "",
        FilenameMode::Cropped => CROPPED_SUFFIX,
    };
    output_dir.join(format!("{}{}.{}", entry.stem(), suffix, codec.extension()))
}
