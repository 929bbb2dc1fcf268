//! Export configuration: JSON file merged with command-line overrides.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use pixelcut_core::{
    normalize, read_dimensions, CropRect, ExportOptions, ExportRequest, FilenameMode, ImageEntry,
    OutputFormat, Point, Shape, ShapeConfig, TargetSize,
};
use serde::Deserialize;

use crate::discover::list_images;

/// Corner radius used when `--shape rounded` is given without a radius.
const DEFAULT_RADIUS_PX: u32 = 18;

/// Arguments of `pixelcut export`.
#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// Folder containing the source images
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Folder the exports are written to (created if missing)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Crop rectangle in source pixels: X,Y,W,H
    #[arg(long, value_parser = parse_crop, conflicts_with = "select")]
    pub crop: Option<CropRect>,

    /// Two selection corners in source pixels: X1,Y1,X2,Y2
    #[arg(long, value_parser = parse_select)]
    pub select: Option<Selection>,

    /// Image whose dimensions bound --select (defaults to the first input)
    #[arg(long, requires = "select")]
    pub reference: Option<PathBuf>,

    /// Output size: WxH
    #[arg(long, value_parser = parse_size)]
    pub size: Option<TargetSize>,

    /// Mask shape
    #[arg(long, value_enum)]
    pub shape: Option<ShapeArg>,

    /// Corner radius in output pixels
    #[arg(long)]
    pub radius: Option<u32>,

    /// Inset from every edge in output pixels
    #[arg(long)]
    pub inset: Option<u32>,

    /// Keep masked-out pixels transparent in PNG output
    #[arg(long)]
    pub transparent: bool,

    /// Output format: png, jpeg, webp, or source to keep each file's format
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// File naming: ui keeps the name, cropped appends -cropped
    #[arg(long)]
    pub naming: Option<FilenameMode>,

    /// JPEG quality (1-100)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: Option<u8>,

    /// JSON file holding an export request; flags override its fields
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ShapeArg {
    #[value(alias = "rectangle")]
    Rect,
    Rounded,
}

impl From<ShapeArg> for Shape {
    fn from(arg: ShapeArg) -> Self {
        match arg {
            ShapeArg::Rect => Shape::Rectangle,
            ShapeArg::Rounded => Shape::Rounded,
        }
    }
}

/// Drag selection given as two corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    pub anchor: Point,
    pub endpoint: Point,
}

/// Export request as read from `--config`. Every field may be left out and
/// supplied on the command line instead.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigFile {
    pub input_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub crop: Option<CropRect>,
    pub shape: Option<ShapeConfig>,
    pub target: Option<TargetSize>,
    pub options: Option<ExportOptions>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }
}

/// A fully resolved run: the request plus the files it covers.
#[derive(Debug)]
pub struct ExportPlan {
    pub request: ExportRequest,
    pub entries: Vec<ImageEntry>,
}

/// Load the config file (if any), list the input folder and merge the flags.
pub fn build_plan(args: &ExportArgs) -> Result<ExportPlan> {
    let config = match &args.config {
        Some(path) => ConfigFile::load(path)?,
        None => ConfigFile::default(),
    };

    let input_dir = args
        .input
        .clone()
        .or_else(|| config.input_dir.clone())
        .context("an input folder is required (--input or inputDir in --config)")?;
    let entries = list_images(&input_dir)?;

    let request = merge(args, config, input_dir, &entries)?;
    Ok(ExportPlan { request, entries })
}

/// Combine flags and config into a request. Flags win.
fn merge(
    args: &ExportArgs,
    config: ConfigFile,
    input_dir: PathBuf,
    entries: &[ImageEntry],
) -> Result<ExportRequest> {
    let output_dir = args
        .output
        .clone()
        .or(config.output_dir)
        .context("an output folder is required (--output or outputDir in --config)")?;

    let crop = match (args.crop, args.select) {
        (Some(crop), _) => crop,
        (None, Some(selection)) => {
            let reference = match &args.reference {
                Some(path) => path.clone(),
                None => entries
                    .first()
                    .map(|entry| entry.path.clone())
                    .context("--select needs --reference when the input folder is empty")?,
            };
            let (width, height) = read_dimensions(&reference)
                .with_context(|| format!("failed to read dimensions of {}", reference.display()))?;
            normalize(selection.anchor, selection.endpoint, width, height)
        }
        (None, None) => config
            .crop
            .context("a crop is required (--crop, --select or crop in --config)")?,
    };

    let target = args
        .size
        .or(config.target)
        .context("an output size is required (--size or target in --config)")?;

    let mut shape = config.shape.unwrap_or_default();
    if let Some(arg) = args.shape {
        shape.shape = arg.into();
        if arg == ShapeArg::Rounded && shape.corner_radius_px == 0 && args.radius.is_none() {
            shape.corner_radius_px = DEFAULT_RADIUS_PX;
        }
    }
    if let Some(radius) = args.radius {
        shape.corner_radius_px = radius;
    }
    if let Some(inset) = args.inset {
        shape.inset_px = inset;
    }

    let mut options = config.options.unwrap_or_default();
    if args.transparent {
        options.transparent_png = true;
    }
    if let Some(format) = args.format {
        options.output_format = format;
    }
    if let Some(naming) = args.naming {
        options.filename_mode = naming;
    }
    if let Some(quality) = args.quality {
        options.jpeg_quality = quality;
    }

    Ok(ExportRequest {
        input_dir,
        output_dir,
        crop,
        shape,
        target,
        options,
    })
}

fn parse_numbers<const N: usize>(s: &str, what: &str) -> Result<[f64; N], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != N {
        return Err(format!("{what} needs {N} comma-separated numbers, got '{s}'"));
    }
    let mut values = [0.0; N];
    for (value, part) in values.iter_mut().zip(&parts) {
        *value = part
            .parse::<f64>()
            .map_err(|_| format!("'{part}' is not a number"))?;
    }
    Ok(values)
}

fn parse_crop(s: &str) -> Result<CropRect, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x, y, w, h] = parts.as_slice() else {
        return Err(format!("crop needs X,Y,W,H, got '{s}'"));
    };
    let num = |v: &str| {
        v.parse::<u32>()
            .map_err(|_| format!("'{v}' is not a non-negative integer"))
    };
    Ok(CropRect::new(num(x)?, num(y)?, num(w)?, num(h)?))
}

fn parse_select(s: &str) -> Result<Selection, String> {
    let [x1, y1, x2, y2] = parse_numbers::<4>(s, "selection")?;
    Ok(Selection {
        anchor: Point::new(x1, y1),
        endpoint: Point::new(x2, y2),
    })
}

fn parse_size(s: &str) -> Result<TargetSize, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("size needs WxH, got '{s}'"))?;
    let num = |v: &str| {
        v.trim()
            .parse::<u32>()
            .map_err(|_| format!("'{v}' is not a non-negative integer"))
    };
    Ok(TargetSize::new(num(w)?, num(h)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use image::{Rgb, RgbImage};
    use pixelcut_core::Codec;
    use tempfile::TempDir;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: ExportArgs,
    }

    fn parse(args: &[&str]) -> ExportArgs {
        let mut argv = vec!["pixelcut"];
        argv.extend_from_slice(args);
        TestCli::try_parse_from(argv).unwrap().args
    }

    #[test]
    fn test_parse_crop() {
        assert_eq!(parse_crop("100,50,600,450").unwrap(), CropRect::new(100, 50, 600, 450));
        assert_eq!(parse_crop(" 1, 2, 3, 4 ").unwrap(), CropRect::new(1, 2, 3, 4));
        assert!(parse_crop("1,2,3").is_err());
        assert!(parse_crop("1,2,-3,4").is_err());
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("640x480").unwrap(), TargetSize::new(640, 480));
        assert_eq!(parse_size("32X32").unwrap(), TargetSize::new(32, 32));
        assert!(parse_size("640").is_err());
    }

    #[test]
    fn test_parse_select() {
        let sel = parse_select("700.5,500,100,50.25").unwrap();
        assert_eq!(sel.anchor, Point::new(700.5, 500.0));
        assert_eq!(sel.endpoint, Point::new(100.0, 50.25));
        assert!(parse_select("1,2,x,4").is_err());
    }

    #[test]
    fn test_crop_and_select_conflict() {
        let result = TestCli::try_parse_from([
            "pixelcut", "--crop", "0,0,1,1", "--select", "0,0,1,1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_flags_only() {
        let args = parse(&[
            "--output", "/out", "--crop", "100,50,600,450", "--size", "640x480", "--shape",
            "rounded", "--naming", "cropped", "--format", "source",
        ]);
        let request = merge(&args, ConfigFile::default(), PathBuf::from("/in"), &[]).unwrap();

        assert_eq!(request.crop, CropRect::new(100, 50, 600, 450));
        assert_eq!(request.target, TargetSize::new(640, 480));
        assert_eq!(request.shape, ShapeConfig::rounded(DEFAULT_RADIUS_PX, 0));
        assert_eq!(request.options.filename_mode, FilenameMode::Cropped);
        assert_eq!(request.options.output_format, OutputFormat::MatchSource);
    }

    #[test]
    fn test_flags_override_config() {
        let config: ConfigFile = serde_json::from_str(
            r#"{
                "outputDir": "/config-out",
                "crop": {"x": 0, "y": 0, "w": 10, "h": 10},
                "shape": {"shape": "rounded", "cornerRadiusPx": 4, "insetPx": 2},
                "target": {"w": 100, "h": 100},
                "options": {"jpegQuality": 70, "outputFormat": {"fixed": "jpeg"}}
            }"#,
        )
        .unwrap();
        let args = parse(&["--size", "50x40", "--radius", "9", "--quality", "95"]);
        let request = merge(&args, config, PathBuf::from("/in"), &[]).unwrap();

        assert_eq!(request.output_dir, PathBuf::from("/config-out"));
        assert_eq!(request.crop, CropRect::new(0, 0, 10, 10));
        assert_eq!(request.target, TargetSize::new(50, 40));
        assert_eq!(request.shape, ShapeConfig::rounded(9, 2));
        assert_eq!(request.options.jpeg_quality, 95);
        assert_eq!(request.options.output_format, OutputFormat::Fixed(Codec::Jpeg));
    }

    #[test]
    fn test_missing_crop_is_error() {
        let args = parse(&["--output", "/out", "--size", "10x10"]);
        let err = merge(&args, ConfigFile::default(), PathBuf::from("/in"), &[]).unwrap_err();
        assert!(err.to_string().contains("crop is required"));
    }

    #[test]
    fn test_select_uses_first_input() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ref.png");
        RgbImage::from_pixel(800, 600, Rgb([0, 0, 0])).save(&path).unwrap();
        let entries = vec![ImageEntry::from_path(&path)];

        let args = parse(&["--output", "/out", "--select", "900,700,99.5,49.5", "--size", "64x48"]);
        let request = merge(&args, ConfigFile::default(), dir.path().to_path_buf(), &entries).unwrap();
        assert_eq!(request.crop, CropRect::new(99, 49, 701, 551));
    }

    #[test]
    fn test_build_plan_lists_input() {
        let dir = TempDir::new().unwrap();
        RgbImage::from_pixel(4, 4, Rgb([0, 0, 0]))
            .save(dir.path().join("a.png"))
            .unwrap();
        let input = dir.path().to_string_lossy().into_owned();
        let args = parse(&["--input", &input, "--output", "/out", "--crop", "0,0,2,2", "--size", "2x2"]);

        let plan = build_plan(&args).unwrap();
        assert_eq!(plan.entries.len(), 1);
        assert_eq!(plan.request.input_dir, dir.path());
    }
}
