//! Batch orchestration: sweeps every (style, theme, kind) unit through
//! recolor, rasterize, and tighten, packs per-(style, theme) atlases, and
//! composes the combined preview.
//!
//! Units are independent: each reads only its own source file and writes
//! only its own outputs, so (style, theme) pairs run in parallel. The only
//! joins are collecting a theme's kinds before packing its atlas and
//! collecting all atlases before the preview. A failed unit aborts its own
//! atlas (never with a placeholder gap) while sibling atlases proceed.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use rayon::prelude::*;

use crate::atlas;
use crate::error::{Error, RunError};
use crate::kind::Kind;
use crate::preview;
use crate::raster::{TightBuffer, rasterize};
use crate::recolor::recolor;
use crate::theme::{HexColor, IconSpec, Style, Theme};

const ATLAS_IMAGE: &str = "atlas.png";
const ATLAS_INDEX: &str = "atlas.json";
const PREVIEW_IMAGE: &str = "all_themes_combined.png";

/// Explicit configuration for one pipeline run. No ambient state: every
/// stage receives what it needs from here, which keeps units independently
/// testable and parallelizable.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Root directory holding one subdirectory per style, each with
    /// `<slug>.svg` files.
    pub icons_dir: PathBuf,
    /// Directory receiving `<theme>_<style>/` outputs and the preview.
    pub out_dir: PathBuf,
    /// Icon edge length in pixels.
    pub size_px: u32,
    /// Horizontal gap between atlas cells in pixels.
    pub padding: u32,
    /// Used when a theme entry has no color of its own.
    pub fallback_color: HexColor,
}

/// Outcome of a run. The run itself only errs on environment-level
/// failures (unreadable output directory, unwritable preview); per-unit
/// failures are collected here.
#[derive(Debug)]
pub struct RunSummary {
    pub atlases_built: usize,
    pub errors: Vec<RunError>,
    pub preview: Option<PathBuf>,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Renders every theme once per style and writes all artifacts.
pub fn run(config: &PipelineConfig, themes: &[Theme]) -> Result<RunSummary, Error> {
    fs::create_dir_all(&config.out_dir)?;

    let mut pairs: Vec<(Style, &Theme)> = Vec::with_capacity(Style::ALL.len() * themes.len());
    for style in Style::ALL {
        for theme in themes {
            pairs.push((style, theme));
        }
    }

    let results: Vec<Result<(Style, String, RgbaImage), RunError>> = pairs
        .into_par_iter()
        .map(|(style, theme)| process_pair(config, style, theme))
        .collect();

    let mut atlases: BTreeMap<Style, BTreeMap<String, RgbaImage>> = BTreeMap::new();
    let mut errors = Vec::new();
    for result in results {
        match result {
            Ok((style, theme_name, image)) => {
                atlases.entry(style).or_default().insert(theme_name, image);
            }
            Err(err) => errors.push(err),
        }
    }

    let atlases_built = atlases.values().map(BTreeMap::len).sum();
    let preview = match preview::compose(&atlases, config.size_px) {
        Some(sheet) => {
            let path = config.out_dir.join(PREVIEW_IMAGE);
            sheet.save(&path)?;
            log::info!("wrote preview {}", path.display());
            Some(path)
        }
        None => None,
    };

    Ok(RunSummary {
        atlases_built,
        errors,
        preview,
    })
}

/// Builds one (style, theme) atlas: validates the theme, renders every
/// kind, writes the per-icon raw buffers, then packs and writes the atlas.
fn process_pair(
    config: &PipelineConfig,
    style: Style,
    theme: &Theme,
) -> Result<(Style, String, RgbaImage), RunError> {
    let theme_name = theme.name().to_string();
    let atlas_err = |source: Error| RunError::Atlas {
        style,
        theme: theme_name.clone(),
        source,
    };

    // Fail fast on a partial theme: nothing is written for it.
    theme.validate().map_err(&atlas_err)?;

    let dir = config
        .out_dir
        .join(format!("{}_{}", theme.name(), style.as_str()));
    fs::create_dir_all(&dir).map_err(|e| atlas_err(e.into()))?;

    let mut icons: Vec<(Kind, TightBuffer)> = Vec::with_capacity(Kind::ALL.len());
    for kind in Kind::ALL {
        let spec = theme
            .get(kind)
            .ok_or_else(|| {
                atlas_err(Error::IncompleteTheme {
                    theme: theme_name.clone(),
                    kind,
                })
            })?;
        let tight = render_icon(config, style, spec, kind, &dir).map_err(|source| {
            RunError::Icon {
                style,
                theme: theme_name.clone(),
                kind,
                slug: spec.slug.clone(),
                source,
            }
        })?;
        icons.push((kind, tight));
    }

    let atlas =
        atlas::pack(&icons, config.size_px, config.padding, ATLAS_IMAGE).map_err(&atlas_err)?;
    atlas
        .image
        .save(dir.join(ATLAS_IMAGE))
        .map_err(|e| atlas_err(e.into()))?;
    let json = atlas.index.to_json().map_err(|e| atlas_err(e.into()))?;
    fs::write(dir.join(ATLAS_INDEX), json).map_err(|e| atlas_err(e.into()))?;

    log::info!("packed atlas for {} ({})", theme.name(), style);
    Ok((style, theme_name, atlas.image))
}

/// Runs one icon through recolor, rasterize, and tighten, and writes its
/// raw RGBA export.
fn render_icon(
    config: &PipelineConfig,
    style: Style,
    spec: &IconSpec,
    kind: Kind,
    dir: &Path,
) -> Result<TightBuffer, Error> {
    let svg = load_source(&config.icons_dir, style, &spec.slug)?;
    let color = spec.color_or(&config.fallback_color);

    let recolored = recolor(&svg, color, config.size_px)?;
    let raster = rasterize(&recolored, config.size_px)?;
    let tight = raster.tighten();

    let expected = config.size_px as usize * config.size_px as usize * 4;
    if tight.len() != expected {
        return Err(Error::SizeMismatch {
            expected,
            actual: tight.len(),
        });
    }

    let path = dir.join(format!("{kind}.rgba"));
    fs::write(&path, tight.as_bytes())?;
    log::debug!("wrote {}", path.display());

    Ok(tight)
}

/// Reads the vector source for `(style, slug)`, falling back to the
/// default style's variant when the requested style has none. A slug
/// absent from both is a hard failure: visual content is never guessed.
fn load_source(icons_dir: &Path, style: Style, slug: &str) -> Result<Vec<u8>, Error> {
    let file = format!("{slug}.svg");
    let primary = icons_dir.join(style.as_str()).join(&file);
    match fs::read(&primary) {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            let fallback = icons_dir.join(Style::FALLBACK.as_str()).join(&file);
            match fs::read(&fallback) {
                Ok(bytes) => {
                    log::debug!(
                        "slug `{slug}` has no `{style}` variant, using `{}`",
                        Style::FALLBACK
                    );
                    Ok(bytes)
                }
                Err(e) if e.kind() == ErrorKind::NotFound => Err(Error::MissingSource {
                    style,
                    slug: slug.to_string(),
                }),
                Err(e) => Err(e.into()),
            }
        }
        Err(e) => Err(e.into()),
    }
}
