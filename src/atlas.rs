//! Sprite-atlas packing: a horizontal strip of uniform cells plus a
//! machine-readable index.
//!
//! The caller supplies icons in a deterministic order (the pipeline uses
//! lexicographic [`Kind`] order) so atlases are byte-for-byte reproducible
//! across runs and diffable in version control.

use std::collections::BTreeMap;

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::error::{Error, PackError};
use crate::kind::Kind;
use crate::raster::TightBuffer;

/// Position of one icon inside the atlas strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtlasSlot {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
    pub index: u32,
}

/// The JSON side-car describing an atlas image.
///
/// Serialized with `map` as a sorted mapping so the file content is stable
/// for identical input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtlasIndex {
    /// File name of the atlas image this index describes.
    pub image: String,
    /// Cell edge length in pixels.
    pub size: u32,
    /// Horizontal gap between cells in pixels.
    pub padding: u32,
    pub map: BTreeMap<String, AtlasSlot>,
}

impl AtlasIndex {
    /// Pretty JSON with 2-space indentation.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// A packed atlas: the strip image and its index.
#[derive(Debug, Clone)]
pub struct Atlas {
    pub image: RgbaImage,
    pub index: AtlasIndex,
}

/// Packs equally sized icons into a single horizontal strip.
///
/// The strip is `n*cell + (n-1)*padding` pixels wide and `cell` high, with a
/// fully transparent background; icon `i` lands at `x = i * (cell +
/// padding)`. Fails with [`PackError::Empty`] for a zero-icon atlas and
/// [`PackError::NonUniformCell`] if any icon is not exactly `cell x cell`.
pub fn pack(
    icons: &[(Kind, TightBuffer)],
    cell: u32,
    padding: u32,
    image_name: &str,
) -> Result<Atlas, Error> {
    if icons.is_empty() {
        return Err(PackError::Empty.into());
    }

    let expected = cell as usize * cell as usize * 4;
    for (kind, tight) in icons {
        if tight.width() != cell || tight.height() != cell || tight.len() != expected {
            return Err(PackError::NonUniformCell {
                kind: *kind,
                expected,
                actual: tight.len(),
            }
            .into());
        }
    }

    let n = icons.len() as u32;
    let width = n * cell + (n - 1) * padding;
    let height = cell;

    let mut pixels = vec![0u8; (width * height * 4) as usize];
    let mut map = BTreeMap::new();

    for (i, (kind, tight)) in icons.iter().enumerate() {
        let x = i as u32 * (cell + padding);
        blit(&mut pixels, width, tight, x);
        map.insert(
            kind.as_str().to_string(),
            AtlasSlot {
                x,
                y: 0,
                w: cell,
                h: cell,
                index: i as u32,
            },
        );
    }

    let image = RgbaImage::from_raw(width, height, pixels)
        .expect("atlas buffer sized to its dimensions");

    Ok(Atlas {
        image,
        index: AtlasIndex {
            image: image_name.to_string(),
            size: cell,
            padding,
            map,
        },
    })
}

/// Copies a tight icon buffer into the strip at column `x`, row by row.
fn blit(pixels: &mut [u8], strip_width: u32, tight: &TightBuffer, x: u32) {
    let row_len = tight.width() as usize * 4;
    let strip_row = strip_width as usize * 4;
    for (y, row) in tight.as_bytes().chunks_exact(row_len).enumerate() {
        let start = y * strip_row + x as usize * 4;
        pixels[start..start + row_len].copy_from_slice(row);
    }
}
