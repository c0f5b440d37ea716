//! Diagnostic preview: every (style, theme) atlas flattened onto one
//! labeled comparison sheet.
//!
//! The preview is for human review only; nothing consumes it
//! programmatically and legibility, not byte-exactness, is the contract.
//! Atlases are composited onto an opaque white background (source-over
//! against white), grouped into per-style sections with themes sorted by
//! name. Text rendering is outside this pipeline, so each row keeps a
//! reserved label gutter and each section is delimited by a header band
//! with a rule.

use std::collections::BTreeMap;

use image::{Rgb, RgbImage, RgbaImage};

use crate::theme::Style;

const LABEL_WIDTH: u32 = 150;
const SECTION_HEADER_HEIGHT: u32 = 40;
const ROW_PADDING: u32 = 20;
const MARGIN: u32 = 20;
const SECTION_GAP: u32 = 30;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const RULE: Rgb<u8> = Rgb([32, 32, 32]);

/// Composes all built atlases into one comparison image.
///
/// Returns `None` when no atlas is available (every section empty).
pub fn compose(
    atlases: &BTreeMap<Style, BTreeMap<String, RgbaImage>>,
    cell: u32,
) -> Option<RgbImage> {
    let sections: Vec<(&Style, &BTreeMap<String, RgbaImage>)> = atlases
        .iter()
        .filter(|(_, themes)| !themes.is_empty())
        .collect();
    if sections.is_empty() {
        return None;
    }

    let row_height = cell + ROW_PADDING;
    let sprite_width = sections
        .iter()
        .flat_map(|(_, themes)| themes.values())
        .map(RgbaImage::width)
        .max()?;

    let width = MARGIN + LABEL_WIDTH + sprite_width + MARGIN;
    let body: u32 = sections
        .iter()
        .map(|(_, themes)| SECTION_HEADER_HEIGHT + themes.len() as u32 * row_height)
        .sum();
    let height = MARGIN + body + (sections.len() as u32 - 1) * SECTION_GAP + MARGIN;

    let mut sheet = RgbImage::from_pixel(width, height, WHITE);

    let mut y = MARGIN;
    for (i, (_, themes)) in sections.iter().enumerate() {
        // header band: a rule along its baseline stands in for the style label
        fill_rect(
            &mut sheet,
            MARGIN,
            y + SECTION_HEADER_HEIGHT - 4,
            width - 2 * MARGIN,
            2,
            RULE,
        );
        y += SECTION_HEADER_HEIGHT;

        for atlas in themes.values() {
            let sprite_y = y + (row_height - cell) / 2;
            composite_over_opaque(&mut sheet, atlas, MARGIN + LABEL_WIDTH, sprite_y);
            y += row_height;
        }

        if i + 1 < sections.len() {
            y += SECTION_GAP;
        }
    }

    Some(sheet)
}

/// Source-over composites an RGBA image onto an opaque RGB destination.
fn composite_over_opaque(dest: &mut RgbImage, src: &RgbaImage, ox: u32, oy: u32) {
    for (sx, sy, pixel) in src.enumerate_pixels() {
        let (dx, dy) = (ox + sx, oy + sy);
        if dx >= dest.width() || dy >= dest.height() {
            continue;
        }
        let alpha = pixel[3] as f32 / 255.0;
        let dst = dest.get_pixel_mut(dx, dy);
        for c in 0..3 {
            let blended = pixel[c] as f32 * alpha + dst[c] as f32 * (1.0 - alpha);
            dst[c] = blended.round().min(255.0) as u8;
        }
    }
}

fn fill_rect(dest: &mut RgbImage, x: u32, y: u32, w: u32, h: u32, color: Rgb<u8>) {
    for dy in y..(y + h).min(dest.height()) {
        for dx in x..(x + w).min(dest.width()) {
            dest.put_pixel(dx, dy, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn atlas_map(
        entries: &[(Style, &str, RgbaImage)],
    ) -> BTreeMap<Style, BTreeMap<String, RgbaImage>> {
        let mut map: BTreeMap<Style, BTreeMap<String, RgbaImage>> = BTreeMap::new();
        for (style, theme, img) in entries {
            map.entry(*style)
                .or_default()
                .insert((*theme).to_string(), img.clone());
        }
        map
    }

    #[test]
    fn empty_input_yields_no_preview() {
        assert!(compose(&BTreeMap::new(), 16).is_none());
        let empty = atlas_map(&[]);
        assert!(compose(&empty, 16).is_none());
    }

    #[test]
    fn layout_dimensions_follow_constants() {
        let sprite = RgbaImage::new(196, 16);
        let atlases = atlas_map(&[
            (Style::Outline, "default", sprite.clone()),
            (Style::Outline, "geometric", sprite.clone()),
            (Style::Filled, "default", sprite),
        ]);
        let sheet = compose(&atlases, 16).unwrap();

        assert_eq!(sheet.width(), MARGIN + LABEL_WIDTH + 196 + MARGIN);
        let expected_height = MARGIN
            + (SECTION_HEADER_HEIGHT + 2 * (16 + ROW_PADDING))
            + SECTION_GAP
            + (SECTION_HEADER_HEIGHT + (16 + ROW_PADDING))
            + MARGIN;
        assert_eq!(sheet.height(), expected_height);
    }

    #[test]
    fn background_is_white_and_atlas_is_flattened() {
        let mut sprite = RgbaImage::new(8, 8);
        // one opaque red pixel and one half-transparent black pixel
        sprite.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        sprite.put_pixel(1, 0, Rgba([0, 0, 0, 128]));

        let atlases = atlas_map(&[(Style::Outline, "default", sprite)]);
        let sheet = compose(&atlases, 8).unwrap();

        assert_eq!(sheet.get_pixel(0, 0).0, [255, 255, 255]);

        let row_y = MARGIN + SECTION_HEADER_HEIGHT + ROW_PADDING / 2;
        let sprite_x = MARGIN + LABEL_WIDTH;
        assert_eq!(sheet.get_pixel(sprite_x, row_y).0, [255, 0, 0]);

        // half-transparent black over white lands mid-gray
        let gray = sheet.get_pixel(sprite_x + 1, row_y).0;
        assert!(gray[0] > 100 && gray[0] < 160, "got {gray:?}");

        // fully transparent atlas pixels leave the background white
        assert_eq!(sheet.get_pixel(sprite_x + 4, row_y).0, [255, 255, 255]);
    }
}
