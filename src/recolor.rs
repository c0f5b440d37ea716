//! Vector recoloring: rewrites `currentColor` placeholders to a concrete
//! color and stamps target dimensions on the root element.
//!
//! Only the placeholder token is ever rewritten. Elements carrying explicit
//! stroke or fill colors pass through byte-for-byte, which also makes the
//! rewrite idempotent: a second pass finds no placeholders left and re-stamps
//! the same root attributes.

use quick_xml::events::{BytesStart, Event};
use quick_xml::{Reader, Writer};

use crate::error::Error;
use crate::theme::HexColor;

/// Rewrites an SVG document so every `stroke`/`fill` equal to `currentColor`
/// becomes `color`, and the root element is stamped with `size_px` width and
/// height plus a top-level `color` attribute (the inherited default).
///
/// Returns [`Error::Parse`] if the input is not well-formed XML; no partial
/// output is produced.
pub fn recolor(svg: &[u8], color: &HexColor, size_px: u32) -> Result<Vec<u8>, Error> {
    let mut reader = Reader::from_reader(svg);
    let mut writer = Writer::new(Vec::new());
    let mut seen_root = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let root_size = (!seen_root).then_some(size_px);
                seen_root = true;
                let rewritten = rewrite_element(&e, color, root_size)?;
                writer.write_event(Event::Start(rewritten))?;
            }
            Event::Empty(e) => {
                let root_size = (!seen_root).then_some(size_px);
                seen_root = true;
                let rewritten = rewrite_element(&e, color, root_size)?;
                writer.write_event(Event::Empty(rewritten))?;
            }
            Event::Eof => break,
            ev => writer.write_event(ev)?,
        }
    }

    Ok(writer.into_inner())
}

/// Rebuilds one element's attribute list. `root_size` is `Some` only for the
/// document root, whose `width`/`height`/`color` are replaced wholesale.
fn rewrite_element(
    elem: &BytesStart<'_>,
    color: &HexColor,
    root_size: Option<u32>,
) -> Result<BytesStart<'static>, Error> {
    let name = String::from_utf8_lossy(elem.name().as_ref()).into_owned();
    let mut out = BytesStart::new(name);

    for attr in elem.attributes() {
        let attr = attr?;
        match attr.key.as_ref() {
            b"width" | b"height" | b"color" if root_size.is_some() => {
                // dropped here, re-stamped below
            }
            b"stroke" if is_placeholder(&attr.value) => {
                out.push_attribute(("stroke", color.as_str()));
            }
            b"fill" if is_placeholder(&attr.value) => {
                out.push_attribute(("fill", color.as_str()));
            }
            _ => out.push_attribute(attr),
        }
    }

    if let Some(size) = root_size {
        let size = size.to_string();
        out.push_attribute(("width", size.as_str()));
        out.push_attribute(("height", size.as_str()));
        out.push_attribute(("color", color.as_str()));
    }

    Ok(out)
}

/// Case- and whitespace-insensitive match for the `currentColor` placeholder.
fn is_placeholder(value: &[u8]) -> bool {
    value.trim_ascii().eq_ignore_ascii_case(b"currentColor")
}
