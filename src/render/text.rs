use std::borrow::Cow;
use std::path::Path;

use crate::foundation::error::{ChartError, ChartResult};

const PREFERRED_FAMILIES: [fontdb::Family<'static>; 5] = [
    fontdb::Family::Name("DejaVu Sans"),
    fontdb::Family::Name("Liberation Sans"),
    fontdb::Family::Name("Noto Sans"),
    fontdb::Family::Name("Arial"),
    fontdb::Family::SansSerif,
];

/// Load the font used for all chart text.
///
/// An explicit `path` must be readable. Without one, the system font database is searched for a
/// regular sans-serif face; `Ok(None)` means no font was found and text is skipped.
pub fn load_font(path: Option<&Path>) -> ChartResult<Option<Vec<u8>>> {
    if let Some(p) = path {
        return std::fs::read(p)
            .map(Some)
            .map_err(|e| ChartError::config(format!("read font '{}': {e}", p.display())));
    }

    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    let bytes = system_font(&db);
    if bytes.is_none() {
        tracing::warn!(faces = db.len(), "no usable font found; chart text will not be drawn");
    }
    Ok(bytes)
}

fn system_font(db: &fontdb::Database) -> Option<Vec<u8>> {
    let id = pick_face(db)?;
    if let Some(face) = db.face(id) {
        tracing::debug!(font = %face.post_script_name, "using font");
    }
    db.with_face_data(id, |data, _| data.to_vec())
}

/// Text layout reads face 0 of the font data, so collection members past it are skipped.
fn pick_face(db: &fontdb::Database) -> Option<fontdb::ID> {
    let query = fontdb::Query {
        families: &PREFERRED_FAMILIES,
        ..fontdb::Query::default()
    };
    db.query(&query)
        .filter(|id| db.face(*id).is_some_and(|f| f.index == 0))
        .or_else(|| {
            db.faces()
                .find(|f| f.index == 0 && !f.monospaced)
                .map(|f| f.id)
        })
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    /// Red channel.
    pub(crate) r: u8,
    /// Green channel.
    pub(crate) g: u8,
    /// Blue channel.
    pub(crate) b: u8,
    /// Alpha channel.
    pub(crate) a: u8,
}

impl From<[u8; 4]> for TextBrushRgba8 {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }
}

/// Parley contexts bound to a single registered font family.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family_name: String,
    font: vello_cpu::peniko::FontData,
}

impl TextLayoutEngine {
    /// Register `font_bytes` and prepare layout contexts.
    pub(crate) fn new(font_bytes: Vec<u8>) -> ChartResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.clone()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| ChartError::render("no font families registered from font bytes"))?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| ChartError::render("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            font: vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(font_bytes), 0),
        })
    }

    /// Font handle for glyph drawing.
    pub(crate) fn font(&self) -> &vello_cpu::peniko::FontData {
        &self.font
    }

    /// Shape and lay out a single line of text.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> ChartResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(ChartError::render("text size must be finite and > 0"));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
