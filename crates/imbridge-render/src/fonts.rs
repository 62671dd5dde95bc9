//! Eager font atlas construction.
//!
//! Used when the UI library does not delegate texture management: the default font and any
//! configured icon fonts are rasterized once into an RGBA atlas that lives for the session.

use imbridge_core::{
    FontAtlas, FontConfig, GraphicsService, Options, TextureDesc, TextureFormat, TextureId,
};

use crate::error::{RenderError, RenderResult};

const FONT_ATLAS_LABEL: &str = "UI Font Atlas";

/// Font configuration for icon glyphs merged into the default font.
pub fn icon_font_config(options: &Options) -> FontConfig {
    let [first, last] = options.icon_glyph_range;
    FontConfig {
        size_pixels: options.icon_font_size,
        merge_mode: true,
        pixel_snap_h: true,
        glyph_min_advance_x: options.icon_font_size,
        glyph_ranges: vec![(first, last)],
    }
}

/// Adds the default font plus the configured icon fonts, then rasterizes the atlas.
pub fn build_font_atlas(atlas: &mut dyn FontAtlas, options: &Options) -> RenderResult<()> {
    let config = icon_font_config(options);

    atlas.add_font_default();
    if options.icon_fonts.is_empty() {
        log::warn!("no icon fonts configured; icon glyphs will not render");
    }
    for path in &options.icon_fonts {
        let data = std::fs::read(path).map_err(|source| RenderError::FontLoad {
            path: path.clone(),
            source,
        })?;
        if !atlas.add_font_from_memory_ttf(data, &config) {
            return Err(RenderError::FontAtlas(format!(
                "{} is not a usable TrueType font",
                path.display()
            )));
        }
        log::debug!("merged icon font {}", path.display());
    }

    if !atlas.build() {
        return Err(RenderError::FontAtlas("rasterization failed".to_string()));
    }
    Ok(())
}

/// Uploads the built atlas as one persistent texture and records its handle in the atlas.
pub fn upload_font_atlas(
    graphics: &mut dyn GraphicsService,
    atlas: &mut dyn FontAtlas,
) -> RenderResult<TextureId> {
    let image = atlas
        .tex_data_as_rgba32()
        .ok_or_else(|| RenderError::FontAtlas("atlas has not been built".to_string()))?;
    let desc = TextureDesc {
        label: Some(FONT_ATLAS_LABEL),
        format: TextureFormat::Rgba8UNorm,
        width: image.width,
        height: image.height,
    };
    let id = graphics.create_texture(&desc, image.pixels)?;
    atlas.set_tex_id(id);

    log::info!("font atlas uploaded ({}x{}) as {id:?}", desc.width, desc.height);
    Ok(id)
}
