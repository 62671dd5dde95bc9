//! Servicing texture requests from the UI library.
//!
//! The UI library flags registry entries with a requested status; these functions perform the
//! matching GPU work and move each entry to its settled status. They are the only code that
//! writes engine handles into the registry.

use imbridge_core::{
    GraphicsService, PixelFormat, TextureData, TextureDesc, TextureFormat, TextureIndex,
    TextureRegion, TextureRegistry, TextureStatus,
};

use crate::error::{RenderError, RenderResult};

const TEXTURE_LABEL: &str = "UI Texture";

/// Maps the UI library's pixel layout to the engine's texture format.
pub fn engine_format(format: PixelFormat) -> TextureFormat {
    match format {
        PixelFormat::Rgba32 => TextureFormat::Rgba8UNorm,
        PixelFormat::Alpha8 => TextureFormat::R8UNorm,
    }
}

/// Processes texture requests in the order given.
pub fn process_requests(
    graphics: &mut dyn GraphicsService,
    registry: &mut TextureRegistry,
    requests: &[TextureIndex],
) -> RenderResult<()> {
    for &index in requests {
        let Some(texture) = registry.get_mut(index) else {
            log::warn!("texture request for missing registry entry {index:?}");
            continue;
        };
        match texture.status() {
            TextureStatus::WantCreate => create(graphics, index, texture)?,
            TextureStatus::WantUpdates => update(graphics, index, texture)?,
            TextureStatus::WantDestroy => destroy(graphics, index, texture),
            TextureStatus::Ok | TextureStatus::Destroyed => {}
        }
    }
    Ok(())
}

/// Creates the GPU texture from the entry's full pixel buffer.
pub fn create(
    graphics: &mut dyn GraphicsService,
    index: TextureIndex,
    texture: &mut TextureData,
) -> RenderResult<()> {
    if let Some(stale) = texture.tex_id() {
        log::warn!("texture {index:?} recreated while {stale:?} was live, releasing it");
        graphics.delete_texture(stale);
    }

    let desc = TextureDesc {
        label: Some(TEXTURE_LABEL),
        format: engine_format(texture.format()),
        width: texture.width(),
        height: texture.height(),
    };
    let id = graphics.create_texture(&desc, texture.pixels())?;
    texture.set_created(id);

    log::debug!(
        "created texture {index:?} as {id:?} ({}x{})",
        desc.width,
        desc.height
    );
    Ok(())
}

/// Uploads every dirty region of the entry.
pub fn update(
    graphics: &mut dyn GraphicsService,
    index: TextureIndex,
    texture: &mut TextureData,
) -> RenderResult<()> {
    let id = texture
        .tex_id()
        .ok_or(RenderError::TextureNotCreated(index))?;

    for region in texture.updates() {
        let region = clamp_region(*region, texture.width(), texture.height());
        if region.area() == 0 {
            continue;
        }
        let pixels = texture.region_pixels(&region);
        graphics.update_texture(id, region, &pixels)?;
    }
    log::trace!("updated {} regions of texture {index:?}", texture.updates().len());

    texture.mark_ready();
    Ok(())
}

/// Releases the entry's GPU texture, if it has one.
pub fn destroy(graphics: &mut dyn GraphicsService, index: TextureIndex, texture: &mut TextureData) {
    if let Some(id) = texture.tex_id() {
        graphics.delete_texture(id);
        log::debug!("destroyed texture {index:?} ({id:?})");
    }
    texture.mark_destroyed();
}

/// Releases every texture the renderer solely owns. Returns how many were released.
pub fn release_owned(graphics: &mut dyn GraphicsService, registry: &mut TextureRegistry) -> usize {
    let mut released = 0;
    for (index, texture) in registry.iter_mut() {
        if texture.ref_count == 1 && texture.tex_id().is_some() {
            texture.request_destroy();
            destroy(graphics, index, texture);
            released += 1;
        }
    }
    released
}

fn clamp_region(region: TextureRegion, width: u32, height: u32) -> TextureRegion {
    let x = region.x.min(width);
    let y = region.y.min(height);
    TextureRegion::new(
        x,
        y,
        region.x.saturating_add(region.width).min(width) - x,
        region.y.saturating_add(region.height).min(height) - y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use imbridge_core::testing::RecordingGraphics;
    use imbridge_core::TextureId;

    fn registry_with(texture: TextureData) -> (TextureRegistry, TextureIndex) {
        let mut registry = TextureRegistry::new();
        let index = registry.insert(texture);
        (registry, index)
    }

    #[test]
    fn test_create_records_handle() {
        let mut graphics = RecordingGraphics::new();
        let (mut registry, index) = registry_with(TextureData::new(PixelFormat::Alpha8, 4, 4));

        process_requests(&mut graphics, &mut registry, &[index]).unwrap();

        let texture = registry.get(index).unwrap();
        assert_eq!(texture.status(), TextureStatus::Ok);
        let id = texture.tex_id().expect("handle recorded");
        let gpu = graphics.texture(id).unwrap();
        assert_eq!(gpu.format, TextureFormat::R8UNorm);
        assert_eq!((gpu.width, gpu.height), (4, 4));
    }

    #[test]
    fn test_update_uploads_dirty_regions() {
        let mut graphics = RecordingGraphics::new();
        let (mut registry, index) = registry_with(TextureData::new(PixelFormat::Rgba32, 4, 4));
        process_requests(&mut graphics, &mut registry, &[index]).unwrap();

        let texture = registry.get_mut(index).unwrap();
        texture.pixels_mut()[..4].copy_from_slice(&[1, 2, 3, 4]);
        texture.mark_dirty(TextureRegion::new(0, 0, 1, 1));
        texture.mark_dirty(TextureRegion::new(3, 3, 4, 4));
        process_requests(&mut graphics, &mut registry, &[index]).unwrap();

        let texture = registry.get(index).unwrap();
        let id = texture.tex_id().unwrap();
        assert_eq!(texture.status(), TextureStatus::Ok);
        assert_eq!(
            graphics.updated,
            vec![
                (id, TextureRegion::new(0, 0, 1, 1)),
                (id, TextureRegion::new(3, 3, 1, 1)),
            ]
        );
        assert_eq!(&graphics.texture(id).unwrap().pixels[..4], &[1, 2, 3, 4]);
    }

    #[test]
    fn test_update_before_create_is_rejected() {
        let mut graphics = RecordingGraphics::new();
        let mut texture = TextureData::new(PixelFormat::Rgba32, 2, 2);
        texture.mark_ready();
        texture.mark_dirty(TextureRegion::new(0, 0, 1, 1));
        let (mut registry, index) = registry_with(texture);

        let err = process_requests(&mut graphics, &mut registry, &[index]).unwrap_err();
        assert!(matches!(err, RenderError::TextureNotCreated(i) if i == index));
    }

    #[test]
    fn test_destroy_releases_handle_once() {
        let mut graphics = RecordingGraphics::new();
        let (mut registry, index) = registry_with(TextureData::new(PixelFormat::Rgba32, 2, 2));
        process_requests(&mut graphics, &mut registry, &[index]).unwrap();
        let id = registry.get(index).unwrap().tex_id().unwrap();

        registry.get_mut(index).unwrap().request_destroy();
        process_requests(&mut graphics, &mut registry, &[index, index]).unwrap();

        let texture = registry.get(index).unwrap();
        assert_eq!(texture.status(), TextureStatus::Destroyed);
        assert_eq!(texture.tex_id(), None);
        assert_eq!(graphics.deleted, vec![id]);
        assert_eq!(graphics.live_textures(), 0);
    }

    #[test]
    fn test_requests_follow_given_order() {
        let mut graphics = RecordingGraphics::new();
        let mut registry = TextureRegistry::new();
        let a = registry.insert(TextureData::new(PixelFormat::Rgba32, 1, 1));
        let b = registry.insert(TextureData::new(PixelFormat::Rgba32, 1, 1));

        process_requests(&mut graphics, &mut registry, &[b, a]).unwrap();
        assert_eq!(registry.get(b).unwrap().tex_id(), Some(TextureId(1)));
        assert_eq!(registry.get(a).unwrap().tex_id(), Some(TextureId(2)));
    }

    #[test]
    fn test_create_failure_propagates() {
        let mut graphics = RecordingGraphics::new().with_max_texture_dimension(16);
        let (mut registry, index) = registry_with(TextureData::new(PixelFormat::Rgba32, 32, 8));

        let err = process_requests(&mut graphics, &mut registry, &[index]).unwrap_err();
        assert!(matches!(err, RenderError::Graphics(_)));
        assert_eq!(registry.get(index).unwrap().status(), TextureStatus::WantCreate);
    }

    #[test]
    fn test_release_owned_skips_shared_textures() {
        let mut graphics = RecordingGraphics::new();
        let mut registry = TextureRegistry::new();
        let owned = registry.insert(TextureData::new(PixelFormat::Rgba32, 1, 1));
        let shared = registry.insert(TextureData::new(PixelFormat::Rgba32, 1, 1));
        let never_created = registry.insert(TextureData::new(PixelFormat::Rgba32, 1, 1));
        process_requests(&mut graphics, &mut registry, &[owned, shared]).unwrap();
        registry.get_mut(shared).unwrap().ref_count = 2;

        assert_eq!(release_owned(&mut graphics, &mut registry), 1);
        assert_eq!(registry.get(owned).unwrap().status(), TextureStatus::Destroyed);
        assert_eq!(registry.get(shared).unwrap().status(), TextureStatus::Ok);
        assert_eq!(registry.get(never_created).unwrap().status(), TextureStatus::WantCreate);
        assert_eq!(graphics.live_textures(), 1);
    }
}
