//! Texture registry of the UI library.
//!
//! Entries live in an arena and are addressed by [`TextureIndex`], which stays valid for the
//! entry's whole life. The UI library requests work by setting an entry's status; the render
//! adapter performs it and is the only writer of the engine-side handle.

use crate::engine::{TextureId, TextureRegion};

/// Stable index of a registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureIndex(pub usize);

/// Lifecycle state of a registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureStatus {
    /// Uploaded and current.
    Ok,
    /// GPU resource released.
    Destroyed,
    /// Needs a GPU texture created from the full pixel buffer.
    WantCreate,
    /// Needs the dirty regions uploaded to the existing GPU texture.
    WantUpdates,
    /// Needs its GPU texture released.
    WantDestroy,
}

impl TextureStatus {
    /// Returns true if the renderer has work to do for this entry.
    pub fn is_pending(self) -> bool {
        matches!(
            self,
            TextureStatus::WantCreate | TextureStatus::WantUpdates | TextureStatus::WantDestroy
        )
    }
}

/// CPU-side pixel layout of a registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    Rgba32,
    Alpha8,
}

impl PixelFormat {
    /// Returns the size of one pixel in bytes.
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Rgba32 => 4,
            PixelFormat::Alpha8 => 1,
        }
    }
}

/// A texture owned by the UI library.
#[derive(Debug, Clone)]
pub struct TextureData {
    status: TextureStatus,
    format: PixelFormat,
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    updates: Vec<TextureRegion>,
    tex_id: Option<TextureId>,
    /// Number of owners; 1 means the renderer is the sole owner.
    pub ref_count: u32,
}

impl TextureData {
    /// Creates a zero-filled texture that requests creation.
    pub fn new(format: PixelFormat, width: u32, height: u32) -> Self {
        let len = width as usize * height as usize * format.bytes_per_pixel();
        Self {
            status: TextureStatus::WantCreate,
            format,
            width,
            height,
            pixels: vec![0; len],
            updates: Vec::new(),
            tex_id: None,
            ref_count: 1,
        }
    }

    pub fn status(&self) -> TextureStatus {
        self.status
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major pixel bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Mutable pixel bytes. Call [`TextureData::mark_dirty`] for the changed region afterwards.
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Dirty regions waiting for upload.
    pub fn updates(&self) -> &[TextureRegion] {
        &self.updates
    }

    /// Engine-side handle, present between creation and destruction.
    pub fn tex_id(&self) -> Option<TextureId> {
        self.tex_id
    }

    /// Records a changed region. Entries not yet created keep waiting for creation.
    pub fn mark_dirty(&mut self, region: TextureRegion) {
        self.updates.push(region);
        if self.status == TextureStatus::Ok {
            self.status = TextureStatus::WantUpdates;
        }
    }

    /// Asks the renderer to release the GPU texture.
    pub fn request_destroy(&mut self) {
        if self.status != TextureStatus::Destroyed {
            self.status = TextureStatus::WantDestroy;
        }
    }

    /// Asks the renderer to create the GPU texture again, starting a new lifetime.
    pub fn request_create(&mut self) {
        self.status = TextureStatus::WantCreate;
    }

    /// Records the handle of a freshly created GPU texture and marks the entry current.
    pub fn set_created(&mut self, id: TextureId) {
        self.tex_id = Some(id);
        self.mark_ready();
    }

    /// Marks the entry current and drops its dirty regions.
    pub fn mark_ready(&mut self) {
        self.status = TextureStatus::Ok;
        self.updates.clear();
    }

    /// Clears the handle and marks the entry destroyed.
    pub fn mark_destroyed(&mut self) {
        self.tex_id = None;
        self.status = TextureStatus::Destroyed;
        self.updates.clear();
    }

    /// Copies a region out of the pixel buffer into a tightly packed buffer.
    ///
    /// Parts of the region outside the texture are skipped.
    pub fn region_pixels(&self, region: &TextureRegion) -> Vec<u8> {
        let bpp = self.format.bytes_per_pixel();
        let x0 = region.x.min(self.width) as usize;
        let x1 = region.x.saturating_add(region.width).min(self.width) as usize;
        let y0 = region.y.min(self.height) as usize;
        let y1 = region.y.saturating_add(region.height).min(self.height) as usize;
        let pitch = self.width as usize * bpp;

        let mut out = Vec::with_capacity((x1 - x0) * (y1 - y0) * bpp);
        for row in y0..y1 {
            let start = row * pitch + x0 * bpp;
            out.extend_from_slice(&self.pixels[start..row * pitch + x1 * bpp]);
        }
        out
    }
}

/// Arena of UI textures. Indices stay valid for the registry's lifetime.
#[derive(Debug, Clone, Default)]
pub struct TextureRegistry {
    entries: Vec<TextureData>,
}

impl TextureRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry and returns its index.
    pub fn insert(&mut self, texture: TextureData) -> TextureIndex {
        self.entries.push(texture);
        TextureIndex(self.entries.len() - 1)
    }

    pub fn get(&self, index: TextureIndex) -> Option<&TextureData> {
        self.entries.get(index.0)
    }

    pub fn get_mut(&mut self, index: TextureIndex) -> Option<&mut TextureData> {
        self.entries.get_mut(index.0)
    }

    /// Iterates over all entries in index order.
    pub fn iter(&self) -> impl Iterator<Item = (TextureIndex, &TextureData)> {
        self.entries.iter().enumerate().map(|(i, t)| (TextureIndex(i), t))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (TextureIndex, &mut TextureData)> {
        self.entries.iter_mut().enumerate().map(|(i, t)| (TextureIndex(i), t))
    }

    /// Indices of entries with pending requests, in index order.
    pub fn pending(&self) -> Vec<TextureIndex> {
        self.iter()
            .filter(|(_, t)| t.status().is_pending())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_texture_requests_creation() {
        let tex = TextureData::new(PixelFormat::Rgba32, 4, 2);
        assert_eq!(tex.status(), TextureStatus::WantCreate);
        assert_eq!(tex.pixels().len(), 32);
        assert_eq!(tex.tex_id(), None);
        assert_eq!(tex.ref_count, 1);
    }

    #[test]
    fn test_lifecycle_transitions() {
        let mut tex = TextureData::new(PixelFormat::Alpha8, 8, 8);

        // Dirty regions before creation are folded into the create upload
        tex.mark_dirty(TextureRegion::new(0, 0, 2, 2));
        assert_eq!(tex.status(), TextureStatus::WantCreate);

        tex.set_created(TextureId(3));
        assert_eq!(tex.status(), TextureStatus::Ok);
        assert!(tex.updates().is_empty());

        tex.mark_dirty(TextureRegion::new(1, 1, 2, 2));
        assert_eq!(tex.status(), TextureStatus::WantUpdates);
        assert_eq!(tex.updates().len(), 1);

        tex.request_destroy();
        assert_eq!(tex.status(), TextureStatus::WantDestroy);
        tex.mark_destroyed();
        assert_eq!(tex.status(), TextureStatus::Destroyed);
        assert_eq!(tex.tex_id(), None);

        // A destroyed entry stays destroyed until recreated
        tex.request_destroy();
        assert_eq!(tex.status(), TextureStatus::Destroyed);
        tex.request_create();
        assert_eq!(tex.status(), TextureStatus::WantCreate);
    }

    #[test]
    fn test_region_pixels_rows() {
        let mut tex = TextureData::new(PixelFormat::Alpha8, 4, 3);
        for (i, p) in tex.pixels_mut().iter_mut().enumerate() {
            *p = u8::try_from(i).unwrap();
        }
        let region = tex.region_pixels(&TextureRegion::new(1, 1, 2, 2));
        assert_eq!(region, vec![5, 6, 9, 10]);
    }

    #[test]
    fn test_region_pixels_clipped_to_texture() {
        let tex = TextureData::new(PixelFormat::Rgba32, 2, 2);
        let region = tex.region_pixels(&TextureRegion::new(1, 1, 5, 5));
        assert_eq!(region.len(), 4);
    }

    #[test]
    fn test_registry_indices_are_stable() {
        let mut registry = TextureRegistry::new();
        let a = registry.insert(TextureData::new(PixelFormat::Rgba32, 1, 1));
        let b = registry.insert(TextureData::new(PixelFormat::Rgba32, 1, 1));
        assert_eq!(registry.len(), 2);

        registry.get_mut(a).unwrap().request_destroy();
        let c = registry.insert(TextureData::new(PixelFormat::Rgba32, 1, 1));
        assert_ne!(c, a);
        assert_ne!(c, b);
        assert_eq!(registry.len(), 3);
        assert!(registry.get(a).is_some());
    }

    #[test]
    fn test_registry_pending() {
        let mut registry = TextureRegistry::new();
        let a = registry.insert(TextureData::new(PixelFormat::Rgba32, 1, 1));
        let b = registry.insert(TextureData::new(PixelFormat::Rgba32, 1, 1));
        registry.get_mut(a).unwrap().set_created(TextureId(1));
        assert_eq!(registry.pending(), vec![b]);
    }

    proptest! {
        #[test]
        fn prop_region_pixels_match_clipped_area(
            width in 1u32..32,
            height in 1u32..32,
            x in 0u32..40,
            y in 0u32..40,
            w in 0u32..40,
            h in 0u32..40,
        ) {
            let tex = TextureData::new(PixelFormat::Rgba32, width, height);
            let visible_w = (x + w).min(width).saturating_sub(x.min(width));
            let visible_h = (y + h).min(height).saturating_sub(y.min(height));
            let bytes = tex.region_pixels(&TextureRegion::new(x, y, w, h));
            prop_assert_eq!(bytes.len(), (visible_w * visible_h * 4) as usize);
        }
    }
}
