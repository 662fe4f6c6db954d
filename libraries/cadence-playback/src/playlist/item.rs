use cadence_core::{ItemOptions, ItemRef, Locator, Metadata, PlaylistItem};
use std::path::Path;
use std::sync::Arc;

/// A plain playlist entry: one locator, one song
///
/// Loads directly (no special behaviour) unless options are added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongItem {
    locator: Locator,
    metadata: Metadata,
    options: ItemOptions,
}

impl SongItem {
    /// Create an item with known metadata
    pub fn new(locator: Locator, metadata: Metadata) -> Self {
        Self {
            locator,
            metadata,
            options: ItemOptions::empty(),
        }
    }

    /// Create an item titled after the last segment of its locator
    pub fn from_locator(locator: Locator) -> Self {
        let title = title_from_locator(&locator).unwrap_or_default();
        Self::new(locator, Metadata::new(title, ""))
    }

    /// Replace the capability bits
    pub fn with_options(mut self, options: ItemOptions) -> Self {
        self.options = options;
        self
    }

    /// Wrap into a shared handle
    pub fn into_ref(self) -> ItemRef {
        Arc::new(self)
    }
}

impl PlaylistItem for SongItem {
    fn locator(&self) -> &Locator {
        &self.locator
    }

    fn options(&self) -> ItemOptions {
        self.options
    }

    fn metadata(&self) -> Metadata {
        self.metadata.clone()
    }
}

fn title_from_locator(locator: &Locator) -> Option<String> {
    if locator.is_local_file() {
        let path = locator.as_url().to_file_path().ok()?;
        return path.file_stem().map(|stem| stem.to_string_lossy().into_owned());
    }

    let segment = locator
        .as_url()
        .path_segments()?
        .rev()
        .find(|segment| !segment.is_empty())?;

    Path::new(segment)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
}
