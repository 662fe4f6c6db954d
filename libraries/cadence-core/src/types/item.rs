use bitflags::bitflags;

use super::locator::Locator;

bitflags! {
    /// Capability bits of a playlist item
    ///
    /// The bits are independent: an item may combine any of them.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ItemOptions: u8 {
        /// The item is a container that yields several tracks (radio, podcast feed)
        const CONTAINS_MULTIPLE_TRACKS = 0b0001;

        /// The item must be resolved through `start_loading` before playback
        const SPECIAL_PLAY_BEHAVIOUR = 0b0010;

        /// The stream cannot resume after a pause; pausing stops it instead
        const PAUSE_DISABLED = 0b0100;
    }
}

/// Outcome of an item's special load
///
/// Produced by `PlaylistItem::start_loading` or `PlaylistItem::load_next`
/// and consumed exactly once by the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialLoadResult {
    /// The container has nothing more to play
    NoMoreTracks,

    /// `original` resolved to the playable `resolved` locator
    TrackAvailable {
        /// Locator of the playlist item that was loaded
        original: Locator,
        /// Locator the engine should actually play
        resolved: Locator,
    },

    /// Resolution continues in the background; another result follows later
    WillLoadAsynchronously {
        /// Locator of the playlist item being loaded
        original: Locator,
    },
}

impl SpecialLoadResult {
    /// Build a `TrackAvailable` result
    pub fn available(original: Locator, resolved: Locator) -> Self {
        Self::TrackAvailable { original, resolved }
    }

    /// Build a `WillLoadAsynchronously` result
    pub fn pending(original: Locator) -> Self {
        Self::WillLoadAsynchronously { original }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_are_independent_bits() {
        let options = ItemOptions::CONTAINS_MULTIPLE_TRACKS | ItemOptions::SPECIAL_PLAY_BEHAVIOUR;
        assert!(options.contains(ItemOptions::CONTAINS_MULTIPLE_TRACKS));
        assert!(options.contains(ItemOptions::SPECIAL_PLAY_BEHAVIOUR));
        assert!(!options.contains(ItemOptions::PAUSE_DISABLED));
        assert_eq!(ItemOptions::default(), ItemOptions::empty());
    }

    #[test]
    fn constructors_build_matching_variants() {
        let locator = Locator::parse("http://example.com/radio").unwrap();
        assert_eq!(
            SpecialLoadResult::pending(locator.clone()),
            SpecialLoadResult::WillLoadAsynchronously {
                original: locator.clone()
            }
        );
        assert!(matches!(
            SpecialLoadResult::available(locator.clone(), locator),
            SpecialLoadResult::TrackAvailable { .. }
        ));
    }
}
