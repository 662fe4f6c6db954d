//! Resolution of special item loads
//!
//! Streams, radio and container items do not play their own locator directly. Their
//! load yields a [`SpecialLoadResult`] which may arrive long after the request, by
//! which time the user may have moved on. `loading_async` holds the locator of the
//! one load in flight so duplicate requests are dropped.

use super::Player;
use cadence_core::SpecialLoadResult;
use tracing::{debug, info};

impl Player {
    /// Act on the outcome of a special item load
    pub fn handle_special_load(&mut self, result: SpecialLoadResult) {
        match result {
            SpecialLoadResult::NoMoreTracks => {
                debug!("Special load has no more tracks");
                self.loading_async = None;
                self.next_item(self.stream_change_type);
            }

            SpecialLoadResult::TrackAvailable { original, resolved } => {
                let item = self
                    .playlists
                    .active()
                    .current_item()
                    .filter(|item| item.locator() == &original);

                let Some(item) = item else {
                    debug!(%original, "Discarding stale load result");
                    if self.is_loading(&original) {
                        self.loading_async = None;
                    }
                    return;
                };

                info!(%original, %resolved, "Playing resolved track");
                self.engine.play(&resolved, self.stream_change_type);
                self.current_item = Some(item);
                self.loading_async = None;
            }

            SpecialLoadResult::WillLoadAsynchronously { original } => {
                debug!(%original, "Waiting for asynchronous load");
                self.loading_async = Some(original);
            }
        }
    }
}
