use cadence_core::{PlaylistId, PlaylistManager, PlaylistSession};
use tracing::debug;

use super::session::Playlist;

/// Collection of playlists with an active and a current one
///
/// Never empty: there is always at least one playlist to activate.
#[derive(Debug, Clone)]
pub struct Playlists {
    playlists: Vec<Playlist>,
    active: PlaylistId,
    current: PlaylistId,
}

impl Playlists {
    /// Create a manager holding a single playlist
    pub fn new(first: Playlist) -> Self {
        Self {
            playlists: vec![first],
            active: 0,
            current: 0,
        }
    }

    /// Add a playlist and return its identifier
    pub fn add(&mut self, playlist: Playlist) -> PlaylistId {
        self.playlists.push(playlist);
        self.playlists.len() - 1
    }

    /// Show playlist `id` to the user; ignored if unknown
    pub fn set_current(&mut self, id: PlaylistId) {
        if id < self.playlists.len() {
            self.current = id;
        }
    }

    /// Identifier of the playlist being played
    pub fn active_id(&self) -> PlaylistId {
        self.active
    }

    /// Playlist by identifier
    pub fn get(&self, id: PlaylistId) -> Option<&Playlist> {
        self.playlists.get(id)
    }

    /// Mutable playlist by identifier
    pub fn get_mut(&mut self, id: PlaylistId) -> Option<&mut Playlist> {
        self.playlists.get_mut(id)
    }

    /// Concrete view of the playlist being played
    pub fn active_playlist(&self) -> &Playlist {
        &self.playlists[self.active]
    }

    /// Mutable concrete view of the playlist being played
    pub fn active_playlist_mut(&mut self) -> &mut Playlist {
        &mut self.playlists[self.active]
    }

    /// Number of playlists
    pub fn len(&self) -> usize {
        self.playlists.len()
    }

    /// Whether there are no playlists
    pub fn is_empty(&self) -> bool {
        self.playlists.is_empty()
    }
}

impl Default for Playlists {
    fn default() -> Self {
        Self::new(Playlist::new("Playlist"))
    }
}

impl PlaylistManager for Playlists {
    fn active(&self) -> &dyn PlaylistSession {
        self.active_playlist()
    }

    fn active_mut(&mut self) -> &mut dyn PlaylistSession {
        self.active_playlist_mut()
    }

    fn current_id(&self) -> PlaylistId {
        self.current
    }

    fn set_active_playlist(&mut self, id: PlaylistId) {
        if id >= self.playlists.len() {
            debug!(id, "Ignoring unknown playlist");
            return;
        }

        if id != self.active {
            debug!(from = self.active, to = id, "Active playlist changed");
            self.active = id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_one_active_playlist() {
        let playlists = Playlists::default();
        assert_eq!(playlists.len(), 1);
        assert_eq!(playlists.active_id(), 0);
        assert_eq!(playlists.current_id(), 0);
        assert_eq!(playlists.active().row_count(), 0);
    }

    #[test]
    fn current_and_active_are_independent() {
        let mut playlists = Playlists::default();
        let second = playlists.add(Playlist::new("Second"));

        playlists.set_current(second);
        assert_eq!(playlists.current_id(), second);
        assert_eq!(playlists.active_id(), 0);

        playlists.set_active_playlist(playlists.current_id());
        assert_eq!(playlists.active_playlist().name(), "Second");
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut playlists = Playlists::default();
        playlists.set_current(4);
        playlists.set_active_playlist(4);
        assert_eq!(playlists.current_id(), 0);
        assert_eq!(playlists.active_id(), 0);
    }
}
