//! Reference playlist implementation
//!
//! Any `PlaylistManager` can drive the player; this one keeps everything in memory
//! and supports shuffle and repeat.

mod item;
mod manager;
mod session;
mod shuffle;

pub use item::SongItem;
pub use manager::Playlists;
pub use session::Playlist;
pub use shuffle::shuffle_order;
