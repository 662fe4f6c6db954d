use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Song metadata attached to a playlist item
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Album name
    pub album: String,

    /// Free-form comment
    pub comment: String,

    /// Genre
    pub genre: String,

    /// Release year
    pub year: Option<u32>,

    /// Track number in album
    pub track: Option<u32>,

    /// Bitrate in kbit/s
    pub bitrate: Option<u32>,

    /// Sample rate in Hz
    pub sample_rate: Option<u32>,

    /// Track length
    pub length: Option<Duration>,
}

impl Metadata {
    /// Create metadata with a title and an artist
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            ..Self::default()
        }
    }

    /// Whether both title and artist are empty
    pub fn is_untitled(&self) -> bool {
        self.title.is_empty() && self.artist.is_empty()
    }

    /// Merge a stream metadata bundle into this metadata
    ///
    /// Only fields present in the bundle overwrite: non-empty strings and `Some` numbers.
    pub fn merge_bundle(&mut self, bundle: &MetaBundle) {
        merge_text(&mut self.title, &bundle.title);
        merge_text(&mut self.artist, &bundle.artist);
        merge_text(&mut self.album, &bundle.album);
        merge_text(&mut self.comment, &bundle.comment);
        merge_text(&mut self.genre, &bundle.genre);

        self.year = bundle.year.or(self.year);
        self.track = bundle.track.or(self.track);
        self.bitrate = bundle.bitrate.or(self.bitrate);
        self.sample_rate = bundle.sample_rate.or(self.sample_rate);
        self.length = bundle.length.or(self.length);
    }
}

fn merge_text(target: &mut String, value: &str) {
    if !value.is_empty() {
        value.clone_into(target);
    }
}

/// Raw metadata pushed by an engine for a live stream
///
/// Empty strings and `None` numbers mean "not present in this update".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaBundle {
    /// Stream title (often "Artist - Title" for radio)
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Album name
    pub album: String,

    /// Free-form comment
    pub comment: String,

    /// Genre
    pub genre: String,

    /// Release year
    pub year: Option<u32>,

    /// Track number
    pub track: Option<u32>,

    /// Bitrate in kbit/s
    pub bitrate: Option<u32>,

    /// Sample rate in Hz
    pub sample_rate: Option<u32>,

    /// Track length
    pub length: Option<Duration>,
}

impl MetaBundle {
    /// Bundle carrying only a title
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}
