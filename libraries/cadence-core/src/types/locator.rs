use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use url::Url;

use crate::error::{CoreError, Result};

/// Address of a playable resource
///
/// Always stored as a URL. Plain file-system paths become `file://` URLs so that
/// locator comparison (the async-load token, stale result detection) is exact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locator(Url);

impl Locator {
    /// Parse a URL or a file-system path
    ///
    /// Single-letter schemes are treated as Windows drive letters, not URLs.
    pub fn parse(input: &str) -> Result<Self> {
        match Url::parse(input) {
            Ok(url) if url.scheme().len() > 1 => Ok(Self(url)),
            _ => Self::from_path(Path::new(input)),
        }
    }

    /// Build a `file://` locator from a path, resolving relative paths against the
    /// working directory
    pub fn from_path(path: &Path) -> Result<Self> {
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        };

        Url::from_file_path(&absolute)
            .map(Self)
            .map_err(|()| CoreError::invalid_locator(path.display().to_string()))
    }

    /// The underlying URL
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// The locator as a string
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Host name, if the locator has one
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    /// Fragment (the part after `#`), if any
    pub fn fragment(&self) -> Option<&str> {
        self.0.fragment()
    }

    /// Whether this points at a local file
    pub fn is_local_file(&self) -> bool {
        self.0.scheme() == "file"
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locator {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<Url> for Locator {
    fn from(url: Url) -> Self {
        Self(url)
    }
}
