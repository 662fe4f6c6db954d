//! Live stream metadata normalisation
//!
//! Radio streams push loosely structured metadata. Before it is merged into the
//! playlist it goes through two heuristics:
//! 1. "Artist - Title" packed into the title field is split apart
//! 2. Providers known to send artist and title backwards get them swapped, unless
//!    step 1 already rebuilt both fields from a packed title
//!
//! The swap providers live in a table of [`LocatorPattern`]s so that new ones can be
//! added from configuration.

use cadence_core::{Locator, MetaBundle, Metadata, PlaylistItem};
use serde::{Deserialize, Serialize};

/// Matches a stream locator against a provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "match", content = "value", rename_all = "lowercase")]
pub enum LocatorPattern {
    /// Host name contains the given text
    Host(String),

    /// Fragment equals the given text
    Fragment(String),
}

impl LocatorPattern {
    /// Whether `locator` belongs to this provider
    pub fn matches(&self, locator: &Locator) -> bool {
        match self {
            LocatorPattern::Host(needle) => locator
                .host()
                .is_some_and(|host| host.contains(needle.as_str())),
            LocatorPattern::Fragment(value) => locator.fragment() == Some(value.as_str()),
        }
    }
}

/// Providers whose artist and title fields are swapped
pub fn default_swap_rules() -> Vec<LocatorPattern> {
    vec![
        LocatorPattern::Host("somafm.com".to_string()),
        LocatorPattern::Fragment("icecast".to_string()),
    ]
}

/// Turns engine metadata bundles into playlist metadata
#[derive(Debug, Clone)]
pub struct MetadataReconciler {
    swap_rules: Vec<LocatorPattern>,
}

impl MetadataReconciler {
    /// Create a reconciler with an explicit swap table
    pub fn new(swap_rules: Vec<LocatorPattern>) -> Self {
        Self { swap_rules }
    }

    /// Add a provider to the swap table
    pub fn add_swap_rule(&mut self, rule: LocatorPattern) {
        if !self.swap_rules.contains(&rule) {
            self.swap_rules.push(rule);
        }
    }

    /// Current swap table
    pub fn swap_rules(&self) -> &[LocatorPattern] {
        &self.swap_rules
    }

    /// Whether streams from `locator` send artist and title backwards
    pub fn swaps_fields(&self, locator: &Locator) -> bool {
        self.swap_rules.iter().any(|rule| rule.matches(locator))
    }

    /// Apply the split and swap heuristics to a raw bundle
    pub fn normalize(&self, locator: &Locator, bundle: &MetaBundle) -> MetaBundle {
        let mut bundle = bundle.clone();
        let mut split = false;

        if bundle.artist.is_empty() {
            if let Some((artist, title)) = split_artist_title(&bundle.title) {
                bundle.artist = artist;
                bundle.title = title;
                split = true;
            }
        }

        // A split title is already in artist/title order
        if !split && self.swaps_fields(locator) {
            std::mem::swap(&mut bundle.artist, &mut bundle.title);
        }

        bundle
    }

    /// Normalise `bundle` and merge it into `item`'s metadata
    ///
    /// Returns `None` when the result has neither title nor artist.
    pub fn reconcile(&self, item: &dyn PlaylistItem, bundle: &MetaBundle) -> Option<Metadata> {
        let bundle = self.normalize(item.locator(), bundle);

        let mut song = item.metadata();
        song.merge_bundle(&bundle);

        if song.is_untitled() {
            return None;
        }

        Some(song)
    }
}

impl Default for MetadataReconciler {
    fn default() -> Self {
        Self::new(default_swap_rules())
    }
}

/// Split "Artist - Title"
///
/// Prefers the first `" - "` so hyphenated names survive, else the first `-`.
fn split_artist_title(title: &str) -> Option<(String, String)> {
    let (artist, rest) = match title.find(" - ") {
        Some(pos) => (&title[..pos], &title[pos + 3..]),
        None => {
            let pos = title.find('-')?;
            (&title[..pos], &title[pos + 1..])
        }
    };

    Some((artist.trim().to_string(), rest.trim().to_string()))
}
