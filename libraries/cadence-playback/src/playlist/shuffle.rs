//! Shuffle algorithms for playlist order
//!
//! Shuffling permutes row indices, never the rows themselves, so the visible
//! playlist keeps its order while navigation follows the shuffled one.

use crate::types::ShuffleMode;
use rand::seq::SliceRandom;
use rand::thread_rng;
use std::collections::HashMap;

/// Shuffle a playback order
///
/// `artist_of` is only consulted by the smart algorithm.
pub fn shuffle_order(order: &mut [usize], mode: ShuffleMode, artist_of: impl Fn(usize) -> String) {
    match mode {
        ShuffleMode::Off => {}
        ShuffleMode::Random => shuffle_random(order),
        ShuffleMode::Smart => shuffle_smart(order, artist_of),
    }
}

/// Pure random shuffle using Fisher-Yates
fn shuffle_random(order: &mut [usize]) {
    order.shuffle(&mut thread_rng());
}

/// Smart shuffle
///
/// Groups rows by artist, shuffles inside each group and between groups, then deals
/// one row per artist per round so the same artist rarely plays twice in a row.
fn shuffle_smart(order: &mut [usize], artist_of: impl Fn(usize) -> String) {
    if order.len() <= 2 {
        shuffle_random(order);
        return;
    }

    let mut rng = thread_rng();

    let mut by_artist: HashMap<String, Vec<usize>> = HashMap::new();
    for &row in order.iter() {
        by_artist.entry(artist_of(row)).or_default().push(row);
    }

    let mut groups: Vec<Vec<usize>> = by_artist.into_values().collect();
    for group in &mut groups {
        group.shuffle(&mut rng);
    }
    groups.shuffle(&mut rng);

    let rounds = groups.iter().map(Vec::len).max().unwrap_or(0);
    let mut result = Vec::with_capacity(order.len());
    for round in 0..rounds {
        result.extend(groups.iter().filter_map(|group| group.get(round).copied()));
    }

    order.copy_from_slice(&result);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn artist_for(row: usize) -> String {
        format!("Artist {}", row % 2)
    }

    #[test]
    fn shuffle_mode_off_no_change() {
        let mut order = vec![0, 1, 2, 3];
        shuffle_order(&mut order, ShuffleMode::Off, artist_for);
        assert_eq!(order, vec![0, 1, 2, 3]);
    }

    #[test]
    fn random_shuffle_preserves_all_rows() {
        let mut order: Vec<usize> = (0..10).collect();
        shuffle_order(&mut order, ShuffleMode::Random, artist_for);

        let rows: HashSet<usize> = order.iter().copied().collect();
        assert_eq!(rows.len(), 10);
        assert!(rows.iter().all(|&row| row < 10));
    }

    #[test]
    fn smart_shuffle_interleaves_two_artists() {
        let mut order: Vec<usize> = (0..6).collect();
        shuffle_order(&mut order, ShuffleMode::Smart, artist_for);

        // Three rows per artist dealt round by round never repeat an artist
        for pair in order.windows(2) {
            assert_ne!(artist_for(pair[0]), artist_for(pair[1]), "order: {order:?}");
        }
    }

    #[test]
    fn smart_shuffle_with_single_artist() {
        let mut order: Vec<usize> = (0..5).collect();
        shuffle_order(&mut order, ShuffleMode::Smart, |_| "Solo".to_string());

        let rows: HashSet<usize> = order.iter().copied().collect();
        assert_eq!(rows.len(), 5);
    }

    #[test]
    fn smart_shuffle_small_orders() {
        let mut empty: Vec<usize> = vec![];
        shuffle_order(&mut empty, ShuffleMode::Smart, artist_for);
        assert!(empty.is_empty());

        let mut single = vec![7];
        shuffle_order(&mut single, ShuffleMode::Smart, artist_for);
        assert_eq!(single, vec![7]);
    }
}
