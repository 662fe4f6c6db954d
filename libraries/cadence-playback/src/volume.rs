//! Volume bookkeeping
//!
//! The engine holds the effective volume. The player only clamps requests,
//! persists them and remembers the level to restore after a mute.

use cadence_core::{SettingsStore, SETTING_VOLUME};

/// Volume used when nothing is persisted yet
pub const DEFAULT_VOLUME: u8 = 50;

/// Upper bound of the volume scale
pub const MAX_VOLUME: u8 = 100;

/// Clamp a requested volume into 0-100
pub fn clamp(value: i32) -> u8 {
    value.clamp(0, i32::from(MAX_VOLUME)) as u8
}

/// Read the persisted volume, falling back to `DEFAULT_VOLUME`
pub fn load(settings: &dyn SettingsStore) -> u8 {
    settings
        .get_i64(SETTING_VOLUME)
        .map(|value| clamp(value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32))
        .unwrap_or(DEFAULT_VOLUME)
}

/// Mute toggle memory
///
/// `before_mute` is only meaningful while the engine volume is 0 because of a mute.
#[derive(Debug, Clone)]
pub struct MuteMemory {
    before_mute: u8,
}

impl MuteMemory {
    /// Create mute memory restoring to `DEFAULT_VOLUME`
    pub fn new() -> Self {
        Self {
            before_mute: DEFAULT_VOLUME,
        }
    }

    /// Volume to apply when toggling mute while the engine is at `current`
    ///
    /// At 0 the remembered level comes back; otherwise `current` is remembered and
    /// the target is 0.
    pub fn toggle(&mut self, current: u8) -> u8 {
        if current == 0 {
            self.before_mute
        } else {
            self.before_mute = current;
            0
        }
    }

    /// Level that an unmute would restore
    pub fn before_mute(&self) -> u8 {
        self.before_mute
    }
}

impl Default for MuteMemory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_core::MemorySettings;
    use serde_json::json;

    #[test]
    fn clamp_bounds() {
        assert_eq!(clamp(-5), 0);
        assert_eq!(clamp(0), 0);
        assert_eq!(clamp(55), 55);
        assert_eq!(clamp(100), 100);
        assert_eq!(clamp(150), 100);
        assert_eq!(clamp(i32::MIN), 0);
    }

    #[test]
    fn load_defaults_when_missing() {
        let settings = MemorySettings::new();
        assert_eq!(load(&settings), DEFAULT_VOLUME);
    }

    #[test]
    fn load_clamps_persisted_value() {
        let mut settings = MemorySettings::new();
        settings.set(SETTING_VOLUME, json!(500)).unwrap();
        assert_eq!(load(&settings), 100);

        settings.set(SETTING_VOLUME, json!(30)).unwrap();
        assert_eq!(load(&settings), 30);
    }

    #[test]
    fn mute_toggle_round_trip() {
        let mut memory = MuteMemory::new();

        assert_eq!(memory.toggle(70), 0);
        assert_eq!(memory.before_mute(), 70);
        assert_eq!(memory.toggle(0), 70);
    }

    #[test]
    fn unmute_without_prior_mute_uses_default() {
        let mut memory = MuteMemory::new();
        assert_eq!(memory.toggle(0), DEFAULT_VOLUME);
    }
}
