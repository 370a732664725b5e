//! Presentation settings
//!
//! Persisted separately from tuning in LocalStorage. Nothing here affects the
//! simulation; it only changes how the driver draws and where it navigates.

use serde::{Deserialize, Serialize};

use crate::consts::REDIRECT_DELAY_MS;
use crate::platform::storage;
use crate::sim::Outcome;

/// Driver preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Wait between game over and navigation (ms)
    pub redirect_delay_ms: f64,
    /// Page shown after reaching the win score
    pub win_url: String,
    /// Page shown after crashing
    pub lose_url: String,
    /// Centered message before the first tap
    pub start_prompt: String,

    // === Visual Effects ===
    /// Draw 0/1 digits down each pipe
    pub binary_digits: bool,

    // === Accessibility ===
    /// Reduced motion (digits stop flickering)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            redirect_delay_ms: REDIRECT_DELAY_MS,
            win_url: "win.html".to_string(),
            lose_url: "lose.html".to_string(),
            start_prompt: "Haal 10 punten om uw data terug te krijgen!".to_string(),
            binary_digits: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "envelope_flap_settings";

    pub fn url_for(&self, outcome: Outcome) -> &str {
        match outcome {
            Outcome::Win => &self.win_url,
            Outcome::Lose => &self.lose_url,
        }
    }

    /// Whether pipe digits are re-rolled every frame
    pub fn digit_flicker(&self) -> bool {
        self.binary_digits && !self.reduced_motion
    }

    /// Load settings from LocalStorage, falling back to defaults
    pub fn load() -> Self {
        match storage::load_json(Self::STORAGE_KEY) {
            Some(settings) => {
                log::info!("Loaded settings from LocalStorage");
                settings
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self) {
        storage::save_json(Self::STORAGE_KEY, self);
        log::info!("Settings saved");
    }
}
