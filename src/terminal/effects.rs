//! Visual effects toggle, read once when the terminal starts.

use crate::settings::{EFFECTS_KEY, SettingsStore, Toggle};
use log::warn;

/// Colours and glow applied to the terminal screen.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Theme {
    /// `--terminal-placeholder-color`
    pub placeholder_color: &'static str,
    /// `--terminal-color`
    pub text_color: &'static str,
    /// `--text-shadow`
    pub text_shadow: &'static str,
    /// Whether the screen keeps its `effect` attribute.
    pub effect_attribute: bool,
}

impl Theme {
    /// Flat theme used when effects are off.
    pub const FLAT: Theme = Theme {
        placeholder_color: "#c9c9c9",
        text_color: "#ffffff",
        text_shadow: "0",
        effect_attribute: false,
    };

    /// Page defaults; the stylesheet's own values stay in force.
    pub const GLOW: Theme = Theme {
        placeholder_color: "var(--terminal-placeholder-color)",
        text_color: "var(--terminal-color)",
        text_shadow: "var(--text-shadow)",
        effect_attribute: true,
    };
}

/// The effects setting as seen at startup.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Effects {
    enabled: bool,
}

impl Effects {
    /// Read the setting. A first run (unset or empty value) stores `"yes"`.
    ///
    /// Only `"no"` turns effects off.
    pub fn load(settings: &mut dyn SettingsStore) -> Self {
        let stored = settings
            .get(EFFECTS_KEY)
            .filter(|value| !value.is_empty())
            .map(Toggle::parse);
        let enabled = match stored {
            None => {
                if let Err(e) = settings.set_toggle(EFFECTS_KEY, Toggle::Yes) {
                    warn!("could not store default effects setting: {}", e);
                }
                true
            }
            Some(toggle) => toggle != Some(Toggle::No),
        };
        Self { enabled }
    }

    /// Whether effects are on.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Theme to apply for this setting.
    pub fn theme(&self) -> Theme {
        if self.enabled { Theme::GLOW } else { Theme::FLAT }
    }
}
