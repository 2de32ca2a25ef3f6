//! System settings.
//!
//! Values a game master can tune: grid scale for targeting, when the wrath
//! orb overflows, how often a roll may be pushed, and the corruption bar
//! colours. Defaults match the rulebook; `from_env` lets a deployment
//! override them with `DAVOKAR_*` variables.

use serde::{Deserialize, Serialize};

use davokar_domain::combat::{DEFAULT_MOVEMENT_ACTION_DISTANCE, DEFAULT_RANGED_ENGAGEMENT_FACTOR};
use davokar_domain::trackers::DEFAULT_WRATH_OVERFLOW;
use davokar_domain::{DomainError, TargetingRules};

pub const ENV_MOVEMENT_ACTION_DISTANCE: &str = "DAVOKAR_MOVEMENT_ACTION_DISTANCE";
pub const ENV_RANGED_FACTOR: &str = "DAVOKAR_RANGED_FACTOR";
pub const ENV_WRATH_OVERFLOW: &str = "DAVOKAR_WRATH_OVERFLOW";
pub const ENV_MAX_PUSHES: &str = "DAVOKAR_MAX_PUSHES";

pub const DEFAULT_MAX_PUSHES: u32 = 1;

/// Parse a CSS hex colour like `#A44F88` into `0xA44F88`.
///
/// Empty or unreadable values give black, same as an unset CSS variable.
pub fn parse_css_color(value: &str) -> u32 {
    let hex = value.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.is_empty() {
        return 0x000000;
    }
    u32::from_str_radix(hex, 16).unwrap_or(0x000000)
}

/// Corruption bar colours as CSS hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BarPalette {
    pub permanent: String,
    pub temporary: String,
    pub threshold: String,
}

impl BarPalette {
    pub fn permanent_color(&self) -> u32 {
        parse_css_color(&self.permanent)
    }

    pub fn temporary_color(&self) -> u32 {
        parse_css_color(&self.temporary)
    }

    pub fn threshold_color(&self) -> u32 {
        parse_css_color(&self.threshold)
    }
}

impl Default for BarPalette {
    fn default() -> Self {
        Self {
            permanent: "#5E2750".to_string(),
            temporary: "#A44F88".to_string(),
            threshold: "#E6C36A".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SystemSettings {
    /// Grid units covered by one movement action
    pub movement_action_distance: f64,
    /// Multiple of a movement action beyond which an attack is ranged
    pub ranged_engagement_factor: f64,
    /// Wrath points at which the orb is full
    pub wrath_overflow: u32,
    pub max_pushes: u32,
    pub bar_palette: BarPalette,
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            movement_action_distance: DEFAULT_MOVEMENT_ACTION_DISTANCE,
            ranged_engagement_factor: DEFAULT_RANGED_ENGAGEMENT_FACTOR,
            wrath_overflow: DEFAULT_WRATH_OVERFLOW,
            max_pushes: DEFAULT_MAX_PUSHES,
            bar_palette: BarPalette::default(),
        }
    }
}

impl SystemSettings {
    /// Load from `DAVOKAR_*` environment variables, keeping defaults for
    /// anything absent or malformed.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            movement_action_distance: read_positive(
                &lookup,
                ENV_MOVEMENT_ACTION_DISTANCE,
                defaults.movement_action_distance,
            ),
            ranged_engagement_factor: read_positive(
                &lookup,
                ENV_RANGED_FACTOR,
                defaults.ranged_engagement_factor,
            ),
            wrath_overflow: read_parsed(&lookup, ENV_WRATH_OVERFLOW)
                .filter(|v: &u32| *v > 0)
                .unwrap_or(defaults.wrath_overflow),
            max_pushes: read_parsed(&lookup, ENV_MAX_PUSHES).unwrap_or(defaults.max_pushes),
            bar_palette: defaults.bar_palette,
        }
    }

    pub fn targeting_rules(&self) -> Result<TargetingRules, DomainError> {
        TargetingRules::new(self.movement_action_distance, self.ranged_engagement_factor)
    }
}

fn read_parsed<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key = %key, value = %raw, "Ignoring malformed setting");
            None
        }
    }
}

fn read_positive(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: f64) -> f64 {
    read_parsed::<f64>(lookup, key)
        .filter(|v| v.is_finite() && *v > 0.0)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_follow_the_rulebook() {
        let settings = SystemSettings::default();
        assert_eq!(settings.movement_action_distance, 10.0);
        assert_eq!(settings.ranged_engagement_factor, 1.9);
        assert_eq!(settings.wrath_overflow, 10);
        assert_eq!(settings.max_pushes, 1);
    }

    #[test]
    fn environment_overrides_defaults() {
        let settings = SystemSettings::from_lookup(lookup(&[
            (ENV_MOVEMENT_ACTION_DISTANCE, "5"),
            (ENV_RANGED_FACTOR, "2.5"),
            (ENV_WRATH_OVERFLOW, "12"),
            (ENV_MAX_PUSHES, "0"),
        ]));
        assert_eq!(settings.movement_action_distance, 5.0);
        assert_eq!(settings.ranged_engagement_factor, 2.5);
        assert_eq!(settings.wrath_overflow, 12);
        assert_eq!(settings.max_pushes, 0);
    }

    #[test]
    fn malformed_values_fall_back() {
        let settings = SystemSettings::from_lookup(lookup(&[
            (ENV_MOVEMENT_ACTION_DISTANCE, "far"),
            (ENV_RANGED_FACTOR, "-1"),
            (ENV_WRATH_OVERFLOW, "0"),
        ]));
        assert_eq!(settings, SystemSettings::default());
    }

    #[test]
    fn targeting_rules_from_settings() {
        let rules = SystemSettings::default().targeting_rules().unwrap();
        assert_eq!(rules.movement_action_distance(), 10.0);
    }

    #[test]
    fn css_colors() {
        assert_eq!(parse_css_color("#A44F88"), 0xA44F88);
        assert_eq!(parse_css_color("  #e6c36a "), 0xE6C36A);
        assert_eq!(parse_css_color(""), 0x000000);
        assert_eq!(parse_css_color("not-a-color"), 0x000000);
    }

    #[test]
    fn palette_deserializes_partially() {
        let palette: BarPalette = serde_json::from_str(r##"{"permanent":"#112233"}"##).unwrap();
        assert_eq!(palette.permanent_color(), 0x112233);
        assert_eq!(palette.temporary_color(), 0xA44F88);
    }
}
