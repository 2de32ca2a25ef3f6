use serde::{Deserialize, Serialize};

/// Stated reach of a weapon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "band", content = "actions")]
pub enum RangeBand {
    /// Arm's length only
    #[default]
    Engaged,
    /// Up to N movement actions away
    MovementActions(u32),
}

impl RangeBand {
    /// Range expressed in movement actions; engaged counts as zero.
    pub fn movement_actions(&self) -> u32 {
        match self {
            RangeBand::Engaged => 0,
            RangeBand::MovementActions(n) => *n,
        }
    }
}

/// The weapon fields the targeting helper reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WeaponProfile {
    pub name: String,
    pub bow: bool,
    pub crossbow: bool,
    pub throwing: bool,
    /// Quality: the weapon comes back after being thrown
    pub returning: bool,
    pub range: RangeBand,
}

impl WeaponProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_range(mut self, range: RangeBand) -> Self {
        self.range = range;
        self
    }

    /// Melee when no bow, crossbow or throwing flag is set.
    pub fn is_melee(&self) -> bool {
        !(self.bow || self.crossbow || self.throwing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_weapon_is_melee() {
        assert!(WeaponProfile::new("Sword").is_melee());
    }

    #[test]
    fn any_ranged_flag_makes_it_ranged() {
        let bow = WeaponProfile {
            bow: true,
            ..WeaponProfile::new("Longbow")
        };
        let javelin = WeaponProfile {
            throwing: true,
            ..WeaponProfile::new("Javelin")
        };
        assert!(!bow.is_melee());
        assert!(!javelin.is_melee());
    }

    #[test]
    fn deserializes_with_defaults() {
        let weapon: WeaponProfile = serde_json::from_str(
            r#"{"name":"Crossbow","crossbow":true,"range":{"band":"movementActions","actions":3}}"#,
        )
        .unwrap();
        assert!(!weapon.is_melee());
        assert!(!weapon.returning);
        assert_eq!(weapon.range.movement_actions(), 3);
    }
}
