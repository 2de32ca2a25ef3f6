use serde::{Deserialize, Serialize};

/// Accrued corruption, split into a permanent floor and a temporary part.
///
/// `total` is computed once when the track is built; roll terms read it
/// directly and never re-derive it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CorruptionData", into = "CorruptionData")]
pub struct CorruptionTrack {
    permanent: i32,
    temporary: i32,
    max: i32,
    threshold: i32,
    total: i32,
}

impl CorruptionTrack {
    /// Player characters store the current value and its permanent floor
    /// (`min`); the temporary part is whatever sits above the floor.
    pub fn for_character(value: i32, min: i32, max: i32, threshold: i32) -> Self {
        Self {
            permanent: min,
            temporary: value.saturating_sub(min),
            max,
            threshold,
            total: value,
        }
    }

    /// NPCs store both parts and sum them.
    pub fn for_npc(permanent: i32, temporary: i32, max: i32, threshold: i32) -> Self {
        Self {
            permanent,
            temporary,
            max,
            threshold,
            total: permanent.saturating_add(temporary),
        }
    }

    pub fn permanent(&self) -> i32 {
        self.permanent
    }

    pub fn temporary(&self) -> i32 {
        self.temporary
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn threshold(&self) -> i32 {
        self.threshold
    }

    pub fn total(&self) -> i32 {
        self.total
    }

    pub fn is_over_threshold(&self) -> bool {
        self.total >= self.threshold && self.threshold > 0
    }
}

impl Default for CorruptionTrack {
    fn default() -> Self {
        Self::for_npc(0, 0, 0, 0)
    }
}

/// Stored shapes of the track.
///
/// Player characters keep `{value, min}`, NPCs keep `{permanent, temporary}`.
/// Anything else is rejected rather than read as an empty track.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
enum CorruptionData {
    Character {
        value: i32,
        #[serde(default)]
        min: i32,
        #[serde(default)]
        max: i32,
        #[serde(default)]
        threshold: i32,
    },
    Npc {
        permanent: i32,
        #[serde(default)]
        temporary: i32,
        #[serde(default)]
        max: i32,
        #[serde(default)]
        threshold: i32,
    },
}

impl From<CorruptionData> for CorruptionTrack {
    fn from(data: CorruptionData) -> Self {
        match data {
            CorruptionData::Character {
                value,
                min,
                max,
                threshold,
            } => Self::for_character(value, min, max, threshold),
            CorruptionData::Npc {
                permanent,
                temporary,
                max,
                threshold,
            } => Self::for_npc(permanent, temporary, max, threshold),
        }
    }
}

impl From<CorruptionTrack> for CorruptionData {
    fn from(track: CorruptionTrack) -> Self {
        CorruptionData::Npc {
            permanent: track.permanent,
            temporary: track.temporary,
            max: track.max,
            threshold: track.threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn character_temporary_is_value_above_floor() {
        let track = CorruptionTrack::for_character(5, 2, 12, 6);
        assert_eq!(track.permanent(), 2);
        assert_eq!(track.temporary(), 3);
        assert_eq!(track.total(), 5);
    }

    #[test]
    fn npc_total_sums_both_parts() {
        let track = CorruptionTrack::for_npc(1, 4, 10, 5);
        assert_eq!(track.total(), 5);
        assert!(track.is_over_threshold());
    }

    #[test]
    fn deserializes_and_precomputes_total() {
        let track: CorruptionTrack =
            serde_json::from_str(r#"{"permanent": 2, "temporary": 2, "max": 10, "threshold": 5}"#)
                .unwrap();
        assert_eq!(track.total(), 4);
        assert!(!track.is_over_threshold());
    }

    #[test]
    fn deserializes_character_value_and_floor() {
        let track: CorruptionTrack =
            serde_json::from_str(r#"{"value": 5, "min": 2, "max": 10, "threshold": 6}"#).unwrap();
        assert_eq!(track.permanent(), 2);
        assert_eq!(track.temporary(), 3);
        assert_eq!(track.total(), 5);
    }

    #[test]
    fn rejects_unrecognised_shapes() {
        assert!(serde_json::from_str::<CorruptionTrack>(r#"{"current": 5}"#).is_err());
        assert!(serde_json::from_str::<CorruptionTrack>("{}").is_err());
    }

    #[test]
    fn serializes_as_parts() {
        let json = serde_json::to_value(CorruptionTrack::for_character(5, 2, 10, 6)).unwrap();
        assert_eq!(json["permanent"], 2);
        assert_eq!(json["temporary"], 3);
    }

    #[test]
    fn zero_threshold_is_never_crossed() {
        assert!(!CorruptionTrack::default().is_over_threshold());
    }
}
