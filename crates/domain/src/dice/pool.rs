//! Dice pool parsing and rolling
//!
//! Reads formulas produced by the roll builder, like
//! "3ds[Physique] + 4ds[Melee] + 2d8", and rolls them with an injected die
//! roller so results are reproducible in tests.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::die::{ArtifactDie, DieKind};
use crate::error::DomainError;
use crate::rolls::POOL_DIE_MARKER;

/// Most dice a single pool may hold.
pub const MAX_POOL_DICE: u32 = 100;

/// Error when parsing a dice pool formula
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceParseError {
    /// The formula string is empty
    #[error("Empty dice formula")]
    Empty,
    /// Invalid format - expected Nds[Label] or NdX
    #[error("Invalid dice format: {0}")]
    InvalidFormat(String),
    /// Dice count must be at least 1
    #[error("Dice count must be at least 1")]
    InvalidDiceCount,
    /// Only d8, d10 and d12 are valid fixed dice
    #[error("Unsupported die size: d{0}")]
    UnsupportedDie(u8),
    /// The whole pool is larger than [`MAX_POOL_DICE`]
    #[error("Pool has more than {0} dice")]
    TooManyDice(u32),
}

/// One group of identical dice within a pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiceGroup {
    pub kind: DieKind,
    pub count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// A parsed, not yet rolled, pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DicePool {
    pub groups: Vec<DiceGroup>,
}

impl DicePool {
    /// Parse a pool formula.
    ///
    /// Supported segments, joined with `+`:
    /// - "Nds[Label]" - N labeled pool dice
    /// - "Nds" - N unlabeled pool dice
    /// - "NdX" - N artifact dice, X in {8, 10, 12}
    /// - "dX" - one artifact die (shorthand)
    pub fn parse(input: &str) -> Result<Self, DiceParseError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(DiceParseError::Empty);
        }

        let groups = input
            .split('+')
            .map(parse_segment)
            .collect::<Result<Vec<_>, _>>()?;

        let pool = Self { groups };
        if pool.dice_count() > MAX_POOL_DICE {
            return Err(DiceParseError::TooManyDice(MAX_POOL_DICE));
        }
        Ok(pool)
    }

    pub fn dice_count(&self) -> u32 {
        self.groups
            .iter()
            .map(|g| g.count)
            .fold(0, u32::saturating_add)
    }

    /// Adds `n` pool dice, or removes up to `|n|` pool dice starting with
    /// the last pool group. Artifact dice are never removed, and the pool
    /// never grows past [`MAX_POOL_DICE`].
    pub fn modify(&mut self, n: i32) {
        if n > 0 {
            let extra = n
                .unsigned_abs()
                .min(MAX_POOL_DICE.saturating_sub(self.dice_count()));
            if extra == 0 {
                return;
            }
            match self
                .groups
                .iter_mut()
                .rev()
                .find(|g| g.kind == DieKind::Pool)
            {
                Some(group) => group.count = group.count.saturating_add(extra),
                None => self.groups.push(DiceGroup {
                    kind: DieKind::Pool,
                    count: extra,
                    label: None,
                }),
            }
            return;
        }

        let mut to_remove = n.unsigned_abs();
        for group in self
            .groups
            .iter_mut()
            .rev()
            .filter(|g| g.kind == DieKind::Pool)
        {
            if to_remove == 0 {
                break;
            }
            let removed = group.count.min(to_remove);
            group.count -= removed;
            to_remove -= removed;
        }
    }

    /// Roll every die. `roller` receives the number of sides and returns a
    /// face in `1..=sides`.
    pub fn roll(&self, mut roller: impl FnMut(u8) -> u8) -> PoolRoll {
        let mut dice = Vec::with_capacity(self.dice_count() as usize);
        for group in &self.groups {
            for _ in 0..group.count {
                dice.push(RolledDie {
                    kind: group.kind,
                    face: roller(group.kind.sides()),
                });
            }
        }
        PoolRoll { dice, pushes: 0 }
    }
}

fn parse_segment(raw: &str) -> Result<DiceGroup, DiceParseError> {
    let segment = raw.trim().to_lowercase();
    if segment.is_empty() {
        return Err(DiceParseError::InvalidFormat(
            "Empty segment between '+' separators".to_string(),
        ));
    }

    // Labels keep their original casing
    let (head, label) = match raw.trim().split_once('[') {
        Some((head, rest)) => {
            let label = rest.strip_suffix(']').ok_or_else(|| {
                DiceParseError::InvalidFormat(format!("Unclosed label in '{}'", raw.trim()))
            })?;
            (head.trim().to_lowercase(), Some(label.to_string()))
        }
        None => (segment, None),
    };

    let d_pos = head.find('d').ok_or_else(|| {
        DiceParseError::InvalidFormat(format!("Missing 'd' separator in '{}'", head))
    })?;

    let count_str = &head[..d_pos];
    let count: u32 = if count_str.is_empty() {
        1
    } else {
        count_str.parse().map_err(|_| {
            DiceParseError::InvalidFormat(format!("Invalid dice count: '{}'", count_str))
        })?
    };
    if count == 0 {
        return Err(DiceParseError::InvalidDiceCount);
    }

    let after_d = &head[d_pos + 1..];
    let pool_suffix = &POOL_DIE_MARKER[1..];
    if after_d == pool_suffix {
        return Ok(DiceGroup {
            kind: DieKind::Pool,
            count,
            label,
        });
    }

    let sides: u8 = after_d.parse().map_err(|_| {
        DiceParseError::InvalidFormat(format!("Invalid die size: '{}'", after_d))
    })?;
    let die = ArtifactDie::from_sides(sides).ok_or(DiceParseError::UnsupportedDie(sides))?;

    Ok(DiceGroup {
        kind: DieKind::Artifact(die),
        count,
        label,
    })
}

/// A single rolled die.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolledDie {
    pub kind: DieKind,
    pub face: u8,
}

impl RolledDie {
    pub fn successes(&self) -> u32 {
        self.kind.successes(self.face)
    }

    pub fn is_bane(&self) -> bool {
        self.kind.is_bane(self.face)
    }

    /// Dice that scored nothing and are not banes may be rerolled.
    pub fn is_rerollable(&self) -> bool {
        self.successes() == 0 && !self.is_bane()
    }
}

/// Result of rolling a pool, possibly pushed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolRoll {
    pub dice: Vec<RolledDie>,
    pub pushes: u32,
}

impl PoolRoll {
    pub fn successes(&self) -> u32 {
        self.dice.iter().map(RolledDie::successes).sum()
    }

    pub fn banes(&self) -> u32 {
        self.dice.iter().filter(|d| d.is_bane()).count() as u32
    }

    pub fn can_push(&self, max_pushes: u32) -> bool {
        self.pushes < max_pushes && self.dice.iter().any(RolledDie::is_rerollable)
    }

    /// Reroll every die that scored nothing and is not a bane.
    ///
    /// Returns the number of dice rerolled.
    pub fn push(
        &mut self,
        max_pushes: u32,
        mut roller: impl FnMut(u8) -> u8,
    ) -> Result<usize, DomainError> {
        if self.pushes >= max_pushes {
            return Err(DomainError::constraint(format!(
                "roll has already been pushed {} time(s)",
                self.pushes
            )));
        }
        if !self.dice.iter().any(RolledDie::is_rerollable) {
            return Err(DomainError::constraint(
                "no dice left to reroll: every die scored or is a bane",
            ));
        }

        let mut rerolled = 0;
        for die in self.dice.iter_mut().filter(|d| d.is_rerollable()) {
            die.face = roller(die.kind.sides());
            rerolled += 1;
        }
        self.pushes += 1;
        Ok(rerolled)
    }

    /// Faces grouped for display, e.g. "ds[6, 3, 1] d8[7]".
    pub fn breakdown(&self) -> String {
        let mut parts: Vec<(DieKind, Vec<String>)> = Vec::new();
        for die in &self.dice {
            match parts.iter_mut().find(|(kind, _)| *kind == die.kind) {
                Some((_, faces)) => faces.push(die.face.to_string()),
                None => parts.push((die.kind, vec![die.face.to_string()])),
            }
        }
        parts
            .into_iter()
            .map(|(kind, faces)| {
                let name = match kind {
                    DieKind::Pool => POOL_DIE_MARKER,
                    DieKind::Artifact(die) => die.notation(),
                };
                format!("{}[{}]", name, faces.join(", "))
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Roller that replays a fixed sequence of faces.
    fn scripted(faces: &[u8]) -> impl FnMut(u8) -> u8 + '_ {
        let mut iter = faces.iter().copied();
        move |_sides| iter.next().unwrap_or(1)
    }

    #[test]
    fn test_parse_builder_output() {
        let pool = DicePool::parse("3ds[Physique] + 4ds[Melee] + 2d8").unwrap();
        assert_eq!(pool.groups.len(), 3);
        assert_eq!(pool.groups[0].label.as_deref(), Some("Physique"));
        assert_eq!(pool.groups[1].count, 4);
        assert_eq!(pool.groups[2].kind, DieKind::Artifact(ArtifactDie::D8));
        assert_eq!(pool.dice_count(), 9);
    }

    #[test]
    fn test_parse_keeps_label_case_and_spaces() {
        let pool = DicePool::parse("4ds[Corruption Total]").unwrap();
        assert_eq!(pool.groups[0].label.as_deref(), Some("Corruption Total"));
    }

    #[test]
    fn test_parse_shorthand_artifact() {
        let pool = DicePool::parse("d12").unwrap();
        assert_eq!(pool.groups[0].count, 1);
        assert_eq!(pool.groups[0].kind, DieKind::Artifact(ArtifactDie::D12));
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(DicePool::parse("  "), Err(DiceParseError::Empty)));
    }

    #[test]
    fn test_parse_invalid_no_d() {
        assert!(matches!(
            DicePool::parse("3"),
            Err(DiceParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_parse_invalid_zero_dice() {
        assert!(matches!(
            DicePool::parse("0ds[Wits]"),
            Err(DiceParseError::InvalidDiceCount)
        ));
    }

    #[test]
    fn test_parse_unsupported_die() {
        assert!(matches!(
            DicePool::parse("2d20"),
            Err(DiceParseError::UnsupportedDie(20))
        ));
    }

    #[test]
    fn test_parse_unclosed_label() {
        assert!(matches!(
            DicePool::parse("2ds[Wits"),
            Err(DiceParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_modify_adds_to_last_pool_group() {
        let mut pool = DicePool::parse("3ds[Physique] + 2ds[Melee] + 1d8").unwrap();
        pool.modify(2);
        assert_eq!(pool.groups[1].count, 4);
        assert_eq!(pool.dice_count(), 8);
    }

    #[test]
    fn test_modify_removes_pool_dice_but_not_artifacts() {
        let mut pool = DicePool::parse("3ds[Physique] + 2ds[Melee] + 1d8").unwrap();
        pool.modify(-4);
        assert_eq!(pool.groups[0].count, 1);
        assert_eq!(pool.groups[1].count, 0);
        assert_eq!(pool.groups[2].count, 1);

        pool.modify(-10);
        assert_eq!(pool.dice_count(), 1);
    }

    #[test]
    fn test_parse_rejects_oversized_pools() {
        assert!(matches!(
            DicePool::parse("4294967295d8 + 1d10"),
            Err(DiceParseError::TooManyDice(MAX_POOL_DICE))
        ));
        assert!(matches!(
            DicePool::parse("60ds + 41ds"),
            Err(DiceParseError::TooManyDice(_))
        ));
        assert_eq!(DicePool::parse("100ds").unwrap().dice_count(), 100);
    }

    #[test]
    fn test_dice_count_saturates() {
        let pool = DicePool {
            groups: vec![
                DiceGroup {
                    kind: DieKind::Pool,
                    count: u32::MAX,
                    label: None,
                },
                DiceGroup {
                    kind: DieKind::Artifact(ArtifactDie::D10),
                    count: 1,
                    label: None,
                },
            ],
        };
        assert_eq!(pool.dice_count(), u32::MAX);
    }

    #[test]
    fn test_modify_stops_at_pool_limit() {
        let mut pool = DicePool::parse("3ds[Physique] + 1d8").unwrap();
        pool.modify(i32::MAX);
        assert_eq!(pool.dice_count(), MAX_POOL_DICE);
        assert_eq!(pool.groups[0].count, MAX_POOL_DICE - 1);

        pool.modify(5);
        assert_eq!(pool.dice_count(), MAX_POOL_DICE);
    }

    #[test]
    fn test_modify_without_pool_group_adds_one() {
        let mut pool = DicePool::parse("1d10").unwrap();
        pool.modify(1);
        assert_eq!(pool.groups.len(), 2);
        assert_eq!(pool.groups[1].kind, DieKind::Pool);
    }

    #[test]
    fn test_roll_counts_successes_and_banes() {
        let pool = DicePool::parse("3ds[Physique] + 1d10").unwrap();
        let roll = pool.roll(scripted(&[6, 1, 4, 9]));
        assert_eq!(roll.successes(), 3);
        assert_eq!(roll.banes(), 1);
        assert_eq!(roll.breakdown(), "ds[6, 1, 4] d10[9]");
    }

    #[test]
    fn test_roller_receives_die_sides() {
        let pool = DicePool::parse("1ds + 1d8 + 1d12").unwrap();
        let mut seen = Vec::new();
        pool.roll(|sides| {
            seen.push(sides);
            1
        });
        assert_eq!(seen, vec![6, 8, 12]);
    }

    #[test]
    fn test_push_rerolls_only_blank_dice() {
        let pool = DicePool::parse("3ds[Wits] + 1d8").unwrap();
        let mut roll = pool.roll(scripted(&[6, 1, 3, 2]));
        assert!(roll.can_push(1));

        let rerolled = roll.push(1, scripted(&[6, 7])).unwrap();
        assert_eq!(rerolled, 2);
        assert_eq!(roll.dice[0].face, 6);
        assert_eq!(roll.dice[1].face, 1);
        assert_eq!(roll.dice[2].face, 6);
        assert_eq!(roll.dice[3].face, 7);
        assert_eq!(roll.successes(), 3);
        assert_eq!(roll.pushes, 1);
    }

    #[test]
    fn test_push_refused_without_rerollable_dice() {
        let pool = DicePool::parse("2ds + 1d8").unwrap();
        let mut roll = pool.roll(scripted(&[6, 1, 8]));
        assert!(!roll.can_push(1));
        assert!(matches!(
            roll.push(1, scripted(&[6, 6, 6])),
            Err(DomainError::Constraint(_))
        ));
        assert_eq!(roll.pushes, 0);
    }

    #[test]
    fn test_push_limit() {
        let pool = DicePool::parse("2ds").unwrap();
        let mut roll = pool.roll(scripted(&[2, 3]));
        roll.push(1, scripted(&[2, 2])).unwrap();
        assert!(!roll.can_push(1));
        assert!(matches!(
            roll.push(1, scripted(&[6, 6])),
            Err(DomainError::Constraint(_))
        ));
    }
}
