//! Prompt adapter for non-interactive use.
//!
//! Answers every dialog with its default: the preset roll selection, the
//! first candidate token, and "no" to throwing away a melee weapon.

use async_trait::async_trait;
use davokar_domain::{CharacterSnapshot, RollRequest, RollSelection, TokenPlacement, WeaponProfile};

use crate::infrastructure::ports::SelectionPrompt;

#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptDefaultsPrompt;

#[async_trait]
impl SelectionPrompt for AcceptDefaultsPrompt {
    async fn select_roll(
        &self,
        _snapshot: &CharacterSnapshot,
        selection: RollSelection,
    ) -> Option<RollRequest> {
        Some(selection.into_request())
    }

    async fn choose_attacker(&self, candidates: &[TokenPlacement]) -> Option<TokenPlacement> {
        candidates.first().cloned()
    }

    async fn confirm_throw(&self, weapon: &WeaponProfile) -> bool {
        tracing::debug!(weapon = %weapon.name, "Declining throw without a user to ask");
        false
    }
}
