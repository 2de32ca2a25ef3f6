//! Interactive prompts owned by the host UI.
//!
//! Each call suspends until the user answers. A cancelled dialog comes back
//! as `None` (or `false`) and the caller aborts without side effects.

use async_trait::async_trait;
use davokar_domain::{CharacterSnapshot, RollRequest, RollSelection, TokenPlacement, WeaponProfile};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SelectionPrompt: Send + Sync {
    /// Show the roll dialog preset to `selection`.
    async fn select_roll(
        &self,
        snapshot: &CharacterSnapshot,
        selection: RollSelection,
    ) -> Option<RollRequest>;

    /// Pick one of several tokens the attacking character has on the scene.
    async fn choose_attacker(&self, candidates: &[TokenPlacement]) -> Option<TokenPlacement>;

    /// Ask before throwing a melee weapon that will not come back.
    async fn confirm_throw(&self, weapon: &WeaponProfile) -> bool;
}
