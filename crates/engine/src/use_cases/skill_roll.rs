//! Skill roll use case.
//!
//! Opens the roll dialog for a sheet click, builds the pool formula from the
//! confirmed request, and posts the evaluated roll.

use std::sync::Arc;

use davokar_domain::{
    BuiltRoll, CharacterSnapshot, RollFormulaBuilder, RollRequest, RollSelection,
    SheetRollTarget, UnknownTermError,
};

use crate::infrastructure::ports::{
    NotificationSink, PostedRoll, RollError, RollEvaluator, RollHandle, SelectionPrompt,
};

use super::modifier::apply_modifier;

#[derive(Debug, Clone, PartialEq)]
pub enum SkillRollOutcome {
    /// The dialog was dismissed; nothing was built or posted.
    Cancelled,
    Posted {
        roll: PostedRoll,
        warnings: Vec<UnknownTermError>,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum SkillRollError {
    #[error("Roll failed: {0}")]
    Roll(#[from] RollError),
}

pub struct SkillRoll {
    prompt: Arc<dyn SelectionPrompt>,
    evaluator: Arc<dyn RollEvaluator>,
    notifier: Arc<dyn NotificationSink>,
    builder: RollFormulaBuilder,
}

impl SkillRoll {
    pub fn new(
        prompt: Arc<dyn SelectionPrompt>,
        evaluator: Arc<dyn RollEvaluator>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            prompt,
            evaluator,
            notifier,
            builder: RollFormulaBuilder::new(),
        }
    }

    /// Roll from a click on the character sheet.
    ///
    /// # Returns
    /// * `Ok(SkillRollOutcome::Cancelled)` - The user closed the dialog
    /// * `Ok(SkillRollOutcome::Posted { .. })` - The roll is in the log
    /// * `Err(SkillRollError)` - The evaluator failed
    pub async fn execute(
        &self,
        snapshot: &CharacterSnapshot,
        target: SheetRollTarget,
    ) -> Result<SkillRollOutcome, SkillRollError> {
        let selection = RollSelection::for_sheet_click(snapshot, target);

        let Some(request) = self.prompt.select_roll(snapshot, selection).await else {
            tracing::debug!(character = %snapshot.name, "Roll dialog cancelled");
            return Ok(SkillRollOutcome::Cancelled);
        };

        let built = self.builder.build(snapshot, &request);
        let roll = self.post_built(&built, &built.flavor()).await?;
        Ok(SkillRollOutcome::Posted {
            roll,
            warnings: built.warnings,
        })
    }

    /// Build and post a request that needs no dialog.
    pub async fn roll_request(
        &self,
        snapshot: &CharacterSnapshot,
        request: &RollRequest,
        flavor: Option<&str>,
    ) -> Result<(BuiltRoll, PostedRoll), RollError> {
        let built = self.builder.build(snapshot, request);
        let flavor = flavor.map(str::to_string).unwrap_or_else(|| built.flavor());
        let posted = self.post_built(&built, &flavor).await?;
        Ok((built, posted))
    }

    pub fn build(&self, snapshot: &CharacterSnapshot, request: &RollRequest) -> BuiltRoll {
        self.builder.build(snapshot, request)
    }

    /// Report warnings, then create, modify and post a built roll.
    pub async fn post_built(
        &self,
        built: &BuiltRoll,
        flavor: &str,
    ) -> Result<PostedRoll, RollError> {
        for warning in &built.warnings {
            tracing::warn!(term = %warning.term, "Skipping unknown roll term");
            self.notifier.warn(&warning.to_string());
        }

        let handle = self.evaluator.create(&built.formula).await?;
        let posted = match self.modify_and_post(&handle, built.modifier, flavor).await {
            Ok(posted) => posted,
            Err(err) => {
                tracing::warn!(roll_id = %handle.id, error = %err, "Discarding unposted roll");
                self.evaluator.discard(&handle.id).await;
                return Err(err);
            }
        };

        tracing::info!(
            roll_id = %posted.id,
            formula = %built.formula,
            modifier = built.modifier,
            successes = posted.successes,
            "Skill roll posted"
        );
        Ok(posted)
    }

    async fn modify_and_post(
        &self,
        handle: &RollHandle,
        modifier: i32,
        flavor: &str,
    ) -> Result<PostedRoll, RollError> {
        apply_modifier(self.evaluator.as_ref(), handle, modifier).await?;
        self.evaluator.post(handle, flavor).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{
        MockNotificationSink, MockRollEvaluator, MockSelectionPrompt,
    };
    use davokar_domain::{Attribute, Rating, RollId, Skill};
    use mockall::predicate::*;

    fn snapshot() -> CharacterSnapshot {
        CharacterSnapshot::new("Aelfric")
            .with_attribute(Attribute::Physique, Rating::new(3, 0))
            .with_skill(Skill::Force, Rating::new(2, 1))
    }

    fn posted(formula: &str, flavor: &str) -> PostedRoll {
        PostedRoll {
            id: RollId::new("roll-1"),
            formula: formula.to_string(),
            flavor: flavor.to_string(),
            successes: 1,
            banes: 0,
            pushes: 0,
            can_push: true,
            breakdown: String::new(),
        }
    }

    fn evaluator_expecting(formula: &'static str, modifier_calls: usize) -> MockRollEvaluator {
        let mut evaluator = MockRollEvaluator::new();
        evaluator
            .expect_create()
            .with(eq(formula))
            .times(1)
            .returning(|formula| {
                Ok(RollHandle {
                    id: RollId::new("roll-1"),
                    formula: formula.to_string(),
                })
            });
        evaluator
            .expect_modify()
            .times(modifier_calls)
            .returning(|_, _| Ok(()));
        evaluator
            .expect_post()
            .times(1)
            .returning(|handle, flavor| Ok(posted(&handle.formula, flavor)));
        evaluator
    }

    #[tokio::test]
    async fn cancelled_dialog_touches_nothing() {
        let mut prompt = MockSelectionPrompt::new();
        prompt.expect_select_roll().times(1).returning(|_, _| None);

        let mut evaluator = MockRollEvaluator::new();
        evaluator.expect_create().times(0);
        evaluator.expect_modify().times(0);
        evaluator.expect_post().times(0);

        let mut notifier = MockNotificationSink::new();
        notifier.expect_warn().times(0);

        let use_case = SkillRoll::new(Arc::new(prompt), Arc::new(evaluator), Arc::new(notifier));
        let outcome = use_case
            .execute(&snapshot(), SheetRollTarget::Skill(Skill::Force))
            .await
            .unwrap();

        assert_eq!(outcome, SkillRollOutcome::Cancelled);
    }

    #[tokio::test]
    async fn dialog_defaults_reach_the_prompt() {
        let mut prompt = MockSelectionPrompt::new();
        prompt
            .expect_select_roll()
            .withf(|_, selection| {
                selection.attribute() == Attribute::Physique && !selection.fields_locked()
            })
            .times(1)
            .returning(|_, selection| Some(selection.into_request()));

        let evaluator = evaluator_expecting("3ds[Physique] + 3ds[Force]", 0);
        let mut notifier = MockNotificationSink::new();
        notifier.expect_warn().times(0);

        let use_case = SkillRoll::new(Arc::new(prompt), Arc::new(evaluator), Arc::new(notifier));
        let outcome = use_case
            .execute(&snapshot(), SheetRollTarget::Skill(Skill::Force))
            .await
            .unwrap();

        match outcome {
            SkillRollOutcome::Posted { roll, warnings } => {
                assert_eq!(roll.flavor, "Physique + Force");
                assert!(warnings.is_empty());
            }
            other => panic!("expected posted roll, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn modifier_is_applied_once() {
        let mut prompt = MockSelectionPrompt::new();
        prompt
            .expect_select_roll()
            .returning(|_, _| Some(RollRequest::new(["physique", "force"]).with_modifier(-2)));

        let mut evaluator = MockRollEvaluator::new();
        evaluator.expect_create().returning(|formula| {
            Ok(RollHandle {
                id: RollId::new("roll-1"),
                formula: formula.to_string(),
            })
        });
        evaluator
            .expect_modify()
            .with(always(), eq(-2))
            .times(1)
            .returning(|_, _| Ok(()));
        evaluator
            .expect_post()
            .returning(|handle, flavor| Ok(posted(&handle.formula, flavor)));

        let use_case = SkillRoll::new(
            Arc::new(prompt),
            Arc::new(evaluator),
            Arc::new(MockNotificationSink::new()),
        );
        use_case
            .execute(&snapshot(), SheetRollTarget::Skill(Skill::Force))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn unknown_term_warns_once_and_is_skipped() {
        let mut prompt = MockSelectionPrompt::new();
        prompt
            .expect_select_roll()
            .returning(|_, _| Some(RollRequest::new(["physique", "bogus", "force"])));

        let evaluator = evaluator_expecting("3ds[Physique] + 3ds[Force]", 0);
        let mut notifier = MockNotificationSink::new();
        notifier
            .expect_warn()
            .with(eq("Unknown roll term: bogus"))
            .times(1)
            .return_const(());

        let use_case = SkillRoll::new(Arc::new(prompt), Arc::new(evaluator), Arc::new(notifier));
        let outcome = use_case
            .execute(&snapshot(), SheetRollTarget::Attribute(Attribute::Physique))
            .await
            .unwrap();

        match outcome {
            SkillRollOutcome::Posted { warnings, .. } => assert_eq!(warnings.len(), 1),
            other => panic!("expected posted roll, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn evaluator_failure_is_an_error() {
        let mut prompt = MockSelectionPrompt::new();
        prompt
            .expect_select_roll()
            .returning(|_, selection| Some(selection.into_request()));

        let mut evaluator = MockRollEvaluator::new();
        evaluator
            .expect_create()
            .returning(|formula| Err(RollError::invalid_formula(formula, "rejected")));
        evaluator.expect_post().times(0);

        let use_case = SkillRoll::new(
            Arc::new(prompt),
            Arc::new(evaluator),
            Arc::new(MockNotificationSink::new()),
        );
        let err = use_case
            .execute(&snapshot(), SheetRollTarget::Skill(Skill::Force))
            .await
            .unwrap_err();
        assert!(matches!(err, SkillRollError::Roll(RollError::InvalidFormula { .. })));
    }

    #[tokio::test]
    async fn failed_modifier_discards_the_roll() {
        let mut evaluator = MockRollEvaluator::new();
        evaluator.expect_create().returning(|formula| {
            Ok(RollHandle {
                id: RollId::new("roll-9"),
                formula: formula.to_string(),
            })
        });
        evaluator
            .expect_modify()
            .returning(|_, _| Err(RollError::evaluator("modify", "host offline")));
        evaluator.expect_post().times(0);
        evaluator
            .expect_discard()
            .with(eq(RollId::new("roll-9")))
            .times(1)
            .return_const(());

        let use_case = SkillRoll::new(
            Arc::new(MockSelectionPrompt::new()),
            Arc::new(evaluator),
            Arc::new(MockNotificationSink::new()),
        );
        let request = RollRequest::new(["physique"]).with_modifier(1);
        let err = use_case
            .roll_request(&snapshot(), &request, None)
            .await
            .unwrap_err();
        assert!(matches!(err, RollError::Evaluator { .. }));
    }

    #[tokio::test]
    async fn roll_request_uses_given_flavor() {
        let evaluator = evaluator_expecting("3ds[Physique]", 0);
        let use_case = SkillRoll::new(
            Arc::new(MockSelectionPrompt::new()),
            Arc::new(evaluator),
            Arc::new(MockNotificationSink::new()),
        );

        let (built, roll) = use_case
            .roll_request(&snapshot(), &RollRequest::new(["physique"]), Some("Break the door"))
            .await
            .unwrap();
        assert_eq!(built.formula, "3ds[Physique]");
        assert_eq!(roll.flavor, "Break the door");
    }
}
