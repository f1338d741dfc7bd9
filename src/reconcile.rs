//! Write Reconciliation Engine
//!
//! The store accepts writes immediately but derives some fields (expiry
//! countdown, date-added stamp) asynchronously, so a write is only "done"
//! once a later read shows the derived field moved. This module owns that
//! lifecycle: it applies the action, tracks one pending watch per entity,
//! polls the read path until the declared field changes or the deadline
//! passes, and swaps local state wholesale from full re-reads.
//!
//! Also hosts the bulk delete sequencer, which funnels into the same single
//! re-read discipline.

use std::collections::HashMap;

use gloo_timers::callback::{Interval, Timeout};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::actions::{self, ActionReceipt};
use crate::context::AppContext;
use crate::models::FridgeItem;

/// Poll cadence while awaiting a derived field.
pub const POLL_INTERVAL_MS: u32 = 1_000;
/// Hard cap on polling, in ticks of `POLL_INTERVAL_MS`.
pub const DEADLINE_TICKS: u32 = 10;
/// How long the settle spinner stays up after a plain refresh, so the user
/// sees that something happened. Not a correctness delay.
pub const SETTLE_GRACE_MS: u32 = 500;

/// Server-derived field a write can declare as expected to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivedField {
    DaysUntilExpiration,
    DateAdded,
}

/// Snapshot of a derived field's value at write time.
#[derive(Debug, Clone, PartialEq)]
pub enum DerivedValue {
    Days(Option<i32>),
    Stamp(Option<String>),
}

impl DerivedField {
    /// Capture the field's current value; an absent entity captures as the
    /// absent value, which is exactly the prior a create wants.
    pub fn capture(&self, item: Option<&FridgeItem>) -> DerivedValue {
        match self {
            DerivedField::DaysUntilExpiration => {
                DerivedValue::Days(item.and_then(|i| i.days_until_expiration))
            }
            DerivedField::DateAdded => DerivedValue::Stamp(item.and_then(|i| i.date_added.clone())),
        }
    }
}

/// Transient record of one write awaiting backend derivation. At most one
/// exists per entity; a newer write supersedes it.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingWatch {
    entity_id: String,
    field: DerivedField,
    prior: DerivedValue,
    ticks_left: u32,
    generation: u32,
}

impl PendingWatch {
    pub fn new(entity_id: String, field: DerivedField, prior: DerivedValue, generation: u32) -> Self {
        Self {
            entity_id,
            field,
            prior,
            ticks_left: DEADLINE_TICKS,
            generation,
        }
    }

    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Burn one tick of the deadline budget. True when exhausted.
    fn tick(&mut self) -> bool {
        self.ticks_left = self.ticks_left.saturating_sub(1);
        self.ticks_left == 0
    }

    /// Whether a fresh read shows the awaited field off its prior value.
    fn settled_by(&self, items: &[FridgeItem]) -> bool {
        let current = self
            .field
            .capture(items.iter().find(|i| i.id == self.entity_id));
        current != self.prior
    }
}

/// Lifecycle of one entity's write. Entities not in the phase map are Idle.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum WritePhase {
    #[default]
    Idle,
    Saving,
    AwaitingDerivation(PendingWatch),
    Settled,
    TimedOut,
}

impl WritePhase {
    /// The action was confirmed: wait on the declared field, or settle
    /// directly when none was declared. A rejected action instead drops the
    /// entity from the phase map, which reads back as `Idle`.
    pub fn confirmed(self, watch: Option<PendingWatch>) -> WritePhase {
        match watch {
            Some(watch) => WritePhase::AwaitingDerivation(watch),
            None => WritePhase::Settled,
        }
    }

    /// Account for one poll tick. `fresh` carries the re-read when it
    /// succeeded; a failed read keeps stale state but still burns deadline
    /// budget, since the deadline is a temporal cap.
    pub fn polled(self, fresh: Option<&[FridgeItem]>) -> WritePhase {
        match self {
            WritePhase::AwaitingDerivation(mut watch) => {
                let expired = watch.tick();
                match fresh {
                    Some(items) if watch.settled_by(items) => WritePhase::Settled,
                    _ if expired => WritePhase::TimedOut,
                    _ => WritePhase::AwaitingDerivation(watch),
                }
            }
            other => other,
        }
    }
}

/// A write against the external action interface.
#[derive(Debug, Clone)]
pub enum WriteAction {
    CreateItem {
        id: String,
        name: String,
        quantity: u32,
        use_by: Option<String>,
    },
    EditItem {
        id: String,
        name: String,
        quantity: u32,
        use_by: Option<String>,
        date_added: Option<String>,
    },
    DeleteItem {
        id: String,
    },
    CreateRecipe {
        name: String,
        link: Option<String>,
        ingredients: String,
        procedure: String,
    },
    EditRecipe {
        id: String,
        name: String,
        link: Option<String>,
        ingredients: String,
        procedure: String,
    },
    DeleteRecipe {
        id: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Items,
    Recipes,
}

impl WriteAction {
    /// Id of the affected entity. Recipe creates have none; the store
    /// assigns one.
    fn entity_id(&self) -> Option<&str> {
        match self {
            WriteAction::CreateItem { id, .. }
            | WriteAction::EditItem { id, .. }
            | WriteAction::DeleteItem { id }
            | WriteAction::EditRecipe { id, .. }
            | WriteAction::DeleteRecipe { id } => Some(id),
            WriteAction::CreateRecipe { .. } => None,
        }
    }

    fn collection(&self) -> Collection {
        match self {
            WriteAction::CreateItem { .. }
            | WriteAction::EditItem { .. }
            | WriteAction::DeleteItem { .. } => Collection::Items,
            _ => Collection::Recipes,
        }
    }

    async fn dispatch(&self) -> Result<ActionReceipt, String> {
        match self {
            WriteAction::CreateItem {
                id,
                name,
                quantity,
                use_by,
            } => {
                actions::create_item(&actions::CreateItemArgs {
                    id,
                    name,
                    quantity: *quantity,
                    use_by: use_by.as_deref(),
                })
                .await
            }
            WriteAction::EditItem {
                id,
                name,
                quantity,
                use_by,
                date_added,
            } => {
                actions::edit_item(&actions::EditItemArgs {
                    id,
                    name,
                    quantity: *quantity,
                    use_by: use_by.as_deref(),
                    date_added: date_added.as_deref(),
                })
                .await
            }
            WriteAction::DeleteItem { id } => actions::delete_item(id).await,
            WriteAction::CreateRecipe {
                name,
                link,
                ingredients,
                procedure,
            } => {
                actions::create_recipe(&actions::CreateRecipeArgs {
                    name,
                    link: link.as_deref(),
                    ingredients,
                    procedure,
                })
                .await
            }
            WriteAction::EditRecipe {
                id,
                name,
                link,
                ingredients,
                procedure,
            } => {
                actions::edit_recipe(&actions::EditRecipeArgs {
                    id,
                    name,
                    link: link.as_deref(),
                    ingredients,
                    procedure,
                })
                .await
            }
            WriteAction::DeleteRecipe { id } => actions::delete_recipe(id).await,
        }
    }
}

/// Timer owned by one entity's slot. Dropping a slot cancels the underlying
/// browser timer, so replacing or removing an entry is the cancellation.
enum TimerSlot {
    Poll(#[allow(dead_code)] Interval),
    Grace(#[allow(dead_code)] Timeout),
}

/// Driver of the write lifecycle. `Copy`, so handlers and spawned tasks can
/// capture it freely; every copy shares the same timer slots through the
/// reactive arena. The slots wrap JS timer handles, hence the local storage.
#[derive(Clone, Copy)]
pub struct Reconciler {
    ctx: AppContext,
    timers: StoredValue<HashMap<String, TimerSlot>, LocalStorage>,
    generation: StoredValue<u32>,
}

impl Reconciler {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            timers: StoredValue::new_local(HashMap::new()),
            generation: StoredValue::new(0),
        }
    }

    /// Apply a write and reconcile local state.
    ///
    /// Without a declared field: one immediate re-read, then a short settle
    /// grace so the card spinner is visible at least once. With one: record a
    /// pending watch against the field's prior value and poll until it moves
    /// or the deadline passes. A failure leaves local state untouched, clears
    /// the entity's pending marker and is surfaced to the caller.
    pub async fn submit(
        &self,
        action: WriteAction,
        expected: Option<DerivedField>,
    ) -> Result<(), String> {
        self.ctx.saving.set(true);
        let result = self.submit_inner(&action, expected).await;
        self.ctx.saving.set(false);
        if let Err(msg) = &result {
            web_sys::console::error_1(&format!("[Reconcile] write failed: {msg}").into());
            self.ctx.error.set(Some(msg.clone()));
        }
        result
    }

    async fn submit_inner(
        &self,
        action: &WriteAction,
        expected: Option<DerivedField>,
    ) -> Result<(), String> {
        let entity_id = action.entity_id().map(str::to_string);
        if let Some(id) = &entity_id {
            self.set_phase(id, WritePhase::Saving);
        }

        let receipt = match action.dispatch().await {
            Ok(receipt) => receipt,
            Err(err) => {
                if let Some(id) = &entity_id {
                    self.clear_entity(id);
                }
                return Err(err);
            }
        };
        if !receipt.confirmed {
            if let Some(id) = &entity_id {
                self.clear_entity(id);
            }
            return Err("the store did not confirm the action".to_string());
        }

        match (&entity_id, expected, action.collection()) {
            (Some(id), Some(field), Collection::Items) => {
                let generation = self.generation.get_value().wrapping_add(1);
                self.generation.set_value(generation);
                let prior = self
                    .ctx
                    .items
                    .with_untracked(|items| field.capture(items.iter().find(|i| i.id == *id)));
                self.start_watch(PendingWatch::new(id.clone(), field, prior, generation));
                Ok(())
            }
            _ => {
                if let Err(err) = self.refresh(action.collection()).await {
                    // Stale collection is kept; the spinner must still come down.
                    if let Some(id) = &entity_id {
                        self.clear_entity(id);
                    }
                    return Err(err);
                }
                if let Some(id) = entity_id {
                    let phase = self.phase_of(&id).confirmed(None);
                    self.set_phase(&id, phase);
                    self.start_grace(id);
                }
                Ok(())
            }
        }
    }

    /// Replace one collection wholesale from a full re-read.
    pub async fn refresh(&self, collection: Collection) -> Result<(), String> {
        match collection {
            Collection::Items => {
                let items = actions::read_fridge_items().await?;
                self.ctx.items.set(items);
            }
            Collection::Recipes => {
                let recipes = actions::read_recipes().await?;
                self.ctx.recipes.set(recipes);
            }
        }
        Ok(())
    }

    /// Delete every selected item, sequentially. Individual failures do not
    /// stop the loop; they are counted and reported once at the end. Exactly
    /// one re-read follows the loop, and selection mode always ends cleared.
    pub async fn bulk_delete(&self) -> Result<(), String> {
        let ids = self.ctx.selection.with_untracked(|s| s.ids());
        self.ctx.saving.set(true);

        let mut failed = 0usize;
        for id in &ids {
            if let Err(err) = actions::delete_item(id).await {
                web_sys::console::error_1(&format!("[Reconcile] bulk delete {id}: {err}").into());
                failed += 1;
            }
            self.clear_entity(id);
        }

        let read = self.refresh(Collection::Items).await;
        self.ctx.selection.update(|s| s.finish());
        self.ctx.saving.set(false);

        let result = if failed > 0 {
            Err(format!("{failed} of {} deletes failed", ids.len()))
        } else {
            read
        };
        if let Err(msg) = &result {
            self.ctx.error.set(Some(msg.clone()));
        }
        result
    }

    fn start_watch(&self, watch: PendingWatch) {
        let id = watch.entity_id().to_string();
        let generation = watch.generation();
        let phase = self.phase_of(&id).confirmed(Some(watch));
        self.set_phase(&id, phase);

        let this = *self;
        let entity = id.clone();
        let interval = Interval::new(POLL_INTERVAL_MS, move || {
            let entity = entity.clone();
            spawn_local(async move {
                this.poll_once(entity, generation).await;
            });
        });
        // Inserting over an existing slot drops it, cancelling whatever poll
        // or grace timer a superseded write left behind.
        self.timers.update_value(|timers| {
            timers.insert(id, TimerSlot::Poll(interval));
        });
    }

    async fn poll_once(&self, entity: String, generation: u32) {
        let fresh = actions::read_fridge_items().await.ok();

        // A newer write may have superseded this watch while the read was in
        // flight; only the watch this poll was started for is ours to advance.
        let WritePhase::AwaitingDerivation(watch) = self.phase_of(&entity) else {
            return;
        };
        if watch.generation() != generation {
            return;
        }

        let next = WritePhase::AwaitingDerivation(watch).polled(fresh.as_deref());

        // Every successful poll replaces the snapshot wholesale, so a timed
        // out entity is left showing whatever the last re-read produced.
        if let Some(items) = fresh {
            if next == WritePhase::Settled
                && self
                    .ctx
                    .detail_item
                    .with_untracked(|d| d.as_ref().is_some_and(|i| i.id == entity))
            {
                let updated = items.iter().find(|i| i.id == entity).cloned();
                self.ctx.detail_item.set(updated);
            }
            self.ctx.items.set(items);
        }

        match next {
            WritePhase::Settled => {
                self.clear_entity(&entity);
            }
            WritePhase::TimedOut => {
                // Liveness bound, not an error: the field may still arrive on
                // a later read and simply won't be waited for.
                self.clear_entity(&entity);
            }
            next => self.set_phase(&entity, next),
        }
    }

    fn start_grace(&self, entity: String) {
        let this = *self;
        let id = entity.clone();
        let timeout = Timeout::new(SETTLE_GRACE_MS, move || {
            // Deferred so the slot is not dropped from inside its own callback.
            spawn_local(async move {
                // A follow-up write may have taken the entity back to Saving
                // while the grace ran; that write owns the marker now.
                if this.phase_of(&id) == WritePhase::Settled {
                    this.clear_entity(&id);
                }
            });
        });
        self.timers.update_value(|timers| {
            timers.insert(entity, TimerSlot::Grace(timeout));
        });
    }

    /// Current phase of an entity; absence from the map is `Idle`.
    fn phase_of(&self, entity: &str) -> WritePhase {
        self.ctx
            .phases
            .with_untracked(|m| m.get(entity).cloned())
            .unwrap_or_default()
    }

    fn set_phase(&self, entity: &str, phase: WritePhase) {
        self.ctx.phases.update(|m| {
            m.insert(entity.to_string(), phase);
        });
    }

    fn clear_phase(&self, entity: &str) {
        self.ctx.phases.update(|m| {
            m.remove(entity);
        });
    }

    fn drop_timer(&self, entity: &str) {
        self.timers.update_value(|timers| {
            timers.remove(entity);
        });
    }

    fn clear_entity(&self, entity: &str) {
        self.clear_phase(entity);
        self.drop_timer(entity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_item(id: &str, days: Option<i32>, date_added: Option<&str>) -> FridgeItem {
        FridgeItem {
            id: id.to_string(),
            name: Some(id.to_string()),
            quantity: 1,
            date_added: date_added.map(str::to_string),
            use_by: None,
            days_until_expiration: days,
            out_of_date: None,
        }
    }

    fn expiry_watch(prior: Option<i32>) -> PendingWatch {
        PendingWatch::new(
            "a".to_string(),
            DerivedField::DaysUntilExpiration,
            DerivedValue::Days(prior),
            0,
        )
    }

    #[test]
    fn test_confirmed_without_field_settles_directly() {
        let phase = WritePhase::Saving.confirmed(None);
        assert_eq!(phase, WritePhase::Settled);
    }

    #[test]
    fn test_confirmed_with_field_awaits_derivation() {
        let phase = WritePhase::Saving.confirmed(Some(expiry_watch(Some(5))));
        assert!(matches!(phase, WritePhase::AwaitingDerivation(_)));
    }

    #[test]
    fn test_settles_at_first_differing_poll_and_never_earlier() {
        let mut phase = WritePhase::Saving.confirmed(Some(expiry_watch(Some(5))));

        // Unchanged reads keep waiting.
        let unchanged = vec![make_item("a", Some(5), None)];
        for _ in 0..3 {
            phase = phase.polled(Some(unchanged.as_slice()));
            assert!(matches!(phase, WritePhase::AwaitingDerivation(_)));
        }

        let changed = vec![make_item("a", Some(1), None)];
        assert_eq!(phase.polled(Some(changed.as_slice())), WritePhase::Settled);
    }

    #[test]
    fn test_create_watch_settles_when_field_first_appears() {
        // A create's prior is the absent value.
        let watch = PendingWatch::new(
            "new".to_string(),
            DerivedField::DateAdded,
            DerivedValue::Stamp(None),
            0,
        );
        let mut phase = WritePhase::Saving.confirmed(Some(watch));

        let not_yet = vec![make_item("new", None, None)];
        phase = phase.polled(Some(not_yet.as_slice()));
        assert!(matches!(phase, WritePhase::AwaitingDerivation(_)));

        let stamped = vec![make_item("new", None, Some("2026-08-05"))];
        assert_eq!(phase.polled(Some(stamped.as_slice())), WritePhase::Settled);
    }

    #[test]
    fn test_deadline_expires_after_budget() {
        let mut phase = WritePhase::Saving.confirmed(Some(expiry_watch(Some(5))));
        let unchanged = vec![make_item("a", Some(5), None)];

        for tick in 1..DEADLINE_TICKS {
            phase = phase.polled(Some(unchanged.as_slice()));
            assert!(
                matches!(phase, WritePhase::AwaitingDerivation(_)),
                "expired early at tick {tick}"
            );
        }
        phase = phase.polled(Some(unchanged.as_slice()));
        assert_eq!(phase, WritePhase::TimedOut);

        // No further polling effect after the deadline.
        assert_eq!(phase.polled(Some(unchanged.as_slice())), WritePhase::TimedOut);
    }

    #[test]
    fn test_change_on_the_deadline_tick_still_settles() {
        let mut phase = WritePhase::Saving.confirmed(Some(expiry_watch(Some(5))));
        let unchanged = vec![make_item("a", Some(5), None)];
        for _ in 1..DEADLINE_TICKS {
            phase = phase.polled(Some(unchanged.as_slice()));
        }
        let changed = vec![make_item("a", Some(0), None)];
        assert_eq!(phase.polled(Some(changed.as_slice())), WritePhase::Settled);
    }

    #[test]
    fn test_failed_reads_keep_waiting_but_burn_budget() {
        let mut phase = WritePhase::Saving.confirmed(Some(expiry_watch(Some(5))));
        for _ in 1..DEADLINE_TICKS {
            phase = phase.polled(None);
            assert!(matches!(phase, WritePhase::AwaitingDerivation(_)));
        }
        assert_eq!(phase.polled(None), WritePhase::TimedOut);
    }

    #[test]
    fn test_entity_vanishing_counts_as_change() {
        // Deleting remotely moves the field off its concrete prior value.
        let phase = WritePhase::Saving.confirmed(Some(expiry_watch(Some(5))));
        let gone: Vec<FridgeItem> = Vec::new();
        assert_eq!(phase.polled(Some(gone.as_slice())), WritePhase::Settled);
    }

    #[test]
    fn test_capture_of_absent_entity_is_absent_value() {
        assert_eq!(
            DerivedField::DaysUntilExpiration.capture(None),
            DerivedValue::Days(None)
        );
        assert_eq!(DerivedField::DateAdded.capture(None), DerivedValue::Stamp(None));
    }
}
