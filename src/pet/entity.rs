//! The pet entity: stats, derived predicates and the actions a keeper can take.
//!
//! Actions that take simulated time are async and receive the suspension
//! capability from the caller. None of them return an error: rejections are
//! reported through a status notification, unexpected failures are logged and
//! swallowed, and the returned [`ActivityOutcome`] says which of those happened.

use log::{debug, info, warn};
use rand::Rng;
use std::future::Future;
use std::sync::Arc;

use super::activity::{ActivityOutcome, Suspend, TimedOperation};
use super::errors::{ActivityError, PetError};
use super::notify::{NotificationSink, Notifier};
use super::types::{
    Item, Minutes, PetStat, PetType, Stats, DECAY_RATE, FREE_ROAM_EVENT_GAP, MAX_STAT,
    NEED_THRESHOLD, SLEEP_DURATION,
};
use crate::logutil::escape_log;

/// Things a pet may get up to while left alone: (what it did, how it seems).
const FREE_ROAM_EVENTS: [(&str, &str); 7] = [
    ("found a sunny spot to rest in", "They seem very relaxed!"),
    ("played with a butterfly", "They're having fun!"),
    ("took a short nap", "They look refreshed!"),
    ("explored the surroundings", "They discovered new things!"),
    ("practiced some tricks", "They're getting better at it!"),
    ("made a new friend", "They look very happy!"),
    ("found something interesting", "They seem excited!"),
];

/// Pre-rolled free-roam events, so the random source is not held across suspends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreeRoamPlan {
    events: Vec<usize>,
}

impl FreeRoamPlan {
    /// Roll between 1 and `max(2, minutes / 5)` (exclusive) events.
    pub fn roll<R: Rng + ?Sized>(minutes: Minutes, rng: &mut R) -> Self {
        let count = rng.gen_range(1..minutes.event_bound());
        let events = (0..count)
            .map(|_| rng.gen_range(0..FREE_ROAM_EVENTS.len()))
            .collect();
        Self { events }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// An adopted pet.
#[derive(Debug)]
pub struct Pet {
    name: String,
    pet_type: PetType,
    stats: Stats,
    death_cause: Option<PetStat>,
    notifier: Notifier,
}

impl Pet {
    /// Adopt a new pet. The name is trimmed and must not be empty.
    pub fn adopt(name: &str, pet_type: PetType) -> Result<Self, PetError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PetError::InvalidName);
        }
        info!("Adopted {} the {}", escape_log(name), pet_type);
        Ok(Self {
            name: name.to_string(),
            pet_type,
            stats: Stats::default(),
            death_cause: None,
            notifier: Notifier::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pet_type(&self) -> PetType {
        self.pet_type
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn stat(&self, stat: PetStat) -> u32 {
        self.stats.get(stat)
    }

    pub fn hunger(&self) -> u32 {
        self.stats.hunger
    }

    pub fn sleep(&self) -> u32 {
        self.stats.sleep
    }

    pub fn fun(&self) -> u32 {
        self.stats.fun
    }

    pub fn is_hungry(&self) -> bool {
        self.stats.hunger < NEED_THRESHOLD
    }

    pub fn is_tired(&self) -> bool {
        self.stats.sleep < NEED_THRESHOLD
    }

    pub fn is_bored(&self) -> bool {
        self.stats.fun < NEED_THRESHOLD
    }

    pub fn is_dead(&self) -> bool {
        self.stats.depleted().is_some()
    }

    /// Stat that killed the pet, once death has been reported.
    pub fn death_cause(&self) -> Option<PetStat> {
        self.death_cause
    }

    /// Register a listener; listeners are called in registration order.
    pub fn subscribe(&mut self, sink: Arc<dyn NotificationSink>) {
        self.notifier.subscribe(sink);
    }

    pub fn unsubscribe(&mut self, sink: &Arc<dyn NotificationSink>) -> bool {
        self.notifier.unsubscribe(sink)
    }

    /// Multi-line text glyph for the pet's species.
    pub fn art(&self) -> &'static str {
        super::art::art_for(self.pet_type)
    }

    /// One-line stat summary for menus.
    pub fn status_line(&self) -> String {
        format!(
            "{} the {} - Hunger: {}% | Sleep: {}% | Fun: {}%",
            self.name, self.pet_type, self.stats.hunger, self.stats.sleep, self.stats.fun
        )
    }

    fn rejection_if_dead(&self) -> Option<String> {
        self.is_dead()
            .then(|| format!("{} is no longer with us.", self.name))
    }

    /// Use an item on the pet.
    ///
    /// Rejected (one status notification, no change) when the item is not meant
    /// for this species or the targeted stat is already full. Otherwise announces
    /// the activity, waits `item.duration`, raises the stat by
    /// `item.effect_amount` clamped to 100 and reports the new value.
    pub async fn use_item(&mut self, item: &Item, suspender: &dyn Suspend) -> ActivityOutcome {
        if let Err(e) = item.validate() {
            warn!("Refusing to use malformed item: {}", e);
            return ActivityOutcome::Aborted;
        }

        let name = self.name.clone();
        let stat = item.affected_stat;
        let rejection = self.rejection_if_dead().or_else(|| {
            if !item.is_compatible(self.pet_type) {
                Some(format!("{} can't use {}!", name, item.name))
            } else if self.stats.get(stat) >= MAX_STAT {
                Some(match stat {
                    PetStat::Hunger => format!("{} is not hungry right now!", name),
                    PetStat::Fun => format!("{} doesn't want to play right now!", name),
                    PetStat::Sleep => format!("{} is not tired right now!", name),
                })
            } else {
                None
            }
        });
        let start = match stat {
            PetStat::Hunger => format!("{} is eating {}...", name, item.name),
            PetStat::Fun => format!("{} is playing with {}...", name, item.name),
            PetStat::Sleep => format!("{} is getting cozy with {}...", name, item.name),
        };
        let amount = item.effect_amount;
        let op = TimedOperation::new(item.duration, move |stats: &mut Stats| {
            let value = stats.restore(stat, amount);
            Ok(match stat {
                PetStat::Hunger => format!("{} enjoyed their meal! Hunger is now at {}%", name, value),
                PetStat::Fun => format!("{} had fun playing! Fun level is now at {}%", name, value),
                PetStat::Sleep => {
                    format!("{} feels relaxed! Energy level is now at {}%", name, value)
                }
            })
        })
        .reject_if(rejection)
        .announce(start);

        debug!("{} uses {}", escape_log(&self.name), item.name);
        self.finish(op, suspender).await
    }

    /// Put the pet to sleep for a fixed simulated time. Stats are left alone.
    pub async fn sleep_action(&mut self, suspender: &dyn Suspend) -> ActivityOutcome {
        let name = self.name.clone();
        let op = TimedOperation::new(SLEEP_DURATION, move |_stats: &mut Stats| {
            Ok(format!("{} had a good sleep!", name))
        })
        .reject_if(self.rejection_if_dead())
        .announce(format!("{} is going to sleep...", self.name));
        self.finish(op, suspender).await
    }

    /// Let the pet spend `minutes` on its own. Events are rolled from `rng`
    /// up front; the returned future only needs the suspender.
    pub fn take_time<'a, R: Rng + ?Sized>(
        &'a mut self,
        minutes: Minutes,
        rng: &mut R,
        suspender: &'a dyn Suspend,
    ) -> impl Future<Output = ActivityOutcome> + Send + 'a {
        let plan = FreeRoamPlan::roll(minutes, rng);
        debug!(
            "{} roams for {} minutes ({} events)",
            escape_log(&self.name),
            minutes.get(),
            plan.len()
        );
        self.free_roam(plan, suspender)
    }

    /// Run a pre-rolled free-roam plan.
    pub async fn free_roam(&mut self, plan: FreeRoamPlan, suspender: &dyn Suspend) -> ActivityOutcome {
        if let Some(reason) = self.rejection_if_dead() {
            self.notifier.status(&reason);
            return ActivityOutcome::Rejected;
        }
        self.notifier.activity(&format!(
            "{} is going to spend some time on their own...",
            self.name
        ));
        // Each event is reported as a pair, then the pet is left alone for a while.
        for idx in plan.events {
            let (activity, flavour) = FREE_ROAM_EVENTS[idx];
            let message = format!("{} {}! {}", self.name, activity, flavour);
            self.notifier.activity(&message);
            self.notifier.status(&message);
            if let Err(e) = suspender.suspend(FREE_ROAM_EVENT_GAP).await {
                return self.aborted(e);
            }
        }
        self.notifier
            .status(&format!("{} finished spending time on their own!", self.name));
        ActivityOutcome::Completed
    }

    /// Apply one tick of passive decay.
    ///
    /// Every stat drops by one (floored at zero); a warning is emitted for each
    /// stat below the need threshold. The first time any stat reaches zero the
    /// death is announced and its cause returned. A dead pet no longer decays.
    pub fn update_stats(&mut self) -> Option<PetStat> {
        if self.death_cause.is_some() {
            return None;
        }
        self.stats.decay(DECAY_RATE);

        if self.is_hungry() {
            self.notifier.status(&format!(
                "{} is getting hungry! Current hunger: {}%",
                self.name, self.stats.hunger
            ));
        }
        if self.is_tired() {
            self.notifier.status(&format!(
                "{} is getting tired! Current energy: {}%",
                self.name, self.stats.sleep
            ));
        }
        if self.is_bored() {
            self.notifier.status(&format!(
                "{} is getting bored! Current fun: {}%",
                self.name, self.stats.fun
            ));
        }

        let cause = self.stats.depleted()?;
        self.death_cause = Some(cause);
        let message = format!("{} has died from {}...", self.name, cause.death_cause());
        info!("{}", escape_log(&message));
        self.notifier.status(&message);
        self.notifier.death(&message);
        Some(cause)
    }

    async fn finish(&mut self, op: TimedOperation<'_>, suspender: &dyn Suspend) -> ActivityOutcome {
        match op.run(&mut self.stats, &self.notifier, suspender).await {
            Ok(outcome) => outcome,
            Err(e) => self.aborted(e),
        }
    }

    fn aborted(&self, error: ActivityError) -> ActivityOutcome {
        match error {
            ActivityError::Cancelled => {
                debug!("{}: activity cancelled", escape_log(&self.name));
                ActivityOutcome::Aborted
            }
            e => {
                warn!("{}: activity failed: {}", escape_log(&self.name), e);
                ActivityOutcome::Aborted
            }
        }
    }
}
