use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use super::errors::PetError;

/// Upper bound for every stat.
pub const MAX_STAT: u32 = 100;
/// Value every stat starts at when a pet is adopted.
pub const INITIAL_STAT: u32 = 50;
/// Stats strictly below this value trigger hungry/tired/bored warnings.
pub const NEED_THRESHOLD: u32 = 50;
/// Amount each stat decays per `update_stats` call.
pub const DECAY_RATE: u32 = 1;
/// Simulated length of a sleep action.
pub const SLEEP_DURATION: Duration = Duration::from_secs(3);
/// Simulated pause between two free-roam events.
pub const FREE_ROAM_EVENT_GAP: Duration = Duration::from_secs(2);
pub const MIN_FREE_ROAM_MINUTES: u32 = 1;
pub const MAX_FREE_ROAM_MINUTES: u32 = 30;
/// Free roaming produces roughly one event per this many minutes.
pub const MINUTES_PER_EVENT: u32 = 5;

/// Species of an adopted pet. Only affects item compatibility and art.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PetType {
    Dog,
    Cat,
    Bird,
    Rabbit,
    Fish,
}

impl PetType {
    pub const ALL: [PetType; 5] = [
        PetType::Dog,
        PetType::Cat,
        PetType::Bird,
        PetType::Rabbit,
        PetType::Fish,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PetType::Dog => "Dog",
            PetType::Cat => "Cat",
            PetType::Bird => "Bird",
            PetType::Rabbit => "Rabbit",
            PetType::Fish => "Fish",
        }
    }
}

impl fmt::Display for PetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The three independently tracked needs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PetStat {
    Hunger,
    Sleep,
    Fun,
}

impl PetStat {
    /// Fixed priority order used when deciding the cause of death.
    pub const PRIORITY: [PetStat; 3] = [PetStat::Hunger, PetStat::Sleep, PetStat::Fun];

    /// Word used in death messages.
    pub fn death_cause(self) -> &'static str {
        match self {
            PetStat::Hunger => "hunger",
            PetStat::Sleep => "exhaustion",
            PetStat::Fun => "depression",
        }
    }
}

impl fmt::Display for PetStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PetStat::Hunger => "Hunger",
            PetStat::Sleep => "Sleep",
            PetStat::Fun => "Fun",
        };
        f.write_str(name)
    }
}

/// Menu category of an item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    Food,
    Toy,
    SleepAid,
}

/// Immutable catalog entry. Items are shared read-only data, never owned by a pet.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Item {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub compatible_with: &'static [PetType],
    pub affected_stat: PetStat,
    /// Stat points restored, clamped at [`MAX_STAT`].
    pub effect_amount: u32,
    /// Simulated time the activity takes.
    #[serde(with = "duration_secs")]
    pub duration: Duration,
}

impl Item {
    pub fn is_compatible(&self, pet_type: PetType) -> bool {
        self.compatible_with.contains(&pet_type)
    }

    /// Check the catalog invariants: positive effect and at least one compatible pet.
    pub fn validate(&self) -> Result<(), PetError> {
        if self.effect_amount == 0 {
            return Err(PetError::InvalidItem(format!(
                "{} has no effect",
                self.name
            )));
        }
        if self.compatible_with.is_empty() {
            return Err(PetError::InvalidItem(format!(
                "{} is not compatible with any pet",
                self.name
            )));
        }
        Ok(())
    }
}

mod duration_secs {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(d.as_secs_f64())
    }
}

/// Snapshot of a pet's three stats.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stats {
    pub hunger: u32,
    pub sleep: u32,
    pub fun: u32,
}

impl Stats {
    pub fn new(initial: u32) -> Self {
        let v = initial.min(MAX_STAT);
        Self {
            hunger: v,
            sleep: v,
            fun: v,
        }
    }

    pub fn get(&self, stat: PetStat) -> u32 {
        match stat {
            PetStat::Hunger => self.hunger,
            PetStat::Sleep => self.sleep,
            PetStat::Fun => self.fun,
        }
    }

    pub fn get_mut(&mut self, stat: PetStat) -> &mut u32 {
        match stat {
            PetStat::Hunger => &mut self.hunger,
            PetStat::Sleep => &mut self.sleep,
            PetStat::Fun => &mut self.fun,
        }
    }

    /// Raise a stat, clamped at [`MAX_STAT`]. Returns the new value.
    pub fn restore(&mut self, stat: PetStat, amount: u32) -> u32 {
        let slot = self.get_mut(stat);
        *slot = slot.saturating_add(amount).min(MAX_STAT);
        *slot
    }

    /// Decay every stat by `amount`, floored at zero.
    pub fn decay(&mut self, amount: u32) {
        for stat in PetStat::PRIORITY {
            let slot = self.get_mut(stat);
            *slot = slot.saturating_sub(amount);
        }
    }

    /// First depleted stat in priority order (hunger, sleep, fun).
    pub fn depleted(&self) -> Option<PetStat> {
        PetStat::PRIORITY
            .into_iter()
            .find(|stat| self.get(*stat) == 0)
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self::new(INITIAL_STAT)
    }
}

/// Identifier handed out by a [`crate::session::Session`] on adoption.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PetId(pub u32);

impl fmt::Display for PetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Validated free-roam duration in minutes (1-30).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Minutes(u32);

impl Minutes {
    pub fn new(minutes: u32) -> Result<Self, PetError> {
        if (MIN_FREE_ROAM_MINUTES..=MAX_FREE_ROAM_MINUTES).contains(&minutes) {
            Ok(Self(minutes))
        } else {
            Err(PetError::InvalidMinutes(minutes))
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Exclusive upper bound of the free-roam event count: `max(2, minutes / 5)`.
    pub fn event_bound(self) -> u32 {
        (self.0 / MINUTES_PER_EVENT).max(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BAD: Item = Item {
        name: "Nothing",
        item_type: ItemType::Toy,
        compatible_with: &[],
        affected_stat: PetStat::Fun,
        effect_amount: 5,
        duration: Duration::ZERO,
    };

    #[test]
    fn restore_clamps_at_max() {
        let mut stats = Stats::new(90);
        assert_eq!(stats.restore(PetStat::Hunger, 30), MAX_STAT);
        assert_eq!(stats.restore(PetStat::Fun, 5), 95);
        assert_eq!(stats.sleep, 90);
    }

    #[test]
    fn decay_floors_at_zero() {
        let mut stats = Stats::new(1);
        stats.decay(DECAY_RATE);
        stats.decay(DECAY_RATE);
        assert_eq!(stats, Stats::new(0));
    }

    #[test]
    fn depleted_follows_priority() {
        let mut stats = Stats::new(10);
        stats.fun = 0;
        stats.sleep = 0;
        assert_eq!(stats.depleted(), Some(PetStat::Sleep));
        stats.hunger = 0;
        assert_eq!(stats.depleted(), Some(PetStat::Hunger));
    }

    #[test]
    fn minutes_window() {
        assert_eq!(Minutes::new(0), Err(PetError::InvalidMinutes(0)));
        assert_eq!(Minutes::new(31), Err(PetError::InvalidMinutes(31)));
        assert_eq!(Minutes::new(1).map(Minutes::event_bound), Ok(2));
        assert_eq!(Minutes::new(30).map(Minutes::event_bound), Ok(6));
    }

    #[test]
    fn item_validation() {
        assert!(BAD.validate().is_err());
        let zero = Item {
            compatible_with: &[PetType::Cat],
            effect_amount: 0,
            ..BAD
        };
        assert!(zero.validate().is_err());
        let ok = Item {
            compatible_with: &[PetType::Cat],
            ..BAD
        };
        assert!(ok.validate().is_ok());
    }
}
