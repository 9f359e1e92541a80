//! Static item catalog.
//!
//! The catalog is a fixed table; menus are built by filtering it by category or
//! affected stat and by the pet's species.

use std::time::Duration;

use super::types::{Item, ItemType, PetStat, PetType};

use PetType::{Bird, Cat, Dog, Fish, Rabbit};

const ITEMS: [Item; 16] = [
    // Food
    Item {
        name: "Kibble",
        item_type: ItemType::Food,
        compatible_with: &[Dog],
        affected_stat: PetStat::Hunger,
        effect_amount: 30,
        duration: Duration::from_secs(2),
    },
    Item {
        name: "Tuna Flakes",
        item_type: ItemType::Food,
        compatible_with: &[Cat],
        affected_stat: PetStat::Hunger,
        effect_amount: 30,
        duration: Duration::from_secs(2),
    },
    Item {
        name: "Chicken Treat",
        item_type: ItemType::Food,
        compatible_with: &[Dog, Cat],
        affected_stat: PetStat::Hunger,
        effect_amount: 15,
        duration: Duration::from_secs(1),
    },
    Item {
        name: "Birdseed Mix",
        item_type: ItemType::Food,
        compatible_with: &[Bird],
        affected_stat: PetStat::Hunger,
        effect_amount: 25,
        duration: Duration::from_secs(2),
    },
    Item {
        name: "Fresh Carrots",
        item_type: ItemType::Food,
        compatible_with: &[Rabbit],
        affected_stat: PetStat::Hunger,
        effect_amount: 25,
        duration: Duration::from_secs(2),
    },
    Item {
        name: "Fish Flakes",
        item_type: ItemType::Food,
        compatible_with: &[Fish],
        affected_stat: PetStat::Hunger,
        effect_amount: 20,
        duration: Duration::from_secs(1),
    },
    // Toys
    Item {
        name: "Squeaky Ball",
        item_type: ItemType::Toy,
        compatible_with: &[Dog],
        affected_stat: PetStat::Fun,
        effect_amount: 25,
        duration: Duration::from_secs(3),
    },
    Item {
        name: "Feather Wand",
        item_type: ItemType::Toy,
        compatible_with: &[Cat, Bird],
        affected_stat: PetStat::Fun,
        effect_amount: 25,
        duration: Duration::from_secs(3),
    },
    Item {
        name: "Laser Pointer",
        item_type: ItemType::Toy,
        compatible_with: &[Cat, Dog],
        affected_stat: PetStat::Fun,
        effect_amount: 20,
        duration: Duration::from_secs(2),
    },
    Item {
        name: "Chew Stick",
        item_type: ItemType::Toy,
        compatible_with: &[Rabbit, Dog],
        affected_stat: PetStat::Fun,
        effect_amount: 15,
        duration: Duration::from_secs(2),
    },
    Item {
        name: "Bubble Castle",
        item_type: ItemType::Toy,
        compatible_with: &[Fish],
        affected_stat: PetStat::Fun,
        effect_amount: 20,
        duration: Duration::from_secs(2),
    },
    // Sleep aids
    Item {
        name: "Cozy Blanket",
        item_type: ItemType::SleepAid,
        compatible_with: &[Dog, Cat, Rabbit],
        affected_stat: PetStat::Sleep,
        effect_amount: 35,
        duration: Duration::from_secs(4),
    },
    Item {
        name: "Cat Bed",
        item_type: ItemType::SleepAid,
        compatible_with: &[Cat],
        affected_stat: PetStat::Sleep,
        effect_amount: 40,
        duration: Duration::from_secs(4),
    },
    Item {
        name: "Cage Cover",
        item_type: ItemType::SleepAid,
        compatible_with: &[Bird],
        affected_stat: PetStat::Sleep,
        effect_amount: 35,
        duration: Duration::from_secs(3),
    },
    Item {
        name: "Hay Nest",
        item_type: ItemType::SleepAid,
        compatible_with: &[Rabbit],
        affected_stat: PetStat::Sleep,
        effect_amount: 40,
        duration: Duration::from_secs(4),
    },
    Item {
        name: "Night Light",
        item_type: ItemType::SleepAid,
        compatible_with: &[Fish],
        affected_stat: PetStat::Sleep,
        effect_amount: 30,
        duration: Duration::from_secs(3),
    },
];

/// Every item in the catalog.
pub fn all_items() -> &'static [Item] {
    &ITEMS
}

/// Menu filter applied on top of species compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemFilter {
    Category(ItemType),
    Stat(PetStat),
}

impl ItemFilter {
    pub fn matches(self, item: &Item) -> bool {
        match self {
            ItemFilter::Category(t) => item.item_type == t,
            ItemFilter::Stat(s) => item.affected_stat == s,
        }
    }
}

/// Items usable by `pet_type` that match `filter`, in catalog order.
pub fn items_for(pet_type: PetType, filter: ItemFilter) -> Vec<&'static Item> {
    all_items()
        .iter()
        .filter(|item| filter.matches(item) && item.is_compatible(pet_type))
        .collect()
}

/// Look up an item by name (case-insensitive).
pub fn find_item(name: &str) -> Option<&'static Item> {
    all_items()
        .iter()
        .find(|item| item.name.eq_ignore_ascii_case(name.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_items_are_valid() {
        for item in all_items() {
            assert!(item.validate().is_ok(), "{} failed validation", item.name);
        }
    }

    #[test]
    fn every_pet_has_food_toy_and_sleep_aid() {
        for pet_type in PetType::ALL {
            assert!(!items_for(pet_type, ItemFilter::Category(ItemType::Food)).is_empty());
            assert!(!items_for(pet_type, ItemFilter::Category(ItemType::Toy)).is_empty());
            assert!(!items_for(pet_type, ItemFilter::Stat(PetStat::Sleep)).is_empty());
        }
    }

    #[test]
    fn filter_respects_compatibility() {
        let cat_food = items_for(Cat, ItemFilter::Category(ItemType::Food));
        let names: Vec<_> = cat_food.iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["Tuna Flakes", "Chicken Treat"]);
    }

    #[test]
    fn find_item_ignores_case() {
        assert_eq!(find_item("  kibble ").map(|i| i.name), Some("Kibble"));
        assert!(find_item("caviar").is_none());
    }
}
