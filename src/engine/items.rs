use crate::engine::output::Output;
use crate::player::Player;
use crate::world::{ItemEffect, ItemRegistry, Room};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UseOutcome {
    NotCarried,
    /// The item exists but has no use effect; it stays in the inventory.
    Unusable(String),
    Used(String),
}

/// Index of the first inventory entry whose display name or id contains
/// `query`, ignoring case.
pub fn find_in_inventory(player: &Player, items: &ItemRegistry, query: &str) -> Option<usize> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return None;
    }

    player.inventory.iter().position(|id| {
        items.name_of(id).to_lowercase().contains(&query) || id.to_lowercase().contains(&query)
    })
}

pub fn handle_inventory(out: &mut Output, player: &Player, items: &ItemRegistry) {
    out.say("INVENTORY:");
    if player.inventory.is_empty() {
        out.say("  (empty)");
        return;
    }

    for (i, id) in player.inventory.iter().enumerate() {
        out.say(format!("  {}. {}", i + 1, items.name_of(id)));
    }
}

/// Moves the room's treasure into the inventory. Returns true if something was taken.
pub fn handle_take(
    out: &mut Output,
    room: &mut Room,
    player: &mut Player,
    items: &ItemRegistry,
) -> bool {
    let Some(id) = room.treasure.take() else {
        out.say("There is nothing valuable here.");
        return false;
    };

    out.say(format!("You take: {}", items.name_of(&id)));

    if let Some(effect) = items.get(&id).and_then(|d| d.on_pickup) {
        apply_effect(out, player, effect);
    }

    tracing::debug!(item = %id, room = %room.id, "treasure taken");
    player.inventory.push(id);
    true
}

/// Uses the first carried item matching `query`. Only items with a use
/// effect are consumed, one entry at a time.
pub fn handle_use(
    out: &mut Output,
    player: &mut Player,
    items: &ItemRegistry,
    query: &str,
) -> UseOutcome {
    let Some(index) = find_in_inventory(player, items, query) else {
        out.say("You don't have that item.");
        return UseOutcome::NotCarried;
    };

    let id = player.inventory[index].clone();
    let name = items.name_of(&id).to_string();
    out.say(format!("You use: {}", name));

    let Some(effect) = items.get(&id).and_then(|d| d.on_use) else {
        out.say("You don't know how to use this.");
        return UseOutcome::Unusable(id);
    };

    apply_effect(out, player, effect);
    player.inventory.remove(index);
    tracing::debug!(item = %id, "item consumed");
    UseOutcome::Used(id)
}

pub fn apply_effect(out: &mut Output, player: &mut Player, effect: ItemEffect) {
    match effect {
        ItemEffect::Heal { amount } => {
            let restored = player.heal(amount);
            out.event(format!("You restore {} health.", restored));
        }
        ItemEffect::BoostAttack { amount } => {
            player.attack += amount;
            out.event(format!("Your attack increases by {}!", amount));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::ItemDef;

    fn registry() -> ItemRegistry {
        let mut items = ItemRegistry::new();
        for (id, name, on_use, on_pickup) in [
            ("health_potion", "Health Potion", Some(ItemEffect::Heal { amount: 30 }), None),
            (
                "strength_potion",
                "Strength Potion",
                Some(ItemEffect::BoostAttack { amount: 5 }),
                None,
            ),
            ("bread", "Bread", Some(ItemEffect::Heal { amount: 10 }), None),
            ("gold", "Gold", None, None),
            (
                "golden_sword",
                "Golden Sword (+10 attack)",
                None,
                Some(ItemEffect::BoostAttack { amount: 10 }),
            ),
        ] {
            items.insert(ItemDef {
                id: id.to_string(),
                name: name.to_string(),
                on_use,
                on_pickup,
            });
        }
        items
    }

    fn player_with(inventory: &[&str]) -> Player {
        let mut player = Player::new("Hero", 100, 20, 10);
        player.inventory = inventory.iter().map(|s| s.to_string()).collect();
        player
    }

    #[test]
    fn using_consumes_exactly_the_first_match() {
        let items = registry();
        let mut player = player_with(&["gold", "bread", "health_potion", "bread"]);
        player.set_health(50);

        let outcome = handle_use(&mut Output::new(), &mut player, &items, "BREAD");
        assert_eq!(outcome, UseOutcome::Used("bread".to_string()));
        assert_eq!(player.health(), 60);
        assert_eq!(player.inventory, vec!["gold", "health_potion", "bread"]);
    }

    #[test]
    fn partial_names_match() {
        let items = registry();
        let mut player = player_with(&["strength_potion"]);

        handle_use(&mut Output::new(), &mut player, &items, "streng");
        assert_eq!(player.attack, 25);
        assert!(player.inventory.is_empty());
    }

    #[test]
    fn healing_is_capped() {
        let items = registry();
        let mut player = player_with(&["health_potion"]);
        player.set_health(95);

        let mut out = Output::new();
        handle_use(&mut out, &mut player, &items, "health potion");
        assert_eq!(player.health(), 100);
        assert!(out.mentions("restore 5 health"));
    }

    #[test]
    fn unusable_item_is_kept() {
        let items = registry();
        let mut player = player_with(&["gold"]);

        let mut out = Output::new();
        let outcome = handle_use(&mut out, &mut player, &items, "gold");
        assert_eq!(outcome, UseOutcome::Unusable("gold".to_string()));
        assert_eq!(player.inventory, vec!["gold"]);
        assert!(out.mentions("don't know how to use"));
    }

    #[test]
    fn missing_item_changes_nothing() {
        let items = registry();
        let mut player = player_with(&["bread"]);

        let outcome = handle_use(&mut Output::new(), &mut player, &items, "potion");
        assert_eq!(outcome, UseOutcome::NotCarried);
        assert_eq!(player.inventory, vec!["bread"]);
    }

    #[test]
    fn taking_clears_treasure_and_applies_pickup_effect() {
        let items = registry();
        let mut room = Room::new("vault", "Gold glitters.");
        room.treasure = Some("golden_sword".to_string());
        let mut player = player_with(&[]);

        assert!(handle_take(&mut Output::new(), &mut room, &mut player, &items));
        assert_eq!(player.attack, 30);
        assert_eq!(player.inventory, vec!["golden_sword"]);
        assert!(room.treasure.is_none());

        let mut out = Output::new();
        assert!(!handle_take(&mut out, &mut room, &mut player, &items));
        assert!(out.mentions("nothing valuable"));
        assert_eq!(player.attack, 30);
    }

    #[test]
    fn inventory_lists_in_order() {
        let items = registry();
        let player = player_with(&["bread", "gold"]);
        let mut out = Output::new();
        handle_inventory(&mut out, &player, &items);
        assert!(out.mentions("1. Bread"));
        assert!(out.mentions("2. Gold"));

        let mut out = Output::new();
        handle_inventory(&mut out, &player_with(&[]), &items);
        assert!(out.mentions("(empty)"));
    }
}
