use crate::engine::output::Output;
use crate::engine::rng::{RandomSource, WeightedTable};
use crate::player::Player;
use crate::world::{ItemRegistry, RandomEvent};

/// Rolls for a random event after a successful move and fires it on a hit.
pub fn maybe_random_event<'a>(
    out: &mut Output,
    player: &mut Player,
    events: &'a WeightedTable<RandomEvent>,
    items: &ItemRegistry,
    chance_percent: u32,
    rng: &mut dyn RandomSource,
) -> Option<&'a RandomEvent> {
    if !rng.percent(chance_percent) {
        return None;
    }

    let event = events.pick(rng)?;
    out.event(event.text.clone());

    if let Some(id) = &event.grant {
        player.inventory.push(id.clone());
        out.event(format!("Added to inventory: {}", items.name_of(id)));
    }

    tracing::debug!(event = %event.text, "random event");
    Some(event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::rng::ScriptedRolls;

    fn events() -> WeightedTable<RandomEvent> {
        WeightedTable::uniform([
            RandomEvent {
                text: "You found some gold!".to_string(),
                grant: Some("gold".to_string()),
            },
            RandomEvent {
                text: "A cold wind chills you to the bone.".to_string(),
                grant: None,
            },
        ])
    }

    #[test]
    fn granting_event_adds_item() {
        let mut player = Player::new("Hero", 100, 20, 10);
        let mut rng = ScriptedRolls::new([10, 0]);
        let table = events();

        let fired = maybe_random_event(
            &mut Output::new(),
            &mut player,
            &table,
            &ItemRegistry::new(),
            20,
            &mut rng,
        );
        assert_eq!(fired.map(|e| e.text.as_str()), Some("You found some gold!"));
        assert_eq!(player.inventory, vec!["gold"]);
    }

    #[test]
    fn flavor_event_changes_nothing() {
        let mut player = Player::new("Hero", 100, 20, 10);
        let before = player.clone();
        let mut rng = ScriptedRolls::new([0, 1]);
        let table = events();

        let mut out = Output::new();
        let fired = maybe_random_event(
            &mut out,
            &mut player,
            &table,
            &ItemRegistry::new(),
            20,
            &mut rng,
        );
        assert!(fired.is_some());
        assert_eq!(player, before);
        assert!(out.mentions("cold wind"));
    }

    #[test]
    fn missed_chance_fires_nothing() {
        let mut player = Player::new("Hero", 100, 20, 10);
        let mut rng = ScriptedRolls::new([20]);
        let table = events();

        let mut out = Output::new();
        let fired = maybe_random_event(
            &mut out,
            &mut player,
            &table,
            &ItemRegistry::new(),
            20,
            &mut rng,
        );
        assert!(fired.is_none());
        assert!(out.is_empty());
        assert_eq!(rng.remaining(), 0);
    }
}
