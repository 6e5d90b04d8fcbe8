use crate::engine::events::maybe_random_event;
use crate::engine::output::Output;
use crate::engine::rng::RandomSource;
use crate::player::Player;
use crate::world::{Direction, World};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    NoExit,
    Blocked,
    Moved { to: usize },
}

/// Follows the exit in `direction` from the current room.
///
/// A live monster blocks every exit until it is defeated. Arriving somewhere
/// may trigger a random event.
pub fn try_handle_movement(
    out: &mut Output,
    current_room: &mut usize,
    world: &World,
    player: &mut Player,
    direction: Direction,
    rng: &mut dyn RandomSource,
) -> MoveOutcome {
    let Some(room) = world.room(*current_room) else {
        out.say("You are nowhere; there is no way to go.");
        return MoveOutcome::NoExit;
    };

    let Some(&target) = room.exits.get(&direction) else {
        out.say("You can't go that way.");
        return MoveOutcome::NoExit;
    };

    if let Some(monster) = room.live_monster() {
        out.say(format!("{} blocks your way! You must fight!", monster.name));
        return MoveOutcome::Blocked;
    }

    if world.room(target).is_none() {
        out.say(format!(
            "You try to go {}, but something feels wrong (room not found).",
            direction
        ));
        return MoveOutcome::NoExit;
    }

    out.say(format!("You head {}...", direction));
    tracing::debug!(from = *current_room, to = target, %direction, "player moved");
    *current_room = target;

    maybe_random_event(
        out,
        player,
        &world.events,
        &world.items,
        world.rules.random_event_chance_percent,
        rng,
    );

    MoveOutcome::Moved { to: target }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::rng::{ScriptedRolls, WeightedTable};
    use crate::world::{ItemRegistry, Monster, PlayerTemplate, RandomEvent, Room, Rules};

    fn two_rooms(guarded: bool) -> World {
        let mut hall = Room::new("hall", "A hall.");
        hall.exits.insert(Direction::North, 1);
        if guarded {
            hall.monster = Some(Monster {
                name: "Forest Wolf".to_string(),
                health: 30,
                attack: 15,
                defense: 5,
                reward: 25,
            });
        }
        let mut yard = Room::new("yard", "A yard.");
        yard.exits.insert(Direction::South, 0);

        World {
            name: "Test".to_string(),
            intro: String::new(),
            start_room: 0,
            rooms: vec![hall, yard],
            items: ItemRegistry::new(),
            loot: WeightedTable::new(),
            events: WeightedTable::uniform([RandomEvent {
                text: "Merchant".to_string(),
                grant: Some("health_potion".to_string()),
            }]),
            rules: Rules::default(),
            player: PlayerTemplate::default(),
        }
    }

    #[test]
    fn moves_through_open_exit() {
        let world = two_rooms(false);
        let mut player = Player::new("Hero", 100, 20, 10);
        let mut current = 0;
        let mut rng = ScriptedRolls::new([99]);

        let outcome = try_handle_movement(
            &mut Output::new(),
            &mut current,
            &world,
            &mut player,
            Direction::North,
            &mut rng,
        );
        assert_eq!(outcome, MoveOutcome::Moved { to: 1 });
        assert_eq!(current, 1);
        assert!(player.inventory.is_empty());
    }

    #[test]
    fn missing_exit_stays_put() {
        let world = two_rooms(false);
        let mut player = Player::new("Hero", 100, 20, 10);
        let mut current = 0;
        let mut out = Output::new();

        let outcome = try_handle_movement(
            &mut out,
            &mut current,
            &world,
            &mut player,
            Direction::West,
            &mut ScriptedRolls::new([]),
        );
        assert_eq!(outcome, MoveOutcome::NoExit);
        assert_eq!(current, 0);
        assert!(out.mentions("can't go that way"));
    }

    #[test]
    fn live_monster_blocks_exit() {
        let world = two_rooms(true);
        let mut player = Player::new("Hero", 100, 20, 10);
        let mut current = 0;
        let mut out = Output::new();

        let outcome = try_handle_movement(
            &mut out,
            &mut current,
            &world,
            &mut player,
            Direction::North,
            &mut ScriptedRolls::new([0, 0]),
        );
        assert_eq!(outcome, MoveOutcome::Blocked);
        assert_eq!(current, 0);
        assert!(out.mentions("Forest Wolf blocks your way"));
        assert!(player.inventory.is_empty());
    }

    #[test]
    fn defeated_monster_no_longer_blocks() {
        let mut world = two_rooms(true);
        if let Some(m) = world.rooms[0].monster.as_mut() {
            m.health = -4;
        }
        let mut player = Player::new("Hero", 100, 20, 10);
        let mut current = 0;

        let outcome = try_handle_movement(
            &mut Output::new(),
            &mut current,
            &world,
            &mut player,
            Direction::North,
            &mut ScriptedRolls::new([99]),
        );
        assert_eq!(outcome, MoveOutcome::Moved { to: 1 });
    }

    #[test]
    fn successful_move_can_trigger_event() {
        let world = two_rooms(false);
        let mut player = Player::new("Hero", 100, 20, 10);
        let mut current = 0;
        let mut out = Output::new();

        try_handle_movement(
            &mut out,
            &mut current,
            &world,
            &mut player,
            Direction::North,
            &mut ScriptedRolls::new([19, 0]),
        );
        assert!(out.mentions("Merchant"));
        assert_eq!(player.inventory, vec!["health_potion"]);
    }
}
