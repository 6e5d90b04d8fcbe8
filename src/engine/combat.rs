use crate::engine::output::Output;
use crate::engine::rng::{RandomSource, WeightedTable};
use crate::player::Player;
use crate::world::{ItemRegistry, Room, Rules};

/// Result of one `attack` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttackOutcome {
    /// No live monster in the room.
    NoTarget,
    /// The player's blow finished the monster. It does not strike back.
    MonsterDefeated {
        dealt: i32,
        reward: u32,
        loot: Option<String>,
    },
    /// The monster survived and struck back.
    Exchanged { dealt: i32, taken: i32 },
    /// The counterattack killed the player.
    PlayerDefeated { dealt: i32, taken: i32 },
}

/// Damage from one blow: attack plus roll minus defense, never negative.
pub fn strike_damage(attack: i32, roll: u32, defense: i32) -> i32 {
    let roll = i32::try_from(roll).unwrap_or(i32::MAX);
    attack.saturating_add(roll).saturating_sub(defense).max(0)
}

/// One combat round against the live monster in `room`.
///
/// The player always strikes first; the monster only answers if it survives.
pub fn handle_attack(
    out: &mut Output,
    room: &mut Room,
    player: &mut Player,
    loot: &WeightedTable<String>,
    items: &ItemRegistry,
    rules: &Rules,
    rng: &mut dyn RandomSource,
) -> AttackOutcome {
    let Some(monster) = room.live_monster_mut() else {
        out.say("There is nothing here to attack.");
        return AttackOutcome::NoTarget;
    };

    let dealt = strike_damage(
        player.attack,
        rng.roll(rules.player_roll_sides),
        monster.defense,
    );
    monster.health -= dealt;
    out.say(format!("You attack {} and deal {} damage!", monster.name, dealt));
    tracing::debug!(
        monster = %monster.name,
        dealt,
        monster_health = monster.health,
        "player strikes"
    );

    if monster.is_defeated() {
        let reward = monster.reward;
        out.event(format!("You defeated {}!", monster.name));
        player.gain_experience(reward);
        out.event(format!("+{} experience!", reward));
        tracing::info!(monster = %monster.name, reward, "monster defeated");

        let loot = roll_loot(loot, rules, rng);
        if let Some(id) = &loot {
            player.inventory.push(id.clone());
            out.event(format!("You found: {}", items.name_of(id)));
        }

        return AttackOutcome::MonsterDefeated {
            dealt,
            reward,
            loot,
        };
    }

    let taken = strike_damage(
        monster.attack,
        rng.roll(rules.monster_roll_sides),
        player.defense,
    );
    out.say(format!("{} attacks you and deals {} damage!", monster.name, taken));
    tracing::debug!(monster = %monster.name, taken, "monster strikes back");

    if player.take_damage(taken) {
        out.event("You have died! Game over.");
        tracing::info!(monster = %monster.name, "player defeated");
        AttackOutcome::PlayerDefeated { dealt, taken }
    } else {
        AttackOutcome::Exchanged { dealt, taken }
    }
}

fn roll_loot(
    loot: &WeightedTable<String>,
    rules: &Rules,
    rng: &mut dyn RandomSource,
) -> Option<String> {
    if !rng.one_in(rules.loot_chance_one_in) {
        return None;
    }
    loot.pick(rng).cloned()
}
