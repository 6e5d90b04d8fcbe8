use crate::world::PlayerTemplate;

/// The single player character of a session.
///
/// Health is kept within `0..=max_health` by every mutator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    name: String,
    health: i32,
    max_health: i32,
    pub attack: i32,
    pub defense: i32,
    pub level: u32,
    pub experience: u32,
    /// Item ids in pickup order. Duplicates are allowed.
    pub inventory: Vec<String>,
}

impl Player {
    pub fn new(name: impl Into<String>, max_health: i32, attack: i32, defense: i32) -> Self {
        let max_health = max_health.max(1);
        Player {
            name: name.into(),
            health: max_health,
            max_health,
            attack: attack.max(0),
            defense: defense.max(0),
            level: 1,
            experience: 0,
            inventory: Vec::new(),
        }
    }

    pub fn from_template(template: &PlayerTemplate) -> Self {
        let mut player = Player::new(
            template.name.clone(),
            template.health,
            template.attack,
            template.defense,
        );
        player.inventory = template.inventory.clone();
        player
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Sets health, clamped into `0..=max_health`.
    pub fn set_health(&mut self, health: i32) {
        self.health = health.clamp(0, self.max_health);
    }

    /// Heals up to `amount` without passing max health. Returns the amount restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.health;
        self.set_health(self.health.saturating_add(amount.max(0)));
        self.health - before
    }

    /// Applies damage, never dropping below zero. Returns true if the player died.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.set_health(self.health.saturating_sub(amount.max(0)));
        !self.is_alive()
    }

    pub fn restore_full_health(&mut self) {
        self.health = self.max_health;
    }

    pub fn raise_max_health(&mut self, amount: i32) {
        self.max_health = self.max_health.saturating_add(amount).max(1);
        self.health = self.health.min(self.max_health);
    }

    pub fn gain_experience(&mut self, amount: u32) {
        self.experience = self.experience.saturating_add(amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_defaults() {
        let player = Player::from_template(&PlayerTemplate::default());
        assert_eq!(player.name(), "Hero");
        assert_eq!(player.health(), 100);
        assert_eq!(player.max_health(), 100);
        assert_eq!(player.attack, 20);
        assert_eq!(player.defense, 10);
        assert_eq!(player.level, 1);
        assert_eq!(player.experience, 0);
        assert_eq!(player.inventory, vec!["health_potion", "bread"]);
    }

    #[test]
    fn heal_is_capped_at_max() {
        let mut player = Player::new("Test", 100, 10, 5);
        player.set_health(90);
        assert_eq!(player.heal(30), 10);
        assert_eq!(player.health(), 100);
    }

    #[test]
    fn damage_floors_at_zero() {
        let mut player = Player::new("Test", 50, 10, 5);
        assert!(!player.take_damage(20));
        assert!(player.take_damage(100));
        assert_eq!(player.health(), 0);
        assert!(!player.is_alive());
    }

    #[test]
    fn set_health_clamps() {
        let mut player = Player::new("Test", 50, 10, 5);
        player.set_health(75);
        assert_eq!(player.health(), 50);
        player.set_health(-3);
        assert_eq!(player.health(), 0);
    }
}
