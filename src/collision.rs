use crate::entity::{Obstacle, Player};

/// True if the player's box overlaps any obstacle's box.
pub fn check_collision(player: &Player, obstacles: &[Obstacle]) -> bool {
    obstacles.iter().any(|o| player.rect.intersects(&o.rect))
}
