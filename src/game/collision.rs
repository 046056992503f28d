//! Player vs obstacle collision detection.

use super::obstacle::Obstacle;
use super::types::Rect;

/// True if `player_box` overlaps any live obstacle (exclusive edges).
pub fn check(player_box: &Rect, obstacles: &[Obstacle]) -> bool {
    first_hit(player_box, obstacles).is_some()
}

/// Index of the first obstacle, in spawn order, overlapping `player_box`.
pub fn first_hit(player_box: &Rect, obstacles: &[Obstacle]) -> Option<usize> {
    obstacles
        .iter()
        .position(|obstacle| player_box.intersects(&obstacle.rect))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::obstacle::ObstacleKind;

    fn standing_player() -> Rect {
        Rect::new(50.0, 200.0, 100.0, 100.0)
    }

    fn obstacle_at(x: f32, y: f32, w: f32, h: f32) -> Obstacle {
        Obstacle::with_rect(ObstacleKind::Ground, Rect::new(x, y, w, h), 5.0)
    }

    #[test]
    fn test_no_obstacles_no_collision() {
        assert!(!check(&standing_player(), &[]));
    }

    #[test]
    fn test_fully_overlapping() {
        let obstacles = [obstacle_at(60.0, 210.0, 20.0, 20.0)];
        assert!(check(&standing_player(), &obstacles));
    }

    #[test]
    fn test_edge_touching_does_not_collide() {
        // Left edge of the obstacle on the player's right edge
        let right = [obstacle_at(150.0, 175.0, 25.0, 125.0)];
        assert!(!check(&standing_player(), &right));

        // Obstacle bottom on the player's top edge
        let above = [obstacle_at(60.0, 150.0, 125.0, 50.0)];
        assert!(!check(&standing_player(), &above));

        // One pixel further and they overlap
        let overlap = [obstacle_at(149.0, 175.0, 25.0, 125.0)];
        assert!(check(&standing_player(), &overlap));
    }

    #[test]
    fn test_disjoint() {
        let obstacles = [
            obstacle_at(400.0, 175.0, 25.0, 125.0),
            obstacle_at(0.0, 0.0, 40.0, 40.0),
        ];
        assert!(!check(&standing_player(), &obstacles));
    }

    #[test]
    fn test_crouched_player_passes_under_aerial() {
        let crouched = Rect::new(50.0, 250.0, 100.0, 50.0);
        let aerial = [Obstacle::with_rect(
            ObstacleKind::Aerial,
            Rect::new(60.0, 175.0, 125.0, 50.0),
            5.0,
        )];
        assert!(!check(&crouched, &aerial));
        assert!(check(&standing_player(), &aerial));
    }

    #[test]
    fn test_first_hit_reports_oldest_overlap() {
        let obstacles = [
            obstacle_at(500.0, 175.0, 25.0, 125.0),
            obstacle_at(100.0, 175.0, 25.0, 125.0),
            obstacle_at(120.0, 175.0, 25.0, 125.0),
        ];
        assert_eq!(first_hit(&standing_player(), &obstacles), Some(1));
    }
}
