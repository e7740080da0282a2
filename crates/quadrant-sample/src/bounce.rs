use quadrant_engine::coords::Vec2;

/// Half-extent of the box the quad center bounces inside.
pub const BOUNCE_BOUND: f32 = 0.5;

/// Initial velocity, in NDC units per frame.
pub const START_VELOCITY: Vec2 = Vec2::new(0.0025, 0.004);

/// Position/velocity pair advanced once per frame.
///
/// Each step moves the position by the velocity, then reflects the velocity
/// on every axis whose new position lies outside `±BOUNCE_BOUND`. Reflection
/// is elastic; the position itself is never clamped, so the center can
/// overshoot the bound by at most one step.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Bounce {
    pub position: Vec2,
    pub velocity: Vec2,
}

impl Bounce {
    pub const fn new(position: Vec2, velocity: Vec2) -> Self {
        Self { position, velocity }
    }

    /// Advances one frame and returns the new position.
    pub fn step(&mut self) -> Vec2 {
        self.position += self.velocity;

        if self.position.x.abs() > BOUNCE_BOUND {
            self.velocity.x = -self.velocity.x;
        }
        if self.position.y.abs() > BOUNCE_BOUND {
            self.velocity.y = -self.velocity.y;
        }

        self.position
    }
}

impl Default for Bounce {
    fn default() -> Self {
        Self::new(Vec2::zero(), START_VELOCITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_origin_with_fixed_velocity() {
        let b = Bounce::default();
        assert_eq!(b.position, Vec2::new(0.0, 0.0));
        assert_eq!(b.velocity, Vec2::new(0.0025, 0.004));
    }

    #[test]
    fn one_step_adds_velocity_and_flips_only_escaping_axes() {
        let samples = [-0.5, -0.499, -0.25, 0.0, 0.25, 0.499, 0.5];
        let speeds = [-0.004, -0.0025, 0.0025, 0.004];

        for &x in &samples {
            for &y in &samples {
                for &vx in &speeds {
                    for &vy in &speeds {
                        let mut b = Bounce::new(Vec2::new(x, y), Vec2::new(vx, vy));
                        let new_pos = b.step();

                        assert_eq!(new_pos, Vec2::new(x + vx, y + vy));
                        let flip_x = (x + vx).abs() > BOUNCE_BOUND;
                        let flip_y = (y + vy).abs() > BOUNCE_BOUND;
                        assert_eq!(b.velocity.x, if flip_x { -vx } else { vx });
                        assert_eq!(b.velocity.y, if flip_y { -vy } else { vy });
                    }
                }
            }
        }
    }

    #[test]
    fn x_velocity_flips_after_crossing_the_bound() {
        let mut b = Bounce::default();
        let mut crossed = false;

        for _ in 0..1_000 {
            b.step();
            if b.position.x > BOUNCE_BOUND {
                crossed = true;
                break;
            }
        }

        assert!(crossed, "quad never reached the right edge");
        assert!(b.velocity.x < 0.0);
        assert_eq!(b.velocity.x, -START_VELOCITY.x);
    }

    #[test]
    fn y_bounces_before_x() {
        let mut b = Bounce::default();
        while b.velocity.y > 0.0 {
            b.step();
            assert!(b.velocity.x > 0.0, "x flipped before y");
        }
    }

    #[test]
    fn center_stays_within_one_step_of_the_box() {
        let mut b = Bounce::default();
        for _ in 0..10_000 {
            let p = b.step();
            assert!(p.x.abs() <= BOUNCE_BOUND + START_VELOCITY.x.abs() + 1e-4);
            assert!(p.y.abs() <= BOUNCE_BOUND + START_VELOCITY.y.abs() + 1e-4);
            assert!(p.is_finite());
        }
    }

    #[test]
    fn reflection_preserves_speed() {
        let mut b = Bounce::default();
        for _ in 0..2_000 {
            b.step();
            assert_eq!(b.velocity.x.abs(), START_VELOCITY.x);
            assert_eq!(b.velocity.y.abs(), START_VELOCITY.y);
        }
    }
}
