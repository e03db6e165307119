//! What a renderer needs from the simulation
//!
//! The skier is pinned to a fixed screen anchor and the world scrolls around
//! it. Each frame the front-end receives one [`EntityView`] per live entity
//! (skier first) through a [`RenderSink`].

use glam::Vec2;
use serde::Serialize;

use crate::sim::{GameState, Obstacle, Skier, Variant, YetiPose};
use crate::tuning::Tuning;

/// Pixel offset from the viewport's top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScreenOffset {
    pub top: f32,
    pub left: f32,
}

/// Project a world position into screen space relative to the skier
pub fn project(pos: Vec2, skier_pos: Vec2, tuning: &Tuning) -> ScreenOffset {
    let ppm = tuning.pixels_per_meter;
    ScreenOffset {
        top: (pos.y - skier_pos.y) * ppm + tuning.view.skier_top,
        left: (pos.x - skier_pos.x) * ppm + tuning.view.skier_left,
    }
}

/// Skier sprite selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkierPose {
    Leftmost,
    MoreLeft,
    Left,
    Forward,
    Right,
    MoreRight,
    Rightmost,
    Falling,
    Ouch,
}

impl SkierPose {
    const BY_DIRECTION: [SkierPose; 7] = [
        SkierPose::Leftmost,
        SkierPose::MoreLeft,
        SkierPose::Left,
        SkierPose::Forward,
        SkierPose::Right,
        SkierPose::MoreRight,
        SkierPose::Rightmost,
    ];

    pub fn of(skier: &Skier) -> Self {
        if skier.falling {
            if skier.speed == 0.0 && skier.dead {
                SkierPose::Ouch
            } else {
                SkierPose::Falling
            }
        } else {
            let index = skier.direction.clamp(0, 6) as usize;
            Self::BY_DIRECTION[index]
        }
    }

    /// Sprite class name
    pub fn as_str(&self) -> &'static str {
        match self {
            SkierPose::Leftmost => "leftmost",
            SkierPose::MoreLeft => "more-left",
            SkierPose::Left => "left",
            SkierPose::Forward => "forward",
            SkierPose::Right => "right",
            SkierPose::MoreRight => "more-right",
            SkierPose::Rightmost => "rightmost",
            SkierPose::Falling => "falling",
            SkierPose::Ouch => "ouch",
        }
    }
}

/// Per-entity visual state
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Visual {
    Skier { pose: SkierPose, opacity: f32 },
    Scenery { sprite: &'static str },
    Dog { facing: f32 },
    Yeti { pose: YetiPose, facing: f32 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityView {
    /// 0 for the skier, otherwise the obstacle id
    pub id: u32,
    pub screen: ScreenOffset,
    pub visual: Visual,
}

/// Receives the frame's entities from the simulation
pub trait RenderSink {
    fn draw(&mut self, entity: &EntityView);
}

impl RenderSink for Vec<EntityView> {
    fn draw(&mut self, entity: &EntityView) {
        self.push(entity.clone());
    }
}

pub fn skier_view(skier: &Skier, tuning: &Tuning) -> EntityView {
    let opacity = if skier.eaten {
        0.0
    } else if skier.invincible && !skier.dead {
        0.5
    } else {
        1.0
    };
    EntityView {
        id: 0,
        screen: project(skier.pos, skier.pos, tuning),
        visual: Visual::Skier {
            pose: SkierPose::of(skier),
            opacity,
        },
    }
}

pub fn obstacle_view(obstacle: &Obstacle, skier: &Skier, tuning: &Tuning) -> EntityView {
    let facing = obstacle.facing(skier).unwrap_or(1.0);
    let visual = match obstacle.variant {
        Variant::Dog { .. } => Visual::Dog { facing },
        Variant::Yeti { pose, .. } => Visual::Yeti { pose, facing },
        _ => Visual::Scenery {
            sprite: obstacle.variant.name(),
        },
    };
    EntityView {
        id: obstacle.id,
        screen: project(obstacle.pos, skier.pos, tuning),
        visual,
    }
}

/// Hand every live entity to the sink, skier first
pub fn render(state: &GameState, sink: &mut impl RenderSink) {
    sink.draw(&skier_view(&state.skier, &state.tuning));
    for obstacle in state.obstacles.iter() {
        sink.draw(&obstacle_view(obstacle, &state.skier, &state.tuning));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::PixelBox;

    #[test]
    fn test_projection_is_skier_relative() {
        let tuning = Tuning::default();
        let skier = Vec2::new(10.0, 50.0);
        assert_eq!(
            project(skier, skier, &tuning),
            ScreenOffset {
                top: 100.0,
                left: 320.0
            }
        );
        let below_right = project(Vec2::new(12.0, 51.0), skier, &tuning);
        assert_eq!(below_right.top, 115.0);
        assert_eq!(below_right.left, 350.0);
    }

    #[test]
    fn test_skier_pose_and_opacity() {
        let tuning = Tuning::default();
        let mut skier = Skier::new(&tuning);
        assert_eq!(SkierPose::of(&skier), SkierPose::Rightmost);
        skier.face_forward(&tuning);
        assert_eq!(SkierPose::of(&skier).as_str(), "forward");

        skier.speed = 0.2;
        skier.collide(1);
        assert_eq!(SkierPose::of(&skier), SkierPose::Falling);

        skier.falling = false;
        skier.invincible = true;
        assert_eq!(
            skier_view(&skier, &tuning).visual,
            Visual::Skier {
                pose: SkierPose::Forward,
                opacity: 0.5
            }
        );

        skier.die();
        assert_eq!(
            skier_view(&skier, &tuning).visual,
            Visual::Skier {
                pose: SkierPose::Ouch,
                opacity: 0.0
            }
        );
    }

    #[test]
    fn test_render_visits_every_entity_once() {
        let mut state = GameState::new(Tuning::default(), 3);
        let offsets = PixelBox::new(0.0, 0.0, 22.0, 19.0);
        state
            .obstacles
            .add(Variant::Dog { direction: -1.0 }, Vec2::new(3.0, 9.0), offsets);
        state
            .obstacles
            .add(Variant::Bush { burning: true }, Vec2::new(1.0, 9.0), offsets);

        let mut frame: Vec<EntityView> = Vec::new();
        render(&state, &mut frame);
        assert_eq!(frame.len(), 3);
        assert_eq!(frame[0].id, 0);
        assert_eq!(frame[1].visual, Visual::Dog { facing: -1.0 });
        assert_eq!(
            frame[2].visual,
            Visual::Scenery {
                sprite: "flaming-bush"
            }
        );
    }
}
