//! Physics scene
//!
//! Builds rigid bodies from a [`Layout`] and wraps the solver plumbing.
//! The world is y-down like the screen, so gravity points at +y. All body
//! positions live in meters; the sprite layer converts back to pixels.

use crate::map::Layout;
use macroquad::prelude::{vec2, Vec2};
use rapier2d::prelude::*;
use std::collections::HashMap;
use std::sync::Mutex;

/// Pixel size of one physics meter
pub const PIXELS_PER_METER: f32 = 16.0;
/// Relative impact speed that knocks a target out, meters per second
const KNOCKOUT_SPEED: f32 = 1.0;
/// Projectile radius in meters
const BALL_RADIUS: f32 = 1.0;
/// Downward gravity, meters per second squared
const GRAVITY: f32 = 10.0;

pub fn to_meters(v: Vec2) -> Vector<Real> {
    vector![v.x / PIXELS_PER_METER, v.y / PIXELS_PER_METER]
}

pub fn to_pixels(v: &Vector<Real>) -> Vec2 {
    vec2(v.x * PIXELS_PER_METER, v.y * PIXELS_PER_METER)
}

/// What a body is, for drawing and knockout checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceKind {
    Floor,
    Plank,
    Target,
    Ball,
}

/// Drawable shape of a body, in pixels
#[derive(Debug, Clone, Copy)]
pub enum PieceShape {
    Box { half: Vec2 },
    Disc { radius: f32 },
}

#[derive(Debug, Clone, Copy)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: PieceShape,
}

/// A target that was just knocked out, position in pixels
#[derive(Debug, Clone, Copy)]
pub struct Knockout {
    pub position: Vec2,
}

/// Collects solver collision events for the frame
#[derive(Default)]
struct EventCollector {
    collisions: Mutex<Vec<CollisionEvent>>,
}

impl EventHandler for EventCollector {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        self.collisions.lock().unwrap().push(event);
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
    }
}

pub struct PhysicsScene {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    pieces: HashMap<RigidBodyHandle, Piece>,
}

impl PhysicsScene {
    /// Build the scene a layout describes.
    pub fn from_layout(layout: &Layout) -> Self {
        let mut scene = Self {
            gravity: vector![0.0, GRAVITY],
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            pieces: HashMap::new(),
        };

        for slab in &layout.floors {
            scene.add_slab(slab.center(), slab.half_extents(), PieceKind::Floor);
        }
        for slab in &layout.planks {
            scene.add_slab(slab.center(), slab.half_extents(), PieceKind::Plank);
        }
        for disc in &layout.targets {
            scene.add_target(vec2(disc.x, disc.y), disc.radius);
        }
        scene
    }

    fn add_slab(&mut self, center: Vec2, half: Vec2, kind: PieceKind) {
        let builder = match kind {
            PieceKind::Floor => RigidBodyBuilder::fixed(),
            _ => RigidBodyBuilder::dynamic(),
        };
        let handle = self.bodies.insert(builder.translation(to_meters(center)).build());
        let collider = ColliderBuilder::cuboid(
            half.x / PIXELS_PER_METER,
            half.y / PIXELS_PER_METER,
        )
        .density(1.0)
        .build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        self.pieces.insert(handle, Piece { kind, shape: PieceShape::Box { half } });
    }

    fn add_target(&mut self, center: Vec2, radius: f32) {
        let handle = self.bodies.insert(
            RigidBodyBuilder::dynamic()
                .translation(to_meters(center))
                .build(),
        );
        let collider = ColliderBuilder::ball(radius / PIXELS_PER_METER)
            .density(1.0)
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        self.pieces.insert(
            handle,
            Piece { kind: PieceKind::Target, shape: PieceShape::Disc { radius } },
        );
    }

    /// Drop a projectile into the world.
    /// `position` is in pixels, `velocity` in meters per second.
    pub fn spawn_ball(&mut self, position: Vec2, velocity: Vec2) {
        let handle = self.bodies.insert(
            RigidBodyBuilder::dynamic()
                .translation(to_meters(position))
                .linvel(vector![velocity.x, velocity.y])
                .ccd_enabled(true)
                .build(),
        );
        let collider = ColliderBuilder::ball(BALL_RADIUS)
            .density(1.0)
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        self.pieces.insert(
            handle,
            Piece {
                kind: PieceKind::Ball,
                shape: PieceShape::Disc { radius: BALL_RADIUS * PIXELS_PER_METER },
            },
        );
    }

    /// Advance the solver one frame and remove every target that took a
    /// hard enough hit. Returns the knockouts for scoring and effects.
    pub fn step(&mut self, delta: f32) -> Vec<Knockout> {
        self.integration_parameters.dt = delta.clamp(1.0 / 240.0, 1.0 / 30.0);

        let events = EventCollector::default();
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &events,
        );

        let mut doomed: Vec<RigidBodyHandle> = Vec::new();
        for event in events.collisions.into_inner().unwrap() {
            let CollisionEvent::Started(c1, c2, _) = event else {
                continue;
            };
            let Some((b1, b2)) = self.parent_pair(c1, c2) else {
                continue;
            };

            for (target, other) in [(b1, b2), (b2, b1)] {
                let is_target = self
                    .pieces
                    .get(&target)
                    .map(|p| p.kind == PieceKind::Target)
                    .unwrap_or(false);
                if !is_target || doomed.contains(&target) {
                    continue;
                }
                let impact = (*self.bodies[target].linvel() - *self.bodies[other].linvel()).norm();
                if impact > KNOCKOUT_SPEED {
                    doomed.push(target);
                }
            }
        }

        let mut knockouts = Vec::new();
        for handle in doomed {
            if let Some(body) = self.bodies.get(handle) {
                knockouts.push(Knockout { position: to_pixels(body.translation()) });
            }
            self.remove_body(handle);
        }
        knockouts
    }

    fn parent_pair(
        &self,
        c1: ColliderHandle,
        c2: ColliderHandle,
    ) -> Option<(RigidBodyHandle, RigidBodyHandle)> {
        let b1 = self.colliders.get(c1)?.parent()?;
        let b2 = self.colliders.get(c2)?.parent()?;
        Some((b1, b2))
    }

    fn remove_body(&mut self, handle: RigidBodyHandle) {
        self.pieces.remove(&handle);
        self.bodies.remove(
            handle,
            &mut self.island_manager,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }

    /// Drop projectiles that left the playfield.
    pub fn cull_balls(&mut self, world_width: f32, world_height: f32) {
        let margin = 4.0 * PIXELS_PER_METER;
        let gone: Vec<RigidBodyHandle> = self
            .pieces
            .iter()
            .filter(|(_, piece)| piece.kind == PieceKind::Ball)
            .filter_map(|(&handle, _)| {
                let pos = to_pixels(self.bodies.get(handle)?.translation());
                let out = pos.x < -margin
                    || pos.x > world_width + margin
                    || pos.y > world_height + margin;
                out.then_some(handle)
            })
            .collect();
        for handle in gone {
            self.remove_body(handle);
        }
    }

    pub fn target_count(&self) -> usize {
        self.pieces
            .values()
            .filter(|p| p.kind == PieceKind::Target)
            .count()
    }

    pub fn ball_count(&self) -> usize {
        self.pieces
            .values()
            .filter(|p| p.kind == PieceKind::Ball)
            .count()
    }

    /// Body poses for the sprite layer: piece, pixel position, rotation.
    /// Sorted by kind so layering stays stable frame to frame.
    pub fn poses(&self) -> Vec<(Piece, Vec2, f32)> {
        let rank = |kind: PieceKind| match kind {
            PieceKind::Floor => 0,
            PieceKind::Plank => 1,
            PieceKind::Target => 2,
            PieceKind::Ball => 3,
        };
        let mut poses: Vec<(Piece, Vec2, f32)> = self
            .pieces
            .iter()
            .filter_map(|(&handle, &piece)| {
                let body = self.bodies.get(handle)?;
                Some((piece, to_pixels(body.translation()), body.rotation().angle()))
            })
            .collect();
        poses.sort_by_key(|(piece, _, _)| rank(piece.kind));
        poses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{Disc, Slab};

    // Everything dynamic starts resting: plank bottom and target bottom sit
    // exactly on the floor top at y=512 so nothing knocks itself out settling.
    fn small_layout() -> Layout {
        Layout {
            floors: vec![Slab { x: 0.0, y: 512.0, w: 960.0, h: 32.0 }],
            planks: vec![Slab { x: 600.0, y: 416.0, w: 16.0, h: 96.0 }],
            targets: vec![Disc { x: 500.0, y: 496.0, radius: 16.0 }],
        }
    }

    #[test]
    fn test_layout_becomes_bodies() {
        let scene = PhysicsScene::from_layout(&small_layout());
        assert_eq!(scene.target_count(), 1);
        assert_eq!(scene.ball_count(), 0);
        assert_eq!(scene.pieces.len(), 3);
    }

    #[test]
    fn test_gravity_pulls_balls_down() {
        let mut scene = PhysicsScene::from_layout(&small_layout());
        scene.spawn_ball(vec2(100.0, 100.0), vec2(0.0, 0.0));
        let before = scene
            .poses()
            .into_iter()
            .find(|(p, _, _)| p.kind == PieceKind::Ball)
            .unwrap()
            .1;
        for _ in 0..30 {
            scene.step(1.0 / 60.0);
        }
        let after = scene
            .poses()
            .into_iter()
            .find(|(p, _, _)| p.kind == PieceKind::Ball)
            .unwrap()
            .1;
        assert!(after.y > before.y);
    }

    #[test]
    fn test_hard_hit_knocks_a_target_out() {
        let mut scene = PhysicsScene::from_layout(&small_layout());
        // Roll a ball along the floor straight into the target
        scene.spawn_ball(vec2(350.0, 496.0), vec2(20.0, 0.0));

        let mut knockouts = Vec::new();
        for _ in 0..120 {
            knockouts.extend(scene.step(1.0 / 60.0));
            if !knockouts.is_empty() {
                break;
            }
        }
        assert_eq!(knockouts.len(), 1);
        assert_eq!(scene.target_count(), 0);
    }

    #[test]
    fn test_offscreen_balls_get_culled() {
        let mut scene = PhysicsScene::from_layout(&small_layout());
        scene.spawn_ball(vec2(100.0, 100.0), vec2(-80.0, 0.0));
        for _ in 0..120 {
            scene.step(1.0 / 60.0);
            scene.cull_balls(960.0, 544.0);
        }
        assert_eq!(scene.ball_count(), 0);
    }
}
