//! Bounded-arena motion: clamping, wall reflection and pickups.
//!
//! Entities are tracked by their top-left `position` and drawn `size`; their
//! collision shape is a circle centred on the size box with a radius of half
//! the width. The arena is the screen inset by one tile on every side.
//!
//! Each axis is resolved independently: an entity crossing the left wall is
//! only ever pushed on X, whatever its Y. Per-tick motion has no error
//! conditions; only building the arena can fail.

use glam::Vec2;
use slime_core::geometry::{Circle, Rect};
use slime_core::random::RandomSource;

use crate::controller::{MotionConfig, MoveIntent};
use crate::error::LoadError;
use crate::tilemap::Tilemap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: Vec2,
}

impl Body {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            size,
        }
    }

    pub fn radius(&self) -> f32 {
        self.size.x * 0.5
    }

    pub fn bounds(&self) -> Circle {
        self.bounds_at(self.position)
    }

    pub fn bounds_at(&self, position: Vec2) -> Circle {
        Circle::new(position + self.size * 0.5, self.radius())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCell {
    pub column: usize,
    pub row: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArenaEvent {
    /// The bouncing entity hit a wall; `normal` is the unit normal it was
    /// reflected about.
    Bounce { normal: Vec2 },
    /// The two entities touched; the bouncing entity was moved to `cell`
    /// and given `velocity`.
    Pickup { cell: GridCell, velocity: Vec2 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    bounds: Rect,
    columns: usize,
    rows: usize,
    cell_size: Vec2,
}

impl Arena {
    /// `columns`/`rows`/`cell_size` describe the grid pickups relocate onto;
    /// it needs at least one interior cell on each axis.
    pub fn new(
        bounds: Rect,
        columns: usize,
        rows: usize,
        cell_size: Vec2,
    ) -> Result<Self, LoadError> {
        if columns < 3 || rows < 3 || bounds.is_empty() {
            return Err(LoadError::ArenaTooSmall { columns, rows });
        }
        Ok(Self {
            bounds,
            columns,
            rows,
            cell_size,
        })
    }

    pub fn from_tilemap(screen_size: Vec2, tilemap: &Tilemap) -> Result<Self, LoadError> {
        let tile = Vec2::new(tilemap.tile_width(), tilemap.tile_height());
        let bounds = Rect::new(
            tile.x,
            tile.y,
            screen_size.x - tile.x * 2.0,
            screen_size.y - tile.y * 2.0,
        );
        Self::new(bounds, tilemap.columns(), tilemap.rows(), tile)
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cell_position(&self, cell: GridCell) -> Vec2 {
        Vec2::new(
            cell.column as f32 * self.cell_size.x,
            cell.row as f32 * self.cell_size.y,
        )
    }

    pub fn center_cell(&self) -> GridCell {
        GridCell {
            column: self.columns / 2,
            row: self.rows / 2,
        }
    }

    /// Uniform over the non-border cells.
    pub fn random_interior_cell(&self, rng: &mut dyn RandomSource) -> GridCell {
        let column = rng.next_int(1, self.columns as i32 - 1);
        let row = rng.next_int(1, self.rows as i32 - 1);
        GridCell {
            column: column as usize,
            row: row as usize,
        }
    }

    /// Push the body back inside on each axis where its bounds poke out.
    pub fn clamp(&self, body: &mut Body) {
        let circle = body.bounds();
        let (shift, _) = self.resolve(&circle);
        body.position += shift;
    }

    /// Move by velocity and reflect off any wall crossed. The (possibly
    /// snapped) position is committed either way.
    pub fn bounce(&self, body: &mut Body) -> Option<Vec2> {
        let tentative = body.position + body.velocity;
        let circle = body.bounds_at(tentative);
        let (shift, normal) = self.resolve(&circle);
        body.position = tentative + shift;

        if normal == Vec2::ZERO {
            return None;
        }
        let normal = normal.normalize();
        body.velocity = reflect(body.velocity, normal);
        Some(normal)
    }

    /// Per-axis snap offset and the accumulated (unnormalised) wall normal.
    fn resolve(&self, circle: &Circle) -> (Vec2, Vec2) {
        let mut shift = Vec2::ZERO;
        let mut normal = Vec2::ZERO;

        if circle.left() < self.bounds.left() {
            normal.x = 1.0;
            shift.x = self.bounds.left() - circle.left();
        } else if circle.right() > self.bounds.right() {
            normal.x = -1.0;
            shift.x = self.bounds.right() - circle.right();
        }

        if circle.top() < self.bounds.top() {
            normal.y = 1.0;
            shift.y = self.bounds.top() - circle.top();
        } else if circle.bottom() > self.bounds.bottom() {
            normal.y = -1.0;
            shift.y = self.bounds.bottom() - circle.bottom();
        }

        (shift, normal)
    }
}

/// `v - 2(v·n)n` for a unit normal `n`.
pub fn reflect(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Unit vector at a uniform angle in `[0, 2π)`, scaled by `speed`.
pub fn random_velocity(rng: &mut dyn RandomSource, speed: f32) -> Vec2 {
    let angle = rng.next_f32() * std::f32::consts::TAU;
    Vec2::new(angle.cos(), angle.sin()) * speed
}

/// Drives one controlled entity and one bouncing entity inside an arena.
#[derive(Debug, Clone, Copy)]
pub struct MotionEngine {
    pub arena: Arena,
    pub config: MotionConfig,
}

impl MotionEngine {
    pub fn new(arena: Arena, config: MotionConfig) -> Self {
        Self { arena, config }
    }

    pub fn move_controlled(&self, body: &mut Body, intent: MoveIntent) {
        body.position += intent.displacement(&self.config);
        self.arena.clamp(body);
    }

    pub fn move_bouncing(&self, body: &mut Body) -> Option<ArenaEvent> {
        self.arena
            .bounce(body)
            .map(|normal| ArenaEvent::Bounce { normal })
    }

    pub fn spawn_velocity(&self, rng: &mut dyn RandomSource) -> Vec2 {
        random_velocity(rng, self.config.speed)
    }

    pub fn relocate(&self, body: &mut Body, rng: &mut dyn RandomSource) -> ArenaEvent {
        let cell = self.arena.random_interior_cell(rng);
        body.position = self.arena.cell_position(cell);
        body.velocity = self.spawn_velocity(rng);
        ArenaEvent::Pickup {
            cell,
            velocity: body.velocity,
        }
    }

    pub fn check_pickup(
        &self,
        player: &Body,
        target: &mut Body,
        rng: &mut dyn RandomSource,
    ) -> Option<ArenaEvent> {
        if player.bounds().intersects(&target.bounds()) {
            Some(self.relocate(target, rng))
        } else {
            None
        }
    }

    /// One simulation tick: player movement and clamp, bounce, then pickup.
    pub fn step(
        &self,
        player: &mut Body,
        intent: MoveIntent,
        bouncer: &mut Body,
        rng: &mut dyn RandomSource,
    ) -> Vec<ArenaEvent> {
        let mut events = Vec::new();
        self.move_controlled(player, intent);
        if let Some(event) = self.move_bouncing(bouncer) {
            log::debug!("bounce at {:?}", bouncer.position);
            events.push(event);
        }
        if let Some(event) = self.check_pickup(player, bouncer, rng) {
            log::debug!("pickup: {:?}", event);
            events.push(event);
        }
        events
    }
}
