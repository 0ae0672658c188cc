//! The game world: one flat list of bodies
//!
//! A step first removes every body that overlaps any other body, then lets
//! the survivors advance in list order. Bullets spawned during the advance
//! pass are appended immediately.

use glam::DVec2;
use rand::RngCore;

use super::body::{Body, Invader, Player, TickContext};
use super::geometry::{Bounds, colliding};
use crate::audio::SoundSink;
use crate::consts::*;
use crate::input::KeyQuery;
use crate::renderer::DrawSurface;

/// True if any invader sits lower than `invader` and not too far to its right.
///
/// Only `b.x - invader.x < invader.size.x` is checked, so every invader to the
/// left counts as "below" as well.
pub fn invaders_below(bodies: &[Body], invader: &Invader) -> bool {
    bodies.iter().filter_map(Body::as_invader).any(|b| {
        b.center.y > invader.center.y && b.center.x - invader.center.x < invader.size.x
    })
}

/// Owner of every body in play
#[derive(Debug, Clone, Default)]
pub struct World {
    bodies: Vec<Body>,
    /// Playfield size in pixels
    pub game_size: DVec2,
    /// Drop bullets once they are fully outside the playfield
    pub cull_offscreen_bullets: bool,
    /// Ticks simulated so far
    pub time_ticks: u64,
}

impl World {
    /// Standard opening: a grid of invaders followed by the player ship
    pub fn new(game_size: DVec2) -> Self {
        let mut bodies: Vec<Body> = invader_grid().into_iter().map(Body::Invader).collect();
        bodies.push(Body::Player(Player::new(Player::spawn_position(game_size))));
        log::debug!("World created with {} bodies ({}x{})", bodies.len(), game_size.x, game_size.y);
        Self {
            bodies,
            game_size,
            cull_offscreen_bullets: false,
            time_ticks: 0,
        }
    }

    /// World holding exactly the given bodies, in order
    pub fn with_bodies(game_size: DVec2, bodies: Vec<Body>) -> Self {
        Self {
            bodies,
            game_size,
            ..Default::default()
        }
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn player(&self) -> Option<&Player> {
        self.bodies.iter().find_map(|b| match b {
            Body::Player(p) => Some(p),
            _ => None,
        })
    }

    pub fn invader_count(&self) -> usize {
        self.bodies.iter().filter(|b| b.as_invader().is_some()).count()
    }

    pub fn bullet_count(&self) -> usize {
        self.bodies.iter().filter(|b| b.is_bullet()).count()
    }

    /// Append a body; no capacity limit
    pub fn spawn(&mut self, body: Body) {
        log::trace!("spawn {:?}", body);
        self.bodies.push(body);
    }

    pub fn invaders_below(&self, invader: &Invader) -> bool {
        invaders_below(&self.bodies, invader)
    }

    /// Run one simulation step
    pub fn update(
        &mut self,
        keys: &dyn KeyQuery,
        sound: &mut dyn SoundSink,
        rng: &mut dyn RngCore,
    ) {
        self.time_ticks += 1;

        // Removals are simultaneous: every test runs against the pre-step list
        let before = self.bodies.len();
        let survivors: Vec<Body> = self
            .bodies
            .iter()
            .filter(|b1| !self.bodies.iter().any(|b2| colliding(b1, b2)))
            .copied()
            .collect();
        self.bodies = survivors;
        let destroyed = before - self.bodies.len();
        if destroyed > 0 {
            log::debug!("tick {}: {} bodies destroyed", self.time_ticks, destroyed);
        }

        // Length is re-read every iteration, so bodies spawned here are
        // advanced in the same pass
        let mut i = 0;
        while i < self.bodies.len() {
            let mut body = self.bodies[i];
            let spawned = {
                let mut ctx = TickContext {
                    bodies: &self.bodies,
                    keys,
                    sound: &mut *sound,
                    rng: &mut *rng,
                };
                body.advance(&mut ctx)
            };
            self.bodies[i] = body;
            if let Some(new_body) = spawned {
                self.spawn(new_body);
            }
            i += 1;
        }

        if self.cull_offscreen_bullets {
            self.cull_bullets();
        }
    }

    /// Clear the surface and fill one rectangle per body, in list order.
    /// Positions are narrowed to the surface's `f32` pixel space here only.
    pub fn draw(&self, surface: &mut dyn DrawSurface) {
        surface.clear();
        for body in &self.bodies {
            let bounds = body.bounds();
            let size = body.size().as_vec2();
            surface.fill_rect(bounds.left as f32, bounds.top as f32, size.x, size.y);
        }
    }

    fn cull_bullets(&mut self) {
        let field = Bounds::from_center(self.game_size / 2.0, self.game_size);
        let before = self.bodies.len();
        self.bodies
            .retain(|b| !b.is_bullet() || !b.bounds().separated_from(&field));
        let culled = before - self.bodies.len();
        if culled > 0 {
            log::trace!("culled {} offscreen bullets", culled);
        }
    }
}

/// Opening invader layout: 8 columns by 3 rows
pub fn invader_grid() -> Vec<Invader> {
    (0..INVADER_COUNT)
        .map(|i| {
            let x = INVADER_GRID_ORIGIN + (i % INVADER_COLUMNS) as f64 * INVADER_GRID_SPACING;
            let y = INVADER_GRID_ORIGIN + (i % INVADER_ROWS) as f64 * INVADER_GRID_SPACING;
            Invader::new(DVec2::new(x, y))
        })
        .collect()
}
