//! Game bodies and their per-tick behavior
//!
//! Three kinds of body share the world: the player ship, bullets and
//! invaders. Each one advances once per tick and may hand back a single new
//! body (a bullet) for the world to append.

use glam::DVec2;
use rand::{Rng, RngCore};

use super::geometry::Bounds;
use super::world::invaders_below;
use crate::audio::{SoundEffect, SoundSink};
use crate::consts::*;
use crate::input::{Key, KeyQuery};

/// Everything a body may touch while advancing.
///
/// Built fresh by the world for every body update and dropped right after,
/// so bodies never hold on to the world between ticks.
pub struct TickContext<'a> {
    /// Current body list (read-only view)
    pub bodies: &'a [Body],
    /// Held-key query
    pub keys: &'a dyn KeyQuery,
    /// Fire-and-forget sound trigger
    pub sound: &'a mut dyn SoundSink,
    /// Uniform randomness source
    pub rng: &'a mut dyn RngCore,
}

impl TickContext<'_> {
    /// See [`invaders_below`]
    pub fn invaders_below(&self, invader: &Invader) -> bool {
        invaders_below(self.bodies, invader)
    }
}

/// The player's ship
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    pub center: DVec2,
    pub size: DVec2,
}

impl Player {
    pub fn new(center: DVec2) -> Self {
        Self {
            center,
            size: PLAYER_SIZE,
        }
    }

    /// Place the ship centered horizontally, one ship-height above the bottom
    pub fn spawn_position(game_size: DVec2) -> DVec2 {
        DVec2::new(game_size.x / 2.0, game_size.y - PLAYER_SIZE.y)
    }

    /// One action per tick: Left beats Right beats Fire.
    /// No fire cooldown, so holding Fire spawns a bullet every tick.
    pub fn update(&mut self, ctx: &mut TickContext) -> Option<Body> {
        if ctx.keys.is_down(Key::Left) {
            self.center.x -= PLAYER_SPEED;
            None
        } else if ctx.keys.is_down(Key::Right) {
            self.center.x += PLAYER_SPEED;
            None
        } else if ctx.keys.is_down(Key::Fire) {
            let muzzle = DVec2::new(self.center.x, self.center.y - self.size.x * 2.0);
            let bullet = Bullet::new(muzzle, PLAYER_BULLET_VELOCITY);
            ctx.sound.play(SoundEffect::Shoot);
            Some(Body::Bullet(bullet))
        } else {
            None
        }
    }
}

/// A projectile moving in a straight line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bullet {
    pub center: DVec2,
    pub size: DVec2,
    /// Displacement per tick, fixed at creation
    pub velocity: DVec2,
}

impl Bullet {
    pub fn new(center: DVec2, velocity: DVec2) -> Self {
        Self {
            center,
            size: BULLET_SIZE,
            velocity,
        }
    }

    /// Bullets are never removed by leaving the screen, only by collision
    pub fn update(&mut self) {
        self.center += self.velocity;
    }
}

/// An enemy patrolling back and forth and occasionally firing downward
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Invader {
    pub center: DVec2,
    pub size: DVec2,
    /// Signed horizontal displacement accumulated since spawn
    pub patrol_x: f64,
    /// Signed horizontal speed, flipped at the patrol window edges
    pub speed_x: f64,
}

impl Invader {
    pub fn new(center: DVec2) -> Self {
        Self {
            center,
            size: INVADER_SIZE,
            patrol_x: 0.0,
            speed_x: INVADER_SPEED,
        }
    }

    pub fn update(&mut self, ctx: &mut TickContext) -> Option<Body> {
        if self.patrol_x < 0.0 || self.patrol_x > INVADER_PATROL_WIDTH {
            self.speed_x = -self.speed_x;
        }

        self.center.x += self.speed_x;
        self.patrol_x += self.speed_x;

        // Roll first, then look below (same evaluation order as the fire rule)
        if ctx.rng.random::<f64>() > INVADER_FIRE_THRESHOLD && !ctx.invaders_below(self) {
            let muzzle = DVec2::new(self.center.x, self.center.y + self.size.x * 2.0);
            let drift = ctx.rng.random::<f64>() - 0.5;
            let bullet = Bullet::new(muzzle, DVec2::new(drift, INVADER_BULLET_SPEED));
            return Some(Body::Bullet(bullet));
        }

        None
    }
}

/// Any body in the world
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Body {
    Player(Player),
    Bullet(Bullet),
    Invader(Invader),
}

impl Body {
    pub fn center(&self) -> DVec2 {
        match self {
            Body::Player(p) => p.center,
            Body::Bullet(b) => b.center,
            Body::Invader(i) => i.center,
        }
    }

    pub fn size(&self) -> DVec2 {
        match self {
            Body::Player(p) => p.size,
            Body::Bullet(b) => b.size,
            Body::Invader(i) => i.size,
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_center(self.center(), self.size())
    }

    pub fn as_invader(&self) -> Option<&Invader> {
        match self {
            Body::Invader(i) => Some(i),
            _ => None,
        }
    }

    pub fn is_player(&self) -> bool {
        matches!(self, Body::Player(_))
    }

    pub fn is_bullet(&self) -> bool {
        matches!(self, Body::Bullet(_))
    }

    /// Advance one tick, optionally producing a new body to append
    pub fn advance(&mut self, ctx: &mut TickContext) -> Option<Body> {
        match self {
            Body::Player(p) => p.update(ctx),
            Body::Bullet(b) => {
                b.update();
                None
            }
            Body::Invader(i) => i.update(ctx),
        }
    }
}
