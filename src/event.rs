//! Boundary adapter: raw surface hits become explicit commands.

use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng as _, SeedableRng as _};

use crate::adjacency::Face;
use crate::log::Placement;

/// Modifier flag word carried by a surface hit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Modifiers(pub u32);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    /// Secondary gesture: the hit requests an undo instead of a placement.
    pub const SECONDARY: Modifiers = Modifiers(1);

    pub fn contains(self, other: Modifiers) -> bool {
        self.0 & other.0 == other.0
    }
}

/// A resolved pointer-to-surface hit, as delivered by the rendering
/// collaborator. u and v are face-local in [0,1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceHit {
    pub face: Face,
    pub u: f64,
    pub v: f64,
    pub modifiers: Modifiers,
}

/// Explicit command produced from a hit and consumed by the decorator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    Add(Placement),
    Undo,
}

/// Source of the two random draws a placement needs.
///
/// Injectable so tests and tooling can substitute a deterministic source;
/// replay never consults this at all.
pub trait RandomSource {
    /// Uniform index in 0..count. `count` is always >= 1.
    fn stamp_index(&mut self, count: usize) -> usize;

    /// Uniform angle in [0, 2π).
    fn angle(&mut self) -> f64;
}

/// Live-input source backed by the thread RNG.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn stamp_index(&mut self, count: usize) -> usize {
        rand::thread_rng().gen_range(0..count)
    }

    fn angle(&mut self) -> f64 {
        rand::thread_rng().r#gen::<f64>() * TAU
    }
}

/// Deterministic source for tests and batch tooling.
#[derive(Clone, Debug)]
pub struct SeededRandom(StdRng);

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl RandomSource for SeededRandom {
    fn stamp_index(&mut self, count: usize) -> usize {
        self.0.gen_range(0..count)
    }

    fn angle(&mut self) -> f64 {
        self.0.r#gen::<f64>() * TAU
    }
}

/// Turns surface hits into commands: a secondary-gesture hit undoes, any
/// other hit adds a placement with random stamp and rotation.
pub struct EventTranslator {
    rng: Box<dyn RandomSource>,
}

impl Default for EventTranslator {
    fn default() -> Self {
        Self::new(Box::new(ThreadRandom))
    }
}

impl EventTranslator {
    pub fn new(rng: Box<dyn RandomSource>) -> Self {
        Self { rng }
    }

    /// `stamp_count` is the size of the fixed stamp set (>= 1).
    pub fn translate(&mut self, hit: SurfaceHit, stamp_count: usize) -> Command {
        if hit.modifiers.contains(Modifiers::SECONDARY) {
            return Command::Undo;
        }
        Command::Add(Placement {
            stamp: self.rng.stamp_index(stamp_count) as u32,
            face: hit.face.index() as u32,
            u: hit.u,
            v: hit.v,
            angle: self.rng.angle(),
        })
    }
}
