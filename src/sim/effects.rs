//! Cosmetic particles and floating text
//!
//! Nothing here feeds back into gameplay. Spread comes from a seeded PCG so
//! two runs with the same seed and inputs produce identical effects.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    /// Kicked up by a jump
    Dust,
    /// Broken brick pieces
    Shard,
    /// Stomped enemy
    Debris,
    /// Fireball hits, fire flowers
    Spark,
    /// Power-ups and the goal flag
    Star,
    /// Coin pickups
    Glint,
    /// Speed boost pickup
    Boost,
}

impl ParticleKind {
    /// (base velocity, lifetime in ticks)
    fn launch(self) -> (Vec2, u32) {
        match self {
            ParticleKind::Dust => (Vec2::new(0.0, 1.0), 20),
            ParticleKind::Shard => (Vec2::new(0.0, -5.0), 30),
            ParticleKind::Debris => (Vec2::new(0.0, -2.0), 30),
            ParticleKind::Spark => (Vec2::new(0.0, -3.0), 25),
            ParticleKind::Star => (Vec2::ZERO, 60),
            ParticleKind::Glint => (Vec2::new(0.0, -2.0), 25),
            ParticleKind::Boost => (Vec2::ZERO, 40),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub kind: ParticleKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub gravity: f32,
    pub lifetime: u32,
    pub max_lifetime: u32,
    pub size: f32,
    /// Degrees; only stars spin
    pub angle: f32,
    pub spin: f32,
}

impl Particle {
    pub fn update(&mut self) {
        self.pos += self.vel;
        self.vel.y += self.gravity;
        self.angle += self.spin;
        self.lifetime = self.lifetime.saturating_sub(1);
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.lifetime > 0
    }

    /// 1.0 when fresh, fading to 0.0
    pub fn life_fraction(&self) -> f32 {
        if self.max_lifetime == 0 {
            0.0
        } else {
            self.lifetime as f32 / self.max_lifetime as f32
        }
    }
}

/// Rising text such as combo callouts and score pops
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatingText {
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub lifetime: u32,
    pub vel_y: f32,
}

impl FloatingText {
    pub fn combo(x: f32, y: f32, combo: u32) -> Self {
        Self {
            x,
            y,
            text: format!("COMBO x{combo}!"),
            lifetime: 60,
            vel_y: -2.0,
        }
    }

    pub fn score(x: f32, y: f32, points: u64) -> Self {
        Self {
            x,
            y,
            text: format!("+{points}"),
            lifetime: 30,
            vel_y: -3.0,
        }
    }

    pub fn update(&mut self) {
        self.y += self.vel_y;
        self.lifetime = self.lifetime.saturating_sub(1);
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.lifetime > 0
    }
}

/// The session's effect collection
#[derive(Debug, Clone)]
pub struct Effects {
    rng: Pcg32,
    cap: usize,
    pub particles: Vec<Particle>,
    pub texts: Vec<FloatingText>,
}

impl Effects {
    pub fn new(seed: u64, cap: usize) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            cap,
            particles: Vec::new(),
            texts: Vec::new(),
        }
    }

    /// Spawn up to `count` particles of one kind at `at`. Silently stops at
    /// the cap.
    pub fn burst(&mut self, kind: ParticleKind, at: Vec2, count: usize) {
        let room = self.cap.saturating_sub(self.particles.len());
        for _ in 0..count.min(room) {
            let particle = self.spawn(kind, at);
            self.particles.push(particle);
        }
    }

    fn spawn(&mut self, kind: ParticleKind, at: Vec2) -> Particle {
        let (base, lifetime) = kind.launch();
        if kind == ParticleKind::Star {
            return Particle {
                kind,
                pos: at,
                vel: Vec2::new(0.0, self.rng.random_range(-3.0..-1.0)),
                gravity: 0.1,
                lifetime,
                max_lifetime: lifetime,
                size: self.rng.random_range(5..=10) as f32,
                angle: self.rng.random_range(0.0..360.0),
                spin: self.rng.random_range(-5.0..5.0),
            };
        }
        Particle {
            kind,
            pos: at,
            vel: base
                + Vec2::new(
                    self.rng.random_range(-2.0..2.0),
                    self.rng.random_range(-5.0..-2.0),
                ),
            gravity: 0.3,
            lifetime,
            max_lifetime: lifetime,
            size: self.rng.random_range(2..=5) as f32,
            angle: 0.0,
            spin: 0.0,
        }
    }

    pub fn float_text(&mut self, text: FloatingText) {
        self.texts.push(text);
    }

    /// Advance everything one tick and drop what has expired
    pub fn update(&mut self) {
        for particle in &mut self.particles {
            particle.update();
        }
        self.particles.retain(Particle::is_alive);

        for text in &mut self.texts {
            text.update();
        }
        self.texts.retain(FloatingText::is_alive);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
        self.texts.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty() && self.texts.is_empty()
    }
}
