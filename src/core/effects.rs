//! Ephemeral visual effects: short-lived particles spawned in batches.
//!
//! A click on the gallery (or a freshly created account) produces a *batch*
//! of particles.  Each batch is tracked on its own so that removing it can
//! never touch particles from another batch, however the batches overlap.
//!
//! This module is the pure model: it decides what a batch contains and when
//! it is due.  The timers that actually remove batches live in
//! `app::effect_runtime`.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use rand::Rng;

/// Extra time a batch stays mounted after its last particle finished.
pub const REMOVAL_MARGIN: Duration = Duration::from_millis(500);

/// Downward acceleration for confetti, in cells per second².
const CONFETTI_GRAVITY: f32 = 24.0;

// ───────────────────────────────────────── identifiers ───────

/// Unique per manager, never reused.
pub type ParticleId = u64;

/// Identifies the set of particles spawned by one interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BatchId(pub u64);

// ───────────────────────────────────────── visuals ───────────

/// Named colours; the UI layer maps them onto terminal colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hue {
    Pink,
    Cyan,
    Green,
    Yellow,
    Red,
    Blue,
    Lime,
    Violet,
    Amber,
}

/// Presentation variant of a particle: what is drawn and in which colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualKind {
    pub glyph: &'static str,
    pub hue: Hue,
}

/// Which family of visuals a manager spawns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectStyle {
    /// Falling media tiles in the gallery.
    Media,
    /// Confetti burst on the ID reveal card.
    Confetti,
}

const MEDIA_GLYPHS: &[&str] = &["🎬", "🎥", "📹", "📸", "🖼", "🎨", "🎭", "📷"];
const MEDIA_HUES: &[Hue] = &[Hue::Pink, Hue::Cyan, Hue::Green, Hue::Yellow, Hue::Red, Hue::Blue];

const CONFETTI_GLYPHS: &[&str] = &["■", "▪", "●", "◆", "▲", "★"];
const CONFETTI_HUES: &[Hue] = &[Hue::Lime, Hue::Cyan, Hue::Pink, Hue::Amber, Hue::Violet];

/// Pick a random visual variant for `style`.
///
/// Pure apart from the generator, so a seeded RNG gives a repeatable
/// sequence.
pub fn pick_variant<R: Rng + ?Sized>(rng: &mut R, style: EffectStyle) -> VisualKind {
    let (glyphs, hues) = match style {
        EffectStyle::Media => (MEDIA_GLYPHS, MEDIA_HUES),
        EffectStyle::Confetti => (CONFETTI_GLYPHS, CONFETTI_HUES),
    };
    VisualKind {
        glyph: glyphs[rng.gen_range(0..glyphs.len())],
        hue: hues[rng.gen_range(0..hues.len())],
    }
}

// ───────────────────────────────────────── presets ───────────

/// Tunables for one kind of effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectPreset {
    pub style: EffectStyle,
    /// Smallest batch a single interaction produces.
    pub min_count: usize,
    /// Largest batch; caps growth under rapid clicking.
    pub max_count: usize,
    /// Delay between consecutive particles of a batch.
    pub stagger: Duration,
    pub lifetime_min: Duration,
    pub lifetime_max: Duration,
}

impl EffectPreset {
    pub const GALLERY: Self = Self {
        style: EffectStyle::Media,
        min_count: 3,
        max_count: 8,
        stagger: Duration::from_millis(150),
        lifetime_min: Duration::from_millis(4000),
        lifetime_max: Duration::from_millis(6000),
    };

    pub const CONFETTI: Self = Self {
        style: EffectStyle::Confetti,
        min_count: 12,
        max_count: 40,
        stagger: Duration::ZERO,
        lifetime_min: Duration::from_millis(1200),
        lifetime_max: Duration::from_millis(2000),
    };

    /// Clamp a requested batch size into this preset's bounds.
    pub fn clamp_count(&self, count: usize) -> usize {
        count.clamp(self.min_count, self.max_count.max(self.min_count))
    }

    fn random_lifetime<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        if self.lifetime_max <= self.lifetime_min {
            return self.lifetime_min;
        }
        rng.gen_range(self.lifetime_min..self.lifetime_max)
    }
}

// ───────────────────────────────────────── particles ─────────

/// How a particle moves while it is visible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    /// Ease-in fall with a sideways drift (cells over the whole lifetime).
    Fall { drift: f32 },
    /// Ballistic burst, velocity in cells per second.
    Burst { vx: f32, vy: f32 },
}

/// Brightness stage of a particle over its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fade {
    Bright,
    Normal,
    Dim,
}

/// A single transient visual entity.
#[derive(Debug, Clone)]
pub struct Particle {
    pub id: ParticleId,
    pub batch: BatchId,
    /// Position of the triggering interaction, relative to the surface.
    pub origin_x: f32,
    pub origin_y: f32,
    pub kind: VisualKind,
    pub lifetime: Duration,
    pub start_delay: Duration,
    pub motion: Motion,
    pub spawned_at: Instant,
}

/// Where (and how bright) a particle is at a given instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleFrame {
    pub x: f32,
    pub y: f32,
    pub fade: Fade,
}

impl Particle {
    /// Total time from spawn until the particle finished animating.
    pub fn finishes_after(&self) -> Duration {
        self.start_delay + self.lifetime
    }

    /// Animated position at `now`.  `None` while the particle is still
    /// waiting for its stagger delay or once its lifetime is over.
    ///
    /// `fall_distance` is how far a falling particle travels, in cells.
    pub fn frame(&self, now: Instant, fall_distance: f32) -> Option<ParticleFrame> {
        let elapsed = now.saturating_duration_since(self.spawned_at);
        let active = elapsed.checked_sub(self.start_delay)?;
        let lifetime = self.lifetime.as_secs_f32();
        if lifetime <= 0.0 {
            return None;
        }
        let t = active.as_secs_f32() / lifetime;
        if t >= 1.0 {
            return None;
        }

        let (x, y) = match self.motion {
            Motion::Fall { drift } => (
                self.origin_x + drift * t,
                self.origin_y + fall_distance * t * t,
            ),
            Motion::Burst { vx, vy } => {
                let secs = active.as_secs_f32();
                (
                    self.origin_x + vx * secs,
                    self.origin_y + vy * secs + 0.5 * CONFETTI_GRAVITY * secs * secs,
                )
            }
        };

        let fade = if t < 0.6 {
            Fade::Bright
        } else if t < 0.85 {
            Fade::Normal
        } else {
            Fade::Dim
        };

        Some(ParticleFrame { x, y, fade })
    }
}

// ───────────────────────────────────────── manager ───────────

/// What `spawn_batch` produced, so the caller can schedule the removal.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnedBatch {
    pub id: BatchId,
    pub particles: Vec<ParticleId>,
    /// Time after spawn at which the whole batch may be removed:
    /// `max(start_delay + lifetime) + REMOVAL_MARGIN`.
    pub expires_after: Duration,
}

/// Owns the active particle set.
///
/// Only `spawn_batch`, `remove_batch` and `clear` mutate it; nothing else
/// hands out mutable access to the particles.
pub struct EffectManager<R> {
    preset: EffectPreset,
    rng: R,
    next_particle: ParticleId,
    next_batch: u64,
    particles: Vec<Particle>,
    batches: HashMap<BatchId, Vec<ParticleId>>,
}

impl<R: Rng> EffectManager<R> {
    pub fn new(preset: EffectPreset, rng: R) -> Self {
        Self {
            preset,
            rng,
            next_particle: 0,
            next_batch: 0,
            particles: Vec::new(),
            batches: HashMap::new(),
        }
    }

    /// Draw a batch size from the preset's range.
    pub fn random_count(&mut self) -> usize {
        let max = self.preset.max_count.max(self.preset.min_count);
        self.rng.gen_range(self.preset.min_count..=max)
    }

    /// Create a batch of `count` particles (clamped to the preset) at the
    /// given surface-relative origin and append it to the active set.
    pub fn spawn_batch(
        &mut self,
        origin_x: f32,
        origin_y: f32,
        count: usize,
        now: Instant,
    ) -> SpawnedBatch {
        let count = self.preset.clamp_count(count);
        let batch = BatchId(self.next_batch);
        self.next_batch += 1;

        let mut ids = Vec::with_capacity(count);
        let mut longest = Duration::ZERO;

        for i in 0..count {
            let id = self.next_particle;
            self.next_particle += 1;

            let kind = pick_variant(&mut self.rng, self.preset.style);
            let lifetime = self.preset.random_lifetime(&mut self.rng);
            let start_delay = self.preset.stagger * i as u32;
            let motion = match self.preset.style {
                EffectStyle::Media => Motion::Fall {
                    drift: self.rng.gen_range(-8.0..8.0),
                },
                EffectStyle::Confetti => Motion::Burst {
                    vx: self.rng.gen_range(-30.0..30.0),
                    vy: self.rng.gen_range(-20.0..2.0),
                },
            };

            let particle = Particle {
                id,
                batch,
                origin_x,
                origin_y,
                kind,
                lifetime,
                start_delay,
                motion,
                spawned_at: now,
            };
            longest = longest.max(particle.finishes_after());
            self.particles.push(particle);
            ids.push(id);
        }

        self.batches.insert(batch, ids.clone());

        SpawnedBatch {
            id: batch,
            particles: ids,
            expires_after: longest + REMOVAL_MARGIN,
        }
    }

    /// Remove exactly the particles of `batch`.  Returns how many were
    /// removed; unknown (already removed) batches remove nothing.
    pub fn remove_batch(&mut self, batch: BatchId) -> usize {
        let Some(ids) = self.batches.remove(&batch) else {
            return 0;
        };
        let before = self.particles.len();
        self.particles.retain(|p| !(p.batch == batch && ids.contains(&p.id)));
        before - self.particles.len()
    }

    /// Drop every active particle.
    pub fn clear(&mut self) {
        self.particles.clear();
        self.batches.clear();
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn active_count(&self) -> usize {
        self.particles.len()
    }

    pub fn batch_count(&self) -> usize {
        self.batches.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn manager(preset: EffectPreset) -> EffectManager<StdRng> {
        EffectManager::new(preset, StdRng::seed_from_u64(7))
    }

    #[test]
    fn spawn_adds_exactly_count_particles() {
        let mut m = manager(EffectPreset::GALLERY);
        let batch = m.spawn_batch(10.0, 5.0, 5, Instant::now());
        assert_eq!(batch.particles.len(), 5);
        assert_eq!(m.active_count(), 5);
        assert!(batch.particles.iter().all(|&id| m.particles().iter().any(|p| p.id == id)));
    }

    #[test]
    fn count_is_clamped_to_preset() {
        let mut m = manager(EffectPreset::GALLERY);
        assert_eq!(m.spawn_batch(0.0, 0.0, 100, Instant::now()).particles.len(), 8);
        assert_eq!(m.spawn_batch(0.0, 0.0, 0, Instant::now()).particles.len(), 3);
    }

    #[test]
    fn random_count_stays_in_range() {
        let mut m = manager(EffectPreset::GALLERY);
        for _ in 0..200 {
            let n = m.random_count();
            assert!((3..=8).contains(&n), "got {n}");
        }
    }

    #[test]
    fn ids_are_unique_across_batches() {
        let mut m = manager(EffectPreset::GALLERY);
        let now = Instant::now();
        let a = m.spawn_batch(0.0, 0.0, 8, now);
        let b = m.spawn_batch(0.0, 0.0, 8, now);
        assert_ne!(a.id, b.id);
        assert!(a.particles.iter().all(|id| !b.particles.contains(id)));
        assert!(b.particles.first() > a.particles.last());
    }

    #[test]
    fn removing_one_batch_leaves_the_other() {
        let mut m = manager(EffectPreset::GALLERY);
        let now = Instant::now();
        let a = m.spawn_batch(1.0, 1.0, 4, now);
        let b = m.spawn_batch(2.0, 2.0, 6, now);

        assert_eq!(m.remove_batch(b.id), 6);
        assert_eq!(m.active_count(), 4);
        assert!(a.particles.iter().all(|&id| m.particles().iter().any(|p| p.id == id)));

        // Removing again is a no-op.
        assert_eq!(m.remove_batch(b.id), 0);
        assert_eq!(m.remove_batch(a.id), 4);
        assert_eq!(m.active_count(), 0);
        assert_eq!(m.batch_count(), 0);
    }

    #[test]
    fn delays_are_staggered_and_expiry_covers_the_slowest() {
        let mut m = manager(EffectPreset::GALLERY);
        let batch = m.spawn_batch(0.0, 0.0, 5, Instant::now());
        let delays: Vec<_> = m.particles().iter().map(|p| p.start_delay).collect();
        assert_eq!(
            delays,
            (0..5).map(|i| Duration::from_millis(150 * i)).collect::<Vec<_>>()
        );

        let slowest = m.particles().iter().map(|p| p.finishes_after()).max().unwrap();
        assert_eq!(batch.expires_after, slowest + REMOVAL_MARGIN);
        for p in m.particles() {
            assert!(p.lifetime >= Duration::from_millis(4000));
            assert!(p.lifetime < Duration::from_millis(6000));
        }
    }

    #[test]
    fn pick_variant_is_deterministic_for_a_seed() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            assert_eq!(
                pick_variant(&mut a, EffectStyle::Media),
                pick_variant(&mut b, EffectStyle::Media)
            );
        }
    }

    #[test]
    fn pick_variant_draws_from_the_style_palette() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            let v = pick_variant(&mut rng, EffectStyle::Confetti);
            assert!(CONFETTI_GLYPHS.contains(&v.glyph));
            assert!(CONFETTI_HUES.contains(&v.hue));
        }
    }

    #[test]
    fn frame_is_hidden_before_delay_and_after_lifetime() {
        let start = Instant::now();
        let p = Particle {
            id: 0,
            batch: BatchId(0),
            origin_x: 10.0,
            origin_y: 2.0,
            kind: VisualKind { glyph: "■", hue: Hue::Lime },
            lifetime: Duration::from_secs(4),
            start_delay: Duration::from_millis(300),
            motion: Motion::Fall { drift: 4.0 },
            spawned_at: start,
        };

        assert!(p.frame(start + Duration::from_millis(100), 20.0).is_none());

        let first = p.frame(start + Duration::from_millis(300), 20.0).unwrap();
        assert_eq!((first.x, first.y), (10.0, 2.0));
        assert_eq!(first.fade, Fade::Bright);

        let mid = p.frame(start + Duration::from_millis(2300), 20.0).unwrap();
        assert!(mid.y > 2.0 && mid.y < 22.0);
        assert!(mid.x > 10.0);

        let late = p.frame(start + Duration::from_millis(4200), 20.0).unwrap();
        assert_eq!(late.fade, Fade::Dim);

        assert!(p.frame(start + Duration::from_millis(4300), 20.0).is_none());
    }
}
