//! Effect surfaces: an [`EffectManager`] bound to a screen area, plus the
//! timers that remove its batches.
//!
//! Every batch gets one tokio timer task.  When it fires it posts an
//! [`EffectExpired`] message back to the event loop, which calls
//! [`EffectSurface::expire`].  Timers are aborted when the surface is
//! unmounted or dropped, so nothing fires into a torn-down view.

use std::collections::HashMap;
use std::time::Instant;

use rand::rngs::StdRng;
use ratatui::layout::Rect;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

use crate::core::effects::{BatchId, EffectManager, EffectPreset, Particle};

/// Which surface a timer belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    Gallery,
    Confetti,
}

/// Posted by a batch timer once the batch is due for removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectExpired {
    pub surface: SurfaceKind,
    pub batch: BatchId,
}

pub struct EffectSurface {
    kind: SurfaceKind,
    manager: EffectManager<StdRng>,
    /// Screen area the particles live in; `None` until first drawn.
    bounds: Option<Rect>,
    timers: HashMap<BatchId, AbortHandle>,
    tx: mpsc::UnboundedSender<EffectExpired>,
}

impl EffectSurface {
    pub fn new(
        kind: SurfaceKind,
        preset: EffectPreset,
        rng: StdRng,
        tx: mpsc::UnboundedSender<EffectExpired>,
    ) -> Self {
        Self {
            kind,
            manager: EffectManager::new(preset, rng),
            bounds: None,
            timers: HashMap::new(),
            tx,
        }
    }

    /// Attach (or move) the surface to `area`.
    pub fn mount(&mut self, area: Rect) {
        if area.width == 0 || area.height == 0 {
            self.unmount();
            return;
        }
        self.bounds = Some(area);
    }

    /// Detach from the screen, dropping every particle and cancelling every
    /// pending timer.
    pub fn unmount(&mut self) {
        self.clear();
        self.bounds = None;
    }

    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    /// Spawn a batch at the terminal cell `(column, row)`.
    ///
    /// The point is clamped into the mounted area.  Returns `None` without
    /// doing anything when the surface is not mounted.
    pub fn spawn_batch(&mut self, column: u16, row: u16, count: usize) -> Option<BatchId> {
        let area = self.bounds?;
        let x = column.clamp(area.x, area.right().saturating_sub(1)) - area.x;
        let y = row.clamp(area.y, area.bottom().saturating_sub(1)) - area.y;

        let batch = self
            .manager
            .spawn_batch(f32::from(x), f32::from(y), count, Instant::now());

        let tx = self.tx.clone();
        let expired = EffectExpired {
            surface: self.kind,
            batch: batch.id,
        };
        let delay = batch.expires_after;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(expired);
        });
        self.timers.insert(batch.id, handle.abort_handle());

        tracing::debug!(
            "{:?}: spawned batch {:?} ({} particles, expires in {:.2?})",
            self.kind,
            batch.id,
            batch.particles.len(),
            delay
        );
        Some(batch.id)
    }

    /// Spawn a batch with a size drawn from the preset's range.
    pub fn spawn_random_batch(&mut self, column: u16, row: u16) -> Option<BatchId> {
        self.bounds?;
        let count = self.manager.random_count();
        self.spawn_batch(column, row, count)
    }

    /// Spawn a batch at the centre of the mounted area.
    pub fn spawn_centered(&mut self) -> Option<BatchId> {
        let area = self.bounds?;
        self.spawn_random_batch(area.x + area.width / 2, area.y + area.height / 2)
    }

    /// Remove the particles of an expired batch.  Batches already cleared by
    /// an unmount are ignored.
    pub fn expire(&mut self, batch: BatchId) {
        if self.timers.remove(&batch).is_none() {
            tracing::debug!("{:?}: ignoring stale expiry for {:?}", self.kind, batch);
            return;
        }
        let removed = self.manager.remove_batch(batch);
        tracing::debug!(
            "{:?}: batch {:?} expired, removed {removed} ({} live in {} batches)",
            self.kind,
            batch,
            self.manager.active_count(),
            self.manager.batch_count()
        );
    }

    /// Drop all particles and cancel all pending removals.
    pub fn clear(&mut self) {
        for (_, handle) in self.timers.drain() {
            handle.abort();
        }
        self.manager.clear();
    }

    pub fn particles(&self) -> &[Particle] {
        self.manager.particles()
    }

    #[cfg(test)]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }
}

impl Drop for EffectSurface {
    fn drop(&mut self) {
        for (_, handle) in self.timers.drain() {
            handle.abort();
        }
    }
}
