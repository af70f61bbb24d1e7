//! Particle layer: draws the live particles of an effect surface.

use std::time::Instant;

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use super::theme::Theme;
use crate::core::effects::Particle;

/// Renders particles whose coordinates are relative to `area`.
pub struct ParticleLayer<'a> {
    pub particles: &'a [Particle],
    pub now: Instant,
}

impl Widget for ParticleLayer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        // Falling tiles travel the full height of the surface.
        let fall_distance = f32::from(area.height);

        for particle in self.particles {
            let Some(frame) = particle.frame(self.now, fall_distance) else {
                continue;
            };
            let (x, y) = (frame.x.round(), frame.y.round());
            if x < 0.0 || y < 0.0 || x >= f32::from(area.width) || y >= f32::from(area.height) {
                continue;
            }
            let col = area.x + x as u16;
            let row = area.y + y as u16;
            let room = usize::from(area.right() - col);
            buf.set_stringn(
                col,
                row,
                particle.kind.glyph,
                room,
                Theme::particle_style(particle.kind.hue, frame.fade),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::core::effects::{BatchId, Hue, Motion, VisualKind};

    fn particle(x: f32, y: f32) -> Particle {
        Particle {
            id: 0,
            batch: BatchId(0),
            origin_x: x,
            origin_y: y,
            kind: VisualKind { glyph: "■", hue: Hue::Lime },
            lifetime: Duration::from_secs(2),
            start_delay: Duration::ZERO,
            motion: Motion::Fall { drift: 0.0 },
            spawned_at: Instant::now(),
        }
    }

    #[test]
    fn draws_visible_particles_and_skips_off_surface_ones() {
        let area = Rect::new(2, 1, 10, 5);
        let mut buf = Buffer::empty(Rect::new(0, 0, 20, 10));
        let particles = [particle(3.0, 0.0), particle(40.0, 0.0)];
        let now = particles[0].spawned_at;

        ParticleLayer { particles: &particles, now }.render(area, &mut buf);

        assert_eq!(buf[(5, 1)].symbol(), "■");
        let drawn = buf.content.iter().filter(|c| c.symbol() == "■").count();
        assert_eq!(drawn, 1);
    }
}
