//! Hero background particles.
//!
//! Positions are in canvas pixels and advance once per frame; `step(dt)`
//! takes the elapsed time in frames so a 30 fps caller passes `2.0`.

use rand::Rng;

/// Particles within this distance of the pointer react to it.
pub const ATTRACT_RADIUS: f32 = 150.0;
/// Particles closer than this are joined by a line.
pub const LINK_RADIUS: f32 = 100.0;
const MAX_PARTICLES: usize = 100;
const MIN_OPACITY: f32 = 0.2;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub vx: f32,
    pub vy: f32,
    pub opacity: f32,
    /// 240..300, blue to purple.
    pub hue: f32,
}

/// Line between particles `a` and `b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    pub alpha: f32,
}

#[derive(Debug, Clone)]
pub struct ParticleField {
    width: f32,
    height: f32,
    pointer: Option<(f32, f32)>,
    particles: Vec<Particle>,
}

impl ParticleField {
    /// One particle per 10 px of width, at most 100.
    pub fn new(width: f32, height: f32) -> Self {
        Self::with_rng(width, height, &mut rand::rng())
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn with_rng(width: f32, height: f32, rng: &mut impl Rng) -> Self {
        let count = ((width / 10.0).max(0.0) as usize).min(MAX_PARTICLES);
        let particles = (0..count)
            .map(|_| Particle {
                x: rng.random::<f32>() * width,
                y: rng.random::<f32>() * height,
                size: rng.random::<f32>() * 3.0 + 1.0,
                vx: (rng.random::<f32>() - 0.5) * 2.0,
                vy: (rng.random::<f32>() - 0.5) * 2.0,
                opacity: rng.random::<f32>() * 0.5 + MIN_OPACITY,
                hue: rng.random::<f32>() * 60.0 + 240.0,
            })
            .collect();
        Self::from_particles(width, height, particles)
    }

    pub fn from_particles(width: f32, height: f32, particles: Vec<Particle>) -> Self {
        Self {
            width,
            height,
            pointer: None,
            particles,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn set_pointer(&mut self, pointer: Option<(f32, f32)>) {
        self.pointer = pointer;
    }

    /// Canvas resize; particles outside wrap on the next step.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn step(&mut self, dt: f32) {
        let (width, height) = (self.width, self.height);
        for particle in &mut self.particles {
            particle.x += particle.vx * dt;
            particle.y += particle.vy * dt;

            // wrap around
            if particle.x < 0.0 {
                particle.x = width;
            } else if particle.x > width {
                particle.x = 0.0;
            }
            if particle.y < 0.0 {
                particle.y = height;
            } else if particle.y > height {
                particle.y = 0.0;
            }

            let near = self.pointer.and_then(|(px, py)| {
                let (dx, dy) = (px - particle.x, py - particle.y);
                let distance = dx.hypot(dy);
                (distance < ATTRACT_RADIUS).then_some((dx, dy, distance))
            });
            match near {
                Some((dx, dy, distance)) => {
                    let force = (ATTRACT_RADIUS - distance) / ATTRACT_RADIUS;
                    particle.x -= dx * force * 0.01 * dt;
                    particle.y -= dy * force * 0.01 * dt;
                    particle.opacity = (particle.opacity + force * 0.02 * dt).min(1.0);
                }
                None => particle.opacity = (particle.opacity - 0.01 * dt).max(MIN_OPACITY),
            }
        }
    }

    /// Pairs closer than [`LINK_RADIUS`], fading with distance.
    pub fn links(&self) -> Vec<Link> {
        let mut links = Vec::new();
        for (a, p) in self.particles.iter().enumerate() {
            for (offset, q) in self.particles[a + 1..].iter().enumerate() {
                let distance = (p.x - q.x).hypot(p.y - q.y);
                if distance < LINK_RADIUS {
                    links.push(Link {
                        a,
                        b: a + 1 + offset,
                        alpha: (LINK_RADIUS - distance) / LINK_RADIUS * 0.2,
                    });
                }
            }
        }
        links
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn particle(x: f32, y: f32, vx: f32, vy: f32) -> Particle {
        Particle {
            x,
            y,
            size: 2.0,
            vx,
            vy,
            opacity: 0.5,
            hue: 250.0,
        }
    }

    #[test]
    fn test_particle_count_and_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        let field = ParticleField::with_rng(640.0, 480.0, &mut rng);
        assert_eq!(field.particles().len(), 64);
        assert!(field.particles().iter().all(|p| {
            (0.0..=640.0).contains(&p.x)
                && (1.0..=4.0).contains(&p.size)
                && (240.0..=300.0).contains(&p.hue)
                && (0.2..=0.7).contains(&p.opacity)
        }));

        let wide = ParticleField::with_rng(4000.0, 480.0, &mut rng);
        assert_eq!(wide.particles().len(), 100);
    }

    #[test]
    fn test_step_wraps_inside_bounds() {
        let mut field = ParticleField::from_particles(
            100.0,
            100.0,
            vec![particle(99.5, 50.0, 1.0, 0.0), particle(50.0, 0.5, 0.0, -1.0)],
        );
        field.step(1.0);
        assert_eq!(field.particles()[0].x, 0.0);
        assert_eq!(field.particles()[1].y, 100.0);
    }

    #[test]
    fn test_pointer_pushes_and_brightens() {
        let mut field =
            ParticleField::from_particles(500.0, 500.0, vec![particle(100.0, 100.0, 0.0, 0.0)]);
        field.set_pointer(Some((150.0, 100.0)));
        field.step(1.0);

        let p = field.particles()[0].clone();
        // force = (150 - 50) / 150
        let force = 100.0 / 150.0;
        assert!((p.x - (100.0 - 50.0 * force * 0.01)).abs() < 1e-4);
        assert!(p.opacity > 0.5);

        field.set_pointer(None);
        field.step(1.0);
        assert!(field.particles()[0].opacity < p.opacity);
    }

    #[test]
    fn test_links_below_threshold() {
        let field = ParticleField::from_particles(
            500.0,
            500.0,
            vec![
                particle(0.0, 0.0, 0.0, 0.0),
                particle(50.0, 0.0, 0.0, 0.0),
                particle(300.0, 0.0, 0.0, 0.0),
            ],
        );
        let links = field.links();
        assert_eq!(links.len(), 1);
        assert_eq!((links[0].a, links[0].b), (0, 1));
        assert!((links[0].alpha - 0.1).abs() < 1e-6);
    }
}
