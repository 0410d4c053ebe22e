//! Crash debris
//!
//! Fixed-size bursts of warm-colored squares that drift and fade out.

use glam::Vec2;
use rand::Rng;

use super::state::Particle;
use crate::color::Rgba;
use crate::tuning::Tuning;

/// Append a burst of `tuning.burst_count` particles centered on `origin`
pub fn burst<R: Rng>(particles: &mut Vec<Particle>, origin: Vec2, rng: &mut R, tuning: &Tuning) {
    particles.reserve(tuning.burst_count);
    let speed = tuning.particle_speed;
    for _ in 0..tuning.burst_count {
        let vel = Vec2::new(
            (rng.random::<f32>() - 0.5) * 2.0 * speed,
            (rng.random::<f32>() - 0.5) * 2.0 * speed,
        );
        let size = tuning.particle_min_size
            + rng.random::<f32>() * (tuning.particle_max_size - tuning.particle_min_size);
        let hue = rng.random::<f32>() * tuning.particle_max_hue;
        particles.push(Particle {
            pos: origin,
            vel,
            life: tuning.particle_life,
            max_life: tuning.particle_life,
            size,
            color: Rgba::from_hsl(hue, 1.0, 0.5),
        });
    }
}

/// Move every particle one tick and drop the dead ones in place
pub fn step(particles: &mut Vec<Particle>) {
    for p in particles.iter_mut() {
        p.pos += p.vel;
        p.life = p.life.saturating_sub(1);
    }
    particles.retain(|p| !p.is_dead());
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_burst_is_fixed_size_and_bounded() {
        let t = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut particles = Vec::new();
        burst(&mut particles, Vec2::new(100.0, 200.0), &mut rng, &t);
        assert_eq!(particles.len(), t.burst_count);
        for p in &particles {
            assert_eq!(p.pos, Vec2::new(100.0, 200.0));
            assert!(p.vel.x.abs() <= t.particle_speed);
            assert!(p.vel.y.abs() <= t.particle_speed);
            assert!(p.size >= t.particle_min_size && p.size <= t.particle_max_size);
            assert_eq!(p.life, t.particle_life);
            // Warm band: red channel saturated, no blue
            assert_eq!(p.color.0[0], 1.0);
            assert!(p.color.0[2].abs() < 1e-6);
        }
    }

    #[test]
    fn test_particles_expire_after_lifetime() {
        let t = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut particles = Vec::new();
        burst(&mut particles, Vec2::ZERO, &mut rng, &t);
        let first = particles[0].clone();

        step(&mut particles);
        assert_eq!(particles[0].pos, first.pos + first.vel);
        assert_eq!(particles[0].life, t.particle_life - 1);

        for _ in 1..t.particle_life - 1 {
            step(&mut particles);
        }
        assert_eq!(particles.len(), t.burst_count);
        step(&mut particles);
        assert!(particles.is_empty());
    }
}
