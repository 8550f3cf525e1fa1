//! Decorative particle field drawn on a fixed full-viewport canvas.

use rand::{Rng, RngCore};
use shared::{
    domain::{NodeId, Size, TaskHandle},
    event::{DrawCommand, Task},
};
use tracing::debug;

use crate::{
    config::Settings,
    platform::{apply_styles, css_number, Env},
};

pub const MAX_SPEED: f64 = 0.5;
pub const MIN_RADIUS: f64 = 1.0;
pub const RADIUS_SPREAD: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub size: f64,
}

impl Particle {
    pub fn random(rng: &mut dyn RngCore, bounds: Size) -> Self {
        Self {
            x: rng.gen::<f64>() * bounds.width,
            y: rng.gen::<f64>() * bounds.height,
            vx: (rng.gen::<f64>() - 0.5) * MAX_SPEED,
            vy: (rng.gen::<f64>() - 0.5) * MAX_SPEED,
            size: rng.gen::<f64>() * RADIUS_SPREAD + MIN_RADIUS,
        }
    }

    /// One Euler step. Velocity flips once the particle has crossed an edge,
    /// so it may sit just outside the bounds for a single frame.
    pub fn step(&mut self, bounds: Size) {
        self.x += self.vx;
        self.y += self.vy;
        if self.x < 0.0 || self.x > bounds.width {
            self.vx = -self.vx;
        }
        if self.y < 0.0 || self.y > bounds.height {
            self.vy = -self.vy;
        }
    }
}

pub struct ParticleBackground {
    canvas: NodeId,
    bounds: Size,
    color: String,
    particles: Vec<Particle>,
    frame: Option<TaskHandle>,
}

impl ParticleBackground {
    /// Inserts the canvas, seeds the particles and draws the first frame.
    pub fn new(env: &mut Env<'_>, settings: &Settings) -> Self {
        let canvas = env.dom.create_element("canvas");
        let opacity = css_number(settings.particle_canvas_opacity);
        apply_styles(
            &mut *env.dom,
            canvas,
            &[
                ("position", "fixed"),
                ("top", "0"),
                ("left", "0"),
                ("width", "100%"),
                ("height", "100%"),
                ("pointer-events", "none"),
                ("z-index", "-1"),
                ("opacity", opacity.as_str()),
            ],
        );
        let body = env.dom.body();
        env.dom.append_child(body, canvas);

        let mut background = Self {
            canvas,
            bounds: Size::default(),
            color: settings.particle_color.clone(),
            particles: Vec::with_capacity(settings.particle_count),
            frame: None,
        };
        let viewport = env.dom.viewport();
        background.resize(env, viewport);

        let bounds = background.bounds;
        background.particles = (0..settings.particle_count)
            .map(|_| Particle::random(&mut *env.rng, bounds))
            .collect();
        debug!(count = background.particles.len(), "particles seeded");

        background.animate(env);
        background
    }

    pub fn canvas(&self) -> NodeId {
        self.canvas
    }

    pub fn bounds(&self) -> Size {
        self.bounds
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn is_running(&self) -> bool {
        self.frame.is_some()
    }

    /// Matches the canvas to `viewport`. Particles keep their positions.
    pub fn resize(&mut self, env: &mut Env<'_>, viewport: Size) {
        self.bounds = viewport;
        env.dom.set_canvas_size(self.canvas, self.bounds);
    }

    pub fn animate(&mut self, env: &mut Env<'_>) {
        let mut commands = Vec::with_capacity(self.particles.len() + 1);
        commands.push(DrawCommand::Clear {
            width: self.bounds.width,
            height: self.bounds.height,
        });
        for particle in &mut self.particles {
            particle.step(self.bounds);
            commands.push(DrawCommand::FillCircle {
                x: particle.x,
                y: particle.y,
                radius: particle.size,
                color: self.color.clone(),
            });
        }
        env.dom.draw(self.canvas, &commands);
        self.frame = Some(env.scheduler.request_frame(Task::ParticleFrame));
    }

    pub fn stop(&mut self, env: &mut Env<'_>) {
        if let Some(frame) = self.frame.take() {
            env.scheduler.cancel(frame);
        }
    }
}

#[cfg(test)]
#[path = "tests/particles_tests.rs"]
mod tests;
