#![deny(unsafe_code)]
//! Mouse-reactive particle field sketch.
//!
//! Samples a source image on a fixed grid to build a set of particles, each
//! anchored to a home position and carrying the sampled color. Every frame,
//! particles near the pointer receive a tangential swirl force (they orbit
//! the pointer rather than fleeing it); everyone else springs back toward
//! home. Velocity decays by a constant friction factor each frame.
//!
//! The sketch also layers scrolling credit labels ([`Marquee`]) over the
//! field and exposes a click-driven sound toggle delegating to an
//! [`AudioSink`] collaborator.

pub mod marquee;

use glam::DVec2;
use pixel_swarm_core::params::{param_f64, param_string_vec, param_usize};
use pixel_swarm_core::{
    AudioSink, FrameInput, PixelImage, Rgba, Scene, Shape, Sketch, SketchError, SoundToggle,
    Xorshift64,
};
use serde_json::{json, Value};
use std::f64::consts::FRAC_PI_2;

pub use marquee::Marquee;

/// Default grid stride in source-image pixels.
const DEFAULT_STRIDE: usize = 8;
/// Default upper bound of the per-particle preferred-speed draw.
const DEFAULT_MAX_SPEED: f64 = 10.0;
/// Default hover radius around the pointer.
const DEFAULT_HOVER_RADIUS: f64 = 100.0;
/// Default edge-sharpness exponent for the force falloff.
const DEFAULT_EDGE_EXPONENT: f64 = 0.5;
/// Default repel force at the pointer itself.
const DEFAULT_REPEL_FORCE: f64 = 50.0;
/// Default return-speed coefficient.
const DEFAULT_RETURN_RATE: f64 = 0.8;

/// Render size as a fraction of the scaled grid cell.
const SIZE_FACTOR: f64 = 0.8;
/// Per-frame multiplicative velocity decay, applied on every branch.
const FRICTION: f64 = 0.85;
/// Fraction of the falloff force applied along the swirl direction.
const SWIRL_SCALE: f64 = 0.2;
/// Fraction of the return-rate spring applied per frame.
const RETURN_SCALE: f64 = 0.1;
/// Fraction of the home displacement added to velocity on resize.
const RESIZE_NUDGE: f64 = 0.1;
/// Radial impulse magnitude for the explode event.
const EXPLODE_IMPULSE: f64 = 20.0;
/// Lower bound of the preferred-speed draw.
const MIN_PREFERRED_SPEED: f64 = 1.0;
/// Color of the hover-radius debug ring.
const OVERLAY_COLOR: Rgba = Rgba::new(255, 255, 255, 160);

/// Tunable parameters for the particle field.
///
/// Use [`Default`] for the stock interaction feel, or [`FieldParams::from_json`]
/// to override individual keys.
#[derive(Debug, Clone)]
pub struct FieldParams {
    /// Grid stride `S` in source-image pixels; one sample per `S`x`S` cell.
    pub stride: usize,
    /// Upper bound of the per-particle preferred-speed draw.
    pub max_speed: f64,
    /// Hover radius `R`: pointer distance within which particles swirl.
    pub hover_radius: f64,
    /// Edge-sharpness exponent `k` in the falloff `(d/R)^k`.
    pub edge_exponent: f64,
    /// Repel force at the pointer itself; decays to zero at the radius edge.
    pub repel_force: f64,
    /// Return-speed coefficient for the spring pulling particles home.
    pub return_rate: f64,
    /// Credit labels scrolled across the canvas.
    pub credits: Vec<String>,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            stride: DEFAULT_STRIDE,
            max_speed: DEFAULT_MAX_SPEED,
            hover_radius: DEFAULT_HOVER_RADIUS,
            edge_exponent: DEFAULT_EDGE_EXPONENT,
            repel_force: DEFAULT_REPEL_FORCE,
            return_rate: DEFAULT_RETURN_RATE,
            credits: Vec::new(),
        }
    }
}

impl FieldParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        Self {
            stride: param_usize(params, "stride", DEFAULT_STRIDE),
            max_speed: param_f64(params, "max_speed", DEFAULT_MAX_SPEED),
            hover_radius: param_f64(params, "hover_radius", DEFAULT_HOVER_RADIUS),
            edge_exponent: param_f64(params, "edge_exponent", DEFAULT_EDGE_EXPONENT),
            repel_force: param_f64(params, "repel_force", DEFAULT_REPEL_FORCE),
            return_rate: param_f64(params, "return_rate", DEFAULT_RETURN_RATE),
            credits: param_string_vec(params, "credits"),
        }
    }
}

/// One particle: anchored to a home position, carrying its sampled color.
#[derive(Debug, Clone)]
pub struct Particle {
    /// Source-image grid coordinate this particle was sampled at. Homes are
    /// recomputed from this on resize.
    pub grid: (usize, usize),
    /// Current render position.
    pub pos: DVec2,
    /// Resting anchor; always reflects the current canvas dimensions.
    pub home: DVec2,
    /// Velocity; persists across frames, never reset.
    pub vel: DVec2,
    /// Color sampled once at creation.
    pub color: Rgba,
    /// Circle diameter, fixed at creation from the stride and image scale.
    pub render_size: f64,
    /// Drawn uniformly from [1, max_speed) at creation. The force model
    /// never reads it.
    pub preferred_speed: f64,
}

/// Cover-fit mapping from image grid coordinates to canvas positions.
///
/// `scale = max(canvas_w / img_w, canvas_h / img_h)` preserves aspect ratio
/// and may crop; offsets center the scaled image on the canvas.
#[derive(Debug, Clone, Copy)]
struct CoverFit {
    scale: f64,
    offset: DVec2,
}

impl CoverFit {
    fn new(img_w: usize, img_h: usize, canvas_w: usize, canvas_h: usize) -> Self {
        let (iw, ih) = (img_w as f64, img_h as f64);
        let (cw, ch) = (canvas_w as f64, canvas_h as f64);
        let scale = (cw / iw).max(ch / ih);
        let offset = DVec2::new((cw - iw * scale) / 2.0, (ch - ih * scale) / 2.0);
        Self { scale, offset }
    }

    fn home(&self, grid: (usize, usize)) -> DVec2 {
        DVec2::new(grid.0 as f64, grid.1 as f64) * self.scale + self.offset
    }
}

/// The particle field simulator.
///
/// All particle state is private process memory, mutated only inside
/// [`Sketch::step`]; the particle count is fixed after construction and
/// particles never read each other's state.
pub struct ParticleField {
    width: usize,
    height: usize,
    image_w: usize,
    image_h: usize,
    params: FieldParams,
    particles: Vec<Particle>,
    marquee: Marquee,
    sound: SoundToggle,
    overlay: bool,
    pointer: DVec2,
    frame: u64,
}

impl ParticleField {
    /// Builds the field by sampling `image` on a fixed-stride grid.
    ///
    /// Emits one particle per sample with non-zero alpha. Deterministic
    /// given the same image, canvas size, and seed.
    ///
    /// Returns `SketchError::InvalidDimensions` if the canvas has a zero
    /// dimension or the stride is zero.
    pub fn new(
        image: &PixelImage,
        width: usize,
        height: usize,
        seed: u64,
        params: FieldParams,
    ) -> Result<Self, SketchError> {
        if width == 0 || height == 0 || params.stride == 0 {
            return Err(SketchError::InvalidDimensions);
        }
        let fit = CoverFit::new(image.width(), image.height(), width, height);
        let render_size = params.stride as f64 * SIZE_FACTOR * fit.scale;
        let mut rng = Xorshift64::new(seed);
        let mut particles = Vec::new();
        for gy in (0..image.height()).step_by(params.stride) {
            for gx in (0..image.width()).step_by(params.stride) {
                let Some(color) = image.pixel(gx, gy) else {
                    continue;
                };
                if color.is_transparent() {
                    continue;
                }
                let home = fit.home((gx, gy));
                particles.push(Particle {
                    grid: (gx, gy),
                    pos: home,
                    home,
                    vel: DVec2::ZERO,
                    color,
                    render_size,
                    preferred_speed: rng.next_range(MIN_PREFERRED_SPEED, params.max_speed),
                });
            }
        }
        let marquee = Marquee::new(&params.credits, width as f64);
        Ok(Self {
            width,
            height,
            image_w: image.width(),
            image_h: image.height(),
            params,
            particles,
            marquee,
            sound: SoundToggle::new(),
            overlay: false,
            pointer: DVec2::ZERO,
            frame: 0,
        })
    }

    /// Creates a particle field from a JSON params object.
    pub fn from_json(
        image: &PixelImage,
        width: usize,
        height: usize,
        seed: u64,
        json_params: &Value,
    ) -> Result<Self, SketchError> {
        Self::new(image, width, height, seed, FieldParams::from_json(json_params))
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Read-only access to the particles.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Frames stepped so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Whether the hover-radius debug overlay is visible.
    pub fn overlay_enabled(&self) -> bool {
        self.overlay
    }

    /// One-shot radial impulse from the canvas center.
    ///
    /// Adds `(cos, sin)(angle) * 20` to every particle's velocity, where
    /// `angle` points from the canvas center to the particle's current
    /// position. A particle exactly at the center gets angle 0. This is a
    /// point-in-time velocity mutation; friction decays it over the
    /// following frames.
    pub fn explode(&mut self) {
        let center = DVec2::new(self.width as f64 / 2.0, self.height as f64 / 2.0);
        for p in &mut self.particles {
            let delta = p.pos - center;
            let angle = delta.y.atan2(delta.x);
            p.vel += DVec2::new(angle.cos(), angle.sin()) * EXPLODE_IMPULSE;
        }
    }

    /// Recomputes every home position for the new canvas dimensions.
    ///
    /// Homes are a pure function of the current canvas size and the stored
    /// grid coordinate, so resizing twice with the same dimensions is a
    /// no-op. Velocity is nudged toward the new home rather than reset, so
    /// particles drift instead of snapping. Render sizes keep their
    /// creation-time value.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), SketchError> {
        if width == 0 || height == 0 {
            return Err(SketchError::InvalidDimensions);
        }
        self.width = width;
        self.height = height;
        let fit = CoverFit::new(self.image_w, self.image_h, width, height);
        for p in &mut self.particles {
            let home = fit.home(p.grid);
            p.vel += (home - p.pos) * RESIZE_NUDGE;
            p.home = home;
        }
        self.marquee.resize(width as f64);
        Ok(())
    }

    /// Flips the play/stop toggle against the given sink.
    ///
    /// A sink that has not finished loading leaves the state untouched.
    /// Returns the playing state after the toggle attempt.
    pub fn toggle_sound(&mut self, sink: &mut dyn AudioSink) -> bool {
        self.sound.toggle(sink)
    }

    /// Whether the sound toggle is currently in the playing state.
    pub fn sound_playing(&self) -> bool {
        self.sound.is_playing()
    }
}

impl Sketch for ParticleField {
    fn step(&mut self, input: &FrameInput) -> Result<(), SketchError> {
        if input.toggle_overlay {
            self.overlay = !self.overlay;
        }
        if input.explode {
            self.explode();
        }
        self.pointer = input.pointer;

        let radius = self.params.hover_radius;
        let exponent = self.params.edge_exponent;
        let repel = self.params.repel_force;
        let pull = self.params.return_rate * RETURN_SCALE;

        for p in &mut self.particles {
            let delta = p.pos - input.pointer;
            let d = delta.length();
            if d < radius {
                // Force is maximal at the pointer and decays to zero at the
                // radius edge. The swirl direction is perpendicular to the
                // pointer-to-particle axis: particles orbit, they don't flee.
                let t = (d / radius).powf(exponent);
                let force = repel * (1.0 - t);
                let angle = if d > 0.0 { delta.y.atan2(delta.x) } else { 0.0 };
                let swirl = angle + FRAC_PI_2;
                p.vel += DVec2::new(swirl.cos(), swirl.sin()) * force * SWIRL_SCALE;
            } else {
                p.vel += (p.home - p.pos) * pull;
            }
            p.pos += p.vel;
            // Exactly once per frame, regardless of branch.
            p.vel *= FRICTION;
        }

        self.marquee.step();
        self.frame += 1;
        Ok(())
    }

    fn scene(&self) -> Scene {
        let mut scene = Scene::new(self.width, self.height, Rgba::BLACK);
        for p in &self.particles {
            scene.push(Shape::Circle {
                center: p.pos,
                radius: p.render_size / 2.0,
                color: p.color,
            });
        }
        for label in self.marquee.shapes(self.frame) {
            scene.push(label);
        }
        if self.overlay {
            scene.push(Shape::Ring {
                center: self.pointer,
                radius: self.params.hover_radius,
                color: OVERLAY_COLOR,
            });
        }
        scene
    }

    fn params(&self) -> Value {
        json!({
            "stride": self.params.stride,
            "max_speed": self.params.max_speed,
            "hover_radius": self.params.hover_radius,
            "edge_exponent": self.params.edge_exponent,
            "repel_force": self.params.repel_force,
            "return_rate": self.params.return_rate,
            "credits": self.params.credits,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "stride": {
                "type": "integer",
                "default": DEFAULT_STRIDE,
                "min": 1,
                "max": 64,
                "description": "Grid stride in source-image pixels"
            },
            "max_speed": {
                "type": "number",
                "default": DEFAULT_MAX_SPEED,
                "min": 1.0,
                "max": 50.0,
                "description": "Upper bound of the per-particle preferred-speed draw"
            },
            "hover_radius": {
                "type": "number",
                "default": DEFAULT_HOVER_RADIUS,
                "min": 0.0,
                "max": 1000.0,
                "description": "Pointer distance within which particles swirl"
            },
            "edge_exponent": {
                "type": "number",
                "default": DEFAULT_EDGE_EXPONENT,
                "min": 0.01,
                "max": 8.0,
                "description": "Edge-sharpness exponent of the force falloff"
            },
            "repel_force": {
                "type": "number",
                "default": DEFAULT_REPEL_FORCE,
                "min": 0.0,
                "max": 500.0,
                "description": "Force magnitude at the pointer itself"
            },
            "return_rate": {
                "type": "number",
                "default": DEFAULT_RETURN_RATE,
                "min": 0.0,
                "max": 2.0,
                "description": "Spring coefficient pulling particles home"
            },
            "credits": {
                "type": "array",
                "default": [],
                "description": "Credit labels scrolled across the canvas"
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixel_swarm_core::audio::NullAudio;

    fn opaque_image(w: usize, h: usize) -> PixelImage {
        PixelImage::solid(w, h, Rgba::opaque(200, 100, 50)).unwrap()
    }

    fn params_with_stride(stride: usize) -> FieldParams {
        FieldParams {
            stride,
            ..FieldParams::default()
        }
    }

    /// 10x10 opaque image, stride 10, canvas 100x100: exactly one particle
    /// with home (0, 0) and scale 10.
    fn single_particle_field() -> ParticleField {
        ParticleField::new(&opaque_image(10, 10), 100, 100, 42, params_with_stride(10)).unwrap()
    }

    fn far_pointer() -> FrameInput {
        FrameInput::at_pointer(1e6, 1e6)
    }

    // ---- Construction ----

    #[test]
    fn ten_by_ten_image_stride_ten_yields_one_particle_at_origin() {
        let field = single_particle_field();
        assert_eq!(field.particles().len(), 1);
        let p = &field.particles()[0];
        assert_eq!(p.home, DVec2::ZERO);
        assert_eq!(p.pos, DVec2::ZERO);
        assert_eq!(p.vel, DVec2::ZERO);
        assert_eq!(p.grid, (0, 0));
    }

    #[test]
    fn render_size_is_stride_times_factor_times_scale() {
        // scale = max(100/10, 100/10) = 10
        let field = single_particle_field();
        let p = &field.particles()[0];
        assert!((p.render_size - 10.0 * 0.8 * 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn cover_fit_centers_the_scaled_image() {
        // 10x10 image on a 200x100 canvas: scale = 20, x offset = 0,
        // y offset = (100 - 200) / 2 = -50 (cropped top and bottom).
        let field =
            ParticleField::new(&opaque_image(10, 10), 200, 100, 42, params_with_stride(5)).unwrap();
        let homes: Vec<DVec2> = field.particles().iter().map(|p| p.home).collect();
        assert_eq!(
            homes,
            vec![
                DVec2::new(0.0, -50.0),
                DVec2::new(100.0, -50.0),
                DVec2::new(0.0, 50.0),
                DVec2::new(100.0, 50.0),
            ]
        );
    }

    #[test]
    fn particle_color_is_sampled_from_the_image() {
        let field = single_particle_field();
        assert_eq!(field.particles()[0].color, Rgba::opaque(200, 100, 50));
    }

    #[test]
    fn fully_transparent_pixels_are_skipped() {
        // 2x1 image: opaque pixel then transparent pixel, stride 1.
        let data = vec![255, 0, 0, 255, 0, 255, 0, 0];
        let image = PixelImage::from_raw(2, 1, data).unwrap();
        let field = ParticleField::new(&image, 100, 100, 42, params_with_stride(1)).unwrap();
        assert_eq!(field.particles().len(), 1);
        assert_eq!(field.particles()[0].grid, (0, 0));
    }

    #[test]
    fn zero_canvas_dimension_is_an_error() {
        let image = opaque_image(4, 4);
        assert!(ParticleField::new(&image, 0, 100, 42, FieldParams::default()).is_err());
        assert!(ParticleField::new(&image, 100, 0, 42, FieldParams::default()).is_err());
    }

    #[test]
    fn zero_stride_is_an_error() {
        let image = opaque_image(4, 4);
        assert!(matches!(
            ParticleField::new(&image, 100, 100, 42, params_with_stride(0)),
            Err(SketchError::InvalidDimensions)
        ));
    }

    #[test]
    fn preferred_speed_is_drawn_within_configured_range() {
        let field =
            ParticleField::new(&opaque_image(32, 32), 100, 100, 7, params_with_stride(4)).unwrap();
        for p in field.particles() {
            assert!(
                p.preferred_speed >= 1.0 && p.preferred_speed < DEFAULT_MAX_SPEED,
                "preferred speed {} out of range",
                p.preferred_speed
            );
        }
    }

    #[test]
    fn same_seed_builds_identical_particle_sets() {
        let image = opaque_image(32, 32);
        let a = ParticleField::new(&image, 100, 100, 99, params_with_stride(4)).unwrap();
        let b = ParticleField::new(&image, 100, 100, 99, params_with_stride(4)).unwrap();
        assert_eq!(a.particles().len(), b.particles().len());
        for (pa, pb) in a.particles().iter().zip(b.particles()) {
            assert_eq!(pa.home, pb.home);
            assert_eq!(pa.preferred_speed.to_bits(), pb.preferred_speed.to_bits());
        }
    }

    // ---- Per-frame update ----

    #[test]
    fn friction_is_exactly_085_on_the_return_branch() {
        let mut field = single_particle_field();
        field.explode();
        let v0 = field.particles()[0].vel;
        assert!(v0.length() > 0.0);
        // First step: position is still at home, so the spring term is zero
        // and the velocity after the step is exactly v0 * 0.85.
        field.step(&far_pointer()).unwrap();
        let p = &field.particles()[0];
        assert_eq!(p.vel.x.to_bits(), (v0.x * FRICTION).to_bits());
        assert_eq!(p.vel.y.to_bits(), (v0.y * FRICTION).to_bits());
        // Position integrated before friction.
        assert_eq!(p.pos, v0);
    }

    #[test]
    fn pointer_at_particle_applies_full_force_with_fallback_angle() {
        let mut field = single_particle_field();
        // Pointer exactly on the particle: d = 0, force = repel_force,
        // fallback angle 0, swirl = angle + 90 degrees.
        field.step(&FrameInput::at_pointer(0.0, 0.0)).unwrap();
        let p = &field.particles()[0];
        let expected_vy = DEFAULT_REPEL_FORCE * SWIRL_SCALE * FRICTION;
        assert!((p.vel.y - expected_vy).abs() < 1e-9, "vy = {}", p.vel.y);
        // cos(pi/2) is zero up to floating-point noise.
        assert!(p.vel.x.abs() < 1e-9, "vx = {}", p.vel.x);
        assert!((p.pos.y - DEFAULT_REPEL_FORCE * SWIRL_SCALE).abs() < 1e-9);
    }

    #[test]
    fn particle_exactly_at_radius_takes_the_return_branch() {
        let mut field = single_particle_field();
        // Displace the particle so the spring term is observable.
        field.particles[0].pos = DVec2::new(30.0, 0.0);
        // Pointer at exactly hover_radius from the particle's position. The
        // repel branch would add zero force here; the return branch adds the
        // spring toward home.
        let pointer = DVec2::new(30.0 + DEFAULT_HOVER_RADIUS, 0.0);
        field
            .step(&FrameInput {
                pointer,
                ..FrameInput::default()
            })
            .unwrap();
        let p = &field.particles()[0];
        let spring = -30.0 * DEFAULT_RETURN_RATE * RETURN_SCALE;
        assert!((p.vel.x - spring * FRICTION).abs() < 1e-12);
        assert_eq!(p.vel.y, 0.0);
        assert!((p.pos.x - (30.0 + spring)).abs() < 1e-12);
    }

    #[test]
    fn particle_just_inside_radius_swirls_tangentially() {
        let mut field = single_particle_field();
        field.particles[0].pos = DVec2::new(50.0, 0.0);
        // Pointer at the origin: delta points along +x, so the swirl
        // (delta angle + 90 degrees) points along +y.
        field.step(&FrameInput::at_pointer(0.0, 0.0)).unwrap();
        let p = &field.particles()[0];
        let t = (50.0_f64 / DEFAULT_HOVER_RADIUS).powf(DEFAULT_EDGE_EXPONENT);
        let force = DEFAULT_REPEL_FORCE * (1.0 - t);
        let expected_vy = force * SWIRL_SCALE * FRICTION;
        assert!((p.vel.y - expected_vy).abs() < 1e-9);
        assert!(p.vel.x.abs() < 1e-9, "swirl must be tangential, vx = {}", p.vel.x);
    }

    #[test]
    fn stationary_pointer_over_home_never_lets_the_particle_idle() {
        let mut field = single_particle_field();
        let input = FrameInput::at_pointer(0.0, 0.0);
        let mut min_speed = f64::INFINITY;
        for frame in 0..200 {
            field.step(&input).unwrap();
            let speed = field.particles()[0].vel.length();
            if frame >= 10 {
                min_speed = min_speed.min(speed);
            }
        }
        assert!(
            min_speed > 0.01,
            "particle idled near the pointer: min speed {min_speed}"
        );
    }

    #[test]
    fn velocity_decays_toward_zero_after_an_explosion() {
        let mut field = single_particle_field();
        field.explode();
        for _ in 0..400 {
            field.step(&far_pointer()).unwrap();
        }
        let p = &field.particles()[0];
        assert!(p.vel.length() < 1e-3, "velocity did not decay: {}", p.vel);
        // The spring also drags the particle back toward home.
        assert!(p.pos.distance(p.home) < 1.0);
    }

    #[test]
    fn particle_count_is_fixed_across_frames() {
        let mut field =
            ParticleField::new(&opaque_image(20, 20), 100, 100, 42, params_with_stride(4)).unwrap();
        let count = field.particles().len();
        for i in 0..50 {
            let input = if i == 25 {
                far_pointer().with_explode()
            } else {
                far_pointer()
            };
            field.step(&input).unwrap();
        }
        assert_eq!(field.particles().len(), count);
    }

    // ---- Explode ----

    #[test]
    fn explode_adds_radial_impulse_from_canvas_center() {
        let mut field = single_particle_field();
        // Particle at (0, 0), center at (50, 50): the impulse points along
        // the center-to-particle direction, i.e. (-1, -1) normalized.
        field.explode();
        let p = &field.particles()[0];
        let angle = (-50.0_f64).atan2(-50.0);
        let expected = DVec2::new(angle.cos(), angle.sin()) * EXPLODE_IMPULSE;
        assert!((p.vel - expected).length() < 1e-12);
        assert!((p.vel.length() - EXPLODE_IMPULSE).abs() < 1e-12);
    }

    #[test]
    fn explode_at_canvas_center_uses_fallback_angle_zero() {
        let mut field = single_particle_field();
        field.particles[0].pos = DVec2::new(50.0, 50.0);
        field.explode();
        assert_eq!(field.particles()[0].vel, DVec2::new(EXPLODE_IMPULSE, 0.0));
    }

    #[test]
    fn explode_impulse_is_distance_independent() {
        let mut field =
            ParticleField::new(&opaque_image(10, 10), 100, 100, 42, params_with_stride(5)).unwrap();
        field.explode();
        for p in field.particles() {
            assert!(
                (p.vel.length() - EXPLODE_IMPULSE).abs() < 1e-9,
                "impulse magnitude varies with distance"
            );
        }
    }

    // ---- Resize ----

    #[test]
    fn resize_recomputes_homes_from_grid_coordinates() {
        let mut field =
            ParticleField::new(&opaque_image(10, 10), 100, 100, 42, params_with_stride(5)).unwrap();
        field.resize(200, 100).unwrap();
        let homes: Vec<DVec2> = field.particles().iter().map(|p| p.home).collect();
        assert_eq!(
            homes,
            vec![
                DVec2::new(0.0, -50.0),
                DVec2::new(100.0, -50.0),
                DVec2::new(0.0, 50.0),
                DVec2::new(100.0, 50.0),
            ]
        );
    }

    #[test]
    fn resize_twice_with_same_dimensions_is_idempotent() {
        let image = opaque_image(10, 10);
        let mut once =
            ParticleField::new(&image, 100, 100, 42, params_with_stride(5)).unwrap();
        let mut twice =
            ParticleField::new(&image, 100, 100, 42, params_with_stride(5)).unwrap();
        once.resize(320, 240).unwrap();
        twice.resize(320, 240).unwrap();
        twice.resize(320, 240).unwrap();
        for (a, b) in once.particles().iter().zip(twice.particles()) {
            assert_eq!(a.home, b.home);
        }
    }

    #[test]
    fn resize_nudges_velocity_instead_of_snapping() {
        let mut field = single_particle_field();
        field.resize(200, 100).unwrap();
        let p = &field.particles()[0];
        // New home for grid (0, 0): offset (0, -50). Position was (0, 0).
        let expected = (DVec2::new(0.0, -50.0) - DVec2::ZERO) * RESIZE_NUDGE;
        assert_eq!(p.vel, expected);
        // The position itself must not jump.
        assert_eq!(p.pos, DVec2::ZERO);
    }

    #[test]
    fn resize_keeps_creation_time_render_size() {
        let mut field = single_particle_field();
        let size = field.particles()[0].render_size;
        field.resize(500, 500).unwrap();
        assert_eq!(field.particles()[0].render_size, size);
    }

    #[test]
    fn resize_to_zero_is_an_error() {
        let mut field = single_particle_field();
        assert!(field.resize(0, 100).is_err());
        assert!(field.resize(100, 0).is_err());
    }

    // ---- Scene projection ----

    #[test]
    fn scene_draws_one_circle_per_particle() {
        let field =
            ParticleField::new(&opaque_image(10, 10), 100, 100, 42, params_with_stride(5)).unwrap();
        let scene = field.scene();
        let circles = scene
            .shapes()
            .iter()
            .filter(|s| matches!(s, Shape::Circle { .. }))
            .count();
        assert_eq!(circles, field.particles().len());
    }

    #[test]
    fn scene_circle_uses_half_render_size_as_radius() {
        let field = single_particle_field();
        let scene = field.scene();
        match &scene.shapes()[0] {
            Shape::Circle { radius, color, .. } => {
                assert!((radius - field.particles()[0].render_size / 2.0).abs() < f64::EPSILON);
                assert_eq!(*color, Rgba::opaque(200, 100, 50));
            }
            other => panic!("expected a circle, got {other:?}"),
        }
    }

    #[test]
    fn overlay_toggle_adds_and_removes_the_hover_ring() {
        let mut field = single_particle_field();
        let has_ring = |scene: &Scene| {
            scene
                .shapes()
                .iter()
                .any(|s| matches!(s, Shape::Ring { .. }))
        };
        assert!(!has_ring(&field.scene()));

        field
            .step(&FrameInput::at_pointer(40.0, 60.0).with_toggle_overlay())
            .unwrap();
        let scene = field.scene();
        assert!(has_ring(&scene));
        let ring = scene
            .shapes()
            .iter()
            .find_map(|s| match s {
                Shape::Ring { center, radius, .. } => Some((*center, *radius)),
                _ => None,
            })
            .unwrap();
        assert_eq!(ring.0, DVec2::new(40.0, 60.0));
        assert!((ring.1 - DEFAULT_HOVER_RADIUS).abs() < f64::EPSILON);

        field
            .step(&far_pointer().with_toggle_overlay())
            .unwrap();
        assert!(!has_ring(&field.scene()));
    }

    #[test]
    fn credits_appear_as_scrolling_labels() {
        let params = FieldParams {
            stride: 10,
            credits: vec!["ada".into(), "grace".into()],
            ..FieldParams::default()
        };
        let mut field =
            ParticleField::new(&opaque_image(10, 10), 100, 100, 42, params).unwrap();
        let labels_at = |field: &ParticleField| {
            field
                .scene()
                .shapes()
                .iter()
                .filter_map(|s| match s {
                    Shape::Label { position, .. } => Some(position.x),
                    _ => None,
                })
                .collect::<Vec<_>>()
        };
        let before = labels_at(&field);
        assert_eq!(before.len(), 2);
        field.step(&far_pointer()).unwrap();
        let after = labels_at(&field);
        for (b, a) in before.iter().zip(&after) {
            assert!(a < b, "labels must scroll left");
        }
    }

    // ---- Sound toggle ----

    #[test]
    fn sound_toggle_delegates_to_the_sink() {
        let mut field = single_particle_field();
        let mut sink = NullAudio::loaded();
        assert!(field.toggle_sound(&mut sink));
        assert!(field.sound_playing());
        assert!(!field.toggle_sound(&mut sink));
        assert_eq!(sink.play_calls, 1);
        assert_eq!(sink.stop_calls, 1);
    }

    #[test]
    fn sound_toggle_ignores_an_unloaded_sink() {
        let mut field = single_particle_field();
        let mut sink = NullAudio::default();
        assert!(!field.toggle_sound(&mut sink));
        assert!(!field.sound_playing());
        assert_eq!(sink.play_calls, 0);
    }

    // ---- Params ----

    #[test]
    fn from_json_overrides_individual_keys() {
        let image = opaque_image(10, 10);
        let field = ParticleField::from_json(
            &image,
            100,
            100,
            42,
            &json!({"hover_radius": 42.5, "stride": 2, "credits": ["ada"]}),
        )
        .unwrap();
        let params = field.params();
        assert_eq!(params["hover_radius"], 42.5);
        assert_eq!(params["stride"], 2);
        assert_eq!(params["credits"][0], "ada");
        // Untouched keys keep their defaults.
        assert_eq!(params["repel_force"], DEFAULT_REPEL_FORCE);
    }

    #[test]
    fn param_schema_covers_every_param_key() {
        let field = single_particle_field();
        let params = field.params();
        let schema = field.param_schema();
        for key in params.as_object().unwrap().keys() {
            assert!(schema.get(key).is_some(), "schema missing key {key}");
        }
    }

    #[test]
    fn sketch_trait_object_works() {
        let mut boxed: Box<dyn Sketch> = Box::new(single_particle_field());
        boxed.step(&FrameInput::default()).unwrap();
        assert_eq!(boxed.scene().width(), 100);
        assert!(boxed.params().get("stride").is_some());
    }

    // ---- Property-based tests ----

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn render_size_matches_formula_for_any_canvas(
                canvas_w in 1_usize..400,
                canvas_h in 1_usize..400,
                stride in 1_usize..20,
            ) {
                let image = opaque_image(16, 16);
                let field = ParticleField::new(
                    &image, canvas_w, canvas_h, 42, params_with_stride(stride),
                ).unwrap();
                let scale = (canvas_w as f64 / 16.0).max(canvas_h as f64 / 16.0);
                let expected = stride as f64 * 0.8 * scale;
                for p in field.particles() {
                    prop_assert!((p.render_size - expected).abs() < 1e-12);
                }
            }

            #[test]
            fn resize_is_idempotent_for_any_dimensions(
                w in 1_usize..500,
                h in 1_usize..500,
            ) {
                let image = opaque_image(12, 12);
                let mut once = ParticleField::new(
                    &image, 100, 100, 1, params_with_stride(3),
                ).unwrap();
                let mut twice = ParticleField::new(
                    &image, 100, 100, 1, params_with_stride(3),
                ).unwrap();
                once.resize(w, h).unwrap();
                twice.resize(w, h).unwrap();
                twice.resize(w, h).unwrap();
                for (a, b) in once.particles().iter().zip(twice.particles()) {
                    prop_assert_eq!(a.home, b.home);
                }
            }

            #[test]
            fn homes_are_pure_in_canvas_size(
                w in 1_usize..500,
                h in 1_usize..500,
            ) {
                // Resizing away and back must restore the original homes.
                let image = opaque_image(12, 12);
                let mut field = ParticleField::new(
                    &image, 100, 100, 1, params_with_stride(3),
                ).unwrap();
                let original: Vec<DVec2> =
                    field.particles().iter().map(|p| p.home).collect();
                field.resize(w, h).unwrap();
                field.resize(100, 100).unwrap();
                for (p, home) in field.particles().iter().zip(&original) {
                    prop_assert_eq!(&p.home, home);
                }
            }
        }
    }
}
