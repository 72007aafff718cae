#![deny(unsafe_code)]
//! A car parked on a road: sky background, road strip along the bottom
//! edge, rounded car body with two windows and two wheels.
//!
//! The scene is static; stepping only advances the frame counter. The
//! geometry is anchored to the bottom of the canvas so the road stays in
//! place at any canvas height.

use glam::DVec2;
use pixel_swarm_core::params::param_f64;
use pixel_swarm_core::{FrameInput, Rgba, Scene, Shape, Sketch, SketchError};
use serde_json::{json, Value};

/// Default x position of the car's left edge.
const DEFAULT_CAR_X: f64 = 200.0;
/// Height of the road strip along the bottom edge.
const ROAD_HEIGHT: f64 = 100.0;
/// Car body width.
const CAR_WIDTH: f64 = 100.0;
/// Car body height.
const CAR_HEIGHT: f64 = 40.0;
/// Corner rounding of the car body.
const CAR_CORNER: f64 = 10.0;
/// Window width and height.
const WINDOW_SIZE: DVec2 = DVec2::new(30.0, 20.0);
/// Corner rounding of the windows.
const WINDOW_CORNER: f64 = 5.0;
/// Wheel radius.
const WHEEL_RADIUS: f64 = 10.0;

const SKY: Rgba = Rgba {
    r: 135,
    g: 206,
    b: 235,
    a: 255,
};
const ASPHALT: Rgba = Rgba {
    r: 50,
    g: 50,
    b: 50,
    a: 255,
};
const BODY: Rgba = Rgba {
    r: 255,
    g: 0,
    b: 0,
    a: 255,
};
const GLASS: Rgba = Rgba {
    r: 200,
    g: 200,
    b: 200,
    a: 255,
};

/// Parameters for the road scene.
#[derive(Debug, Clone)]
pub struct RoadParams {
    /// X position of the car's left edge.
    pub car_x: f64,
}

impl Default for RoadParams {
    fn default() -> Self {
        Self {
            car_x: DEFAULT_CAR_X,
        }
    }
}

impl RoadParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        Self {
            car_x: param_f64(params, "car_x", DEFAULT_CAR_X),
        }
    }
}

/// The car-on-a-road sketch.
#[derive(Debug, Clone)]
pub struct RoadScene {
    width: usize,
    height: usize,
    params: RoadParams,
    frame: u64,
}

impl RoadScene {
    /// Creates the scene for the given canvas dimensions.
    pub fn new(width: usize, height: usize, params: RoadParams) -> Result<Self, SketchError> {
        if width == 0 || height == 0 {
            return Err(SketchError::InvalidDimensions);
        }
        Ok(Self {
            width,
            height,
            params,
            frame: 0,
        })
    }

    /// Creates the scene from a JSON params object.
    pub fn from_json(width: usize, height: usize, params: &Value) -> Result<Self, SketchError> {
        Self::new(width, height, RoadParams::from_json(params))
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Frames stepped so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }
}

impl Sketch for RoadScene {
    fn step(&mut self, _input: &FrameInput) -> Result<(), SketchError> {
        self.frame += 1;
        Ok(())
    }

    fn scene(&self) -> Scene {
        let h = self.height as f64;
        let car_x = self.params.car_x;
        let road_top = h - ROAD_HEIGHT;
        let body_top = road_top - 50.0;
        let mut scene = Scene::new(self.width, self.height, SKY);
        scene.push(Shape::Rect {
            position: DVec2::new(0.0, road_top),
            size: DVec2::new(self.width as f64, ROAD_HEIGHT),
            corner_radius: 0.0,
            color: ASPHALT,
        });
        scene.push(Shape::Rect {
            position: DVec2::new(car_x, body_top),
            size: DVec2::new(CAR_WIDTH, CAR_HEIGHT),
            corner_radius: CAR_CORNER,
            color: BODY,
        });
        for window_x in [15.0, 55.0] {
            scene.push(Shape::Rect {
                position: DVec2::new(car_x + window_x, body_top - 20.0),
                size: WINDOW_SIZE,
                corner_radius: WINDOW_CORNER,
                color: GLASS,
            });
        }
        for wheel_x in [20.0, 80.0] {
            scene.push(Shape::Ellipse {
                center: DVec2::new(car_x + wheel_x, road_top - 10.0),
                radii: DVec2::new(WHEEL_RADIUS, WHEEL_RADIUS),
                color: Rgba::BLACK,
            });
        }
        scene
    }

    fn params(&self) -> Value {
        json!({ "car_x": self.params.car_x })
    }

    fn param_schema(&self) -> Value {
        json!({
            "car_x": {
                "type": "number",
                "default": DEFAULT_CAR_X,
                "min": 0.0,
                "max": 10_000.0,
                "description": "X position of the car's left edge"
            }
        })
    }
}
