use macroquad::prelude::Color;

pub const INITIAL_WINDOW_WIDTH: i32 = 1280;
pub const INITIAL_WINDOW_HEIGHT: i32 = 800;
pub const MSAA_SAMPLES: i32 = 4;
pub const UI_FONT_PATH: &str = "assets/fonts/Lato-Regular.ttf";

pub const PANEL_POS: (f32, f32) = (40.0, 40.0);
pub const PANEL_SIZE: (f32, f32) = (300.0, 360.0);

pub const SPEED_RANGE: (f32, f32) = (0.0, 50.0);
pub const ANGLE_RANGE: (f32, f32) = (0.0, 90.0);
pub const DRAG_RANGE: (f32, f32) = (0.0, 0.1);
pub const GRAVITY_RANGE: (f32, f32) = (1.0, 25.0);

pub const MAJOR_TICK_PX: f32 = 10.0;
pub const BALL_RADIUS_PX: f32 = 6.0;
pub const ARROW_HEAD_PX: f32 = 6.0;
pub const VELOCITY_ARROW_SCALE: f32 = 2.0; // px per m/s
pub const FORCE_ARROW_SCALE: f32 = 4.0; // px per N/kg

pub const AXIS_COLOR: Color = Color::new(0.13, 0.13, 0.13, 1.0);
pub const TICK_COLOR: Color = Color::new(0.4, 0.4, 0.4, 1.0);
pub const PATH_COLOR: Color = Color::new(0.0, 0.47, 0.8, 1.0);
pub const DRAG_COLOR: Color = Color::new(1.0, 0.65, 0.0, 1.0);
pub const GRAVITY_COLOR: Color = Color::new(0.65, 0.16, 0.16, 1.0);
pub const NET_COLOR: Color = Color::new(0.5, 0.0, 0.5, 1.0);

pub const GRAPH_SIZE: (f32, f32) = (250.0, 100.0);
pub const GRAPH_TOP: f32 = 140.0;
pub const GRAPH_GAP: f32 = 30.0;
pub const VELOCITY_GRAPH_LIMIT_MPS: f64 = 50.0;
pub const GRAPH_FRAME_COLOR: Color = Color::new(0.67, 0.67, 0.67, 1.0);
