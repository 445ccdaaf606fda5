// Centralized defaults for xrchart charts. Collected into `ChartDefaults`,
// where any of them can be overridden.

// Chart bounds (scene units)
pub const DEFAULT_CHART_WIDTH: f64 = 4.0;
pub const DEFAULT_CHART_HEIGHT: f64 = 4.0;
pub const DEFAULT_CHART_DEPTH: f64 = 2.0;

// Bars: extent along x/z when the channel is absent
pub const DEFAULT_BAR_SIZE: f64 = 0.5;
// Bars: height when no y channel is bound
pub const DEFAULT_BAR_HEIGHT_WITHOUT_Y: f64 = 1.0;

// Pie / doughnut
pub const DEFAULT_PIE_RADIUS: f64 = 1.0;
pub const DEFAULT_PIE_INNER_RADIUS: f64 = 0.0;
pub const DEFAULT_PIE_THICKNESS: f64 = 0.2;
// Turns the pie to face the camera
pub const DEFAULT_PIE_ROTATION: [f64; 3] = [-90.0, 0.0, 0.0];

// Points
pub const DEFAULT_POINT_RADIUS: f64 = 0.5;
pub const DEFAULT_POINT_COLOR: &str = "blue";
pub const DEFAULT_POINT_X_SEPARATION: f64 = 1.0;

// Image and glTF marks
pub const DEFAULT_IMAGE_WIDTH: f64 = 1.0;
pub const DEFAULT_IMAGE_HEIGHT: f64 = 1.0;
pub const DEFAULT_GLTF_SCALE: [f64; 3] = [1.0, 1.0, 1.0];

// Axes
pub const DEFAULT_TICK_COUNT: usize = 5;
pub const LABELS_X_DELTA: f64 = -0.5;
pub const LABELS_Y_DELTA: f64 = 0.01;
pub const X_LABELS_Z_DELTA: f64 = 0.5;
pub const AXIS_COLOR: &str = "black";
