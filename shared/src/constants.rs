/// Simulated time added to the water clock on every rendered frame.
pub const FRAME_TIME_STEP: f64 = 1.0 / 60.0;

pub const DEFAULT_SUN_ELEVATION_DEGREES: f32 = 2.0;
pub const DEFAULT_SUN_AZIMUTH_DEGREES: f32 = 180.0;
/// Lowest accepted sun elevation. The nadir itself is excluded.
pub const MIN_ELEVATION_DEGREES: f32 = -89.9;
pub const MAX_ELEVATION_DEGREES: f32 = 90.0;

pub const SCROLL_SENSITIVITY: f32 = 0.05;
pub const CAMERA_MIN_DEPTH: f32 = -800.0;
pub const CAMERA_MAX_DEPTH: f32 = 0.0;
/// Browser wheel events report roughly this many pixels per line.
pub const PIXELS_PER_SCROLL_LINE: f32 = 100.0;

pub const CAMERA_FOV_DEGREES: f32 = 60.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 10_000.0;

pub const SKY_HDR_PATH: &str = "textures/sky.hdr";
pub const BACKDROP_IMAGE_PATH: &str = "textures/sky.jpg";
pub const MODEL_PATH: &str = "models/model.glb";
pub const WATER_NORMALS_PATH: &str = "textures/waternormals.jpg";
pub const CONFIG_FILE_NAME: &str = "seascape.ron";
pub const DEFAULT_SKYBOX_FACE_SIZE: u32 = 512;

pub const CONFIG_READ_ERROR: &str = "Failed to read scene configuration";
pub const CONFIG_WRITE_ERROR: &str = "Failed to write default scene configuration";
