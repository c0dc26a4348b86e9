//! Camera trait with the orbit camera implementation.

pub use self::camera3d::Camera3d;
pub use self::orbit3d::{OrbitCamera3d, DEFAULT_FOV_Y};

mod camera3d;
mod orbit3d;
