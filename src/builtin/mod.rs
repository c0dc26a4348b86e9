//! Built-in materials.

pub use self::cube_material::{CubeMaterial, CubeUniforms, CUBE_SHADER_SRC};

mod cube_material;
