/*!
# cubeview

Keep It Simple cube viewer on top of [wgpu](https://wgpu.rs) and
[winit](https://docs.rs/winit).

**cubeview** opens a window, uploads one static mesh (a cube by default) and
draws it every frame with an orbit camera:

* drag with the left mouse button to rotate around the cube;
* scroll to zoom in and out;
* hold `W` to see the wireframe, hold `P` to see the vertices;
* release `S` to write the displayed frame to `screenshot.png`;
* release `Escape` or close the window to quit.

The shader receives three uniforms every frame: the model-view-projection
matrix, the camera position and the time elapsed since the first frame.

```no_run
use cubeview::prelude::*;

fn main() -> cubeview::Result<()> {
    pollster::block_on(async {
        let mut window = Window::new("cubeview").await?;
        let mut camera = OrbitCamera3d::default();
        let mut renderer = CubeRenderer::new(&window.render_context(), CUBE_SHADER_SRC).await?;

        while window.render_3d(&mut renderer, &mut camera).await? {}
        Ok(())
    })
}
```

Nothing here panics on a recoverable failure: every fallible operation returns
a [`Result`] whose error is an [`Error`].
*/
#![allow(non_upper_case_globals)]
#![allow(clippy::module_inception)]
#![allow(clippy::too_many_arguments)]

#[macro_use]
extern crate bitflags;
#[cfg(feature = "serde")]
extern crate serde;

pub use glamx;

pub use crate::error::{Error, Result};

pub mod builtin;
pub mod camera;
pub mod clock;
pub mod context;
pub mod error;
pub mod event;
pub mod procedural;
pub mod render_mode;
pub mod renderer;
pub mod resource;
pub mod window;

pub mod prelude {
    pub use crate::builtin::*;
    pub use crate::camera::*;
    pub use crate::clock::FrameClock;
    pub use crate::context::*;
    pub use crate::error::Error;
    pub use crate::event::*;
    pub use crate::procedural::{cube, RenderMesh};
    pub use crate::render_mode::*;
    pub use crate::renderer::*;
    pub use crate::resource::*;
    pub use crate::window::*;
    pub use glamx::{Mat4, Vec2, Vec3};
}
