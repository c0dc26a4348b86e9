use std::path::PathBuf;

use clap::Parser;
use cubeview::builtin::CUBE_SHADER_SRC;
use cubeview::camera::OrbitCamera3d;
use cubeview::renderer::CubeRenderer;
use cubeview::window::{
    CanvasSetup, NumSamples, Window, DEFAULT_HEIGHT, DEFAULT_SCREENSHOT_PATH, DEFAULT_WIDTH,
};
use cubeview::{Error, Result};

#[derive(Parser, Debug)]
#[command(name = "cubeview", version, about = "Orbit around a lit cube")]
struct Cli {
    /// Window width in logical pixels
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: u32,

    /// Window height in logical pixels
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: u32,

    /// Window title
    #[arg(long, default_value = "Tick 3")]
    title: String,

    /// WGSL shader with `vs_main` and `fs_main` entry points, replacing the built-in one
    #[arg(long)]
    shader: Option<PathBuf>,

    /// File written when `S` is released
    #[arg(long, default_value = DEFAULT_SCREENSHOT_PATH)]
    screenshot: PathBuf,

    /// Present frames as fast as possible
    #[arg(long)]
    no_vsync: bool,

    /// MSAA samples per pixel (0, 1, 2, 4, 8 or 16)
    #[arg(long, default_value_t = 0)]
    samples: u32,

    /// Let the user resize the window
    #[arg(long)]
    resizable: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn setup(&self) -> Result<CanvasSetup> {
        let samples = NumSamples::from_u32(self.samples).ok_or_else(|| {
            Error::InvalidSetup(format!(
                "{} is not a valid sample count (expected 0, 1, 2, 4, 8 or 16)",
                self.samples
            ))
        })?;

        Ok(CanvasSetup {
            vsync: !self.no_vsync,
            samples,
            resizable: self.resizable,
            ..CanvasSetup::default()
        })
    }

    fn shader_source(&self) -> Result<String> {
        match &self.shader {
            Some(path) => std::fs::read_to_string(path).map_err(|source| Error::ShaderSource {
                path: path.clone(),
                source,
            }),
            None => Ok(CUBE_SHADER_SRC.to_string()),
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let setup = cli.setup()?;
    let shader_source = cli.shader_source()?;

    let mut window = Window::new_with_setup(&cli.title, cli.width, cli.height, setup).await?;
    window.set_screenshot_path(cli.screenshot.clone());

    let mut camera = OrbitCamera3d::default();
    let mut renderer = CubeRenderer::new(&window.render_context(), &shader_source).await?;

    log::info!("W: wireframe, P: points, S: screenshot, Escape: quit");

    while window.render_3d(&mut renderer, &mut camera).await? {}

    log::info!("window closed");
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.verbose {
        logger.filter_module("cubeview", log::LevelFilter::Debug);
    }
    logger.init();

    if let Err(e) = pollster::block_on(run(cli)) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_demo_window() {
        let cli = Cli::try_parse_from(["cubeview"]).unwrap();
        assert_eq!(cli.width, 800);
        assert_eq!(cli.height, 600);
        assert_eq!(cli.title, "Tick 3");
        assert_eq!(cli.screenshot, PathBuf::from("screenshot.png"));
        assert!(cli.shader.is_none());

        let setup = cli.setup().unwrap();
        assert_eq!(setup, CanvasSetup::default());
    }

    #[test]
    fn flags_override_the_canvas_setup() {
        let cli = Cli::try_parse_from([
            "cubeview",
            "--no-vsync",
            "--samples",
            "4",
            "--resizable",
            "--width",
            "1024",
        ])
        .unwrap();
        let setup = cli.setup().unwrap();

        assert_eq!(cli.width, 1024);
        assert!(!setup.vsync);
        assert!(setup.resizable);
        assert!(setup.centered);
        assert_eq!(setup.samples, NumSamples::Four);
    }

    #[test]
    fn invalid_sample_counts_are_rejected() {
        let cli = Cli::try_parse_from(["cubeview", "--samples", "3"]).unwrap();
        assert!(matches!(cli.setup(), Err(Error::InvalidSetup(_))));
    }

    #[test]
    fn missing_shader_file_is_reported_with_its_path() {
        let cli =
            Cli::try_parse_from(["cubeview", "--shader", "/nonexistent/cube.wgsl"]).unwrap();
        match cli.shader_source() {
            Err(Error::ShaderSource { path, .. }) => {
                assert_eq!(path, PathBuf::from("/nonexistent/cube.wgsl"))
            }
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn builtin_shader_is_used_by_default() {
        let cli = Cli::try_parse_from(["cubeview"]).unwrap();
        assert_eq!(cli.shader_source().unwrap(), CUBE_SHADER_SRC);
    }
}
