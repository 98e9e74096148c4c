use std::path::PathBuf;

use clap::Parser;
use glam::Vec3;

use crate::error::{DemoError, Result};

#[derive(Parser, Debug)]
#[command(author, version, about = "Normal mapping on a textured plane", long_about = None)]
pub struct Args {
    /// Diffuse (color) texture
    #[arg(long, default_value = "resources/brickwall.png")]
    pub diffuse: PathBuf,

    /// Tangent-space normal map
    #[arg(long, default_value = "resources/brickwall_normal.png")]
    pub normal_map: PathBuf,

    /// WGSL source to use instead of the built-in shader
    #[arg(long)]
    pub shader: Option<PathBuf>,

    /// World-space scale of the ground quad
    #[arg(long, default_value_t = 1000.0)]
    pub quad_size: f32,

    /// Texture repeats across the quad [default: quad size]
    #[arg(long)]
    pub uv_repeat: Option<f32>,

    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    #[arg(long, default_value_t = 720)]
    pub height: u32,

    /// Light position as X,Y,Z
    #[arg(long, default_value = "0.5,1.0,0.3", value_parser = parse_vec3)]
    pub light: Vec3,

    /// Circle the light around the plane normal
    #[arg(long)]
    pub orbit_light: bool,

    /// Present without waiting for vertical sync
    #[arg(long)]
    pub no_vsync: bool,
}

fn parse_vec3(s: &str) -> std::result::Result<Vec3, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected X,Y,Z but got '{s}'"));
    }
    let mut out = [0.0f32; 3];
    for (slot, part) in out.iter_mut().zip(parts) {
        *slot = part
            .parse()
            .map_err(|e| format!("invalid component '{part}': {e}"))?;
    }
    Ok(Vec3::from_array(out))
}

#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    pub diffuse_path: PathBuf,
    pub normal_map_path: PathBuf,
    pub shader_path: Option<PathBuf>,
    pub quad_size: f32,
    pub uv_repeat: f32,
    pub width: u32,
    pub height: u32,
    pub light_position: Vec3,
    pub orbit_light: bool,
    pub vsync: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            diffuse_path: PathBuf::from("resources/brickwall.png"),
            normal_map_path: PathBuf::from("resources/brickwall_normal.png"),
            shader_path: None,
            quad_size: 1000.0,
            uv_repeat: 1000.0,
            width: 1280,
            height: 720,
            light_position: Vec3::new(0.5, 1.0, 0.3),
            orbit_light: false,
            vsync: true,
        }
    }
}

impl TryFrom<Args> for DemoConfig {
    type Error = DemoError;

    fn try_from(args: Args) -> Result<Self> {
        let config = Self {
            diffuse_path: args.diffuse,
            normal_map_path: args.normal_map,
            shader_path: args.shader,
            quad_size: args.quad_size,
            uv_repeat: args.uv_repeat.unwrap_or(args.quad_size),
            width: args.width,
            height: args.height,
            light_position: args.light,
            orbit_light: args.orbit_light,
            vsync: !args.no_vsync,
        };
        config.validate()?;
        Ok(config)
    }
}

impl DemoConfig {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("quad size", self.quad_size), ("uv repeat", self.uv_repeat)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(DemoError::InvalidConfig(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        if self.width == 0 || self.height == 0 {
            return Err(DemoError::InvalidConfig(format!(
                "window size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if !self.light_position.is_finite() {
            return Err(DemoError::InvalidConfig("light position must be finite".into()));
        }
        Ok(())
    }

    pub fn present_mode(&self) -> wgpu::PresentMode {
        if self.vsync {
            wgpu::PresentMode::Fifo
        } else {
            wgpu::PresentMode::AutoNoVsync
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<DemoConfig> {
        let argv = std::iter::once("normal-map-demo").chain(args.iter().copied());
        DemoConfig::try_from(Args::try_parse_from(argv).expect("arguments should parse"))
    }

    #[test]
    fn test_defaults_match_default_config() {
        assert_eq!(parse(&[]).unwrap(), DemoConfig::default());
    }

    #[test]
    fn test_uv_repeat_follows_quad_size() {
        let config = parse(&["--quad-size", "10"]).unwrap();
        assert_eq!(config.quad_size, 10.0);
        assert_eq!(config.uv_repeat, 10.0);

        let config = parse(&["--quad-size", "10", "--uv-repeat", "4"]).unwrap();
        assert_eq!(config.uv_repeat, 4.0);
    }

    #[test]
    fn test_light_position_parsing() {
        let config = parse(&["--light", "1, -2.5,3"]).unwrap();
        assert_eq!(config.light_position, Vec3::new(1.0, -2.5, 3.0));

        assert!(Args::try_parse_from(["normal-map-demo", "--light", "1,2"]).is_err());
        assert!(Args::try_parse_from(["normal-map-demo", "--light", "1,x,2"]).is_err());
    }

    #[test]
    fn test_rejects_non_positive_sizes() {
        assert!(matches!(
            parse(&["--quad-size", "0"]),
            Err(DemoError::InvalidConfig(_))
        ));
        assert!(matches!(
            parse(&["--uv-repeat=-1"]),
            Err(DemoError::InvalidConfig(_))
        ));
        assert!(matches!(
            parse(&["--width", "0"]),
            Err(DemoError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_vsync_flag() {
        assert_eq!(parse(&[]).unwrap().present_mode(), wgpu::PresentMode::Fifo);
        assert_eq!(
            parse(&["--no-vsync"]).unwrap().present_mode(),
            wgpu::PresentMode::AutoNoVsync
        );
    }
}
