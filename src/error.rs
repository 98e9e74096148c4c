use std::fmt;
use std::path::PathBuf;

/// Kind of on-disk resource the demo pulls in at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Shader,
    DiffuseTexture,
    NormalMap,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceKind::Shader => "shader",
            ResourceKind::DiffuseTexture => "diffuse texture",
            ResourceKind::NormalMap => "normal map",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    #[error("Failed to load {kind} from {}: {source}", .path.display())]
    ResourceLoad {
        kind: ResourceKind,
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("Degenerate UV mapping on triangle {triangle} (determinant {determinant})")]
    DegenerateGeometry { triangle: usize, determinant: f32 },

    #[error("Graphics API failure: {0}")]
    GraphicsApi(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl DemoError {
    pub fn resource<E>(kind: ResourceKind, path: impl Into<PathBuf>, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    {
        DemoError::ResourceLoad {
            kind,
            path: path.into(),
            source: source.into(),
        }
    }

    pub fn graphics<T: ToString>(msg: T) -> Self {
        DemoError::GraphicsApi(msg.to_string())
    }
}

pub type Result<T, E = DemoError> = std::result::Result<T, E>;
