mod mesh;
mod quad;
pub mod tangent;
mod texture;
mod vertex;

pub use mesh::QuadMesh;
pub use quad::{flatten, Quad, QUAD_VERTEX_COUNT};
pub use tangent::{compute_tangent_basis, compute_triangle_basis, TangentBasis};
pub use texture::{decode_rgba, format_for, Texture};
pub use vertex::{NormalMappedVertex, FLOATS_PER_VERTEX};
