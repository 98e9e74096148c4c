//! Per-triangle tangent space for normal mapping.
//!
//! The tangent follows increasing U and the bitangent increasing V across the
//! triangle's surface. Neither vector is normalized: their length carries the
//! UV-to-model-space scale, and the shader renormalizes after interpolation.

use glam::{Vec2, Vec3};

use crate::error::{DemoError, Result};

/// Triangles of a quad given as corner indices, in emission order.
pub const QUAD_TRIANGLES: [[usize; 3]; 2] = [[0, 1, 2], [0, 2, 3]];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TangentBasis {
    pub tangent: Vec3,
    pub bitangent: Vec3,
}

/// Solves the tangent/bitangent pair for one triangle.
///
/// `triangle` is only used to label a degenerate-UV error.
pub fn compute_triangle_basis(
    triangle: usize,
    positions: [Vec3; 3],
    uvs: [Vec2; 3],
) -> Result<TangentBasis> {
    let edge1 = positions[1] - positions[0];
    let edge2 = positions[2] - positions[0];
    let delta_uv1 = uvs[1] - uvs[0];
    let delta_uv2 = uvs[2] - uvs[0];

    let determinant = delta_uv1.x * delta_uv2.y - delta_uv2.x * delta_uv1.y;
    // Relative to the UV edge lengths so uniformly tiny or huge UV scales still pass.
    let tolerance = f32::EPSILON * delta_uv1.length() * delta_uv2.length();
    if !determinant.is_finite() || determinant.abs() <= tolerance {
        return Err(DemoError::DegenerateGeometry { triangle, determinant });
    }

    let f = 1.0 / determinant;
    let tangent = f * (delta_uv2.y * edge1 - delta_uv1.y * edge2);
    let bitangent = f * (-delta_uv2.x * edge1 + delta_uv1.x * edge2);

    Ok(TangentBasis { tangent, bitangent })
}

/// Computes one basis per triangle of the quad `(0,1,2)` and `(0,2,3)`.
///
/// The flat normal is part of the quad description but does not enter the
/// solve; it is carried through to the vertex records unchanged.
pub fn compute_tangent_basis(
    positions: &[Vec3; 4],
    uvs: &[Vec2; 4],
    _normal: Vec3,
) -> Result<[TangentBasis; 2]> {
    let solve = |triangle: usize| {
        let [a, b, c] = QUAD_TRIANGLES[triangle];
        compute_triangle_basis(
            triangle,
            [positions[a], positions[b], positions[c]],
            [uvs[a], uvs[b], uvs[c]],
        )
    };

    Ok([solve(0)?, solve(1)?])
}
