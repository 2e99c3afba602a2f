use bevy_asset::RenderAssetUsages;
use bevy_mesh::{Indices, Mesh, PrimitiveTopology};
use glam::Vec3;

use crate::{coords::CoordinateSystem, mesh::RenderMesh};

/// Converts a standard (Z-up) coordinate into Bevy's Y-up coordinates.
fn to_bevy(v: Vec3) -> [f32; 3] {
  [v.x, v.z, -v.y]
}

/// Converts a [`RenderMesh`] into a Bevy Mesh that can be spawned directly.
/// Positions and normals are converted into Bevy's coordinate system, and the
/// UV overlay becomes [`Mesh::ATTRIBUTE_UV_0`]. Triangle groups are not
/// preserved.
pub fn render_mesh_to_bevy_mesh<CS: CoordinateSystem>(
  mesh: &RenderMesh<CS>,
) -> Mesh {
  let positions = mesh
    .vertices()
    .iter()
    .map(|vertex| to_bevy(CS::to_standard(&vertex.position)))
    .collect::<Vec<_>>();
  let normals = mesh
    .vertices()
    .iter()
    .map(|vertex| to_bevy(CS::to_standard(&vertex.normal)))
    .collect::<Vec<_>>();
  let uvs =
    mesh.uv_overlay().iter().map(|uv| uv.to_array()).collect::<Vec<_>>();
  let indices = mesh
    .triangles()
    .iter()
    .flat_map(|triangle| triangle.indices)
    .collect::<Vec<_>>();

  Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
    .with_inserted_indices(Indices::U32(indices))
}

#[cfg(test)]
#[path = "mesh_utils_test.rs"]
mod test;
