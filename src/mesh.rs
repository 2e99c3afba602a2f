use glam::{Vec2, Vec3};
use thiserror::Error;
use tracing::warn;

use crate::{
  atlas::UvAtlas, coords::CoordinateSystem, tessellate::is_degenerate,
};

/// A vertex of a [`RenderMesh`].
pub struct RenderVertex<CS: CoordinateSystem> {
  /// The position of the vertex, including the vertical render offset.
  pub position: CS::Coordinate,
  /// The position of the vertex in the UV atlas.
  pub uv: Vec2,
  /// The normal of the vertex. This always points up.
  pub normal: CS::Coordinate,
  /// The color of the vertex. This is always zero.
  pub color: Vec3,
}

impl<CS: CoordinateSystem> Clone for RenderVertex<CS> {
  fn clone(&self) -> Self {
    Self {
      position: self.position.clone(),
      uv: self.uv,
      normal: self.normal.clone(),
      color: self.color,
    }
  }
}

// Manual Debug impl to avoid Debug bound on CoordinateSystem.
impl<CS: CoordinateSystem> std::fmt::Debug for RenderVertex<CS>
where
  CS::Coordinate: std::fmt::Debug,
{
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("RenderVertex")
      .field("position", &self.position)
      .field("uv", &self.uv)
      .field("normal", &self.normal)
      .field("color", &self.color)
      .finish()
  }
}

/// A triangle of a [`RenderMesh`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RenderTriangle {
  /// Indices into the vertices of the mesh.
  pub indices: [u32; 3],
  /// The group of the triangle. Each tile of the navigation mesh gets its own
  /// group, which can be used to partition materials or selection.
  pub group: usize,
}

/// An indexed triangle mesh of a navigation mesh.
pub struct RenderMesh<CS: CoordinateSystem> {
  vertices: Vec<RenderVertex<CS>>,
  triangles: Vec<RenderTriangle>,
  /// The UVs of each vertex, copied from `vertices` when the mesh is
  /// finalized. This is what renderers should read.
  uv_overlay: Vec<Vec2>,
  /// Incremented every time the mesh is finalized or cleared.
  revision: u64,
}

impl<CS: CoordinateSystem> Default for RenderMesh<CS> {
  fn default() -> Self {
    Self::new()
  }
}

impl<CS: CoordinateSystem> Clone for RenderMesh<CS> {
  fn clone(&self) -> Self {
    Self {
      vertices: self.vertices.clone(),
      triangles: self.triangles.clone(),
      uv_overlay: self.uv_overlay.clone(),
      revision: self.revision,
    }
  }
}

// Manual Debug impl to avoid Debug bound on CoordinateSystem.
impl<CS: CoordinateSystem> std::fmt::Debug for RenderMesh<CS>
where
  CS::Coordinate: std::fmt::Debug,
{
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("RenderMesh")
      .field("vertices", &self.vertices)
      .field("triangles", &self.triangles)
      .field("uv_overlay", &self.uv_overlay)
      .field("revision", &self.revision)
      .finish()
  }
}

impl<CS: CoordinateSystem> RenderMesh<CS> {
  /// Creates an empty mesh.
  pub fn new() -> Self {
    Self {
      vertices: Vec::new(),
      triangles: Vec::new(),
      uv_overlay: Vec::new(),
      revision: 0,
    }
  }

  pub fn vertices(&self) -> &[RenderVertex<CS>] {
    &self.vertices
  }

  pub fn triangles(&self) -> &[RenderTriangle] {
    &self.triangles
  }

  /// The per-vertex UVs as of the last time the mesh was finalized.
  pub fn uv_overlay(&self) -> &[Vec2] {
    &self.uv_overlay
  }

  pub fn vertex_count(&self) -> usize {
    self.vertices.len()
  }

  pub fn triangle_count(&self) -> usize {
    self.triangles.len()
  }

  pub fn is_empty(&self) -> bool {
    self.triangles.is_empty()
  }

  /// A counter that changes whenever the mesh is rebuilt or cleared. Renderers
  /// can compare this to know when to upload the mesh again.
  pub fn revision(&self) -> u64 {
    self.revision
  }

  /// Removes all vertices and triangles from the mesh.
  pub fn clear(&mut self) {
    self.clear_buffers();
    self.revision += 1;
  }

  /// Makes this mesh newer than a mesh at `previous_revision` that it
  /// replaces.
  pub(crate) fn supersede(&mut self, previous_revision: u64) {
    self.revision = self.revision.max(previous_revision + 1);
  }

  fn clear_buffers(&mut self) {
    self.vertices.clear();
    self.triangles.clear();
    self.uv_overlay.clear();
  }

  /// Publishes the per-vertex UVs to the overlay and marks the mesh as
  /// changed.
  fn finalize(&mut self) {
    self.uv_overlay.clear();
    self.uv_overlay.extend(self.vertices.iter().map(|vertex| vertex.uv));
    self.revision += 1;
  }
}

/// An error while building a [`RenderMesh`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum MeshBuildError {
  #[error("There is no destination mesh bound to the builder.")]
  InvalidMeshTarget,
  /// Stores the index that was not assigned.
  #[error("The vertex index {0} was not assigned by this builder.")]
  InvalidVertexIndex(u32),
  #[error("The triangle has no area.")]
  DegenerateTriangle,
  #[error("The mesh has too many vertices to index with 32 bits.")]
  TooManyVertices,
}

/// Accumulates vertices and triangles into a destination [`RenderMesh`].
/// Binding a destination clears it. Every assigned vertex is a new vertex;
/// nothing is merged.
pub struct MeshBuilder<CS: CoordinateSystem> {
  target: Option<RenderMesh<CS>>,
  /// The standard-coordinate position of each assigned vertex, without the
  /// render offset.
  positions: Vec<Vec3>,
  atlas: UvAtlas,
  /// The vertical offset added to every vertex.
  z_offset: f32,
}

impl<CS: CoordinateSystem> MeshBuilder<CS> {
  /// Creates a builder for a new mesh.
  pub fn new(atlas: UvAtlas, z_offset: f32) -> Self {
    Self::for_target(Some(RenderMesh::new()), atlas, z_offset)
  }

  /// Creates a builder that builds into `target`, clearing it. If `target` is
  /// [`None`], every operation fails with
  /// [`MeshBuildError::InvalidMeshTarget`].
  pub fn for_target(
    mut target: Option<RenderMesh<CS>>,
    atlas: UvAtlas,
    z_offset: f32,
  ) -> Self {
    if let Some(target) = target.as_mut() {
      target.clear_buffers();
    }
    Self { target, positions: Vec::new(), atlas, z_offset }
  }

  pub fn atlas(&self) -> &UvAtlas {
    &self.atlas
  }

  pub fn vertex_count(&self) -> usize {
    self.target.as_ref().map_or(0, RenderMesh::vertex_count)
  }

  pub fn triangle_count(&self) -> usize {
    self.target.as_ref().map_or(0, RenderMesh::triangle_count)
  }

  /// Appends a vertex at `position` (in standard coordinates). The UV is
  /// computed from `position`, but the floor is decided by `uv_height`, so a
  /// whole polygon can be kept on one floor. Returns the index of the new
  /// vertex.
  pub fn assign_vertex(
    &mut self,
    position: Vec3,
    uv_height: f32,
  ) -> Result<u32, MeshBuildError> {
    let Some(mesh) = self.target.as_mut() else {
      warn!("MeshBuilder has no destination mesh. Dropping vertex.");
      return Err(MeshBuildError::InvalidMeshTarget);
    };
    let index = u32::try_from(mesh.vertices.len())
      .map_err(|_| MeshBuildError::TooManyVertices)?;

    mesh.vertices.push(RenderVertex {
      position: CS::from_standard(&(position + Vec3::Z * self.z_offset)),
      uv: self.atlas.uv(position, uv_height),
      normal: CS::from_standard(&Vec3::Z),
      color: Vec3::ZERO,
    });
    self.positions.push(position);
    Ok(index)
  }

  /// Appends a triangle made of previously assigned vertices. Triangles with
  /// no area are rejected.
  pub fn append_triangle(
    &mut self,
    indices: [u32; 3],
    group: usize,
  ) -> Result<(), MeshBuildError> {
    let Some(mesh) = self.target.as_mut() else {
      return Err(MeshBuildError::InvalidMeshTarget);
    };

    let mut corners = [Vec3::ZERO; 3];
    for (corner, &index) in corners.iter_mut().zip(indices.iter()) {
      *corner = *self
        .positions
        .get(index as usize)
        .ok_or(MeshBuildError::InvalidVertexIndex(index))?;
    }
    if is_degenerate(corners) {
      return Err(MeshBuildError::DegenerateTriangle);
    }

    mesh.triangles.push(RenderTriangle { indices, group });
    Ok(())
  }

  /// Finalizes and returns the mesh.
  pub fn finish(self) -> Result<RenderMesh<CS>, MeshBuildError> {
    let mut mesh = self.target.ok_or(MeshBuildError::InvalidMeshTarget)?;
    mesh.finalize();
    Ok(mesh)
  }
}

#[cfg(test)]
#[path = "mesh_test.rs"]
mod test;
