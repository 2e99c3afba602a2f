use glam::Vec3;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
  atlas::{clamp_margin, UvAtlas},
  bounds::RenderBounds,
  coords::CoordinateSystem,
  dedup::PolygonDeduplicator,
  floors::FloorSet,
  mesh::{MeshBuildError, MeshBuilder, RenderMesh},
  source::PolygonSource,
  tessellate::fan_triangles,
};

/// Options for how navigation meshes are rendered.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderOptions {
  /// The heights that separate floors of the navigation mesh, relative to the
  /// bottom of the navigation mesh. Each floor gets its own island in the UV
  /// atlas. Heights may be given in any order.
  pub floor_heights: Vec<f32>,
  /// The fraction of each UV island to leave as a margin. Clamped to
  /// `[0, 1]`. Large margins with many floors can push UVs outside of
  /// `[0, 1]`, so this should be kept small.
  pub island_margin: f32,
  /// The vertical offset added to every vertex, so the mesh can be drawn
  /// slightly above the surface it represents.
  pub z_offset: f32,
}

impl Default for RenderOptions {
  fn default() -> Self {
    Self { floor_heights: Vec::new(), island_margin: 0.02, z_offset: 0.0 }
  }
}

impl RenderOptions {
  /// The configured floors.
  pub fn floors(&self) -> FloorSet {
    FloorSet::new(self.floor_heights.iter().copied())
  }

  /// The island margin after clamping.
  pub fn island_margin(&self) -> f32 {
    clamp_margin(self.island_margin)
  }
}

/// Statistics about a finished build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct BuildReport {
  /// The number of tiles in the source.
  pub tile_count: usize,
  /// The number of floors in the UV atlas.
  pub floor_count: usize,
  /// The number of vertices in the mesh.
  pub vertex_count: usize,
  /// The number of triangles in the mesh.
  pub triangle_count: usize,
  /// The number of polygons ignored because an equal polygon was already
  /// rendered.
  pub duplicate_polygons: usize,
  /// The number of polygons that could not be rendered.
  pub skipped_polygons: usize,
  /// The number of triangles dropped for having no area.
  pub degenerate_triangles: usize,
}

/// An error when building a render mesh.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
  #[error("The navigation data is unavailable.")]
  SourceUnavailable,
  /// Stores the tile the incremental build expected and the tile requested.
  #[error("The incremental build expected tile {expected}, but got {actual}.")]
  StepOutOfOrder { expected: usize, actual: usize },
  #[error(transparent)]
  Mesh(#[from] MeshBuildError),
}

/// The result of a build.
pub struct BuiltMesh<CS: CoordinateSystem> {
  /// The rendered navigation mesh.
  pub mesh: RenderMesh<CS>,
  /// The culling bounds of `mesh`.
  pub bounds: RenderBounds,
  /// The atlas used to compute UVs.
  pub atlas: UvAtlas,
  /// Statistics about the build.
  pub report: BuildReport,
}

/// Builds a render mesh from every tile of `source` in one go. For large
/// navigation meshes this can take a while, see
/// [`crate::IncrementalBuild`] to spread the work out.
pub fn build_render_mesh<CS: CoordinateSystem, S: PolygonSource<CS> + ?Sized>(
  source: &S,
  options: &RenderOptions,
) -> Result<BuiltMesh<CS>, BuildError> {
  let mut state = BuildState::start(source, options)?;
  for tile in 0..state.report.tile_count {
    state.append_tile(source, tile);
  }
  state.finish()
}

/// The accumulated state of a build. Full and incremental builds share this so
/// that both produce the same mesh.
pub(crate) struct BuildState<CS: CoordinateSystem> {
  builder: MeshBuilder<CS>,
  dedup: PolygonDeduplicator,
  pub(crate) report: BuildReport,
}

impl<CS: CoordinateSystem> BuildState<CS> {
  /// Starts a build by computing the atlas for the current bounds of
  /// `source`.
  pub(crate) fn start<S: PolygonSource<CS> + ?Sized>(
    source: &S,
    options: &RenderOptions,
  ) -> Result<Self, BuildError> {
    let nav_mesh_bounds = match source.bounds() {
      Ok(bounds) => bounds,
      Err(err) => {
        warn!("Unable to render navigation mesh: {err}");
        return Err(BuildError::SourceUnavailable);
      }
    };
    let atlas =
      UvAtlas::new(nav_mesh_bounds, &options.floors(), options.island_margin);

    Ok(Self {
      report: BuildReport {
        tile_count: source.tile_count(),
        floor_count: atlas.floor_count(),
        ..Default::default()
      },
      builder: MeshBuilder::new(atlas, options.z_offset),
      dedup: PolygonDeduplicator::new(),
    })
  }

  pub(crate) fn triangle_count(&self) -> usize {
    self.builder.triangle_count()
  }

  /// Appends every polygon of `tile` that has not been appended yet.
  pub(crate) fn append_tile<S: PolygonSource<CS> + ?Sized>(
    &mut self,
    source: &S,
    tile: usize,
  ) {
    for polygon in source.polygons_in_tile(tile) {
      let centroid = CS::to_standard(&polygon.centroid);
      if !self.dedup.insert(centroid) {
        self.report.duplicate_polygons += 1;
        continue;
      }

      let boundary = match source.boundary_vertices(polygon.reference) {
        Ok(boundary) if boundary.len() >= 3 => {
          boundary.iter().map(CS::to_standard).collect::<Vec<_>>()
        }
        Ok(boundary) => {
          warn!(
            "Skipping polygon {:?} with only {} boundary vertices.",
            polygon.reference,
            boundary.len()
          );
          self.report.skipped_polygons += 1;
          continue;
        }
        Err(err) => {
          warn!("Skipping polygon: {err}");
          self.report.skipped_polygons += 1;
          continue;
        }
      };

      if let Err(err) = self.append_polygon(centroid, &boundary, tile) {
        warn!("Skipping polygon {:?}: {err}", polygon.reference);
        self.report.skipped_polygons += 1;
      }
    }
  }

  fn append_polygon(
    &mut self,
    centroid: Vec3,
    boundary: &[Vec3],
    group: usize,
  ) -> Result<(), MeshBuildError> {
    // The whole polygon goes on the floor of its centroid, so polygons are
    // never split between UV islands.
    let uv_height = centroid.z;

    let mut indices = Vec::with_capacity(boundary.len() + 1);
    indices.push(self.builder.assign_vertex(centroid, uv_height)?);
    for &vertex in boundary {
      indices.push(self.builder.assign_vertex(vertex, uv_height)?);
    }

    for [a, b, c] in fan_triangles(boundary.len()) {
      match self
        .builder
        .append_triangle([indices[a], indices[b], indices[c]], group)
      {
        Ok(()) => {}
        Err(MeshBuildError::DegenerateTriangle) => {
          self.report.degenerate_triangles += 1;
        }
        Err(err) => return Err(err),
      }
    }
    Ok(())
  }

  /// Finalizes the mesh.
  pub(crate) fn finish(self) -> Result<BuiltMesh<CS>, BuildError> {
    let atlas = self.builder.atlas().clone();
    let mesh = self.builder.finish()?;
    let report = BuildReport {
      vertex_count: mesh.vertex_count(),
      triangle_count: mesh.triangle_count(),
      ..self.report
    };
    debug!(
      "Finished rendering navigation mesh: {} triangles, {} vertices, {} floors. Dropped {} degenerate triangles.",
      report.triangle_count,
      report.vertex_count,
      report.floor_count,
      report.degenerate_triangles,
    );

    Ok(BuiltMesh {
      bounds: RenderBounds::from_nav_mesh_size(Vec3::ZERO, atlas.size()),
      mesh,
      atlas,
      report,
    })
  }
}

#[cfg(test)]
#[path = "build_test.rs"]
mod test;
