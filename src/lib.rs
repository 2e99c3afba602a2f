#![doc = include_str!("../README.md")]

mod atlas;
mod bounds;
mod build;
mod coords;
mod dedup;
mod floors;
mod incremental;
mod mesh;
mod nav_mesh;
mod source;
mod tessellate;
mod util;

#[cfg(feature = "mesh-utils")]
mod mesh_utils;

use slotmap::{new_key_type, HopSlotMap};

pub use glam::{Vec2, Vec3};

pub mod debug;

pub use atlas::UvAtlas;
pub use bounds::RenderBounds;
pub use build::{
  build_render_mesh, BuildError, BuildReport, BuiltMesh, RenderOptions,
};
pub use coords::{CoordinateSystem, YUp, XYZ};
pub use dedup::PolygonDeduplicator;
pub use floors::{FloorLayout, FloorSet};
pub use incremental::{IncrementalBuild, StepOutcome};
pub use mesh::{
  MeshBuildError, MeshBuilder, RenderMesh, RenderTriangle, RenderVertex,
};
pub use nav_mesh::{
  TiledNavigationMesh, ValidTiledNavigationMesh, ValidationError,
};
pub use source::{NavPolygon, PolygonRef, PolygonSource, SourceError};
pub use tessellate::{fan_triangles, tessellate_polygon};
pub use util::BoundingBox;

#[cfg(feature = "mesh-utils")]
pub use mesh_utils::render_mesh_to_bevy_mesh;

new_key_type! {
  /// The ID of a listener added to a [`NavMeshRenderer`].
  pub struct ListenerId;
}

/// What caused a [`MeshUpdate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeshUpdateKind {
  /// The mesh was rebuilt with [`NavMeshRenderer::rebuild`].
  Rebuilt,
  /// The mesh was emptied with [`NavMeshRenderer::clear`].
  Cleared,
  /// An incremental build finished and replaced the mesh.
  IncrementalBuildFinished,
}

/// Sent to listeners whenever the mesh of a [`NavMeshRenderer`] changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeshUpdate {
  pub kind: MeshUpdateKind,
  pub vertex_count: usize,
  pub triangle_count: usize,
  /// The revision of the new mesh.
  pub revision: u64,
}

/// The state of an incremental build after a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IncrementalStatus {
  /// The build needs more steps. `next_tile` is the tile index to pass next.
  InProgress { next_tile: usize, tile_count: usize },
  /// The build finished and the mesh was replaced.
  Finished(BuildReport),
}

/// Keeps a render mesh of a navigation mesh up to date, and notifies
/// listeners when it changes.
pub struct NavMeshRenderer<CS: CoordinateSystem> {
  /// The options used by the next build.
  pub options: RenderOptions,
  mesh: Option<RenderMesh<CS>>,
  bounds: RenderBounds,
  atlas: UvAtlas,
  /// The newest revision handed out, so meshes never go back in revision,
  /// even after being taken.
  revision: u64,
  incremental_build: Option<IncrementalBuild<CS>>,
  listeners: HopSlotMap<ListenerId, Box<dyn FnMut(&MeshUpdate)>>,
}

impl<CS: CoordinateSystem> Default for NavMeshRenderer<CS> {
  fn default() -> Self {
    Self::new(RenderOptions::default())
  }
}

impl<CS: CoordinateSystem> NavMeshRenderer<CS> {
  /// Creates a renderer with an empty mesh.
  pub fn new(options: RenderOptions) -> Self {
    Self {
      options,
      mesh: Some(RenderMesh::new()),
      bounds: RenderBounds::default(),
      atlas: UvAtlas::default(),
      revision: 0,
      incremental_build: None,
      listeners: HopSlotMap::with_key(),
    }
  }

  /// Rebuilds the whole mesh from `source`. This cancels any incremental
  /// build. If the source is unavailable, nothing changes.
  pub fn rebuild<S: PolygonSource<CS> + ?Sized>(
    &mut self,
    source: &S,
  ) -> Result<BuildReport, BuildError> {
    let built = build_render_mesh(source, &self.options)?;
    if self.incremental_build.take().is_some() {
      tracing::debug!("Cancelled incremental build for a full rebuild.");
    }
    Ok(self.install(built, MeshUpdateKind::Rebuilt))
  }

  /// Empties the mesh. An incremental build in progress continues.
  pub fn clear(&mut self) {
    let mesh = self.mesh.get_or_insert_with(RenderMesh::new);
    mesh.clear();
    mesh.supersede(self.revision);
    self.revision = mesh.revision();
    self.notify(MeshUpdateKind::Cleared);
  }

  /// Advances an incremental build of `source` by appending `tile_index`.
  /// Tile 0 always starts a new build, discarding any partial build. Other
  /// tiles must be passed in order. Once every tile has been appended, passing
  /// any tile index at or past the tile count finishes the build and replaces
  /// the mesh.
  pub fn step_incremental_build<S: PolygonSource<CS> + ?Sized>(
    &mut self,
    source: &S,
    tile_index: usize,
  ) -> Result<IncrementalStatus, BuildError> {
    let build = if tile_index == 0 {
      let build = IncrementalBuild::start(source, &self.options)?;
      if self.incremental_build.take().is_some() {
        tracing::debug!("Restarted incremental build, discarding partial one.");
      }
      build
    } else {
      match self.incremental_build.take() {
        Some(build)
          if build.next_tile() == tile_index
            || (build.is_finished() && tile_index >= build.tile_count()) =>
        {
          build
        }
        build => {
          let expected =
            build.as_ref().map_or(0, IncrementalBuild::next_tile);
          self.incremental_build = build;
          return Err(BuildError::StepOutOfOrder {
            expected,
            actual: tile_index,
          });
        }
      }
    };

    match build.step(source)? {
      StepOutcome::InProgress(build) => {
        let status = IncrementalStatus::InProgress {
          next_tile: build.next_tile(),
          tile_count: build.tile_count(),
        };
        self.incremental_build = Some(build);
        Ok(status)
      }
      StepOutcome::Done(built) => Ok(IncrementalStatus::Finished(
        self.install(built, MeshUpdateKind::IncrementalBuildFinished),
      )),
    }
  }

  /// Whether an incremental build has started but not finished.
  pub fn is_incremental_build_in_progress(&self) -> bool {
    self.incremental_build.is_some()
  }

  /// The UV of `world_position` in the atlas of the current mesh. The height
  /// of `world_position` decides which floor it is on.
  pub fn uv_at(&self, world_position: &CS::Coordinate) -> Vec2 {
    let position = CS::to_standard(world_position);
    self.atlas.uv(position, position.z)
  }

  /// The current mesh. Returns [`None`] if the mesh was taken and has not
  /// been rebuilt since.
  pub fn mesh(&self) -> Option<&RenderMesh<CS>> {
    self.mesh.as_ref()
  }

  /// Takes the current mesh, for example to bake it into a static asset. The
  /// next rebuild creates a new mesh.
  pub fn take_mesh(&mut self) -> Option<RenderMesh<CS>> {
    self.mesh.take()
  }

  pub fn bounds(&self) -> RenderBounds {
    self.bounds
  }

  pub fn atlas(&self) -> &UvAtlas {
    &self.atlas
  }

  pub fn vertex_count(&self) -> usize {
    self.mesh.as_ref().map_or(0, RenderMesh::vertex_count)
  }

  pub fn triangle_count(&self) -> usize {
    self.mesh.as_ref().map_or(0, RenderMesh::triangle_count)
  }

  pub fn floor_count(&self) -> usize {
    self.atlas.floor_count()
  }

  /// Adds a listener that is called every time the mesh changes.
  pub fn add_listener(
    &mut self,
    listener: impl FnMut(&MeshUpdate) + 'static,
  ) -> ListenerId {
    self.listeners.insert(Box::new(listener))
  }

  /// Removes a listener. Returns false if the listener was already removed.
  pub fn remove_listener(&mut self, listener_id: ListenerId) -> bool {
    self.listeners.remove(listener_id).is_some()
  }

  /// Draws the floor-separator planes of the current atlas to `debug_drawer`.
  pub fn draw_floor_separators(
    &self,
    debug_drawer: &mut impl debug::DebugDrawer<CS>,
  ) {
    debug::draw_floor_separators(
      &self.atlas,
      &self.options.floors(),
      debug_drawer,
    );
  }

  fn install(
    &mut self,
    built: BuiltMesh<CS>,
    kind: MeshUpdateKind,
  ) -> BuildReport {
    let BuiltMesh { mut mesh, bounds, atlas, report } = built;
    mesh.supersede(self.revision);
    self.revision = mesh.revision();
    self.mesh = Some(mesh);
    self.bounds = bounds;
    self.atlas = atlas;
    self.notify(kind);
    report
  }

  fn notify(&mut self, kind: MeshUpdateKind) {
    let update = MeshUpdate {
      kind,
      vertex_count: self.vertex_count(),
      triangle_count: self.triangle_count(),
      revision: self.revision,
    };
    for listener in self.listeners.values_mut() {
      listener(&update);
    }
  }
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod test;
