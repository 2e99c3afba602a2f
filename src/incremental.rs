use crate::{
  build::{BuildError, BuildState, BuiltMesh, RenderOptions},
  coords::CoordinateSystem,
  source::PolygonSource,
};

/// A build that appends one tile per step, so the cost of rendering a large
/// navigation mesh can be spread over several frames. Each step must be given
/// the same source, and the source should not change until the build is done.
///
/// Stepping through every tile and then stepping once more produces the same
/// mesh as [`crate::build_render_mesh`].
pub struct IncrementalBuild<CS: CoordinateSystem> {
  state: BuildState<CS>,
  /// The tile to append on the next step.
  next_tile: usize,
}

/// The result of [`IncrementalBuild::step`].
pub enum StepOutcome<CS: CoordinateSystem> {
  /// More steps are needed.
  InProgress(IncrementalBuild<CS>),
  /// Every tile has been appended and the mesh is finished.
  Done(BuiltMesh<CS>),
}

impl<CS: CoordinateSystem> IncrementalBuild<CS> {
  /// Starts a build of `source`. Nothing is appended until the first step.
  pub fn start<S: PolygonSource<CS> + ?Sized>(
    source: &S,
    options: &RenderOptions,
  ) -> Result<Self, BuildError> {
    Ok(Self { state: BuildState::start(source, options)?, next_tile: 0 })
  }

  /// The tile that will be appended by the next step.
  pub fn next_tile(&self) -> usize {
    self.next_tile
  }

  /// The number of tiles in the source when the build started.
  pub fn tile_count(&self) -> usize {
    self.state.report.tile_count
  }

  /// Whether every tile has been appended. The next step finishes the mesh.
  pub fn is_finished(&self) -> bool {
    self.next_tile >= self.tile_count()
  }

  /// The number of triangles appended so far.
  pub fn pending_triangle_count(&self) -> usize {
    self.state.triangle_count()
  }

  /// Appends the next tile, or finishes the mesh if every tile has been
  /// appended.
  pub fn step<S: PolygonSource<CS> + ?Sized>(
    mut self,
    source: &S,
  ) -> Result<StepOutcome<CS>, BuildError> {
    if self.is_finished() {
      return self.state.finish().map(StepOutcome::Done);
    }

    self.state.append_tile(source, self.next_tile);
    self.next_tile += 1;
    Ok(StepOutcome::InProgress(self))
  }
}

#[cfg(test)]
#[path = "incremental_test.rs"]
mod test;
