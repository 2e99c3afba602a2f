use thiserror::Error;

use crate::{coords::CoordinateSystem, util::BoundingBox};

/// A reference to a polygon inside a [`PolygonSource`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct PolygonRef {
  /// The tile that the polygon was found in.
  pub tile: usize,
  /// The index of the polygon within its tile.
  pub polygon: usize,
}

/// A polygon returned by [`PolygonSource::polygons_in_tile`]. Only the centroid
/// is returned up front, the boundary is fetched through `reference`.
pub struct NavPolygon<CS: CoordinateSystem> {
  /// The reference used to query the boundary of this polygon.
  pub reference: PolygonRef,
  /// The centroid of the polygon. The polygon must be star-shaped with respect
  /// to this point (which is always true of convex polygons).
  pub centroid: CS::Coordinate,
}

impl<CS: CoordinateSystem> Clone for NavPolygon<CS> {
  fn clone(&self) -> Self {
    Self { reference: self.reference, centroid: self.centroid.clone() }
  }
}

// Manual Debug impl to avoid Debug bound on CoordinateSystem.
impl<CS: CoordinateSystem> std::fmt::Debug for NavPolygon<CS>
where
  CS::Coordinate: std::fmt::Debug,
{
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("NavPolygon")
      .field("reference", &self.reference)
      .field("centroid", &self.centroid)
      .finish()
  }
}

/// An error when reading from a [`PolygonSource`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
  #[error("No navigation data is available.")]
  Unavailable,
  /// Stores the reference of the polygon that could not be read.
  #[error("The polygon {0:?} has no boundary vertices.")]
  MissingPolygon(PolygonRef),
}

/// Read-only access to tiled navigation data. Implement this to render
/// navigation meshes from other navigation libraries.
pub trait PolygonSource<CS: CoordinateSystem> {
  /// The bounds of the navigation data in the standard coordinate system.
  /// Returns [`SourceError::Unavailable`] if there is no navigation data to
  /// read, in which case nothing else will be queried.
  fn bounds(&self) -> Result<BoundingBox, SourceError>;

  /// The number of tiles. Tiles are queried in order from `0` to
  /// `tile_count() - 1`.
  fn tile_count(&self) -> usize;

  /// The polygons in `tile`. Missing tiles should return no polygons. The same
  /// polygon may be returned by several tiles.
  fn polygons_in_tile(&self, tile: usize) -> Vec<NavPolygon<CS>>;

  /// The boundary vertices of the polygon referenced by `polygon`, in order.
  fn boundary_vertices(
    &self,
    polygon: PolygonRef,
  ) -> Result<Vec<CS::Coordinate>, SourceError>;
}
