use glam::{swizzles::Vec3Swizzles, Vec2, Vec3};

use crate::{
  floors::{FloorLayout, FloorSet},
  util::BoundingBox,
};

/// Places points of the navigation mesh into a square UV atlas. Each floor of
/// the navigation mesh gets its own cell (island) of the atlas, and points are
/// mapped into their cell by their planar (XY) position.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct UvAtlas {
  /// The minimum corner of the navigation mesh.
  corner: Vec3,
  /// The size of the navigation mesh.
  size: Vec3,
  layout: FloorLayout,
  /// The fraction of each island reserved as a margin, in `[0, 1]`.
  island_margin: f32,
}

impl UvAtlas {
  /// Creates an atlas for a navigation mesh with bounds `nav_mesh_bounds`,
  /// split into floors by `floors`. `island_margin` is clamped into `[0, 1]`.
  pub fn new(
    nav_mesh_bounds: BoundingBox,
    floors: &FloorSet,
    island_margin: f32,
  ) -> Self {
    let size = nav_mesh_bounds.size();
    Self {
      corner: nav_mesh_bounds.corner(),
      size,
      layout: floors.layout(size.z),
      island_margin: clamp_margin(island_margin),
    }
  }

  pub fn corner(&self) -> Vec3 {
    self.corner
  }

  pub fn size(&self) -> Vec3 {
    self.size
  }

  pub fn layout(&self) -> &FloorLayout {
    &self.layout
  }

  pub fn floor_count(&self) -> usize {
    self.layout.floor_count()
  }

  pub fn row_size(&self) -> usize {
    self.layout.row_size()
  }

  pub fn island_margin(&self) -> f32 {
    self.island_margin
  }

  /// The floor containing points at `central_height` (in world space).
  pub fn floor_of(&self, central_height: f32) -> usize {
    self.layout.floor_index(central_height - self.corner.z)
  }

  /// Computes the UV of `position`, which lies on the floor determined by
  /// `central_height`.
  ///
  /// With several floors the margin is added per cell rather than
  /// renormalized, so large margins with many floors can push UVs past 1.
  pub fn uv(&self, position: Vec3, central_height: f32) -> Vec2 {
    let relative = (position - self.corner).xy();
    let extent = self.size.xy();
    let base = Vec2::new(
      fraction_of(relative.x, extent.x),
      fraction_of(relative.y, extent.y),
    ) * (1.0 - self.island_margin);

    if self.layout.floor_count() == 1 {
      return base;
    }

    let (column, row) = self.layout.grid_cell(self.floor_of(central_height));
    let cell = Vec2::new(column as f32, row as f32);
    let row_size = self.layout.row_size() as f32;
    base / row_size + cell / row_size + cell * self.island_margin
  }
}

/// Clamps `margin` into `[0, 1]`, treating NaN as no margin.
pub(crate) fn clamp_margin(margin: f32) -> f32 {
  if margin.is_nan() {
    0.0
  } else {
    margin.clamp(0.0, 1.0)
  }
}

/// The fraction of `extent` covered by `offset`. Flat extents map everything
/// to 0.
fn fraction_of(offset: f32, extent: f32) -> f32 {
  if extent > 0.0 {
    offset / extent
  } else {
    0.0
  }
}

#[cfg(test)]
#[path = "atlas_test.rs"]
mod test;
