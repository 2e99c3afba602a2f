use ord_subset::OrdVar;

/// The configured floor-separator heights, relative to the lower corner of the
/// navigation mesh. Heights are kept sorted in ascending order.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct FloorSet {
  heights: Vec<f32>,
}

impl FloorSet {
  /// Creates a floor set from unsorted `heights`. Non-finite heights are
  /// dropped.
  pub fn new(heights: impl IntoIterator<Item = f32>) -> Self {
    let mut heights = heights
      .into_iter()
      .filter(|height| height.is_finite())
      .collect::<Vec<_>>();
    heights.sort_by_key(|height| OrdVar::new_unchecked(*height));
    Self { heights }
  }

  /// All configured heights, sorted ascending.
  pub fn heights(&self) -> &[f32] {
    &self.heights
  }

  /// The heights that actually separate floors of a navigation mesh
  /// `nav_mesh_height` tall. These are the heights in `(0, nav_mesh_height]`.
  pub fn separators(
    &self,
    nav_mesh_height: f32,
  ) -> impl Iterator<Item = f32> + '_ {
    self
      .heights
      .iter()
      .copied()
      .filter(move |&height| height > 0.0 && height <= nav_mesh_height)
  }

  /// The number of floors in a navigation mesh `nav_mesh_height` tall.
  pub fn floor_count(&self, nav_mesh_height: f32) -> usize {
    1 + self.separators(nav_mesh_height).count()
  }

  /// Computes the layout of floors for a navigation mesh `nav_mesh_height`
  /// tall.
  pub fn layout(&self, nav_mesh_height: f32) -> FloorLayout {
    let separators = self.separators(nav_mesh_height).collect::<Vec<_>>();
    let floor_count = separators.len() + 1;
    FloorLayout { separators, floor_count, row_size: row_size(floor_count) }
  }
}

/// The number of atlas cells in each row (and column) of the floor grid. This
/// leaves a spare row and column compared to a tight packing.
fn row_size(floor_count: usize) -> usize {
  if floor_count > 1 {
    (floor_count as f64).sqrt().floor() as usize + 1
  } else {
    1
  }
}

/// How floors are arranged in the UV atlas.
#[derive(Clone, Debug, PartialEq)]
pub struct FloorLayout {
  /// The heights separating floors, sorted ascending.
  separators: Vec<f32>,
  floor_count: usize,
  row_size: usize,
}

impl Default for FloorLayout {
  fn default() -> Self {
    Self::single()
  }
}

impl FloorLayout {
  /// A layout with only one floor, covering the whole atlas.
  pub fn single() -> Self {
    Self { separators: Vec::new(), floor_count: 1, row_size: 1 }
  }

  pub fn floor_count(&self) -> usize {
    self.floor_count
  }

  pub fn row_size(&self) -> usize {
    self.row_size
  }

  pub fn separators(&self) -> &[f32] {
    &self.separators
  }

  /// Determines the floor that a height belongs to. `z_relative` is relative
  /// to the lower corner of the navigation mesh. Separators are inclusive
  /// lower bounds of the floor above them.
  pub fn floor_index(&self, z_relative: f32) -> usize {
    self.separators.partition_point(|&height| height <= z_relative)
  }

  /// The (column, row) of `floor` in the atlas grid.
  pub fn grid_cell(&self, floor: usize) -> (usize, usize) {
    (floor % self.row_size, floor / self.row_size)
  }
}

#[cfg(test)]
#[path = "floors_test.rs"]
mod test;
