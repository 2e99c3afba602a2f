use glam::{Vec2, Vec3};

use crate::{floors::FloorSet, util::BoundingBox};

use super::UvAtlas;

fn assert_uv_near(actual: Vec2, expected: Vec2) {
  assert!(
    (actual - expected).abs().max_element() < 1e-5,
    "{actual} != {expected}"
  );
}

#[test]
fn single_floor_uses_base_formula() {
  let atlas = UvAtlas::new(
    BoundingBox::new_box(
      Vec3::new(-10.0, -20.0, 0.0),
      Vec3::new(10.0, 20.0, 5.0),
    ),
    &FloorSet::default(),
    0.1,
  );
  assert_eq!(atlas.floor_count(), 1);
  assert_eq!(atlas.row_size(), 1);

  assert_eq!(
    atlas.uv(Vec3::new(0.0, 0.0, 3.0), 3.0),
    Vec2::new(0.5, 0.5) * (1.0 - 0.1)
  );
  assert_eq!(
    atlas.uv(Vec3::new(-10.0, 20.0, 0.0), 0.0),
    Vec2::new(0.0, 1.0) * (1.0 - 0.1)
  );
  // Height doesn't matter with only one floor.
  assert_eq!(
    atlas.uv(Vec3::new(0.0, 0.0, 3.0), 100.0),
    atlas.uv(Vec3::new(0.0, 0.0, 3.0), -100.0)
  );
}

#[test]
fn floors_are_placed_in_grid_cells() {
  let atlas = UvAtlas::new(
    BoundingBox::new_box(
      Vec3::new(0.0, 0.0, 100.0),
      Vec3::new(10.0, 10.0, 110.0),
    ),
    &FloorSet::new([5.0]),
    0.1,
  );
  assert_eq!(atlas.floor_count(), 2);
  assert_eq!(atlas.row_size(), 2);

  let point = Vec3::new(5.0, 2.0, 0.0);
  let base = Vec2::new(0.5, 0.2) * 0.9;

  // The bottom floor is in cell (0, 0).
  assert_eq!(atlas.floor_of(102.0), 0);
  assert_uv_near(atlas.uv(point, 102.0), base / 2.0);

  // The separator is relative to the corner, and inclusive.
  assert_eq!(atlas.floor_of(105.0), 1);
  assert_uv_near(
    atlas.uv(point, 105.0),
    base / 2.0 + Vec2::new(0.5, 0.0) + Vec2::new(0.1, 0.0),
  );
}

#[test]
fn islands_do_not_overlap() {
  for island_margin in [0.0, 0.05, 0.2] {
    let atlas = UvAtlas::new(
      BoundingBox::new_box(Vec3::ZERO, Vec3::new(8.0, 8.0, 8.0)),
      &FloorSet::new([2.0, 4.0, 6.0]),
      island_margin,
    );
    assert_eq!(atlas.floor_count(), 4);
    assert_eq!(atlas.row_size(), 3);

    // The UV rectangle covered by each floor.
    let islands = [1.0, 3.0, 5.0, 7.0].map(|height| {
      (atlas.uv(Vec3::ZERO, height), atlas.uv(Vec3::splat(8.0), height))
    });

    for (i, (min_1, max_1)) in islands.iter().enumerate() {
      assert!(min_1.cmpge(Vec2::ZERO).all());
      // Margins are added on top of the grid, so only margin-free atlases
      // are guaranteed to stay inside the unit square.
      if island_margin == 0.0 {
        assert!(max_1.cmple(Vec2::splat(1.0 + 1e-6)).all());
      }
      for (min_2, max_2) in islands.iter().skip(i + 1) {
        let overlaps = min_1.cmplt(*max_2).all() && min_2.cmplt(*max_1).all();
        assert!(!overlaps, "({min_1}, {max_1}) overlaps ({min_2}, {max_2})");
      }
    }
  }
}

#[test]
fn flat_extents_map_to_zero() {
  let atlas = UvAtlas::new(
    BoundingBox::new_box(Vec3::new(1.0, 1.0, 1.0), Vec3::new(1.0, 5.0, 1.0)),
    &FloorSet::default(),
    0.0,
  );
  assert_eq!(atlas.uv(Vec3::new(1.0, 3.0, 1.0), 1.0), Vec2::new(0.0, 0.5));

  assert_eq!(UvAtlas::default().uv(Vec3::ONE, 1.0), Vec2::ZERO);
}

#[test]
fn island_margin_is_clamped() {
  let bounds = BoundingBox::new_box(Vec3::ZERO, Vec3::ONE);
  assert_eq!(
    UvAtlas::new(bounds, &FloorSet::default(), 2.0).island_margin(),
    1.0
  );
  assert_eq!(
    UvAtlas::new(bounds, &FloorSet::default(), -1.0).island_margin(),
    0.0
  );
  assert_eq!(
    UvAtlas::new(bounds, &FloorSet::default(), f32::NAN).island_margin(),
    0.0
  );
}
