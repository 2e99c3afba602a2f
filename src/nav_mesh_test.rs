use glam::Vec3;

use crate::{
  coords::{XYZ, YUp},
  nav_mesh::ValidPolygon,
  source::{PolygonRef, PolygonSource, SourceError},
  util::BoundingBox,
};

use super::{TiledNavigationMesh, ValidationError};

fn two_tile_mesh() -> TiledNavigationMesh<XYZ> {
  TiledNavigationMesh {
    mesh_bounds: None,
    vertices: vec![
      Vec3::new(0.0, 0.0, 0.0),
      Vec3::new(1.0, 0.0, 0.0),
      Vec3::new(1.0, 1.0, 0.0),
      Vec3::new(0.0, 1.0, 0.0),
      Vec3::new(2.0, 0.0, 1.0),
      Vec3::new(2.0, 1.0, 1.0),
    ],
    tiles: vec![vec![vec![0, 1, 2, 3]], vec![vec![1, 4, 5, 2]]],
  }
}

#[test]
fn validation_computes_bounds_if_none() {
  let mut source_mesh = two_tile_mesh();

  let valid_mesh =
    source_mesh.clone().validate().expect("Validation succeeds.");
  assert_eq!(
    valid_mesh.get_bounds(),
    BoundingBox::new_box(Vec3::new(0.0, 0.0, 0.0), Vec3::new(2.0, 1.0, 1.0))
  );

  let fake_mesh_bounds =
    BoundingBox::new_box(Vec3::new(-5.0, -5.0, -5.0), Vec3::new(5.0, 5.0, 5.0));
  source_mesh.mesh_bounds = Some(fake_mesh_bounds);

  let valid_mesh =
    source_mesh.clone().validate().expect("Validation succeeds.");
  assert_eq!(valid_mesh.get_bounds(), fake_mesh_bounds);
}

#[test]
fn polygons_derived_and_vertices_copied() {
  let source_mesh = two_tile_mesh();

  let valid_mesh =
    source_mesh.clone().validate().expect("Validation succeeds.");
  assert_eq!(valid_mesh.vertices, source_mesh.vertices);
  assert_eq!(
    valid_mesh.tiles,
    vec![
      vec![ValidPolygon {
        vertices: vec![0, 1, 2, 3],
        center: Vec3::new(0.5, 0.5, 0.0),
      }],
      vec![ValidPolygon {
        vertices: vec![1, 4, 5, 2],
        center: Vec3::new(1.5, 0.5, 0.5),
      }],
    ]
  );
}

#[test]
fn implements_polygon_source() {
  let valid_mesh = two_tile_mesh().validate().expect("Validation succeeds.");

  assert_eq!(PolygonSource::<XYZ>::tile_count(&valid_mesh), 2);

  let polygons = valid_mesh.polygons_in_tile(1);
  assert_eq!(polygons.len(), 1);
  assert_eq!(polygons[0].reference, PolygonRef { tile: 1, polygon: 0 });
  assert_eq!(polygons[0].centroid, Vec3::new(1.5, 0.5, 0.5));

  assert_eq!(
    valid_mesh.boundary_vertices(polygons[0].reference),
    Ok(vec![
      Vec3::new(1.0, 0.0, 0.0),
      Vec3::new(2.0, 0.0, 1.0),
      Vec3::new(2.0, 1.0, 1.0),
      Vec3::new(1.0, 1.0, 0.0),
    ])
  );

  // Missing tiles have no polygons, and missing polygons can't be read.
  assert!(valid_mesh.polygons_in_tile(2).is_empty());
  let missing = PolygonRef { tile: 0, polygon: 3 };
  assert_eq!(
    valid_mesh.boundary_vertices(missing),
    Err(SourceError::MissingPolygon(missing))
  );
}

#[test]
fn empty_mesh_is_available_with_zero_bounds() {
  let valid_mesh = TiledNavigationMesh::<XYZ> {
    mesh_bounds: None,
    vertices: vec![],
    tiles: vec![],
  }
  .validate()
  .expect("Validation succeeds.");

  assert_eq!(valid_mesh.get_bounds(), BoundingBox::Empty);
  assert_eq!(
    valid_mesh.bounds(),
    Ok(BoundingBox::new_box(Vec3::ZERO, Vec3::ZERO))
  );
}

#[test]
fn converts_from_user_coordinates() {
  // The same square as tile 0 of `two_tile_mesh`, but with Y up.
  let valid_mesh = TiledNavigationMesh::<YUp> {
    mesh_bounds: None,
    vertices: vec![
      Vec3::new(0.0, 0.0, 0.0),
      Vec3::new(1.0, 0.0, 0.0),
      Vec3::new(1.0, 0.0, -1.0),
      Vec3::new(0.0, 0.0, -1.0),
    ],
    tiles: vec![vec![vec![0, 1, 2, 3]]],
  }
  .validate()
  .expect("Validation succeeds.");

  assert_eq!(
    valid_mesh.get_bounds(),
    BoundingBox::new_box(Vec3::ZERO, Vec3::new(1.0, 1.0, 0.0))
  );
  assert_eq!(
    valid_mesh.polygons_in_tile(0)[0].centroid,
    Vec3::new(0.5, 0.0, -0.5)
  );
}

#[test]
fn error_on_concave_polygon() {
  let source_mesh = TiledNavigationMesh::<XYZ> {
    mesh_bounds: None,
    vertices: vec![
      Vec3::new(0.0, 0.0, 0.0),
      Vec3::new(1.0, 1.0, 0.0),
      Vec3::new(1.0, 0.0, 0.0),
    ],
    tiles: vec![vec![], vec![vec![0, 1, 2]]],
  };

  let error = source_mesh
    .validate()
    .expect_err("Clockwise polygon should be detected.");
  assert_eq!(
    error,
    ValidationError::ConcavePolygon(PolygonRef { tile: 1, polygon: 0 })
  );
}

#[test]
fn error_on_small_polygon() {
  let source_mesh = TiledNavigationMesh::<XYZ> {
    mesh_bounds: None,
    vertices: vec![Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 1.0)],
    tiles: vec![vec![vec![0, 1]]],
  };

  let error =
    source_mesh.validate().expect_err("Small polygon should be detected.");
  assert_eq!(
    error,
    ValidationError::NotEnoughVerticesInPolygon(PolygonRef {
      tile: 0,
      polygon: 0
    })
  );
}

#[test]
fn error_on_bad_polygon_index() {
  let source_mesh = TiledNavigationMesh::<XYZ> {
    mesh_bounds: None,
    vertices: vec![
      Vec3::new(0.0, 0.0, 0.0),
      Vec3::new(1.0, 0.0, 0.0),
      Vec3::new(1.0, 1.0, 0.0),
    ],
    tiles: vec![vec![vec![0, 1, 2], vec![0, 1, 3]]],
  };

  let error = source_mesh
    .validate()
    .expect_err("Bad polygon index should be detected.");
  assert_eq!(
    error,
    ValidationError::InvalidVertexIndexInPolygon(PolygonRef {
      tile: 0,
      polygon: 1
    })
  );
}

#[test]
fn error_on_degenerate_edge() {
  let source_mesh = TiledNavigationMesh::<XYZ> {
    mesh_bounds: None,
    vertices: vec![
      Vec3::new(0.0, 0.0, 0.0),
      Vec3::new(1.0, 0.0, 0.0),
      Vec3::new(1.0, 1.0, 0.0),
    ],
    tiles: vec![vec![vec![0, 1, 1, 2]]],
  };

  let error = source_mesh
    .validate()
    .expect_err("Degenerate edge should be detected.");
  assert_eq!(
    error,
    ValidationError::DegenerateEdgeInPolygon(PolygonRef { tile: 0, polygon: 0 })
  );
}
