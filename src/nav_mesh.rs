use std::{cmp::Ordering, marker::PhantomData};

use glam::{swizzles::Vec3Swizzles, Vec3};
use thiserror::Error;

use crate::{
  coords::CoordinateSystem,
  source::{NavPolygon, PolygonRef, PolygonSource, SourceError},
  util::BoundingBox,
};

/// A navigation mesh split into tiles. This is a simple in-memory
/// [`PolygonSource`], useful when the navigation data does not come from
/// another library.
pub struct TiledNavigationMesh<CS: CoordinateSystem> {
  /// The bounds of the mesh data itself. If [`None`], the bounds are computed
  /// from `vertices` during validation.
  pub mesh_bounds: Option<BoundingBox>,
  /// The vertices that make up the polygons. Tiles may share vertices.
  pub vertices: Vec<CS::Coordinate>,
  /// The polygons of each tile. Polygons are indices to the `vertices` that
  /// make up the polygon. Polygons must be convex, and oriented
  /// counterclockwise (using the right hand rule). The same polygon may appear
  /// in more than one tile.
  pub tiles: Vec<Vec<Vec<usize>>>,
}

impl<CS: CoordinateSystem> Clone for TiledNavigationMesh<CS> {
  fn clone(&self) -> Self {
    Self {
      mesh_bounds: self.mesh_bounds,
      vertices: self.vertices.clone(),
      tiles: self.tiles.clone(),
    }
  }
}

/// An error when validating a tiled navigation mesh.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  /// Stores the reference of the polygon.
  #[error("The polygon {0:?} is concave or has edges in clockwise order.")]
  ConcavePolygon(PolygonRef),
  /// Stores the reference of the polygon.
  #[error("The polygon {0:?} does not have at least 3 vertices.")]
  NotEnoughVerticesInPolygon(PolygonRef),
  /// Stores the reference of the polygon.
  #[error("The polygon {0:?} references an out-of-bounds vertex.")]
  InvalidVertexIndexInPolygon(PolygonRef),
  /// Stores the reference of the polygon.
  #[error(
    "The polygon {0:?} contains a degenerate edge (an edge with zero length)."
  )]
  DegenerateEdgeInPolygon(PolygonRef),
}

impl<CS: CoordinateSystem> TiledNavigationMesh<CS> {
  /// Ensures every polygon can be fanned from its centroid, and computes the
  /// centroids and bounds. Returns an error if the navigation mesh is invalid
  /// in some way.
  pub fn validate(
    self,
  ) -> Result<ValidTiledNavigationMesh<CS>, ValidationError> {
    let vertices =
      self.vertices.iter().map(CS::to_standard).collect::<Vec<_>>();

    let mesh_bounds = self.mesh_bounds.unwrap_or_else(|| {
      vertices
        .iter()
        .fold(BoundingBox::Empty, |acc, &vertex| acc.expand_to_point(vertex))
    });

    let mut tiles = Vec::with_capacity(self.tiles.len());
    for (tile_index, tile) in self.tiles.into_iter().enumerate() {
      let mut polygons = Vec::with_capacity(tile.len());
      for (polygon_index, polygon) in tile.into_iter().enumerate() {
        let reference =
          PolygonRef { tile: tile_index, polygon: polygon_index };
        validate_polygon(&polygon, &vertices, reference)?;

        let center = polygon.iter().map(|i| vertices[*i]).sum::<Vec3>()
          / polygon.len() as f32;
        polygons.push(ValidPolygon { vertices: polygon, center });
      }
      tiles.push(polygons);
    }

    Ok(ValidTiledNavigationMesh {
      mesh_bounds,
      vertices,
      tiles,
      marker: PhantomData,
    })
  }
}

fn validate_polygon(
  polygon: &[usize],
  vertices: &[Vec3],
  reference: PolygonRef,
) -> Result<(), ValidationError> {
  if polygon.len() < 3 {
    return Err(ValidationError::NotEnoughVerticesInPolygon(reference));
  }

  if polygon.iter().any(|vertex_index| *vertex_index >= vertices.len()) {
    return Err(ValidationError::InvalidVertexIndexInPolygon(reference));
  }

  for i in 0..polygon.len() {
    let left_vertex = polygon[if i == 0 { polygon.len() - 1 } else { i - 1 }];
    let center_vertex = polygon[i];
    let right_vertex = polygon[if i == polygon.len() - 1 { 0 } else { i + 1 }];

    if center_vertex == right_vertex {
      return Err(ValidationError::DegenerateEdgeInPolygon(reference));
    }

    let left_vertex = vertices[left_vertex].xy();
    let center_vertex = vertices[center_vertex].xy();
    let right_vertex = vertices[right_vertex].xy();

    let left_edge = left_vertex - center_vertex;
    let right_edge = right_vertex - center_vertex;

    match right_edge.perp_dot(left_edge).partial_cmp(&0.0) {
      // The right edge is to the right of the left edge.
      Some(Ordering::Greater) => {}
      // The right edge is parallel to the left edge, but they point in
      // opposite directions.
      Some(Ordering::Equal) if right_edge.dot(left_edge) < 0.0 => {}
      // right_edge is to the left of the left_edge (or they are parallel and
      // point in the same direction), so the polygon is concave.
      _ => return Err(ValidationError::ConcavePolygon(reference)),
    }
  }

  Ok(())
}

/// A tiled navigation mesh which has been validated and whose polygon
/// centroids have been computed.
pub struct ValidTiledNavigationMesh<CS: CoordinateSystem> {
  /// The bounds of the mesh data.
  pub(crate) mesh_bounds: BoundingBox,
  /// The vertices that make up the polygons.
  pub(crate) vertices: Vec<Vec3>,
  /// The polygons of each tile.
  pub(crate) tiles: Vec<Vec<ValidPolygon>>,
  /// Marker for the CoordinateSystem.
  pub(crate) marker: PhantomData<CS>,
}

impl<CS: CoordinateSystem> Clone for ValidTiledNavigationMesh<CS> {
  fn clone(&self) -> Self {
    Self {
      mesh_bounds: self.mesh_bounds,
      vertices: self.vertices.clone(),
      tiles: self.tiles.clone(),
      marker: self.marker,
    }
  }
}

// Manual Debug impl to avoid Debug bound on CoordinateSystem.
impl<CS: CoordinateSystem> std::fmt::Debug for ValidTiledNavigationMesh<CS> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ValidTiledNavigationMesh")
      .field("mesh_bounds", &self.mesh_bounds)
      .field("vertices", &self.vertices)
      .field("tiles", &self.tiles)
      .finish()
  }
}

/// A valid polygon. This means the polygon is convex and indexes the `vertices`
/// Vec of the corresponding ValidTiledNavigationMesh.
#[derive(PartialEq, Debug, Clone)]
pub(crate) struct ValidPolygon {
  /// The vertices are indexes to the `vertices` Vec of the corresponding
  /// ValidTiledNavigationMesh.
  pub(crate) vertices: Vec<usize>,
  /// The center of the polygon.
  pub(crate) center: Vec3,
}

impl<CS: CoordinateSystem> ValidTiledNavigationMesh<CS> {
  /// Returns the bounds of the navigation mesh.
  pub fn get_bounds(&self) -> BoundingBox {
    self.mesh_bounds
  }

  fn get_polygon(&self, polygon: PolygonRef) -> Option<&ValidPolygon> {
    self.tiles.get(polygon.tile)?.get(polygon.polygon)
  }
}

impl<CS: CoordinateSystem> PolygonSource<CS> for ValidTiledNavigationMesh<CS> {
  fn bounds(&self) -> Result<BoundingBox, SourceError> {
    // A mesh without vertices still counts as available navigation data.
    match self.mesh_bounds {
      BoundingBox::Empty => Ok(BoundingBox::new_box(Vec3::ZERO, Vec3::ZERO)),
      bounds => Ok(bounds),
    }
  }

  fn tile_count(&self) -> usize {
    self.tiles.len()
  }

  fn polygons_in_tile(&self, tile: usize) -> Vec<NavPolygon<CS>> {
    let Some(polygons) = self.tiles.get(tile) else {
      return Vec::new();
    };
    polygons
      .iter()
      .enumerate()
      .map(|(polygon_index, polygon)| NavPolygon {
        reference: PolygonRef { tile, polygon: polygon_index },
        centroid: CS::from_standard(&polygon.center),
      })
      .collect()
  }

  fn boundary_vertices(
    &self,
    polygon: PolygonRef,
  ) -> Result<Vec<CS::Coordinate>, SourceError> {
    let Some(valid_polygon) = self.get_polygon(polygon) else {
      return Err(SourceError::MissingPolygon(polygon));
    };
    Ok(
      valid_polygon
        .vertices
        .iter()
        .map(|&index| CS::from_standard(&self.vertices[index]))
        .collect(),
    )
  }
}

#[cfg(test)]
#[path = "nav_mesh_test.rs"]
mod test;
