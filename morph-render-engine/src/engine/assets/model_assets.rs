use bevy::prelude::*;
use bevy::render::mesh::VertexAttributeValues;
use thiserror::Error;

use crate::engine::simulation::session::ActiveModel;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelLoadError {
    #[error("scene file `{path}` failed to load: {reason}")]
    LoadFailed { path: String, reason: String },
    #[error("scene file must contain exactly two meshes, found {0}")]
    MeshCount(usize),
    #[error("mesh {0} has no primitives")]
    MissingPrimitive(usize),
    #[error("mesh {0} is not loaded")]
    MissingMesh(usize),
    #[error("mesh is missing the {0} attribute")]
    MissingAttribute(&'static str),
    #[error("{0} attribute has an unsupported vertex format")]
    UnsupportedFormat(&'static str),
    #[error("index {index} is out of range for {vertices} vertices")]
    IndexOutOfRange { index: usize, vertices: usize },
    #[error("mesh has {positions} positions but {uvs} UVs")]
    VertexCountMismatch { positions: usize, uvs: usize },
    #[error("mesh {0} has no base colour texture")]
    MissingColourTexture(usize),
}

/// Non-indexed vertex data of one model: three consecutive vertices per triangle.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModelGeometry {
    pub positions: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
}

impl ModelGeometry {
    pub fn from_mesh(mesh: &Mesh) -> Result<Self, ModelLoadError> {
        let positions = match mesh.attribute(Mesh::ATTRIBUTE_POSITION) {
            Some(VertexAttributeValues::Float32x3(values)) => values,
            Some(_) => return Err(ModelLoadError::UnsupportedFormat("POSITION")),
            None => return Err(ModelLoadError::MissingAttribute("POSITION")),
        };
        let uvs = match mesh.attribute(Mesh::ATTRIBUTE_UV_0) {
            Some(VertexAttributeValues::Float32x2(values)) => values,
            Some(_) => return Err(ModelLoadError::UnsupportedFormat("UV_0")),
            None => return Err(ModelLoadError::MissingAttribute("UV_0")),
        };
        if positions.len() != uvs.len() {
            return Err(ModelLoadError::VertexCountMismatch {
                positions: positions.len(),
                uvs: uvs.len(),
            });
        }

        let Some(indices) = mesh.indices() else {
            return Ok(Self {
                positions: positions.clone(),
                uvs: uvs.clone(),
            });
        };

        let vertices = positions.len();
        let mut geometry = Self {
            positions: Vec::with_capacity(indices.len()),
            uvs: Vec::with_capacity(indices.len()),
        };
        for index in indices.iter() {
            if index >= vertices {
                return Err(ModelLoadError::IndexOutOfRange { index, vertices });
            }
            geometry.positions.push(positions[index]);
            geometry.uvs.push(uvs[index]);
        }
        Ok(geometry)
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// UVs extended with zeros up to `count` entries.
    pub fn padded_uvs(&self, count: usize) -> Vec<[f32; 2]> {
        let mut uvs = self.uvs.clone();
        uvs.resize(count.max(uvs.len()), [0.0; 2]);
        uvs
    }

    pub fn padded_positions(&self, count: usize) -> Vec<[f32; 3]> {
        let mut positions = self.positions.clone();
        positions.resize(count.max(positions.len()), [0.0; 3]);
        positions
    }
}

/// Per-axis maximum absolute coordinate over every vertex of every model.
pub fn max_extent<'a>(geometries: impl IntoIterator<Item = &'a ModelGeometry>) -> Vec3 {
    geometries
        .into_iter()
        .flat_map(|geometry| geometry.positions.iter())
        .fold(Vec3::ZERO, |extent, position| {
            extent.max(Vec3::from_array(*position).abs())
        })
}

/// The two loaded models with their colour maps and shared dimensions.
#[derive(Resource, Debug, Clone)]
pub struct MorphModels {
    geometries: [ModelGeometry; 2],
    colour_maps: [Handle<Image>; 2],
    max_count: usize,
    max_extent: Vec3,
}

impl MorphModels {
    pub fn new(geometries: [ModelGeometry; 2], colour_maps: [Handle<Image>; 2]) -> Self {
        let max_count = geometries
            .iter()
            .map(ModelGeometry::vertex_count)
            .max()
            .unwrap_or(0);
        let max_extent = max_extent(&geometries);
        Self {
            geometries,
            colour_maps,
            max_count,
            max_extent,
        }
    }

    pub fn geometry(&self, model: ActiveModel) -> &ModelGeometry {
        &self.geometries[model.index()]
    }

    pub fn colour_map(&self, model: ActiveModel) -> &Handle<Image> {
        &self.colour_maps[model.index()]
    }

    pub fn max_count(&self) -> usize {
        self.max_count
    }

    pub fn max_extent(&self) -> Vec3 {
        self.max_extent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::asset::RenderAssetUsages;
    use bevy::render::mesh::{Indices, PrimitiveTopology};
    use pretty_assertions::assert_eq;

    fn quad(indexed: bool) -> Mesh {
        let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default());
        mesh.insert_attribute(
            Mesh::ATTRIBUTE_POSITION,
            vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [1.0, 1.0, 0.0],
                [0.0, 1.0, -2.0],
            ],
        );
        mesh.insert_attribute(
            Mesh::ATTRIBUTE_UV_0,
            vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
        );
        if indexed {
            mesh.insert_indices(Indices::U16(vec![0, 1, 2, 0, 2, 3]));
        }
        mesh
    }

    #[test]
    fn indexed_mesh_is_expanded_per_triangle() {
        let geometry = ModelGeometry::from_mesh(&quad(true)).unwrap();

        assert_eq!(geometry.vertex_count(), 6);
        assert_eq!(geometry.positions[3], [0.0, 0.0, 0.0]);
        assert_eq!(geometry.positions[5], [0.0, 1.0, -2.0]);
        assert_eq!(geometry.uvs[4], [1.0, 1.0]);
    }

    #[test]
    fn non_indexed_mesh_is_kept_as_is() {
        let geometry = ModelGeometry::from_mesh(&quad(false)).unwrap();
        assert_eq!(geometry.vertex_count(), 4);
    }

    #[test]
    fn missing_uvs_are_reported() {
        let mut mesh = quad(false);
        mesh.remove_attribute(Mesh::ATTRIBUTE_UV_0);
        assert_eq!(
            ModelGeometry::from_mesh(&mesh),
            Err(ModelLoadError::MissingAttribute("UV_0"))
        );
    }

    #[test]
    fn out_of_range_indices_are_reported() {
        let mut mesh = quad(false);
        mesh.insert_indices(Indices::U32(vec![0, 1, 7]));
        assert_eq!(
            ModelGeometry::from_mesh(&mesh),
            Err(ModelLoadError::IndexOutOfRange {
                index: 7,
                vertices: 4
            })
        );
    }

    #[test]
    fn models_share_count_and_extent() {
        let small = ModelGeometry {
            positions: vec![[3.0, -1.0, 0.5]; 3],
            uvs: vec![[0.0; 2]; 3],
        };
        let large = ModelGeometry::from_mesh(&quad(true)).unwrap();
        let models = MorphModels::new([small, large], [Handle::default(), Handle::default()]);

        assert_eq!(models.max_count(), 6);
        assert_eq!(models.max_extent(), Vec3::new(3.0, 1.0, 2.0));
        assert_eq!(models.geometry(ActiveModel::First).padded_uvs(6).len(), 6);
    }
}
