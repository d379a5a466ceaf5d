use std::path::Path;

use base64::Engine as _;
use glam::{Affine3A, Mat4};
use wgpu::VertexFormat;

use crate::assets::io::{AssetReader, FileAssetReader, source_filename};
use crate::errors::{MantleError, Result};
use crate::resources::geometry::{Attribute, Geometry, NORMAL};
use crate::resources::material::Material;
use crate::resources::mesh::MeshPart;
use crate::scene::model::MeshModel;

/// Where a buffer's bytes come from, resolved before any await.
enum BufferSource {
    Bin,
    DataUri(String),
    File(String),
}

/// glTF / GLB geometry loader.
///
/// Only vertex data is read: positions, normals (computed when absent) and
/// indices. Every triangle primitive becomes one [`MeshPart`] whose
/// vertices stay in mesh-local space; the node's world matrix is kept as
/// the part transform.
pub struct GltfLoader<'a> {
    reader: &'a FileAssetReader,
    uri: &'a str,
}

impl<'a> GltfLoader<'a> {
    pub fn new(reader: &'a FileAssetReader, uri: &'a str) -> Self {
        Self { reader, uri }
    }

    pub async fn load(&self, bytes: &[u8]) -> Result<MeshModel> {
        let gltf = gltf::Gltf::from_slice(bytes).map_err(|e| MantleError::asset_load(self.uri, e))?;
        let buffers = self.load_buffers(&gltf).await?;

        let mut model = MeshModel::new(source_filename(self.uri), Vec::new());

        match gltf.default_scene().or_else(|| gltf.scenes().next()) {
            Some(scene) => {
                for node in scene.nodes() {
                    Self::visit_node(&node, Mat4::IDENTITY, &buffers, &mut model);
                }
            }
            // No scene: take the meshes as authored.
            None => {
                for mesh in gltf.meshes() {
                    Self::load_mesh(&mesh, Mat4::IDENTITY, &buffers, &mut model);
                }
            }
        }

        if model.is_empty() {
            return Err(MantleError::EmptyModel(self.uri.to_string()));
        }
        Ok(model)
    }

    async fn load_buffers(&self, gltf: &gltf::Gltf) -> Result<Vec<Vec<u8>>> {
        let sources: Vec<(BufferSource, usize)> = gltf
            .buffers()
            .map(|buffer| {
                let source = match buffer.source() {
                    gltf::buffer::Source::Bin => BufferSource::Bin,
                    gltf::buffer::Source::Uri(uri) if uri.starts_with("data:") => {
                        BufferSource::DataUri(uri.to_string())
                    }
                    gltf::buffer::Source::Uri(uri) => BufferSource::File(uri.to_string()),
                };
                (source, buffer.length())
            })
            .collect();

        let base_dir = Path::new(self.uri).parent().unwrap_or(Path::new(""));

        let mut buffer_data = Vec::with_capacity(sources.len());
        for (source, length) in sources {
            let data = match source {
                BufferSource::Bin => gltf
                    .blob
                    .clone()
                    .ok_or_else(|| MantleError::asset_load(self.uri, "missing GLB binary chunk"))?,
                BufferSource::DataUri(uri) => decode_data_uri(&uri)?,
                BufferSource::File(file) => {
                    let path = base_dir.join(&file);
                    self.reader.read_bytes(&path.to_string_lossy()).await?
                }
            };

            if data.len() < length {
                return Err(MantleError::asset_load(
                    self.uri,
                    format!("buffer holds {} bytes, {length} declared", data.len()),
                ));
            }
            buffer_data.push(data);
        }
        Ok(buffer_data)
    }

    fn visit_node(node: &gltf::Node, parent: Mat4, buffers: &[Vec<u8>], model: &mut MeshModel) {
        let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());

        if let Some(mesh) = node.mesh() {
            Self::load_mesh(&mesh, world, buffers, model);
        }
        for child in node.children() {
            Self::visit_node(&child, world, buffers, model);
        }
    }

    fn load_mesh(mesh: &gltf::Mesh, world: Mat4, buffers: &[Vec<u8>], model: &mut MeshModel) {
        let mesh_name = mesh.name().map_or_else(|| format!("mesh_{}", mesh.index()), str::to_string);

        for primitive in mesh.primitives() {
            let name = format!("{mesh_name}#{}", primitive.index());

            if primitive.mode() != gltf::mesh::Mode::Triangles {
                log::warn!("Skipping primitive '{name}': {:?} is not a triangle list", primitive.mode());
                continue;
            }

            let Some(geometry) = Self::load_primitive_geometry(&primitive, buffers) else {
                log::warn!("Skipping primitive '{name}': no vertex positions");
                continue;
            };

            // Vertices stay mesh-local; projections run in that frame.
            let material = Material::default().with_name(&name);
            model.push_part(MeshPart::new(&name, geometry, material).with_transform(Affine3A::from_mat4(world)));
        }
    }

    fn load_primitive_geometry(primitive: &gltf::Primitive, buffers: &[Vec<u8>]) -> Option<Geometry> {
        let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(Vec::as_slice));

        let positions: Vec<[f32; 3]> = reader.read_positions().map(Iterator::collect).unwrap_or_default();
        if positions.is_empty() {
            return None;
        }

        let indices: Option<Vec<u32>> = reader.read_indices().map(|iter| iter.into_u32().collect());
        let mut geometry = Geometry::from_positions(&positions, indices.as_deref());

        let normals: Vec<[f32; 3]> = reader.read_normals().map(Iterator::collect).unwrap_or_default();
        if normals.len() == positions.len() {
            geometry.set_attribute(NORMAL, Attribute::new_planar(&normals, VertexFormat::Float32x3));
        } else {
            geometry.compute_vertex_normals();
        }

        Some(geometry)
    }
}

fn decode_data_uri(uri: &str) -> Result<Vec<u8>> {
    let (_, payload) = uri
        .split_once(";base64,")
        .ok_or_else(|| MantleError::DataUriError("only base64 data URIs are supported".to_string()))?;
    base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| MantleError::DataUriError(e.to_string()))
}
