use crate::scene::light::Light;
use crate::scene::mesh::{MaterialMaps, Mesh};
use crate::scene::texture::Texture;

/// Handle of a texture owned by a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub usize);

/// Borrowed view of the four texture slots of one mesh.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeshTextures<'a> {
    pub diffuse: Option<&'a Texture>,
    pub normal: Option<&'a Texture>,
    pub specular: Option<&'a Texture>,
    pub glossiness: Option<&'a Texture>,
}

/// Owns every mesh, texture and light by value.
///
/// Renderers borrow from it for the duration of a frame.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub meshes: Vec<Mesh>,
    pub textures: Vec<Texture>,
    pub lights: Vec<Light>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_texture(&mut self, texture: Texture) -> TextureId {
        self.textures.push(texture);
        TextureId(self.textures.len() - 1)
    }

    pub fn add_mesh(&mut self, mesh: Mesh) -> usize {
        self.meshes.push(mesh);
        self.meshes.len() - 1
    }

    pub fn texture(&self, id: TextureId) -> Option<&Texture> {
        self.textures.get(id.0)
    }

    /// Resolves a mesh's handles. Dangling handles resolve to `None`.
    pub fn resolve_maps(&self, maps: &MaterialMaps) -> MeshTextures<'_> {
        MeshTextures {
            diffuse: maps.diffuse.and_then(|id| self.texture(id)),
            normal: maps.normal.and_then(|id| self.texture(id)),
            specular: maps.specular.and_then(|id| self.texture(id)),
            glossiness: maps.glossiness.and_then(|id| self.texture(id)),
        }
    }
}
