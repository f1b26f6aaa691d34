/// Mock GraphicsDevice for unit tests (no GPU required)
///
/// This mock device lets the G-buffer cache and shader state be tested
/// without a real GPU or graphics backend. It records every creation call
/// and can be told to fail specific ones.

use std::sync::{Arc, Mutex};

use crate::graphics_device::{
    GraphicsDevice, Texture, TextureView, Shader,
    TextureDesc, TextureInfo, TextureViewDesc, TextureViewInfo, ShaderDesc,
};
use crate::error::Result;
use crate::engine_bail;

// ============================================================================
// Mock Texture
// ============================================================================

#[derive(Debug)]
pub struct MockTexture {
    pub info: TextureInfo,
    pub name: String,
}

impl MockTexture {
    pub fn new(desc: &TextureDesc) -> Self {
        Self {
            info: TextureInfo::from(desc),
            name: desc.label.clone(),
        }
    }
}

impl Texture for MockTexture {
    fn info(&self) -> &TextureInfo {
        &self.info
    }
}

// ============================================================================
// Mock TextureView
// ============================================================================

#[derive(Debug)]
pub struct MockTextureView {
    pub info: TextureViewInfo,
    pub name: String,
}

impl MockTextureView {
    pub fn new(desc: &TextureViewDesc) -> Self {
        Self {
            info: TextureViewInfo::from(desc),
            name: desc.label.clone(),
        }
    }
}

impl TextureView for MockTextureView {
    fn info(&self) -> &TextureViewInfo {
        &self.info
    }
}

// ============================================================================
// Mock Shader
// ============================================================================

#[derive(Debug)]
pub struct MockShader {
    pub entry_point: String,
    pub macros: usize,
}

impl Shader for MockShader {
    fn entry_point(&self) -> &str {
        &self.entry_point
    }
}

// ============================================================================
// Mock GraphicsDevice
// ============================================================================

/// Mock GraphicsDevice that tracks created resources without GPU
#[derive(Debug, Default)]
pub struct MockGraphicsDevice {
    /// Labels of created textures, in creation order
    pub created_textures: Arc<Mutex<Vec<String>>>,
    /// Labels of created views, in creation order
    pub created_views: Arc<Mutex<Vec<String>>>,
    /// Entry points of compiled shaders, in compilation order
    pub compiled_shaders: Arc<Mutex<Vec<String>>>,
    /// Texture creation fails for this label
    pub fail_texture_label: Option<String>,
    /// View creation fails for every view
    pub fail_views: bool,
    /// Shader compilation fails for this entry point
    pub fail_shader_entry: Option<String>,
}

impl MockGraphicsDevice {
    /// Create a new mock device
    pub fn new() -> Self {
        Self::default()
    }

    /// Get labels of created textures
    pub fn get_created_textures(&self) -> Vec<String> {
        self.created_textures.lock().unwrap().clone()
    }

    /// Get labels of created views
    pub fn get_created_views(&self) -> Vec<String> {
        self.created_views.lock().unwrap().clone()
    }

    /// Get entry points of compiled shaders
    pub fn get_compiled_shaders(&self) -> Vec<String> {
        self.compiled_shaders.lock().unwrap().clone()
    }

    /// Total number of texture + view creations
    pub fn allocation_count(&self) -> usize {
        self.created_textures.lock().unwrap().len() + self.created_views.lock().unwrap().len()
    }

    /// Forget everything recorded so far
    pub fn clear_history(&self) {
        self.created_textures.lock().unwrap().clear();
        self.created_views.lock().unwrap().clear();
        self.compiled_shaders.lock().unwrap().clear();
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn create_texture_2d(&mut self, desc: &TextureDesc) -> Result<Arc<dyn Texture>> {
        if self.fail_texture_label.as_deref() == Some(desc.label.as_str()) {
            engine_bail!("galaxy3d::mock",
                "create_texture_2d: refused texture '{}'", desc.label);
        }
        if desc.width == 0 || desc.height == 0 || desc.sample_count == 0 {
            engine_bail!("galaxy3d::mock",
                "create_texture_2d: invalid dimensions {}x{}x{}",
                desc.width, desc.height, desc.sample_count);
        }
        self.created_textures.lock().unwrap().push(desc.label.clone());
        Ok(Arc::new(MockTexture::new(desc)))
    }

    fn create_texture_view(
        &mut self,
        texture: &Arc<dyn Texture>,
        desc: &TextureViewDesc,
    ) -> Result<Arc<dyn TextureView>> {
        if self.fail_views {
            engine_bail!("galaxy3d::mock",
                "create_texture_view: refused view '{}'", desc.label);
        }
        if !texture.info().bind_flags.contains(desc.bind_flags) {
            engine_bail!("galaxy3d::mock",
                "create_texture_view: view '{}' needs {:?} but texture only supports {:?}",
                desc.label, desc.bind_flags, texture.info().bind_flags);
        }
        self.created_views.lock().unwrap().push(desc.label.clone());
        Ok(Arc::new(MockTextureView::new(desc)))
    }

    fn compile_shader(&mut self, desc: &ShaderDesc) -> Result<Arc<dyn Shader>> {
        if self.fail_shader_entry.as_deref() == Some(desc.entry_point.as_str()) {
            engine_bail!("galaxy3d::mock",
                "compile_shader: {}({}) failed to compile", desc.source_unit, desc.entry_point);
        }
        self.compiled_shaders.lock().unwrap().push(desc.entry_point.clone());
        Ok(Arc::new(MockShader {
            entry_point: desc.entry_point.clone(),
            macros: desc.macros.len(),
        }))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "mock_graphics_device_tests.rs"]
mod tests;
