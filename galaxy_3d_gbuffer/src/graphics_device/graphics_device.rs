/// GraphicsDevice trait - factory interface for the resources the G-buffer needs

use std::sync::Arc;

use crate::error::Result;
use crate::graphics_device::{
    Texture, TextureView, Shader,
    TextureDesc, TextureViewDesc, ShaderDesc,
};

/// Graphics device trait
///
/// Implemented by backend-specific devices. The G-buffer only ever borrows
/// the device for the duration of one call and never stores it.
pub trait GraphicsDevice: Send + Sync {
    /// Create a 2D texture with its default views
    ///
    /// # Arguments
    ///
    /// * `desc` - Texture descriptor (storage format, dimensions, bind flags and view formats)
    ///
    /// # Returns
    ///
    /// A shared pointer to the created texture
    fn create_texture_2d(&mut self, desc: &TextureDesc) -> Result<Arc<dyn Texture>>;

    /// Create an additional view of an existing texture
    ///
    /// # Arguments
    ///
    /// * `texture` - Texture whose storage the view reinterprets
    /// * `desc` - View descriptor
    fn create_texture_view(
        &mut self,
        texture: &Arc<dyn Texture>,
        desc: &TextureViewDesc,
    ) -> Result<Arc<dyn TextureView>>;

    /// Compile a shader program from a source unit
    ///
    /// # Arguments
    ///
    /// * `desc` - Source unit, profile, entry point and macros
    fn compile_shader(&mut self, desc: &ShaderDesc) -> Result<Arc<dyn Shader>>;
}
