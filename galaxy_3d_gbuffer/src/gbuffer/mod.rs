//! G-buffer module
//!
//! Owns the intermediate attachments of the deferred/hybrid pipeline
//! (depth, linear depth, normals, albedo, radiance, output color) and
//! reallocates them only when the configuration actually requires it.

mod format_resolution;
mod attachment;
mod output_color;
mod gbuffer;
mod shaders;
mod gbuffer_manager;

pub use format_resolution::{resolve_allocation, AllocationPlan};
pub use attachment::{Attachment, AttachmentSlot, AttachmentUpdate};
pub use output_color::{OutputColor, OutputColorView};
pub use gbuffer::{
    GBuffer, BufferFormats, GBufferConfig, UpdateStats, DebugHandle, DebugTextureEntry,
};
pub use shaders::{GBufferShaders, GBufferProgram, DEFAULT_SOURCE_UNIT, SHADER_PROFILE};
pub use gbuffer_manager::{GBufferManager, GBufferKey};
