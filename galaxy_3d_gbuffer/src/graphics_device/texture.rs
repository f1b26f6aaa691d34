/// Texture trait, texture view trait, descriptors and info

use bitflags::bitflags;
use crate::graphics_device::Format;

// ===== FLAGS =====

bitflags! {
    /// Bind capabilities of a texture or view
    ///
    /// `DEPTH_STENCIL` is never combined with `RENDER_TARGET` or
    /// `UNORDERED_ACCESS` on the same resource.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct BindFlags: u32 {
        /// Can be bound as a color render target
        const RENDER_TARGET = 1 << 0;
        /// Can be read from shaders
        const SHADER_RESOURCE = 1 << 1;
        /// Can be bound as a depth/stencil target
        const DEPTH_STENCIL = 1 << 2;
        /// Can be read/written in random order (UAV / storage image)
        const UNORDERED_ACCESS = 1 << 3;
    }
}

bitflags! {
    /// CPU access flags (empty = GPU only)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct AccessFlags: u32 {
        const CPU_READ = 1 << 0;
        const CPU_WRITE = 1 << 1;
    }
}

// ===== TEXTURE DESC =====

/// Descriptor for creating a 2D texture
///
/// The four view formats tell the backend which default views to build
/// alongside the resource; `Format::Unknown` means "no view of that kind".
#[derive(Debug, Clone, PartialEq)]
pub struct TextureDesc {
    /// Debug label
    pub label: String,
    /// Storage format
    pub format: Format,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Number of mip levels
    pub mip_levels: u32,
    /// Number of array slices
    pub array_size: u32,
    /// MSAA sample count
    pub sample_count: u32,
    /// Bind capabilities
    pub bind_flags: BindFlags,
    /// CPU access
    pub access_flags: AccessFlags,
    /// Shader resource view format
    pub srv_format: Format,
    /// Render target view format
    pub rtv_format: Format,
    /// Depth stencil view format
    pub dsv_format: Format,
    /// Unordered access view format
    pub uav_format: Format,
}

// ===== TEXTURE INFO =====

/// Read-only properties of a created texture.
///
/// Returned by `Texture::info()` so the G-buffer can compare the installed
/// description against a new allocation plan.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureInfo {
    pub format: Format,
    pub width: u32,
    pub height: u32,
    pub mip_levels: u32,
    pub array_size: u32,
    pub sample_count: u32,
    pub bind_flags: BindFlags,
    pub access_flags: AccessFlags,
    pub srv_format: Format,
    pub rtv_format: Format,
    pub dsv_format: Format,
    pub uav_format: Format,
}

impl From<&TextureDesc> for TextureInfo {
    fn from(desc: &TextureDesc) -> Self {
        Self {
            format: desc.format,
            width: desc.width,
            height: desc.height,
            mip_levels: desc.mip_levels,
            array_size: desc.array_size,
            sample_count: desc.sample_count,
            bind_flags: desc.bind_flags,
            access_flags: desc.access_flags,
            srv_format: desc.srv_format,
            rtv_format: desc.rtv_format,
            dsv_format: desc.dsv_format,
            uav_format: desc.uav_format,
        }
    }
}

impl TextureInfo {
    /// Approximate GPU footprint of the storage in bytes
    pub fn size_in_bytes(&self) -> u64 {
        (self.width as u64)
            .saturating_mul(self.height as u64)
            .saturating_mul(self.sample_count as u64)
            .saturating_mul(self.array_size as u64)
            .saturating_mul(self.format.bytes_per_pixel() as u64)
    }
}

// ===== TEXTURE VIEW =====

/// Descriptor for creating an additional view of an existing texture
#[derive(Debug, Clone, PartialEq)]
pub struct TextureViewDesc {
    /// Debug label
    pub label: String,
    pub bind_flags: BindFlags,
    pub srv_format: Format,
    pub rtv_format: Format,
    pub dsv_format: Format,
    pub uav_format: Format,
}

/// Read-only properties of a created view
#[derive(Debug, Clone, PartialEq)]
pub struct TextureViewInfo {
    pub bind_flags: BindFlags,
    pub srv_format: Format,
    pub rtv_format: Format,
    pub dsv_format: Format,
    pub uav_format: Format,
}

impl From<&TextureViewDesc> for TextureViewInfo {
    fn from(desc: &TextureViewDesc) -> Self {
        Self {
            bind_flags: desc.bind_flags,
            srv_format: desc.srv_format,
            rtv_format: desc.rtv_format,
            dsv_format: desc.dsv_format,
            uav_format: desc.uav_format,
        }
    }
}

// ===== TRAITS =====

/// Texture resource trait
///
/// Implemented by backend-specific texture types.
/// The texture is automatically destroyed when dropped.
pub trait Texture: Send + Sync {
    /// Get the read-only properties of this texture
    fn info(&self) -> &TextureInfo;
}

/// Texture view trait
///
/// A typed interpretation of a texture's storage. Views are owned by
/// whoever created the texture they alias and must not outlive it.
pub trait TextureView: Send + Sync {
    /// Get the read-only properties of this view
    fn info(&self) -> &TextureViewInfo;
}
