/// Pixel formats understood by the graphics device abstraction

/// Logical pixel format
///
/// Names follow the DXGI convention: `_TYPELESS` formats are storage-only
/// containers whose interpretation is deferred to views, `D*` formats are
/// depth/stencil formats, `_SRGB` formats are gamma-encoded color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[allow(non_camel_case_types)]
pub enum Format {
    /// No format (no resource / no view)
    #[default]
    Unknown,

    // 32-bit single channel
    R32_TYPELESS,
    R32_FLOAT,
    R32_UINT,

    // Depth / stencil
    D32_FLOAT,
    R24G8_TYPELESS,
    R24_UNORM_X8_TYPELESS,
    D24_UNORM_S8_UINT,

    // 8-bit per channel color
    R8_UNORM,
    R8G8B8A8_TYPELESS,
    R8G8B8A8_UNORM,
    R8G8B8A8_UNORM_SRGB,
    R8G8B8A8_UINT,
    B8G8R8A8_TYPELESS,
    B8G8R8A8_UNORM,
    B8G8R8A8_UNORM_SRGB,

    // 16-bit per channel
    R16_UNORM,
    R16_FLOAT,
    R16G16_FLOAT,
    R16G16B16A16_TYPELESS,
    R16G16B16A16_FLOAT,

    // Packed
    R10G10B10A2_UNORM,
    R11G11B10_FLOAT,

    // 32-bit per channel
    R32G32_FLOAT,
    R32G32B32A32_FLOAT,
}

impl Format {
    /// Size of one pixel in bytes (0 for `Unknown`)
    pub const fn bytes_per_pixel(self) -> u32 {
        match self {
            Format::Unknown => 0,
            Format::R8_UNORM => 1,
            Format::R16_UNORM | Format::R16_FLOAT => 2,
            Format::R32_TYPELESS
            | Format::R32_FLOAT
            | Format::R32_UINT
            | Format::D32_FLOAT
            | Format::R24G8_TYPELESS
            | Format::R24_UNORM_X8_TYPELESS
            | Format::D24_UNORM_S8_UINT
            | Format::R8G8B8A8_TYPELESS
            | Format::R8G8B8A8_UNORM
            | Format::R8G8B8A8_UNORM_SRGB
            | Format::R8G8B8A8_UINT
            | Format::B8G8R8A8_TYPELESS
            | Format::B8G8R8A8_UNORM
            | Format::B8G8R8A8_UNORM_SRGB
            | Format::R16G16_FLOAT
            | Format::R10G10B10A2_UNORM
            | Format::R11G11B10_FLOAT => 4,
            Format::R16G16B16A16_TYPELESS
            | Format::R16G16B16A16_FLOAT
            | Format::R32G32_FLOAT => 8,
            Format::R32G32B32A32_FLOAT => 16,
        }
    }

    /// Storage-only format whose interpretation is left to views
    pub const fn is_typeless(self) -> bool {
        matches!(
            self,
            Format::R32_TYPELESS
                | Format::R24G8_TYPELESS
                | Format::R24_UNORM_X8_TYPELESS
                | Format::R8G8B8A8_TYPELESS
                | Format::B8G8R8A8_TYPELESS
                | Format::R16G16B16A16_TYPELESS
        )
    }

    /// Depth (or depth/stencil) format usable as a depth attachment
    pub const fn is_depth(self) -> bool {
        matches!(self, Format::D32_FLOAT | Format::D24_UNORM_S8_UINT)
    }

    /// Gamma-encoded color format
    pub const fn is_srgb(self) -> bool {
        matches!(self, Format::R8G8B8A8_UNORM_SRGB | Format::B8G8R8A8_UNORM_SRGB)
    }

    /// True for `Format::Unknown`
    pub const fn is_unknown(self) -> bool {
        matches!(self, Format::Unknown)
    }
}

#[cfg(test)]
#[path = "format_tests.rs"]
mod tests;
