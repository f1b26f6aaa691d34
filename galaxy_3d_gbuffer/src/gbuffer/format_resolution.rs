/// Allocation planning for G-buffer attachments.
///
/// Maps a requested logical format plus capability needs to the concrete
/// storage format, default view formats and bind flags a texture must be
/// created with. Pure and table-driven so it can be tested without a device.

use crate::graphics_device::{
    Format, BindFlags, AccessFlags, TextureDesc, TextureInfo,
};

/// Concrete allocation derived from a logical format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AllocationPlan {
    /// Storage format of the resource itself
    pub resource_format: Format,
    /// Shader resource view format
    pub srv_format: Format,
    /// Render target view format
    pub rtv_format: Format,
    /// Depth stencil view format
    pub dsv_format: Format,
    /// Unordered access view format
    pub uav_format: Format,
    /// Final bind capabilities
    pub bind_flags: BindFlags,
}

/// Resolve the allocation plan for one attachment.
///
/// Returns `None` when no resource should exist (`Format::Unknown` or a
/// zero sample count).
///
/// - `D32_FLOAT` / `D24_UNORM_S8_UINT`: typeless storage, depth-readable SRV,
///   DSV in the requested format; render target and UAV are dropped.
/// - sRGB color: UAV dropped even when requested.
/// - other typeless formats: no automatic SRV/RTV/UAV, views must be created
///   explicitly. The requested bind flags are kept for those views.
/// - anything else: every view uses the requested format.
pub fn resolve_allocation(format: Format, needs_uav: bool, sample_count: u32) -> Option<AllocationPlan> {
    if format.is_unknown() || sample_count == 0 {
        return None;
    }

    let mut bind_flags = BindFlags::RENDER_TARGET | BindFlags::SHADER_RESOURCE;
    if needs_uav {
        bind_flags |= BindFlags::UNORDERED_ACCESS;
    }
    let depth_flags = (bind_flags - (BindFlags::RENDER_TARGET | BindFlags::UNORDERED_ACCESS))
        | BindFlags::DEPTH_STENCIL;

    let mut plan = match format {
        Format::D32_FLOAT => AllocationPlan {
            resource_format: Format::R32_TYPELESS,
            srv_format: Format::R32_FLOAT,
            rtv_format: Format::Unknown,
            dsv_format: Format::D32_FLOAT,
            uav_format: Format::Unknown,
            bind_flags: depth_flags,
        },
        Format::D24_UNORM_S8_UINT => AllocationPlan {
            resource_format: Format::R24G8_TYPELESS,
            srv_format: Format::R24_UNORM_X8_TYPELESS,
            rtv_format: Format::Unknown,
            dsv_format: Format::D24_UNORM_S8_UINT,
            uav_format: Format::Unknown,
            bind_flags: depth_flags,
        },
        f if f.is_srgb() => AllocationPlan {
            resource_format: f,
            srv_format: f,
            rtv_format: f,
            dsv_format: Format::Unknown,
            uav_format: Format::Unknown,
            bind_flags: bind_flags - BindFlags::UNORDERED_ACCESS,
        },
        f if f.is_typeless() => AllocationPlan {
            resource_format: f,
            srv_format: Format::Unknown,
            rtv_format: Format::Unknown,
            dsv_format: Format::Unknown,
            uav_format: Format::Unknown,
            bind_flags,
        },
        f => AllocationPlan {
            resource_format: f,
            srv_format: f,
            rtv_format: f,
            dsv_format: Format::Unknown,
            uav_format: f,
            bind_flags,
        },
    };

    if !needs_uav {
        plan.uav_format = Format::Unknown;
    }

    Some(plan)
}

impl AllocationPlan {
    /// Whether an installed texture already satisfies this plan
    pub fn matches(&self, info: &TextureInfo, width: u32, height: u32, sample_count: u32) -> bool {
        info.width == width
            && info.height == height
            && info.sample_count == sample_count
            && info.mip_levels == 1
            && info.array_size == 1
            && info.format == self.resource_format
            && info.srv_format == self.srv_format
            && info.rtv_format == self.rtv_format
            && info.dsv_format == self.dsv_format
            && info.uav_format == self.uav_format
            && info.bind_flags == self.bind_flags
    }

    /// Build the `create_texture_2d` descriptor for this plan
    pub fn texture_desc(&self, label: &str, width: u32, height: u32, sample_count: u32) -> TextureDesc {
        TextureDesc {
            label: label.to_string(),
            format: self.resource_format,
            width,
            height,
            mip_levels: 1,
            array_size: 1,
            sample_count,
            bind_flags: self.bind_flags,
            access_flags: AccessFlags::empty(),
            srv_format: self.srv_format,
            rtv_format: self.rtv_format,
            dsv_format: self.dsv_format,
            uav_format: self.uav_format,
        }
    }
}

#[cfg(test)]
#[path = "format_resolution_tests.rs"]
mod tests;
