/// G-buffer attachment slots and per-slot reconciliation.
///
/// An `Attachment` owns at most one texture. `recreate_if_needed` resolves
/// the allocation plan for the requested configuration, keeps the installed
/// texture when it already matches and otherwise replaces it in one step.

use std::sync::Arc;

use crate::error::Result;
use crate::graphics_device::{GraphicsDevice, Texture, Format};
use crate::gbuffer::format_resolution::resolve_allocation;
use crate::gbuffer::BufferFormats;
use crate::engine_debug;

const SOURCE: &str = "galaxy3d::GBuffer";

// ===== SLOTS =====

/// Logical attachment slot of the G-buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttachmentSlot {
    Depth,
    DepthViewspaceLinear,
    Radiance,
    OutputColor,
    NormalMap,
    Albedo,
}

impl AttachmentSlot {
    /// Fixed evaluation order of a reconciliation pass
    pub const ALL: [AttachmentSlot; 6] = [
        AttachmentSlot::Depth,
        AttachmentSlot::DepthViewspaceLinear,
        AttachmentSlot::Radiance,
        AttachmentSlot::OutputColor,
        AttachmentSlot::NormalMap,
        AttachmentSlot::Albedo,
    ];

    /// Human readable name (used as texture label and in debug UI)
    pub fn name(self) -> &'static str {
        match self {
            AttachmentSlot::Depth => "Depth Buffer",
            AttachmentSlot::DepthViewspaceLinear => "Depth Buffer Viewspace Linear",
            AttachmentSlot::Radiance => "Radiance",
            AttachmentSlot::OutputColor => "OutputColor",
            AttachmentSlot::NormalMap => "Normal Map",
            AttachmentSlot::Albedo => "Albedo",
        }
    }

    /// Whether the slot follows the requested MSAA sample count.
    /// The output color is always single-sampled.
    pub fn is_multisampled(self) -> bool {
        !matches!(self, AttachmentSlot::OutputColor)
    }

    /// Whether the slot requests unordered access
    pub fn needs_uav(self) -> bool {
        matches!(self, AttachmentSlot::OutputColor)
    }

    /// Slots that only exist while deferred shading is enabled
    pub fn is_deferred_only(self) -> bool {
        matches!(self, AttachmentSlot::NormalMap | AttachmentSlot::Albedo)
    }

    /// Logical format requested for this slot
    pub fn format(self, formats: &BufferFormats) -> Format {
        match self {
            AttachmentSlot::Depth => formats.depth_buffer,
            AttachmentSlot::DepthViewspaceLinear => formats.depth_buffer_viewspace_linear,
            AttachmentSlot::Radiance => formats.radiance,
            AttachmentSlot::OutputColor => formats.output_color_typeless,
            AttachmentSlot::NormalMap => formats.normal_map,
            AttachmentSlot::Albedo => formats.albedo,
        }
    }
}

// ===== UPDATE RESULT =====

/// Outcome of reconciling one attachment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentUpdate {
    /// No resource wanted; any previous texture was dropped
    Released,
    /// Installed texture already matched, nothing was allocated
    Kept { size_bytes: u64 },
    /// A new texture replaced the previous one (if any)
    Recreated { size_bytes: u64 },
}

impl AttachmentUpdate {
    /// Estimated size of the attachment, 0 when released
    pub fn size_bytes(&self) -> u64 {
        match self {
            AttachmentUpdate::Released => 0,
            AttachmentUpdate::Kept { size_bytes } | AttachmentUpdate::Recreated { size_bytes } => *size_bytes,
        }
    }

    pub fn is_recreated(&self) -> bool {
        matches!(self, AttachmentUpdate::Recreated { .. })
    }
}

// ===== ATTACHMENT =====

/// One G-buffer slot and the texture it currently owns
pub struct Attachment {
    slot: AttachmentSlot,
    texture: Option<Arc<dyn Texture>>,
}

impl Attachment {
    /// Create an empty attachment for a slot
    pub fn new(slot: AttachmentSlot) -> Self {
        Self { slot, texture: None }
    }

    pub fn slot(&self) -> AttachmentSlot {
        self.slot
    }

    /// Currently installed texture
    pub fn texture(&self) -> Option<&Arc<dyn Texture>> {
        self.texture.as_ref()
    }

    pub fn is_present(&self) -> bool {
        self.texture.is_some()
    }

    /// Drop the installed texture. Returns whether one was installed.
    pub fn release(&mut self) -> bool {
        let released = self.texture.take().is_some();
        if released {
            engine_debug!(SOURCE, "Released '{}'", self.slot.name());
        }
        released
    }

    /// Make the attachment match the requested configuration
    ///
    /// Zero dimensions, a zero sample count or `Format::Unknown` release the
    /// texture. A texture whose description already matches the resolved
    /// plan is kept without touching the device. Otherwise a new texture is
    /// created and replaces the old one; on device failure the old texture
    /// stays installed and the error is returned.
    ///
    /// The reported size uses the requested logical format, not the storage
    /// format of the plan, and saturates at `u64::MAX`.
    pub fn recreate_if_needed(
        &mut self,
        device: &mut dyn GraphicsDevice,
        width: u32,
        height: u32,
        format: Format,
        needs_uav: bool,
        sample_count: u32,
    ) -> Result<AttachmentUpdate> {
        if width == 0 || height == 0 {
            self.release();
            return Ok(AttachmentUpdate::Released);
        }
        let Some(plan) = resolve_allocation(format, needs_uav, sample_count) else {
            self.release();
            return Ok(AttachmentUpdate::Released);
        };

        let size_bytes = (width as u64)
            .saturating_mul(height as u64)
            .saturating_mul(sample_count as u64)
            .saturating_mul(format.bytes_per_pixel() as u64);

        if let Some(texture) = &self.texture {
            if plan.matches(texture.info(), width, height, sample_count) {
                return Ok(AttachmentUpdate::Kept { size_bytes });
            }
        }

        let desc = plan.texture_desc(self.slot.name(), width, height, sample_count);
        let texture = device.create_texture_2d(&desc)?;
        self.texture = Some(texture);

        engine_debug!(SOURCE,
            "Recreated '{}' {}x{} x{} {:?} (storage {:?}, srv {:?}, rtv {:?}, dsv {:?}, uav {:?})",
            self.slot.name(), width, height, sample_count, format,
            plan.resource_format, plan.srv_format, plan.rtv_format, plan.dsv_format, plan.uav_format);

        Ok(AttachmentUpdate::Recreated { size_bytes })
    }
}

#[cfg(test)]
#[path = "attachment_tests.rs"]
mod tests;
