/// G-buffer attachment cache.
///
/// Holds one optional texture per attachment slot plus the multi-view
/// output color target. `update_resources` is called once per
/// configuration change (not per frame) and performs a minimal-diff
/// reallocation: slots whose allocation plan already matches the installed
/// texture are left untouched.
///
/// Handles returned by the accessors stay valid until the next
/// `update_resources` call, which may silently replace them.

use std::sync::Arc;
use glam::UVec2;

use crate::error::{Error, Result};
use crate::graphics_device::{GraphicsDevice, Texture, TextureView, Format};
use crate::gbuffer::attachment::{Attachment, AttachmentSlot, AttachmentUpdate};
use crate::gbuffer::output_color::{OutputColor, OutputColorView};
use crate::gbuffer::shaders::GBufferShaders;
use crate::{engine_error, engine_info, engine_warn};

const SOURCE: &str = "galaxy3d::GBuffer";

const UNINITIALIZED_DEBUG_INFO: &str = "GBuffer (uninitialized - call update_resources first)";

// ===== FORMAT SET =====

/// Logical format of every attachment plus the output view formats
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferFormats {
    pub depth_buffer: Format,
    pub depth_buffer_viewspace_linear: Format,
    pub normal_map: Format,
    pub albedo: Format,
    pub radiance: Format,
    /// Storage format of the output color target (typeless)
    pub output_color_typeless: Format,
    /// Standard output view format
    pub output_color_view: Format,
    /// Output view format used when sRGB conversion must be skipped
    pub output_color_ignore_srgb_conv_view: Format,
    /// `R32_UINT` to request the raw integer UAV, anything else disables it
    pub output_color_r32uint_uav: Format,
}

impl Default for BufferFormats {
    fn default() -> Self {
        Self {
            depth_buffer: Format::D32_FLOAT,
            depth_buffer_viewspace_linear: Format::R16_FLOAT,
            normal_map: Format::R8G8B8A8_UNORM,
            albedo: Format::R8G8B8A8_UNORM_SRGB,
            radiance: Format::R16G16B16A16_FLOAT,
            output_color_typeless: Format::R8G8B8A8_TYPELESS,
            output_color_view: Format::R8G8B8A8_UNORM_SRGB,
            output_color_ignore_srgb_conv_view: Format::R8G8B8A8_UNORM,
            output_color_r32uint_uav: Format::R32_UINT,
        }
    }
}

// ===== CONFIGURATION SNAPSHOT =====

/// Last successfully applied configuration
#[derive(Debug, Clone, PartialEq)]
pub struct GBufferConfig {
    pub resolution: UVec2,
    pub sample_count: u32,
    pub formats: BufferFormats,
    pub deferred_enabled: bool,
}

// ===== UPDATE STATS =====

/// Result of one reconciliation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateStats {
    /// Approximate footprint of every present attachment, in bytes
    pub total_size_bytes: u64,
    /// Slots that were (re)allocated, in evaluation order
    pub recreated: Vec<AttachmentSlot>,
}

impl UpdateStats {
    /// Approximate footprint in megabytes (advisory only)
    pub fn size_in_mb(&self) -> f64 {
        self.total_size_bytes as f64 / (1024.0 * 1024.0)
    }

    fn record(&mut self, slot: AttachmentSlot, update: AttachmentUpdate) {
        self.total_size_bytes = self.total_size_bytes.saturating_add(update.size_bytes());
        if update.is_recreated() {
            self.recreated.push(slot);
        }
    }

    /// Accumulate another pass into this one
    pub fn merge(&mut self, other: UpdateStats) {
        self.total_size_bytes = self.total_size_bytes.saturating_add(other.total_size_bytes);
        self.recreated.extend(other.recreated);
    }
}

// ===== DEBUG INSPECTION =====

/// Handle exposed to the debug inspector
#[derive(Clone)]
pub enum DebugHandle {
    Texture(Arc<dyn Texture>),
    View(Arc<dyn TextureView>),
}

/// One inspectable buffer
#[derive(Clone)]
pub struct DebugTextureEntry {
    pub name: &'static str,
    pub handle: Option<DebugHandle>,
}

// ===== GBUFFER =====

/// Attachment cache of one G-buffer
pub struct GBuffer {
    depth_buffer: Attachment,
    depth_buffer_viewspace_linear: Attachment,
    radiance: Attachment,
    normal_map: Attachment,
    albedo: Attachment,
    output_color: OutputColor,
    config: Option<GBufferConfig>,
    debug_info: String,
    debug_selected_texture: Option<usize>,
    shaders: GBufferShaders,
}

impl GBuffer {
    /// Create an empty G-buffer; nothing is allocated until `update_resources`
    pub fn new() -> Self {
        Self {
            depth_buffer: Attachment::new(AttachmentSlot::Depth),
            depth_buffer_viewspace_linear: Attachment::new(AttachmentSlot::DepthViewspaceLinear),
            radiance: Attachment::new(AttachmentSlot::Radiance),
            normal_map: Attachment::new(AttachmentSlot::NormalMap),
            albedo: Attachment::new(AttachmentSlot::Albedo),
            output_color: OutputColor::new(),
            config: None,
            debug_info: UNINITIALIZED_DEBUG_INFO.to_string(),
            debug_selected_texture: None,
            shaders: GBufferShaders::new(),
        }
    }

    // ===== RECONCILIATION =====

    /// Bring every attachment in line with the requested configuration
    ///
    /// Slots are processed in `AttachmentSlot::ALL` order. The output color
    /// is always single-sampled; normal map and albedo are released when
    /// `enable_deferred` is false. A zero sample count resolves to "no
    /// resource" for every slot.
    ///
    /// # Errors
    ///
    /// - `Error::ContractViolation` if `width` or `height` is zero. Nothing
    ///   is touched in that case.
    /// - Any device error. The slot being processed keeps its old texture
    ///   or ends up empty, and the configuration counts as not applied.
    pub fn update_resources(
        &mut self,
        device: &mut dyn GraphicsDevice,
        width: u32,
        height: u32,
        sample_count: u32,
        formats: &BufferFormats,
        enable_deferred: bool,
    ) -> Result<UpdateStats> {
        if width == 0 || height == 0 {
            engine_error!(SOURCE, "update_resources: invalid resolution {}x{}", width, height);
            return Err(Error::ContractViolation(format!(
                "G-buffer resolution must be non-zero, got {}x{}", width, height
            )));
        }

        let mut stats = UpdateStats::default();
        for slot in AttachmentSlot::ALL {
            if slot.is_deferred_only() && !enable_deferred {
                self.release_slot(slot);
                stats.record(slot, AttachmentUpdate::Released);
                continue;
            }

            let slot_samples = if slot.is_multisampled() { sample_count } else { 1 };
            let update = self
                .update_slot(device, slot, width, height, slot_samples, formats)
                .map_err(|err| {
                    engine_error!(SOURCE, "Failed to update '{}': {}", slot.name(), err);
                    err
                })?;
            stats.record(slot, update);
        }

        self.config = Some(GBufferConfig {
            resolution: UVec2::new(width, height),
            sample_count,
            formats: formats.clone(),
            deferred_enabled: enable_deferred,
        });
        self.debug_info = format!("GBuffer (approx. {:.2}MB) ", stats.size_in_mb());

        engine_info!(SOURCE, "{}x{} x{}: approx. {:.2}MB, {} attachment(s) recreated",
            width, height, sample_count, stats.size_in_mb(), stats.recreated.len());

        Ok(stats)
    }

    /// Attachment of a single-texture slot; `None` for the output color
    fn attachment_mut(&mut self, slot: AttachmentSlot) -> Option<&mut Attachment> {
        match slot {
            AttachmentSlot::Depth => Some(&mut self.depth_buffer),
            AttachmentSlot::DepthViewspaceLinear => Some(&mut self.depth_buffer_viewspace_linear),
            AttachmentSlot::Radiance => Some(&mut self.radiance),
            AttachmentSlot::NormalMap => Some(&mut self.normal_map),
            AttachmentSlot::Albedo => Some(&mut self.albedo),
            AttachmentSlot::OutputColor => None,
        }
    }

    fn release_slot(&mut self, slot: AttachmentSlot) {
        match self.attachment_mut(slot) {
            Some(attachment) => {
                attachment.release();
            }
            None => self.output_color.release(),
        }
    }

    /// Reconcile one slot; `sample_count` is already resolved for the slot
    fn update_slot(
        &mut self,
        device: &mut dyn GraphicsDevice,
        slot: AttachmentSlot,
        width: u32,
        height: u32,
        sample_count: u32,
        formats: &BufferFormats,
    ) -> Result<AttachmentUpdate> {
        match self.attachment_mut(slot) {
            Some(attachment) => attachment.recreate_if_needed(
                device, width, height, slot.format(formats), slot.needs_uav(), sample_count,
            ),
            None => self.output_color.update(device, width, height, formats),
        }
    }

    // ===== ACCESSORS =====

    /// Texture currently installed for a slot (the storage for `OutputColor`)
    pub fn texture(&self, slot: AttachmentSlot) -> Option<&Arc<dyn Texture>> {
        match slot {
            AttachmentSlot::Depth => self.depth_buffer.texture(),
            AttachmentSlot::DepthViewspaceLinear => self.depth_buffer_viewspace_linear.texture(),
            AttachmentSlot::Radiance => self.radiance.texture(),
            AttachmentSlot::OutputColor => self.output_color.storage(),
            AttachmentSlot::NormalMap => self.normal_map.texture(),
            AttachmentSlot::Albedo => self.albedo.texture(),
        }
    }

    pub fn depth_buffer(&self) -> Option<&Arc<dyn Texture>> {
        self.depth_buffer.texture()
    }

    pub fn depth_buffer_viewspace_linear(&self) -> Option<&Arc<dyn Texture>> {
        self.depth_buffer_viewspace_linear.texture()
    }

    pub fn normal_map(&self) -> Option<&Arc<dyn Texture>> {
        self.normal_map.texture()
    }

    pub fn albedo(&self) -> Option<&Arc<dyn Texture>> {
        self.albedo.texture()
    }

    pub fn radiance(&self) -> Option<&Arc<dyn Texture>> {
        self.radiance.texture()
    }

    pub fn output_color(&self) -> &OutputColor {
        &self.output_color
    }

    /// Shortcut for `output_color().view(kind)`
    pub fn output_color_view(&self, kind: OutputColorView) -> Option<&Arc<dyn TextureView>> {
        self.output_color.view(kind)
    }

    /// Last successfully applied configuration
    pub fn config(&self) -> Option<&GBufferConfig> {
        self.config.as_ref()
    }

    /// Resolution of the last applied configuration (zero before the first pass)
    pub fn resolution(&self) -> UVec2 {
        self.config.as_ref().map_or(UVec2::ZERO, |config| config.resolution)
    }

    // ===== DIAGNOSTICS =====

    /// Human readable size summary of the last pass
    pub fn debug_info(&self) -> &str {
        &self.debug_info
    }

    /// Inspectable buffers, in debug UI order
    pub fn debug_textures(&self) -> Vec<DebugTextureEntry> {
        let texture_entry = |attachment: &Attachment| DebugTextureEntry {
            name: attachment.slot().name(),
            handle: attachment.texture().cloned().map(DebugHandle::Texture),
        };

        vec![
            texture_entry(&self.depth_buffer),
            texture_entry(&self.depth_buffer_viewspace_linear),
            texture_entry(&self.normal_map),
            texture_entry(&self.albedo),
            texture_entry(&self.radiance),
            DebugTextureEntry {
                name: AttachmentSlot::OutputColor.name(),
                handle: self.output_color.view(OutputColorView::Standard).cloned().map(DebugHandle::View),
            },
        ]
    }

    /// Select a buffer for inspection; selecting the current one deselects it
    pub fn select_debug_texture(&mut self, index: usize) {
        let count = self.debug_textures().len();
        if index >= count {
            engine_warn!(SOURCE, "select_debug_texture: index {} out of range (0..{})", index, count);
            return;
        }
        self.debug_selected_texture = if self.debug_selected_texture == Some(index) {
            None
        } else {
            Some(index)
        };
    }

    pub fn debug_selected_texture(&self) -> Option<usize> {
        self.debug_selected_texture
    }

    // ===== SHADERS =====

    pub fn shaders(&self) -> &GBufferShaders {
        &self.shaders
    }

    pub fn shaders_mut(&mut self) -> &mut GBufferShaders {
        &mut self.shaders
    }

    /// Recompile the G-buffer programs if they are dirty. Never touches the
    /// attachments.
    pub fn update_shaders(&mut self, device: &mut dyn GraphicsDevice) -> Result<bool> {
        self.shaders.update_shaders(device)
    }
}

impl Default for GBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "gbuffer_tests.rs"]
mod tests;
