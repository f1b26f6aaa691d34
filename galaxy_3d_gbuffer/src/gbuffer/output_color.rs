/// Output color attachment: one typeless storage texture exposed through
/// three views.
///
/// The views alias the storage and are rebuilt as a unit, only when the
/// storage itself was recreated. Releasing the storage clears them in the
/// same step, so no view outlives the texture it reinterprets.

use std::sync::Arc;

use crate::error::Result;
use crate::graphics_device::{
    GraphicsDevice, Texture, TextureView, TextureViewDesc, Format, BindFlags,
};
use crate::gbuffer::attachment::{Attachment, AttachmentSlot, AttachmentUpdate};
use crate::gbuffer::BufferFormats;
use crate::engine_debug;

const SOURCE: &str = "galaxy3d::GBuffer";

/// Views derived from the output color storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputColorView {
    /// Render target + UAV + SRV in the non-sRGB format
    IgnoreSrgbConversion,
    /// Render target + SRV in the standard (usually sRGB) format
    Standard,
    /// Raw 32-bit unsigned integer UAV (atomics)
    R32UintUav,
}

impl OutputColorView {
    pub const ALL: [OutputColorView; 3] = [
        OutputColorView::IgnoreSrgbConversion,
        OutputColorView::Standard,
        OutputColorView::R32UintUav,
    ];

    fn index(self) -> usize {
        match self {
            OutputColorView::IgnoreSrgbConversion => 0,
            OutputColorView::Standard => 1,
            OutputColorView::R32UintUav => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            OutputColorView::IgnoreSrgbConversion => "OutputColor IgnoreSRGBConv",
            OutputColorView::Standard => "OutputColor",
            OutputColorView::R32UintUav => "OutputColor R32_UINT UAV",
        }
    }

    /// View descriptor for this kind, `None` when the configuration does not
    /// ask for it
    fn desc(self, formats: &BufferFormats) -> Option<TextureViewDesc> {
        let label = self.name().to_string();
        match self {
            OutputColorView::IgnoreSrgbConversion => {
                let format = formats.output_color_ignore_srgb_conv_view;
                Some(TextureViewDesc {
                    label,
                    bind_flags: BindFlags::RENDER_TARGET | BindFlags::UNORDERED_ACCESS | BindFlags::SHADER_RESOURCE,
                    srv_format: format,
                    rtv_format: format,
                    dsv_format: Format::Unknown,
                    uav_format: format,
                })
            }
            OutputColorView::Standard => {
                let format = formats.output_color_view;
                Some(TextureViewDesc {
                    label,
                    bind_flags: BindFlags::RENDER_TARGET | BindFlags::SHADER_RESOURCE,
                    srv_format: format,
                    rtv_format: format,
                    dsv_format: Format::Unknown,
                    uav_format: Format::Unknown,
                })
            }
            OutputColorView::R32UintUav => {
                if formats.output_color_r32uint_uav != Format::R32_UINT {
                    return None;
                }
                Some(TextureViewDesc {
                    label,
                    bind_flags: BindFlags::UNORDERED_ACCESS,
                    srv_format: Format::Unknown,
                    rtv_format: Format::Unknown,
                    dsv_format: Format::Unknown,
                    uav_format: Format::R32_UINT,
                })
            }
        }
    }
}

/// Owning storage texture plus its derived views
pub struct OutputColor {
    storage: Attachment,
    views: [Option<Arc<dyn TextureView>>; 3],
}

impl OutputColor {
    pub fn new() -> Self {
        Self {
            storage: Attachment::new(AttachmentSlot::OutputColor),
            views: [None, None, None],
        }
    }

    /// Typeless storage texture
    pub fn storage(&self) -> Option<&Arc<dyn Texture>> {
        self.storage.texture()
    }

    /// One of the derived views
    pub fn view(&self, kind: OutputColorView) -> Option<&Arc<dyn TextureView>> {
        self.views[kind.index()].as_ref()
    }

    /// Number of views currently present (0, 2 or 3)
    pub fn view_count(&self) -> usize {
        self.views.iter().filter(|v| v.is_some()).count()
    }

    /// Reconcile the storage (never multisampled, always with UAV) and
    /// rebuild the views when it was recreated
    pub fn update(
        &mut self,
        device: &mut dyn GraphicsDevice,
        width: u32,
        height: u32,
        formats: &BufferFormats,
    ) -> Result<AttachmentUpdate> {
        let slot = AttachmentSlot::OutputColor;
        let update = self.storage.recreate_if_needed(
            device, width, height, slot.format(formats), slot.needs_uav(), 1,
        )?;

        match update {
            AttachmentUpdate::Recreated { .. } => {
                if let Err(err) = self.derive_views(device, formats) {
                    // Storage without its views would be kept as a cache hit next time
                    self.storage.release();
                    return Err(err);
                }
            }
            AttachmentUpdate::Released => self.clear_views(),
            AttachmentUpdate::Kept { .. } => {}
        }

        Ok(update)
    }

    /// Drop the storage and every view
    pub fn release(&mut self) {
        self.clear_views();
        self.storage.release();
    }

    fn clear_views(&mut self) {
        self.views = [None, None, None];
    }

    fn derive_views(&mut self, device: &mut dyn GraphicsDevice, formats: &BufferFormats) -> Result<()> {
        self.clear_views();
        let Some(storage) = self.storage.texture().cloned() else {
            return Ok(());
        };

        let mut views: [Option<Arc<dyn TextureView>>; 3] = [None, None, None];
        for kind in OutputColorView::ALL {
            if let Some(desc) = kind.desc(formats) {
                views[kind.index()] = Some(device.create_texture_view(&storage, &desc)?);
            }
        }
        self.views = views;

        engine_debug!(SOURCE, "Derived {} output color views", self.view_count());
        Ok(())
    }
}

impl Default for OutputColor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "output_color_tests.rs"]
mod tests;
