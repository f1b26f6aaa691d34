/// Manager for independent G-buffer instances.
///
/// Uses a SlotMap so keys stay stable while other instances are removed
/// (one G-buffer per viewport, shadow pass, editor preview, ...).

use slotmap::{new_key_type, SlotMap};

use crate::error::{Error, Result};
use crate::graphics_device::GraphicsDevice;
use crate::gbuffer::gbuffer::{GBuffer, BufferFormats, UpdateStats};
use crate::engine_debug;

const SOURCE: &str = "galaxy3d::GBufferManager";

new_key_type! {
    /// Stable key for a GBuffer within a GBufferManager
    pub struct GBufferKey;
}

/// Owns every G-buffer instance
pub struct GBufferManager {
    gbuffers: SlotMap<GBufferKey, GBuffer>,
}

impl GBufferManager {
    /// Create a new empty manager
    pub fn new() -> Self {
        Self {
            gbuffers: SlotMap::with_key(),
        }
    }

    /// Create an empty G-buffer and return its key
    pub fn create_gbuffer(&mut self) -> GBufferKey {
        let key = self.gbuffers.insert(GBuffer::new());
        engine_debug!(SOURCE, "Created GBuffer {:?}", key);
        key
    }

    pub fn gbuffer(&self, key: GBufferKey) -> Option<&GBuffer> {
        self.gbuffers.get(key)
    }

    pub fn gbuffer_mut(&mut self, key: GBufferKey) -> Option<&mut GBuffer> {
        self.gbuffers.get_mut(key)
    }

    /// Remove a G-buffer. Its resources are dropped with it.
    pub fn remove_gbuffer(&mut self, key: GBufferKey) -> Option<GBuffer> {
        let removed = self.gbuffers.remove(key);
        if removed.is_some() {
            engine_debug!(SOURCE, "Removed GBuffer {:?}", key);
        }
        removed
    }

    pub fn gbuffer_count(&self) -> usize {
        self.gbuffers.len()
    }

    /// Iterate over all keys
    pub fn gbuffer_keys(&self) -> impl Iterator<Item = GBufferKey> + '_ {
        self.gbuffers.keys()
    }

    /// Get a mutable G-buffer, failing for an unknown key
    ///
    /// # Errors
    ///
    /// `Error::InvalidResource` if the key was removed or never existed.
    pub fn try_gbuffer_mut(&mut self, key: GBufferKey) -> Result<&mut GBuffer> {
        self.gbuffers.get_mut(key).ok_or_else(|| {
            Error::InvalidResource(format!("GBuffer {:?} does not exist", key))
        })
    }

    /// Reconcile every G-buffer with the same configuration
    ///
    /// Stops at the first failure; G-buffers already processed keep their
    /// new resources.
    pub fn update_all(
        &mut self,
        device: &mut dyn GraphicsDevice,
        width: u32,
        height: u32,
        sample_count: u32,
        formats: &BufferFormats,
        enable_deferred: bool,
    ) -> Result<UpdateStats> {
        let mut total = UpdateStats::default();
        for gbuffer in self.gbuffers.values_mut() {
            let stats = gbuffer.update_resources(
                device, width, height, sample_count, formats, enable_deferred,
            )?;
            total.merge(stats);
        }
        Ok(total)
    }

    /// Remove every G-buffer
    pub fn clear(&mut self) {
        self.gbuffers.clear();
    }
}

impl Default for GBufferManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "gbuffer_manager_tests.rs"]
mod tests;
