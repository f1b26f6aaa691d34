/// Lazily compiled G-buffer shader programs.
///
/// Independent from the attachment cache: a dirty flag marks the programs
/// stale, and `update_shaders` recompiles the fixed program list only when
/// that flag is set. A failed pass leaves both the previous programs and
/// the flag in place so the next call retries.

use std::sync::Arc;
use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::graphics_device::{GraphicsDevice, Shader, ShaderDesc, ShaderMacro};
use crate::{engine_debug, engine_error, engine_info};

const SOURCE: &str = "galaxy3d::GBuffer";

/// Default shader source unit
pub const DEFAULT_SOURCE_UNIT: &str = "vaGBuffer.hlsl";

/// Pixel shader profile used for every program
pub const SHADER_PROFILE: &str = "ps_5_0";

// ===== PROGRAMS =====

/// Named programs compiled from the G-buffer source unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GBufferProgram {
    DepthToViewspaceLinear,
    DebugDrawDepth,
    DebugDrawDepthViewspaceLinear,
    DebugDrawNormalMap,
    DebugDrawAlbedo,
    DebugDrawRadiance,
}

impl GBufferProgram {
    /// Compilation order
    pub const ALL: [GBufferProgram; 6] = [
        GBufferProgram::DepthToViewspaceLinear,
        GBufferProgram::DebugDrawDepth,
        GBufferProgram::DebugDrawDepthViewspaceLinear,
        GBufferProgram::DebugDrawNormalMap,
        GBufferProgram::DebugDrawAlbedo,
        GBufferProgram::DebugDrawRadiance,
    ];

    /// Entry point name in the source unit
    pub fn entry_point(self) -> &'static str {
        match self {
            GBufferProgram::DepthToViewspaceLinear => "DepthToViewspaceLinearPS",
            GBufferProgram::DebugDrawDepth => "DebugDrawDepthPS",
            GBufferProgram::DebugDrawDepthViewspaceLinear => "DebugDrawDepthViewspaceLinearPS",
            GBufferProgram::DebugDrawNormalMap => "DebugDrawNormalMapPS",
            GBufferProgram::DebugDrawAlbedo => "DebugDrawAlbedoPS",
            GBufferProgram::DebugDrawRadiance => "DebugDrawRadiancePS",
        }
    }
}

// ===== SHADER STATE =====

/// Dirty-flagged shader programs for one G-buffer
pub struct GBufferShaders {
    source_unit: String,
    static_macros: Vec<ShaderMacro>,
    dirty: bool,
    programs: FxHashMap<GBufferProgram, Arc<dyn Shader>>,
}

impl GBufferShaders {
    /// Create the shader state; it starts dirty so the first
    /// `update_shaders` compiles everything
    pub fn new() -> Self {
        Self {
            source_unit: DEFAULT_SOURCE_UNIT.to_string(),
            static_macros: Vec::new(),
            dirty: true,
            programs: FxHashMap::default(),
        }
    }

    pub fn source_unit(&self) -> &str {
        &self.source_unit
    }

    /// Change the source unit. Marks dirty when it differs.
    pub fn set_source_unit(&mut self, source_unit: impl Into<String>) {
        let source_unit = source_unit.into();
        if source_unit != self.source_unit {
            self.source_unit = source_unit;
            self.dirty = true;
        }
    }

    pub fn static_macros(&self) -> &[ShaderMacro] {
        &self.static_macros
    }

    /// Replace the static macro set. Marks dirty only when it changed.
    pub fn set_static_macros(&mut self, macros: Vec<ShaderMacro>) {
        if macros != self.static_macros {
            self.static_macros = macros;
            self.dirty = true;
        }
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Compiled program, if the last successful pass produced it
    pub fn program(&self, program: GBufferProgram) -> Option<&Arc<dyn Shader>> {
        self.programs.get(&program)
    }

    pub fn program_count(&self) -> usize {
        self.programs.len()
    }

    /// Recompile every program if dirty
    ///
    /// Returns `Ok(false)` when nothing had to be done and `Ok(true)` after
    /// a successful compile pass.
    ///
    /// # Errors
    ///
    /// `Error::ShaderCompilationFailed` when any program fails. The
    /// previously compiled programs are kept and the dirty flag stays set.
    pub fn update_shaders(&mut self, device: &mut dyn GraphicsDevice) -> Result<bool> {
        if !self.dirty {
            return Ok(false);
        }

        engine_debug!(SOURCE, "Compiling {} programs from '{}'",
            GBufferProgram::ALL.len(), self.source_unit);

        let mut programs = FxHashMap::default();
        for program in GBufferProgram::ALL {
            let desc = ShaderDesc {
                source_unit: self.source_unit.clone(),
                profile: SHADER_PROFILE.to_string(),
                entry_point: program.entry_point().to_string(),
                macros: self.static_macros.clone(),
            };
            match device.compile_shader(&desc) {
                Ok(shader) => {
                    programs.insert(program, shader);
                }
                Err(err) => {
                    engine_error!(SOURCE, "Failed to compile '{}' from '{}': {}",
                        desc.entry_point, self.source_unit, err);
                    return Err(Error::ShaderCompilationFailed(format!(
                        "{}({}): {}", self.source_unit, desc.entry_point, err
                    )));
                }
            }
        }

        self.programs = programs;
        self.dirty = false;
        engine_info!(SOURCE, "Compiled {} G-buffer programs", self.programs.len());
        Ok(true)
    }
}

impl Default for GBufferShaders {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "shaders_tests.rs"]
mod tests;
