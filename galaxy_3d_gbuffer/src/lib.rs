/*!
# Galaxy 3D G-Buffer

G-buffer attachment cache for the Galaxy 3D rendering engine.

This crate manages the lifecycle of the intermediate GPU images consumed by a
deferred/hybrid pipeline (depth, linear depth, normals, albedo, radiance and a
multi-view output color target). Resources are reallocated only when the
configuration (resolution, sample count, formats, deferred toggle) actually
requires it.

## Architecture

- **GraphicsDevice**: Factory trait creating textures, views and shaders
- **resolve_allocation**: Pure format resolution (logical format to allocation plan)
- **Attachment**: One slot owning at most one texture
- **OutputColor**: Typeless storage exposed through three derived views
- **GBuffer**: The attachment cache and its `update_resources` entry point
- **GBufferShaders**: Lazily recompiled debug/linearization programs
- **GBufferManager**: Independent G-buffer instances keyed by SlotMap keys

Backends provide concrete types that implement the device traits.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod graphics_device;
pub mod gbuffer;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton
    pub use crate::engine::Engine;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Render sub-module with the device abstraction
    pub mod render {
        pub use crate::graphics_device::*;
    }

    // G-buffer sub-module
    pub mod gbuffer {
        pub use crate::gbuffer::*;
    }
}

// Re-export math library at crate root
pub use glam;
