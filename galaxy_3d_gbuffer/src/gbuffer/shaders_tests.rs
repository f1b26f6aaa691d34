/// Tests for GBufferShaders
///
/// These tests validate the dirty flag protocol and the all-or-nothing
/// compile pass.

use super::*;
use crate::graphics_device::mock_graphics_device::MockGraphicsDevice;

// ============================================================================
// Tests: Dirty flag
// ============================================================================

#[test]
fn test_new_shaders_start_dirty() {
    let shaders = GBufferShaders::new();
    assert!(shaders.is_dirty());
    assert_eq!(shaders.program_count(), 0);
    assert_eq!(shaders.source_unit(), "vaGBuffer.hlsl");
}

#[test]
fn test_update_compiles_all_programs_and_clears_flag() {
    let mut device = MockGraphicsDevice::new();
    let mut shaders = GBufferShaders::new();

    assert!(shaders.update_shaders(&mut device).unwrap());

    assert!(!shaders.is_dirty());
    assert_eq!(shaders.program_count(), 6);
    assert_eq!(
        device.get_compiled_shaders(),
        vec![
            "DepthToViewspaceLinearPS".to_string(),
            "DebugDrawDepthPS".to_string(),
            "DebugDrawDepthViewspaceLinearPS".to_string(),
            "DebugDrawNormalMapPS".to_string(),
            "DebugDrawAlbedoPS".to_string(),
            "DebugDrawRadiancePS".to_string(),
        ]
    );
    assert_eq!(
        shaders.program(GBufferProgram::DebugDrawRadiance).unwrap().entry_point(),
        "DebugDrawRadiancePS"
    );
}

#[test]
fn test_clean_update_is_noop() {
    let mut device = MockGraphicsDevice::new();
    let mut shaders = GBufferShaders::new();
    shaders.update_shaders(&mut device).unwrap();
    device.clear_history();

    assert!(!shaders.update_shaders(&mut device).unwrap());
    assert!(device.get_compiled_shaders().is_empty());
}

#[test]
fn test_mark_dirty_triggers_recompile() {
    let mut device = MockGraphicsDevice::new();
    let mut shaders = GBufferShaders::new();
    shaders.update_shaders(&mut device).unwrap();
    device.clear_history();

    shaders.mark_dirty();
    assert!(shaders.update_shaders(&mut device).unwrap());
    assert_eq!(device.get_compiled_shaders().len(), 6);
}

#[test]
fn test_set_static_macros_marks_dirty_only_on_change() {
    let mut device = MockGraphicsDevice::new();
    let mut shaders = GBufferShaders::new();
    shaders.update_shaders(&mut device).unwrap();

    shaders.set_static_macros(Vec::new());
    assert!(!shaders.is_dirty());

    let macros = vec![ShaderMacro::new("VA_GBUFFER_MSAA", "1")];
    shaders.set_static_macros(macros.clone());
    assert!(shaders.is_dirty());
    shaders.update_shaders(&mut device).unwrap();

    shaders.set_static_macros(macros);
    assert!(!shaders.is_dirty());
}

#[test]
fn test_set_source_unit_marks_dirty_only_on_change() {
    let mut device = MockGraphicsDevice::new();
    let mut shaders = GBufferShaders::new();
    shaders.update_shaders(&mut device).unwrap();

    shaders.set_source_unit("vaGBuffer.hlsl");
    assert!(!shaders.is_dirty());

    shaders.set_source_unit("CustomGBuffer.hlsl");
    assert!(shaders.is_dirty());
    assert_eq!(shaders.source_unit(), "CustomGBuffer.hlsl");
}

// ============================================================================
// Tests: Failure
// ============================================================================

#[test]
fn test_failure_keeps_flag_set() {
    let mut device = MockGraphicsDevice::new();
    device.fail_shader_entry = Some("DebugDrawAlbedoPS".to_string());
    let mut shaders = GBufferShaders::new();

    let result = shaders.update_shaders(&mut device);

    assert!(matches!(result, Err(Error::ShaderCompilationFailed(_))));
    assert!(shaders.is_dirty());
    assert_eq!(shaders.program_count(), 0);
}

#[test]
fn test_failure_keeps_previous_programs() {
    let mut device = MockGraphicsDevice::new();
    let mut shaders = GBufferShaders::new();
    shaders.update_shaders(&mut device).unwrap();
    let previous = shaders.program(GBufferProgram::DebugDrawDepth).unwrap().clone();

    shaders.mark_dirty();
    device.fail_shader_entry = Some("DebugDrawNormalMapPS".to_string());
    assert!(shaders.update_shaders(&mut device).is_err());

    assert_eq!(shaders.program_count(), 6);
    assert!(Arc::ptr_eq(&previous, shaders.program(GBufferProgram::DebugDrawDepth).unwrap()));
}

#[test]
fn test_retry_after_failure_succeeds() {
    let mut device = MockGraphicsDevice::new();
    device.fail_shader_entry = Some("DepthToViewspaceLinearPS".to_string());
    let mut shaders = GBufferShaders::new();
    assert!(shaders.update_shaders(&mut device).is_err());

    device.fail_shader_entry = None;
    assert!(shaders.update_shaders(&mut device).unwrap());
    assert!(!shaders.is_dirty());
}

#[test]
fn test_static_macros_are_stored_in_order() {
    let mut shaders = GBufferShaders::new();
    shaders.set_static_macros(vec![
        ShaderMacro::new("A", "1"),
        ShaderMacro::new("B", "0"),
    ]);

    let names: Vec<&str> = shaders.static_macros().iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B"]);
}
