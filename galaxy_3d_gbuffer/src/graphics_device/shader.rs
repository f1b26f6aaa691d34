/// Shader program trait and descriptor

/// Preprocessor macro passed to the shader compiler
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShaderMacro {
    pub name: String,
    pub definition: String,
}

impl ShaderMacro {
    pub fn new(name: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            definition: definition.into(),
        }
    }
}

/// Descriptor for compiling one program from a source unit
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderDesc {
    /// Logical source unit (file name resolved by the backend)
    pub source_unit: String,
    /// Target profile (e.g. "ps_5_0")
    pub profile: String,
    /// Entry point function name
    pub entry_point: String,
    /// Preprocessor macros
    pub macros: Vec<ShaderMacro>,
}

/// Compiled shader program trait
pub trait Shader: Send + Sync {
    /// Entry point this program was compiled from
    fn entry_point(&self) -> &str;
}
