use std::borrow::Cow;

use anyhow::{anyhow, ensure, Result};
use strum::{EnumIter, IntoStaticStr};
use tracing::{debug, instrument};

use super::context::GpuContext;

pub const VERTEX_ENTRY_POINT: &str = "vs_main";
pub const FRAGMENT_ENTRY_POINT: &str = "fs_main";

/// The WGSL programs built into the binary.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ShaderProgram {
    /// Ambient + diffuse + specular lighting modulated by vertex color.
    Phong,
    /// Flat light-colored output for the lamp.
    Lamp,
}

impl ShaderProgram {
    pub fn source(&self) -> &'static str {
        match self {
            ShaderProgram::Phong => include_str!("../shaders/phong.wgsl"),
            ShaderProgram::Lamp => include_str!("../shaders/lamp.wgsl"),
        }
    }

    pub fn name(&self) -> &'static str {
        self.into()
    }
}

/// A validated shader module holding both the vertex and the fragment stage.
pub struct Shader {
    pub program: ShaderProgram,
    pub shader_module: wgpu::ShaderModule,
}

impl Shader {
    pub fn new(context: &GpuContext, program: ShaderProgram) -> Result<Shader> {
        // wgpu reports invalid modules asynchronously, so catch errors before creating one.
        validate_wgsl(program.name(), program.source())?;
        let shader_module = context.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(program.name()),
            source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(program.source())),
        });
        Ok(Shader {
            program,
            shader_module,
        })
    }
}

/// Parses and validates a WGSL source, and checks that it exposes the vertex and fragment
/// entry points the pipelines expect.
#[instrument(skip(source))]
pub fn validate_wgsl(name: &str, source: &str) -> Result<naga::valid::ModuleInfo> {
    let now = std::time::Instant::now();
    let module = naga::front::wgsl::parse_str(source).map_err(|err| {
        anyhow!("Shader '{name}' failed to compile:\n{}", err.emit_to_string(source))
    })?;

    let info = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::empty(),
    )
    .validate(&module)
    .map_err(|err| {
        anyhow!("Shader '{name}' failed validation:\n{}", err.emit_to_string(source))
    })?;

    for (entry_point, stage) in [
        (VERTEX_ENTRY_POINT, naga::ShaderStage::Vertex),
        (FRAGMENT_ENTRY_POINT, naga::ShaderStage::Fragment),
    ] {
        ensure!(
            module.entry_points.iter().any(|ep| ep.name == entry_point && ep.stage == stage),
            "Shader '{name}' has no {stage:?} entry point '{entry_point}'"
        );
    }
    debug!("validated in {:?}.", now.elapsed());
    Ok(info)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn builtin_programs_compile() {
        for program in ShaderProgram::iter() {
            if let Err(err) = validate_wgsl(program.name(), program.source()) {
                panic!("{err:?}");
            }
        }
    }

    #[test]
    fn syntax_error_is_reported() {
        let err = validate_wgsl("broken", "fn vs_main( -> {}").unwrap_err();
        assert!(err.to_string().contains("failed to compile"), "{err}");
    }

    #[test]
    fn type_error_is_reported() {
        let source = r#"
            @vertex
            fn vs_main() -> @builtin(position) vec4<f32> {
                let x: f32 = vec3<f32>(1.0);
                return vec4<f32>(x);
            }
        "#;
        assert!(validate_wgsl("mistyped", source).is_err());
    }

    #[test]
    fn missing_fragment_stage_is_rejected() {
        let source = r#"
            @vertex
            fn vs_main() -> @builtin(position) vec4<f32> {
                return vec4<f32>(0.0, 0.0, 0.0, 1.0);
            }
        "#;
        let err = validate_wgsl("vertex_only", source).unwrap_err();
        assert!(err.to_string().contains(FRAGMENT_ENTRY_POINT), "{err}");
    }

    #[test]
    fn program_names_are_snake_case() {
        assert_eq!(ShaderProgram::Phong.name(), "phong");
        assert_eq!(ShaderProgram::Lamp.name(), "lamp");
    }
}
