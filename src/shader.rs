//! Compile-time WGSL patching.
//!
//! Stage sources mark extension points with a line of the form
//! `// #hook <name>`. A [`ShaderPatch`] splices code in at those points before
//! the module is handed to wgpu, the same way the water material gets its
//! wave displacement without the base shader knowing about waves.

use thiserror::Error;

const HOOK_MARKER: &str = "// #hook ";

/// Named insertion points understood by the water shader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hook {
    /// Module scope, after the water uniforms and before the vertex stage
    VertexDeclarations,
    /// Inside `vs_main`, with mutable `position` and `normal` in scope
    VertexDisplacement,
}

impl Hook {
    pub fn name(&self) -> &'static str {
        match self {
            Hook::VertexDeclarations => "vertex_declarations",
            Hook::VertexDisplacement => "vertex_displacement",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatchError {
    #[error("shader has no `{0}` hook")]
    MissingHook(&'static str),
    #[error("shader declares the `{0}` hook more than once")]
    DuplicateHook(String),
}

/// Ordered list of code insertions.
#[derive(Debug, Clone, Default)]
pub struct ShaderPatch {
    insertions: Vec<(Hook, String)>,
}

impl ShaderPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add code at a hook. Several insertions at one hook keep their order.
    pub fn insert(mut self, hook: Hook, code: impl Into<String>) -> Self {
        self.insertions.push((hook, code.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.insertions.is_empty()
    }

    /// Splice this patch into `source`.
    ///
    /// Every hook line is consumed, so the result has no markers left;
    /// hooks nobody patched simply disappear.
    pub fn apply(&self, source: &str) -> Result<String, PatchError> {
        let mut seen: Vec<&str> = Vec::new();
        for line in source.lines() {
            if let Some(name) = hook_name(line) {
                if seen.contains(&name) {
                    return Err(PatchError::DuplicateHook(name.to_string()));
                }
                seen.push(name);
            }
        }

        for (hook, _) in &self.insertions {
            if !seen.contains(&hook.name()) {
                return Err(PatchError::MissingHook(hook.name()));
            }
        }

        let mut out = String::with_capacity(source.len());
        for line in source.lines() {
            match hook_name(line) {
                Some(name) => {
                    for (_, code) in self.insertions.iter().filter(|(h, _)| h.name() == name) {
                        out.push_str(code);
                        out.push('\n');
                    }
                }
                None => {
                    out.push_str(line);
                    out.push('\n');
                }
            }
        }
        Ok(out)
    }
}

fn hook_name(line: &str) -> Option<&str> {
    line.trim().strip_prefix(HOOK_MARKER).map(str::trim)
}

/// Constants and value noise.
pub const MATH_WGSL: &str = include_str!("shaders/math.wgsl");
/// Camera and sky bindings, scattering and tone mapping.
pub const ATMOSPHERE_WGSL: &str = include_str!("shaders/atmosphere.wgsl");
pub const SKY_WGSL: &str = include_str!("shaders/sky.wgsl");
pub const WATER_WGSL: &str = include_str!("shaders/water.wgsl");
pub const SEASCAPE_WGSL: &str = include_str!("shaders/seascape.wgsl");

/// Full source of the sky pass.
pub fn sky_source() -> String {
    compose(&[MATH_WGSL, ATMOSPHERE_WGSL], SKY_WGSL)
}

/// Full source of the water pass with `patch` applied.
pub fn water_source(patch: &ShaderPatch) -> Result<String, PatchError> {
    patch.apply(&compose(&[MATH_WGSL, ATMOSPHERE_WGSL], WATER_WGSL))
}

/// Full source of the raymarched sea pass.
pub fn seascape_source() -> String {
    compose(&[MATH_WGSL], SEASCAPE_WGSL)
}

/// Concatenate shared WGSL libraries ahead of a stage source.
pub fn compose(libraries: &[&str], stage: &str) -> String {
    let mut out = String::new();
    for lib in libraries {
        out.push_str(lib);
        out.push('\n');
    }
    out.push_str(stage);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "\
struct A { x: f32 }
// #hook vertex_declarations
fn vs_main() {
    var position = vec3<f32>(0.0);
    // #hook vertex_displacement
}
";

    #[test]
    fn empty_patch_strips_hooks() {
        let out = ShaderPatch::new().apply(BASE).unwrap();
        assert!(!out.contains("#hook"));
        assert!(out.contains("struct A"));
        assert!(out.contains("var position"));
    }

    #[test]
    fn code_lands_at_its_hook() {
        let out = ShaderPatch::new()
            .insert(Hook::VertexDisplacement, "    position.y += 1.0;")
            .insert(Hook::VertexDeclarations, "const K: f32 = 2.0;")
            .apply(BASE)
            .unwrap();

        let decl = out.find("const K").unwrap();
        let vs = out.find("fn vs_main").unwrap();
        let var = out.find("var position").unwrap();
        let disp = out.find("position.y += 1.0").unwrap();
        assert!(decl < vs);
        assert!(var < disp);
    }

    #[test]
    fn insertions_at_one_hook_keep_order() {
        let out = ShaderPatch::new()
            .insert(Hook::VertexDisplacement, "// first")
            .insert(Hook::VertexDisplacement, "// second")
            .apply(BASE)
            .unwrap();
        assert!(out.find("// first").unwrap() < out.find("// second").unwrap());
    }

    #[test]
    fn missing_hook_is_an_error() {
        let err = ShaderPatch::new()
            .insert(Hook::VertexDisplacement, "position.y += 1.0;")
            .apply("fn vs_main() {}\n")
            .unwrap_err();
        assert_eq!(err, PatchError::MissingHook("vertex_displacement"));
    }

    #[test]
    fn duplicate_hook_is_an_error() {
        let source = format!("{}// #hook vertex_displacement\n", BASE);
        let err = ShaderPatch::new().apply(&source).unwrap_err();
        assert_eq!(err, PatchError::DuplicateHook("vertex_displacement".into()));
    }

    #[test]
    fn water_shader_exposes_both_hooks() {
        let source = compose(&[MATH_WGSL, ATMOSPHERE_WGSL], WATER_WGSL);
        assert!(source.contains("// #hook vertex_declarations"));
        assert!(source.contains("// #hook vertex_displacement"));
        let flat = water_source(&ShaderPatch::new()).unwrap();
        assert!(!flat.contains("#hook"));
    }

    #[test]
    fn compose_keeps_library_order() {
        let out = compose(&["// lib a", "// lib b"], "// stage");
        let a = out.find("lib a").unwrap();
        let b = out.find("lib b").unwrap();
        let s = out.find("stage").unwrap();
        assert!(a < b && b < s);
    }
}
