//! Generator selection by target kind

use scaffold_manifest::{Target, TargetConfig};

use crate::copilot::CopilotGenerator;
use crate::generator::Generator;
use crate::opencode::OpenCodeGenerator;

/// Build the generator for a declared target.
///
/// The target's kind tag alone decides the implementation; the target name
/// is carried along for override lookup.
pub fn generator_for(target: &Target) -> Box<dyn Generator> {
    match &target.config {
        TargetConfig::OpenCode(config) => {
            Box::new(OpenCodeGenerator::new(&target.name, config.clone()))
        }
        TargetConfig::Copilot(config) => {
            Box::new(CopilotGenerator::new(&target.name, config.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scaffold_manifest::{Manifest, ManifestDocument};

    #[test]
    fn one_generator_per_declared_target() {
        let manifest = Manifest::from_document(ManifestDocument::starter("demo")).unwrap();
        let names: Vec<String> = manifest
            .targets
            .iter()
            .map(|target| generator_for(target).target().to_string())
            .collect();
        assert_eq!(names, vec!["opencode", "copilot-vscode", "copilot-cli"]);
    }
}
