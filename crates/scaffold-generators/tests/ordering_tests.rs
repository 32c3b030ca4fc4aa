//! Property tests for deterministic output ordering

use proptest::prelude::*;
use scaffold_generators::generator_for;
use scaffold_manifest::{Manifest, ManifestDocument};
use serde_json::json;

fn manifest_with(agent_ids: &[String], skill_ids: &[String]) -> Manifest {
    let agents: Vec<_> = agent_ids
        .iter()
        .map(|id| json!({"id": id, "description": id, "promptFile": format!(".agents/agents/{id}.md")}))
        .collect();
    let skills: Vec<_> = skill_ids
        .iter()
        .map(|id| json!({"id": id, "canonicalDir": format!(".agents/skills/{id}")}))
        .collect();
    let instructions: Vec<_> = agent_ids
        .iter()
        .map(|id| {
            json!({"id": id, "scope": "path", "applyTo": "**/*", "canonicalFile": format!(".agents/instructions/{id}.md")})
        })
        .collect();

    let mut document = ManifestDocument::starter("prop");
    document.artifacts = serde_json::from_value(json!({
        "agents": agents,
        "instructions": instructions,
        "skills": skills
    }))
    .unwrap();
    Manifest::from_document(document).unwrap()
}

proptest! {
    #[test]
    fn enumeration_is_sorted_and_stable(
        agents in prop::collection::btree_set("[a-z][a-z0-9]{0,6}", 0..6),
        skills in prop::collection::btree_set("[a-z][a-z0-9]{0,6}", 0..6),
        seed in any::<u64>(),
    ) {
        // Declaration order must not matter: rotate by a random amount
        let mut agents: Vec<String> = agents.into_iter().collect();
        let mut skills: Vec<String> = skills.into_iter().collect();
        if !agents.is_empty() {
            let by = (seed as usize) % agents.len();
            agents.rotate_left(by);
        }
        skills.reverse();

        let manifest = manifest_with(&agents, &skills);

        for target in &manifest.targets {
            let generator = generator_for(target);
            let first = generator.enumerate_outputs(&manifest);
            let second = generator.enumerate_outputs(&manifest);
            prop_assert_eq!(&first, &second);

            let keys: Vec<_> = first.iter().map(|d| d.key.clone()).collect();
            let mut sorted = keys.clone();
            sorted.sort();
            prop_assert_eq!(keys, sorted);

            let rendered_once = generator.generate(&manifest).unwrap();
            let rendered_twice = generator.generate(&manifest).unwrap();
            prop_assert_eq!(rendered_once, rendered_twice);
        }
    }
}
