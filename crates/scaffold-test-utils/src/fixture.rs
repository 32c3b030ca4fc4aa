//! Standard fixture manifest and its canonical files.

/// Manifest declaring one artifact of each kind, an OpenCode target and two
/// Copilot targets (VS Code and CLI surfaces).
pub const STANDARD_MANIFEST: &str = r#"schemaVersion: 1
project:
  name: demo
  description: Fixture project
  defaultTargets: [opencode, copilot-vscode, copilot-cli]
targets:
  opencode:
    kind: opencode
  copilot-vscode:
    kind: copilot
    promptsDir: .github/prompts
  copilot-cli:
    kind: copilot
artifacts:
  prompts:
    - id: release-notes
      title: Release notes
      description: Draft release notes for the next version
      canonicalFile: .agents/prompts/release-notes.md
  commands:
    - id: test
      description: Run the test suite
      canonicalFile: .agents/commands/test.md
  agents:
    - id: reviewer
      description: Reviews pull requests
      promptFile: .agents/agents/reviewer.md
      targets:
        opencode:
          mode: subagent
  instructions:
    - id: repo-style
      scope: repo
      canonicalFile: .agents/instructions/repo-style.md
    - id: typescript-rules
      scope: path
      applyTo: "**/*.ts"
      canonicalFile: .agents/instructions/typescript-rules.md
  skills:
    - id: changelog
      description: Maintains CHANGELOG.md
      canonicalDir: .agents/skills/changelog
"#;

/// Canonical files referenced by [`STANDARD_MANIFEST`], as `(path, content)`.
pub const STANDARD_CANONICAL_FILES: &[(&str, &str)] = &[
    (
        ".agents/prompts/release-notes.md",
        "Summarize merged changes since the last tag.\n",
    ),
    (".agents/commands/test.md", "Run `cargo test --workspace`.\n"),
    (
        ".agents/agents/reviewer.md",
        "You review pull requests for correctness.\n",
    ),
    (
        ".agents/instructions/repo-style.md",
        "Keep functions short.\n",
    ),
    (
        ".agents/instructions/typescript-rules.md",
        "Prefer `unknown` over `any`.\n",
    ),
    (
        ".agents/skills/changelog/SKILL.md",
        "Append an entry under Unreleased.\n",
    ),
];

/// Every file a full sync of [`STANDARD_MANIFEST`] generates, sorted.
pub const STANDARD_OUTPUTS: &[&str] = &[
    ".github/agents/reviewer.agent.md",
    ".github/copilot-instructions.md",
    ".github/instructions/typescript-rules.instructions.md",
    ".github/prompts/release-notes.prompt.md",
    ".github/skills/changelog/SKILL.md",
    "AGENTS.md",
    "opencode.json",
];
