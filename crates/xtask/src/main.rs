use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("arch-check") => arch_check(),
        Some(cmd) => anyhow::bail!("Unknown xtask command: {cmd}"),
        None => anyhow::bail!("Usage: cargo xtask <command>\n\nCommands:\n  arch-check"),
    }
}

/// Internal crates each layer may depend on (normal dependencies only).
const ALLOWED: &[(&str, &[&str])] = &[
    ("tictac-protocol", &[]),
    ("tictac-player-ports", &["tictac-protocol"]),
    ("tictac-player-app", &["tictac-protocol", "tictac-player-ports"]),
    (
        "tictac-player-adapters",
        &["tictac-protocol", "tictac-player-ports"],
    ),
    (
        "tictac-player-runner",
        &[
            "tictac-protocol",
            "tictac-player-ports",
            "tictac-player-app",
            "tictac-player-adapters",
        ],
    ),
];

/// Transport crates that must stay behind the adapters.
const INFRA_PATTERN: &str = r"\b(reqwest|tokio_tungstenite|directories)::";

#[derive(Deserialize)]
struct Metadata {
    packages: Vec<Package>,
}

#[derive(Deserialize)]
struct Package {
    name: String,
    manifest_path: PathBuf,
    dependencies: Vec<Dependency>,
}

#[derive(Deserialize)]
struct Dependency {
    name: String,
    kind: Option<String>,
}

fn arch_check() -> anyhow::Result<()> {
    let output = std::process::Command::new("cargo")
        .args(["metadata", "--format-version", "1", "--no-deps"])
        .output()
        .context("running cargo metadata")?;

    if !output.status.success() {
        anyhow::bail!("cargo metadata failed")
    }

    let metadata: Metadata =
        serde_json::from_slice(&output.stdout).context("parsing cargo metadata")?;
    let allowed: BTreeMap<&str, &[&str]> = ALLOWED.iter().copied().collect();

    let mut violations = Vec::new();
    for package in &metadata.packages {
        let Some(permitted) = allowed.get(package.name.as_str()) else {
            continue;
        };
        for dep in &package.dependencies {
            let internal = dep.name.starts_with("tictac-");
            let normal = dep.kind.is_none();
            if internal && normal && !permitted.contains(&dep.name.as_str()) {
                violations.push(format!("{} must not depend on {}", package.name, dep.name));
            }
        }
    }

    let pattern = regex_lite::Regex::new(INFRA_PATTERN).context("compiling pattern")?;
    for package in &metadata.packages {
        if package.name != "tictac-player-app" && package.name != "tictac-player-ports" {
            continue;
        }
        let Some(crate_dir) = package.manifest_path.parent() else {
            continue;
        };
        for file in rust_files(&crate_dir.join("src"))? {
            let source = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            for (n, line) in source.lines().enumerate() {
                if pattern.is_match(line) {
                    violations.push(format!(
                        "{}:{}: infrastructure crate used outside adapters",
                        file.display(),
                        n + 1
                    ));
                }
            }
        }
    }

    if violations.is_empty() {
        println!("arch-check passed");
        return Ok(());
    }
    for violation in &violations {
        eprintln!("{violation}");
    }
    anyhow::bail!("arch-check found {} violation(s)", violations.len())
}

fn rust_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))? {
        let path = entry?.path();
        if path.is_dir() {
            files.extend(rust_files(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            files.push(path);
        }
    }
    Ok(files)
}
