//! Read-only view of the crate's `src/` tree for layering checks.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// One Rust source file, path relative to the crate root.
pub struct SourceFile {
    pub path: String,
    pub text: String,
}

/// A line that breaks a layering rule.
#[derive(Debug)]
pub struct Offence {
    pub path: String,
    pub line: usize,
    pub text: String,
}

impl fmt::Display for Offence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.path, self.line, self.text.trim())
    }
}

/// Every `.rs` file under `src/`, sorted by path.
pub struct SourceTree {
    files: Vec<SourceFile>,
}

impl SourceTree {
    pub fn load() -> Self {
        let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let mut paths = Vec::new();
        walk(&root.join("src"), &mut paths);
        paths.sort();

        let files = paths
            .into_iter()
            .map(|path| SourceFile {
                text: fs::read_to_string(&path)
                    .unwrap_or_else(|e| panic!("read {}: {e}", path.display())),
                path: path
                    .strip_prefix(&root)
                    .unwrap_or(&path)
                    .to_string_lossy()
                    .replace('\\', "/"),
            })
            .collect();
        Self { files }
    }

    /// Files whose path starts with `prefix` (e.g. `src/domain`).
    pub fn under<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a SourceFile> + 'a {
        self.files.iter().filter(move |file| file.path.starts_with(prefix))
    }

    pub fn file(&self, path: &str) -> &SourceFile {
        self.files
            .iter()
            .find(|file| file.path == path)
            .unwrap_or_else(|| panic!("{path} is not part of the source tree"))
    }

    /// Lines under `prefix` mentioning any of `needles`.
    pub fn mentions(&self, prefix: &str, needles: &[&str]) -> Vec<Offence> {
        self.offences(prefix, |_, line| needles.iter().any(|n| line.contains(n)))
    }

    /// Lines of `mod.rs` files that are not module declarations or re-exports.
    pub fn mod_file_bodies(&self) -> Vec<Offence> {
        let mut offences = Vec::new();
        for file in self.under("src").filter(|f| f.path.ends_with("/mod.rs")) {
            let mut continued = false;
            for (idx, raw) in file.text.lines().enumerate() {
                let line = raw.trim();
                if continued || line.starts_with("pub use ") {
                    continued = !line.ends_with(';');
                    continue;
                }
                if !is_declaration(line) {
                    offences.push(Offence {
                        path: file.path.clone(),
                        line: idx + 1,
                        text: raw.to_string(),
                    });
                }
            }
        }
        offences
    }

    fn offences(&self, prefix: &str, hit: impl Fn(&SourceFile, &str) -> bool) -> Vec<Offence> {
        self.under(prefix)
            .flat_map(|file| {
                file.text
                    .lines()
                    .enumerate()
                    .filter(|(_, line)| hit(file, line))
                    .map(|(idx, line)| Offence {
                        path: file.path.clone(),
                        line: idx + 1,
                        text: line.to_string(),
                    })
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}

fn is_declaration(line: &str) -> bool {
    const ALLOWED: [&str; 5] = ["//", "pub mod ", "mod ", "#[cfg", "#![allow"];
    line.is_empty() || ALLOWED.iter().any(|prefix| line.starts_with(prefix))
}

fn walk(dir: &Path, out: &mut Vec<PathBuf>) {
    for entry in fs::read_dir(dir).unwrap_or_else(|e| panic!("read {}: {e}", dir.display())) {
        let path = entry.unwrap_or_else(|e| panic!("dir entry: {e}")).path();
        if path.is_dir() {
            walk(&path, out);
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            out.push(path);
        }
    }
}

/// Render offences one per line for assertion messages.
pub fn listing(offences: &[Offence]) -> String {
    offences.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n")
}
