//! Filesystem-backed fake template engine.
//!
//! [`FakeEngine`] writes a fixed set of files whose paths may contain
//! `{name}` placeholders, resolved against the render request data.

use std::cell::Cell;
use std::fs;

use scaffold_verify_core::error::RenderError;
use scaffold_verify_harness::engine::{RenderRequest, TemplateEngine};

/// Files produced by the reference Python template.
#[allow(dead_code)]
pub const PYTHON_SKELETON: &[(&str, &str)] = &[
    ("pyproject.toml", "[project]\nname = \"{project_slug}\"\nversion = \"{version}\"\n"),
    ("README.md", "# {project_name}\n"),
    ("LICENSE", "{license}\n"),
    ("Makefile", "test:\n\tuv run pytest\n"),
    ("src/{project_slug}/__init__.py", ""),
    ("src/{project_slug}/main.py", "def main():\n    pass\n"),
    ("tests/test_{project_slug}.py", "def test_ok():\n    pass\n"),
];

/// A template engine that writes files directly instead of spawning `copier`.
#[allow(dead_code)]
pub struct FakeEngine {
    files: Vec<(String, String)>,
    /// Appends a per-render unique file to simulate a non-deterministic template.
    unstable: bool,
    renders: Cell<usize>,
}

#[allow(dead_code)]
impl FakeEngine {
    /// Engine that renders the full Python skeleton.
    pub fn python() -> Self {
        Self::with_files(PYTHON_SKELETON)
    }

    pub fn with_files(files: &[(&str, &str)]) -> Self {
        Self {
            files: files
                .iter()
                .map(|(p, c)| ((*p).to_owned(), (*c).to_owned()))
                .collect(),
            unstable: false,
            renders: Cell::new(0),
        }
    }

    /// Drop one file from the skeleton.
    pub fn without(mut self, path: &str) -> Self {
        self.files.retain(|(p, _)| p != path);
        self
    }

    /// Add an extra file to the skeleton.
    pub fn with(mut self, path: &str, content: &str) -> Self {
        self.files.push((path.to_owned(), content.to_owned()));
        self
    }

    pub fn unstable(mut self) -> Self {
        self.unstable = true;
        self
    }

    pub fn renders(&self) -> usize {
        self.renders.get()
    }
}

impl TemplateEngine for FakeEngine {
    fn render(&self, request: &RenderRequest) -> Result<(), RenderError> {
        let count = self.renders.get() + 1;
        self.renders.set(count);

        let fail = |e: String| RenderError::Destination {
            path: request.dst.display().to_string(),
            reason: e,
        };

        let mut files = self.files.clone();
        if self.unstable {
            files.push((format!("build-{count}.log"), String::new()));
        }

        for (pattern, content) in &files {
            let rel = request.data.interpolate(pattern).map_err(|e| fail(e.to_string()))?;
            let body = request.data.interpolate(content).map_err(|e| fail(e.to_string()))?;
            let path = request.dst.join(rel);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|e| fail(e.to_string()))?;
            }
            fs::write(&path, body).map_err(|e| fail(e.to_string()))?;
        }
        Ok(())
    }
}
