//! Rendering: DocumentTree in, PDF on disk out.
//!
//! The LaTeX backend is the only implementation; pipeline code depends on the
//! `Renderer` trait so tests can substitute a recorder.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use async_trait::async_trait;
use thiserror::Error;

use crate::document::DocumentTree;

pub mod engine;
pub mod latex;

pub use engine::LatexRenderer;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to start '{program}' (is a TeX distribution installed?): {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{engine} exited with {status}:\n{log_tail}")]
    EngineFailed {
        engine: Engine,
        status: String,
        log_tail: String,
    },

    #[error("{engine} finished but produced no PDF at {}", path.display())]
    MissingOutput { engine: Engine, path: PathBuf },

    #[error("Asset not found: {}", path.display())]
    MissingAsset { path: PathBuf },

    #[error("Asset path cannot be used from LaTeX (contains %, #, {{ or }}): {}", path.display())]
    UnsupportedAssetPath { path: PathBuf },
}

/// Turns a finished document into a file at `output`.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Returns the path actually written.
    async fn render(&self, document: &DocumentTree, output: &Path)
        -> Result<PathBuf, RenderError>;
}

/// Supported TeX engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Engine {
    #[default]
    LuaLatex,
    XeLatex,
    PdfLatex,
}

impl Engine {
    pub fn program(self) -> &'static str {
        match self {
            Engine::LuaLatex => "lualatex",
            Engine::XeLatex => "xelatex",
            Engine::PdfLatex => "pdflatex",
        }
    }

    /// Whether the engine can load system fonts through fontspec.
    pub fn supports_fontspec(self) -> bool {
        !matches!(self, Engine::PdfLatex)
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}

impl FromStr for Engine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lualatex" => Ok(Engine::LuaLatex),
            "xelatex" => Ok(Engine::XeLatex),
            "pdflatex" => Ok(Engine::PdfLatex),
            other => Err(format!(
                "unknown engine '{other}' (expected lualatex, xelatex or pdflatex)"
            )),
        }
    }
}
