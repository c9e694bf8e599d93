use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::document::DocumentTree;
use crate::render::latex::{to_latex, LatexOptions};
use crate::render::{Engine, RenderError, Renderer};

/// Labels and tikz `remember picture` settle after the second pass.
const MAX_PASSES: u32 = 2;
const LOG_TAIL_LINES: usize = 20;

/// Renders through an external TeX engine.
///
/// Compilation happens in a throwaway directory; only a finished PDF is copied
/// to the output path.
#[derive(Debug, Clone)]
pub struct LatexRenderer {
    engine: Engine,
    keep_source: bool,
}

impl LatexRenderer {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine,
            keep_source: false,
        }
    }

    /// Also write the generated `.tex` next to the PDF.
    pub fn keep_source(mut self, keep: bool) -> Self {
        self.keep_source = keep;
        self
    }

    async fn compile(&self, build_dir: &Path, tex_file: &str) -> Result<(), RenderError> {
        let program = self.engine.program();

        for pass in 1..=MAX_PASSES {
            debug!("{} pass {}/{} on {}", program, pass, MAX_PASSES, tex_file);

            let output = Command::new(program)
                .arg("-interaction=nonstopmode")
                .arg("-halt-on-error")
                .arg(tex_file)
                .current_dir(build_dir)
                .output()
                .await
                .map_err(|source| RenderError::Spawn {
                    program: program.to_string(),
                    source,
                })?;

            let stdout = String::from_utf8_lossy(&output.stdout);

            if !output.status.success() {
                return Err(RenderError::EngineFailed {
                    engine: self.engine,
                    status: output.status.to_string(),
                    log_tail: log_tail(&stdout, LOG_TAIL_LINES),
                });
            }

            if !needs_rerun(&stdout) {
                return Ok(());
            }
        }

        warn!(
            "{} still requests a rerun after {} passes; cross references may be stale",
            program, MAX_PASSES
        );
        Ok(())
    }
}

#[async_trait]
impl Renderer for LatexRenderer {
    async fn render(
        &self,
        document: &DocumentTree,
        output: &Path,
    ) -> Result<PathBuf, RenderError> {
        let output = pdf_path(output);

        // The engine runs in a temp dir, so relative asset paths must be pinned first
        let mut document = document.clone();
        if let Some(image) = document.style.header_image.take() {
            let resolved = tokio::fs::canonicalize(&image)
                .await
                .map_err(|_| RenderError::MissingAsset { path: image })?;
            if !is_latex_safe_path(&resolved.to_string_lossy()) {
                return Err(RenderError::UnsupportedAssetPath { path: resolved });
            }
            document.style.header_image = Some(resolved);
        }

        let source = to_latex(
            &document,
            LatexOptions {
                unicode_fonts: self.engine.supports_fontspec(),
            },
        );

        let build_dir = tempfile::tempdir().map_err(|source| RenderError::Io {
            path: std::env::temp_dir(),
            source,
        })?;

        let stem = output
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .unwrap_or("cv");
        let tex_file = format!("{stem}.tex");
        let tex_path = build_dir.path().join(&tex_file);

        tokio::fs::write(&tex_path, &source)
            .await
            .map_err(io_error(&tex_path))?;

        info!("Compiling {} with {}", tex_file, self.engine);
        self.compile(build_dir.path(), &tex_file).await?;

        let built = build_dir.path().join(format!("{stem}.pdf"));
        if !tokio::fs::try_exists(&built).await.unwrap_or(false) {
            return Err(RenderError::MissingOutput {
                engine: self.engine,
                path: built,
            });
        }

        install_pdf(&built, &output).await?;
        if self.keep_source {
            keep_tex_source(&output, &source).await;
        }

        info!("Wrote {}", output.display());
        Ok(output)
    }
}

/// Copies the finished PDF next to `output` and renames it into place, so the
/// output path only ever holds a complete file.
async fn install_pdf(built: &Path, output: &Path) -> Result<(), RenderError> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(io_error(parent))?;
    }

    let staging = staging_path(output);
    let installed = async {
        tokio::fs::copy(built, &staging)
            .await
            .map_err(io_error(&staging))?;
        tokio::fs::rename(&staging, output)
            .await
            .map_err(io_error(output))
    }
    .await;

    if installed.is_err() {
        let _ = tokio::fs::remove_file(&staging).await;
    }
    installed
}

/// Writes the `.tex` next to an already installed PDF. The PDF is the result of
/// the run, so a failure here is only logged.
async fn keep_tex_source(output: &Path, source: &str) -> Option<PathBuf> {
    let tex_output = output.with_extension("tex");
    match tokio::fs::write(&tex_output, source).await {
        Ok(()) => {
            info!("LaTeX source kept at {}", tex_output.display());
            Some(tex_output)
        }
        Err(e) => {
            warn!("Could not keep LaTeX source at {}: {e}", tex_output.display());
            None
        }
    }
}

fn staging_path(output: &Path) -> PathBuf {
    let name = output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "cv.pdf".to_string());
    output.with_file_name(format!(".{name}.part"))
}

/// `%` and `#` end or break the `\includegraphics` argument; braces unbalance it.
fn is_latex_safe_path(path: &str) -> bool {
    !path.contains(['%', '#', '{', '}'])
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> RenderError + '_ {
    move |source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Appends `.pdf` to extensionless output names (`template` → `template.pdf`).
pub fn pdf_path(output: &Path) -> PathBuf {
    if output.extension().is_some() {
        output.to_path_buf()
    } else {
        output.with_extension("pdf")
    }
}

fn needs_rerun(log: &str) -> bool {
    log.contains("Rerun to get") || log.contains("Rerun LaTeX") || log.contains("rerun LaTeX")
}

fn log_tail(log: &str, lines: usize) -> String {
    let all: Vec<&str> = log.lines().collect();
    all[all.len().saturating_sub(lines)..].join("\n")
}
