//! CV generation: fetch → build → render, strictly in that order.
//!
//! Any failure aborts the run. The builder only sees a profile that was fetched
//! successfully, and the renderer only sees a finished tree, so a failed fetch
//! never leaves a file behind.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::cv::CvBuilder;
use crate::errors::CvError;
use crate::fetch::ProfileSource;
use crate::render::Renderer;

/// Parameters for one run.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub username: String,
    pub output: PathBuf,
}

impl GenerateRequest {
    pub fn new(username: impl Into<String>, output: impl AsRef<Path>) -> Self {
        Self {
            username: username.into(),
            output: output.as_ref().to_path_buf(),
        }
    }
}

/// Runs the whole generation and returns the path of the written PDF.
pub async fn generate_cv(
    source: &dyn ProfileSource,
    builder: &CvBuilder,
    renderer: &dyn Renderer,
    request: &GenerateRequest,
) -> Result<PathBuf, CvError> {
    // Step 1: fetch
    let profile = source
        .fetch_profile(&request.username)
        .await
        .inspect_err(|e| warn!("Fetch step failed for '{}': {e}", request.username))?;
    info!(
        "Fetched profile '{}' ({} trainings)",
        profile.full_name,
        profile.trainings.len()
    );

    // Step 2: build
    let document = builder.build(&profile);
    info!(
        "Document built: {} top-level nodes, {} tables",
        document.nodes.len(),
        document.tables().len()
    );

    // Step 3: render
    let written = renderer
        .render(&document, &request.output)
        .await
        .inspect_err(|e| warn!("Render step failed: {e}"))?;

    info!("CV for '{}' written to {}", profile.full_name, written.display());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use tracing::instrument::WithSubscriber;
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    use crate::document::DocumentTree;
    use crate::fetch::FetchError;
    use crate::models::{EmployeeProfile, TrainingRecord};
    use crate::render::RenderError;

    enum StubSource {
        Found(EmployeeProfile),
        Empty,
    }

    #[async_trait]
    impl ProfileSource for StubSource {
        async fn fetch_profile(&self, username: &str) -> Result<EmployeeProfile, FetchError> {
            match self {
                StubSource::Found(profile) => Ok(profile.clone()),
                StubSource::Empty => Err(FetchError::NotFound {
                    username: username.to_string(),
                }),
            }
        }
    }

    /// Writes a dummy file and remembers every tree it was handed.
    #[derive(Default)]
    struct RecordingRenderer {
        seen: Mutex<Vec<DocumentTree>>,
        fail: bool,
    }

    #[async_trait]
    impl Renderer for RecordingRenderer {
        async fn render(
            &self,
            document: &DocumentTree,
            output: &Path,
        ) -> Result<PathBuf, RenderError> {
            self.seen.lock().unwrap().push(document.clone());
            if self.fail {
                return Err(RenderError::MissingOutput {
                    engine: crate::render::Engine::LuaLatex,
                    path: output.to_path_buf(),
                });
            }
            std::fs::write(output, b"%PDF-1.5").map_err(|source| RenderError::Io {
                path: output.to_path_buf(),
                source,
            })?;
            Ok(output.to_path_buf())
        }
    }

    /// Counts error-level events.
    struct ErrorCounter(Arc<AtomicUsize>);

    impl<S: Subscriber> Layer<S> for ErrorCounter {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == Level::ERROR {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    fn jane() -> EmployeeProfile {
        EmployeeProfile {
            full_name: "Jane Doe".to_string(),
            job_title: "Engineer".to_string(),
            trainings: vec![TrainingRecord::new("Certified X", "Acme", "2020")],
        }
    }

    #[tokio::test]
    async fn test_generate_cv_hands_built_tree_to_renderer() {
        let dir = tempfile::tempdir().unwrap();
        let request = GenerateRequest::new("janed", dir.path().join("cv.pdf"));
        let renderer = RecordingRenderer::default();

        let written = generate_cv(
            &StubSource::Found(jane()),
            &CvBuilder::new(),
            &renderer,
            &request,
        )
        .await
        .unwrap();

        assert_eq!(written, request.output);
        assert!(written.exists());

        let seen = renderer.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].title.as_ref().unwrap().title, "Jane Doe");
        assert_eq!(seen[0], CvBuilder::new().build(&jane()));
    }

    #[tokio::test]
    async fn test_fetch_failure_skips_render_and_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let request = GenerateRequest::new("ghost", dir.path().join("cv.pdf"));
        let renderer = RecordingRenderer::default();

        let err = generate_cv(&StubSource::Empty, &CvBuilder::new(), &renderer, &request)
            .await
            .unwrap_err();

        assert!(matches!(err, CvError::Fetch(FetchError::NotFound { .. })));
        assert!(renderer.seen.lock().unwrap().is_empty());
        assert!(!request.output.exists());
    }

    #[tokio::test]
    async fn test_render_failure_is_propagated() {
        let dir = tempfile::tempdir().unwrap();
        let request = GenerateRequest::new("janed", dir.path().join("cv.pdf"));
        let renderer = RecordingRenderer {
            fail: true,
            ..Default::default()
        };

        let err = generate_cv(
            &StubSource::Found(jane()),
            &CvBuilder::new(),
            &renderer,
            &request,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, CvError::Render(RenderError::MissingOutput { .. })));
        assert!(!request.output.exists());
    }

    #[tokio::test]
    async fn test_step_failures_leave_error_reporting_to_caller() {
        let dir = tempfile::tempdir().unwrap();
        let request = GenerateRequest::new("ghost", dir.path().join("cv.pdf"));
        let errors = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(ErrorCounter(errors.clone()));

        let err = generate_cv(
            &StubSource::Empty,
            &CvBuilder::new(),
            &RecordingRenderer::default(),
            &request,
        )
        .with_subscriber(subscriber)
        .await
        .unwrap_err();

        assert_eq!(err.code(), "PROFILE_NOT_FOUND");
        assert_eq!(errors.load(Ordering::SeqCst), 0);
    }
}
