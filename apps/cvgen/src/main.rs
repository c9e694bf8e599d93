mod config;
mod cv;
mod document;
mod errors;
mod fetch;
mod models;
mod pipeline;
mod render;

use anyhow::Result;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::cv::CvBuilder;
use crate::fetch::{FileSource, GraphQlSource, ProfileSource};
use crate::pipeline::{generate_cv, GenerateRequest};
use crate::render::LatexRenderer;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; invalid values abort before anything runs
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cvgen v{}", env!("CARGO_PKG_VERSION"));

    // Profile source: local export when configured, CV tool service otherwise
    let source: Box<dyn ProfileSource> = match &config.profile_file {
        Some(path) => {
            let source = FileSource::new(path);
            info!("Profile source: file {}", source.path().display());
            Box::new(source)
        }
        None => {
            info!("Profile source: {}", config.endpoint);
            Box::new(GraphQlSource::new(&config.endpoint, config.http_timeout)?)
        }
    };

    let builder = match &config.header_image {
        Some(image) => CvBuilder::new().with_header_image(image),
        None => CvBuilder::new(),
    };

    let renderer = LatexRenderer::new(config.engine).keep_source(config.keep_tex);
    info!("Renderer: {} (keep .tex: {})", config.engine, config.keep_tex);

    let request = GenerateRequest::new(&config.username, &config.output);

    if let Err(e) = generate_cv(source.as_ref(), &builder, &renderer, &request).await {
        error!(code = e.code(), "CV generation failed: {e}");
        return Err(e.into());
    }

    Ok(())
}
