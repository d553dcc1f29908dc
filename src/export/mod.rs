//! Export of a calculation as a Word document.
//!
//! The pipeline runs as one future: rasterize the plan, encode it as PNG,
//! build and serialize the document, then persist it. The CPU-bound stages run
//! on the blocking pool; the file is only touched once the whole archive is in
//! memory, and it is written under a temporary name and renamed into place, so
//! a failed export never leaves a partial document behind.
//!
//! At most one export runs at a time. [`Exporter::begin`] refuses a second
//! request with [`ExportError::Busy`] while the first is still in flight.

pub mod docx;
pub mod raster;

use std::{
    future::Future,
    path::{Path, PathBuf},
    sync::Arc,
};

use thiserror::Error;
use tokio::sync::Semaphore;

use crate::{config::ExportConfig, layout::RenderPlan};

pub use docx::Document;
pub use raster::{PlottersRasterizer, Rasterize, Snapshot, encode_png};

/// Shown to the user for every export failure.
pub const RETRY_MESSAGE: &str = "Có lỗi khi tạo file. Vui lòng thử lại.";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("an export is already running")]
    Busy,
    #[error("could not render the plot: {0}")]
    Snapshot(String),
    #[error("could not encode the plot image")]
    Encode(#[from] png::EncodingError),
    #[error("could not serialize the document")]
    Xml(#[from] quick_xml::Error),
    #[error("could not package the document")]
    Package(#[from] zip::result::ZipError),
    #[error("could not write the document")]
    Io(#[from] std::io::Error),
    #[error("export task failed")]
    Task(#[from] tokio::task::JoinError),
}

impl ExportError {
    /// The message surfaced in the UI.
    pub fn user_message(&self) -> &'static str {
        RETRY_MESSAGE
    }
}

/// What to export: the laid-out plot, which also carries the function and its
/// table points.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRequest {
    pub plan: RenderPlan,
}

impl ExportRequest {
    pub fn new(plan: RenderPlan) -> Self {
        Self { plan }
    }
}

/// Runs export pipelines, one at a time.
#[derive(Debug)]
pub struct Exporter<R: Rasterize = PlottersRasterizer> {
    config: Arc<ExportConfig>,
    rasterizer: Arc<R>,
    permits: Arc<Semaphore>,
}

impl<R: Rasterize> Clone for Exporter<R> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            rasterizer: Arc::clone(&self.rasterizer),
            permits: Arc::clone(&self.permits),
        }
    }
}

impl Default for Exporter<PlottersRasterizer> {
    fn default() -> Self {
        Self::new(ExportConfig::default(), PlottersRasterizer::default())
    }
}

impl<R: Rasterize> Exporter<R> {
    pub fn new(config: ExportConfig, rasterizer: R) -> Self {
        Self {
            config: Arc::new(config),
            rasterizer: Arc::new(rasterizer),
            permits: Arc::new(Semaphore::new(1)),
        }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// True while an export started by this exporter (or a clone) is running.
    pub fn is_busy(&self) -> bool {
        self.permits.available_permits() == 0
    }

    /// Claim the export slot and return the pipeline future.
    ///
    /// The slot is held until the future completes or is dropped.
    pub fn begin(
        &self,
        request: ExportRequest,
    ) -> Result<impl Future<Output = Result<PathBuf, ExportError>> + Send + 'static, ExportError>
    {
        let permit = Arc::clone(&self.permits)
            .try_acquire_owned()
            .map_err(|_| {
                log::warn!("export requested while another is running");
                ExportError::Busy
            })?;
        let config = Arc::clone(&self.config);
        let rasterizer = Arc::clone(&self.rasterizer);

        Ok(async move {
            let _permit = permit;
            let result = run(rasterizer, config, request).await;
            match &result {
                Ok(path) => log::info!("exported document to {}", path.display()),
                Err(err) => log::warn!("export failed: {err}"),
            }
            result
        })
    }

    /// Run one export to completion.
    pub async fn export(&self, request: ExportRequest) -> Result<PathBuf, ExportError> {
        self.begin(request)?.await
    }
}

async fn run<R: Rasterize>(
    rasterizer: Arc<R>,
    config: Arc<ExportConfig>,
    request: ExportRequest,
) -> Result<PathBuf, ExportError> {
    let path = config.output_path();
    let bytes =
        tokio::task::spawn_blocking(move || render_document(rasterizer.as_ref(), &config, &request))
            .await??;
    persist(&path, &bytes).await?;
    Ok(path)
}

/// Produce the complete `.docx` archive in memory.
pub fn render_document<R: Rasterize + ?Sized>(
    rasterizer: &R,
    config: &ExportConfig,
    request: &ExportRequest,
) -> Result<Vec<u8>, ExportError> {
    let plan = &request.plan;
    let snapshot = rasterizer.rasterize(plan, config.image_size)?;
    let png = encode_png(&snapshot)?;
    log::debug!("encoded {} byte plot image", png.len());
    Document::worksheet(&plan.descriptor, &plan.points, config, png).to_docx()
}

async fn persist(path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(dir).await?;
    }
    let partial = partial_path(path);
    let written = match tokio::fs::write(&partial, bytes).await {
        Ok(()) => tokio::fs::rename(&partial, path).await,
        Err(err) => Err(err),
    };
    if let Err(err) = written {
        if let Err(cleanup) = tokio::fs::remove_file(&partial).await {
            log::debug!("could not remove {}: {cleanup}", partial.display());
        }
        return Err(err.into());
    }
    Ok(())
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}
