//! # Export
//!
//! Hands rendered documents to whatever saves or shows them.
//!
//! ```text
//! export_invoice_binary ──► layout ──► write_pdf ──► ArtifactSink::save   (async)
//! print_invoice         ──► render_invoice_markup ──► PrintSurface::show
//! ```
//!
//! One attempt per call: no retries and no cancellation. A failure leaves
//! the invoice untouched, so the caller can simply try again.

use std::path::{Path, PathBuf};

use geo_core::{BusinessProfile, CurrencyFormat, Invoice};
use tracing::{debug, info, warn};

use crate::error::{ExportError, ExportResult, RenderResult};
use crate::layout::{layout_invoice, PageSpec};
use crate::markup::render_invoice_markup;
use crate::pdf::write_pdf;

/// Default file name prefix of downloaded invoices.
pub const DEFAULT_ARTIFACT_PREFIX: &str = "Invoice-";

// =============================================================================
// Sinks
// =============================================================================

/// Destination of a downloaded document.
#[allow(async_fn_in_trait)]
pub trait ArtifactSink: Send + Sync {
    /// Stores `bytes` under `filename` and returns where they went.
    async fn save(&self, filename: &str, bytes: &[u8]) -> ExportResult<PathBuf>;
}

/// Destination of a printable page.
pub trait PrintSurface {
    /// Shows the page; returns where it can be reopened from.
    fn show(&self, title: &str, html: &str) -> ExportResult<PathBuf>;
}

/// Saves artifacts into a directory, creating it on first use.
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileSink { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ArtifactSink for FileSink {
    async fn save(&self, filename: &str, bytes: &[u8]) -> ExportResult<PathBuf> {
        let path = self.dir.join(sanitize_filename(filename));

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| ExportError::Io {
                path: self.dir.clone(),
                source,
            })?;
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|source| ExportError::Io {
                path: path.clone(),
                source,
            })?;

        debug!(path = %path.display(), bytes = bytes.len(), "Artifact written");
        Ok(path)
    }
}

/// Writes the printable page to an `.html` file for the system browser to
/// open and print.
#[derive(Debug, Clone)]
pub struct HtmlFileSurface {
    dir: PathBuf,
}

impl HtmlFileSurface {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        HtmlFileSurface { dir: dir.into() }
    }
}

impl PrintSurface for HtmlFileSurface {
    fn show(&self, title: &str, html: &str) -> ExportResult<PathBuf> {
        if !self.dir.is_dir() {
            std::fs::create_dir_all(&self.dir)
                .map_err(|e| ExportError::SurfaceUnavailable(format!("{}: {e}", self.dir.display())))?;
        }
        let path = self.dir.join(sanitize_filename(&format!("{title}.html")));
        std::fs::write(&path, html).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

// =============================================================================
// Filenames
// =============================================================================

/// `<prefix><invoice_number>.pdf`, e.g. `Invoice-INV-1001.pdf`.
pub fn artifact_filename(invoice: &Invoice, prefix: &str) -> String {
    format!("{prefix}{}.pdf", invoice.invoice_number)
}

/// Replaces path separators and other characters file systems reject.
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

// =============================================================================
// Operations
// =============================================================================

/// Lays out and serializes the invoice as PDF bytes.
///
/// The currency symbol is swapped for the code when the standard fonts
/// cannot draw it.
pub fn render_invoice_pdf(
    invoice: &Invoice,
    profile: &BusinessProfile,
    fmt: &CurrencyFormat,
) -> RenderResult<Vec<u8>> {
    let layout = layout_invoice(invoice, profile, &fmt.for_builtin_fonts(), &PageSpec::a4())?;
    debug!(
        invoice_number = %invoice.invoice_number,
        pages = layout.page_count(),
        "Invoice laid out"
    );
    write_pdf(&layout)
}

/// Renders the invoice to PDF and saves it through `sink`.
pub async fn export_invoice_binary<S>(
    invoice: &Invoice,
    profile: &BusinessProfile,
    fmt: &CurrencyFormat,
    prefix: &str,
    sink: &S,
) -> ExportResult<PathBuf>
where
    S: ArtifactSink,
{
    let bytes = render_invoice_pdf(invoice, profile, fmt)?;
    let filename = artifact_filename(invoice, prefix);

    match sink.save(&filename, &bytes).await {
        Ok(path) => {
            info!(
                invoice_number = %invoice.invoice_number,
                path = %path.display(),
                "Invoice exported"
            );
            Ok(path)
        }
        Err(e) => {
            warn!(invoice_number = %invoice.invoice_number, error = %e, "Invoice export failed");
            Err(e)
        }
    }
}

/// Renders the printable page and hands it to `surface`.
pub fn print_invoice<P>(
    invoice: &Invoice,
    profile: &BusinessProfile,
    fmt: &CurrencyFormat,
    surface: &P,
) -> ExportResult<PathBuf>
where
    P: PrintSurface + ?Sized,
{
    let html = render_invoice_markup(invoice, profile, fmt)?;
    let title = format!("Invoice-{}", invoice.invoice_number);
    let path = surface.show(&title, &html).inspect_err(|e| {
        warn!(invoice_number = %invoice.invoice_number, error = %e, "Print surface failed");
    })?;
    info!(invoice_number = %invoice.invoice_number, "Invoice sent to print surface");
    Ok(path)
}
