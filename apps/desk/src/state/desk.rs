use geo_core::{InvoiceNumbering, PaymentMethodRegistry};
use geo_db::{Record, Repository, Storage};
use geo_render::{FileSink, HtmlFileSurface};
use tokio::sync::Mutex;
use tracing::info;

use crate::config::DeskConfig;
use crate::error::ApiResult;

/// Shared state behind every command.
///
/// The numbering lock is held across the whole create flow (pick number,
/// store invoice, advance counter), so two concurrent creates never get
/// the same number.
#[derive(Debug)]
pub struct Desk<S: Storage> {
    store: S,
    config: DeskConfig,
    numbering: Mutex<InvoiceNumbering>,
}

impl<S: Storage> Desk<S> {
    /// Wraps `store` and moves the invoice counter past every stored number.
    pub async fn open(store: S, config: DeskConfig) -> ApiResult<Self> {
        let mut numbering = config.numbering();
        let invoices = store.invoices().list().await?;
        for invoice in &invoices {
            numbering.observe(invoice.key());
        }

        info!(
            invoices = invoices.len(),
            next_invoice = %numbering.peek(),
            "Desk opened"
        );

        Ok(Desk {
            store,
            config,
            numbering: Mutex::new(numbering),
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &DeskConfig {
        &self.config
    }

    pub(crate) fn numbering(&self) -> &Mutex<InvoiceNumbering> {
        &self.numbering
    }

    pub fn payment_methods(&self) -> PaymentMethodRegistry {
        PaymentMethodRegistry::new()
    }

    /// Where downloaded PDFs are saved.
    pub fn file_sink(&self) -> FileSink {
        FileSink::new(self.config.export_dir())
    }

    /// Where printable pages are written for the browser.
    pub fn print_surface(&self) -> HtmlFileSurface {
        HtmlFileSurface::new(self.config.export_dir().join("print"))
    }
}
