use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

static TRACING_INIT: OnceCell<()> = OnceCell::new();

#[derive(Debug, Default)]
pub struct AppMetrics {
    page_views_total: AtomicU64,
    inquiries_composed_total: AtomicU64,
    validation_failures_total: AtomicU64,
    rate_limited_total: AtomicU64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub page_views_total: u64,
    pub inquiries_composed_total: u64,
    pub validation_failures_total: u64,
    pub rate_limited_total: u64,
    /// Share of inquiry submissions that passed validation.
    pub inquiry_success_ratio: f64,
}

impl AppMetrics {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn inc_page_view(&self) {
        self.page_views_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_inquiry_composed(&self) {
        self.inquiries_composed_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_validation_failure(&self) {
        self.validation_failures_total
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_rate_limited(&self) {
        self.rate_limited_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let composed = self.inquiries_composed_total.load(Ordering::Relaxed);
        let failed = self.validation_failures_total.load(Ordering::Relaxed);
        let submitted = composed + failed;

        MetricsSnapshot {
            page_views_total: self.page_views_total.load(Ordering::Relaxed),
            inquiries_composed_total: composed,
            validation_failures_total: failed,
            rate_limited_total: self.rate_limited_total.load(Ordering::Relaxed),
            inquiry_success_ratio: if submitted == 0 {
                0.0
            } else {
                composed as f64 / submitted as f64
            },
        }
    }
}

/// Where formatted log lines are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogTarget {
    /// Servers: logs are the process output.
    #[default]
    Stdout,
    /// Command-line tools whose stdout carries results.
    Stderr,
}

pub fn init_tracing(service_name: &str) {
    init_tracing_to(service_name, LogTarget::Stdout);
}

/// Installs the global JSON subscriber once; later calls are ignored whatever their target.
pub fn init_tracing_to(service_name: &str, target: LogTarget) {
    TRACING_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter(service_name)));

        let builder = tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .with_span_list(true);

        match target {
            LogTarget::Stdout => builder.with_writer(std::io::stdout).init(),
            LogTarget::Stderr => builder.with_writer(std::io::stderr).init(),
        }
    });
}

fn default_filter(service_name: &str) -> String {
    format!("{service_name}=info,bright_web=info,tower_http=info")
}
