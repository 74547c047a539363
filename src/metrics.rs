use anyhow::{Context, Result};
use axum::{extract::State, http::header, response::IntoResponse, routing::get, Router};
use metrics::{describe_counter, Unit};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

pub struct Metrics {
    pub handle: PrometheusHandle,
}

static HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

impl Metrics {
    /// Install the Prometheus recorder (once per process) and describe the
    /// series this service emits.
    pub fn init() -> Result<Self> {
        let handle = HANDLE
            .get_or_try_init(|| {
                let handle = PrometheusBuilder::new()
                    .install_recorder()
                    .context("prometheus: install recorder")?;
                describe();
                Ok::<_, anyhow::Error>(handle)
            })?
            .clone();
        Ok(Self { handle })
    }

    pub fn router(&self) -> Router {
        exposition_router(self.handle.clone())
    }
}

/// `GET /metrics` in the Prometheus text format for any handle, installed or not.
pub fn exposition_router(handle: PrometheusHandle) -> Router {
    Router::new()
        .route("/metrics", get(render_metrics))
        .with_state(handle)
}

async fn render_metrics(State(handle): State<PrometheusHandle>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        handle.render(),
    )
}

fn describe() {
    describe_counter!(
        "news_requests_total",
        Unit::Count,
        "News proxy requests by outcome."
    );
    describe_counter!(
        "upstream_errors_total",
        Unit::Count,
        "Transport/decode failures per upstream."
    );
    describe_counter!(
        "events_served_total",
        Unit::Count,
        "Events returned after filtering."
    );
    describe_counter!(
        "events_year_unparsed_total",
        Unit::Count,
        "Events dropped from a year bucket because the year did not parse."
    );
}
