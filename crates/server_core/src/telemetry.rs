//! Telemetry bootstrap for the host (tracing + optional Prometheus metrics).

use anyhow::Result;
use data_runtime::configs::telemetry::TelemetryCfg;

pub struct TelemetryGuard;

pub fn init_telemetry(cfg: &TelemetryCfg) -> Result<TelemetryGuard> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};
    let level = cfg.log_level.clone().unwrap_or_else(|| "info".to_string());
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = if cfg.json_logs.unwrap_or(false) {
        fmt::layer().json().boxed()
    } else {
        fmt::layer().boxed()
    };
    tracing_subscriber::registry().with(filter).with(fmt_layer).try_init()?;
    if let Some(addr) = &cfg.metrics_addr {
        let addr = match addr.parse() {
            Ok(a) => a,
            Err(e) => {
                tracing::warn!(
                    target: "telemetry",
                    addr = %addr,
                    error = %e,
                    "bad metrics_addr; using 127.0.0.1:9100"
                );
                metrics::counter!("host.errors_total", "site" => "telemetry.parse_addr")
                    .increment(1);
                std::net::SocketAddr::from(([127, 0, 0, 1], 9100))
            }
        };
        let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
        if let Err(e) = builder.with_http_listener(addr).install() {
            tracing::warn!(target: "telemetry", error = %e, "metrics exporter not installed");
        }
    }
    tracing::info!(
        target: "telemetry",
        log_level = ?cfg.log_level,
        json_logs = ?cfg.json_logs,
        metrics_addr = ?cfg.metrics_addr,
        "telemetry initialized"
    );
    Ok(TelemetryGuard)
}
