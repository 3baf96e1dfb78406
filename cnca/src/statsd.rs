use crate::config::MetricsConfig;
use crate::errors::CliError;
use metrics_exporter_statsd::StatsdBuilder;

const PREFIX: &str = "cnca";

/// Installs the StatsD recorder and registers every metric description.
/// Without a `metrics` section no recorder is installed and metrics are
/// dropped.
pub fn init(config: Option<&MetricsConfig>) -> Result<(), CliError> {
    let Some(config) = config else {
        tracing::debug!("No metrics config, metrics are disabled");
        return Ok(());
    };

    let recorder = StatsdBuilder::from(config.statsd_host.as_str(), config.statsd_port)
        .build(Some(PREFIX))
        .map_err(|e| CliError::Metrics(e.to_string()))?;
    metrics::set_global_recorder(recorder).map_err(|e| CliError::Metrics(e.to_string()))?;

    for defs in [
        pfd::metrics_defs::ALL_METRICS,
        af_client::metrics_defs::ALL_METRICS,
    ] {
        shared::metrics_defs::describe(defs);
    }

    tracing::info!(
        host = %config.statsd_host,
        port = config.statsd_port,
        "Sending metrics to StatsD"
    );
    Ok(())
}
