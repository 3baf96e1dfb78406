use shared::metrics_defs::{MetricDef, MetricType};

pub const API_REQUESTS: MetricDef = MetricDef {
    name: "api.requests",
    metric_type: MetricType::Counter,
    description: "Requests sent to the AF, OAM and CUPS APIs. Tagged with resource, method, status.",
};

pub const API_REQUEST_DURATION: MetricDef = MetricDef {
    name: "api.request.duration",
    metric_type: MetricType::Histogram,
    description: "API request duration in seconds. Tagged with resource, method.",
};

pub const ALL_METRICS: &[MetricDef] = &[API_REQUESTS, API_REQUEST_DURATION];
