use shared::metrics_defs::{MetricDef, MetricType};

pub const TRANSFORMS: MetricDef = MetricDef {
    name: "pfd.transform",
    metric_type: MetricType::Counter,
    description: "Form conversions performed. Tagged with direction, scope.",
};

pub const DUPLICATE_KEYS: MetricDef = MetricDef {
    name: "pfd.transform.duplicate_keys",
    metric_type: MetricType::Counter,
    description: "Repeated externalAppID or pfdID seen while building the wire form. Tagged with kind.",
};

pub const ALL_METRICS: &[MetricDef] = &[TRANSFORMS, DUPLICATE_KEYS];
