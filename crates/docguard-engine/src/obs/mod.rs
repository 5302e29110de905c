//! Lightweight in-process metrics.
//!
//! Decision counters and evaluation latency, stored as atomics and rendered
//! in Prometheus text format on demand (`docguard test --metrics`, or by the
//! host store's own exporter).

pub mod metrics;
