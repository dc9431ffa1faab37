//! Minimal metrics registry for the daemon.
//!
//! Counters and gauges are plain atomics rendered in Prometheus text
//! exposition format; float gauges store f64 bit patterns. The instrument
//! set is fixed and label-free, so no registry machinery is needed.

use std::fmt::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

use axum::Router;
use axum::extract::State;
use axum::routing::get;

use loraline_core::{Frame, Payload};

#[derive(Default)]
pub struct Counter(AtomicU64);

impl Counter {
    pub fn inc(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// Gauge holding an f64 as its bit pattern.
#[derive(Default)]
pub struct FloatGauge(AtomicU64);

impl FloatGauge {
    pub fn set(&self, value: f64) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }

    pub fn get(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Relaxed))
    }
}

#[derive(Default)]
pub struct IntGauge(AtomicI64);

impl IntGauge {
    pub fn set(&self, value: i64) {
        self.0.store(value, Ordering::Relaxed);
    }

    pub fn get(&self) -> i64 {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Default)]
pub struct Metrics {
    pub humidity: FloatGauge,
    pub temperature: FloatGauge,
    pub battery: FloatGauge,
    pub rssi: IntGauge,
    pub frames_total: Counter,
    pub decode_errors_total: Counter,
}

impl Metrics {
    pub fn observe_frame(&self, frame: &Frame) {
        self.frames_total.inc();
        self.rssi.set(frame.rssi as i64);
        let Payload::SensorReading(reading) = &frame.envelope.payload;
        self.humidity.set(reading.humidity);
        self.temperature.set(reading.temperature);
        self.battery.set(reading.battery);
    }

    pub fn observe_reject(&self) {
        self.decode_errors_total.inc();
    }

    /// Render all instruments in Prometheus text exposition format.
    pub fn render(&self) -> String {
        let mut out = String::new();
        render_metric(
            &mut out,
            "loraline_humidity_rh",
            "gauge",
            "Humidity in % RH",
            self.humidity.get(),
        );
        render_metric(
            &mut out,
            "loraline_temperature_c",
            "gauge",
            "Temperature in C",
            self.temperature.get(),
        );
        render_metric(
            &mut out,
            "loraline_battery_volts",
            "gauge",
            "Battery level in V",
            self.battery.get(),
        );
        render_metric(
            &mut out,
            "loraline_rssi_db",
            "gauge",
            "Signal strength of the last frame in dB",
            self.rssi.get(),
        );
        render_metric(
            &mut out,
            "loraline_frames_total",
            "counter",
            "Frames decoded through all layers",
            self.frames_total.get(),
        );
        render_metric(
            &mut out,
            "loraline_decode_errors_total",
            "counter",
            "Lines rejected by a decode layer",
            self.decode_errors_total.get(),
        );
        out
    }
}

fn render_metric<V: std::fmt::Display>(
    out: &mut String,
    name: &str,
    kind: &str,
    help: &str,
    value: V,
) {
    let _ = writeln!(out, "# HELP {name} {help}");
    let _ = writeln!(out, "# TYPE {name} {kind}");
    let _ = writeln!(out, "{name} {value}");
}

pub fn router(metrics: Arc<Metrics>) -> Router {
    Router::new()
        .route("/metrics", get(render_handler))
        .route("/healthz", get(|| async { "ok" }))
        .with_state(metrics)
}

async fn render_handler(State(metrics): State<Arc<Metrics>>) -> String {
    metrics.render()
}

#[cfg(test)]
mod tests {
    use super::Metrics;
    use loraline_core::parse_bridge_line;

    #[test]
    fn observe_frame_updates_instruments() {
        let metrics = Metrics::default();
        let frame =
            parse_bridge_line("RECV [-52 RSSI] -- W4PHO|1|3571c78c|4903|64.73|18.16|3.98").unwrap();
        metrics.observe_frame(&frame);

        assert_eq!(metrics.frames_total.get(), 1);
        assert_eq!(metrics.rssi.get(), -52);
        assert_eq!(metrics.humidity.get(), 64.73);
        assert_eq!(metrics.temperature.get(), 18.16);
        assert_eq!(metrics.battery.get(), 3.98);
    }

    #[test]
    fn render_exposes_all_instruments() {
        let metrics = Metrics::default();
        metrics.observe_reject();
        let text = metrics.render();

        assert!(text.contains("# TYPE loraline_humidity_rh gauge"));
        assert!(text.contains("# TYPE loraline_frames_total counter"));
        assert!(text.contains("loraline_decode_errors_total 1"));
    }
}
