//! # Logging Under Load
//!
//! Drives the center with a real subscriber installed so every log call
//! site is formatted at least once, including the leak report.

#[cfg(test)]
mod tests {
    use crate::fixtures::{Journal, Recorder};
    use nc_telemetry::{center_span, init_logging, TelemetryConfig};
    use notification_center::{CenterConfig, LeakPolicy, NotificationCenter};

    #[test]
    fn test_dispatch_with_subscriber_installed() {
        // Another test binary may already own the global subscriber
        let _guard = init_logging(&TelemetryConfig {
            log_level: "trace".to_string(),
            ..TelemetryConfig::for_tests()
        })
        .ok();

        let center = NotificationCenter::with_config(CenterConfig {
            label: "logged".to_string(),
            leak_policy: LeakPolicy::Log,
            log_unhandled: true,
        })
        .unwrap();
        let journal = Journal::new();
        let recorder = Recorder::new("logged", &journal);

        let span = center_span!("logged", phase = "test");
        let _entered = span.enter();
        tracing::info!("Starting logged dispatch");

        center.register_bare(recorder.identity(), "Tick", &recorder, Recorder::on_tick);
        center.register_value(recorder.identity(), "Resize", &recorder, Recorder::on_resize);

        assert_eq!(center.post_notification("Tick"), 1);
        assert_eq!(center.post_notification("Unheard"), 0);
        assert!(center
            .post_notification_with_object("Resize", "wide".to_string())
            .is_err());

        let report = center.teardown();
        assert_eq!(report.leaked_bindings, 2);
        assert_eq!(journal.entries(), vec!["logged:tick"]);
    }
}
