use flight_movement::sim;
use flight_shared::{config::SimConfig, event::FlightEvent};
use flight_tests::init_tracing;

/// Smoke test: the scripted pilot takes off, flies and lands the toggle.
#[tokio::test]
async fn scripted_run_toggles_and_flies() -> anyhow::Result<()> {
    init_tracing();
    let cfg = SimConfig {
        ticks: 200,
        ..Default::default()
    };
    let report = sim::run(&cfg, false).await?;

    assert_eq!(report.frames, 200);
    let events: Vec<FlightEvent> = report.events.iter().map(|(_, e)| *e).collect();
    assert_eq!(events, vec![FlightEvent::Started, FlightEvent::Finished]);
    assert!(report.active_frames > 100);
    // Exclusive by default: every active frame is consumed.
    assert_eq!(report.consumed_frames, report.active_frames);
    assert!(report.max_speed > 1.0);
    // The climb lifted the body off the ground, forward is -Z.
    assert!(report.final_position.y > 0.0);
    assert!(report.final_position.z < 0.0);
    Ok(())
}

/// Non-exclusive flight leaves gravity to the host loop.
#[tokio::test]
async fn non_exclusive_run_is_never_consumed() -> anyhow::Result<()> {
    let cfg = SimConfig::from_json_str(r#"{ "ticks": 120, "flight": { "exclusive": false } }"#)?;
    let report = sim::run(&cfg, false).await?;
    assert_eq!(report.consumed_frames, 0);
    assert!(report.active_frames > 0);
    Ok(())
}

#[tokio::test]
async fn invalid_parameters_are_rejected() {
    let cfg = SimConfig::from_json_str(r#"{ "flight": { "drag": -1.0 } }"#).unwrap();
    let err = sim::run(&cfg, false).await.unwrap_err();
    assert!(format!("{:#}", err).contains("drag must not be negative"));
}

/// Paced run completes with the same frame count.
#[tokio::test]
async fn realtime_run_paces_frames() -> anyhow::Result<()> {
    let cfg = SimConfig {
        ticks: 10,
        tick_hz: 200,
        ..Default::default()
    };
    let started = std::time::Instant::now();
    let report = sim::run(&cfg, true).await?;
    assert_eq!(report.frames, 10);
    // First tick fires immediately, nine more at 5 ms each.
    assert!(started.elapsed() >= std::time::Duration::from_millis(40));
    Ok(())
}

/// Tick rates too high for a nanosecond period still run.
#[tokio::test]
async fn extreme_tick_rate_does_not_panic() -> anyhow::Result<()> {
    for realtime in [false, true] {
        let cfg = SimConfig {
            ticks: 5,
            tick_hz: u32::MAX,
            ..Default::default()
        };
        let report = sim::run(&cfg, realtime).await?;
        assert_eq!(report.frames, 5);
    }
    Ok(())
}
