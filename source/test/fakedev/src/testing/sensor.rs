use common::config::{SAMPLE_PERIOD, SENSOR_CHANNEL};
use fakedev::{device::run_sensor, monitor::Event, Monitor, SoilModel};
use indicatif::ProgressBar;
use mcu::board::emul::{Latency, SimBoard};
use tokio::{spawn, sync::mpsc::channel};

/// Streams `samples` records from the sensor image and checks each of them
/// against a soil model seeded the same way.
pub async fn test(seed: u64, samples: usize, pb: ProgressBar) {
    let (tx, mut rx) = channel(16);
    let board = SimBoard::new()
        .with_tx_latency(Latency::Polls(3))
        .with_adc_latency(Latency::Polls(13))
        .with_source(SoilModel::new(seed).into_source());
    let device = spawn(run_sensor(board, Some(samples + 1), f64::INFINITY, tx));

    let mut expected = SoilModel::new(seed);
    let mut monitor = Monitor::new();
    let mut banner = false;
    while let Some(bytes) = rx.recv().await {
        for event in monitor.feed(&bytes).unwrap() {
            match event {
                Event::Banner => {
                    assert!(!banner, "banner repeated");
                    banner = true;
                }
                Event::Record(raw) => {
                    assert!(banner, "record before banner");
                    assert_eq!(raw.get(), expected.next_raw());
                    pb.inc(1);
                }
            }
        }
    }
    pb.finish();

    let board = device.await.unwrap().unwrap();
    assert_eq!(monitor.records(), samples);
    assert_eq!(board.conversions().len(), samples);
    assert!(board.conversions().iter().all(|&ch| ch == SENSOR_CHANNEL));
    assert_eq!(board.overlaps(), 0);
    assert_eq!(board.tx_overruns(), 0);
    assert_eq!(
        board.now_ms(),
        samples as u64 * SAMPLE_PERIOD.as_millis() as u64
    );
}
