use common::values::Calibration;
use fakedev::{
    device::{run_relay, run_sensor},
    monitor::Event,
    Config, Error, Monitor, SoilModel,
};
use mcu::{board::emul::SimBoard, tasks::relay::ACTIVE};
use tokio::{main as async_main, select, spawn, sync::mpsc::channel};

#[async_main]
async fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env()?;
    log::info!("Starting devices, speed-up {}x, seed {:#x}", config.speedup, config.seed);

    let (serial_tx, mut serial_rx) = channel(16);
    let (relay_tx, mut relay_rx) = channel(16);

    let board = SimBoard::new().with_source(SoilModel::new(config.seed).into_source());
    let sensor = spawn(run_sensor(board, None, config.speedup, serial_tx));
    let relay = spawn(run_relay(SimBoard::new(), None, config.speedup, relay_tx));

    let calibration = Calibration::default();
    let mut monitor = Monitor::new();
    let stopped = loop {
        select! {
            bytes = serial_rx.recv() => {
                let Some(bytes) = bytes else { break sensor };
                for event in monitor.feed(&bytes)? {
                    match event {
                        Event::Banner => log::info!("Sensor banner received"),
                        Event::Record(raw) => log::info!(
                            "Moisture: raw {}, {}{}",
                            raw,
                            calibration.percent(raw),
                            if calibration.is_dry(raw) { ", dry" } else { "" },
                        ),
                    }
                }
            }
            edge = relay_rx.recv() => {
                let Some(edge) = edge else { break relay };
                let state = if edge.level == ACTIVE { "on" } else { "off" };
                log::info!("Relay {} at {} ms", state, edge.at_ms);
            }
        }
    };

    // Devices never stop on their own, so this is a firmware error.
    stopped.await??;
    log::info!("Device stopped");
    Ok(())
}
