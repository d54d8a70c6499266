use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Instant, Ticker};
use heapless::Vec;

use crate::{
    consts::{LOGIC_UPDATE_HZ, MAX_LOGIC_CONDITIONS},
    context::FlightSnapshot,
    logic::LogicRequest,
    programming::{LogicStatus, Programming},
    signals as s,
    types::ProgrammingConfig,
};

/// Glue between the signals and [`Programming`]: keeps the latest inputs
/// and resets the runtime state whenever the arming state changes.
pub struct LogicRunner {
    programming: Programming,
    snapshot: FlightSnapshot,
    cli_active: bool,
    armed: bool,
}

impl LogicRunner {
    pub fn new(config: ProgrammingConfig) -> Self {
        Self {
            programming: Programming::new(config),
            snapshot: FlightSnapshot::default(),
            cli_active: false,
            armed: false,
        }
    }

    pub fn programming(&self) -> &Programming {
        &self.programming
    }

    pub fn set_config(&mut self, config: ProgrammingConfig) {
        self.programming.set_config(config);
    }

    pub fn set_snapshot(&mut self, snapshot: FlightSnapshot) {
        self.snapshot = snapshot;
    }

    pub fn set_cli_active(&mut self, active: bool) {
        self.cli_active = active;
    }

    pub fn set_armed(&mut self, armed: bool) {
        if armed != self.armed {
            debug!("logic_runner: armed {}, resetting", armed);
            self.programming.reset();
        }
        self.armed = armed;
    }

    /// Run one update and return the status and requests to publish
    pub fn step(
        &mut self,
        now: Instant,
    ) -> (LogicStatus, Vec<LogicRequest, MAX_LOGIC_CONDITIONS>) {
        self.programming.update(now, &self.snapshot, self.cli_active);
        (self.programming.status(), self.programming.take_requests())
    }
}

fn publish(
    snd_status: &s::LogicStatusSender,
    status: LogicStatus,
    requests: Vec<LogicRequest, MAX_LOGIC_CONDITIONS>,
) {
    snd_status.send(status);
    for request in requests {
        if s::LOGIC_REQUESTS.try_send(request).is_err() {
            warn!("logic_runner: request channel full, dropping {:?}", request);
        }
    }
}

#[embassy_executor::task]
pub async fn main() -> ! {
    const ID: &str = "logic_runner";
    info!("{}: Task started", ID);

    // Input channels
    let (Some(mut rcv_config), Some(mut rcv_snapshot), Some(mut rcv_cli), Some(mut rcv_armed)) = (
        s::CFG_PROGRAMMING.receiver(),
        s::FLIGHT_SNAPSHOT.receiver(),
        s::CLI_ACTIVE.receiver(),
        s::ARMED.receiver(),
    ) else {
        error!("{}: Out of signal receivers, not running", ID);
        loop {
            core::future::pending::<()>().await;
        }
    };

    // Output channels
    let snd_status = s::LOGIC_STATUS.sender();

    // Nothing to evaluate before there is a configuration
    let mut runner = LogicRunner::new(rcv_config.get().await);
    info!("{}: Configuration received", ID);

    let mut ticker = Ticker::every(Duration::from_hz(LOGIC_UPDATE_HZ));

    loop {
        // Apply new configurations right away, evaluate on the ticker
        match select(ticker.next(), rcv_config.changed()).await {
            Either::First(()) => (),
            Either::Second(config) => {
                runner.set_config(config);
                continue;
            }
        }

        if let Some(snapshot) = rcv_snapshot.try_changed() {
            runner.set_snapshot(snapshot);
        }

        if let Some(active) = rcv_cli.try_changed() {
            runner.set_cli_active(active);
        }

        if let Some(armed) = rcv_armed.try_changed() {
            runner.set_armed(armed);
        }

        let (status, requests) = runner.step(Instant::now());
        publish(&snd_status, status, requests);
    }
}
