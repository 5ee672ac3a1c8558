#![no_std]
#![no_main]

use defmt::{debug, error, info, warn};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::UART1;
use embassy_rp::uart::{
    BufferedInterruptHandler, BufferedUart, BufferedUartRx, BufferedUartTx, Config as UartConfig,
};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Delay, Timer};
use sonar_telemetry_rp2040::{
    dispatch, CommandReceiver, DriveCommand, FixedOrientation, HBridgeDrivetrain, Orientation,
    PumpError, ReceiveError, TelemetryPump, TelemetryUplink, COMMAND_POLL_MS, HEARTBEAT_EVERY,
    HOST_BAUD_RATE, HOST_BUFFER_SIZE, POLL_PERIOD_MS,
};
use static_cell::StaticCell;

#[cfg(feature = "sonar-uart")]
use embassy_rp::peripherals::UART0;
#[cfg(feature = "sonar-uart")]
use sonar_telemetry_rp2040::{
    DedicatedPort, RangingConfig, SonarUart, UartRangingSensor, SONAR_BAUD_RATE,
    SONAR_BUFFER_SIZE,
};

#[cfg(feature = "sonar-echo")]
use embassy_rp::gpio::{Input, Pull};
#[cfg(feature = "sonar-echo")]
use sonar_telemetry_rp2040::{EchoConfig, EchoTimingSensor, EmbassyClock};

#[cfg(feature = "depth-hold")]
use sonar_telemetry_rp2040::DepthHold;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

#[cfg(feature = "sonar-uart")]
bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    UART1_IRQ => BufferedInterruptHandler<UART1>;
});

#[cfg(feature = "sonar-echo")]
bind_interrupts!(struct Irqs {
    UART1_IRQ => BufferedInterruptHandler<UART1>;
});

#[cfg(feature = "sonar-uart")]
type Sonar = UartRangingSensor<DedicatedPort<SonarUart>, Delay>;

#[cfg(feature = "sonar-echo")]
type Sonar = EchoTimingSensor<Output<'static>, Input<'static>, Delay, EmbassyClock>;

type Pump = TelemetryPump<Sonar, FixedOrientation, BufferedUartTx>;

/// Latest drive command from the host. A newer command replaces one the
/// drive task has not applied yet.
static COMMAND_SIGNAL: StaticCell<Signal<CriticalSectionRawMutex, DriveCommand>> =
    StaticCell::new();

static HOST_TX_BUF: StaticCell<[u8; HOST_BUFFER_SIZE]> = StaticCell::new();
static HOST_RX_BUF: StaticCell<[u8; HOST_BUFFER_SIZE]> = StaticCell::new();

#[cfg(feature = "sonar-uart")]
static SONAR_TX_BUF: StaticCell<[u8; SONAR_BUFFER_SIZE]> = StaticCell::new();
#[cfg(feature = "sonar-uart")]
static SONAR_RX_BUF: StaticCell<[u8; SONAR_BUFFER_SIZE]> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Sonar telemetry starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    let signal = COMMAND_SIGNAL.init(Signal::new());

    // --- Host link (UART1) ---
    let mut host_config = UartConfig::default();
    host_config.baudrate = HOST_BAUD_RATE;

    let host = BufferedUart::new(
        p.UART1,
        p.PIN_8, // TX
        p.PIN_9, // RX
        Irqs,
        HOST_TX_BUF.init([0; HOST_BUFFER_SIZE]),
        HOST_RX_BUF.init([0; HOST_BUFFER_SIZE]),
        host_config,
    );
    let (host_tx, host_rx) = host.split();
    let uplink = TelemetryUplink::new(host_tx);
    let commands = CommandReceiver::new(host_rx);

    // --- Ranging sensor ---
    #[cfg(feature = "sonar-uart")]
    let sonar = {
        let mut sonar_config = UartConfig::default();
        sonar_config.baudrate = SONAR_BAUD_RATE;

        let uart = BufferedUart::new(
            p.UART0,
            p.PIN_0, // TX
            p.PIN_1, // RX
            Irqs,
            SONAR_TX_BUF.init([0; SONAR_BUFFER_SIZE]),
            SONAR_RX_BUF.init([0; SONAR_BUFFER_SIZE]),
            sonar_config,
        );
        let port = DedicatedPort::new(SonarUart::new(uart, SONAR_BAUD_RATE));
        let mut sensor = UartRangingSensor::new(port, Delay, RangingConfig::default());
        sensor.open(SONAR_BAUD_RATE);
        sensor
    };

    #[cfg(feature = "sonar-echo")]
    let sonar = {
        let trigger = Output::new(p.PIN_2, Level::Low);
        let echo = Input::new(p.PIN_3, Pull::Down);
        EchoTimingSensor::new(trigger, echo, Delay, EmbassyClock, EchoConfig::default())
    };

    // The orientation driver is not wired in yet; report level.
    let orientation = FixedOrientation(Orientation::default());
    let pump = TelemetryPump::new(sonar, orientation, uplink).with_heartbeat_every(HEARTBEAT_EVERY);

    // --- Motors ---
    let mut enable_left = Output::new(p.PIN_14, Level::Low);
    let mut enable_right = Output::new(p.PIN_15, Level::Low);
    let Ok(drive) = HBridgeDrivetrain::new(
        Output::new(p.PIN_10, Level::Low),
        Output::new(p.PIN_11, Level::Low),
        Output::new(p.PIN_12, Level::Low),
        Output::new(p.PIN_13, Level::Low),
        &mut enable_left,
        &mut enable_right,
    );

    // On-board LED toggles on ranging errors
    let led = Output::new(p.PIN_25, Level::Low);

    // Spawn tasks (unwrap the SpawnToken, then spawn)
    spawner.spawn(telemetry_task(pump, led, signal).unwrap());
    spawner.spawn(command_task(commands, signal).unwrap());
    spawner.spawn(drive_task(drive, [enable_left, enable_right], signal).unwrap());

    info!("Sonar telemetry initialized, reporting every {} ms", POLL_PERIOD_MS);
}

/// Telemetry task - polls the ranging sensor and reports to the host.
///
/// The pump logs failures and sends the heartbeat; this task signals
/// ranging errors on the LED and, with `depth-hold`, steers depth.
#[embassy_executor::task]
async fn telemetry_task(
    mut pump: Pump,
    mut led: Output<'static>,
    signal: &'static Signal<CriticalSectionRawMutex, DriveCommand>,
) {
    #[cfg(feature = "depth-hold")]
    let mut depth = DepthHold::default();

    loop {
        let result = pump.step();
        match &result {
            Ok(distance) => debug!("Distance {} cm", distance),
            Err(PumpError::Ranging(e)) => {
                debug!("Ranging error: {:?}", e);
                led.toggle();
            }
            Err(PumpError::Uplink(_)) => {}
        }

        // A poll whose report failed is skipped as a depth reading.
        #[cfg(feature = "depth-hold")]
        if let Some(command) = depth.update(result) {
            info!("Depth hold: {:?}", command);
            signal.signal(command);
        }
        #[cfg(not(feature = "depth-hold"))]
        let _ = (result, signal);

        Timer::after_millis(POLL_PERIOD_MS).await;
    }
}

/// Command task - parses host command lines and signals the latest one.
#[embassy_executor::task]
async fn command_task(
    mut commands: CommandReceiver<BufferedUartRx>,
    signal: &'static Signal<CriticalSectionRawMutex, DriveCommand>,
) {
    loop {
        loop {
            match commands.poll() {
                Ok(Some(command)) => signal.signal(command),
                Ok(None) => break,
                Err(ReceiveError::Io) => {
                    error!("Host link error");
                    break;
                }
                Err(e) => warn!("Command rejected: {:?}", e),
            }
        }
        Timer::after_millis(COMMAND_POLL_MS).await;
    }
}

/// Drive task - applies each signalled command to the motors.
///
/// Holds the enable pins so they stay driven high.
#[embassy_executor::task]
async fn drive_task(
    mut drive: HBridgeDrivetrain<Output<'static>>,
    _enables: [Output<'static>; 2],
    signal: &'static Signal<CriticalSectionRawMutex, DriveCommand>,
) {
    loop {
        let command = signal.wait().await;
        info!("Drive command: {:?}", command);
        let Ok(()) = dispatch(&mut drive, command);
    }
}
