//! Sonar telemetry front end for RP2040.
//!
//! This crate wires the platform-agnostic drivers of [`sensor_core`] to the
//! RP2040 peripherals.
//!
//! # Overview
//!
//! The firmware runs on a Raspberry Pi Pico (RP2040) and:
//! 1. Polls one ranging sensor (serial ranging module or trigger/echo module)
//! 2. Sends a JSON sensor report per poll and a numbered diagnostic
//!    heartbeat to the host over UART1 (115200 baud, 8N1)
//! 3. Receives `{"cmd":"<key>"}` lines from the host and drives the motors
//!
//! # Hardware Configuration
//!
//! | Function      | GPIO  | Description |
//! |---------------|-------|-------------|
//! | UART0 TX      | 0     | Ranging sensor RX (`sonar-uart`) |
//! | UART0 RX      | 1     | Ranging sensor TX (`sonar-uart`) |
//! | Trigger       | 2     | Ultrasonic trigger (`sonar-echo`) |
//! | Echo          | 3     | Ultrasonic echo (`sonar-echo`) |
//! | UART1 TX      | 8     | Telemetry to host |
//! | UART1 RX      | 9     | Commands from host |
//! | Left IN1/IN2  | 10/11 | Left motor direction |
//! | Right IN3/IN4 | 12/13 | Right motor direction |
//! | ENA/ENB       | 14/15 | Motor enables (held high) |
//! | LED           | 25    | On-board LED (error indicator) |
//!
//! # Architecture
//!
//! The firmware uses the Embassy async runtime with three tasks:
//!
//! - **Telemetry Task**: Steps a [`TelemetryPump`](sensor_core::TelemetryPump)
//!   every [`POLL_PERIOD_MS`]; the pump sends a heartbeat every
//!   [`HEARTBEAT_EVERY`] polls. With `depth-hold`, each distance also feeds a
//!   [`DepthHold`](sensor_core::DepthHold)
//! - **Command Task**: Polls the host link for command lines every
//!   [`COMMAND_POLL_MS`]
//! - **Drive Task**: Applies commands to the
//!   [`HBridgeDrivetrain`](sensor_core::HBridgeDrivetrain)
//!
//! The command and telemetry tasks hand commands to the drive task through
//! a single `Signal`. Only the latest command is kept; one the drive task
//! has not applied yet is replaced.
//!
//! The drivers are blocking. Each poll blocks the executor for the sensor's
//! settle time; tasks yield between polls.
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent watchdog reset)
//! - **`sonar-uart`** (default): Serial ranging module on UART0
//! - **`sonar-echo`**: Trigger/echo ultrasonic module on GPIO 2/3
//! - **`depth-hold`**: The ranging sensor faces down; hold the clearance band
//!   of [`DepthHoldConfig::default`](sensor_core::DepthHoldConfig)

#![no_std]

#[cfg(all(feature = "sonar-uart", feature = "sonar-echo"))]
compile_error!("Cannot enable both `sonar-uart` and `sonar-echo` features - select one ranging sensor");

#[cfg(not(any(feature = "sonar-uart", feature = "sonar-echo")))]
compile_error!("Select a ranging sensor with the `sonar-uart` or `sonar-echo` feature");

pub use sensor_core::{
    dispatch, CommandReceiver, DedicatedPort, DepthHold, DepthHoldConfig, DriveCommand,
    Drivetrain, EchoConfig, EchoTimingSensor, FixedOrientation, HBridgeDrivetrain, Orientation, PumpError,
    RangingConfig, RangingSource, ReceiveError, TelemetryPump, TelemetryUplink,
    UartRangingSensor, DEFAULT_BAUD_RATE,
};

pub mod clock;
pub mod uart;

pub use clock::EmbassyClock;
pub use uart::{SonarUart, SonarUartError};

/// Host link baud rate (UART1).
pub const HOST_BAUD_RATE: u32 = 115_200;

/// Ranging sensor baud rate (UART0).
pub const SONAR_BAUD_RATE: u32 = DEFAULT_BAUD_RATE;

/// Time between sensor reports.
pub const POLL_PERIOD_MS: u64 = 200;

/// Sensor reports between two diagnostic heartbeats.
pub const HEARTBEAT_EVERY: u32 = 25;

/// Time between host command polls.
pub const COMMAND_POLL_MS: u64 = 20;

/// UART ring buffer sizes, per direction.
pub const HOST_BUFFER_SIZE: usize = 256;
pub const SONAR_BUFFER_SIZE: usize = 16;
