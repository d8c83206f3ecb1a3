//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements    | Connects to                   |
//! |------------|---------------|-------------------------------|
//! | `hardware` | SensorPort    | ESP32 ADC1 sensor array       |
//! |            | AimPort       | LEDC servo channels           |
//! |            | ActuatorPort  | Pump and indicator GPIOs      |
//! |            | DrivePort     | Wheel motor GPIOs             |
//! |            | DelayNs       | FreeRTOS delay + watchdog     |
//! | `log_sink` | EventSink     | Serial log output             |

pub mod hardware;
pub mod log_sink;
