//! GPIO / peripheral pin assignments for the Firebot main board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Analog sensor array (ADC1)
// ---------------------------------------------------------------------------

/// ADC1 channel for each sensor-array slot, in sampling order.
///
/// | slot | sensor               |
/// |------|----------------------|
/// | 0    | line, left           |
/// | 1    | line, center         |
/// | 2    | line, right          |
/// | 3    | flame, middle        |
/// | 4    | flame, bottom        |
/// | 5    | flame, top           |
///
/// On the ESP32-S3, ADC1 channel N sits on GPIO N+1.
pub const SENSOR_ADC1_CHANNELS: [u32; 6] = [0, 1, 2, 3, 4, 5];

/// ADC attenuation for the sensor array (12 dB → 0 – 3.1 V range).
pub const SENSOR_ADC_ATTEN: u32 = 3;

// ---------------------------------------------------------------------------
// Aiming servos (LEDC PWM)
// ---------------------------------------------------------------------------

/// Horizontal (pan) servo signal.
pub const PAN_SERVO_GPIO: i32 = 11;
/// Vertical (tilt) servo signal.
pub const TILT_SERVO_GPIO: i32 = 12;

// ---------------------------------------------------------------------------
// Status indicators (discrete LEDs, active HIGH)
// ---------------------------------------------------------------------------

pub const SEARCHING_LED_GPIO: i32 = 13;
pub const AIM_HIGH_LED_GPIO: i32 = 14;
pub const AIM_LOW_LED_GPIO: i32 = 15;
pub const SUPPRESSING_LED_GPIO: i32 = 16;

// ---------------------------------------------------------------------------
// Suppression pump (logic-level MOSFET, active HIGH)
// ---------------------------------------------------------------------------

pub const PUMP_GPIO: i32 = 17;

// ---------------------------------------------------------------------------
// Drive motors (line-following variant, one enable per side)
// ---------------------------------------------------------------------------

pub const DRIVE_LEFT_GPIO: i32 = 18;
pub const DRIVE_RIGHT_GPIO: i32 = 21;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// Hobby-servo frame rate (20 ms period).
pub const SERVO_PWM_FREQ_HZ: u32 = 50;
/// LEDC timer resolution for the servo timer (bits).
pub const SERVO_PWM_RESOLUTION_BITS: u32 = 14;
