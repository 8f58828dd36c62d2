//! Shared value types for the sensewire wire protocol and recording codec.
//!
//! [`complex`] holds the sensor value structs with fixed wire layouts;
//! [`attribute`] holds the id-keyed attribute registry built on top of
//! them. Both codec crates depend on this one and add framing around it.
//!
//! Enable the `serde` feature to derive `Serialize`/`Deserialize` on every
//! public type, for tooling that wants to dump decoded traffic as JSON.

pub mod attribute;
pub mod complex;

pub use attribute::Attribute;
pub use complex::{
    AccRaw, AfeRegister, AfeSettings, AfeSettingsAll, BatteryDiagnostics, BloodPressure,
    Diagnostics, FileInfo, FileName, FirmwareVersion, GyroRaw, Imu, ImuRaw, PulseRaw, PulseRawAll,
    PulseRawList, Recording, Reporting, Temperature,
};
