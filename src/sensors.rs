//! Environmental and orientation readings from the Sense HAT emulator
//!
//! The emulator publishes its simulated sensors as shared memory records
//! next to its screen file. Every reading opens the record, reads it from
//! the start and closes it again, so values are always current.
//!
//! The decoders are pure functions over the raw records and can be used on
//! data obtained any other way.
//!
//! ## Example
//!
//! ```
//! use sense_hat_led::sensors::{PRESSURE_RECORD_LEN, decode_pressure, decode_temperature};
//!
//! let mut record = [0u8; PRESSURE_RECORD_LEN];
//! record[12..16].copy_from_slice(&(1013 * 4096i32).to_le_bytes());
//! record[16..18].copy_from_slice(&(-480i16).to_le_bytes());
//!
//! assert_eq!(decode_pressure(&record), 1013.0);
//! assert_eq!(decode_temperature(&record), 36.0);
//! ```

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Default pressure and temperature record
pub const EMULATOR_PRESSURE: &str = "/dev/shm/rpi-sense-emu-pressure";

/// Default humidity record
pub const EMULATOR_HUMIDITY: &str = "/dev/shm/rpi-sense-emu-humidity";

/// Default IMU record
pub const EMULATOR_IMU: &str = "/dev/shm/rpi-sense-emu-imu";

/// Size of the pressure record in bytes
pub const PRESSURE_RECORD_LEN: usize = 20;

/// Size of the humidity record in bytes
pub const HUMIDITY_RECORD_LEN: usize = 28;

/// Size of the IMU record in bytes
pub const IMU_RECORD_LEN: usize = 56;

fn i16_at(record: &[u8], at: usize) -> i16 {
    i16::from_le_bytes([record[at], record[at + 1]])
}

fn i32_at(record: &[u8], at: usize) -> i32 {
    i32::from_le_bytes([record[at], record[at + 1], record[at + 2], record[at + 3]])
}

fn angle(raw: i16) -> f32 {
    f32::from(raw) * 360.0 / 32768.0
}

/// Temperature in degrees Celsius
pub fn decode_temperature(record: &[u8; PRESSURE_RECORD_LEN]) -> f32 {
    f32::from(i16_at(record, 16)) / 480.0 + 37.0
}

/// Pressure in hectopascals
pub fn decode_pressure(record: &[u8; PRESSURE_RECORD_LEN]) -> f32 {
    i32_at(record, 12) as f32 / 4096.0
}

/// Relative humidity in percent
pub fn decode_humidity(record: &[u8; HUMIDITY_RECORD_LEN]) -> f32 {
    f32::from(i16_at(record, 22)) / 256.0
}

/// Orientation of the board in degrees
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Orientation {
    /// Rotation about the x axis
    pub roll: f32,
    /// Rotation about the y axis
    pub pitch: f32,
    /// Rotation about the z axis
    pub yaw: f32,
}

/// Orientation from an IMU record
pub fn decode_orientation(record: &[u8; IMU_RECORD_LEN]) -> Orientation {
    Orientation {
        roll: angle(i16_at(record, 50)),
        pitch: angle(i16_at(record, 52)),
        yaw: angle(i16_at(record, 54)),
    }
}

/// Reads the emulator's sensor records
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmulatorSensors {
    pressure: PathBuf,
    humidity: PathBuf,
    imu: PathBuf,
}

impl Default for EmulatorSensors {
    fn default() -> Self {
        Self {
            pressure: PathBuf::from(EMULATOR_PRESSURE),
            humidity: PathBuf::from(EMULATOR_HUMIDITY),
            imu: PathBuf::from(EMULATOR_IMU),
        }
    }
}

impl EmulatorSensors {
    /// Sensors at the emulator's default paths
    pub fn new() -> Self {
        Self::default()
    }

    /// Sensors whose records all live in `dir`, under their default names
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let file_name = |default: &str| {
            Path::new(default)
                .file_name()
                .map_or_else(|| dir.to_path_buf(), |name| dir.join(name))
        };
        Self {
            pressure: file_name(EMULATOR_PRESSURE),
            humidity: file_name(EMULATOR_HUMIDITY),
            imu: file_name(EMULATOR_IMU),
        }
    }

    /// Temperature in degrees Celsius
    pub fn temperature(&self) -> io::Result<f32> {
        read_record(&self.pressure).map(|record| decode_temperature(&record))
    }

    /// Pressure in hectopascals
    pub fn pressure(&self) -> io::Result<f32> {
        read_record(&self.pressure).map(|record| decode_pressure(&record))
    }

    /// Relative humidity in percent
    pub fn humidity(&self) -> io::Result<f32> {
        read_record(&self.humidity).map(|record| decode_humidity(&record))
    }

    /// Board orientation in degrees
    pub fn orientation(&self) -> io::Result<Orientation> {
        read_record(&self.imu).map(|record| decode_orientation(&record))
    }
}

fn read_record<const N: usize>(path: &Path) -> io::Result<[u8; N]> {
    let mut record = [0u8; N];
    File::open(path)?.read_exact(&mut record)?;
    log::trace!("read {N} bytes from {}", path.display());
    Ok(record)
}
