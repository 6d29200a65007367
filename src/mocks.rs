//! Test doubles shared by the unit tests

use alloc::vec;
use alloc::vec::Vec;

use embedded_hal::delay::DelayNs;

use crate::glyph::{GLYPH_RECORD_LEN, glyph_index, record_offset};
use crate::interface::{DisplayInterface, FRAME_BYTES};

/// Records every write and keeps a copy of the device memory
#[derive(Debug)]
pub struct MockInterface {
    pub writes: Vec<(u64, Vec<u8>)>,
    pub memory: [u8; FRAME_BYTES],
}

impl Default for MockInterface {
    fn default() -> Self {
        Self {
            writes: Vec::new(),
            memory: [0; FRAME_BYTES],
        }
    }
}

impl MockInterface {
    /// Packed color words currently in device memory
    pub fn cells(&self) -> [u16; 64] {
        let mut cells = [0u16; 64];
        for (cell, pair) in cells.iter_mut().zip(self.memory.chunks_exact(2)) {
            *cell = u16::from_be_bytes([pair[0], pair[1]]);
        }
        cells
    }
}

impl DisplayInterface for MockInterface {
    type Error = core::convert::Infallible;

    fn write_at(&mut self, offset: u64, data: &[u8]) -> Result<(), Self::Error> {
        let start = offset as usize;
        self.memory[start..start + data.len()].copy_from_slice(data);
        self.writes.push((offset, data.to_vec()));
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceGone;

/// Accepts `remaining` writes, then fails every write
#[derive(Debug, Default)]
pub struct FailingInterface {
    pub remaining: usize,
    pub attempts: usize,
}

impl DisplayInterface for FailingInterface {
    type Error = DeviceGone;

    fn write_at(&mut self, _offset: u64, _data: &[u8]) -> Result<(), Self::Error> {
        self.attempts += 1;
        if self.remaining == 0 {
            return Err(DeviceGone);
        }
        self.remaining -= 1;
        Ok(())
    }
}

/// Counts requested delays without sleeping
#[derive(Debug, Default)]
pub struct MockDelay {
    pub calls: usize,
    pub total_ns: u64,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.calls += 1;
        self.total_ns += u64::from(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.calls += 1;
        self.total_ns += u64::from(ms) * 1_000_000;
    }
}

/// Delay that runs a callback on every call, used to cancel mid-scroll
pub struct HookDelay<'a> {
    pub calls: usize,
    pub hook: &'a dyn Fn(usize),
}

impl DelayNs for HookDelay<'_> {
    fn delay_ns(&mut self, _ns: u32) {
        self.calls += 1;
        (self.hook)(self.calls);
    }
}

/// Builds an in-memory font resource with chosen lit cells
#[derive(Debug)]
pub struct FontBuilder {
    data: Vec<u8>,
}

impl FontBuilder {
    pub fn new() -> Self {
        let len = record_offset(90) as usize + GLYPH_RECORD_LEN;
        Self { data: vec![0; len] }
    }

    /// Light `cells` (strip * 8 + pixel) of `ch`'s record
    pub fn glyph(mut self, ch: char, cells: &[usize]) -> Self {
        let record = record_offset(glyph_index(ch)) as usize;
        for &cell in cells {
            let strip = cell / 8;
            let pixel = cell % 8;
            let at = record + 64 - strip * 16 + pixel * 2;
            self.data[at] = 0xFF;
            self.data[at + 1] = 0xFF;
        }
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.data
    }
}
