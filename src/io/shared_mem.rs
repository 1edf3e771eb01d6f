//! Reader for the `asraSharedMem` POSIX shared-memory segment published by
//! the avionics bridge. This is the aircraft-state source of the deployed
//! system; the decision core itself never touches it.

use std::ffi::CString;
use std::ptr;

use strum_macros::Display;

use crate::messages::AircraftState;

/// In-memory layout of the navigation block inside the shared segment.
/// This struct is the interface contract with the bridge process.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default)]
pub struct AsraSharedMem {
    pub gps_time: f64,
    pub lat: f64,
    pub lon: f64,
    pub alt_msl_ft: f32,
    pub alt_agl_ft: f32,
    pub hdg_deg: f32,
    pub vel_kts: f32,
    /// Blended height-above-ground used for the landing-achieved check.
    pub mixedhgt_ft: f32,
}

#[derive(Debug, Display, PartialEq, Eq)]
pub enum SharedMemError {
    BadSegmentName,
    SegmentUnavailable,
    MapFailed,
}

pub struct SharedMemoryReader {
    segment: *const AsraSharedMem,
    fd: libc::c_int,
}

// The mapping is read-only and lives for the whole process.
unsafe impl Send for SharedMemoryReader {}
unsafe impl Sync for SharedMemoryReader {}

impl SharedMemoryReader {
    /// Attaches to the named segment. Fails fast when the bridge is not up;
    /// the host refuses to enter the simulation without it.
    pub fn connect(name: &str) -> Result<Self, SharedMemError> {
        let c_name = CString::new(name).map_err(|_| SharedMemError::BadSegmentName)?;
        let fd = unsafe { libc::shm_open(c_name.as_ptr(), libc::O_RDONLY, 0) };
        if fd < 0 {
            return Err(SharedMemError::SegmentUnavailable);
        }
        let mapping = unsafe {
            libc::mmap(
                ptr::null_mut(),
                std::mem::size_of::<AsraSharedMem>(),
                libc::PROT_READ,
                libc::MAP_SHARED,
                fd,
                0,
            )
        };
        if mapping == libc::MAP_FAILED {
            unsafe { libc::close(fd) };
            return Err(SharedMemError::MapFailed);
        }
        Ok(Self {
            segment: mapping.cast::<AsraSharedMem>().cast_const(),
            fd,
        })
    }

    fn snapshot(&self) -> AsraSharedMem {
        unsafe { ptr::read_volatile(self.segment) }
    }

    pub fn aircraft_state(&self) -> AircraftState {
        let mem = self.snapshot();
        AircraftState {
            gps_time: mem.gps_time,
            lat: mem.lat,
            lon: mem.lon,
            alt_agl: mem.alt_agl_ft,
            alt_msl: mem.alt_msl_ft,
            hdg_deg: mem.hdg_deg,
            vel_kts: mem.vel_kts,
        }
    }

    pub fn mixedhgt_ft(&self) -> f32 {
        self.snapshot().mixedhgt_ft
    }
}

impl Drop for SharedMemoryReader {
    fn drop(&mut self) {
        unsafe {
            libc::munmap(
                self.segment.cast_mut().cast::<libc::c_void>(),
                std::mem::size_of::<AsraSharedMem>(),
            );
            libc::close(self.fd);
        }
    }
}
