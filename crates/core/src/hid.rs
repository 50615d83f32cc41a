//! hidapi-backed implementation of the transport traits.
//!
//! [`HidApiBus`] enumerates controllers through hidapi, opens them by
//! platform path, and streams their input reports from a per-device reader
//! thread. hidapi has no hotplug notification, so hardware removal is
//! detected where it actually surfaces: the blocking read fails, and the
//! reader thread fires the bus-wide removal sinks before exiting.

use crate::device::{DeviceFilter, DeviceRef};
use crate::error::{Error, Result};
use crate::transport::{DeviceHandle, HidBus, RemovalSink, ReportSink};
use std::ffi::CString;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use tracing::{debug, info, warn};

/// Read timeout for the reader thread; also bounds how long `close` leaves
/// the thread running after detaching.
const READ_TIMEOUT_MS: i32 = 100;

/// Input report buffer size. Motion reports are 7 bytes (ID + payload) but
/// larger models emit longer button/vendor reports.
const READ_BUF_LEN: usize = 64;

/// Production bus over hidapi.
pub struct HidApiBus {
    api: Mutex<hidapi::HidApi>,
    removal_sinks: Arc<Mutex<Vec<RemovalSink>>>,
}

impl HidApiBus {
    /// Initialize the underlying hidapi context.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Hid`] when the platform HID backend cannot be
    /// initialized.
    pub fn new() -> Result<Self> {
        let api = hidapi::HidApi::new().map_err(|e| Error::Hid(e.to_string()))?;
        Ok(Self {
            api: Mutex::new(api),
            removal_sinks: Arc::new(Mutex::new(Vec::new())),
        })
    }

    fn api(&self) -> MutexGuard<'_, hidapi::HidApi> {
        self.api.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn enumerate(&self, filter: &DeviceFilter) -> Result<Vec<DeviceRef>> {
        let mut api = self.api();
        api.refresh_devices().map_err(|e| Error::Hid(e.to_string()))?;

        let mut devices = Vec::new();
        for info in api.device_list() {
            if !filter.matches(info.vendor_id(), info.product_id()) {
                continue;
            }
            info!(
                vid = format_args!("0x{:04X}", info.vendor_id()),
                pid = format_args!("0x{:04X}", info.product_id()),
                path = %info.path().to_string_lossy(),
                "Found controller"
            );
            devices.push(DeviceRef {
                vendor_id: info.vendor_id(),
                product_id: info.product_id(),
                path: info.path().to_string_lossy().into_owned(),
                serial: info.serial_number().map(String::from),
            });
        }

        debug!(count = devices.len(), "Controller enumeration complete");
        Ok(devices)
    }
}

impl HidBus for HidApiBus {
    fn list_authorized(&self, filter: &DeviceFilter) -> Result<Vec<DeviceRef>> {
        self.enumerate(filter)
    }

    /// hidapi has no user-gesture picker; selection policy here is the
    /// first eligible device found on a fresh enumeration. Callers keep the
    /// user-intent boundary by invoking this only on explicit user action.
    fn request_user_selection(&self, filter: &DeviceFilter) -> Result<Option<DeviceRef>> {
        Ok(self.enumerate(filter)?.into_iter().next())
    }

    fn open(&self, device: &DeviceRef) -> Result<Box<dyn DeviceHandle>> {
        let path = CString::new(device.path.as_bytes())
            .map_err(|_| Error::OpenFailed(format!("device path contains NUL: {}", device.path)))?;

        let hid_device = self
            .api()
            .open_path(&path)
            .map_err(|e| Error::OpenFailed(e.to_string()))?;

        let product_name = match hid_device.get_product_string() {
            Ok(Some(name)) => name,
            _ => device
                .model()
                .map(|m| m.name().to_string())
                .unwrap_or_else(|| "Unknown 6DoF Controller".to_string()),
        };

        Ok(Box::new(HidApiHandle {
            device: Some(hid_device),
            device_ref: device.clone(),
            product_name,
            stop: Arc::new(AtomicBool::new(false)),
            removal_sinks: Arc::clone(&self.removal_sinks),
        }))
    }

    fn subscribe_removals(&self, sink: RemovalSink) {
        self.removal_sinks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(sink);
    }
}

/// An open hidapi device. `start` hands the device to a reader thread;
/// `close` detaches by flag and lets the thread wind down on its next
/// timeout, so it can be called from a removal callback without joining.
struct HidApiHandle {
    device: Option<hidapi::HidDevice>,
    device_ref: DeviceRef,
    product_name: String,
    stop: Arc<AtomicBool>,
    removal_sinks: Arc<Mutex<Vec<RemovalSink>>>,
}

impl DeviceHandle for HidApiHandle {
    fn product_name(&self) -> &str {
        &self.product_name
    }

    fn start(&mut self, sink: ReportSink) -> Result<()> {
        let device = self
            .device
            .take()
            .ok_or_else(|| Error::Hid("report delivery already started".to_string()))?;

        let stop = Arc::clone(&self.stop);
        let removal_sinks = Arc::clone(&self.removal_sinks);
        let device_ref = self.device_ref.clone();

        thread::Builder::new()
            .name("space-hub-reader".to_string())
            .spawn(move || {
                let mut buf = [0u8; READ_BUF_LEN];
                loop {
                    if stop.load(Ordering::SeqCst) {
                        break;
                    }
                    match device.read_timeout(&mut buf, READ_TIMEOUT_MS) {
                        Ok(0) => continue,
                        Ok(n) => sink(buf[0], &buf[1..n]),
                        Err(e) => {
                            if stop.load(Ordering::SeqCst) {
                                break;
                            }
                            // Read failure on an unplugged device is the only
                            // removal signal hidapi gives us.
                            warn!(path = %device_ref.path, error = %e, "Device read failed, treating as removal");
                            let sinks = removal_sinks
                                .lock()
                                .unwrap_or_else(PoisonError::into_inner);
                            for removal_sink in sinks.iter() {
                                removal_sink(&device_ref);
                            }
                            break;
                        }
                    }
                }
                debug!(path = %device_ref.path, "Reader thread exiting");
            })
            .map_err(|e| Error::Hid(format!("failed to spawn reader thread: {e}")))?;

        Ok(())
    }

    fn close(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        // Releases the device immediately when delivery never started.
        self.device.take();
    }
}

impl Drop for HidApiHandle {
    fn drop(&mut self) {
        self.close();
    }
}
