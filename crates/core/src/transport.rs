//! Transport abstraction for device access.
//!
//! Provides trait seams between the session manager and the host HID stack
//! so that real devices and mock devices share the same interface: a bus
//! (enumeration, user selection, open, removal notifications) and a handle
//! (report delivery, product name, close).

use crate::device::{DeviceFilter, DeviceRef};
use crate::error::Result;

/// Callback receiving raw input reports: report ID plus payload bytes.
pub type ReportSink = Box<dyn Fn(u8, &[u8]) + Send + Sync>;

/// Callback receiving hardware-removal notifications for any device on the
/// bus, matching or not. Receivers filter by identity themselves.
pub type RemovalSink = Box<dyn Fn(&DeviceRef) + Send + Sync>;

/// Host HID stack: enumeration, selection, open, and removal notifications.
pub trait HidBus: Send + Sync {
    /// Devices matching the filter that the process is already authorized
    /// to open, in enumeration order. May be empty.
    fn list_authorized(&self, filter: &DeviceFilter) -> Result<Vec<DeviceRef>>;

    /// Ask the host for a user-chosen device matching the filter.
    ///
    /// Returns at most one device. The user-intent boundary (an explicit
    /// user gesture preceding the call) is enforced here, not by callers.
    fn request_user_selection(&self, filter: &DeviceFilter) -> Result<Option<DeviceRef>>;

    /// Open a device for report streaming.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::OpenFailed`] on permission or hardware error,
    /// including the device disappearing between selection and open.
    ///
    /// [`Error::OpenFailed`]: crate::error::Error::OpenFailed
    fn open(&self, device: &DeviceRef) -> Result<Box<dyn DeviceHandle>>;

    /// Register a process-wide removal listener. Fires for every detached
    /// device on the bus; sinks live for the lifetime of the bus.
    fn subscribe_removals(&self, sink: RemovalSink);
}

/// An open device.
pub trait DeviceHandle: Send {
    /// Human-readable product name, read at open time.
    fn product_name(&self) -> &str;

    /// Attach the report callback and begin delivery.
    ///
    /// Reports are delivered one at a time from a single delivery context;
    /// no report for this handle is delivered before `start` returns.
    fn start(&mut self, sink: ReportSink) -> Result<()>;

    /// Stop delivery and release the device. Idempotent; a double close is
    /// a no-op and surfaces no error.
    fn close(&mut self);
}
