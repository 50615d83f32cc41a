//! Device session lifecycle and motion-event dispatch.
//!
//! [`SessionManager`] owns at most one open controller at a time. It reuses
//! already-authorized devices at startup, opens user-selected devices on
//! request, republishes decoded reports as [`MotionEvent`]s to subscribers,
//! and tears the session down on explicit disconnect or hardware removal.

use crate::device::{DeviceFilter, DeviceRef};
use crate::error::Result;
use crate::event::{MotionEvent, SubscriberId};
use crate::report::decode_motion;
use crate::transport::{DeviceHandle, HidBus, ReportSink};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tracing::{debug, info, trace, warn};

/// The single active device session.
struct ActiveSession {
    handle: Box<dyn DeviceHandle>,
    device: DeviceRef,
    product_name: String,
}

struct Subscriber {
    id: u64,
    callback: Box<dyn FnMut(&MotionEvent) + Send>,
}

struct Inner {
    active: Option<ActiveSession>,
    /// Bumped on every close; report sinks carry the generation they were
    /// attached under and drop reports from a superseded session.
    generation: u64,
    subscribers: Vec<Subscriber>,
    next_subscriber_id: u64,
}

/// Manages the connect → streaming → disconnect lifecycle of one controller.
///
/// A long-lived object: construct once, share by reference. Construction
/// registers a removal listener with the bus, so hardware unplugs of the
/// active device are turned into `Disconnected` events automatically.
pub struct SessionManager {
    bus: Arc<dyn HidBus>,
    filter: DeviceFilter,
    inner: Arc<Mutex<Inner>>,
}

impl SessionManager {
    /// Create a manager over the given bus, eligible devices per `filter`.
    pub fn new(bus: Arc<dyn HidBus>, filter: DeviceFilter) -> Self {
        let inner = Arc::new(Mutex::new(Inner {
            active: None,
            generation: 0,
            subscribers: Vec::new(),
            next_subscriber_id: 0,
        }));

        let weak = Arc::downgrade(&inner);
        bus.subscribe_removals(Box::new(move |device| {
            Self::handle_removal(&weak, device);
        }));

        Self { bus, filter, inner }
    }

    /// Open the first already-authorized device, if any.
    ///
    /// Policy: first match wins; no disambiguation at this layer. Returns
    /// whether a device was opened.
    ///
    /// # Errors
    ///
    /// Propagates enumeration failures and [`Error::OpenFailed`] from the
    /// bus. On failure no session is left open.
    ///
    /// [`Error::OpenFailed`]: crate::error::Error::OpenFailed
    pub fn initialize(&self) -> Result<bool> {
        let authorized = self.bus.list_authorized(&self.filter)?;
        let Some(device) = authorized.into_iter().next() else {
            debug!("No authorized device present");
            return Ok(false);
        };

        self.open_device(&device)?;
        Ok(true)
    }

    /// Ask the bus for a user-chosen device and open it.
    ///
    /// The user-intent requirement (a preceding explicit user gesture) is
    /// enforced by the bus. Returns whether a device was opened; a declined
    /// or empty selection changes no state.
    ///
    /// # Errors
    ///
    /// Propagates selection failures and [`Error::OpenFailed`] from the bus.
    ///
    /// [`Error::OpenFailed`]: crate::error::Error::OpenFailed
    pub fn request_scan(&self) -> Result<bool> {
        let Some(device) = self.bus.request_user_selection(&self.filter)? else {
            debug!("Scan returned no device");
            return Ok(false);
        };

        self.open_device(&device)?;
        Ok(true)
    }

    /// Open a specific device, replacing any active session.
    ///
    /// A prior session is fully disconnected first (handle closed,
    /// `Disconnected` emitted) so at most one device is ever active and
    /// subscribers observe `Disconnected` before the new `Connected`.
    /// `Connected` is emitted before report delivery is attached, so it
    /// precedes every motion event of the session.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::OpenFailed`] if the bus cannot open the device;
    /// the manager is left with no active session.
    ///
    /// [`Error::OpenFailed`]: crate::error::Error::OpenFailed
    pub fn open_device(&self, device: &DeviceRef) -> Result<()> {
        let mut inner = lock(&self.inner);

        if inner.active.is_some() {
            disconnect_locked(&mut inner);
        }

        let handle = self.bus.open(device)?;
        let name = handle.product_name().to_string();
        info!(name = %name, path = %device.path, "Device session opened");

        inner.active = Some(ActiveSession {
            handle,
            device: device.clone(),
            product_name: name.clone(),
        });
        emit_locked(&mut inner, &MotionEvent::Connected { name });

        let sink = self.report_sink(inner.generation);
        if let Some(session) = inner.active.as_mut() {
            if let Err(e) = session.handle.start(sink) {
                warn!(error = %e, "Report delivery failed to start");
                disconnect_locked(&mut inner);
                return Err(e);
            }
        }

        Ok(())
    }

    /// Close the active session, if any.
    ///
    /// Idempotent: closing with nothing open is a no-op apart from the
    /// `Disconnected` event, which is emitted unconditionally so subscribers
    /// can reset their view.
    pub fn disconnect(&self) {
        let mut inner = lock(&self.inner);
        disconnect_locked(&mut inner);
    }

    /// Register an event callback; returns a handle for [`unsubscribe`].
    ///
    /// For each event, callbacks run in subscription order; across events,
    /// delivery follows raw-report arrival order with no reordering or
    /// batching. Callbacks are invoked on the delivering thread (the
    /// transport's for motion events, the caller's for connect/disconnect)
    /// while internal state is locked — they must not call back into the
    /// manager.
    ///
    /// [`unsubscribe`]: SessionManager::unsubscribe
    pub fn subscribe(
        &self,
        callback: impl FnMut(&MotionEvent) + Send + 'static,
    ) -> SubscriberId {
        let mut inner = lock(&self.inner);
        let id = inner.next_subscriber_id;
        inner.next_subscriber_id += 1;
        inner.subscribers.push(Subscriber {
            id,
            callback: Box::new(callback),
        });
        SubscriberId(id)
    }

    /// Remove a subscriber. Unknown IDs are ignored.
    pub fn unsubscribe(&self, id: SubscriberId) {
        let mut inner = lock(&self.inner);
        inner.subscribers.retain(|s| s.id != id.0);
    }

    /// Whether a device session is currently open.
    pub fn is_active(&self) -> bool {
        lock(&self.inner).active.is_some()
    }

    /// Product name of the connected device, if any.
    pub fn connected_product(&self) -> Option<String> {
        lock(&self.inner)
            .active
            .as_ref()
            .map(|s| s.product_name.clone())
    }

    /// Sink routing raw reports of one session generation through the
    /// decoder and out to subscribers.
    fn report_sink(&self, generation: u64) -> ReportSink {
        let weak = Arc::downgrade(&self.inner);
        Box::new(move |report_id, payload| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let mut inner = lock(&inner);

            // Late callback from a handle that has since been replaced.
            if inner.generation != generation || inner.active.is_none() {
                trace!(report_id, "Dropping report from superseded session");
                return;
            }

            match decode_motion(report_id, payload) {
                Ok(Some(vector)) => emit_locked(&mut inner, &vector.into()),
                Ok(None) => trace!(report_id, "Ignoring unrecognized report"),
                Err(e) => warn!(report_id, error = %e, "Dropping malformed report"),
            }
        })
    }

    /// Removal listener registered at construction. Only a notification for
    /// the active device tears the session down; unrelated devices are
    /// ignored.
    fn handle_removal(weak: &Weak<Mutex<Inner>>, device: &DeviceRef) {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        let mut inner = lock(&inner);

        let is_active_device = inner
            .active
            .as_ref()
            .is_some_and(|s| s.device == *device);
        if !is_active_device {
            trace!(path = %device.path, "Ignoring removal of inactive device");
            return;
        }

        info!(path = %device.path, "Active device removed");
        disconnect_locked(&mut inner);
    }
}

fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

fn disconnect_locked(inner: &mut MutexGuard<'_, Inner>) {
    if let Some(mut session) = inner.active.take() {
        info!(name = %session.product_name, "Device session closed");
        session.handle.close();
    }
    inner.generation += 1;
    emit_locked(inner, &MotionEvent::Disconnected);
}

fn emit_locked(inner: &mut MutexGuard<'_, Inner>, event: &MotionEvent) {
    for subscriber in inner.subscribers.iter_mut() {
        (subscriber.callback)(event);
    }
}
