//! Motion events published to session subscribers.

use crate::report::MotionVector;
use serde::Serialize;

/// An event emitted by the session manager.
///
/// Events are delivered in raw-report arrival order, with no buffering or
/// coalescing. `Connected` always precedes any motion events for a session;
/// `Disconnected` always follows the last report processed for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum MotionEvent {
    /// A device session was opened.
    Connected {
        /// Human-readable product name of the device.
        name: String,
    },
    /// The active session was closed (user request or hardware removal).
    Disconnected,
    /// A translation report was decoded.
    Translation { x: i16, y: i16, z: i16 },
    /// A rotation report was decoded.
    Rotation { rx: i16, ry: i16, rz: i16 },
}

impl From<MotionVector> for MotionEvent {
    fn from(vector: MotionVector) -> Self {
        match vector {
            MotionVector::Translation { x, y, z } => MotionEvent::Translation { x, y, z },
            MotionVector::Rotation { rx, ry, rz } => MotionEvent::Rotation { rx, ry, rz },
        }
    }
}

/// Handle returned by [`SessionManager::subscribe`] for later removal.
///
/// [`SessionManager::subscribe`]: crate::session::SessionManager::subscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(pub(crate) u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn motion_vector_converts_to_event() {
        let event: MotionEvent = MotionVector::Translation { x: 1, y: -2, z: 3 }.into();
        assert_eq!(event, MotionEvent::Translation { x: 1, y: -2, z: 3 });

        let event: MotionEvent = MotionVector::Rotation {
            rx: -4,
            ry: 5,
            rz: -6,
        }
        .into();
        assert_eq!(
            event,
            MotionEvent::Rotation {
                rx: -4,
                ry: 5,
                rz: -6
            }
        );
    }

    #[test]
    fn events_serialize_with_tag() {
        let json = serde_json::to_string(&MotionEvent::Translation { x: 10, y: 0, z: -7 })
            .expect("serialize event");
        assert_eq!(json, r#"{"event":"translation","x":10,"y":0,"z":-7}"#);

        let json = serde_json::to_string(&MotionEvent::Connected {
            name: "SpaceNavigator".into(),
        })
        .expect("serialize event");
        assert_eq!(json, r#"{"event":"connected","name":"SpaceNavigator"}"#);

        let json = serde_json::to_string(&MotionEvent::Disconnected).expect("serialize event");
        assert_eq!(json, r#"{"event":"disconnected"}"#);
    }
}
