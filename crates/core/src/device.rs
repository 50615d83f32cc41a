//! Device identity: known controller models, device references, and filters.

use crate::{pids, CONNEXION_VID, LOGITECH_VID};
use serde::Serialize;

/// Supported 3Dconnexion controller models.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerModel {
    SpaceTraveler,
    SpacePilot,
    SpaceNavigator,
    SpaceExplorer,
    SpaceNavigatorNotebooks,
    SpacePilotPro,
    SpaceMousePro,
    SpaceMouseWireless,
    SpaceMouseWirelessReceiver,
    SpaceMouseProWireless,
    SpaceMouseProWirelessReceiver,
    SpaceMouseEnterprise,
    SpaceMouseCompact,
}

impl ControllerModel {
    /// Look up model from USB vendor/product ID pair.
    pub fn from_ids(vid: u16, pid: u16) -> Option<Self> {
        match (vid, pid) {
            (LOGITECH_VID, pids::SPACE_TRAVELER) => Some(Self::SpaceTraveler),
            (LOGITECH_VID, pids::SPACE_PILOT) => Some(Self::SpacePilot),
            (LOGITECH_VID, pids::SPACE_NAVIGATOR) => Some(Self::SpaceNavigator),
            (LOGITECH_VID, pids::SPACE_EXPLORER) => Some(Self::SpaceExplorer),
            (LOGITECH_VID, pids::SPACE_NAVIGATOR_NOTEBOOKS) => {
                Some(Self::SpaceNavigatorNotebooks)
            }
            (LOGITECH_VID, pids::SPACE_PILOT_PRO) => Some(Self::SpacePilotPro),
            (LOGITECH_VID, pids::SPACE_MOUSE_PRO) => Some(Self::SpaceMousePro),
            (CONNEXION_VID, pids::SPACE_MOUSE_WIRELESS) => Some(Self::SpaceMouseWireless),
            (CONNEXION_VID, pids::SPACE_MOUSE_WIRELESS_RECEIVER) => {
                Some(Self::SpaceMouseWirelessReceiver)
            }
            (CONNEXION_VID, pids::SPACE_MOUSE_PRO_WIRELESS) => Some(Self::SpaceMouseProWireless),
            (CONNEXION_VID, pids::SPACE_MOUSE_PRO_WIRELESS_RECEIVER) => {
                Some(Self::SpaceMouseProWirelessReceiver)
            }
            (CONNEXION_VID, pids::SPACE_MOUSE_ENTERPRISE) => Some(Self::SpaceMouseEnterprise),
            (CONNEXION_VID, pids::SPACE_MOUSE_COMPACT) => Some(Self::SpaceMouseCompact),
            _ => None,
        }
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SpaceTraveler => "3Dconnexion SpaceTraveler",
            Self::SpacePilot => "3Dconnexion SpacePilot",
            Self::SpaceNavigator => "3Dconnexion SpaceNavigator",
            Self::SpaceExplorer => "3Dconnexion SpaceExplorer",
            Self::SpaceNavigatorNotebooks => "3Dconnexion SpaceNavigator for Notebooks",
            Self::SpacePilotPro => "3Dconnexion SpacePilot Pro",
            Self::SpaceMousePro => "3Dconnexion SpaceMouse Pro",
            Self::SpaceMouseWireless => "3Dconnexion SpaceMouse Wireless",
            Self::SpaceMouseWirelessReceiver => "3Dconnexion SpaceMouse Wireless (receiver)",
            Self::SpaceMouseProWireless => "3Dconnexion SpaceMouse Pro Wireless",
            Self::SpaceMouseProWirelessReceiver => {
                "3Dconnexion SpaceMouse Pro Wireless (receiver)"
            }
            Self::SpaceMouseEnterprise => "3Dconnexion SpaceMouse Enterprise",
            Self::SpaceMouseCompact => "3Dconnexion SpaceMouse Compact",
        }
    }

    /// USB vendor/product ID pair.
    pub fn ids(&self) -> (u16, u16) {
        match self {
            Self::SpaceTraveler => (LOGITECH_VID, pids::SPACE_TRAVELER),
            Self::SpacePilot => (LOGITECH_VID, pids::SPACE_PILOT),
            Self::SpaceNavigator => (LOGITECH_VID, pids::SPACE_NAVIGATOR),
            Self::SpaceExplorer => (LOGITECH_VID, pids::SPACE_EXPLORER),
            Self::SpaceNavigatorNotebooks => (LOGITECH_VID, pids::SPACE_NAVIGATOR_NOTEBOOKS),
            Self::SpacePilotPro => (LOGITECH_VID, pids::SPACE_PILOT_PRO),
            Self::SpaceMousePro => (LOGITECH_VID, pids::SPACE_MOUSE_PRO),
            Self::SpaceMouseWireless => (CONNEXION_VID, pids::SPACE_MOUSE_WIRELESS),
            Self::SpaceMouseWirelessReceiver => {
                (CONNEXION_VID, pids::SPACE_MOUSE_WIRELESS_RECEIVER)
            }
            Self::SpaceMouseProWireless => (CONNEXION_VID, pids::SPACE_MOUSE_PRO_WIRELESS),
            Self::SpaceMouseProWirelessReceiver => {
                (CONNEXION_VID, pids::SPACE_MOUSE_PRO_WIRELESS_RECEIVER)
            }
            Self::SpaceMouseEnterprise => (CONNEXION_VID, pids::SPACE_MOUSE_ENTERPRISE),
            Self::SpaceMouseCompact => (CONNEXION_VID, pids::SPACE_MOUSE_COMPACT),
        }
    }

    /// All known models.
    pub const ALL: &'static [ControllerModel] = &[
        ControllerModel::SpaceTraveler,
        ControllerModel::SpacePilot,
        ControllerModel::SpaceNavigator,
        ControllerModel::SpaceExplorer,
        ControllerModel::SpaceNavigatorNotebooks,
        ControllerModel::SpacePilotPro,
        ControllerModel::SpaceMousePro,
        ControllerModel::SpaceMouseWireless,
        ControllerModel::SpaceMouseWirelessReceiver,
        ControllerModel::SpaceMouseProWireless,
        ControllerModel::SpaceMouseProWirelessReceiver,
        ControllerModel::SpaceMouseEnterprise,
        ControllerModel::SpaceMouseCompact,
    ];
}

impl std::fmt::Display for ControllerModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Reference to a discovered controller.
///
/// Equality is structural; the platform `path` distinguishes two units of
/// the same model plugged in simultaneously.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceRef {
    pub vendor_id: u16,
    pub product_id: u16,
    /// Platform device path used to open the device.
    pub path: String,
    pub serial: Option<String>,
}

impl DeviceRef {
    /// Known model for this device, if any.
    pub fn model(&self) -> Option<ControllerModel> {
        ControllerModel::from_ids(self.vendor_id, self.product_id)
    }
}

/// Filter selecting which vendor/product ID pairs are eligible for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceFilter {
    allowed: Vec<(u16, u16)>,
}

impl DeviceFilter {
    /// Filter for an explicit set of vendor/product ID pairs.
    pub fn new(allowed: Vec<(u16, u16)>) -> Self {
        Self { allowed }
    }

    /// Filter for a single vendor/product ID pair.
    pub fn single(vid: u16, pid: u16) -> Self {
        Self {
            allowed: vec![(vid, pid)],
        }
    }

    /// Whether a vendor/product ID pair is eligible.
    pub fn matches(&self, vid: u16, pid: u16) -> bool {
        self.allowed.contains(&(vid, pid))
    }

    /// Whether a discovered device is eligible.
    pub fn matches_device(&self, device: &DeviceRef) -> bool {
        self.matches(device.vendor_id, device.product_id)
    }
}

impl Default for DeviceFilter {
    /// All known 3Dconnexion controller models.
    fn default() -> Self {
        Self {
            allowed: ControllerModel::ALL.iter().map(|m| m.ids()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_from_known_ids() {
        assert_eq!(
            ControllerModel::from_ids(0x046D, 0xC626),
            Some(ControllerModel::SpaceNavigator)
        );
        assert_eq!(
            ControllerModel::from_ids(0x256F, 0xC635),
            Some(ControllerModel::SpaceMouseCompact)
        );
    }

    #[test]
    fn model_from_unknown_ids() {
        assert_eq!(ControllerModel::from_ids(0x046D, 0x1234), None);
        // SpaceNavigator PID under the wrong vendor ID
        assert_eq!(ControllerModel::from_ids(0x256F, 0xC626), None);
    }

    #[test]
    fn model_ids_roundtrip() {
        for model in ControllerModel::ALL {
            let (vid, pid) = model.ids();
            assert_eq!(ControllerModel::from_ids(vid, pid), Some(*model));
        }
    }

    #[test]
    fn model_names_non_empty() {
        for model in ControllerModel::ALL {
            assert!(!model.name().is_empty());
        }
    }

    #[test]
    fn default_filter_accepts_all_known_models() {
        let filter = DeviceFilter::default();
        for model in ControllerModel::ALL {
            let (vid, pid) = model.ids();
            assert!(filter.matches(vid, pid));
        }
    }

    #[test]
    fn default_filter_rejects_unknown_device() {
        let filter = DeviceFilter::default();
        assert!(!filter.matches(0x046D, 0xC08D)); // a Logitech mouse
        assert!(!filter.matches(0xDEAD, 0xBEEF));
    }

    #[test]
    fn single_filter_matches_only_its_pair() {
        let filter = DeviceFilter::single(0x046D, 0xC626);
        assert!(filter.matches(0x046D, 0xC626));
        assert!(!filter.matches(0x046D, 0xC627));
        assert!(!filter.matches(0x256F, 0xC626));
    }

    #[test]
    fn device_ref_model_lookup() {
        let device = DeviceRef {
            vendor_id: 0x046D,
            product_id: 0xC626,
            path: "/dev/hidraw3".into(),
            serial: None,
        };
        assert_eq!(device.model(), Some(ControllerModel::SpaceNavigator));
        assert!(DeviceFilter::default().matches_device(&device));
    }

    #[test]
    fn device_refs_distinguished_by_path() {
        let a = DeviceRef {
            vendor_id: 0x046D,
            product_id: 0xC626,
            path: "/dev/hidraw3".into(),
            serial: None,
        };
        let mut b = a.clone();
        assert_eq!(a, b);
        b.path = "/dev/hidraw4".into();
        assert_ne!(a, b);
    }
}
