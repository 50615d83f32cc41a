//! open-space-hub-core: 6DoF report decoding, device discovery, and session management.
//!
//! This crate provides the cross-platform core logic for driving 3Dconnexion
//! SpaceMouse-family controllers over USB HID: decoding their translation and
//! rotation input reports and managing the single-device session lifecycle.

pub mod device;
pub mod error;
pub mod event;
pub mod hid;
pub mod report;
pub mod session;
pub mod transport;

/// Logitech USB Vendor ID — classic 3Dconnexion controllers enumerate under it.
pub const LOGITECH_VID: u16 = 0x046D;

/// 3Dconnexion USB Vendor ID used by newer controllers.
pub const CONNEXION_VID: u16 = 0x256F;

/// Known 3Dconnexion product IDs.
pub mod pids {
    /// SpaceTraveler (Logitech VID).
    pub const SPACE_TRAVELER: u16 = 0xC623;
    /// SpacePilot (Logitech VID).
    pub const SPACE_PILOT: u16 = 0xC625;
    /// SpaceNavigator (Logitech VID).
    pub const SPACE_NAVIGATOR: u16 = 0xC626;
    /// SpaceExplorer (Logitech VID).
    pub const SPACE_EXPLORER: u16 = 0xC627;
    /// SpaceNavigator for Notebooks (Logitech VID).
    pub const SPACE_NAVIGATOR_NOTEBOOKS: u16 = 0xC628;
    /// SpacePilot Pro (Logitech VID).
    pub const SPACE_PILOT_PRO: u16 = 0xC629;
    /// SpaceMouse Pro (Logitech VID).
    pub const SPACE_MOUSE_PRO: u16 = 0xC62B;
    /// SpaceMouse Wireless, cabled (3Dconnexion VID).
    pub const SPACE_MOUSE_WIRELESS: u16 = 0xC62E;
    /// SpaceMouse Wireless via universal receiver (3Dconnexion VID).
    pub const SPACE_MOUSE_WIRELESS_RECEIVER: u16 = 0xC62F;
    /// SpaceMouse Pro Wireless, cabled (3Dconnexion VID).
    pub const SPACE_MOUSE_PRO_WIRELESS: u16 = 0xC631;
    /// SpaceMouse Pro Wireless via universal receiver (3Dconnexion VID).
    pub const SPACE_MOUSE_PRO_WIRELESS_RECEIVER: u16 = 0xC632;
    /// SpaceMouse Enterprise (3Dconnexion VID).
    pub const SPACE_MOUSE_ENTERPRISE: u16 = 0xC633;
    /// SpaceMouse Compact (3Dconnexion VID).
    pub const SPACE_MOUSE_COMPACT: u16 = 0xC635;
}
