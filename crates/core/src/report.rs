//! Decoding of 6DoF input reports.
//!
//! SpaceMouse-family controllers alternate between two fixed-layout input
//! reports, each carrying three little-endian signed 16-bit words:
//! - Report ID 1: translation (x, y, z)
//! - Report ID 2: rotation (rx, ry, rz)
//!
//! Rotation reports invert the sign of the first two axes: the devices
//! report rx/ry with the opposite sense from the translation axes, and every
//! known driver flips them back. This asymmetry is a protocol constant of
//! the device family — do not "fix" it.
//!
//! Protocol reference: spacenavd (GPL, protocol knowledge only) and USB
//! captures of SpaceNavigator / SpaceMouse Compact traffic.

use crate::error::{Error, Result};

/// Report ID for translation reports.
pub const TRANSLATION_REPORT_ID: u8 = 1;
/// Report ID for rotation reports.
pub const ROTATION_REPORT_ID: u8 = 2;
/// Motion report payload length (three i16 words, excluding the report ID).
pub const MOTION_PAYLOAD_LEN: usize = 6;

/// A decoded 3-axis motion sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionVector {
    /// Linear displacement along the x/y/z axes.
    Translation { x: i16, y: i16, z: i16 },
    /// Angular displacement around the x/y/z axes.
    Rotation { rx: i16, ry: i16, rz: i16 },
}

/// Decode a raw input report into a motion vector.
///
/// Returns `Ok(None)` for report IDs outside the motion protocol — the
/// devices emit vendor and diagnostic reports (buttons, LEDs) that callers
/// must silently ignore.
///
/// # Errors
///
/// Returns [`Error::MalformedReport`] when the payload is not exactly
/// [`MOTION_PAYLOAD_LEN`] bytes, regardless of report ID. A malformed report
/// never tears down a session; callers log it and drop the report.
pub fn decode_motion(report_id: u8, payload: &[u8]) -> Result<Option<MotionVector>> {
    if payload.len() != MOTION_PAYLOAD_LEN {
        return Err(Error::MalformedReport {
            expected: MOTION_PAYLOAD_LEN,
            actual: payload.len(),
        });
    }

    let w0 = i16::from_le_bytes([payload[0], payload[1]]);
    let w1 = i16::from_le_bytes([payload[2], payload[3]]);
    let w2 = i16::from_le_bytes([payload[4], payload[5]]);

    match report_id {
        TRANSLATION_REPORT_ID => Ok(Some(MotionVector::Translation {
            x: w0,
            y: w1,
            z: w2,
        })),
        // wrapping_neg: a full-scale i16::MIN word stays i16::MIN instead of
        // panicking; real devices never reach full scale.
        ROTATION_REPORT_ID => Ok(Some(MotionVector::Rotation {
            rx: w0.wrapping_neg(),
            ry: w1.wrapping_neg(),
            rz: w2,
        })),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words_to_payload(w0: i16, w1: i16, w2: i16) -> [u8; 6] {
        let [b0, b1] = w0.to_le_bytes();
        let [b2, b3] = w1.to_le_bytes();
        let [b4, b5] = w2.to_le_bytes();
        [b0, b1, b2, b3, b4, b5]
    }

    #[test]
    fn translation_words_taken_verbatim() {
        let payload = words_to_payload(33, -18, 132);
        let decoded = decode_motion(TRANSLATION_REPORT_ID, &payload).unwrap();
        assert_eq!(
            decoded,
            Some(MotionVector::Translation {
                x: 33,
                y: -18,
                z: 132
            })
        );
    }

    #[test]
    fn translation_from_raw_bytes() {
        // Bytes [101, -1, -2, -1, 95, 0] pair into LE words (-155, -2, 95).
        let payload = [101u8, 0xFF, 0xFE, 0xFF, 95, 0];
        let decoded = decode_motion(TRANSLATION_REPORT_ID, &payload).unwrap();
        assert_eq!(
            decoded,
            Some(MotionVector::Translation {
                x: -155,
                y: -2,
                z: 95
            })
        );
    }

    #[test]
    fn rotation_inverts_first_two_axes() {
        let payload = words_to_payload(-230, 67, 0);
        let decoded = decode_motion(ROTATION_REPORT_ID, &payload).unwrap();
        assert_eq!(
            decoded,
            Some(MotionVector::Rotation {
                rx: 230,
                ry: -67,
                rz: 0
            })
        );
    }

    #[test]
    fn rotation_third_axis_not_inverted() {
        let payload = words_to_payload(0, 0, -41);
        let decoded = decode_motion(ROTATION_REPORT_ID, &payload).unwrap();
        assert_eq!(
            decoded,
            Some(MotionVector::Rotation {
                rx: 0,
                ry: 0,
                rz: -41
            })
        );
    }

    #[test]
    fn rotation_handles_full_scale_words() {
        let payload = words_to_payload(i16::MIN, i16::MAX, i16::MIN);
        let decoded = decode_motion(ROTATION_REPORT_ID, &payload).unwrap();
        assert_eq!(
            decoded,
            Some(MotionVector::Rotation {
                rx: i16::MIN, // wrapping: -(-32768) has no i16 representation
                ry: -i16::MAX,
                rz: i16::MIN
            })
        );
    }

    #[test]
    fn unrecognized_report_id_is_not_an_error() {
        let payload = words_to_payload(1, 2, 3);
        assert_eq!(decode_motion(0, &payload).unwrap(), None);
        assert_eq!(decode_motion(3, &payload).unwrap(), None);
        assert_eq!(decode_motion(0x17, &payload).unwrap(), None);
        assert_eq!(decode_motion(0xFF, &payload).unwrap(), None);
    }

    #[test]
    fn short_payload_rejected() {
        let result = decode_motion(TRANSLATION_REPORT_ID, &[1, 2, 3, 4, 5]);
        assert!(matches!(
            result,
            Err(Error::MalformedReport {
                expected: 6,
                actual: 5
            })
        ));
    }

    #[test]
    fn long_payload_rejected() {
        let result = decode_motion(ROTATION_REPORT_ID, &[0; 7]);
        assert!(matches!(
            result,
            Err(Error::MalformedReport {
                expected: 6,
                actual: 7
            })
        ));
    }

    #[test]
    fn empty_payload_rejected_for_any_report_id() {
        for id in [0u8, 1, 2, 0xFF] {
            assert!(decode_motion(id, &[]).is_err());
        }
    }

    #[test]
    fn zero_payload_decodes_to_zero_vector() {
        let decoded = decode_motion(TRANSLATION_REPORT_ID, &[0; 6]).unwrap();
        assert_eq!(
            decoded,
            Some(MotionVector::Translation { x: 0, y: 0, z: 0 })
        );
    }
}
