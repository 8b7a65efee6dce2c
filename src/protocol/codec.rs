//! Frame codec (payload encoding, framing, checksum)

use bytes::{BufMut, BytesMut};
use tracing::trace;

use super::layout::Reject;
use super::{
    CHECKSUM_SIZE, Error, FRAME_OVERHEAD, FieldValue, Fields, FrameHeader, HEADER_SIZE, MAGIC,
    Message, MessageKind, Result,
};

/// Additive rolling checksum: `seed` plus every byte, wrapping at 65536.
///
/// This is not the X.25 CRC of the real protocol; existing consumers of the
/// simulator validate frames with exactly this sum.
#[must_use]
pub fn checksum(seed: u16, covered: &[u8]) -> u16 {
    covered
        .iter()
        .fold(seed, |acc, &byte| acc.wrapping_add(u16::from(byte)))
}

/// Encode the payload for `kind` from named field values
///
/// The buffer is zero-filled to the kind's fixed length, then every layout
/// field is written at its offset.
///
/// # Errors
///
/// Returns an error if:
/// - A layout field is missing from `fields`
/// - `fields` names a field the layout does not have
/// - A value does not fit its slot
/// - A float is supplied for an integer slot
pub fn encode_payload(kind: MessageKind, fields: &Fields) -> Result<BytesMut> {
    if let Some((name, _)) = fields.iter().find(|(name, _)| kind.field(name).is_none()) {
        return Err(Error::UnknownField {
            kind,
            field: name.to_owned(),
        });
    }

    let mut payload = BytesMut::zeroed(kind.payload_len());
    for spec in kind.fields() {
        let value = fields.get(spec.name).ok_or(Error::MissingField {
            kind,
            field: spec.name,
        })?;
        spec.ty
            .write(&mut payload[spec.range()], value)
            .map_err(|reject| field_error(kind, spec.name, spec.ty, value, reject))?;
    }

    Ok(payload)
}

fn field_error(
    kind: MessageKind,
    field: &'static str,
    ty: super::FieldType,
    value: FieldValue,
    reject: Reject,
) -> Error {
    match reject {
        Reject::OutOfRange => Error::FieldOutOfRange {
            kind,
            field,
            ty,
            value,
        },
        Reject::TypeMismatch => Error::FieldTypeMismatch {
            kind,
            field,
            ty,
            value,
        },
    }
}

/// Frame a payload
///
/// # Format
///
/// ```text
/// [HEADER (6 bytes)] [PAYLOAD (fixed per kind)] [CHECKSUM (2 bytes)]
/// ```
///
/// The checksum covers header bytes 1..6 and the payload.
#[must_use]
pub fn encode_frame(header: FrameHeader, payload: &[u8]) -> Message {
    debug_assert_eq!(payload.len(), header.kind().payload_len());

    let mut bytes = BytesMut::with_capacity(FRAME_OVERHEAD + payload.len());
    bytes.put_slice(&header.to_bytes());
    bytes.put_slice(payload);

    let sum = checksum(header.kind().checksum_seed(), &bytes[1..]);
    bytes.put_u16_le(sum);

    trace!(
        kind = %header.kind(),
        seq = header.sequence(),
        len = bytes.len(),
        checksum = sum,
        "framed message"
    );

    Message::from_parts(header, bytes.freeze())
}

/// Check that `bytes` is one well-formed frame and return its kind
///
/// This is a self-check for frames this crate produced (tests, capture
/// tooling); it does not decode payload fields.
///
/// # Errors
///
/// Returns an error if:
/// - Buffer is shorter than the framing overhead
/// - Start marker is not `0xFE`
/// - Message kind is unknown
/// - Length byte or buffer length disagree with the kind's layout
/// - Checksum doesn't match
pub fn verify(bytes: &[u8]) -> Result<MessageKind> {
    if bytes.len() < FRAME_OVERHEAD {
        return Err(Error::BufferTooSmall {
            needed: FRAME_OVERHEAD,
            got: bytes.len(),
        });
    }

    if bytes[0] != MAGIC {
        return Err(Error::InvalidMagic { found: bytes[0] });
    }

    let kind = MessageKind::try_from(bytes[5])?;
    let declared = usize::from(bytes[1]);
    if declared != kind.payload_len() {
        return Err(Error::LengthMismatch {
            kind,
            expected: kind.payload_len(),
            found: declared,
        });
    }
    if bytes.len() != kind.frame_len() {
        return Err(Error::LengthMismatch {
            kind,
            expected: kind.payload_len(),
            found: bytes.len().saturating_sub(FRAME_OVERHEAD),
        });
    }

    let checksum_offset = HEADER_SIZE + declared;
    let stored = u16::from_le_bytes([bytes[checksum_offset], bytes[checksum_offset + 1]]);
    let calculated = checksum(kind.checksum_seed(), &bytes[1..checksum_offset]);
    debug_assert_eq!(checksum_offset + CHECKSUM_SIZE, bytes.len());

    if stored != calculated {
        return Err(Error::ChecksumMismatch {
            expected: calculated,
            found: stored,
        });
    }

    Ok(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heartbeat_fields() -> Fields {
        Fields::new()
            .with("custom_mode", 2u32)
            .with("type", 2u8)
            .with("autopilot", 3u8)
            .with("base_mode", 81u8)
            .with("system_status", 4u8)
            .with("mavlink_version", 3u8)
    }

    #[test]
    fn test_checksum_wraps() {
        assert_eq!(checksum(0xFFFF, &[1]), 0);
        assert_eq!(checksum(50, &[]), 50);
        assert_eq!(checksum(10, &[0xFF; 300]), (10 + 255 * 300) as u16);
    }

    #[test]
    fn test_checksum_wraps_over_many_bytes() {
        let data = vec![0xFFu8; 1_000];
        let expected = ((124u32 + 255 * 1_000) % 65_536) as u16;
        assert_eq!(checksum(124, &data), expected);
    }

    #[test]
    fn test_heartbeat_frame_bytes() {
        let payload = encode_payload(MessageKind::Heartbeat, &heartbeat_fields()).unwrap();
        let message = encode_frame(FrameHeader::new(MessageKind::Heartbeat, 0, 1, 1), &payload);

        let body = [
            0xFE, 0x09, 0x00, 0x01, 0x01, 0x00, 0x02, 0x00, 0x00, 0x00, 0x02, 0x03, 0x51, 0x04,
            0x03,
        ];
        let sum: u16 = 50 + body[1..].iter().map(|&b| u16::from(b)).sum::<u16>();

        assert_eq!(&message.as_bytes()[..15], &body);
        assert_eq!(&message.as_bytes()[15..], &sum.to_le_bytes());
        assert_eq!(message.checksum(), sum);
    }

    #[test]
    fn test_missing_field() {
        let mut fields = heartbeat_fields();
        fields.remove("base_mode");
        let result = encode_payload(MessageKind::Heartbeat, &fields);
        assert_eq!(
            result,
            Err(Error::MissingField {
                kind: MessageKind::Heartbeat,
                field: "base_mode"
            })
        );
    }

    #[test]
    fn test_unknown_field() {
        let fields = heartbeat_fields().with("armed", 1u8);
        let result = encode_payload(MessageKind::Heartbeat, &fields);
        assert!(matches!(result, Err(Error::UnknownField { ref field, .. }) if field == "armed"));
    }

    #[test]
    fn test_out_of_range_field() {
        let fields = heartbeat_fields().with("base_mode", 256u16);
        let err = encode_payload(MessageKind::Heartbeat, &fields).unwrap_err();
        assert!(matches!(
            err,
            Error::FieldOutOfRange {
                field: "base_mode",
                ..
            }
        ));
        assert!(err.is_field_error());
    }

    #[test]
    fn test_verify_accepts_own_frames() {
        let payload = encode_payload(MessageKind::Heartbeat, &heartbeat_fields()).unwrap();
        let message = encode_frame(FrameHeader::new(MessageKind::Heartbeat, 9, 1, 1), &payload);
        assert_eq!(verify(message.as_bytes()), Ok(MessageKind::Heartbeat));
    }

    #[test]
    fn test_verify_checksum_mismatch() {
        let payload = encode_payload(MessageKind::Heartbeat, &heartbeat_fields()).unwrap();
        let message = encode_frame(FrameHeader::new(MessageKind::Heartbeat, 9, 1, 1), &payload);
        let mut bytes = message.as_bytes().to_vec();
        let len = bytes.len();
        bytes[len - 1] ^= 0xFF;
        assert!(matches!(verify(&bytes), Err(Error::ChecksumMismatch { .. })));
    }

    #[test]
    fn test_verify_rejects_bad_marker_and_short_buffer() {
        assert!(matches!(
            verify(&[0u8; 4]),
            Err(Error::BufferTooSmall { needed: 8, got: 4 })
        ));

        let mut bytes = vec![0u8; 17];
        bytes[0] = 0x55;
        assert!(matches!(
            verify(&bytes),
            Err(Error::InvalidMagic { found: 0x55 })
        ));
    }

    #[test]
    fn test_verify_rejects_length_mismatch() {
        let payload = encode_payload(MessageKind::Heartbeat, &heartbeat_fields()).unwrap();
        let message = encode_frame(FrameHeader::new(MessageKind::Heartbeat, 0, 1, 1), &payload);
        let mut bytes = message.as_bytes().to_vec();
        bytes.push(0);
        assert!(matches!(verify(&bytes), Err(Error::LengthMismatch { .. })));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: any in-range battery values frame with a valid checksum
            #[test]
            fn prop_system_status_checksum_verifies(
                voltage in any::<u16>(),
                current in any::<i16>(),
                remaining in any::<i8>(),
                sequence in any::<u8>(),
            ) {
                let fields = Fields::new()
                    .with("voltage_battery", voltage)
                    .with("current_battery", current)
                    .with("battery_remaining", remaining);
                let payload = encode_payload(MessageKind::SystemStatus, &fields).unwrap();
                let message = encode_frame(
                    FrameHeader::new(MessageKind::SystemStatus, sequence, 1, 1),
                    &payload,
                );

                prop_assert_eq!(verify(message.as_bytes()), Ok(MessageKind::SystemStatus));
                prop_assert_eq!(&payload[14..16], &voltage.to_le_bytes());
                prop_assert_eq!(&payload[16..18], &current.to_le_bytes());
                prop_assert_eq!(payload[21], remaining.to_le_bytes()[0]);
            }

            /// Property: unsigned 16-bit slots refuse every value outside [0, 65535]
            #[test]
            fn prop_u16_slot_rejects_out_of_range(
                value in prop_oneof![i64::MIN..0i64, 65_536i64..=i64::MAX],
            ) {
                let fields = Fields::new()
                    .with("voltage_battery", value)
                    .with("current_battery", 0i16)
                    .with("battery_remaining", 0i8);
                let result = encode_payload(MessageKind::SystemStatus, &fields);
                let is_out_of_range = matches!(result, Err(Error::FieldOutOfRange { .. }));
                prop_assert!(is_out_of_range);
            }

            /// Property: flipping any covered byte breaks the checksum
            #[test]
            fn prop_corruption_detected(
                offset in 1usize..15,
                flip in 1u8..=255,
            ) {
                let payload = encode_payload(MessageKind::Heartbeat, &heartbeat_fields()).unwrap();
                let message = encode_frame(FrameHeader::new(MessageKind::Heartbeat, 0, 1, 1), &payload);
                let mut bytes = message.as_bytes().to_vec();
                bytes[offset] ^= flip;

                prop_assert!(verify(&bytes).is_err());
            }
        }
    }
}
