use alloc::{vec, vec::Vec};
use serde::{Deserialize, Serialize};

use crate::constants::{TAPE_FOOTER_SIZE, TAPE_HEADER_SIZE, TAPE_MAGIC, TAPE_VERSION};
use crate::error::VerifyError;
use crate::types::Event;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TapeHeader {
    pub magic: u32,
    pub version: u8,
    pub seed: u32,
    pub event_count: u32,
}

/// Final state claimed by whoever recorded the tape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TapeFooter {
    pub final_length: u32,
    pub final_ticks: u32,
    pub final_rng_state: u32,
    pub checksum: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tape {
    pub header: TapeHeader,
    pub events: Vec<Event>,
    pub footer: TapeFooter,
}

pub fn parse_tape(bytes: &[u8], max_events: u32) -> Result<Tape, VerifyError> {
    let min_len = TAPE_HEADER_SIZE + TAPE_FOOTER_SIZE;
    if bytes.len() < min_len {
        return Err(VerifyError::TapeTooShort {
            actual: bytes.len(),
            min: min_len,
        });
    }

    let magic = read_u32_le(bytes, 0);
    if magic != TAPE_MAGIC {
        return Err(VerifyError::InvalidMagic { found: magic });
    }

    let version = bytes[4];
    if version != TAPE_VERSION {
        return Err(VerifyError::UnsupportedVersion { found: version });
    }
    if bytes[5..8].iter().any(|&b| b != 0) {
        return Err(VerifyError::HeaderReservedNonZero);
    }

    let seed = read_u32_le(bytes, 8);
    let event_count = read_u32_le(bytes, 12);
    if event_count == 0 || event_count > max_events {
        return Err(VerifyError::EventCountOutOfRange {
            event_count,
            max_events,
        });
    }

    let expected_len = TAPE_HEADER_SIZE + event_count as usize + TAPE_FOOTER_SIZE;
    if bytes.len() != expected_len {
        return Err(VerifyError::TapeLengthMismatch {
            expected: expected_len,
            actual: bytes.len(),
        });
    }

    let body_start = TAPE_HEADER_SIZE;
    let body_end = body_start + event_count as usize;
    let events = decode_events(&bytes[body_start..body_end])?;

    let checksum = read_u32_le(bytes, body_end + 12);
    let computed = crc32(&bytes[..body_end]);
    if checksum != computed {
        return Err(VerifyError::CrcMismatch {
            stored: checksum,
            computed,
        });
    }

    Ok(Tape {
        header: TapeHeader {
            magic,
            version,
            seed,
            event_count,
        },
        events,
        footer: TapeFooter {
            final_length: read_u32_le(bytes, body_end),
            final_ticks: read_u32_le(bytes, body_end + 4),
            final_rng_state: read_u32_le(bytes, body_end + 8),
            checksum,
        },
    })
}

pub fn serialize_tape(
    seed: u32,
    events: &[Event],
    final_length: u32,
    final_ticks: u32,
    final_rng_state: u32,
) -> Vec<u8> {
    let total_len = TAPE_HEADER_SIZE + events.len() + TAPE_FOOTER_SIZE;
    let mut data = vec![0u8; total_len];

    write_u32_le(&mut data, 0, TAPE_MAGIC);
    data[4] = TAPE_VERSION;
    write_u32_le(&mut data, 8, seed);
    write_u32_le(&mut data, 12, events.len() as u32);

    let body_start = TAPE_HEADER_SIZE;
    let body_end = body_start + events.len();
    for (slot, event) in data[body_start..body_end].iter_mut().zip(events) {
        *slot = event.code();
    }

    write_u32_le(&mut data, body_end, final_length);
    write_u32_le(&mut data, body_end + 4, final_ticks);
    write_u32_le(&mut data, body_end + 8, final_rng_state);

    let checksum = crc32(&data[..body_end]);
    write_u32_le(&mut data, body_end + 12, checksum);

    data
}

pub fn decode_events(body: &[u8]) -> Result<Vec<Event>, VerifyError> {
    body.iter()
        .enumerate()
        .map(|(index, &byte)| {
            Event::from_code(byte).ok_or(VerifyError::UnknownEventCode {
                index: index as u32,
                byte,
            })
        })
        .collect()
}

#[inline]
fn read_u32_le(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

#[inline]
fn write_u32_le(bytes: &mut [u8], offset: usize, value: u32) {
    bytes[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

const CRC_TABLE: [u32; 256] = build_crc_table();

const fn build_crc_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut i = 0;

    while i < 256 {
        let mut c = i as u32;
        let mut j = 0;
        while j < 8 {
            c = if c & 1 != 0 {
                0xEDB8_8320 ^ (c >> 1)
            } else {
                c >> 1
            };
            j += 1;
        }
        table[i] = c;
        i += 1;
    }

    table
}

/// CRC-32 (ISO 3309, reflected, poly 0xEDB88320).
pub fn crc32(data: &[u8]) -> u32 {
    !data.iter().fold(0xFFFF_FFFFu32, |crc, &byte| {
        CRC_TABLE[((crc ^ byte as u32) & 0xFF) as usize] ^ (crc >> 8)
    })
}
