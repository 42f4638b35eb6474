//! Reading Tile World solution (`.tws`) replay files: a header naming the
//! ruleset and last-visited level, followed by one record per recorded
//! level attempt, each carrying an encoded move stream.

use crate::binary::BinaryReader;
use crate::error::{Error, Result};
use serde::Serialize;

const SIGNATURE: u32 = 0x999B_3335;

/// One decoded input: the tick it lands on, the direction pressed, the raw
/// bytes it was packed from (most-significant byte first, as stored), and
/// which of the four wire formats produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TwsMove {
    pub tick: i64,
    pub direction: u16,
    pub bytes: Vec<u8>,
    pub format: MoveFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MoveFormat {
    Format1OneByte,
    Format1TwoBytes,
    Format2FourBytes,
    Format3OneByte,
    Format4VariableBytes,
}

impl MoveFormat {
    fn tally_key(&self) -> &'static str {
        match self {
            MoveFormat::Format1OneByte => "format_1_one_byte",
            MoveFormat::Format1TwoBytes => "format_1_two_bytes",
            MoveFormat::Format2FourBytes => "format_2_four_bytes",
            MoveFormat::Format3OneByte => "format_3_one_byte",
            MoveFormat::Format4VariableBytes => "format_4_variable_bytes",
        }
    }
}

/// One level's recorded attempt: the level number and password it was
/// played under, plus the timing/RNG metadata and decoded moves of an
/// extended record. A bare 6-byte record (no solution attached) carries no
/// usable attempt data and is not stored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TwsReplay {
    pub level_number: u16,
    pub level_password: String,
    pub step_flag: Option<u8>,
    pub slide_direction_and_stepping: Option<u8>,
    pub rng_value: Option<u32>,
    pub time_in_ticks: Option<i32>,
    pub moves: Vec<TwsMove>,
}

/// A parsed `.tws` file: which ruleset it was recorded against, which
/// level was last open in the editor, the optional levelset name, and one
/// [`TwsReplay`] per recorded level.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TwsReplaySet {
    pub ruleset: String,
    pub last_visited_level: u8,
    pub levelset_name: Option<String>,
    pub replays: Vec<TwsReplay>,
    pub format_tally: std::collections::HashMap<String, usize>,
}

pub fn parse(bytes: &[u8]) -> Result<TwsReplaySet> {
    let mut r = BinaryReader::new(bytes);

    let signature = r.u32()?;
    if signature != SIGNATURE {
        return Err(Error::InvalidSignature(signature));
    }

    let ruleset_code = r.u16()?;
    let ruleset = match ruleset_code {
        1 => "Lynx".to_string(),
        2 => "MS".to_string(),
        _ => "Unknown".to_string(),
    };

    let last_visited_level = r.u8()?;
    let remainder_count = r.i8()?;
    if remainder_count > 0 {
        r.seek_relative(remainder_count as i64);
    }

    let mut set = TwsReplaySet {
        ruleset,
        last_visited_level,
        ..TwsReplaySet::default()
    };

    let mut first_record = true;
    while r.remaining() >= 4 {
        let record_size = r.i32()?;

        if first_record && r.remaining() >= 6 && r.raw()[r.position()..r.position() + 6].iter().all(|&b| b == 0) {
            r.seek_relative(16);
            set.levelset_name = Some(r.text_nul_terminated()?);
            first_record = false;
            continue;
        }
        first_record = false;

        if record_size < 6 {
            break;
        }

        let level_number = r.u16()?;
        let level_password = r.text(4)?;

        if record_size > 6 {
            let mut replay = TwsReplay {
                level_number,
                level_password,
                ..TwsReplay::default()
            };

            let flag = r.u8()?;
            let slide_direction_and_stepping = r.u8()?;
            let rng_value = r.u32()?;
            let time_in_ticks = r.i32()?;
            replay.step_flag = Some(flag);
            replay.slide_direction_and_stepping = Some(slide_direction_and_stepping);
            replay.rng_value = Some(rng_value);
            replay.time_in_ticks = Some(time_in_ticks);

            let move_bytes_len = (record_size as i64 - 16).max(0) as usize;
            let move_bytes = r.bytes(move_bytes_len)?;
            replay.moves = decode_moves(&move_bytes, &mut set.format_tally);

            set.replays.push(replay);
        }
    }

    Ok(set)
}

/// Decodes a packed move stream. Dispatch is on the low bits of each
/// leading byte; four distinct wire formats share the stream, each
/// advancing `absolute_time` by however many ticks that move covers.
fn decode_moves(bytes: &[u8], tally: &mut std::collections::HashMap<String, usize>) -> Vec<TwsMove> {
    let mut moves = Vec::new();
    let mut absolute_time: i64 = 0;
    let mut i = 0usize;

    while i < bytes.len() {
        let b1 = bytes[i];

        if b1 & 0b11 == 1 {
            let time = (b1 >> 5) & 0b111;
            let direction = ((b1 >> 2) & 0b111) as u16;
            absolute_time += time as i64 + 1;
            moves.push(TwsMove {
                tick: absolute_time,
                direction,
                bytes: vec![b1],
                format: MoveFormat::Format1OneByte,
            });
            i += 1;
        } else if b1 & 0b11 == 2 {
            if i + 1 >= bytes.len() {
                break;
            }
            let b2 = bytes[i + 1];
            let time = ((b2 as u16) << 3) | (((b1 >> 5) & 0b111) as u16);
            let direction = ((b1 >> 2) & 0b111) as u16;
            absolute_time += time as i64 + 1;
            moves.push(TwsMove {
                tick: absolute_time,
                direction,
                bytes: vec![b2, b1],
                format: MoveFormat::Format1TwoBytes,
            });
            i += 2;
        } else if b1 & 0b1_0011 == 3 {
            if i + 3 >= bytes.len() {
                break;
            }
            let b2 = bytes[i + 1];
            let b3 = bytes[i + 2];
            let b4 = bytes[i + 3];
            let time = (((b4 & 0x0F) as u32) << 19) | ((b3 as u32) << 11) | ((b2 as u32) << 3) | (((b1 >> 5) & 0b111) as u32);
            let direction = ((b1 >> 2) & 0b11) as u16;
            absolute_time += time as i64 + 1;
            moves.push(TwsMove {
                tick: absolute_time,
                direction,
                bytes: vec![b4, b3, b2, b1],
                format: MoveFormat::Format2FourBytes,
            });
            i += 4;
        } else if b1 & 0b11 == 0 {
            for shift in [2u8, 4, 6] {
                let direction = ((b1 >> shift) & 0b11) as u16;
                absolute_time += 4;
                moves.push(TwsMove {
                    tick: absolute_time,
                    direction,
                    bytes: vec![b1],
                    format: MoveFormat::Format3OneByte,
                });
            }
            i += 1;
        } else {
            let n = ((b1 >> 2) & 0b11) as usize;
            let mut extra = [0u8; 4];
            for (k, slot) in extra.iter_mut().enumerate() {
                if i + 1 + k < bytes.len() && k <= n {
                    *slot = bytes[i + 1 + k];
                }
            }
            let (b2, b3, b4, b5) = (extra[0], extra[1], extra[2], extra[3]);
            let direction = (((b2 & 0b0011_1111) as u16) << 3) | (((b1 >> 5) & 0b111) as u16);
            let time = (((b5 & 0b0001_1111) as u32) << 18) | ((b4 as u32) << 10) | ((b3 as u32) << 2) | (((b2 >> 6) & 0b11) as u32);
            absolute_time += time as i64 + 1;

            let mut raw = extra[..=n].to_vec();
            raw.reverse();
            moves.push(TwsMove {
                tick: absolute_time,
                direction,
                bytes: raw,
                format: MoveFormat::Format4VariableBytes,
            });
            i += 1 + n + 1;
        }
    }

    for mv in &moves {
        *tally.entry(mv.format.tally_key().to_string()).or_insert(0) += 1;
    }

    moves
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_bytes(ruleset: u16, last_level: u8) -> Vec<u8> {
        let mut bytes = SIGNATURE.to_le_bytes().to_vec();
        bytes.extend_from_slice(&ruleset.to_le_bytes());
        bytes.push(last_level);
        bytes.push(0);
        bytes
    }

    #[test]
    fn rejects_bad_signature() {
        let mut bytes = 0xDEADBEEFu32.to_le_bytes().to_vec();
        bytes.extend_from_slice(&[0u8; 4]);
        let err = parse(&bytes).unwrap_err();
        assert!(matches!(err, Error::InvalidSignature(_)));
    }

    #[test]
    fn parses_header_with_no_records() {
        let bytes = header_bytes(2, 5);
        let set = parse(&bytes).unwrap();
        assert_eq!(set.ruleset, "MS");
        assert_eq!(set.last_visited_level, 5);
        assert!(set.replays.is_empty());
    }

    #[test]
    fn bare_record_without_solution_is_not_stored() {
        let mut bytes = header_bytes(1, 1);
        bytes.extend_from_slice(&6i32.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes());
        bytes.extend_from_slice(b"ABCD");
        let set = parse(&bytes).unwrap();
        assert!(set.replays.is_empty());
    }

    #[test]
    fn decodes_format_1_one_byte_move() {
        // time=2, direction=3: (2<<5) | (3<<2) | 1
        let b1 = (2 << 5) | (3 << 2) | 1;
        let moves = decode_moves(&[b1], &mut std::collections::HashMap::new());
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].direction, 3);
        assert_eq!(moves[0].tick, 3);
        assert_eq!(moves[0].format, MoveFormat::Format1OneByte);
    }

    #[test]
    fn decodes_format_3_packs_three_moves_per_byte() {
        let b1 = (1 << 6) | (2 << 4) | (3 << 2);
        let moves = decode_moves(&[b1], &mut std::collections::HashMap::new());
        assert_eq!(moves.len(), 3);
        assert_eq!(moves[0].direction, 3);
        assert_eq!(moves[1].direction, 2);
        assert_eq!(moves[2].direction, 1);
        assert_eq!(moves[2].tick, 12);
    }

    #[test]
    fn full_replay_with_extended_record_round_trips_counts() {
        let mut bytes = header_bytes(1, 1);
        let move_bytes = vec![(2 << 5) | (3 << 2) | 1u8];
        let record_size: i32 = 6 + 10 + move_bytes.len() as i32;
        bytes.extend_from_slice(&record_size.to_le_bytes());
        bytes.extend_from_slice(&7u16.to_le_bytes());
        bytes.extend_from_slice(b"WXYZ");
        bytes.push(0);
        bytes.push(0);
        bytes.extend_from_slice(&12345u32.to_le_bytes());
        bytes.extend_from_slice(&999i32.to_le_bytes());
        bytes.extend_from_slice(&move_bytes);

        let set = parse(&bytes).unwrap();
        assert_eq!(set.replays.len(), 1);
        let replay = &set.replays[0];
        assert_eq!(replay.level_number, 7);
        assert_eq!(replay.level_password, "WXYZ");
        assert_eq!(replay.rng_value, Some(12345));
        assert_eq!(replay.time_in_ticks, Some(999));
        assert_eq!(replay.moves.len(), 1);
        assert_eq!(set.format_tally.get("format_1_one_byte"), Some(&1));
    }
}
