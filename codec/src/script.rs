//! Textual form of an [`AnimationSequence`].
//!
//! ```plain
//! AnimationSequence := FrameRecord ("," FrameRecord)*
//! FrameRecord       := Full | Delta
//! Full              := "{type='full', data={" HexRow ("," HexRow)* "}}"
//! Delta             := "{type='delta', data={" Triple* "}}"
//! Triple            := "{" X "," Y "," Value "}"
//! ```
//!
//! Records are Lua table constructors, so a serialized sequence can be pasted
//! straight into a Lua script (see [`LuaScript`]). Hex rows are quoted string
//! literals, bottom row first; triple coordinates are 1-based.

mod cursor;
mod lua;

pub(crate) use self::cursor::Cursor;
pub use self::lua::LuaScript;
use crate::*;
use std::fmt::Write;

const ROW_INDENT: &str = "            ";
const RECORD_INDENT: &str = "    ";

pub fn write_sequence(sequence: &AnimationSequence, out: &mut String) {
    for (idx, record) in sequence.frames().iter().enumerate() {
        if idx > 0 {
            out.push_str(",\n");
        }

        write_record(record, out);
    }
}

pub fn sequence_to_string(sequence: &AnimationSequence) -> String {
    let mut out = String::new();
    write_sequence(sequence, &mut out);
    out
}

pub fn write_record(record: &FrameRecord, out: &mut String) {
    out.push_str(RECORD_INDENT);

    match record {
        FrameRecord::Full(frame) => {
            out.push_str("{type='full', data={\n");

            for (idx, row) in frame.rows().iter().enumerate() {
                if idx > 0 {
                    out.push_str(",\n");
                }

                write!(out, "{}\"{}\"", ROW_INDENT, row).unwrap();
            }

            out.push_str("\n        }}");
        }

        FrameRecord::Delta(frame) => {
            out.push_str("{type='delta', data={");

            for (idx, change) in frame.changes().iter().enumerate() {
                if idx > 0 {
                    out.push(',');
                }

                write!(
                    out,
                    "{{{},{},{}}}",
                    change.x + 1,
                    change.y + 1,
                    change.alive as u8
                )
                .unwrap();
            }

            out.push_str("}}");
        }
    }
}

/// Length of a record once serialized, separators excluded.
pub fn record_len(record: &FrameRecord) -> usize {
    let mut out = String::new();
    write_record(record, &mut out);
    out.len()
}

/// Parses a bare sequence (no surrounding table braces).
pub fn parse_sequence(src: &str, params: Params) -> Result<AnimationSequence> {
    let mut cursor = Cursor::new(src);
    let frames = parse_records(&mut cursor, &params)?;

    cursor.skip_ws();

    if !cursor.is_eof() {
        return Err(cursor.error("unexpected trailing input"));
    }

    AnimationSequence::new(params, frames)
}

pub(crate) fn parse_records(cursor: &mut Cursor<'_>, params: &Params) -> Result<Vec<FrameRecord>> {
    let mut frames = Vec::new();

    loop {
        cursor.skip_ws();

        if cursor.peek() != Some('{') {
            break;
        }

        frames.push(parse_record(cursor, params)?);
        cursor.skip_ws();

        if !cursor.eat(",") {
            break;
        }
    }

    Ok(frames)
}

fn parse_record(cursor: &mut Cursor<'_>, params: &Params) -> Result<FrameRecord> {
    cursor.expect("{")?;
    cursor.expect_word("type")?;
    cursor.expect("=")?;

    let ty_at = cursor.pos();
    let ty = cursor.string()?;

    cursor.expect(",")?;
    cursor.expect_word("data")?;
    cursor.expect("=")?;
    cursor.expect("{")?;

    let record: FrameRecord = match ty.as_str() {
        "full" => parse_full(cursor, params)?.into(),
        "delta" => parse_delta(cursor, params)?.into(),
        other => {
            return Err(CodecError::syntax(
                ty_at,
                format!("unknown frame type {:?}", other),
            ))
        }
    };

    cursor.expect("}")?;
    cursor.expect("}")?;

    Ok(record)
}

fn parse_full(cursor: &mut Cursor<'_>, params: &Params) -> Result<FullFrame> {
    let start = cursor.pos();
    let mut rows = Vec::new();

    loop {
        cursor.skip_ws();

        if cursor.peek() == Some('}') {
            break;
        }

        let at = cursor.pos();
        let row = cursor.string()?;

        if !bits::is_packed_row(&row, params.width) {
            return Err(CodecError::syntax(
                at,
                format!(
                    "row {:?} is not {} lowercase hex digits",
                    row,
                    params.row_bytes() * 2
                ),
            ));
        }

        rows.push(row);
        cursor.skip_ws();

        if !cursor.eat(",") {
            break;
        }
    }

    cursor.skip_ws();

    if rows.len() != params.height {
        return Err(CodecError::syntax(
            start,
            format!("expected {} rows, found {}", params.height, rows.len()),
        ));
    }

    Ok(FullFrame::from_rows(rows))
}

fn parse_delta(cursor: &mut Cursor<'_>, params: &Params) -> Result<DeltaFrame> {
    let mut changes = Vec::new();

    loop {
        cursor.skip_ws();

        if cursor.peek() != Some('{') {
            break;
        }

        cursor.expect("{")?;
        let x = parse_coord(cursor, params.width)?;
        cursor.expect(",")?;
        let y = parse_coord(cursor, params.height)?;
        cursor.expect(",")?;

        let at = cursor.pos();
        let alive = match cursor.uint()? {
            0 => false,
            1 => true,
            other => {
                return Err(CodecError::syntax(
                    at,
                    format!("cell value must be 0 or 1, found {}", other),
                ))
            }
        };

        cursor.expect("}")?;
        cursor.skip_ws();
        cursor.eat(",");

        changes.push(Change { x, y, alive });
    }

    cursor.skip_ws();

    Ok(DeltaFrame::new(changes))
}

fn parse_coord(cursor: &mut Cursor<'_>, limit: usize) -> Result<usize> {
    let at = cursor.pos();
    let value = cursor.uint()?;

    match usize::try_from(value) {
        Ok(value) if (1..=limit).contains(&value) => Ok(value - 1),
        _ => Err(CodecError::syntax(
            at,
            format!("coordinate {} is outside 1..={}", value, limit),
        )),
    }
}
