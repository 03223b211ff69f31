use super::cursor::{quote, Cursor};
use crate::*;
use std::collections::HashMap;
use std::fmt::Write;

const RUNTIME: &str = include_str!("runtime.lua");

/// The script the host loads: constants, the frame table and the Lua port of
/// the playback engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LuaScript {
    pub binding: HostBinding,
    pub sequence: AnimationSequence,
}

enum Value {
    Int(i64),
    Str(String),
}

impl LuaScript {
    pub fn new(binding: HostBinding, sequence: AnimationSequence) -> Self {
        Self { binding, sequence }
    }

    pub fn render(&self) -> String {
        let binding = &self.binding;
        let params = self.sequence.params();
        let mut out = String::new();

        writeln!(out, "-- This file is generated by apple-encoder. Do not edit.").unwrap();
        writeln!(out).unwrap();
        writeln!(out, "local ALIVE_CELL = {}", quote(&binding.alive_cell)).unwrap();
        writeln!(out, "local DEAD_CELL = {}", quote(&binding.dead_cell)).unwrap();
        writeln!(out).unwrap();
        writeln!(out, "local ORIGIN_X = {}", binding.origin_x).unwrap();
        writeln!(out, "local ORIGIN_Y = {}", binding.origin_y).unwrap();
        writeln!(out).unwrap();
        writeln!(out, "local WIDTH = {}", params.width).unwrap();
        writeln!(out, "local HEIGHT = {}", params.height).unwrap();
        writeln!(out, "local FPS = {}", params.fps).unwrap();
        writeln!(out).unwrap();
        writeln!(out, "local CITY_NAME = {}", quote(&binding.identity)).unwrap();
        writeln!(out, "local CITY_SEED = {}", quote(&binding.variant)).unwrap();
        writeln!(out, "local READY_MESSAGE = {}", quote(&binding.ready_message)).unwrap();
        writeln!(out).unwrap();
        writeln!(out, "local FRAMES = {{").unwrap();
        script::write_sequence(&self.sequence, &mut out);
        writeln!(out, "\n}}").unwrap();
        writeln!(out).unwrap();
        out.push_str(RUNTIME);

        out
    }

    /// Reads back the constants and frame table of a rendered script; the
    /// runtime that follows the table is ignored.
    pub fn parse(src: &str) -> Result<Self> {
        let mut cursor = Cursor::new(src);
        let mut values = HashMap::new();

        let sequence = loop {
            cursor.expect_word("local")?;

            let name = cursor.ident()?;
            cursor.expect("=")?;

            if name == "FRAMES" {
                let params = header_params(&values, cursor.pos())?;

                cursor.expect("{")?;
                let frames = script::parse_records(&mut cursor, &params)?;
                cursor.expect("}")?;

                break AnimationSequence::new(params, frames)?;
            }

            cursor.skip_ws();

            let value = if matches!(cursor.peek(), Some('"' | '\'')) {
                Value::Str(cursor.string()?)
            } else {
                Value::Int(cursor.int()?)
            };

            values.insert(name, (cursor.pos(), value));
        };

        let binding = HostBinding {
            origin_x: int(&values, "ORIGIN_X")?,
            origin_y: int(&values, "ORIGIN_Y")?,
            alive_cell: string(&values, "ALIVE_CELL")?,
            dead_cell: string(&values, "DEAD_CELL")?,
            identity: string(&values, "CITY_NAME")?,
            variant: string(&values, "CITY_SEED")?,
            ready_message: string(&values, "READY_MESSAGE")?,
        };

        Ok(Self::new(binding, sequence))
    }
}

type Values<'a> = HashMap<&'a str, (usize, Value)>;

fn header_params(values: &Values<'_>, at: usize) -> Result<Params> {
    let dim = |name: &str| -> Result<usize> {
        let value = int(values, name)?;

        usize::try_from(value).map_err(|_| {
            CodecError::InvalidParams(format!("{} must not be negative, got {}", name, value))
        })
    };

    let width = dim("WIDTH")?;
    let height = dim("HEIGHT")?;
    let fps = int(values, "FPS")?;
    let fps = u32::try_from(fps)
        .map_err(|_| CodecError::syntax(at, format!("FPS out of range: {}", fps)))?;

    Params::new(width, height, fps)
}

fn int(values: &Values<'_>, name: &str) -> Result<i64> {
    match values.get(name) {
        Some((_, Value::Int(value))) => Ok(*value),
        Some((at, Value::Str(_))) => Err(CodecError::syntax(
            *at,
            format!("`{}` must be a number", name),
        )),
        None => Err(CodecError::syntax(0, format!("missing `{}`", name))),
    }
}

fn string(values: &Values<'_>, name: &str) -> Result<String> {
    match values.get(name) {
        Some((_, Value::Str(value))) => Ok(value.clone()),
        Some((at, Value::Int(_))) => Err(CodecError::syntax(
            *at,
            format!("`{}` must be a string", name),
        )),
        None => Err(CodecError::syntax(0, format!("missing `{}`", name))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script() -> LuaScript {
        let params = Params::new(8, 2, 24).unwrap();
        let blank = PixelGrid::new(8, 2);
        let mut dot = blank.clone();
        dot.set(0, 0, true);

        let (_, sequence) = encode(&params, [blank.clone(), dot, blank]).unwrap();

        let binding = HostBinding {
            origin_x: -5,
            origin_y: 12,
            ready_message: "Now \"playing\"".into(),
            ..HostBinding::default()
        };

        LuaScript::new(binding, sequence)
    }

    #[test]
    fn renders_constants_table_and_runtime() {
        let lua = script().render();

        assert!(lua.contains("local ORIGIN_X = -5\n"));
        assert!(lua.contains("local WIDTH = 8\n"));
        assert!(lua.contains("local FPS = 24\n"));
        assert!(lua.contains("local READY_MESSAGE = \"Now \\\"playing\\\"\"\n"));
        assert!(lua.contains("local FRAMES = {\n    {type='full', data={\n"));
        assert!(lua.contains("function script:update()"));
    }

    #[test]
    fn parse_reads_back_rendered_script() {
        let script = script();

        assert_eq!(LuaScript::parse(&script.render()).unwrap(), script);
    }

    #[test]
    fn parse_requires_dimensions_before_frames() {
        let err = LuaScript::parse("local FPS = 30\nlocal FRAMES = {}").unwrap_err();

        assert!(err.to_string().contains("missing `WIDTH`"), "{}", err);
    }

    #[test]
    fn parse_rejects_oversized_header() {
        let src = script()
            .render()
            .replace("local HEIGHT = 2\n", "local HEIGHT = 99999999999999999\n");
        let err = LuaScript::parse(&src).unwrap_err();

        assert!(matches!(err, CodecError::InvalidParams(_)), "{}", err);
    }

    #[test]
    fn parse_rejects_mistyped_constants() {
        let src = script().render().replace("local ORIGIN_X = -5", "local ORIGIN_X = \"x\"");
        let err = LuaScript::parse(&src).unwrap_err();

        assert!(err.to_string().contains("`ORIGIN_X` must be a number"), "{}", err);
    }
}
