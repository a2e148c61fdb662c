//! Text rendering of codec units.
//!
//! A formatting adapter for hosts whose emission sink wants source text.
//! The output is neutral procedure pseudo-code; it carries no semantic
//! decisions of its own - everything it prints is read off the structured
//! unit, and the unit remains the contract downstream tools consume.

use wiregen_ir::{CodecUnit, LocalShape, ReadStep, SchemaArena, StoreStep, WriteStep};

/// Line-oriented writer with indentation tracking.
struct Writer {
    out: String,
    indent: usize,
}

impl Writer {
    fn new() -> Self {
        Writer {
            out: String::new(),
            indent: 0,
        }
    }

    fn writeln(&mut self, line: &str) {
        for _ in 0..self.indent {
            self.out.push_str("    ");
        }
        self.out.push_str(line);
        self.out.push('\n');
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }

    fn indent(&mut self) {
        self.indent += 1;
    }

    fn dedent(&mut self) {
        self.indent -= 1;
    }
}

/// Render one unit's encode and decode procedures.
pub fn render_unit(arena: &SchemaArena, unit: &CodecUnit) -> String {
    let mut w = Writer::new();
    render_encode(arena, unit, &mut w);
    w.blank();
    render_decode(arena, unit, &mut w);
    w.out
}

/// Render a whole compilation run, units separated by blank lines.
pub fn render_units(arena: &SchemaArena, units: &[CodecUnit]) -> String {
    let rendered: Vec<String> = units.iter().map(|u| render_unit(arena, u)).collect();
    rendered.join("\n")
}

fn render_encode(arena: &SchemaArena, unit: &CodecUnit, w: &mut Writer) {
    let ty = arena.type_name(unit.ty);
    w.writeln(&format!("fn {ty}.encode(value, writer) -> bool {{"));
    w.indent();

    if unit.encode.steps.is_empty() {
        w.writeln("return true;");
    } else {
        let last = unit.encode.steps.len() - 1;
        for (i, step) in unit.encode.steps.iter().enumerate() {
            let call = write_call(arena, step);
            let prefix = if i == 0 { "return " } else { "    && " };
            let suffix = if i == last { ";" } else { "" };
            w.writeln(&format!("{prefix}{call}{suffix}"));
        }
    }

    w.dedent();
    w.writeln("}");
}

fn write_call(arena: &SchemaArena, step: &WriteStep) -> String {
    match *step {
        WriteStep::Wire {
            member,
            codec,
            cast,
            ..
        } => {
            let member = arena.name(member);
            let op = codec.op_name();
            match cast {
                Some(_) => format!("writer.write_{op}({op}(value.{member}))"),
                None => format!("writer.write_{op}(value.{member})"),
            }
        }
        WriteStep::Nested { member, nested, .. } => {
            let member = arena.name(member);
            let nested = arena.type_name(nested);
            format!("{nested}.encode(value.{member}, writer)")
        }
    }
}

fn render_decode(arena: &SchemaArena, unit: &CodecUnit, w: &mut Writer) {
    let ty = arena.type_name(unit.ty);
    w.writeln(&format!("fn {ty}.decode(reader) -> option<{ty}> {{"));
    w.indent();

    if unit.decode.reads.is_empty() {
        w.writeln(&format!("return {ty} {{}};"));
        w.dedent();
        w.writeln("}");
        return;
    }

    for local in &unit.decode.locals {
        let member = arena.name(local.member);
        let local_ty = match local.shape {
            LocalShape::Wire(codec) => codec.op_name().to_owned(),
            LocalShape::Record(nested) => arena.type_name(nested).to_owned(),
        };
        w.writeln(&format!("var {member}: {local_ty} = default;"));
    }

    let last = unit.decode.reads.len() - 1;
    for (i, read) in unit.decode.reads.iter().enumerate() {
        let call = read_call(arena, unit, read);
        let prefix = if i == 0 { "let ok = " } else { "    && " };
        let suffix = if i == last { ";" } else { "" };
        w.writeln(&format!("{prefix}{call}{suffix}"));
    }

    w.writeln("if !ok { return none; }");

    let stores: Vec<String> = unit
        .decode
        .stores
        .iter()
        .map(|store| store_init(arena, store))
        .collect();
    w.writeln(&format!("return {ty} {{ {} }};", stores.join(", ")));

    w.dedent();
    w.writeln("}");
}

fn read_call(arena: &SchemaArena, unit: &CodecUnit, read: &ReadStep) -> String {
    match *read {
        ReadStep::Wire { slot, codec } => {
            let member = arena.name(unit.decode.locals[slot].member);
            format!("reader.read_{}(&{member})", codec.op_name())
        }
        ReadStep::Nested { slot, nested } => {
            let member = arena.name(unit.decode.locals[slot].member);
            let nested = arena.type_name(nested);
            format!("{nested}.decode(reader, &{member})")
        }
    }
}

fn store_init(arena: &SchemaArena, store: &StoreStep) -> String {
    let member = arena.name(store.member);
    match store.cast {
        Some(cast) => {
            let enum_ty = arena.type_name(cast.enum_ty);
            format!("{member}: {enum_ty}({member})")
        }
        None => format!("{member}: {member}"),
    }
}
