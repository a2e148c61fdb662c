//! Wire writer/reader capabilities and in-memory implementations.
//!
//! The capabilities mirror the interface generated codecs are written
//! against: every write reports success, every read either produces a value
//! or fails. A failed operation leaves the stream position wherever it was;
//! callers must treat the stream as unusable from that point on.

use wiregen_ir::WireCodec;

use crate::value::Value;

/// Write capability consumed by encode procedures.
pub trait WireWriter {
    /// Write one value with the given wire operation. Returns `false` if
    /// the write was refused; nothing is written in that case.
    fn write(&mut self, codec: WireCodec, value: &Value) -> bool;

    /// Current position, for implementations that support inspection.
    fn position(&self) -> Option<usize> {
        None
    }
}

/// Read capability consumed by decode procedures.
pub trait WireReader {
    /// Read one value with the given wire operation, or `None` if the
    /// stream is exhausted or the operation does not match the stream.
    fn read(&mut self, codec: WireCodec) -> Option<Value>;
}

/// In-memory wire: a stream of typed cells.
///
/// Each cell records the wire operation that wrote it, so a read with a
/// mismatched operation fails the way a corrupt stream would. Position is
/// measured in cells.
#[derive(Clone, Debug, Default)]
pub struct MemoryWire {
    cells: Vec<(WireCodec, Value)>,
    cursor: usize,
}

impl MemoryWire {
    /// Create an empty wire.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cells written so far.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check whether nothing was written.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Reset the read cursor to the start.
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    /// Drop every cell past `len`, simulating a truncated stream.
    pub fn truncate(&mut self, len: usize) {
        self.cells.truncate(len);
    }
}

impl WireWriter for MemoryWire {
    fn write(&mut self, codec: WireCodec, value: &Value) -> bool {
        self.cells.push((codec, value.clone()));
        true
    }

    fn position(&self) -> Option<usize> {
        Some(self.cells.len())
    }
}

impl WireReader for MemoryWire {
    fn read(&mut self, codec: WireCodec) -> Option<Value> {
        let (cell_codec, value) = self.cells.get(self.cursor)?;
        if *cell_codec != codec {
            return None;
        }
        let value = value.clone();
        self.cursor += 1;
        Some(value)
    }
}

/// Writer wrapper that refuses writes once a budget is spent.
///
/// Each successful write costs one unit of budget; the write that finds the
/// budget exhausted is refused before reaching the inner writer, so the
/// inner position is exactly the number of accepted writes.
#[derive(Debug)]
pub struct FlakyWriter<W> {
    inner: W,
    remaining: usize,
}

impl<W> FlakyWriter<W> {
    /// Wrap `inner`, accepting at most `budget` writes.
    pub fn new(inner: W, budget: usize) -> Self {
        FlakyWriter {
            inner,
            remaining: budget,
        }
    }

    /// The wrapped writer.
    pub fn inner(&self) -> &W {
        &self.inner
    }
}

impl<W: WireWriter> WireWriter for FlakyWriter<W> {
    fn write(&mut self, codec: WireCodec, value: &Value) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        self.inner.write(codec, value)
    }

    fn position(&self) -> Option<usize> {
        self.inner.position()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_then_read_round_trips_cells() {
        let mut wire = MemoryWire::new();
        assert!(wire.write(WireCodec::Int, &Value::I32(7)));
        assert!(wire.write(WireCodec::Float, &Value::F32(1.5)));
        assert_eq!(wire.len(), 2);

        assert_eq!(wire.read(WireCodec::Int), Some(Value::I32(7)));
        assert_eq!(wire.read(WireCodec::Float), Some(Value::F32(1.5)));
        assert_eq!(wire.read(WireCodec::Float), None);
    }

    #[test]
    fn mismatched_operation_reads_nothing() {
        let mut wire = MemoryWire::new();
        wire.write(WireCodec::Int, &Value::I32(7));

        assert_eq!(wire.read(WireCodec::Float), None);
        // The cursor did not advance; the right operation still works.
        assert_eq!(wire.read(WireCodec::Int), Some(Value::I32(7)));
    }

    #[test]
    fn truncation_exhausts_the_stream_early() {
        let mut wire = MemoryWire::new();
        wire.write(WireCodec::Int, &Value::I32(1));
        wire.write(WireCodec::Int, &Value::I32(2));
        wire.truncate(1);

        assert_eq!(wire.read(WireCodec::Int), Some(Value::I32(1)));
        assert_eq!(wire.read(WireCodec::Int), None);
    }

    #[test]
    fn flaky_writer_stops_at_budget() {
        let mut writer = FlakyWriter::new(MemoryWire::new(), 2);
        assert!(writer.write(WireCodec::Int, &Value::I32(1)));
        assert!(writer.write(WireCodec::Int, &Value::I32(2)));
        assert!(!writer.write(WireCodec::Int, &Value::I32(3)));

        assert_eq!(writer.position(), Some(2));
        assert_eq!(writer.inner().len(), 2);
    }
}
