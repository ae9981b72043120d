use std::sync::atomic::{AtomicU64, Ordering};

/// The number of scratch cells: ten seconds of audio at 44.1 kHz.
pub const CELL_COUNT: usize = 441_000;

/// The value returned for any access outside `[0, CELL_COUNT - 1]`.
///
/// Out-of-range addressing is not an error. Formulas compute addresses at
/// run time, and a clipped address producing a recognizable constant is more
/// useful there than a halt.
pub const OUT_OF_RANGE: f64 = -10.0;

/// Process-wide scratch storage, zeroed at startup and never torn down.
///
/// Every evaluator in the process shares this one array; that is the point.
/// Cells hold `f64` bit patterns behind relaxed atomics: loads and stores are
/// tear-free, and nothing more is promised. Concurrent readers and writers
/// interleave in whatever order they happen to land.
static CELLS: [AtomicU64; CELL_COUNT] = [const { AtomicU64::new(0) }; CELL_COUNT];

/// Reads the scratch cell addressed by `address`.
///
/// The address is truncated toward zero. Addresses outside the cell range
/// (including non-finite ones) return [`OUT_OF_RANGE`] instead of a cell
/// value.
///
/// ## Example
/// ```
/// use formula::machine::memory;
///
/// assert_eq!(memory::write(1.5, 300.0), 0.0);
/// assert_eq!(memory::read(300.0), 1.5);
/// assert_eq!(memory::read(300.9), 1.5); // truncated, same cell
///
/// assert_eq!(memory::read(-1.0), memory::OUT_OF_RANGE);
/// assert_eq!(memory::read(441_000.0), memory::OUT_OF_RANGE);
/// ```
#[must_use]
pub fn read(address: f64) -> f64 {
    cell_index(address).map_or(OUT_OF_RANGE, |index| {
                           f64::from_bits(CELLS[index].load(Ordering::Relaxed))
                       })
}

/// Writes `value` into the scratch cell addressed by `address`.
///
/// Returns `0.0` after a successful store. Addresses outside the cell range
/// (including non-finite ones) store nothing and return [`OUT_OF_RANGE`].
///
/// The argument order matches the registered builtin: `write(value, address)`.
pub fn write(value: f64, address: f64) -> f64 {
    match cell_index(address) {
        Some(index) => {
            CELLS[index].store(value.to_bits(), Ordering::Relaxed);
            0.0
        },
        None => OUT_OF_RANGE,
    }
}

/// Maps a float address onto a cell index, truncating toward zero.
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
#[allow(clippy::cast_sign_loss)]
fn cell_index(address: f64) -> Option<usize> {
    if !address.is_finite() {
        return None;
    }

    let index = address.trunc();
    if index < 0.0 || index >= CELL_COUNT as f64 {
        return None;
    }

    Some(index as usize)
}
