//! Grid rectangularization and numeric coercion.

use crate::spec::{EnumCell, TypeRawRow, TypeRow};
use crate::util::is_numeric_literal;

/// Largest magnitude below which every whole `f64` fits in `i64`.
const N_I64_EXACT_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// Maximum row length, `0` for no rows.
pub fn calculate_max_width(rows: &[TypeRawRow]) -> usize {
    rows.iter().map(Vec::len).max().unwrap_or(0)
}

/// Pad every row with trailing empty strings up to `width`. Never truncates.
pub fn pad_rows(rows: &mut [TypeRawRow], width: usize) {
    for row in rows.iter_mut() {
        if row.len() < width {
            row.resize(width, String::new());
        }
    }
}

/// Coerce full numeric literals to numbers; anything else stays text.
pub fn coerce_text(text: &str) -> EnumCell {
    let c_text = text.trim();
    if !is_numeric_literal(c_text) {
        return EnumCell::Text(text.to_string());
    }
    let Ok(n_value) = c_text.parse::<f64>() else {
        return EnumCell::Text(text.to_string());
    };
    if n_value.is_finite() && n_value.fract() == 0.0 && n_value.abs() < N_I64_EXACT_LIMIT {
        EnumCell::Integer(n_value as i64)
    } else {
        EnumCell::Float(n_value)
    }
}

/// Coerce one cell; numeric cells pass through unchanged.
pub fn coerce_cell(cell: EnumCell) -> EnumCell {
    match cell {
        EnumCell::Text(val) => coerce_text(&val),
        other => other,
    }
}

/// Pad to the sheet-wide width, then coerce every cell.
///
/// Returns the grid and the number of cells converted to numbers.
pub fn normalize_rows(mut rows: Vec<TypeRawRow>) -> (Vec<TypeRow>, usize) {
    let n_width = calculate_max_width(&rows);
    pad_rows(&mut rows, n_width);

    let mut n_coerced = 0usize;
    let l_rows = rows
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|cell| {
                    let cell = coerce_text(&cell);
                    if !matches!(cell, EnumCell::Text(_)) {
                        n_coerced += 1;
                    }
                    cell
                })
                .collect::<TypeRow>()
        })
        .collect();
    (l_rows, n_coerced)
}
