//! The pretty print implementation written for the
//! [`Interpreter`](super::Interpreter). This implementation was split up
//! into this file for smaller file sizes and higher cohesion.

use std::fmt;

use super::Interpreter;

/// The number of cells shown per row.
const HEX_PRINT_STEP: usize = 8;

/// The value used when at least two rows of zeros are collapsed.
const FILLER_BASE: &str = "...";

/// this struct will simulate a single row of cells (only in this context)
struct Row {
    from: usize,
    to: usize,
    data: [u8; HEX_PRINT_STEP],
    len: usize,
    only_null: bool,
}

/// using the `fmt::Display` for simple printing of the data later on
impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06X} - {:#06X} :", self.from, self.to)?;

        if self.only_null && self.to - self.from >= 2 * HEX_PRINT_STEP - 1 {
            // A collapsed block of zero rows, first and last value with
            // the filler in between.
            write!(f, " 0x00 {:^29} 0x00", FILLER_BASE)
        } else {
            for entry in self.data.iter().take(self.len) {
                write!(f, " {:#04X}", entry)?;
            }
            Ok(())
        }
    }
}

/// will pretty print the content of cell memory, collapsing blocks of
/// zeroed rows
fn cell_printer(cells: &[u8], indent: &str) -> String {
    let last_index = cells.len() - 1;
    let mut rows: Vec<Row> = Vec::with_capacity(cells.len() / HEX_PRINT_STEP + 1);

    for from in (0..cells.len()).step_by(HEX_PRINT_STEP) {
        let to = (from + HEX_PRINT_STEP - 1).min(last_index);

        let mut data = [0; HEX_PRINT_STEP];
        let len = to - from + 1;
        data[..len].copy_from_slice(&cells[from..=to]);

        let only_null = data[..len].iter().all(|&value| value == 0);

        let mut row = Row {
            from,
            to,
            data,
            len,
            only_null,
        };

        // merge neighbouring rows of zeros into a single block
        if only_null {
            if let Some(last_row) = rows.last() {
                if last_row.only_null {
                    row.from = last_row.from;
                    rows.pop();
                }
            }
        }
        rows.push(row);
    }

    let mut string = String::new();
    for row in rows {
        string.push_str(indent);
        string.push_str(&row.to_string());
        string.push('\n');
    }
    // Remove the unneded last new line.
    if let Some(index) = string.rfind('\n') {
        string.truncate(index);
    }
    string
}

impl fmt::Display for Interpreter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells = cell_printer(&self.cells, "\t\t");

        write!(
            f,
            "Interpreter {{\n\
                \tCell Pointer :\n\t\t{:#06X}\n\
                \tMemory Pointer :\n\t\t{:#06X}\n\
                \tCells :\n{}\n\
                }}",
            self.cell_index, self.memory_pointer, cells
        )
    }
}

#[cfg(test)]
mod tests {
    use super::super::Interpreter;

    const OUTPUT_PRINT: &str = "\
        Interpreter {\n\
            \tCell Pointer :\n\
                \t\t0x0001\n\
            \tMemory Pointer :\n\
                \t\t0xC000\n\
            \tCells :\n\
                \t\t0x0000 - 0x0007 : 0x00 0x48 0x00 0x00 0x00 0x00 0x00 0x00\n\
                \t\t0x0008 - 0x0017 : 0x00              ...              0x00\n\
                \t\t0x0018 - 0x001F : 0x00 0x00 0x00 0x00 0x00 0x00 0x00 0xFF\n\
        }";

    #[test]
    /// tests if the pretty print output is as expected
    fn test_full_print() {
        let mut interpreter = Interpreter::new(32);
        interpreter.cells[1] = 0x48;
        interpreter.cells[31] = 0xFF;
        interpreter.cell_index = 1;
        interpreter.memory_pointer = 0xC000;

        let actual = format!("{}", interpreter);

        for (expected, actual) in OUTPUT_PRINT.split('\n').zip(actual.split('\n')) {
            assert_eq!(expected, actual);
        }
    }

    #[test]
    /// a single row of zeros is not collapsed
    fn test_single_zero_row_prints_in_full() {
        let mut interpreter = Interpreter::new(24);
        interpreter.cells[0] = 1;
        interpreter.cells[23] = 2;

        let actual = format!("{}", interpreter);

        assert!(actual.contains("0x0008 - 0x000F : 0x00 0x00 0x00 0x00 0x00 0x00 0x00 0x00"));
        assert!(!actual.contains(super::FILLER_BASE));
    }
}
