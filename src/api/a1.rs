//! A1 notation helpers
//!
//! Rows and columns are 1-based, as in the Sheets UI.

/// Column letters for a 1-based column index (1 → A, 27 → AA)
pub fn column_letters(mut column: usize) -> String {
    let mut letters = Vec::new();
    while column > 0 {
        let remainder = (column - 1) % 26;
        letters.push((b'A' + remainder as u8) as char);
        column = (column - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// Quote a worksheet title for use in a range
pub fn quote_sheet(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

/// Bounded rectangle, e.g. `'Sheet1'!A2:C101`
pub fn range(sheet: &str, start_row: usize, start_col: usize, end_row: usize, end_col: usize) -> String {
    format!(
        "{}!{}{}:{}{}",
        quote_sheet(sheet),
        column_letters(start_col),
        start_row,
        column_letters(end_col),
        end_row
    )
}

/// The whole worksheet
pub fn whole_sheet(sheet: &str) -> String {
    quote_sheet(sheet)
}
