//! Decoding an uploaded CSV site list into a grid of cells.

use super::types::{Cell, SiteGrid};
use super::SiteListError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Decode CSV bytes into rows of cells, header row included.
///
/// Rows may differ in length; column-count checks belong to the parser.
/// Empty fields become `None`. A leading UTF-8 byte-order mark is ignored.
pub fn grid_from_csv(bytes: &[u8]) -> Result<SiteGrid, SiteListError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut grid = SiteGrid::new();
    for result in reader.records() {
        let record = result.map_err(|e| SiteListError::Unreadable(e.to_string()))?;
        let row: Vec<Cell> = record
            .iter()
            .map(|field| (!field.is_empty()).then(|| field.to_string()))
            .collect();
        grid.push(row);
    }

    Ok(grid)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn reads_header_and_rows() {
        let csv = "code,state,city,location,owner,brand,format\n,Lagos,Ikeja,1 Allen,O,B,F\n";
        let grid = grid_from_csv(csv.as_bytes()).unwrap();
        assert_eq!(grid.len(), 2);
        assert_eq!(grid[0][0].as_deref(), Some("code"));
        assert_eq!(grid[1][0], None);
        assert_eq!(grid[1][3].as_deref(), Some("1 Allen"));
    }

    #[test]
    fn ragged_rows_are_preserved_for_the_parser() {
        let grid = grid_from_csv(b"a,b,c\n1,2\n").unwrap();
        assert_eq!(grid[0].len(), 3);
        assert_eq!(grid[1].len(), 2);
    }

    #[test]
    fn byte_order_mark_is_stripped() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice(b"code,state\n");
        let grid = grid_from_csv(&bytes).unwrap();
        assert_eq!(grid[0][0].as_deref(), Some("code"));
    }

    #[test]
    fn quoted_fields_keep_embedded_commas() {
        let grid = grid_from_csv(b"location\n\"12, Marina Road\"\n").unwrap();
        assert_eq!(grid[1][0].as_deref(), Some("12, Marina Road"));
    }

    #[test]
    fn empty_input_yields_empty_grid() {
        assert!(grid_from_csv(b"").unwrap().is_empty());
    }

    #[test]
    fn invalid_utf8_is_unreadable() {
        assert_matches!(
            grid_from_csv(b"code\n\xFF\xFE\n"),
            Err(SiteListError::Unreadable(_))
        );
    }
}
