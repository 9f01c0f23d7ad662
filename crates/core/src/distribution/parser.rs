//! Site-list parsing and duplicate-location detection.

use std::collections::HashMap;

use super::types::{Cell, DuplicateRecord, ParsedSiteList, SiteRecord, UploadMode};
use super::{SiteListError, SITE_LIST_COLUMNS};

/// Placeholder for blank identifying fields in a duplicate report.
const FALLBACK_NA: &str = "N/A";
/// Placeholder for blank geographic fields in a duplicate report.
const FALLBACK_UNKNOWN: &str = "Unknown";

const SYNTHESIZED_PREFIX: &str = "SITE-";

/// Parse an uploaded grid (header row first) into site records.
///
/// Row numbers in errors, duplicates, and synthesized codes are the 1-based
/// position in the grid, header included: the first data row is row 2 and
/// gets `SITE-0002` when its code is blank.
///
/// Rows with a blank location are skipped. Repeated locations are reported
/// in `duplicates` but stay in `site_records`; the caller decides whether to
/// proceed.
pub fn parse_site_list(
    grid: &[Vec<Cell>],
    mode: UploadMode,
) -> Result<ParsedSiteList, SiteListError> {
    let header = grid.first().ok_or(SiteListError::EmptyFile)?;
    if header.len() != SITE_LIST_COLUMNS {
        return Err(SiteListError::ColumnCountMismatch {
            row: 1,
            found: header.len(),
        });
    }

    let mut parsed = ParsedSiteList::default();
    let mut first_seen: HashMap<String, usize> = HashMap::new();

    for (index, row) in grid.iter().enumerate().skip(1) {
        let row_number = index + 1;
        let Ok([code, state, city, location, media_owner, brand, format]) =
            <[String; SITE_LIST_COLUMNS]>::try_from(normalize_row(row))
        else {
            return Err(SiteListError::ColumnCountMismatch {
                row: row_number,
                found: row.len(),
            });
        };

        if location.is_empty() {
            continue;
        }

        let code = match (code.is_empty(), mode) {
            (true, _) => mode.synthesized_code(row_number),
            (false, UploadMode::AppendToCampaign { .. }) => code,
            (false, UploadMode::NewCampaign) => {
                return Err(SiteListError::CodeNotAllowed { row: row_number });
            }
        };

        let record = SiteRecord {
            code,
            state,
            city,
            location,
            media_owner,
            brand,
            format,
        };

        match first_seen.get(&record.location) {
            Some(&first_row) => parsed
                .duplicates
                .push(duplicate_of(&record, row_number, first_row)),
            None => {
                first_seen.insert(record.location.clone(), row_number);
            }
        }

        parsed.site_records.push(record);
    }

    Ok(parsed)
}

/// Code given to a site uploaded without one.
pub fn synthesize_code(row_number: usize) -> String {
    format!("{SYNTHESIZED_PREFIX}{row_number:04}")
}

/// Code offset that makes an append continue after the highest synthesized
/// code already in the campaign.
///
/// Skipped blank-location rows still consume a number, so the site count is
/// not a safe offset. Explicit codes are ignored.
pub fn append_code_offset(existing: &[SiteRecord]) -> usize {
    existing
        .iter()
        .filter_map(|site| synthesized_number(&site.code))
        .max()
        .map_or(0, |highest| highest.saturating_sub(1))
}

fn synthesized_number(code: &str) -> Option<usize> {
    let digits = code.strip_prefix(SYNTHESIZED_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

fn normalize_row(row: &[Cell]) -> Vec<String> {
    row.iter()
        .map(|cell| cell.as_deref().map(str::trim).unwrap_or_default().to_string())
        .collect()
}

fn duplicate_of(record: &SiteRecord, row: usize, first_row: usize) -> DuplicateRecord {
    DuplicateRecord {
        row,
        first_row,
        code: or_fallback(&record.code, FALLBACK_NA),
        state: or_fallback(&record.state, FALLBACK_UNKNOWN),
        city: or_fallback(&record.city, FALLBACK_UNKNOWN),
        location: record.location.clone(),
        media_owner: or_fallback(&record.media_owner, FALLBACK_NA),
        brand: or_fallback(&record.brand, FALLBACK_NA),
        format: or_fallback(&record.format, FALLBACK_NA),
    }
}

fn or_fallback(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    const HEADER: [&str; 7] = ["code", "state", "city", "location", "owner", "brand", "format"];

    fn row(cells: &[&str]) -> Vec<Cell> {
        cells.iter().map(|c| Some((*c).to_string())).collect()
    }

    fn site(state: &str, location: &str) -> Vec<Cell> {
        row(&["", state, "City", location, "Owner", "Brand", "48 Sheet"])
    }

    fn grid_with(rows: Vec<Vec<Cell>>) -> Vec<Vec<Cell>> {
        std::iter::once(row(&HEADER)).chain(rows).collect()
    }

    // -- Column validation ---------------------------------------------------

    #[test]
    fn empty_grid_is_rejected() {
        assert_eq!(
            parse_site_list(&[], UploadMode::NewCampaign),
            Err(SiteListError::EmptyFile)
        );
    }

    #[test]
    fn header_with_six_columns_is_rejected() {
        let grid = vec![row(&HEADER[..6])];
        assert_matches!(
            parse_site_list(&grid, UploadMode::NewCampaign),
            Err(SiteListError::ColumnCountMismatch { row: 1, found: 6 })
        );
    }

    #[test]
    fn header_with_eight_columns_is_rejected() {
        let mut header = row(&HEADER);
        header.push(Some("extra".into()));
        assert_matches!(
            parse_site_list(&[header], UploadMode::NewCampaign),
            Err(SiteListError::ColumnCountMismatch { row: 1, found: 8 })
        );
    }

    #[test]
    fn short_data_row_is_rejected_with_its_row_number() {
        let grid = grid_with(vec![site("Lagos", "1 Marina"), row(&["", "Lagos", "Ikeja"])]);
        assert_matches!(
            parse_site_list(&grid, UploadMode::NewCampaign),
            Err(SiteListError::ColumnCountMismatch { row: 3, found: 3 })
        );
    }

    #[test]
    fn column_mismatch_message_names_the_problem() {
        let err = SiteListError::ColumnCountMismatch { row: 4, found: 5 };
        assert!(err.to_string().starts_with("column count mismatch"));
    }

    #[test]
    fn header_only_grid_yields_no_sites() {
        let parsed = parse_site_list(&grid_with(vec![]), UploadMode::NewCampaign).unwrap();
        assert!(parsed.site_records.is_empty());
        assert!(parsed.duplicates.is_empty());
    }

    // -- Cell normalization --------------------------------------------------

    #[test]
    fn cells_are_trimmed_and_missing_cells_are_empty() {
        let mut data = row(&["", "  Lagos ", " Ikeja", " 12 Allen Ave ", "", "", " Unipole "]);
        data[4] = None;
        let grid = vec![row(&HEADER), data];

        let parsed = parse_site_list(&grid, UploadMode::NewCampaign).unwrap();
        let site = &parsed.site_records[0];
        assert_eq!(site.state, "Lagos");
        assert_eq!(site.city, "Ikeja");
        assert_eq!(site.location, "12 Allen Ave");
        assert_eq!(site.media_owner, "");
        assert_eq!(site.format, "Unipole");
    }

    #[test]
    fn rows_with_blank_location_are_skipped() {
        let grid = grid_with(vec![
            site("Lagos", "1 Marina"),
            row(&["", "", "", "   ", "", "", ""]),
            site("Lagos", "2 Marina"),
        ]);
        let parsed = parse_site_list(&grid, UploadMode::NewCampaign).unwrap();
        assert_eq!(parsed.site_records.len(), 2);
        // Skipped rows still consume a row number.
        assert_eq!(parsed.site_records[1].code, "SITE-0004");
    }

    // -- Code synthesis ------------------------------------------------------

    #[test]
    fn blank_code_at_grid_row_three_becomes_site_0003() {
        let grid = grid_with(vec![site("Oyo", "A"), site("Oyo", "B")]);
        let parsed = parse_site_list(&grid, UploadMode::NewCampaign).unwrap();
        assert_eq!(parsed.site_records[0].code, "SITE-0002");
        assert_eq!(parsed.site_records[1].code, "SITE-0003");
    }

    #[test]
    fn synthesized_code_pads_to_four_digits() {
        assert_eq!(synthesize_code(7), "SITE-0007");
        assert_eq!(synthesize_code(12345), "SITE-12345");
    }

    #[test]
    fn explicit_code_fails_a_new_campaign_upload() {
        let grid = grid_with(vec![row(&["LAG-01", "Lagos", "Ikeja", "1 Road", "O", "B", "F"])]);
        assert_eq!(
            parse_site_list(&grid, UploadMode::NewCampaign),
            Err(SiteListError::CodeNotAllowed { row: 2 })
        );
    }

    #[test]
    fn explicit_code_is_kept_when_appending() {
        let grid = grid_with(vec![
            row(&["LAG-01", "Lagos", "Ikeja", "1 Road", "O", "B", "F"]),
            site("Lagos", "2 Road"),
        ]);
        let parsed =
            parse_site_list(&grid, UploadMode::AppendToCampaign { code_offset: 0 }).unwrap();
        assert_eq!(parsed.site_records[0].code, "LAG-01");
        assert_eq!(parsed.site_records[1].code, "SITE-0003");
    }

    #[test]
    fn appended_codes_continue_campaign_numbering() {
        let grid = grid_with(vec![site("Lagos", "9 Road"), site("Lagos", "10 Road")]);
        let parsed =
            parse_site_list(&grid, UploadMode::AppendToCampaign { code_offset: 3 }).unwrap();
        // A campaign of 3 sites holds SITE-0002..SITE-0004.
        assert_eq!(parsed.site_records[0].code, "SITE-0005");
        assert_eq!(parsed.site_records[1].code, "SITE-0006");
    }

    #[test]
    fn append_offset_follows_the_highest_synthesized_code() {
        // Row 3 of the original upload had a blank location.
        let original = grid_with(vec![
            site("Lagos", "1 Road"),
            row(&["", "", "", "", "", "", ""]),
            site("Lagos", "2 Road"),
        ]);
        let existing = parse_site_list(&original, UploadMode::NewCampaign)
            .unwrap()
            .site_records;
        assert_eq!(existing.len(), 2);
        assert_eq!(existing[1].code, "SITE-0004");

        let code_offset = append_code_offset(&existing);
        let appended = parse_site_list(
            &grid_with(vec![site("Lagos", "3 Road")]),
            UploadMode::AppendToCampaign { code_offset },
        )
        .unwrap();
        assert_eq!(appended.site_records[0].code, "SITE-0005");
    }

    #[test]
    fn append_offset_ignores_explicit_codes() {
        let mut explicit = parse_site_list(
            &grid_with(vec![site("Lagos", "1 Road")]),
            UploadMode::NewCampaign,
        )
        .unwrap()
        .site_records;
        explicit[0].code = "LAG-9000".into();
        assert_eq!(append_code_offset(&explicit), 0);
        assert_eq!(append_code_offset(&[]), 0);

        explicit[0].code = "SITE-12".into();
        assert_eq!(append_code_offset(&explicit), 11);
        explicit[0].code = "SITE-".into();
        assert_eq!(append_code_offset(&explicit), 0);
    }

    #[test]
    fn whitespace_only_code_counts_as_blank() {
        let grid = grid_with(vec![row(&["   ", "Lagos", "Ikeja", "1 Road", "O", "B", "F"])]);
        let parsed = parse_site_list(&grid, UploadMode::NewCampaign).unwrap();
        assert_eq!(parsed.site_records[0].code, "SITE-0002");
    }

    // -- Duplicate detection -------------------------------------------------

    #[test]
    fn repeated_locations_flag_every_later_occurrence() {
        let grid = grid_with(vec![
            site("Kano", "A"),
            site("Kano", "B"),
            site("Kano", "A"),
            site("Kano", "A"),
        ]);
        let parsed = parse_site_list(&grid, UploadMode::NewCampaign).unwrap();

        assert_eq!(parsed.duplicates.len(), 2);
        assert_eq!(parsed.duplicates[0].row, 4);
        assert_eq!(parsed.duplicates[1].row, 5);
        assert!(parsed.duplicates.iter().all(|d| d.first_row == 2));
        // Duplicates are advisory: every row is still returned.
        assert_eq!(parsed.site_records.len(), 4);
        assert!(parsed.has_duplicates());
    }

    #[test]
    fn duplicate_matching_is_case_sensitive() {
        let grid = grid_with(vec![site("Kano", "Main St"), site("Kano", "main st")]);
        let parsed = parse_site_list(&grid, UploadMode::NewCampaign).unwrap();
        assert!(parsed.duplicates.is_empty());
    }

    #[test]
    fn duplicate_matching_ignores_surrounding_whitespace() {
        let grid = grid_with(vec![site("Kano", "Main St"), site("Kano", "  Main St  ")]);
        let parsed = parse_site_list(&grid, UploadMode::NewCampaign).unwrap();
        assert_eq!(parsed.duplicates.len(), 1);
    }

    #[test]
    fn duplicate_blank_fields_use_placeholders() {
        let grid = grid_with(vec![
            row(&["", "", "", "Main St", "", "", ""]),
            row(&["", "", "", "Main St", "", "", ""]),
        ]);
        let parsed = parse_site_list(&grid, UploadMode::NewCampaign).unwrap();
        let dup = &parsed.duplicates[0];
        assert_eq!(dup.code, "SITE-0003");
        assert_eq!(dup.state, "Unknown");
        assert_eq!(dup.city, "Unknown");
        assert_eq!(dup.media_owner, "N/A");
        assert_eq!(dup.brand, "N/A");
        assert_eq!(dup.format, "N/A");
        // The site record itself keeps the raw blanks.
        assert_eq!(parsed.site_records[1].state, "");
    }
}
