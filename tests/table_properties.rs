//! Property checks for the table renderer and the formatters.

use plotview::format::{duration_to_clock, size_to_unit};
use plotview::table::render_table;
use proptest::prelude::*;

// Includes wide kana and a combining accent next to plain ASCII.
const CELL_PATTERN: &str = "[a-zA-Z0-9 %:./日本プロットé\u{301}-]{0,12}";

fn row_sets() -> impl Strategy<Value = Vec<Vec<String>>> {
    (1usize..6).prop_flat_map(|columns| {
        prop::collection::vec(prop::collection::vec(CELL_PATTERN, columns), 1..8)
    })
}

proptest! {
    #[test]
    fn every_line_matches_the_separator(rows in row_sets()) {
        let table = render_table(&rows).unwrap();
        let lines: Vec<&str> = table.lines().collect();
        prop_assert_eq!(lines.len(), rows.len() + 3);
        let width = lines[0].chars().count();
        prop_assert!(lines[0].chars().all(|c| c == '='));
        for line in &lines {
            prop_assert_eq!(line.chars().count(), width);
        }
        prop_assert_eq!(lines[2], lines[0]);
        prop_assert_eq!(*lines.last().unwrap(), lines[0]);
    }

    #[test]
    fn body_cells_keep_their_text(rows in row_sets()) {
        let table = render_table(&rows).unwrap();
        let lines: Vec<&str> = table.lines().collect();
        for (row, line) in rows.iter().skip(1).zip(&lines[3..]) {
            let first = &row[0];
            prop_assert!(line.starts_with(first.as_str()));
        }
    }

    #[test]
    fn unit_case_does_not_matter(bytes in any::<u64>()) {
        prop_assert_eq!(size_to_unit(bytes, "tb").unwrap(), size_to_unit(bytes, "TB").unwrap());
        prop_assert_eq!(size_to_unit(bytes, "gb").unwrap(), size_to_unit(bytes, "Gb").unwrap());
    }

    #[test]
    fn terabytes_scale_to_gigabytes(bytes in 0u64..(1u64 << 52)) {
        let tb = size_to_unit(bytes, "tb").unwrap();
        let gb = size_to_unit(bytes, "gb").unwrap();
        // two-decimal rounding of the TB value can shift GB by up to 0.005 * 1024
        prop_assert!((tb * 1024.0 - gb).abs() <= 5.13);
    }

    #[test]
    fn clock_round_trips(seconds in 0u64..10_000_000) {
        let clock = duration_to_clock(seconds);
        let fields: Vec<u64> = clock.split(':').map(|f| f.parse().unwrap()).collect();
        prop_assert_eq!(fields.len(), 3);
        prop_assert!(fields[1] < 60 && fields[2] < 60);
        prop_assert_eq!(fields[0] * 3600 + fields[1] * 60 + fields[2], seconds);
        prop_assert!(clock.split(':').all(|f| f.len() >= 2));
    }
}

#[test]
fn invalid_unit_is_reported() {
    let err = size_to_unit(100, "pb").unwrap_err();
    assert_eq!(err.to_string(), "Failed to identify size unit 'pb'");
}
