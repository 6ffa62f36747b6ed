use crate::models::TableModel;

/// Builds a table from qualifying lines; the first line is the header.
pub fn build_table(lines: &[&str]) -> TableModel {
    let mut rows = lines.iter().map(|line| split_cells(line));

    let Some(header) = rows.next() else {
        return TableModel::default();
    };

    TableModel {
        header,
        rows: rows.collect(),
    }
}

/// Renders a table back to pipe-delimited lines, header first. An empty
/// table renders as no lines at all.
pub fn render_table(table: &TableModel) -> String {
    if table.is_empty() {
        return String::new();
    }

    std::iter::once(&table.header)
        .chain(table.rows.iter())
        .map(|cells| format!("|{}|", cells.join("|")))
        .collect::<Vec<_>>()
        .join("\n")
}

fn split_cells(line: &str) -> Vec<String> {
    let segments: Vec<&str> = line.split('|').collect();
    if segments.len() < 2 {
        return Vec::new();
    }

    segments[1..segments.len() - 1]
        .iter()
        .map(|cell| cell.trim().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::tokenize_table_lines;

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_header_and_rows() {
        let raw = "|Name|Age|\n|Alice|30|\nnot a row\n|Bob|25|";
        let table = build_table(&tokenize_table_lines(raw));
        assert_eq!(table.header, cells(&["Name", "Age"]));
        assert_eq!(table.rows, vec![cells(&["Alice", "30"]), cells(&["Bob", "25"])]);
    }

    #[test]
    fn test_cells_trimmed_and_empty_cells_kept() {
        let table = build_table(&["|  Day 1 | | Read ch. 3  |"]);
        assert_eq!(table.header, cells(&["Day 1", "", "Read ch. 3"]));
        assert!(table.rows.is_empty());
    }

    #[test]
    fn test_separator_and_ragged_rows_kept() {
        let table = build_table(&["|a|b|", "|---|---|", "|1|2|3|"]);
        assert_eq!(table.rows[0], cells(&["---", "---"]));
        assert_eq!(table.rows[1].len(), 3);
    }

    #[test]
    fn test_no_lines() {
        let lines: [&str; 0] = [];
        assert_eq!(build_table(&lines), TableModel::default());
    }

    #[test]
    fn test_render_round_trip() {
        let table = TableModel {
            header: cells(&["Day", "Time Slot", "Activity"]),
            rows: vec![
                cells(&["1", "9-11", "Algebra"]),
                cells(&["2", "14-16", "Geometry review"]),
            ],
        };
        let rendered = render_table(&table);
        assert_eq!(build_table(&tokenize_table_lines(&rendered)), table);
    }

    #[test]
    fn test_empty_table_round_trip() {
        let table = TableModel::default();
        let rendered = render_table(&table);
        assert_eq!(rendered, "");
        assert_eq!(build_table(&tokenize_table_lines(&rendered)), table);
    }

    #[test]
    fn test_round_trip_trims_padding() {
        let table = TableModel {
            header: cells(&[" Name ", "Age"]),
            rows: vec![cells(&["Alice  ", " 30"])],
        };
        let reparsed = build_table(&tokenize_table_lines(&render_table(&table)));
        assert_eq!(reparsed.header, cells(&["Name", "Age"]));
        assert_eq!(reparsed.rows, vec![cells(&["Alice", "30"])]);
    }
}
