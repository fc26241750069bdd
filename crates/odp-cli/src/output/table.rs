//! Plain aligned tables for `--format table`.

const MIN_WIDTH: usize = 6;
const SEPARATOR: &str = "  ";

/// Render `rows` under `headers`, shrinking the widest columns first when
/// `max_width` is set. Numeric cells are right-aligned.
#[must_use]
pub fn render_table(headers: &[&str], rows: &[Vec<String>], max_width: Option<usize>) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .chain([header.chars().count(), MIN_WIDTH])
                .max()
                .unwrap_or(MIN_WIDTH)
        })
        .collect();

    if let Some(max_width) = max_width {
        shrink_to_fit(&mut widths, headers, max_width);
    }

    let header_line = join_cells(headers.iter().copied(), &widths, |_| false);
    let divider = "-".repeat(header_line.chars().count());

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(header_line);
    lines.push(divider);
    for row in rows {
        let cells = (0..widths.len()).map(|index| row.get(index).map_or("-", String::as_str));
        lines.push(join_cells(cells, &widths, looks_numeric));
    }
    lines.join("\n")
}

fn join_cells<'a>(
    cells: impl Iterator<Item = &'a str>,
    widths: &[usize],
    right_align: impl Fn(&str) -> bool,
) -> String {
    cells
        .zip(widths)
        .map(|(cell, &width)| {
            let text = truncate(cell, width);
            if right_align(&text) {
                format!("{text:>width$}")
            } else {
                format!("{text:<width$}")
            }
        })
        .collect::<Vec<_>>()
        .join(SEPARATOR)
        .trim_end()
        .to_string()
}

fn shrink_to_fit(widths: &mut [usize], headers: &[&str], max_width: usize) {
    let separators = widths.len().saturating_sub(1) * SEPARATOR.len();
    while widths.iter().sum::<usize>() + separators > max_width {
        let widest = widths
            .iter()
            .enumerate()
            .filter(|(index, width)| **width > headers[*index].len().max(MIN_WIDTH))
            .max_by_key(|(_, width)| **width)
            .map(|(index, _)| index);
        let Some(index) = widest else {
            break;
        };
        widths[index] -= 1;
    }
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut out: String = value.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn looks_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.' | 'e' | 'E'))
        && trimmed.chars().any(|ch| ch.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn aligns_text_left_and_numbers_right() {
        let table = render_table(
            &["key", "value"],
            &[
                vec!["graph_density_mean".into(), "0.25".into()],
                vec!["self_consistency_mean".into(), "1.0".into()],
            ],
            None,
        );
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("key"));
        assert!(lines[1].chars().all(|c| c == '-'));
        assert!(lines[2].ends_with("  0.25"));
        assert!(lines[3].ends_with("   1.0"));
    }

    #[test]
    fn missing_cells_render_as_dash() {
        let table = render_table(&["paper_id", "year"], &[vec!["p1".into()]], None);
        assert!(table.lines().nth(2).is_some_and(|line| line.ends_with('-')));
    }

    #[test]
    fn wide_columns_shrink_to_max_width() {
        let long = "a".repeat(200);
        let table = render_table(&["id", "title"], &[vec!["p1".into(), long]], Some(60));
        for line in table.lines() {
            assert!(line.chars().count() <= 60, "{line}");
        }
        assert!(table.contains('…'));
    }

    #[test]
    fn numeric_detection() {
        assert!(looks_numeric("0.6"));
        assert!(looks_numeric("-1"));
        assert!(!looks_numeric("-"));
        assert!(!looks_numeric("p1"));
    }
}
