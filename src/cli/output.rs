use crate::cli::theme::CliTheme;
use crate::model::{Application, StatusCount};
use crossterm::style::Stylize;
use std::io::IsTerminal;

const HEADERS: [&str; 10] = [
    "ID", "COMPANY", "ROLE", "LOCATION", "DATE", "STATUS", "SOURCE", "SALARY", "NOTES", "UPDATED",
];

pub fn print_applications(applications: &[Application], theme: &CliTheme) {
    if applications.is_empty() {
        println!("No applications found.");
        return;
    }

    let rows: Vec<[String; 10]> = applications.iter().map(application_row).collect();
    let widths = column_widths(&HEADERS, &rows);
    let use_color = theme.enabled && std::io::stdout().is_terminal();

    let header_cells: Vec<String> = HEADERS
        .iter()
        .zip(widths)
        .map(|(text, width)| render_cell(text, width, theme.header, use_color))
        .collect();
    println!("{}", header_cells.join("  ").trim_end());

    for row in &rows {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(column, text)| {
                render_cell(text, widths[column], body_color(theme, column), use_color)
            })
            .collect();
        println!("{}", cells.join("  ").trim_end());
    }
}

pub fn print_stats(counts: &[StatusCount], theme: &CliTheme) {
    if counts.is_empty() {
        println!("No data to show.");
        return;
    }

    let rows: Vec<[String; 2]> = counts
        .iter()
        .map(|count| [count.status.clone(), count.count.to_string()])
        .collect();
    let widths = column_widths(&["STATUS", "COUNT"], &rows);
    let use_color = theme.enabled && std::io::stdout().is_terminal();

    println!(
        "{}  {}",
        render_cell("STATUS", widths[0], theme.header, use_color),
        render_cell("COUNT", widths[1], theme.header, use_color).trim_end()
    );
    for row in &rows {
        println!(
            "{}  {}",
            render_cell(&row[0], widths[0], theme.status, use_color),
            render_cell(&row[1], widths[1], theme.muted, use_color).trim_end()
        );
    }
}

fn application_row(application: &Application) -> [String; 10] {
    [
        application.id.to_string(),
        application.company.clone(),
        application.role.clone(),
        or_dash(&application.location),
        or_dash(&application.date_applied),
        application.status.clone(),
        or_dash(&application.source),
        or_dash(&application.salary),
        or_dash(&application.notes),
        application.last_updated.clone(),
    ]
}

fn or_dash(value: &str) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}

fn column_widths<const N: usize>(headers: &[&str; N], rows: &[[String; N]]) -> [usize; N] {
    let mut widths = headers.map(|header| header.chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }
    widths
}

fn body_color(theme: &CliTheme, column: usize) -> crossterm::style::Color {
    match column {
        0 => theme.id,
        1 => theme.company,
        2 => theme.role,
        5 => theme.status,
        _ => theme.muted,
    }
}

fn render_cell(text: &str, width: usize, color: crossterm::style::Color, use_color: bool) -> String {
    colorize(&format!("{text:<width$}"), color, use_color)
}

fn colorize(text: &str, color: crossterm::style::Color, enabled: bool) -> String {
    if enabled {
        format!("{}", text.with(color))
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::style::Color;

    fn application(id: i64, company: &str, status: &str) -> Application {
        Application {
            id,
            company: company.to_string(),
            role: "SWE".to_string(),
            location: String::new(),
            date_applied: "2025-11-01".to_string(),
            status: status.to_string(),
            source: String::new(),
            salary: String::new(),
            notes: String::new(),
            last_updated: "2025-11-01T12:00:00.000000Z".to_string(),
        }
    }

    #[test]
    fn colorize_disabled_returns_plain_text() {
        assert_eq!(colorize("test", Color::Cyan, false), "test");
    }

    #[test]
    fn colorize_enabled_returns_ansi_colored() {
        let result = colorize("test", Color::Cyan, true);
        assert!(result.contains("\x1b["));
        assert!(result.contains("test"));
    }

    #[test]
    fn render_cell_pads_to_width() {
        assert_eq!(render_cell("ab", 5, Color::White, false), "ab   ");
    }

    #[test]
    fn column_widths_cover_headers_and_cells() {
        let rows = vec![
            ["1".to_string(), "Globex Industries".to_string()],
            ["12".to_string(), "ACME".to_string()],
        ];
        let widths = column_widths(&["ID", "COMPANY"], &rows);
        assert_eq!(widths, [2, 17]);
    }

    #[test]
    fn application_row_replaces_empty_optionals_with_dash() {
        let row = application_row(&application(3, "ACME", "applied"));
        assert_eq!(row[0], "3");
        assert_eq!(row[1], "ACME");
        assert_eq!(row[3], "-");
        assert_eq!(row[4], "2025-11-01");
        assert_eq!(row[5], "applied");
    }

    // print_applications and print_stats write straight to stdout; the CLI
    // tests in tests/cli.rs assert on their rendered output.
}
