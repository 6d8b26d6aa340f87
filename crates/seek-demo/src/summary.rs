use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use seek_core::{ActivityKey, State};
use seek_demo::tour::TourReport;

pub fn print_summary(report: &TourReport) {
    let mut steps = Table::new();
    steps.set_header(vec![
        header_cell("#"),
        header_cell("Step"),
        header_cell("Current"),
        header_cell("Back-stack"),
        header_cell("Toast"),
    ]);
    apply_table_style(&mut steps);
    align_column(&mut steps, 0, CellAlignment::Right);
    for (index, record) in report.steps.iter().enumerate() {
        steps.add_row(vec![
            Cell::new(index + 1),
            Cell::new(&record.step),
            key_cell(record.current),
            stack_cell(&record.back_stack),
            record
                .toast
                .as_deref()
                .map_or_else(|| dim_cell("-"), Cell::new),
        ]);
    }
    println!("{steps}");

    let mut activities = Table::new();
    activities.set_header(vec![
        header_cell("Activity"),
        header_cell("Name"),
        header_cell("State"),
        header_cell("Parent"),
        header_cell("Window"),
        header_cell("Fragments"),
    ]);
    apply_summary_table_style(&mut activities);
    align_column(&mut activities, 4, CellAlignment::Center);
    for row in &report.activities {
        let fragments = if row.fragments.is_empty() {
            dim_cell("-")
        } else {
            let lines: Vec<String> = row
                .fragments
                .iter()
                .map(|(name, state)| {
                    let marker = if row.current_fragment.as_deref() == Some(name.as_str()) {
                        "*"
                    } else {
                        " "
                    };
                    format!("{marker}{name} ({state})")
                })
                .collect();
            Cell::new(lines.join("\n"))
        };
        activities.add_row(vec![
            Cell::new(row.key).add_attribute(Attribute::Bold),
            Cell::new(&row.name),
            state_cell(row.state),
            key_cell(row.parent),
            if row.windowed {
                Cell::new("yes").fg(Color::Cyan)
            } else {
                dim_cell("no")
            },
            fragments,
        ]);
    }
    println!("{activities}");
    println!(
        "Transitions: {} during the tour, {} during teardown",
        report.transitions, report.teardown_transitions
    );
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn state_cell(state: State) -> Cell {
    let color = match state {
        State::Resumed => Color::Green,
        State::Started | State::Created => Color::Blue,
        State::Paused => Color::Yellow,
        State::Stopped | State::Destroyed => Color::Red,
        State::NotDefined => Color::DarkGrey,
    };
    Cell::new(state).fg(color)
}

fn key_cell(key: Option<ActivityKey>) -> Cell {
    key.map_or_else(|| dim_cell("-"), Cell::new)
}

fn stack_cell(stack: &[ActivityKey]) -> Cell {
    if stack.is_empty() {
        return dim_cell("[]");
    }
    let names: Vec<&str> = stack.iter().map(ActivityKey::name).collect();
    Cell::new(format!("[{}]", names.join(", ")))
}

fn dim_cell(value: &str) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
