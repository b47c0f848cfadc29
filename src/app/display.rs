use crate::app::page::{Page, Section, SelectList};
use std::fmt::{Display, Write};

const LABEL_WIDTH: usize = 24;

pub fn render_section(section: &Section) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", section.title);
    if let Some(description) = &section.description {
        let _ = writeln!(out, "{}", description);
    }
    for row in &section.rows {
        let _ = writeln!(out, "  {:<width$} {}", row.label, row.value, width = LABEL_WIDTH);
    }
    out
}

fn render_select<T: Clone + PartialEq + Display>(out: &mut String, list: &SelectList<T>) {
    let _ = writeln!(out, "[{}]", list.id());
    if list.is_empty() {
        let _ = writeln!(out, "  (empty)");
        return;
    }
    for (i, option) in list.options().iter().enumerate() {
        let marker = if i == list.selected_index() { '>' } else { ' ' };
        let _ = writeln!(out, " {} {}: {}", marker, i, option);
    }
}

/// 整頁輸出：選單、航班資訊、顯示區塊
pub fn render_page(page: &Page) -> String {
    let mut out = String::new();

    render_select(&mut out, &page.select_airline);
    render_select(&mut out, &page.select_account);
    render_select(&mut out, &page.populate_registered);
    render_select(&mut out, &page.populate_funded);
    render_select(&mut out, &page.populate_flights);
    let _ = writeln!(out, "  {}", page.flight_time);
    let _ = writeln!(out, "  {}", page.flight_airline);
    render_select(&mut out, &page.passenger_list);
    render_select(&mut out, &page.passenger_list2);

    for section in &page.display_wrapper {
        out.push('\n');
        out.push_str(&render_section(section));
    }
    if let Some(balance) = &page.display_balance {
        out.push('\n');
        out.push_str(&render_section(balance));
    }
    out
}
