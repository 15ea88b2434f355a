use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint::Length, Rect};
use ratatui::style::{Style, Stylize};
use ratatui::widgets::{Block, BorderType, Padding, Row, Table, Widget};

use crate::summary::Totals;

const HEADERS: [&str; 2] = ["Stat", "Count"];
const COLUMN_SPACING: u16 = 3;

/// Final stat table, drawn off-screen and returned as plain text lines.
pub struct Report {
    rows: Vec<(&'static str, String)>,
}

impl Report {
    pub fn new(totals: &Totals) -> Self {
        let rows = vec![
            ("Total Hits", totals.total_hits.to_string()),
            ("Success", totals.success.to_string()),
            ("Failed", totals.failed.to_string()),
        ];
        Report { rows }
    }

    fn column_widths(&self) -> [u16; 2] {
        let mut widths = HEADERS.map(|header| header.len());
        for (label, count) in &self.rows {
            widths[0] = widths[0].max(label.len());
            widths[1] = widths[1].max(count.len());
        }
        widths.map(|width| u16::try_from(width).unwrap_or(u16::MAX))
    }

    fn get_box<'a>(&self) -> Block<'a> {
        Block::bordered()
            .border_type(BorderType::Plain)
            .padding(Padding::horizontal(1))
    }

    fn area(&self) -> Rect {
        let [stat, count] = self.column_widths();
        // borders + padding on each side
        let width = stat
            .saturating_add(count)
            .saturating_add(COLUMN_SPACING)
            .saturating_add(4);
        let rows = u16::try_from(self.rows.len()).unwrap_or(u16::MAX);
        // borders + header
        let height = rows.saturating_add(3);
        Rect::new(0, 0, width, height)
    }

    pub fn lines(&self) -> Vec<String> {
        let area = self.area();
        let mut buf = Buffer::empty(area);
        let [stat, count] = self.column_widths();
        let rows = self
            .rows
            .iter()
            .map(|(label, value)| Row::new(vec![label.to_string(), value.clone()]));
        Table::new(rows, [Length(stat), Length(count)])
            .header(Row::new(HEADERS).style(Style::default().bold()))
            .column_spacing(COLUMN_SPACING)
            .block(self.get_box())
            .render(area, &mut buf);

        let width = usize::from(area.width.max(1));
        buf.content()
            .chunks(width)
            .map(|line| {
                line.iter()
                    .map(|cell| cell.symbol())
                    .collect::<String>()
                    .trim_end()
                    .to_owned()
            })
            .collect()
    }

    pub fn render(&self) -> String {
        let mut out = self.lines().join("\n");
        out.push('\n');
        out
    }
}
