use std::io::{self, Write};

use tickview_core::{
    format_iso_date, Chart, ComparisonView, DateRangeView, SingleTickerView, Table, TickerRecord,
    ViewPayload,
};

use crate::cli::OutputFormat;
use crate::commands::CommandOutput;
use crate::error::CliError;

pub fn render(output: &CommandOutput, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(output)?
            } else {
                serde_json::to_string(output)?
            };
            writeln!(out, "{payload}")?;
        }
        OutputFormat::Table => write_text(&mut out, output)?,
    }
    out.flush()?;
    Ok(())
}

fn write_text(out: &mut impl Write, output: &CommandOutput) -> io::Result<()> {
    match output {
        CommandOutput::Catalog { tickers } => {
            for ticker in tickers {
                writeln!(out, "{ticker}")?;
            }
            Ok(())
        }
        CommandOutput::View(ViewPayload::SingleTicker(view)) => write_single(out, view),
        CommandOutput::View(ViewPayload::Comparison(view)) => write_comparison(out, view),
        CommandOutput::View(ViewPayload::DateRange(view)) => write_range(out, view),
    }
}

fn write_single(out: &mut impl Write, view: &SingleTickerView) -> io::Result<()> {
    if let Some(description) = &view.description {
        writeln!(out, "{description}")?;
        writeln!(out)?;
    }
    writeln!(out, "Most recent")?;
    write_table(out, &view.most_recent)?;
    writeln!(out)?;
    write_chart(out, &view.chart)?;
    writeln!(out)?;
    writeln!(out, "History")?;
    write_table(out, &view.history)
}

fn write_comparison(out: &mut impl Write, view: &ComparisonView) -> io::Result<()> {
    write_chart(out, &view.chart)?;
    writeln!(out)?;
    writeln!(out, "{}", view.ticker_a)?;
    write_table(out, &view.history_a)?;
    writeln!(out)?;
    writeln!(out, "{}", view.ticker_b)?;
    write_table(out, &view.history_b)
}

fn write_range(out: &mut impl Write, view: &DateRangeView) -> io::Result<()> {
    writeln!(
        out,
        "{} from {} to {}",
        view.ticker,
        format_iso_date(view.start),
        format_iso_date(view.end)
    )?;
    write_table(out, &view.table)?;
    writeln!(out)?;
    write_chart(out, &view.chart)
}

/// One row per date of the shared time axis, one column per series. A series
/// without a point on that date shows `-`.
fn write_chart(out: &mut impl Write, chart: &Chart) -> io::Result<()> {
    writeln!(out, "{}", chart.title)?;

    let mut header = vec![String::from("date")];
    header.extend(
        chart
            .series
            .iter()
            .map(|series| format!("{} ({})", series.label(), chart.y_label)),
    );

    let lookups: Vec<Vec<_>> = chart
        .series
        .iter()
        .map(|series| series.points().collect())
        .collect();
    let rows = chart
        .time_axis()
        .into_iter()
        .map(|date| {
            let mut cells = vec![format_iso_date(date)];
            for points in &lookups {
                let cell = points
                    .binary_search_by_key(&date, |(point_date, _)| *point_date)
                    .map(|index| format_number(points[index].1))
                    .unwrap_or_else(|_| String::from("-"));
                cells.push(cell);
            }
            cells
        })
        .collect::<Vec<_>>();

    write_grid(out, &header, &rows)
}

fn write_table(out: &mut impl Write, table: &Table) -> io::Result<()> {
    let header: Vec<String> = table.columns().iter().map(ToString::to_string).collect();
    let rows: Vec<Vec<String>> = table.rows().iter().map(record_cells).collect();
    write_grid(out, &header, &rows)?;
    if rows.is_empty() {
        writeln!(out, "(no rows)")?;
    }
    Ok(())
}

fn record_cells(record: &TickerRecord) -> Vec<String> {
    vec![
        format_iso_date(record.date),
        format_number(record.open),
        format_number(record.high),
        format_number(record.low),
        format_number(record.close),
        format_number(record.adj_close),
        record.volume.to_string(),
    ]
}

fn format_number(value: f64) -> String {
    format!("{value}")
}

fn write_grid(out: &mut impl Write, header: &[String], rows: &[Vec<String>]) -> io::Result<()> {
    let mut widths: Vec<usize> = header.iter().map(String::len).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    write_line(out, header, &widths)?;
    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    write_line(out, &rule, &widths)?;
    for row in rows {
        write_line(out, row, &widths)?;
    }
    Ok(())
}

fn write_line(out: &mut impl Write, cells: &[String], widths: &[usize]) -> io::Result<()> {
    let line = cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(index, (cell, &width))| {
            if index == 0 {
                format!("{cell:<width$}")
            } else {
                format!("{cell:>width$}")
            }
        })
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(out, "{}", line.trim_end())
}
