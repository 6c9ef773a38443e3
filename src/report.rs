//! Plain-text rendering of catalogues and reports for the terminal.

use std::fmt;

use crate::analysis::{CorrelationReport, StockReport};
use crate::config::ANALYSIS;
use crate::data::demo::DEMO_SIGNATURE;
use crate::domain::StockCatalog;
use crate::models::{CorrelationBand, CorrelationMatrix, heat_color};
use crate::utils::time_utils::{format_utc, format_utc_short};

/// Printed in place of a cell whose pair never came back
pub const MISSING_CELL: &str = "--";

/// Appended to cells served by the demo generator
pub const SYNTHETIC_MARKER: &str = "*";

fn signed_money(value: f64) -> String {
    if value >= 0.0 {
        format!("+${:.2}", value)
    } else {
        format!("-${:.2}", value.abs())
    }
}

/// Hex heat colour of every matrix cell, row by row. Unobserved cells get no colour.
pub fn cell_colors(matrix: &CorrelationMatrix) -> Vec<Vec<Option<String>>> {
    let tickers = matrix.tickers();
    tickers
        .iter()
        .map(|a| {
            tickers
                .iter()
                .map(|b| {
                    matrix
                        .observed_value(a, b)
                        .map(|value| heat_color(value).to_hex_string())
                })
                .collect()
        })
        .collect()
}

impl fmt::Display for StockCatalog {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let width = self
            .entries()
            .iter()
            .map(|(_, ticker)| ticker.len())
            .max()
            .unwrap_or(0);
        writeln!(f, "{} stocks available", self.len())?;
        for (name, ticker) in self.entries() {
            writeln!(f, "  {:<width$}  {}", ticker, name, width = width)?;
        }
        Ok(())
    }
}

impl fmt::Display for StockReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.company {
            Some(company) => writeln!(f, "{} ({}) over {}", self.ticker, company, self.range)?,
            None => writeln!(f, "{} over {}", self.ticker, self.range)?,
        }

        if self.data.is_empty() {
            return writeln!(f, "  No price history in this window");
        }

        let s = &self.summary;
        writeln!(
            f,
            "  Current  ${:.2}   Average  ${:.2}",
            s.current_price, self.data.average_price
        )?;
        writeln!(
            f,
            "  Change   {} ({:+.2}%) {}",
            signed_money(s.change),
            s.change_pct,
            if s.is_up() { "up" } else { "down" }
        )?;
        writeln!(f, "  Range    ${:.2} .. ${:.2}", s.low, s.high)?;
        match &self.stats {
            Some(stats) => writeln!(
                f,
                "  Mean     ${:.2}   Std dev  ${:.2}",
                stats.mean, stats.sample_std_dev
            )?,
            None => writeln!(f, "  Not enough points for statistics")?,
        }

        if let (Some(first), Some(last)) = (self.data.price_history.first(), self.data.price_history.last()) {
            writeln!(
                f,
                "  History  {} points, {} to {} UTC",
                self.data.price_history.len(),
                format_utc(&first.observed_at),
                format_utc_short(&last.observed_at)
            )?;
        }
        for point in &self.data.price_history {
            writeln!(f, "    {}  {:>10.2}", format_utc_short(&point.observed_at), point.price)?;
        }
        Ok(())
    }
}

fn write_matrix(f: &mut fmt::Formatter, report: &CorrelationReport) -> fmt::Result {
    let matrix = &report.matrix;
    let precision = ANALYSIS.report.cell_precision;
    let marker_width = if report.synthetic_pairs().is_empty() { 0 } else { SYNTHETIC_MARKER.len() };
    let label_width = matrix.tickers().iter().map(|t| t.len()).max().unwrap_or(0);
    // Room for a sign, "1." and the decimals
    let cell_width = label_width.max(precision + 3 + marker_width) + 1;

    write!(f, "{:<label_width$}", "", label_width = label_width)?;
    for ticker in matrix.tickers() {
        write!(f, "{:>cell_width$}", ticker, cell_width = cell_width)?;
    }
    writeln!(f)?;

    for (row_ticker, _) in matrix.rows() {
        write!(f, "{:<label_width$}", row_ticker, label_width = label_width)?;
        for col_ticker in matrix.tickers() {
            let cell = match matrix.observed_value(row_ticker, col_ticker) {
                Some(value) if report.is_synthetic(row_ticker, col_ticker) => {
                    format!("{:.precision$}{}", value, SYNTHETIC_MARKER, precision = precision)
                }
                Some(value) => format!("{:.precision$}", value, precision = precision),
                None => MISSING_CELL.to_string(),
            };
            write!(f, "{:>cell_width$}", cell, cell_width = cell_width)?;
        }
        writeln!(f)?;
    }
    Ok(())
}

impl fmt::Display for CorrelationReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "Correlation over {} ({} tickers, {} of {} pairs)",
            self.range,
            self.tickers.len(),
            self.pairs.len(),
            self.requested_pairs()
        )?;
        writeln!(f)?;
        write_matrix(f, self)?;
        let synthetic = self.synthetic_pairs().len();
        if synthetic > 0 {
            writeln!(
                f,
                "{} {} of {} pairs are demo data, not backend prices",
                SYNTHETIC_MARKER,
                synthetic,
                self.pairs.len()
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Legend")?;
        for band in CorrelationBand::legend() {
            writeln!(
                f,
                "  {:<18} {:<13} {}",
                band.label(),
                band.range_label(),
                band.hex_color()
            )?;
        }

        if !self.pairs.is_empty() {
            writeln!(f)?;
            writeln!(f, "Pairs")?;
        }
        for pair in self.pairs.iter().take(ANALYSIS.report.pair_cards) {
            writeln!(
                f,
                "  {} / {}  {:+.3}  {}{}",
                pair.ticker_a,
                pair.ticker_b,
                pair.correlation,
                pair.band(),
                if pair.source == DEMO_SIGNATURE { " (demo data)" } else { "" }
            )?;
            writeln!(
                f,
                "    {}: Avg ${:.2}, σ ${:.2}",
                pair.ticker_a, pair.average_a, pair.stats_a.sample_std_dev
            )?;
            writeln!(
                f,
                "    {}: Avg ${:.2}, σ ${:.2}",
                pair.ticker_b, pair.average_b, pair.stats_b.sample_std_dev
            )?;
        }
        if self.pairs.len() > ANALYSIS.report.pair_cards {
            writeln!(
                f,
                "  ... and {} more",
                self.pairs.len() - ANALYSIS.report.pair_cards
            )?;
        }

        if !self.failures.is_empty() {
            writeln!(f)?;
            writeln!(f, "Failed pairs (shown as {})", MISSING_CELL)?;
            for failure in &self.failures {
                writeln!(
                    f,
                    "  {} / {}: {}",
                    failure.ticker_a, failure.ticker_b, failure.reason
                )?;
            }
        }
        Ok(())
    }
}
