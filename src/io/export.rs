//! CSV export of the monthly solar diagnostics.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::model::MonthlySolarDetail;

/// Column header for the monthly diagnostics CSV.
const HEADER: &str = "month_index,month,ghi_daily,dhi_daily,ghi_monthly,dhi_monthly,\
                      poa_monthly,beam_fraction,sunset_hour_angle_deg";

/// Exports monthly diagnostics to a CSV file at the given path.
///
/// Writes a header row followed by one row per month. Produces deterministic
/// output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_monthly_csv(monthly: &[MonthlySolarDetail], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_monthly_csv(monthly, buf)
}

/// Writes monthly diagnostics as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_monthly_csv(monthly: &[MonthlySolarDetail], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for d in monthly {
        wtr.write_record(&[
            d.month_index.to_string(),
            d.month_label.to_string(),
            format!("{:.2}", d.ghi_daily),
            format!("{:.2}", d.dhi_daily),
            format!("{:.3}", d.ghi_monthly),
            format!("{:.3}", d.dhi_monthly),
            format!("{:.3}", d.poa_monthly),
            format!("{:.2}", d.beam_fraction),
            format!("{:.1}", d.sunset_hour_angle_deg),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
