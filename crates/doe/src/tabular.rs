use crate::errors::{DoeError, Result};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use linfa::Float;
use ndarray::{Array1, ArrayBase, Data, Ix2};
use std::io::Write;

/// Writes a design as comma separated values.
///
/// The first row holds the headings, quoted when they contain a comma, a double quote
/// or a line break (inner double quotes are doubled). Then each sample is written on its
/// own `\n` terminated row, the j-th value printed with exactly `precisions[j]` decimals.
pub fn write_csv<W, F, S>(
    writer: W,
    samples: &ArrayBase<impl Data<Elem = F>, Ix2>,
    headings: &[S],
    precisions: &Array1<usize>,
) -> Result<()>
where
    W: Write,
    F: Float,
    S: AsRef<str>,
{
    let nx = samples.ncols();
    if headings.len() != nx {
        return Err(DoeError::InvalidConfigError(format!(
            "{} headings given for {nx} columns",
            headings.len()
        )));
    }
    if precisions.len() != nx {
        return Err(DoeError::InvalidConfigError(format!(
            "{} precisions given for {nx} columns",
            precisions.len()
        )));
    }

    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);
    wtr.write_record(headings.iter().map(|h| h.as_ref()))?;
    let mut record = Vec::with_capacity(nx);
    for row in samples.rows() {
        record.clear();
        record.extend(
            row.iter()
                .zip(precisions.iter())
                .map(|(v, &p)| format!("{v:.p$}")),
        );
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}
