//! Interactive source selection.

use std::io::{self, BufRead, Write};

use crate::config::CatalogSource;

/// Asks about every catalog entry in turn and returns the accepted ones.
///
/// Answers are `y` or `n` in any case; an empty answer counts as `y`, per
/// the `[Y/n]` convention. Anything else repeats the question.
///
/// # Errors
///
/// Returns an I/O error if reading or writing fails, or
/// [`io::ErrorKind::UnexpectedEof`] if input ends before every question is
/// answered.
pub fn select_sources<'a, R, W>(
    catalog: &'a [CatalogSource],
    input: &mut R,
    output: &mut W,
) -> io::Result<Vec<&'a CatalogSource>>
where
    R: BufRead,
    W: Write,
{
    let mut selected = Vec::new();
    let mut answer = String::new();

    for source in catalog {
        loop {
            writeln!(
                output,
                "Would you like to include the hosts file titled '{}'?",
                source.name
            )?;
            write!(output, "[Y/n]: ")?;
            output.flush()?;

            answer.clear();
            if input.read_line(&mut answer)? == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "input ended before all sources were answered",
                ));
            }

            match answer.trim().to_ascii_lowercase().as_str() {
                "" | "y" => {
                    selected.push(source);
                    break;
                }
                "n" => break,
                _ => writeln!(output, "Invalid input.")?,
            }
        }
    }

    Ok(selected)
}
