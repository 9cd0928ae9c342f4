use crate::relocate::RelocateResult;
use std::io::{self, Write};

/// Print the destination of every planned or completed move, one per line
pub fn display_move_report(result: &RelocateResult, writer: &mut impl Write) -> io::Result<()> {
    if result.dry_run {
        writeln!(writer, "Dry run: files that would be moved:")?;
    } else {
        writeln!(writer, "Moved files:")?;
    }

    for destination in result.destinations() {
        writeln!(writer, " - {}", destination.display())?;
    }

    Ok(())
}
