use std::io::{self, Write};

use crate::model::StepSnapshot;

/// Write a snapshot sequence to CSV format.
///
/// Columns: time, vel, torque, power, pos, x, y
pub fn write_snapshots<W: Write>(writer: &mut W, snapshots: &[StepSnapshot]) -> io::Result<()> {
    writeln!(writer, "time,vel,torque,power,pos,x,y")?;

    for s in snapshots {
        writeln!(
            writer,
            "{:.4},{:.4},{:.4},{:.4},{:.4},{:.4},{:.4}",
            s.time, s.vel, s.torque, s.power, s.pos, s.world.x, s.world.y,
        )?;
    }

    Ok(())
}

/// Write a snapshot sequence to a CSV file at the given path.
pub fn write_snapshots_file(path: &str, snapshots: &[StepSnapshot]) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_snapshots(&mut file, snapshots)
}
