use std::io::{self, Write};

use crate::model::{BeltConstants, ControlParameters, StepSnapshot};

/// Summary statistics computed from a run's snapshot sequence.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub steps: usize,
    pub duration_s: f64,
    pub final_pos: f64,
    pub final_vel: f64,
    pub max_vel: f64,
    pub peak_power: f64,
    pub reached_end: bool,
    pub time_to_end: Option<f64>,
}

impl RunSummary {
    /// Compute summary from snapshot data. Empty runs yield a zero summary.
    pub fn from_snapshots(snapshots: &[StepSnapshot], constants: &BeltConstants) -> Self {
        let max_vel = snapshots.iter().map(|s| s.vel).fold(0.0_f64, f64::max);
        let peak_power = snapshots.iter().map(|s| s.power).fold(0.0_f64, f64::max);

        let time_to_end = snapshots
            .iter()
            .find(|s| s.pos >= constants.length)
            .map(|s| s.time);

        let (final_pos, final_vel, duration_s) = match snapshots.last() {
            Some(s) => (s.pos, s.vel, s.time),
            None => (0.0, 0.0, 0.0),
        };

        RunSummary {
            steps: snapshots.len(),
            duration_s,
            final_pos,
            final_vel,
            max_vel,
            peak_power,
            reached_end: time_to_end.is_some(),
            time_to_end,
        }
    }
}

/// Write run summary as JSON to a writer.
pub fn write_summary<W: Write>(
    writer: &mut W,
    params: &ControlParameters,
    summary: &RunSummary,
) -> io::Result<()> {
    writeln!(writer, "{{")?;
    writeln!(writer, "  \"parameters\": {{")?;
    writeln!(writer, "    \"mass_kg\": {:.2},", params.mass)?;
    writeln!(writer, "    \"v_ref_ms\": {:.2},", params.v_ref)?;
    writeln!(writer, "    \"friction\": {:.2},", params.friction)?;
    writeln!(writer, "    \"kp\": {:.1},", params.kp)?;
    writeln!(writer, "    \"tau_max_nm\": {:.1}", params.tau_max)?;
    writeln!(writer, "  }},")?;
    writeln!(writer, "  \"run\": {{")?;
    writeln!(writer, "    \"steps\": {},", summary.steps)?;
    writeln!(writer, "    \"duration_s\": {:.2},", summary.duration_s)?;
    writeln!(writer, "    \"final_pos_m\": {:.4},", summary.final_pos)?;
    writeln!(writer, "    \"final_vel_ms\": {:.4},", summary.final_vel)?;
    writeln!(writer, "    \"max_vel_ms\": {:.4},", summary.max_vel)?;
    writeln!(writer, "    \"peak_power_w\": {:.2},", summary.peak_power)?;
    writeln!(writer, "    \"reached_end\": {},", summary.reached_end)?;
    match summary.time_to_end {
        Some(t) => writeln!(writer, "    \"time_to_end_s\": {:.2}", t)?,
        None => writeln!(writer, "    \"time_to_end_s\": null")?,
    }
    writeln!(writer, "  }}")?;
    writeln!(writer, "}}")?;
    Ok(())
}

/// Write run summary JSON to a file.
pub fn write_summary_file(
    path: &str,
    params: &ControlParameters,
    summary: &RunSummary,
) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_summary(&mut file, params, summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{simulate, DEFAULT_NUM_STEPS};

    fn default_run() -> (Vec<StepSnapshot>, BeltConstants) {
        let constants = BeltConstants::default();
        let snaps = simulate(&constants, &ControlParameters::default(), DEFAULT_NUM_STEPS).unwrap();
        (snaps, constants)
    }

    #[test]
    fn summary_reports_arrival() {
        let (snaps, constants) = default_run();
        let s = RunSummary::from_snapshots(&snaps, &constants);
        assert!(s.reached_end);
        assert_eq!(s.final_pos, constants.length);
        assert_eq!(s.final_vel, 0.0);
        assert!(s.time_to_end.unwrap() < 20.0);
        assert!(s.max_vel > 0.0);
        assert!(s.peak_power > 0.0);
    }

    #[test]
    fn empty_run_yields_zero_summary() {
        let s = RunSummary::from_snapshots(&[], &BeltConstants::default());
        assert_eq!(s.steps, 0);
        assert!(!s.reached_end);
        assert!(s.time_to_end.is_none());
    }

    #[test]
    fn json_output_is_valid() {
        let (snaps, constants) = default_run();
        let summary = RunSummary::from_snapshots(&snaps, &constants);

        let mut buf = Vec::new();
        write_summary(&mut buf, &ControlParameters::default(), &summary).unwrap();
        let json = String::from_utf8(buf).unwrap();
        assert!(json.contains("\"parameters\""));
        assert!(json.contains("\"reached_end\": true"));
        assert!(json.contains("\"time_to_end_s\""));
    }
}
