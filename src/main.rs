use belt_sim::io::RunSummary;
use belt_sim::sim::event::{self, EndOfBeltDetector, EventKind, SetpointDetector, StallDetector};
use belt_sim::{simulate, BeltConstants, ControlParameters, DEFAULT_NUM_STEPS};

fn main() {
    env_logger::init();

    // -----------------------------------------------------------------------
    // Scenario: reference rig, default control parameters
    // -----------------------------------------------------------------------
    let constants = BeltConstants::default();
    let params = ControlParameters::default();

    // -----------------------------------------------------------------------
    // Run simulation
    // -----------------------------------------------------------------------
    let snapshots = match simulate(&constants, &params, DEFAULT_NUM_STEPS) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    let summary = RunSummary::from_snapshots(&snapshots, &constants);

    let mut setpoint = SetpointDetector::new(params.v_ref, 0.05);
    let mut end = EndOfBeltDetector::new(constants.length);
    let mut stall = StallDetector::new(20);
    let events = event::scan(&snapshots, &mut [&mut setpoint, &mut end, &mut stall]);

    // -----------------------------------------------------------------------
    // Print results
    // -----------------------------------------------------------------------
    println!();
    println!("====================================================================");
    println!("  CONVEYOR BELT CLIMB — proportional velocity control");
    println!("====================================================================");
    println!();
    println!("  Belt");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Length:        {:>8.2} m     Rise:         {:>8.2} m",
        constants.length, constants.rise
    );
    println!(
        "  Incline:       {:>8.1} deg   Drum radius:  {:>8.2} m",
        constants.theta.to_degrees(),
        constants.drum_radius
    );
    println!(
        "  Efficiency:    {:>8.2}       Timestep:     {:>8.3} s",
        constants.efficiency, constants.dt
    );
    println!();

    println!("  Control Parameters");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Mass:          {:>8.1} kg    Setpoint:     {:>8.2} m/s",
        params.mass, params.v_ref
    );
    println!(
        "  Friction:      {:>8.2}       Gain (kp):    {:>8.0}",
        params.friction, params.kp
    );
    println!(
        "  Torque limit:  {:>8.1} Nm    Max force:    {:>8.1} N",
        params.tau_max,
        params.max_motor_force(&constants)
    );
    println!(
        "  Resistance:    {:>8.1} N     (gravity {:.1} + friction {:.1})",
        params.gravity_force(&constants) + params.friction_force(&constants),
        params.gravity_force(&constants),
        params.friction_force(&constants)
    );
    println!();

    println!("  Run Events");
    println!("  ──────────────────────────────────────────────────────────────────");
    if events.is_empty() {
        println!("  (none)");
    }
    for ev in &events {
        let label = match &ev.kind {
            EventKind::SetpointReached => "SETPOINT".to_string(),
            EventKind::EndOfBelt => "TOP".to_string(),
            EventKind::Stall => "STALL".to_string(),
            EventKind::Custom(s) => s.clone(),
        };
        println!(
            "  {:<9} t={:>6.2}s   s={:>5.2}m   v={:>5.2}m/s   tau={:>5.1}Nm",
            label, ev.time, ev.snapshot.pos, ev.snapshot.vel, ev.snapshot.torque
        );
    }
    println!();

    println!("  Performance Summary");
    println!("  ──────────────────────────────────────────────────────────────────");
    match summary.time_to_end {
        Some(t) => println!("  Time to top:   {:>8.2} s", t),
        None => println!("  Time to top:        did not arrive"),
    }
    println!("  Max velocity:  {:>8.2} m/s", summary.max_vel);
    println!("  Peak power:    {:>8.1} W", summary.peak_power);
    println!(
        "  Final state:   s = {:.2} m, v = {:.2} m/s after {:.1} s",
        summary.final_pos, summary.final_vel, summary.duration_s
    );
    println!();

    // -----------------------------------------------------------------------
    // Trajectory table (sampled)
    // -----------------------------------------------------------------------
    println!("  Trajectory");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  {:>7}  {:>8}  {:>9}  {:>8}  {:>8}  {:>7}",
        "t (s)", "s (m)", "v (m/s)", "tau (Nm)", "P (W)", "phase"
    );
    println!("  {}", "─".repeat(60));

    let sample_interval = (snapshots.len() / 30).max(1);
    for (i, s) in snapshots.iter().enumerate() {
        let print = i % sample_interval == 0 || i == 0 || i == snapshots.len() - 1;
        if !print {
            continue;
        }

        let phase = if s.pos >= constants.length {
            "TOP"
        } else if s.torque.abs() >= params.tau_max - 1e-9 {
            "RAMP"
        } else {
            "CRUISE"
        };

        println!(
            "  {:>7.2}  {:>8.2}  {:>9.2}  {:>8.1}  {:>8.1}  {:>7}",
            s.time, s.pos, s.vel, s.torque, s.power, phase
        );
    }

    println!();
    println!(
        "  Simulation: {} steps, dt={} s",
        snapshots.len(),
        constants.dt
    );
    println!("====================================================================");
    println!();
}
