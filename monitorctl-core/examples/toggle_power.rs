//! Example: Toggle the power state of display 1.
//!
//! Run with: `cargo run --example toggle_power`

use monitorctl_core::{DdcError, MonitorController, Target};

fn main() -> Result<(), DdcError> {
    // Initialize logging (optional)
    env_logger::init();

    // Create the controller backed by ddcutil on PATH
    let controller = MonitorController::system();

    println!("Detecting monitors...");
    for monitor in controller.list_monitors()? {
        println!(
            "Display {} on {}: {} {}",
            monitor.display,
            monitor.bus_path(),
            monitor.mfg,
            monitor.model
        );
    }

    let target = Target::Display(1);
    println!("Current power mode: 0x{:02x}", controller.get_power_mode(target)?);

    match controller.toggle_power(target) {
        Ok(state) => println!("Toggled to: {state}"),
        Err(e) => eprintln!("Error toggling power: {e}"),
    }

    Ok(())
}
