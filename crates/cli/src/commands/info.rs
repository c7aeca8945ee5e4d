//! `info` command implementation.

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::InfoArgs;

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    info!(config = %args.config.display(), "Reading configuration");

    let blueprint = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    if args.json {
        let json = config_loader::ConfigLoader::to_json(&blueprint)
            .context("Failed to serialize configuration")?;
        println!("{}", json);
        return Ok(());
    }

    println!("Configuration: {}", args.config.display());
    println!();
    println!("Input log:     {}", blueprint.input.path);
    println!(
        "Antenna:       angle {}°, offset ({}, {}) m",
        blueprint.antenna.mount_angle_deg, blueprint.antenna.offset_x, blueprint.antenna.offset_y
    );
    println!(
        "Conversion:    quality {:?}, altitude {:?}, heading {:?}",
        blueprint.conversion.quality, blueprint.conversion.altitude, blueprint.conversion.heading
    );
    if let Some(zone) = blueprint.conversion.fixed_zone {
        println!("Fixed zone:    {}", zone);
    }
    println!(
        "Visualization: {}",
        if blueprint.viz.enabled {
            blueprint.viz.addr.as_str()
        } else {
            "disabled"
        }
    );

    if args.sinks {
        println!();
        println!("Sinks ({}):", blueprint.sinks.len());
        for sink in &blueprint.sinks {
            println!("  - {} ({:?})", sink.name, sink.sink_type);
            for (key, value) in &sink.params {
                println!("      {} = {}", key, value);
            }
        }
    } else {
        println!("Sinks:         {}", blueprint.sinks.len());
    }

    Ok(())
}
