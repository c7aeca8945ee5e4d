//! `run` command implementation.

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::cli::RunArgs;
use crate::pipeline::{Pipeline, PipelineConfig};

/// Execute the `run` command
pub async fn run_pipeline(args: &RunArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration");

    // Validate config path
    if !args.config.exists() {
        anyhow::bail!("Configuration file not found: {}", args.config.display());
    }

    // Load and parse configuration
    let mut blueprint = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    // Apply CLI overrides
    if let Some(ref input) = args.input {
        info!(input = %input.display(), "Overriding input path from CLI");
        blueprint.input.path = input.display().to_string();
    }
    if let Some(angle) = args.antenna_angle {
        info!(angle, "Overriding antenna angle from CLI");
        blueprint.antenna.mount_angle_deg = angle;
    }
    if let Some(x) = args.antenna_offset_x {
        info!(x, "Overriding antenna offset x from CLI");
        blueprint.antenna.offset_x = x;
    }
    if let Some(y) = args.antenna_offset_y {
        info!(y, "Overriding antenna offset y from CLI");
        blueprint.antenna.offset_y = y;
    }
    if args.with_viz {
        blueprint.viz.enabled = true;
    }

    info!(
        input = %blueprint.input.path,
        antenna_angle = blueprint.antenna.mount_angle_deg,
        sinks = blueprint.sinks.len(),
        viz = blueprint.viz.enabled,
        "Configuration loaded"
    );

    // Dry run - just validate and exit
    if args.dry_run {
        info!("Dry run mode - configuration is valid, exiting");
        print_config_summary(&blueprint);
        return Ok(());
    }

    // Build pipeline configuration
    let pipeline_config = PipelineConfig {
        blueprint,
        max_poses: if args.max_poses == 0 {
            None
        } else {
            Some(args.max_poses)
        },
        metrics_port: if args.metrics_port == 0 {
            None
        } else {
            Some(args.metrics_port)
        },
    };

    // Create and run pipeline
    let pipeline = Pipeline::new(pipeline_config);

    // Setup graceful shutdown handler
    let shutdown_signal = setup_shutdown_signal();

    info!("Starting pipeline...");

    // Run pipeline with shutdown signal
    tokio::select! {
        result = pipeline.run() => {
            match result {
                Ok(stats) => {
                    info!(
                        poses_emitted = stats.poses_emitted,
                        records_dropped = stats.records_dropped,
                        duration_secs = stats.duration.as_secs_f64(),
                        "Pipeline completed successfully"
                    );

                    // Print detailed statistics
                    stats.print_summary();
                }
                Err(e) => {
                    return Err(e).context("Pipeline execution failed");
                }
            }
        }
        _ = shutdown_signal => {
            warn!("Received shutdown signal, stopping pipeline...");
        }
    }

    info!("GNSS Pose finished");
    Ok(())
}

/// Setup Ctrl+C and SIGTERM signal handlers
async fn setup_shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Print configuration summary for dry-run mode
fn print_config_summary(blueprint: &contracts::RunBlueprint) {
    println!("\n=== Configuration Summary ===\n");
    println!("Input:");
    println!("  Log: {}", blueprint.input.path);
    println!("\nAntenna:");
    println!("  Angle: {}°", blueprint.antenna.mount_angle_deg);
    println!(
        "  Offset: ({}, {}) m",
        blueprint.antenna.offset_x, blueprint.antenna.offset_y
    );
    println!("\nConversion:");
    println!("  Quality policy: {:?}", blueprint.conversion.quality);
    println!("  Altitude: {:?}", blueprint.conversion.altitude);
    println!("  Heading: {:?}", blueprint.conversion.heading);
    if let Some(zone) = blueprint.conversion.fixed_zone {
        println!("  Fixed UTM zone: {}", zone);
    }

    if !blueprint.sinks.is_empty() {
        println!("\nSinks ({}):", blueprint.sinks.len());
        for sink in &blueprint.sinks {
            println!("  - {} ({:?})", sink.name, sink.sink_type);
        }
    }

    if blueprint.viz.enabled {
        println!("\nVisualization: {}", blueprint.viz.addr);
    }

    println!();
}
