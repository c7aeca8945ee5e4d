//! Configuration validation module
//!
//! Validation rules:
//! - input.path non-empty
//! - antenna extrinsics finite
//! - fixed_zone within 1..=60 when set
//! - sink names unique and non-empty
//! - trajectory sinks carry a `path` param, udp sinks a parseable `addr`
//! - viz address parseable when viz is enabled

use std::collections::HashSet;
use std::net::SocketAddr;

use contracts::{PipelineError, RunBlueprint, SinkType};

/// Validate a RunBlueprint
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(blueprint: &RunBlueprint) -> Result<(), PipelineError> {
    validate_input(blueprint)?;
    validate_antenna(blueprint)?;
    validate_conversion(blueprint)?;
    validate_sinks(blueprint)?;
    validate_viz(blueprint)?;
    Ok(())
}

fn validate_input(blueprint: &RunBlueprint) -> Result<(), PipelineError> {
    if blueprint.input.path.is_empty() {
        return Err(PipelineError::config_validation(
            "input.path",
            "input path cannot be empty",
        ));
    }
    Ok(())
}

fn validate_antenna(blueprint: &RunBlueprint) -> Result<(), PipelineError> {
    let antenna = &blueprint.antenna;
    for (field, value) in [
        ("antenna.mount_angle_deg", antenna.mount_angle_deg),
        ("antenna.offset_x", antenna.offset_x),
        ("antenna.offset_y", antenna.offset_y),
    ] {
        if !value.is_finite() {
            return Err(PipelineError::config_validation(
                field,
                format!("must be finite, got {value}"),
            ));
        }
    }
    Ok(())
}

fn validate_conversion(blueprint: &RunBlueprint) -> Result<(), PipelineError> {
    if let Some(zone) = blueprint.conversion.fixed_zone {
        if !(1..=60).contains(&zone) {
            return Err(PipelineError::config_validation(
                "conversion.fixed_zone",
                format!("UTM zone must be within 1..=60, got {zone}"),
            ));
        }
    }
    Ok(())
}

/// Validate sink list (global name uniqueness + per-type params)
fn validate_sinks(blueprint: &RunBlueprint) -> Result<(), PipelineError> {
    let mut seen = HashSet::new();
    for (idx, sink) in blueprint.sinks.iter().enumerate() {
        if sink.name.is_empty() {
            return Err(PipelineError::config_validation(
                format!("sinks[{idx}].name"),
                "sink name cannot be empty",
            ));
        }
        if !seen.insert(&sink.name) {
            return Err(PipelineError::config_validation(
                format!("sinks[name={}]", sink.name),
                "duplicate sink name",
            ));
        }

        match sink.sink_type {
            SinkType::Trajectory => {
                if sink.params.get("path").is_none_or(|p| p.is_empty()) {
                    return Err(PipelineError::config_validation(
                        format!("sinks[name={}].params.path", sink.name),
                        "trajectory sink requires a non-empty 'path' param",
                    ));
                }
            }
            SinkType::Udp => {
                let addr = sink.params.get("addr").ok_or_else(|| {
                    PipelineError::config_validation(
                        format!("sinks[name={}].params.addr", sink.name),
                        "udp sink requires an 'addr' param",
                    )
                })?;
                addr.parse::<SocketAddr>().map_err(|e| {
                    PipelineError::config_validation(
                        format!("sinks[name={}].params.addr", sink.name),
                        format!("invalid socket address '{addr}': {e}"),
                    )
                })?;
            }
            SinkType::Log => {}
        }
    }
    Ok(())
}

fn validate_viz(blueprint: &RunBlueprint) -> Result<(), PipelineError> {
    if blueprint.viz.enabled {
        blueprint.viz.addr.parse::<SocketAddr>().map_err(|e| {
            PipelineError::config_validation(
                "viz.addr",
                format!("invalid socket address '{}': {e}", blueprint.viz.addr),
            )
        })?;
    }
    Ok(())
}
