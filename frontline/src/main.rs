mod options;

use anyhow::{anyhow, Error as AnyError};
use clap::Parser;
use icefront::{
    process, process_batch, summarize, BeamStrength, Config, CorrectedProfile,
    FeaturePoint, GroundTrackProfile, ProfileRecord, TrackRecord,
};
use log::info;
use options::{Cli, Command as CliCmd};
use std::io::Write;
use textplots::{Chart, Plot, Shape};

fn main() -> Result<(), AnyError> {
    let Cli {
        input,
        config,
        strong_only,
        overrides,
        cmd,
    } = Cli::parse();

    env_logger::init();

    let mut config = match config {
        Some(path) => Config::from_path(path)?,
        None => Config::default(),
    };
    overrides.apply(&mut config);
    config.validate()?;

    let mut records = ProfileRecord::read_all(&input)?;
    if strong_only {
        records.retain(|record| record.meta.strength == BeamStrength::Strong);
    }
    info!("loaded {} profiles from {}", records.len(), input.display());

    match cmd {
        CliCmd::Csv => print_csv(&process_batch(&records, &config))?,
        CliCmd::Json => print_json(&process_batch(&records, &config))?,
        CliCmd::Summary => print_summary(&process_batch(&records, &config))?,
        CliCmd::Plot { beam, cycle, track } => {
            let record = select_profile(&records, &beam, cycle, track)?;
            plot_ascii(&GroundTrackProfile::try_from(record)?, &config);
        }
    };
    Ok(())
}

/// Finds the single record for `beam` and `cycle`, narrowed to
/// `track` when given.
fn select_profile<'a>(
    records: &'a [ProfileRecord],
    beam: &str,
    cycle: u16,
    track: Option<u16>,
) -> Result<&'a ProfileRecord, AnyError> {
    let matches: Vec<&ProfileRecord> = records
        .iter()
        .filter(|r| {
            r.meta.beam == beam
                && r.meta.cycle == cycle
                && track.map_or(true, |track| r.meta.track == track)
        })
        .collect();
    match matches.as_slice() {
        [record] => Ok(*record),
        [] => match track {
            Some(track) => Err(anyhow!(
                "no profile for beam {beam}, cycle {cycle}, track {track}"
            )),
            None => Err(anyhow!("no profile for beam {beam}, cycle {cycle}")),
        },
        many => {
            let tracks: Vec<String> = many.iter().map(|r| r.meta.track.to_string()).collect();
            Err(anyhow!(
                "{} profiles for beam {beam}, cycle {cycle}, pick one with --track: {}",
                many.len(),
                tracks.join(", ")
            ))
        }
    }
}

const CSV_HEADER: &str = "beam,strength,cycle,track,region,direction,found,\
    a_index,a_lon,a_lat,a_h,b_index,b_lon,b_lat,b_h,h_diff,x_gap,rm_flag,\
    moat_index,moat_lon,moat_lat,moat_h,rampart_index,rampart_lon,rampart_lat,rampart_h,\
    dh,dx,center_time";

/// # Example
///
/// ```sh
/// cargo run --bin frontline -- --input profiles.json csv > fronts.csv
/// ```
fn print_csv(records: &[TrackRecord]) -> Result<(), AnyError> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{CSV_HEADER}")?;
    for record in records {
        writeln!(stdout, "{}", csv_row(record))?;
    }
    Ok(())
}

/// Formats one record; absent values are empty fields.
fn csv_row(record: &TrackRecord) -> String {
    fn opt<T: ToString>(value: Option<T>) -> String {
        value.map(|v| v.to_string()).unwrap_or_default()
    }

    fn point(point: Option<&FeaturePoint>) -> String {
        [
            opt(point.map(|p| p.index)),
            opt(point.map(|p| p.location.x())),
            opt(point.map(|p| p.location.y())),
            opt(point.map(|p| p.height)),
        ]
        .join(",")
    }

    let TrackRecord {
        meta,
        direction,
        found,
        front,
        rm_flag,
        feature,
        metrics,
    } = record;
    let strength = match meta.strength {
        BeamStrength::Strong => "strong",
        BeamStrength::Weak => "weak",
    };

    [
        meta.beam.clone(),
        strength.to_string(),
        meta.cycle.to_string(),
        meta.track.to_string(),
        meta.region.to_string(),
        opt(direction.map(|d| d.code())),
        found.to_string(),
        point(front.as_ref().map(|f| &f.a)),
        point(front.as_ref().map(|f| &f.b)),
        opt(front.as_ref().map(|f| f.h_diff)),
        opt(front.as_ref().map(|f| f.x_gap)),
        rm_flag.to_string(),
        point(feature.as_ref().map(|f| &f.moat)),
        point(feature.as_ref().map(|f| &f.rampart)),
        opt(metrics.as_ref().map(|m| m.dh)),
        opt(metrics.as_ref().map(|m| m.dx)),
        opt(metrics
            .as_ref()
            .and_then(|m| m.center_time)
            .map(|t| t.to_rfc3339())),
    ]
    .join(",")
}

fn print_json(records: &[TrackRecord]) -> Result<(), AnyError> {
    let json = serde_json::to_string(records)?;
    println!("{json}");
    Ok(())
}

fn print_summary(records: &[TrackRecord]) -> Result<(), AnyError> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "cycle,direction,profiles,fronts,features,mean_dh,mean_dx")?;
    for summary in summarize(records) {
        writeln!(
            stdout,
            "{},{},{},{},{},{},{}",
            summary.cycle,
            summary.direction.map(|d| d.code().to_string()).unwrap_or_default(),
            summary.profiles,
            summary.fronts,
            summary.features,
            summary.mean_dh.map(|v| format!("{v:.2}")).unwrap_or_default(),
            summary.mean_dx.map(|v| format!("{v:.1}")).unwrap_or_default(),
        )?;
    }
    Ok(())
}

/// Plots corrected heights against along-track distance and reports
/// what was detected on the profile.
fn plot_ascii(profile: &GroundTrackProfile, config: &Config) {
    let corrected = CorrectedProfile::new(profile, config);

    #[allow(clippy::cast_possible_truncation)]
    let plot_data: Vec<(f32, f32)> = corrected
        .distances()
        .iter()
        .zip(corrected.heights())
        .filter_map(|(distance, height)| Some((*distance as f32, (*height)? as f32)))
        .collect();
    let (xmin, xmax) = plot_data
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), (x, _)| {
            (lo.min(*x), hi.max(*x))
        });

    if plot_data.is_empty() {
        println!("no valid heights");
    } else {
        Chart::new(300, 150, xmin, xmax)
            .lineplot(&Shape::Points(&plot_data))
            .display();
    }

    let record = process(profile, config);
    match (&record.front, &record.feature, &record.metrics) {
        (None, _, _) => println!("no front"),
        (Some(front), None, _) => println!(
            "front at {:.0} m, {:.1} m high, no rampart-moat",
            front.b.distance, front.h_diff
        ),
        (Some(front), Some(feature), metrics) => {
            println!(
                "front at {:.0} m, {:.1} m high; moat at {:.0} m ({:.1} m), rampart at {:.0} m ({:.1} m)",
                front.b.distance,
                front.h_diff,
                feature.moat.distance,
                feature.moat.height,
                feature.rampart.distance,
                feature.rampart.height
            );
            if let Some(metrics) = metrics {
                let center = metrics
                    .center_time
                    .map_or_else(|| "out of range".to_string(), |t| t.to_rfc3339());
                println!(
                    "dh: {:.2} m, dx: {:.1} m, center: {center}",
                    metrics.dh, metrics.dx
                );
            }
        }
    }
}
