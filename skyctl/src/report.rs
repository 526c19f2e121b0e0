//! Everything that ends up on `stdout`.
//!

use std::io::Write;

use chrono::DateTime;
use eyre::Result;
use tabled::builder::Builder;
use tabled::settings::Style;

use skysnap_formats::{StateList, StateVector};

use crate::Output;

/// Display the whole snapshot in the requested format.
///
pub fn report<W: Write>(out: &mut W, list: &StateList, format: Output) -> Result<()> {
    let when = match DateTime::from_timestamp(list.time, 0) {
        Some(tm) => tm.to_rfc3339(),
        None => "invalid".to_string(),
    };
    writeln!(
        out,
        "Snapshot time [{}] ({}), states [{} x StateVector]",
        list.time,
        when,
        list.len()
    )?;

    match format {
        Output::Text => {
            for sv in list {
                writeln!(out, "{}", sv)?;
            }
        }
        Output::Table => writeln!(out, "{}", table(list))?,
        Output::Json => writeln!(out, "{}", serde_json::to_string_pretty(list)?)?,
    }

    writeln!(out, "We have [{}] states", list.len())?;
    Ok(())
}

/// Tell people they can use their own account.
///
pub fn usage_hint<W: Write>(out: &mut W, name: &str) -> Result<()> {
    writeln!(
        out,
        "You can pass your own user credentials to this command, if you want to."
    )?;
    writeln!(out, "e.g. '{} username supersecretpassword'", name)?;
    Ok(())
}

fn table(list: &StateList) -> String {
    let header = vec![
        "ICAO24",
        "Callsign",
        "Country",
        "Pos. time",
        "Last contact",
        "Longitude",
        "Latitude",
        "Altitude",
        "Ground",
        "Velocity",
        "Heading",
        "V/S",
        "Sensors",
    ];

    let mut builder = Builder::default();
    builder.push_record(header);

    list.iter().for_each(|sv| builder.push_record(row(sv)));

    builder.build().with(Style::modern()).to_string()
}

fn row(sv: &StateVector) -> Vec<String> {
    let num = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_default();

    vec![
        sv.icao24.clone(),
        sv.callsign.clone().unwrap_or_default(),
        sv.origin_country.clone(),
        num(sv.time_position),
        num(sv.last_contact),
        num(sv.longitude),
        num(sv.latitude),
        num(sv.altitude),
        sv.on_ground.to_string(),
        num(sv.velocity),
        num(sv.true_track),
        num(sv.vertical_rate),
        sv.sensors
            .as_ref()
            .map(|s| format!("{s:?}"))
            .unwrap_or_default(),
    ]
}
