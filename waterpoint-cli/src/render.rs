//! Plain-text views of water points.

use std::io::{self, Write};

use chrono::{DateTime, Utc};
use waterpoint_core::browse::RECENT_REPORTS;
use waterpoint_core::{
    Location, MapLink, WaterPoint, format_distance, format_relative_date, haversine_distance,
    is_near, rating_stars, recent_reports, status_color, status_label,
};

const EMPTY_LIST_HINT: &str = "No water points found. Run `waterpoint add` to register one.";

/// One line per water point, in the order given.
pub(crate) fn write_list(
    out: &mut dyn Write,
    points: &[WaterPoint],
    user_location: Option<Location>,
) -> io::Result<()> {
    if points.is_empty() {
        return writeln!(out, "{EMPTY_LIST_HINT}");
    }
    for point in points {
        write_row(out, point, user_location)?;
    }
    Ok(())
}

fn write_row(
    out: &mut dyn Write,
    point: &WaterPoint,
    user_location: Option<Location>,
) -> io::Result<()> {
    let mut fields = vec![
        format!("{} FCFA", point.price),
        status_label(point.status).to_owned(),
    ];
    if !point.ratings.is_empty() {
        fields.push(rating_stars(point.rating));
    }
    if let Some(user) = user_location {
        let distance = format_distance(haversine_distance(point.location, user));
        if is_near(point, user) {
            fields.push(format!("{distance} (nearby)"));
        } else {
            fields.push(distance);
        }
    }
    writeln!(out, "{}  {} ({})", point.id, point.name, point.district)?;
    writeln!(out, "    {}", fields.join(" | "))
}

/// Everything the detail view shows, with the newest reports first.
pub(crate) fn write_detail(
    out: &mut dyn Write,
    point: &WaterPoint,
    now: DateTime<Utc>,
) -> io::Result<()> {
    writeln!(out, "{}", point.name)?;
    writeln!(
        out,
        "Status:      {} ({})",
        status_label(point.status),
        status_color(point.status)
    )?;
    writeln!(
        out,
        "Updated:     {}",
        format_relative_date(point.last_update, now)
    )?;
    writeln!(out, "Price (20 L): {} FCFA", point.price)?;
    writeln!(out, "District:    {}", point.district)?;
    writeln!(
        out,
        "Rating:      {} ({} ratings)",
        rating_stars(point.rating),
        point.ratings.len()
    )?;
    writeln!(
        out,
        "Location:    {}, {}",
        point.location.latitude, point.location.longitude
    )?;

    let reports = recent_reports(point, RECENT_REPORTS);
    if reports.is_empty() {
        return Ok(());
    }
    writeln!(out)?;
    writeln!(out, "Recent reports:")?;
    for report in reports.iter().rev() {
        writeln!(
            out,
            "  - [{}] {} ({})",
            report.kind,
            report.description,
            format_relative_date(report.date, now)
        )?;
    }
    Ok(())
}

pub(crate) fn write_map_link(out: &mut dyn Write, link: &MapLink) -> io::Result<()> {
    writeln!(out, "{}", link.primary)?;
    if link.fallback != link.primary {
        writeln!(out, "fallback: {}", link.fallback)?;
    }
    Ok(())
}
