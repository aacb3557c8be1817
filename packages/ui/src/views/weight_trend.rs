//! Body-weight chart and the monthly report line under it.

use api::{weight_change, WeightEntry};
use dioxus::prelude::*;

const WIDTH: f64 = 320.0;
const HEIGHT: f64 = 120.0;
const PAD: f64 = 8.0;

/// "Waiting for data" below two entries, otherwise the change with one decimal, `+` for a gain.
pub fn format_weight_change(entries: &[WeightEntry]) -> String {
    match weight_change(entries) {
        Some(change) if change > 0.0 => format!("+{change:.1} kg"),
        Some(change) => format!("{change:.1} kg"),
        None => "Waiting for data".to_string(),
    }
}

/// SVG polyline points scaled into the chart box, oldest entry on the left.
fn polyline_points(entries: &[WeightEntry]) -> String {
    if entries.is_empty() {
        return String::new();
    }
    let (min, max) = entries
        .iter()
        .fold((f64::MAX, f64::MIN), |(lo, hi), e| (lo.min(e.weight), hi.max(e.weight)));
    let span = if max - min < f64::EPSILON { 1.0 } else { max - min };
    let step = if entries.len() > 1 {
        (WIDTH - 2.0 * PAD) / (entries.len() - 1) as f64
    } else {
        0.0
    };

    entries
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let x = PAD + step * i as f64;
            let y = HEIGHT - PAD - (e.weight - min) / span * (HEIGHT - 2.0 * PAD);
            format!("{x:.1},{y:.1}")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[component]
pub fn WeightTrend(entries: Vec<WeightEntry>) -> Element {
    let points = polyline_points(&entries);
    let report = format_weight_change(&entries);
    let latest = entries.last().map(|e| format!("{:.1} kg", e.weight));

    rsx! {
        div { class: "weight-trend",
            svg {
                class: "weight-trend-chart",
                view_box: "0 0 {WIDTH} {HEIGHT}",
                width: "100%",
                height: "{HEIGHT}",
                if entries.len() > 1 {
                    polyline {
                        points: "{points}",
                        fill: "none",
                        stroke: "currentColor",
                        stroke_width: "2",
                    }
                }
            }
            div { class: "weight-trend-report",
                if let Some(latest) = latest {
                    span { class: "weight-trend-latest", "Current: {latest}" }
                }
                span { class: "weight-trend-change", "Monthly report: {report}" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use api::Uuid;

    use super::*;

    fn entries(weights: &[f64]) -> Vec<WeightEntry> {
        weights
            .iter()
            .map(|w| WeightEntry {
                id: Uuid::nil(),
                client_id: Uuid::nil(),
                weight: *w,
                logged_at: Default::default(),
            })
            .collect()
    }

    #[test]
    fn report_waits_for_two_entries() {
        assert_eq!(format_weight_change(&entries(&[])), "Waiting for data");
        assert_eq!(format_weight_change(&entries(&[81.0])), "Waiting for data");
    }

    #[test]
    fn report_is_signed_with_one_decimal() {
        assert_eq!(format_weight_change(&entries(&[80.0, 78.7])), "-1.3 kg");
        assert_eq!(format_weight_change(&entries(&[70.0, 71.0, 72.5])), "+2.5 kg");
        assert_eq!(format_weight_change(&entries(&[80.0, 80.0])), "0.0 kg");
    }

    #[test]
    fn chart_spans_the_box() {
        let points = polyline_points(&entries(&[80.0, 90.0]));
        assert_eq!(points, "8.0,112.0 312.0,8.0");
        assert_eq!(polyline_points(&entries(&[75.0])), "8.0,112.0");
    }
}
