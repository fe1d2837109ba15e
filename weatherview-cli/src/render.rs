//! Terminal rendering of a `WeatherView`. No decisions about data happen here,
//! only about how to show it.

use chrono::NaiveDate;
use std::fmt::Write;
use weatherview_core::{CurrentConditions, DateClass, WeatherView};

const LONG_DATE: &str = "%A, %B %-d, %Y";

pub fn uv_level(uv: f64) -> &'static str {
    match uv {
        u if u <= 2.0 => "Low",
        u if u <= 5.0 => "Moderate",
        u if u <= 7.0 => "High",
        u if u <= 10.0 => "Very High",
        _ => "Extreme",
    }
}

fn title(class: DateClass) -> &'static str {
    match class {
        DateClass::Today => "Current Weather",
        DateClass::Past(_) => "Historical Weather",
        _ => "Weather Forecast",
    }
}

pub fn render_view(view: &WeatherView, date: Option<NaiveDate>, class: DateClass) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", title(class));
    match date {
        Some(d) => {
            let long = d.format(LONG_DATE).to_string();
            let _ = writeln!(out, "{long}");
            if class == DateClass::Today {
                let _ = writeln!(out, "\nToday's Details");
            } else {
                let _ = writeln!(out, "\n{long} Details");
            }
        }
        None => {
            let _ = writeln!(out, "\nToday's Details");
        }
    }

    render_current(&mut out, &view.current);

    let heading = match view.forecast.len() {
        0 => "Forecast".to_string(),
        n => format!("{n}-Day Forecast"),
    };
    let _ = writeln!(out, "\n{heading}");

    if view.forecast.is_empty() {
        let _ = writeln!(out, "  No forecast data available");
    }
    for day in &view.forecast {
        let marker = if Some(day.iso_date) == date { " <" } else { "" };
        let _ = writeln!(
            out,
            "  {:<4}{}  {}°/{}°{marker}",
            day.day_label, day.emoji, day.high_f, day.low_f
        );
    }

    out
}

fn render_current(out: &mut String, current: &CurrentConditions) {
    let rows: Vec<(&str, String)> = if current.unavailability().is_some() {
        vec![
            ("Temperature", "--°F".into()),
            ("Condition", current.condition.clone()),
            ("Feels like", "--°F".into()),
            ("Humidity", "--%".into()),
            ("Wind", "-- mph".into()),
            ("UV index", "--".into()),
            ("High/Low", "--°/--°".into()),
        ]
    } else {
        let condition =
            if current.condition.is_empty() { "Unknown".into() } else { current.condition.clone() };
        let high_low = match (current.high_f, current.low_f) {
            (Some(high), Some(low)) => format!("{high}°/{low}°"),
            _ => "N/A".into(),
        };

        vec![
            ("Temperature", format!("{}°F", current.temperature_f)),
            ("Condition", condition),
            ("Feels like", format!("{}°F", current.feels_like_f)),
            ("Humidity", format!("{}%", current.humidity_pct)),
            ("Wind", format!("{} mph", current.wind_mph)),
            ("UV index", format!("{} ({})", current.uv_index, uv_level(current.uv_index))),
            ("High/Low", high_low),
        ]
    };

    for (label, value) in rows {
        let _ = writeln!(out, "  {:<12} {value}", format!("{label}:"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weatherview_core::{ForecastDay, UnavailabilityReason};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    fn strip() -> Vec<ForecastDay> {
        (19..22)
            .map(|d| ForecastDay {
                day_label: date(d).format("%a").to_string(),
                iso_date: date(d),
                emoji: "☀️".into(),
                high_f: 70,
                low_f: 50,
            })
            .collect()
    }

    fn observed() -> CurrentConditions {
        CurrentConditions {
            temperature_f: 61,
            condition: "Sunny".into(),
            feels_like_f: 60,
            humidity_pct: 45,
            wind_mph: 7,
            uv_index: 6.0,
            high_f: Some(70),
            low_f: Some(50),
        }
    }

    #[test]
    fn uv_levels() {
        assert_eq!(uv_level(0.0), "Low");
        assert_eq!(uv_level(2.0), "Low");
        assert_eq!(uv_level(5.5), "High");
        assert_eq!(uv_level(10.0), "Very High");
        assert_eq!(uv_level(11.0), "Extreme");
    }

    #[test]
    fn renders_current_weather() {
        let view = WeatherView { current: observed(), forecast: strip() };

        let out = render_view(&view, None, DateClass::Today);

        assert!(out.starts_with("Current Weather\n"));
        assert!(out.contains("Today's Details"));
        assert!(out.contains("61°F"));
        assert!(out.contains("6 (High)"));
        assert!(out.contains("70°/50°"));
        assert!(out.contains("3-Day Forecast"));
        assert!(out.contains("Mon"));
    }

    #[test]
    fn renders_degraded_view_with_placeholders() {
        let reason = UnavailabilityReason::DayNotInPlan { day: 6 };
        let view = WeatherView { current: CurrentConditions::degraded(&reason), forecast: strip() };

        let out = render_view(&view, Some(date(25)), DateClass::MidGap(6));

        assert!(out.starts_with("Weather Forecast\n"));
        assert!(out.contains("Sunday, October 25, 2026 Details"));
        assert!(out.contains("--°F"));
        assert!(out.contains("--°/--°"));
        assert!(out.contains(&reason.to_string()));
    }

    #[test]
    fn marks_selected_day_and_handles_empty_strip() {
        let view = WeatherView { current: observed(), forecast: strip() };
        let out = render_view(&view, Some(date(20)), DateClass::NearFuture(1));
        assert_eq!(out.lines().filter(|l| l.ends_with(" <")).count(), 1);

        let empty = WeatherView { current: observed(), forecast: vec![] };
        let out = render_view(&empty, Some(date(1)), DateClass::Past(-18));
        assert!(out.starts_with("Historical Weather\n"));
        assert!(out.contains("\nForecast\n"));
        assert!(out.contains("No forecast data available"));
    }
}
