//! Human-readable estimates, costs and scores.

use crate::models::Difficulty;

/// Formats an effort estimate in hours.
///
/// Missing and zero estimates read "Not estimated"; anything under an hour
/// is shown in whole minutes.
///
/// ```rust
/// use waypoint_core::display::format_time_estimate;
///
/// assert_eq!(format_time_estimate(None), "Not estimated");
/// assert_eq!(format_time_estimate(Some(0.25)), "15 min");
/// assert_eq!(format_time_estimate(Some(1.0)), "1 hour");
/// assert_eq!(format_time_estimate(Some(2.5)), "2.5 hours");
/// assert_eq!(format_time_estimate(Some(3.0)), "3 hours");
/// ```
pub fn format_time_estimate(hours: Option<f64>) -> String {
    let hours = match hours {
        Some(h) if h != 0.0 && h.is_finite() => h,
        _ => return "Not estimated".to_string(),
    };

    if hours < 1.0 {
        format!("{} min", (hours * 60.0).round())
    } else if hours == 1.0 {
        "1 hour".to_string()
    } else if hours.fract() != 0.0 {
        format!("{hours:.1} hours")
    } else {
        format!("{hours} hours")
    }
}

/// Formats a cost in US dollars with thousands separators and at most two
/// decimals. Trailing zero decimals are dropped.
///
/// ```rust
/// use waypoint_core::display::format_cost;
///
/// assert_eq!(format_cost(None), "Cost unknown");
/// assert_eq!(format_cost(Some(0.0)), "Free");
/// assert_eq!(format_cost(Some(12.0)), "$12");
/// assert_eq!(format_cost(Some(3.456)), "$3.46");
/// ```
pub fn format_cost(cost: Option<f64>) -> String {
    let cost = match cost {
        None => return "Cost unknown".to_string(),
        Some(c) if c == 0.0 => return "Free".to_string(),
        Some(c) => c,
    };

    let cents = (cost.abs() * 100.0).round() as u64;
    let (whole, fraction) = (cents / 100, cents % 100);
    let sign = if cost < 0.0 { "-" } else { "" };

    let decimals = if fraction == 0 {
        String::new()
    } else if fraction % 10 == 0 {
        format!(".{}", fraction / 10)
    } else {
        format!(".{fraction:02}")
    };

    format!("{sign}${}{decimals}", group_thousands(whole))
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// Label for a plan health score out of 100.
///
/// A missing or zero score means the plan was never analyzed.
pub fn health_label(score: Option<u32>) -> &'static str {
    match score {
        None | Some(0) => "Not analyzed",
        Some(s) if s >= 80 => "Excellent",
        Some(s) if s >= 60 => "Good",
        Some(s) if s >= 40 => "Fair",
        Some(_) => "Needs Work",
    }
}

/// Label for an optional difficulty.
pub fn difficulty_label(difficulty: Option<Difficulty>) -> &'static str {
    difficulty.map_or("Unknown", |d| d.label())
}
