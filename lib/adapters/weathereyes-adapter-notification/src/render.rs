//! Human readable alert text.

use std::fmt::Write;

use chrono::{DateTime, Utc};

use weathereyes_domain::{
    AggregateResult, AlertEvent, AlertPayload, Forecast, Millis, RenderedMessage, WeatherLabel,
};

pub fn render_message(event: &AlertEvent, location: &str) -> RenderedMessage {
    let (title, body, short) = match &event.payload {
        AlertPayload::Summary(result) => render_summary(result, location, event.created_at),
        AlertPayload::Transition {
            from,
            to,
            confidence,
        } => render_transition(*from, *to, *confidence, location, event.created_at),
        AlertPayload::Event {
            event_name,
            event_at,
            forecast,
        } => render_event(event_name, *event_at, forecast, location, event.created_at),
        AlertPayload::Trip {
            destination,
            departure_at,
            days,
        } => render_trip(destination, *departure_at, days),
        AlertPayload::Note { title, body } => (title.clone(), body.clone(), title.clone()),
    };
    RenderedMessage {
        alert_id: event.id,
        priority: event.priority,
        title,
        body,
        short,
    }
}

pub fn weather_emoji(label: WeatherLabel) -> &'static str {
    match label {
        WeatherLabel::Sunny => "☀️",
        WeatherLabel::Cloudy => "☁️",
        WeatherLabel::Rainy => "🌧️",
        WeatherLabel::Snow => "❄️",
        WeatherLabel::Stormy => "⛈️",
        WeatherLabel::Foggy => "🌫️",
        WeatherLabel::Clear => "🌙",
        WeatherLabel::Unknown => "🌤️",
    }
}

/// Confidence in [0, 1] as a percentage with one decimal.
pub fn percent(confidence: f64) -> String {
    format!("{:.1}", confidence * 100.0)
}

fn render_summary(
    result: &AggregateResult,
    location: &str,
    created_at: Millis,
) -> (String, String, String) {
    let label = result.dominant_label;
    let mut body = String::new();
    let _ = writeln!(body, "Date: {}", format_date(created_at));
    let _ = writeln!(body, "Location: {location}");
    let _ = writeln!(body, "{} Dominant weather: {label}", weather_emoji(label));
    let _ = writeln!(
        body,
        "Confidence: {} ({}%)",
        result.display_confidence(),
        percent(result.aggregate_confidence)
    );
    let _ = writeln!(
        body,
        "Analyzed {} items, {} usable",
        result.sample_size, result.valid_size
    );
    for (label, stats) in &result.distribution {
        let _ = writeln!(body, "• {label}: {} items", stats.count);
    }
    let short = format!(
        "WeatherEyes report: {label} ({}% confidence) from {} items",
        percent(result.aggregate_confidence),
        result.sample_size
    );
    (
        "Daily weather summary".to_string(),
        body.trim_end().to_string(),
        short,
    )
}

fn render_transition(
    from: WeatherLabel,
    to: WeatherLabel,
    confidence: f64,
    location: &str,
    created_at: Millis,
) -> (String, String, String) {
    let body = format!(
        "{} {from} → {} {to}\nConfidence: {}%\nLocation: {location}\nDetected: {}",
        weather_emoji(from),
        weather_emoji(to),
        percent(confidence),
        format_timestamp(created_at)
    );
    let short = format!(
        "WeatherEyes alert: weather changed from {from} to {to} in {location}. Confidence: {}%",
        percent(confidence)
    );
    ("Weather change detected".to_string(), body, short)
}

fn render_event(
    event_name: &str,
    event_at: Millis,
    forecast: &Forecast,
    location: &str,
    created_at: Millis,
) -> (String, String, String) {
    let minutes_until = (event_at.saturating_sub(created_at).max(0) / 60_000) as u64;
    let mut body = format!(
        "{event_name} starts in {}h {}min\nLocation: {location}\nTime: {}\n",
        minutes_until / 60,
        minutes_until % 60,
        format_timestamp(event_at)
    );
    let _ = writeln!(
        body,
        "{} Conditions: {}",
        weather_emoji(forecast.condition),
        forecast.condition
    );
    if let Some(temperature) = forecast.temperature_c {
        let _ = writeln!(body, "Temperature: {temperature}°C");
    }
    if let Some(wind) = forecast.wind_kmh {
        let _ = writeln!(body, "Wind: {wind} km/h");
    }
    if let Some(rain) = forecast.rain_chance {
        let _ = writeln!(body, "Rain: {rain}%");
    }
    let advice = recommendation(forecast);
    body.push_str(advice);

    let short = format!(
        "Event alert: {event_name} - {}. {advice}",
        forecast.condition
    );
    (format!("Upcoming event: {event_name}"), body, short)
}

fn render_trip(
    destination: &str,
    departure_at: Millis,
    days: &[Forecast],
) -> (String, String, String) {
    let mut body = format!(
        "Destination: {destination}\nDeparture: {}\n",
        format_date(departure_at)
    );
    for (offset, day) in days.iter().enumerate() {
        let date = departure_at + offset as i64 * 86_400_000;
        let _ = write!(body, "{}: {}", format_day(date), day.condition);
        if let Some(temperature) = day.temperature_c {
            let _ = write!(body, " ({temperature}°C)");
        }
        body.push('\n');
    }
    let short = format!("Trip to {destination}: {} days of forecast", days.len());
    (
        format!("Trip weather: {destination}"),
        body.trim_end().to_string(),
        short,
    )
}

/// Advice line for an event forecast. Rain outranks temperature.
pub fn recommendation(forecast: &Forecast) -> &'static str {
    let rain = forecast.rain_chance.unwrap_or(0);
    let temperature = forecast.temperature_c.unwrap_or(20.0);
    if rain > 70 {
        "Take an umbrella, rain is very likely."
    } else if rain > 30 {
        "Rain is possible, an umbrella is worth having."
    } else if temperature < 10.0 {
        "Dress warmly, it will be cold."
    } else if temperature > 25.0 {
        "Pleasant weather, light clothes will do."
    } else {
        "Good conditions for the event."
    }
}

fn to_datetime(millis: Millis) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or_default()
}

fn format_timestamp(millis: Millis) -> String {
    to_datetime(millis).format("%H:%M, %d.%m.%Y").to_string()
}

fn format_date(millis: Millis) -> String {
    to_datetime(millis).format("%d.%m.%Y").to_string()
}

fn format_day(millis: Millis) -> String {
    to_datetime(millis).format("%d.%m").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use weathereyes_domain::{AlertKind, AlertPriority, LabelStats};

    fn event(payload: AlertPayload) -> AlertEvent {
        AlertEvent {
            id: 7,
            kind: AlertKind::StateChange,
            priority: AlertPriority::High,
            payload,
            // 2024-05-10 12:30 UTC
            created_at: 1_715_344_200_000,
            sent: false,
        }
    }

    #[test]
    fn transition_message() {
        let message = render_message(
            &event(AlertPayload::Transition {
                from: WeatherLabel::Sunny,
                to: WeatherLabel::Rainy,
                confidence: 0.923,
            }),
            "Main Stage",
        );
        assert_eq!(message.alert_id, 7);
        assert_eq!(message.priority, AlertPriority::High);
        assert_eq!(message.title, "Weather change detected");
        assert!(message.body.contains("sunny → 🌧️ rainy"));
        assert!(message.body.contains("Confidence: 92.3%"));
        assert!(message.body.contains("Detected: 12:30, 10.05.2024"));
        assert!(message.short.contains("from sunny to rainy in Main Stage"));
    }

    #[test]
    fn summary_lists_distribution() {
        let mut distribution = BTreeMap::new();
        distribution.insert(
            WeatherLabel::Cloudy,
            LabelStats {
                count: 2,
                confidence_sum: 1.7,
                member_ids: vec!["a".into(), "b".into()],
            },
        );
        distribution.insert(
            WeatherLabel::Sunny,
            LabelStats {
                count: 1,
                confidence_sum: 0.9,
                member_ids: vec!["c".into()],
            },
        );
        let result = AggregateResult {
            dominant_label: WeatherLabel::Cloudy,
            aggregate_confidence: 2.6 / 3.0,
            distribution,
            sample_size: 4,
            valid_size: 3,
        };
        let message = render_message(&event(AlertPayload::Summary(result)), "Kraków");
        assert!(message.body.contains("Dominant weather: cloudy"));
        assert!(message.body.contains("Confidence: 0.867 (86.7%)"));
        assert!(message.body.contains("• cloudy: 2 items"));
        assert!(message.body.contains("• sunny: 1 items"));
        assert!(message.body.contains("Analyzed 4 items, 3 usable"));
    }

    #[test]
    fn event_message_includes_advice() {
        let forecast = Forecast {
            condition: WeatherLabel::Cloudy,
            temperature_c: Some(18.0),
            wind_kmh: None,
            rain_chance: Some(80),
        };
        let message = render_message(
            &event(AlertPayload::Event {
                event_name: "Keynote".into(),
                event_at: 1_715_344_200_000 + 90 * 60_000,
                forecast,
            }),
            "Hall A",
        );
        assert_eq!(message.title, "Upcoming event: Keynote");
        assert!(message.body.contains("starts in 1h 30min"));
        assert!(message.body.contains("Take an umbrella"));
        assert!(!message.body.contains("Wind"));
    }

    #[test]
    fn event_message_with_extreme_start_time() {
        let mut alert = event(AlertPayload::Event {
            event_name: "Ghost".into(),
            event_at: i64::MIN,
            forecast: Forecast::new(WeatherLabel::Clear),
        });
        alert.created_at = i64::MAX;
        let message = render_message(&alert, "Nowhere");
        assert!(message.body.contains("starts in 0h 0min"));
    }

    #[test]
    fn recommendation_order() {
        let mut forecast = Forecast::new(WeatherLabel::Sunny);
        assert_eq!(recommendation(&forecast), "Good conditions for the event.");
        forecast.temperature_c = Some(5.0);
        assert_eq!(recommendation(&forecast), "Dress warmly, it will be cold.");
        forecast.rain_chance = Some(40);
        assert_eq!(
            recommendation(&forecast),
            "Rain is possible, an umbrella is worth having."
        );
    }

    #[test]
    fn trip_lists_each_day() {
        let mut day = Forecast::new(WeatherLabel::Sunny);
        day.temperature_c = Some(25.0);
        let message = render_message(
            &event(AlertPayload::Trip {
                destination: "Gdańsk".into(),
                departure_at: 1_715_344_200_000,
                days: vec![day, Forecast::new(WeatherLabel::Rainy)],
            }),
            "ignored",
        );
        assert!(message.body.contains("10.05: sunny (25°C)"));
        assert!(message.body.contains("11.05: rainy"));
    }
}
