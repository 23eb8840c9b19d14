use weathereyes_domain::WeatherLabel;

/// Keyword hints per label, English and Polish. Checked in table order, so
/// earlier labels win when a text mentions several.
pub const KEYWORDS: &[(WeatherLabel, &[&str])] = &[
    (
        WeatherLabel::Sunny,
        &[
            "sun",
            "sunny",
            "bright",
            "blue sky",
            "słońce",
            "słonecznie",
            "czyste niebo",
        ],
    ),
    (
        WeatherLabel::Cloudy,
        &[
            "clouds",
            "cloudy",
            "overcast",
            "chmury",
            "pochmurno",
            "zachmurzone",
        ],
    ),
    (
        WeatherLabel::Rainy,
        &[
            "rain",
            "wet",
            "umbrella",
            "deszcz",
            "pada",
            "mokro",
            "parasol",
        ],
    ),
    (
        WeatherLabel::Snow,
        &["snow", "winter", "śnieg", "śnieżnie", "zima"],
    ),
    (
        WeatherLabel::Stormy,
        &["storm", "thunder", "lightning", "burza", "grzmot", "sztorm"],
    ),
    (WeatherLabel::Foggy, &["fog", "mist", "haze", "mgła", "mglisto"]),
    (
        WeatherLabel::Clear,
        &[
            "clear",
            "evening",
            "night",
            "czyste",
            "bezchmurnie",
            "wieczór",
            "noc",
        ],
    ),
];

/// First label whose keyword appears in `text`, case-insensitively.
pub fn match_keywords(text: &str) -> Option<WeatherLabel> {
    let lowered = text.to_lowercase();
    KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|word| lowered.contains(word)))
        .map(|(label, _)| *label)
}
