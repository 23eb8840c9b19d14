use chrono::Utc;

/// Unix epoch milliseconds.
pub type Millis = i64;

pub fn now_millis() -> Millis {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_millis_tracks_wall_clock() {
        let before = Utc::now().timestamp_millis();
        let now = now_millis();
        let after = Utc::now().timestamp_millis();
        assert!(before <= now && now <= after);
        // 2024-01-01T00:00:00Z
        assert!(now > 1_704_067_200_000);
    }
}
