//! Ad activation window checks. Always evaluated against the current time;
//! nothing is cached between frames.

use chrono::{DateTime, Utc};

use crate::components::vehicle::AdContent;

/// Whether `now` falls inside the ad's window. Both bounds are inclusive.
pub fn is_active(ad: &AdContent, now: DateTime<Utc>) -> bool {
    now >= ad.start_date && now <= ad.end_date
}

/// Text shown on the banner: the custom banner text, or the advertiser name.
pub fn banner_text(ad: &AdContent) -> &str {
    match ad.banner_text.as_deref() {
        Some(text) if !text.trim().is_empty() => text,
        _ => &ad.advertiser_name,
    }
}

/// The ad to display right now, if any.
pub fn displayable(ad: Option<&AdContent>, now: DateTime<Utc>) -> Option<&AdContent> {
    ad.filter(|ad| is_active(ad, now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn ad() -> AdContent {
        AdContent::new(
            "Acme Drones",
            Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 6, 30, 23, 59, 59).unwrap(),
        )
    }

    #[test]
    fn bounds_are_inclusive() {
        let ad = ad();
        assert!(is_active(&ad, ad.start_date));
        assert!(is_active(&ad, ad.end_date));
    }

    #[test]
    fn outside_window_is_inactive() {
        let ad = ad();
        assert!(!is_active(&ad, ad.end_date + Duration::seconds(1)));
        assert!(!is_active(&ad, ad.end_date + Duration::nanoseconds(1)));
        assert!(!is_active(&ad, ad.start_date - Duration::nanoseconds(1)));
    }

    #[test]
    fn banner_falls_back_to_advertiser() {
        let plain = ad();
        assert_eq!(banner_text(&plain), "Acme Drones");
        let custom = ad().with_banner_text("50% off today");
        assert_eq!(banner_text(&custom), "50% off today");
        let blank = ad().with_banner_text("   ");
        assert_eq!(banner_text(&blank), "Acme Drones");
    }

    #[test]
    fn displayable_filters_inactive_and_missing() {
        let ad = ad();
        assert!(displayable(None, ad.start_date).is_none());
        assert!(displayable(Some(&ad), ad.start_date).is_some());
        assert!(displayable(Some(&ad), ad.end_date + Duration::days(1)).is_none());
    }
}
