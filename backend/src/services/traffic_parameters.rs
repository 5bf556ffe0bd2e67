//! Rule-based synthesis of traffic covariates.
//!
//! No live sensor feed is available, so speed range and vehicle count are
//! estimated from the hour and the weekend flag. The table mirrors the
//! distribution the classifier was tuned on and must not drift.

use crate::models::TrafficParameters;

/// 23:00 through 05:59.
pub fn is_night(hour: u32) -> bool {
    hour <= 5 || hour >= 23
}

/// 07:00 through 09:59.
pub fn is_morning_rush(hour: u32) -> bool {
    (7..=9).contains(&hour)
}

/// 17:00 through 19:59.
pub fn is_evening_rush(hour: u32) -> bool {
    (17..=19).contains(&hour)
}

pub fn is_rush_hour(hour: u32) -> bool {
    is_morning_rush(hour) || is_evening_rush(hour)
}

/// 10:00 through 16:59.
pub fn is_midday(hour: u32) -> bool {
    (10..=16).contains(&hour)
}

/// Estimate traffic parameters for an hour of the day.
///
/// First matching rule wins. Rush hours only apply on weekdays.
pub fn synthesize(hour: u32, is_weekend: bool) -> TrafficParameters {
    if is_weekend {
        if is_night(hour) {
            TrafficParameters::new(55, 85, 80)
        } else if is_midday(hour) {
            TrafficParameters::new(35, 65, 350)
        } else {
            TrafficParameters::new(45, 75, 200)
        }
    } else if is_rush_hour(hour) {
        TrafficParameters::new(8, 30, 750)
    } else if is_night(hour) {
        TrafficParameters::new(60, 90, 100)
    } else if is_midday(hour) {
        TrafficParameters::new(25, 55, 400)
    } else {
        TrafficParameters::new(40, 70, 250)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_rush_hours() {
        for hour in [7, 8, 9, 17, 18, 19] {
            assert_eq!(synthesize(hour, false), TrafficParameters::new(8, 30, 750));
        }
    }

    #[test]
    fn test_weekday_night() {
        assert_eq!(synthesize(2, false), TrafficParameters::new(60, 90, 100));
        assert_eq!(synthesize(23, false), TrafficParameters::new(60, 90, 100));
        assert_eq!(synthesize(5, false), TrafficParameters::new(60, 90, 100));
    }

    #[test]
    fn test_weekday_midday_and_shoulders() {
        assert_eq!(synthesize(12, false), TrafficParameters::new(25, 55, 400));
        assert_eq!(synthesize(6, false), TrafficParameters::new(40, 70, 250));
        assert_eq!(synthesize(20, false), TrafficParameters::new(40, 70, 250));
        assert_eq!(synthesize(22, false), TrafficParameters::new(40, 70, 250));
    }

    #[test]
    fn test_weekend_rows() {
        assert_eq!(synthesize(0, true), TrafficParameters::new(55, 85, 80));
        assert_eq!(synthesize(13, true), TrafficParameters::new(35, 65, 350));
        // No rush hour on weekends.
        assert_eq!(synthesize(8, true), TrafficParameters::new(45, 75, 200));
        assert_eq!(synthesize(18, true), TrafficParameters::new(45, 75, 200));
    }

    #[test]
    fn test_speed_range_is_ordered_for_every_hour() {
        for hour in 0..24 {
            for weekend in [false, true] {
                let p = synthesize(hour, weekend);
                assert!(
                    p.min_speed <= p.max_speed,
                    "hour={} weekend={} gave {:?}",
                    hour,
                    weekend,
                    p
                );
            }
        }
    }

    #[test]
    fn test_hour_bands_do_not_overlap() {
        for hour in 0..24 {
            let bands = [is_night(hour), is_rush_hour(hour), is_midday(hour)];
            assert!(bands.iter().filter(|b| **b).count() <= 1, "hour {}", hour);
        }
    }
}
