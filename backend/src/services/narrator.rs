//! Turns a predicted level into a readable traffic description.

use super::traffic_parameters::{is_evening_rush, is_morning_rush, is_rush_hour};
use crate::models::{FeatureInfo, TrafficLevel, TrafficNarration};

/// Average speed at or above which low traffic is described as free-flowing.
const GOOD_FLOW_SPEED: f64 = 60.0;

/// Describe a prediction for display.
pub fn narrate(level: TrafficLevel, info: &FeatureInfo) -> TrafficNarration {
    let params = info.traffic_parameters();
    let avg_speed = params.avg_speed();
    let vehicles = params.num_vehicles;

    let description = match level {
        TrafficLevel::Low if avg_speed >= GOOD_FLOW_SPEED => format!(
            "Trafik akışı iyi, yollar rahat. Ortalama hız {:.1} km/h.",
            avg_speed
        ),
        TrafficLevel::Low => format!(
            "Trafik akışı normal. Ortalama hız {:.1} km/h.",
            avg_speed
        ),
        TrafficLevel::Medium if info.is_weekend => format!(
            "Hafta sonu trafiği. Ortalama hız {:.1} km/h, yaklaşık {} araç.",
            avg_speed, vehicles
        ),
        TrafficLevel::Medium if is_rush_hour(info.hour) => format!(
            "Yoğun saatler yaklaşıyor, trafik yavaşlıyor. Ortalama hız {:.1} km/h, yaklaşık {} araç.",
            avg_speed, vehicles
        ),
        TrafficLevel::Medium => format!(
            "Orta yoğunlukta trafik. Ortalama hız {:.1} km/h, yaklaşık {} araç.",
            avg_speed, vehicles
        ),
        TrafficLevel::High if is_morning_rush(info.hour) => format!(
            "Sabah iş trafiği nedeniyle yoğunluk var. Ortalama hız {:.1} km/h, yaklaşık {} araç.",
            avg_speed, vehicles
        ),
        TrafficLevel::High if is_evening_rush(info.hour) => format!(
            "Akşam iş çıkışı trafiği nedeniyle yoğunluk var. Ortalama hız {:.1} km/h, yaklaşık {} araç.",
            avg_speed, vehicles
        ),
        TrafficLevel::High => format!(
            "Trafik çok yoğun. Ortalama hız {:.1} km/h, yaklaşık {} araç.",
            avg_speed, vehicles
        ),
    };

    TrafficNarration {
        level: level.label().to_string(),
        color: level.color().to_string(),
        description,
        avg_speed,
        vehicle_count: vehicles,
        speed_range: format!("{}-{} km/h", params.min_speed, params.max_speed),
    }
}
