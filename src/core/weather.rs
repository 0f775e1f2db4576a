// AgroCast - core/weather.rs
//
// Field conditions for the dashboard. The only source today is a mock that
// draws readings from fixed ranges; a real forecast API would implement
// `WeatherSource` as well.

use crate::core::model::{RiskLevel, WeatherReading};
use crate::util::constants::{
    MOCK_HUMIDITY_PCT, MOCK_TEMPERATURE_C, MOCK_WEATHER_DESCRIPTION, MOCK_WIND_KMH,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Anything that can report current field weather.
pub trait WeatherSource: Send {
    fn current(&mut self) -> WeatherReading;
}

/// Random weather within plausible growing-season ranges.
///
/// Temperature 28-38 C, humidity 60-90 %, wind 5-15 km/h; the risk level is
/// drawn independently and uniformly.
#[derive(Debug)]
pub struct MockWeather<R: Rng> {
    rng: R,
}

impl MockWeather<StdRng> {
    /// Mock source seeded from operating-system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl<R: Rng> MockWeather<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + Send> WeatherSource for MockWeather<R> {
    fn current(&mut self) -> WeatherReading {
        let reading = WeatherReading {
            temperature_c: draw(&mut self.rng, MOCK_TEMPERATURE_C),
            humidity_pct: draw(&mut self.rng, MOCK_HUMIDITY_PCT),
            wind_speed_kmh: draw(&mut self.rng, MOCK_WIND_KMH),
            description: MOCK_WEATHER_DESCRIPTION.to_string(),
            risk_level: RiskLevel::all()[self.rng.gen_range(0..RiskLevel::all().len())],
        };
        tracing::debug!(
            temperature = reading.temperature_c,
            humidity = reading.humidity_pct,
            wind = reading.wind_speed_kmh,
            risk = reading.risk_level.label(),
            "Mock weather generated"
        );
        reading
    }
}

/// `min + uniform[0, 1) * span`.
fn draw<R: Rng>(rng: &mut R, (min, span): (f64, f64)) -> f64 {
    min + rng.gen::<f64>() * span
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_readings_within_ranges() {
        let mut source = MockWeather::new(StdRng::seed_from_u64(7));
        for _ in 0..500 {
            let w = source.current();
            assert!((28.0..=38.0).contains(&w.temperature_c), "{}", w.temperature_c);
            assert!((60.0..=90.0).contains(&w.humidity_pct), "{}", w.humidity_pct);
            assert!((5.0..=15.0).contains(&w.wind_speed_kmh), "{}", w.wind_speed_kmh);
            assert_eq!(w.description, "Partly cloudy");
        }
    }

    #[test]
    fn test_all_risk_levels_occur() {
        let mut source = MockWeather::new(StdRng::seed_from_u64(42));
        let mut seen = std::collections::HashSet::new();
        for _ in 0..300 {
            seen.insert(source.current().risk_level);
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_same_seed_same_readings() {
        let mut a = MockWeather::new(StdRng::seed_from_u64(1));
        let mut b = MockWeather::new(StdRng::seed_from_u64(1));
        assert_eq!(a.current(), b.current());
    }
}
