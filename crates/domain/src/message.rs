//! Forecast flavor messages and current-condition tips.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::weather::DailyForecast;

/// Clear days above this temperature get the "hot" flavor.
pub const HOT_THRESHOLD_C: f64 = 25.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageCategory {
    Rain,
    Snow,
    ClearHot,
    ClearMild,
    Cloudy,
    Default,
}

/// Pick the flavor category for a forecast day.
///
/// Checked in order: rain, snow, clear (split at [`HOT_THRESHOLD_C`]), cloud.
#[must_use]
pub fn categorize(condition: &str, temp_c: f64) -> MessageCategory {
    let condition = condition.to_lowercase();
    if condition.contains("rain") {
        MessageCategory::Rain
    } else if condition.contains("snow") {
        MessageCategory::Snow
    } else if condition.contains("clear") {
        if temp_c > HOT_THRESHOLD_C {
            MessageCategory::ClearHot
        } else {
            MessageCategory::ClearMild
        }
    } else if condition.contains("cloud") {
        MessageCategory::Cloudy
    } else {
        MessageCategory::Default
    }
}

/// Picks one message out of a non-empty list.
pub trait MessageChooser: Send + Sync {
    fn choose<'a>(&self, date: NaiveDate, messages: &'a [String]) -> &'a str;
}

/// Pseudo-random pick keyed on a seed and the forecast date.
///
/// A fixed seed replays the same picks; [`SeededChooser::from_clock`] varies
/// them from run to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeededChooser {
    seed: u64,
}

impl SeededChooser {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from the current time.
    #[must_use]
    pub fn from_clock() -> Self {
        Self::new(crate::time::now().timestamp_micros().cast_unsigned())
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for SeededChooser {
    fn default() -> Self {
        Self::from_clock()
    }
}

/// splitmix64 finalizer.
fn mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

impl MessageChooser for SeededChooser {
    fn choose<'a>(&self, date: NaiveDate, messages: &'a [String]) -> &'a str {
        let Ok(len) = u64::try_from(messages.len()) else {
            return "";
        };
        if len == 0 {
            return "";
        }
        let day = u64::from(date.num_days_from_ce().cast_unsigned());
        let index = usize::try_from(mix(self.seed ^ day) % len).unwrap_or(0);
        &messages[index]
    }
}

/// Message lists keyed by category.
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    messages: HashMap<MessageCategory, Vec<String>>,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        let entries: [(MessageCategory, &[&str]); 6] = [
            (
                MessageCategory::Rain,
                &[
                    "🌧️ Rain on the way. Keep an umbrella by the door.",
                    "🌧️ A good day for a book and a hot drink.",
                    "🌧️ Puddle season. Waterproof shoes recommended.",
                ],
            ),
            (
                MessageCategory::Snow,
                &[
                    "❄️ Snow expected. Bundle up and drive carefully.",
                    "❄️ Perfect weather for a snowman.",
                ],
            ),
            (
                MessageCategory::ClearHot,
                &[
                    "☀️ Hot and sunny. Stay hydrated and find some shade.",
                    "☀️ Sunscreen weather. Don't forget a hat.",
                ],
            ),
            (
                MessageCategory::ClearMild,
                &[
                    "🌤️ Clear skies and mild temperatures. Great for a walk.",
                    "🌤️ Pleasant and bright. Enjoy the day outside.",
                ],
            ),
            (
                MessageCategory::Cloudy,
                &[
                    "☁️ Grey skies, but still a fine day.",
                    "☁️ Clouds rolling in. Keep a light jacket handy.",
                ],
            ),
            (
                MessageCategory::Default,
                &["🌈 Stay prepared for anything the sky brings."],
            ),
        ];
        Self {
            messages: entries
                .into_iter()
                .map(|(category, lines)| {
                    (category, lines.iter().map(|s| (*s).to_string()).collect())
                })
                .collect(),
        }
    }
}

impl MessageCatalog {
    /// Build a catalog from explicit lists. Missing categories fall back to
    /// [`MessageCategory::Default`].
    #[must_use]
    pub fn new(messages: HashMap<MessageCategory, Vec<String>>) -> Self {
        Self { messages }
    }

    fn lines(&self, category: MessageCategory) -> &[String] {
        self.messages
            .get(&category)
            .filter(|lines| !lines.is_empty())
            .or_else(|| self.messages.get(&MessageCategory::Default))
            .map_or(&[], Vec::as_slice)
    }

    /// One `"{date}: {message}"` line per forecast day, in input order.
    #[must_use]
    pub fn forecast_messages(
        &self,
        chooser: &dyn MessageChooser,
        forecast: &[DailyForecast],
    ) -> Vec<String> {
        forecast
            .iter()
            .map(|day| {
                let category = categorize(&day.condition_main, day.temp_c);
                let message = chooser.choose(day.date, self.lines(category));
                format!("{}: {message}", day.date)
            })
            .collect()
    }
}

/// One advice line for the current condition.
#[must_use]
pub fn current_tip(condition: &str) -> &'static str {
    let condition = condition.to_lowercase();
    if condition.contains("rain") {
        "☔ It's going to rain! Don't forget your umbrella."
    } else if condition.contains("clear") {
        "☀️ It's a beautiful sunny day! Enjoy your time outside."
    } else if condition.contains("snow") {
        "❄️ It's snowing! Stay warm and safe."
    } else if condition.contains("cloud") {
        "⛅ A bit cloudy, but still a good day!"
    } else {
        "🌎 Stay prepared for any weather today!"
    }
}
