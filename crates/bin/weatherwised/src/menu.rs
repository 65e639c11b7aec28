//! Numbered text menu: add a city, list cities, get weather, exit.
//!
//! Cities are the favorites of one local user. The menu reads whole lines,
//! so it runs the same over a terminal or a scripted input in tests.

use std::io::{self, BufRead, Write};

use weatherwise_app::ports::{
    FavoriteRepository, ObservationRepository, UserRepository, WeatherGateway,
};
use weatherwise_app::services::account_service::AccountService;
use weatherwise_app::services::lookup_service::LookupService;
use weatherwise_domain::alert::Severity;
use weatherwise_domain::report::WeatherReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    AddCity,
    ListCities,
    GetWeather,
    Exit,
}

impl Choice {
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::AddCity),
            "2" => Some(Self::ListCities),
            "3" => Some(Self::GetWeather),
            "4" => Some(Self::Exit),
            _ => None,
        }
    }
}

pub struct Menu<'a, R, G, U, F> {
    lookup: &'a LookupService<R, G>,
    accounts: &'a AccountService<U, F>,
    user: String,
}

impl<'a, R, G, U, F> Menu<'a, R, G, U, F>
where
    R: ObservationRepository + Clone,
    G: WeatherGateway,
    U: UserRepository,
    F: FavoriteRepository,
{
    pub fn new(
        lookup: &'a LookupService<R, G>,
        accounts: &'a AccountService<U, F>,
        user: impl Into<String>,
    ) -> Self {
        Self {
            lookup,
            accounts,
            user: user.into(),
        }
    }

    /// Serve choices until the user exits or the input ends.
    ///
    /// Service failures are printed and the menu carries on.
    ///
    /// # Errors
    ///
    /// Returns an error only when reading input or writing output fails.
    pub async fn run(&self, mut input: impl BufRead, mut output: impl Write) -> io::Result<()> {
        loop {
            write_menu(&mut output)?;
            let Some(line) = read_line(&mut input)? else {
                writeln!(output)?;
                return Ok(());
            };

            match Choice::parse(&line) {
                Some(Choice::AddCity) => {
                    let Some(city) = prompt(&mut input, &mut output, "City name: ")? else {
                        return Ok(());
                    };
                    self.add_city(&city, &mut output).await?;
                }
                Some(Choice::ListCities) => self.list_cities(&mut output).await?,
                Some(Choice::GetWeather) => {
                    let Some(city) = prompt(&mut input, &mut output, "City name: ")? else {
                        return Ok(());
                    };
                    self.show_weather(&city, &mut output).await?;
                }
                Some(Choice::Exit) => {
                    writeln!(output, "Goodbye.")?;
                    return Ok(());
                }
                None => writeln!(
                    output,
                    "Invalid choice '{line}'. Please enter a number from 1 to 4."
                )?,
            }
        }
    }

    async fn add_city(&self, city: &str, output: &mut impl Write) -> io::Result<()> {
        match self.accounts.add_favorite(&self.user, city).await {
            Ok(favorite) => writeln!(output, "Added {}.", favorite.city),
            Err(error) => writeln!(output, "Error: {error}"),
        }
    }

    async fn list_cities(&self, output: &mut impl Write) -> io::Result<()> {
        match self.accounts.list_favorites(&self.user).await {
            Ok(favorites) if favorites.is_empty() => writeln!(output, "No saved cities yet."),
            Ok(favorites) => {
                writeln!(output, "Saved cities:")?;
                for (position, favorite) in favorites.iter().enumerate() {
                    writeln!(output, "  {}. {}", position + 1, favorite.city)?;
                }
                Ok(())
            }
            Err(error) => writeln!(output, "Error: {error}"),
        }
    }

    async fn show_weather(&self, city: &str, output: &mut impl Write) -> io::Result<()> {
        match self.lookup.lookup(city).await {
            Ok(report) => write_report(&report, output),
            Err(error) => writeln!(output, "Error: {error}"),
        }
    }
}

fn write_menu(output: &mut impl Write) -> io::Result<()> {
    writeln!(output)?;
    writeln!(output, "1. Add city")?;
    writeln!(output, "2. List cities")?;
    writeln!(output, "3. Get weather")?;
    writeln!(output, "4. Exit")?;
    write!(output, "Choose an option: ")?;
    output.flush()
}

fn prompt(
    input: &mut impl BufRead,
    output: &mut impl Write,
    label: &str,
) -> io::Result<Option<String>> {
    write!(output, "{label}")?;
    output.flush()?;
    read_line(input)
}

/// `None` at end of input.
fn read_line(input: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf.trim().to_string()))
}

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "info",
        Severity::Warning => "warning",
        Severity::Severe => "SEVERE",
    }
}

fn write_report(report: &WeatherReport, output: &mut impl Write) -> io::Result<()> {
    let current = &report.current;
    writeln!(output, "Weather in {}", current.city)?;
    match current.feels_like_c {
        Some(feels) => writeln!(
            output,
            "  Temperature: {:.1}°C (feels like {feels:.1}°C)",
            current.temp_c
        )?,
        None => writeln!(output, "  Temperature: {:.1}°C", current.temp_c)?,
    }
    writeln!(output, "  Conditions:  {}", current.condition_text())?;
    writeln!(output, "  Humidity:    {}%", current.humidity_pct)?;
    writeln!(output, "  Wind:        {:.1} m/s", current.wind_speed_mps)?;
    if let Some(aq) = report.air_quality {
        writeln!(output, "  Air quality: {} (AQI {})", aq.label(), aq.aqi)?;
    }
    writeln!(output, "  Tip: {}", report.tip)?;

    for alert in &report.alerts {
        writeln!(
            output,
            "  [{}] {}",
            severity_label(alert.severity),
            alert.message
        )?;
    }

    if !report.forecast.is_empty() {
        writeln!(output, "Forecast:")?;
        for entry in &report.forecast {
            writeln!(
                output,
                "  {}  {:.1}°C  {}  {}",
                entry.day.date.format("%a %d %b"),
                entry.day.temp_c,
                entry.day.condition_main,
                entry.message
            )?;
        }
    }
    if !report.recorded {
        writeln!(output, "  (this reading could not be saved to history)")?;
    }
    Ok(())
}
