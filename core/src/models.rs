// core/src/models.rs
use std::collections::BTreeMap;

use chrono::{DateTime, Days, NaiveDate};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::DaylightError;
use crate::units::{speed_kmh, RoundTo, Units};

/// Et klatresegment med KOM-tid og rytterens egen beste tid.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub name: String,
    pub distance_km: f64,
    /// Distanse slik den står i listen ("1.43 km")
    pub distance_label: String,
    /// Stigning slik den står i listen (enhet varierer)
    pub climb: String,
    /// Kjøreretning i grader [0, 360)
    pub direction_deg: f64,
    /// Retningen slik den står i listen ("E", "90")
    pub direction_label: String,
    pub kom_holder: String,
    pub kom_time_secs: u32,
    pub my_rank: u32,
    pub my_time_secs: u32,
}

/// Hva som mangler for å ta KOM-en.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KomGap {
    pub kom_speed: f64,
    pub my_speed: f64,
    /// min tid - KOM-tid (sekunder, positiv = vi er tregere)
    pub time_gap_secs: i64,
    /// KOM-fart - min fart
    pub speed_gap: f64,
}

impl Segment {
    /// Rytteren har allerede KOM-en.
    pub fn kom_held(&self) -> bool {
        self.my_rank == 1
    }

    /// Farter regnes ut fra distanse og tid, ikke fra fart-kolonnene.
    pub fn kom_gap(&self, units: Units) -> KomGap {
        let kom_speed = units.speed_from_kmh(speed_kmh(self.distance_km, self.kom_time_secs));
        let my_speed = units.speed_from_kmh(speed_kmh(self.distance_km, self.my_time_secs));
        KomGap {
            kom_speed,
            my_speed,
            time_gap_secs: self.my_time_secs as i64 - self.kom_time_secs as i64,
            speed_gap: (kom_speed - my_speed).round_to(2),
        }
    }
}

/// Ett prognosepunkt fra værleverandøren.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSample {
    pub timestamp: DateTime<Tz>,
    /// Vindhastighet i konfigurert enhet (mph / m/s)
    pub wind_speed: f64,
    /// Hvorfra vinden kommer, grader [0, 360)
    pub wind_deg: f64,
    pub wind_gust: Option<f64>,
    pub temperature: f64,
    /// Leverandørens ikonkode ("01d")
    pub sky_code: String,
}

impl WeatherSample {
    pub fn local_date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
}

/// Soloppgang–solnedgang for én dato.
#[derive(Debug, Clone, PartialEq)]
pub struct DayWindow {
    date: NaiveDate,
    sunrise: DateTime<Tz>,
    sunset: DateTime<Tz>,
}

impl DayWindow {
    pub fn new(
        date: NaiveDate,
        sunrise: DateTime<Tz>,
        sunset: DateTime<Tz>,
    ) -> Result<Self, DaylightError> {
        if sunrise >= sunset {
            return Err(DaylightError::Inverted {
                date,
                sunrise: sunrise.to_rfc3339(),
                sunset: sunset.to_rfc3339(),
            });
        }
        Ok(Self { date, sunrise, sunset })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn sunrise(&self) -> DateTime<Tz> {
        self.sunrise
    }

    pub fn sunset(&self) -> DateTime<Tz> {
        self.sunset
    }

    /// Halvåpent intervall: soloppgang teller, solnedgang gjør det ikke.
    pub fn contains(&self, t: &DateTime<Tz>) -> bool {
        self.sunrise <= *t && *t < self.sunset
    }
}

/// Dagsvinduer indeksert på lokal dato.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DaylightCalendar {
    windows: BTreeMap<NaiveDate, DayWindow>,
}

impl DaylightCalendar {
    pub fn new(windows: impl IntoIterator<Item = DayWindow>) -> Self {
        Self {
            windows: windows.into_iter().map(|w| (w.date, w)).collect(),
        }
    }

    pub fn get(&self, date: NaiveDate) -> Option<&DayWindow> {
        self.windows.get(&date)
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Vinduet som inneholder `t`. Sjekker egen dato og dagen før
    /// (solnedgang etter lokal midnatt).
    pub fn window_containing(&self, t: &DateTime<Tz>) -> Option<&DayWindow> {
        let date = t.date_naive();
        let own = self.windows.get(&date).filter(|w| w.contains(t));
        own.or_else(|| {
            date.checked_sub_days(Days::new(1))
                .and_then(|prev| self.windows.get(&prev))
                .filter(|w| w.contains(t))
        })
    }

    pub fn is_daylight(&self, t: &DateTime<Tz>) -> bool {
        self.window_containing(t).is_some()
    }
}
