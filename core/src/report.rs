// core/src/report.rs
use std::fmt;

use crate::compass::degrees_to_cardinal;
use crate::config::ForecastConfig;
use crate::favorability::FavorabilityResult;
use crate::sky::sky_glyph;
use crate::types::{DayReport, RankedReport, SegmentReport, SegmentStatus};
use crate::units::{format_elapsed, format_mm_ss, Units};

const TIME_FMT: &str = "%I:%M %p";
const DAY_FMT: &str = "%a %Y-%m-%d";

/// Tekstvisning av en rangert rapport.
pub struct ReportView<'r, 'a> {
    pub report: &'r RankedReport<'a>,
    pub sunrise_icon: &'r str,
    pub sunset_icon: &'r str,
}

impl<'r, 'a> ReportView<'r, 'a> {
    pub fn new(report: &'r RankedReport<'a>, config: &'r ForecastConfig) -> Self {
        Self {
            report,
            sunrise_icon: &config.sunrise_icon,
            sunset_icon: &config.sunset_icon,
        }
    }

    fn write_sample(&self, f: &mut fmt::Formatter<'_>, r: &FavorabilityResult<'_>) -> fmt::Result {
        let s = r.sample;
        writeln!(
            f,
            "    {} {} | {:>3.0}{} | {:>4.1} {} from {:<3} | {:>3.0}° off | {:>3}% favorable",
            sky_glyph(&s.sky_code),
            s.timestamp.format(TIME_FMT),
            s.temperature,
            self.report.units.temperature_label(),
            s.wind_speed,
            self.report.units.wind_label(),
            degrees_to_cardinal(s.wind_deg),
            r.offset_deg,
            r.favorability_pct
        )
    }

    fn write_day(&self, f: &mut fmt::Formatter<'_>, day: &DayReport<'_>) -> fmt::Result {
        write!(f, "\n  {}", day.date.format(DAY_FMT))?;
        match day.window {
            Some(w) => writeln!(
                f,
                " ({} {} - {} {})",
                self.sunrise_icon,
                w.sunrise().format(TIME_FMT),
                self.sunset_icon,
                w.sunset().format(TIME_FMT)
            )?,
            None => writeln!(f)?,
        }
        for r in &day.samples {
            self.write_sample(f, r)?;
        }
        Ok(())
    }

    fn write_segment(&self, f: &mut fmt::Formatter<'_>, seg: &SegmentReport<'_>) -> fmt::Result {
        let s = seg.segment;
        let units: Units = self.report.units;
        let speed = units.speed_label();
        let gap = s.kom_gap(units);

        writeln!(f, "\n{} - {} {}", s.name, s.distance_label, s.direction_label)?;
        writeln!(
            f,
            "\nKOM  : {} {} {:.1} {}",
            s.kom_holder,
            format_elapsed(s.kom_time_secs),
            gap.kom_speed,
            speed
        )?;
        writeln!(
            f,
            "Me   : rank {} {} {:.1} {}",
            s.my_rank,
            format_elapsed(s.my_time_secs),
            gap.my_speed,
            speed
        )?;

        match seg.status {
            SegmentStatus::KomHeld => {
                writeln!(f, "\n  KOM already held - not scored.")?;
            }
            SegmentStatus::NoFavorableWindow => {
                write_need(f, gap.time_gap_secs, gap.speed_gap, speed)?;
                writeln!(f, "\n  No favorable wind windows found in the forecast horizon.")?;
            }
            SegmentStatus::Favorable => {
                write_need(f, gap.time_gap_secs, gap.speed_gap, speed)?;
                writeln!(f, "\nFavorable Winds:")?;
                for day in &seg.days {
                    self.write_day(f, day)?;
                }
                if let Some(best) = &seg.best {
                    writeln!(
                        f,
                        "\n  Best: {} {} ({}% favorable)",
                        best.sample.timestamp.format(DAY_FMT),
                        best.sample.timestamp.format(TIME_FMT),
                        best.favorability_pct
                    )?;
                }
            }
        }
        writeln!(f, "{}", "-".repeat(67))
    }
}

fn write_need(f: &mut fmt::Formatter<'_>, time_gap: i64, speed_gap: f64, speed: &str) -> fmt::Result {
    let sign = if time_gap >= 0 { '-' } else { '+' };
    let secs = u32::try_from(time_gap.unsigned_abs()).unwrap_or(u32::MAX);
    writeln!(
        f,
        "Need : {}{} min {:+.1} {}",
        sign,
        format_mm_ss(secs),
        speed_gap,
        speed
    )
}

impl fmt::Display for ReportView<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = &self.report.thresholds;
        writeln!(
            f,
            "(Config: winds {}+ {}, tolerance {}°, {}%+ favorability)",
            t.min_wind_speed,
            self.report.units.wind_label(),
            t.direction_tolerance_deg,
            t.min_favorability_pct
        )?;
        writeln!(f, "\nPotential KOM Opportunities:")?;
        writeln!(f, "{}", "=".repeat(61))?;

        for seg in &self.report.segments {
            self.write_segment(f, seg)?;
        }

        if self.report.favorable_segments().next().is_none() {
            writeln!(f, "\nNo segments found with favorable wind conditions")?;
        }
        Ok(())
    }
}

/// Hele rapporten som tekst.
pub fn render_report(report: &RankedReport<'_>, config: &ForecastConfig) -> String {
    ReportView::new(report, config).to_string()
}

pub fn print_report(report: &RankedReport<'_>, config: &ForecastConfig) {
    print!("{}", render_report(report, config));
}
