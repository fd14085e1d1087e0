// tests/test_favorability.rs
use chrono::{DateTime, NaiveDate, TimeZone};
use chrono_tz::America::New_York;
use chrono_tz::Tz;

use komcast_core::compass::{angular_offset, degrees_to_cardinal};
use komcast_core::favorability::{favorability_pct, segment_wind_offset};
use komcast_core::{
    evaluate, DayWindow, DaylightCalendar, Evaluation, Horizon, Segment, SkipReason, Thresholds,
    WeatherSample,
};

fn at(d: u32, h: u32, m: u32) -> DateTime<Tz> {
    New_York.with_ymd_and_hms(2024, 11, d, h, m, 0).single().unwrap()
}

fn segment(direction_deg: f64) -> Segment {
    Segment {
        name: "Airport Hill".to_string(),
        distance_km: 1.43,
        distance_label: "1.43 km".to_string(),
        climb: "35 m".to_string(),
        direction_deg,
        direction_label: degrees_to_cardinal(direction_deg).to_string(),
        kom_holder: "Jane Doe".to_string(),
        kom_time_secs: 150,
        my_rank: 4,
        my_time_secs: 170,
    }
}

fn sample(t: DateTime<Tz>, speed: f64, deg: f64) -> WeatherSample {
    WeatherSample {
        timestamp: t,
        wind_speed: speed,
        wind_deg: deg,
        wind_gust: None,
        temperature: 45.0,
        sky_code: "01d".to_string(),
    }
}

// 12.–16. november, soloppgang 07:21, solnedgang 17:28
fn calendar() -> DaylightCalendar {
    DaylightCalendar::new((12..=16).map(|d| {
        DayWindow::new(
            NaiveDate::from_ymd_opt(2024, 11, d).unwrap(),
            at(d, 7, 21),
            at(d, 17, 28),
        )
        .unwrap()
    }))
}

fn horizon() -> Horizon {
    Horizon::from_tomorrow(at(11, 20, 0), 5)
}

#[test]
fn westerly_wind_on_east_climb_is_eleven_off_and_95_pct() {
    // Regresjonspunkt: 19.9 mph fra W-sektoren (281°) mot et østvendt segment
    let seg = segment(90.0);
    let s = sample(at(12, 13, 0), 19.9, 281.0);
    assert_eq!(degrees_to_cardinal(s.wind_deg), "W");

    let r = evaluate(&seg, &s, &calendar(), &horizon(), &Thresholds::default())
        .scored()
        .expect("sample inside daylight should be scored");

    assert_eq!(r.offset_deg.round() as i64, 11);
    assert_eq!(r.favorability_pct, 95);
    assert!(r.qualifies);

    // samme avvik på andre siden av sektoren
    let mirrored = sample(at(12, 13, 0), 19.9, 259.0);
    let r2 = evaluate(&seg, &mirrored, &calendar(), &horizon(), &Thresholds::default())
        .scored()
        .unwrap();
    assert_eq!(r2.offset_deg.round() as i64, 11);
    assert_eq!(r2.favorability_pct, 95);
}

#[test]
fn favorability_is_non_increasing_in_offset() {
    let min = Thresholds::default().min_wind_speed;
    for speed in [min, 19.9, 30.0] {
        let mut prev = favorability_pct(0.0, speed, min);
        for o in 1..=180 {
            let pct = favorability_pct(o as f64, speed, min);
            assert!(pct <= prev, "speed={speed} offset={o}: {pct} > {prev}");
            prev = pct;
        }
        assert_eq!(favorability_pct(180.0, speed, min), 0);
    }
}

#[test]
fn zero_offset_is_the_maximum_for_a_speed() {
    let min = 15.0;
    let top = favorability_pct(0.0, min, min);
    assert_eq!(top, 100);
    for o in 0..=180 {
        assert!(favorability_pct(o as f64, min, min) <= top);
    }
    // under minstefarten skaleres toppen ned
    assert_eq!(favorability_pct(0.0, 7.5, min), 50);
    assert_eq!(favorability_pct(180.0, 50.0, min), 0);
    assert_eq!(favorability_pct(0.0, 0.0, min), 0);
}

#[test]
fn offset_is_symmetric_and_bounded() {
    let mut d = 0.0;
    while d < 360.0 {
        let mut w = 0.0;
        while w < 360.0 {
            let a = angular_offset(d, w);
            assert!((0.0..=180.0).contains(&a), "offset({d}, {w}) = {a}");
            assert_eq!(a, angular_offset(w, d));
            assert_eq!(segment_wind_offset(d, w), segment_wind_offset(w, d));
            w += 7.5;
        }
        d += 11.25;
    }
}

#[test]
fn night_sample_never_qualifies() {
    let seg = segment(90.0);
    // perfekt medvind, men 23:00 – solnedgang var 17:28
    let s = sample(at(12, 23, 0), 40.0, 270.0);
    assert_eq!(
        evaluate(&seg, &s, &calendar(), &horizon(), &Thresholds::default()),
        Evaluation::Skipped(SkipReason::OutsideDaylight)
    );
    // rett før soloppgang og nøyaktig ved solnedgang
    let early = sample(at(12, 7, 20), 40.0, 270.0);
    let sunset = sample(at(12, 17, 28), 40.0, 270.0);
    for s in [early, sunset] {
        assert!(evaluate(&seg, &s, &calendar(), &horizon(), &Thresholds::default())
            .scored()
            .is_none());
    }
}

#[test]
fn samples_outside_horizon_are_skipped() {
    let seg = segment(90.0);
    let cal = DaylightCalendar::new((11..=18).map(|d| {
        DayWindow::new(
            NaiveDate::from_ymd_opt(2024, 11, d).unwrap(),
            at(d, 7, 21),
            at(d, 17, 28),
        )
        .unwrap()
    }));
    let today = sample(at(11, 13, 0), 20.0, 270.0);
    let last_day = sample(at(16, 13, 0), 20.0, 270.0);
    let too_far = sample(at(17, 13, 0), 20.0, 270.0);

    let t = Thresholds::default();
    assert_eq!(
        evaluate(&seg, &today, &cal, &horizon(), &t),
        Evaluation::Skipped(SkipReason::BeyondHorizon)
    );
    assert!(evaluate(&seg, &last_day, &cal, &horizon(), &t).scored().is_some());
    assert_eq!(
        evaluate(&seg, &too_far, &cal, &horizon(), &t),
        Evaluation::Skipped(SkipReason::BeyondHorizon)
    );
}

#[test]
fn each_threshold_is_enforced() {
    let seg = segment(90.0);
    let cal = calendar();
    let h = horizon();
    let t = Thresholds::default();

    // for svak vind
    let weak = sample(at(13, 10, 0), 14.9, 270.0);
    assert!(!evaluate(&seg, &weak, &cal, &h, &t).scored().unwrap().qualifies);

    // utenfor toleransen (45° av)
    let skew = sample(at(13, 10, 0), 30.0, 315.0);
    let r = evaluate(&seg, &skew, &cal, &h, &t).scored().unwrap();
    assert!(r.favorability_pct >= t.min_favorability_pct);
    assert!(!r.qualifies);

    // innenfor toleransen men under prosentkravet
    let strict = Thresholds {
        min_favorability_pct: 99,
        ..t
    };
    let ok = sample(at(13, 10, 0), 19.9, 281.0);
    assert!(!evaluate(&seg, &ok, &cal, &h, &strict).scored().unwrap().qualifies);
}

#[test]
fn raising_min_pct_only_shrinks_the_qualifying_set() {
    let cal = calendar();
    let h = horizon();
    let loose = Thresholds::default();
    let strict = Thresholds {
        min_favorability_pct: 95,
        ..loose
    };

    let segments: Vec<Segment> = (0..16).map(|i| segment(i as f64 * 22.5)).collect();
    let mut samples = Vec::new();
    for (i, speed) in [12.0, 15.0, 19.9, 25.0, 35.0].iter().enumerate() {
        for k in 0..24 {
            samples.push(sample(at(12 + (i as u32 % 4), 8 + (k % 9), 0), *speed, k as f64 * 15.0));
        }
    }

    let mut loose_count = 0;
    let mut strict_count = 0;
    for seg in &segments {
        for s in &samples {
            let a = evaluate(seg, s, &cal, &h, &loose).scored();
            let b = evaluate(seg, s, &cal, &h, &strict).scored();
            if let (Some(a), Some(b)) = (a, b) {
                if b.qualifies {
                    assert!(a.qualifies, "strict set grew for {} / {:?}", seg.name, s);
                }
                loose_count += a.qualifies as usize;
                strict_count += b.qualifies as usize;
            }
        }
    }
    assert!(strict_count <= loose_count);
    assert!(loose_count > 0);
}
