// Property-based tests for the pixel ↔ time mapping and resize clamping

use chrono::{NaiveDate, TimeZone, Timelike};
use proptest::prelude::*;

use resource_planner::config::PlannerConfig;
use resource_planner::interaction::resize::{ResizeContext, ResizeHandle};
use resource_planner::models::appointment::Appointment;
use resource_planner::utils::geometry::{offset_to_instant, time_to_offset};

fn reference_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
}

proptest! {
    /// Property: mapping an on-grid instant to pixels and back is lossless
    /// when the instant already sits on the snap granularity.
    #[test]
    fn prop_roundtrip_on_snap_grid(
        hour in 0u32..24,
        slot in 0u32..4,
        column_width in 50.0f32..400.0,
    ) {
        let instant = chrono::Local
            .with_ymd_and_hms(2025, 3, 10, hour, slot * 15, 0)
            .unwrap();

        let offset = time_to_offset(instant, column_width);
        let back = offset_to_instant(offset, column_width, reference_day(), 15);

        prop_assert_eq!(back, instant);
    }

    /// Property: the inverse mapping always lands on the snap granularity.
    #[test]
    fn prop_inverse_always_snapped(
        offset in 0.0f32..3600.0,
        column_width in 50.0f32..400.0,
        snap in prop::sample::select(vec![5u32, 10, 15, 20, 30, 60]),
    ) {
        let instant = offset_to_instant(offset, column_width, reference_day(), snap);
        prop_assert_eq!(instant.minute() % snap, 0);
        prop_assert_eq!(instant.second(), 0);
    }

    /// Property: the forward mapping is monotonic in time.
    #[test]
    fn prop_offset_monotonic(
        hour_a in 0u32..24, minute_a in 0u32..60,
        hour_b in 0u32..24, minute_b in 0u32..60,
        column_width in 50.0f32..400.0,
    ) {
        let a = chrono::Local.with_ymd_and_hms(2025, 3, 10, hour_a, minute_a, 0).unwrap();
        let b = chrono::Local.with_ymd_and_hms(2025, 3, 10, hour_b, minute_b, 0).unwrap();

        if a < b {
            prop_assert!(time_to_offset(a, column_width) < time_to_offset(b, column_width));
        }
    }

    /// Property: a resize-start preview never reaches the end edge, and a
    /// resize-end preview never reaches the start edge, whatever candidate
    /// sequence the pointer produces.
    #[test]
    fn prop_resize_preview_never_inverts(
        candidates in prop::collection::vec((0u32..24, 0u32..4), 1..20),
        start_edge: bool,
    ) {
        let appointment = Appointment::builder()
            .id("a1")
            .title("Consultation")
            .start(chrono::Local.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap())
            .end(chrono::Local.with_ymd_and_hms(2025, 3, 10, 10, 0, 0).unwrap())
            .resource_id("r1")
            .build()
            .unwrap();

        let handle = if start_edge { ResizeHandle::Start } else { ResizeHandle::End };
        let mut ctx = ResizeContext::from_appointment(&appointment, handle);

        for (hour, slot) in candidates {
            let candidate = chrono::Local
                .with_ymd_and_hms(2025, 3, 10, hour, slot * 15, 0)
                .unwrap();
            ctx.offer_candidate(candidate);
            prop_assert!(ctx.current_start() < ctx.current_end());
        }
    }

    /// Property: offsets map through the snap identically regardless of
    /// gesture history (statelessness of the mapper).
    #[test]
    fn prop_mapping_is_stateless(
        offset in 0.0f32..3600.0,
    ) {
        let config = PlannerConfig::default();

        let first = offset_to_instant(offset, config.column_width, reference_day(), config.snap_minutes);
        // Interleave unrelated mappings, then repeat
        let _ = offset_to_instant(offset / 2.0, config.column_width, reference_day(), config.snap_minutes);
        let second = offset_to_instant(offset, config.column_width, reference_day(), config.snap_minutes);

        prop_assert_eq!(first, second);
    }
}
