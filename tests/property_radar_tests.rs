use proptest::prelude::*;
use stat_charts::core::{RadarChartData, RadarLayout, RadarStat};

proptest! {
    #[test]
    fn radar_value_round_trip_property(
        size in 300.0f64..1200.0,
        count in 3usize..12,
        index_seed in 0usize..64,
        full_mark in 1u32..=1000,
        value_factor in 0.0f64..=1.0
    ) {
        let layout = RadarLayout::for_size(size, 80.0);
        let index = index_seed % count;
        let full_mark = f64::from(full_mark);
        let value = (value_factor * full_mark).round();

        let vertex = layout.vertex(value, full_mark, index, count);
        let recovered = layout.value_from_pointer(vertex, index, count, full_mark);

        prop_assert_eq!(recovered, value);
    }

    #[test]
    fn radar_drag_value_always_in_range(
        x in -2000.0f64..2000.0,
        y in -2000.0f64..2000.0,
        count in 3usize..12,
        index_seed in 0usize..64,
        full_mark in 1u32..=1000
    ) {
        let layout = RadarLayout::for_size(650.0, 80.0);
        let full_mark = f64::from(full_mark);
        let value = layout.value_from_pointer(
            stat_charts::core::Point::new(x, y),
            index_seed % count,
            count,
            full_mark,
        );

        prop_assert!(value >= 0.0);
        prop_assert!(value <= full_mark);
        prop_assert_eq!(value, value.round());
    }

    #[test]
    fn full_mark_keeps_every_value_in_range(
        values in proptest::collection::vec(0.0f64..=100.0, 3..10),
        new_max in 1.0f64..200.0
    ) {
        let stats = values
            .iter()
            .enumerate()
            .map(|(i, v)| RadarStat::new(format!("Stat {i}"), *v, 100.0))
            .collect();
        let mut chart = RadarChartData::new(stats, "#4a3461").expect("valid chart");
        chart.set_full_mark(new_max);

        for (stat, original) in chart.stats().iter().zip(values.iter()) {
            prop_assert_eq!(stat.full_mark, new_max);
            prop_assert_eq!(stat.value, original.min(new_max));
        }
    }
}
