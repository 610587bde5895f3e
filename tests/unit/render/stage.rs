use super::*;

fn bounds(len: usize) -> Vec<(usize, usize)> {
    (0..STAGE_COUNT)
        .map(|i| {
            let r = slice_bounds(len, i);
            (r.start, r.end)
        })
        .collect()
}

#[test]
fn halving_bounds_for_ten_levels() {
    assert_eq!(bounds(10), vec![(0, 5), (2, 8), (5, 10), (8, 10)]);
}

#[test]
fn halving_bounds_round_half_to_even() {
    assert_eq!(bounds(2), vec![(0, 1), (0, 2), (1, 2), (2, 2)]);
    assert_eq!(bounds(5), vec![(0, 2), (1, 4), (2, 5), (4, 5)]);
    assert_eq!(bounds(6), vec![(0, 3), (2, 4), (3, 6), (4, 6)]);
    assert_eq!(bounds(11), vec![(0, 6), (3, 8), (6, 10), (8, 11)]);
}

#[test]
fn halving_bounds_for_small_schedules() {
    assert_eq!(bounds(0), vec![(0, 0); 4]);
    assert_eq!(bounds(1), vec![(0, 0), (0, 1), (0, 1), (1, 1)]);
    assert_eq!(bounds(4), vec![(0, 2), (1, 3), (2, 4), (3, 4)]);
}

#[test]
fn bounds_stay_within_schedule() {
    for len in 0..64 {
        for i in 0..STAGE_COUNT {
            let r = slice_bounds(len, i);
            assert!(r.start <= r.end && r.end <= len, "len {len} stage {i}: {r:?}");
        }
        assert_eq!(slice_bounds(len, STAGE_COUNT - 1).end, len);
        assert_eq!(slice_bounds(len, 9), len..len);
    }
}

#[test]
fn flat_dialects_have_no_stages() {
    for d in [Dialect::Generic, Dialect::Modelbuild, Dialect::TwolevelDbm] {
        assert!(stage_plan(d, 8).is_empty());
    }
}

#[test]
fn exhaustive_plan_covers_whole_schedule() {
    let plan = stage_plan(Dialect::ExhaustiveAffine, 7);
    assert_eq!(plan.len(), 5);
    assert!(plan.iter().all(|s| s.range == (0..7)));
    assert!(plan.iter().all(|s| s.metric_radius == METRIC_RADIUS));

    let transforms: Vec<_> = plan.iter().map(|s| s.transform).collect();
    assert_eq!(
        transforms,
        vec![
            Transform::Translation,
            Transform::Rigid,
            Transform::Similarity,
            Transform::Similarity,
            Transform::Affine,
        ]
    );
    let masks: Vec<_> = plan.iter().map(|s| s.mask).collect();
    assert_eq!(
        masks,
        vec![
            Mask::Unmasked,
            Mask::Unmasked,
            Mask::Unmasked,
            Mask::FixedMoving,
            Mask::FixedMoving,
        ]
    );
    assert!(plan[3].repeated);
    assert_eq!(plan.iter().filter(|s| s.repeated).count(), 1);
}

#[test]
fn halving_plan_slices_and_widens_last_metric() {
    for d in [Dialect::Affine, Dialect::MultilevelHalving] {
        let plan = stage_plan(d, 10);
        assert_eq!(plan.len(), 5);
        let ranges: Vec<_> = plan.iter().map(|s| s.range.clone()).collect();
        assert_eq!(ranges, vec![0..5, 2..8, 5..10, 5..10, 8..10]);
        let radii: Vec<_> = plan.iter().map(|s| s.metric_radius).collect();
        assert_eq!(radii, vec![32, 32, 32, 32, 64]);
        assert_eq!(plan[3].transform, Transform::Similarity);
        assert_eq!(plan[3].mask, Mask::FixedMoving);
    }
}

#[test]
fn staged_plans_keep_five_blocks_when_empty() {
    for d in [Dialect::Affine, Dialect::ExhaustiveAffine] {
        let plan = stage_plan(d, 0);
        assert_eq!(plan.len(), 5);
        assert!(plan.iter().all(|s| s.range.is_empty()));
    }
}

#[test]
fn plan_is_non_empty_exactly_for_staged_dialects() {
    for d in Dialect::ALL {
        assert_eq!(!stage_plan(d, 6).is_empty(), d.is_staged(), "dialect {d}");
    }
}
