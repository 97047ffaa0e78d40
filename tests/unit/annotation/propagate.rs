use super::*;
use crate::annotation::schema::{AttrConfig, DescConfig};
use crate::annotation::session::EditSession;
use crate::timeline::value::{AttrValue, ValueKind};

fn f(n: u64) -> FrameIndex {
    FrameIndex(n)
}

fn vehicle_config() -> DescConfig {
    DescConfig::new(
        "vehicle",
        vec![
            AttrConfig::from_type_name("speed", "dvalue", true).unwrap(),
            AttrConfig::from_type_name("kind", "lvalue", false).unwrap(),
        ],
    )
}

fn seeded() -> (AnnotationSet, u64) {
    let mut set = AnnotationSet::new();
    let id = set.create_descriptor(&vehicle_config());
    let desc = set.descriptor_mut(id).unwrap();
    desc.mark_valid(f(5), f(6)).unwrap();
    desc.attribute_mut("speed")
        .unwrap()
        .set_span(f(5), f(6), AttrValue::Integer(40))
        .unwrap();
    desc.attribute_mut("kind")
        .unwrap()
        .set_static(Some(AttrValue::Label("car".into())))
        .unwrap();
    (set, id)
}

#[test]
fn propagate_copies_the_source_value_over_targets() {
    let (mut set, id) = seeded();
    let mut targets = IntervalSet::new();
    targets.add(f(6), f(9)).unwrap();
    targets.add(f(12), f(14)).unwrap();

    propagate(&mut set, id, f(5), &targets).unwrap();

    let desc = set.descriptor(id).unwrap();
    let speed = desc.attribute("speed").unwrap();
    assert_eq!(speed.value_at(f(8)), Some(&AttrValue::Integer(40)));
    assert_eq!(speed.value_at(f(13)), Some(&AttrValue::Integer(40)));
    assert_eq!(speed.value_at(f(10)), None);
    // The copied run extends the keyframe's own run and stays compressed.
    assert_eq!(speed.timeline().run_count(), 2);

    assert!(desc.is_valid_at(f(8)));
    assert!(desc.is_valid_at(f(13)));
    assert!(!desc.is_valid_at(f(10)));
}

#[test]
fn propagate_without_a_source_value_only_extends_validity() {
    let (mut set, id) = seeded();
    let mut targets = IntervalSet::new();
    targets.add(f(20), f(22)).unwrap();

    propagate(&mut set, id, f(18), &targets).unwrap();

    let desc = set.descriptor(id).unwrap();
    assert_eq!(desc.attribute("speed").unwrap().value_at(f(21)), None);
    assert!(desc.is_valid_at(f(21)));
}

#[test]
fn propagate_rejects_unknown_descriptors() {
    let (mut set, _) = seeded();
    let targets = IntervalSet::new();
    let err = propagate(&mut set, 999, f(0), &targets).unwrap_err();
    assert!(matches!(err, FramespanError::UnknownDescriptor(999)));
}

#[test]
fn interpolation_fills_the_gap_between_two_keyframes() {
    let (mut set, id) = seeded();
    {
        let desc = set.descriptor_mut(id).unwrap();
        desc.mark_valid(f(10), f(11)).unwrap();
        desc.attribute_mut("speed")
            .unwrap()
            .set_span(f(10), f(11), AttrValue::Integer(50))
            .unwrap();
    }

    interpolate_descriptor(&mut set, id, f(5), f(10)).unwrap();

    let desc = set.descriptor(id).unwrap();
    let speed = desc.attribute("speed").unwrap();
    // 40 toward 50 over five steps: 40, 42, 44, 46, 48, then the keyframe.
    for (frame, expect) in [(5, 40), (6, 42), (7, 44), (8, 46), (9, 48), (10, 50)] {
        assert_eq!(
            speed.value_at(f(frame)),
            Some(&AttrValue::Integer(expect)),
            "frame {frame}"
        );
    }
    assert!(desc.valid().contains_span(f(5), f(11)));
}

#[test]
fn interpolation_propagates_when_one_boundary_is_unset() {
    let (mut set, id) = seeded();

    interpolate_descriptor(&mut set, id, f(5), f(9)).unwrap();

    let desc = set.descriptor(id).unwrap();
    let speed = desc.attribute("speed").unwrap();
    for frame in 5..9 {
        assert_eq!(speed.value_at(f(frame)), Some(&AttrValue::Integer(40)));
    }
    assert_eq!(speed.value_at(f(9)), None);
    assert!(desc.valid().contains_span(f(5), f(10)));
    // A single compressed run covers the whole propagated stretch.
    assert_eq!(speed.timeline().run_count(), 1);
}

#[test]
fn interpolation_leaves_static_attributes_alone() {
    let (mut set, id) = seeded();
    interpolate_descriptor(&mut set, id, f(5), f(9)).unwrap();
    let desc = set.descriptor(id).unwrap();
    let kind = desc.attribute("kind").unwrap();
    assert_eq!(kind.config().kind, ValueKind::Label);
    assert_eq!(kind.value_at(f(7)), Some(&AttrValue::Label("car".into())));
    assert!(kind.timeline().is_empty());
}

#[test]
fn interpolating_a_single_frame_only_marks_it_valid() {
    let (mut set, id) = seeded();
    interpolate_descriptor(&mut set, id, f(30), f(30)).unwrap();
    let desc = set.descriptor(id).unwrap();
    assert!(desc.is_valid_at(f(30)));
    assert_eq!(desc.attribute("speed").unwrap().value_at(f(30)), None);
}

#[test]
fn interpolation_rejects_reversed_keyframes() {
    let (mut set, id) = seeded();
    let err = interpolate_descriptor(&mut set, id, f(9), f(5)).unwrap_err();
    assert!(matches!(err, FramespanError::InvalidRange(_)));
}

#[test]
fn rolled_back_interpolation_leaves_no_trace() {
    let (mut set, id) = seeded();
    let before = set.clone();
    {
        let mut session = EditSession::begin(&mut set);
        interpolate_descriptor(session.edit(), id, f(5), f(9)).unwrap();
        assert!(session.is_dirty());
        // Dropped uncommitted, as when a surrounding edit fails.
    }
    assert_eq!(set, before);
}
