//! Integration tests for custom and constant vector fields.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use fathom_field::{
    Capabilities, ConstantVectorField3, CustomVectorField2, CustomVectorField3, FieldError,
    VectorField2, VectorField3, VectorField3Ptr,
};
use fathom_test_utils::fixtures::{random_points, CountingField3, RigidRotation3};
use glam::{DVec2, DVec3};
use proptest::prelude::*;

#[test]
fn saddle_flow_is_divergence_free() {
    let field = CustomVectorField2::new(|p: DVec2| DVec2::new(p.x, -p.y), 1e-3).unwrap();
    for p in random_points(1, 64, 100.0) {
        let x = p.truncate();
        let div = field.divergence(x);
        assert!(div.abs() < 1e-4, "divergence at {x} = {div}");
    }
}

#[test]
fn analytic_curl_sentinel_is_returned_exactly() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let sentinel = DVec3::new(1.0, 2.0, 3.0);
    let field = CustomVectorField3::with_derivatives(
        move |p: DVec3| {
            counter.fetch_add(1, Ordering::Relaxed);
            p
        },
        |_| 0.0,
        move |_| sentinel,
    );
    for p in random_points(2, 32, 10.0) {
        assert_eq!(field.curl(p), sentinel);
    }
    assert_eq!(calls.load(Ordering::Relaxed), 0);
}

#[test]
fn non_positive_resolution_is_rejected_by_every_variant() {
    let err = CustomVectorField3::new(|p: DVec3| p, 0.0).unwrap_err();
    assert_eq!(err, FieldError::InvalidResolution { value: 0.0 });

    let err = CustomVectorField3::with_divergence(|p: DVec3| p, |_| 3.0, -1.0).unwrap_err();
    assert_eq!(err, FieldError::InvalidResolution { value: -1.0 });

    assert!(CustomVectorField2::new(|p: DVec2| p, -1e-6).is_err());
    assert!(CustomVectorField2::with_divergence(|p: DVec2| p, |_| 2.0, 0.0).is_err());
}

#[test]
fn differenced_rotation_matches_reference() {
    let reference = RigidRotation3::new(DVec3::new(0.3, -1.2, 0.7));
    let omega = reference.omega;
    let field = CustomVectorField3::builder(move |p: DVec3| omega.cross(p))
        .derivative_resolution(1e-4)
        .build()
        .unwrap();
    assert_eq!(field.capabilities(), Capabilities::SampleOnly);

    for p in random_points(3, 64, 50.0) {
        let curl_err = (field.curl(p) - reference.curl(p)).abs().max_element();
        assert!(curl_err < 1e-6, "curl error {curl_err} at {p}");
        assert!(field.divergence(p).abs() < 1e-6);
    }
}

#[test]
fn default_derivatives_take_no_samples() {
    let field = CountingField3::new(|p: DVec3| p * 3.0);
    assert_eq!(field.divergence(DVec3::ONE), 0.0);
    assert_eq!(field.curl(DVec3::ONE), DVec3::ZERO);
    assert_eq!(field.calls(), 0);

    let sampler = Arc::new(field).sampler();
    assert_eq!(sampler(DVec3::ONE), DVec3::splat(3.0));
}

#[test]
fn shared_fields_evaluate_concurrently() {
    let fields: Vec<VectorField3Ptr> = vec![
        Arc::new(ConstantVectorField3::new(DVec3::Z)),
        Arc::new(RigidRotation3::new(DVec3::Y)),
        CustomVectorField3::builder(|p: DVec3| DVec3::new(p.x * p.x, 0.0, 0.0))
            .build_shared()
            .unwrap(),
    ];
    let points = random_points(4, 256, 1.0);

    let serial: Vec<Vec<DVec3>> = fields
        .iter()
        .map(|f| points.iter().map(|&p| f.sample(p)).collect())
        .collect();

    std::thread::scope(|s| {
        let handles: Vec<_> = fields
            .iter()
            .map(|f| {
                let f = Arc::clone(f);
                let points = &points;
                s.spawn(move || points.iter().map(|&p| f.sample(p)).collect::<Vec<_>>())
            })
            .collect();
        for (handle, expected) in handles.into_iter().zip(&serial) {
            assert_eq!(&handle.join().unwrap(), expected);
        }
    });
}

proptest! {
    #[test]
    fn differenced_divergence_of_linear_field_is_trace(
        a in prop::array::uniform9(-10.0f64..10.0),
        x in prop::array::uniform3(-100.0f64..100.0),
    ) {
        // V(x) = A x: div V = trace(A).
        let m = glam::DMat3::from_cols_array(&a);
        let field = CustomVectorField3::from_fn(move |p| m * p);
        let trace = m.x_axis.x + m.y_axis.y + m.z_axis.z;
        let div = field.divergence(DVec3::from_array(x));
        prop_assert!((div - trace).abs() < 1e-6, "div = {}, trace = {}", div, trace);
    }
}
