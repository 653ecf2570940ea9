use crate::{
    prelude::{beidou_geo_correction, EphemerisRecord, GnssSystem, KeplerianEphemeris, Propagator},
    tests::{beidou_geo_record, beidou_meo_record, init_logger, toe},
};

use hifitime::Unit;
use nalgebra::Vector3;
use rstest::*;
use std::f64::consts::PI;

#[test]
fn geo_rotation() {
    let we = GnssSystem::BeiDou.constants().we;
    let t_k = PI / (2.0 * we);

    let rotated = beidou_geo_correction(Vector3::new(1.0, 0.0, 0.0), we, t_k);
    assert!((rotated[0] - 0.0).abs() < 1.0E-6, "x={}", rotated[0]);
    assert!((rotated[1] + 1.0).abs() < 1.0E-6, "y={}", rotated[1]);
    assert!(rotated[2].abs() < 1.0E-6, "z={}", rotated[2]);
}

#[test]
fn geo_tilt() {
    // null rotation about Z: only the 5° tilt remains
    let rotated = beidou_geo_correction(Vector3::new(0.0, 1.0, 0.0), 0.0, 0.0);
    let tilt = 5.0_f64.to_radians();
    assert!((rotated[1] - tilt.cos()).abs() < 1.0E-12);
    assert!((rotated[2] - tilt.sin()).abs() < 1.0E-12);
}

#[rstest]
fn geo_detection(beidou_geo_record: EphemerisRecord, beidou_meo_record: EphemerisRecord) {
    let geo = KeplerianEphemeris::try_from(&beidou_geo_record).unwrap();
    assert!(geo.is_beidou_geo());

    let meo = KeplerianEphemeris::try_from(&beidou_meo_record).unwrap();
    assert!(!meo.is_beidou_geo());

    // inclination alone does not make a GEO vehicle
    let mut gps = beidou_geo_record.clone();
    gps.sv = crate::tests::sv("G05");
    let gps = KeplerianEphemeris::try_from(&gps).unwrap();
    assert!(!gps.is_beidou_geo());
}

#[rstest]
fn geo_propagation(beidou_geo_record: EphemerisRecord) {
    init_logger();
    let propagator = Propagator::default();
    let a = beidou_geo_record.get("sqrta").unwrap().powi(2);

    for dt_s in [0.0, 3600.0, 21600.0] {
        let t = toe() + dt_s * Unit::Second;
        let state = propagator.propagate(&beidou_geo_record, Some(t)).unwrap();

        let trace = state.keplerian_trace().unwrap();
        assert!(trace.beidou_geo);

        // the GEO correction is a rotation
        assert!((state.radius_m() - trace.r_k).abs() < 1.0E-6);
        assert!((state.radius_m() - a).abs() < 0.001 * a);
    }
}

#[rstest]
#[case(0.0, (-41_492_011.8853, -7_546_740.2791, -691_666.0176))]
#[case(3600.0, (-41_996_927.2280, 3_599_901.6631, -1_597_661.7284))]
#[case(21600.0, (-6_989_096.0492, 41_385_416.7255, -4_166_522.3582))]
#[case(-3600.0, (-39_995_782.2300, -13_385_199.0908, -187_389.9563))]
fn geo_ecef_position(
    beidou_geo_record: EphemerisRecord,
    #[case] dt_s: f64,
    #[case] expected: (f64, f64, f64),
) {
    let propagator = Propagator::default();
    let state = propagator
        .propagate(&beidou_geo_record, Some(toe() + dt_s * Unit::Second))
        .unwrap();

    let (x, y, z) = state.position_ecef_m();
    let (x_err, y_err, z_err) = (x - expected.0, y - expected.1, z - expected.2);
    assert!(x_err.abs() < 1.0E-3, "x error {}m (dt={}s)", x_err, dt_s);
    assert!(y_err.abs() < 1.0E-3, "y error {}m (dt={}s)", y_err, dt_s);
    assert!(z_err.abs() < 1.0E-3, "z error {}m (dt={}s)", z_err, dt_s);
}

#[rstest]
fn geo_ascending_node_longitude(beidou_geo_record: EphemerisRecord) {
    let propagator = Propagator::default();
    let state = propagator
        .propagate(&beidou_geo_record, Some(toe() + 1.0 * Unit::Hour))
        .unwrap();

    // same Ωk expression as MEO/IGSO vehicles, the GEO rotation comes on top
    let trace = state.keplerian_trace().unwrap();
    assert!(trace.beidou_geo);
    assert!((trace.omega_k - 6.19248572504268).abs() < 1.0E-9, "Ωk={}", trace.omega_k);
}

#[rstest]
fn meo_propagation(beidou_meo_record: EphemerisRecord) {
    let propagator = Propagator::default();
    let state = propagator
        .propagate(&beidou_meo_record, Some(toe() + 1.0 * Unit::Hour))
        .unwrap();

    let trace = state.keplerian_trace().unwrap();
    assert!(!trace.beidou_geo);

    let a = beidou_meo_record.get("sqrta").unwrap().powi(2);
    assert!((state.radius_m() - a).abs() < 0.01 * a);
}
