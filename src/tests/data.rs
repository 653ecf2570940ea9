use rstest::fixture;
use std::str::FromStr;

use crate::prelude::{EphemerisRecord, Epoch, Position, TimeScale, Vector3, SV};

/// Reference receiver, ECEF (m)
pub const RX_ECEF_M: (f64, f64, f64) = (-1224960.9797, 5804226.5715, 2338188.7548);

/// GPS vehicle in sight of [RX_ECEF_M], ECEF (m)
pub const GPS_SV_ECEF_M: (f64, f64, f64) = (-11177306.3509, 23710565.8502, 3758426.0384);

pub fn sv(desc: &str) -> SV {
    SV::from_str(desc).unwrap_or_else(|e| panic!("invalid sv \"{}\": {}", desc, e))
}

pub fn toe() -> Epoch {
    Epoch::from_gregorian_utc(2024, 1, 1, 12, 0, 0, 0)
}

/// GLONASS reference epoch (GPST)
pub fn glonass_reference() -> Epoch {
    Epoch::from_gregorian(2024, 1, 1, 12, 15, 0, 0, TimeScale::GPST)
}

fn keplerian_record(sv: SV, elements: &[(&str, f64)]) -> EphemerisRecord {
    let toe = toe();
    let mut record = EphemerisRecord::new(sv)
        .with_datetime(toe)
        .with_field("toe", toe.to_unix_seconds());

    for (name, value) in elements {
        record.set_field(name, Some(*value));
    }
    record
}

#[fixture]
pub fn receiver() -> Position {
    let (x, y, z) = RX_ECEF_M;
    Position::from_ecef(Vector3::new(x, y, z))
}

#[fixture]
pub fn gps_record() -> EphemerisRecord {
    keplerian_record(
        sv("G01"),
        &[
            ("sqrta", 5153.7954775),
            ("deltaN", 4.847e-9),
            ("m0", 0.977384),
            ("e", 0.0082),
            ("omega", 1.640466),
            ("cuc", 9.313e-6),
            ("cus", 9.313e-6),
            ("crc", 279.75),
            ("crs", -88.0),
            ("cic", 1.49e-7),
            ("cis", 1.49e-7),
            ("i0", 0.961685),
            ("idot", 2.235e-10),
            ("omega0", 1.640466),
            ("omegaDot", -8.295e-9),
        ],
    )
}

#[fixture]
pub fn galileo_record() -> EphemerisRecord {
    keplerian_record(
        sv("E11"),
        &[
            ("sqrta", 5440.6123),
            ("deltaN", 2.9e-9),
            ("m0", -1.8123),
            ("e", 0.00021),
            ("omega", -0.5371),
            ("cuc", -2.1e-6),
            ("cus", 8.1e-6),
            ("crc", 180.2),
            ("crs", -41.5),
            ("cic", 3.7e-8),
            ("cis", -5.2e-8),
            ("i0", 0.9733),
            ("idot", -1.9e-10),
            ("omega0", -2.7631),
            ("omegaDot", -5.6e-9),
        ],
    )
}

#[fixture]
pub fn beidou_geo_record() -> EphemerisRecord {
    keplerian_record(
        sv("C01"),
        &[
            ("sqrta", 6493.4821),
            ("deltaN", 1.2e-10),
            ("m0", 2.4317),
            ("e", 0.00043),
            ("omega", 0.7182),
            ("cuc", 6.3e-6),
            ("cus", 2.1e-5),
            ("crc", -652.3),
            ("crs", 197.1),
            ("cic", 4.8e-8),
            ("cis", 1.1e-7),
            ("i0", 0.0837),
            ("idot", 1.3e-10),
            ("omega0", -2.9771),
            ("omegaDot", 1.7e-9),
        ],
    )
}

#[fixture]
pub fn beidou_meo_record() -> EphemerisRecord {
    keplerian_record(
        sv("C21"),
        &[
            ("sqrta", 5282.6254),
            ("deltaN", 3.7e-9),
            ("m0", 0.4421),
            ("e", 0.00078),
            ("omega", -0.9912),
            ("cuc", 1.1e-6),
            ("cus", 9.8e-6),
            ("crc", 163.4),
            ("crs", 21.3),
            ("cic", -1.9e-8),
            ("cis", 4.2e-8),
            ("i0", 0.9612),
            ("idot", 2.1e-11),
            ("omega0", 1.0543),
            ("omegaDot", -6.7e-9),
        ],
    )
}

/// GLONASS record, state vector in km, km/s, km/s²
#[fixture]
pub fn glonass_record() -> EphemerisRecord {
    let reference = glonass_reference();
    EphemerisRecord::new(sv("R14"))
        .with_datetime(reference)
        .with_field("gps_seconds", reference.to_gpst_seconds())
        .with_field("satPosX", 10000.0)
        .with_field("satPosY", -15000.0)
        .with_field("satPosZ", 17882.0)
        .with_field("velX", -0.16042)
        .with_field("velY", 2.4619)
        .with_field("velZ", 2.15483)
        .with_field("accelX", 1.0e-9)
        .with_field("accelY", -2.8e-9)
        .with_field("accelZ", 9.3e-10)
}
