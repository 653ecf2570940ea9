use crate::{
    constants::PhysicalConstants,
    error::Error,
    prelude::{Constellation, TimeScale, SV},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Fields a Keplerian [EphemerisRecord](crate::prelude::EphemerisRecord) must carry.
/// `datetime` is the record timestamp and is checked separately.
pub(crate) const KEPLERIAN_FIELDS: [&str; 16] = [
    "toe", "sqrta", "deltaN", "m0", "e", "omega", "cuc", "cus", "crc", "crs", "cic", "cis", "i0",
    "idot", "omega0", "omegaDot",
];

/// Fields a GLONASS [EphemerisRecord](crate::prelude::EphemerisRecord) must carry.
/// Accelerations are optional.
pub(crate) const GLONASS_FIELDS: [&str; 7] = [
    "satPosX",
    "satPosY",
    "satPosZ",
    "velX",
    "velY",
    "velZ",
    "gps_seconds",
];

/// [GnssSystem] is the closed set of constellations
/// we know how to propagate.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GnssSystem {
    GPS,
    Galileo,
    QZSS,
    BeiDou,
    Glonass,
}

impl std::fmt::Display for GnssSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GPS => write!(f, "GPS"),
            Self::Galileo => write!(f, "Galileo"),
            Self::QZSS => write!(f, "QZSS"),
            Self::BeiDou => write!(f, "BeiDou"),
            Self::Glonass => write!(f, "GLONASS"),
        }
    }
}

impl TryFrom<Constellation> for GnssSystem {
    type Error = Error;
    fn try_from(constellation: Constellation) -> Result<Self, Self::Error> {
        match constellation {
            Constellation::GPS => Ok(Self::GPS),
            Constellation::Galileo => Ok(Self::Galileo),
            Constellation::QZSS => Ok(Self::QZSS),
            Constellation::BeiDou => Ok(Self::BeiDou),
            Constellation::Glonass => Ok(Self::Glonass),
            c => Err(Error::UnsupportedConstellation(c)),
        }
    }
}

impl TryFrom<SV> for GnssSystem {
    type Error = Error;
    fn try_from(sv: SV) -> Result<Self, Self::Error> {
        Self::try_from(sv.constellation)
    }
}

impl From<GnssSystem> for Constellation {
    fn from(system: GnssSystem) -> Self {
        match system {
            GnssSystem::GPS => Self::GPS,
            GnssSystem::Galileo => Self::Galileo,
            GnssSystem::QZSS => Self::QZSS,
            GnssSystem::BeiDou => Self::BeiDou,
            GnssSystem::Glonass => Self::Glonass,
        }
    }
}

impl GnssSystem {
    /// Satellite identifier prefix, as in `G01` or `R14`.
    pub const fn prefix(&self) -> char {
        match self {
            Self::GPS => 'G',
            Self::Galileo => 'E',
            Self::QZSS => 'J',
            Self::BeiDou => 'C',
            Self::Glonass => 'R',
        }
    }

    /// [TimeScale] the broadcast ephemeris is expressed in.
    pub const fn timescale(&self) -> TimeScale {
        match self {
            Self::GPS | Self::QZSS => TimeScale::GPST,
            Self::Galileo => TimeScale::GST,
            Self::BeiDou => TimeScale::BDT,
            Self::Glonass => TimeScale::UTC,
        }
    }

    /// Returns true if this [GnssSystem] broadcasts Keplerian elements.
    /// GLONASS broadcasts state vectors instead.
    pub const fn is_keplerian(&self) -> bool {
        !matches!(self, Self::Glonass)
    }

    /// Fields an ephemeris record must carry for this [GnssSystem].
    pub fn required_fields(&self) -> &'static [&'static str] {
        if self.is_keplerian() {
            &KEPLERIAN_FIELDS
        } else {
            &GLONASS_FIELDS
        }
    }

    /// [PhysicalConstants] of this [GnssSystem].
    pub fn constants(&self) -> &'static PhysicalConstants {
        PhysicalConstants::of(*self)
    }
}

#[cfg(test)]
mod test {
    use super::GnssSystem;
    use crate::prelude::{Constellation, Error, SV};
    use std::str::FromStr;

    #[test]
    fn closed_set() {
        for (desc, expected) in [
            ("G01", GnssSystem::GPS),
            ("E23", GnssSystem::Galileo),
            ("J02", GnssSystem::QZSS),
            ("C06", GnssSystem::BeiDou),
            ("R14", GnssSystem::Glonass),
        ] {
            let sv = SV::from_str(desc).unwrap();
            let system = GnssSystem::try_from(sv).unwrap();
            assert_eq!(system, expected);
            assert_eq!(system.prefix(), desc.chars().next().unwrap());
            assert_eq!(Constellation::from(system), sv.constellation);
        }

        assert_eq!(
            GnssSystem::try_from(Constellation::IRNSS),
            Err(Error::UnsupportedConstellation(Constellation::IRNSS))
        );
    }

    #[test]
    fn qzss_shares_gps_constants() {
        assert_eq!(GnssSystem::QZSS.constants(), GnssSystem::GPS.constants());
        assert!(GnssSystem::Glonass.constants().c20.is_some());
        assert!(GnssSystem::Galileo.constants().c20.is_none());
    }
}
