//! Index bands and communication-profile categories.

use std::ops::RangeInclusive;

/// Named index interval of the Object Dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexBand {
    /// Data type and range descriptor definitions, `0x0000..=0x0260`.
    Range,
    /// All parameters, `0x1000..=0xFFFF`.
    Main,
    /// Manufacturer and profile variables, `0x2000..=0xBFFF`.
    Variable,
    /// Communication profile, `0x1000..=0x11FF`.
    Communication,
}

impl IndexBand {
    /// Returns the inclusive index range of the band.
    #[must_use]
    pub const fn bounds(&self) -> RangeInclusive<u16> {
        match self {
            Self::Range => 0x0000..=0x0260,
            Self::Main => 0x1000..=0xFFFF,
            Self::Variable => 0x2000..=0xBFFF,
            Self::Communication => 0x1000..=0x11FF,
        }
    }

    /// Returns true if the index falls inside the band.
    #[must_use]
    pub fn contains(&self, index: u16) -> bool {
        self.bounds().contains(&index)
    }

    /// Keeps the indices that fall inside the band, preserving order.
    #[must_use]
    pub fn filter(&self, indices: &[u16]) -> Vec<u16> {
        indices
            .iter()
            .copied()
            .filter(|&idx| self.contains(idx))
            .collect()
    }
}

/// SDO and PDO parameter categories of the communication profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexCategory {
    /// SDO server parameters.
    SdoServer,
    /// SDO client parameters.
    SdoClient,
    /// Receive PDO communication parameters.
    PdoReceive,
    /// Receive PDO mapping parameters.
    PdoReceiveMap,
    /// Transmit PDO communication parameters.
    PdoTransmit,
    /// Transmit PDO mapping parameters.
    PdoTransmitMap,
}

impl IndexCategory {
    /// All categories in ascending index order.
    pub const ALL: [Self; 6] = [
        Self::SdoServer,
        Self::SdoClient,
        Self::PdoReceive,
        Self::PdoReceiveMap,
        Self::PdoTransmit,
        Self::PdoTransmitMap,
    ];

    /// Short name used in generated sources.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SdoServer => "SDO_SVR",
            Self::SdoClient => "SDO_CLT",
            Self::PdoReceive => "PDO_RCV",
            Self::PdoReceiveMap => "PDO_RCV_MAP",
            Self::PdoTransmit => "PDO_TRS",
            Self::PdoTransmitMap => "PDO_TRS_MAP",
        }
    }

    /// First index of the category.
    #[must_use]
    pub const fn first_index(&self) -> u16 {
        match self {
            Self::SdoServer => 0x1200,
            Self::SdoClient => 0x1280,
            Self::PdoReceive => 0x1400,
            Self::PdoReceiveMap => 0x1600,
            Self::PdoTransmit => 0x1800,
            Self::PdoTransmitMap => 0x1A00,
        }
    }

    /// Last index of the category.
    #[must_use]
    pub const fn last_index(&self) -> u16 {
        match self {
            Self::SdoServer => 0x127F,
            Self::SdoClient => 0x12FF,
            Self::PdoReceive => 0x15FF,
            Self::PdoReceiveMap => 0x17FF,
            Self::PdoTransmit => 0x19FF,
            Self::PdoTransmitMap => 0x1BFF,
        }
    }

    /// Finds the category an index belongs to.
    #[must_use]
    pub fn of(index: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|cat| cat.contains(index))
    }

    /// Returns true if the index falls inside the category.
    #[must_use]
    pub const fn contains(&self, index: u16) -> bool {
        index >= self.first_index() && index <= self.last_index()
    }

    /// Keeps the indices that belong to the category, preserving order.
    #[must_use]
    pub fn filter(&self, indices: &[u16]) -> Vec<u16> {
        indices
            .iter()
            .copied()
            .filter(|&idx| self.contains(idx))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_bounds() {
        assert!(IndexBand::Range.contains(0x0000));
        assert!(IndexBand::Range.contains(0x0260));
        assert!(!IndexBand::Range.contains(0x0261));
        assert!(IndexBand::Main.contains(0xFFFF));
        assert!(!IndexBand::Main.contains(0x0FFF));
        assert!(IndexBand::Variable.contains(0x2000));
        assert!(!IndexBand::Variable.contains(0xC000));
        assert!(IndexBand::Communication.contains(0x11FF));
        assert!(!IndexBand::Communication.contains(0x1200));
    }

    #[test]
    fn test_band_filter_keeps_order() {
        let indices = [0x0005, 0x00A0, 0x1000, 0x1018, 0x1400, 0x2000, 0x6000, 0xC000];
        assert_eq!(IndexBand::Range.filter(&indices), vec![0x0005, 0x00A0]);
        assert_eq!(
            IndexBand::Communication.filter(&indices),
            vec![0x1000, 0x1018]
        );
        assert_eq!(IndexBand::Variable.filter(&indices), vec![0x2000, 0x6000]);
        assert_eq!(IndexBand::Main.filter(&indices).len(), 6);
    }

    #[test]
    fn test_category_lookup() {
        assert_eq!(IndexCategory::of(0x1200), Some(IndexCategory::SdoServer));
        assert_eq!(IndexCategory::of(0x12FF), Some(IndexCategory::SdoClient));
        assert_eq!(IndexCategory::of(0x1601), Some(IndexCategory::PdoReceiveMap));
        assert_eq!(IndexCategory::of(0x1A00), Some(IndexCategory::PdoTransmitMap));
        assert_eq!(IndexCategory::of(0x1300), None);
        assert_eq!(IndexCategory::of(0x2000), None);
    }

    #[test]
    fn test_category_names_and_filter() {
        assert_eq!(IndexCategory::PdoTransmit.name(), "PDO_TRS");
        let indices = [0x1400, 0x1401, 0x1600, 0x1800];
        assert_eq!(
            IndexCategory::PdoReceive.filter(&indices),
            vec![0x1400, 0x1401]
        );
    }
}
