use crate::{
    constants::{ITEM_COMPONENTS, ITEM_HAS_DERIVATIVE, MAX_ITEM_ID, MIN_ITEM_ID},
    uephem_errors::UephemError,
};

/// Identifier of the quantities tabulated in a DE binary file.
///
/// DE files describe 15 items, indexed `0..=14`. The meaning of each index
/// and its number of vector components are fixed by the format, not stored
/// in the file.
///
/// Conversions
/// -----------
/// * Use [`TryFrom<i32>`] to convert a raw item number; values outside
///   `0..=14` yield [`UephemError::ItemNotFound`].
/// * Use [`From<HorizonID>`] to recover the table index (`usize`).
///
/// Examples
/// --------
/// ```rust
/// use uephem::jpl_ephem::horizon::horizon_ids::HorizonID;
///
/// let id = HorizonID::try_from(11).unwrap();
/// assert_eq!(id, HorizonID::Nutations);
/// assert_eq!(id.component_count(), 2);
/// assert!(HorizonID::try_from(15).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HorizonID {
    Mercury = 0,
    Venus = 1,
    EarthMoonBarycenter = 2,
    Mars = 3,
    Jupiter = 4,
    Saturn = 5,
    Uranus = 6,
    Neptune = 7,
    Pluto = 8,
    /// Geocentric Moon
    Moon = 9,
    Sun = 10,
    /// Nutations in longitude and obliquity
    Nutations = 11,
    /// Lunar mantle Euler angles
    Librations = 12,
    LunarMantleAngularVelocity = 13,
    /// TT − TDB
    TimeOffset = 14,
}

impl HorizonID {
    pub const ALL: [HorizonID; 15] = [
        HorizonID::Mercury,
        HorizonID::Venus,
        HorizonID::EarthMoonBarycenter,
        HorizonID::Mars,
        HorizonID::Jupiter,
        HorizonID::Saturn,
        HorizonID::Uranus,
        HorizonID::Neptune,
        HorizonID::Pluto,
        HorizonID::Moon,
        HorizonID::Sun,
        HorizonID::Nutations,
        HorizonID::Librations,
        HorizonID::LunarMantleAngularVelocity,
        HorizonID::TimeOffset,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Number of vector components stored per sub-interval.
    pub fn component_count(self) -> usize {
        ITEM_COMPONENTS[self.index()]
    }

    /// Whether time derivatives are reported for this item.
    pub fn has_derivative(self) -> bool {
        ITEM_HAS_DERIVATIVE[self.index()]
    }
}

impl TryFrom<i32> for HorizonID {
    type Error = UephemError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        if !(MIN_ITEM_ID..=MAX_ITEM_ID).contains(&value) {
            return Err(UephemError::ItemNotFound {
                item_id: value as i64,
                reason: "outside [0, 14]",
            });
        }
        Ok(HorizonID::ALL[value as usize])
    }
}

impl From<HorizonID> for usize {
    fn from(id: HorizonID) -> Self {
        id.index()
    }
}
