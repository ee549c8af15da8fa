use crate::config::GameConfig;
use crate::state::CharacterState;

/// Rank label derived from the aggregate level.
///
/// Variants are declared in ascending order; each one is reached at its
/// [`Rank::threshold`] (inclusive) and held until the next threshold.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rank {
    Unranked,
    #[strum(to_string = "Initiate I")]
    InitiateI,
    #[strum(to_string = "Initiate II")]
    InitiateII,
    #[strum(to_string = "Initiate III")]
    InitiateIII,
    #[strum(to_string = "Apprentice I")]
    ApprenticeI,
    #[strum(to_string = "Apprentice II")]
    ApprenticeII,
    #[strum(to_string = "Explorer I")]
    ExplorerI,
    #[strum(to_string = "Explorer II")]
    ExplorerII,
    #[strum(to_string = "Explorer III")]
    ExplorerIII,
    #[strum(to_string = "Acolyte I")]
    AcolyteI,
    #[strum(to_string = "Acolyte II")]
    AcolyteII,
    #[strum(to_string = "Acolyte III")]
    AcolyteIII,
    #[strum(to_string = "Challenger I")]
    ChallengerI,
    #[strum(to_string = "Challenger II")]
    ChallengerII,
    #[strum(to_string = "Challenger III")]
    ChallengerIII,
    #[strum(to_string = "Challenger IV")]
    ChallengerIV,
    #[strum(to_string = "Master I")]
    MasterI,
    #[strum(to_string = "Master II")]
    MasterII,
    #[strum(to_string = "Master III")]
    MasterIII,
    #[strum(to_string = "Master IV")]
    MasterIV,
    Champion,
    #[strum(to_string = "Veteran Champion")]
    VeteranChampion,
    #[strum(to_string = "Grand Champion")]
    GrandChampion,
    #[strum(to_string = "Elite Champion")]
    EliteChampion,
    #[strum(to_string = "Royal Champion")]
    RoyalChampion,
    #[strum(to_string = "Supreme Champion")]
    SupremeChampion,
    #[strum(to_string = "Ultimate Champion")]
    UltimateChampion,
}

impl Rank {
    /// Ascending `(threshold, rank)` table.
    const TABLE: [(u32, Rank); 27] = [
        (0, Rank::Unranked),
        (1, Rank::InitiateI),
        (3, Rank::InitiateII),
        (4, Rank::InitiateIII),
        (6, Rank::ApprenticeI),
        (8, Rank::ApprenticeII),
        (10, Rank::ExplorerI),
        (12, Rank::ExplorerII),
        (15, Rank::ExplorerIII),
        (20, Rank::AcolyteI),
        (23, Rank::AcolyteII),
        (27, Rank::AcolyteIII),
        (30, Rank::ChallengerI),
        (35, Rank::ChallengerII),
        (40, Rank::ChallengerIII),
        (45, Rank::ChallengerIV),
        (50, Rank::MasterI),
        (55, Rank::MasterII),
        (60, Rank::MasterIII),
        (65, Rank::MasterIV),
        (70, Rank::Champion),
        (75, Rank::VeteranChampion),
        (80, Rank::GrandChampion),
        (85, Rank::EliteChampion),
        (90, Rank::RoyalChampion),
        (95, Rank::SupremeChampion),
        (100, Rank::UltimateChampion),
    ];

    /// Highest rank whose threshold is at most `total_levels`.
    pub fn from_total_levels(total_levels: u32) -> Self {
        Self::TABLE
            .iter()
            .rev()
            .find(|(threshold, _)| total_levels >= *threshold)
            .map_or(Rank::Unranked, |(_, rank)| *rank)
    }

    /// Lowest aggregate level that reaches this rank.
    pub fn threshold(self) -> u32 {
        Self::TABLE
            .iter()
            .find(|(_, rank)| *rank == self)
            .map_or(0, |(threshold, _)| *threshold)
    }

    pub fn label(self) -> &'static str {
        self.into()
    }
}

/// Data behind the home-screen level meter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelMeter {
    /// Aggregate level, clamped to `0..=100`.
    pub total_levels: u32,
    pub rank: Rank,
}

impl LevelMeter {
    pub fn new(total_levels: u32) -> Self {
        let total_levels = total_levels.min(GameConfig::MAX_METER_LEVEL);
        Self {
            total_levels,
            rank: Rank::from_total_levels(total_levels),
        }
    }

    pub fn from_characters<'a>(characters: impl IntoIterator<Item = &'a CharacterState>) -> Self {
        Self::new(super::aggregate_progression(characters))
    }

    /// Fill ratio of the meter in `0.0..=1.0`.
    pub fn fill(&self) -> f32 {
        self.total_levels as f32 / GameConfig::MAX_METER_LEVEL as f32
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn thresholds_are_inclusive_lower() {
        assert_eq!(Rank::from_total_levels(0), Rank::Unranked);
        assert_eq!(Rank::from_total_levels(1), Rank::InitiateI);
        assert_eq!(Rank::from_total_levels(2), Rank::InitiateI);
        assert_eq!(Rank::from_total_levels(3), Rank::InitiateII);
        assert_eq!(Rank::from_total_levels(22), Rank::AcolyteI);
        assert_eq!(Rank::from_total_levels(100), Rank::UltimateChampion);
        assert_eq!(Rank::from_total_levels(250), Rank::UltimateChampion);
    }

    #[test]
    fn rank_never_decreases_with_level() {
        let ranks: Vec<Rank> = (0..=100).map(Rank::from_total_levels).collect();
        assert!(ranks.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn every_rank_round_trips_through_its_threshold() {
        for rank in Rank::iter() {
            assert_eq!(Rank::from_total_levels(rank.threshold()), rank);
        }
    }

    #[test]
    fn labels_match_display() {
        assert_eq!(Rank::ChallengerIV.label(), "Challenger IV");
        assert_eq!(Rank::Champion.to_string(), "Champion");
    }

    #[test]
    fn meter_clamps() {
        let meter = LevelMeter::new(140);
        assert_eq!(meter.total_levels, 100);
        assert_eq!(meter.rank, Rank::UltimateChampion);
        assert!((meter.fill() - 1.0).abs() < f32::EPSILON);
    }
}
