//! Static flyer, target and power-up catalogs.
//!
//! Each catalog is an immutable table of value records indexed by a small
//! `Copy` enum.  Behaviour that depends on the variant (scoring by distance,
//! difficulty labels) is a pure function over the record, so adding a variant
//! means adding one table row.
//!
//! ## Flyers
//!
//! | Flyer   | Height band | Speed | Cooldown | Difficulty |
//! |---------|-------------|-------|----------|------------|
//! | Sparrow | 8–12        | 15    | 1.5 s    | Easy       |
//! | Pigeon  | 10–16       | 18    | 1.2 s    | Easy+      |
//! | Crow    | 12–20       | 22    | 1.0 s    | Medium     |
//! | Seagull | 15–25       | 28    | 0.9 s    | Medium+    |
//! | Hawk    | 20–35       | 35    | 0.8 s    | Hard       |
//! | Eagle   | 25–45       | 45    | 0.7 s    | Expert     |

use crate::error::{SimError, SimResult};
use std::fmt;
use std::str::FromStr;

// ── Flyers ────────────────────────────────────────────────────────────────────

/// Per-variant flyer parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlyerSpec {
    pub name: &'static str,
    pub min_height: f32,
    pub max_height: f32,
    /// Horizontal speed (u/s) at full input deflection.
    pub base_speed: f32,
    /// Seconds between drops at a cooldown multiplier of 1.0.
    pub base_cooldown: f32,
    /// 1 (easiest) to 6 (hardest).
    pub difficulty: u8,
    pub scale: f32,
    pub wing_size: f32,
    pub hue: f32,
}

impl FlyerSpec {
    pub fn difficulty_label(&self) -> &'static str {
        match self.difficulty {
            1 => "Easy",
            2 => "Easy+",
            3 => "Medium",
            4 => "Medium+",
            5 => "Hard",
            6 => "Expert",
            _ => "Unknown",
        }
    }

    /// Altitude halfway through the oscillation band.
    #[inline]
    pub fn mid_height(&self) -> f32 {
        (self.min_height + self.max_height) * 0.5
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FlyerKind {
    #[default]
    Sparrow,
    Pigeon,
    Crow,
    Seagull,
    Hawk,
    Eagle,
}

const FLYER_SPECS: [FlyerSpec; 6] = [
    FlyerSpec {
        name: "Sparrow",
        min_height: 8.0,
        max_height: 12.0,
        base_speed: 15.0,
        base_cooldown: 1.5,
        difficulty: 1,
        scale: 0.8,
        wing_size: 0.5,
        hue: 0.3,
    },
    FlyerSpec {
        name: "Pigeon",
        min_height: 10.0,
        max_height: 16.0,
        base_speed: 18.0,
        base_cooldown: 1.2,
        difficulty: 2,
        scale: 0.9,
        wing_size: 0.6,
        hue: 0.5,
    },
    FlyerSpec {
        name: "Crow",
        min_height: 12.0,
        max_height: 20.0,
        base_speed: 22.0,
        base_cooldown: 1.0,
        difficulty: 3,
        scale: 1.0,
        wing_size: 0.7,
        hue: 0.2,
    },
    FlyerSpec {
        name: "Seagull",
        min_height: 15.0,
        max_height: 25.0,
        base_speed: 28.0,
        base_cooldown: 0.9,
        difficulty: 4,
        scale: 1.1,
        wing_size: 0.75,
        hue: 0.8,
    },
    FlyerSpec {
        name: "Hawk",
        min_height: 20.0,
        max_height: 35.0,
        base_speed: 35.0,
        base_cooldown: 0.8,
        difficulty: 5,
        scale: 1.3,
        wing_size: 0.9,
        hue: 0.4,
    },
    FlyerSpec {
        name: "Eagle",
        min_height: 25.0,
        max_height: 45.0,
        base_speed: 45.0,
        base_cooldown: 0.7,
        difficulty: 6,
        scale: 1.5,
        wing_size: 1.0,
        hue: 0.35,
    },
];

impl FlyerKind {
    pub const ALL: [FlyerKind; 6] = [
        FlyerKind::Sparrow,
        FlyerKind::Pigeon,
        FlyerKind::Crow,
        FlyerKind::Seagull,
        FlyerKind::Hawk,
        FlyerKind::Eagle,
    ];

    #[inline]
    pub fn spec(self) -> &'static FlyerSpec {
        &FLYER_SPECS[self as usize]
    }
}

impl fmt::Display for FlyerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spec().name)
    }
}

impl FromStr for FlyerKind {
    type Err = SimError;

    /// Case-insensitive lookup by display name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        FlyerKind::ALL
            .into_iter()
            .find(|kind| kind.spec().name.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SimError::UnknownFlyer {
                name: wanted.to_string(),
            })
    }
}

// ── Targets ───────────────────────────────────────────────────────────────────

/// Which concentric ring a landing fell in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HitZone {
    Center,
    Middle,
    Outer,
}

impl HitZone {
    pub fn label(self) -> &'static str {
        match self {
            HitZone::Center => "BULLSEYE!",
            HitZone::Middle => "GREAT!",
            HitZone::Outer => "HIT!",
        }
    }
}

/// Per-variant target parameters.  Radii are planar distances from the
/// target centre; each boundary is inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetSpec {
    pub name: &'static str,
    pub center_score: u32,
    pub middle_score: u32,
    pub outer_score: u32,
    pub center_radius: f32,
    pub middle_radius: f32,
    pub outer_radius: f32,
    pub model_height: f32,
    /// `(min, max)` wander speed for variants that walk around.
    pub wander_speed: Option<(f32, f32)>,
}

impl TargetSpec {
    pub fn zone_for_distance(&self, distance: f32) -> Option<HitZone> {
        if distance <= self.center_radius {
            Some(HitZone::Center)
        } else if distance <= self.middle_radius {
            Some(HitZone::Middle)
        } else if distance <= self.outer_radius {
            Some(HitZone::Outer)
        } else {
            None
        }
    }

    /// Score for a landing `distance` away from the centre; 0 is a miss.
    pub fn score_for_distance(&self, distance: f32) -> u32 {
        match self.zone_for_distance(distance) {
            Some(zone) => self.score_for_zone(zone),
            None => 0,
        }
    }

    pub fn zone_label(&self, distance: f32) -> &'static str {
        self.zone_for_distance(distance)
            .map_or("MISS", HitZone::label)
    }

    #[inline]
    pub fn score_for_zone(&self, zone: HitZone) -> u32 {
        match zone {
            HitZone::Center => self.center_score,
            HitZone::Middle => self.middle_score,
            HitZone::Outer => self.outer_score,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    Person,
    Car,
    Bench,
    Statue,
    Umbrella,
    Picnic,
}

// Generous rings: the game targets young and casual players.
const TARGET_SPECS: [TargetSpec; 6] = [
    TargetSpec {
        name: "Person",
        center_score: 100,
        middle_score: 50,
        outer_score: 25,
        center_radius: 1.5,
        middle_radius: 3.0,
        outer_radius: 5.0,
        model_height: 1.8,
        wander_speed: Some((1.0, 3.0)),
    },
    TargetSpec {
        name: "Car",
        center_score: 75,
        middle_score: 40,
        outer_score: 20,
        center_radius: 2.5,
        middle_radius: 5.0,
        outer_radius: 8.0,
        model_height: 1.2,
        wander_speed: None,
    },
    TargetSpec {
        name: "Bench",
        center_score: 60,
        middle_score: 30,
        outer_score: 15,
        center_radius: 2.0,
        middle_radius: 4.0,
        outer_radius: 6.0,
        model_height: 0.8,
        wander_speed: None,
    },
    TargetSpec {
        name: "Statue",
        center_score: 150,
        middle_score: 75,
        outer_score: 35,
        center_radius: 1.8,
        middle_radius: 3.5,
        outer_radius: 5.5,
        model_height: 3.0,
        wander_speed: None,
    },
    TargetSpec {
        name: "Umbrella",
        center_score: 80,
        middle_score: 40,
        outer_score: 20,
        center_radius: 2.5,
        middle_radius: 5.0,
        outer_radius: 7.5,
        model_height: 2.2,
        wander_speed: None,
    },
    TargetSpec {
        name: "Picnic",
        center_score: 50,
        middle_score: 25,
        outer_score: 10,
        center_radius: 4.0,
        middle_radius: 7.0,
        outer_radius: 10.0,
        model_height: 0.3,
        wander_speed: None,
    },
];

impl TargetKind {
    pub const ALL: [TargetKind; 6] = [
        TargetKind::Person,
        TargetKind::Car,
        TargetKind::Bench,
        TargetKind::Statue,
        TargetKind::Umbrella,
        TargetKind::Picnic,
    ];

    #[inline]
    pub fn spec(self) -> &'static TargetSpec {
        &TARGET_SPECS[self as usize]
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spec().name)
    }
}

// ── Power-ups ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerUpSpec {
    pub name: &'static str,
    /// Amount subtracted from the flyer's cooldown multiplier on pickup.
    pub cooldown_reduction: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerUpKind {
    /// Permanently (for the round) shortens the fire cooldown.
    CooldownReduction,
    /// Multiplies awarded points for a few seconds.
    DoublePoints,
    /// Each drop releases a fanned volley for a few seconds.
    MultiShot,
}

const POWER_UP_SPECS: [PowerUpSpec; 3] = [
    PowerUpSpec {
        name: "Speed Boost",
        cooldown_reduction: 0.3,
    },
    PowerUpSpec {
        name: "2x Points",
        cooldown_reduction: 0.0,
    },
    PowerUpSpec {
        name: "Triple Shot",
        cooldown_reduction: 0.0,
    },
];

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::CooldownReduction,
        PowerUpKind::DoublePoints,
        PowerUpKind::MultiShot,
    ];

    #[inline]
    pub fn spec(self) -> &'static PowerUpSpec {
        &POWER_UP_SPECS[self as usize]
    }
}

impl fmt::Display for PowerUpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spec().name)
    }
}

// ── Validation ────────────────────────────────────────────────────────────────

/// Check every catalog row once.  Called at startup and from tests; the
/// per-tick code trusts the tables.
pub fn validate_catalogs() -> SimResult<()> {
    for kind in FlyerKind::ALL {
        validate_flyer(kind.spec())?;
    }
    for kind in TargetKind::ALL {
        validate_target(kind.spec())?;
    }
    for kind in PowerUpKind::ALL {
        let spec = kind.spec();
        if !(0.0..=1.0).contains(&spec.cooldown_reduction) {
            return Err(invalid("power-up", spec.name, "cooldown reduction outside [0, 1]"));
        }
    }
    Ok(())
}

fn validate_flyer(spec: &FlyerSpec) -> SimResult<()> {
    if !(spec.min_height > 0.0 && spec.min_height < spec.max_height) {
        return Err(invalid("flyer", spec.name, "height band must satisfy 0 < min < max"));
    }
    if spec.base_speed <= 0.0 {
        return Err(invalid("flyer", spec.name, "base speed must be positive"));
    }
    if spec.base_cooldown <= 0.0 {
        return Err(invalid("flyer", spec.name, "base cooldown must be positive"));
    }
    Ok(())
}

fn validate_target(spec: &TargetSpec) -> SimResult<()> {
    if !(spec.center_radius > 0.0
        && spec.center_radius < spec.middle_radius
        && spec.middle_radius < spec.outer_radius)
    {
        return Err(invalid("target", spec.name, "radii must grow center < middle < outer"));
    }
    if !(spec.center_score > spec.middle_score
        && spec.middle_score > spec.outer_score
        && spec.outer_score > 0)
    {
        return Err(invalid("target", spec.name, "scores must shrink center > middle > outer > 0"));
    }
    if let Some((lo, hi)) = spec.wander_speed {
        if !(lo > 0.0 && lo <= hi) {
            return Err(invalid("target", spec.name, "wander speed range must satisfy 0 < min <= max"));
        }
    }
    Ok(())
}

fn invalid(catalog: &'static str, entry: &'static str, reason: &'static str) -> SimError {
    SimError::InvalidCatalogEntry {
        catalog,
        entry,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipped_catalogs_are_valid() {
        validate_catalogs().expect("built-in catalogs must validate");
    }

    #[test]
    fn lookups_follow_declaration_order() {
        assert_eq!(FlyerKind::Crow.spec().name, "Crow");
        assert_eq!(TargetKind::Picnic.spec().name, "Picnic");
        assert_eq!(PowerUpKind::MultiShot.spec().name, "Triple Shot");
    }

    #[test]
    fn zone_boundaries_are_inclusive() {
        let person = TargetKind::Person.spec();
        assert_eq!(person.score_for_distance(1.5), 100);
        assert_eq!(person.score_for_distance(1.5001), 50);
        assert_eq!(person.score_for_distance(3.0), 50);
        assert_eq!(person.score_for_distance(5.0), 25);
        assert_eq!(person.score_for_distance(5.01), 0);
    }

    #[test]
    fn zone_labels_match_rings() {
        let car = TargetKind::Car.spec();
        assert_eq!(car.zone_label(0.0), "BULLSEYE!");
        assert_eq!(car.zone_label(4.0), "GREAT!");
        assert_eq!(car.zone_label(7.9), "HIT!");
        assert_eq!(car.zone_label(20.0), "MISS");
    }

    #[test]
    fn difficulty_labels_cover_every_flyer() {
        let labels: Vec<_> = FlyerKind::ALL
            .iter()
            .map(|k| k.spec().difficulty_label())
            .collect();
        assert_eq!(labels, ["Easy", "Easy+", "Medium", "Medium+", "Hard", "Expert"]);
    }

    #[test]
    fn flyer_parses_case_insensitively() {
        assert_eq!("hawk".parse::<FlyerKind>().unwrap(), FlyerKind::Hawk);
        assert_eq!(" EAGLE ".parse::<FlyerKind>().unwrap(), FlyerKind::Eagle);
        assert!(matches!(
            "dodo".parse::<FlyerKind>(),
            Err(SimError::UnknownFlyer { .. })
        ));
    }

    #[test]
    fn only_people_wander() {
        let wanderers: Vec<_> = TargetKind::ALL
            .into_iter()
            .filter(|k| k.spec().wander_speed.is_some())
            .collect();
        assert_eq!(wanderers, [TargetKind::Person]);
    }
}
