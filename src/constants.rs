//! Centralised simulation and gameplay constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place without source-diving across multiple modules.
//! [`crate::config::GameConfig`] mirrors every value below and can override
//! any subset from `assets/game.toml`.
//!
//! ## Tuning guidance
//!
//! Each constant notes the observable consequence of changing it.  After
//! editing, run the test suite to confirm scoring and timing have not
//! regressed.

// ── World Bounds ──────────────────────────────────────────────────────────────

/// Extent of the play field along X (world units), centred on the origin.
pub const WORLD_WIDTH: f32 = 100.0;

/// Extent of the play field along Z (world units), centred on the origin.
pub const WORLD_DEPTH: f32 = 100.0;

/// Height of the ground plane.  Projectiles land when they reach it.
pub const GROUND_LEVEL: f32 = 0.0;

// ── Physics ───────────────────────────────────────────────────────────────────

/// Downward acceleration applied to airborne projectiles (u/s²).
///
/// Higher values shorten fall time and therefore the forward "lead" a player
/// has to give a target.
pub const GRAVITY: f32 = 9.8;

// ── Round ─────────────────────────────────────────────────────────────────────

/// Length of one round in seconds.
pub const ROUND_DURATION: f32 = 90.0;

// ── Wind ──────────────────────────────────────────────────────────────────────

/// Upper bound on the wind speed (u/s).  Each new wind target draws its speed
/// uniformly from `[0, MAX_WIND_SPEED]`.
pub const MAX_WIND_SPEED: f32 = 5.0;

/// Seconds between two wind target draws.
pub const WIND_CHANGE_INTERVAL: f32 = 10.0;

/// Seconds the wind takes to blend from its previous vector to a new target.
///
/// Must stay below `WIND_CHANGE_INTERVAL`, otherwise a new target is drawn
/// before the previous blend finishes.
pub const WIND_TRANSITION_DURATION: f32 = 2.0;

// ── Flyer ─────────────────────────────────────────────────────────────────────

/// Angular rate (rad/s) of the flyer's height oscillation between its type's
/// minimum and maximum height.  0.5 gives a full cycle roughly every 12.6 s.
pub const HEIGHT_OSCILLATION_RATE: f32 = 0.5;

/// Angular rate (rad/s) of the cosmetic wing flap.
pub const WING_FLAP_RATE: f32 = 8.0;

/// Peak wing angle in degrees.
pub const WING_FLAP_AMPLITUDE: f32 = 30.0;

/// Horizontal speed below which the flyer heading is reported as 0°.
pub const HEADING_SPEED_THRESHOLD: f32 = 0.1;

/// Hard floor on the cooldown multiplier.  Power-ups can shorten the fire
/// cooldown but never below this fraction of the flyer's base cooldown.
pub const MIN_COOLDOWN_MULTIPLIER: f32 = 0.3;

// ── Projectile ────────────────────────────────────────────────────────────────

/// Seconds a landed projectile lingers (splat squash) before removal.
pub const SPLAT_DURATION: f32 = 0.5;

// ── Targets ───────────────────────────────────────────────────────────────────

/// Seconds a target keeps showing its last hit zone and score.
pub const HIT_DISPLAY_DURATION: f32 = 1.5;

/// Distance from the world edge at which wandering targets bounce.
pub const TARGET_BOUNCE_MARGIN: f32 = 5.0;

/// Distance from the world edge kept clear when placing new targets.
pub const TARGET_SPAWN_MARGIN: f32 = 10.0;

/// Lower bound on the number of targets placed at round start.
pub const MIN_TARGETS: u32 = 8;

/// Upper bound on the initial target count and cap on live targets.
pub const MAX_TARGETS: u32 = 15;

/// Seconds between periodic target spawns.
pub const TARGET_SPAWN_INTERVAL: f32 = 5.0;

// ── Power-ups ─────────────────────────────────────────────────────────────────

/// Seconds between periodic power-up spawns.
pub const POWER_UP_SPAWN_INTERVAL: f32 = 15.0;

/// Distance from the world edge kept clear when placing power-ups.
pub const POWER_UP_SPAWN_MARGIN: f32 = 15.0;

/// Cap on simultaneously live power-ups.
pub const MAX_POWER_UPS: u32 = 3;

/// Seconds an uncollected power-up stays in the world.
pub const POWER_UP_LIFETIME: f32 = 10.0;

/// Final seconds of a power-up's lifetime during which it reports
/// `is_expiring()` so the renderer can blink it.
pub const POWER_UP_EXPIRY_WARNING: f32 = 3.0;

/// 3D distance within which the flyer collects a power-up.
pub const POWER_UP_COLLECT_RADIUS: f32 = 3.0;

/// Seconds the timed power-up effects (double points, multi-shot) last.
pub const POWER_UP_EFFECT_DURATION: f32 = 5.0;

/// Score multiplier granted by the double-points power-up.
pub const DOUBLE_POINTS_MULTIPLIER: u32 = 2;

/// Projectiles released per volley while multi-shot is active.
pub const MULTI_SHOT_COUNT: u32 = 3;

/// Lateral speed (u/s) added between neighbouring projectiles of a volley.
pub const MULTI_SHOT_SPREAD: f32 = 2.0;
