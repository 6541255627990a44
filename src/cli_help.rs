//! Long help text constants for CLI subcommands.
//!
//! Kept apart from `cli.rs` so the argument definitions stay short.

/// Single observation set: normalize, multiply, classify.
pub const EVALUATE: &str = "\
Evaluate flood risk for one set of observations.

Each observation is a kind=value pair. Every value is clipped to its
profile's input range and mapped linearly onto a multiplier; the composite
score is the product of all multipliers.

Built-in profiles:
  rainfall            0-150 mm per 6 h     -> 0.20-2.50
  soil_moisture       0-0.60 m3/m3         -> 0.80-1.40
  relative_humidity   30-100 %             -> 0.95-1.05

Bands (composite score):
  below_baseline   < 0.95
  baseline         0.95 - 1.05
  elevated         1.05 - 1.50   (alert)
  high             1.50 - 2.50   (alert)
  severe           >= 2.50       (alert)

Aliases: rain, soil, humidity, rh.

Examples:
  fl evaluate rainfall=150 soil_moisture=0.6 relative_humidity=100
  fl evaluate rain=25 --json
  fl --profiles-file profiles.toml evaluate river_stage=3.2";

/// Profile listing and the config file format.
pub const PROFILES: &str = "\
List the parameter profiles the scorer will use.

Without --profiles-file the built-in rainfall, soil moisture and relative
humidity profiles are shown. A profiles file is TOML:

  replace_defaults = false

  [[profile]]
  kind  = \"river_stage\"
  label = \"River stage\"
  unit  = \"m\"
  x_min = 0.0
  x_max = 5.0
  m_min = 0.9
  m_max = 1.8

An entry for a built-in kind overrides it. Entries with non-finite bounds,
x_min >= x_max or m_min == m_max are rejected with a warning; the rest of
the file still loads.";

/// Replay of recorded 24 h rainfall extremes.
pub const CALIBRATE: &str = "\
Replay historical 24 h rainfall records through the rainfall profile.

Shows the clipped value and multiplier for each event, whether the event
saturates the profile, and whether multipliers decrease with rainfall.

Note: the rainfall profile is calibrated per 6 h while the records are
24 h totals. No unit conversion is applied; every real extreme saturates
the profile at its maximum multiplier.";

/// Band transitions between two batch results.
pub const DIFF: &str = "\
Compare two saved batch results and report band transitions.

Sites are matched by id. A transition is reported when:
  new        a site absent before is now in an alert band
  upgrade    a site moved to a higher band that is alert-worthy
  downgrade  a site moved down from an alert-worthy band

Sites that failed to evaluate in either file are skipped.

Examples:
  fl batch sites.json --output before.json
  fl batch sites.json --output after.json
  fl diff before.json after.json
  fl diff before.json after.json --no-downgrades";
