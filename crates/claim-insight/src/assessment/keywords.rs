//! Keyword tables for the scorer, the component detector and the filename caption
//! analyzer. Order is significant wherever a scan stops at its first hit.

pub type KeywordDelta = (&'static str, i32);

/// Base score by damage type; the first key contained in the label wins.
pub const BASE_SCORES: &[KeywordDelta] = &[
    ("fire", 40),
    ("burn", 40),
    ("blaze", 50),
    ("collision", 45),
    ("crash", 50),
    ("accident", 45),
    ("impact", 40),
    ("flood", 65),
    ("water", 60),
    ("submerged", 70),
    ("inundated", 68),
    ("storm", 30),
    ("wind", 25),
    ("tree", 35),
    ("branch", 25),
    ("hail", 20),
    ("ice", 15),
    ("stone", 10),
    ("rain", 25),
    ("leak", 20),
    ("vandalism", 20),
    ("scratch", 5),
    ("broken", 25),
    ("theft", 15),
    ("burglary", 10),
    ("smoke", 25),
];

pub const DEFAULT_BASE_SCORE: i32 = 15;

pub const FLOOD_SEVERE: &[KeywordDelta] = &[
    ("completely", 25),
    ("fully", 20),
    ("entirely", 18),
    ("submerged", 30),
    ("deep", 20),
    ("standing", 15),
    ("sewage", 25),
    ("contaminated", 20),
    ("mud", 15),
    ("electrical", 20),
    ("engine", 25),
    ("interior", 20),
    ("seat", 15),
    ("carpet", 15),
    ("upholstery", 15),
];

pub const FLOOD_MODERATE: &[KeywordDelta] = &[
    ("partially", 10),
    ("water", 15),
    ("moisture", 10),
    ("damp", 8),
    ("wet", 8),
    ("leak", 10),
    ("rain", 12),
];

pub const FLOOD_MINOR: &[KeywordDelta] = &[("splash", -10), ("spray", -10), ("light", -15)];

/// `draw(0, 100)` below this adds the flood boost.
pub const FLOOD_BOOST_GATE: i32 = 70;
pub const FLOOD_BOOST_RANGE: (i32, i32) = (15, 25);

pub const MINOR_WORDS: &[KeywordDelta] = &[
    ("minor", -10),
    ("small", -10),
    ("slight", -15),
    ("light", -20),
    ("few", -12),
    ("scratch", -15),
    ("scratches", -15),
    ("ding", -10),
    ("chip", -10),
    ("mark", -20),
    ("cosmetic", -25),
    ("superficial", -30),
    ("surface", -15),
    ("paint", -10),
    ("finish", -10),
    ("touch", -12),
];

pub const MODERATE_WORDS: &[KeywordDelta] = &[
    ("moderate", 20),
    ("multiple", 15),
    ("several", 12),
    ("significant", 18),
    ("bent", 17),
    ("twisted", 20),
    ("cracks", 15),
    ("broken", 20),
    ("shattered", 25),
    ("smashed", 25),
];

pub const SEVERE_WORDS: &[KeywordDelta] = &[
    ("severe", 40),
    ("major", 35),
    ("extensive", 40),
    ("destroyed", 50),
    ("totaled", 50),
    ("demolished", 45),
    ("structural", 35),
    ("critical", 40),
    ("dangerous", 35),
    ("unsafe", 35),
    ("frame", 30),
    ("chassis", 30),
    ("support", 25),
];

/// First match only.
pub const EXTENT_WORDS: &[KeywordDelta] = &[
    ("completely", 35),
    ("fully", 30),
    ("entirely", 28),
    ("partially", 15),
    ("mostly", 20),
    ("largely", 18),
    ("slightly", -25),
    ("lightly", -30),
    ("barely", -35),
];

/// First match only.
pub const URGENCY_WORDS: &[KeywordDelta] = &[
    ("urgent", 30),
    ("immediate", 35),
    ("emergency", 40),
    ("prompt", 25),
    ("quick", 20),
    ("asap", 30),
];

/// Flood context re-checks; each group applies independently.
pub const FLOOD_CONTEXT: &[(&[&str], i32)] = &[
    (&["engine", "electrical"], 25),
    (&["interior", "seat", "carpet"], 20),
    (&["mold", "mildew"], 15),
    (&["sewage", "contaminated"], 25),
];

pub const SMALL_DENTS: &[&str] = &["small dent", "minor dent", "tiny dent", "little dent"];
pub const LARGE_DENTS: &[&str] = &["large dent", "big dent"];
pub const SMALL_DENT_DELTA: i32 = -15;
pub const LARGE_DENT_DELTA: i32 = 20;
pub const PLAIN_DENT_DELTA: i32 = 10;

pub const DEEP_SCRATCHES: &[&str] = &["deep scratch", "long scratch", "severe scratch"];
pub const DEEP_SCRATCH_DELTA: i32 = 15;
pub const PLAIN_SCRATCH_DELTA: i32 = -20;

pub const FLOOD_FLOOR_BELOW: i32 = 40;
pub const FLOOD_FLOOR_RANGE: (i32, i32) = (40, 80);
/// `draw(1, 100)` at or below this routes the claim into the severe band.
pub const FLOOD_SEVERE_SHARE: i32 = 70;
pub const FLOOD_SEVERE_BAND: (i32, i32) = (51, 85);
pub const FLOOD_MODERATE_BAND: (i32, i32) = (26, 50);
pub const FLOOD_MODERATE_CEILING: (i32, i32) = (40, 50);

const WET_COMPONENTS: &[&str] = &[
    "Water damage throughout vehicle",
    "Moisture intrusion in interior",
    "Electrical system damage",
    "Engine compartment flooding",
    "Upholstery and carpet water damage",
    "Potential mold/mildew growth",
    "Corroded metal components",
    "Contaminated fluid systems",
];

/// Components implied by the damage type alone, unioned in table order.
pub const DAMAGE_TYPE_COMPONENTS: &[(&str, &[&str])] = &[
    (
        "fire",
        &["Charred surfaces", "Soot damage", "Heat-affected areas", "Burn marks"],
    ),
    ("flood", WET_COMPONENTS),
    ("water", WET_COMPONENTS),
    (
        "hail",
        &["Dented body panels", "Broken glass", "Pitted surfaces", "Cracked trim"],
    ),
    (
        "storm",
        &["Wind damage", "Debris impact", "Water intrusion", "Structural stress"],
    ),
    (
        "collision",
        &["Body damage", "Structural misalignment", "Paint scratches", "Broken parts"],
    ),
    (
        "vandalism",
        &["Paint scratches", "Broken glass", "Dented panels", "Graffiti damage"],
    ),
];

pub const GLASS_KEYWORDS: &[&str] = &["windshield", "window", "glass", "pane", "mirror"];
pub const BODY_KEYWORDS: &[&str] = &[
    "roof",
    "hood",
    "door",
    "fender",
    "bumper",
    "panel",
    "quarter panel",
];
pub const PAINT_KEYWORDS: &[&str] = &["paint", "finish", "clear coat", "primer", "color"];
pub const STRUCTURAL_KEYWORDS: &[&str] = &["frame", "chassis", "support", "beam", "pillar"];
pub const ELECTRICAL_KEYWORDS: &[&str] =
    &["headlight", "taillight", "signal", "wiring", "battery"];
pub const INTERIOR_KEYWORDS: &[&str] = &["seat", "dashboard", "carpet", "upholstery", "console"];
pub const FLOOD_KEYWORDS: &[&str] = &["water", "moisture", "damp", "wet", "flood", "submerged"];

pub const FLOOD_COMPONENT_LABELS: [&str; 4] = [
    "Complete water immersion damage",
    "Flood water contamination",
    "Submerged component failure",
    "Water damage to all systems",
];

pub const DEFAULT_WET_COMPONENTS: &[&str] = &[
    "Complete water damage assessment required",
    "Electrical system inspection needed",
    "Interior water extraction required",
    "Potential mold remediation",
    "Engine and mechanical system evaluation",
];
pub const DEFAULT_FIRE_COMPONENTS: &[&str] =
    &["Charred surfaces", "Soot damage", "Heat-affected areas"];
pub const DEFAULT_HAIL_COMPONENTS: &[&str] = &["Dented panels", "Body damage", "Paint damage"];
pub const DEFAULT_COMPONENTS: &[&str] = &["Body damage", "Paint scratches"];

/// Joined-string component defaults used when a narrative has no breakdown to parse.
pub const DECODE_FIRE_COMPONENTS: &str = "Charred surfaces, Soot damage, Heat-affected areas";
pub const DECODE_WET_COMPONENTS: &str = "Water damage, Moisture intrusion, Mold risk areas";
pub const DECODE_HAIL_COMPONENTS: &str = "Dented panels, Body damage, Paint damage";
pub const DECODE_DEFAULT_COMPONENTS: &str = "Body damage, Paint scratches";

/// Filename clue families for the caption analyzer; one hit per family is enough.
pub const FILENAME_FAMILIES: &[(&str, &[&str])] = &[
    ("hail", &["hail", "ice", "stone"]),
    (
        "water",
        &[
            "water",
            "flood",
            "rain",
            "leak",
            "inundated",
            "submerged",
            "damp",
            "wet",
            "moisture",
        ],
    ),
    ("fire", &["fire", "burn", "smoke", "ash"]),
    ("collision", &["collision", "crash", "accident", "impact"]),
    ("vandalism", &["vandal", "scratch", "broken", "smashed"]),
    ("storm", &["storm", "wind", "tree", "branch"]),
    ("theft", &["theft", "broken", "window", "door"]),
];

pub const FILENAME_FLOOD_SEVERE: &[&str] = &[
    "submerged",
    "inundated",
    "deep",
    "standing",
    "sewage",
    "contaminated",
    "complete",
    "total",
    "engine",
    "electrical",
    "interior",
    "seat",
    "carpet",
    "upholstery",
    "mud",
    "debris",
];
pub const FILENAME_FLOOD_MODERATE: &[&str] = &[
    "water",
    "flood",
    "moisture",
    "damp",
    "wet",
    "partially",
    "some",
    "moderate",
    "noticeable",
    "obvious",
];
pub const FILENAME_MINOR: &[&str] = &[
    "minor",
    "small",
    "tiny",
    "little",
    "scratch",
    "scratches",
    "ding",
    "chip",
    "mark",
    "cosmetic",
    "surface",
    "paint",
    "light",
    "slight",
    "superficial",
];
pub const FILENAME_SEVERE: &[&str] = &[
    "major",
    "severe",
    "heavy",
    "serious",
    "critical",
    "broken",
    "cracked",
    "shattered",
    "smashed",
    "crash",
    "impact",
    "collision",
    "totaled",
    "wrecked",
    "demolished",
    "structural",
    "frame",
    "chassis",
    "burned",
    "flooded",
];
pub const FILENAME_MODERATE: &[&str] = &[
    "moderate",
    "medium",
    "noticeable",
    "obvious",
    "dents",
    "bent",
    "twisted",
    "multiple",
    "several",
];
