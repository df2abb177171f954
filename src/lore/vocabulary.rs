//! Lookup tables that drive modifier extraction.
//!
//! `Vocabulary::default()` carries the full SkyBlock tables. Tests start
//! from `Vocabulary::empty()` and add a handful of entries instead.

use std::collections::HashMap;

/// Commodity id of the recombobulator, priced for recombobulated items.
pub const RECOMBOBULATOR_ID: &str = "RECOMBOBULATOR_3000";

/// A booster recognised by substring anywhere in a description line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticBooster {
    /// Text searched for in the line.
    pub label: String,
    /// Commodity id emitted as a token.
    pub token: String,
    /// Whether the booster distinguishes listings for grouping purposes.
    pub keyed: bool,
}

/// Immutable name → identifier tables.
///
/// Ordered tables are `Vec`s: extraction checks entries in table order and
/// the first matching entry wins.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    /// Regular enchantments, levels I–X. Display name → id.
    pub enchantments: Vec<(String, String)>,
    /// Ultimate enchantments, levels I–V. Display name → id.
    pub ultimate_enchantments: Vec<(String, String)>,
    pub gemstone_tiers: HashMap<String, String>,
    pub gemstone_types: HashMap<String, String>,
    pub static_boosters: Vec<StaticBooster>,
    /// Commodity priced when a description carries the obfuscated code.
    pub recombobulator_id: String,
}

impl Vocabulary {
    /// An empty vocabulary that still knows the recombobulator id.
    pub fn empty() -> Self {
        Self {
            enchantments: Vec::new(),
            ultimate_enchantments: Vec::new(),
            gemstone_tiers: HashMap::new(),
            gemstone_types: HashMap::new(),
            static_boosters: Vec::new(),
            recombobulator_id: RECOMBOBULATOR_ID.to_string(),
        }
    }

    pub fn with_enchantment(mut self, name: &str, id: &str) -> Self {
        self.enchantments.push((name.to_string(), id.to_string()));
        self
    }

    pub fn with_ultimate(mut self, name: &str, id: &str) -> Self {
        self.ultimate_enchantments.push((name.to_string(), id.to_string()));
        self
    }

    pub fn with_gemstone_tier(mut self, word: &str, id: &str) -> Self {
        self.gemstone_tiers.insert(word.to_string(), id.to_string());
        self
    }

    pub fn with_gemstone_type(mut self, word: &str, id: &str) -> Self {
        self.gemstone_types.insert(word.to_string(), id.to_string());
        self
    }

    pub fn with_booster(mut self, label: &str, token: &str, keyed: bool) -> Self {
        self.static_boosters.push(StaticBooster {
            label: label.to_string(),
            token: token.to_string(),
            keyed,
        });
        self
    }

    /// The full SkyBlock vocabulary.
    pub fn skyblock() -> Self {
        let mut vocab = Self::empty();

        for (name, id) in ENCHANTMENTS {
            vocab = vocab.with_enchantment(name, id);
        }
        for (name, id) in ULTIMATE_ENCHANTMENTS {
            vocab = vocab.with_ultimate(name, id);
        }
        for (word, id) in GEMSTONE_TIERS {
            vocab = vocab.with_gemstone_tier(word, id);
        }
        for (word, id) in GEMSTONE_TYPES {
            vocab = vocab.with_gemstone_type(word, id);
        }
        for (label, token, keyed) in STATIC_BOOSTERS {
            vocab = vocab.with_booster(label, token, keyed);
        }

        vocab
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::skyblock()
    }
}

// ---------------------------------------------------------------------------
// SkyBlock tables
// ---------------------------------------------------------------------------

const ENCHANTMENTS: [(&str, &str); 79] = [
    // Sword / general combat
    ("Bane of Arthropods", "BANE_OF_ARTHROPODS"),
    ("Champion", "CHAMPION"),
    ("Cleave", "CLEAVE"),
    ("Critical", "CRITICAL"),
    ("Cubism", "CUBISM"),
    ("Divine Gift", "DIVINE_GIFT"),
    ("Dragon Hunter", "DRAGON_HUNTER"),
    ("Ender Slayer", "ENDER_SLAYER"),
    ("Execute", "EXECUTE"),
    ("Experience", "EXPERIENCE"),
    ("Fire Aspect", "FIRE_ASPECT"),
    ("First Strike", "FIRST_STRIKE"),
    ("Giant Killer", "GIANT_KILLER"),
    ("Impaling", "IMPALING"),
    ("Knockback", "KNOCKBACK"),
    ("Lethality", "LETHALITY"),
    ("Life Steal", "LIFE_STEAL"),
    ("Looting", "LOOTING"),
    ("Luck", "LUCK"),
    ("Mana Steal", "MANA_STEAL"),
    ("Prosecute", "PROSECUTE"),
    ("Scavenger", "SCAVENGER"),
    ("Sharpness", "SHARPNESS"),
    ("Smite", "SMITE"),
    ("Smoldering", "SMOLDERING"),
    // Syphon was renamed to Drain in game; the bazaar id kept the old name.
    ("Drain", "SYPHON"),
    ("Tabasco", "TABASCO"),
    ("Thunderbolt", "THUNDERBOLT"),
    ("Thunderlord", "THUNDERLORD"),
    ("Titan Killer", "TITAN_KILLER"),
    ("Triple-Strike", "TRIPLE_STRIKE"),
    ("Vampirism", "VAMPIRISM"),
    ("Venomous", "VENOMOUS"),
    ("Vicious", "VICIOUS"),
    // Bow
    ("Chance", "CHANCE"),
    ("Dragon Tracer", "DRAGON_TRACER"),
    ("Flame", "FLAME"),
    ("Overload", "OVERLOAD"),
    ("Infinite Quiver", "INFINITE_QUIVER"),
    ("Piercing", "PIERCING"),
    ("Power", "POWER"),
    ("Punch", "PUNCH"),
    ("Snipe", "SNIPE"),
    ("Duplex", "DUPLEX"),
    ("Rend", "REND"),
    // Armor and equipment
    ("Aqua Affinity", "AQUA_AFFINITY"),
    ("Big Brain", "BIG_BRAIN"),
    ("Transylvanian", "TRANSYLVANIAN"),
    ("Blast Protection", "BLAST_PROTECTION"),
    ("Counter-Strike", "COUNTER_STRIKE"),
    ("Depth Strider", "DEPTH_STRIDER"),
    ("Feather Falling", "FEATHER_FALLING"),
    ("Ferocious Mana", "FEROCIOUS_MANA"),
    ("Forest Pledge", "FOREST_PLEDGE"),
    ("Great Spook", "GREAT_SPOOK"),
    ("Growth", "GROWTH"),
    ("Hardened Mana", "HARDENED_MANA"),
    ("Hecatomb", "HECATOMB"),
    ("Mana Vampire", "MANA_VAMPIRE"),
    ("Pesterminator", "PESTERMINATOR"),
    ("Protection", "PROTECTION"),
    ("Projectile Protection", "PROJECTILE_PROTECTION"),
    ("Reflection", "REFLECTION"),
    ("Refrigerate", "REFRIGERATE"),
    ("Rejuvenate", "REJUVENATE"),
    ("Respiration", "RESPIRATION"),
    ("Respite", "RESPITE"),
    ("Scuba", "SCUBA"),
    ("Small Brain", "SMALL_BRAIN"),
    ("Smarty Pants", "SMARTY_PANTS"),
    ("Stealth", "STEALTH"),
    ("Strong Mana", "STRONG_MANA"),
    ("Sugar Rush", "SUGAR_RUSH"),
    ("Thorns", "THORNS"),
    ("True Protection", "TRUE_PROTECTION"),
    // Tools and utility
    ("Absorb", "ABSORB"),
    ("Cultivating", "CULTIVATING"),
    ("Dedication", "DEDICATION"),
    ("Cayenne", "CAYENNE"),
];

const ULTIMATE_ENCHANTMENTS: [(&str, &str); 22] = [
    ("Bank", "BANK"),
    ("Bobbin' Time", "BOBBIN_TIME"),
    ("Chimera", "CHIMERA"),
    ("Combo", "COMBO"),
    ("Duplex", "DUPLEX"),
    ("Fatal Tempo", "FATAL_TEMPO"),
    ("First Impression", "FIRST_IMPRESSION"),
    ("Flash", "FLASH"),
    ("Habanero Tactics", "HABANERO_TACTICS"),
    ("Inferno", "INFERNO"),
    ("Last Stand", "LAST_STAND"),
    ("Legion", "LEGION"),
    ("Missile", "MISSILE"),
    ("No Pain No Gain", "NO_PAIN_NO_GAIN"),
    ("One For All", "ONE_FOR_ALL"),
    ("Rend", "REND"),
    ("Swarm", "SWARM"),
    ("Soul Eater", "SOUL_EATER"),
    ("The One", "THE_ONE"),
    ("Ultimate Jerry", "ULTIMATE_JERRY"),
    ("Ultimate Wise", "ULTIMATE_WISE"),
    ("Wisdom", "WISDOM"),
];

const GEMSTONE_TIERS: [(&str, &str); 5] = [
    ("Rough", "ROUGH"),
    ("Flawed", "FLAWED"),
    ("Fine", "FINE"),
    ("Flawless", "FLAWLESS"),
    ("Perfect", "PERFECT"),
];

const GEMSTONE_TYPES: [(&str, &str); 8] = [
    ("Jasper", "JASPER"),
    ("Ruby", "RUBY"),
    ("Amber", "AMBER"),
    ("Sapphire", "SAPPHIRE"),
    ("Jade", "JADE"),
    ("Amethyst", "AMETHYST"),
    ("Topaz", "TOPAZ"),
    ("Opal", "OPAL"),
];

const STATIC_BOOSTERS: [(&str, &str, bool); 5] = [
    ("Art of War", "ART_OF_WAR", false),
    ("Book of Stats", "BOOK_OF_STATS", true),
    ("Hot Potato Book", "HOT_POTATO_BOOK", true),
    ("Fuming Potato Book", "FUMING_POTATO_BOOK", true),
    ("Recombobulator", RECOMBOBULATOR_ID, true),
];

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
