use crate::lootbox::Rarity;
use rand::Rng;

pub const BASE_NAMES: [&str; 6] = [
    "Potbelly Stove",
    "Box Stove",
    "Cookstove",
    "Franklin Stove",
    "Parlor Stove",
    "Rocket Stove",
];

pub fn get_quality_prefix(rarity: Rarity) -> &'static str {
    match rarity {
        Rarity::Common => "",
        Rarity::Uncommon => "Polished",
        Rarity::Rare => "Enameled",
        Rarity::Epic => "Runed",
        Rarity::Legendary => "Everburning",
    }
}

pub fn generate_stove_name(rarity: Rarity, rng: &mut impl Rng) -> String {
    let base = BASE_NAMES[rng.gen_range(0..BASE_NAMES.len())];
    match get_quality_prefix(rarity) {
        "" => base.to_string(),
        prefix => format!("{} {}", prefix, base),
    }
}
