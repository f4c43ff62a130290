//! Upstream payload fixtures
//!
//! Trimmed copies of real PokéAPI and Binance responses. Unknown fields are
//! left in on purpose so normalizers are seen dropping them.

use serde_json::{json, Value};

/// `/pokemon/pikachu`, with the move list cut to five entries
pub fn pikachu() -> Value {
    json!({
        "id": 25,
        "name": "pikachu",
        "base_experience": 112,
        "height": 4,
        "weight": 60,
        "is_default": true,
        "order": 35,
        "abilities": [
            {"ability": {"name": "static", "url": "https://pokeapi.co/api/v2/ability/9/"}, "is_hidden": false, "slot": 1},
            {"ability": {"name": "lightning-rod", "url": "https://pokeapi.co/api/v2/ability/31/"}, "is_hidden": true, "slot": 3}
        ],
        "moves": [
            {"move": {"name": "mega-punch", "url": "https://pokeapi.co/api/v2/move/5/"}, "version_group_details": []},
            {"move": {"name": "pay-day", "url": "https://pokeapi.co/api/v2/move/6/"}, "version_group_details": []},
            {"move": {"name": "thunder-punch", "url": "https://pokeapi.co/api/v2/move/9/"}, "version_group_details": []},
            {"move": {"name": "slam", "url": "https://pokeapi.co/api/v2/move/21/"}, "version_group_details": []},
            {"move": {"name": "double-kick", "url": "https://pokeapi.co/api/v2/move/24/"}, "version_group_details": []}
        ],
        "sprites": {
            "front_default": "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/25.png",
            "back_default": "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/back/25.png",
            "front_shiny": null
        },
        "stats": [
            {"base_stat": 35, "effort": 0, "stat": {"name": "hp", "url": "https://pokeapi.co/api/v2/stat/1/"}},
            {"base_stat": 55, "effort": 0, "stat": {"name": "attack", "url": "https://pokeapi.co/api/v2/stat/2/"}},
            {"base_stat": 40, "effort": 0, "stat": {"name": "defense", "url": "https://pokeapi.co/api/v2/stat/3/"}},
            {"base_stat": 50, "effort": 0, "stat": {"name": "special-attack", "url": "https://pokeapi.co/api/v2/stat/4/"}},
            {"base_stat": 50, "effort": 0, "stat": {"name": "special-defense", "url": "https://pokeapi.co/api/v2/stat/5/"}},
            {"base_stat": 90, "effort": 2, "stat": {"name": "speed", "url": "https://pokeapi.co/api/v2/stat/6/"}}
        ],
        "types": [
            {"slot": 1, "type": {"name": "electric", "url": "https://pokeapi.co/api/v2/type/13/"}}
        ]
    })
}

/// `/pokemon/{name}` body with `count` generated moves
pub fn pokemon_with_moves(id: i64, name: &str, count: usize) -> Value {
    let moves: Vec<Value> = (0..count)
        .map(|i| json!({"move": {"name": format!("move-{i}")}}))
        .collect();
    json!({
        "id": id,
        "name": name,
        "height": 10,
        "weight": 100,
        "types": [{"slot": 1, "type": {"name": "normal"}}],
        "stats": [],
        "abilities": [],
        "moves": moves,
        "sprites": {"front_default": null}
    })
}

/// `/ability/static`; the German entry comes first
pub fn static_ability() -> Value {
    json!({
        "id": 9,
        "name": "static",
        "is_main_series": true,
        "generation": {"name": "generation-iii", "url": "https://pokeapi.co/api/v2/generation/3/"},
        "effect_entries": [
            {
                "effect": "Bei Kontakt mit dem Pokémon kann der Angreifer paralysiert werden.",
                "short_effect": "Paralyse bei Kontakt möglich.",
                "language": {"name": "de", "url": "https://pokeapi.co/api/v2/language/6/"}
            },
            {
                "effect": "Whenever a move makes contact with this Pokémon, the move's user has a 30% chance of being paralyzed.",
                "short_effect": "Has a 30% chance of paralyzing attacking Pokémon on contact.",
                "language": {"name": "en", "url": "https://pokeapi.co/api/v2/language/9/"}
            }
        ],
        "pokemon": [
            {"is_hidden": false, "slot": 1, "pokemon": {"name": "pikachu", "url": "https://pokeapi.co/api/v2/pokemon/25/"}},
            {"is_hidden": false, "slot": 1, "pokemon": {"name": "raichu", "url": "https://pokeapi.co/api/v2/pokemon/26/"}}
        ]
    })
}

/// `/api/v3/ticker/price` body
pub fn ticker(symbol: &str, price: &str) -> Value {
    json!({"symbol": symbol, "price": price})
}
