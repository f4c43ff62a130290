//! Pokémon species lookup tool
//!
//! Fetches `/pokemon/{nameOrId}` from PokéAPI and returns a compact summary:
//! types, base stats, abilities, an optional sprite and a few moves.

use crate::tools::adapter::{LookupAdapter, LookupTool, RequestContext};
use crate::tools::normalize::{array, head, names_at, passthrough, str_at};
use crate::tools::shape::{Constraints, FieldDefault, FieldKind, FieldSpec, InputShape};
use crate::tools::upstream::{resource_url, Upstream, POKEAPI};
use crate::tools::ToolError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const NAME: &str = "pokemon.get";

pub type PokemonTool = LookupTool<PokemonAdapter>;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PokemonArgs {
    #[serde(rename = "nameOrId")]
    pub name_or_id: String,
    /// 0 means no moves
    pub moves_limit: usize,
    pub include_sprite: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PokemonSummary {
    pub id: Option<i64>,
    pub name: Option<String>,
    /// Upstream units (decimetres), unconverted
    pub height: Value,
    /// Upstream units (hectograms), unconverted
    pub weight: Value,
    pub types: Vec<String>,
    /// Base stats keyed by stat name, in upstream order
    pub stats: Map<String, Value>,
    pub abilities: Vec<String>,
    pub moves: Vec<String>,
    pub sprite: Option<String>,
    pub url: Option<String>,
}

/// Build the summary from a `/pokemon` body (pure function)
pub fn normalize_pokemon(args: &PokemonArgs, base_url: &str, body: &Value) -> PokemonSummary {
    let id = body.get("id").and_then(Value::as_i64);

    let mut stats = Map::new();
    for entry in array(body, "stats") {
        let (Some(name), Some(Value::Number(base))) =
            (str_at(entry, &["stat", "name"]), entry.get("base_stat"))
        else {
            continue;
        };
        if !name.is_empty() {
            stats.insert(name.to_string(), Value::Number(base.clone()));
        }
    }

    let moves = if args.moves_limit == 0 {
        Vec::new()
    } else {
        names_at(head(array(body, "moves"), args.moves_limit), &["move", "name"])
    };

    let sprite = if args.include_sprite {
        str_at(body, &["sprites", "front_default"]).map(str::to_owned)
    } else {
        None
    };

    PokemonSummary {
        id,
        name: str_at(body, &["name"]).map(str::to_owned),
        height: passthrough(body, "height"),
        weight: passthrough(body, "weight"),
        types: names_at(array(body, "types"), &["type", "name"]),
        stats,
        abilities: names_at(array(body, "abilities"), &["ability", "name"]),
        moves,
        sprite,
        url: id.map(|id| format!("{}/pokemon/{id}", base_url.trim_end_matches('/'))),
    }
}

/// Species lookup against PokéAPI
#[derive(Debug, Clone, Copy, Default)]
pub struct PokemonAdapter;

impl LookupAdapter for PokemonAdapter {
    type Args = PokemonArgs;
    type Output = PokemonSummary;

    const NAME: &'static str = NAME;
    const DESCRIPTION: &'static str =
        "Fetch a Pokémon by name or id (types, base stats, abilities, optional sprite and a few moves).";
    const UPSTREAM: Upstream = POKEAPI;
    const SHAPE: InputShape = InputShape {
        fields: &[
            FieldSpec {
                name: "nameOrId",
                kind: FieldKind::String,
                required: true,
                default: None,
                constraints: Constraints::NON_BLANK,
                description: "Pokémon name or numeric id, e.g. \"pikachu\" or \"25\".",
            },
            FieldSpec {
                name: "moves_limit",
                kind: FieldKind::Integer,
                required: false,
                default: Some(FieldDefault::Int(0)),
                constraints: Constraints {
                    minimum: Some(0),
                    maximum: Some(50),
                    ..Constraints::NONE
                },
                description: "Max number of moves to include (0=omit). Default 0. Max 50.",
            },
            FieldSpec {
                name: "include_sprite",
                kind: FieldKind::Boolean,
                required: false,
                default: Some(FieldDefault::Bool(true)),
                constraints: Constraints::NONE,
                description: "Include the default front sprite URL. Default true.",
            },
        ],
    };

    fn request_url(&self, base_url: &str, args: &PokemonArgs) -> String {
        resource_url(base_url, "pokemon", &args.name_or_id)
    }

    fn not_found_message(&self, args: &PokemonArgs) -> String {
        format!("No Pokémon found for \"{}\".", args.name_or_id)
    }

    fn normalize(
        &self,
        args: &PokemonArgs,
        ctx: RequestContext<'_>,
        body: &Value,
    ) -> Result<PokemonSummary, ToolError> {
        Ok(normalize_pokemon(args, ctx.base_url, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;
    use crate::tools::upstream::POKEAPI_BASE_URL;
    use serde_json::json;

    fn args(moves_limit: usize, include_sprite: bool) -> PokemonArgs {
        PokemonArgs {
            name_or_id: "pikachu".to_string(),
            moves_limit,
            include_sprite,
        }
    }

    #[test]
    fn test_pikachu_summary() {
        let summary =
            normalize_pokemon(&args(2, true), POKEAPI_BASE_URL, &fixtures::pikachu());

        assert_eq!(summary.id, Some(25));
        assert_eq!(summary.name.as_deref(), Some("pikachu"));
        assert_eq!(summary.height, json!(4));
        assert_eq!(summary.weight, json!(60));
        assert_eq!(summary.types, vec!["electric".to_string()]);
        assert_eq!(summary.stats.get("speed"), Some(&json!(90)));
        assert_eq!(
            summary.stats.keys().collect::<Vec<_>>(),
            vec!["hp", "attack", "defense", "special-attack", "special-defense", "speed"]
        );
        assert_eq!(summary.abilities, vec!["static", "lightning-rod"]);
        assert_eq!(summary.moves, vec!["mega-punch", "pay-day"]);
        assert!(summary.sprite.as_deref().unwrap().ends_with("/25.png"));
        assert_eq!(
            summary.url.as_deref(),
            Some("https://pokeapi.co/api/v2/pokemon/25")
        );
    }

    #[test]
    fn test_moves_limit_zero_gives_empty_list() {
        let summary =
            normalize_pokemon(&args(0, true), POKEAPI_BASE_URL, &fixtures::pikachu());
        assert!(summary.moves.is_empty());

        let serialized = serde_json::to_value(&summary).unwrap();
        assert_eq!(serialized["moves"], json!([]));
    }

    #[test]
    fn test_moves_limit_larger_than_available() {
        let summary =
            normalize_pokemon(&args(50, true), POKEAPI_BASE_URL, &fixtures::pikachu());
        assert_eq!(summary.moves.len(), 5);
    }

    #[test]
    fn test_sprite_excluded_serializes_as_null() {
        let summary =
            normalize_pokemon(&args(0, false), POKEAPI_BASE_URL, &fixtures::pikachu());
        assert_eq!(summary.sprite, None);

        let serialized = serde_json::to_value(&summary).unwrap();
        assert!(serialized.as_object().unwrap().contains_key("sprite"));
        assert_eq!(serialized["sprite"], Value::Null);
    }

    #[test]
    fn test_stats_skip_unnamed_and_non_numeric_entries() {
        let body = json!({
            "id": 1,
            "stats": [
                {"base_stat": 45, "stat": {"name": "hp"}},
                {"base_stat": "49", "stat": {"name": "attack"}},
                {"base_stat": 49, "stat": {}},
                {"base_stat": 65},
                {"base_stat": 50, "stat": {"name": "hp"}}
            ]
        });
        let summary = normalize_pokemon(&args(0, true), POKEAPI_BASE_URL, &body);
        assert_eq!(summary.stats.len(), 1);
        assert_eq!(summary.stats.get("hp"), Some(&json!(50)));
    }

    #[test]
    fn test_types_keep_order_and_duplicates() {
        let body = json!({
            "types": [
                {"slot": 1, "type": {"name": "grass"}},
                {"slot": 2, "type": {"name": "poison"}},
                {"slot": 3, "type": {"name": "grass"}},
                {"slot": 4}
            ]
        });
        let summary = normalize_pokemon(&args(0, true), POKEAPI_BASE_URL, &body);
        assert_eq!(summary.types, vec!["grass", "poison", "grass"]);
    }

    #[test]
    fn test_missing_fields_resolve_to_null_or_empty() {
        let summary = normalize_pokemon(&args(3, true), POKEAPI_BASE_URL, &json!({}));
        let serialized = serde_json::to_value(&summary).unwrap();

        for key in [
            "id", "name", "height", "weight", "types", "stats", "abilities", "moves", "sprite",
            "url",
        ] {
            assert!(
                serialized.as_object().unwrap().contains_key(key),
                "missing key {key}"
            );
        }
        assert_eq!(serialized["id"], Value::Null);
        assert_eq!(serialized["url"], Value::Null);
        assert_eq!(serialized["types"], json!([]));
        assert_eq!(serialized["stats"], json!({}));
    }

    #[test]
    fn test_unknown_upstream_fields_dropped() {
        let summary =
            normalize_pokemon(&args(1, true), POKEAPI_BASE_URL, &fixtures::pikachu());
        let serialized = serde_json::to_value(&summary).unwrap();
        let object = serialized.as_object().unwrap();
        assert_eq!(object.len(), 10);
        assert!(!object.contains_key("base_experience"));
        assert!(!object.contains_key("sprites"));
    }

    #[test]
    fn test_canonical_url_uses_resolved_id() {
        let adapter = PokemonAdapter;
        let by_name = PokemonArgs {
            name_or_id: "Pikachu".to_string(),
            moves_limit: 0,
            include_sprite: false,
        };
        assert_eq!(
            adapter.request_url(POKEAPI_BASE_URL, &by_name),
            "https://pokeapi.co/api/v2/pokemon/pikachu"
        );
        let summary = normalize_pokemon(&by_name, POKEAPI_BASE_URL, &fixtures::pikachu());
        assert_eq!(
            summary.url.as_deref(),
            Some("https://pokeapi.co/api/v2/pokemon/25")
        );
    }

    #[test]
    fn test_not_found_message_keeps_supplied_identifier() {
        let adapter = PokemonAdapter;
        let args = PokemonArgs {
            name_or_id: "MissingNo".to_string(),
            moves_limit: 0,
            include_sprite: true,
        };
        assert_eq!(
            adapter.not_found_message(&args),
            "No Pokémon found for \"MissingNo\"."
        );
    }

    #[test]
    fn test_shape_defaults() {
        let args: PokemonArgs = PokemonAdapter::SHAPE
            .validate(&json!({"nameOrId": " 25 "}))
            .unwrap()
            .into_args()
            .unwrap();
        assert_eq!(args.name_or_id, " 25 ");
        assert_eq!(
            PokemonAdapter.request_url(POKEAPI_BASE_URL, &args),
            "https://pokeapi.co/api/v2/pokemon/25"
        );
        assert_eq!(args.moves_limit, 0);
        assert!(args.include_sprite);
    }
}
