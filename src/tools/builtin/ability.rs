//! Pokémon ability lookup tool

use crate::tools::adapter::{LookupAdapter, LookupTool, RequestContext};
use crate::tools::normalize::{array, head, names_at, str_at};
use crate::tools::shape::{Constraints, FieldDefault, FieldKind, FieldSpec, InputShape};
use crate::tools::upstream::{resource_url, Upstream, POKEAPI};
use crate::tools::ToolError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const NAME: &str = "pokemon.ability.get";

/// Most Pokémon names reported per ability
pub const MAX_POKEMON_WITH_ABILITY: usize = 15;

pub type AbilityTool = LookupTool<AbilityAdapter>;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AbilityArgs {
    #[serde(rename = "nameOrId")]
    pub name_or_id: String,
    pub lang: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AbilitySummary {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub effect: Option<String>,
    pub short_effect: Option<String>,
    pub generation: Option<String>,
    pub pokemon_with_ability: Vec<String>,
    pub url: Option<String>,
}

/// Effect entry in `lang`, else the first entry, else none
fn select_effect_entry<'a>(entries: &'a [Value], lang: &str) -> Option<&'a Value> {
    entries
        .iter()
        .find(|entry| str_at(entry, &["language", "name"]) == Some(lang))
        .or_else(|| entries.first())
}

/// Build the summary from an `/ability` body (pure function)
pub fn normalize_ability(args: &AbilityArgs, base_url: &str, body: &Value) -> AbilitySummary {
    let id = body.get("id").and_then(Value::as_i64);
    let entry = select_effect_entry(array(body, "effect_entries"), &args.lang);
    let entry_text = |key: &str| entry.and_then(|e| str_at(e, &[key])).map(str::to_owned);

    AbilitySummary {
        id,
        name: str_at(body, &["name"]).map(str::to_owned),
        effect: entry_text("effect"),
        short_effect: entry_text("short_effect"),
        generation: str_at(body, &["generation", "name"]).map(str::to_owned),
        pokemon_with_ability: names_at(
            head(array(body, "pokemon"), MAX_POKEMON_WITH_ABILITY),
            &["pokemon", "name"],
        ),
        url: id.map(|id| format!("{}/ability/{id}", base_url.trim_end_matches('/'))),
    }
}

/// Ability lookup against PokéAPI
#[derive(Debug, Clone, Copy, Default)]
pub struct AbilityAdapter;

impl LookupAdapter for AbilityAdapter {
    type Args = AbilityArgs;
    type Output = AbilitySummary;

    const NAME: &'static str = NAME;
    const DESCRIPTION: &'static str =
        "Fetch a Pokémon ability by name or id (effect, short effect).";
    const UPSTREAM: Upstream = POKEAPI;
    const SHAPE: InputShape = InputShape {
        fields: &[
            FieldSpec {
                name: "nameOrId",
                kind: FieldKind::String,
                required: true,
                default: None,
                constraints: Constraints::NON_BLANK,
                description: "Ability name or id, e.g. \"static\" or \"9\".",
            },
            FieldSpec {
                name: "lang",
                kind: FieldKind::String,
                required: false,
                default: Some(FieldDefault::Str("en")),
                constraints: Constraints::TRIMMED,
                description: "Language code for effect text (default \"en\").",
            },
        ],
    };

    fn request_url(&self, base_url: &str, args: &AbilityArgs) -> String {
        resource_url(base_url, "ability", &args.name_or_id)
    }

    fn not_found_message(&self, args: &AbilityArgs) -> String {
        format!("No ability found for \"{}\".", args.name_or_id)
    }

    fn normalize(
        &self,
        args: &AbilityArgs,
        ctx: RequestContext<'_>,
        body: &Value,
    ) -> Result<AbilitySummary, ToolError> {
        Ok(normalize_ability(args, ctx.base_url, body))
    }
}
