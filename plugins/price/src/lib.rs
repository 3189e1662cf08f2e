//! Token price lookups against a CoinGecko-compatible price API.

use anyhow::Context;
use async_trait::async_trait;
use chat_actions_core::{Action, ActionError, ActionProvider, ActionType};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use url::Url;

pub const GET_TOKEN_PRICE: &str = "get_token_price";

const DEFAULT_API_URL: &str = "https://api.coingecko.com/api/v3";
const API_KEY_HEADER: &str = "x-cg-demo-api-key";

/// Connection settings for the price API.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct PriceSettings {
    pub api_url: String,
    pub api_key: Option<String>,
    pub default_currency: String,
}

// Custom Debug impl to redact the API key
impl std::fmt::Debug for PriceSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriceSettings")
            .field("api_url", &self.api_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("default_currency", &self.default_currency)
            .finish()
    }
}

impl Default for PriceSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            default_currency: "usd".to_string(),
        }
    }
}

#[derive(Debug)]
pub struct PriceActionProvider {
    base_url: Url,
    settings: PriceSettings,
    client: reqwest::Client,
    actions: Vec<Action>,
}

impl PriceActionProvider {
    pub fn new(settings: PriceSettings) -> anyhow::Result<Self> {
        let base_url = Url::parse(&settings.api_url)
            .with_context(|| format!("Invalid price API url: {}", settings.api_url))?;

        let mut parameters = Map::new();
        parameters.insert("tokenIds".to_string(), json!(["string"]));
        parameters.insert("vsCurrencies".to_string(), json!(["string"]));

        let actions = vec![Action::new(
            ActionType::Execute,
            GET_TOKEN_PRICE,
            "Get current token prices (e.g. 'ethereum', 'bitcoin') in one or more currencies",
        )
        .with_parameters(parameters)];

        Ok(Self {
            base_url,
            settings,
            client: reqwest::Client::new(),
            actions,
        })
    }

    fn price_url(&self, token_ids: &[String], currencies: &[String]) -> Url {
        let mut url = self.base_url.clone();
        let path = format!("{}/simple/price", url.path().trim_end_matches('/'));
        url.set_path(&path);
        url.query_pairs_mut()
            .clear()
            .append_pair("ids", &token_ids.join(","))
            .append_pair("vs_currencies", &currencies.join(","));
        url
    }

    async fn get_token_price(&self, action: &Action) -> Result<Value, ActionError> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Input {
            token_ids: Vec<String>,
            #[serde(default)]
            vs_currencies: Option<Vec<String>>,
        }

        let input: Input = action.decode_parameters()?;
        if input.token_ids.is_empty() {
            return Err(ActionError::invalid_parameters(
                action.name(),
                "tokenIds must not be empty",
            ));
        }
        let currencies = input
            .vs_currencies
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| vec![self.settings.default_currency.clone()]);

        let url = self.price_url(&input.token_ids, &currencies);
        tracing::debug!(%url, "Requesting token prices");

        let mut request = self.client.get(url);
        if let Some(key) = &self.settings.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ActionError::provider(action.name(), e))?;

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "Price API returned an error");
            return Ok(json!({
                "status": "error",
                "message": format!("Price API error: {}", response.status()),
            }));
        }

        let data: Value = response
            .json()
            .await
            .map_err(|e| ActionError::provider(action.name(), e))?;

        Ok(json!({
            "status": "success",
            "prices": data,
        }))
    }
}

#[async_trait]
impl ActionProvider for PriceActionProvider {
    fn name(&self) -> &str {
        "price"
    }

    fn description(&self) -> &str {
        "Provides token price lookups"
    }

    fn actions(&self) -> &[Action] {
        &self.actions
    }

    async fn execute(&self, action: &Action) -> Result<Value, ActionError> {
        match action.name() {
            GET_TOKEN_PRICE => self.get_token_price(action).await,
            other => Err(ActionError::unsupported(other)),
        }
    }
}
