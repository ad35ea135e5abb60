use async_trait::async_trait;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use super::models::{Complexity, Game, GameLength, DEFAULT_GAME_COLOR};
use crate::config::CatalogConfig;
use crate::shared::AppError;

/// Source of a player's owned-games collection
#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn fetch_collection(&self, identity: &str) -> Result<Vec<Game>, AppError>;
}

/// BoardGameGeek XML API client
pub struct BggClient {
    http: reqwest::Client,
    base_url: String,
    max_retries: u32,
    retry_delay: Duration,
}

impl BggClient {
    pub fn new(config: &CatalogConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .user_agent(concat!("whatshouldweplay/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_retries: config.max_retries,
            retry_delay: config.retry_delay(),
        })
    }
}

#[async_trait]
impl CatalogClient for BggClient {
    /// Fetches owned games with stats. A 202 means the export is still queued,
    /// so the request is repeated after a fixed delay up to `max_retries` times.
    #[instrument(skip(self))]
    async fn fetch_collection(&self, identity: &str) -> Result<Vec<Game>, AppError> {
        let url = format!("{}/collection", self.base_url);
        let mut retries = 0;

        loop {
            debug!(identity = %identity, attempt = retries + 1, "Requesting collection");

            let response = self
                .http
                .get(&url)
                .query(&[("username", identity), ("own", "1"), ("stats", "1")])
                .send()
                .await?;

            match response.status() {
                StatusCode::OK => {
                    let body = response.text().await?;
                    let games = parse_collection_xml(&body)?;
                    info!(identity = %identity, game_count = games.len(), "Collection fetched");
                    return Ok(games);
                }
                StatusCode::ACCEPTED => {
                    if retries >= self.max_retries {
                        warn!(identity = %identity, retries, "Catalog never finished queued request");
                        return Err(AppError::RetriesExhausted(self.max_retries));
                    }
                    retries += 1;
                    warn!(
                        identity = %identity,
                        retry = retries,
                        delay_ms = self.retry_delay.as_millis() as u64,
                        "Catalog is processing the request, retrying"
                    );
                    tokio::time::sleep(self.retry_delay).await;
                }
                other => {
                    warn!(identity = %identity, status = other.as_u16(), "Unexpected catalog status");
                    return Err(AppError::UnexpectedStatus(other.as_u16()));
                }
            }
        }
    }
}

/// Fields pulled from one `<item>` before normalization
#[derive(Debug, Default)]
struct RawItem {
    object_id: Option<String>,
    name: Option<String>,
    year_published: Option<String>,
    image: Option<String>,
    thumbnail: Option<String>,
    min_players: Option<String>,
    max_players: Option<String>,
    playing_time: Option<String>,
    rating: Option<String>,
    average_weight: Option<String>,
}

impl RawItem {
    fn into_game(self) -> Game {
        let average_weight = parse_f64(self.average_weight.as_deref()).unwrap_or(0.0);
        let playing_time = parse_u32(self.playing_time.as_deref()).unwrap_or(0);
        let players_min = parse_u32(self.min_players.as_deref()).unwrap_or(1);
        let players_max = parse_u32(self.max_players.as_deref()).unwrap_or(1);

        Game {
            id: self.object_id.unwrap_or_else(|| "(no id)".to_string()),
            name: self
                .name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| "Unknown Game".to_string()),
            players_min,
            players_max,
            complexity: Complexity::from_average_weight(average_weight),
            complexity_weight: (average_weight > 0.0).then_some(average_weight),
            length: GameLength::from_playing_time(playing_time),
            color: DEFAULT_GAME_COLOR.to_string(),
            image: self.image.unwrap_or_default(),
            thumbnail: self.thumbnail.unwrap_or_default(),
            year_published: self.year_published.unwrap_or_else(|| "N/A".to_string()),
            rating: self.rating,
        }
    }
}

fn parse_u32(value: Option<&str>) -> Option<u32> {
    value.and_then(|v| v.trim().parse().ok())
}

fn parse_f64(value: Option<&str>) -> Option<f64> {
    value
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

fn attribute(element: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>, AppError> {
    for attr in element.attributes() {
        let attr = attr.map_err(|e| AppError::Parse(e.to_string()))?;
        if attr.key.as_ref() == key {
            let value = attr
                .unescape_value()
                .map_err(|e| AppError::Parse(e.to_string()))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// Parses a `/collection` response into games, in document order
pub fn parse_collection_xml(xml: &str) -> Result<Vec<Game>, AppError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut path: Vec<Vec<u8>> = Vec::new();
    let mut current: Option<RawItem> = None;
    let mut games = Vec::new();
    let mut error_message: Option<String> = None;
    let mut saw_items = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = e.name().as_ref().to_vec();
                handle_element(&e, &path, &mut current, &mut saw_items)?;
                path.push(name);
            }
            Ok(Event::Empty(e)) => {
                handle_element(&e, &path, &mut current, &mut saw_items)?;
                if e.name().as_ref() == b"item" {
                    if let Some(item) = current.take() {
                        games.push(item.into_game());
                    }
                }
            }
            Ok(Event::Text(e)) => {
                let text = e
                    .unescape()
                    .map_err(|e| AppError::Parse(e.to_string()))?
                    .into_owned();
                let leaf = path.last().map(|p| p.as_slice());
                if leaf == Some(b"message".as_slice()) && path.iter().any(|p| p == b"errors") {
                    error_message = Some(text);
                } else if let Some(item) = current.as_mut() {
                    if path.len() >= 2 && path[path.len() - 2] == b"item" {
                        match leaf {
                            Some(b"name") => item.name = Some(text),
                            Some(b"yearpublished") => item.year_published = Some(text),
                            Some(b"image") => item.image = Some(text),
                            Some(b"thumbnail") => item.thumbnail = Some(text),
                            _ => {}
                        }
                    }
                }
            }
            Ok(Event::End(e)) => {
                path.pop();
                if e.name().as_ref() == b"item" {
                    if let Some(item) = current.take() {
                        games.push(item.into_game());
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(AppError::Parse(format!(
                    "malformed collection XML at position {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
            _ => {}
        }
    }

    if let Some(message) = error_message {
        return Err(AppError::Fetch(message));
    }
    if !saw_items {
        return Err(AppError::Parse("response has no <items> element".to_string()));
    }

    Ok(games)
}

fn handle_element(
    element: &BytesStart<'_>,
    path: &[Vec<u8>],
    current: &mut Option<RawItem>,
    saw_items: &mut bool,
) -> Result<(), AppError> {
    let parent = path.last().map(|p| p.as_slice());
    match element.name().as_ref() {
        b"items" => *saw_items = true,
        b"item" if parent == Some(b"items".as_slice()) => {
            *current = Some(RawItem {
                object_id: attribute(element, b"objectid")?,
                ..RawItem::default()
            });
        }
        b"stats" if parent == Some(b"item".as_slice()) => {
            if let Some(item) = current.as_mut() {
                item.min_players = attribute(element, b"minplayers")?;
                item.max_players = attribute(element, b"maxplayers")?;
                item.playing_time = attribute(element, b"playingtime")?;
            }
        }
        b"rating" if parent == Some(b"stats".as_slice()) => {
            if let Some(item) = current.as_mut() {
                item.rating = attribute(element, b"value")?;
            }
        }
        b"averageweight" if parent == Some(b"rating".as_slice()) => {
            if let Some(item) = current.as_mut() {
                item.average_weight = attribute(element, b"value")?;
            }
        }
        _ => {}
    }
    Ok(())
}
