use crate::json::{checked_integer, IntegerProblem};
use crate::ArtifactParser;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use url::Url;
use visualizer_core::{ArtifactError, ArtifactKind};

const REDDIT_BASE: &str = "https://www.reddit.com/";

/// Reddit post ordering a run was scraped with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Listing {
    Hot,
    New,
    Top,
    Controversial,
}

impl Listing {
    pub const ALL: [Listing; 4] = [Listing::Hot, Listing::New, Listing::Top, Listing::Controversial];

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|listing| listing.as_str() == token)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Listing::Hot => "hot",
            Listing::New => "new",
            Listing::Top => "top",
            Listing::Controversial => "controversial",
        }
    }

    /// Only top and controversial listings are windowed by a time filter.
    pub fn takes_time_filter(&self) -> bool {
        matches!(self, Listing::Top | Listing::Controversial)
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeFilter {
    All,
    Year,
    Month,
    Week,
    Day,
}

impl TimeFilter {
    pub const ALL: [TimeFilter; 5] = [
        TimeFilter::All,
        TimeFilter::Year,
        TimeFilter::Month,
        TimeFilter::Week,
        TimeFilter::Day,
    ];

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|filter| filter.as_str() == token)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeFilter::All => "all",
            TimeFilter::Year => "year",
            TimeFilter::Month => "month",
            TimeFilter::Week => "week",
            TimeFilter::Day => "day",
        }
    }
}

impl fmt::Display for TimeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters of the scrape that produced a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub subreddit: String,
    pub listing: Listing,
    pub num_posts: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_filter: Option<TimeFilter>,
}

impl Metadata {
    pub fn subreddit_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(REDDIT_BASE)?.join(&format!("r/{}/{}", self.subreddit, self.listing))
    }
}

/// Writes the snake_case file layout that `parse_metadata` reads.
pub fn metadata_to_json(metadata: &Metadata) -> Value {
    let mut root = Map::new();
    root.insert("subreddit".to_string(), Value::from(metadata.subreddit.clone()));
    root.insert("listing".to_string(), Value::from(metadata.listing.as_str()));
    if let Some(filter) = metadata.time_filter {
        root.insert("time_filter".to_string(), Value::from(filter.as_str()));
    }
    root.insert("num_posts".to_string(), Value::from(metadata.num_posts));
    Value::Object(root)
}

fn schema(reason: String) -> ArtifactError {
    ArtifactError::schema(ArtifactKind::Metadata, reason)
}

fn token_list(tokens: &[&str]) -> String {
    tokens.join(", ")
}

pub fn parse_metadata(value: &Value) -> Result<Metadata, ArtifactError> {
    let object = value.as_object().ok_or(ArtifactError::NotAnObject {
        artifact: ArtifactKind::Metadata,
    })?;

    let subreddit = object
        .get("subreddit")
        .and_then(Value::as_str)
        .ok_or_else(|| schema("subreddit is missing or is not a string".to_string()))?;

    let listing = object
        .get("listing")
        .and_then(Value::as_str)
        .and_then(Listing::from_token)
        .ok_or_else(|| {
            let known: Vec<&str> = Listing::ALL.iter().map(Listing::as_str).collect();
            schema(format!(
                "listing is missing or is not one of {}",
                token_list(&known)
            ))
        })?;

    let num_posts = match object.get("num_posts") {
        Some(v) if v.is_number() => checked_integer(v).map_err(|problem| match problem {
            IntegerProblem::OutOfRange => schema(format!("num_posts {v} is out of range")),
            _ => schema("num_posts is not a whole number".to_string()),
        })?,
        _ => return Err(schema("num_posts is missing or is not a number".to_string())),
    };

    let time_filter = if listing.takes_time_filter() {
        let filter = object
            .get("time_filter")
            .and_then(Value::as_str)
            .and_then(TimeFilter::from_token)
            .ok_or_else(|| {
                let known: Vec<&str> = TimeFilter::ALL.iter().map(TimeFilter::as_str).collect();
                schema(format!(
                    "time_filter is required for {} listings and must be one of {}",
                    listing,
                    token_list(&known)
                ))
            })?;
        Some(filter)
    } else {
        None
    };

    Ok(Metadata {
        subreddit: subreddit.to_string(),
        listing,
        num_posts,
        time_filter,
    })
}

#[derive(Debug, Default, Clone, Copy)]
pub struct MetadataParser;

impl ArtifactParser for MetadataParser {
    type Model = Metadata;

    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Metadata
    }

    fn parse_value(&self, value: &Value) -> Result<Metadata, ArtifactError> {
        parse_metadata(value)
    }
}
