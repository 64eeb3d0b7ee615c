use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{RatingScale, RawRating};

/// Field positions inside a ratings line, parsed from a declaration such as
/// `"user item rating timestamp"`. The three rating fields are mandatory,
/// the timestamp is optional, and any order is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineFormat {
    user: usize,
    item: usize,
    rating: usize,
    timestamp: Option<usize>,
}

impl LineFormat {
    /// Smallest number of fields a line must have to satisfy this format.
    pub fn min_fields(&self) -> usize {
        let last = self
            .user
            .max(self.item)
            .max(self.rating)
            .max(self.timestamp.unwrap_or(0));
        last + 1
    }
}

impl FromStr for LineFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut user = None;
        let mut item = None;
        let mut rating = None;
        let mut timestamp = None;

        for (idx, field) in s.split_whitespace().enumerate() {
            let slot = match field {
                "user" => &mut user,
                "item" => &mut item,
                "rating" => &mut rating,
                "timestamp" => &mut timestamp,
                other => {
                    return Err(Error::Configuration(format!(
                        "unknown field {other:?} in line format {s:?}"
                    )))
                }
            };
            if slot.replace(idx).is_some() {
                return Err(Error::Configuration(format!(
                    "duplicate field {field:?} in line format {s:?}"
                )));
            }
        }

        match (user, item, rating) {
            (Some(user), Some(item), Some(rating)) => Ok(Self {
                user,
                item,
                rating,
                timestamp,
            }),
            _ => Err(Error::Configuration(format!(
                "line format {s:?} must name user, item and rating"
            ))),
        }
    }
}

/// Parses one raw ratings line into a [`RawRating`] under a fixed field
/// order, separator and rating scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reader {
    pub line_format: LineFormat,
    /// `None` splits on ASCII whitespace. Multi-character separators such
    /// as `"::"` are accepted.
    pub sep: Option<String>,
    /// Number of leading lines to skip in file sources.
    pub skip_lines: usize,
    pub rating_scale: RatingScale,
}

impl Default for Reader {
    fn default() -> Self {
        Self {
            // "user item rating"
            line_format: LineFormat {
                user: 0,
                item: 1,
                rating: 2,
                timestamp: None,
            },
            sep: None,
            skip_lines: 0,
            rating_scale: RatingScale::default(),
        }
    }
}

impl Reader {
    pub fn new(line_format: &str) -> Result<Self> {
        Ok(Self {
            line_format: line_format.parse()?,
            ..Self::default()
        })
    }

    pub fn with_sep(mut self, sep: impl Into<String>) -> Self {
        self.sep = Some(sep.into());
        self
    }

    pub fn with_skip_lines(mut self, skip_lines: usize) -> Self {
        self.skip_lines = skip_lines;
        self
    }

    pub fn with_rating_scale(mut self, rating_scale: RatingScale) -> Self {
        self.rating_scale = rating_scale;
        self
    }

    /// Parse a single line. Lines with too few fields or a non-numeric
    /// rating fail; extra trailing fields are ignored.
    pub fn parse_line(&self, line: &str) -> Result<RawRating> {
        let line = line.trim_end_matches(['\r', '\n']);
        let fields: Vec<&str> = match &self.sep {
            Some(sep) => line.split(sep.as_str()).map(str::trim).collect(),
            None => line.split_whitespace().collect(),
        };

        let format = &self.line_format;
        if fields.len() < format.min_fields() {
            return Err(Error::MalformedLine {
                line: line.to_owned(),
                reason: format!(
                    "expected at least {} fields, found {}",
                    format.min_fields(),
                    fields.len()
                ),
            });
        }

        let rating = fields[format.rating]
            .parse::<f64>()
            .map_err(|_| Error::MalformedLine {
                line: line.to_owned(),
                reason: format!("rating field {:?} is not a number", fields[format.rating]),
            })?;

        Ok(RawRating {
            uid: fields[format.user].to_owned(),
            iid: fields[format.item].to_owned(),
            rating,
            timestamp: format.timestamp.map(|idx| fields[idx].to_owned()),
        })
    }
}
