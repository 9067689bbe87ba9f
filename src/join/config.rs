use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::algorithm::geo::SpatialRelation;
use crate::error::{Result, SjoinError};

/// Which unmatched rows a join keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinHow {
    /// Keep only left rows with at least one match.
    #[default]
    Inner,
    /// Keep every left row; unmatched rows pass through unchanged.
    Left,
    /// Swap the roles of the two inputs, then behave like [`JoinHow::Left`].
    Right,
    /// Same output as [`JoinHow::Inner`].
    First,
}

impl JoinHow {
    pub const ALL: [JoinHow; 4] = [JoinHow::Inner, JoinHow::Left, JoinHow::Right, JoinHow::First];

    pub fn as_str(&self) -> &'static str {
        match self {
            JoinHow::Inner => "inner",
            JoinHow::Left => "left",
            JoinHow::Right => "right",
            JoinHow::First => "first",
        }
    }

    /// Whether left rows without a match are kept in the output.
    pub fn keeps_unmatched(&self) -> bool {
        matches!(self, JoinHow::Left | JoinHow::Right)
    }
}

impl Display for JoinHow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JoinHow {
    type Err = SjoinError;

    fn from_str(s: &str) -> Result<Self> {
        JoinHow::ALL
            .into_iter()
            .find(|how| how.as_str() == s)
            .ok_or_else(|| {
                SjoinError::Config(format!(
                    "{s} is not supported as a <how> operation. Must be any of \"left\", \"right\", \"inner\", \"first\""
                ))
            })
    }
}

/// How many matches a single left row may produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchCardinality {
    /// Stop at the lowest-positioned match.
    First,
    /// Emit one row per match.
    #[default]
    All,
}

impl MatchCardinality {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchCardinality::First => "first",
            MatchCardinality::All => "all",
        }
    }
}

impl Display for MatchCardinality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchCardinality {
    type Err = SjoinError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "first" => Ok(MatchCardinality::First),
            "all" => Ok(MatchCardinality::All),
            _ => Err(SjoinError::Config(format!(
                "{s} is not supported as a <matches> operation. Must be any of \"first\" or \"all\""
            ))),
        }
    }
}

/// Options for [`sjoin`][crate::sjoin].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinConfig {
    /// The join mode.
    pub how: JoinHow,

    /// The exact relation a candidate has to satisfy.
    pub relation: SpatialRelation,

    /// Whether to keep only the first match or all of them.
    pub matches: MatchCardinality,

    /// Suffix appended to left property names that collide with a right property name.
    pub lsuffix: String,

    /// Suffix appended to right property names that collide with a left property name.
    pub rsuffix: String,

    /// Also write the position of the probing row (`index_left`, or `index_right` when
    /// `how` is [`JoinHow::Right`]).
    pub include_opposite_index: bool,
}

impl JoinConfig {
    pub fn new(how: JoinHow, relation: SpatialRelation, matches: MatchCardinality) -> Self {
        Self {
            how,
            relation,
            matches,
            lsuffix: "left".to_string(),
            rsuffix: "right".to_string(),
            include_opposite_index: false,
        }
    }

    pub fn with_how(mut self, how: JoinHow) -> Self {
        self.how = how;
        self
    }

    pub fn with_relation(mut self, relation: SpatialRelation) -> Self {
        self.relation = relation;
        self
    }

    pub fn with_matches(mut self, matches: MatchCardinality) -> Self {
        self.matches = matches;
        self
    }

    pub fn with_suffixes(mut self, lsuffix: impl Into<String>, rsuffix: impl Into<String>) -> Self {
        self.lsuffix = lsuffix.into();
        self.rsuffix = rsuffix.into();
        self
    }

    pub fn with_opposite_index(mut self, include: bool) -> Self {
        self.include_opposite_index = include;
        self
    }

    /// Validate a dynamic options object.
    ///
    /// Recognized keys are `how`, `op`, `matches`, `lsuffix`, `rsuffix` and `inclLeftIndex`.
    /// `opt` is accepted as an alias of `op`, which wins when both are given. Missing keys (or
    /// `null` values) take their defaults and unknown keys are ignored. Any other value of the
    /// wrong type or outside the supported set is a [`SjoinError::Config`].
    pub fn try_from_options(options: &Value) -> Result<Self> {
        Self::try_from_object(options_object(options)?)
    }

    /// Validate the values of an options object already checked by [`options_object`].
    pub(crate) fn try_from_object(options: Option<&Map<String, Value>>) -> Result<Self> {
        let mut config = JoinConfig::default();
        let Some(options) = options else {
            return Ok(config);
        };

        if let Some(how) = string_option(options, "how", HOW_HINT)? {
            config.how = how.parse()?;
        }
        let op = match string_option(options, "op", OP_HINT)? {
            Some(op) => Some(op),
            None => string_option(options, "opt", OP_HINT)?,
        };
        if let Some(op) = op {
            config.relation = op.parse()?;
        }
        if let Some(matches) = string_option(options, "matches", MATCHES_HINT)? {
            config.matches = matches.parse()?;
        }
        if let Some(lsuffix) = string_option(options, "lsuffix", "")? {
            config.lsuffix = lsuffix.to_string();
        }
        if let Some(rsuffix) = string_option(options, "rsuffix", "")? {
            config.rsuffix = rsuffix.to_string();
        }
        if let Some(include) = bool_option(options, "inclLeftIndex")? {
            config.include_opposite_index = include;
        }

        Ok(config)
    }
}

impl Default for JoinConfig {
    fn default() -> Self {
        Self::new(
            JoinHow::default(),
            SpatialRelation::default(),
            MatchCardinality::default(),
        )
    }
}

const HOW_HINT: &str = "(\"left\",\"right\",\"inner\",\"first\")";
const OP_HINT: &str = "(\"intersects\",\"contains\",\"within\",\"crosses\",\"overlaps\")";
const MATCHES_HINT: &str = "(\"all\" or \"first\")";

/// The options object of a dynamic call, or `None` when options are `null`.
pub(crate) fn options_object(options: &Value) -> Result<Option<&Map<String, Value>>> {
    match options {
        Value::Null => Ok(None),
        Value::Object(map) => Ok(Some(map)),
        _ => Err(SjoinError::Config("options are invalid".to_string())),
    }
}

pub(crate) fn bool_option(options: &Map<String, Value>, key: &str) -> Result<Option<bool>> {
    match options.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(value)) => Ok(Some(*value)),
        Some(_) => Err(SjoinError::Config(format!("<{key}> must be a boolean"))),
    }
}

fn string_option<'a>(
    options: &'a Map<String, Value>,
    key: &str,
    hint: &str,
) -> Result<Option<&'a str>> {
    match options.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.as_str())),
        Some(_) => {
            let message = if hint.is_empty() {
                format!("<{key}> must be a string")
            } else {
                format!("<{key}> must be a string {hint}")
            };
            Err(SjoinError::Config(message))
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults() {
        let config = JoinConfig::default();
        assert_eq!(config.how, JoinHow::Inner);
        assert_eq!(config.relation, SpatialRelation::Intersects);
        assert_eq!(config.matches, MatchCardinality::All);
        assert_eq!(config.lsuffix, "left");
        assert_eq!(config.rsuffix, "right");
        assert!(!config.include_opposite_index);

        assert_eq!(JoinConfig::try_from_options(&Value::Null).unwrap(), config);
        assert_eq!(JoinConfig::try_from_options(&json!({})).unwrap(), config);
    }

    #[test]
    fn full_options() {
        let config = JoinConfig::try_from_options(&json!({
            "how": "right",
            "op": "within",
            "matches": "first",
            "lsuffix": "a",
            "rsuffix": "b",
            "inclLeftIndex": true,
        }))
        .unwrap();

        let expected =
            JoinConfig::new(JoinHow::Right, SpatialRelation::Within, MatchCardinality::First)
                .with_suffixes("a", "b")
                .with_opposite_index(true);
        assert_eq!(config, expected);
    }

    #[test]
    fn opt_alias() {
        let config = JoinConfig::try_from_options(&json!({"opt": "contains"})).unwrap();
        assert_eq!(config.relation, SpatialRelation::Contains);

        let options = json!({"op": "within", "opt": "contains"});
        let config = JoinConfig::try_from_options(&options).unwrap();
        assert_eq!(config.relation, SpatialRelation::Within);

        assert!(matches!(
            JoinConfig::try_from_options(&json!({"opt": "touches"})),
            Err(SjoinError::Config(_))
        ));
    }

    #[test]
    fn unsupported_values() {
        for options in [
            json!({"how": "outer"}),
            json!({"op": "touches"}),
            json!({"matches": "some"}),
        ] {
            assert!(matches!(
                JoinConfig::try_from_options(&options),
                Err(SjoinError::Config(_))
            ));
        }
    }

    #[test]
    fn wrong_types() {
        for options in [
            json!("should fail"),
            json!([1, 2]),
            json!({"how": 1}),
            json!({"op": true}),
            json!({"matches": ["all"]}),
            json!({"lsuffix": 1}),
            json!({"rsuffix": {}}),
            json!({"inclLeftIndex": "yes"}),
            json!({"opt": 3}),
        ] {
            assert!(matches!(
                JoinConfig::try_from_options(&options),
                Err(SjoinError::Config(_))
            ));
        }
    }

    #[test]
    fn error_messages() {
        let err = JoinConfig::try_from_options(&json!({"inclLeftIndex": 1})).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: <inclLeftIndex> must be a boolean"
        );

        let err = JoinConfig::try_from_options(&json!({"lsuffix": 1})).unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: <lsuffix> must be a string");
    }

    #[test]
    fn parse_enums() {
        for how in JoinHow::ALL {
            assert_eq!(how.to_string().parse::<JoinHow>().unwrap(), how);
        }
        assert_eq!("all".parse::<MatchCardinality>().unwrap(), MatchCardinality::All);
        assert!(JoinHow::Left.keeps_unmatched());
        assert!(JoinHow::Right.keeps_unmatched());
        assert!(!JoinHow::Inner.keeps_unmatched());
        assert!(!JoinHow::First.keeps_unmatched());
    }

    #[test]
    fn serde_round_trip() {
        let config = JoinConfig::default().with_how(JoinHow::Left);
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["how"], json!("left"));
        assert_eq!(value["matches"], json!("all"));
        let back: JoinConfig = serde_json::from_value(value).unwrap();
        assert_eq!(back, config);
    }
}
