use serde::{Deserialize, Serialize};

use super::term::RollTerm;

/// Ordered term identifiers plus a flat modifier applied after the pool is
/// built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollRequest {
    pub terms: Vec<String>,
    #[serde(default)]
    pub modifier: i32,
}

impl RollRequest {
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            terms: terms.into_iter().map(Into::into).collect(),
            modifier: 0,
        }
    }

    pub fn with_modifier(mut self, modifier: i32) -> Self {
        self.modifier = modifier;
        self
    }

    pub fn push_term(&mut self, term: impl Into<String>) {
        self.terms.push(term.into());
    }

    /// Parsed terms in request order.
    pub fn parsed_terms(&self) -> impl Iterator<Item = RollTerm> + '_ {
        self.terms.iter().map(|raw| RollTerm::parse(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::Attribute;

    #[test]
    fn keeps_term_order() {
        let mut request = RollRequest::new(["wits", "lore"]).with_modifier(-1);
        request.push_term("d8");
        assert_eq!(request.terms, vec!["wits", "lore", "d8"]);
        assert_eq!(request.modifier, -1);
        assert_eq!(
            request.parsed_terms().next(),
            Some(RollTerm::Attribute(Attribute::Wits))
        );
    }

    #[test]
    fn modifier_defaults_to_zero_when_absent() {
        let request: RollRequest = serde_json::from_str(r#"{"terms": ["physique"]}"#).unwrap();
        assert_eq!(request.modifier, 0);
    }
}
