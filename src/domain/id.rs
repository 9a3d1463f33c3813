//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            #[doc = concat!("Create a new `", stringify!($name), "` from a string.")]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            #[doc = concat!("Get the ", stringify!($name), " as a string slice.")]
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::new(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }
    };
}

string_id!(
    /// Sporting event identifier (one fixture).
    EventId
);

string_id!(
    /// Market identifier within an event (match winner, totals, ...).
    MarketId
);

string_id!(
    /// Identifier of a model prediction.
    PredictionId
);

string_id!(
    /// Outcome name within a market ("home", "draw", "away", ...).
    Selection
);

string_id!(
    /// Bookmaker quoting a price.
    Bookmaker
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_through_str() {
        let market = MarketId::from("match-winner");
        assert_eq!(market.as_str(), "match-winner");
        assert_eq!(market.to_string(), "match-winner");
        assert_eq!(Selection::from(String::from("home")), Selection::new("home"));
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let json = serde_json::to_string(&Bookmaker::from("pinnacle")).unwrap();
        assert_eq!(json, "\"pinnacle\"");

        let event: EventId = serde_json::from_str("\"evt-1\"").unwrap();
        assert_eq!(event, EventId::from("evt-1"));
    }

    #[test]
    fn ids_order_lexicographically() {
        let mut books = vec![Bookmaker::from("william"), Bookmaker::from("bet365")];
        books.sort();
        assert_eq!(books[0].as_str(), "bet365");
    }
}
