//! Record identifiers: random UUIDs, stored and served as lower-case
//! hyphenated text.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::account::{FavoriteCity, UserAccount};
use crate::observation::WeatherObservation;

/// Identifier of a `T` record.
///
/// The marker keeps a user id from being bound where a favorite id belongs;
/// every kind shares one representation.
pub struct Id<T> {
    uuid: Uuid,
    record: PhantomData<fn() -> T>,
}

pub type ObservationId = Id<WeatherObservation>;
pub type UserId = Id<UserAccount>;
pub type FavoriteId = Id<FavoriteCity>;

impl<T> Id<T> {
    /// A fresh random (v4) identifier.
    #[must_use]
    pub fn new() -> Self {
        Self {
            uuid: Uuid::new_v4(),
            record: PhantomData,
        }
    }
}

impl<T> Default for Id<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uuid.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.uuid)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.uuid.hyphenated().fmt(f)
    }
}

/// Accepts any casing; [`Display`](fmt::Display) always renders lower case,
/// so parsed ids match stored keys.
impl<T> FromStr for Id<T> {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(|uuid| Self {
            uuid,
            record: PhantomData,
        })
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.uuid.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Uuid::deserialize(deserializer).map(|uuid| Self {
            uuid,
            record: PhantomData,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::city::CityName;

    const SAMPLE: &str = "67e55044-10b1-426f-9247-bb680e5fe0c8";

    #[test]
    fn should_give_each_favorite_its_own_id() {
        let user = UserId::new();
        let paris = FavoriteCity::new(user, CityName::parse("Paris").unwrap());
        let lima = FavoriteCity::new(user, CityName::parse("Lima").unwrap());

        assert_ne!(paris.id, lima.id);
    }

    #[test]
    fn should_render_upper_case_input_as_stored_key() {
        let id: UserId = SAMPLE.to_uppercase().parse().unwrap();

        assert_eq!(id.to_string(), SAMPLE);
        assert_eq!(id, SAMPLE.parse().unwrap());
    }

    #[test]
    fn should_serialize_as_bare_string_in_api_payloads() {
        let id: ObservationId = SAMPLE.parse().unwrap();

        assert_eq!(serde_json::to_value(id).unwrap(), json!(SAMPLE));
        assert_eq!(serde_json::from_value::<ObservationId>(json!(SAMPLE)).unwrap(), id);
    }

    #[test]
    fn should_reject_malformed_stored_id() {
        assert!("favorite-42".parse::<FavoriteId>().is_err());
        assert!("".parse::<FavoriteId>().is_err());
    }
}
