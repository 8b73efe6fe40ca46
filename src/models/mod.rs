pub mod attendance;
pub mod catalog;
pub mod envelope;
pub mod event;
pub mod metrics;
pub mod staff;
pub mod user;

pub use envelope::Envelope;

use serde::{Deserialize, Deserializer};

/// Reads an explicit JSON `null` as the type's default. Pair with
/// `#[serde(default)]` so a missing key behaves the same.
pub(crate) fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(d).map(Option::unwrap_or_default)
}

/// Backend ids arrive as strings or numbers depending on the endpoint;
/// both are kept as strings on our side.
pub(crate) mod flexible_id {
    use serde::{Deserialize, Deserializer, de::Error};
    use serde_json::Value;

    fn stringify<E: Error>(v: Value) -> Result<Option<String>, E> {
        match v {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(s)),
            Value::Number(n) => Ok(Some(n.to_string())),
            other => Err(E::custom(format!("invalid id: {other}"))),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        stringify(Value::deserialize(d)?)?.ok_or_else(|| D::Error::custom("missing id"))
    }

    pub mod option {
        use serde::{Deserialize, Deserializer};
        use serde_json::Value;

        pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
            super::stringify(Value::deserialize(d)?)
        }
    }
}
