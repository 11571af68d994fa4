// Wire types serialize as the same strings their `Display` impls produce.

/// Implement `Serialize`/`Deserialize` for a curve-generic type through `Display`/`FromStr`.
macro_rules! impl_serde_as_string {
    ($ty:ident) => {
        impl<C: $crate::Curve> serde::Serialize for $ty<C> {
            fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.collect_str(self)
            }
        }

        impl<'de, C: $crate::Curve> serde::Deserialize<'de> for $ty<C> {
            fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let encoded = <String as serde::Deserialize>::deserialize(deserializer)?;
                encoded.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

/// Byte fields as standard base64 strings, for use in `#[serde(with)]`
pub(crate) mod base64_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&base64::encode(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        base64::decode(&encoded).map_err(serde::de::Error::custom)
    }
}
