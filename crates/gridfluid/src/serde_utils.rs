//! Serde helpers for glam vectors.
//!
//! Vectors are written as plain arrays (`[x, y]` / `[x, y, z]`) so settings
//! files stay readable, and the length is checked on the way back in.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::vector::SpatialVector;

pub fn serialize_vector<P, S>(v: &P, s: S) -> Result<S::Ok, S::Error>
where
    P: SpatialVector,
    S: Serializer,
{
    let components: Vec<f32> = (0..P::DIMENSION).map(|axis| v.component(axis)).collect();
    components.serialize(s)
}

pub fn deserialize_vector<'de, P, D>(d: D) -> Result<P, D::Error>
where
    P: SpatialVector,
    D: Deserializer<'de>,
{
    let components = Vec::<f32>::deserialize(d)?;
    if components.len() != P::DIMENSION {
        return Err(D::Error::invalid_length(
            components.len(),
            &if P::DIMENSION == 2 { "2 components" } else { "3 components" },
        ));
    }
    Ok(P::from_fn(|axis| components[axis]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec3};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Holder {
        #[serde(serialize_with = "serialize_vector", deserialize_with = "deserialize_vector")]
        position: Vec3,
        #[serde(serialize_with = "serialize_vector", deserialize_with = "deserialize_vector")]
        velocity: Vec2,
    }

    #[test]
    fn test_vectors_as_arrays() {
        let holder = Holder {
            position: Vec3::new(1.0, 2.0, 3.0),
            velocity: Vec2::new(-1.0, 0.5),
        };
        let json = serde_json::to_string(&holder).unwrap();
        assert_eq!(json, r#"{"position":[1.0,2.0,3.0],"velocity":[-1.0,0.5]}"#);
        let back: Holder = serde_json::from_str(&json).unwrap();
        assert_eq!(back, holder);
    }

    #[test]
    fn test_wrong_length_rejected() {
        let result: Result<Holder, _> = serde_json::from_str(r#"{"position":[1.0,2.0],"velocity":[0.0,0.0]}"#);
        assert!(result.is_err());
    }
}
