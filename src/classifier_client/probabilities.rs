use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// Class name to probability, in the order the server listed them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Probabilities(Vec<(String, f64)>);

impl Probabilities {
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(name, p)| (name.as_str(), *p))
    }

    #[cfg(test)]
    pub fn get(&self, class_name: &str) -> Option<f64> {
        self.iter()
            .find(|(name, _)| *name == class_name)
            .map(|(_, p)| p)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Later duplicates overwrite the value but keep the first position.
    fn insert(&mut self, class_name: String, probability: f64) {
        match self.0.iter_mut().find(|(name, _)| *name == class_name) {
            Some(entry) => entry.1 = probability,
            None => self.0.push((class_name, probability)),
        }
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for Probabilities {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut probabilities = Probabilities::default();
        for (name, p) in iter {
            probabilities.insert(name.into(), p);
        }
        probabilities
    }
}

impl<'de> Deserialize<'de> for Probabilities {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ProbabilitiesVisitor;

        impl<'de> Visitor<'de> for ProbabilitiesVisitor {
            type Value = Probabilities;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a map of class name to probability")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut probabilities = Probabilities::default();
                while let Some((name, p)) = map.next_entry::<String, f64>()? {
                    probabilities.insert(name, p);
                }
                Ok(probabilities)
            }
        }

        deserializer.deserialize_map(ProbabilitiesVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_server_order() {
        let probabilities: Probabilities =
            serde_json::from_str(r#"{"Roof": 0.1, "Church": 0.6, "Apartment": 0.3}"#).unwrap();

        let names: Vec<&str> = probabilities.iter().map(|(name, _)| name).collect();

        assert_eq!(names, vec!["Roof", "Church", "Apartment"]);
    }

    #[test]
    fn test_duplicate_key_keeps_first_position() {
        let probabilities: Probabilities = vec![("A", 0.1), ("B", 0.2), ("A", 0.5)]
            .into_iter()
            .collect();

        assert_eq!(probabilities.len(), 2);
        assert_eq!(probabilities.get("A"), Some(0.5));
        assert_eq!(probabilities.iter().next(), Some(("A", 0.5)));
    }

    #[test]
    fn test_rejects_non_numeric_probability() {
        let parsed = serde_json::from_str::<Probabilities>(r#"{"A": "high"}"#);
        assert!(parsed.is_err());
    }
}
