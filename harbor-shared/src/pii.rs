use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Wraps passenger data (passport numbers, dates of birth) so it never reaches
/// log output in clear text. Serialization still emits the real value.
#[derive(Clone, Deserialize)]
pub struct Masked<T>(pub T);

impl<T: fmt::Display> Masked<T> {
    /// Last characters left visible, enough for an agent to tell documents apart.
    const VISIBLE: usize = 2;

    fn hint(&self) -> String {
        let clear = self.0.to_string();
        let count = clear.chars().count();
        if count <= Self::VISIBLE * 2 {
            return "****".to_string();
        }
        let tail: String = clear.chars().skip(count - Self::VISIBLE).collect();
        format!("****{}", tail)
    }
}

impl<T: fmt::Display> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hint())
    }
}

impl<T: fmt::Display> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hint())
    }
}

impl<T: Serialize> Serialize for Masked<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masked_hides_all_but_tail() {
        let number = Masked("K1234567".to_string());
        assert_eq!(format!("{:?}", number), "****67");
        assert_eq!(number.to_string(), "****67");
    }

    #[test]
    fn test_short_values_fully_hidden() {
        assert_eq!(Masked("AB12").to_string(), "****");
    }

    #[test]
    fn test_serialization_keeps_value() {
        let json = serde_json::to_string(&Masked("K1234567")).unwrap();
        assert_eq!(json, "\"K1234567\"");
    }
}
