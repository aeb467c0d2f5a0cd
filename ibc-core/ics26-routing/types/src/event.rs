//! Events emitted by applications from their callbacks.

use crate::module::ModuleId;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleEvent {
    pub kind: String,
    pub module_name: ModuleId,
    pub attributes: Vec<ModuleEventAttribute>,
}

impl ModuleEvent {
    /// Value of the first attribute named `key`, if any.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.key == key)
            .map(|attr| attr.value.as_str())
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleEventAttribute {
    pub key: String,
    pub value: String,
}

impl<K: ToString, V: ToString> From<(K, V)> for ModuleEventAttribute {
    fn from((k, v): (K, V)) -> Self {
        Self {
            key: k.to_string(),
            value: v.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_lookup_returns_first_match() {
        let event = ModuleEvent {
            kind: "fungible_token_packet".to_string(),
            module_name: ModuleId::new("transfer".to_string()),
            attributes: vec![("denom", "TOKEN").into(), ("amount", 100).into()],
        };

        assert_eq!(event.attribute("amount"), Some("100"));
        assert_eq!(event.attribute("receiver"), None);
    }
}
