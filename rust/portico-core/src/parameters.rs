use serde::{Deserialize, Serialize};

/// One generated Swagger 2.0 query parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryParameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: String,
    pub required: bool,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl QueryParameter {
    /// Parses a raw `name:description` entry. Blank entries yield `None`.
    ///
    /// Only the first `:` separates the name from the description.
    pub fn parse(entry: &str) -> Option<Self> {
        if entry.trim().is_empty() {
            return None;
        }

        let (name, description) = match entry.split_once(':') {
            Some((name, description)) => (name, Some(description.trim().to_string())),
            None => (entry, None),
        };

        Some(QueryParameter {
            name: name.trim().to_string(),
            location: "query".into(),
            required: true,
            kind: "string".into(),
            description,
        })
    }
}

/// Parses every non-blank entry, preserving order.
pub fn parse_parameters<T: AsRef<str>>(entries: &[T]) -> Vec<QueryParameter> {
    entries
        .iter()
        .filter_map(|entry| QueryParameter::parse(entry.as_ref()))
        .collect()
}

/// The editable list of raw parameter entries behind the generator form.
/// There is always at least one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterEntries {
    entries: Vec<String>,
}

impl Default for ParameterEntries {
    fn default() -> Self {
        ParameterEntries {
            entries: vec![String::new()],
        }
    }
}

// Always holds at least one row.
#[allow(clippy::len_without_is_empty)]
impl ParameterEntries {
    pub fn push_blank(&mut self) {
        self.entries.push(String::new());
    }

    pub fn set(&mut self, index: usize, value: String) {
        if let Some(entry) = self.entries.get_mut(index) {
            *entry = value;
        }
    }

    pub fn remove(&mut self, index: usize) {
        if self.entries.len() > 1 && index < self.entries.len() {
            self.entries.remove(index);
        }
    }

    pub fn can_remove(&self) -> bool {
        self.entries.len() > 1
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.entries
    }
}

#[cfg(test)]
pub mod tests {
    use super::{parse_parameters, ParameterEntries, QueryParameter};

    #[test]
    fn it_splits_on_the_first_colon_only() {
        let parameter = QueryParameter::parse(" since : ISO time: UTC ").unwrap();

        assert_eq!(parameter.name, "since");
        assert_eq!(parameter.description.as_deref(), Some("ISO time: UTC"));
        assert_eq!(parameter.location, "query");
        assert!(parameter.required);
        assert_eq!(parameter.kind, "string");
    }

    #[test]
    fn it_omits_the_description_without_a_colon() {
        let parameter = QueryParameter::parse("  page ").unwrap();

        assert_eq!(parameter.name, "page");
        assert_eq!(parameter.description, None);
    }

    #[test]
    fn it_drops_blank_entries_and_keeps_order() {
        let parameters = parse_parameters(&["b:second", "   ", "", "a:first"]);
        let names: Vec<&str> = parameters.iter().map(|p| p.name.as_str()).collect();

        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn it_always_keeps_one_editable_row() {
        let mut entries = ParameterEntries::default();
        assert_eq!(entries.len(), 1);
        assert!(!entries.can_remove());

        entries.remove(0);
        assert_eq!(entries.len(), 1);

        entries.push_blank();
        entries.set(1, "limit:max rows".into());
        entries.set(7, "ignored".into());
        assert_eq!(entries.as_slice(), ["", "limit:max rows"]);

        entries.remove(0);
        assert_eq!(entries.as_slice(), ["limit:max rows"]);

        entries.remove(3);
        assert_eq!(entries.len(), 1);
    }
}
