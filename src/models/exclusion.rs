use std::collections::BTreeSet;

/// Property names an assertion must skip. Built once per call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    names: BTreeSet<String>,
}

impl ExclusionSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ExclusionSet {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    /// Per-call names combined with the always-excluded names from configuration
    pub fn merged(names: &[&str], always: &[String]) -> Self {
        Self::new(names.iter().map(|name| name.to_string()).chain(always.iter().cloned()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }
}

impl<'a> From<&[&'a str]> for ExclusionSet {
    fn from(names: &[&'a str]) -> Self {
        Self::new(names.iter().copied())
    }
}
