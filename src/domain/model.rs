use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};

/// Requested topic name -> budget weight.
pub type TopicWeights = HashMap<String, Decimal>;

/// A catalog entry offering a fixed, ordered list of topics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provider {
    name: String,
    supported_topics: Vec<String>,
}

impl Provider {
    pub fn new<N, I, T>(name: N, supported_topics: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            name: name.into(),
            supported_topics: supported_topics.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn supported_topics(&self) -> &[String] {
        &self.supported_topics
    }

    /// Topics this provider supports that also appear in `candidates`.
    ///
    /// Order follows the provider's own topic list, not the candidates, and
    /// each topic is reported once.
    pub fn match_topics<'c, I>(&self, candidates: I) -> Vec<&str>
    where
        I: IntoIterator<Item = &'c str>,
    {
        let candidates: HashSet<&str> = candidates.into_iter().collect();
        let mut seen = HashSet::new();

        self.supported_topics
            .iter()
            .map(String::as_str)
            .filter(|topic| candidates.contains(*topic) && seen.insert(*topic))
            .collect()
    }
}

/// Providers selected by the allocation engine and their quotes.
///
/// Keys are provider names; iteration follows insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderBundle {
    entries: Vec<(Provider, Decimal)>,
    index: HashMap<String, usize>,
}

impl ProviderBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a provider with its quote.
    ///
    /// # Panics
    ///
    /// Panics if a provider with the same name is already in the bundle.
    pub fn add_to_bundle(&mut self, provider: Provider, quote: Decimal) {
        assert!(
            !self.index.contains_key(provider.name()),
            "provider '{}' is already in the bundle",
            provider.name()
        );

        self.index
            .insert(provider.name().to_string(), self.entries.len());
        self.entries.push((provider, quote));
    }

    pub fn get(&self, provider: &Provider) -> Option<Decimal> {
        self.get_by_name(provider.name())
    }

    pub fn get_by_name(&self, name: &str) -> Option<Decimal> {
        self.index.get(name).map(|&i| self.entries[i].1)
    }

    pub fn contains(&self, provider: &Provider) -> bool {
        self.index.contains_key(provider.name())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Provider, Decimal)> + '_ {
        self.entries.iter().map(|(provider, quote)| (provider, *quote))
    }

    pub fn providers(&self) -> impl Iterator<Item = &Provider> + '_ {
        self.entries.iter().map(|(provider, _)| provider)
    }

    pub fn quotes(&self) -> impl Iterator<Item = Decimal> + '_ {
        self.entries.iter().map(|(_, quote)| *quote)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
