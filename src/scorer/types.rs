use std::collections::HashMap;

/// A donor with an unordered pair of allele codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Individual {
    pub id: String,
    pub alleles: [String; 2],
}

impl Individual {
    pub fn new(
        id: impl Into<String>,
        allele_1: impl Into<String>,
        allele_2: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            alleles: [allele_1.into(), allele_2.into()],
        }
    }
}

/// The donors available for selection, kept in file order.
///
/// Cohorts refer to donors by their position in the pool. Inserting an id a
/// second time replaces the alleles but keeps the original position.
#[derive(Debug, Clone, Default)]
pub struct Pool {
    members: Vec<Individual>,
    index: HashMap<String, usize>,
}

impl Pool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_individuals<I: IntoIterator<Item = Individual>>(individuals: I) -> Self {
        let mut pool = Self::new();
        for ind in individuals {
            pool.insert(ind);
        }
        pool
    }

    /// Returns true when the id was already present and got replaced.
    pub fn insert(&mut self, individual: Individual) -> bool {
        if let Some(&pos) = self.index.get(&individual.id) {
            self.members[pos] = individual;
            return true;
        }
        self.index.insert(individual.id.clone(), self.members.len());
        self.members.push(individual);
        false
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn get(&self, pos: usize) -> Option<&Individual> {
        self.members.get(pos)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }
}

/// An ordered selection of pool positions. Positions are the unit the search
/// replaces; ids are resolved through the pool when reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cohort {
    members: Vec<usize>,
}

impl Cohort {
    pub fn from_positions(members: Vec<usize>) -> Self {
        Self { members }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn positions(&self) -> &[usize] {
        &self.members
    }

    pub fn contains(&self, pos: usize) -> bool {
        self.members.contains(&pos)
    }

    pub fn individuals<'p>(&'p self, pool: &'p Pool) -> impl Iterator<Item = &'p Individual> + 'p {
        self.members.iter().filter_map(move |&p| pool.get(p))
    }

    pub fn ids<'p>(&'p self, pool: &'p Pool) -> impl Iterator<Item = &'p str> + 'p {
        self.individuals(pool).map(|ind| ind.id.as_str())
    }
}

/// Ordered allele keys of the target distribution. Every positional view of
/// a distribution (table rows, chart bars) walks this order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlleleDomain {
    keys: Vec<String>,
}

impl AlleleDomain {
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrequencyDistribution {
    freqs: HashMap<String, f64>,
}

impl FrequencyDistribution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            freqs: HashMap::with_capacity(capacity),
        }
    }

    pub fn insert(&mut self, allele: impl Into<String>, freq: f64) {
        self.freqs.insert(allele.into(), freq);
    }

    /// Frequency of `allele`, or 0 when absent.
    pub fn get(&self, allele: &str) -> f64 {
        self.freqs.get(allele).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, allele: &str) -> bool {
        self.freqs.contains_key(allele)
    }

    /// Adds a 0 entry for every domain allele missing from the map.
    pub fn zero_fill(&mut self, domain: &AlleleDomain) {
        for allele in domain.iter() {
            if !self.freqs.contains_key(allele) {
                self.freqs.insert(allele.to_string(), 0.0);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.freqs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.freqs.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.freqs.values().sum()
    }

}

/// The background distribution a cohort is matched against. Only non-zero
/// entries are kept, and their file order defines the [`AlleleDomain`].
#[derive(Debug, Clone, Default)]
pub struct TargetDistribution {
    domain: AlleleDomain,
    dist: FrequencyDistribution,
}

impl TargetDistribution {
    /// Builds a target from `(allele, frequency)` pairs. Zero entries are
    /// dropped; a repeated allele keeps its first position and its last value.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut target = Self::default();
        for (allele, freq) in pairs {
            let allele = allele.into();
            if freq == 0.0 {
                continue;
            }
            if !target.dist.contains(&allele) {
                target.domain.keys.push(allele.clone());
            }
            target.dist.insert(allele, freq);
        }
        target
    }

    pub fn domain(&self) -> &AlleleDomain {
        &self.domain
    }

    pub fn distribution(&self) -> &FrequencyDistribution {
        &self.dist
    }

    pub fn get(&self, allele: &str) -> f64 {
        self.dist.get(allele)
    }

    pub fn len(&self) -> usize {
        self.domain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domain.is_empty()
    }

    /// `(allele, frequency)` in domain order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.domain.iter().map(move |a| (a, self.dist.get(a)))
    }
}
