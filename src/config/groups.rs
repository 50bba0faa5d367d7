//! Static condition groups used to scope admission trends.

use smallvec::SmallVec;

/// A named clinical category and the exact condition descriptions it covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionGroup {
    name: String,
    descriptions: SmallVec<[String; 4]>,
}

impl ConditionGroup {
    /// Create a group from a name and its description list
    pub fn new<I, S>(name: impl Into<String>, descriptions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            descriptions: descriptions.into_iter().map(Into::into).collect(),
        }
    }

    /// Display name of the group
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Condition descriptions in configured order
    #[must_use]
    pub fn descriptions(&self) -> &[String] {
        &self.descriptions
    }

    /// Descriptions lowercased for case-insensitive exact matching
    #[must_use]
    pub fn lowercase_descriptions(&self) -> SmallVec<[String; 4]> {
        self.descriptions.iter().map(|d| d.to_lowercase()).collect()
    }
}

/// Ordered table of condition groups
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionGroupTable {
    groups: Vec<ConditionGroup>,
}

impl ConditionGroupTable {
    /// Create a table from explicit groups
    #[must_use]
    pub const fn new(groups: Vec<ConditionGroup>) -> Self {
        Self { groups }
    }

    /// Look up a group by name, ignoring case
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&ConditionGroup> {
        let wanted = name.to_lowercase();
        self.groups.iter().find(|g| g.name.to_lowercase() == wanted)
    }

    /// Group names in configured order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(ConditionGroup::name)
    }

    /// All groups in configured order
    #[must_use]
    pub fn groups(&self) -> &[ConditionGroup] {
        &self.groups
    }
}

impl Default for ConditionGroupTable {
    fn default() -> Self {
        Self::new(vec![
            ConditionGroup::new(
                "Respiratory Disorders",
                [
                    "acute bronchitis (disorder)",
                    "acute viral pharyngitis (disorder)",
                    "viral sinusitis (disorder)",
                ],
            ),
            ConditionGroup::new(
                "Chronic Health Issues",
                ["body mass index 30+ - obesity (finding)", "anemia (disorder)"],
            ),
            ConditionGroup::new(
                "Psychosocial Factors",
                ["stress (finding)", "social isolation (finding)"],
            ),
        ])
    }
}
