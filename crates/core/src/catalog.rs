use serde::Serialize;

/// A pre-defined subject a course can be generated for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Topic {
    id: String,
    category: String,
    label: String,
    title: String,
    duration_label: String,
    brief: String,
}

impl Topic {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        category: impl Into<String>,
        label: impl Into<String>,
        title: impl Into<String>,
        duration_label: impl Into<String>,
        brief: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            label: label.into(),
            title: title.into(),
            duration_label: duration_label.into(),
            brief: brief.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Group label used by the selection screen.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Short label shown in the selection list.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn duration_label(&self) -> &str {
        &self.duration_label
    }

    #[must_use]
    pub fn brief(&self) -> &str {
        &self.brief
    }
}

/// Topics sharing a category, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicGroup<'a> {
    pub category: &'a str,
    pub topics: Vec<&'a Topic>,
}

/// Immutable lookup table of the topics known at process start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicCatalog {
    topics: Vec<Topic>,
}

impl TopicCatalog {
    /// Builds a catalog from the given topics.
    ///
    /// Later entries with an id already present are ignored.
    #[must_use]
    pub fn new(topics: impl IntoIterator<Item = Topic>) -> Self {
        let mut unique: Vec<Topic> = Vec::new();
        for topic in topics {
            if unique.iter().all(|known| known.id != topic.id) {
                unique.push(topic);
            }
        }
        Self { topics: unique }
    }

    /// The catalog shipped with the application.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new([
            Topic::new(
                "piano",
                "Musique",
                "Le piano",
                "Piano débutant — 5 min/jour",
                "5 min/jour pendant 10 jours",
                "Micro-parcours pour apprendre les bases du piano",
            ),
            Topic::new(
                "html",
                "Programmation",
                "HTML",
                "HTML Essentials — 5 min/jour",
                "5 min/jour pendant 10 jours",
                "Découvrir les balises fondamentales, la structure d'une page et les bonnes pratiques d'accessibilité.",
            ),
        ])
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Topic> {
        self.topics.iter().find(|topic| topic.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.topics.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Groups topics by category, categories in order of first appearance.
    #[must_use]
    pub fn groups(&self) -> Vec<TopicGroup<'_>> {
        let mut groups: Vec<TopicGroup<'_>> = Vec::new();
        for topic in &self.topics {
            match groups
                .iter_mut()
                .find(|group| group.category == topic.category)
            {
                Some(group) => group.topics.push(topic),
                None => groups.push(TopicGroup {
                    category: &topic.category,
                    topics: vec![topic],
                }),
            }
        }
        groups
    }
}

impl Default for TopicCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
