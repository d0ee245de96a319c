use course_core::TopicCatalog;

use crate::routes::Route;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub value: String,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionGroupVm {
    pub label: String,
    pub options: Vec<OptionVm>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionError {
    Required,
}

impl SelectionError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Required => "Choisis un thème avant de continuer.",
        }
    }
}

/// Topic picker grouped by category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionVm {
    groups: Vec<OptionGroupVm>,
}

impl SelectionVm {
    pub const HEADING: &'static str = "Que veux-tu apprendre aujourd'hui ?";
    pub const PROMPT: &'static str = "Sélectionne un thème :";
    pub const SUBMIT: &'static str = "Générer mon parcours";

    #[must_use]
    pub fn from_catalog(catalog: &TopicCatalog) -> Self {
        let groups = catalog
            .groups()
            .into_iter()
            .map(|group| OptionGroupVm {
                label: group.category.to_string(),
                options: group
                    .topics
                    .into_iter()
                    .map(|topic| OptionVm {
                        value: topic.id().to_string(),
                        label: topic.label().to_string(),
                    })
                    .collect(),
            })
            .collect();
        Self { groups }
    }

    #[must_use]
    pub fn groups(&self) -> &[OptionGroupVm] {
        &self.groups
    }

    /// Options in display order, each with its group label.
    pub fn options(&self) -> impl Iterator<Item = (&str, &OptionVm)> {
        self.groups.iter().flat_map(|group| {
            group
                .options
                .iter()
                .map(move |option| (group.label.as_str(), option))
        })
    }

    /// # Errors
    ///
    /// Returns `SelectionError::Required` when nothing is selected.
    pub fn submit(&self, value: &str) -> Result<Route, SelectionError> {
        if value.is_empty() {
            return Err(SelectionError::Required);
        }
        Ok(Route::Generate {
            slug: Some(value.to_string()),
        })
    }
}
