#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    GenerationFailed,
    ProgressNotSaved,
    NotReady,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::GenerationFailed => "Échec de la génération",
            Self::ProgressNotSaved => "Impossible d'enregistrer la progression.",
            Self::NotReady => "Parcours non chargé.",
        }
    }
}
