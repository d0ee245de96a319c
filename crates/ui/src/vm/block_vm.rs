use course_core::ContentBlock;

/// One rendered content block of a lesson.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BlockVm {
    Paragraph(String),
    Image { src: String, alt: String },
    ImageSuggestion(String),
    Note(String),
}

impl BlockVm {
    /// `None` for blocks that render nothing.
    #[must_use]
    pub fn from_block(block: &ContentBlock, lesson_title: &str) -> Option<Self> {
        match block {
            ContentBlock::Text(text) => Some(Self::Paragraph(text.clone())),
            ContentBlock::Image(src) => Some(Self::Image {
                src: src.clone(),
                alt: lesson_title.to_string(),
            }),
            ContentBlock::ImagePrompt(prompt) => {
                Some(Self::ImageSuggestion(format!("Suggestion visuelle : {prompt}")))
            }
            ContentBlock::Note(note) => Some(Self::Note(note.clone())),
            ContentBlock::Unknown => None,
        }
    }
}

#[must_use]
pub fn map_blocks<'a>(
    blocks: impl IntoIterator<Item = &'a ContentBlock>,
    lesson_title: &str,
) -> Vec<BlockVm> {
    blocks
        .into_iter()
        .filter_map(|block| BlockVm::from_block(block, lesson_title))
        .collect()
}
