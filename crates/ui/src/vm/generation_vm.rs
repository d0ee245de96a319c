use course_core::{ContentBlock, CoursePlan, Lesson};
use services::GenerateClient;

use crate::routes::Route;
use crate::views::ViewError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedLessonVm {
    pub heading: String,
    /// `image: <prompt>` when the lesson suggests an illustration.
    pub image_hint: Option<String>,
    pub paragraphs: Vec<String>,
}

impl From<&Lesson> for GeneratedLessonVm {
    fn from(lesson: &Lesson) -> Self {
        let image_hint = lesson
            .content
            .iter()
            .find_map(ContentBlock::as_image_prompt)
            .map(|prompt| format!("image: {prompt}"));
        let paragraphs = lesson
            .content
            .iter()
            .filter_map(ContentBlock::as_text)
            .map(str::to_string)
            .collect();
        Self {
            heading: format!("Étape {} — {}", lesson.step, lesson.title),
            image_hint,
            paragraphs,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedPlanVm {
    pub title: String,
    pub duration: String,
    pub summary: String,
    pub lessons: Vec<GeneratedLessonVm>,
}

impl From<&CoursePlan> for GeneratedPlanVm {
    fn from(plan: &CoursePlan) -> Self {
        Self {
            title: plan.title().to_string(),
            duration: plan.duration().to_string(),
            summary: plan.summary().to_string(),
            lessons: plan.lessons().iter().map(GeneratedLessonVm::from).collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenerationVm {
    /// No topic given; nothing is requested.
    Missing,
    Loading,
    Failed(ViewError),
    Ready(GeneratedPlanVm),
}

impl GenerationVm {
    /// State to show before any request is made for `route`.
    #[must_use]
    pub fn initial(route: &Route) -> Self {
        match route {
            Route::Generate { slug: Some(slug) } if !slug.is_empty() => Self::Loading,
            _ => Self::Missing,
        }
    }
}

/// Run one generation for `route`. No retry; every call hits the server.
pub async fn run_generation(client: &GenerateClient, route: &Route) -> GenerationVm {
    let Route::Generate { slug: Some(slug) } = route else {
        return GenerationVm::Missing;
    };
    if slug.is_empty() {
        return GenerationVm::Missing;
    }

    match client.request_plan(slug).await {
        Ok(plan) => GenerationVm::Ready(GeneratedPlanVm::from(&plan)),
        Err(_) => GenerationVm::Failed(ViewError::GenerationFailed),
    }
}
