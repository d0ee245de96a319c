use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use course_core::{CoursePlan, CoursePlanDraft};
use reqwest::Client;
use reqwest::header::CACHE_CONTROL;

use crate::error::CourseSourceError;

/// Where pre-built course documents come from.
#[async_trait]
pub trait CourseSource: Send + Sync {
    /// Fetch and validate the document for `slug`.
    ///
    /// # Errors
    ///
    /// Returns `CourseSourceError::NotFound` when no document exists for the
    /// slug, or other errors for transport, decoding, and validation failures.
    async fn fetch(&self, slug: &str) -> Result<CoursePlan, CourseSourceError>;
}

/// Parse a static course document.
///
/// # Errors
///
/// Returns `CourseSourceError::Json` for invalid JSON and
/// `CourseSourceError::Plan` when the document fails validation.
pub fn parse_course_document(raw: &str) -> Result<CoursePlan, CourseSourceError> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    Ok(CoursePlanDraft::from_value(value)?.validate()?)
}

fn is_safe_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
}

/// Reads `GET {base_url}/courses/<slug>.json`, bypassing caches.
#[derive(Clone)]
pub struct HttpCourseSource {
    client: Client,
    base_url: String,
}

impl HttpCourseSource {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl CourseSource for HttpCourseSource {
    async fn fetch(&self, slug: &str) -> Result<CoursePlan, CourseSourceError> {
        if !is_safe_slug(slug) {
            return Err(CourseSourceError::NotFound);
        }
        let url = format!(
            "{}/courses/{slug}.json",
            self.base_url.trim_end_matches('/')
        );

        let response = self
            .client
            .get(url)
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CourseSourceError::NotFound);
        }

        let raw = response.text().await?;
        parse_course_document(&raw)
    }
}

/// Reads `<root>/<slug>.json` from the local filesystem.
#[derive(Clone, Debug)]
pub struct DirCourseSource {
    root: PathBuf,
}

impl DirCourseSource {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl CourseSource for DirCourseSource {
    async fn fetch(&self, slug: &str) -> Result<CoursePlan, CourseSourceError> {
        if !is_safe_slug(slug) {
            return Err(CourseSourceError::NotFound);
        }
        let path = self.root.join(format!("{slug}.json"));
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(CourseSourceError::NotFound);
            }
            Err(err) => return Err(err.into()),
        };
        parse_course_document(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use course_core::ContentBlock;

    fn courses_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../courses")
    }

    #[test]
    fn slug_guard_rejects_paths() {
        assert!(is_safe_slug("html"));
        assert!(is_safe_slug("html-essentials_2"));
        assert!(!is_safe_slug(""));
        assert!(!is_safe_slug("../secrets"));
        assert!(!is_safe_slug("a/b"));
    }

    #[tokio::test]
    async fn shipped_documents_are_valid() {
        let source = DirCourseSource::new(courses_dir());
        for slug in ["html", "piano"] {
            let plan = source.fetch(slug).await.unwrap();
            assert_eq!(plan.slug(), slug);
            assert_eq!(plan.lesson_count(), 10);
        }
    }

    #[tokio::test]
    async fn dir_source_reports_missing_document() {
        let source = DirCourseSource::new(courses_dir());
        let err = source.fetch("unknown-topic").await.unwrap_err();
        assert!(matches!(err, CourseSourceError::NotFound));
        assert_eq!(err.to_string(), "Parcours introuvable");
    }

    #[tokio::test]
    async fn http_source_disables_caching() {
        let mut server = mockito::Server::new_async().await;
        let body = std::fs::read_to_string(courses_dir().join("html.json")).unwrap();
        let mock = server
            .mock("GET", "/courses/html.json")
            .match_header("cache-control", "no-store")
            .with_status(200)
            .with_body(body)
            .expect(1)
            .create_async()
            .await;

        let plan = HttpCourseSource::new(server.url()).fetch("html").await.unwrap();
        assert_eq!(plan.lesson_count(), 10);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn http_source_maps_non_success_to_not_found() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/courses/nope.json")
            .with_status(404)
            .create_async()
            .await;

        let err = HttpCourseSource::new(server.url()).fetch("nope").await.unwrap_err();
        assert!(matches!(err, CourseSourceError::NotFound));
    }

    #[test]
    fn invalid_documents_are_rejected() {
        assert!(matches!(
            parse_course_document("{"),
            Err(CourseSourceError::Json(_))
        ));
        assert!(matches!(
            parse_course_document(r#"{"title":"T","slug":"s","summary":"S","duration":"D","lessons":[]}"#),
            Err(CourseSourceError::Plan(_))
        ));
    }

    #[test]
    fn stray_blocks_render_nothing() {
        let plan = parse_course_document(
            r#"{"title":"T","slug":"s","summary":"S","duration":"D","lessons":[
                {"step":1,"title":"A","content":["texte brut",{"text":"ok"},{"note":7}]}
            ]}"#,
        )
        .unwrap();
        let lesson = plan.lesson(1).unwrap();
        assert_eq!(lesson.content.len(), 3);
        assert_eq!(
            lesson.visible_blocks().collect::<Vec<_>>(),
            vec![&ContentBlock::text("ok")]
        );
    }
}
