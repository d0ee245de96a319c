use std::path::PathBuf;
use std::sync::Arc;

use serde_json::json;
use services::{CourseViewer, DirCourseSource, GenerateClient};
use storage::{InMemoryStore, KeyValueStore, progress_key};
use ui::Route;
use ui::ViewError;
use ui::views::render_course;
use ui::vm::{BlockVm, CourseIntent, CourseVm, GenerationVm, PillState, apply_intent, run_generation};

fn courses_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../courses")
}

async fn loaded_viewer(kv: &InMemoryStore) -> CourseViewer {
    let mut viewer = CourseViewer::new("html", Arc::new(kv.clone()));
    viewer.load(&DirCourseSource::new(courses_dir())).await;
    viewer
}

fn ready(vm: CourseVm) -> ui::vm::CourseReadyVm {
    match vm {
        CourseVm::Ready(ready) => ready,
        other => panic!("course not ready: {other:?}"),
    }
}

#[tokio::test]
async fn course_screen_tracks_progress() {
    let kv = InMemoryStore::new();
    let mut viewer = loaded_viewer(&kv).await;

    let screen = ready(CourseVm::from_viewer(&viewer));
    assert_eq!(screen.progress_label, "0% terminé");
    assert_eq!(screen.steps.len(), 10);
    assert_eq!(screen.steps[0].state, PillState::Current);
    assert!(!screen.can_retreat);
    assert!(screen.can_advance);

    apply_intent(&mut viewer, CourseIntent::ToggleDone)
        .await
        .expect("toggle step 1");
    apply_intent(&mut viewer, CourseIntent::Next)
        .await
        .expect("next");

    let screen = ready(CourseVm::from_viewer(&viewer));
    assert_eq!(screen.progress_label, "10% terminé");
    assert_eq!(screen.steps[0].state, PillState::Done);
    assert_eq!(screen.steps[1].state, PillState::Current);
    assert_eq!(screen.lesson.step, 2);
    assert!(screen.lesson.heading.starts_with("Étape 2 — "));

    assert_eq!(
        kv.get(&progress_key("html")).await.expect("read"),
        Some(r#"{"1":true}"#.to_string())
    );
}

#[tokio::test]
async fn image_prompts_render_as_suggestions() {
    let kv = InMemoryStore::new();
    let viewer = loaded_viewer(&kv).await;

    let screen = ready(CourseVm::from_viewer(&viewer));
    assert!(
        screen
            .lesson
            .blocks
            .iter()
            .any(|block| matches!(block, BlockVm::ImageSuggestion(text) if text.starts_with("Suggestion visuelle : ")))
    );
    assert!(render_course(&CourseVm::Ready(screen)).contains("(aperçu image)"));
}

#[tokio::test]
async fn selecting_beyond_last_step_shows_first_lesson() {
    let kv = InMemoryStore::new();
    let mut viewer = loaded_viewer(&kv).await;

    apply_intent(&mut viewer, CourseIntent::Select(99))
        .await
        .expect("select");
    let screen = ready(CourseVm::from_viewer(&viewer));
    assert_eq!(screen.lesson.step, 1);
    assert!(
        screen
            .steps
            .iter()
            .all(|pill| pill.state != PillState::Current)
    );
}

#[tokio::test]
async fn missing_course_shows_error() {
    let mut viewer = CourseViewer::new("absent", Arc::new(InMemoryStore::new()));
    viewer.load(&DirCourseSource::new(courses_dir())).await;

    assert_eq!(
        CourseVm::from_viewer(&viewer),
        CourseVm::Error("Parcours introuvable".to_string())
    );
    assert_eq!(
        apply_intent(&mut viewer, CourseIntent::ToggleDone).await,
        Err(ViewError::NotReady)
    );
}

#[tokio::test]
async fn generation_without_slug_sends_nothing() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/generate")
        .expect(0)
        .create_async()
        .await;

    let client = GenerateClient::new(server.url());
    let vm = run_generation(&client, &Route::Generate { slug: None }).await;
    assert_eq!(vm, GenerationVm::Missing);
    mock.assert_async().await;
}

#[tokio::test]
async fn server_error_is_generic_failure() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/generate")
        .with_status(500)
        .with_body(r#"{"error":"OPENAI_API_KEY manquant"}"#)
        .create_async()
        .await;

    let client = GenerateClient::new(server.url());
    let vm = run_generation(
        &client,
        &Route::Generate {
            slug: Some("html".into()),
        },
    )
    .await;
    assert_eq!(vm, GenerationVm::Failed(ViewError::GenerationFailed));
}

#[tokio::test]
async fn generated_plan_is_displayed_in_order() {
    let lessons: Vec<_> = (1..=10)
        .map(|step| {
            json!({
                "step": step,
                "title": format!("Leçon {step}"),
                "content": [{ "text": "..." }, { "imagePrompt": "croquis" }]
            })
        })
        .collect();
    let body = json!({
        "plan": {
            "title": "Piano",
            "slug": "piano",
            "summary": "Bases",
            "duration": "10 jours",
            "lessons": lessons
        }
    });

    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/generate")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await;

    let client = GenerateClient::new(server.url());
    let vm = run_generation(
        &client,
        &Route::Generate {
            slug: Some("piano".into()),
        },
    )
    .await;

    let GenerationVm::Ready(plan) = vm else {
        panic!("expected a plan, got {vm:?}");
    };
    assert_eq!(plan.lessons.len(), 10);
    assert_eq!(plan.lessons[0].heading, "Étape 1 — Leçon 1");
    assert_eq!(plan.lessons[9].heading, "Étape 10 — Leçon 10");
    assert_eq!(plan.lessons[0].image_hint.as_deref(), Some("image: croquis"));
}
