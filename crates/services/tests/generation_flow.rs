use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use course_core::TopicCatalog;
use course_core::prompt::SYSTEM_INSTRUCTION;
use serde_json::json;
use services::{ChatCompletion, ChatRequest, CompletionError, GenerateError, GenerationService};

enum Reply {
    Content(Option<String>),
    Status(u16, &'static str),
}

struct ScriptedChat {
    reply: Reply,
    calls: AtomicUsize,
    last_request: Mutex<Option<ChatRequest>>,
}

impl ScriptedChat {
    fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatCompletion for ScriptedChat {
    async fn complete(
        &self,
        _api_key: &str,
        request: &ChatRequest,
    ) -> Result<Option<String>, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().expect("lock") = Some(request.clone());
        match &self.reply {
            Reply::Content(content) => Ok(content.clone()),
            Reply::Status(status, body) => Err(CompletionError::Status {
                status: *status,
                body: (*body).to_string(),
            }),
        }
    }
}

fn service(chat: &Arc<ScriptedChat>, api_key: Option<&str>) -> GenerationService {
    GenerationService::new(
        TopicCatalog::builtin(),
        api_key.map(str::to_string),
        Arc::clone(chat) as Arc<dyn ChatCompletion>,
    )
}

fn html_reply(lessons: u32) -> String {
    let lessons: Vec<_> = (1..=lessons)
        .map(|step| {
            json!({
                "step": step,
                "title": format!("Leçon {step}"),
                "content": [
                    { "text": "Une balise ouvre, une balise ferme." },
                    { "imagePrompt": "Un schéma de balises imbriquées" }
                ]
            })
        })
        .collect();
    json!({
        "title": "HTML Essentials",
        "slug": "html-essentials",
        "summary": "Les bases du HTML",
        "duration": "5 min/jour pendant 10 jours",
        "lessons": lessons
    })
    .to_string()
}

#[tokio::test]
async fn unknown_or_empty_topic_makes_no_call() {
    let chat = ScriptedChat::new(Reply::Content(Some(html_reply(10))));
    let service = service(&chat, Some("sk-test"));

    for slug in [Some("unknown-topic"), Some(""), None] {
        let err = service.generate(slug).await.expect_err("unknown topic");
        assert!(matches!(err, GenerateError::UnknownTopic));
        assert!(err.is_client_error());
        assert_eq!(err.to_string(), "Sujet inconnu");
    }
    assert_eq!(chat.calls(), 0);
}

#[tokio::test]
async fn missing_credential_makes_no_call() {
    let chat = ScriptedChat::new(Reply::Content(Some(html_reply(10))));
    let err = service(&chat, None)
        .generate(Some("html"))
        .await
        .expect_err("missing key");

    assert!(matches!(err, GenerateError::MissingCredential));
    assert!(!err.is_client_error());
    assert_eq!(err.to_string(), "OPENAI_API_KEY manquant");
    assert_eq!(chat.calls(), 0);
}

#[tokio::test]
async fn upstream_failure_carries_its_text() {
    let chat = ScriptedChat::new(Reply::Status(401, "invalid api key"));
    let err = service(&chat, Some("sk-bad"))
        .generate(Some("piano"))
        .await
        .expect_err("upstream failure");

    assert_eq!(err.to_string(), "Erreur OpenAI : invalid api key");
    assert_eq!(chat.calls(), 1);
}

#[tokio::test]
async fn blank_or_missing_content_is_empty_reply() {
    for content in [None, Some("   \n".to_string())] {
        let chat = ScriptedChat::new(Reply::Content(content));
        let err = service(&chat, Some("sk-test"))
            .generate(Some("html"))
            .await
            .expect_err("empty reply");
        assert_eq!(err.to_string(), "Réponse vide d'OpenAI");
    }
}

#[tokio::test]
async fn non_json_content_is_not_echoed() {
    let raw = "Voici votre cours : leçon 1...";
    let chat = ScriptedChat::new(Reply::Content(Some(raw.to_string())));
    let err = service(&chat, Some("sk-test"))
        .generate(Some("html"))
        .await
        .expect_err("invalid json");

    assert!(matches!(err, GenerateError::InvalidJson));
    assert_eq!(err.to_string(), "Format JSON invalide");
    assert!(!err.to_string().contains(raw));
}

#[tokio::test]
async fn schema_violation_is_invalid_plan() {
    let reply = json!({
        "title": "HTML",
        "slug": "html",
        "summary": "S",
        "duration": "D",
        "lessons": [
            { "step": 1, "title": "Un", "content": [] },
            { "step": 3, "title": "Trois", "content": [] }
        ]
    })
    .to_string();
    let chat = ScriptedChat::new(Reply::Content(Some(reply)));
    let err = service(&chat, Some("sk-test"))
        .generate(Some("html"))
        .await
        .expect_err("invalid plan");

    assert!(matches!(err, GenerateError::InvalidPlan(_)));
    assert!(err.to_string().starts_with("Parcours invalide : "));
}

#[tokio::test]
async fn html_topic_yields_ten_lessons() {
    let chat = ScriptedChat::new(Reply::Content(Some(format!("  {}  ", html_reply(10)))));
    let plan = service(&chat, Some("sk-test"))
        .generate(Some("html"))
        .await
        .expect("generate html");

    assert_eq!(plan.lesson_count(), 10);
    let steps: Vec<u32> = plan.lessons().iter().map(|lesson| lesson.step).collect();
    assert_eq!(steps, (1..=10).collect::<Vec<_>>());
    assert_eq!(chat.calls(), 1);

    let request = chat
        .last_request
        .lock()
        .expect("lock")
        .clone()
        .expect("request sent");
    assert_eq!(request.messages[0].content, SYSTEM_INSTRUCTION);
    assert!(request.messages[1].content.contains("Titre: HTML Essentials — 5 min/jour"));
    assert!(request.messages[1].content.contains("Durée: 5 min/jour pendant 10 jours"));
}

#[tokio::test]
async fn other_lesson_counts_are_accepted() {
    let chat = ScriptedChat::new(Reply::Content(Some(html_reply(7))));
    let plan = service(&chat, Some("sk-test"))
        .generate(Some("html"))
        .await
        .expect("generate with seven lessons");
    assert_eq!(plan.lesson_count(), 7);
}
