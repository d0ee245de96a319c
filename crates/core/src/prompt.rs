//! Instructions sent to the chat model when generating a course.

use crate::catalog::Topic;

/// Number of lessons requested from the model.
pub const LESSON_COUNT: u32 = 10;

/// System message fixing the reply format.
pub const SYSTEM_INSTRUCTION: &str = "Tu es un générateur de micro-parcours éducatifs. \
Réponds exclusivement avec un JSON valide. Aucune explication hors JSON. \
Les clés attendues : {title, slug, summary, duration, \
lessons:[{step, title, content:[{text} | {imagePrompt} | {note}]}]}";

/// User message for a topic.
#[must_use]
pub fn topic_prompt(topic: &Topic) -> String {
    build_prompt(topic.title(), topic.duration_label(), topic.brief())
}

/// Deterministic user message embedding the topic parameters verbatim.
#[must_use]
pub fn build_prompt(title: &str, duration: &str, brief: &str) -> String {
    format!(
        r#"Crée un micro-parcours JSON pour un apprentissage ludique et progressif.
Titre: {title}
Durée: {duration}
Description: {brief}

Structure demandée (en JSON uniquement) :
{{
  "title": "...",
  "slug": "...",
  "summary": "...",
  "duration": "...",
  "lessons": [
    {{
      "step": 1,
      "title": "...",
      "content": [
        {{ "text": "..." }},
        {{ "imagePrompt": "..." }}
      ]
    }}
  ]
}}

Exigences :
- {LESSON_COUNT} leçons numérotées (step 1 à {LESSON_COUNT})
- Ton clair, bienveillant et motivant
- Chaque bloc 'text' doit tenir en 3 à 5 phrases maximum
- 'imagePrompt' = description simple d'une image illustrative
- 'note' (facultatif) = conseil ou point d'attention
Réponds UNIQUEMENT avec un JSON valide."#
    )
}
