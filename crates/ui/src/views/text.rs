//! Plain-text rendering of the view-models for the terminal front-end.

use crate::vm::{BlockVm, CourseVm, GenerationVm, PillState, SelectionVm};

const PROGRESS_WIDTH: usize = 20;

#[must_use]
pub fn render_selection(vm: &SelectionVm) -> String {
    let mut lines = vec![SelectionVm::HEADING.to_string(), String::new()];
    lines.push(SelectionVm::PROMPT.to_string());
    for group in vm.groups() {
        lines.push(format!("  {}", group.label));
        for option in &group.options {
            lines.push(format!("    {} ({})", option.label, option.value));
        }
    }
    lines.join("\n")
}

#[must_use]
pub fn render_generation(vm: &GenerationVm) -> String {
    match vm {
        GenerationVm::Missing => "Paramètre manquant.".to_string(),
        GenerationVm::Loading => {
            "Génération en cours…\nPréparation de ton micro-parcours.".to_string()
        }
        GenerationVm::Failed(err) => format!("Oups…\n{}", err.message()),
        GenerationVm::Ready(plan) => {
            let mut lines = vec![
                plan.title.clone(),
                plan.duration.clone(),
                String::new(),
                plan.summary.clone(),
            ];
            for lesson in &plan.lessons {
                lines.push(String::new());
                lines.push(lesson.heading.clone());
                if let Some(hint) = &lesson.image_hint {
                    lines.push(format!("  {hint}"));
                }
                for paragraph in &lesson.paragraphs {
                    lines.push(format!("  {paragraph}"));
                }
            }
            lines.join("\n")
        }
    }
}

fn progress_bar(pct: u8) -> String {
    let filled = usize::from(pct) * PROGRESS_WIDTH / 100;
    format!(
        "[{}{}]",
        "#".repeat(filled),
        "-".repeat(PROGRESS_WIDTH - filled)
    )
}

fn render_block(block: &BlockVm) -> Vec<String> {
    match block {
        BlockVm::Paragraph(text) => vec![text.clone()],
        BlockVm::Image { src, alt } => vec![format!("[image {alt}] {src}")],
        BlockVm::ImageSuggestion(caption) => vec!["(aperçu image)".to_string(), caption.clone()],
        BlockVm::Note(note) => vec![format!("Note : {note}")],
    }
}

#[must_use]
pub fn render_course(vm: &CourseVm) -> String {
    let ready = match vm {
        CourseVm::Loading => return "Chargement…".to_string(),
        CourseVm::Error(message) => return format!("Oups…\n{message}\n← Accueil"),
        CourseVm::Ready(ready) => ready,
    };

    let mut lines = vec![
        ready.title.clone(),
        ready.duration.clone(),
        ready.summary.clone(),
        format!("{} {}", progress_bar(ready.progress_pct), ready.progress_label),
        String::new(),
    ];

    let pills: Vec<String> = ready
        .steps
        .iter()
        .map(|pill| match pill.state {
            PillState::Current => format!("[{}]", pill.label),
            PillState::Done => format!("✓ {}", pill.label),
            PillState::Pending => pill.label.clone(),
        })
        .collect();
    lines.push(pills.join("  "));
    lines.push(String::new());

    let checkbox = if ready.lesson.done { "[x]" } else { "[ ]" };
    lines.push(ready.lesson.heading.clone());
    lines.push(format!("{checkbox} Marquer comme fait"));
    for block in &ready.lesson.blocks {
        lines.push(String::new());
        lines.extend(render_block(block));
    }

    let mut nav = Vec::new();
    if ready.can_retreat {
        nav.push("← Précédent");
    }
    if ready.can_advance {
        nav.push("Suivant →");
    }
    if !nav.is_empty() {
        lines.push(String::new());
        lines.push(nav.join("    "));
    }
    lines.join("\n")
}
