mod args;
mod db;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use course_core::TopicCatalog;
use dialoguer::Select;
use services::{
    CourseSource, CourseViewer, DirCourseSource, GenerateClient, GenerationService,
    GeneratorConfig, HttpCourseSource, ViewerState,
};
use storage::Storage;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ui::Route;
use ui::views::{render_course, render_generation, render_selection};
use ui::vm::{CourseIntent, CourseVm, GenerationVm, SelectionVm, apply_intent, run_generation};

use crate::args::{ClientArgs, Cli, Command, ProgressArgs};
use crate::db::{normalize_sqlite_url, prepare_sqlite_file};

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn serve(bind: SocketAddr, courses_dir: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = GeneratorConfig::from_env()?;
    if config.api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY is not set; generation requests will fail");
    }
    let service = Arc::new(GenerationService::from_config(&config, TopicCatalog::builtin()));
    let app = api::router(service, &courses_dir);

    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!(%bind, courses_dir = %courses_dir.display(), "listening");
    axum::serve(listener, app).await?;
    Ok(())
}

fn select_topic() -> Result<Option<Route>, Box<dyn std::error::Error>> {
    let vm = SelectionVm::from_catalog(&TopicCatalog::builtin());
    println!("{}\n", render_selection(&vm));

    let options: Vec<_> = vm.options().collect();
    let items: Vec<String> = options
        .iter()
        .map(|(group, option)| format!("{group} › {}", option.label))
        .collect();
    let selection = Select::new()
        .with_prompt(SelectionVm::PROMPT)
        .items(&items)
        .default(0)
        .interact_opt()?;

    let value = selection
        .and_then(|index| options.get(index))
        .map_or("", |(_, option)| option.value.as_str());
    match vm.submit(value) {
        Ok(route) => Ok(Some(route)),
        Err(err) => {
            eprintln!("{}", err.message());
            Ok(None)
        }
    }
}

async fn show_generation(route: &Route, client: &ClientArgs) {
    let initial = GenerationVm::initial(route);
    println!("{}", render_generation(&initial));
    if initial == GenerationVm::Missing {
        return;
    }

    let api = GenerateClient::new(client.server.clone());
    let vm = run_generation(&api, route).await;
    println!("\n{}", render_generation(&vm));
}

fn course_source(client: &ClientArgs, courses_dir: Option<PathBuf>) -> Box<dyn CourseSource> {
    match courses_dir {
        Some(dir) => Box::new(DirCourseSource::new(dir)),
        None => Box::new(HttpCourseSource::new(client.server.clone())),
    }
}

fn prompt_intent(vm: &CourseVm) -> Result<Option<CourseIntent>, Box<dyn std::error::Error>> {
    let CourseVm::Ready(ready) = vm else {
        return Ok(None);
    };

    let mut actions: Vec<(String, Option<CourseIntent>)> = Vec::new();
    let toggle_label = if ready.lesson.done {
        "Marquer comme à faire"
    } else {
        "Marquer comme fait"
    };
    actions.push((toggle_label.to_string(), Some(CourseIntent::ToggleDone)));
    if ready.can_advance {
        actions.push(("Suivant →".to_string(), Some(CourseIntent::Next)));
    }
    if ready.can_retreat {
        actions.push(("← Précédent".to_string(), Some(CourseIntent::Previous)));
    }
    for pill in &ready.steps {
        actions.push((pill.label.clone(), Some(CourseIntent::Select(pill.step))));
    }
    actions.push(("Quitter".to_string(), None));

    let labels: Vec<&str> = actions.iter().map(|(label, _)| label.as_str()).collect();
    let selection = Select::new()
        .with_prompt("Action")
        .items(&labels)
        .default(0)
        .interact_opt()?;

    Ok(selection.and_then(|index| actions.get(index)).and_then(|(_, intent)| *intent))
}

async fn follow_course(
    slug: &str,
    source: &dyn CourseSource,
    progress: &ProgressArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    // Open + migrate SQLite at startup.
    let db_url = normalize_sqlite_url(&progress.db_url);
    prepare_sqlite_file(&db_url)?;
    let storage = Storage::sqlite(&db_url).await?;

    let mut viewer = CourseViewer::new(slug, Arc::clone(&storage.kv));
    println!("{}", render_course(&CourseVm::Loading));
    viewer.load(source).await;

    loop {
        let vm = CourseVm::from_viewer(&viewer);
        println!("\n{}\n", render_course(&vm));
        if viewer.state() != &ViewerState::Ready {
            return Ok(());
        }

        let Some(intent) = prompt_intent(&vm)? else {
            return Ok(());
        };
        if let Err(err) = apply_intent(&mut viewer, intent).await {
            eprintln!("{}", err.message());
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve { bind, courses_dir } => serve(bind, courses_dir).await,
        Command::Select { client } => {
            if let Some(route) = select_topic()? {
                info!(path = %route.path(), "navigating");
                show_generation(&route, &client).await;
            }
            Ok(())
        }
        Command::Generate { slug, client } => {
            show_generation(&Route::Generate { slug }, &client).await;
            Ok(())
        }
        Command::Course {
            slug,
            client,
            progress,
            courses_dir,
        } => {
            let source = course_source(&client, courses_dir);
            follow_course(&slug, source.as_ref(), &progress).await
        }
        Command::Open {
            path,
            client,
            progress,
        } => match Route::parse(&path) {
            Some(Route::Home) => {
                if let Some(route) = select_topic()? {
                    show_generation(&route, &client).await;
                }
                Ok(())
            }
            Some(route @ Route::Generate { .. }) => {
                show_generation(&route, &client).await;
                Ok(())
            }
            Some(Route::Course { slug }) => {
                let source = course_source(&client, None);
                follow_course(&slug, source.as_ref(), &progress).await
            }
            None => Err(format!("unknown path: {path}").into()),
        },
    }
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    init_tracing();

    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
