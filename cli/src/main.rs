//! Taskify terminal client
//!
//! Composition root: builds the store, the task service and the controller,
//! then renders controller state and forwards typed commands to it.

mod command;
mod config;
mod form;
mod render;

use std::sync::Arc;

use anyhow::Context;
use taskify_core::diff::reconcile;
use taskify_core::task::{FileTaskStore, InMemoryTaskStore, Task, TaskId, TaskRepository};
use taskify_core::{TaskController, TaskService};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::command::Command;
use crate::config::AppConfig;
use crate::form::TaskForm;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskify=info,taskify_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::from_env();

    let repository: Arc<dyn TaskRepository> = if config.in_memory {
        tracing::info!("Keeping tasks in memory only");
        Arc::new(InMemoryTaskStore::default())
    } else {
        let path = config.tasks_path();
        tracing::info!("Using task file: {:?}", path);
        Arc::new(
            FileTaskStore::new(&path)
                .await
                .with_context(|| format!("failed to open task store {}", path.display()))?,
        )
    };

    let controller = TaskController::new(TaskService::new(repository), config.controller());
    let views = spawn_views(&controller);

    println!("{}", render::HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match Command::parse(&line) {
            Ok(Some(Command::Quit)) => break,
            Ok(Some(command)) => execute(&controller, command, &mut lines).await?,
            Ok(None) => {}
            Err(e) => println!("{}", e),
        }
    }

    // Pending saves and deletes finish and report before the views close
    controller.shutdown().await;
    for view in views {
        let _ = view.await;
    }
    Ok(())
}

/// Background printers for the task list, search results and outcomes
fn spawn_views(controller: &TaskController) -> Vec<JoinHandle<()>> {
    let mut tasks = controller.current_tasks();
    let list_view = tokio::spawn(async move {
        let mut shown: Vec<Task> = Vec::new();
        while tasks.changed().await.is_ok() {
            let next = tasks.borrow_and_update().clone();
            for change in reconcile(&shown, &next) {
                println!("{}", render::change_line(&change));
            }
            shown = next.to_vec();
        }
    });

    let mut results = controller.search_results();
    let search_view = tokio::spawn(async move {
        while results.changed().await.is_ok() {
            let current = results.borrow_and_update().clone();
            if !current.query.trim().is_empty() {
                println!("{}", render::search_block(&current));
            }
        }
    });

    let mut outcomes = controller.outcomes();
    let outcome_view = tokio::spawn(async move {
        loop {
            match outcomes.recv().await {
                Ok(outcome) => println!("{}", render::outcome_line(&outcome)),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("Skipped {} operation outcomes", skipped)
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    vec![list_view, search_view, outcome_view]
}

async fn execute(
    controller: &TaskController,
    command: Command,
    lines: &mut Lines<BufReader<Stdin>>,
) -> anyhow::Result<()> {
    match command {
        Command::Add { priority, title } => match TaskForm::new(title, priority).to_new_task() {
            Ok(task) => {
                controller.save_task(task);
            }
            Err(e) => println!("{}", e),
        },
        Command::Edit { id, title } => {
            if let Some(task) = find(controller, id) {
                let mut form = TaskForm::editing(&task);
                form.title = title;
                match form.apply_to(&task) {
                    Ok(updated) => {
                        controller.save_task(updated);
                    }
                    Err(e) => println!("{}", e),
                }
            }
        }
        Command::Priority { id, priority } => {
            if let Some(task) = find(controller, id) {
                let mut form = TaskForm::editing(&task);
                form.priority = priority;
                match form.apply_to(&task) {
                    Ok(updated) => {
                        controller.save_task(updated);
                    }
                    Err(e) => println!("{}", e),
                }
            }
        }
        Command::SetCompleted { id, completed } => {
            if let Some(task) = find(controller, id) {
                if task.is_completed != completed {
                    controller.save_task(task.completed(completed));
                }
            }
        }
        Command::Remove { id } => {
            if let Some(task) = find(controller, id) {
                println!("Delete \"{}\"? [y/N]", task.title);
                let answer = lines.next_line().await?.unwrap_or_default();
                if matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
                    controller.delete_task(task);
                } else {
                    println!("Kept #{}", id);
                }
            }
        }
        Command::Search(text) => {
            if text.trim().is_empty() {
                println!("Search cleared");
            }
            controller.set_search_query(text);
        }
        Command::List => println!("{}", render::task_list(&controller.current_tasks().borrow())),
        Command::Help => println!("{}", render::HELP),
        Command::Quit => {}
    }
    Ok(())
}

/// Look a task up in the latest list snapshot
fn find(controller: &TaskController, id: TaskId) -> Option<Task> {
    let task = controller
        .current_tasks()
        .borrow()
        .iter()
        .find(|task| task.id == id)
        .cloned();
    if task.is_none() {
        println!("No task #{}", id);
    }
    task
}
