use std::sync::Arc;

use oficina_core::impls::FileKeyValueStore;
use oficina_core::{AppBuilder, Notice, NoticeSink, Snapshot, TaskId};
use tokio::io::{AsyncBufReadExt, BufReader};

/// Plays the part of the mobile alert dialog: notices go to the terminal.
struct TerminalNotices;

impl NoticeSink for TerminalNotices {
    fn notify(&self, notice: Notice) {
        eprintln!("! {}", notice.message());
    }
}

fn print_tasks(snapshot: &Snapshot) {
    if snapshot.is_empty() {
        println!("(no tasks)");
        return;
    }
    for task in snapshot.tasks() {
        println!("{}  {}", task.id, task.text);
    }
}

#[tokio::main]
async fn main() {
    // (A) logging + storage location（引数1つ: データファイルのパス）
    let _logger = flexi_logger::Logger::try_with_env_or_str("info")
        .expect("default log spec is valid")
        .start()
        .expect("logger starts");
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "oficina-tasks.json".to_string());

    // (B) wire the app: file-backed store + terminal alerts
    let app = AppBuilder::new()
        .storage(Arc::new(FileKeyValueStore::new(&path)))
        .notices(Arc::new(TerminalNotices))
        .build()
        .await
        .expect("storage was configured");

    println!("oficina - tasks from {path}");
    print_tasks(&app.snapshot());
    println!("commands: add <text> | del <id> | list | quit");

    // (C) read-eval loop: the stand-in for the single mobile screen
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let (command, rest) = match line.split_once(' ') {
            Some((command, rest)) => (command, rest),
            None => (line.as_str(), ""),
        };

        match command {
            "quit" | "exit" => break,
            "list" => print_tasks(&app.snapshot()),
            // `rest` is passed through untrimmed: padding is part of the
            // task text, only the emptiness check trims.
            "add" => {
                if app.add_task(rest).is_ok() {
                    print_tasks(&app.snapshot());
                }
            }
            "del" => match rest.trim().parse::<TaskId>() {
                Ok(id) => {
                    // Unknown ids are a silent no-op, same as the app.
                    app.delete_task(id);
                    print_tasks(&app.snapshot());
                }
                Err(_) => eprintln!("! not a task id: {rest}"),
            },
            "" => {}
            other => eprintln!("? unknown command: {other}"),
        }
    }

    // (D) graceful stop so the last background save lands
    app.shutdown().await;
}
