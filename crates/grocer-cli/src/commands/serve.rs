//! Serve command handler
//!
//! Speaks newline-delimited JSON on stdio: one request per line in, one
//! response per line out. Change notifications are interleaved as their
//! own JSON lines so a frontend driving the list can re-fetch on change.
//!
//! ```text
//! > {"op":"add","name":"Milk","quantity":2}
//! {"type":"item","item":{...}}
//! {"event":"listUpdated"}
//! ```

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use grocer_core::{ErrorKind, ListService, ListStore, Request, Response};

/// Run the request loop until stdin closes
pub async fn run(store: ListStore) -> Result<()> {
    let service = ListService::new(store);
    let mut events = service.subscribe();

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    info!("serving shopping list requests on stdin");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim().is_empty() {
                    continue;
                }

                let response = match serde_json::from_str::<Request>(line.trim()) {
                    Ok(request) => service.dispatch(request).await,
                    Err(err) => Response::Error {
                        kind: ErrorKind::InvalidArgument,
                        message: format!("unrecognized request: {}", err),
                    },
                };
                println!("{}", serde_json::to_string(&response)?);
            }
            event = events.recv() => {
                if let Ok(event) = event {
                    println!("{}", serde_json::to_string(&event)?);
                }
            }
        }
    }

    Ok(())
}
