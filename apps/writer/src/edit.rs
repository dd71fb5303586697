//! Interactive editor loop.
//!
//! Each stdin line is one command: `title: ...`, `body: ...` or `image: ...`
//! replace a field, `:publish` saves immediately, `:quit` leaves after the
//! last pending save has landed. Saves happen in the background and are
//! reported as they land.

use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};

use quill_client::{AutosaveEvent, Autosaver, Field, GraphQLClient, Navigation};

#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    Set(Field, String),
    Publish,
    Quit,
    Unknown,
}

pub fn parse_line(line: &str) -> Input {
    let line = line.trim_end_matches(['\r', '\n']);
    match line.trim() {
        ":publish" => return Input::Publish,
        ":quit" | ":q" => return Input::Quit,
        _ => {}
    }

    let Some((key, value)) = line.split_once(':') else {
        return Input::Unknown;
    };
    let field = match key.trim() {
        "title" => Field::Title,
        "body" => Field::Body,
        "image" => Field::Image,
        _ => return Input::Unknown,
    };
    Input::Set(field, value.trim().to_string())
}

pub async fn run(client: GraphQLClient, id: Option<String>, delay: Duration) -> anyhow::Result<()> {
    let (autosaver, mut events) = Autosaver::open(Arc::new(client), id.as_deref(), delay).await?;

    let draft = autosaver.draft().await;
    println!("editing {}", autosaver.route().await);
    println!("title: {}", draft.title);
    println!("body: {}", draft.body);
    println!("image: {}", draft.image.as_deref().unwrap_or(""));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_line(&line) {
                    Input::Set(field, value) => {
                        autosaver.edit(field, value).await;
                    }
                    Input::Publish => {
                        if let Err(e) = autosaver.publish().await {
                            eprintln!("{e}");
                        }
                    }
                    Input::Quit => break,
                    Input::Unknown => {
                        eprintln!("expected `title: ...`, `body: ...`, `image: ...`, :publish or :quit");
                    }
                }
            }
            Some(event) = events.recv() => report(event),
        }
    }

    autosaver.close().await;
    while let Some(event) = events.recv().await {
        report(event);
    }
    Ok(())
}

fn report(event: AutosaveEvent) {
    match event {
        AutosaveEvent::Saved(post) => println!("saved {}", post.id),
        AutosaveEvent::Navigate(Navigation::Replace(route)) => println!("now editing {route}"),
        AutosaveEvent::Failed(reason) => eprintln!("save failed: {reason}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        assert_eq!(
            parse_line("title: Hello: world"),
            Input::Set(Field::Title, "Hello: world".into())
        );
        assert_eq!(parse_line("body:text\n"), Input::Set(Field::Body, "text".into()));
        assert_eq!(parse_line("image:"), Input::Set(Field::Image, String::new()));
        assert_eq!(parse_line(" :publish "), Input::Publish);
        assert_eq!(parse_line(":quit"), Input::Quit);
        assert_eq!(parse_line("tags: rust"), Input::Unknown);
        assert_eq!(parse_line("nonsense"), Input::Unknown);
    }
}
